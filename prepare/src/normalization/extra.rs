use std::collections::HashMap;

use unicode_text::normalization::data::{
    COMP_1_LAST_TUPLE, COMP_1_TRAIL_LIMIT, COMP_1_TRAIL_SHIFT, COMP_1_TRIPLE, COMP_2_TRAIL_SHIFT,
    MAPPING_HAS_CCC_LCCC_WORD, MAPPING_LENGTH_MASK, MAX_DELTA,
};
use unicode_text::utf16;

use super::norms::{MappingType, Norm, NormType, Norms};
use crate::PrepareError;

/// разделы extraData в порядке следования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section
{
    YesYesCompositions,
    YesNoMappingsAndCompositions,
    YesNoMappingsOnly,
    NoNoCompYes,
    NoNoCompBoundaryBefore,
    NoNoCompNoMaybeCc,
    NoNoEmpty,
}

pub const SECTIONS: [Section; 7] = [
    Section::YesYesCompositions,
    Section::YesNoMappingsAndCompositions,
    Section::YesNoMappingsOnly,
    Section::NoNoCompYes,
    Section::NoNoCompBoundaryBefore,
    Section::NoNoCompNoMaybeCc,
    Section::NoNoEmpty,
];

/// где лежат данные кодпоинта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement
{
    /// смещение первой кодовой единицы в разделе extraData
    Extra(Section, usize),
    /// смещение списка композиций в maybeYesCompositions
    MaybeYes(usize),
    /// отображение на кодпоинт code + delta
    Delta(i32),
    /// данные только в самом значении norm16
    None,
}

/// отображения и списки композиций, разложенные по разделам
pub struct ExtraData
{
    pub maybe_yes_compositions: Vec<u16>,
    sections: HashMap<Section, Vec<u16>>,
    /// одинаковые отображения noNo записываются один раз
    dedup: HashMap<(Section, Vec<u16>), usize>,
}

impl ExtraData
{
    pub fn new() -> Self
    {
        let mut sections = HashMap::new();

        // 0 - инертный, 1 - чамо L (безвредно читает 0xFFFF), дальше - списки композиций
        sections.insert(Section::YesYesCompositions, vec![0xFFFF, 0xFFFF]);
        // слоги хангыль LV и LVT раскладываются алгоритмически, первая единица - длина разложения
        sections.insert(Section::YesNoMappingsAndCompositions, vec![2]);
        sections.insert(Section::YesNoMappingsOnly, vec![3]);

        for section in SECTIONS.iter().skip(3) {
            sections.insert(*section, vec![]);
        }

        Self {
            maybe_yes_compositions: vec![],
            sections,
            dedup: HashMap::new(),
        }
    }

    pub fn section(&self, section: Section) -> &[u16]
    {
        self.sections.get(&section).map(|s| s.as_slice()).unwrap_or(&[])
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<u16>
    {
        self.sections.entry(section).or_default()
    }

    /// записать данные кодпоинта, вернуть их расположение
    pub fn write(&mut self, code: u32, norm: &Norm, norms: &Norms) -> Result<Placement, PrepareError>
    {
        let combines_fwd = !norm.compositions.is_empty();

        if combines_fwd && norm.cc != 0 {
            return Err(PrepareError::Mapping {
                code,
                reason: "комбинируется с последующими и имеет ненулевой ccc",
            });
        }

        let placement = match norm.norm_type {
            NormType::Inert | NormType::MaybeYesSimple | NormType::YesYesWithCc => Placement::None,
            NormType::YesYesCombinesFwd => {
                let offset = self.section(Section::YesYesCompositions).len();
                let compositions = compositions(norm, norms);
                self.section_mut(Section::YesYesCompositions).extend(compositions);

                Placement::Extra(Section::YesYesCompositions, offset)
            }
            NormType::MaybeYesCombinesFwd => {
                let offset = self.maybe_yes_compositions.len();
                let compositions = compositions(norm, norms);
                self.maybe_yes_compositions.extend(compositions);

                Placement::MaybeYes(offset)
            }
            NormType::YesNoCombinesFwd => {
                let offset = self.write_mapping(code, Section::YesNoMappingsAndCompositions, norm, false)?;
                let compositions = compositions(norm, norms);
                self.section_mut(Section::YesNoMappingsAndCompositions).extend(compositions);

                Placement::Extra(Section::YesNoMappingsAndCompositions, offset)
            }
            NormType::YesNoMappingOnly => {
                let offset = self.write_mapping(code, Section::YesNoMappingsOnly, norm, false)?;
                Placement::Extra(Section::YesNoMappingsOnly, offset)
            }
            NormType::NoNoCompYes | NormType::NoNoCompBoundaryBefore => match delta(code, norm, norms) {
                Some(delta) => Placement::Delta(delta),
                None => {
                    let section = match norm.norm_type {
                        NormType::NoNoCompYes => Section::NoNoCompYes,
                        _ => Section::NoNoCompBoundaryBefore,
                    };

                    Placement::Extra(section, self.write_mapping(code, section, norm, true)?)
                }
            },
            NormType::NoNoCompNoMaybeCc => Placement::Extra(
                Section::NoNoCompNoMaybeCc,
                self.write_mapping(code, Section::NoNoCompNoMaybeCc, norm, true)?,
            ),
            NormType::NoNoEmpty => {
                Placement::Extra(Section::NoNoEmpty, self.write_mapping(code, Section::NoNoEmpty, norm, true)?)
            }
            NormType::NoNoDelta => {
                return Err(PrepareError::Mapping {
                    code,
                    reason: "тип NoNoDelta назначается только при записи",
                })
            }
        };

        Ok(placement)
    }

    /// [cccLccc] firstUnit отображение; возвращает смещение firstUnit
    fn write_mapping(&mut self, code: u32, section: Section, norm: &Norm, dedup: bool) -> Result<usize, PrepareError>
    {
        let mut units = vec![];

        for &c in norm.mapping.iter() {
            utf16::push(&mut units, c);
        }

        if units.len() > MAPPING_LENGTH_MASK as usize {
            return Err(PrepareError::Mapping {
                code,
                reason: "отображение длиннее 31 кодовой единицы",
            });
        }

        let mut first = units.len() as u16 | ((norm.trail_cc as u16) << 8);
        let mut entry = vec![];

        if norm.cc != 0 || norm.lead_cc != 0 {
            entry.push(norm.cc as u16 | ((norm.lead_cc as u16) << 8));
            first |= MAPPING_HAS_CCC_LCCC_WORD;
        }

        entry.push(first);
        entry.extend(units);

        let prefix = entry.len() - 1 - (first & MAPPING_LENGTH_MASK) as usize;

        if dedup {
            if let Some(&offset) = self.dedup.get(&(section, entry.clone())) {
                return Ok(offset);
            }
        }

        let data = self.section_mut(section);
        let offset = data.len() + prefix;
        data.extend_from_slice(&entry);

        if dedup {
            self.dedup.insert((section, entry), offset);
        }

        Ok(offset)
    }
}

/// алгоритмическое отображение: один кодпоинт с "yes" данными недалеко от исходного
fn delta(code: u32, norm: &Norm, norms: &Norms) -> Option<i32>
{
    if norm.mapping_type != MappingType::OneWay || norm.cc != 0 {
        return None;
    }

    let target = norm.mapping_code()?;

    // не отображаем ASCII в не-ASCII
    if code <= 0x7F && target > 0x7F {
        return None;
    }

    let target_type = norms.get(target).map(|n| n.norm_type).unwrap_or(NormType::Inert);
    let delta = target as i32 - code as i32;

    match target_type < NormType::NoNoCompYes && (-MAX_DELTA ..= MAX_DELTA).contains(&delta) {
        true => Some(delta),
        false => None,
    }
}

/// список композиций: пары по возрастанию второго кодпоинта, последняя помечена
fn compositions(norm: &Norm, norms: &Norms) -> Vec<u16>
{
    let mut units = vec![];
    let count = norm.compositions.len();

    for (i, &(trail, composite)) in norm.compositions.iter().enumerate() {
        let combines_fwd = norms.get(composite).is_some_and(|n| !n.compositions.is_empty());
        let composite_and_fwd = (composite << 1) | combines_fwd as u32;

        let (mut first, rest): (u16, Vec<u16>) = match trail < COMP_1_TRAIL_LIMIT {
            true => match composite_and_fwd > 0xFFFF {
                true => (
                    (trail << 1) as u16 | COMP_1_TRIPLE,
                    vec![(composite_and_fwd >> 16) as u16, composite_and_fwd as u16],
                ),
                false => ((trail << 1) as u16, vec![composite_and_fwd as u16]),
            },
            false => (
                (COMP_1_TRAIL_LIMIT + (trail >> COMP_1_TRAIL_SHIFT)) as u16 | COMP_1_TRIPLE,
                vec![
                    ((trail << COMP_2_TRAIL_SHIFT) | (composite_and_fwd >> 16)) as u16,
                    composite_and_fwd as u16,
                ],
            ),
        };

        if i + 1 == count {
            first |= COMP_1_LAST_TUPLE;
        }

        units.push(first);
        units.extend(rest);
    }

    units
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::normalization::MappingSet;

    fn norms() -> Norms
    {
        let mut norms = Norms::new(MappingSet::Canonical);
        norms.post_process();
        norms
    }

    #[test]
    fn composition_lists()
    {
        let norms = norms();

        // U+00C5 + U+0301 -> U+01FA, U+01FA ни с чем не комбинируется
        let units = compositions(norms.get(0xC5).unwrap(), &norms);
        assert_eq!(units, [(0x301 << 1) | COMP_1_LAST_TUPLE, 0x1FA << 1]);

        // второй кодпоинт за пределами COMP_1_TRAIL_LIMIT - всегда три кодовые единицы;
        // U+1D15E исключён из композиции, поэтому у U+1D157 своих данных нет и пара задаётся вручную
        assert!(norms.get(0x1D157).is_none());

        let mut norm = norms.get(0xC5).cloned().unwrap();
        norm.compositions = vec![(0x1D165, 0x1D15E)];

        let caf: u32 = 0x1D15E << 1;
        assert_eq!(
            compositions(&norm, &norms),
            [
                (0x3400 + (0x1D165 >> 9)) as u16 | COMP_1_TRIPLE | COMP_1_LAST_TUPLE,
                ((0x1D165u32 << 6) | (caf >> 16)) as u16,
                caf as u16
            ]
        );
    }

    #[test]
    fn deltas()
    {
        let norms = norms();

        // U+2126 OHM SIGN -> U+03A9: слишком далеко
        assert_eq!(delta(0x2126, norms.get(0x2126).unwrap(), &norms), None);
        // U+0340 -> U+0300: ccc 230
        assert_eq!(delta(0x340, norms.get(0x340).unwrap(), &norms), None);
        // U+2000 EN QUAD -> U+2002 EN SPACE
        assert_eq!(delta(0x2000, norms.get(0x2000).unwrap(), &norms), Some(2));
    }

    #[test]
    fn mappings_are_deduplicated()
    {
        let norms = norms();
        let mut extra = ExtraData::new();

        let norm = norms.get(0x212B).unwrap();
        let first = extra.write(0x212B, norm, &norms).unwrap();
        let second = extra.write(0x212B, norm, &norms).unwrap();

        assert_eq!(first, Placement::Extra(Section::NoNoCompBoundaryBefore, 0));
        assert_eq!(first, second);
        // tccc = 230 в старшем байте первой единицы
        assert_eq!(extra.section(Section::NoNoCompBoundaryBefore), [2 | (230 << 8), 0x41, 0x30A]);
    }
}
