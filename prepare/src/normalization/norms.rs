use std::collections::BTreeMap;

use unicode_text_source::normalization::hangul::is_hangul_syllable;
use unicode_text_source::{is_full_composition_exclusion, COMPOSITION_PAIRS, NFD, NFKD, UNICODE};

use super::MappingSet;

/// тип отображения кодпоинта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingType
{
    None,
    /// каноническая пара, восстанавливаемая композицией
    RoundTrip,
    OneWay,
}

/// группа значений norm16; порядок вариантов совпадает с порядком диапазонов norm16
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormType
{
    Inert,
    YesYesCombinesFwd,
    YesNoCombinesFwd,
    YesNoMappingOnly,
    NoNoCompYes,
    NoNoCompBoundaryBefore,
    NoNoCompNoMaybeCc,
    NoNoEmpty,
    NoNoDelta,
    MaybeYesCombinesFwd,
    MaybeYesSimple,
    YesYesWithCc,
}

/// данные нормализации одного кодпоинта
#[derive(Debug, Clone)]
pub struct Norm
{
    pub cc: u8,
    pub mapping_type: MappingType,
    /// сырое (одноуровневое) отображение, для пар - первый и второй кодпоинты
    pub raw_mapping: Vec<u32>,
    /// полное отображение в каноническом порядке
    pub mapping: Vec<u32>,
    pub lead_cc: u8,
    pub trail_cc: u8,
    pub combines_back: bool,
    /// пары (второй кодпоинт, композит), по возрастанию второго кодпоинта
    pub compositions: Vec<(u32, u32)>,
    pub has_comp_boundary_before: bool,
    pub has_comp_boundary_after: bool,
    pub norm_type: NormType,
}

impl Norm
{
    fn new(cc: u8) -> Self
    {
        Self {
            cc,
            mapping_type: MappingType::None,
            raw_mapping: vec![],
            mapping: vec![],
            lead_cc: 0,
            trail_cc: 0,
            combines_back: false,
            compositions: vec![],
            has_comp_boundary_before: true,
            has_comp_boundary_after: true,
            norm_type: NormType::Inert,
        }
    }

    /// композит пары (этот кодпоинт, trail)
    pub fn combine(&self, trail: u32) -> Option<u32>
    {
        self.compositions
            .binary_search_by_key(&trail, |&(second, _)| second)
            .ok()
            .map(|i| self.compositions[i].1)
    }

    /// кодпоинт, на который отображается символ, если отображение - один кодпоинт
    pub fn mapping_code(&self) -> Option<u32>
    {
        match self.mapping.as_slice() {
            [code] => Some(*code),
            _ => None,
        }
    }
}

/// данные нормализации всех кодпоинтов, имеющих хоть какие-то свойства
pub struct Norms
{
    norms: BTreeMap<u32, Norm>,
}

pub fn is_jamo_l(code: u32) -> bool
{
    (0x1100 .. 0x1113).contains(&code)
}

pub fn is_jamo_v(code: u32) -> bool
{
    (0x1161 .. 0x1176).contains(&code)
}

pub fn is_jamo_t(code: u32) -> bool
{
    (0x11A8 .. 0x11C3).contains(&code)
}

fn is_jamo(code: u32) -> bool
{
    is_jamo_l(code) || is_jamo_v(code) || is_jamo_t(code)
}

/// класс канонического комбинирования по UnicodeData.txt
fn ccc(code: u32) -> u8
{
    UNICODE.get(&code).map(|codepoint| codepoint.ccc).unwrap_or(0)
}

/// канонический порядок: соседние нестартеры упорядочены по ccc (устойчиво)
pub fn canonical_order(mapping: &mut [u32])
{
    for i in 1 .. mapping.len() {
        let mut j = i;

        while j > 0 {
            let (prev, cc) = (ccc(mapping[j - 1]), ccc(mapping[j]));

            if cc == 0 || prev <= cc {
                break;
            }

            mapping.swap(j - 1, j);
            j -= 1;
        }
    }
}

impl Norms
{
    /// собрать данные для композиции NFC (канонические отображения) или NFKC
    pub fn new(mappings: MappingSet) -> Self
    {
        let mut norms = BTreeMap::new();

        for codepoint in UNICODE.values() {
            let code = codepoint.code;

            if is_hangul_syllable(code) {
                continue;
            }

            let mut norm = Norm::new(codepoint.ccc);

            let canonical = codepoint.has_canonical_decomposition();

            let full = match (mappings, canonical) {
                (_, true) => NFD.get(&code),
                (MappingSet::Compatibility, false) => NFKD.get(&code),
                (MappingSet::Canonical, false) => None,
            };

            if let Some(full) = full {
                norm.raw_mapping = codepoint.decomposition.clone();
                norm.mapping = full.clone();

                let round_trip = canonical && codepoint.decomposition.len() == 2 && !is_full_composition_exclusion(code);

                norm.mapping_type = match round_trip {
                    true => MappingType::RoundTrip,
                    false => MappingType::OneWay,
                };

                // у символа есть отличающееся отображение совместимости (U+1E9B -> s + U+0307)
                if mappings == MappingSet::Compatibility && canonical {
                    if let Some(compat) = NFKD.get(&code).filter(|compat| *compat != full) {
                        norm.mapping = compat.clone();
                        norm.mapping_type = MappingType::OneWay;
                    }
                }

                canonical_order(&mut norm.mapping);
            }

            if norm.cc != 0 || norm.mapping_type != MappingType::None {
                norms.insert(code, norm);
            }
        }

        let mut norms = Self { norms };
        norms.add_compositions();

        norms
    }

    /// пары композиции - только от символов, которые в этом режиме восстанавливаются композицией
    fn add_compositions(&mut self)
    {
        let mut pairs: Vec<(u32, u32, u32)> = COMPOSITION_PAIRS
            .iter()
            .flat_map(|(&first, seconds)| seconds.iter().map(move |(&second, &composite)| (first, second, composite)))
            .filter(|(_, _, composite)| {
                self.norms
                    .get(composite)
                    .is_some_and(|norm| norm.mapping_type == MappingType::RoundTrip)
            })
            .collect();

        pairs.sort_unstable();

        for (first, second, composite) in pairs {
            self.norms
                .entry(first)
                .or_insert_with(|| Norm::new(ccc(first)))
                .compositions
                .push((second, composite));

            self.norms
                .entry(second)
                .or_insert_with(|| Norm::new(ccc(second)))
                .combines_back = true;
        }
    }

    pub fn get(&self, code: u32) -> Option<&Norm>
    {
        self.norms.get(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Norm)>
    {
        self.norms.iter().map(|(&code, norm)| (code, norm))
    }

    pub fn cc(&self, code: u32) -> u8
    {
        self.norms.get(&code).map(|norm| norm.cc).unwrap_or(0)
    }

    pub fn combines_back(&self, code: u32) -> bool
    {
        is_jamo_v(code) || is_jamo_t(code) || self.norms.get(&code).is_some_and(|norm| norm.combines_back)
    }

    fn has_compositions(&self, code: u32) -> bool
    {
        self.norms.get(&code).is_some_and(|norm| !norm.compositions.is_empty())
    }

    /// есть ли у стартера композиция со знаком, ccc которого строго между low и high
    fn combines_with_cc_between(&self, starter: u32, low: u8, high: u16) -> bool
    {
        if high < low as u16 + 2 {
            return false;
        }

        self.norms.get(&starter).is_some_and(|norm| {
            norm.compositions.iter().any(|&(trail, _)| {
                let cc = self.cc(trail);
                low < cc && (cc as u16) < high
            })
        })
    }

    /// определить lccc/tccc, границы композиции и тип norm16 всех кодпоинтов
    pub fn post_process(&mut self)
    {
        let codes: Vec<u32> = self.norms.keys().copied().collect();

        for code in codes {
            let analyzed = match self.norms.get(&code) {
                Some(norm) => self.analyze(norm),
                None => continue,
            };

            self.norms.insert(code, analyzed);
        }
    }

    fn analyze(&self, norm: &Norm) -> Norm
    {
        let mut norm = norm.clone();

        if norm.mapping_type == MappingType::None {
            norm.lead_cc = norm.cc;
            norm.trail_cc = norm.cc;
            norm.has_comp_boundary_before = norm.cc == 0 && !norm.combines_back;
            norm.has_comp_boundary_after = norm.compositions.is_empty() && norm.cc == 0;

            norm.norm_type = match (norm.combines_back, !norm.compositions.is_empty()) {
                (true, true) => NormType::MaybeYesCombinesFwd,
                (true, false) => NormType::MaybeYesSimple,
                (false, true) => NormType::YesYesCombinesFwd,
                (false, false) if norm.cc != 0 => NormType::YesYesWithCc,
                (false, false) => NormType::Inert,
            };

            return norm;
        }

        let mapping = &norm.mapping;

        norm.lead_cc = mapping.first().map(|&c| ccc(c)).unwrap_or(0);
        norm.trail_cc = mapping.last().map(|&c| ccc(c)).unwrap_or(0);

        norm.has_comp_boundary_before = !mapping.is_empty() && norm.lead_cc == 0 && !self.combines_back(mapping[0]);
        norm.has_comp_boundary_after =
            norm.compositions.is_empty() && self.mapping_has_comp_boundary_after(mapping, norm.mapping_type);

        norm.norm_type = match norm.mapping_type {
            MappingType::RoundTrip => match norm.compositions.is_empty() {
                true => NormType::YesNoMappingOnly,
                false => NormType::YesNoCombinesFwd,
            },
            _ if mapping.is_empty() => NormType::NoNoEmpty,
            _ if !norm.has_comp_boundary_before => NormType::NoNoCompNoMaybeCc,
            _ if self.mapping_recomposes(mapping) => NormType::NoNoCompBoundaryBefore,
            _ => NormType::NoNoCompYes,
        };

        norm
    }

    /// индекс последнего стартера отображения
    fn last_starter(mapping: &[u32]) -> Option<usize>
    {
        mapping.iter().rposition(|&c| ccc(c) == 0)
    }

    /// скомпонуется ли что-то внутри самого отображения
    pub fn mapping_recomposes(&self, mapping: &[u32]) -> bool
    {
        if Self::last_starter(mapping).is_none() {
            return false;
        }

        let mut starter: Option<&Norm> = None;
        let mut prev_cc = 0;

        for (i, &c) in mapping.iter().enumerate() {
            let cc = ccc(c);

            if let Some(norm) = starter {
                if (prev_cc < cc || prev_cc == 0) && self.combines_back(c) && norm.combine(c).is_some() {
                    return true;
                }
            }

            if cc == 0 {
                if is_jamo_l(c) {
                    if mapping.get(i + 1).is_some_and(|&next| is_jamo_v(next)) {
                        return true;
                    }

                    starter = None;
                } else {
                    starter = self.norms.get(&c);
                }
            }

            prev_cc = cc;
        }

        false
    }

    /// может ли что-то после отображения скомпоноваться с его концом
    pub fn mapping_has_comp_boundary_after(&self, mapping: &[u32], mapping_type: MappingType) -> bool
    {
        let last_starter = match Self::last_starter(mapping) {
            Some(index) => index,
            None => return false,
        };

        let last = mapping.len() - 1;

        // после стартера - знак с ccc > 1, перед которым может встать другой знак
        if mapping_type == MappingType::OneWay && last_starter < last && ccc(mapping[last]) > 1 {
            return false;
        }

        let mut starter = mapping[last_starter];

        if last_starter == 0 && self.combines_back(starter) {
            return false;
        }

        if is_jamo_l(starter) || (is_jamo_v(starter) && last_starter > 0 && is_jamo_l(mapping[last_starter - 1])) {
            return last_starter != last;
        }

        // несколько стартеров подряд могут скомпоноваться в один
        let mut i = last_starter;

        while i > 0 && ccc(mapping[i - 1]) == 0 && !is_jamo(mapping[i - 1]) {
            starter = mapping[i - 1];
            i -= 1;
        }

        if i == last_starter && !self.has_compositions(starter) {
            return true;
        }

        let mut prev_cc = 0;

        for (j, &c) in mapping.iter().enumerate().skip(i + 1) {
            let cc = ccc(c);

            if j > last_starter && self.combines_with_cc_between(starter, prev_cc, cc as u16) {
                return false;
            }

            let composite = match prev_cc < cc || prev_cc == 0 {
                true if self.combines_back(c) => self.norms.get(&starter).and_then(|norm| norm.combine(c)),
                _ => None,
            };

            if let Some(composite) = composite {
                starter = composite;

                if j >= last_starter && !self.has_compositions(starter) {
                    return true;
                }
            } else if cc == 0 {
                starter = c;

                if j == last_starter && !self.has_compositions(starter) {
                    return true;
                }

                prev_cc = 0;
            } else {
                prev_cc = cc;
            }
        }

        if prev_cc == 0 {
            // стартер в самом конце комбинируется с последующими
            return false;
        }

        !self.combines_with_cc_between(starter, prev_cc, 256)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn norms(mappings: MappingSet) -> Norms
    {
        let mut norms = Norms::new(mappings);
        norms.post_process();
        norms
    }

    #[test]
    fn types()
    {
        let nfc = norms(MappingSet::Canonical);
        let norm_type = |code: u32| nfc.get(code).map(|norm| norm.norm_type).unwrap_or(NormType::Inert);

        assert_eq!(norm_type(0x41), NormType::YesYesCombinesFwd);
        assert_eq!(norm_type(0xC5), NormType::YesNoCombinesFwd);
        assert_eq!(norm_type(0x1E69), NormType::YesNoMappingOnly);
        assert_eq!(norm_type(0x212B), NormType::NoNoCompBoundaryBefore);
        assert_eq!(norm_type(0x2126), NormType::NoNoCompYes);
        assert_eq!(norm_type(0x301), NormType::MaybeYesSimple);
        assert_eq!(norm_type(0x316), NormType::YesYesWithCc);
        assert_eq!(norm_type(0x344), NormType::NoNoCompNoMaybeCc);
        assert_eq!(norm_type(0xA0), NormType::Inert);

        let nfkc = norms(MappingSet::Compatibility);
        let norm_type = |code: u32| nfkc.get(code).map(|norm| norm.norm_type).unwrap_or(NormType::Inert);

        assert_eq!(norm_type(0xA0), NormType::NoNoCompYes);
        assert_eq!(norm_type(0xC5), NormType::YesNoCombinesFwd);
        assert_eq!(norm_type(0x1E9B), NormType::NoNoCompBoundaryBefore);
    }

    #[test]
    fn mappings_in_canonical_order()
    {
        let nfc = norms(MappingSet::Canonical);

        // U+1E69: s + U+0323 (220) + U+0307 (230)
        let norm = nfc.get(0x1E69).unwrap();
        assert_eq!(norm.mapping, [0x73, 0x323, 0x307]);
        assert_eq!((norm.lead_cc, norm.trail_cc), (0, 230));

        let mut mapping = [0x61, 0x301, 0x316, 0x315];
        canonical_order(&mut mapping);
        assert_eq!(mapping, [0x61, 0x316, 0x301, 0x315]);
    }

    #[test]
    fn comp_boundaries()
    {
        let nfc = norms(MappingSet::Canonical);

        // A + кольцо: кольцо может скомпоноваться дальше (U+01FA)
        assert!(!nfc.mapping_has_comp_boundary_after(&[0x41, 0x30A], MappingType::RoundTrip));
        assert!(nfc.mapping_has_comp_boundary_after(&[0x2126], MappingType::OneWay));
        assert!(!nfc.mapping_has_comp_boundary_after(&[0x1100], MappingType::OneWay));
        assert!(nfc.mapping_recomposes(&[0x41, 0x30A]));
        assert!(!nfc.mapping_recomposes(&[0x3A9]));
    }
}
