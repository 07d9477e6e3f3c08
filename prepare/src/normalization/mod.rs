//! Подготовка данных нормализации в формате Nrm2 (версия 4).
//!
//! Для каждого кодпоинта определяется тип (см. [`NormType`]), отображения и списки композиций
//! раскладываются по разделам extraData, а значение norm16 кодирует раздел и смещение в нём.

use std::collections::HashMap;

use unicode_text::data::{write_header, ByteOrder, VersionInfo};
use unicode_text::normalization::data::{
    DELTA_SHIFT, DELTA_TCCC_0, DELTA_TCCC_1, DELTA_TCCC_GT_1, FORMAT, FORMAT_VERSION, HAS_COMP_BOUNDARY_AFTER, INERT,
    IX_COUNT, IX_EXTRA_DATA_OFFSET, IX_LIMIT_NO_NO, IX_MIN_COMP_NO_MAYBE_CP, IX_MIN_DECOMP_NO_CP, IX_MIN_LCCC_CP,
    IX_MIN_MAYBE_YES, IX_MIN_NO_NO, IX_MIN_NO_NO_COMP_BOUNDARY_BEFORE, IX_MIN_NO_NO_COMP_NO_MAYBE_CC,
    IX_MIN_NO_NO_EMPTY, IX_MIN_YES_NO, IX_MIN_YES_NO_MAPPINGS_ONLY, IX_NORM_TRIE_OFFSET, IX_RESERVED3_OFFSET,
    IX_SMALL_FCD_OFFSET, IX_TOTAL_SIZE, JAMO_L, JAMO_VT, MAX_DELTA, MIN_NORMAL_MAYBE_YES, SMALL_FCD_LENGTH,
};
use unicode_text::trie::ValueWidth;
use unicode_text::utf16;
use unicode_text_source::normalization::hangul::{HANGUL_S_BASE, HANGUL_S_COUNT, HANGUL_T_COUNT};

use crate::bytes::PushBytes;
use crate::trie::TrieBuilder;
use crate::{unicode_version, PrepareError, Stats};

mod extra;
mod norms;

pub use extra::{ExtraData, Placement, Section, SECTIONS};
pub use norms::{canonical_order, MappingType, Norm, NormType, Norms};

/// набор отображений: канонические (NFC) или вместе с отображениями совместимости (NFKC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingSet
{
    Canonical,
    Compatibility,
}

/// расстояние между limit_no_no и min_maybe_yes, занятое алгоритмическими отображениями
const DELTA_RANGE: usize = ((MAX_DELTA as usize) << DELTA_SHIFT) * 2 + 8;

/// пороги norm16
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds
{
    pub min_yes_no: u16,
    pub min_yes_no_mappings_only: u16,
    pub min_no_no: u16,
    pub min_no_no_comp_boundary_before: u16,
    pub min_no_no_comp_no_maybe_cc: u16,
    pub min_no_no_empty: u16,
    pub limit_no_no: u16,
    pub min_maybe_yes: u16,
}

/// наименьшие кодпоинты со свойствами, ниже которых проверки можно пропускать
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Minimums
{
    decomp_no: u32,
    comp_no_maybe: u32,
    lccc: u32,
}

/// собрать файл данных нормализации
pub fn build(mappings: MappingSet, order: ByteOrder, stats: &mut Stats) -> Result<Vec<u8>, PrepareError>
{
    let mut norms = Norms::new(mappings);
    norms.post_process();

    let mut extra = ExtraData::new();
    let mut placements = vec![];

    for (code, norm) in norms.iter() {
        let placement = extra.write(code, norm, &norms)?;

        let group = match placement {
            Placement::Delta(_) => NormType::NoNoDelta,
            _ => norm.norm_type,
        };

        *stats.entry(format!("{:?}", group)).or_insert(0) += 1;
        placements.push((code, placement));
    }

    let mut compositions = extra.maybe_yes_compositions.clone();

    // min_maybe_yes кратен 8
    while compositions.len() % 4 != 0 {
        compositions.push(0);
    }

    let mut starts = HashMap::new();
    let mut position = 0;

    for section in SECTIONS {
        starts.insert(section, position);
        position += extra.section(section).len();
    }

    let start = |section: Section| (starts[&section] << 1) as u16;

    let min_maybe_yes = MIN_NORMAL_MAYBE_YES as usize - (compositions.len() << 1);

    if (position << 1) + DELTA_RANGE > min_maybe_yes {
        return Err(PrepareError::NormalizationOverflow(format!(
            "extraData {} единиц, maybeYes {} единиц",
            position,
            compositions.len()
        )));
    }

    let thresholds = Thresholds {
        min_yes_no: start(Section::YesNoMappingsAndCompositions),
        min_yes_no_mappings_only: start(Section::YesNoMappingsOnly),
        min_no_no: start(Section::NoNoCompYes),
        min_no_no_comp_boundary_before: start(Section::NoNoCompBoundaryBefore),
        min_no_no_comp_no_maybe_cc: start(Section::NoNoCompNoMaybeCc),
        min_no_no_empty: start(Section::NoNoEmpty),
        limit_no_no: (position << 1) as u16,
        min_maybe_yes: min_maybe_yes as u16,
    };

    let center = (thresholds.min_maybe_yes >> DELTA_SHIFT) as i32 - MAX_DELTA - 1;

    let mut trie = TrieBuilder::new(INERT as u32, INERT as u32);
    let mut small_fcd = [0u8; SMALL_FCD_LENGTH];
    let mut minimums = Minimums {
        decomp_no: 0x110000,
        comp_no_maybe: 0x110000,
        lccc: 0x110000,
    };

    for (code, placement) in placements {
        let norm = match norms.get(code) {
            Some(norm) => norm,
            None => continue,
        };

        let after = norm.has_comp_boundary_after as u16 * HAS_COMP_BOUNDARY_AFTER;

        let norm16 = match placement {
            Placement::None => match norm.norm_type {
                NormType::MaybeYesSimple => MIN_NORMAL_MAYBE_YES | ((norm.cc as u16) << 1),
                NormType::YesYesWithCc => JAMO_VT + ((norm.cc as u16) << 1),
                _ => INERT,
            },
            Placement::MaybeYes(offset) => thresholds.min_maybe_yes + (offset << 1) as u16,
            Placement::Extra(section, offset) => (((starts[&section] + offset) << 1) as u16) | after,
            Placement::Delta(delta) => {
                let trail = match norm.trail_cc {
                    0 => DELTA_TCCC_0,
                    1 => DELTA_TCCC_1,
                    _ => DELTA_TCCC_GT_1,
                };

                (((center + delta) as u16) << DELTA_SHIFT) | trail | after
            }
        };

        let group = match placement {
            Placement::Delta(_) => NormType::NoNoDelta,
            _ => norm.norm_type,
        };

        if (NormType::YesNoCombinesFwd ..= NormType::NoNoDelta).contains(&group) || norm.cc != 0 {
            minimums.decomp_no = minimums.decomp_no.min(code);
        }

        if group >= NormType::NoNoCompYes {
            minimums.comp_no_maybe = minimums.comp_no_maybe.min(code);
        }

        if norm.lead_cc != 0 {
            minimums.lccc = minimums.lccc.min(code);
        }

        if norm.lead_cc != 0 || norm.trail_cc != 0 {
            let unit = match code > 0xFFFF {
                true => utf16::lead(code) as u32,
                false => code,
            };

            small_fcd[(unit >> 8) as usize] |= 1 << ((unit >> 5) & 7);
        }

        trie.set(code, norm16 as u32);
    }

    set_hangul(&mut trie, &thresholds, &mut minimums);
    set_lead_units(&mut trie);

    log::info!(
        "{:?}: extraData {} единиц, maybeYes {} единиц, {:?}",
        mappings,
        position,
        compositions.len(),
        thresholds
    );

    let trie = trie.serialize(ValueWidth::Bits16, order)?;

    let mut units = compositions;
    for section in SECTIONS {
        units.extend_from_slice(extra.section(section));
    }

    if units.len() % 2 != 0 {
        units.push(0);
    }

    let mut indexes = [0i32; IX_COUNT];

    indexes[IX_NORM_TRIE_OFFSET] = (IX_COUNT * 4) as i32;
    indexes[IX_EXTRA_DATA_OFFSET] = indexes[IX_NORM_TRIE_OFFSET] + trie.len() as i32;
    indexes[IX_SMALL_FCD_OFFSET] = indexes[IX_EXTRA_DATA_OFFSET] + (units.len() * 2) as i32;

    let total = indexes[IX_SMALL_FCD_OFFSET] + SMALL_FCD_LENGTH as i32;
    for i in IX_RESERVED3_OFFSET ..= IX_TOTAL_SIZE {
        indexes[i] = total;
    }

    indexes[IX_MIN_DECOMP_NO_CP] = minimums.decomp_no as i32;
    indexes[IX_MIN_COMP_NO_MAYBE_CP] = minimums.comp_no_maybe as i32;
    indexes[IX_MIN_YES_NO] = thresholds.min_yes_no as i32;
    indexes[IX_MIN_NO_NO] = thresholds.min_no_no as i32;
    indexes[IX_LIMIT_NO_NO] = thresholds.limit_no_no as i32;
    indexes[IX_MIN_MAYBE_YES] = thresholds.min_maybe_yes as i32;
    indexes[IX_MIN_YES_NO_MAPPINGS_ONLY] = thresholds.min_yes_no_mappings_only as i32;
    indexes[IX_MIN_NO_NO_COMP_BOUNDARY_BEFORE] = thresholds.min_no_no_comp_boundary_before as i32;
    indexes[IX_MIN_NO_NO_COMP_NO_MAYBE_CC] = thresholds.min_no_no_comp_no_maybe_cc as i32;
    indexes[IX_MIN_NO_NO_EMPTY] = thresholds.min_no_no_empty as i32;
    indexes[IX_MIN_LCCC_CP] = minimums.lccc as i32;

    let mut out = vec![];
    write_header(
        &mut out,
        order,
        FORMAT,
        VersionInfo::new(FORMAT_VERSION, 0, 0, 0),
        unicode_version(),
    );

    for index in indexes {
        out.push_i32(order, index);
    }

    out.extend_from_slice(&trie);

    for unit in units {
        out.push_u16(order, unit);
    }

    out.extend_from_slice(&small_fcd);

    Ok(out)
}

/// слоги хангыль раскладываются алгоритмически, чамо комбинируются алгоритмически
fn set_hangul(trie: &mut TrieBuilder, thresholds: &Thresholds, minimums: &mut Minimums)
{
    let lv = thresholds.min_yes_no as u32;
    let lvt = (thresholds.min_yes_no_mappings_only | HAS_COMP_BOUNDARY_AFTER) as u32;

    for code in HANGUL_S_BASE .. HANGUL_S_BASE + HANGUL_S_COUNT {
        match (code - HANGUL_S_BASE) % HANGUL_T_COUNT {
            0 => trie.set(code, lv),
            _ => trie.set(code, lvt),
        }
    }

    trie.set_range(0x1100, 0x1112, JAMO_L as u32);
    trie.set_range(0x1161, 0x1175, JAMO_VT as u32);
    trie.set_range(0x11A8, 0x11C2, JAMO_VT as u32);

    minimums.decomp_no = minimums.decomp_no.min(HANGUL_S_BASE);
    minimums.comp_no_maybe = minimums.comp_no_maybe.min(0x1161);
}

/// ведущий суррогат как кодовая единица: наибольшее значение среди его дополнительных кодпоинтов,
/// чтобы быстрые проверки "yes" для единицы были верны для всей пары
fn set_lead_units(trie: &mut TrieBuilder)
{
    for lead in 0xD800u16 ..= 0xDBFF {
        let base = 0x10000 + (((lead - 0xD800) as u32) << 10);
        let max = (base .. base + 0x400).map(|code| trie.get(code)).max().unwrap_or(INERT as u32);

        if max == INERT as u32 {
            continue;
        }

        // 0xFC00 считается "yes и ccc = 0" при быстрой проверке декомпозиции
        let max = match max == MIN_NORMAL_MAYBE_YES as u32 {
            true => max + 2,
            false => max,
        };

        trie.set_for_lead_unit(lead, max);
    }
}

#[cfg(test)]
mod tests
{
    use unicode_text::normalization::NormalizationData;

    use super::*;

    fn data(mappings: MappingSet) -> NormalizationData
    {
        let bytes = build(mappings, ByteOrder::Little, &mut Stats::new()).unwrap();
        NormalizationData::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn decompositions()
    {
        let nfc = data(MappingSet::Canonical);

        assert_eq!(nfc.get_decomposition(0xC5), Some(vec![0x41, 0x30A]));
        assert_eq!(nfc.get_decomposition(0x212B), Some(vec![0x41, 0x30A]));
        assert_eq!(nfc.get_decomposition(0x2000), Some(vec![0x2002]));
        assert_eq!(nfc.get_decomposition(0xAC01), Some(vec![0x1100, 0x1161, 0x11A8]));
        assert_eq!(nfc.get_decomposition(0xA0), None);
        assert_eq!(nfc.get_decomposition(0x41), None);

        let nfkc = data(MappingSet::Compatibility);

        assert_eq!(nfkc.get_decomposition(0xA0), Some(vec![0x20]));
        assert_eq!(nfkc.get_decomposition(0xFB01), Some(vec![0x66, 0x69]));
    }

    #[test]
    fn combining_classes()
    {
        let nfc = data(MappingSet::Canonical);

        for (code, cc) in [(0x41, 0), (0x301, 230), (0x316, 220), (0x93C, 7), (0x344, 230), (0x1D165, 216)] {
            assert_eq!(nfc.get_combining_class(code), cc, "U+{:04X}", code);
        }
    }

    #[test]
    fn fcd16()
    {
        let nfc = data(MappingSet::Canonical);

        assert_eq!(nfc.get_fcd16(0x41), 0);
        assert_eq!(nfc.get_fcd16(0x301), (230 << 8) | 230);
        // U+1E69 -> s U+0323 U+0307
        assert_eq!(nfc.get_fcd16(0x1E69), 230);
        // U+0344 -> U+0308 U+0301
        assert_eq!(nfc.get_fcd16(0x344), (230 << 8) | 230);
        assert_eq!(nfc.get_fcd16(0x1D15E), 216);
    }

    #[test]
    fn stats_count_types()
    {
        let mut stats = Stats::new();
        build(MappingSet::Canonical, ByteOrder::Big, &mut stats).unwrap();

        assert!(stats["YesNoCombinesFwd"] > 0);
        assert!(stats["NoNoDelta"] > 0);
        assert!(stats["MaybeYesSimple"] > 0);
    }
}
