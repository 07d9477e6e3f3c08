//! Подготовка свойств bidi (формат BiDi, версия 2).

use std::collections::{BTreeMap, BTreeSet};

use unicode_text::data::{write_header, ByteOrder, VersionInfo};
use unicode_text::properties::bidi::{
    BIDI_CONTROL_SHIFT, BPT_SHIFT, ESC_MIRROR_DELTA, FORMAT, FORMAT_VERSION, IS_MIRRORED_SHIFT, IX_JG_LIMIT,
    IX_JG_LIMIT_2, IX_JG_START, IX_JG_START_2, IX_LENGTH, IX_MAX_VALUES, IX_MIRROR_LENGTH, IX_TOP, IX_TRIE_SIZE,
    JOIN_CONTROL_SHIFT, JT_SHIFT, MAX_JG_SHIFT, MAX_MIRROR_DELTA, MIRROR_DELTA_SHIFT, MIRROR_INDEX_SHIFT,
};
use unicode_text::trie::ValueWidth;
use unicode_text_source::{joining, ARABIC_SHAPING, BIDI_BRACKETS, BIDI_MIRRORING, PROP_LIST, UNICODE};

use crate::bytes::PushBytes;
use crate::trie::TrieBuilder;
use crate::{unicode_version, PrepareError, Stats};

/// значения свойств bidi одного кодпоинта
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Props
{
    class: u8,
    joining_type: u8,
    bracket_type: u8,
    join_control: bool,
    bidi_control: bool,
    mirrored: bool,
    mirror_delta: i32,
}

impl Props
{
    fn pack(&self) -> u16
    {
        (self.class as u16)
            | ((self.joining_type as u16) << JT_SHIFT)
            | ((self.bracket_type as u16) << BPT_SHIFT)
            | ((self.join_control as u16) << JOIN_CONTROL_SHIFT)
            | ((self.bidi_control as u16) << BIDI_CONTROL_SHIFT)
            | ((self.mirrored as u16) << IS_MIRRORED_SHIFT)
            | (((self.mirror_delta as i16) << MIRROR_DELTA_SHIFT) as u16)
    }
}

/// собрать файл свойств bidi
pub fn build(order: ByteOrder, stats: &mut Stats) -> Result<Vec<u8>, PrepareError>
{
    let mut props: BTreeMap<u32, Props> = BTreeMap::new();

    for codepoint in UNICODE.values() {
        let entry = props.entry(codepoint.code).or_default();

        entry.class = u8::from(codepoint.bc);
        entry.mirrored = codepoint.bidi_mirrored;
        entry.joining_type = joining(codepoint.code).0 as u8;
    }

    for &code in ARABIC_SHAPING.keys() {
        props.entry(code).or_default().joining_type = joining(code).0 as u8;
    }

    for (&code, &(_, bracket_type)) in BIDI_BRACKETS.iter() {
        props.entry(code).or_default().bracket_type = bracket_type as u8;
    }

    let ranges = |name: &str| PROP_LIST.get(name).map(|ranges| ranges.as_slice()).unwrap_or(&[]);

    for &(first, last) in ranges("Join_Control") {
        for code in first ..= last {
            props.entry(code).or_default().join_control = true;
        }
    }

    for &(first, last) in ranges("Bidi_Control") {
        for code in first ..= last {
            props.entry(code).or_default().bidi_control = true;
        }
    }

    let mirrors = mirrors(&mut props);
    let (jg_start, jg_limit, groups) = joining_groups();

    let mut trie = TrieBuilder::new(0, 0);
    let mut max = Props::default();

    for (&code, entry) in props.iter() {
        trie.set(code, entry.pack() as u32);

        max.class = max.class.max(entry.class);
        max.joining_type = max.joining_type.max(entry.joining_type);
        max.bracket_type = max.bracket_type.max(entry.bracket_type);
    }

    let max_group = groups.iter().copied().max().unwrap_or(0);

    stats.insert("кодпоинтов со свойствами".to_owned(), props.len());
    stats.insert("зеркальных пар в таблице".to_owned(), mirrors.len());
    stats.insert("групп соединения".to_owned(), groups.iter().filter(|&&g| g != 0).count());

    let mut trie = trie.serialize(ValueWidth::Bits16, order)?;
    trie.pad_to(4);

    let mut indexes = [0i32; IX_TOP];

    indexes[0] = IX_TOP as i32;
    indexes[IX_LENGTH] = (IX_TOP * 4 + trie.len() + mirrors.len() * 4 + groups.len()) as i32;
    indexes[IX_TRIE_SIZE] = trie.len() as i32;
    indexes[IX_MIRROR_LENGTH] = mirrors.len() as i32;
    indexes[IX_JG_START] = jg_start as i32;
    indexes[IX_JG_LIMIT] = jg_limit as i32;
    // второго диапазона групп нет
    indexes[IX_JG_START_2] = 0;
    indexes[IX_JG_LIMIT_2] = 0;
    indexes[IX_MAX_VALUES] = (max.class as i32)
        | ((max.joining_type as i32) << JT_SHIFT)
        | ((max.bracket_type as i32) << BPT_SHIFT)
        | ((max_group as i32) << MAX_JG_SHIFT);

    log::info!(
        "bidi: trie {} байт, зеркальных пар {}, группы соединения {:#X} .. {:#X}",
        trie.len(),
        mirrors.len(),
        jg_start,
        jg_limit
    );

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

    for mirror in mirrors {
        out.push_u32(order, mirror);
    }

    out.extend_from_slice(&groups);

    Ok(out)
}

/// разница с зеркальным символом; далёкие пары уходят в таблицу, отсортированную по кодпоинту,
/// элемент таблицы ссылается на элемент своей пары
fn mirrors(props: &mut BTreeMap<u32, Props>) -> Vec<u32>
{
    let mut escaped = BTreeMap::new();

    for &(code, mirror) in BIDI_MIRRORING.iter() {
        let delta = mirror as i32 - code as i32;

        let delta = match (-MAX_MIRROR_DELTA ..= MAX_MIRROR_DELTA).contains(&delta) {
            true => delta,
            false => {
                escaped.insert(code, mirror);
                ESC_MIRROR_DELTA
            }
        };

        props.entry(code).or_default().mirror_delta = delta;
    }

    // у пары без обратной записи ссылка ведёт назад
    let targets: Vec<(u32, u32)> = escaped
        .iter()
        .filter(|(_, mirror)| !escaped.contains_key(*mirror))
        .map(|(&code, &mirror)| (mirror, code))
        .collect();

    for (mirror, code) in targets {
        escaped.insert(mirror, code);
    }

    let codes: BTreeSet<u32> = escaped.keys().copied().collect();
    let position = |code: u32| codes.iter().position(|&c| c == code).unwrap_or(0) as u32;

    escaped
        .iter()
        .map(|(&code, &mirror)| (position(mirror) << MIRROR_INDEX_SHIFT) | code)
        .collect()
}

/// группы соединения одним диапазоном байт [start, limit), длина кратна 4
fn joining_groups() -> (u32, u32, Vec<u8>)
{
    let grouped: BTreeMap<u32, u8> = ARABIC_SHAPING
        .iter()
        .filter(|(_, entry)| entry.1 != 0)
        .map(|(&code, entry)| (code, entry.1))
        .collect();

    let (start, last) = match (grouped.keys().next(), grouped.keys().next_back()) {
        (Some(&start), Some(&last)) => (start, last),
        _ => return (0, 0, vec![]),
    };

    let mut groups = vec![0u8; (last - start + 1) as usize];

    for (&code, &group) in grouped.iter() {
        groups[(code - start) as usize] = group;
    }

    while groups.len() % 4 != 0 {
        groups.push(0);
    }

    (start, start + groups.len() as u32, groups)
}
