//! Подготовка основных свойств (формат UPro, версия 7).
//!
//! Основной trie хранит общую категорию. Дополнительный trie для каждого кодпоинта хранит начало
//! строки в таблице векторов: колонка 0 - версия появления символа, колонка 1 - двоичные свойства.

use std::collections::{BTreeMap, HashMap};

use unicode_text::data::{write_header, ByteOrder, VersionInfo};
use unicode_text::properties::uprops::{
    AGE_SHIFT, FORMAT, FORMAT_VERSION, INDEX_COUNT, IX_ADDITIONAL_COLUMNS, IX_ADDITIONAL_TRIE, IX_ADDITIONAL_VECTORS,
    IX_DATA_TOP, IX_EXCEPTIONS, IX_MAX_VALUES, IX_MAX_VALUES_2, IX_PROPS_TRIE_END, IX_SCRIPT_EXTENSIONS,
    WHITE_SPACE_BIT,
};
use unicode_text::trie::ValueWidth;
use unicode_text_source::{AGES, PROP_LIST, UNICODE};

use crate::bytes::PushBytes;
use crate::trie::TrieBuilder;
use crate::{unicode_version, PrepareError, Stats};

/// колонок в строке векторов
const COLUMNS: usize = 2;

/// строка векторов: (версия появления, двоичные свойства)
type Row = [u32; COLUMNS];

/// собрать файл основных свойств
pub fn build(order: ByteOrder, stats: &mut Stats) -> Result<Vec<u8>, PrepareError>
{
    let mut trie = TrieBuilder::new(0, 0);
    let mut max_category = 0;

    for codepoint in UNICODE.values() {
        let category = u8::from(codepoint.gc);

        trie.set(codepoint.code, category as u32);
        max_category = max_category.max(category as u32);

        *stats.entry(format!("{:?}", codepoint.gc)).or_insert(0) += 1;
    }

    let rows = rows();

    // строка 0 - кодпоинты без дополнительных свойств
    let mut vectors: Vec<u32> = vec![0; COLUMNS];
    let mut starts: HashMap<Row, usize> = HashMap::from([([0; COLUMNS], 0)]);
    let mut additional = TrieBuilder::new(0, 0);

    for (&code, row) in rows.iter() {
        let start = *starts.entry(*row).or_insert_with(|| {
            vectors.extend_from_slice(row);
            vectors.len() - COLUMNS
        });

        additional.set(code, start as u32);
    }

    let max_age = rows.values().map(|row| row[0] >> AGE_SHIFT).max().unwrap_or(0);

    stats.insert("строк векторов".to_owned(), vectors.len() / COLUMNS);

    let mut main_trie = trie.serialize(ValueWidth::Bits16, order)?;
    main_trie.pad_to(4);

    let mut additional_trie = additional.serialize(ValueWidth::Bits16, order)?;
    additional_trie.pad_to(4);

    // смещения разделов - в 32-битных словах от начала индексов
    let props_end = INDEX_COUNT + main_trie.len() / 4;
    let vectors_start = props_end + additional_trie.len() / 4;
    let vectors_end = vectors_start + vectors.len();

    let mut indexes = [0i32; INDEX_COUNT];

    indexes[IX_PROPS_TRIE_END] = props_end as i32;
    // исключений и trie регистров нет
    indexes[IX_EXCEPTIONS] = props_end as i32;
    indexes[IX_EXCEPTIONS + 1] = props_end as i32;
    indexes[IX_ADDITIONAL_TRIE] = props_end as i32;
    indexes[IX_ADDITIONAL_VECTORS] = vectors_start as i32;
    indexes[IX_ADDITIONAL_COLUMNS] = COLUMNS as i32;
    for i in IX_SCRIPT_EXTENSIONS ..= IX_DATA_TOP {
        indexes[i] = vectors_end as i32;
    }
    indexes[IX_MAX_VALUES] = max_category as i32;
    indexes[IX_MAX_VALUES_2] = max_age as i32;

    log::info!(
        "свойства: trie {} + {} байт, строк векторов {}",
        main_trie.len(),
        additional_trie.len(),
        vectors.len() / COLUMNS
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

    out.extend_from_slice(&main_trie);
    out.extend_from_slice(&additional_trie);

    for value in vectors {
        out.push_u32(order, value);
    }

    Ok(out)
}

/// ненулевые строки векторов по кодпоинтам
fn rows() -> BTreeMap<u32, Row>
{
    let mut rows: BTreeMap<u32, Row> = BTreeMap::new();

    for &(first, last, (major, minor)) in AGES.iter() {
        let age = (((major as u32 & 0x0F) << 4) | (minor as u32 & 0x0F)) << AGE_SHIFT;

        for code in first ..= last {
            rows.entry(code).or_default()[0] = age;
        }
    }

    let white_space = PROP_LIST.get("White_Space").map(|ranges| ranges.as_slice()).unwrap_or(&[]);

    for &(first, last) in white_space {
        for code in first ..= last {
            rows.entry(code).or_default()[1] |= 1 << WHITE_SPACE_BIT;
        }
    }

    rows
}
