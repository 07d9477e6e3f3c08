//! Подготовка бинарных файлов данных из таблиц UCD: trie, нормализация, основные свойства, bidi.

use std::collections::HashMap;

use unicode_text::data::{ByteOrder, MemorySource, VersionInfo, BIDI_RESOURCE, NFC_RESOURCE, NFKC_RESOURCE, PROPERTIES_RESOURCE};

mod bytes;
mod error;

pub mod bidi;
pub mod normalization;
pub mod properties;
pub mod trie;

pub use error::PrepareError;

/// статистика подготовки: название группы - количество кодпоинтов
pub type Stats = HashMap<String, usize>;

/// версия Unicode исходных таблиц
pub fn unicode_version() -> VersionInfo
{
    VersionInfo::new(14, 0, 0, 0)
}

/// все файлы данных: название ресурса, содержимое, статистика
pub fn prepare(order: ByteOrder) -> Result<Vec<(&'static str, Vec<u8>, Stats)>, PrepareError>
{
    let mut files = vec![];

    for (name, mappings) in [
        (NFC_RESOURCE, normalization::MappingSet::Canonical),
        (NFKC_RESOURCE, normalization::MappingSet::Compatibility),
    ] {
        let mut stats = Stats::new();
        let bytes = normalization::build(mappings, order, &mut stats)?;

        files.push((name, bytes, stats));
    }

    let mut stats = Stats::new();
    let bytes = properties::build(order, &mut stats)?;
    files.push((PROPERTIES_RESOURCE, bytes, stats));

    let mut stats = Stats::new();
    let bytes = bidi::build(order, &mut stats)?;
    files.push((BIDI_RESOURCE, bytes, stats));

    Ok(files)
}

/// источник данных в памяти со всеми подготовленными ресурсами
pub fn fixtures(order: ByteOrder) -> Result<MemorySource, PrepareError>
{
    let source = prepare(order)?
        .into_iter()
        .fold(MemorySource::new(), |source, (name, bytes, _)| source.with(name, bytes));

    Ok(source)
}
