//! Нормализация Unicode: NFC, NFD, NFKC, NFKD, FCD, FCC.
//!
//! Каждому кодпоинту в данных сопоставлено 16-битное значение norm16. Диапазоны значений
//! задают категорию символа (инертный, раскладывается алгоритмически или по таблице
//! отображений, комбинируется назад и т.д.), младший бит - граница композиции после символа.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::data::{DataCache, DataSource};
use crate::Result;

mod buffer;
mod compose;
pub mod data;
mod decompose;
mod fcd;
pub mod hangul;
mod normalizer;

pub use buffer::ReorderingBuffer;
pub use data::NormalizationData;
pub use normalizer::{Mode, Normalizer, QuickCheckResult};

lazy_static! {
    static ref NORMALIZATION_DATA: DataCache<NormalizationData> = DataCache::new("нормализация");
}

/// загрузить (или взять из кеша) данные нормализации
pub fn load(source: &dyn DataSource, name: &str) -> Result<Arc<NormalizationData>>
{
    NORMALIZATION_DATA.get_or_load(source.identity(name), || NormalizationData::from_bytes(&source.load(name)?))
}
