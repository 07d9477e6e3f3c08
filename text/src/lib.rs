//! Ядро обработки текста Unicode: бинарные данные, компактные trie, свойства символов,
//! нормализация и поиск промежутков по множествам.

pub mod data;
mod error;
pub mod normalization;
pub mod properties;
pub mod set;
pub mod trie;
pub mod utf16;

pub use error::{Error, Result};
pub use normalization::{Mode, Normalizer, QuickCheckResult};
pub use properties::PropertyStore;
pub use set::{FrozenUnicodeSet, SpanCondition, UnicodeSet};
