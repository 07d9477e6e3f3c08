//! Свойства символов: общая категория, класс комбинирования, bidi, соединение, возраст.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::data::{DataCache, DataSource, VersionInfo, BIDI_RESOURCE, NFC_RESOURCE, PROPERTIES_RESOURCE};
use crate::normalization::{self, NormalizationData};
use crate::Result;

pub mod bidi;
pub mod uprops;
mod values;

pub use bidi::BidiProperties;
pub use uprops::CharacterProperties;
pub use values::{BidiClass, BidiMaxValue, GeneralCategory, JoiningGroup, JoiningType, PairedBracketType};

lazy_static! {
    static ref CHARACTER_PROPERTIES: DataCache<CharacterProperties> = DataCache::new("свойства");
    static ref BIDI_PROPERTIES: DataCache<BidiProperties> = DataCache::new("bidi");
}

/// хранилище свойств: основные свойства, bidi и каноническая нормализация (для ccc)
#[derive(Debug, Clone)]
pub struct PropertyStore
{
    properties: Arc<CharacterProperties>,
    bidi: Arc<BidiProperties>,
    normalization: Arc<NormalizationData>,
}

impl PropertyStore
{
    /// загрузить все ресурсы свойств из источника; уже загруженные берутся из кеша
    pub fn load(source: &dyn DataSource) -> Result<Self>
    {
        let properties = CHARACTER_PROPERTIES.get_or_load(source.identity(PROPERTIES_RESOURCE), || {
            CharacterProperties::from_bytes(&source.load(PROPERTIES_RESOURCE)?)
        })?;

        let bidi = BIDI_PROPERTIES
            .get_or_load(source.identity(BIDI_RESOURCE), || BidiProperties::from_bytes(&source.load(BIDI_RESOURCE)?))?;

        let normalization = normalization::load(source, NFC_RESOURCE)?;

        Ok(Self {
            properties,
            bidi,
            normalization,
        })
    }

    pub fn new(properties: Arc<CharacterProperties>, bidi: Arc<BidiProperties>, normalization: Arc<NormalizationData>)
        -> Self
    {
        Self {
            properties,
            bidi,
            normalization,
        }
    }

    /// общая категория
    pub fn get_type(&self, code: u32) -> GeneralCategory
    {
        GeneralCategory::from_bits((self.properties.get_property(code) & uprops::GENERAL_CATEGORY_MASK) as u32)
    }

    /// класс канонического комбинирования
    pub fn get_combining_class(&self, code: u32) -> u8
    {
        self.normalization.get_combining_class(code)
    }

    pub fn get_age(&self, code: u32) -> VersionInfo
    {
        self.properties.get_age(code)
    }

    /// значение колонки дополнительных свойств
    pub fn get_additional_property(&self, code: u32, column: usize) -> u32
    {
        self.properties.get_additional(code, column)
    }

    pub fn is_white_space(&self, code: u32) -> bool
    {
        self.properties.is_white_space(code)
    }

    pub fn get_bidi_class(&self, code: u32) -> BidiClass
    {
        self.bidi.get_class(code)
    }

    pub fn is_mirrored(&self, code: u32) -> bool
    {
        self.bidi.is_mirrored(code)
    }

    /// зеркальный символ (сам кодпоинт, если его нет)
    pub fn get_mirror(&self, code: u32) -> u32
    {
        self.bidi.get_mirror(code)
    }

    pub fn get_paired_bracket(&self, code: u32) -> u32
    {
        self.bidi.get_paired_bracket(code)
    }

    pub fn get_paired_bracket_type(&self, code: u32) -> PairedBracketType
    {
        self.bidi.get_paired_bracket_type(code)
    }

    pub fn get_joining_type(&self, code: u32) -> JoiningType
    {
        self.bidi.get_joining_type(code)
    }

    pub fn get_joining_group(&self, code: u32) -> JoiningGroup
    {
        self.bidi.get_joining_group(code)
    }

    pub fn is_bidi_control(&self, code: u32) -> bool
    {
        self.bidi.is_bidi_control(code)
    }

    pub fn is_join_control(&self, code: u32) -> bool
    {
        self.bidi.is_join_control(code)
    }

    /// максимальное значение свойства bidi в данных
    pub fn max_value(&self, which: BidiMaxValue) -> u32
    {
        self.bidi.max_value(which)
    }

    /// максимальные значения основных свойств (два слова индексов)
    pub fn max_values(&self) -> (u32, u32)
    {
        self.properties.max_values()
    }

    pub fn character_properties(&self) -> &CharacterProperties
    {
        &self.properties
    }

    pub fn bidi_properties(&self) -> &BidiProperties
    {
        &self.bidi
    }
}
