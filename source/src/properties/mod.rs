mod bidi_class;
mod decomposition;
mod general_category;
mod joining;

pub use bidi_class::BidiClass;
pub use bidi_class::PairedBracketType;
pub use decomposition::Decomposition;
pub use decomposition::DecompositionTag;
pub use general_category::GeneralCategory;
pub use joining::JoiningType;
pub use joining::joining_group;

/// Кодпоинт Unicode
/// источник - UCD, UnicodeData.txt
#[derive(Debug, Clone)]
pub struct Codepoint
{
    /// код символа
    pub code: u32,
    /// название
    pub name: String,
    /// категория символа (general category)
    pub gc: GeneralCategory,
    /// класс канонического комбинирования (canonical combining class)
    pub ccc: u8,
    /// класс направления (bidi class)
    pub bc: BidiClass,
    /// "зеркальный" символ двунаправленого текста (bidi mirrored)
    pub bidi_mirrored: bool,
    /// тег декомпозиции
    pub decomposition_tag: Option<DecompositionTag>,
    /// декомпозиция
    pub decomposition: Vec<u32>,
}

impl Codepoint
{
    /// стартер - CCC = 0
    #[inline]
    pub fn is_starter(&self) -> bool
    {
        self.ccc == 0
    }

    #[inline]
    pub fn is_nonstarter(&self) -> bool
    {
        self.ccc != 0
    }

    /// есть каноническая декомпозиция
    #[inline]
    pub fn has_canonical_decomposition(&self) -> bool
    {
        !self.decomposition.is_empty() && self.decomposition_tag.is_none()
    }

    #[inline]
    pub fn as_char(&self) -> char
    {
        char::from_u32(self.code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

#[derive(Debug, PartialEq)]
pub enum PropertiesError
{
    UnknownPropertyValue,
    MissingField(usize),
}

impl From<core::num::ParseIntError> for PropertiesError
{
    fn from(_: core::num::ParseIntError) -> Self
    {
        Self::UnknownPropertyValue
    }
}
