use super::PropertiesError;

/// класс направления текста (bidi class)
/// берется из UCD: четвертая колонка UnicodeData.txt
/// 23 варианта, значения совпадают с нумерацией в бинарных данных bidi (5 бит)
///
/// группы классов:
///     strong (L, R, AL) - сильный тип направления
///     weak (EN, ES, ET, AN, CS, NSM, BN) - направление зависит от контекста
///     neutral (B, S, WS, ON) - не влияют на направление письма
///     explicit (LRE, LRO, RLE, RLO, PDF, LRI, RLI, FSI, PDI) - явное управление направлением
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u8)]
pub enum BidiClass
{
    /// L - любой сильный LTR-символ
    #[default]
    LeftToRight = 0,
    /// R - любой сильный (не арабский) RTL-символ
    RightToLeft = 1,
    /// EN - любая цифра ASCII или восточно-арабская индийская цифра
    EuropeanNumber = 2,
    /// ES - знаки плюса и минуса
    EuropeanSeparator = 3,
    /// ET - терминатор в контексте числового формата, включает символы валюты
    EuropeanTerminator = 4,
    /// AN - любая арабско-индийская цифра
    ArabicNumber = 5,
    /// CS - запятые, двоеточия и косые черты
    CommonSeparator = 6,
    /// B - различные символы новой строки
    ParagraphSeparator = 7,
    /// S - различные символы сегментов
    SegmentSeparator = 8,
    /// WS - пробелы
    WhiteSpace = 9,
    /// ON - прочие нейтральные символы
    OtherNeutral = 10,
    /// LRE
    LeftToRightEmbedding = 11,
    /// LRO
    LeftToRightOverride = 12,
    /// AL - любой сильный (арабский) RTL-символ
    ArabicLetter = 13,
    /// RLE
    RightToLeftEmbedding = 14,
    /// RLO
    RightToLeftOverride = 15,
    /// PDF
    PopDirectionalFormat = 16,
    /// NSM - неразрывный комбинирующий маркер
    NonspacingMark = 17,
    /// BN - большинство управляющих кодов форматирования, нехарактерные символы
    BoundaryNeutral = 18,
    /// FSI
    FirstStrongIsolate = 19,
    /// LRI
    LeftToRightIsolate = 20,
    /// RLI
    RightToLeftIsolate = 21,
    /// PDI
    PopDirectionalIsolate = 22,
}

impl TryFrom<&str> for BidiClass
{
    type Error = PropertiesError;

    #[inline]
    fn try_from(abbr: &str) -> Result<Self, Self::Error>
    {
        Ok(match abbr {
            "L" | "" => Self::LeftToRight,
            "R" => Self::RightToLeft,
            "EN" => Self::EuropeanNumber,
            "ES" => Self::EuropeanSeparator,
            "ET" => Self::EuropeanTerminator,
            "AN" => Self::ArabicNumber,
            "CS" => Self::CommonSeparator,
            "B" => Self::ParagraphSeparator,
            "S" => Self::SegmentSeparator,
            "WS" => Self::WhiteSpace,
            "ON" => Self::OtherNeutral,
            "LRE" => Self::LeftToRightEmbedding,
            "LRO" => Self::LeftToRightOverride,
            "AL" => Self::ArabicLetter,
            "RLE" => Self::RightToLeftEmbedding,
            "RLO" => Self::RightToLeftOverride,
            "PDF" => Self::PopDirectionalFormat,
            "NSM" => Self::NonspacingMark,
            "BN" => Self::BoundaryNeutral,
            "FSI" => Self::FirstStrongIsolate,
            "LRI" => Self::LeftToRightIsolate,
            "RLI" => Self::RightToLeftIsolate,
            "PDI" => Self::PopDirectionalIsolate,
            _ => return Err(PropertiesError::UnknownPropertyValue),
        })
    }
}

impl From<BidiClass> for u8
{
    #[inline]
    fn from(value: BidiClass) -> Self
    {
        value as u8
    }
}

/// тип парной скобки (Bidi_Paired_Bracket_Type)
/// берется из UCD: третья колонка BidiBrackets.txt
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u8)]
pub enum PairedBracketType
{
    #[default]
    None = 0,
    Open = 1,
    Close = 2,
}

impl TryFrom<&str> for PairedBracketType
{
    type Error = PropertiesError;

    #[inline]
    fn try_from(abbr: &str) -> Result<Self, Self::Error>
    {
        Ok(match abbr {
            "n" => Self::None,
            "o" => Self::Open,
            "c" => Self::Close,
            _ => return Err(PropertiesError::UnknownPropertyValue),
        })
    }
}
