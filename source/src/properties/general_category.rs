use super::PropertiesError;

/// основная категория символа (General Category, GC)
/// берется из UCD: вторая колонка UnicodeData.txt
/// 30 вариантов, значения совпадают с нумерацией в бинарных данных свойств (5 бит)
///
/// общие категории:
///     L (Lu, Ll, Lt, Lm, Lo) - буквы
///     M (Mn, Me, Mc) - комбинирующие символы
///     N (Nd, Nl, No) - цифры, числовые символы
///     Z (Zs, Zl, Zp) - разделители
///     C (Cc, Cf, Co, Cs, Cn) - системные символы
///     P (Pd, Ps, Pe, Pc, Po, Pi, Pf) - знаки препинания
///     S (Sm, Sc, Sk, So) - различные символы
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u8)]
pub enum GeneralCategory
{
    /// Cn - место под символ зарезервировано или не назначено, или же элемент не является символом.
    /// дефолтный вариант при отсутствии записи о символе в UCD
    #[default]
    Unassigned = 0,

    /// Lu - прописная буква
    UppercaseLetter = 1,
    /// Ll - строчная буква
    LowercaseLetter = 2,
    /// Lt - диграфический символ, первая часть - заглавная буква
    TitlecaseLetter = 3,
    /// Lm - буква-модификатор
    ModifierLetter = 4,
    /// Lo - прочие буквы, включая слоги и иероглифы
    OtherLetter = 5,

    /// Mn - неразрывный комбинирующий маркер (не занимающий пространства)
    NonspacingMark = 6,
    /// Me - охватывающий комбинирующий маркер
    EnclosingMark = 7,
    /// Mc - комбинирующий маркер, занимающий пространство
    SpacingMark = 8,

    /// Nd - десятичная цифра
    DecimalNumber = 9,
    /// Nl - буквоподобный числовой символ
    LetterNumber = 10,
    /// No - прочие числовые символы
    OtherNumber = 11,

    /// Zs - разделитель-пробел
    SpaceSeparator = 12,
    /// Zl - разделитель строки
    LineSeparator = 13,
    /// Zp - разделитель параграфов
    ParagraphSeparator = 14,

    /// Cc - управляющий символ, относится к C0 или C1
    Control = 15,
    /// Cf - управляющий символ форматирования
    Format = 16,
    /// Co - символ для приватного использования
    PrivateUse = 17,
    /// Cs - символ-суррогат
    Surrogate = 18,

    /// Pd - тире или дефис как знак препинания
    DashPunctuation = 19,
    /// Ps - открывающий знак пунктуации (из пары)
    OpenPunctuation = 20,
    /// Pe - закрывающий знак пунктуации (из пары)
    ClosePunctuation = 21,
    /// Pc - объединяющяя пунктуация, например _
    ConnectorPunctuation = 22,
    /// Po - знак препинания другого типа
    OtherPunctuation = 23,

    /// Sm - математический символ
    MathSymbol = 24,
    /// Sc - символ валюты
    CurrencySymbol = 25,
    /// Sk - символ модификатора, не похожий на букву
    ModifierSymbol = 26,
    /// So - прочие символы
    OtherSymbol = 27,

    /// Pi - начальный знак цитаты
    InitialPunctuation = 28,
    /// Pf - конечный знак цитаты
    FinalPunctuation = 29,
}

impl GeneralCategory
{
    /// прозрачен для арабского соединения, если тип соединения не указан явно (Mn, Me, Cf)
    #[inline]
    pub fn is_joining_transparent(&self) -> bool
    {
        matches!(self, Self::NonspacingMark | Self::EnclosingMark | Self::Format)
    }
}

impl TryFrom<&str> for GeneralCategory
{
    type Error = PropertiesError;

    #[inline]
    fn try_from(abbr: &str) -> Result<Self, Self::Error>
    {
        Ok(match abbr {
            "Cn" | "" => Self::Unassigned,
            "Lu" => Self::UppercaseLetter,
            "Ll" => Self::LowercaseLetter,
            "Lt" => Self::TitlecaseLetter,
            "Lm" => Self::ModifierLetter,
            "Lo" => Self::OtherLetter,
            "Mn" => Self::NonspacingMark,
            "Me" => Self::EnclosingMark,
            "Mc" => Self::SpacingMark,
            "Nd" => Self::DecimalNumber,
            "Nl" => Self::LetterNumber,
            "No" => Self::OtherNumber,
            "Zs" => Self::SpaceSeparator,
            "Zl" => Self::LineSeparator,
            "Zp" => Self::ParagraphSeparator,
            "Cc" => Self::Control,
            "Cf" => Self::Format,
            "Co" => Self::PrivateUse,
            "Cs" => Self::Surrogate,
            "Pd" => Self::DashPunctuation,
            "Ps" => Self::OpenPunctuation,
            "Pe" => Self::ClosePunctuation,
            "Pc" => Self::ConnectorPunctuation,
            "Po" => Self::OtherPunctuation,
            "Sm" => Self::MathSymbol,
            "Sc" => Self::CurrencySymbol,
            "Sk" => Self::ModifierSymbol,
            "So" => Self::OtherSymbol,
            "Pi" => Self::InitialPunctuation,
            "Pf" => Self::FinalPunctuation,
            _ => return Err(PropertiesError::UnknownPropertyValue),
        })
    }
}

impl From<GeneralCategory> for u8
{
    #[inline]
    fn from(value: GeneralCategory) -> Self
    {
        value as u8
    }
}
