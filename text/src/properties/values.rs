//! Значения перечислимых свойств в нумерации бинарных данных.

// перечисление с числовыми значениями, преобразованием из u8 и значением по умолчанию
// для некорректных данных
macro_rules! property_enum {
    (
        $(#[$meta: meta])*
        $name: ident, default $default: ident
        {
            $($(#[$variant_meta: meta])* $variant: ident = $value: literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum $name
        {
            $($(#[$variant_meta])* $variant = $value,)+
        }

        impl TryFrom<u8> for $name
        {
            type Error = u8;

            fn try_from(value: u8) -> Result<Self, u8>
            {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(value),
                }
            }
        }

        impl From<$name> for u8
        {
            #[inline]
            fn from(value: $name) -> u8
            {
                value as u8
            }
        }

        impl $name
        {
            /// значение из битового поля данных
            #[inline]
            pub(crate) fn from_bits(bits: u32) -> Self
            {
                u8::try_from(bits).ok().and_then(|v| Self::try_from(v).ok()).unwrap_or(Self::$default)
            }
        }
    };
}

property_enum! {
    /// общая категория символа
    GeneralCategory, default Unassigned
    {
        /// Cn
        Unassigned = 0,
        /// Lu
        UppercaseLetter = 1,
        /// Ll
        LowercaseLetter = 2,
        /// Lt
        TitlecaseLetter = 3,
        /// Lm
        ModifierLetter = 4,
        /// Lo
        OtherLetter = 5,
        /// Mn
        NonspacingMark = 6,
        /// Me
        EnclosingMark = 7,
        /// Mc
        SpacingMark = 8,
        /// Nd
        DecimalNumber = 9,
        /// Nl
        LetterNumber = 10,
        /// No
        OtherNumber = 11,
        /// Zs
        SpaceSeparator = 12,
        /// Zl
        LineSeparator = 13,
        /// Zp
        ParagraphSeparator = 14,
        /// Cc
        Control = 15,
        /// Cf
        Format = 16,
        /// Co
        PrivateUse = 17,
        /// Cs
        Surrogate = 18,
        /// Pd
        DashPunctuation = 19,
        /// Ps
        OpenPunctuation = 20,
        /// Pe
        ClosePunctuation = 21,
        /// Pc
        ConnectorPunctuation = 22,
        /// Po
        OtherPunctuation = 23,
        /// Sm
        MathSymbol = 24,
        /// Sc
        CurrencySymbol = 25,
        /// Sk
        ModifierSymbol = 26,
        /// So
        OtherSymbol = 27,
        /// Pi
        InitialPunctuation = 28,
        /// Pf
        FinalPunctuation = 29,
    }
}

impl GeneralCategory
{
    /// буква?
    pub fn is_letter(&self) -> bool
    {
        (1 ..= 5).contains(&u8::from(*self))
    }

    /// комбинирующий знак?
    pub fn is_mark(&self) -> bool
    {
        (6 ..= 8).contains(&u8::from(*self))
    }
}

property_enum! {
    /// класс направления текста
    BidiClass, default LeftToRight
    {
        /// L
        LeftToRight = 0,
        /// R
        RightToLeft = 1,
        /// EN
        EuropeanNumber = 2,
        /// ES
        EuropeanSeparator = 3,
        /// ET
        EuropeanTerminator = 4,
        /// AN
        ArabicNumber = 5,
        /// CS
        CommonSeparator = 6,
        /// B
        ParagraphSeparator = 7,
        /// S
        SegmentSeparator = 8,
        /// WS
        Whitespace = 9,
        /// ON
        OtherNeutral = 10,
        /// LRE
        LeftToRightEmbedding = 11,
        /// LRO
        LeftToRightOverride = 12,
        /// AL
        ArabicLetter = 13,
        /// RLE
        RightToLeftEmbedding = 14,
        /// RLO
        RightToLeftOverride = 15,
        /// PDF
        PopDirectionalFormat = 16,
        /// NSM
        NonspacingMark = 17,
        /// BN
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
}

property_enum! {
    /// тип соединения (арабское и сирийское письмо)
    JoiningType, default NonJoining
    {
        /// U
        NonJoining = 0,
        /// C
        JoinCausing = 1,
        /// D
        DualJoining = 2,
        /// L
        LeftJoining = 3,
        /// R
        RightJoining = 4,
        /// T
        Transparent = 5,
    }
}

property_enum! {
    /// тип парной скобки
    PairedBracketType, default None
    {
        /// n
        None = 0,
        /// o
        Open = 1,
        /// c
        Close = 2,
    }
}

/// группа соединения: номер группы в данных bidi, 0 - нет группы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct JoiningGroup(pub u8);

impl JoiningGroup
{
    pub const NO_JOINING_GROUP: Self = Self(0);
}

/// какое максимальное значение запрашивается у данных bidi
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidiMaxValue
{
    BidiClass,
    JoiningGroup,
    JoiningType,
    PairedBracketType,
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn conversions()
    {
        assert_eq!(GeneralCategory::try_from(1), Ok(GeneralCategory::UppercaseLetter));
        assert_eq!(GeneralCategory::try_from(30), Err(30));
        assert_eq!(GeneralCategory::from_bits(31), GeneralCategory::Unassigned);
        assert_eq!(BidiClass::from_bits(13), BidiClass::ArabicLetter);
        assert_eq!(u8::from(JoiningType::Transparent), 5);
        assert!(GeneralCategory::NonspacingMark.is_mark());
        assert!(!GeneralCategory::DecimalNumber.is_letter());
    }
}
