use super::PropertiesError;

/// тип соединения арабского и сирийского письма (Joining_Type)
/// берется из UCD: третья колонка ArabicShaping.txt
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u8)]
pub enum JoiningType
{
    /// U - не соединяется
    #[default]
    NonJoining = 0,
    /// C - вызывает соединение соседних символов
    JoinCausing = 1,
    /// D - соединяется с обеих сторон
    DualJoining = 2,
    /// L - соединяется слева
    LeftJoining = 3,
    /// R - соединяется справа
    RightJoining = 4,
    /// T - прозрачен
    Transparent = 5,
}

impl TryFrom<&str> for JoiningType
{
    type Error = PropertiesError;

    #[inline]
    fn try_from(abbr: &str) -> Result<Self, Self::Error>
    {
        Ok(match abbr {
            "U" => Self::NonJoining,
            "C" => Self::JoinCausing,
            "D" => Self::DualJoining,
            "L" => Self::LeftJoining,
            "R" => Self::RightJoining,
            "T" => Self::Transparent,
            _ => return Err(PropertiesError::UnknownPropertyValue),
        })
    }
}

/// группы соединения в порядке их номеров в бинарных данных
const JOINING_GROUPS: [&str; 58] = [
    "NO_JOINING_GROUP",
    "AIN",
    "ALAPH",
    "ALEF",
    "BEH",
    "BETH",
    "DAL",
    "DALATH_RISH",
    "E",
    "FEH",
    "FINAL_SEMKATH",
    "GAF",
    "GAMAL",
    "HAH",
    "TEH_MARBUTA_GOAL",
    "HE",
    "HEH",
    "HEH_GOAL",
    "HETH",
    "KAF",
    "KAPH",
    "KNOTTED_HEH",
    "LAM",
    "LAMADH",
    "MEEM",
    "MIM",
    "NOON",
    "NUN",
    "PE",
    "QAF",
    "QAPH",
    "REH",
    "REVERSED_PE",
    "SAD",
    "SADHE",
    "SEEN",
    "SEMKATH",
    "SHIN",
    "SWASH_KAF",
    "SYRIAC_WAW",
    "TAH",
    "TAW",
    "TEH_MARBUTA",
    "TETH",
    "WAW",
    "YEH",
    "YEH_BARREE",
    "YEH_WITH_TAIL",
    "YUDH",
    "YUDH_HE",
    "ZAIN",
    "FE",
    "KHAPH",
    "ZHAIN",
    "BURUSHASKI_YEH_BARREE",
    "FARSI_YEH",
    "NYA",
    "ROHINGYA_YEH",
];

/// номер группы соединения (Joining_Group) по её названию из ArabicShaping.txt
/// ("TEH MARBUTA", "No_Joining_Group" и т.п.)
pub fn joining_group(name: &str) -> Result<u8, PropertiesError>
{
    let name = name.trim().to_ascii_uppercase().replace(' ', "_");

    JOINING_GROUPS
        .iter()
        .position(|group| *group == name)
        .map(|index| index as u8)
        .ok_or(PropertiesError::UnknownPropertyValue)
}
