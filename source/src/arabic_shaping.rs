use std::collections::HashMap;

use crate::fields::{code, data_lines, field};
use crate::properties::{joining_group, GeneralCategory, JoiningType, PropertiesError};
use crate::UNICODE;

lazy_static! {
    /// явно указанные тип и группа соединения
    pub static ref ARABIC_SHAPING: HashMap<u32, (JoiningType, u8)> = arabic_shaping(DATA).expect("ArabicShaping.txt");
}

const DATA: &str = include_str!("./../data/ucd/ArabicShaping.txt");

/// разбор ArabicShaping.txt: кодпоинт; схематичное название; тип соединения; группа соединения
fn arabic_shaping(data: &str) -> Result<HashMap<u32, (JoiningType, u8)>, PropertiesError>
{
    data_lines(data)
        .map(|fields| {
            let code = code(field(&fields, 0)?)?;
            let joining_type = JoiningType::try_from(field(&fields, 2)?)?;
            let group = joining_group(field(&fields, 3)?)?;

            Ok((code, (joining_type, group)))
        })
        .collect()
}

/// тип и группа соединения кодпоинта; символы, отсутствующие в ArabicShaping.txt,
/// прозрачны при категории Mn, Me или Cf и не соединяются в остальных случаях
pub fn joining(code: u32) -> (JoiningType, u8)
{
    if let Some(&entry) = ARABIC_SHAPING.get(&code) {
        return entry;
    }

    let gc = UNICODE.get(&code).map(|c| c.gc).unwrap_or(GeneralCategory::Unassigned);

    match gc.is_joining_transparent() {
        true => (JoiningType::Transparent, 0),
        false => (JoiningType::NonJoining, 0),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn explicit_and_derived()
    {
        assert_eq!(joining(0x628), (JoiningType::DualJoining, 4));
        assert_eq!(joining(0x629), (JoiningType::RightJoining, 42));
        // U+064B ARABIC FATHATAN - Mn
        assert_eq!(joining(0x64B), (JoiningType::Transparent, 0));
        assert_eq!(joining(0x41), (JoiningType::NonJoining, 0));
    }
}
