use crate::fields::{code, data_lines, field};
use crate::properties::PropertiesError;

lazy_static! {
    /// пары зеркальных символов (Bidi_Mirroring_Glyph), упорядочены по первому кодпоинту
    pub static ref BIDI_MIRRORING: Vec<(u32, u32)> = bidi_mirroring(DATA).expect("BidiMirroring.txt");
}

const DATA: &str = include_str!("./../data/ucd/BidiMirroring.txt");

/// разбор BidiMirroring.txt: кодпоинт; зеркальный кодпоинт
fn bidi_mirroring(data: &str) -> Result<Vec<(u32, u32)>, PropertiesError>
{
    let mut pairs = data_lines(data)
        .map(|fields| Ok((code(field(&fields, 0)?)?, code(field(&fields, 1)?)?)))
        .collect::<Result<Vec<_>, PropertiesError>>()?;

    pairs.sort_unstable();

    Ok(pairs)
}
