use std::collections::HashMap;

use crate::fields::{code, field};
use crate::properties::*;

lazy_static! {
    /// таблица Unicode
    pub static ref UNICODE: HashMap<u32, Codepoint> = unicode(DATA).expect("UnicodeData.txt");
}

const DATA: &str = include_str!("./../data/ucd/UnicodeData.txt");

/// разбор UnicodeData.txt из UCD и составление хешмапа свойств символов Unicode
fn unicode(data: &str) -> Result<HashMap<u32, Codepoint>, PropertiesError>
{
    let mut map: HashMap<u32, Codepoint> = HashMap::new();

    // пригодится, когда встретим диапазоны
    let mut range_start: Option<Codepoint> = None;

    for line in data.lines().filter(|line| !line.is_empty()) {
        let props: Vec<&str> = line.split(';').collect();

        let code = code(field(&props, 0)?)?;
        let name = field(&props, 1)?.to_owned();

        let gc = GeneralCategory::try_from(field(&props, 2)?)?;
        let ccc = field(&props, 3)?.parse::<u8>()?;
        let bc = BidiClass::try_from(field(&props, 4)?)?;
        let decomposition = Decomposition::try_from(field(&props, 5)?)?;
        let bidi_mirrored = field(&props, 9)? == "Y";

        // числовые значения (6 - 8) и регистр (12 - 14) не используются

        let codepoint = Codepoint {
            code,
            name,
            gc,
            ccc,
            bc,
            bidi_mirrored,
            decomposition_tag: decomposition.tag,
            decomposition: decomposition.codes,
        };

        // диапазоны: CJK, хангыль и т.д.
        if codepoint.name.starts_with('<') && codepoint.name != "<control>" {
            if codepoint.name.contains("Private Use") || codepoint.name.contains("Surrogate") {
                continue;
            }

            if codepoint.name.ends_with("First>") {
                range_start = Some(codepoint);
                continue;
            }

            if let (true, Some(group)) = (codepoint.name.ends_with("Last>"), range_start.take()) {
                let group_name = group.name.trim_start_matches('<').trim_end_matches(", First>");

                for i in group.code ..= code {
                    let mut codepoint = group.clone();

                    codepoint.code = i;
                    codepoint.name = format!("{} - {:X}", group_name, i);

                    map.insert(i, codepoint);
                }
            }

            continue;
        }

        map.insert(codepoint.code, codepoint);
    }

    Ok(map)
}
