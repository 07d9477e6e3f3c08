use std::collections::HashMap;

use crate::fields::{code_range, data_lines, field};
use crate::properties::PropertiesError;

lazy_static! {
    /// двоичные свойства: название - диапазоны кодпоинтов (включительно)
    pub static ref PROP_LIST: HashMap<String, Vec<(u32, u32)>> = prop_list(DATA).expect("PropList.txt");
}

const DATA: &str = include_str!("./../data/ucd/PropList.txt");

/// разбор PropList.txt: диапазон; название свойства
fn prop_list(data: &str) -> Result<HashMap<String, Vec<(u32, u32)>>, PropertiesError>
{
    let mut map: HashMap<String, Vec<(u32, u32)>> = HashMap::new();

    for fields in data_lines(data) {
        let range = code_range(field(&fields, 0)?)?;
        let name = field(&fields, 1)?;

        map.entry(name.to_owned()).or_default().push(range);
    }

    Ok(map)
}
