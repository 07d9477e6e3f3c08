use crate::fields::{code_range, data_lines, field};
use crate::properties::PropertiesError;

lazy_static! {
    /// диапазоны кодпоинтов и версия Unicode (major, minor), в которой они появились
    pub static ref AGES: Vec<(u32, u32, (u8, u8))> = derived_age(DATA).expect("DerivedAge.txt");
}

const DATA: &str = include_str!("./../data/ucd/DerivedAge.txt");

/// разбор DerivedAge.txt: диапазон; версия
fn derived_age(data: &str) -> Result<Vec<(u32, u32, (u8, u8))>, PropertiesError>
{
    data_lines(data)
        .map(|fields| {
            let (first, last) = code_range(field(&fields, 0)?)?;
            let (major, minor) = field(&fields, 1)?
                .split_once('.')
                .ok_or(PropertiesError::UnknownPropertyValue)?;

            Ok((first, last, (major.parse()?, minor.parse()?)))
        })
        .collect()
}
