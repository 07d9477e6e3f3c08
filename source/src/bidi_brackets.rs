use std::collections::HashMap;

use crate::fields::{code, data_lines, field};
use crate::properties::{PairedBracketType, PropertiesError};

lazy_static! {
    /// парные скобки: кодпоинт - (парная скобка, тип)
    pub static ref BIDI_BRACKETS: HashMap<u32, (u32, PairedBracketType)> = bidi_brackets(DATA).expect("BidiBrackets.txt");
}

const DATA: &str = include_str!("./../data/ucd/BidiBrackets.txt");

/// разбор BidiBrackets.txt: кодпоинт; парная скобка; тип (o, c)
fn bidi_brackets(data: &str) -> Result<HashMap<u32, (u32, PairedBracketType)>, PropertiesError>
{
    data_lines(data)
        .map(|fields| {
            let bracket = code(field(&fields, 0)?)?;
            let pair = code(field(&fields, 1)?)?;
            let bracket_type = PairedBracketType::try_from(field(&fields, 2)?)?;

            Ok((bracket, (pair, bracket_type)))
        })
        .collect()
}
