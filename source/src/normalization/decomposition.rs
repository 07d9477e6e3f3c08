use std::collections::HashMap;

use super::hangul::{decompose_hangul, is_hangul_syllable};
use crate::properties::Codepoint;
use crate::UNICODE;

/// полная декомпозиция NFD
pub fn nfd() -> HashMap<u32, Vec<u32>>
{
    decompositions(true)
}

/// полная декомпозиция NFKD
pub fn nfkd() -> HashMap<u32, Vec<u32>>
{
    decompositions(false)
}

fn decompositions(canonical: bool) -> HashMap<u32, Vec<u32>>
{
    UNICODE
        .values()
        .filter_map(|codepoint| {
            let decomposition = match is_hangul_syllable(codepoint.code) {
                true => decompose_hangul(codepoint.code),
                false => decompose_entry(codepoint, canonical),
            };

            match decomposition.is_empty() {
                true => None,
                false => Some((codepoint.code, decomposition)),
            }
        })
        .collect()
}

/// построить развернутую декомпозицию символа
fn decompose_entry(codepoint: &Codepoint, canonical: bool) -> Vec<u32>
{
    let mut result = vec![];

    // хотим получить каноническую декомпозицию, у элемента - декомпозиция совместимости
    if canonical && codepoint.decomposition_tag.is_some() {
        return result;
    }

    for code in codepoint.decomposition.iter() {
        let expanded = match UNICODE.get(code) {
            Some(element) => decompose_entry(element, canonical),
            None => vec![],
        };

        match expanded.is_empty() {
            true => result.push(*code),
            false => result.extend(expanded),
        }
    }

    result
}
