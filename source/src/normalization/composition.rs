use std::collections::{HashMap, HashSet};

use crate::{is_full_composition_exclusion, UNICODE};

/// хешмап пар для канонической композиции: все канонические декомпозиции длины 2,
/// кроме полных исключений композиции; хангыль комбинируется алгоритмически
pub fn pairs() -> HashMap<u32, HashMap<u32, u32>>
{
    let mut map: HashMap<u32, HashMap<u32, u32>> = HashMap::new();

    for codepoint in UNICODE.values() {
        if codepoint.decomposition.len() != 2 || codepoint.decomposition_tag.is_some() {
            continue;
        }

        if is_full_composition_exclusion(codepoint.code) {
            continue;
        }

        let (c0, c1) = (codepoint.decomposition[0], codepoint.decomposition[1]);

        map.entry(c0).or_default().insert(c1, codepoint.code);
    }

    map
}

/// может ли кодпоинт быть скомбинирован с каким-либо предшествующим кодпоинтом?
pub fn combines_backwards() -> HashSet<u32>
{
    pairs().into_values().flat_map(|seconds| seconds.into_keys()).collect()
}

#[cfg(test)]
mod tests
{
    use crate::{COMBINES_BACKWARDS, COMPOSITION_PAIRS};

    #[test]
    fn pairs_and_backwards()
    {
        assert_eq!(COMPOSITION_PAIRS[&0x41][&0x30A], 0xC5);
        // U+00C5 + U+0301 -> U+01FA
        assert_eq!(COMPOSITION_PAIRS[&0xC5][&0x301], 0x1FA);
        // исключение композиции
        assert!(!COMPOSITION_PAIRS.get(&0x915).is_some_and(|m| m.contains_key(&0x93C)));

        assert!(COMBINES_BACKWARDS.contains(&0x301));
        assert!(!COMBINES_BACKWARDS.contains(&0x41));
    }
}
