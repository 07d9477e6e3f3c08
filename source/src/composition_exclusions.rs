use crate::fields::{code, data_lines, field};
use crate::properties::PropertiesError;
use crate::UNICODE;

lazy_static! {
    /// исключения композиции
    pub static ref COMPOSITION_EXCLUSIONS: Vec<u32> = composition_exclusions(DATA).expect("CompositionExclusions.txt");
}

const DATA: &str = include_str!("./../data/ucd/CompositionExclusions.txt");

/// разбор CompositionExclusions.txt из UCD
/// исключения композиции не могут быть вычислены, этот список составляется консорциумом Unicode в ручном режиме
fn composition_exclusions(data: &str) -> Result<Vec<u32>, PropertiesError>
{
    data_lines(data).map(|fields| code(field(&fields, 0)?)).collect()
}

/// является ли кодпоинт исключением композиции?
pub fn is_composition_exclusion(code: u32) -> bool
{
    COMPOSITION_EXCLUSIONS.contains(&code)
}

/// полное исключение композиции (Full_Composition_Exclusion): явные исключения, синглтоны
/// и декомпозиции, начинающиеся с нестартера или принадлежащие нестартеру
pub fn is_full_composition_exclusion(code: u32) -> bool
{
    let codepoint = match UNICODE.get(&code) {
        Some(codepoint) if codepoint.has_canonical_decomposition() => codepoint,
        _ => return false,
    };

    if codepoint.decomposition.len() == 1 || is_composition_exclusion(code) || codepoint.is_nonstarter() {
        return true;
    }

    UNICODE
        .get(&codepoint.decomposition[0])
        .is_some_and(|first| first.is_nonstarter())
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn exclusions()
    {
        assert!(is_composition_exclusion(0x958));
        assert!(is_full_composition_exclusion(0x958));

        // синглтоны
        assert!(is_full_composition_exclusion(0x212B));
        assert!(is_full_composition_exclusion(0x340));
        // декомпозиция нестартера и декомпозиция, начинающаяся с нестартера
        assert!(is_full_composition_exclusion(0x344));
        assert!(is_full_composition_exclusion(0xF73));

        assert!(!is_full_composition_exclusion(0xC5));
        assert!(!is_full_composition_exclusion(0x41));
        assert!(!is_full_composition_exclusion(0xA0));
    }
}
