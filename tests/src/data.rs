use lazy_static::lazy_static;
use unicode_text::data::{ByteOrder, MemorySource};
use unicode_text::{utf16, Normalizer, PropertyStore};
use unicode_text_prepare::fixtures;
use unicode_text_source::UNICODE;

lazy_static! {
    static ref SOURCE: MemorySource = fixtures(ByteOrder::Little).unwrap();
    static ref REPERTOIRE: Vec<char> = sorted(UNICODE.keys().copied());
    static ref MARKS: Vec<char> = sorted(UNICODE.values().filter(|c| c.ccc != 0).map(|c| c.code));
}

fn sorted(codes: impl Iterator<Item = u32>) -> Vec<char>
{
    let mut chars: Vec<char> = codes.filter_map(char::from_u32).collect();
    chars.sort_unstable();
    chars
}

/// источник со всеми подготовленными ресурсами
pub fn source() -> &'static MemorySource
{
    &SOURCE
}

pub fn nfc() -> Normalizer
{
    Normalizer::nfc(source()).unwrap()
}

pub fn nfd() -> Normalizer
{
    Normalizer::nfd(source()).unwrap()
}

pub fn nfkc() -> Normalizer
{
    Normalizer::nfkc(source()).unwrap()
}

pub fn nfkd() -> Normalizer
{
    Normalizer::nfkd(source()).unwrap()
}

pub fn fcd() -> Normalizer
{
    Normalizer::fcd(source()).unwrap()
}

pub fn fcc() -> Normalizer
{
    Normalizer::fcc(source()).unwrap()
}

pub fn properties() -> PropertyStore
{
    PropertyStore::load(source()).unwrap()
}

/// все символы выборки UCD, по возрастанию
pub fn repertoire() -> &'static [char]
{
    &REPERTOIRE
}

/// символы выборки с ненулевым классом комбинирования
pub fn marks() -> &'static [char]
{
    &MARKS
}

/// символы, данные о которых полностью есть в выборке UCD: вместе с их разложениями
/// и всеми композитами из них
pub const ALPHABET: &[char] = &[
    'a', 'e', 'o', 'A', 'c', '\u{300}', '\u{301}', '\u{308}', '\u{327}', '\u{316}', '\u{315}', '\u{1100}',
    '\u{1161}', '\u{11A8}', '\u{AC00}', '\u{11A7}', '\u{915}', '\u{93C}', '\u{958}', '\u{212B}', '\u{2126}',
    '\u{340}', '\u{341}', '\u{1D15E}', '\u{1D165}', '\u{1D16D}',
];

/// тексты для сравнения и бенчмарков
pub fn texts() -> Vec<(&'static str, String)>
{
    vec![
        ("latin", "Ça a été écrit à côté, énoncé déjà. ".repeat(8)),
        ("latin_decomposed", "C\u{327}a a e\u{301}te\u{301} e\u{301}crit a\u{300} co\u{302}te\u{301}. ".repeat(8)),
        ("marks", "a\u{301}\u{316}e\u{308}\u{301}o\u{315}\u{300}\u{316}A\u{30A}\u{301}".repeat(8)),
        ("hangul", "\u{AC00}\u{AC01} \u{1100}\u{1161}\u{11A8}\u{1100}\u{1161} 한국어".repeat(8)),
        ("devanagari", "\u{915}\u{93C}\u{958} \u{915}\u{93F}\u{924}\u{93E}\u{92C} ".repeat(8)),
        ("compatibility", "\u{FB01}\u{A0}\u{2126}\u{212B}\u{2000}\u{3000}".repeat(8)),
        ("musical", "\u{1D15E}\u{1D157}\u{1D165}\u{1D16D}".repeat(8)),
    ]
}

pub fn utf16(s: &str) -> Vec<u16>
{
    utf16::encode(s)
}
