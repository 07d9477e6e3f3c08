use unicode_text::{Mode, QuickCheckResult};

use crate::data::{fcc, nfc, nfd, nfkc, nfkd, utf16};

#[test]
fn decompose()
{
    let nfd = nfd();

    assert_eq!(nfd.normalize_str("abc"), "abc");
    assert_eq!(nfd.normalize_str("\u{C5}"), "A\u{30A}");
    assert_eq!(nfd.normalize_str("\u{212B}"), "A\u{30A}");
    // U+1E69: s + U+0323 + U+0307 через U+1E63
    assert_eq!(nfd.normalize_str("\u{1E69}"), "s\u{323}\u{307}");
    assert_eq!(nfd.normalize_str("\u{2126}"), "\u{3A9}");
    assert_eq!(nfd.normalize_str("\u{340}\u{341}"), "\u{300}\u{301}");
    assert_eq!(nfd.normalize_str("\u{A0}\u{FB01}"), "\u{A0}\u{FB01}");
    assert_eq!(nfd.normalize_str(""), "");
}

/// знаки с классами 230 и 220 переставляются по возрастанию, базовая буква на месте
#[test]
fn reorder()
{
    let nfd = nfd();

    assert_eq!(nfd.normalize_str("a\u{301}\u{316}"), "a\u{316}\u{301}");
    assert_eq!(nfd.normalize_str("\u{E1}\u{316}"), "a\u{316}\u{301}");
    // одинаковые классы сохраняют порядок
    assert_eq!(nfd.normalize_str("a\u{301}\u{300}"), "a\u{301}\u{300}");
    assert_eq!(nfd.normalize_str("a\u{315}\u{301}\u{316}"), "a\u{316}\u{301}\u{315}");
}

#[test]
fn hangul()
{
    let (nfc, nfd) = (nfc(), nfd());

    assert_eq!(nfd.normalize(&[0xAC00]), [0x1100, 0x1161]);
    assert_eq!(nfd.normalize(&[0xAC01]), [0x1100, 0x1161, 0x11A8]);

    assert_eq!(nfc.normalize(&[0x1100, 0x1161]), [0xAC00]);
    assert_eq!(nfc.normalize(&[0x1100, 0x1161, 0x11A8]), [0xAC01]);
    assert_eq!(nfc.normalize(&[0xAC00, 0x11A8]), [0xAC01]);
    // U+11A7 не является конечной согласной
    assert_eq!(nfc.normalize(&[0xAC00, 0x11A7]), [0xAC00, 0x11A7]);
    assert_eq!(nfc.normalize(&[0xAC01, 0x11A8]), [0xAC01, 0x11A8]);
}

#[test]
fn compose()
{
    let nfc = nfc();

    assert_eq!(nfc.normalize_str("A\u{30A}"), "\u{C5}");
    assert_eq!(nfc.normalize_str("\u{212B}"), "\u{C5}");
    assert_eq!(nfc.normalize_str("A\u{30A}\u{301}"), "\u{1FA}");
    assert_eq!(nfc.normalize_str("\u{2126}\u{301}"), "\u{38F}");
    // не блокируется знаком с меньшим классом
    assert_eq!(nfc.normalize_str("a\u{316}\u{301}"), "\u{E1}\u{316}");
    assert_eq!(nfc.normalize_str("a\u{301}\u{316}"), "\u{E1}\u{316}");
    // исключения из композиции
    assert_eq!(nfc.normalize_str("\u{958}"), "\u{915}\u{93C}");
    assert_eq!(nfc.normalize_str("\u{1D15E}"), "\u{1D157}\u{1D165}");
    // знаки без стартера
    assert_eq!(nfc.normalize_str("\u{301}a"), "\u{301}a");
    // ASCII-стартер с наложением U+0338
    assert_eq!(nfc.normalize_str("=\u{338}<\u{338}>\u{338}"), "\u{2260}\u{226E}\u{226F}");
}

#[test]
fn compatibility()
{
    let (nfkc, nfkd) = (nfkc(), nfkd());

    assert_eq!(nfkd.normalize_str("\u{FB01}"), "fi");
    assert_eq!(nfkd.normalize_str("\u{A0}"), " ");
    assert_eq!(nfkd.normalize_str("\u{3000}"), " ");
    assert_eq!(nfkd.normalize_str("\u{212B}"), "A\u{30A}");

    assert_eq!(nfkc.normalize_str("\u{FB01}"), "fi");
    assert_eq!(nfkc.normalize_str("\u{212B}"), "\u{C5}");
    assert_eq!(nfkc.normalize_str("\u{2000}"), " ");
}

#[test]
fn quick_check()
{
    let (nfc, nfd) = (nfc(), nfd());

    assert_eq!(nfc.quick_check(&utf16("abc")), QuickCheckResult::Yes);
    assert_eq!(nfc.quick_check(&utf16("a\u{301}")), QuickCheckResult::Maybe);
    assert_eq!(nfc.quick_check(&utf16("\u{212B}")), QuickCheckResult::No);

    assert_eq!(nfd.quick_check(&utf16("A\u{30A}")), QuickCheckResult::Yes);
    assert_eq!(nfd.quick_check(&utf16("\u{C5}")), QuickCheckResult::No);

    // цепочка знаков: упорядоченная - "может быть", нарушенный порядок - "нет"
    assert_eq!(nfc.quick_check(&utf16("a\u{316}\u{301}")), QuickCheckResult::Maybe);
    assert_eq!(nfc.quick_check(&utf16("a\u{301}\u{316}")), QuickCheckResult::No);
    assert_eq!(nfc.quick_check(&utf16("a\u{316}\u{301}b")), QuickCheckResult::Maybe);

    assert!(nfc.is_normalized(&utf16("\u{E1}\u{316}")));
    assert!(!nfc.is_normalized(&utf16("a\u{301}")));
    assert!(!nfd.is_normalized(&utf16("a\u{301}\u{316}")));
    assert!(nfd.is_normalized(&utf16("a\u{316}\u{301}")));
}

#[test]
fn span_quick_check_yes()
{
    let (nfc, nfd) = (nfc(), nfd());

    assert_eq!(nfd.span_quick_check_yes(&utf16("abc\u{C5}")), 3);
    assert_eq!(nfd.span_quick_check_yes(&utf16("abc")), 3);
    // граница перед стартером, с которым может скомпоноваться знак
    assert_eq!(nfc.span_quick_check_yes(&utf16("xyza\u{301}")), 3);
    assert_eq!(nfc.span_quick_check_yes(&utf16("\u{212B}")), 0);
}

#[test]
fn append()
{
    let (nfc, nfd) = (nfc(), nfd());

    let mut first = utf16("a");
    nfc.append(&mut first, &utf16("\u{301}"));
    assert_eq!(first, utf16("\u{E1}"));

    let mut first = utf16("\u{C5}");
    nfc.normalize_second_and_append(&mut first, &utf16("\u{301}b"));
    assert_eq!(first, utf16("\u{1FA}b"));

    let mut first = utf16("a\u{301}");
    nfd.append(&mut first, &utf16("\u{316}"));
    assert_eq!(first, utf16("a\u{316}\u{301}"));

    let mut first = utf16("x");
    nfd.normalize_second_and_append(&mut first, &utf16("\u{C5}"));
    assert_eq!(first, utf16("xA\u{30A}"));

    let mut first = vec![];
    nfc.normalize_second_and_append(&mut first, &utf16("\u{1100}\u{1161}"));
    assert_eq!(first, [0xAC00]);
}

/// FCC компонует только непрерывные последовательности
#[test]
fn compose_contiguous()
{
    let (nfc, fcc) = (nfc(), fcc());

    assert_eq!(fcc.mode(), Mode::ComposeContiguous);

    assert_eq!(fcc.normalize_str("a\u{301}"), "\u{E1}");
    assert_eq!(fcc.normalize_str("A\u{30A}\u{301}"), "\u{1FA}");
    assert_eq!(fcc.normalize_str("\u{1100}\u{1161}\u{11A8}"), "\u{AC01}");

    // U+0316 с ненулевым классом стоит между a и U+0301
    assert_eq!(nfc.normalize_str("a\u{316}\u{301}"), "\u{E1}\u{316}");
    assert_eq!(fcc.normalize_str("a\u{316}\u{301}"), "a\u{316}\u{301}");
    assert!(fcc.is_normalized(&utf16("a\u{316}\u{301}")));
    assert!(!nfc.is_normalized(&utf16("a\u{316}\u{301}")));

    // исходный порядок нарушен: после перестановки знак U+0316 снова разделяет
    assert_eq!(fcc.normalize_str("a\u{301}\u{316}"), "a\u{316}\u{301}");
}

#[test]
fn decompositions_and_boundaries()
{
    let (nfc, nfd, nfkd) = (nfc(), nfd(), nfkd());

    assert_eq!(nfd.get_decomposition(0xC5), Some(utf16("A\u{30A}")));
    assert_eq!(nfd.get_decomposition(0xAC01), Some(vec![0x1100, 0x1161, 0x11A8]));
    assert_eq!(nfd.get_decomposition(0x41), None);
    assert_eq!(nfd.get_decomposition(0xFB01), None);
    assert_eq!(nfkd.get_decomposition(0xFB01), Some(utf16("fi")));

    assert_eq!(nfc.get_combining_class(0x316), 220);
    assert_eq!(nfc.get_combining_class(0x1D165), 216);

    assert!(nfc.has_boundary_before(0x41));
    assert!(!nfc.has_boundary_before(0x301));
    assert!(!nfc.has_boundary_before(0x1161));
    assert!(!nfc.has_boundary_after(0x41));
    assert!(nfd.has_boundary_before(0x41));
    assert!(nfd.has_boundary_after(0x41));
    assert!(!nfd.has_boundary_before(0x301));

    assert!(nfc.is_inert(0x20));
    assert!(!nfc.is_inert(0x41));
    assert!(!nfc.is_inert(0x301));
    assert!(nfd.is_inert(0x41));
    assert!(!nfd.is_inert(0xC5));
}

/// непарные суррогаты и неназначенные кодпоинты не меняются
#[test]
fn unpaired_surrogates()
{
    let (nfc, nfd) = (nfc(), nfd());

    for s in [vec![0xD800], vec![0x61, 0xDC00, 0x301], vec![0xDBFF, 0x41, 0x30A], vec![0x378]] {
        assert_eq!(nfd.normalize(&s), s);
    }

    assert_eq!(nfc.normalize(&[0xDBFF, 0x41, 0x30A]), [0xDBFF, 0xC5]);
    assert_eq!(nfc.normalize(&[0x61, 0xDC00, 0x301]), [0x61, 0xDC00, 0x301]);
}
