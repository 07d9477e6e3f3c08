use unicode_text::{Mode, QuickCheckResult};

use crate::data::{fcd, nfd, utf16};

#[test]
fn make_fcd()
{
    let fcd = fcd();

    assert_eq!(fcd.mode(), Mode::Fcd);

    // уже FCD: не раскладывается
    assert_eq!(fcd.normalize_str("\u{C5}\u{301}"), "\u{C5}\u{301}");
    assert_eq!(fcd.normalize_str("a\u{316}\u{301}"), "a\u{316}\u{301}");
    assert_eq!(fcd.normalize_str("\u{344}"), "\u{344}");

    // нарушение порядка: 220 после 230
    assert_eq!(fcd.normalize_str("a\u{301}\u{316}"), "a\u{316}\u{301}");
    assert_eq!(fcd.normalize_str("\u{1E69}\u{323}"), "s\u{323}\u{323}\u{307}");
    assert_eq!(fcd.normalize_str("xy\u{E1}\u{316}z"), "xya\u{316}\u{301}z");
}

#[test]
fn fcd_checks()
{
    let fcd = fcd();

    assert!(fcd.is_normalized(&utf16("\u{C5}\u{301}")));
    assert!(!fcd.is_normalized(&utf16("a\u{301}\u{316}")));
    assert_eq!(fcd.quick_check(&utf16("\u{E1}\u{316}")), QuickCheckResult::No);
    assert_eq!(fcd.quick_check(&utf16("abc")), QuickCheckResult::Yes);

    let s = utf16("abc\u{E1}\u{316}");
    assert!(fcd.span_quick_check_yes(&s) <= 3);
    assert_eq!(fcd.span_quick_check_yes(&utf16("abc")), 3);
}

#[test]
fn fcd_append()
{
    let fcd = fcd();

    let mut first = utf16("\u{E1}");
    fcd.normalize_second_and_append(&mut first, &utf16("\u{316}"));
    assert_eq!(first, utf16("a\u{316}\u{301}"));

    let mut first = utf16("a");
    fcd.append(&mut first, &utf16("\u{301}"));
    assert_eq!(first, utf16("a\u{301}"));
}

/// fcd16 = (lccc << 8) | tccc
#[test]
fn fcd16()
{
    let nfd = nfd();
    let data = nfd.data();

    assert_eq!(data.get_fcd16(0x41), 0);
    assert_eq!(data.get_fcd16(0xC5), 230);
    assert_eq!(data.get_fcd16(0x316), (220 << 8) | 220);
    assert_eq!(data.get_fcd16(0x344), (230 << 8) | 230);
    assert_eq!(data.get_fcd16(0x1D15E), 216);
    assert_eq!(data.get_fcd16(0xAC01), 0);
}
