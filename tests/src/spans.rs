use unicode_text::{Error, SpanCondition, UnicodeSet};

use crate::data::utf16;

fn set(codes: &str, strings: &[&str]) -> UnicodeSet
{
    let mut set = UnicodeSet::new();

    for c in codes.chars() {
        set.add(c as u32);
    }

    for s in strings {
        set.add_str(s);
    }

    set
}

/// {a, b, "ab"}: "aab" покрывается целиком, минимум два элемента
#[test]
fn contained_with_strings()
{
    let set = set("ab", &["ab"]).freeze();
    let s = utf16("aab");

    assert_eq!(set.span(&s, 0, SpanCondition::Contained).unwrap(), 3);
    assert_eq!(set.span_and_count(&s, 0, SpanCondition::Contained).unwrap(), (3, 2));
    assert_eq!(set.span_back(&s, 3, SpanCondition::Contained).unwrap(), 0);
}

#[test]
fn strings_extend_code_point_span()
{
    // только строки: "xy" и "yz" не состыкуются в "xyz", а "xy" + "z" - да
    let set = set("z", &["xy", "yz"]).freeze();

    assert_eq!(set.span(&utf16("xyzq"), 0, SpanCondition::Contained).unwrap(), 3);
    assert_eq!(set.span(&utf16("yzxy!"), 0, SpanCondition::Contained).unwrap(), 4);
    assert_eq!(set.span(&utf16("qxy"), 0, SpanCondition::NotContained).unwrap(), 1);
    assert_eq!(set.span_back(&utf16("qxy"), 3, SpanCondition::Contained).unwrap(), 1);
    assert_eq!(set.span_back(&utf16("xyq"), 3, SpanCondition::NotContained).unwrap(), 2);
}

#[test]
fn simple_takes_longest_match()
{
    let set = set("a", &["abc", "ab"]).freeze();
    let s = utf16("aabcd");

    assert_eq!(set.span(&s, 0, SpanCondition::Simple).unwrap(), 4);
    assert_eq!(set.span_and_count(&s, 0, SpanCondition::Simple).unwrap(), (4, 2));
}

/// строка не может начинаться или заканчиваться внутри суррогатной пары
#[test]
fn surrogate_boundaries()
{
    let mut strings = UnicodeSet::new();
    strings.add_utf16(&[0x61, 0xD83D]).add_utf16(&[0xDE00, 0x62]);
    let set = strings.freeze();

    // "a😀b"
    let s = [0x61, 0xD83D, 0xDE00, 0x62];

    assert_eq!(set.span(&s, 0, SpanCondition::Contained).unwrap(), 0);
    assert_eq!(set.span(&s, 0, SpanCondition::Simple).unwrap(), 0);
    assert_eq!(set.span_back(&s, 4, SpanCondition::Contained).unwrap(), 4);
    assert_eq!(set.span(&s, 0, SpanCondition::NotContained).unwrap(), 4);

    // непарные суррогаты совпадают
    let s = [0x61, 0xD83D, 0x62];
    assert_eq!(set.span(&s, 0, SpanCondition::Contained).unwrap(), 2);
}

#[test]
fn supplementary_code_points()
{
    let set = set("\u{1D15E}\u{1D165}", &[]).freeze();
    let s = utf16("\u{1D15E}\u{1D165}a");

    assert_eq!(set.span(&s, 0, SpanCondition::Contained).unwrap(), 4);
    assert_eq!(set.span_and_count(&s, 0, SpanCondition::Contained).unwrap(), (4, 2));
    assert_eq!(set.span_back(&s, 4, SpanCondition::Contained).unwrap(), 0);
    assert_eq!(set.span(&s, 4, SpanCondition::NotContained).unwrap(), 5);
}

#[test]
fn positions_out_of_range()
{
    let set = set("ab", &["ab"]).freeze();
    let s = utf16("ab");

    assert!(matches!(
        set.span(&s, 3, SpanCondition::Contained),
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        set.span_back(&s, 3, SpanCondition::NotContained),
        Err(Error::InvalidArgument { .. })
    ));
    assert_eq!(set.span(&s, 2, SpanCondition::Contained).unwrap(), 2);
    assert_eq!(set.span_back(&s, 0, SpanCondition::Contained).unwrap(), 0);
}

/// замороженное множество используется из нескольких потоков
#[test]
fn shared_between_threads()
{
    let set = std::sync::Arc::new(set("ab", &["ab", "ba"]).freeze());

    let handles: Vec<_> = (0 .. 4)
        .map(|_| {
            let set = set.clone();
            std::thread::spawn(move || {
                let s = utf16(&"abba".repeat(64));

                for _ in 0 .. 32 {
                    assert_eq!(set.span(&s, 0, SpanCondition::Contained).unwrap(), s.len());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
