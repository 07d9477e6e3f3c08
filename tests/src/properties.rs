use unicode_text::data::VersionInfo;
use unicode_text::properties::{BidiClass, BidiMaxValue, GeneralCategory, JoiningGroup, JoiningType, PairedBracketType};
use unicode_text::PropertyStore;

use crate::data::{properties, source};

#[test]
fn general_category_and_combining_class()
{
    let store = properties();

    assert_eq!(store.get_type(0x41), GeneralCategory::UppercaseLetter);
    assert_eq!(store.get_type(0x61), GeneralCategory::LowercaseLetter);
    assert_eq!(store.get_type(0x301), GeneralCategory::NonspacingMark);
    assert_eq!(store.get_type(0x20), GeneralCategory::SpaceSeparator);
    assert_eq!(store.get_type(0xAC01), GeneralCategory::OtherLetter);
    assert_eq!(store.get_type(0x378), GeneralCategory::Unassigned);
    assert_eq!(store.get_type(0x110000), GeneralCategory::Unassigned);

    assert_eq!(store.get_combining_class(0x41), 0);
    assert_eq!(store.get_combining_class(0x301), 230);
    assert_eq!(store.get_combining_class(0x316), 220);
    assert_eq!(store.get_combining_class(0x93C), 7);
}

#[test]
fn bidi()
{
    let store = properties();

    assert_eq!(store.get_bidi_class(0x41), BidiClass::LeftToRight);
    assert_eq!(store.get_bidi_class(0x5D0), BidiClass::RightToLeft);
    assert_eq!(store.get_bidi_class(0x628), BidiClass::ArabicLetter);
    assert_eq!(store.get_bidi_class(0x301), BidiClass::NonspacingMark);

    assert!(store.is_mirrored(0x28));
    assert_eq!(store.get_mirror(0x28), 0x29);
    assert_eq!(store.get_mirror(0x29), 0x28);
    assert_eq!(store.get_mirror(0xBB), 0xAB);
    assert_eq!(store.get_mirror(0x41), 0x41);

    assert_eq!(store.get_paired_bracket_type(0x5B), PairedBracketType::Open);
    assert_eq!(store.get_paired_bracket_type(0x5D), PairedBracketType::Close);
    assert_eq!(store.get_paired_bracket_type(0xAB), PairedBracketType::None);
    assert_eq!(store.get_paired_bracket(0x7B), 0x7D);

    assert!(store.is_bidi_control(0x202E));
    assert!(!store.is_bidi_control(0x41));
    assert!(store.is_join_control(0x200C));

    assert_eq!(store.max_value(BidiMaxValue::PairedBracketType), 2);
}

#[test]
fn joining()
{
    let store = properties();

    assert_eq!(store.get_joining_type(0x628), JoiningType::DualJoining);
    assert_eq!(store.get_joining_type(0x301), JoiningType::Transparent);
    assert_eq!(store.get_joining_type(0x41), JoiningType::NonJoining);

    assert_eq!(store.get_joining_group(0x628), JoiningGroup(4));
    assert_eq!(store.get_joining_group(0x629), JoiningGroup(42));
    assert_eq!(store.get_joining_group(0x200D), JoiningGroup::NO_JOINING_GROUP);
}

#[test]
fn age_and_additional()
{
    let store = properties();

    assert_eq!(store.get_age(0x41), VersionInfo::new(1, 1, 0, 0));
    assert_eq!(store.get_age(0x20AC), VersionInfo::new(2, 1, 0, 0));
    assert_eq!(store.get_age(0x10400), VersionInfo::new(3, 1, 0, 0));
    assert_eq!(store.get_age(0x378), VersionInfo::default());

    assert!(store.is_white_space(0x3000));
    assert!(!store.is_white_space(0x200B));
    assert_eq!(store.get_additional_property(0x20, 1) & 1, 1);
    assert_eq!(store.get_additional_property(0x41, 1), 0);
    // колонок всего две
    assert_eq!(store.get_additional_property(0x41, 2), 0);
}

/// загрузка из одного источника возвращает общие данные
#[test]
fn cached()
{
    let first = PropertyStore::load(source()).unwrap();
    let second = PropertyStore::load(source()).unwrap();

    assert!(std::ptr::eq(first.character_properties(), second.character_properties()));
    assert!(std::ptr::eq(first.bidi_properties(), second.bidi_properties()));
}
