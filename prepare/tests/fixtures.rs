use unicode_text::data::{ByteOrder, DataSource, NFC_RESOURCE};
use unicode_text::normalization::NormalizationData;
use unicode_text::properties::{BidiClass, GeneralCategory};
use unicode_text::{Normalizer, PropertyStore};
use unicode_text_prepare::fixtures;

/// подготовленные файлы читаются загрузчиками в обоих порядках байт
#[test]
fn load_prepared()
{
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let source = fixtures(order).unwrap();

        let nfc = Normalizer::nfc(&source).unwrap();
        let nfkd = Normalizer::nfkd(&source).unwrap();
        let store = PropertyStore::load(&source).unwrap();

        assert_eq!(nfc.normalize_str("A\u{30A}"), "\u{C5}");
        assert_eq!(nfkd.normalize_str("\u{FB01}"), "fi");

        assert_eq!(store.get_type(0x41), GeneralCategory::UppercaseLetter);
        assert_eq!(store.get_combining_class(0x301), 230);
        assert_eq!(store.get_bidi_class(0x5D0), BidiClass::RightToLeft);
        assert_eq!(store.get_mirror(0x28), 0x29);
    }
}

/// версия данных - версия Unicode исходных таблиц
#[test]
fn data_version()
{
    let source = fixtures(ByteOrder::Little).unwrap();
    let data = NormalizationData::from_bytes(&source.load(NFC_RESOURCE).unwrap()).unwrap();

    assert_eq!(data.data_version(), unicode_text_prepare::unicode_version());
}
