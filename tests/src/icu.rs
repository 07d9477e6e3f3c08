use icu_normalizer::{ComposingNormalizer, DecomposingNormalizer};

use crate::data::{nfc, nfd, nfkc, nfkd, texts, utf16};

/// сравниваем с результатами нормализации ICU
#[test]
fn icu()
{
    let icu_nfc = ComposingNormalizer::new_nfc();
    let icu_nfkc = ComposingNormalizer::new_nfkc();
    let icu_nfd = DecomposingNormalizer::new_nfd();
    let icu_nfkd = DecomposingNormalizer::new_nfkd();

    macro_rules! test {
        ($(($n: expr, $icu: expr, $t: expr)),+) => {
            $(
                let normalizer = $n;

                for (name, text) in texts() {
                    assert_eq!(normalizer.normalize_str(&text), $icu.normalize(&text), "{}, {}", $t, name);
                    assert_eq!(
                        normalizer.normalize(&utf16(&text)),
                        $icu.normalize_utf16(&utf16(&text)),
                        "{}, utf-16, {}",
                        $t,
                        name
                    );
                }
            )+
        };
    }

    test!(
        (nfc(), icu_nfc, "nfc"),
        (nfkc(), icu_nfkc, "nfkc"),
        (nfd(), icu_nfd, "nfd"),
        (nfkd(), icu_nfkd, "nfkd")
    );
}

/// проверка нормализованности совпадает с ICU
#[test]
fn icu_is_normalized()
{
    let icu_nfc = ComposingNormalizer::new_nfc();
    let icu_nfd = DecomposingNormalizer::new_nfd();

    let (nfc, nfd) = (nfc(), nfd());

    for (name, text) in texts() {
        for sample in [text.clone(), icu_nfc.normalize(&text), icu_nfd.normalize(&text)] {
            let s = utf16(&sample);

            assert_eq!(nfc.is_normalized(&s), icu_nfc.is_normalized(&sample), "nfc, {}", name);
            assert_eq!(nfd.is_normalized(&s), icu_nfd.is_normalized(&sample), "nfd, {}", name);
        }
    }
}
