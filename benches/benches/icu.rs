use criterion::{criterion_group, criterion_main, Criterion};
use icu_normalizer::{ComposingNormalizer, DecomposingNormalizer};

mod group;

group!(nfc, test_nfc, "nfc", "icu", ComposingNormalizer, ComposingNormalizer::new_nfc(), normalize);
group!(nfd, test_nfd, "nfd", "icu", DecomposingNormalizer, DecomposingNormalizer::new_nfd(), normalize);
group!(nfkc, test_nfkc, "nfkc", "icu", ComposingNormalizer, ComposingNormalizer::new_nfkc(), normalize);
group!(nfkd, test_nfkd, "nfkd", "icu", DecomposingNormalizer, DecomposingNormalizer::new_nfkd(), normalize);

criterion_group!(benches, nfc, nfd, nfkc, nfkd);
criterion_main!(benches);
