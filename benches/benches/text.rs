use criterion::{criterion_group, criterion_main, Criterion};
use unicode_text::data::{ByteOrder, MemorySource};
use unicode_text::Normalizer;

mod group;

fn source() -> MemorySource
{
    unicode_text_prepare::fixtures(ByteOrder::Little).unwrap()
}

group!(nfc, test_nfc, "nfc", "text", Normalizer, Normalizer::nfc(&source()).unwrap(), normalize_str);
group!(nfd, test_nfd, "nfd", "text", Normalizer, Normalizer::nfd(&source()).unwrap(), normalize_str);
group!(nfkc, test_nfkc, "nfkc", "text", Normalizer, Normalizer::nfkc(&source()).unwrap(), normalize_str);
group!(nfkd, test_nfkd, "nfkd", "text", Normalizer, Normalizer::nfkd(&source()).unwrap(), normalize_str);
group!(fcd, test_fcd, "fcd", "text", Normalizer, Normalizer::fcd(&source()).unwrap(), normalize_str);

criterion_group!(benches, nfc, nfd, nfkc, nfkd, fcd);
criterion_main!(benches);
