pub const WARM_UP_TIME: u64 = 3;
pub const MEASUREMENT_TIME: u64 = 7;

#[macro_export]
macro_rules! group {
    ($fn: ident, $test: ident, $group: expr, $name: expr, $t: ty, $normalizer: expr, $method: ident) => {
        #[inline(never)]
        fn $test(normalizer: &$t, source: &str) -> String
        {
            normalizer.$method(source)
        }

        fn $fn(c: &mut Criterion)
        {
            let mut group = c.benchmark_group($group);
            let normalizer = $normalizer;

            group.warm_up_time(core::time::Duration::from_secs(group::WARM_UP_TIME));
            group.measurement_time(core::time::Duration::from_secs(group::MEASUREMENT_TIME));

            for (text_name, text) in group::texts() {
                group.bench_with_input(
                    criterion::BenchmarkId::new($name, text_name),
                    &(&normalizer, text.as_str()),
                    |b, data| b.iter(|| $test(data.0, criterion::black_box(data.1))),
                );
            }

            group.finish();
        }
    };
}

/// тексты из символов, которые есть в выборке UCD
pub fn texts() -> Vec<(&'static str, String)>
{
    let samples = [
        ("latin", "Ça a été écrit à côté, énoncé déjà. "),
        ("latin_decomposed", "C\u{327}a a e\u{301}te\u{301} e\u{301}crit a\u{300} co\u{302}te\u{301}. "),
        ("marks", "a\u{301}\u{316}e\u{308}\u{301}o\u{315}\u{300}\u{316}A\u{30A}\u{301}"),
        ("hangul", "\u{AC00}\u{AC01} \u{1100}\u{1161}\u{11A8}\u{1100}\u{1161} 한국어 "),
        ("devanagari", "\u{915}\u{93C}\u{958} \u{915}\u{93F}\u{924}\u{93E}\u{92C} "),
        ("compatibility", "\u{FB01}\u{A0}\u{2126}\u{212B}\u{2000}\u{3000}"),
    ];

    samples.iter().map(|(name, text)| (*name, text.repeat(256))).collect()
}
