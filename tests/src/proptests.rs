use icu_normalizer::{ComposingNormalizer, DecomposingNormalizer};
use proptest::prelude::*;
use proptest::sample::Index;
use unicode_text::utf16::{char_count, code_point_at, code_point_before, code_points, is_lead, is_trail};
use unicode_text::{FrozenUnicodeSet, QuickCheckResult, SpanCondition, UnicodeSet};

use crate::data::{fcc, fcd, marks, nfc, nfd, nfkc, nfkd, repertoire, utf16, ALPHABET};

/// строки из символов, полностью описанных выборкой UCD
fn text() -> impl Strategy<Value = String>
{
    prop::collection::vec(prop::sample::select(ALPHABET), 0 .. 16).prop_map(|chars| chars.into_iter().collect())
}

/// строки из всех символов выборки UCD, с частыми цепочками знаков
fn repertoire_text() -> impl Strategy<Value = String>
{
    let code = prop_oneof![
        3 => prop::sample::select(repertoire()),
        2 => prop::sample::select(marks()),
    ];

    prop::collection::vec(code, 0 ..= 30).prop_map(|chars| chars.into_iter().collect())
}

/// куски текста для промежутков: буквы, половинки суррогатной пары и пара целиком
const PIECES: &[&[u16]] = &[&[0x61], &[0x62], &[0x63], &[0xD83D], &[0xDE00], &[0xD83D, 0xDE00]];

const CODES: &[u32] = &[0x61, 0x62, 0x63, 0xD83D, 0xDE00, 0x1F600];

fn pieces(count: std::ops::Range<usize>) -> impl Strategy<Value = Vec<u16>>
{
    prop::collection::vec(prop::sample::select(PIECES), count).prop_map(|pieces| pieces.concat())
}

/// множество: кодпоинты и строки
fn elements() -> impl Strategy<Value = Elements>
{
    (
        prop::collection::vec(prop::sample::select(CODES), 0 .. 4),
        prop::collection::vec(pieces(2 .. 4), 0 .. 4),
    )
        .prop_map(|(codes, strings)| Elements::new(codes, strings))
}

/// элементы множества для проверки промежутков перебором
#[derive(Debug, Clone)]
struct Elements
{
    codes: Vec<u32>,
    strings: Vec<Vec<u16>>,
}

impl Elements
{
    /// строка из одного кодпоинта - это кодпоинт
    fn new(mut codes: Vec<u32>, strings: Vec<Vec<u16>>) -> Self
    {
        let mut multiple = vec![];

        for string in strings {
            match code_points(&string).count() {
                1 => codes.push(code_point_at(&string, 0)),
                _ => multiple.push(string),
            }
        }

        Self { codes, strings: multiple }
    }

    fn set(&self) -> FrozenUnicodeSet
    {
        let mut set = UnicodeSet::new();

        for &code in self.codes.iter() {
            set.add(code);
        }
        for string in self.strings.iter() {
            set.add_utf16(string);
        }

        set.freeze()
    }

    /// длины элементов, начинающихся в pos
    fn steps(&self, s: &[u16], pos: usize) -> Vec<usize>
    {
        let mut steps = vec![];

        if pos < s.len() {
            let code = code_point_at(s, pos);
            if self.codes.contains(&code) {
                steps.push(char_count(code));
            }
        }

        for string in self.strings.iter() {
            if matches(s, pos, string) {
                steps.push(string.len());
            }
        }

        steps
    }

    /// длины элементов, заканчивающихся в pos
    fn steps_back(&self, s: &[u16], pos: usize) -> Vec<usize>
    {
        let mut steps = vec![];

        if pos > 0 {
            let code = code_point_before(s, pos);
            if self.codes.contains(&code) {
                steps.push(char_count(code));
            }
        }

        for string in self.strings.iter() {
            if string.len() <= pos && matches(s, pos - string.len(), string) {
                steps.push(string.len());
            }
        }

        steps
    }

    /// наименьшее количество элементов до каждой достижимой позиции
    fn counts(&self, s: &[u16], start: usize) -> Vec<Option<usize>>
    {
        let mut counts = vec![None; s.len() + 1];
        counts[start] = Some(0);

        for pos in start .. s.len() {
            let count = match counts[pos] {
                Some(count) => count + 1,
                None => continue,
            };

            for step in self.steps(s, pos) {
                let next: &mut Option<usize> = &mut counts[pos + step];
                *next = Some(next.map_or(count, |c| c.min(count)));
            }
        }

        counts
    }

    fn counts_back(&self, s: &[u16]) -> Vec<Option<usize>>
    {
        let mut counts = vec![None; s.len() + 1];
        counts[s.len()] = Some(0);

        for pos in (1 ..= s.len()).rev() {
            let count = match counts[pos] {
                Some(count) => count + 1,
                None => continue,
            };

            for step in self.steps_back(s, pos) {
                let next: &mut Option<usize> = &mut counts[pos - step];
                *next = Some(next.map_or(count, |c| c.min(count)));
            }
        }

        counts
    }

    /// самая дальняя достижимая позиция и наименьшее количество элементов до неё
    fn contained(&self, s: &[u16], start: usize) -> (usize, usize)
    {
        let counts = self.counts(s, start);

        (start ..= s.len())
            .rev()
            .find_map(|pos| counts[pos].map(|count| (pos, count)))
            .unwrap_or((start, 0))
    }

    fn contained_back(&self, s: &[u16]) -> (usize, usize)
    {
        let counts = self.counts_back(s);

        (0 ..= s.len()).find_map(|pos| counts[pos].map(|count| (pos, count))).unwrap_or((s.len(), 0))
    }

    /// на каждом шаге - самый длинный элемент
    fn simple(&self, s: &[u16], start: usize) -> (usize, usize)
    {
        let (mut pos, mut count) = (start, 0);

        while let Some(step) = self.steps(s, pos).into_iter().max() {
            pos += step;
            count += 1;
        }

        (pos, count)
    }

    fn simple_back(&self, s: &[u16]) -> (usize, usize)
    {
        let (mut pos, mut count) = (s.len(), 0);

        while let Some(step) = self.steps_back(s, pos).into_iter().max() {
            pos -= step;
            count += 1;
        }

        (pos, count)
    }

    /// пропуск кодпоинтов до первого элемента множества
    fn not_contained(&self, s: &[u16], start: usize) -> (usize, usize)
    {
        let (mut pos, mut count) = (start, 0);

        while pos < s.len() && self.steps(s, pos).is_empty() {
            pos += char_count(code_point_at(s, pos));
            count += 1;
        }

        (pos, count)
    }

    fn not_contained_back(&self, s: &[u16]) -> (usize, usize)
    {
        let (mut pos, mut count) = (s.len(), 0);

        while pos > 0 && self.steps_back(s, pos).is_empty() {
            pos -= char_count(code_point_before(s, pos));
            count += 1;
        }

        (pos, count)
    }
}

/// позиция i разрезает суррогатную пару
fn splits(s: &[u16], i: usize) -> bool
{
    i > 0 && i < s.len() && is_lead(s[i - 1] as u32) && is_trail(s[i] as u32)
}

fn matches(s: &[u16], start: usize, t: &[u16]) -> bool
{
    let end = start + t.len();

    s.get(start .. end) == Some(t) && !splits(s, start) && !splits(s, end)
}

/// границы кодпоинтов текста
fn boundaries(s: &[u16]) -> Vec<usize>
{
    let mut positions = vec![0];
    let mut pos = 0;

    while pos < s.len() {
        pos += char_count(code_point_at(s, pos));
        positions.push(pos);
    }

    positions
}

proptest! {
    #[test]
    fn matches_icu(s in repertoire_text())
    {
        prop_assert_eq!(nfc().normalize_str(&s), ComposingNormalizer::new_nfc().normalize(&s));
        prop_assert_eq!(nfd().normalize_str(&s), DecomposingNormalizer::new_nfd().normalize(&s));
        prop_assert_eq!(nfkc().normalize_str(&s), ComposingNormalizer::new_nfkc().normalize(&s));
        prop_assert_eq!(nfkd().normalize_str(&s), DecomposingNormalizer::new_nfkd().normalize(&s));
    }

    #[test]
    fn decompose_is_idempotent(s in repertoire_text())
    {
        let nfd = nfd();
        let once = nfd.normalize(&utf16(&s));

        prop_assert_eq!(nfd.normalize(&once), once.clone());
        prop_assert!(nfd.is_normalized(&once));
    }

    #[test]
    fn compose_ignores_prior_decomposition(s in repertoire_text())
    {
        let (nfc, nfd) = (nfc(), nfd());
        let s = utf16(&s);

        let composed = nfc.normalize(&s);

        prop_assert_eq!(nfc.normalize(&nfd.normalize(&s)), composed.clone());
        prop_assert!(nfc.is_normalized(&composed));
        prop_assert_ne!(nfc.quick_check(&composed), QuickCheckResult::No);
        prop_assert!(nfc.span_quick_check_yes(&s) <= s.len());
    }

    #[test]
    fn fcd_and_fcc_are_equivalent(s in text())
    {
        let (nfc, nfd, fcd, fcc) = (nfc(), nfd(), fcd(), fcc());
        let s = utf16(&s);

        let fcd_text = fcd.normalize(&s);
        let fcc_text = fcc.normalize(&s);

        prop_assert!(fcd.is_normalized(&fcd_text));
        prop_assert!(fcc.is_normalized(&fcc_text));
        prop_assert_eq!(nfd.normalize(&fcd_text), nfd.normalize(&s));
        prop_assert_eq!(nfc.normalize(&fcc_text), nfc.normalize(&s));
        // FCC-строка удовлетворяет FCD
        prop_assert!(fcd.is_normalized(&fcc_text));
    }

    #[test]
    fn append_matches_concatenation(a in text(), b in text())
    {
        for normalizer in [nfc(), nfd(), nfkc()] {
            let whole = normalizer.normalize(&utf16(&(a.clone() + &b)));

            let mut first = normalizer.normalize(&utf16(&a));
            normalizer.normalize_second_and_append(&mut first, &utf16(&b));
            prop_assert_eq!(&first, &whole);

            let mut first = normalizer.normalize(&utf16(&a));
            normalizer.append(&mut first, &normalizer.normalize(&utf16(&b)));
            prop_assert_eq!(normalizer.normalize(&first), whole);
        }
    }

    #[test]
    fn spans(elements in elements(), s in pieces(0 .. 12), start in any::<Index>(), limit in any::<Index>())
    {
        let set = elements.set();
        let positions = boundaries(&s);
        let start = *start.get(&positions);
        let limit = *limit.get(&positions);

        // вперёд
        let contained = elements.contained(&s, start);
        prop_assert_eq!(set.span(&s, start, SpanCondition::Contained).unwrap(), contained.0);
        prop_assert_eq!(set.span_and_count(&s, start, SpanCondition::Contained).unwrap(), contained);

        let not_contained = elements.not_contained(&s, start);
        prop_assert_eq!(set.span(&s, start, SpanCondition::NotContained).unwrap(), not_contained.0);
        prop_assert_eq!(set.span_and_count(&s, start, SpanCondition::NotContained).unwrap(), not_contained);

        prop_assert_eq!(set.span_and_count(&s, start, SpanCondition::Simple).unwrap(), elements.simple(&s, start));
        // самое длинное совпадение всегда заканчивается в достижимой позиции
        let simple = set.span(&s, start, SpanCondition::Simple).unwrap();
        prop_assert!(elements.counts(&s, start)[simple].is_some());

        // назад
        let head = &s[.. limit];

        let contained = elements.contained_back(head);
        prop_assert_eq!(set.span_back(&s, limit, SpanCondition::Contained).unwrap(), contained.0);
        prop_assert_eq!(set.span_back_and_count(&s, limit, SpanCondition::Contained).unwrap(), contained);

        let not_contained = elements.not_contained_back(head);
        prop_assert_eq!(set.span_back(&s, limit, SpanCondition::NotContained).unwrap(), not_contained.0);
        prop_assert_eq!(set.span_back_and_count(&s, limit, SpanCondition::NotContained).unwrap(), not_contained);

        prop_assert_eq!(set.span_back_and_count(&s, limit, SpanCondition::Simple).unwrap(), elements.simple_back(head));
        let simple = set.span_back(&s, limit, SpanCondition::Simple).unwrap();
        prop_assert!(elements.counts_back(head)[simple].is_some());
    }
}
