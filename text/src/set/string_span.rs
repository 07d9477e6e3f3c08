//! Промежутки в тексте для множеств, содержащих строки.
//!
//! Строка множества "значима", если не все её кодпоинты входят в множество: только такие
//! строки могут продлить промежуток, найденный по одним кодпоинтам. Для каждой строки
//! хранится длина её начального (и конечного) промежутка по кодпоинтам множества -
//! на столько строка может перекрываться с уже пройденным промежутком.
//!
//! CONTAINED ищет самый дальний конец среди всех разбиений текста на элементы множества,
//! запоминая концы совпадений строк в списке смещений, чтобы каждая позиция текста
//! просматривалась не более одного раза. SIMPLE всегда продолжает с самого длинного
//! совпадения, начинающегося раньше всех.

use std::sync::{Mutex, TryLockError};

use super::bmp::BmpSet;
use super::offsets::OffsetList;
use super::SpanCondition;
use crate::utf16;

/// все кодпоинты строки входят в множество
const ALL_CP_CONTAINED: u8 = 0xFF;
/// длина промежутка 0xFE и больше
const LONG_SPAN: u8 = ALL_CP_CONTAINED - 1;

#[derive(Debug)]
pub struct StringSpan
{
    /// кодпоинты множества без строк
    span_set: BmpSet,
    /// кодпоинты множества, первые и последние кодпоинты значимых строк
    span_not_set: BmpSet,
    strings: Vec<Vec<u16>>,
    /// длины начальных промежутков строк (или ALL_CP_CONTAINED)
    span_lengths: Vec<u8>,
    /// длины конечных промежутков строк
    span_back_lengths: Vec<u8>,
    max_length16: usize,
    some_relevant: bool,
    /// список смещений переиспользуется, если не занят другим потоком
    offsets: Mutex<OffsetList>,
}

impl StringSpan
{
    /// inversion_list - кодпоинты множества, strings - строки множества (не короче двух кодпоинтов)
    pub fn new(inversion_list: &[u32], strings: Vec<Vec<u16>>) -> Self
    {
        let span_set = BmpSet::new(inversion_list);

        let mut span_lengths = Vec::with_capacity(strings.len());
        let mut span_back_lengths = Vec::with_capacity(strings.len());
        let mut boundary_code_points = vec![];
        let mut max_length16 = 0;
        let mut some_relevant = false;

        for string in strings.iter() {
            let length16 = string.len();
            let span_length = span_set.span(string, 0, true).0;

            max_length16 = max_length16.max(length16);

            if span_length < length16 {
                some_relevant = true;

                let back_length = length16 - span_set.span_back(string, length16, true).0;

                span_lengths.push(make_span_length(span_length));
                span_back_lengths.push(make_span_length(back_length));

                // промежуток "не в множестве" должен останавливаться перед любой строкой и после неё
                boundary_code_points.push(utf16::code_point_at(string, 0));
                boundary_code_points.push(utf16::code_point_before(string, length16));
            } else {
                span_lengths.push(ALL_CP_CONTAINED);
                span_back_lengths.push(ALL_CP_CONTAINED);
            }
        }

        let span_not_set = match boundary_code_points.iter().all(|&code| span_set.contains(code)) {
            true => span_set.clone(),
            false => {
                let mut set = super::UnicodeSet::from_inversion_list(inversion_list);
                for code in boundary_code_points {
                    set.add(code);
                }

                BmpSet::new(&set.inversion_list())
            }
        };

        log::trace!(
            "промежутки строк: {} строк, значимые: {}, максимальная длина {}",
            strings.len(),
            some_relevant,
            max_length16
        );

        Self {
            span_set,
            span_not_set,
            strings,
            span_lengths,
            span_back_lengths,
            max_length16,
            some_relevant,
            offsets: Mutex::new(OffsetList::new()),
        }
    }

    /// есть строки, которые влияют на промежутки без подсчёта?
    pub fn needs_string_span(&self) -> bool
    {
        self.some_relevant
    }

    pub fn max_length16(&self) -> usize
    {
        self.max_length16
    }

    /// выполнить f со списком смещений: общим, если он свободен, иначе с временным
    fn with_offsets<R>(&self, max_length: usize, f: impl FnOnce(&mut OffsetList) -> R) -> R
    {
        match self.offsets.try_lock() {
            Ok(mut offsets) => {
                offsets.set_max_length(max_length);
                f(&mut offsets)
            }
            Err(TryLockError::Poisoned(poisoned)) => {
                let mut offsets = poisoned.into_inner();
                offsets.set_max_length(max_length);
                f(&mut offsets)
            }
            Err(TryLockError::WouldBlock) => {
                let mut offsets = OffsetList::new();
                offsets.set_max_length(max_length);
                f(&mut offsets)
            }
        }
    }

    /// конец промежутка от start; start < s.len()
    pub fn span(&self, s: &[u16], start: usize, condition: SpanCondition) -> usize
    {
        if condition == SpanCondition::NotContained {
            return self.span_not(s, start).0;
        }

        let span_limit = self.span_set.span(s, start, true).0;

        if span_limit == s.len() {
            return span_limit;
        }

        let max_length = match condition {
            SpanCondition::Contained => self.max_length16,
            _ => 0,
        };

        self.with_offsets(max_length, |offsets| {
            self.span_with_strings(s, start, span_limit, condition, offsets)
        })
    }

    fn span_with_strings(
        &self, s: &[u16], start: usize, span_limit: usize, condition: SpanCondition, offsets: &mut OffsetList,
    ) -> usize
    {
        let length = s.len();
        let mut pos = span_limit;
        let mut rest = length - span_limit;
        let mut span_length = span_limit - start;

        loop {
            if condition == SpanCondition::Contained {
                for (string, &overlap) in self.strings.iter().zip(self.span_lengths.iter()) {
                    if overlap == ALL_CP_CONTAINED {
                        continue;
                    }

                    let length16 = string.len();

                    // внутри промежутка совпадение не нужно: проверяется перекрытие до последнего кодпоинта
                    let mut overlap = match overlap >= LONG_SPAN {
                        true => length16 - utf16::char_count(utf16::code_point_before(string, length16)),
                        false => overlap as usize,
                    }
                    .min(span_length);

                    let mut inc = length16 - overlap;

                    while inc <= rest {
                        if !offsets.contains_offset(inc) && matches_at(s, pos - overlap, length, string) {
                            if inc == rest {
                                return length;
                            }
                            offsets.add_offset(inc);
                        }

                        if overlap == 0 {
                            break;
                        }

                        overlap -= 1;
                        inc += 1;
                    }
                }
            } else {
                let mut max_inc = 0;
                let mut max_overlap = 0;

                for (string, &overlap) in self.strings.iter().zip(self.span_lengths.iter()) {
                    let length16 = string.len();

                    // для самого длинного совпадения проверяются и строки целиком внутри промежутка
                    let mut overlap = match overlap >= LONG_SPAN {
                        true => length16,
                        false => overlap as usize,
                    }
                    .min(span_length);

                    let mut inc = length16 - overlap;

                    while inc <= rest && overlap >= max_overlap {
                        if (overlap > max_overlap || inc > max_inc) && matches_at(s, pos - overlap, length, string) {
                            max_inc = inc;
                            max_overlap = overlap;
                            break;
                        }

                        if overlap == 0 {
                            break;
                        }

                        overlap -= 1;
                        inc += 1;
                    }
                }

                if max_inc != 0 || max_overlap != 0 {
                    pos += max_inc;
                    rest -= max_inc;

                    if rest == 0 {
                        return length;
                    }

                    span_length = 0;
                    continue;
                }
            }

            if span_length != 0 || pos == start {
                // после промежутка по кодпоинтам
                if offsets.is_empty() {
                    return pos;
                }
            } else if offsets.is_empty() {
                // после совпадения строки: ещё один промежуток по кодпоинтам
                let span_limit = self.span_set.span(s, pos, true).0;
                span_length = span_limit - pos;

                if span_length == rest || span_length == 0 {
                    return span_limit;
                }

                pos += span_length;
                rest -= span_length;
                continue;
            } else {
                // одиночный кодпоинт после совпадения, чтобы не перескочить более короткие пути
                let one = span_one(&self.span_set, s, pos);

                if one > 0 {
                    let one = one as usize;

                    if one == rest {
                        return length;
                    }

                    pos += one;
                    rest -= one;
                    offsets.shift(one);
                    span_length = 0;
                    continue;
                }
            }

            let (min_offset, _) = offsets.pop_minimum();
            pos += min_offset;
            rest -= min_offset;
            span_length = 0;
        }
    }

    /// начало промежутка, заканчивающегося в s.len(); s не пустая
    pub fn span_back(&self, s: &[u16], condition: SpanCondition) -> usize
    {
        if condition == SpanCondition::NotContained {
            return self.span_not_back(s).0;
        }

        let length = s.len();
        let pos = self.span_set.span_back(s, length, true).0;

        if pos == 0 {
            return 0;
        }

        let max_length = match condition {
            SpanCondition::Contained => self.max_length16,
            _ => 0,
        };

        self.with_offsets(max_length, |offsets| self.span_back_with_strings(s, pos, condition, offsets))
    }

    fn span_back_with_strings(&self, s: &[u16], span_start: usize, condition: SpanCondition, offsets: &mut OffsetList)
        -> usize
    {
        let length = s.len();
        let mut pos = span_start;
        let mut span_length = length - span_start;

        loop {
            if condition == SpanCondition::Contained {
                for (string, &overlap) in self.strings.iter().zip(self.span_back_lengths.iter()) {
                    if overlap == ALL_CP_CONTAINED {
                        continue;
                    }

                    let length16 = string.len();

                    let mut overlap = match overlap >= LONG_SPAN {
                        true => length16 - utf16::char_count(utf16::code_point_at(string, 0)),
                        false => overlap as usize,
                    }
                    .min(span_length);

                    let mut dec = length16 - overlap;

                    while dec <= pos {
                        if !offsets.contains_offset(dec) && matches_at(s, pos - dec, length, string) {
                            if dec == pos {
                                return 0;
                            }
                            offsets.add_offset(dec);
                        }

                        if overlap == 0 {
                            break;
                        }

                        overlap -= 1;
                        dec += 1;
                    }
                }
            } else {
                let mut max_dec = 0;
                let mut max_overlap = 0;

                for (string, &overlap) in self.strings.iter().zip(self.span_back_lengths.iter()) {
                    let length16 = string.len();

                    let mut overlap = match overlap >= LONG_SPAN {
                        true => length16,
                        false => overlap as usize,
                    }
                    .min(span_length);

                    let mut dec = length16 - overlap;

                    while dec <= pos && overlap >= max_overlap {
                        if (overlap > max_overlap || dec > max_dec) && matches_at(s, pos - dec, length, string) {
                            max_dec = dec;
                            max_overlap = overlap;
                            break;
                        }

                        if overlap == 0 {
                            break;
                        }

                        overlap -= 1;
                        dec += 1;
                    }
                }

                if max_dec != 0 || max_overlap != 0 {
                    pos -= max_dec;

                    if pos == 0 {
                        return 0;
                    }

                    span_length = 0;
                    continue;
                }
            }

            if span_length != 0 || pos == length {
                if offsets.is_empty() {
                    return pos;
                }
            } else if offsets.is_empty() {
                let old_pos = pos;
                pos = self.span_set.span_back(s, old_pos, true).0;
                span_length = old_pos - pos;

                if pos == 0 || span_length == 0 {
                    return pos;
                }

                continue;
            } else {
                let one = span_one_back(&self.span_set, s, pos);

                if one > 0 {
                    let one = one as usize;

                    if one == pos {
                        return 0;
                    }

                    pos -= one;
                    offsets.shift(one);
                    span_length = 0;
                    continue;
                }
            }

            pos -= offsets.pop_minimum().0;
            span_length = 0;
        }
    }

    /// промежуток с подсчётом элементов множества; start < s.len()
    pub fn span_and_count(&self, s: &[u16], start: usize, condition: SpanCondition) -> (usize, usize)
    {
        match condition {
            SpanCondition::NotContained => self.span_not(s, start),
            SpanCondition::Contained => {
                self.with_offsets(self.max_length16, |offsets| self.span_contained_and_count(s, start, offsets))
            }
            SpanCondition::Simple => self.span_simple_and_count(s, start),
        }
    }

    /// промежуток назад от s.len() с подсчётом элементов; s не пустая
    pub fn span_back_and_count(&self, s: &[u16], condition: SpanCondition) -> (usize, usize)
    {
        match condition {
            SpanCondition::NotContained => self.span_not_back(s),
            SpanCondition::Contained => {
                self.with_offsets(self.max_length16, |offsets| self.span_contained_back_and_count(s, offsets))
            }
            SpanCondition::Simple => self.span_simple_back_and_count(s),
        }
    }

    /// кратчайший по количеству элементов путь до самого дальнего конца
    fn span_contained_and_count(&self, s: &[u16], start: usize, offsets: &mut OffsetList) -> (usize, usize)
    {
        let length = s.len();
        let mut pos = start;
        let mut rest = length - start;
        let mut count = 0;

        while rest != 0 {
            let one = span_one(&self.span_set, s, pos);
            if one > 0 {
                offsets.add_offset_and_count(one as usize, count + 1);
            }

            for string in self.strings.iter() {
                let length16 = string.len();

                if length16 <= rest
                    && !offsets.has_count_at_offset(length16, count + 1)
                    && matches_at(s, pos, length, string)
                {
                    offsets.add_offset_and_count(length16, count + 1);
                }
            }

            if offsets.is_empty() {
                break;
            }

            let (min_offset, min_count) = offsets.pop_minimum();
            count = min_count;
            pos += min_offset;
            rest -= min_offset;
        }

        (pos, count as usize)
    }

    fn span_contained_back_and_count(&self, s: &[u16], offsets: &mut OffsetList) -> (usize, usize)
    {
        let length = s.len();
        let mut pos = length;
        let mut count = 0;

        while pos != 0 {
            let one = span_one_back(&self.span_set, s, pos);
            if one > 0 {
                offsets.add_offset_and_count(one as usize, count + 1);
            }

            for string in self.strings.iter() {
                let length16 = string.len();

                if length16 <= pos
                    && !offsets.has_count_at_offset(length16, count + 1)
                    && matches_at(s, pos - length16, length, string)
                {
                    offsets.add_offset_and_count(length16, count + 1);
                }
            }

            if offsets.is_empty() {
                break;
            }

            let (min_offset, min_count) = offsets.pop_minimum();
            count = min_count;
            pos -= min_offset;
        }

        (pos, count as usize)
    }

    /// на каждом шаге - самое длинное совпадение: кодпоинт или строка
    fn span_simple_and_count(&self, s: &[u16], start: usize) -> (usize, usize)
    {
        let length = s.len();
        let mut pos = start;
        let mut count = 0;

        while pos < length {
            let rest = length - pos;
            let mut max_inc = span_one(&self.span_set, s, pos).max(0) as usize;

            for string in self.strings.iter() {
                let length16 = string.len();

                if max_inc < length16 && length16 <= rest && matches_at(s, pos, length, string) {
                    max_inc = length16;
                }
            }

            if max_inc == 0 {
                break;
            }

            count += 1;
            pos += max_inc;
        }

        (pos, count)
    }

    fn span_simple_back_and_count(&self, s: &[u16]) -> (usize, usize)
    {
        let length = s.len();
        let mut pos = length;
        let mut count = 0;

        while pos > 0 {
            let mut max_dec = span_one_back(&self.span_set, s, pos).max(0) as usize;

            for string in self.strings.iter() {
                let length16 = string.len();

                if max_dec < length16 && length16 <= pos && matches_at(s, pos - length16, length, string) {
                    max_dec = length16;
                }
            }

            if max_dec == 0 {
                break;
            }

            count += 1;
            pos -= max_dec;
        }

        (pos, count)
    }

    /// промежуток "не в множестве": до кодпоинта множества или начала значимой строки
    fn span_not(&self, s: &[u16], start: usize) -> (usize, usize)
    {
        let length = s.len();
        let mut pos = start;
        let mut count = 0;

        loop {
            let (span_limit, span_count) = self.span_not_set.span(s, pos, false);
            count += span_count;

            if span_limit == length {
                return (length, count);
            }

            pos = span_limit;
            let rest = length - pos;

            let one = span_one(&self.span_set, s, pos);
            if one > 0 {
                return (pos, count);
            }

            let string_starts_here = self
                .strings
                .iter()
                .zip(self.span_lengths.iter())
                .filter(|(_, &overlap)| overlap != ALL_CP_CONTAINED)
                .any(|(string, _)| string.len() <= rest && matches_at(s, pos, length, string));

            if string_starts_here {
                return (pos, count);
            }

            // граничный кодпоинт строки, но не элемент множества: пропускаем его
            pos += (-one) as usize;
            count += 1;

            if pos == length {
                return (length, count);
            }
        }
    }

    fn span_not_back(&self, s: &[u16]) -> (usize, usize)
    {
        let length = s.len();
        let mut pos = length;
        let mut count = 0;

        loop {
            let (span_start, span_count) = self.span_not_set.span_back(s, pos, false);
            count += span_count;

            if span_start == 0 {
                return (0, count);
            }

            pos = span_start;

            let one = span_one_back(&self.span_set, s, pos);
            if one > 0 {
                return (pos, count);
            }

            let string_ends_here = self
                .strings
                .iter()
                .zip(self.span_lengths.iter())
                .filter(|(_, &overlap)| overlap != ALL_CP_CONTAINED)
                .any(|(string, _)| string.len() <= pos && matches_at(s, pos - string.len(), length, string));

            if string_ends_here {
                return (pos, count);
            }

            pos -= (-one) as usize;
            count += 1;

            if pos == 0 {
                return (0, count);
            }
        }
    }
}

#[inline]
fn make_span_length(length: usize) -> u8
{
    match length < LONG_SPAN as usize {
        true => length as u8,
        false => LONG_SPAN,
    }
}

/// длина кодпоинта в позиции start: положительная, если он в множестве, иначе отрицательная
fn span_one(set: &BmpSet, s: &[u16], start: usize) -> isize
{
    let code = utf16::code_point_at(s, start);
    let length = utf16::char_count(code) as isize;

    match set.contains(code) {
        true => length,
        false => -length,
    }
}

/// то же для кодпоинта перед позицией limit
fn span_one_back(set: &BmpSet, s: &[u16], limit: usize) -> isize
{
    let code = utf16::code_point_before(s, limit);
    let length = utf16::char_count(code) as isize;

    match set.contains(code) {
        true => length,
        false => -length,
    }
}

/// строка t в позиции start текста, не разрезающая суррогатных пар на границах
fn matches_at(s: &[u16], start: usize, limit: usize, t: &[u16]) -> bool
{
    let end = start + t.len();

    s.get(start .. end) == Some(t)
        && !(start > 0 && utf16::is_lead(s[start - 1] as u32) && utf16::is_trail(s[start] as u32))
        && !(end < limit && end > 0 && utf16::is_lead(s[end - 1] as u32) && utf16::is_trail(s[end] as u32))
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::utf16::encode;

    #[test]
    fn string_boundaries_respect_surrogates()
    {
        let s = encode("\u{1F600}");

        assert!(matches_at(&s, 0, 2, &s));
        // половина суррогатной пары не совпадает
        assert!(!matches_at(&s, 0, 2, &s[.. 1]));
        assert!(!matches_at(&s, 1, 2, &s[1 ..]));
    }

    #[test]
    fn relevance()
    {
        let span = StringSpan::new(&[0x61, 0x63], vec![encode("ab"), encode("xy")]);
        assert!(span.needs_string_span());
        assert_eq!(span.max_length16(), 2);

        let span = StringSpan::new(&[0x61, 0x63], vec![encode("ab"), encode("ba")]);
        assert!(!span.needs_string_span());
    }

    #[test]
    fn not_contained_stops_at_string_boundaries()
    {
        // границы строки "xy" не входят в множество {a}
        let span = StringSpan::new(&[0x61, 0x62], vec![encode("xy")]);

        assert_eq!(span.span(&encode("bbxyb"), 0, SpanCondition::NotContained), 2);
        assert_eq!(span.span(&encode("bbab"), 0, SpanCondition::NotContained), 2);
        // одиночный x без y строкой не является
        assert_eq!(span.span(&encode("bxb"), 0, SpanCondition::NotContained), 3);
        assert_eq!(span.span(&encode("bxyb"), 0, SpanCondition::NotContained), 1);
    }

    #[test]
    fn long_overlaps_are_capped()
    {
        assert_eq!(make_span_length(3), 3);
        assert_eq!(make_span_length(0xFE), LONG_SPAN);
        assert_eq!(make_span_length(1000), LONG_SPAN);
    }
}
