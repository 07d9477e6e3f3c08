//! Множества кодпоинтов и строк, поиск промежутков текста из элементов множества.
//!
//! UnicodeSet - изменяемый построитель. Для поиска промежутков множество "замораживается":
//! FrozenUnicodeSet неизменяем и может использоваться из нескольких потоков.

use std::collections::BTreeSet;

use crate::{utf16, Error, Result};

mod bmp;
mod offsets;
mod string_span;

pub use bmp::BmpSet;
pub use offsets::OffsetList;

use string_span::StringSpan;

/// условие продолжения промежутка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanCondition
{
    /// пока кодпоинты не входят в множество и с позиции не начинается строка множества
    NotContained,
    /// пока текст разбивается на элементы множества; находится самый дальний конец
    Contained,
    /// жадно: на каждом шаге самый длинный элемент множества
    Simple,
}

/// построитель множества: диапазоны кодпоинтов и строки
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnicodeSet
{
    /// отсортированные непересекающиеся несмежные диапазоны [начало, конец]
    ranges: Vec<(u32, u32)>,
    /// строки из двух и более кодпоинтов в порядке кодовых единиц UTF-16
    strings: BTreeSet<Vec<u16>>,
}

impl UnicodeSet
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// множество из списка инверсий (без завершающей границы)
    pub(crate) fn from_inversion_list(list: &[u32]) -> Self
    {
        let ranges = list
            .chunks(2)
            .map(|pair| match pair {
                [start, limit] => (*start, limit - 1),
                _ => (pair[0], utf16::MAX_CODE_POINT),
            })
            .collect();

        Self {
            ranges,
            strings: BTreeSet::new(),
        }
    }

    /// список инверсий кодпоинтов: начало и конец (исключительно) каждого диапазона
    pub fn inversion_list(&self) -> Vec<u32>
    {
        let mut list = Vec::with_capacity(self.ranges.len() * 2);

        for &(start, end) in self.ranges.iter() {
            list.push(start);
            if end < utf16::MAX_CODE_POINT {
                list.push(end + 1);
            }
        }

        list
    }

    pub fn add(&mut self, code: u32) -> &mut Self
    {
        self.add_range(code, code)
    }

    /// добавить диапазон [start, end]; кодпоинты за пределами Unicode отбрасываются
    pub fn add_range(&mut self, start: u32, end: u32) -> &mut Self
    {
        let end = end.min(utf16::MAX_CODE_POINT);

        if start > end {
            return self;
        }

        // диапазоны, которые пересекаются с новым или примыкают к нему
        let first = self.ranges.partition_point(|&(_, e)| e.saturating_add(1) < start);
        let last = self.ranges.partition_point(|&(s, _)| s <= end.saturating_add(1));

        let merged = match first < last {
            true => (start.min(self.ranges[first].0), end.max(self.ranges[last - 1].1)),
            false => (start, end),
        };

        self.ranges.splice(first .. last, [merged]);
        self
    }

    /// добавить строку; строка из одного кодпоинта добавляется как кодпоинт, пустая строка игнорируется
    pub fn add_str(&mut self, s: &str) -> &mut Self
    {
        self.add_utf16(&utf16::encode(s))
    }

    pub fn add_utf16(&mut self, s: &[u16]) -> &mut Self
    {
        match single_code_point(s) {
            Some(code) => self.add(code),
            None => {
                if !s.is_empty() {
                    self.strings.insert(s.to_vec());
                }
                self
            }
        }
    }

    pub fn contains(&self, code: u32) -> bool
    {
        let i = self.ranges.partition_point(|&(_, end)| end < code);

        self.ranges.get(i).map_or(false, |&(start, _)| start <= code)
    }

    /// содержит строку (или кодпоинт, если строка из одного кодпоинта)
    pub fn contains_str(&self, s: &str) -> bool
    {
        let s = utf16::encode(s);

        match single_code_point(&s) {
            Some(code) => self.contains(code),
            None => self.strings.contains(&s),
        }
    }

    /// диапазоны кодпоинтов [начало, конец]
    pub fn ranges(&self) -> impl Iterator<Item = (u32, u32)> + '_
    {
        self.ranges.iter().copied()
    }

    pub fn strings(&self) -> impl Iterator<Item = &[u16]>
    {
        self.strings.iter().map(|s| s.as_slice())
    }

    pub fn has_strings(&self) -> bool
    {
        !self.strings.is_empty()
    }

    pub fn is_empty(&self) -> bool
    {
        self.ranges.is_empty() && self.strings.is_empty()
    }

    /// неизменяемая копия с таблицами для быстрого поиска промежутков
    pub fn freeze(&self) -> FrozenUnicodeSet
    {
        let list = self.inversion_list();

        let string_span = match self.strings.is_empty() {
            true => None,
            false => Some(StringSpan::new(&list, self.strings.iter().cloned().collect())),
        };

        log::debug!(
            "множество заморожено: {} диапазонов, {} строк",
            self.ranges.len(),
            self.strings.len()
        );

        FrozenUnicodeSet {
            code_points: BmpSet::new(&list),
            source: self.clone(),
            string_span,
        }
    }
}

/// строка ровно из одного кодпоинта?
fn single_code_point(s: &[u16]) -> Option<u32>
{
    match s.is_empty() {
        true => None,
        false => {
            let code = utf16::code_point_at(s, 0);

            match utf16::char_count(code) == s.len() {
                true => Some(code),
                false => None,
            }
        }
    }
}

impl<'a> FromIterator<&'a str> for UnicodeSet
{
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self
    {
        let mut set = Self::new();
        iter.into_iter().for_each(|s| {
            set.add_str(s);
        });
        set
    }
}

/// замороженное множество
#[derive(Debug)]
pub struct FrozenUnicodeSet
{
    source: UnicodeSet,
    code_points: BmpSet,
    /// есть, если в множестве есть строки
    string_span: Option<StringSpan>,
}

impl FrozenUnicodeSet
{
    pub fn contains(&self, code: u32) -> bool
    {
        self.code_points.contains(code)
    }

    pub fn contains_str(&self, s: &str) -> bool
    {
        self.source.contains_str(s)
    }

    /// изменяемая копия
    pub fn thaw(&self) -> UnicodeSet
    {
        self.source.clone()
    }

    /// строки влияют на промежутки без подсчёта?
    fn relevant_strings(&self) -> Option<&StringSpan>
    {
        self.string_span.as_ref().filter(|span| span.needs_string_span())
    }

    /// конец промежутка, начинающегося в start
    pub fn span(&self, s: &[u16], start: usize, condition: SpanCondition) -> Result<usize>
    {
        Error::check_index("start", start, s.len())?;

        if start == s.len() {
            return Ok(start);
        }

        Ok(match self.relevant_strings() {
            Some(span) => span.span(s, start, condition),
            None => self.code_points.span(s, start, condition != SpanCondition::NotContained).0,
        })
    }

    /// начало промежутка, заканчивающегося в limit
    pub fn span_back(&self, s: &[u16], limit: usize, condition: SpanCondition) -> Result<usize>
    {
        Error::check_index("limit", limit, s.len())?;

        if limit == 0 {
            return Ok(0);
        }

        Ok(match self.relevant_strings() {
            Some(span) => span.span_back(&s[.. limit], condition),
            None => self.code_points.span_back(s, limit, condition != SpanCondition::NotContained).0,
        })
    }

    /// конец промежутка и количество элементов множества в нём
    ///
    /// для CONTAINED - наименьшее количество элементов, которым покрывается промежуток,
    /// для SIMPLE - количество жадных шагов, для NOT_CONTAINED - количество кодпоинтов.
    /// строки учитываются всегда, даже если все их кодпоинты входят в множество.
    pub fn span_and_count(&self, s: &[u16], start: usize, condition: SpanCondition) -> Result<(usize, usize)>
    {
        Error::check_index("start", start, s.len())?;

        if start == s.len() {
            return Ok((start, 0));
        }

        Ok(match &self.string_span {
            Some(span) => span.span_and_count(s, start, condition),
            None => self.code_points.span(s, start, condition != SpanCondition::NotContained),
        })
    }

    /// начало промежутка, заканчивающегося в limit, и количество элементов в нём
    pub fn span_back_and_count(&self, s: &[u16], limit: usize, condition: SpanCondition) -> Result<(usize, usize)>
    {
        Error::check_index("limit", limit, s.len())?;

        if limit == 0 {
            return Ok((0, 0));
        }

        Ok(match &self.string_span {
            Some(span) => span.span_back_and_count(&s[.. limit], condition),
            None => self.code_points.span_back(s, limit, condition != SpanCondition::NotContained),
        })
    }
}
