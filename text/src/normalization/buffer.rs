use super::data::NormalizationData;
use crate::utf16;

/// буфер результата нормализации с каноническим упорядочиванием
///
/// комбинирующие знаки дописываются в порядке неубывания ccc: знак с меньшим ccc
/// вставляется перед знаками с большим ccc, но не раньше reorder_start -
/// позиции после последнего символа с ccc <= 1.
pub struct ReorderingBuffer<'a>
{
    data: &'a NormalizationData,
    s: Vec<u16>,
    last_cc: u8,
    reorder_start: usize,
}

impl<'a> ReorderingBuffer<'a>
{
    /// буфер, продолжающий уже нормализованный текст dest
    pub fn new(data: &'a NormalizationData, dest: Vec<u16>) -> Self
    {
        let mut buffer = Self {
            data,
            s: dest,
            last_cc: 0,
            reorder_start: 0,
        };

        if !buffer.s.is_empty() {
            let mut start = buffer.s.len();
            let mut limit = start;

            buffer.last_cc = buffer.previous_cc(&mut start, &mut limit);

            // reorder_start - после последнего символа с ccc <= 1
            if buffer.last_cc > 1 {
                while buffer.previous_cc(&mut start, &mut limit) > 1 {}
            }

            buffer.reorder_start = limit;
        }

        buffer
    }

    /// ccc символа перед start; сдвигает start на начало символа, limit - на его конец
    fn previous_cc(&self, start: &mut usize, limit: &mut usize) -> u8
    {
        *limit = *start;

        if self.reorder_start >= *start {
            return 0;
        }

        let code = utf16::code_point_before(&self.s, *start);
        *start -= utf16::char_count(code);

        self.data.get_cc_from_yes_or_maybe_cp(code)
    }

    #[inline]
    pub fn len(&self) -> usize
    {
        self.s.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.s.is_empty()
    }

    #[inline]
    pub fn last_cc(&self) -> u8
    {
        self.last_cc
    }

    #[inline]
    pub fn as_slice(&self) -> &[u16]
    {
        &self.s
    }

    pub fn into_inner(self) -> Vec<u16>
    {
        self.s
    }

    /// содержимое совпадает с s?
    pub fn equals(&self, s: &[u16]) -> bool
    {
        self.s == s
    }

    pub(super) fn string_mut(&mut self) -> &mut Vec<u16>
    {
        &mut self.s
    }

    /// дописать кодпоинт с классом комбинирования cc
    pub fn append(&mut self, code: u32, cc: u8)
    {
        if self.last_cc <= cc || cc == 0 {
            utf16::push(&mut self.s, code);
            self.last_cc = cc;

            if cc <= 1 {
                self.reorder_start = self.s.len();
            }
        } else {
            self.insert(code, cc);
        }
    }

    /// дописать отображение; lead_cc и trail_cc - ccc первого и последнего символов
    pub fn append_mapping(&mut self, mapping: &[u16], is_nfd: bool, lead_cc: u8, trail_cc: u8)
    {
        if mapping.is_empty() {
            return;
        }

        if self.last_cc <= lead_cc || lead_cc == 0 {
            if trail_cc <= 1 {
                self.reorder_start = self.s.len() + mapping.len();
            } else if lead_cc <= 1 {
                // может указывать внутрь суррогатной пары
                self.reorder_start = self.s.len() + 1;
            }

            self.s.extend_from_slice(mapping);
            self.last_cc = trail_cc;

            return;
        }

        let mut i = 0;
        let code = utf16::code_point_at(mapping, i);
        i += utf16::char_count(code);

        self.insert(code, lead_cc);

        while i < mapping.len() {
            let code = utf16::code_point_at(mapping, i);
            i += utf16::char_count(code);

            let cc = match i < mapping.len() {
                true => {
                    let norm16 = self.data.get_norm16(code);

                    match is_nfd {
                        true => NormalizationData::get_cc_from_yes_or_maybe(norm16),
                        false => self.data.get_cc(norm16),
                    }
                }
                false => trail_cc,
            };

            self.append(code, cc);
        }
    }

    /// дописать кодовую единицу с ccc = 0
    #[inline]
    pub fn append_unit_zero_cc(&mut self, unit: u16)
    {
        self.s.push(unit);
        self.flush();
    }

    /// дописать кодпоинт с ccc = 0
    #[inline]
    pub fn append_zero_cc(&mut self, code: u32)
    {
        utf16::push(&mut self.s, code);
        self.flush();
    }

    /// дописать текст, не требующий упорядочивания
    pub fn append_zero_cc_units(&mut self, s: &[u16])
    {
        if !s.is_empty() {
            self.flush_and_append_zero_cc(s);
        }
    }

    pub fn flush_and_append_zero_cc(&mut self, s: &[u16])
    {
        self.s.extend_from_slice(s);
        self.flush();
    }

    /// упорядочивание не может затронуть уже записанный текст
    #[inline]
    pub fn flush(&mut self)
    {
        self.last_cc = 0;
        self.reorder_start = self.s.len();
    }

    /// очистить буфер
    pub fn remove(&mut self)
    {
        self.s.clear();
        self.last_cc = 0;
        self.reorder_start = 0;
    }

    /// удалить последние length кодовых единиц
    pub fn remove_suffix(&mut self, length: usize)
    {
        let length = length.min(self.s.len());

        self.s.truncate(self.s.len() - length);
        self.flush();
    }

    /// вставить знак в упорядоченную часть буфера; последний символ имеет ccc > cc
    fn insert(&mut self, code: u32, cc: u8)
    {
        let mut start = self.s.len();
        let mut limit = start;

        // последний символ заведомо остаётся после вставляемого
        let last = utf16::code_point_before(&self.s, start);
        start -= utf16::char_count(last);

        while self.previous_cc(&mut start, &mut limit) > cc {}

        utf16::insert(&mut self.s, limit, code);

        if cc <= 1 {
            self.reorder_start = limit + utf16::char_count(code);
        }
    }
}
