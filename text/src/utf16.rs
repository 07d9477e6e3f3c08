//! Работа с UTF-16: суррогатные пары, чтение кодпоинтов вперёд и назад.
//!
//! Текст в ядре - последовательность 16-битных кодовых единиц. Непарные суррогаты
//! допустимы и считаются отдельными кодпоинтами.

/// начало ведущих суррогатов
pub const LEAD_SURROGATE_MIN: u32 = 0xD800;
/// начало завершающих суррогатов
pub const TRAIL_SURROGATE_MIN: u32 = 0xDC00;
/// последний кодпоинт Unicode
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// смещение для сборки кодпоинта из суррогатной пары
const SURROGATE_OFFSET: u32 = (LEAD_SURROGATE_MIN << 10) + TRAIL_SURROGATE_MIN - 0x10000;

/// ведущий суррогат (U+D800..U+DBFF)?
#[inline(always)]
pub fn is_lead(unit: u32) -> bool
{
    unit & 0xFFFF_FC00 == LEAD_SURROGATE_MIN
}

/// завершающий суррогат (U+DC00..U+DFFF)?
#[inline(always)]
pub fn is_trail(unit: u32) -> bool
{
    unit & 0xFFFF_FC00 == TRAIL_SURROGATE_MIN
}

/// любой суррогат?
#[inline(always)]
pub fn is_surrogate(unit: u32) -> bool
{
    unit & 0xFFFF_F800 == LEAD_SURROGATE_MIN
}

/// при условии, что unit - суррогат: ведущий ли он?
#[inline(always)]
pub fn is_surrogate_lead(unit: u32) -> bool
{
    unit & 0x400 == 0
}

/// кодпоинт из суррогатной пары
#[inline(always)]
pub fn supplementary(lead: u32, trail: u32) -> u32
{
    (lead << 10).wrapping_add(trail).wrapping_sub(SURROGATE_OFFSET)
}

/// ведущий суррогат дополнительного кодпоинта
#[inline(always)]
pub fn lead(code: u32) -> u16
{
    ((code >> 10) + 0xD7C0) as u16
}

/// завершающий суррогат дополнительного кодпоинта
#[inline(always)]
pub fn trail(code: u32) -> u16
{
    ((code & 0x3FF) | TRAIL_SURROGATE_MIN) as u16
}

/// количество кодовых единиц кодпоинта
#[inline(always)]
pub fn char_count(code: u32) -> usize
{
    match code > 0xFFFF {
        true => 2,
        false => 1,
    }
}

/// кодпоинт, начинающийся с позиции index
#[inline]
pub fn code_point_at(s: &[u16], index: usize) -> u32
{
    let unit = s[index] as u32;

    if is_lead(unit) && index + 1 < s.len() {
        let next = s[index + 1] as u32;

        if is_trail(next) {
            return supplementary(unit, next);
        }
    }

    unit
}

/// кодпоинт, заканчивающийся перед позицией index
#[inline]
pub fn code_point_before(s: &[u16], index: usize) -> u32
{
    let unit = s[index - 1] as u32;

    if is_trail(unit) && index > 1 {
        let previous = s[index - 2] as u32;

        if is_lead(previous) {
            return supplementary(previous, unit);
        }
    }

    unit
}

/// дописать кодпоинт
#[inline]
pub fn push(s: &mut Vec<u16>, code: u32)
{
    match code > 0xFFFF {
        true => {
            s.push(lead(code));
            s.push(trail(code));
        }
        false => s.push(code as u16),
    }
}

/// вставить кодпоинт в позицию index
#[inline]
pub fn insert(s: &mut Vec<u16>, index: usize, code: u32)
{
    match code > 0xFFFF {
        true => {
            s.splice(index .. index, [lead(code), trail(code)]);
        }
        false => s.insert(index, code as u16),
    }
}

/// строка Rust в UTF-16
pub fn encode(s: &str) -> Vec<u16>
{
    s.encode_utf16().collect()
}

/// UTF-16 в строку Rust, непарные суррогаты заменяются на U+FFFD
pub fn decode_lossy(s: &[u16]) -> String
{
    String::from_utf16_lossy(s)
}

/// итератор по кодпоинтам UTF-16 строки
pub fn code_points(s: &[u16]) -> CodePoints<'_>
{
    CodePoints { s, index: 0 }
}

pub struct CodePoints<'a>
{
    s: &'a [u16],
    index: usize,
}

impl<'a> Iterator for CodePoints<'a>
{
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32>
    {
        if self.index >= self.s.len() {
            return None;
        }

        let code = code_point_at(self.s, self.index);
        self.index += char_count(code);

        Some(code)
    }
}
