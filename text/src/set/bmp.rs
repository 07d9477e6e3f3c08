use crate::utf16;

/// граница списка инверсий: первый кодпоинт за пределами Unicode
pub const HIGH: u32 = 0x110000;

/// быстрая проверка принадлежности кодпоинта множеству
///
/// - U+0000..U+00FF: таблица флагов;
/// - U+0100..U+07FF: по биту на кодпоинт, биты разложены "вертикально": table_7ff[c & 0x3F], бит c >> 6;
/// - U+0800..U+FFFF: по два бита на блок из 64 кодпоинтов (весь блок в множестве / смешанный блок),
///   для смешанных блоков - бинарный поиск в пределах 4K-блока списка инверсий;
/// - дополнительные кодпоинты и суррогаты: бинарный поиск в списке инверсий.
#[derive(Debug, Clone)]
pub struct BmpSet
{
    latin1: [bool; 0x100],
    table_7ff: [u32; 64],
    /// бит lead - все 64 кодпоинта блока в множестве, бит lead + 16 - смешанный блок
    block_bits: [u32; 64],
    /// индексы в списке инверсий для U+0800, U+1000, .. U+F000, U+10000 и конец списка
    list_4k_starts: [usize; 18],
    /// список инверсий, завершённый HIGH
    list: Vec<u32>,
}

impl BmpSet
{
    /// список инверсий: возрастающие границы [начало, конец), [начало, конец), .. без HIGH
    pub fn new(inversion_list: &[u32]) -> Self
    {
        let mut list = inversion_list.to_vec();
        list.push(HIGH);

        let mut set = Self {
            latin1: [false; 0x100],
            table_7ff: [0; 64],
            block_bits: [0; 64],
            list_4k_starts: [0; 18],
            list,
        };

        let last = set.list.len() - 1;

        set.list_4k_starts[0] = set.find_code_point(0x800, 0, last);
        for i in 1 ..= 0x10 {
            set.list_4k_starts[i] = set.find_code_point((i as u32) << 12, set.list_4k_starts[i - 1], last);
        }
        set.list_4k_starts[0x11] = last;

        set.init_bits();
        set
    }

    fn init_bits(&mut self)
    {
        for code in 0 .. 0x100 {
            self.latin1[code as usize] = self.contains_in_list(code);
        }

        for code in 0x100 .. 0x800 {
            if self.contains_in_list(code) {
                self.table_7ff[(code & 0x3F) as usize] |= 1 << (code >> 6);
            }
        }

        for block in (0x800 >> 6) .. (0x10000 >> 6) {
            let start = block << 6;
            let index = self.find_code_point(start, 0, self.list.len() - 1);

            let lead = block >> 6;
            let bits = &mut self.block_bits[(block & 0x3F) as usize];

            // блок однородный, если следующая граница списка лежит за его концом
            match (self.list[index] >= start + 64, index & 1 != 0) {
                (true, true) => *bits |= 1 << lead,
                (true, false) => (),
                (false, _) => *bits |= 0x10001 << lead,
            }
        }
    }

    /// наименьший i в [lo, hi], такой что code < list[i]
    fn find_code_point(&self, code: u32, mut lo: usize, mut hi: usize) -> usize
    {
        if code < self.list[lo] {
            return lo;
        }

        if lo >= hi || code >= self.list[hi - 1] {
            return hi;
        }

        loop {
            let i = (lo + hi) >> 1;

            if i == lo {
                break;
            }

            match code < self.list[i] {
                true => hi = i,
                false => lo = i,
            }
        }

        hi
    }

    #[inline]
    fn contains_slow(&self, code: u32, lo: usize, hi: usize) -> bool
    {
        self.find_code_point(code, lo, hi) & 1 != 0
    }

    #[inline]
    fn contains_in_list(&self, code: u32) -> bool
    {
        self.contains_slow(code, 0, self.list.len() - 1)
    }

    #[inline(always)]
    fn contains_bmp_block(&self, code: u32) -> bool
    {
        let lead = (code >> 12) as usize;
        let two_bits = (self.block_bits[((code >> 6) & 0x3F) as usize] >> lead) & 0x10001;

        match two_bits <= 1 {
            true => two_bits != 0,
            false => self.contains_slow(code, self.list_4k_starts[lead], self.list_4k_starts[lead + 1]),
        }
    }

    pub fn contains(&self, code: u32) -> bool
    {
        match code {
            0 ..= 0xFF => self.latin1[code as usize],
            0x100 ..= 0x7FF => self.table_7ff[(code & 0x3F) as usize] & (1 << (code >> 6)) != 0,
            0x800 ..= 0xD7FF | 0xE000 ..= 0xFFFF => self.contains_bmp_block(code),
            0xD800 ..= 0xDFFF | 0x10000 ..= utf16::MAX_CODE_POINT => {
                self.contains_slow(code, self.list_4k_starts[0xD], self.list_4k_starts[0x11])
            }
            _ => false,
        }
    }

    /// принадлежность кодовой единицы (непарного суррогата - как кодпоинта)
    #[inline(always)]
    fn contains_unit(&self, unit: u32) -> bool
    {
        match unit {
            0 ..= 0xFF => self.latin1[unit as usize],
            0x100 ..= 0x7FF => self.table_7ff[(unit & 0x3F) as usize] & (1 << (unit >> 6)) != 0,
            _ => self.contains_bmp_block(unit),
        }
    }

    #[inline(always)]
    fn contains_supplementary(&self, code: u32) -> bool
    {
        self.contains_slow(code, self.list_4k_starts[0x10], self.list_4k_starts[0x11])
    }

    /// пропустить кодпоинты, для которых contains(c) == contained;
    /// возвращает конец промежутка и количество пропущенных кодпоинтов
    pub fn span(&self, s: &[u16], start: usize, contained: bool) -> (usize, usize)
    {
        let limit = s.len();
        let mut i = start;
        let mut supplementary = 0;

        while i < limit {
            let unit = s[i] as u32;

            if utf16::is_lead(unit) && i + 1 < limit && utf16::is_trail(s[i + 1] as u32) {
                let code = utf16::supplementary(unit, s[i + 1] as u32);

                if self.contains_supplementary(code) != contained {
                    break;
                }

                supplementary += 1;
                i += 2;
                continue;
            }

            if self.contains_unit(unit) != contained {
                break;
            }

            i += 1;
        }

        (i, i - start - supplementary)
    }

    /// то же в обратном направлении от limit; возвращает начало промежутка и количество кодпоинтов
    pub fn span_back(&self, s: &[u16], limit: usize, contained: bool) -> (usize, usize)
    {
        let mut i = limit;
        let mut supplementary = 0;

        while i > 0 {
            let unit = s[i - 1] as u32;

            if utf16::is_trail(unit) && i >= 2 && utf16::is_lead(s[i - 2] as u32) {
                let code = utf16::supplementary(s[i - 2] as u32, unit);

                if self.contains_supplementary(code) != contained {
                    break;
                }

                supplementary += 1;
                i -= 2;
                continue;
            }

            if self.contains_unit(unit) != contained {
                break;
            }

            i -= 1;
        }

        (i, limit - i - supplementary)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn set(ranges: &[(u32, u32)]) -> BmpSet
    {
        let list: Vec<u32> = ranges.iter().flat_map(|&(start, end)| [start, end + 1]).collect();

        BmpSet::new(&list)
    }

    #[test]
    fn contains_matches_ranges()
    {
        let ranges = [(0x41, 0x5A), (0x300, 0x36F), (0x900, 0x97F), (0xAC00, 0xD7A3), (0xD800, 0xD800), (0x1F600, 0x1F64F)];
        let bmp = set(&ranges);

        for code in (0 ..= 0x10FFFF).step_by(7).chain([0x41, 0x5A, 0x5B, 0x2FF, 0x300, 0xD7A3, 0xD7A4, 0xD800, 0x1F600]) {
            let expected = ranges.iter().any(|&(start, end)| (start ..= end).contains(&code));
            assert_eq!(bmp.contains(code), expected, "U+{:04X}", code);
        }

        assert!(!bmp.contains(0x110000));
    }

    #[test]
    fn empty_and_full()
    {
        let empty = BmpSet::new(&[]);
        let full = BmpSet::new(&[0]);

        for code in [0, 0x7F, 0x7FF, 0x800, 0xFFFF, 0x10000, 0x10FFFF] {
            assert!(!empty.contains(code));
            assert!(full.contains(code));
        }
    }

    #[test]
    fn spans_surrogate_pairs()
    {
        let bmp = set(&[(0x61, 0x7A), (0x1F600, 0x1F64F)]);
        let s = crate::utf16::encode("ab\u{1F600}c1");

        assert_eq!(bmp.span(&s, 0, true), (5, 4));
        assert_eq!(bmp.span(&s, 5, false), (6, 1));
        assert_eq!(bmp.span_back(&s, 5, true), (0, 4));
        assert_eq!(bmp.span_back(&s, 6, true), (6, 0));
        assert_eq!(bmp.span_back(&s, 6, false), (5, 1));
    }

    #[test]
    fn lone_surrogates_are_code_points()
    {
        let bmp = set(&[(0xD800, 0xDBFF)]);
        let s = [0xD800, 0xD801, 0xDC00];

        // последняя пара - дополнительный кодпоинт, его в множестве нет
        assert_eq!(bmp.span(&s, 0, true), (1, 1));
        assert_eq!(bmp.span_back(&s, 1, true), (0, 1));
    }
}
