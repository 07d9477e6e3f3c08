use super::buffer::ReorderingBuffer;
use super::data::{NormalizationData, MAPPING_HAS_CCC_LCCC_WORD, OFFSET_SHIFT};
use super::hangul;
use crate::utf16;

impl NormalizationData
{
    /// пропустить символы "почти наверняка не раскладывается и ccc = 0";
    /// возвращает позицию, кодпоинт и norm16 первого символа, требующего обработки
    fn skip_most_decomp_yes(&self, s: &[u16], src: usize) -> (usize, u32, u16)
    {
        let mut src = src;

        while src < s.len() {
            let unit = s[src];

            if (unit as u32) < self.min_decomp_no_cp {
                src += 1;
                continue;
            }

            let norm16 = self.get_norm16_from_unit(unit);

            if self.is_most_decomp_yes_and_zero_cc(norm16) {
                src += 1;
                continue;
            }

            if !utf16::is_lead(unit as u32) {
                return (src, unit as u32, norm16);
            }

            match s.get(src + 1) {
                Some(&next) if utf16::is_trail(next as u32) => {
                    let code = utf16::supplementary(unit as u32, next as u32);
                    let norm16 = self.get_raw_norm16(code);

                    if !self.is_most_decomp_yes_and_zero_cc(norm16) {
                        return (src, code, norm16);
                    }

                    src += 2;
                }
                // непарный ведущий суррогат инертен
                _ => src += 1,
            }
        }

        (src, 0, 0)
    }

    /// декомпозиция текста в буфер
    pub fn decompose(&self, s: &[u16], buffer: &mut ReorderingBuffer)
    {
        let mut src = 0;

        loop {
            let prev_src = src;
            let (next, code, norm16) = self.skip_most_decomp_yes(s, src);
            src = next;

            buffer.append_zero_cc_units(&s[prev_src .. src]);

            if src == s.len() {
                break;
            }

            src += utf16::char_count(code);
            self.decompose_code_point(code, norm16, buffer);
        }
    }

    /// быстрая проверка декомпозиции: длина префикса, заведомо находящегося в NFD
    pub fn decompose_quick_check(&self, s: &[u16]) -> usize
    {
        let mut src = 0;
        let mut prev_boundary = 0;
        let mut prev_cc = 0;

        loop {
            let prev_src = src;
            let (next, code, norm16) = self.skip_most_decomp_yes(s, src);
            src = next;

            if src != prev_src {
                prev_cc = 0;
                prev_boundary = src;
            }

            if src == s.len() {
                return src;
            }

            src += utf16::char_count(code);

            if self.is_decomp_yes(norm16) {
                let cc = Self::get_cc_from_yes_or_maybe(norm16);

                if prev_cc <= cc || cc == 0 {
                    prev_cc = cc;

                    if cc <= 1 {
                        prev_boundary = src;
                    }

                    continue;
                }
            }

            // "нет" или нарушен порядок ccc
            return prev_boundary;
        }
    }

    /// дописать s к буферу; без декомпозиции склеиваются только комбинирующие знаки на стыке
    pub fn decompose_and_append(&self, s: &[u16], do_decompose: bool, buffer: &mut ReorderingBuffer)
    {
        if s.is_empty() {
            return;
        }

        if do_decompose {
            self.decompose(s, buffer);
            return;
        }

        let mut src = 0;
        let mut code = utf16::code_point_at(s, 0);
        let mut cc = self.get_cc(self.get_norm16(code));
        let first_cc = cc;
        let mut prev_cc = cc;

        while cc != 0 {
            prev_cc = cc;
            src += utf16::char_count(code);

            if src >= s.len() {
                break;
            }

            code = utf16::code_point_at(s, src);
            cc = self.get_cc(self.get_norm16(code));
        }

        buffer.append_mapping(&s[.. src], false, first_cc, prev_cc);
        buffer.append_zero_cc_units(&s[src ..]);
    }

    /// декомпозиция короткого фрагмента [src, limit);
    /// при stop_at_comp_boundary - до ближайшей границы композиции
    pub(super) fn decompose_short(
        &self,
        s: &[u16],
        src: usize,
        limit: usize,
        stop_at_comp_boundary: bool,
        only_contiguous: bool,
        buffer: &mut ReorderingBuffer,
    ) -> usize
    {
        let s = &s[.. limit];
        let mut src = src;

        while src < limit {
            let code = utf16::code_point_at(s, src);

            if stop_at_comp_boundary && code < self.min_comp_no_maybe_cp {
                return src;
            }

            let norm16 = self.get_norm16(code);

            if stop_at_comp_boundary && self.norm16_has_comp_boundary_before(norm16) {
                return src;
            }

            src += utf16::char_count(code);
            self.decompose_code_point(code, norm16, buffer);

            if stop_at_comp_boundary && self.norm16_has_comp_boundary_after(norm16, only_contiguous) {
                return src;
            }
        }

        src
    }

    /// дописать полную декомпозицию одного кодпоинта
    pub(super) fn decompose_code_point(&self, code: u32, norm16: u16, buffer: &mut ReorderingBuffer)
    {
        let mut code = code;
        let mut norm16 = norm16;

        if norm16 >= self.limit_no_no {
            if self.is_maybe_or_non_zero_cc(norm16) {
                buffer.append(code, Self::get_cc_from_yes_or_maybe(norm16));
                return;
            }

            // отображается на символ "yes и ccc = 0"
            code = self.map_algorithmic(code, norm16);
            norm16 = self.get_raw_norm16(code);
        }

        if norm16 < self.min_yes_no {
            buffer.append(code, 0);
            return;
        }

        if self.is_hangul_lv(norm16) || self.is_hangul_lvt(norm16) {
            hangul::decompose(code, |unit| buffer.append_unit_zero_cc(unit));
            return;
        }

        let mapping = (norm16 >> OFFSET_SHIFT) as usize;
        let first = self.extra_at(mapping);
        let trail_cc = (first >> 8) as u8;

        let lead_cc = match first & MAPPING_HAS_CCC_LCCC_WORD != 0 && mapping > 0 {
            true => (self.extra_at(mapping - 1) >> 8) as u8,
            false => 0,
        };

        buffer.append_mapping(self.mapping(norm16), true, lead_cc, trail_cc);
    }
}
