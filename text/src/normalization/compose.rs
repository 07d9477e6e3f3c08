use super::buffer::ReorderingBuffer;
use super::data::{NormalizationData, INERT, JAMO_VT, MIN_YES_YES_WITH_CC};
use super::hangul;
use crate::utf16;

impl NormalizationData
{
    /// пропустить символы "композиция yes и ccc = 0";
    /// None - достигнут конец текста, иначе позиция, кодпоинт и norm16 первого остального символа
    fn skip_comp_yes(&self, s: &[u16], src: usize) -> Option<(usize, u32, u16)>
    {
        let mut src = src;

        while src < s.len() {
            let unit = s[src];

            if (unit as u32) < self.min_comp_no_maybe_cp {
                src += 1;
                continue;
            }

            let norm16 = self.get_norm16_from_unit(unit);

            if self.is_comp_yes_and_zero_cc(norm16) {
                src += 1;
                continue;
            }

            if !utf16::is_lead(unit as u32) {
                return Some((src, unit as u32, norm16));
            }

            match s.get(src + 1) {
                Some(&next) if utf16::is_trail(next as u32) => {
                    let code = utf16::supplementary(unit as u32, next as u32);
                    let norm16 = self.get_raw_norm16(code);

                    if !self.is_comp_yes_and_zero_cc(norm16) {
                        return Some((src, code, norm16));
                    }

                    src += 2;
                }
                _ => src += 1,
            }
        }

        None
    }

    /// композиция текста в буфер
    ///
    /// при do_compose = false буфер используется только для сравнения фрагментов,
    /// результат - совпадает ли текст со своей нормализованной формой
    pub fn compose(&self, s: &[u16], only_contiguous: bool, do_compose: bool, buffer: &mut ReorderingBuffer) -> bool
    {
        let limit = s.len();
        let mut src = 0;
        let mut prev_boundary = 0;

        loop {
            let (mut prev_src, code, norm16) = match self.skip_comp_yes(s, src) {
                Some(found) => found,
                None => {
                    if do_compose {
                        buffer.append_zero_cc_units(&s[prev_boundary ..]);
                    }

                    return true;
                }
            };

            src = prev_src + utf16::char_count(code);

            // norm16 >= min_no_no: отображение, обратная комбинация или ccc != 0

            if !self.is_maybe_or_non_zero_cc(norm16) {
                if !do_compose {
                    return false;
                }

                // символ окружён границами: декомпозиция соседей не нужна
                if self.is_decomp_no_algorithmic(norm16) {
                    if self.norm16_has_comp_boundary_after(norm16, only_contiguous)
                        || self.has_comp_boundary_before_at(s, src, limit)
                    {
                        buffer.append_zero_cc_units(&s[prev_boundary .. prev_src]);
                        buffer.append(self.map_algorithmic(code, norm16), 0);
                        prev_boundary = src;
                        continue;
                    }
                } else if norm16 < self.min_no_no_comp_boundary_before {
                    // отображение уже в NFC
                    if self.norm16_has_comp_boundary_after(norm16, only_contiguous)
                        || self.has_comp_boundary_before_at(s, src, limit)
                    {
                        buffer.append_zero_cc_units(&s[prev_boundary .. prev_src]);
                        buffer.append_zero_cc_units(self.mapping(norm16));
                        prev_boundary = src;
                        continue;
                    }
                } else if norm16 >= self.min_no_no_empty {
                    // пустое отображение: символ просто выбрасывается
                    if self.has_comp_boundary_before_at(s, src, limit)
                        || self.has_comp_boundary_after_at(s, prev_boundary, prev_src, only_contiguous)
                    {
                        buffer.append_zero_cc_units(&s[prev_boundary .. prev_src]);
                        prev_boundary = src;
                        continue;
                    }
                }
            } else if Self::is_jamo_vt(norm16) && prev_boundary != prev_src {
                let prev = s[prev_src - 1] as u32;

                if code < hangul::JAMO_T_BASE {
                    // гласная: L + V (+ T)
                    if let Some(l) = hangul::jamo_l_index(prev) {
                        if !do_compose {
                            return false;
                        }

                        let t = match s.get(src).and_then(|&next| hangul::jamo_t_index(next as u32)) {
                            Some(t) => {
                                src += 1;
                                Some(t)
                            }
                            None if self.has_comp_boundary_before_at(s, src, limit) => Some(0),
                            // L + V + x, где x может раскладываться в T
                            None => None,
                        };

                        if let Some(t) = t {
                            let syllable = hangul::compose_lvt(hangul::compose_lv(l, code - hangul::JAMO_V_BASE), t);

                            prev_src -= 1;
                            buffer.append_zero_cc_units(&s[prev_boundary .. prev_src]);
                            buffer.append_unit_zero_cc(syllable as u16);
                            prev_boundary = src;
                            continue;
                        }
                    }
                } else if hangul::is_hangul_lv(prev) {
                    // завершающая согласная после слога LV
                    if !do_compose {
                        return false;
                    }

                    let syllable = hangul::compose_lvt(prev, code - hangul::JAMO_T_BASE);

                    prev_src -= 1;
                    buffer.append_zero_cc_units(&s[prev_boundary .. prev_src]);
                    buffer.append_unit_zero_cc(syllable as u16);
                    prev_boundary = src;
                    continue;
                }
            } else if norm16 > JAMO_VT {
                // цепочка знаков, не комбинирующихся назад
                let mut cc = Self::get_cc_from_normal_yes_or_maybe(norm16);

                if only_contiguous && self.get_previous_trail_cc(s, prev_boundary, prev_src) > cc {
                    // нарушение FCD: нужна декомпозиция и непрерывная рекомпозиция
                    if !do_compose {
                        return false;
                    }
                } else {
                    let (next, n16) = loop {
                        if src == limit {
                            if do_compose {
                                buffer.append_zero_cc_units(&s[prev_boundary ..]);
                            }

                            return true;
                        }

                        let prev_cc = cc;
                        let next = utf16::code_point_at(s, src);
                        let n16 = self.get_raw_norm16(next);

                        if n16 < MIN_YES_YES_WITH_CC {
                            break (next, n16);
                        }

                        cc = Self::get_cc_from_normal_yes_or_maybe(n16);

                        if prev_cc > cc {
                            if !do_compose {
                                return false;
                            }

                            break (next, n16);
                        }

                        src += utf16::char_count(next);
                    };

                    // после упорядоченных знаков - граница: текст не меняется
                    if self.norm16_has_comp_boundary_before(n16) {
                        if self.is_comp_yes_and_zero_cc(n16) {
                            src += utf16::char_count(next);
                        }

                        continue;
                    }
                }
            }

            // медленный путь: декомпозиция между ближайшими границами и рекомпозиция

            if prev_boundary != prev_src && !self.norm16_has_comp_boundary_before(norm16) {
                let before = utf16::code_point_before(&s[prev_boundary ..], prev_src - prev_boundary);

                if !self.norm16_has_comp_boundary_after(self.get_raw_norm16(before), only_contiguous) {
                    prev_src -= utf16::char_count(before);
                }
            }

            if do_compose {
                buffer.append_zero_cc_units(&s[prev_boundary .. prev_src]);
            }

            let recompose_start = buffer.len();

            self.decompose_short(s, prev_src, src, false, only_contiguous, buffer);
            src = self.decompose_short(s, src, limit, true, only_contiguous, buffer);

            self.recompose(buffer, recompose_start, only_contiguous);

            if !do_compose {
                if !buffer.equals(&s[prev_src .. src]) {
                    return false;
                }

                buffer.remove();
            }

            prev_boundary = src;
        }
    }

    /// быстрая проверка композиции
    ///
    /// возвращает длину префикса в нормальной форме и признак "может быть";
    /// при do_span признак не вычисляется, префикс обрывается на первом "может быть"
    pub fn compose_quick_check(&self, s: &[u16], only_contiguous: bool, do_span: bool) -> (usize, bool)
    {
        let limit = s.len();
        let mut src = 0;
        let mut prev_boundary = 0;
        let mut maybe = false;

        loop {
            let (prev_src, code, norm16) = match self.skip_comp_yes(s, src) {
                Some(found) => found,
                None => return (limit, maybe),
            };

            src = prev_src + utf16::char_count(code);

            let mut prev_norm16 = INERT;

            if prev_boundary != prev_src {
                prev_boundary = prev_src;

                if !self.norm16_has_comp_boundary_before(norm16) {
                    let before = utf16::code_point_before(s, prev_src);
                    let n16 = self.get_norm16(before);

                    if !self.norm16_has_comp_boundary_after(n16, only_contiguous) {
                        prev_boundary -= utf16::char_count(before);
                        prev_norm16 = n16;
                    }
                }
            }

            if self.is_maybe_or_non_zero_cc(norm16) {
                let mut cc = Self::get_cc_from_yes_or_maybe(norm16);

                // для FCC: предыдущий символ "yes и ccc = 0" с tccc больше текущего знака - "нет"
                if !(only_contiguous && cc != 0 && self.get_trail_cc_from_comp_yes_and_zero_cc(prev_norm16) > cc) {
                    let mut norm16 = norm16;

                    let code = loop {
                        if norm16 < MIN_YES_YES_WITH_CC {
                            match do_span {
                                true => return (prev_boundary, false),
                                false => maybe = true,
                            }
                        }

                        if src == limit {
                            return (src, maybe);
                        }

                        let prev_cc = cc;
                        let code = utf16::code_point_at(s, src);
                        norm16 = self.get_norm16(code);

                        if !self.is_maybe_or_non_zero_cc(norm16) {
                            break code;
                        }

                        cc = Self::get_cc_from_yes_or_maybe(norm16);

                        if !(prev_cc <= cc || cc == 0) {
                            break code;
                        }

                        src += utf16::char_count(code);
                    };

                    if self.is_comp_yes_and_zero_cc(norm16) {
                        prev_boundary = src;
                        src += utf16::char_count(code);
                        continue;
                    }
                }
            }

            return (prev_boundary, false);
        }
    }

    /// дописать s к буферу, перекомпоновав фрагмент на стыке
    pub fn compose_and_append(&self, s: &[u16], do_compose: bool, only_contiguous: bool, buffer: &mut ReorderingBuffer)
    {
        let mut src = 0;

        if !buffer.is_empty() {
            let first_starter = self.find_next_comp_boundary(s, 0, s.len(), only_contiguous);

            if first_starter != 0 {
                let last_starter = self.find_previous_comp_boundary(buffer.as_slice(), buffer.len(), only_contiguous);

                let mut middle = buffer.as_slice()[last_starter ..].to_vec();
                buffer.remove_suffix(buffer.len() - last_starter);
                middle.extend_from_slice(&s[.. first_starter]);

                self.compose(&middle, only_contiguous, true, buffer);
                src = first_starter;
            }
        }

        match do_compose {
            true => {
                self.compose(&s[src ..], only_contiguous, true, buffer);
            }
            false => buffer.append_zero_cc_units(&s[src ..]),
        }
    }

    /// рекомпозиция буфера начиная с start; текст в буфере - в NFD
    ///
    /// композиция не удлиняет текст: композит длиннее стартера не более чем на одну
    /// кодовую единицу, а удаляемый знак занимает хотя бы одну
    pub(super) fn recompose(&self, buffer: &mut ReorderingBuffer, start: usize, only_contiguous: bool)
    {
        let s = buffer.string_mut();
        let mut p = start;

        if p == s.len() {
            return;
        }

        // список композиций стартера, который может скомбинироваться с последующими
        let mut compositions: Option<usize> = None;
        let mut starter = 0;
        let mut starter_is_supplementary = false;
        let mut prev_cc = 0;

        loop {
            let code = utf16::code_point_at(s, p);
            p += utf16::char_count(code);

            let norm16 = self.get_norm16(code);
            let cc = Self::get_cc_from_yes_or_maybe(norm16);

            if let Some(list) = compositions {
                // знак комбинируется назад и не заблокирован
                if self.is_maybe(norm16) && (prev_cc < cc || prev_cc == 0) {
                    if Self::is_jamo_vt(norm16) {
                        // T комбинируются вместе с V: слогов LV в NFD нет
                        if code < hangul::JAMO_T_BASE {
                            if let Some(l) = hangul::jamo_l_index(s[starter] as u32) {
                                let remove = p - 1;
                                let mut syllable = hangul::compose_lv(l, code - hangul::JAMO_V_BASE);

                                if let Some(t) = s.get(p).and_then(|&next| hangul::jamo_t_index(next as u32)) {
                                    p += 1;
                                    syllable = hangul::compose_lvt(syllable, t);
                                }

                                s[starter] = syllable as u16;
                                s.drain(remove .. p);
                                p = remove;
                            }
                        }

                        if p == s.len() {
                            break;
                        }

                        compositions = None;
                        continue;
                    }

                    if let Some(composite_and_fwd) = self.combine(list, code) {
                        let composite = composite_and_fwd >> 1;

                        // удалить знак
                        let remove = p - utf16::char_count(code);
                        s.drain(remove .. p);
                        p = remove;

                        // заменить стартер композитом
                        match (starter_is_supplementary, composite > 0xFFFF) {
                            (true, true) => {
                                s[starter] = utf16::lead(composite);
                                s[starter + 1] = utf16::trail(composite);
                            }
                            (true, false) => {
                                s[starter] = composite as u16;
                                s.remove(starter + 1);
                                starter_is_supplementary = false;
                                p -= 1;
                            }
                            (false, true) => {
                                s[starter] = utf16::lead(composite);
                                s.insert(starter + 1, utf16::trail(composite));
                                starter_is_supplementary = true;
                                p += 1;
                            }
                            (false, false) => s[starter] = composite as u16,
                        }

                        // prev_cc сохраняется: знак удалён

                        if p == s.len() {
                            break;
                        }

                        compositions = match composite_and_fwd & 1 {
                            0 => None,
                            _ => Some(self.get_compositions_list_for_composite(self.get_raw_norm16(composite))),
                        };

                        continue;
                    }
                }
            }

            // комбинации не было
            prev_cc = cc;

            if p == s.len() {
                break;
            }

            if cc == 0 {
                compositions = self.get_compositions_list_for_decomp_yes(norm16);

                if compositions.is_some() {
                    starter = p - utf16::char_count(code);
                    starter_is_supplementary = code > 0xFFFF;
                }
            } else if only_contiguous {
                // FCC: любой промежуточный знак блокирует композицию
                compositions = None;
            }
        }

        buffer.flush();
    }
}
