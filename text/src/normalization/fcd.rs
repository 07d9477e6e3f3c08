use super::buffer::ReorderingBuffer;
use super::data::NormalizationData;
use crate::utf16;

impl NormalizationData
{
    /// приведение к FCD
    ///
    /// с буфером - нормализация, без буфера - быстрая проверка: возвращается длина
    /// префикса, удовлетворяющего FCD. ccc отслеживаются здесь же, поэтому в буфер
    /// пишется без упорядочивания; исключение - локальная декомпозиция нарушений.
    pub fn make_fcd(&self, s: &[u16], mut buffer: Option<&mut ReorderingBuffer>) -> usize
    {
        let limit = s.len();
        let mut src = 0;

        // последняя безопасная граница: перед lccc = 0 или после упорядоченного tccc <= 1
        let mut prev_boundary = 0;

        // fcd16 предыдущего символа; отрицательное значение - !кодпоинт с отложенным вычислением
        let mut prev_fcd16: i32 = 0;
        let mut fcd16: u16 = 0;
        let mut code: u32 = 0;

        loop {
            let mut prev_src = src;

            // символы с lccc = 0
            while src != limit {
                let unit = s[src] as u32;

                if unit < self.min_lccc_cp {
                    prev_fcd16 = !(unit as i32);
                    src += 1;
                } else if !self.single_lead_might_have_non_zero_fcd16(unit) {
                    prev_fcd16 = 0;
                    src += 1;
                } else {
                    code = unit;

                    if utf16::is_lead(unit) {
                        if let Some(&next) = s.get(src + 1) {
                            if utf16::is_trail(next as u32) {
                                code = utf16::supplementary(unit, next as u32);
                            }
                        }
                    }

                    fcd16 = self.get_fcd16_from_norm_data(code);

                    if fcd16 > 0xFF {
                        break;
                    }

                    prev_fcd16 = fcd16 as i32;
                    src += utf16::char_count(code);
                }
            }

            if src != prev_src {
                if src == limit {
                    if let Some(buffer) = buffer.as_deref_mut() {
                        buffer.flush_and_append_zero_cc(&s[prev_src .. src]);
                    }

                    break;
                }

                prev_boundary = src;

                // у предыдущего символа lccc = 0
                if prev_fcd16 < 0 {
                    let prev = !prev_fcd16 as u32;

                    if prev < self.min_decomp_no_cp {
                        prev_fcd16 = 0;
                    } else {
                        prev_fcd16 = self.get_fcd16_from_norm_data(prev) as i32;

                        if prev_fcd16 > 1 {
                            prev_boundary -= 1;
                        }
                    }
                } else {
                    let mut p = src - 1;

                    if utf16::is_trail(s[p] as u32) && prev_src < p && utf16::is_lead(s[p - 1] as u32) {
                        p -= 1;
                        // prev_fcd16 относился только к завершающему суррогату
                        prev_fcd16 =
                            self.get_fcd16_from_norm_data(utf16::supplementary(s[p] as u32, s[p + 1] as u32)) as i32;
                    }

                    if prev_fcd16 > 1 {
                        prev_boundary = p;
                    }
                }

                // последний символ с lccc = 0 может измениться, поэтому пишется отдельно
                if let Some(buffer) = buffer.as_deref_mut() {
                    buffer.flush_and_append_zero_cc(&s[prev_src .. prev_boundary]);
                    buffer.append_zero_cc_units(&s[prev_boundary .. src]);
                }

                prev_src = src;
            } else if src == limit {
                break;
            }

            src += utf16::char_count(code);

            // у текущего символа lccc != 0: проверяем порядок
            if (prev_fcd16 & 0xFF) as u16 <= fcd16 >> 8 {
                if fcd16 & 0xFF <= 1 {
                    prev_boundary = src;
                }

                if let Some(buffer) = buffer.as_deref_mut() {
                    buffer.append_zero_cc(code);
                }

                prev_fcd16 = fcd16 as i32;
                continue;
            }

            match buffer.as_deref_mut() {
                None => return prev_boundary,
                Some(buffer) => {
                    // откатить уже записанное и разложить фрагмент до следующей границы
                    buffer.remove_suffix(prev_src - prev_boundary);

                    src = self.find_next_fcd_boundary(s, src, limit);
                    self.decompose_short(s, prev_boundary, src, false, false, buffer);

                    prev_boundary = src;
                    prev_fcd16 = 0;
                }
            }
        }

        src
    }

    /// дописать s к буферу, приведя к FCD фрагмент на стыке
    pub fn make_fcd_and_append(&self, s: &[u16], do_make_fcd: bool, buffer: &mut ReorderingBuffer)
    {
        let mut src = 0;

        if !buffer.is_empty() {
            let first_boundary = self.find_next_fcd_boundary(s, 0, s.len());

            if first_boundary != 0 {
                let last_boundary = self.find_previous_fcd_boundary(buffer.as_slice(), buffer.len());

                let mut middle = buffer.as_slice()[last_boundary ..].to_vec();
                buffer.remove_suffix(buffer.len() - last_boundary);
                middle.extend_from_slice(&s[.. first_boundary]);

                self.make_fcd(&middle, Some(&mut *buffer));
                src = first_boundary;
            }
        }

        match do_make_fcd {
            true => {
                self.make_fcd(&s[src ..], Some(buffer));
            }
            false => buffer.append_zero_cc_units(&s[src ..]),
        }
    }
}
