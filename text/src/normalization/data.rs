use super::hangul;
use crate::data::{read_header_and_data_version, ByteReader, VersionInfo};
use crate::trie::Trie;
use crate::utf16;
use crate::{Error, Result};

/// формат данных нормализации
pub const FORMAT: [u8; 4] = *b"Nrm2";
pub const FORMAT_VERSION: u8 = 4;

// индексы заголовка данных
pub const IX_NORM_TRIE_OFFSET: usize = 0;
pub const IX_EXTRA_DATA_OFFSET: usize = 1;
pub const IX_SMALL_FCD_OFFSET: usize = 2;
pub const IX_RESERVED3_OFFSET: usize = 3;
pub const IX_TOTAL_SIZE: usize = 7;
pub const IX_MIN_DECOMP_NO_CP: usize = 8;
pub const IX_MIN_COMP_NO_MAYBE_CP: usize = 9;
pub const IX_MIN_YES_NO: usize = 10;
pub const IX_MIN_NO_NO: usize = 11;
pub const IX_LIMIT_NO_NO: usize = 12;
pub const IX_MIN_MAYBE_YES: usize = 13;
pub const IX_MIN_YES_NO_MAPPINGS_ONLY: usize = 14;
pub const IX_MIN_NO_NO_COMP_BOUNDARY_BEFORE: usize = 15;
pub const IX_MIN_NO_NO_COMP_NO_MAYBE_CC: usize = 16;
pub const IX_MIN_NO_NO_EMPTY: usize = 17;
pub const IX_MIN_LCCC_CP: usize = 18;
pub const IX_COUNT: usize = 20;

// фиксированные значения norm16
pub const MIN_YES_YES_WITH_CC: u16 = 0xFE02;
pub const JAMO_VT: u16 = 0xFE00;
pub const MIN_NORMAL_MAYBE_YES: u16 = 0xFC00;
pub const JAMO_L: u16 = 2;
pub const INERT: u16 = 1;

/// младший бит norm16: граница композиции после символа
pub const HAS_COMP_BOUNDARY_AFTER: u16 = 1;
pub const OFFSET_SHIFT: u32 = 1;

// алгоритмическое отображение: 2 бита tccc и дельта кодпоинта
pub const DELTA_TCCC_0: u16 = 0;
pub const DELTA_TCCC_1: u16 = 2;
pub const DELTA_TCCC_GT_1: u16 = 4;
pub const DELTA_TCCC_MASK: u16 = 6;
pub const DELTA_SHIFT: u32 = 3;
pub const MAX_DELTA: i32 = 0x40;

// первая кодовая единица отображения
pub const MAPPING_HAS_CCC_LCCC_WORD: u16 = 0x80;
pub const MAPPING_HAS_RAW_MAPPING: u16 = 0x40;
pub const MAPPING_LENGTH_MASK: u16 = 0x1F;

// списки композиций
pub const COMP_1_LAST_TUPLE: u16 = 0x8000;
pub const COMP_1_TRIPLE: u16 = 1;
pub const COMP_1_TRAIL_LIMIT: u32 = 0x3400;
pub const COMP_1_TRAIL_MASK: u16 = 0x7FFE;
pub const COMP_1_TRAIL_SHIFT: u32 = 9;
pub const COMP_2_TRAIL_SHIFT: u32 = 6;
pub const COMP_2_TRAIL_MASK: u16 = 0xFFC0;

/// размер битовой карты smallFCD
pub const SMALL_FCD_LENGTH: usize = 0x100;

/// данные нормализации: trie значений norm16, отображения, списки композиций и карта FCD
///
/// значения norm16 разбиты на непересекающиеся диапазоны, порядок порогов:
/// min_yes_no < min_yes_no_mappings_only < min_no_no < limit_no_no < min_maybe_yes < JAMO_VT < MIN_YES_YES_WITH_CC
#[derive(Debug)]
pub struct NormalizationData
{
    pub(super) trie: Trie<u16>,

    pub(super) min_decomp_no_cp: u32,
    pub(super) min_comp_no_maybe_cp: u32,
    pub(super) min_lccc_cp: u32,

    pub(super) min_yes_no: u16,
    pub(super) min_yes_no_mappings_only: u16,
    pub(super) min_no_no: u16,
    pub(super) min_no_no_comp_boundary_before: u16,
    pub(super) min_no_no_comp_no_maybe_cc: u16,
    pub(super) min_no_no_empty: u16,
    pub(super) limit_no_no: u16,
    pub(super) center_no_no_delta: i32,
    pub(super) min_maybe_yes: u16,

    /// списки композиций maybeYes, за ними - extraData
    pub(super) maybe_yes_compositions: Vec<u16>,
    pub(super) extra_start: usize,

    pub(super) small_fcd: Vec<u8>,

    data_version: VersionInfo,
}

impl NormalizationData
{
    /// разобрать данные формата Nrm2
    pub fn from_bytes(bytes: &[u8]) -> Result<Self>
    {
        let mut reader = ByteReader::new(bytes);
        let data_version =
            read_header_and_data_version(&mut reader, FORMAT, |v| v.major() == FORMAT_VERSION)?;

        let start = reader.position();

        // первый индекс - смещение trie, т.е. размер таблицы индексов в байтах
        let indexes_length = reader.i32()? / 4;

        if indexes_length <= IX_MIN_LCCC_CP as i32 {
            return Err(Error::format(format!("недостаточно индексов нормализации: {}", indexes_length)));
        }

        let mut indexes = vec![indexes_length * 4];
        indexes.extend(reader.i32_array(indexes_length as usize - 1)?);

        let index = |i: usize| -> Result<usize> {
            usize::try_from(indexes[i]).map_err(|_| Error::format(format!("отрицательный индекс нормализации {}", i)))
        };

        let threshold = |i: usize| -> Result<u16> {
            u16::try_from(indexes[i]).map_err(|_| Error::format(format!("порог нормализации {} вне диапазона", i)))
        };

        let min_maybe_yes = threshold(IX_MIN_MAYBE_YES)?;

        if min_maybe_yes & 7 != 0 {
            return Err(Error::format(format!("min_maybe_yes не выровнен: {:#06X}", min_maybe_yes)));
        }

        let trie_offset = index(IX_NORM_TRIE_OFFSET)?;
        let extra_offset = index(IX_EXTRA_DATA_OFFSET)?;
        let small_fcd_offset = index(IX_SMALL_FCD_OFFSET)?;

        if extra_offset < trie_offset || small_fcd_offset < extra_offset {
            return Err(Error::format("смещения разделов нормализации не упорядочены"));
        }

        let trie: Trie<u16> = Trie::deserialize(&mut reader)?;

        if trie.serialized_length() > extra_offset - trie_offset {
            return Err(Error::format("trie нормализации длиннее своего раздела"));
        }

        reader.set_position(start + extra_offset)?;

        let maybe_yes_compositions = reader.u16_array((small_fcd_offset - extra_offset) / 2)?;

        reader.set_position(start + small_fcd_offset)?;
        let small_fcd = reader.bytes(SMALL_FCD_LENGTH)?.to_vec();

        let data = Self {
            trie,
            min_decomp_no_cp: index(IX_MIN_DECOMP_NO_CP)? as u32,
            min_comp_no_maybe_cp: index(IX_MIN_COMP_NO_MAYBE_CP)? as u32,
            min_lccc_cp: index(IX_MIN_LCCC_CP)? as u32,
            min_yes_no: threshold(IX_MIN_YES_NO)?,
            min_yes_no_mappings_only: threshold(IX_MIN_YES_NO_MAPPINGS_ONLY)?,
            min_no_no: threshold(IX_MIN_NO_NO)?,
            min_no_no_comp_boundary_before: threshold(IX_MIN_NO_NO_COMP_BOUNDARY_BEFORE)?,
            min_no_no_comp_no_maybe_cc: threshold(IX_MIN_NO_NO_COMP_NO_MAYBE_CC)?,
            min_no_no_empty: threshold(IX_MIN_NO_NO_EMPTY)?,
            limit_no_no: threshold(IX_LIMIT_NO_NO)?,
            center_no_no_delta: (min_maybe_yes >> DELTA_SHIFT) as i32 - MAX_DELTA - 1,
            min_maybe_yes,
            extra_start: ((MIN_NORMAL_MAYBE_YES.saturating_sub(min_maybe_yes)) >> OFFSET_SHIFT) as usize,
            maybe_yes_compositions,
            small_fcd,
            data_version,
        };

        data.validate()?;

        log::debug!(
            "нормализация {}: trie {} байт, extra {} единиц, min_yes_no {:#06X}, min_maybe_yes {:#06X}",
            data_version,
            data.trie.serialized_length(),
            data.maybe_yes_compositions.len(),
            data.min_yes_no,
            data.min_maybe_yes
        );

        Ok(data)
    }

    /// пороги упорядочены, все отображения из trie помещаются в extraData
    fn validate(&self) -> Result<()>
    {
        let thresholds = [
            self.min_yes_no,
            self.min_yes_no_mappings_only,
            self.min_no_no,
            self.min_no_no_comp_boundary_before,
            self.min_no_no_comp_no_maybe_cc,
            self.min_no_no_empty,
            self.limit_no_no,
            self.min_maybe_yes,
            MIN_NORMAL_MAYBE_YES,
        ];

        if thresholds.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::format("пороги norm16 не упорядочены"));
        }

        if self.extra_start > self.maybe_yes_compositions.len() {
            return Err(Error::format("списки композиций maybeYes длиннее данных"));
        }

        let extra = self.extra();

        for &norm16 in self.trie.values() {
            if norm16 < self.min_yes_no || norm16 >= self.limit_no_no {
                continue;
            }

            let mapping = (norm16 >> OFFSET_SHIFT) as usize;

            let first = match extra.get(mapping) {
                Some(&first) => first,
                None => return Err(Error::format(format!("отображение norm16 {:#06X} вне данных", norm16))),
            };

            if self.is_hangul_lv(norm16) || self.is_hangul_lvt(norm16) {
                continue;
            }

            let length = (first & MAPPING_LENGTH_MASK) as usize;

            if mapping + 1 + length > extra.len() || (first & MAPPING_HAS_CCC_LCCC_WORD != 0 && mapping == 0) {
                return Err(Error::format(format!("отображение norm16 {:#06X} обрезано", norm16)));
            }
        }

        Ok(())
    }

    pub fn data_version(&self) -> VersionInfo
    {
        self.data_version
    }

    /// extraData: отображения и списки композиций остальных символов
    #[inline(always)]
    pub(super) fn extra(&self) -> &[u16]
    {
        &self.maybe_yes_compositions[self.extra_start ..]
    }

    /// кодовая единица extraData; за пределами данных - 0
    #[inline(always)]
    pub(super) fn extra_at(&self, index: usize) -> u16
    {
        self.extra().get(index).copied().unwrap_or(0)
    }

    /// отображение (без первой кодовой единицы)
    #[inline]
    pub(super) fn mapping(&self, norm16: u16) -> &[u16]
    {
        let mapping = (norm16 >> OFFSET_SHIFT) as usize;
        let length = (self.extra_at(mapping) & MAPPING_LENGTH_MASK) as usize;

        self.extra().get(mapping + 1 .. mapping + 1 + length).unwrap_or(&[])
    }

    // norm16

    /// значение norm16; ведущий суррогат как кодпоинт - инертный
    #[inline(always)]
    pub fn get_norm16(&self, code: u32) -> u16
    {
        match utf16::is_lead(code) {
            true => INERT,
            false => self.trie.get(code),
        }
    }

    #[inline(always)]
    pub fn get_raw_norm16(&self, code: u32) -> u16
    {
        self.trie.get(code)
    }

    /// значение для кодовой единицы, ведущий суррогат - худший случай для всех его дополнительных кодпоинтов
    #[inline(always)]
    pub(super) fn get_norm16_from_unit(&self, unit: u16) -> u16
    {
        self.trie.get_from_u16_single_lead(unit)
    }

    #[inline(always)]
    pub(super) fn is_algorithmic_no_no(&self, norm16: u16) -> bool
    {
        self.limit_no_no <= norm16 && norm16 < self.min_maybe_yes
    }

    #[inline(always)]
    pub(super) fn is_comp_no(&self, norm16: u16) -> bool
    {
        self.min_no_no <= norm16 && norm16 < self.min_maybe_yes
    }

    #[inline(always)]
    pub(super) fn is_decomp_yes(&self, norm16: u16) -> bool
    {
        norm16 < self.min_yes_no || self.min_maybe_yes <= norm16
    }

    #[inline(always)]
    pub(super) fn is_maybe(&self, norm16: u16) -> bool
    {
        self.min_maybe_yes <= norm16 && norm16 <= JAMO_VT
    }

    #[inline(always)]
    pub(super) fn is_maybe_or_non_zero_cc(&self, norm16: u16) -> bool
    {
        norm16 >= self.min_maybe_yes
    }

    #[inline(always)]
    pub(super) fn is_inert(norm16: u16) -> bool
    {
        norm16 == INERT
    }

    #[inline(always)]
    pub(super) fn is_jamo_vt(norm16: u16) -> bool
    {
        norm16 == JAMO_VT
    }

    #[inline(always)]
    pub(super) fn hangul_lvt(&self) -> u16
    {
        self.min_yes_no_mappings_only | HAS_COMP_BOUNDARY_AFTER
    }

    #[inline(always)]
    pub(super) fn is_hangul_lv(&self, norm16: u16) -> bool
    {
        norm16 == self.min_yes_no
    }

    #[inline(always)]
    pub(super) fn is_hangul_lvt(&self, norm16: u16) -> bool
    {
        norm16 == self.hangul_lvt()
    }

    #[inline(always)]
    pub(super) fn is_comp_yes_and_zero_cc(&self, norm16: u16) -> bool
    {
        norm16 < self.min_no_no
    }

    /// не раскладывается и ccc = 0, без полной классификации (надмножество проверки)
    #[inline(always)]
    pub(super) fn is_most_decomp_yes_and_zero_cc(&self, norm16: u16) -> bool
    {
        norm16 < self.min_yes_no || norm16 == MIN_NORMAL_MAYBE_YES || norm16 == JAMO_VT
    }

    #[inline(always)]
    pub(super) fn is_decomp_no_algorithmic(&self, norm16: u16) -> bool
    {
        norm16 >= self.limit_no_no
    }

    /// кодпоинт алгоритмического отображения
    #[inline(always)]
    pub(super) fn map_algorithmic(&self, code: u32, norm16: u16) -> u32
    {
        (code as i32 + (norm16 >> DELTA_SHIFT) as i32 - self.center_no_no_delta) as u32
    }

    // классы комбинирования

    #[inline(always)]
    pub(super) fn get_cc_from_normal_yes_or_maybe(norm16: u16) -> u8
    {
        (norm16 >> OFFSET_SHIFT) as u8
    }

    #[inline(always)]
    pub(super) fn get_cc_from_yes_or_maybe(norm16: u16) -> u8
    {
        match norm16 >= MIN_NORMAL_MAYBE_YES {
            true => Self::get_cc_from_normal_yes_or_maybe(norm16),
            false => 0,
        }
    }

    #[inline(always)]
    pub(super) fn get_cc_from_yes_or_maybe_cp(&self, code: u32) -> u8
    {
        match code < self.min_comp_no_maybe_cp {
            true => 0,
            false => Self::get_cc_from_yes_or_maybe(self.get_norm16(code)),
        }
    }

    /// ccc символа с отображением noNo
    #[inline]
    pub(super) fn get_cc_from_no_no(&self, norm16: u16) -> u8
    {
        let mapping = (norm16 >> OFFSET_SHIFT) as usize;

        match self.extra_at(mapping) & MAPPING_HAS_CCC_LCCC_WORD != 0 && mapping > 0 {
            true => self.extra_at(mapping - 1) as u8,
            false => 0,
        }
    }

    /// ccc по значению norm16
    #[inline]
    pub fn get_cc(&self, norm16: u16) -> u8
    {
        if norm16 >= MIN_NORMAL_MAYBE_YES {
            return Self::get_cc_from_normal_yes_or_maybe(norm16);
        }

        if norm16 < self.min_no_no || self.limit_no_no <= norm16 {
            return 0;
        }

        self.get_cc_from_no_no(norm16)
    }

    /// класс канонического комбинирования кодпоинта
    #[inline]
    pub fn get_combining_class(&self, code: u32) -> u8
    {
        self.get_cc(self.get_norm16(code))
    }

    /// tccc символа, прошедшего проверку "yes и ccc = 0"
    #[inline]
    pub(super) fn get_trail_cc_from_comp_yes_and_zero_cc(&self, norm16: u16) -> u8
    {
        match norm16 <= self.min_yes_no {
            true => 0,
            false => (self.extra_at((norm16 >> OFFSET_SHIFT) as usize) >> 8) as u8,
        }
    }

    // FCD

    /// может ли у кодовой единицы BMP (или ведущего суррогата) быть ненулевое значение fcd16
    #[inline(always)]
    pub fn single_lead_might_have_non_zero_fcd16(&self, lead: u32) -> bool
    {
        let bits = self.small_fcd[(lead >> 8) as usize & 0xFF];

        bits != 0 && (bits >> ((lead >> 5) & 7)) & 1 != 0
    }

    /// fcd16 = (lccc << 8) | tccc
    #[inline]
    pub fn get_fcd16(&self, code: u32) -> u16
    {
        if code < self.min_decomp_no_cp {
            return 0;
        }

        if code <= 0xFFFF && !self.single_lead_might_have_non_zero_fcd16(code) {
            return 0;
        }

        self.get_fcd16_from_norm_data(code)
    }

    pub fn get_fcd16_from_norm_data(&self, code: u32) -> u16
    {
        let mut code = code;
        let mut norm16 = self.get_norm16(code);

        if norm16 >= self.limit_no_no {
            if norm16 >= MIN_NORMAL_MAYBE_YES {
                // комбинирующий знак
                let cc = Self::get_cc_from_normal_yes_or_maybe(norm16) as u16;
                return cc | (cc << 8);
            }

            if norm16 >= self.min_maybe_yes {
                return 0;
            }

            let delta_trail_cc = norm16 & DELTA_TCCC_MASK;

            if delta_trail_cc <= DELTA_TCCC_1 {
                return delta_trail_cc >> OFFSET_SHIFT;
            }

            // отображается на символ "yes и ccc = 0"
            code = self.map_algorithmic(code, norm16);
            norm16 = self.get_raw_norm16(code);
        }

        if norm16 <= self.min_yes_no || self.is_hangul_lvt(norm16) {
            return 0;
        }

        let mapping = (norm16 >> OFFSET_SHIFT) as usize;
        let first = self.extra_at(mapping);
        let mut fcd16 = first >> 8;

        if first & MAPPING_HAS_CCC_LCCC_WORD != 0 && mapping > 0 {
            fcd16 |= self.extra_at(mapping - 1) & 0xFF00;
        }

        fcd16
    }

    /// tccc символа перед позицией p (0, если p = start)
    #[inline]
    pub(super) fn get_previous_trail_cc(&self, s: &[u16], start: usize, p: usize) -> u8
    {
        match start == p {
            true => 0,
            false => self.get_fcd16(utf16::code_point_before(&s[start ..], p - start)) as u8,
        }
    }

    // границы декомпозиции

    pub fn has_decomp_boundary_before(&self, code: u32) -> bool
    {
        code < self.min_lccc_cp
            || (code <= 0xFFFF && !self.single_lead_might_have_non_zero_fcd16(code))
            || self.norm16_has_decomp_boundary_before(self.get_norm16(code))
    }

    pub(super) fn norm16_has_decomp_boundary_before(&self, norm16: u16) -> bool
    {
        if norm16 < self.min_no_no_comp_no_maybe_cc {
            return true;
        }

        if norm16 >= self.limit_no_no {
            return norm16 <= MIN_NORMAL_MAYBE_YES || norm16 == JAMO_VT;
        }

        // lccc = 0?
        let mapping = (norm16 >> OFFSET_SHIFT) as usize;
        let first = self.extra_at(mapping);

        first & MAPPING_HAS_CCC_LCCC_WORD == 0 || mapping == 0 || self.extra_at(mapping - 1) & 0xFF00 == 0
    }

    pub fn has_decomp_boundary_after(&self, code: u32) -> bool
    {
        if code < self.min_decomp_no_cp {
            return true;
        }

        if code <= 0xFFFF && !self.single_lead_might_have_non_zero_fcd16(code) {
            return true;
        }

        self.norm16_has_decomp_boundary_after(self.get_norm16(code))
    }

    pub(super) fn norm16_has_decomp_boundary_after(&self, norm16: u16) -> bool
    {
        if norm16 <= self.min_yes_no || self.is_hangul_lvt(norm16) {
            return true;
        }

        if norm16 >= self.limit_no_no {
            if self.is_maybe_or_non_zero_cc(norm16) {
                return norm16 <= MIN_NORMAL_MAYBE_YES || norm16 == JAMO_VT;
            }

            // отображается на символ "yes и ccc = 0"
            return norm16 & DELTA_TCCC_MASK <= DELTA_TCCC_1;
        }

        let mapping = (norm16 >> OFFSET_SHIFT) as usize;
        let first = self.extra_at(mapping);

        // tccc > 1
        if first > 0x1FF {
            return false;
        }

        // tccc = 0
        if first <= 0xFF {
            return true;
        }

        // tccc = 1: граница, если lccc = 0
        first & MAPPING_HAS_CCC_LCCC_WORD == 0 || mapping == 0 || self.extra_at(mapping - 1) & 0xFF00 == 0
    }

    // границы композиции

    #[inline]
    pub(super) fn norm16_has_comp_boundary_before(&self, norm16: u16) -> bool
    {
        norm16 < self.min_no_no_comp_no_maybe_cc || self.is_algorithmic_no_no(norm16)
    }

    #[inline]
    pub(super) fn has_comp_boundary_before_cp(&self, code: u32, norm16: u16) -> bool
    {
        code < self.min_comp_no_maybe_cp || self.norm16_has_comp_boundary_before(norm16)
    }

    pub fn has_comp_boundary_before(&self, code: u32) -> bool
    {
        code < self.min_comp_no_maybe_cp || self.norm16_has_comp_boundary_before(self.get_norm16(code))
    }

    /// граница перед позицией src (конец текста - тоже граница)
    #[inline]
    pub(super) fn has_comp_boundary_before_at(&self, s: &[u16], src: usize, limit: usize) -> bool
    {
        src == limit || self.has_comp_boundary_before(utf16::code_point_at(&s[.. limit], src))
    }

    #[inline]
    pub(super) fn norm16_has_comp_boundary_after(&self, norm16: u16, only_contiguous: bool) -> bool
    {
        norm16 & HAS_COMP_BOUNDARY_AFTER != 0
            && (!only_contiguous || self.is_trail_cc01_for_comp_boundary_after(norm16))
    }

    pub fn has_comp_boundary_after(&self, code: u32, only_contiguous: bool) -> bool
    {
        self.norm16_has_comp_boundary_after(self.get_norm16(code), only_contiguous)
    }

    /// граница после символа перед позицией p (начало текста - тоже граница)
    #[inline]
    pub(super) fn has_comp_boundary_after_at(&self, s: &[u16], start: usize, p: usize, only_contiguous: bool) -> bool
    {
        start == p || self.has_comp_boundary_after(utf16::code_point_before(&s[start ..], p - start), only_contiguous)
    }

    /// для FCC: при наличии границы после символа - tccc не больше 1?
    #[inline]
    fn is_trail_cc01_for_comp_boundary_after(&self, norm16: u16) -> bool
    {
        Self::is_inert(norm16)
            || match self.is_decomp_no_algorithmic(norm16) {
                true => norm16 & DELTA_TCCC_MASK <= DELTA_TCCC_1,
                false => self.extra_at((norm16 >> OFFSET_SHIFT) as usize) <= 0x1FF,
            }
    }

    /// инертный символ: не меняется при нормализации и не влияет на соседей
    pub fn is_comp_inert(&self, code: u32, only_contiguous: bool) -> bool
    {
        let norm16 = self.get_norm16(code);

        self.is_comp_yes_and_zero_cc(norm16)
            && norm16 & HAS_COMP_BOUNDARY_AFTER != 0
            && (!only_contiguous || Self::is_inert(norm16) || self.extra_at((norm16 >> OFFSET_SHIFT) as usize) <= 0x1FF)
    }

    pub fn is_decomp_inert(&self, code: u32) -> bool
    {
        self.is_decomp_yes_and_zero_cc(code)
    }

    fn is_decomp_yes_and_zero_cc(&self, code: u32) -> bool
    {
        let norm16 = self.get_norm16(code);

        norm16 < self.min_yes_no || norm16 == JAMO_VT || (self.min_maybe_yes <= norm16 && norm16 <= MIN_NORMAL_MAYBE_YES)
    }

    // поиск границ

    /// следующая граница композиции начиная с p
    pub fn find_next_comp_boundary(&self, s: &[u16], p: usize, limit: usize, only_contiguous: bool) -> usize
    {
        let s = &s[.. limit];
        let mut p = p;

        while p < limit {
            let code = utf16::code_point_at(s, p);
            let norm16 = self.get_raw_norm16(code);

            if self.has_comp_boundary_before_cp(code, norm16) {
                break;
            }

            p += utf16::char_count(code);

            if self.norm16_has_comp_boundary_after(norm16, only_contiguous) {
                break;
            }
        }

        p
    }

    /// предыдущая граница композиции перед p
    pub fn find_previous_comp_boundary(&self, s: &[u16], p: usize, only_contiguous: bool) -> usize
    {
        let mut p = p;

        while p > 0 {
            let code = utf16::code_point_before(s, p);
            let norm16 = self.get_norm16(code);

            if self.norm16_has_comp_boundary_after(norm16, only_contiguous) {
                break;
            }

            p -= utf16::char_count(code);

            if self.has_comp_boundary_before_cp(code, norm16) {
                break;
            }
        }

        p
    }

    /// следующая граница FCD начиная с p
    pub fn find_next_fcd_boundary(&self, s: &[u16], p: usize, limit: usize) -> usize
    {
        let s = &s[.. limit];
        let mut p = p;

        while p < limit {
            let code = utf16::code_point_at(s, p);

            if code < self.min_lccc_cp {
                break;
            }

            let norm16 = self.get_norm16(code);

            if self.norm16_has_decomp_boundary_before(norm16) {
                break;
            }

            p += utf16::char_count(code);

            if self.norm16_has_decomp_boundary_after(norm16) {
                break;
            }
        }

        p
    }

    /// предыдущая граница FCD перед p
    pub fn find_previous_fcd_boundary(&self, s: &[u16], p: usize) -> usize
    {
        let mut p = p;

        while p > 0 {
            let code = utf16::code_point_before(s, p);

            if code < self.min_decomp_no_cp {
                break;
            }

            let norm16 = self.get_norm16(code);

            if self.norm16_has_decomp_boundary_after(norm16) {
                break;
            }

            p -= utf16::char_count(code);

            if self.norm16_has_decomp_boundary_before(norm16) {
                break;
            }
        }

        p
    }

    // списки композиций (индексы в maybe_yes_compositions)

    pub(super) fn get_compositions_list_for_decomp_yes(&self, norm16: u16) -> Option<usize>
    {
        if norm16 < JAMO_L || MIN_NORMAL_MAYBE_YES <= norm16 {
            return None;
        }

        // yesYes: extraData начинается сразу после списков maybeYes
        let index = match norm16 >= self.min_maybe_yes {
            true => norm16 - self.min_maybe_yes,
            false => norm16 + (MIN_NORMAL_MAYBE_YES - self.min_maybe_yes),
        };

        Some((index >> OFFSET_SHIFT) as usize)
    }

    /// у составного символа есть и отображение, и список композиций
    pub(super) fn get_compositions_list_for_composite(&self, norm16: u16) -> usize
    {
        let list = self.extra_start + (norm16 >> OFFSET_SHIFT) as usize;
        let first = self.maybe_yes_compositions.get(list).copied().unwrap_or(0);

        list + 1 + (first & MAPPING_LENGTH_MASK) as usize
    }

    pub(super) fn get_compositions_list(&self, norm16: u16) -> Option<usize>
    {
        match self.is_decomp_yes(norm16) {
            true => self.get_compositions_list_for_decomp_yes(norm16),
            false => Some(self.get_compositions_list_for_composite(norm16)),
        }
    }

    /// найти композит для пары (стартер со списком list, trail);
    /// результат - (композит << 1) | "композит комбинируется с последующими"
    pub(super) fn combine(&self, list: usize, trail: u32) -> Option<u32>
    {
        let compositions = &self.maybe_yes_compositions;
        let unit = |i: usize| compositions.get(i).copied().unwrap_or(0xFFFF);

        let mut list = list;

        if trail < COMP_1_TRAIL_LIMIT {
            // 2 или 3 кодовые единицы
            let key1 = (trail << 1) as u16;

            let mut first = unit(list);
            while key1 > first {
                list += 2 + (first & COMP_1_TRIPLE) as usize;
                first = unit(list);
            }

            if key1 == first & COMP_1_TRAIL_MASK {
                return Some(match first & COMP_1_TRIPLE != 0 {
                    true => ((unit(list + 1) as u32) << 16) | unit(list + 2) as u32,
                    false => unit(list + 1) as u32,
                });
            }

            return None;
        }

        // всегда 3 кодовые единицы
        let key1 = (COMP_1_TRAIL_LIMIT + ((trail >> COMP_1_TRAIL_SHIFT) & !(COMP_1_TRIPLE as u32))) as u16;
        let key2 = (trail << COMP_2_TRAIL_SHIFT) as u16;

        loop {
            let first = unit(list);

            if key1 > first {
                list += 2 + (first & COMP_1_TRIPLE) as usize;
                continue;
            }

            if key1 != first & COMP_1_TRAIL_MASK {
                return None;
            }

            let second = unit(list + 1);

            if key2 > second {
                if first & COMP_1_LAST_TUPLE != 0 {
                    return None;
                }

                list += 3;
                continue;
            }

            if key2 == second & COMP_2_TRAIL_MASK {
                return Some((((second & !COMP_2_TRAIL_MASK) as u32) << 16) | unit(list + 2) as u32);
            }

            return None;
        }
    }

    /// все пары (trail, композит) списка композиций
    pub(super) fn compositions_at(&self, list: usize) -> Vec<(u32, u32)>
    {
        let compositions = &self.maybe_yes_compositions;
        let unit = |i: usize| compositions.get(i).copied().unwrap_or(COMP_1_LAST_TUPLE);

        let mut pairs = vec![];
        let mut list = list;

        loop {
            let first = unit(list);

            let (trail, composite_and_fwd) = match first & COMP_1_TRIPLE {
                0 => ((first & COMP_1_TRAIL_MASK) as u32 >> 1, unit(list + 1) as u32),
                _ => {
                    let second = unit(list + 1);
                    let third = unit(list + 2) as u32;

                    match ((first & COMP_1_TRAIL_MASK) as u32) < COMP_1_TRAIL_LIMIT {
                        true => ((first & COMP_1_TRAIL_MASK) as u32 >> 1, ((second as u32) << 16) | third),
                        false => (
                            (((first & COMP_1_TRAIL_MASK) as u32 - COMP_1_TRAIL_LIMIT) << COMP_1_TRAIL_SHIFT)
                                | ((second & COMP_2_TRAIL_MASK) as u32 >> COMP_2_TRAIL_SHIFT),
                            (((second & !COMP_2_TRAIL_MASK) as u32) << 16) | third,
                        ),
                    }
                }
            };

            pairs.push((trail, composite_and_fwd >> 1));

            if first & COMP_1_LAST_TUPLE != 0 || list >= compositions.len() {
                break;
            }

            list += 2 + (first & COMP_1_TRIPLE) as usize;
        }

        pairs
    }

    // декомпозиция отдельного кодпоинта

    /// полная декомпозиция кодпоинта; None - кодпоинт не раскладывается
    pub fn get_decomposition(&self, code: u32) -> Option<Vec<u16>>
    {
        if code < self.min_decomp_no_cp {
            return None;
        }

        let mut code = code;
        let mut norm16 = self.get_norm16(code);

        if self.is_maybe_or_non_zero_cc(norm16) {
            return None;
        }

        let mut decomposition = None;

        if self.is_decomp_no_algorithmic(norm16) {
            code = self.map_algorithmic(code, norm16);
            decomposition = Some(code);
            norm16 = self.get_raw_norm16(code);
        }

        if norm16 < self.min_yes_no {
            return decomposition.map(|code| {
                let mut s = vec![];
                utf16::push(&mut s, code);
                s
            });
        }

        if self.is_hangul_lv(norm16) || self.is_hangul_lvt(norm16) {
            let mut s = vec![];
            hangul::decompose(code, |unit| s.push(unit));
            return Some(s);
        }

        Some(self.mapping(norm16).to_vec())
    }
}
