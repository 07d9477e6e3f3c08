use std::sync::Arc;

use super::buffer::ReorderingBuffer;
use super::data::NormalizationData;
use crate::data::{DataSource, NFC_RESOURCE, NFKC_RESOURCE};
use crate::{utf16, Result};

/// режим нормализатора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode
{
    /// NFC / NFKC
    Compose,
    /// FCC: композиция только непрерывных последовательностей
    ComposeContiguous,
    /// NFD / NFKD
    Decompose,
    /// FCD
    Fcd,
}

/// результат быстрой проверки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickCheckResult
{
    No,
    Yes,
    /// требуется полная проверка
    Maybe,
}

/// нормализатор: данные нормализации и режим
#[derive(Debug, Clone)]
pub struct Normalizer
{
    data: Arc<NormalizationData>,
    mode: Mode,
}

impl Normalizer
{
    pub fn new(data: Arc<NormalizationData>, mode: Mode) -> Self
    {
        Self { data, mode }
    }

    pub fn nfc(source: &dyn DataSource) -> Result<Self>
    {
        Ok(Self::new(super::load(source, NFC_RESOURCE)?, Mode::Compose))
    }

    pub fn nfd(source: &dyn DataSource) -> Result<Self>
    {
        Ok(Self::new(super::load(source, NFC_RESOURCE)?, Mode::Decompose))
    }

    pub fn nfkc(source: &dyn DataSource) -> Result<Self>
    {
        Ok(Self::new(super::load(source, NFKC_RESOURCE)?, Mode::Compose))
    }

    pub fn nfkd(source: &dyn DataSource) -> Result<Self>
    {
        Ok(Self::new(super::load(source, NFKC_RESOURCE)?, Mode::Decompose))
    }

    pub fn fcd(source: &dyn DataSource) -> Result<Self>
    {
        Ok(Self::new(super::load(source, NFC_RESOURCE)?, Mode::Fcd))
    }

    pub fn fcc(source: &dyn DataSource) -> Result<Self>
    {
        Ok(Self::new(super::load(source, NFC_RESOURCE)?, Mode::ComposeContiguous))
    }

    pub fn mode(&self) -> Mode
    {
        self.mode
    }

    pub fn data(&self) -> &NormalizationData
    {
        &self.data
    }

    #[inline]
    fn only_contiguous(&self) -> bool
    {
        self.mode == Mode::ComposeContiguous
    }

    /// нормализовать строку UTF-16
    pub fn normalize(&self, s: &[u16]) -> Vec<u16>
    {
        let mut buffer = ReorderingBuffer::new(&self.data, Vec::with_capacity(s.len()));

        match self.mode {
            Mode::Decompose => self.data.decompose(s, &mut buffer),
            Mode::Compose | Mode::ComposeContiguous => {
                self.data.compose(s, self.only_contiguous(), true, &mut buffer);
            }
            Mode::Fcd => {
                self.data.make_fcd(s, Some(&mut buffer));
            }
        }

        buffer.into_inner()
    }

    /// нормализовать строку Rust
    pub fn normalize_str(&self, s: &str) -> String
    {
        utf16::decode_lossy(&self.normalize(&utf16::encode(s)))
    }

    /// дописать к нормализованной строке first нормализованную second
    pub fn normalize_second_and_append(&self, first: &mut Vec<u16>, second: &[u16])
    {
        self.normalize_and_append(first, second, true);
    }

    /// дописать к нормализованной строке first уже нормализованную second,
    /// нормализуется только стык
    pub fn append(&self, first: &mut Vec<u16>, second: &[u16])
    {
        self.normalize_and_append(first, second, false);
    }

    fn normalize_and_append(&self, first: &mut Vec<u16>, second: &[u16], do_normalize: bool)
    {
        let mut dest = std::mem::take(first);
        dest.reserve(second.len());

        let mut buffer = ReorderingBuffer::new(&self.data, dest);

        match self.mode {
            Mode::Decompose => self.data.decompose_and_append(second, do_normalize, &mut buffer),
            Mode::Compose | Mode::ComposeContiguous => {
                self.data.compose_and_append(second, do_normalize, self.only_contiguous(), &mut buffer)
            }
            Mode::Fcd => self.data.make_fcd_and_append(second, do_normalize, &mut buffer),
        }

        *first = buffer.into_inner();
    }

    /// строка уже нормализована?
    pub fn is_normalized(&self, s: &[u16]) -> bool
    {
        match self.mode {
            Mode::Compose | Mode::ComposeContiguous => {
                let mut buffer = ReorderingBuffer::new(&self.data, Vec::with_capacity(5));

                self.data.compose(s, self.only_contiguous(), false, &mut buffer)
            }
            _ => self.span_quick_check_yes(s) == s.len(),
        }
    }

    pub fn quick_check(&self, s: &[u16]) -> QuickCheckResult
    {
        match self.mode {
            Mode::Compose | Mode::ComposeContiguous => {
                match self.data.compose_quick_check(s, self.only_contiguous(), false) {
                    (_, true) => QuickCheckResult::Maybe,
                    (span, false) if span == s.len() => QuickCheckResult::Yes,
                    _ => QuickCheckResult::No,
                }
            }
            _ => match self.is_normalized(s) {
                true => QuickCheckResult::Yes,
                false => QuickCheckResult::No,
            },
        }
    }

    /// длина префикса, который заведомо нормализован
    pub fn span_quick_check_yes(&self, s: &[u16]) -> usize
    {
        match self.mode {
            Mode::Decompose => self.data.decompose_quick_check(s),
            Mode::Compose | Mode::ComposeContiguous => self.data.compose_quick_check(s, self.only_contiguous(), true).0,
            Mode::Fcd => self.data.make_fcd(s, None),
        }
    }

    /// полная декомпозиция кодпоинта по данным нормализатора
    pub fn get_decomposition(&self, code: u32) -> Option<Vec<u16>>
    {
        self.data.get_decomposition(code)
    }

    pub fn get_combining_class(&self, code: u32) -> u8
    {
        self.data.get_combining_class(code)
    }

    /// текст до кодпоинта не взаимодействует с ним при нормализации
    pub fn has_boundary_before(&self, code: u32) -> bool
    {
        match self.mode {
            Mode::Compose | Mode::ComposeContiguous => self.data.has_comp_boundary_before(code),
            Mode::Decompose | Mode::Fcd => self.data.has_decomp_boundary_before(code),
        }
    }

    /// текст после кодпоинта не взаимодействует с ним при нормализации
    pub fn has_boundary_after(&self, code: u32) -> bool
    {
        match self.mode {
            Mode::Compose | Mode::ComposeContiguous => self.data.has_comp_boundary_after(code, self.only_contiguous()),
            Mode::Decompose | Mode::Fcd => self.data.has_decomp_boundary_after(code),
        }
    }

    /// кодпоинт не меняется при нормализации и не влияет на соседей
    pub fn is_inert(&self, code: u32) -> bool
    {
        match self.mode {
            Mode::Compose | Mode::ComposeContiguous => self.data.is_comp_inert(code, self.only_contiguous()),
            Mode::Decompose => self.data.is_decomp_inert(code),
            Mode::Fcd => self.data.get_fcd16(code) <= 1,
        }
    }
}
