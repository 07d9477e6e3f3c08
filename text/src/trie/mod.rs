//! Компактный двухступенчатый trie (формат Tri2): отображение кодпоинтов на 16- или 32-битные значения.
//!
//! BMP: index-2 по (c >> 5), затем блок данных из 32 значений.
//! дополнительные плоскости: index-1 по (c >> 11), блок index-2 из 64 элементов, блок данных.
//! выше high_start все кодпоинты имеют одно значение (high value).
//!
//! отдельная строка index-2 (LSCP) хранит значения ведущих суррогатов как кодовых единиц -
//! они могут отличаться от значений этих же суррогатов как кодпоинтов.

use core::fmt::Debug;

use crate::data::{ByteOrder, ByteReader};
use crate::{Error, Result};

/// сигнатура "Tri2"
pub const SIGNATURE: u32 = 0x5472_6932;
/// размер заголовка
pub const HEADER_LENGTH: usize = 16;

/// сдвиг для получения индекса index-1
pub const SHIFT_1: u32 = 6 + 5;
/// сдвиг для получения индекса index-2
pub const SHIFT_2: u32 = 5;
pub const SHIFT_1_2: u32 = SHIFT_1 - SHIFT_2;
/// количество элементов index-1, пропущенных для BMP
pub const OMITTED_BMP_INDEX_1_LENGTH: usize = 0x10000 >> SHIFT_1;
/// размер блока index-2
pub const INDEX_2_BLOCK_LENGTH: usize = 1 << SHIFT_1_2;
pub const INDEX_2_MASK: u32 = INDEX_2_BLOCK_LENGTH as u32 - 1;
/// размер блока данных
pub const DATA_BLOCK_LENGTH: usize = 1 << SHIFT_2;
pub const DATA_MASK: u32 = DATA_BLOCK_LENGTH as u32 - 1;
/// сдвиг, применяемый к значениям index-2
pub const INDEX_SHIFT: u32 = 2;
/// гранулярность выравнивания блоков данных
pub const DATA_GRANULARITY: usize = 1 << INDEX_SHIFT;

/// строка index-2 для ведущих суррогатов как кодовых единиц
pub const LSCP_INDEX_2_OFFSET: usize = 0x10000 >> SHIFT_2;
pub const LSCP_INDEX_2_LENGTH: usize = 0x400 >> SHIFT_2;
/// index-2 для BMP вместе со строкой LSCP
pub const INDEX_2_BMP_LENGTH: usize = LSCP_INDEX_2_OFFSET + LSCP_INDEX_2_LENGTH;
/// index-2 для двухбайтовых последовательностей UTF-8
pub const UTF8_2B_INDEX_2_OFFSET: usize = INDEX_2_BMP_LENGTH;
pub const UTF8_2B_INDEX_2_LENGTH: usize = 0x800 >> 6;
/// начало index-1
pub const INDEX_1_OFFSET: usize = UTF8_2B_INDEX_2_OFFSET + UTF8_2B_INDEX_2_LENGTH;
pub const MAX_INDEX_1_LENGTH: usize = 0x100000 >> SHIFT_1;

/// значения для некорректных последовательностей UTF-8 (errorValue)
pub const BAD_UTF8_DATA_OFFSET: usize = 0x80;
/// начало блоков данных после линейного ASCII и блока ошибок
pub const DATA_START_OFFSET: usize = 0xC0;

/// признак отсутствия пустого блока index-2
pub const NO_INDEX_2_NULL_OFFSET: usize = 0xFFFF;

const OPTIONS_VALUE_BITS_MASK: u16 = 0x000F;

/// ширина значений trie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueWidth
{
    Bits16 = 0,
    Bits32 = 1,
}

/// тип значения trie
pub trait TrieValue: Copy + Default + Debug + PartialEq + Send + Sync + 'static
{
    const WIDTH: ValueWidth;

    fn read_array(reader: &mut ByteReader, count: usize) -> Result<Vec<Self>>;

    fn to_u32(self) -> u32;
}

impl TrieValue for u16
{
    const WIDTH: ValueWidth = ValueWidth::Bits16;

    fn read_array(reader: &mut ByteReader, count: usize) -> Result<Vec<Self>>
    {
        reader.u16_array(count)
    }

    #[inline(always)]
    fn to_u32(self) -> u32
    {
        self as u32
    }
}

impl TrieValue for u32
{
    const WIDTH: ValueWidth = ValueWidth::Bits32;

    fn read_array(reader: &mut ByteReader, count: usize) -> Result<Vec<Self>>
    {
        reader.u32_array(count)
    }

    #[inline(always)]
    fn to_u32(self) -> u32
    {
        self
    }
}

/// заголовок сериализованного trie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieHeader
{
    pub width: ValueWidth,
    pub index_length: usize,
    pub data_length: usize,
    pub index2_null_offset: usize,
    pub data_null_offset: usize,
    pub high_start: u32,
}

impl TrieHeader
{
    /// прочитать заголовок; перевёрнутая сигнатура меняет порядок байт читателя
    pub fn read(reader: &mut ByteReader) -> Result<Self>
    {
        match reader.u32()? {
            SIGNATURE => (),
            signature if signature.swap_bytes() == SIGNATURE => reader.set_order(reader.order().reversed()),
            signature => return Err(Error::format(format!("неизвестная сигнатура trie: {:#010X}", signature))),
        }

        let options = reader.u16()?;
        let index_length = reader.u16()? as usize;
        let shifted_data_length = reader.u16()? as usize;
        let index2_null_offset = reader.u16()? as usize;
        let data_null_offset = reader.u16()? as usize;
        let shifted_high_start = reader.u16()? as u32;

        if options & !OPTIONS_VALUE_BITS_MASK != 0 {
            return Err(Error::format(format!("неожиданные опции trie: {:#06X}", options)));
        }

        let width = match options & OPTIONS_VALUE_BITS_MASK {
            0 => ValueWidth::Bits16,
            1 => ValueWidth::Bits32,
            bits => return Err(Error::format(format!("неизвестная ширина значений trie: {}", bits))),
        };

        let header = Self {
            width,
            index_length,
            data_length: shifted_data_length << INDEX_SHIFT,
            index2_null_offset,
            data_null_offset,
            high_start: shifted_high_start << SHIFT_1,
        };

        header.validate()?;

        Ok(header)
    }

    fn validate(&self) -> Result<()>
    {
        if self.index_length < INDEX_1_OFFSET {
            return Err(Error::format(format!("слишком короткий индекс trie: {}", self.index_length)));
        }

        if self.data_length < DATA_START_OFFSET {
            return Err(Error::format(format!("слишком короткие данные trie: {}", self.data_length)));
        }

        if self.high_start > 0x110000 {
            return Err(Error::format(format!("некорректный high_start trie: {:#X}", self.high_start)));
        }

        if self.index_length < INDEX_1_OFFSET + self.index_1_length() {
            return Err(Error::format("index-1 trie не помещается в индекс"));
        }

        if self.index2_null_offset != NO_INDEX_2_NULL_OFFSET && self.index2_null_offset >= self.index_length {
            return Err(Error::format("некорректное смещение пустого блока index-2"));
        }

        Ok(())
    }

    /// количество элементов index-1 для дополнительных плоскостей ниже high_start
    pub fn index_1_length(&self) -> usize
    {
        ((self.high_start as usize).saturating_sub(0x10000)) >> SHIFT_1
    }

    /// смещение данных в общем пространстве индексов
    fn data_bias(&self) -> usize
    {
        match self.width {
            ValueWidth::Bits16 => self.index_length,
            ValueWidth::Bits32 => 0,
        }
    }

    /// размер сериализованного trie в байтах
    pub fn serialized_length(&self) -> usize
    {
        let value_size = match self.width {
            ValueWidth::Bits16 => 2,
            ValueWidth::Bits32 => 4,
        };

        HEADER_LENGTH + self.index_length * 2 + self.data_length * value_size
    }
}

/// неизменяемый trie
#[derive(Clone)]
pub struct Trie<V: TrieValue>
{
    index: Vec<u16>,
    data: Vec<V>,
    /// 16-битные значения индексов указывают в общий массив index + data
    data_bias: usize,
    index2_null_offset: usize,
    data_null_offset: usize,
    high_start: u32,
    initial_value: V,
    error_value: V,
    high_value: V,
    serialized_length: usize,
}

impl<V: TrieValue> Debug for Trie<V>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.debug_struct("Trie")
            .field("index_length", &self.index.len())
            .field("data_length", &self.data.len())
            .field("high_start", &self.high_start)
            .field("initial_value", &self.initial_value)
            .field("high_value", &self.high_value)
            .finish()
    }
}

impl<V: TrieValue> Trie<V>
{
    /// прочитать trie, ширина значений должна совпадать с V
    pub fn deserialize(reader: &mut ByteReader) -> Result<Self>
    {
        let outer_order = reader.order();
        let result = TrieHeader::read(reader).and_then(|header| Self::from_header(reader, header));
        reader.set_order(outer_order);

        result
    }

    /// прочитать index и data после уже прочитанного заголовка
    fn from_header(reader: &mut ByteReader, header: TrieHeader) -> Result<Self>
    {
        if header.width != V::WIDTH {
            return Err(Error::format(format!(
                "ширина значений trie {:?}, ожидалась {:?}",
                header.width,
                V::WIDTH
            )));
        }

        let index = reader.u16_array(header.index_length)?;
        let data = V::read_array(reader, header.data_length)?;
        let bias = header.data_bias();

        let position = |offset: usize, what: &str| -> Result<usize> {
            match offset.checked_sub(bias) {
                Some(position) if position < data.len() => Ok(position),
                _ => Err(Error::format(format!("{} trie вне данных: {}", what, offset))),
            }
        };

        let initial_value = data[position(header.data_null_offset, "пустой блок")?];
        let error_value = data[BAD_UTF8_DATA_OFFSET];
        let high_value = data[data.len() - DATA_GRANULARITY];

        let trie = Self {
            index,
            data,
            data_bias: bias,
            index2_null_offset: header.index2_null_offset,
            data_null_offset: header.data_null_offset,
            high_start: header.high_start,
            initial_value,
            error_value,
            high_value,
            serialized_length: header.serialized_length(),
        };

        trie.validate_blocks(header.index_1_length())?;

        log::trace!("trie: {:?}", trie);

        Ok(trie)
    }

    /// проверить, что все ссылки индекса указывают внутрь массивов;
    /// после этого поиск не выходит за границы
    fn validate_blocks(&self, index_1_length: usize) -> Result<()>
    {
        let data_block = |entry: u16| -> Result<()> {
            let offset = (entry as usize) << INDEX_SHIFT;

            match offset.checked_sub(self.data_bias) {
                Some(position) if position + DATA_BLOCK_LENGTH <= self.data.len() => Ok(()),
                _ => Err(Error::format(format!("блок данных trie вне данных: {}", offset))),
            }
        };

        for &entry in &self.index[.. INDEX_2_BMP_LENGTH] {
            data_block(entry)?;
        }

        for &i2 in &self.index[INDEX_1_OFFSET .. INDEX_1_OFFSET + index_1_length] {
            let i2 = i2 as usize;

            if i2 + INDEX_2_BLOCK_LENGTH > self.index.len() {
                return Err(Error::format(format!("блок index-2 trie вне индекса: {}", i2)));
            }

            for &entry in &self.index[i2 .. i2 + INDEX_2_BLOCK_LENGTH] {
                data_block(entry)?;
            }
        }

        Ok(())
    }

    /// значение для кодпоинта
    #[inline]
    pub fn get(&self, code: u32) -> V
    {
        if code < 0xD800 || (code > 0xDBFF && code <= 0xFFFF) {
            return self.data_at(self.block(code >> SHIFT_2, code));
        }

        if code <= 0xFFFF {
            // ведущий суррогат как кодпоинт
            let i2 = LSCP_INDEX_2_OFFSET as u32 + ((code - 0xD800) >> SHIFT_2);
            return self.data_at(self.block(i2, code));
        }

        if code < self.high_start {
            let i1 = (INDEX_1_OFFSET - OMITTED_BMP_INDEX_1_LENGTH) as u32 + (code >> SHIFT_1);
            let i2 = self.index[i1 as usize] as u32 + ((code >> SHIFT_2) & INDEX_2_MASK);
            return self.data_at(self.block(i2, code));
        }

        match code <= 0x10FFFF {
            true => self.high_value,
            false => self.error_value,
        }
    }

    /// значение для кодовой единицы BMP; ведущие суррогаты читаются из строки кодовых единиц
    #[inline(always)]
    pub fn get_from_u16_single_lead(&self, unit: u16) -> V
    {
        let unit = unit as u32;
        self.data_at(self.block(unit >> SHIFT_2, unit))
    }

    #[inline(always)]
    fn block(&self, i2: u32, code: u32) -> usize
    {
        ((self.index[i2 as usize] as usize) << INDEX_SHIFT) + (code & DATA_MASK) as usize
    }

    #[inline(always)]
    fn data_at(&self, offset: usize) -> V
    {
        self.data[offset - self.data_bias]
    }

    /// значение пустого блока (значение по умолчанию)
    pub fn initial_value(&self) -> V
    {
        self.initial_value
    }

    /// значение для некорректного ввода и кодпоинтов за пределами Unicode
    pub fn error_value(&self) -> V
    {
        self.error_value
    }

    /// значение всех кодпоинтов начиная с high_start
    pub fn high_value(&self) -> V
    {
        self.high_value
    }

    pub fn high_start(&self) -> u32
    {
        self.high_start
    }

    /// все значения массива данных
    pub fn values(&self) -> &[V]
    {
        &self.data
    }

    pub fn index_length(&self) -> usize
    {
        self.index.len()
    }

    pub fn data_length(&self) -> usize
    {
        self.data.len()
    }

    pub fn index2_null_offset(&self) -> usize
    {
        self.index2_null_offset
    }

    pub fn data_null_offset(&self) -> usize
    {
        self.data_null_offset
    }

    /// количество байт, занятых сериализованным trie
    pub fn serialized_length(&self) -> usize
    {
        self.serialized_length
    }
}

/// trie с шириной значений, известной только после чтения заголовка
#[derive(Debug, Clone)]
pub enum AnyTrie
{
    Bits16(Trie<u16>),
    Bits32(Trie<u32>),
}

impl AnyTrie
{
    pub fn deserialize(reader: &mut ByteReader) -> Result<Self>
    {
        let outer_order = reader.order();

        let result = TrieHeader::read(reader).and_then(|header| match header.width {
            ValueWidth::Bits16 => Trie::from_header(reader, header).map(Self::Bits16),
            ValueWidth::Bits32 => Trie::from_header(reader, header).map(Self::Bits32),
        });

        reader.set_order(outer_order);

        result
    }

    /// прочитать trie из байтов, порядок байт - по сигнатуре
    pub fn from_bytes(bytes: &[u8]) -> Result<Self>
    {
        let mut reader = ByteReader::new(bytes);
        reader.set_order(ByteOrder::Big);

        Self::deserialize(&mut reader)
    }

    #[inline]
    pub fn get(&self, code: u32) -> u32
    {
        match self {
            Self::Bits16(trie) => trie.get(code) as u32,
            Self::Bits32(trie) => trie.get(code),
        }
    }

    pub fn width(&self) -> ValueWidth
    {
        match self {
            Self::Bits16(_) => ValueWidth::Bits16,
            Self::Bits32(_) => ValueWidth::Bits32,
        }
    }

    pub fn serialized_length(&self) -> usize
    {
        match self {
            Self::Bits16(trie) => trie.serialized_length(),
            Self::Bits32(trie) => trie.serialized_length(),
        }
    }
}
