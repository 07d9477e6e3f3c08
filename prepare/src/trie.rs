use std::collections::HashMap;

use unicode_text::data::ByteOrder;
use unicode_text::trie::{
    ValueWidth, BAD_UTF8_DATA_OFFSET, DATA_BLOCK_LENGTH, DATA_GRANULARITY, INDEX_1_OFFSET, INDEX_2_BLOCK_LENGTH,
    INDEX_SHIFT, LSCP_INDEX_2_LENGTH, NO_INDEX_2_NULL_OFFSET, SHIFT_1, SHIFT_2, SIGNATURE,
    UTF8_2B_INDEX_2_LENGTH, UTF8_2B_INDEX_2_OFFSET,
};

use crate::bytes::PushBytes;
use crate::PrepareError;

const CODE_POINTS: usize = 0x110000;
const LEAD_UNITS: usize = 0x400;
/// кодпоинтов на элемент index-1
const CODE_POINTS_PER_INDEX_1: u32 = 1 << SHIFT_1;

/// изменяемый trie: значение для каждого кодпоинта и отдельно - для ведущих суррогатов как
/// кодовых единиц UTF-16 (по умолчанию - начальное значение)
#[derive(Clone)]
pub struct TrieBuilder
{
    values: Vec<u32>,
    lead_units: Vec<u32>,
    initial_value: u32,
    error_value: u32,
}

/// массивы trie перед сериализацией
struct Frozen
{
    index: Vec<u16>,
    data: Vec<u32>,
    index2_null_offset: usize,
    /// смещение пустого блока с учётом сдвига данных
    data_null_offset: usize,
    high_start: u32,
}

impl TrieBuilder
{
    pub fn new(initial_value: u32, error_value: u32) -> Self
    {
        Self {
            values: vec![initial_value; CODE_POINTS],
            lead_units: vec![initial_value; LEAD_UNITS],
            initial_value,
            error_value,
        }
    }

    pub fn set(&mut self, code: u32, value: u32)
    {
        if let Some(slot) = self.values.get_mut(code as usize) {
            *slot = value;
        }
    }

    /// значение для диапазона start ..= end
    pub fn set_range(&mut self, start: u32, end: u32, value: u32)
    {
        let end = (end as usize + 1).min(CODE_POINTS);

        if let Some(slots) = self.values.get_mut(start as usize .. end) {
            slots.iter_mut().for_each(|slot| *slot = value);
        }
    }

    /// значение ведущего суррогата при чтении строки кодовых единиц
    pub fn set_for_lead_unit(&mut self, lead: u16, value: u32)
    {
        if let 0xD800 ..= 0xDBFF = lead {
            self.lead_units[(lead - 0xD800) as usize] = value;
        }
    }

    pub fn get(&self, code: u32) -> u32
    {
        self.values.get(code as usize).copied().unwrap_or(self.error_value)
    }

    pub fn get_for_lead_unit(&self, lead: u16) -> u32
    {
        match lead {
            0xD800 ..= 0xDBFF => self.lead_units[(lead - 0xD800) as usize],
            _ => self.get(lead as u32),
        }
    }

    pub fn initial_value(&self) -> u32
    {
        self.initial_value
    }

    /// сериализовать trie; 16-битные значения проверяются на переполнение
    pub fn serialize(&self, width: ValueWidth, order: ByteOrder) -> Result<Vec<u8>, PrepareError>
    {
        if width == ValueWidth::Bits16 {
            self.check_16_bit()?;
        }

        let frozen = self.freeze(width)?;

        let mut out = vec![];

        out.push_u32(order, SIGNATURE);
        out.push_u16(order, width as u16);
        out.push_u16(order, frozen.index.len() as u16);
        out.push_u16(order, (frozen.data.len() >> INDEX_SHIFT) as u16);
        out.push_u16(order, frozen.index2_null_offset as u16);
        out.push_u16(order, frozen.data_null_offset as u16);
        out.push_u16(order, (frozen.high_start >> SHIFT_1) as u16);

        for &entry in frozen.index.iter() {
            out.push_u16(order, entry);
        }

        for &value in frozen.data.iter() {
            match width {
                ValueWidth::Bits16 => out.push_u16(order, value as u16),
                ValueWidth::Bits32 => out.push_u32(order, value),
            }
        }

        log::debug!(
            "trie {:?}: индекс {}, данные {}, high_start {:#X}, {} байт",
            width,
            frozen.index.len(),
            frozen.data.len(),
            frozen.high_start,
            out.len()
        );

        Ok(out)
    }

    fn check_16_bit(&self) -> Result<(), PrepareError>
    {
        if let Some(code) = self.values.iter().position(|&value| value > 0xFFFF) {
            return Err(PrepareError::ValueOverflow {
                code: code as u32,
                value: self.values[code],
            });
        }

        if let Some(lead) = self.lead_units.iter().position(|&value| value > 0xFFFF) {
            return Err(PrepareError::ValueOverflow {
                code: 0xD800 + lead as u32,
                value: self.lead_units[lead],
            });
        }

        match self.error_value > 0xFFFF {
            true => Err(PrepareError::ValueOverflow {
                code: 0x110000,
                value: self.error_value,
            }),
            false => Ok(()),
        }
    }

    /// начало диапазона, после которого все кодпоинты имеют значение U+10FFFF
    fn high_start(&self) -> u32
    {
        let high_value = self.values[CODE_POINTS - 1];

        let last = (0x10000 .. CODE_POINTS).rev().find(|&code| self.values[code] != high_value);

        match last {
            Some(last) => (last as u32 + CODE_POINTS_PER_INDEX_1) & !(CODE_POINTS_PER_INDEX_1 - 1),
            None => 0x10000,
        }
    }

    fn freeze(&self, width: ValueWidth) -> Result<Frozen, PrepareError>
    {
        let high_start = self.high_start();
        let high_value = self.values[CODE_POINTS - 1];

        // ASCII - линейно, за ним блок значения ошибки для некорректного UTF-8
        let mut data: Vec<u32> = self.values[.. 0x80].to_vec();
        data.extend([self.error_value; 0x40]);

        let mut blocks: HashMap<Vec<u32>, usize> = HashMap::new();

        for offset in (0 .. data.len()).step_by(DATA_BLOCK_LENGTH) {
            blocks.entry(data[offset .. offset + DATA_BLOCK_LENGTH].to_vec()).or_insert(offset);
        }

        let mut block = |values: &[u32]| -> usize {
            *blocks.entry(values.to_vec()).or_insert_with(|| {
                data.extend_from_slice(values);
                data.len() - DATA_BLOCK_LENGTH
            })
        };

        let null_block = block(&[self.initial_value; DATA_BLOCK_LENGTH]);

        // index-2 BMP: диапазон D800..DBFF - значения кодовых единиц, затем строка LSCP
        let mut index2: Vec<usize> = (0 .. 0x10000)
            .step_by(DATA_BLOCK_LENGTH)
            .map(|code| match code {
                0xD800 ..= 0xDBFF => block(&self.lead_units[code - 0xD800 .. code - 0xD800 + DATA_BLOCK_LENGTH]),
                _ => block(&self.values[code .. code + DATA_BLOCK_LENGTH]),
            })
            .collect();

        index2.extend((0 .. LSCP_INDEX_2_LENGTH).map(|i| {
            let code = 0xD800 + (i << SHIFT_2);
            block(&self.values[code .. code + DATA_BLOCK_LENGTH])
        }));

        // блоки index-2 для дополнительных плоскостей ниже high_start
        let mut index2_blocks: Vec<Vec<usize>> = vec![];
        let mut index1: Vec<usize> = vec![];

        for start in (0x10000 .. high_start as usize).step_by(CODE_POINTS_PER_INDEX_1 as usize) {
            let i2_block: Vec<usize> = (0 .. INDEX_2_BLOCK_LENGTH)
                .map(|i| {
                    let code = start + (i << SHIFT_2);
                    block(&self.values[code .. code + DATA_BLOCK_LENGTH])
                })
                .collect();

            let position = match index2_blocks.iter().position(|b| *b == i2_block) {
                Some(position) => position,
                None => {
                    index2_blocks.push(i2_block);
                    index2_blocks.len() - 1
                }
            };

            index1.push(position);
        }

        data.extend([high_value; DATA_GRANULARITY]);

        let i2_start = INDEX_1_OFFSET + index1.len();
        let mut index_length = i2_start + index2_blocks.len() * INDEX_2_BLOCK_LENGTH;

        if width == ValueWidth::Bits16 {
            // значения индекса 16-битного trie указывают в общий массив index + data
            index_length = (index_length + DATA_GRANULARITY - 1) & !(DATA_GRANULARITY - 1);
        }

        let bias = match width {
            ValueWidth::Bits16 => index_length,
            ValueWidth::Bits32 => 0,
        };

        if index_length > 0xFFFF || (bias + data.len()) >> INDEX_SHIFT > 0xFFFF || bias + null_block > 0xFFFF {
            return Err(PrepareError::TrieOverflow(format!(
                "индекс {}, данные {}",
                index_length,
                data.len()
            )));
        }

        let entry = |offset: usize| ((bias + offset) >> INDEX_SHIFT) as u16;

        let mut index: Vec<u16> = index2.iter().map(|&offset| entry(offset)).collect();

        // index-2 для двухбайтовых последовательностей UTF-8, C0 и C1 некорректны
        let utf8_2b: Vec<u16> = (0 .. UTF8_2B_INDEX_2_LENGTH)
            .map(|i| match i < 2 {
                true => entry(BAD_UTF8_DATA_OFFSET),
                false => index[i << 1],
            })
            .collect();

        index.extend(utf8_2b);

        debug_assert_eq!(index.len(), UTF8_2B_INDEX_2_OFFSET + UTF8_2B_INDEX_2_LENGTH);

        index.extend(index1.iter().map(|&position| (i2_start + position * INDEX_2_BLOCK_LENGTH) as u16));

        for i2_block in index2_blocks.iter() {
            index.extend(i2_block.iter().map(|&offset| entry(offset)));
        }

        index.resize(index_length, entry(null_block));

        let index2_null_offset = index2_blocks
            .iter()
            .position(|b| b.iter().all(|&offset| offset == null_block))
            .map(|position| i2_start + position * INDEX_2_BLOCK_LENGTH)
            .unwrap_or(NO_INDEX_2_NULL_OFFSET);

        Ok(Frozen {
            index,
            data,
            index2_null_offset,
            data_null_offset: bias + null_block,
            high_start,
        })
    }
}

#[cfg(test)]
mod tests
{
    use unicode_text::data::ByteReader;
    use unicode_text::trie::{AnyTrie, Trie};

    use super::*;

    fn sample() -> TrieBuilder
    {
        let mut builder = TrieBuilder::new(1, 0xAD);

        builder.set(0x41, 0x10);
        builder.set_range(0x300, 0x36F, 0x20);
        builder.set_range(0xAC00, 0xD7A3, 0x30);
        builder.set(0xD800, 0x40);
        builder.set_range(0x1D15E, 0x1D164, 0x50);
        builder.set_for_lead_unit(0xD834, 0x60);
        builder.set_range(0x2F800, 0x2FA1D, 0x70);

        builder
    }

    #[test]
    fn round_trip_16_bit()
    {
        let builder = sample();

        for order in [ByteOrder::Little, ByteOrder::Big] {
            let bytes = builder.serialize(ValueWidth::Bits16, order).unwrap();
            let trie: Trie<u16> = Trie::deserialize(&mut ByteReader::new(&bytes)).unwrap();

            for code in (0 ..= 0x10FFFF).step_by(3).chain([0x41, 0x36F, 0xD7A3, 0xD800, 0x1D15E, 0x2FA1D, 0x2FA1E]) {
                assert_eq!(trie.get(code) as u32, builder.get(code), "U+{:04X}", code);
            }

            assert_eq!(trie.get_from_u16_single_lead(0xD834), 0x60);
            assert_eq!(trie.get_from_u16_single_lead(0xD835), 1);
            assert_eq!(trie.get(0xD834), 1);
            assert_eq!(trie.get(0x110000), 0xAD);
            assert_eq!(trie.initial_value(), 1);
            assert_eq!(trie.high_start(), 0x30000);
            assert_eq!(trie.serialized_length(), bytes.len());
        }
    }

    #[test]
    fn round_trip_32_bit()
    {
        let mut builder = sample();
        builder.set_range(0x10000, 0x1000F, 0x12345678);

        let bytes = builder.serialize(ValueWidth::Bits32, ByteOrder::Big).unwrap();

        match AnyTrie::from_bytes(&bytes).unwrap() {
            AnyTrie::Bits32(trie) => {
                assert_eq!(trie.get(0x1000F), 0x12345678);
                assert_eq!(trie.get(0x10010), 1);
                assert_eq!(trie.get(0xAC00), 0x30);
            }
            other => panic!("ожидался 32-битный trie: {:?}", other.width()),
        }
    }

    #[test]
    fn high_value_above_high_start()
    {
        let mut builder = TrieBuilder::new(0, 0);
        builder.set_range(0x20000, 0x10FFFF, 7);

        let bytes = builder.serialize(ValueWidth::Bits16, ByteOrder::Little).unwrap();
        let trie: Trie<u16> = Trie::deserialize(&mut ByteReader::new(&bytes)).unwrap();

        assert_eq!(trie.high_start(), 0x20000);
        assert_eq!(trie.high_value(), 7);
        assert_eq!(trie.get(0x1FFFF), 0);
        assert_eq!(trie.get(0x10FFFF), 7);
    }

    #[test]
    fn rejects_wide_values()
    {
        let mut builder = TrieBuilder::new(0, 0);
        builder.set(0x100, 0x10000);

        assert_eq!(
            builder.serialize(ValueWidth::Bits16, ByteOrder::Little),
            Err(PrepareError::ValueOverflow {
                code: 0x100,
                value: 0x10000
            })
        );
        assert!(builder.serialize(ValueWidth::Bits32, ByteOrder::Little).is_ok());
    }
}
