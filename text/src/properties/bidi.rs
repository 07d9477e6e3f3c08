use super::values::{BidiClass, BidiMaxValue, JoiningGroup, JoiningType, PairedBracketType};
use crate::data::{read_header, ByteReader, VersionInfo};
use crate::trie::Trie;
use crate::{Error, Result};

/// формат свойств bidi
pub const FORMAT: [u8; 4] = *b"BiDi";
pub const FORMAT_VERSION: u8 = 2;

// индексы
pub const IX_INDEX_TOP: usize = 0;
pub const IX_LENGTH: usize = 1;
pub const IX_TRIE_SIZE: usize = 2;
pub const IX_MIRROR_LENGTH: usize = 3;
pub const IX_JG_START: usize = 4;
pub const IX_JG_LIMIT: usize = 5;
pub const IX_JG_START_2: usize = 6;
pub const IX_JG_LIMIT_2: usize = 7;
pub const IX_MAX_VALUES: usize = 15;
pub const IX_TOP: usize = 16;

// биты значения trie
pub const CLASS_MASK: u16 = 0x001F;
pub const JT_SHIFT: u32 = 5;
pub const JT_MASK: u16 = 0x00E0;
pub const BPT_SHIFT: u32 = 8;
pub const BPT_MASK: u16 = 0x0300;
pub const JOIN_CONTROL_SHIFT: u32 = 10;
pub const BIDI_CONTROL_SHIFT: u32 = 11;
pub const IS_MIRRORED_SHIFT: u32 = 12;
/// знаковая разница с зеркальным символом в старших битах
pub const MIRROR_DELTA_SHIFT: u32 = 13;
pub const MAX_MIRROR_DELTA: i32 = 3;
/// зеркальный символ хранится в таблице исключений
pub const ESC_MIRROR_DELTA: i32 = -4;

/// элемент таблицы зеркальных символов: индекс пары в старших битах, кодпоинт в младших
pub const MIRROR_INDEX_SHIFT: u32 = 21;
pub const MIRROR_CODE_MASK: u32 = 0x1F_FFFF;

/// поля максимальных значений
pub const MAX_JG_SHIFT: u32 = 16;
pub const MAX_JG_MASK: u32 = 0x00FF_0000;

/// свойства bidi: класс направления, зеркальные символы, соединение арабского письма
#[derive(Debug)]
pub struct BidiProperties
{
    indexes: Vec<i32>,
    trie: Trie<u16>,
    mirrors: Vec<u32>,
    joining_groups: Vec<u8>,
    joining_groups_2: Vec<u8>,
    data_version: VersionInfo,
}

impl BidiProperties
{
    pub fn from_bytes(bytes: &[u8]) -> Result<Self>
    {
        let mut reader = ByteReader::new(bytes);
        let data_version = read_header(&mut reader, FORMAT, |v| v.major() == FORMAT_VERSION)?;

        let count = (reader.i32()? & 0xFF) as usize;

        if count < IX_TOP {
            return Err(Error::format(format!("слишком мало индексов bidi: {}", count)));
        }

        let mut indexes = vec![count as i32];
        indexes.extend(reader.i32_array(count - 1)?);

        let length = |i: usize| -> Result<usize> {
            usize::try_from(indexes[i]).map_err(|_| Error::format(format!("отрицательный индекс bidi {}", i)))
        };

        let trie_start = reader.position();
        let trie = Trie::deserialize(&mut reader)?;
        let trie_size = length(IX_TRIE_SIZE)?;

        if trie.serialized_length() > trie_size {
            return Err(Error::format("trie bidi длиннее своего раздела"));
        }

        reader.set_position(trie_start + trie_size)?;

        let mirrors = reader.u32_array(length(IX_MIRROR_LENGTH)?)?;

        let joining_groups = read_range(&mut reader, length(IX_JG_START)?, length(IX_JG_LIMIT)?)?;
        let joining_groups_2 = read_range(&mut reader, length(IX_JG_START_2)?, length(IX_JG_LIMIT_2)?)?;

        // ссылки на пары в таблице зеркальных символов
        if let Some(&m) = mirrors.iter().find(|&&m| (m >> MIRROR_INDEX_SHIFT) as usize >= mirrors.len()) {
            return Err(Error::format(format!("некорректная пара зеркальных символов: {:#X}", m)));
        }

        log::debug!(
            "bidi {}: зеркальных пар {}, групп соединения {} + {}",
            VersionInfo::from_packed(data_version),
            mirrors.len(),
            joining_groups.len(),
            joining_groups_2.len()
        );

        Ok(Self {
            indexes,
            trie,
            mirrors,
            joining_groups,
            joining_groups_2,
            data_version: VersionInfo::from_packed(data_version),
        })
    }

    #[inline]
    fn props(&self, code: u32) -> u16
    {
        self.trie.get(code)
    }

    pub fn get_class(&self, code: u32) -> BidiClass
    {
        BidiClass::from_bits((self.props(code) & CLASS_MASK) as u32)
    }

    pub fn is_mirrored(&self, code: u32) -> bool
    {
        self.props(code) >> IS_MIRRORED_SHIFT & 1 != 0
    }

    pub fn is_bidi_control(&self, code: u32) -> bool
    {
        self.props(code) >> BIDI_CONTROL_SHIFT & 1 != 0
    }

    pub fn is_join_control(&self, code: u32) -> bool
    {
        self.props(code) >> JOIN_CONTROL_SHIFT & 1 != 0
    }

    pub fn get_joining_type(&self, code: u32) -> JoiningType
    {
        JoiningType::from_bits(((self.props(code) & JT_MASK) >> JT_SHIFT) as u32)
    }

    pub fn get_paired_bracket_type(&self, code: u32) -> PairedBracketType
    {
        PairedBracketType::from_bits(((self.props(code) & BPT_MASK) >> BPT_SHIFT) as u32)
    }

    /// зеркальный символ; если его нет - сам кодпоинт
    pub fn get_mirror(&self, code: u32) -> u32
    {
        self.mirror_from_props(code, self.props(code))
    }

    /// парная скобка; для символов, не являющихся скобками - сам кодпоинт
    pub fn get_paired_bracket(&self, code: u32) -> u32
    {
        let props = self.props(code);

        match props & BPT_MASK {
            0 => code,
            _ => self.mirror_from_props(code, props),
        }
    }

    fn mirror_from_props(&self, code: u32, props: u16) -> u32
    {
        let delta = (props as i16 >> MIRROR_DELTA_SHIFT) as i32;

        if delta != ESC_MIRROR_DELTA {
            return (code as i32 + delta) as u32;
        }

        // таблица отсортирована по кодпоинту
        for &m in &self.mirrors {
            let mirrored = m & MIRROR_CODE_MASK;

            if code == mirrored {
                return self.mirrors[(m >> MIRROR_INDEX_SHIFT) as usize] & MIRROR_CODE_MASK;
            }

            if code < mirrored {
                break;
            }
        }

        code
    }

    pub fn get_joining_group(&self, code: u32) -> JoiningGroup
    {
        let lookup = |groups: &[u8], start: usize| -> Option<JoiningGroup> {
            let i = (code as usize).checked_sub(start)?;
            groups.get(i).map(|&g| JoiningGroup(g))
        };

        // индексы уже проверены при загрузке
        let start = self.indexes[IX_JG_START] as usize;
        let start_2 = self.indexes[IX_JG_START_2] as usize;

        lookup(&self.joining_groups, start)
            .or_else(|| lookup(&self.joining_groups_2, start_2))
            .unwrap_or(JoiningGroup::NO_JOINING_GROUP)
    }

    /// максимальное значение свойства в данных
    pub fn max_value(&self, which: BidiMaxValue) -> u32
    {
        let max = self.indexes[IX_MAX_VALUES] as u32;

        match which {
            BidiMaxValue::BidiClass => max & CLASS_MASK as u32,
            BidiMaxValue::JoiningGroup => (max & MAX_JG_MASK) >> MAX_JG_SHIFT,
            BidiMaxValue::JoiningType => (max & JT_MASK as u32) >> JT_SHIFT,
            BidiMaxValue::PairedBracketType => (max & BPT_MASK as u32) >> BPT_SHIFT,
        }
    }

    pub fn data_version(&self) -> VersionInfo
    {
        self.data_version
    }
}

/// байты групп соединения для диапазона [start, limit)
fn read_range(reader: &mut ByteReader, start: usize, limit: usize) -> Result<Vec<u8>>
{
    match limit.checked_sub(start) {
        Some(count) => Ok(reader.bytes(count)?.to_vec()),
        None => Err(Error::format("диапазон групп соединения перевёрнут")),
    }
}
