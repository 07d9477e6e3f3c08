use crate::data::{read_header, ByteReader, VersionInfo};
use crate::trie::Trie;
use crate::{Error, Result};

/// формат основных свойств
pub const FORMAT: [u8; 4] = *b"UPro";
/// поддерживаемая версия формата
pub const FORMAT_VERSION: u8 = 7;

/// размер таблицы индексов (в 32-битных словах)
pub const INDEX_COUNT: usize = 16;

// индексы: смещения разделов в 32-битных словах от начала полезной нагрузки
pub const IX_PROPS_TRIE_END: usize = 0;
pub const IX_EXCEPTIONS: usize = 1;
pub const IX_ADDITIONAL_TRIE: usize = 3;
pub const IX_ADDITIONAL_VECTORS: usize = 4;
pub const IX_ADDITIONAL_COLUMNS: usize = 5;
pub const IX_SCRIPT_EXTENSIONS: usize = 6;
pub const IX_DATA_TOP: usize = 9;
pub const IX_MAX_VALUES: usize = 10;
pub const IX_MAX_VALUES_2: usize = 11;

/// маска общей категории в значении trie
pub const GENERAL_CATEGORY_MASK: u16 = 0x1F;
/// сдвиг версии появления в колонке 0
pub const AGE_SHIFT: u32 = 24;
/// бит White_Space в колонке 1
pub const WHITE_SPACE_BIT: u32 = 0;

/// основные свойства: trie общей категории и векторы дополнительных свойств
#[derive(Debug)]
pub struct CharacterProperties
{
    trie: Trie<u16>,
    additional_trie: Option<Trie<u16>>,
    vectors: Vec<u32>,
    columns: usize,
    max_values: u32,
    max_values_2: u32,
    data_version: VersionInfo,
}

impl CharacterProperties
{
    pub fn from_bytes(bytes: &[u8]) -> Result<Self>
    {
        let mut reader = ByteReader::new(bytes);
        let data_version = read_header(&mut reader, FORMAT, |v| v.major() == FORMAT_VERSION)?;

        let start = reader.position();
        let indexes = reader.i32_array(INDEX_COUNT)?;

        let offset = |i: usize| -> Result<usize> {
            usize::try_from(indexes[i])
                .map_err(|_| Error::format(format!("отрицательное смещение раздела {}", i)))
        };

        let props_end = offset(IX_PROPS_TRIE_END)?;
        let additional_start = offset(IX_ADDITIONAL_TRIE)?;
        let vectors_start = offset(IX_ADDITIONAL_VECTORS)?;
        let columns = offset(IX_ADDITIONAL_COLUMNS)?;
        let vectors_end = offset(IX_SCRIPT_EXTENSIONS)?;

        if props_end < INDEX_COUNT
            || additional_start < props_end
            || vectors_start < additional_start
            || vectors_end < vectors_start
        {
            return Err(Error::format("смещения разделов свойств не упорядочены"));
        }

        let trie = Trie::deserialize(&mut reader)?;
        expect_section_end(&mut reader, start, props_end, "trie свойств")?;

        // исключения и прочие разделы до дополнительного trie не используются
        reader.set_position(start + additional_start * 4)?;

        let (additional_trie, vectors) = match columns {
            0 => (None, vec![]),
            _ => {
                let additional_trie = Trie::deserialize(&mut reader)?;
                expect_section_end(&mut reader, start, vectors_start, "trie дополнительных свойств")?;

                let vectors = reader.u32_array(vectors_end - vectors_start)?;

                (Some(additional_trie), vectors)
            }
        };

        // значения дополнительного trie - начала строк векторов
        if let Some(additional_trie) = &additional_trie {
            let high = additional_trie
                .values()
                .iter()
                .map(|&v| v as usize)
                .max()
                .unwrap_or(0);

            if high + columns > vectors.len() {
                return Err(Error::format("строка векторов свойств за пределами данных"));
            }
        }

        log::debug!(
            "свойства {}: колонок {}, векторов {}",
            VersionInfo::from_packed(data_version),
            columns,
            vectors.len()
        );

        Ok(Self {
            trie,
            additional_trie,
            vectors,
            columns,
            max_values: indexes[IX_MAX_VALUES] as u32,
            max_values_2: indexes[IX_MAX_VALUES_2] as u32,
            data_version: VersionInfo::from_packed(data_version),
        })
    }

    /// значение основного trie
    #[inline]
    pub fn get_property(&self, code: u32) -> u16
    {
        self.trie.get(code)
    }

    /// значение колонки дополнительных свойств
    #[inline]
    pub fn get_additional(&self, code: u32, column: usize) -> u32
    {
        match &self.additional_trie {
            Some(trie) if column < self.columns => self.vectors[trie.get(code) as usize + column],
            _ => 0,
        }
    }

    /// версия Unicode, в которой появился символ
    pub fn get_age(&self, code: u32) -> VersionInfo
    {
        let age = self.get_additional(code, 0) >> AGE_SHIFT;

        VersionInfo::new((age >> 4) as u8 & 0x0F, age as u8 & 0x0F, 0, 0)
    }

    pub fn is_white_space(&self, code: u32) -> bool
    {
        self.get_additional(code, 1) & (1 << WHITE_SPACE_BIT) != 0
    }

    pub fn columns(&self) -> usize
    {
        self.columns
    }

    pub fn max_values(&self) -> (u32, u32)
    {
        (self.max_values, self.max_values_2)
    }

    pub fn data_version(&self) -> VersionInfo
    {
        self.data_version
    }
}

/// trie не должен выходить за свой раздел; остаток раздела - выравнивание
pub(crate) fn expect_section_end(reader: &mut ByteReader, start: usize, end: usize, what: &str) -> Result<()>
{
    let end = start + end * 4;

    match reader.position() <= end {
        true => reader.set_position(end),
        false => Err(Error::format(format!("{} длиннее своего раздела", what))),
    }
}
