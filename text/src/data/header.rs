use core::fmt;

use super::reader::{ByteOrder, ByteReader};
use crate::{Error, Result};

/// сигнатура бинарных данных (байты 2 и 3 заголовка)
pub const MAGIC: [u8; 2] = [0xDA, 0x27];
/// минимальный размер блока информации о данных
pub const MIN_INFO_SIZE: u16 = 20;
/// размер кодовой единицы UTF-16
pub const CHAR_SIZE: u8 = 2;
/// набор символов ASCII
pub const CHARSET_ASCII: u8 = 0;

/// версия: 4 байта major.minor.milli.micro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VersionInfo(pub [u8; 4]);

impl VersionInfo
{
    pub fn new(major: u8, minor: u8, milli: u8, micro: u8) -> Self
    {
        Self([major, minor, milli, micro])
    }

    #[inline]
    pub fn major(&self) -> u8
    {
        self.0[0]
    }

    #[inline]
    pub fn minor(&self) -> u8
    {
        self.0[1]
    }

    #[inline]
    pub fn milli(&self) -> u8
    {
        self.0[2]
    }

    #[inline]
    pub fn micro(&self) -> u8
    {
        self.0[3]
    }

    /// упакованная версия: major в старшем байте
    pub fn packed(&self) -> u32
    {
        u32::from_be_bytes(self.0)
    }

    pub fn from_packed(packed: u32) -> Self
    {
        Self(packed.to_be_bytes())
    }
}

impl fmt::Display for VersionInfo
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

/// проверить заголовок бинарных данных и перейти к полезной нагрузке
///
/// после вызова читатель установлен на начало данных, порядок байт взят из заголовка.
/// acceptor решает, подходит ли версия формата. возвращает упакованную версию данных.
pub fn read_header<F>(reader: &mut ByteReader, format: [u8; 4], acceptor: F) -> Result<u32>
where
    F: Fn(VersionInfo) -> bool,
{
    read_header_and_data_version(reader, format, acceptor).map(|version| version.packed())
}

/// то же, что read_header, но версия данных возвращается целиком
pub fn read_header_and_data_version<F>(
    reader: &mut ByteReader,
    format: [u8; 4],
    acceptor: F,
) -> Result<VersionInfo>
where
    F: Fn(VersionInfo) -> bool,
{
    let start = reader.position();

    // минимальный заголовок: 4 байта префикса + 20 байт информации о данных
    reader.ensure(4 + MIN_INFO_SIZE as usize)?;

    if [reader.u8_at(start + 2)?, reader.u8_at(start + 3)?] != MAGIC {
        return Err(Error::format("отсутствует сигнатура 0xDA27"));
    }

    let is_big_endian = reader.u8_at(start + 8)?;
    let charset = reader.u8_at(start + 9)?;
    let char_size = reader.u8_at(start + 10)?;

    let order = match is_big_endian {
        0 => ByteOrder::Little,
        1 => ByteOrder::Big,
        _ => return Err(Error::format(format!("неизвестный порядок байт: {}", is_big_endian))),
    };

    if charset != CHARSET_ASCII || char_size != CHAR_SIZE {
        return Err(Error::format(format!(
            "неподдерживаемая кодировка: набор {}, размер символа {}",
            charset, char_size
        )));
    }

    reader.set_order(order);

    let header_size = reader.u16_at(start)? as usize;
    let info_size = reader.u16_at(start + 4)?;

    if info_size < MIN_INFO_SIZE {
        return Err(Error::format(format!("слишком короткая информация о данных: {}", info_size)));
    }

    if header_size < info_size as usize + 4 {
        return Err(Error::format(format!(
            "размер заголовка {} меньше информации о данных {}",
            header_size, info_size
        )));
    }

    let mut tag = [0u8; 4];
    tag.copy_from_slice(&reader.data()[start + 12 .. start + 16]);

    if tag != format {
        return Err(Error::format(format!(
            "ожидался формат {}, получен {}",
            String::from_utf8_lossy(&format),
            String::from_utf8_lossy(&tag)
        )));
    }

    let mut format_version = [0u8; 4];
    format_version.copy_from_slice(&reader.data()[start + 16 .. start + 20]);
    let format_version = VersionInfo(format_version);

    if !acceptor(format_version) {
        return Err(Error::format(format!(
            "версия формата {} {} не поддерживается",
            String::from_utf8_lossy(&format),
            format_version
        )));
    }

    let mut data_version = [0u8; 4];
    data_version.copy_from_slice(&reader.data()[start + 20 .. start + 24]);

    reader.set_position(start + header_size)?;

    log::trace!(
        "заголовок {}: формат {}, данные {}, {:?}",
        String::from_utf8_lossy(&format),
        format_version,
        VersionInfo(data_version),
        order
    );

    Ok(VersionInfo(data_version))
}

/// сериализовать заголовок (используется при подготовке данных)
pub fn write_header(
    out: &mut Vec<u8>,
    order: ByteOrder,
    format: [u8; 4],
    format_version: VersionInfo,
    data_version: VersionInfo,
)
{
    // 4 байта префикса + 20 байт информации, выровнено до 16
    const HEADER_SIZE: u16 = 32;

    let u16_bytes = |value: u16| match order {
        ByteOrder::Little => value.to_le_bytes(),
        ByteOrder::Big => value.to_be_bytes(),
    };

    let start = out.len();

    out.extend_from_slice(&u16_bytes(HEADER_SIZE));
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&u16_bytes(MIN_INFO_SIZE));
    out.extend_from_slice(&[0, 0]);
    out.push((order == ByteOrder::Big) as u8);
    out.push(CHARSET_ASCII);
    out.push(CHAR_SIZE);
    out.push(0);
    out.extend_from_slice(&format);
    out.extend_from_slice(&format_version.0);
    out.extend_from_slice(&data_version.0);

    out.resize(start + HEADER_SIZE as usize, 0);
}

#[cfg(test)]
mod tests
{
    use super::*;

    const FORMAT: [u8; 4] = *b"Test";

    fn header(order: ByteOrder) -> Vec<u8>
    {
        let mut out = vec![];
        write_header(&mut out, order, FORMAT, VersionInfo::new(2, 1, 0, 0), VersionInfo::new(15, 1, 0, 0));
        out.extend_from_slice(&[0xAA, 0xBB]);
        out
    }

    #[test]
    fn accepted()
    {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let bytes = header(order);
            let mut reader = ByteReader::new(&bytes);

            let version = read_header(&mut reader, FORMAT, |v| v.major() == 2).unwrap();

            assert_eq!(version, 0x0F01_0000);
            assert_eq!(reader.order(), order);
            assert_eq!(reader.position(), 32);
            assert_eq!(reader.u8().unwrap(), 0xAA);
        }
    }

    #[test]
    fn rejected()
    {
        let bytes = header(ByteOrder::Big);

        // версия не подходит
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(read_header(&mut reader, FORMAT, |v| v.major() == 3), Err(Error::DataFormat(_))));

        // другой формат
        let mut reader = ByteReader::new(&bytes);
        assert!(read_header(&mut reader, *b"Nrm2", |_| true).is_err());

        // испорченная сигнатура
        let mut broken = bytes.clone();
        broken[3] = 0x28;
        assert!(read_header(&mut ByteReader::new(&broken), FORMAT, |_| true).is_err());

        // размер символа
        let mut broken = bytes.clone();
        broken[10] = 1;
        assert!(read_header(&mut ByteReader::new(&broken), FORMAT, |_| true).is_err());

        // обрезанный заголовок
        assert!(matches!(
            read_header(&mut ByteReader::new(&bytes[.. 16]), FORMAT, |_| true),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn header_size_smaller_than_info()
    {
        let mut bytes = header(ByteOrder::Big);
        bytes[0 .. 2].copy_from_slice(&20u16.to_be_bytes());

        assert!(read_header(&mut ByteReader::new(&bytes), FORMAT, |_| true).is_err());
    }
}
