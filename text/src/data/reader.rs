use crate::{Error, Result};

/// порядок байт в данных
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder
{
    Little,
    Big,
}

impl ByteOrder
{
    /// противоположный порядок
    pub fn reversed(self) -> Self
    {
        match self {
            Self::Little => Self::Big,
            Self::Big => Self::Little,
        }
    }
}

/// чтение бинарных данных: курсор и переключаемый порядок байт
#[derive(Debug, Clone)]
pub struct ByteReader<'a>
{
    bytes: &'a [u8],
    position: usize,
    order: ByteOrder,
}

// чтение целых чисел и массивов из них в текущем порядке байт
macro_rules! read_methods {
    ($(($name: ident, $array: ident, $at: ident, $t: ty)),+) => {
        $(
            pub fn $name(&mut self) -> Result<$t>
            {
                let value = self.$at(self.position)?;
                self.position += core::mem::size_of::<$t>();

                Ok(value)
            }

            pub fn $at(&self, offset: usize) -> Result<$t>
            {
                const SIZE: usize = core::mem::size_of::<$t>();

                let bytes = self.slice(offset, SIZE)?;
                let mut raw = [0u8; SIZE];
                raw.copy_from_slice(bytes);

                Ok(match self.order {
                    ByteOrder::Little => <$t>::from_le_bytes(raw),
                    ByteOrder::Big => <$t>::from_be_bytes(raw),
                })
            }

            pub fn $array(&mut self, count: usize) -> Result<Vec<$t>>
            {
                let size = count
                    .checked_mul(core::mem::size_of::<$t>())
                    .ok_or(Error::format("слишком длинный массив"))?;

                self.ensure(size)?;

                (0 .. count).map(|_| self.$name()).collect()
            }
        )+
    };
}

impl<'a> ByteReader<'a>
{
    /// читатель с порядком байт big-endian (порядок уточняется заголовком)
    pub fn new(bytes: &'a [u8]) -> Self
    {
        Self {
            bytes,
            position: 0,
            order: ByteOrder::Big,
        }
    }

    read_methods!(
        (u16, u16_array, u16_at, u16),
        (u32, u32_array, u32_at, u32),
        (i32, i32_array, i32_at, i32)
    );

    pub fn order(&self) -> ByteOrder
    {
        self.order
    }

    pub fn set_order(&mut self, order: ByteOrder)
    {
        self.order = order;
    }

    pub fn position(&self) -> usize
    {
        self.position
    }

    pub fn set_position(&mut self, position: usize) -> Result<()>
    {
        match position <= self.bytes.len() {
            true => {
                self.position = position;
                Ok(())
            }
            false => Err(Error::Truncated {
                needed: position,
                available: self.bytes.len(),
            }),
        }
    }

    /// все данные, независимо от курсора
    pub fn data(&self) -> &'a [u8]
    {
        self.bytes
    }

    /// сколько байт осталось
    pub fn remaining(&self) -> usize
    {
        self.bytes.len() - self.position
    }

    pub fn u8(&mut self) -> Result<u8>
    {
        let value = self.u8_at(self.position)?;
        self.position += 1;

        Ok(value)
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8>
    {
        Ok(self.slice(offset, 1)?[0])
    }

    /// прочитать count байт
    pub fn bytes(&mut self, count: usize) -> Result<&'a [u8]>
    {
        let bytes = self.slice(self.position, count)?;
        self.position += count;

        Ok(bytes)
    }

    /// пропустить count байт
    pub fn skip(&mut self, count: usize) -> Result<()>
    {
        self.ensure(count)?;
        self.position += count;

        Ok(())
    }

    /// убедиться, что впереди есть как минимум count байт
    pub fn ensure(&self, count: usize) -> Result<()>
    {
        match count <= self.remaining() {
            true => Ok(()),
            false => Err(Error::Truncated {
                needed: self.position.saturating_add(count),
                available: self.bytes.len(),
            }),
        }
    }

    #[inline]
    fn slice(&self, offset: usize, count: usize) -> Result<&'a [u8]>
    {
        let end = offset.checked_add(count).unwrap_or(usize::MAX);

        match end <= self.bytes.len() {
            true => Ok(&self.bytes[offset .. end]),
            false => Err(Error::Truncated {
                needed: end,
                available: self.bytes.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn byte_order()
    {
        let bytes = [0x12, 0x34, 0x56, 0x78];
        let mut reader = ByteReader::new(&bytes);

        assert_eq!(reader.u16().unwrap(), 0x1234);

        reader.set_order(ByteOrder::Little);
        assert_eq!(reader.u16().unwrap(), 0x7856);
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.u32_at(0).unwrap(), 0x7856_3412);
    }

    #[test]
    fn truncated()
    {
        let bytes = [0u8; 6];
        let mut reader = ByteReader::new(&bytes);

        assert!(reader.u32().is_ok());
        assert_eq!(
            reader.u32(),
            Err(Error::Truncated {
                needed: 8,
                available: 6
            })
        );
        assert!(reader.u16_array(2).is_err());
        assert_eq!(reader.position(), 4);
    }
}
