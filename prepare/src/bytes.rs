use unicode_text::data::ByteOrder;

/// запись целых чисел в заданном порядке байт
pub trait PushBytes
{
    fn push_u16(&mut self, order: ByteOrder, value: u16);
    fn push_u32(&mut self, order: ByteOrder, value: u32);

    fn push_i32(&mut self, order: ByteOrder, value: i32)
    {
        self.push_u32(order, value as u32);
    }

    /// выровнять длину нулями до кратной alignment
    fn pad_to(&mut self, alignment: usize);
}

impl PushBytes for Vec<u8>
{
    fn push_u16(&mut self, order: ByteOrder, value: u16)
    {
        match order {
            ByteOrder::Little => self.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::Big => self.extend_from_slice(&value.to_be_bytes()),
        }
    }

    fn push_u32(&mut self, order: ByteOrder, value: u32)
    {
        match order {
            ByteOrder::Little => self.extend_from_slice(&value.to_le_bytes()),
            ByteOrder::Big => self.extend_from_slice(&value.to_be_bytes()),
        }
    }

    fn pad_to(&mut self, alignment: usize)
    {
        while self.len() % alignment != 0 {
            self.push(0);
        }
    }
}
