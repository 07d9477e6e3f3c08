/// список смещений от текущей позиции, с которых нужно продолжить сопоставление
///
/// кольцевой буфер: элемент i соответствует смещению (i - start) по модулю длины буфера.
/// ненулевое значение - смещение присутствует в списке, само значение - наименьшее
/// количество элементов множества на пути к этой позиции (для подсчёта; иначе 1).
/// смещения лежат в диапазоне [1, max_length], поэтому вставка и удаление не сдвигают данные.
#[derive(Debug, Clone)]
pub struct OffsetList
{
    list: Vec<u32>,
    length: usize,
    start: usize,
}

impl Default for OffsetList
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl OffsetList
{
    pub fn new() -> Self
    {
        Self {
            list: vec![0; 16],
            length: 0,
            start: 0,
        }
    }

    /// подготовить список к смещениям не больше max_length и очистить его
    pub fn set_max_length(&mut self, max_length: usize)
    {
        if max_length > self.list.len() {
            self.list = vec![0; max_length];
        }

        self.clear();
    }

    pub fn clear(&mut self)
    {
        self.list.iter_mut().for_each(|count| *count = 0);
        self.start = 0;
        self.length = 0;
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.length == 0
    }

    #[inline]
    fn index(&self, offset: usize) -> usize
    {
        let i = self.start + offset;

        match i >= self.list.len() {
            true => i - self.list.len(),
            false => i,
        }
    }

    /// текущая позиция сдвинулась на delta; смещения меньше delta в списке отсутствуют,
    /// смещение, равное delta, удаляется
    pub fn shift(&mut self, delta: usize)
    {
        let i = self.index(delta);

        if self.list[i] != 0 {
            self.list[i] = 0;
            self.length -= 1;
        }

        self.start = i;
    }

    /// добавить смещение, которого ещё нет в списке
    pub fn add_offset(&mut self, offset: usize)
    {
        let i = self.index(offset);

        if self.list[i] == 0 {
            self.list[i] = 1;
            self.length += 1;
        }
    }

    /// добавить смещение или уменьшить его счётчик
    pub fn add_offset_and_count(&mut self, offset: usize, count: u32)
    {
        let i = self.index(offset);

        match self.list[i] {
            0 => {
                self.list[i] = count;
                self.length += 1;
            }
            old if count < old => self.list[i] = count,
            _ => (),
        }
    }

    #[inline]
    pub fn contains_offset(&self, offset: usize) -> bool
    {
        self.list[self.index(offset)] != 0
    }

    /// смещение уже достигнуто за не большее количество элементов?
    #[inline]
    pub fn has_count_at_offset(&self, offset: usize, count: u32) -> bool
    {
        let old = self.list[self.index(offset)];

        old != 0 && old <= count
    }

    /// извлечь наименьшее смещение из непустого списка и сдвинуть к нему текущую позицию;
    /// возвращает смещение и его счётчик
    pub fn pop_minimum(&mut self) -> (usize, u32)
    {
        let len = self.list.len();

        // сначала list[start + 1 ..], затем с начала буфера по start включительно
        let found = (self.start + 1 .. len)
            .chain(0 ..= self.start)
            .find(|&i| self.list[i] != 0);

        let i = match found {
            Some(i) => i,
            None => return (0, 0),
        };

        let count = self.list[i];
        let offset = match i > self.start {
            true => i - self.start,
            false => len - self.start + i,
        };

        self.list[i] = 0;
        self.length -= 1;
        self.start = i;

        (offset, count)
    }
}
