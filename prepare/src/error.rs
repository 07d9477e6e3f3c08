use displaydoc::Display;

/// ошибки подготовки бинарных данных
#[derive(Display, Debug, Clone, PartialEq)]
pub enum PrepareError
{
    /// значение {value:#X} для U+{code:04X} не помещается в 16 бит
    ValueOverflow
    {
        code: u32, value: u32
    },
    /// trie не помещается в формат: {0}
    TrieOverflow(String),
    /// U+{code:04X}: {reason}
    Mapping
    {
        code: u32, reason: &'static str
    },
    /// данные нормализации не помещаются в диапазоны norm16: {0}
    NormalizationOverflow(String),
    /// не удалось записать {path}: {message}
    Output
    {
        path: String, message: String
    },
}

impl std::error::Error for PrepareError {}
