use displaydoc::Display;

/// ошибки загрузки данных и проверки аргументов
#[derive(Display, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error
{
    /// некорректный формат данных: {0}
    DataFormat(String),
    /// данные обрезаны: требуется {needed} байт, доступно {available}
    Truncated
    {
        needed: usize, available: usize
    },
    /// некорректный аргумент {what}: {index}, длина {length}
    InvalidArgument
    {
        what: &'static str,
        index: usize,
        length: usize,
    },
    /// ресурс {0} не найден
    MissingResource(String),
    /// ошибка чтения ресурса {name}: {kind:?}
    Io
    {
        name: String, kind: std::io::ErrorKind
    },
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

impl Error
{
    /// ошибка формата с текстовым описанием
    pub(crate) fn format(reason: impl Into<String>) -> Self
    {
        Self::DataFormat(reason.into())
    }

    /// проверить, что позиция не выходит за пределы строки
    pub(crate) fn check_index(what: &'static str, index: usize, length: usize) -> Result<()>
    {
        match index <= length {
            true => Ok(()),
            false => Err(Self::InvalidArgument {
                what,
                index,
                length,
            }),
        }
    }
}
