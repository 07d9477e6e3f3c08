use crate::properties::PropertiesError;

/// строки данных файла UCD: комментарии отброшены, поля разделены ';' и обрезаны
pub fn data_lines(data: &str) -> impl Iterator<Item = Vec<&str>> + '_
{
    data.lines().filter_map(|line| {
        let line = match line.split_once('#') {
            Some((values, _)) => values,
            None => line,
        }
        .trim();

        match line.is_empty() {
            true => None,
            false => Some(line.split(';').map(str::trim).collect()),
        }
    })
}

/// поле строки по номеру
#[inline]
pub fn field<'a>(fields: &[&'a str], index: usize) -> Result<&'a str, PropertiesError>
{
    fields.get(index).copied().ok_or(PropertiesError::MissingField(index))
}

/// кодпоинт в шестнадцатеричной записи
#[inline]
pub fn code(value: &str) -> Result<u32, PropertiesError>
{
    let code = u32::from_str_radix(value.trim(), 16)?;

    match code <= 0x10FFFF {
        true => Ok(code),
        false => Err(PropertiesError::UnknownPropertyValue),
    }
}

/// диапазон XXXX..YYYY или одиночный кодпоинт, границы включительно
pub fn code_range(value: &str) -> Result<(u32, u32), PropertiesError>
{
    match value.split_once("..") {
        Some((first, last)) => Ok((code(first)?, code(last)?)),
        None => {
            let code = code(value)?;
            Ok((code, code))
        }
    }
}
