use std::path::PathBuf;

use env_logger::Env;
use unicode_text::data::ByteOrder;
use unicode_text_prepare::PrepareError;

mod output;

/// каталог для файлов данных можно передать первым аргументом
fn main() -> Result<(), PrepareError>
{
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("data"));

    for (name, bytes, stats) in unicode_text_prepare::prepare(ByteOrder::Little)? {
        output::write(&dir, name, &bytes, &stats)?;
    }

    Ok(())
}
