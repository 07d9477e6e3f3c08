use std::fs;
use std::path::Path;

use unicode_text_prepare::{PrepareError, Stats};

mod stats;

/// записываем файл данных и печатаем статистику
pub fn write(dir: &Path, name: &str, bytes: &[u8], stats: &Stats) -> Result<(), PrepareError>
{
    let error = |path: &Path, e: std::io::Error| PrepareError::Output {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    fs::create_dir_all(dir).map_err(|e| error(dir, e))?;

    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|e| error(&path, e))?;

    log::info!("{}: {} байт", path.display(), bytes.len());

    stats::print(name, bytes, stats);

    Ok(())
}
