//! Источники бинарных данных и проверка их заголовков.
//!
//! Данные (нормализация, свойства, bidi) хранятся как отдельные ресурсы с общим заголовком.
//! Источник данных передаётся явно, глобального поиска ресурсов нет.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::{Error, Result};

mod cache;
mod header;
mod reader;

pub use cache::DataCache;
pub use header::{read_header, read_header_and_data_version, write_header, VersionInfo, MAGIC};
pub use reader::{ByteOrder, ByteReader};

/// данные нормализации NFC
pub const NFC_RESOURCE: &str = "nfc.nrm";
/// данные нормализации NFKC
pub const NFKC_RESOURCE: &str = "nfkc.nrm";
/// основные свойства символов
pub const PROPERTIES_RESOURCE: &str = "uprops.icu";
/// свойства bidi
pub const BIDI_RESOURCE: &str = "ubidi.icu";

/// источник бинарных ресурсов
pub trait DataSource: Send + Sync
{
    /// уникальный идентификатор ресурса в этом источнике, служит ключом кеша
    fn identity(&self, name: &str) -> String;

    /// прочитать ресурс целиком
    fn load(&self, name: &str) -> Result<Vec<u8>>;
}

/// порядковый номер источника в памяти, чтобы разные источники не делили кеш
static MEMORY_SOURCES: AtomicUsize = AtomicUsize::new(0);

/// ресурсы в памяти
pub struct MemorySource
{
    serial: usize,
    resources: HashMap<String, Arc<[u8]>>,
}

impl MemorySource
{
    pub fn new() -> Self
    {
        Self {
            serial: MEMORY_SOURCES.fetch_add(1, Ordering::Relaxed),
            resources: HashMap::new(),
        }
    }

    /// добавить ресурс
    pub fn with(mut self, name: &str, bytes: impl Into<Arc<[u8]>>) -> Self
    {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: &str, bytes: impl Into<Arc<[u8]>>)
    {
        self.resources.insert(name.to_owned(), bytes.into());
    }
}

impl Default for MemorySource
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl DataSource for MemorySource
{
    fn identity(&self, name: &str) -> String
    {
        format!("memory:{}/{}", self.serial, name)
    }

    fn load(&self, name: &str) -> Result<Vec<u8>>
    {
        match self.resources.get(name) {
            Some(bytes) => Ok(bytes.to_vec()),
            None => Err(Error::MissingResource(name.to_owned())),
        }
    }
}

/// ресурсы - файлы в каталоге
pub struct DirectorySource
{
    root: PathBuf,
}

impl DirectorySource
{
    pub fn new(root: impl AsRef<Path>) -> Self
    {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for DirectorySource
{
    fn identity(&self, name: &str) -> String
    {
        self.root.join(name).display().to_string()
    }

    fn load(&self, name: &str) -> Result<Vec<u8>>
    {
        let path = self.root.join(name);

        let file = File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::MissingResource(path.display().to_string()),
            kind => Error::Io {
                name: path.display().to_string(),
                kind,
            },
        })?;

        read_all(file, name)
    }
}

/// прочитать поток полностью: длина потока заранее неизвестна
pub fn read_all(mut stream: impl Read, name: &str) -> Result<Vec<u8>>
{
    let mut bytes = Vec::new();

    stream.read_to_end(&mut bytes).map_err(|e| Error::Io {
        name: name.to_owned(),
        kind: e.kind(),
    })?;

    log::trace!("прочитан ресурс {}: {} байт", name, bytes.len());

    Ok(bytes)
}
