use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::Result;

/// кеш загруженных данных: один экземпляр на идентификатор ресурса
///
/// загрузка выполняется под блокировкой, поэтому параллельные запросы одного ресурса
/// получают один и тот же экземпляр. ошибки загрузки не кешируются.
pub struct DataCache<T>
{
    name: &'static str,
    entries: Mutex<HashMap<String, Arc<T>>>,
}

impl<T> DataCache<T>
{
    pub fn new(name: &'static str) -> Self
    {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// получить данные по ключу, при отсутствии - загрузить
    pub fn get_or_load<F>(&self, key: String, load: F) -> Result<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(entry) = entries.get(&key) {
            log::trace!("{}: {} уже загружено", self.name, key);
            return Ok(Arc::clone(entry));
        }

        let value = match load() {
            Ok(value) => Arc::new(value),
            Err(error) => {
                log::warn!("{}: не удалось загрузить {}: {}", self.name, key, error);
                return Err(error);
            }
        };

        log::debug!("{}: загружено {}", self.name, key);
        entries.insert(key, Arc::clone(&value));

        Ok(value)
    }

    /// количество загруженных экземпляров
    pub fn len(&self) -> usize
    {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}
