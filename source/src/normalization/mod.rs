use std::collections::{HashMap, HashSet};

pub mod composition;
pub mod decomposition;
pub mod hangul;

// в файле UnicodeData.txt хранится декомпозиция в сжатом виде, т.е. элементы декомпозиции
// могут также иметь свою декомпозицию. здесь - развернутые версии и пары канонической композиции.

lazy_static! {
    /// полные канонические декомпозиции (только кодпоинты, имеющие декомпозицию)
    pub static ref NFD: HashMap<u32, Vec<u32>> = decomposition::nfd();

    /// полные декомпозиции совместимости
    pub static ref NFKD: HashMap<u32, Vec<u32>> = decomposition::nfkd();

    /// первый кодпоинт пары - (второй кодпоинт - композит)
    pub static ref COMPOSITION_PAIRS: HashMap<u32, HashMap<u32, u32>> = composition::pairs();

    /// кодпоинты, комбинируемые с предыдущими
    pub static ref COMBINES_BACKWARDS: HashSet<u32> = composition::combines_backwards();
}
