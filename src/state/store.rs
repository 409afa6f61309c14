//! Durable key/value state.
//!
//! The session writes through to a string-keyed store on every mutating
//! transition and reads it once at startup. Values are plain strings; the
//! typed helpers here own the encoding of each key and fall back to defaults
//! when a value is missing or cannot be parsed.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::purchase::PurchaseLimitState;
use super::reel::REEL_COUNT;
use super::symbol::Symbol;

/// Store keys.
pub mod keys {
    pub const SCORE: &str = "score";
    pub const HISTORY: &str = "history";
    pub const SYMBOL_COUNTS: &str = "symbolCounts";
    pub const PURCHASE_DATE: &str = "purchaseDate";
    pub const PURCHASE_COUNT: &str = "purchaseCount";
}

/// Score used when none is stored.
pub const DEFAULT_SCORE: u64 = 100;

/// Date format for `purchaseDate`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-keyed durable store.
pub trait PersistenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory store. Lives as long as the value does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
///
/// The whole file is rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store file. A missing file starts empty; an unreadable one is
    /// logged and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("store file {} is corrupt, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("store file {} unreadable, starting empty: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl PersistenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// Everything the session restores at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub score: u64,
    pub history: Vec<[Symbol; REEL_COUNT]>,
    pub symbol_counts: BTreeMap<Symbol, u64>,
    pub purchase: Option<PurchaseLimitState>,
}

impl SavedGame {
    /// Read every key, substituting defaults for missing or corrupt values.
    pub fn load<S: PersistenceStore + ?Sized>(store: &S, default_score: u64) -> Self {
        Self {
            score: load_score(store).unwrap_or(default_score),
            history: load_json(store, keys::HISTORY).unwrap_or_default(),
            symbol_counts: load_json(store, keys::SYMBOL_COUNTS).unwrap_or_default(),
            purchase: load_purchase(store),
        }
    }
}

fn load_score<S: PersistenceStore + ?Sized>(store: &S) -> Option<u64> {
    let raw = store.get(keys::SCORE)?;
    match raw.trim().parse::<u64>() {
        Ok(score) => Some(score),
        Err(e) => {
            log::warn!("ignoring stored score {:?}: {}", raw, e);
            None
        }
    }
}

fn load_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: PersistenceStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring stored {}: {}", key, e);
            None
        }
    }
}

fn load_purchase<S: PersistenceStore + ?Sized>(store: &S) -> Option<PurchaseLimitState> {
    let date = store.get(keys::PURCHASE_DATE)?;
    let date = match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            log::warn!("ignoring stored purchase date {:?}: {}", date, e);
            return None;
        }
    };
    let count = store
        .get(keys::PURCHASE_COUNT)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(0);
    Some(PurchaseLimitState { date, count })
}

/// Write the score.
pub fn save_score<S: PersistenceStore + ?Sized>(store: &mut S, score: u64) -> Result<(), StoreError> {
    store.set(keys::SCORE, score.to_string())
}

/// Write the history.
pub fn save_history<S: PersistenceStore + ?Sized>(
    store: &mut S,
    history: &[[Symbol; REEL_COUNT]],
) -> Result<(), StoreError> {
    store.set(keys::HISTORY, serde_json::to_string(history)?)
}

/// Write the symbol tally.
pub fn save_symbol_counts<S: PersistenceStore + ?Sized>(
    store: &mut S,
    counts: &BTreeMap<Symbol, u64>,
) -> Result<(), StoreError> {
    store.set(keys::SYMBOL_COUNTS, serde_json::to_string(counts)?)
}

/// Write the purchase date and count.
pub fn save_purchase<S: PersistenceStore + ?Sized>(
    store: &mut S,
    state: PurchaseLimitState,
) -> Result<(), StoreError> {
    store.set(keys::PURCHASE_DATE, state.date.format(DATE_FORMAT).to_string())?;
    store.set(keys::PURCHASE_COUNT, state.count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("reelspin-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_empty_store_defaults() {
        let store = MemoryStore::new();
        let saved = SavedGame::load(&store, DEFAULT_SCORE);
        assert_eq!(
            saved,
            SavedGame {
                score: 100,
                history: Vec::new(),
                symbol_counts: BTreeMap::new(),
                purchase: None,
            }
        );
    }

    #[test]
    fn test_corrupt_values_default() {
        let mut store = MemoryStore::new();
        store.set(keys::SCORE, "lots".to_string()).unwrap();
        store.set(keys::HISTORY, "[[\"cherry\"".to_string()).unwrap();
        store.set(keys::SYMBOL_COUNTS, "{\"banana\": 3}".to_string()).unwrap();
        store.set(keys::PURCHASE_DATE, "yesterday".to_string()).unwrap();

        let saved = SavedGame::load(&store, DEFAULT_SCORE);
        assert_eq!(saved.score, 100);
        assert!(saved.history.is_empty());
        assert!(saved.symbol_counts.is_empty());
        assert_eq!(saved.purchase, None);
    }

    #[test]
    fn test_negative_score_is_corrupt() {
        let mut store = MemoryStore::new();
        store.set(keys::SCORE, "-5".to_string()).unwrap();
        assert_eq!(SavedGame::load(&store, DEFAULT_SCORE).score, 100);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let history = vec![
            [Symbol::Seven, Symbol::Seven, Symbol::Seven],
            [Symbol::Cherry, Symbol::Lemon, Symbol::Bell],
        ];
        let mut counts = BTreeMap::new();
        counts.insert(Symbol::Seven, 3);
        counts.insert(Symbol::Cherry, 1);
        let purchase = PurchaseLimitState {
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            count: 2,
        };

        save_score(&mut store, 290).unwrap();
        save_history(&mut store, &history).unwrap();
        save_symbol_counts(&mut store, &counts).unwrap();
        save_purchase(&mut store, purchase).unwrap();

        assert_eq!(store.get(keys::PURCHASE_DATE).as_deref(), Some("2026-10-19"));
        assert_eq!(
            store.get(keys::HISTORY).as_deref(),
            Some(r#"[["seven","seven","seven"],["cherry","lemon","bell"]]"#)
        );

        let saved = SavedGame::load(&store, DEFAULT_SCORE);
        assert_eq!(saved.score, 290);
        assert_eq!(saved.history, history);
        assert_eq!(saved.symbol_counts, counts);
        assert_eq!(saved.purchase, Some(purchase));
    }

    #[test]
    fn test_missing_purchase_count_is_zero() {
        let mut store = MemoryStore::new();
        store.set(keys::PURCHASE_DATE, "2026-10-19".to_string()).unwrap();
        let saved = SavedGame::load(&store, DEFAULT_SCORE);
        assert_eq!(saved.purchase.map(|p| p.count), Some(0));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get(keys::SCORE), None);
        save_score(&mut store, 42).unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(keys::SCORE).as_deref(), Some("42"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json at all").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get(keys::SCORE), None);

        save_score(&mut store, 7).unwrap();
        assert_eq!(JsonFileStore::open(&path).get(keys::SCORE).as_deref(), Some("7"));

        let _ = fs::remove_file(&path);
    }
}
