//! JSON-backed quote persistence.
//!
//! The store is a flat JSON array of strings. Reading never fails the
//! generation flow: a missing or malformed file behaves as an empty store
//! and the picker falls back to [`DEFAULT_QUOTE`].

use crate::foundation::error::{QuotewallError, QuotewallResult};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Fallback quotation used whenever the store has nothing to offer.
pub const DEFAULT_QUOTE: &str = "为有牺牲多壮志，敢教日月换新天。";

/// Anything that can supply a quotation for one generation.
pub trait QuoteSource {
    /// Return a quotation. Never empty: implementations fall back to
    /// [`DEFAULT_QUOTE`] rather than failing.
    fn pick_text<R: Rng>(&self, rng: &mut R) -> String;
}

/// Quote store over a JSON file path.
#[derive(Clone, Debug)]
pub struct QuoteStore {
    path: PathBuf,
}

impl QuoteStore {
    /// Build a store over `path`. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all quotations. A missing file is an empty store; a malformed
    /// one is logged and also treated as empty, per the
    /// recover-with-fallback policy.
    pub fn load(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot read quote store");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(quotes) => quotes,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "quote store is not a JSON string array, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Overwrite the store with `quotes`, pretty-printed UTF-8.
    pub fn save(&self, quotes: &[String]) -> QuotewallResult<()> {
        let json = serde_json::to_string_pretty(quotes)
            .map_err(|err| QuotewallError::resource(format!("serialize quotes: {err}")))?;
        fs::write(&self.path, json).map_err(|err| {
            QuotewallError::resource(format!("write '{}': {err}", self.path.display()))
        })
    }

    /// Append one quotation.
    pub fn add(&self, quote: &str) -> QuotewallResult<()> {
        let mut quotes = self.load();
        quotes.push(quote.to_owned());
        self.save(&quotes)
    }

    /// Replace the quotation at `index` (0-based), returning the previous
    /// text.
    pub fn edit(&self, index: usize, text: &str) -> QuotewallResult<String> {
        let mut quotes = self.load();
        if index >= quotes.len() {
            return Err(QuotewallError::resource(format!(
                "no quote at index {index} (store has {})",
                quotes.len()
            )));
        }
        let previous = std::mem::replace(&mut quotes[index], text.to_owned());
        self.save(&quotes)?;
        Ok(previous)
    }

    /// Remove and return the quotation at `index` (0-based).
    pub fn remove(&self, index: usize) -> QuotewallResult<String> {
        let mut quotes = self.load();
        if index >= quotes.len() {
            return Err(QuotewallError::resource(format!(
                "no quote at index {index} (store has {})",
                quotes.len()
            )));
        }
        let removed = quotes.remove(index);
        self.save(&quotes)?;
        Ok(removed)
    }

    /// Replace the store with the JSON string array at `from`. Unlike
    /// [`QuoteStore::load`], a malformed import file is an error.
    pub fn import(&self, from: &Path) -> QuotewallResult<usize> {
        let raw = fs::read_to_string(from)
            .map_err(|err| QuotewallError::resource(format!("read '{}': {err}", from.display())))?;
        let quotes: Vec<String> = serde_json::from_str(&raw).map_err(|err| {
            QuotewallError::resource(format!("parse '{}': {err}", from.display()))
        })?;
        self.save(&quotes)?;
        Ok(quotes.len())
    }

    /// Write the store contents to `to` as a JSON string array.
    pub fn export(&self, to: &Path) -> QuotewallResult<usize> {
        let quotes = self.load();
        let json = serde_json::to_string_pretty(&quotes)
            .map_err(|err| QuotewallError::resource(format!("serialize quotes: {err}")))?;
        fs::write(to, json)
            .map_err(|err| QuotewallError::resource(format!("write '{}': {err}", to.display())))?;
        Ok(quotes.len())
    }
}

impl QuoteSource for QuoteStore {
    fn pick_text<R: Rng>(&self, rng: &mut R) -> String {
        let quotes = self.load();
        if quotes.is_empty() {
            return DEFAULT_QUOTE.to_owned();
        }
        quotes[rng.random_range(0..quotes.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_in(dir: &tempfile::TempDir) -> QuoteStore {
        QuoteStore::new(dir.path().join("quotes.json"))
    }

    #[test]
    fn missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn malformed_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let quotes = vec!["一".to_owned(), "二".to_owned()];
        store.save(&quotes).unwrap();
        assert_eq!(store.load(), quotes);
    }

    #[test]
    fn add_and_remove_mutate_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add("甲").unwrap();
        store.add("乙").unwrap();
        assert_eq!(store.remove(0).unwrap(), "甲");
        assert_eq!(store.load(), vec!["乙".to_owned()]);
        assert!(store.remove(5).is_err());
    }

    #[test]
    fn edit_replaces_in_place_and_returns_the_old_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add("甲").unwrap();
        store.add("乙").unwrap();
        assert_eq!(store.edit(1, "丙").unwrap(), "乙");
        assert_eq!(store.load(), vec!["甲".to_owned(), "丙".to_owned()]);
        assert!(store.edit(2, "丁").is_err());
    }

    #[test]
    fn import_replaces_and_export_copies() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.add("old").unwrap();

        let incoming = dir.path().join("incoming.json");
        fs::write(&incoming, r#"["a", "b"]"#).unwrap();
        assert_eq!(store.import(&incoming).unwrap(), 2);
        assert_eq!(store.load(), vec!["a".to_owned(), "b".to_owned()]);

        let out = dir.path().join("out.json");
        assert_eq!(store.export(&out).unwrap(), 2);
        let exported: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(exported, store.load());
    }

    #[test]
    fn import_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let incoming = dir.path().join("incoming.json");
        fs::write(&incoming, "nope").unwrap();
        assert!(store.import(&incoming).is_err());
    }

    #[test]
    fn empty_store_picks_the_default_quote() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let text = store_in(&dir).pick_text(&mut rng);
        assert_eq!(text, DEFAULT_QUOTE);
        assert!(!text.is_empty());
    }

    #[test]
    fn non_empty_store_picks_a_stored_quote() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let quotes = vec!["x".to_owned(), "y".to_owned(), "z".to_owned()];
        store.save(&quotes).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..20 {
            assert!(quotes.contains(&store.pick_text(&mut rng)));
        }
    }
}
