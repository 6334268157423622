//! Personal dictionaries: word pairs grouped by language direction.
//!
//! The whole collection is one persisted blob; every mutation immediately
//! rewrites it (see `store`). Dictionaries are looked up by `id` or by
//! `name` — names come from user navigation and are treated as
//! effectively unique without being enforced.

use crate::history::now_millis;
use crate::language::TranslationDirection;
use crate::store::{DICTIONARIES_KEY, Storage, StoreResult};
use serde::{Deserialize, Serialize};

/// Name of the dictionary seeded on first run.
pub const DEFAULT_DICTIONARY_NAME: &str = "Default Dictionary";

/// One vocabulary item. Unique within a dictionary by the full pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub original: String,
    pub translation: String,
}

impl WordPair {
    pub fn new(original: &str, translation: &str) -> Self {
        WordPair {
            original: original.to_string(),
            translation: translation.to_string(),
        }
    }
}

/// A named collection of word pairs with a fixed language direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dictionary {
    /// Creation timestamp in milliseconds; stable, never reused
    pub id: u64,
    pub name: String,
    pub description: String,
    pub words: Vec<WordPair>,
    pub direction: TranslationDirection,
}

impl Dictionary {
    pub fn contains(&self, pair: &WordPair) -> bool {
        self.words.iter().any(|w| w == pair)
    }
}

/// The full set of user dictionaries, mirroring one storage blob.
#[derive(Debug, Clone)]
pub struct DictionaryCollection {
    dictionaries: Vec<Dictionary>,
}

impl DictionaryCollection {
    /// Load the persisted collection; absence or an unreadable blob seeds
    /// a default dictionary instead of failing.
    pub fn load(storage: &Storage) -> Self {
        match storage.read::<Vec<Dictionary>>(DICTIONARIES_KEY) {
            Ok(Some(dictionaries)) => DictionaryCollection { dictionaries },
            Ok(None) => Self::seeded(),
            Err(error) => {
                tracing::warn!(%error, "dictionary blob unreadable, seeding default");
                Self::seeded()
            }
        }
    }

    fn seeded() -> Self {
        DictionaryCollection {
            dictionaries: vec![Dictionary {
                id: now_millis(),
                name: DEFAULT_DICTIONARY_NAME.to_string(),
                description: String::new(),
                words: Vec::new(),
                direction: TranslationDirection::default(),
            }],
        }
    }

    /// Rewrite the whole persisted collection.
    pub fn save(&self, storage: &Storage) -> StoreResult<()> {
        storage.write(DICTIONARIES_KEY, &self.dictionaries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dictionary> {
        self.dictionaries.iter()
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    pub fn get_by_id(&self, id: u64) -> Option<&Dictionary> {
        self.dictionaries.iter().find(|d| d.id == id)
    }

    /// Lookup by the (already URL-decoded) name from navigation.
    pub fn get_by_name(&self, name: &str) -> Option<&Dictionary> {
        self.dictionaries.iter().find(|d| d.name == name)
    }

    /// Create a dictionary and persist the collection. Returns the new id.
    pub fn create(
        &mut self,
        name: &str,
        description: &str,
        direction: TranslationDirection,
        storage: &Storage,
    ) -> StoreResult<u64> {
        let mut id = now_millis();
        // Timestamp collisions happen when dictionaries are created within
        // the same millisecond; bump until free.
        while self.dictionaries.iter().any(|d| d.id == id) {
            id += 1;
        }

        self.dictionaries.push(Dictionary {
            id,
            name: name.to_string(),
            description: description.to_string(),
            words: Vec::new(),
            direction,
        });
        self.save(storage)?;
        Ok(id)
    }

    /// Delete a dictionary by id. `Ok(false)` when no such dictionary.
    pub fn delete(&mut self, id: u64, storage: &Storage) -> StoreResult<bool> {
        let before = self.dictionaries.len();
        self.dictionaries.retain(|d| d.id != id);
        if self.dictionaries.len() == before {
            return Ok(false);
        }
        self.save(storage)?;
        Ok(true)
    }

    /// Rename a dictionary. `Ok(false)` when no such dictionary.
    pub fn rename(&mut self, id: u64, new_name: &str, storage: &Storage) -> StoreResult<bool> {
        match self.dictionaries.iter_mut().find(|d| d.id == id) {
            Some(dictionary) => {
                dictionary.name = new_name.to_string();
                self.save(storage)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Add a word pair. `Ok(false)` when the dictionary is missing or the
    /// pair is already present — nothing is persisted in either case.
    pub fn add_word(&mut self, id: u64, pair: WordPair, storage: &Storage) -> StoreResult<bool> {
        let Some(dictionary) = self.dictionaries.iter_mut().find(|d| d.id == id) else {
            return Ok(false);
        };
        if dictionary.words.iter().any(|w| *w == pair) {
            return Ok(false);
        }
        dictionary.words.push(pair);
        self.save(storage)?;
        Ok(true)
    }

    /// Remove a word pair. Removing an absent pair is a no-op (`Ok(false)`).
    pub fn remove_word(&mut self, id: u64, pair: &WordPair, storage: &Storage) -> StoreResult<bool> {
        let Some(dictionary) = self.dictionaries.iter_mut().find(|d| d.id == id) else {
            return Ok(false);
        };
        let before = dictionary.words.len();
        dictionary.words.retain(|w| w != pair);
        if dictionary.words.len() == before {
            return Ok(false);
        }
        self.save(storage)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        (dir, storage)
    }

    #[test]
    fn test_load_seeds_default_when_missing() {
        let (_dir, storage) = temp_storage();
        let collection = DictionaryCollection::load(&storage);
        assert_eq!(collection.len(), 1);
        let seeded = collection.get_by_name(DEFAULT_DICTIONARY_NAME).unwrap();
        assert!(seeded.words.is_empty());
        assert_eq!(seeded.direction, TranslationDirection::new("ru", "en"));
    }

    #[test]
    fn test_load_seeds_default_when_corrupt() {
        let (dir, storage) = temp_storage();
        std::fs::write(dir.path().join("dictionaries.json"), "[{broken").unwrap();
        let collection = DictionaryCollection::load(&storage);
        assert!(collection.get_by_name(DEFAULT_DICTIONARY_NAME).is_some());
    }

    #[test]
    fn test_create_persists_and_assigns_unique_ids() {
        let (_dir, storage) = temp_storage();
        let mut collection = DictionaryCollection::load(&storage);
        let a = collection
            .create("Animals", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();
        let b = collection
            .create("Food", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();
        assert_ne!(a, b);

        let reloaded = DictionaryCollection::load(&storage);
        assert!(reloaded.get_by_name("Animals").is_some());
        assert!(reloaded.get_by_name("Food").is_some());
    }

    #[test]
    fn test_add_word_persists_immediately() {
        let (_dir, storage) = temp_storage();
        let mut collection = DictionaryCollection::load(&storage);
        let id = collection
            .create("Animals", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();

        let added = collection
            .add_word(id, WordPair::new("Привет", "Hello"), &storage)
            .unwrap();
        assert!(added);

        let reloaded = DictionaryCollection::load(&storage);
        assert!(
            reloaded
                .get_by_id(id)
                .unwrap()
                .contains(&WordPair::new("Привет", "Hello"))
        );
    }

    #[test]
    fn test_add_duplicate_word_is_noop() {
        let (_dir, storage) = temp_storage();
        let mut collection = DictionaryCollection::load(&storage);
        let id = collection
            .create("Animals", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();

        assert!(collection.add_word(id, WordPair::new("кот", "cat"), &storage).unwrap());
        assert!(!collection.add_word(id, WordPair::new("кот", "cat"), &storage).unwrap());
        assert_eq!(collection.get_by_id(id).unwrap().words.len(), 1);
    }

    #[test]
    fn test_remove_word_removes_exactly_the_pair() {
        let (_dir, storage) = temp_storage();
        let mut collection = DictionaryCollection::load(&storage);
        let id = collection
            .create("Animals", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();
        collection.add_word(id, WordPair::new("Привет", "Hello"), &storage).unwrap();
        collection.add_word(id, WordPair::new("Привет", "Hi"), &storage).unwrap();

        let removed = collection
            .remove_word(id, &WordPair::new("Привет", "Hello"), &storage)
            .unwrap();
        assert!(removed);

        let reloaded = DictionaryCollection::load(&storage);
        let words = &reloaded.get_by_id(id).unwrap().words;
        assert_eq!(words.as_slice(), &[WordPair::new("Привет", "Hi")]);
    }

    #[test]
    fn test_remove_absent_word_is_noop() {
        let (_dir, storage) = temp_storage();
        let mut collection = DictionaryCollection::load(&storage);
        let id = collection
            .create("Animals", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();

        let removed = collection
            .remove_word(id, &WordPair::new("нет", "no"), &storage)
            .unwrap();
        assert!(!removed);
    }

    #[test]
    fn test_delete_dictionary() {
        let (_dir, storage) = temp_storage();
        let mut collection = DictionaryCollection::load(&storage);
        let id = collection
            .create("Animals", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();

        assert!(collection.delete(id, &storage).unwrap());
        assert!(collection.get_by_id(id).is_none());
        assert!(!collection.delete(id, &storage).unwrap());
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let (_dir, storage) = temp_storage();
        let collection = DictionaryCollection::load(&storage);
        assert!(collection.get_by_name("Nonexistent").is_none());
        assert!(collection.get_by_id(42).is_none());
    }

    #[test]
    fn test_rename() {
        let (_dir, storage) = temp_storage();
        let mut collection = DictionaryCollection::load(&storage);
        let id = collection
            .create("Animals", "", TranslationDirection::new("ru", "en"), &storage)
            .unwrap();

        assert!(collection.rename(id, "Beasts", &storage).unwrap());
        assert!(collection.get_by_name("Beasts").is_some());
        assert!(collection.get_by_name("Animals").is_none());
    }
}
