pub mod controller;
pub mod dictionary;
pub mod history;
pub mod language;
pub mod practice;
pub mod store;
pub mod translate;

// Re-export the main types for convenient access
pub use controller::{
    DEFAULT_DEBOUNCE, OutputState, TRANSLATION_FAILED_MESSAGE, TranslationController,
};
pub use dictionary::{DEFAULT_DICTIONARY_NAME, Dictionary, DictionaryCollection, WordPair};
pub use history::{DEFAULT_HISTORY_CAP, HistoryEntry, TranslationHistory};
pub use language::{Language, TranslationDirection, fallback_languages};
pub use practice::{PracticeDirection, PracticeSession};
pub use store::{DICTIONARIES_KEY, HISTORY_KEY, Storage, StoreError, StoreResult};
pub use translate::{
    DEFAULT_API_URL, LingvaProvider, MockMode, MockTranslator, TranslateError, TranslateResult,
    Translator,
};
