//! Language reference data and translation direction.

use serde::{Deserialize, Serialize};

/// A supported language, as reported by the translation service catalog.
///
/// Reference data; unique by `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: &str, name: &str) -> Self {
        Language {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// An ordered source → target language pair.
///
/// Always a single value: [`swap`](TranslationDirection::swap) exchanges
/// both sides in one step, so no observer can see `from` and `to` refer
/// to the same language mid-update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationDirection {
    pub from: String,
    pub to: String,
}

impl TranslationDirection {
    pub fn new(from: &str, to: &str) -> Self {
        TranslationDirection {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// The same pair with source and target exchanged.
    pub fn swapped(&self) -> Self {
        TranslationDirection {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }

    /// Exchange source and target in place.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

impl Default for TranslationDirection {
    fn default() -> Self {
        TranslationDirection::new("ru", "en")
    }
}

impl std::fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.from, self.to)
    }
}

/// Static catalog used when the language list cannot be fetched.
pub fn fallback_languages() -> Vec<Language> {
    vec![
        Language::new("en", "English"),
        Language::new("ru", "Russian"),
        Language::new("es", "Spanish"),
        Language::new("fr", "French"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_exchanges_both_sides() {
        let direction = TranslationDirection::new("ru", "en");
        let swapped = direction.swapped();
        assert_eq!(swapped, TranslationDirection::new("en", "ru"));
        // Original untouched
        assert_eq!(direction, TranslationDirection::new("ru", "en"));
    }

    #[test]
    fn test_swap_in_place_roundtrip() {
        let mut direction = TranslationDirection::new("ru", "en");
        direction.swap();
        assert_eq!(direction, TranslationDirection::new("en", "ru"));
        direction.swap();
        assert_eq!(direction, TranslationDirection::new("ru", "en"));
    }

    #[test]
    fn test_default_direction() {
        assert_eq!(TranslationDirection::default(), TranslationDirection::new("ru", "en"));
    }

    #[test]
    fn test_fallback_languages_cover_required_codes() {
        let languages = fallback_languages();
        for required in ["en", "ru", "es", "fr"] {
            assert!(
                languages.iter().any(|l| l.code == required),
                "missing {}",
                required
            );
        }
    }

    #[test]
    fn test_direction_serialization_roundtrip() {
        let direction = TranslationDirection::new("ru", "en");
        let json = serde_json::to_string(&direction).unwrap();
        let back: TranslationDirection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, direction);
    }
}
