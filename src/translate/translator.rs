//! Translation trait and language-code utilities
//!
//! This module defines the `Translator` trait for provider abstraction,
//! enabling support for different translation backends (Lingva, mock, etc.)
//! without coupling the library to any specific implementation.
//!
//! # Example
//!
//! ```ignore
//! use lingua_flow::translate::{Translator, LingvaProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = LingvaProvider::new()?;
//!     let result = provider.translate("Hello, world!", "en", "fr").await?;
//!     println!("{}", result); // "Bonjour, le monde!"
//!     Ok(())
//! }
//! ```

use crate::translate::error::{TranslateError, TranslateResult};
use async_trait::async_trait;

/// Generic trait for translation providers
///
/// Implementations of this trait handle the actual translation work,
/// whether through an HTTP API (Lingva) or deterministic logic (Mock).
///
/// The method is async to support I/O-bound operations like network requests.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single text string from source to target language
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_lang` - Source language code (e.g., "en", "en-US")
    /// * `target_lang` - Target language code (e.g., "fr", "fr-FR")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(TranslateError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String>;

    /// Get the name of this translation provider
    ///
    /// Used for logging and debugging to identify which provider handled
    /// a translation.
    fn provider_name(&self) -> &str;
}

/// Normalize a language code by stripping region information
///
/// Converts codes from BCP 47 format to ISO 639-1 format:
/// - `en-US` → `en`
/// - `zh-Hans` → `zh`
/// - `en` → `en` (unchanged)
pub fn normalize_language(code: &str) -> String {
    code.split('-').next().unwrap_or(code).to_lowercase()
}

/// Validate that a language code is in acceptable format
///
/// Checks that the code is non-empty and contains only alphanumeric
/// characters, hyphens, and underscores (following ISO 639 conventions).
pub fn validate_language(code: &str) -> TranslateResult<()> {
    if code.is_empty() {
        return Err(TranslateError::InvalidLanguage(
            "Language code is empty".to_string(),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TranslateError::InvalidLanguage(format!(
            "Invalid characters in language code: {}",
            code
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_language_with_region() {
        assert_eq!(normalize_language("en-US"), "en");
        assert_eq!(normalize_language("en-GB"), "en");
        assert_eq!(normalize_language("fr-FR"), "fr");
    }

    #[test]
    fn test_normalize_language_with_script() {
        assert_eq!(normalize_language("zh-Hans"), "zh");
        assert_eq!(normalize_language("sr-Latn"), "sr");
    }

    #[test]
    fn test_normalize_language_already_simple() {
        assert_eq!(normalize_language("en"), "en");
        assert_eq!(normalize_language("ru"), "ru");
    }

    #[test]
    fn test_normalize_language_case_insensitive() {
        assert_eq!(normalize_language("EN"), "en");
        assert_eq!(normalize_language("EN-US"), "en");
    }

    #[test]
    fn test_validate_language_valid_codes() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("en-US").is_ok());
        assert!(validate_language("zh-Hans").is_ok());
        assert!(validate_language("de_DE").is_ok());
    }

    #[test]
    fn test_validate_language_invalid_codes() {
        assert!(validate_language("").is_err());
        assert!(validate_language("en@invalid").is_err());
        assert!(validate_language("fr#bad").is_err());
    }

    #[test]
    fn test_validate_language_error_message() {
        match validate_language("en@US") {
            Err(TranslateError::InvalidLanguage(msg)) => {
                assert!(msg.contains("Invalid characters"));
            }
            _ => panic!("Expected InvalidLanguage error"),
        }
    }
}
