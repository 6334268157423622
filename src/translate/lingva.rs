//! Lingva Translate API provider
//!
//! This module integrates with a Lingva Translate instance to provide real
//! translation and the supported-language catalog.
//!
//! # Endpoints
//!
//! - `GET {base}/{source}/{target}/{text}` → `{"translation": "..."}`
//! - `GET {base}/languages` → `{"languages": [{"code": "..", "name": ".."}]}`
//!
//! The default instance is `https://lingva.ml/api/v1`; self-hosted
//! instances can be targeted with [`LingvaProvider::with_base_url`].
//!
//! # Example
//!
//! ```ignore
//! use lingua_flow::translate::{Translator, LingvaProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = LingvaProvider::new()?;
//!     let result = provider.translate("кот", "ru", "en").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::language::{Language, fallback_languages};
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::translator::{Translator, normalize_language, validate_language};
use async_trait::async_trait;
use serde::Deserialize;

/// Default public Lingva instance
pub const DEFAULT_API_URL: &str = "https://lingva.ml/api/v1";

#[derive(Deserialize)]
struct TranslationBody {
    translation: String,
}

#[derive(Deserialize)]
struct LanguagesBody {
    languages: Vec<Language>,
}

/// Lingva Translate provider
///
/// Communicates with a Lingva instance over HTTPS. The provider is cheap
/// to clone; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct LingvaProvider {
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL of the Lingva API, without trailing slash
    base_url: reqwest::Url,
}

impl LingvaProvider {
    /// Maximum characters per request; Lingva routes the text as a URL
    /// path segment, so very long inputs are rejected up front.
    const MAX_CHARS_PER_REQUEST: usize = 7_500;

    /// Create a provider pointing at the default public instance
    pub fn new() -> TranslateResult<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a provider pointing at a specific Lingva instance
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base API URL, e.g. `https://lingva.ml/api/v1`
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(TranslateError)` - If the URL is unusable or HTTP client
    ///   creation fails
    pub fn with_base_url(base_url: &str) -> TranslateResult<Self> {
        let base_url = reqwest::Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| TranslateError::ConfigError(format!("Invalid API base URL: {}", e)))?;

        if base_url.cannot_be_a_base() {
            return Err(TranslateError::ConfigError(format!(
                "API base URL cannot carry path segments: {}",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, base_url })
    }

    /// Build an endpoint URL from path segments
    ///
    /// Segments are appended through the URL parser, so free-form text
    /// (spaces, slashes, non-ASCII) ends up percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> reqwest::Url {
        let mut url = self.base_url.clone();
        {
            // Checked at construction: the base URL can carry segments.
            let mut path = url.path_segments_mut().expect("base URL validated");
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    /// Fetch the list of supported languages from the instance
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Language>)` - Languages as reported by the service
    /// * `Err(TranslateError)` - On any network, status, or body failure
    pub async fn languages(&self) -> TranslateResult<Vec<Language>> {
        let url = self.endpoint(&["languages"]);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "Language catalog request returned {}",
                response.status()
            )));
        }

        let body: LanguagesBody = response.json().await.map_err(|e| {
            TranslateError::MalformedResponse(format!("Failed to parse language catalog: {}", e))
        })?;

        Ok(body.languages)
    }

    /// Fetch the language catalog, substituting the static fallback set
    /// on any failure
    ///
    /// The failure is logged and swallowed; callers always get a usable
    /// catalog.
    pub async fn languages_or_fallback(&self) -> Vec<Language> {
        match self.languages().await {
            Ok(languages) if !languages.is_empty() => languages,
            Ok(_) => {
                tracing::warn!("language catalog came back empty, using fallback set");
                fallback_languages()
            }
            Err(error) => {
                tracing::warn!(%error, "language catalog fetch failed, using fallback set");
                fallback_languages()
            }
        }
    }
}

#[async_trait]
impl Translator for LingvaProvider {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String> {
        validate_language(source_lang)?;
        validate_language(target_lang)?;

        if text.is_empty() {
            return Ok(String::new());
        }

        if text.len() > Self::MAX_CHARS_PER_REQUEST {
            return Err(TranslateError::ApiError(format!(
                "Text exceeds maximum length of {} bytes",
                Self::MAX_CHARS_PER_REQUEST
            )));
        }

        let url = self.endpoint(&[
            &normalize_language(source_lang),
            &normalize_language(target_lang),
            text,
        ]);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "Translation request returned {}",
                response.status()
            )));
        }

        let body: TranslationBody = response.json().await.map_err(|e| {
            TranslateError::MalformedResponse(format!("Failed to parse translation: {}", e))
        })?;

        Ok(body.translation)
    }

    fn provider_name(&self) -> &str {
        "Lingva Translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_default_instance() {
        let provider = LingvaProvider::new();
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().provider_name(), "Lingva Translate");
    }

    #[test]
    fn test_with_base_url_valid() {
        let provider = LingvaProvider::with_base_url("https://translate.example.org/api/v1");
        assert!(provider.is_ok());
    }

    #[test]
    fn test_with_base_url_invalid() {
        let result = LingvaProvider::with_base_url("not a url");
        match result {
            Err(TranslateError::ConfigError(msg)) => assert!(msg.contains("Invalid API base URL")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_with_base_url_cannot_be_a_base() {
        let result = LingvaProvider::with_base_url("mailto:someone@example.org");
        assert!(result.is_err());
    }

    // ========== Endpoint Building Tests ==========

    #[test]
    fn test_endpoint_simple_segments() {
        let provider = LingvaProvider::new().unwrap();
        let url = provider.endpoint(&["ru", "en", "кот"]);
        assert_eq!(
            url.as_str(),
            "https://lingva.ml/api/v1/ru/en/%D0%BA%D0%BE%D1%82"
        );
    }

    #[test]
    fn test_endpoint_encodes_spaces_and_slashes() {
        let provider = LingvaProvider::new().unwrap();
        let url = provider.endpoint(&["ru", "en", "кот и/пес"]);
        let path = url.path();
        // One segment: the separator characters must not split the path
        assert!(path.ends_with("%D0%BA%D0%BE%D1%82%20%D0%B8%2F%D0%BF%D0%B5%D1%81"));
    }

    #[test]
    fn test_endpoint_trailing_slash_stripped() {
        let provider = LingvaProvider::with_base_url("https://lingva.ml/api/v1/").unwrap();
        let url = provider.endpoint(&["languages"]);
        assert_eq!(url.as_str(), "https://lingva.ml/api/v1/languages");
    }

    // ========== Validation Tests ==========

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = LingvaProvider::new().unwrap();
        let result = provider.translate("", "ru", "en").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_translate_invalid_source_language() {
        let provider = LingvaProvider::new().unwrap();
        let result = provider.translate("кот", "invalid@code", "en").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_translate_invalid_target_language() {
        let provider = LingvaProvider::new().unwrap();
        let result = provider.translate("кот", "ru", "invalid#code").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = LingvaProvider::new().unwrap();
        let long_text = "x".repeat(LingvaProvider::MAX_CHARS_PER_REQUEST + 1);
        let result = provider.translate(&long_text, "ru", "en").await;
        match result {
            Err(TranslateError::ApiError(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected ApiError"),
        }
    }

    // ========== Integration Tests (require network access) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_single_translation() {
        let provider = LingvaProvider::new().unwrap();
        let result = provider.translate("Привет", "ru", "en").await.unwrap();
        println!("Translation: Привет → {}", result);
        assert!(!result.is_empty());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_language_catalog() {
        let provider = LingvaProvider::new().unwrap();
        let languages = provider.languages().await.unwrap();
        assert!(languages.iter().any(|l| l.code == "en"));
        assert!(languages.iter().any(|l| l.code == "ru"));
    }
}
