//! Mock translator for testing
//!
//! This module provides a deterministic, network-free translator for
//! exercising the controller and the CLI without a live Lingva instance.
//!
//! # Example
//!
//! ```ignore
//! use lingua_flow::translate::{Translator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("кот", "ru", "en").await.unwrap();
//!     assert_eq!(result, "кот_en");
//! }
//! ```

use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::translator::Translator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target language code: "кот" → "кот_en"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target language) → translation; unknown pairs fall back
    /// to suffix mode
    Mappings(HashMap<(String, String), String>),

    /// Simulate a failed request
    Error(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation outcomes
///
/// Every call is counted, so tests can assert how many requests actually
/// reached the "network".
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// # Arguments
    ///
    /// * `mode` - The translation mode
    /// * `delay_ms` - Simulated delay in milliseconds
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of translate calls this mock has served
    ///
    /// Clones share the counter.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn apply_translation(&self, text: &str, _source: &str, target: &str) -> TranslateResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(TranslateError::ApiError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.apply_translation(text, source_lang, target_lang)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
