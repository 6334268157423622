/// Translation Gateway Module
///
/// This module provides the translation gateway for lingua-flow: a thin,
/// uniform interface over a remote translation HTTP API.
///
/// # Overview
///
/// The gateway consists of a few components working together:
///
/// 1. **Translator Trait** - Generic trait for translation backends
/// 2. **Lingva Provider** - HTTP client for a Lingva Translate instance,
///    including the supported-language catalog with a static fallback
/// 3. **Mock Translator** - Deterministic, network-free backend for tests
///    and offline runs
///
/// Callers see a single success/failure outcome per request: rate limits,
/// network errors, and malformed bodies are all `TranslateError` values,
/// and the controller folds them into one user-visible failure state.
pub mod error;
pub mod lingva;
pub mod mock;
pub mod translator;

pub use error::{TranslateError, TranslateResult};
pub use lingva::{DEFAULT_API_URL, LingvaProvider};
pub use mock::{MockMode, MockTranslator};
pub use translator::{Translator, normalize_language, validate_language};
