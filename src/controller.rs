//! Debounced translation controller.
//!
//! Turns free-form keystroke input into a minimal, race-free sequence of
//! translation requests. Each input or direction change bumps a sequence
//! counter and arms a debounce cycle; only the cycle still holding the
//! latest sequence when its timer fires issues a request, and only a
//! response tagged with the latest sequence is committed. Late responses
//! to superseded requests are discarded unconditionally — they touch
//! neither the output nor the history.
//!
//! The sequence counter is owned by the controller instance; overlapping
//! controllers never observe each other.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lingua_flow::controller::{OutputState, TranslationController};
//! use lingua_flow::language::TranslationDirection;
//! use lingua_flow::translate::LingvaProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(LingvaProvider::new()?);
//!     let controller = TranslationController::new(provider, TranslationDirection::new("ru", "en"));
//!     let mut output = controller.subscribe();
//!
//!     controller.set_input("кот").await;
//!     while output.changed().await.is_ok() {
//!         if let OutputState::Translated(text) = &*output.borrow() {
//!             println!("{}", text);
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

use crate::history::{DEFAULT_HISTORY_CAP, HistoryEntry, TranslationHistory};
use crate::language::TranslationDirection;
use crate::translate::Translator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};

/// Default pause after the last keystroke before a request is issued
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// User-visible text for any translation failure. The service is free and
/// rate limits aggressively, so the message tells the user to wait rather
/// than hammer retry.
pub const TRANSLATION_FAILED_MESSAGE: &str =
    "Translation failed — the service may be rate limiting requests. Wait a few seconds and edit the text to retry.";

/// What the output side of the translator currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputState {
    /// No input, nothing to show
    #[default]
    Empty,
    /// A request is in flight
    Loading,
    /// Last committed translation
    Translated(String),
    /// Last request failed; carries the user-visible message
    Failed(String),
}

struct ControllerState {
    input: String,
    direction: TranslationDirection,
    latest_sequence: u64,
    history: TranslationHistory,
    closed: bool,
    output_tx: watch::Sender<OutputState>,
}

impl ControllerState {
    fn set_output(&mut self, output: OutputState) {
        self.output_tx.send_replace(output);
    }
}

/// Owns input text, translation direction, and the request lifecycle.
///
/// Requires a tokio runtime: debounce cycles run as spawned tasks.
pub struct TranslationController {
    state: Arc<Mutex<ControllerState>>,
    translator: Arc<dyn Translator>,
    debounce: Duration,
    output_rx: watch::Receiver<OutputState>,
}

impl TranslationController {
    /// Create a controller with the default debounce delay and history cap.
    pub fn new(translator: Arc<dyn Translator>, direction: TranslationDirection) -> Self {
        Self::with_settings(translator, direction, DEFAULT_DEBOUNCE, DEFAULT_HISTORY_CAP)
    }

    /// Create a controller with explicit debounce delay and history cap.
    pub fn with_settings(
        translator: Arc<dyn Translator>,
        direction: TranslationDirection,
        debounce: Duration,
        history_cap: usize,
    ) -> Self {
        let (output_tx, output_rx) = watch::channel(OutputState::Empty);
        TranslationController {
            state: Arc::new(Mutex::new(ControllerState {
                input: String::new(),
                direction,
                latest_sequence: 0,
                history: TranslationHistory::new(history_cap),
                closed: false,
                output_tx,
            })),
            translator,
            debounce,
            output_rx,
        }
    }

    /// Replace the input text and re-arm the debounce cycle.
    ///
    /// Empty or whitespace-only input short-circuits: the output clears
    /// and no request is issued. Re-setting the identical text is a no-op
    /// and does not reset a pending cycle.
    pub async fn set_input(&self, text: &str) {
        let mut state = self.state.lock().await;
        if state.closed || state.input == text {
            return;
        }
        state.input = text.to_string();
        state.latest_sequence += 1;

        if text.trim().is_empty() {
            state.set_output(OutputState::Empty);
            return;
        }

        let sequence = state.latest_sequence;
        drop(state);
        self.arm(sequence);
    }

    /// Replace the direction (one atomic update of the pair) and re-arm
    /// the debounce cycle, exactly like a text change.
    pub async fn set_direction(&self, direction: TranslationDirection) {
        let mut state = self.state.lock().await;
        if state.closed {
            return;
        }
        state.direction = direction;
        state.latest_sequence += 1;

        if state.input.trim().is_empty() {
            return;
        }

        let sequence = state.latest_sequence;
        drop(state);
        self.arm(sequence);
    }

    /// Exchange source and target as a single update, issuing at most one
    /// new request.
    pub async fn swap_direction(&self) {
        let mut state = self.state.lock().await;
        if state.closed {
            return;
        }
        state.direction.swap();
        state.latest_sequence += 1;

        if state.input.trim().is_empty() {
            return;
        }

        let sequence = state.latest_sequence;
        drop(state);
        self.arm(sequence);
    }

    /// Spawn the debounce cycle for `sequence`.
    ///
    /// A superseded cycle wakes, observes a newer sequence, and returns
    /// without a request; a superseded response is discarded at commit.
    fn arm(&self, sequence: u64) {
        let state = Arc::clone(&self.state);
        let translator = Arc::clone(&self.translator);
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let request = {
                let mut s = state.lock().await;
                if s.closed || s.latest_sequence != sequence {
                    None
                } else {
                    s.set_output(OutputState::Loading);
                    Some((s.input.clone(), s.direction.clone()))
                }
            };
            let Some((text, direction)) = request else {
                return;
            };

            tracing::debug!(sequence, %direction, "issuing translation request");
            let result = translator
                .translate(&text, &direction.from, &direction.to)
                .await;

            let mut s = state.lock().await;
            if s.closed || s.latest_sequence != sequence {
                tracing::debug!(sequence, "discarding stale translation response");
                return;
            }
            match result {
                Ok(translation) => {
                    s.history.record(&text, &translation, &direction);
                    s.set_output(OutputState::Translated(translation));
                }
                Err(error) => {
                    tracing::debug!(sequence, %error, "translation request failed");
                    s.set_output(OutputState::Failed(TRANSLATION_FAILED_MESSAGE.to_string()));
                }
            }
        });
    }

    /// Current output snapshot.
    pub fn output(&self) -> OutputState {
        self.output_rx.borrow().clone()
    }

    /// Watch receiver for output changes, for display loops.
    pub fn subscribe(&self) -> watch::Receiver<OutputState> {
        self.output_rx.clone()
    }

    pub async fn input(&self) -> String {
        self.state.lock().await.input.clone()
    }

    pub async fn direction(&self) -> TranslationDirection {
        self.state.lock().await.direction.clone()
    }

    /// Snapshot of the history log, newest first.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.history.entries().to_vec()
    }

    /// Seed the history log from persisted entries (read once at mount).
    pub async fn preload_history(&self, entries: Vec<HistoryEntry>) {
        let mut state = self.state.lock().await;
        let cap = state.history.cap();
        state.history = TranslationHistory::from_entries(entries, cap);
    }

    /// Invalidate every pending timer and in-flight result. After close,
    /// nothing fires into a torn-down consumer.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.closed = true;
        state.latest_sequence += 1;
    }
}
