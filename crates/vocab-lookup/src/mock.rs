//! Mock translator for deterministic testing.
//!
//! ## Usage
//!
//! ```rust
//! use vocab_lookup::mock::MockTranslator;
//! use vocab_lookup::Translator;
//!
//! # async fn demo() {
//! let translator = MockTranslator::new().with_response("cat", "gato");
//! assert_eq!(translator.translate("cat", "es").await.unwrap(), "gato");
//! assert_eq!(translator.calls().len(), 1);
//! # }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use vocab_core::{placeholder_translation, Error, Result, Translator};

/// Scripted translator: fixed responses, optional latency, optional failure.
#[derive(Debug, Clone, Default)]
pub struct MockTranslator {
    responses: Arc<HashMap<String, String>>,
    latency: Option<Duration>,
    fail: bool,
    call_log: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `word` (any language) with `translation`.
    pub fn with_response(mut self, word: impl Into<String>, translation: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.responses).insert(word.into(), translation.into());
        self
    }

    /// Sleep before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every call.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// `(word, language)` pairs seen so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.call_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, word: &str, language: &str) -> Result<String> {
        self.call_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((word.to_string(), language.to_string()));

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail {
            return Err(Error::Translation(format!("mock failure for '{}'", word)));
        }
        Ok(self
            .responses
            .get(word)
            .cloned()
            .unwrap_or_else(|| placeholder_translation(word, language)))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_response_and_fallback() {
        let t = MockTranslator::new().with_response("cat", "gato");
        assert_eq!(t.translate("cat", "es").await.unwrap(), "gato");
        assert_eq!(t.translate("dog", "es").await.unwrap(), "[dog in es]");
        assert_eq!(t.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_translator_errors() {
        let t = MockTranslator::new().failing();
        assert!(matches!(
            t.translate("cat", "es").await,
            Err(Error::Translation(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let t = MockTranslator::new().with_latency(Duration::from_secs(5));
        let start = tokio::time::Instant::now();
        t.translate("cat", "es").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
    }
}
