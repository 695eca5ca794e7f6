//! # vocab-lookup
//!
//! Pluggable lookup backends for the vocab backend.
//!
//! - [`DictionaryTranslator`]: fixed demo dictionary for es/fr/de with a
//!   bracketed placeholder for everything else
//! - [`StaticPosClassifier`]: closed membership lists for four labels
//! - [`mock::MockTranslator`]: scripted translator for tests

pub mod dictionary;
pub mod mock;
pub mod pos;

pub use dictionary::DictionaryTranslator;
pub use pos::StaticPosClassifier;

// Re-export the capability traits so backends can be used without vocab-core
pub use vocab_core::{placeholder_translation, PartOfSpeechClassifier, Translator};
