//! Demo dictionary translator.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use vocab_core::{placeholder_translation, Result, Translator};

const SPANISH: &[(&str, &str)] = &[
    ("hello", "hola"),
    ("world", "mundo"),
    ("book", "libro"),
    ("house", "casa"),
    ("car", "coche"),
    ("tree", "árbol"),
    ("dog", "perro"),
    ("cat", "gato"),
    ("water", "agua"),
    ("food", "comida"),
];

const FRENCH: &[(&str, &str)] = &[
    ("hello", "bonjour"),
    ("world", "monde"),
    ("book", "livre"),
    ("house", "maison"),
    ("car", "voiture"),
    ("tree", "arbre"),
    ("dog", "chien"),
    ("cat", "chat"),
    ("water", "eau"),
    ("food", "nourriture"),
];

const GERMAN: &[(&str, &str)] = &[
    ("hello", "hallo"),
    ("world", "welt"),
    ("book", "buch"),
    ("house", "haus"),
    ("car", "auto"),
    ("tree", "baum"),
    ("dog", "hund"),
    ("cat", "katze"),
    ("water", "wasser"),
    ("food", "essen"),
];

/// Translator backed by a small in-process dictionary.
///
/// Lookups fold the word and language to lowercase. Misses never fail: they
/// return the `[<word> in <lang>]` placeholder with the word as given.
#[derive(Debug, Clone)]
pub struct DictionaryTranslator {
    entries: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for DictionaryTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryTranslator {
    pub fn new() -> Self {
        let entries = [("es", SPANISH), ("fr", FRENCH), ("de", GERMAN)]
            .into_iter()
            .map(|(lang, pairs)| (lang, pairs.iter().copied().collect::<HashMap<_, _>>()))
            .collect();
        Self { entries }
    }

    /// Synchronous lookup; `None` on a miss.
    pub fn lookup(&self, word: &str, language: &str) -> Option<&'static str> {
        let language = language.trim().to_lowercase();
        let word = word.trim().to_lowercase();
        self.entries
            .get(language.as_str())
            .and_then(|table| table.get(word.as_str()))
            .copied()
    }

    /// Languages the dictionary has entries for.
    pub fn languages(&self) -> Vec<&'static str> {
        let mut langs: Vec<_> = self.entries.keys().copied().collect();
        langs.sort_unstable();
        langs
    }
}

#[async_trait]
impl Translator for DictionaryTranslator {
    async fn translate(&self, word: &str, language: &str) -> Result<String> {
        match self.lookup(word, language) {
            Some(translation) => Ok(translation.to_string()),
            None => {
                debug!(
                    subsystem = "lookup",
                    component = "dictionary",
                    word,
                    language,
                    "Translation not found, using placeholder"
                );
                Ok(placeholder_translation(word, language))
            }
        }
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}
