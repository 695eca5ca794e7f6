//! Static part-of-speech classifier.

use vocab_core::{PartOfSpeech, PartOfSpeechClassifier};

const NOUNS: &[&str] = &["book", "house", "car", "tree", "dog", "cat", "water", "food"];
const VERBS: &[&str] = &["run", "jump", "eat", "sleep", "write", "read", "drive", "swim"];
const ADJECTIVES: &[&str] = &["big", "small", "fast", "slow", "good", "bad", "hot", "cold"];
const ADVERBS: &[&str] = &[
    "quickly", "slowly", "well", "badly", "very", "really", "always", "never",
];

/// Classifier over fixed membership lists, checked in label order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPosClassifier;

impl StaticPosClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl PartOfSpeechClassifier for StaticPosClassifier {
    fn classify(&self, word: &str) -> Option<PartOfSpeech> {
        let word = word.trim().to_lowercase();
        [
            (PartOfSpeech::Noun, NOUNS),
            (PartOfSpeech::Verb, VERBS),
            (PartOfSpeech::Adjective, ADJECTIVES),
            (PartOfSpeech::Adverb, ADVERBS),
        ]
        .into_iter()
        .find(|(_, list)| list.contains(&word.as_str()))
        .map(|(label, _)| label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_each_list() {
        let c = StaticPosClassifier::new();
        assert_eq!(c.classify("dog"), Some(PartOfSpeech::Noun));
        assert_eq!(c.classify("swim"), Some(PartOfSpeech::Verb));
        assert_eq!(c.classify("cold"), Some(PartOfSpeech::Adjective));
        assert_eq!(c.classify("never"), Some(PartOfSpeech::Adverb));
    }

    #[test]
    fn test_case_insensitive_and_unknown() {
        let c = StaticPosClassifier::new();
        assert_eq!(c.classify("Book"), Some(PartOfSpeech::Noun));
        assert_eq!(c.classify("xylophone"), None);
        assert_eq!(c.classify(""), None);
    }
}
