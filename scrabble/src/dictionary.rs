//! Word validation.

use std::collections::{HashMap, HashSet};

/// Something that can say whether a word is playable. Kept as a trait so
/// the server can choose an implementation (a real word list, or a
/// permissive stand-in for tests) without this crate touching the
/// filesystem.
///
/// `word` may contain `?` wildcards (one per joker in the play); a
/// wildcard matches any single letter at that position.
pub trait Dictionary: Send + Sync {
    /// Whether `word` (already uppercase, possibly containing `?`
    /// wildcards) is a valid scrabble word.
    fn is_valid(&self, word: &str) -> bool;
}

/// A dictionary backed by an explicit set of words, case-insensitively
/// normalized to uppercase at construction. Words are also bucketed by
/// length to answer wildcard queries (from a joker's `?`) without scanning
/// the whole set.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
    by_length: HashMap<usize, Vec<String>>,
}
impl WordList {
    /// Builds a word list from an iterator of words.
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let words: HashSet<String> = words.into_iter().map(|w| w.into().to_uppercase()).collect();

        let mut by_length: HashMap<usize, Vec<String>> = HashMap::new();
        for word in &words {
            by_length.entry(word.chars().count()).or_default().push(word.clone());
        }

        Self { words, by_length }
    }
    /// The number of distinct words in the list.
    pub fn len(&self) -> usize {
        self.words.len()
    }
    /// Whether the list has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
impl Dictionary for WordList {
    fn is_valid(&self, word: &str) -> bool {
        if !word.contains('?') {
            return self.words.contains(word);
        }

        let len = word.chars().count();
        self.by_length
            .get(&len)
            .into_iter()
            .flatten()
            .any(|candidate| matches_wildcard(word, candidate))
    }
}

fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    pattern.chars().zip(candidate.chars()).all(|(p, c)| p == '?' || p == c)
}

/// A dictionary that accepts every word of two letters or more, useful for
/// tests that don't care about word validity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveDictionary;
impl Dictionary for PermissiveDictionary {
    fn is_valid(&self, word: &str) -> bool {
        word.chars().count() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_normalizes_case() {
        let dict = WordList::new(["cat", "DOG"]);
        assert!(dict.is_valid("CAT"));
        assert!(dict.is_valid("DOG"));
        assert!(!dict.is_valid("cat"));
    }

    #[test]
    fn word_list_matches_wildcard_query() {
        let dict = WordList::new(["hello"]);
        assert!(dict.is_valid("HELL?"));
        assert!(!dict.is_valid("HXLL?"));
        assert!(!dict.is_valid("HELLO?"));
    }

    #[test]
    fn permissive_rejects_single_letters() {
        let dict = PermissiveDictionary;
        assert!(!dict.is_valid("A"));
        assert!(dict.is_valid("AT"));
    }
}
