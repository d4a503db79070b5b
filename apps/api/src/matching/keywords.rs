//! Keyword extraction: tokenize, lowercase, drop non-alphabetic tokens and
//! stop words, collapse duplicates.

use std::collections::btree_set::{self, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::matching::stopwords::StopwordList;
use crate::matching::tokenizer::{Tokenizer, UnicodeWordTokenizer};

/// A set of normalized keywords. Ordered, so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(BTreeSet<String>);

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.0.iter()
    }

    /// Keywords present in both sets.
    pub fn intersection(&self, other: &KeywordSet) -> KeywordSet {
        self.0.intersection(&other.0).cloned().collect()
    }

    /// Keywords in `self` that are absent from `other`.
    pub fn difference(&self, other: &KeywordSet) -> KeywordSet {
        self.0.difference(&other.0).cloned().collect()
    }

    pub fn is_subset(&self, other: &KeywordSet) -> bool {
        self.0.is_subset(&other.0)
    }
}

impl FromIterator<String> for KeywordSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        KeywordSet(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for KeywordSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        KeywordSet(iter.into_iter().map(str::to_string).collect())
    }
}

impl IntoIterator for KeywordSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Turns plain text into a `KeywordSet`.
///
/// Tokenizer and stop words are injected so the same text always yields the
/// same set without any process-wide setup.
#[derive(Clone)]
pub struct KeywordExtractor {
    tokenizer: Arc<dyn Tokenizer>,
    stopwords: StopwordList,
}

impl KeywordExtractor {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, stopwords: StopwordList) -> Self {
        Self {
            tokenizer,
            stopwords,
        }
    }

    /// Unicode word tokenizer with the built-in English stop words.
    pub fn english() -> Self {
        Self::new(Arc::new(UnicodeWordTokenizer), StopwordList::english())
    }

    pub fn keywords(&self, text: &str) -> KeywordSet {
        self.tokenizer
            .tokens(text)
            .map(str::to_lowercase)
            .filter(|token| self.is_keyword(token))
            .collect()
    }

    /// True for an already-lowercased token made only of letters that is not a stop word.
    fn is_keyword(&self, token: &str) -> bool {
        !token.is_empty()
            && token.chars().all(char::is_alphabetic)
            && !self.stopwords.contains(token)
    }
}

impl std::fmt::Debug for KeywordExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordExtractor")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}
