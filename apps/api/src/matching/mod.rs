// Keyword Comparator
// Tokenization, normalization, stopword filtering, set arithmetic and scoring.
// Pure functions only: no I/O, no shared mutable state.

pub mod comparator;
pub mod keywords;
pub mod stopwords;
pub mod tokenizer;

pub use comparator::{ComparisonResult, KeywordComparator};
pub use keywords::{KeywordExtractor, KeywordSet};
pub use stopwords::StopwordList;
pub use tokenizer::{Tokenizer, UnicodeWordTokenizer};
