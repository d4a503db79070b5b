//! Word tokenization for keyword extraction.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into word-like units. Tokens are borrowed from the input and
/// produced lazily; normalization is left to the caller.
pub trait Tokenizer: Send + Sync {
    fn tokens<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// English clitics split off the end of a word, in both apostrophe forms.
const CLITICS: &[&str] = &[
    "n't", "n\u{2019}t", "'s", "\u{2019}s", "'re", "\u{2019}re", "'ll", "\u{2019}ll", "'ve",
    "\u{2019}ve", "'d", "\u{2019}d", "'m", "\u{2019}m",
];

/// Tokenizer following Unicode word boundaries (UAX #29).
///
/// Punctuation and whitespace never appear in a token. "full-stack" yields
/// "full" and "stack". A trailing clitic becomes its own token, so "Google's"
/// yields "Google" and "'s" and "don't" yields "do" and "n't". Email addresses
/// and URLs are skipped whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokens<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(
            text.split_whitespace()
                .filter(|chunk| !is_email_or_url(chunk))
                .flat_map(|chunk| chunk.unicode_words())
                .flat_map(|word| {
                    let (stem, clitic) = split_clitic(word);
                    std::iter::once(stem).chain(clitic)
                }),
        )
    }
}

fn is_email_or_url(chunk: &str) -> bool {
    chunk.contains('@') || chunk.contains("://")
}

/// Splits a trailing clitic off `word`. The stem is never empty.
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    for clitic in CLITICS {
        let start = match word.len().checked_sub(clitic.len()) {
            Some(start) if start > 0 => start,
            _ => continue,
        };
        if let Some(tail) = word.get(start..) {
            if tail.eq_ignore_ascii_case(clitic) {
                return (&word[..start], Some(tail));
            }
        }
    }
    (word, None)
}
