use std::collections::HashSet;

/// Common function words ignored during keyword extraction
pub const STOP_WORDS: [&str; 58] = [
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "should", "could", "may", "might", "can", "i", "you",
    "he", "she", "it", "we", "they", "what", "which", "who", "when", "where", "why", "how", "my",
    "your", "his", "her", "its", "our", "their", "this", "that", "these", "those", "am", "to",
    "of", "in", "for", "on", "with", "as", "by", "at",
];

/// Tokens must be longer than this many characters to count as keywords
const MIN_TOKEN_CHARS: usize = 2;

pub type Keywords = HashSet<String>;

pub struct KeywordExtractor;

impl KeywordExtractor {
    /// Extract the set of meaningful keywords from `text`.
    ///
    /// Splits on whitespace and `, ; . ! ?`, so it accepts both normalized
    /// text and raw comma-separated keyword strings.
    #[must_use]
    pub fn extract(text: &str) -> Keywords {
        if text.is_empty() {
            return Keywords::new();
        }

        text.to_lowercase()
            .split(Self::is_separator)
            .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
            .filter(|token| !Self::is_stop_word(token))
            .map(str::to_string)
            .collect()
    }

    #[must_use]
    pub fn is_stop_word(token: &str) -> bool {
        STOP_WORDS.contains(&token)
    }

    fn is_separator(c: char) -> bool {
        c.is_whitespace() || matches!(c, ',' | ';' | '.' | '!' | '?')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> Keywords {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn drops_short_tokens_and_stop_words() {
        let keywords = KeywordExtractor::extract("my landlord won t return my deposit");
        assert_eq!(keywords, set(&["landlord", "won", "return", "deposit"]));
    }

    #[test]
    fn splits_raw_keyword_strings() {
        let keywords = KeywordExtractor::extract("Landlord,deposit; tenant.  rent!");
        assert_eq!(keywords, set(&["landlord", "deposit", "tenant", "rent"]));
    }

    #[test]
    fn all_stop_words_yield_empty_set() {
        assert!(KeywordExtractor::extract("what is the").is_empty());
        assert!(KeywordExtractor::extract("").is_empty());
        assert!(KeywordExtractor::extract("those were being").is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let keywords = KeywordExtractor::extract("refund refund REFUND");
        assert_eq!(keywords, set(&["refund"]));
    }

    #[test]
    fn stop_word_list_is_lowercase_and_unique() {
        let unique: HashSet<&str> = STOP_WORDS.iter().copied().collect();
        assert_eq!(unique.len(), STOP_WORDS.len());
        assert!(STOP_WORDS.iter().all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }
}
