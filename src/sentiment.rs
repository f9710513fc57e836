use crate::tweet::Tweet;
use std::collections::HashMap;

/// Splits free text into words, dropping punctuation and digits.
///
/// Every ASCII punctuation or digit character is replaced with a space
/// before splitting, so `#winning` survives as `winning` while a bare
/// `:)` or `1` vanishes. Token order follows the input; no empty tokens
/// are produced. Case is left untouched.
pub fn extract_words(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| {
            if c.is_ascii_punctuation() || c.is_ascii_digit() {
                ' '
            } else {
                c
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// A fixed word → sentiment mapping.
///
/// Values lie in [-1, 1]; a missing word means "unknown", which is distinct
/// from a stored 0.0 (neutral).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentTable {
    values: HashMap<String, f64>,
}

impl SentimentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: HashMap<String, f64>) -> Self {
        Self { values }
    }

    /// Sentiment of a single word, or `None` if the word is unknown.
    pub fn get(&self, word: &str) -> Option<f64> {
        self.values.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Average sentiment of a tweet over its words with known sentiment.
///
/// Words absent from the table are excluded from the average, not counted
/// as 0. Returns `None` when no word is known; `None` means "unknown",
/// never neutral.
pub fn tweet_sentiment(tweet: &Tweet, table: &SentimentTable) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;

    for word in extract_words(tweet.text()) {
        if let Some(value) = table.get(&word) {
            sum += value;
            count += 1;
        }
    }

    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Position;

    fn table(entries: &[(&str, f64)]) -> SentimentTable {
        SentimentTable::from_values(
            entries
                .iter()
                .map(|&(w, v)| (w.to_string(), v))
                .collect(),
        )
    }

    fn tweet(text: &str) -> Tweet {
        Tweet::new(text, None, Position::new(0.0, 0.0))
    }

    #[test]
    fn extract_words_strips_repeated_punctuation() {
        assert_eq!(
            extract_words("anything else.....not my job"),
            vec!["anything", "else", "not", "my", "job"]
        );
    }

    #[test]
    fn extract_words_drops_digits_and_bare_punctuation() {
        assert_eq!(
            extract_words("make justin # 1 by tweeting #vma #justinbieber :)"),
            vec!["make", "justin", "by", "tweeting", "vma", "justinbieber"]
        );
    }

    #[test]
    fn extract_words_splits_contractions() {
        assert_eq!(
            extract_words("paperclips! they're so awesome, cool, & useful!"),
            vec!["paperclips", "they", "re", "so", "awesome", "cool", "useful"]
        );
    }

    #[test]
    fn extract_words_never_emits_empty_tokens() {
        for text in ["", "   ", "...", "#1 2 3!", "a..b"] {
            assert!(extract_words(text).iter().all(|w| !w.is_empty()));
        }
    }

    #[test]
    fn extract_words_is_idempotent() {
        let once = extract_words("i love my job. #winning");
        let again = extract_words(&once.join(" "));
        assert_eq!(once, again);
    }

    #[test]
    fn unknown_word_is_none_not_zero() {
        let t = table(&[("good", 0.875)]);
        assert_eq!(t.get("good"), Some(0.875));
        assert_eq!(t.get("berkeley"), None);
    }

    #[test]
    fn sentiment_averages_only_known_words() {
        // i/my/job unknown; love and winning known.
        let t = table(&[("love", 0.5), ("winning", 0.5), ("job", 0.0)]);
        let s = tweet_sentiment(&tweet("i love my job. #winning"), &t).unwrap();
        assert!((s - (0.5 + 0.5 + 0.0) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sentiment_can_be_negative() {
        let t = table(&[("hate", -0.5), ("job", 0.0)]);
        let s = tweet_sentiment(&tweet("thinking, 'i hate my job'"), &t).unwrap();
        assert!((s - (-0.25)).abs() < 1e-12);
    }

    #[test]
    fn sentiment_is_none_when_no_word_is_known() {
        let t = table(&[("love", 0.5)]);
        assert_eq!(tweet_sentiment(&tweet("go bears!"), &t), None);
    }

    #[test]
    fn stored_zero_still_counts_as_known() {
        let t = table(&[("job", 0.0)]);
        assert_eq!(tweet_sentiment(&tweet("my job"), &t), Some(0.0));
    }
}
