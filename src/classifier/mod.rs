//! Text classification over article titles and descriptions.
//!
//! Pure functions: money-mention detection and search-phrase counting.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::{GrabError, Result};

/// `$` followed by digits, with optional thousands and decimal separators.
static CURRENCY_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\d[\d,]*(?:\.\d+)?").expect("valid currency regex"));

/// A number followed by "dollars" or "USD", any case. The number may be glued
/// to preceding letters, as in "US50 dollars".
static DOLLAR_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d[\d,]*(?:\.\d+)?\s*(?:dollars|usd)\b").expect("valid dollar regex")
});

/// Returns true if a currency amount appears in the title or description.
pub fn contains_money_mention(title: &str, description: &str) -> bool {
    [title, description]
        .iter()
        .any(|text| CURRENCY_AMOUNT.is_match(text) || DOLLAR_WORDS.is_match(text))
}

/// Case-insensitive, non-overlapping count of `phrase` in title plus description.
///
/// The phrase is matched as given, surrounding whitespace included. A blank
/// phrase is a configuration error.
pub fn count_search_phrase(title: &str, description: &str, phrase: &str) -> Result<usize> {
    if phrase.trim().is_empty() {
        return Err(GrabError::Config("search phrase must not be empty".into()));
    }

    let needle = phrase.to_lowercase();
    Ok(occurrences(title, &needle) + occurrences(description, &needle))
}

fn occurrences(haystack: &str, needle: &str) -> usize {
    haystack.to_lowercase().matches(needle).count()
}

/// Classification of one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub money_mentioned: bool,
    pub search_phrase_count: usize,
}

/// Classifier bound to a validated search phrase.
#[derive(Debug, Clone)]
pub struct TextClassifier {
    phrase: String,
}

impl TextClassifier {
    pub fn new(phrase: &str) -> Result<Self> {
        // Validate once so classify() can't fail later
        count_search_phrase("", "", phrase)?;
        Ok(Self {
            phrase: phrase.to_lowercase(),
        })
    }

    pub fn classify(&self, title: &str, description: &str) -> Classification {
        Classification {
            money_mentioned: contains_money_mention(title, description),
            search_phrase_count: occurrences(title, &self.phrase)
                + occurrences(description, &self.phrase),
        }
    }
}
