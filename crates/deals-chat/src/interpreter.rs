//! Free-text query interpreter.
//!
//! Turns a shopping request such as "Samsung phones under 3000 Dhs" into a
//! [`QueryIntent`]: price bounds, preference flags and leftover keywords.
//! Extraction is table-driven and never fails; anything that does not match
//! simply leaves its field unset.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::QueryIntent;

// =============================================================================
// Pattern tables (compiled once, reused across calls)
// =============================================================================

/// Intent field filled by a price-bound pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundField {
    MaxPrice,
    MinPrice,
}

struct BoundPattern {
    regex: Regex,
    field: BoundField,
}

/// Price bounds. Capture group 1 is the amount, ASCII digits only.
static BOUND_PATTERNS: LazyLock<Vec<BoundPattern>> = LazyLock::new(|| {
    [
        (r"under\s*([0-9]+)", BoundField::MaxPrice),
        (r"(?:above|over)\s*([0-9]+)", BoundField::MinPrice),
    ]
    .into_iter()
    .map(|(pat, field)| BoundPattern {
        regex: Regex::new(pat).expect("Invalid price-bound regex"),
        field,
    })
    .collect()
});

/// Price phrases removed before keyword extraction. "over N" is not among
/// them and stays in the keywords.
static STRIPPED_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"under\s*[0-9]+", r"above\s*[0-9]+"]
        .into_iter()
        .map(|pat| Regex::new(pat).expect("Invalid price-phrase regex"))
        .collect()
});

/// Intent flag set by substring triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagField {
    Discount,
    Budget,
    Top,
}

static FLAG_TRIGGERS: &[(FlagField, &[&str])] = &[
    (FlagField::Discount, &["discount", "sale", "deal"]),
    (FlagField::Budget, &["cheap", "budget", "affordable"]),
    (FlagField::Top, &["best", "top"]),
];

static STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "show", "find", "get", "best", "good",
];

/// Tokens must be longer than this to count as keywords.
const MIN_KEYWORD_LEN: usize = 2;

// =============================================================================
// QueryInterpreter
// =============================================================================

/// Rule-based interpreter for shopping requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryInterpreter;

impl QueryInterpreter {
    pub fn new() -> Self {
        Self
    }

    /// Extract `(max_price, min_price)` from lower-cased text.
    ///
    /// Each bound comes from the first match of its pattern. Amounts too
    /// large for `u64` are ignored.
    pub fn extract_bounds(&self, lower: &str) -> (Option<u64>, Option<u64>) {
        let mut max_price = None;
        let mut min_price = None;

        for pattern in BOUND_PATTERNS.iter() {
            let amount = pattern
                .regex
                .captures(lower)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u64>().ok());

            match pattern.field {
                BoundField::MaxPrice => max_price = amount,
                BoundField::MinPrice => min_price = amount,
            }
        }

        (max_price, min_price)
    }

    /// Set the preference flags on `intent` from lower-cased text.
    ///
    /// Flags are independent; several may be set at once.
    pub fn extract_flags(&self, lower: &str, intent: &mut QueryIntent) {
        for (field, triggers) in FLAG_TRIGGERS {
            let hit = triggers.iter().any(|t| lower.contains(*t));
            match field {
                FlagField::Discount => intent.wants_discount = hit,
                FlagField::Budget => intent.wants_budget = hit,
                FlagField::Top => intent.wants_top = hit,
            }
        }
    }

    /// Extract keywords from lower-cased text once price phrases are removed.
    ///
    /// Tokens are taken as split on whitespace, punctuation included.
    pub fn extract_keywords(&self, lower: &str) -> BTreeSet<String> {
        let mut stripped = lower.to_string();
        for regex in STRIPPED_PHRASES.iter() {
            stripped = regex.replace_all(&stripped, " ").into_owned();
        }

        stripped
            .split_whitespace()
            .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
            .filter(|w| !STOP_WORDS.contains(w))
            .map(str::to_string)
            .collect()
    }

    /// Interpret a raw utterance. Case-insensitive and side-effect free.
    pub fn interpret(&self, utterance: &str) -> QueryIntent {
        let lower = utterance.to_lowercase();
        let (max_price, min_price) = self.extract_bounds(&lower);

        let mut intent = QueryIntent {
            max_price,
            min_price,
            keywords: self.extract_keywords(&lower),
            ..QueryIntent::default()
        };
        self.extract_flags(&lower, &mut intent);
        intent
    }
}

/// Interpret an utterance with the default rule set.
pub fn interpret(utterance: &str) -> QueryIntent {
    QueryInterpreter.interpret(utterance)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    // ---- Price bounds ----

    #[test]
    fn test_under_sets_max_price() {
        let intent = interpret("Samsung phones under 3000 Dhs");
        assert_eq!(intent.max_price, Some(3000));
        assert_eq!(intent.min_price, None);
    }

    #[test]
    fn test_above_sets_min_price() {
        assert_eq!(interpret("laptops above 8000").min_price, Some(8000));
    }

    #[test]
    fn test_over_sets_min_price() {
        assert_eq!(interpret("TVs over 4500").min_price, Some(4500));
    }

    #[test]
    fn test_both_bounds() {
        let intent = interpret("phones over 1000 and under 2500");
        assert_eq!(intent.min_price, Some(1000));
        assert_eq!(intent.max_price, Some(2500));
    }

    #[test]
    fn test_bound_without_space() {
        assert_eq!(interpret("tablets under2000").max_price, Some(2000));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(interpret("under 100 or under 900").max_price, Some(100));
    }

    #[test]
    fn test_bound_word_without_number_is_none() {
        let intent = interpret("something under budget");
        assert_eq!(intent.max_price, None);
    }

    #[test]
    fn test_bound_case_insensitive() {
        assert_eq!(interpret("UNDER 500").max_price, Some(500));
    }

    #[test]
    fn test_oversized_amount_is_ignored() {
        let intent = interpret("under 99999999999999999999999 please");
        assert_eq!(intent.max_price, None);
    }

    // ---- Flags ----

    #[test]
    fn test_discount_triggers() {
        assert!(interpret("any discount on tvs").wants_discount);
        assert!(interpret("summer sale").wants_discount);
        assert!(interpret("best deals").wants_discount);
    }

    #[test]
    fn test_budget_triggers() {
        assert!(interpret("cheap earbuds").wants_budget);
        assert!(interpret("budget laptop").wants_budget);
        assert!(interpret("affordable phone").wants_budget);
    }

    #[test]
    fn test_top_triggers() {
        assert!(interpret("best tv").wants_top);
        assert!(interpret("top phones").wants_top);
    }

    #[test]
    fn test_flags_are_not_exclusive() {
        let intent = interpret("best cheap deals");
        assert!(intent.wants_discount);
        assert!(intent.wants_budget);
        assert!(intent.wants_top);
    }

    #[test]
    fn test_flags_match_substrings() {
        // "stop" contains "top", "wholesale" contains "sale"
        let intent = interpret("wholesale stop");
        assert!(intent.wants_discount);
        assert!(intent.wants_top);
    }

    // ---- Keywords ----

    #[test]
    fn test_keywords_drop_price_phrase() {
        let intent = interpret("Samsung phones under 3000 Dhs");
        assert_eq!(intent.keywords, keywords(&["samsung", "phones", "dhs"]));
    }

    #[test]
    fn test_keywords_drop_above_phrase_only() {
        let intent = interpret("laptop above 5000");
        assert_eq!(intent.keywords, keywords(&["laptop"]));

        // "over N" still sets the bound but its words stay keywords
        let intent = interpret("laptop over 5000");
        assert_eq!(intent.min_price, Some(5000));
        assert_eq!(intent.keywords, keywords(&["laptop", "over", "5000"]));
    }

    #[test]
    fn test_keywords_drop_short_tokens() {
        let intent = interpret("a tv or an hp pc");
        assert!(intent.keywords.is_empty());
    }

    #[test]
    fn test_keywords_drop_stop_words() {
        let intent = interpret("show me the best and good stuff for gaming with friends");
        assert_eq!(intent.keywords, keywords(&["stuff", "gaming", "friends"]));
    }

    #[test]
    fn test_keywords_are_deduplicated() {
        let intent = interpret("Apple apple APPLE watch");
        assert_eq!(intent.keywords, keywords(&["apple", "watch"]));
    }

    #[test]
    fn test_keywords_keep_punctuation() {
        let intent = interpret("Any Xiaomi phones?");
        assert_eq!(intent.keywords, keywords(&["any", "xiaomi", "phones?"]));

        let intent = interpret("(tv) deals!");
        assert_eq!(intent.keywords, keywords(&["(tv)", "deals!"]));
    }

    #[test]
    fn test_non_ascii_digits_are_not_amounts() {
        let intent = interpret("phones under \u{663}\u{660}\u{660}\u{660}");
        assert_eq!(intent.max_price, None);
        assert_eq!(
            intent.keywords,
            keywords(&["phones", "under", "\u{663}\u{660}\u{660}\u{660}"])
        );
    }

    #[test]
    fn test_best_is_stop_word_but_sets_top() {
        let intent = interpret("best deals");
        assert!(intent.wants_top);
        assert!(intent.wants_discount);
        assert_eq!(intent.keywords, keywords(&["deals"]));
    }

    // ---- Whole utterances ----

    #[test]
    fn test_no_signal() {
        let intent = interpret("hi");
        assert_eq!(intent, QueryIntent::default());
        assert!(!intent.has_signal());
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(interpret(""), QueryIntent::default());
    }

    #[test]
    fn test_interpret_is_pure() {
        let a = interpret("cheap Samsung TV under 4000");
        let b = interpret("cheap Samsung TV under 4000");
        assert_eq!(a, b);
    }

    #[test]
    fn test_interpreter_struct_matches_free_fn() {
        let utterance = "top laptops over 7000";
        assert_eq!(QueryInterpreter::new().interpret(utterance), interpret(utterance));
    }
}
