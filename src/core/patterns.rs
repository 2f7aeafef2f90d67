//! Sentence shapes an order must follow, and the quantity pattern.

use once_cell::sync::Lazy;
use regex::Regex;

/// One coarse sentence template used as a validity heuristic.
#[derive(Debug)]
pub struct ShapePattern {
    pub name: &'static str,
    pub regex: Regex,
}

impl ShapePattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).expect("shape pattern must compile"),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Tried in order; any match accepts the sentence shape.
pub static SHAPE_PATTERNS: Lazy<[ShapePattern; 3]> = Lazy::new(|| {
    [
        // "order 2 lattes", "i want coffee"
        ShapePattern::new("action_verb", r"(order|want|make|get|need)\s+(\d+\s+)?(\w+)"),
        // "espresso please", "2 latte with sugar"
        ShapePattern::new("polite_or_with", r"(\d+\s+)?(\w+)\s+(please|with)"),
        // "a coffee", "an espresso"
        ShapePattern::new("article", r"(a|an)\s+(\w+)"),
    ]
});

/// First run of decimal digits anywhere in the text, in any script.
pub static QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("quantity pattern must compile"));

static DECIMAL_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d$").expect("digit pattern must compile"));

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit from any script ('7', '٣', '৫').
///
/// Unicode lays decimal digits out in contiguous runs of whole 0..=9 blocks,
/// so the value is the offset from the start of the run, modulo 10.
pub fn decimal_digit_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut zero = c as u32;
    while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        zero -= 1;
    }
    Some((c as u32 - zero) % 10)
}

/// Parses a digit run matched by `QUANTITY`. Overflow saturates.
pub fn parse_quantity(digits: &str) -> u64 {
    digits
        .chars()
        .filter_map(decimal_digit_value)
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}

pub fn matching_shape(text: &str) -> Option<&'static ShapePattern> {
    SHAPE_PATTERNS.iter().find(|pattern| pattern.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_verb_shape() {
        let shape = matching_shape("order 2 latte").unwrap();
        assert_eq!(shape.name, "action_verb");
        assert_eq!(matching_shape("i need coffee").unwrap().name, "action_verb");
    }

    #[test]
    fn test_polite_or_with_shape() {
        assert_eq!(matching_shape("espresso please").unwrap().name, "polite_or_with");
        assert_eq!(matching_shape("latte with milk").unwrap().name, "polite_or_with");
    }

    #[test]
    fn test_article_shape() {
        assert_eq!(matching_shape("a coffee").unwrap().name, "article");
        // the article is not word-bounded, any word ending in "a" qualifies
        assert_eq!(matching_shape("mocha latte").unwrap().name, "article");
    }

    #[test]
    fn test_no_shape() {
        assert!(matching_shape("coffee").is_none());
        assert!(matching_shape("").is_none());
        assert!(matching_shape("espresso").is_none());
    }

    #[test]
    fn test_quantity_finds_first_run() {
        let found = QUANTITY.find("order 12 latte and 3 mocha").unwrap();
        assert_eq!(found.as_str(), "12");
        assert!(QUANTITY.find("a latte").is_none());
    }

    #[test]
    fn test_non_ascii_digits() {
        let found = QUANTITY.find("order ٣ latte").unwrap();
        assert_eq!(parse_quantity(found.as_str()), 3);
        assert_eq!(parse_quantity("١٢"), 12);
        assert_eq!(decimal_digit_value('৫'), Some(5));
        assert_eq!(decimal_digit_value('9'), Some(9));
        assert_eq!(decimal_digit_value('x'), None);
    }

    #[test]
    fn test_parse_quantity_saturates() {
        assert_eq!(parse_quantity("42"), 42);
        assert_eq!(parse_quantity("99999999999999999999999"), u64::MAX);
    }
}
