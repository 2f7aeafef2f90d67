use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::core::patterns::{matching_shape, parse_quantity, QUANTITY};
use crate::core::vocabulary::{capitalize, Vocabulary};
use crate::domain::model::OrderRecord;
use crate::utils::error::{OrderError, Result};

/// Validates order text and pulls structured fields out of it.
///
/// Matching is plain substring search over the lower-cased text, so a word
/// like "lattes" still counts as "latte". A drink name that is a substring of
/// another entry ("latte" inside "caffe latte") would be claimed by whichever
/// comes first in the list.
#[derive(Debug, Clone)]
pub struct OrderExtractor {
    vocabulary: Arc<Vocabulary>,
}

impl OrderExtractor {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// True when the text names a known drink and has a recognised sentence shape.
    pub fn is_valid_order(&self, text: &str) -> bool {
        let text = normalize(text);

        if !self.vocabulary.mentions_drink(&text) {
            tracing::debug!("No known drink in {:?}", text);
            return false;
        }

        match matching_shape(&text) {
            Some(shape) => {
                tracing::debug!("{:?} matched shape '{}'", text, shape.name);
                true
            }
            None => {
                tracing::debug!("{:?} matched no sentence shape", text);
                false
            }
        }
    }

    /// Extracts fields without validating. Dated with today's local date.
    pub fn extract_order(&self, text: &str) -> OrderRecord {
        self.extract_order_on(text, Local::now().date_naive())
    }

    pub fn extract_order_on(&self, text: &str, created_at: NaiveDate) -> OrderRecord {
        let text = normalize(text);

        OrderRecord {
            quantity: extract_quantity(&text),
            drink: first_match(self.vocabulary.drinks(), &text),
            size: first_match(self.vocabulary.sizes(), &text),
            modifiers: self.extract_modifiers(&text),
            created_at,
        }
    }

    /// Validates, then extracts. Rejected text yields `OrderError::OrderRejected`.
    pub fn parse_order(&self, text: &str) -> Result<OrderRecord> {
        if !self.is_valid_order(text) {
            return Err(OrderError::OrderRejected {
                text: text.trim().to_string(),
            });
        }
        Ok(self.extract_order(text))
    }

    // Longest phrases claim first; a shorter phrase contained in an
    // accepted one ("ice" in "ice cream") is dropped.
    fn extract_modifiers(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for modifier in self.vocabulary.modifiers_longest_first() {
            if text.contains(modifier) && !found.iter().any(|existing| existing.contains(modifier))
            {
                found.push(modifier.to_string());
            }
        }
        found
    }
}

impl Default for OrderExtractor {
    fn default() -> Self {
        Self::new(Arc::new(Vocabulary::default()))
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn extract_quantity(text: &str) -> u64 {
    match QUANTITY.find(text) {
        Some(digits) => parse_quantity(digits.as_str()),
        None => 1,
    }
}

fn first_match(words: &[String], text: &str) -> Option<String> {
    words
        .iter()
        .find(|word| text.contains(word.as_str()))
        .map(|word| capitalize(word))
}
