//! Fixed word lists the extractor matches against.
//!
//! List order matters: drinks and sizes are scanned front to back and the
//! first hit wins, so overriding a list from configuration also overrides
//! its precedence.

use crate::config::toml_config::VocabularyConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_word_list, Validate};

pub const DEFAULT_DRINKS: [&str; 5] = ["coffee", "latte", "espresso", "cappuccino", "americano"];
pub const DEFAULT_MODIFIERS: [&str; 6] = ["sugar", "milk", "cream", "syrup", "ice", "ice cream"];
pub const DEFAULT_SIZES: [&str; 3] = ["small", "medium", "large"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    drinks: Vec<String>,
    modifiers: Vec<String>,
    sizes: Vec<String>,
}

impl Vocabulary {
    pub fn new(drinks: Vec<String>, modifiers: Vec<String>, sizes: Vec<String>) -> Self {
        Self {
            drinks: normalize(drinks),
            modifiers: normalize(modifiers),
            sizes: normalize(sizes),
        }
    }

    /// Lists missing from `config` keep their defaults.
    pub fn from_config(config: &VocabularyConfig) -> Self {
        let defaults = Self::default();
        Self::new(
            config.drinks.clone().unwrap_or(defaults.drinks),
            config.modifiers.clone().unwrap_or(defaults.modifiers),
            config.sizes.clone().unwrap_or(defaults.sizes),
        )
    }

    pub fn drinks(&self) -> &[String] {
        &self.drinks
    }

    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    /// Modifiers ordered by character count, longest first. Equal lengths keep list order.
    pub fn modifiers_longest_first(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.modifiers.iter().map(String::as_str).collect();
        sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        sorted
    }

    pub fn mentions_drink(&self, text: &str) -> bool {
        self.drinks.iter().any(|drink| text.contains(drink.as_str()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_DRINKS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_MODIFIERS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_SIZES.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl Validate for Vocabulary {
    fn validate(&self) -> Result<()> {
        validate_word_list("vocabulary.drinks", &self.drinks)?;
        validate_word_list("vocabulary.modifiers", &self.modifiers)?;
        validate_word_list("vocabulary.sizes", &self.sizes)
    }
}

fn normalize(words: Vec<String>) -> Vec<String> {
    words.into_iter().map(|w| w.trim().to_lowercase()).collect()
}

/// Upper-cases the first character and lower-cases the rest: "ice cream" -> "Ice cream".
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
