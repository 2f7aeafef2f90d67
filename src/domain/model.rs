use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const UNSPECIFIED_SIZE: &str = "unspecified";
pub const NO_MODIFIERS: &str = "none";

/// Structured result of parsing one free-text order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub quantity: u64,
    /// Display form, e.g. "Latte". `None` when the text names no known drink.
    pub drink: Option<String>,
    /// Display form, e.g. "Large". `None` means unspecified.
    pub size: Option<String>,
    /// Matched modifier phrases in match order, lower-cased.
    pub modifiers: Vec<String>,
    pub created_at: NaiveDate,
}

impl OrderRecord {
    pub fn size_display(&self) -> &str {
        self.size.as_deref().unwrap_or(UNSPECIFIED_SIZE)
    }

    pub fn modifiers_display(&self) -> String {
        if self.modifiers.is_empty() {
            NO_MODIFIERS.to_string()
        } else {
            self.modifiers.join(", ")
        }
    }

    pub fn created_at_display(&self) -> String {
        self.created_at.format(DATE_FORMAT).to_string()
    }

    pub fn to_row(&self) -> OrderRow {
        OrderRow {
            quantity: self.quantity,
            drink: self.drink.clone(),
            size: self.size_display().to_string(),
            modifiers: self.modifiers_display(),
            created_at: self.created_at_display(),
        }
    }
}

/// The mapping handed to the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRow {
    pub quantity: u64,
    pub drink: Option<String>,
    #[serde(default = "unspecified_size", deserialize_with = "size_or_unspecified")]
    pub size: String,
    #[serde(default = "no_modifiers", deserialize_with = "modifiers_or_none")]
    pub modifiers: String,
    pub created_at: String,
}

impl From<&OrderRecord> for OrderRow {
    fn from(record: &OrderRecord) -> Self {
        record.to_row()
    }
}

/// A row read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub row: OrderRow,
}

fn unspecified_size() -> String {
    UNSPECIFIED_SIZE.to_string()
}

fn no_modifiers() -> String {
    NO_MODIFIERS.to_string()
}

// Rows written by older clients carry `null` for an unspecified size.
fn size_or_unspecified<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unspecified_size))
}

fn modifiers_or_none<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(no_modifiers))
}
