use std::fmt;
use std::str::FromStr;

use crate::domain::model::{OrderRecord, StoredOrder};
use crate::utils::error::{OrderError, Result};

const COLUMNS: [&str; 6] = ["id", "quantity", "drink", "size", "modifiers", "created_at"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Tsv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(OrderError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: table, csv, tsv, json".to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

pub fn render_order_card(record: &OrderRecord) -> String {
    let lines = [
        "Parsed Order Details".to_string(),
        format!("  QUANTITY:  {}", record.quantity),
        format!("  DRINK:     {}", record.drink.as_deref().unwrap_or("None")),
        format!(
            "  SIZE:      {}",
            record.size.as_deref().unwrap_or("Not specified")
        ),
        format!("  MODIFIERS: {}", record.modifiers_display()),
    ];
    lines.join("\n")
}

pub fn render_orders(orders: &[StoredOrder], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(orders)),
        OutputFormat::Csv => render_delimited(orders, b','),
        OutputFormat::Tsv => render_delimited(orders, b'\t'),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(orders)?),
    }
}

fn cells(order: &StoredOrder) -> [String; 6] {
    [
        order.id.map(|id| id.to_string()).unwrap_or_default(),
        order.row.quantity.to_string(),
        order.row.drink.clone().unwrap_or_default(),
        order.row.size.clone(),
        order.row.modifiers.clone(),
        order.row.created_at.clone(),
    ]
}

fn render_delimited(orders: &[StoredOrder], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(COLUMNS)?;
    for order in orders {
        writer.write_record(cells(order))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OrderError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| OrderError::IoError(std::io::Error::other(e)))
}

fn render_table(orders: &[StoredOrder]) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }

    let rows: Vec<[String; 6]> = orders.iter().map(cells).collect();
    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_uppercase()).collect();
    let mut lines = vec![format_line(&header)];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|row| format_line(row)));
    lines.join("\n")
}
