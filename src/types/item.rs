use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

const MISSING: &str = "N/A";

/// Upstream prices arrive either as JSON numbers or as preformatted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for PriceValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(formatter, "{number}"),
            Self::Text(text) => write!(formatter, "{text}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub price_primary: Option<PriceValue>,
    pub price_secondary: Option<PriceValue>,
}

impl Item {
    /// Lenient: a record with an odd shape still becomes an item rather than
    /// dropping out of the notification.
    pub fn from_value(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        Self {
            name,
            price_primary: price_at(value, "usd_price"),
            price_secondary: price_at(value, "robux_price"),
        }
    }

    pub fn primary_display(&self) -> String {
        display_or_missing(self.price_primary.as_ref())
    }

    pub fn secondary_display(&self) -> String {
        display_or_missing(self.price_secondary.as_ref())
    }
}

fn price_at(value: &Value, key: &str) -> Option<PriceValue> {
    match value.get(key)? {
        Value::Number(number) => Some(PriceValue::Number(number.clone())),
        Value::String(text) => Some(PriceValue::Text(text.clone())),
        _ => None,
    }
}

fn display_or_missing(price: Option<&PriceValue>) -> String {
    price
        .map(ToString::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}
