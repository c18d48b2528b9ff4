use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::item::Item;

/// One fetched instance of upstream stock. Opaque apart from the named
/// sections the notification builder knows how to read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockSnapshot(Value);

impl StockSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// `null`, `{}`, `[]` and `""` carry no stock information.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            Value::Array(values) => values.is_empty(),
            Value::String(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Items listed under `{section}.items`, or `None` when the section or its
    /// item list is absent.
    pub fn section_items(&self, section: &str) -> Option<Vec<Item>> {
        let items = self.0.get(section)?.get("items")?.as_array()?;

        Some(items.iter().map(Item::from_value).collect())
    }
}
