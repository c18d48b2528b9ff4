use std::fmt;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::types::stock_snapshot::StockSnapshot;

/// Change-detection digest of a snapshot. Not a security boundary.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(snapshot: &StockSnapshot) -> Self {
        let mut canonical = String::new();
        write_canonical(snapshot.as_value(), &mut canonical);

        let digest = Sha256::digest(canonical.as_bytes());

        Self(format!("{digest:x}"))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", &self.0[..12.min(self.0.len())])
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/* NOTE: object keys are sorted explicitly so the digest does not depend on
 * serde_json's map ordering feature flags. */
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (index, key) in keys.into_iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(values) => {
            out.push('[');
            for (index, element) in values.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(element, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
