//! Boundary redaction hook for `details` payloads.
//!
//! The writer hashes whatever it is given, so secrets that reach the chain
//! are permanent.  `Redactor` runs before hashing and replaces the values
//! of configured keys (matched case-insensitively, at any nesting depth)
//! with a fixed placeholder.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

/// The replacement written over a redacted value.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Strips configured keys from detail payloads before they are hashed.
#[derive(Debug, Clone)]
pub struct Redactor {
    keys: HashSet<String>,
}

impl Redactor {
    /// A redactor for the given key names.  Matching is case-insensitive.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(|k| k.into().to_lowercase()).collect(),
        }
    }

    fn is_sensitive(&self, key: &str) -> bool {
        self.keys.contains(&key.to_lowercase())
    }

    /// Redact a detail map in place, recursing into nested objects and
    /// arrays.
    pub fn redact(&self, details: &mut BTreeMap<String, Value>) {
        for (key, value) in details.iter_mut() {
            if self.is_sensitive(key) {
                *value = Value::String(REDACTED_PLACEHOLDER.to_string());
            } else {
                self.redact_value(value);
            }
        }
    }

    fn redact_value(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, nested) in map.iter_mut() {
                    if self.is_sensitive(key) {
                        *nested = Value::String(REDACTED_PLACEHOLDER.to_string());
                    } else {
                        self.redact_value(nested);
                    }
                }
            }
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.redact_value(item);
                }
            }
            _ => {}
        }
    }
}
