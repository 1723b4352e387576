//! Validation of model output against a response schema
//!
//! Supports the subset the schemas use: OBJECT/ARRAY/STRING/INTEGER/NUMBER/BOOLEAN
//! types, `properties`, `items`, `required`, `minItems` and numeric
//! `minimum`/`maximum`. Extra fields are allowed.

use serde_json::Value;
use std::fmt;
use tracing::debug;

/// A single place where a value does not match its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON path such as `$.days[0].coords.lat`
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check `value` against `schema`, collecting every violation
pub fn validate(value: &Value, schema: &Value) -> Result<(), Vec<SchemaViolation>> {
    let mut violations = Vec::new();
    check(value, schema, "$", &mut violations);
    debug!(violation_count = violations.len(), "validate: done");
    if violations.is_empty() { Ok(()) } else { Err(violations) }
}

fn check(value: &Value, schema: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    let Some(expected) = schema.get("type").and_then(Value::as_str) else {
        return;
    };

    if !type_matches(value, expected) {
        out.push(SchemaViolation {
            path: path.to_string(),
            message: format!("expected {}, found {}", expected, describe(value)),
        });
        return;
    }

    match expected.to_ascii_uppercase().as_str() {
        "OBJECT" => check_object(value, schema, path, out),
        "ARRAY" => check_array(value, schema, path, out),
        "INTEGER" | "NUMBER" => check_range(value, schema, path, out),
        _ => {}
    }
}

fn check_range(value: &Value, schema: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    let Some(n) = value.as_f64() else {
        return;
    };

    if let Some(min) = schema.get("minimum").and_then(bound)
        && n < min
    {
        out.push(SchemaViolation {
            path: path.to_string(),
            message: format!("expected at least {}, found {}", min, value),
        });
    }
    if let Some(max) = schema.get("maximum").and_then(bound)
        && n > max
    {
        out.push(SchemaViolation {
            path: path.to_string(),
            message: format!("expected at most {}, found {}", max, value),
        });
    }
}

fn check_object(value: &Value, schema: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    let Some(map) = value.as_object() else {
        return;
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            match map.get(field) {
                None => out.push(SchemaViolation {
                    path: format!("{}.{}", path, field),
                    message: "required field is missing".to_string(),
                }),
                Some(Value::Null) => out.push(SchemaViolation {
                    path: format!("{}.{}", path, field),
                    message: "required field is null".to_string(),
                }),
                Some(_) => {}
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop_schema) in properties {
            match map.get(name) {
                // Optional fields may be omitted or explicitly null
                None | Some(Value::Null) => {}
                Some(v) => check(v, prop_schema, &format!("{}.{}", path, name), out),
            }
        }
    }
}

fn check_array(value: &Value, schema: &Value, path: &str, out: &mut Vec<SchemaViolation>) {
    let Some(items) = value.as_array() else {
        return;
    };

    if let Some(min) = schema.get("minItems").and_then(min_items)
        && (items.len() as u64) < min
    {
        out.push(SchemaViolation {
            path: path.to_string(),
            message: format!("expected at least {} items, found {}", min, items.len()),
        });
    }

    if let Some(item_schema) = schema.get("items") {
        for (i, item) in items.iter().enumerate() {
            check(item, item_schema, &format!("{}[{}]", path, i), out);
        }
    }
}

/// `minItems` may be a number or, in Gemini's REST form, a numeric string
fn min_items(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

fn bound(v: &Value) -> Option<f64> {
    v.as_f64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

fn type_matches(value: &Value, expected: &str) -> bool {
    match expected.to_ascii_uppercase().as_str() {
        "OBJECT" => value.is_object(),
        "ARRAY" => value.is_array(),
        "STRING" => value.is_string(),
        "BOOLEAN" => value.is_boolean(),
        "NUMBER" => value.is_number(),
        "INTEGER" => value.is_i64() || value.is_u64(),
        _ => true,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
