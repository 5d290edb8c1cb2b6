use serde_json::{Map, Number, Value};

/// Converts a TOML value into the JSON model used for front matter.
/// Dates and times become their RFC 3339 text, so `2024-04-22` stays `"2024-04-22"`.
pub fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(table_to_json(table)),
    }
}

pub fn table_to_json(table: toml::Table) -> Map<String, Value> {
    table.into_iter()
        .map(|(k, v)| (k, toml_to_json(v)))
        .collect()
}
