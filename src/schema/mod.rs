//! Per-type front matter schemas.
//!
//! Each schema reads fields through a [`FieldReader`], which records every
//! problem it meets instead of stopping at the first one. A validated value is
//! only built once the whole front matter checked out.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::content::front_matter::FrontMatter;
use crate::error::FieldError;
use crate::text_utils::parse_date;

pub mod post;
pub mod service;
pub mod testimonial;

pub use post::PostFrontMatter;
pub use service::{Pricing, ServiceFrontMatter};
pub use testimonial::TestimonialFrontMatter;

pub type SchemaResult<T> = Result<T, Vec<FieldError>>;

pub struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    prefix: String,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a FrontMatter) -> Self {
        FieldReader {
            fields,
            prefix: String::new(),
            errors: vec![],
        }
    }

    fn name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn fail(&mut self, key: &str, message: impl Into<String>) {
        let field = self.name(key);
        self.errors.push(FieldError::new(field, message));
    }

    /// Present and not null.
    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    pub fn required_string(&mut self, key: &str) -> String {
        match self.get(key) {
            None => {
                self.fail(key, "is required");
                String::new()
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                self.fail(key, "must not be empty");
                String::new()
            }
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                self.fail(key, "expected a string");
                String::new()
            }
        }
    }

    pub fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            _ => {
                self.fail(key, "expected a string");
                None
            }
        }
    }

    pub fn string_list(&mut self, key: &str) -> Vec<String> {
        let Some(value) = self.get(key) else {
            return vec![];
        };
        let Value::Array(items) = value else {
            self.fail(key, "expected a list of strings");
            return vec![];
        };

        let mut list = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => list.push(s.clone()),
                _ => self.fail(&format!("{}[{}]", key, i), "expected a string"),
            }
        }
        list
    }

    pub fn bool_or(&mut self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                self.fail(key, "expected true or false");
                default
            }
        }
    }

    pub fn required_date(&mut self, key: &str) -> NaiveDate {
        let raw = self.required_string(key);
        if raw.is_empty() {
            return NaiveDate::default();
        }
        self.check_date(key, &raw)
    }

    pub fn optional_date(&mut self, key: &str) -> Option<NaiveDate> {
        let raw = self.optional_string(key)?;
        Some(self.check_date(key, &raw))
    }

    fn check_date(&mut self, key: &str, raw: &str) -> NaiveDate {
        match parse_date(raw) {
            Ok(date) => date,
            Err(e) => {
                self.fail(key, e);
                NaiveDate::default()
            }
        }
    }

    /// Integer within `min..=max`. Floats and numeric strings are rejected.
    pub fn required_int(&mut self, key: &str, min: i64, max: i64) -> i64 {
        match self.get(key) {
            None => {
                self.fail(key, "is required");
                min
            }
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) if i < min || i > max => {
                    self.fail(key, Self::range_message(min, max));
                    min
                }
                Some(i) => i,
                None => {
                    self.fail(key, "expected an integer");
                    min
                }
            },
            Some(_) => {
                self.fail(key, "expected an integer");
                min
            }
        }
    }

    fn range_message(min: i64, max: i64) -> String {
        if max == i64::MAX {
            format!("must be at least {}", min)
        } else {
            format!("must be between {} and {}", min, max)
        }
    }

    pub fn required_number(&mut self, key: &str, min: f64) -> f64 {
        match self.get(key) {
            None => {
                self.fail(key, "is required");
                min
            }
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f >= min => f,
                _ => {
                    self.fail(key, format!("must be at least {}", min));
                    min
                }
            },
            Some(_) => {
                self.fail(key, "expected a number");
                min
            }
        }
    }

    /// Reads an optional nested table with `read`, naming its errors `key.field`.
    pub fn optional_table<T>(&mut self, key: &str, read: impl FnOnce(&mut FieldReader<'a>) -> T) -> Option<T> {
        let Value::Object(fields) = self.get(key)? else {
            self.fail(key, "expected a table of fields");
            return None;
        };

        let mut nested = FieldReader {
            fields,
            prefix: format!("{}.", self.name(key)),
            errors: vec![],
        };
        let value = read(&mut nested);
        self.errors.append(&mut nested.errors);
        Some(value)
    }

    /// Builds the validated value, or returns every error collected so far.
    pub fn finish<T>(self, build: impl FnOnce() -> T) -> SchemaResult<T> {
        if self.errors.is_empty() {
            Ok(build())
        } else {
            Err(self.errors)
        }
    }
}
