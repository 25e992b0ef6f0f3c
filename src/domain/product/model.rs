//! Product domain entity

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A purchasable catalog entry.
///
/// Every field is optional in the source document. Missing or
/// malformed values fall back to empty strings and a zero price so a single
/// bad entry never prevents the catalog from rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Whole currency units, never negative
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_gallery")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub specs: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subcategory: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub size_type: String,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            images: Vec::new(),
            specs: String::new(),
            category: String::new(),
            subcategory: String::new(),
            size_type: String::new(),
        }
    }

    pub fn with_specs(mut self, specs: impl Into<String>) -> Self {
        self.specs = specs.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Whether the name or spec text contains the term, ignoring case.
    ///
    /// Category and subcategory are not searched.
    pub fn matches(&self, term: &SearchTerm) -> bool {
        term.is_empty()
            || self.name.to_lowercase().contains(term.as_lower())
            || self.specs.to_lowercase().contains(term.as_lower())
    }
}

/// A search term normalised once for repeated case-insensitive matching.
///
/// Surrounding whitespace is dropped, so a blank box means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    lower: String,
}

impl SearchTerm {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().trim().to_string();
        let lower = raw.to_lowercase();
        Self { raw, lower }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn as_lower(&self) -> &str {
        &self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Value::deserialize(deserializer)? {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    };
    Ok(parsed
        .filter(|price| !price.is_sign_negative())
        .unwrap_or(Decimal::ZERO))
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Accepts either a JSON array or a `|`-separated string.
fn lenient_gallery<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => s
            .split('|')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    })
}
