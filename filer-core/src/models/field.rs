use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Email,
    Phone,
    Password,
}

impl FieldKind {
    /// Whether `value` has the shape this kind stores.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (Self::Number, FieldValue::Number(_))
                | (Self::Date, FieldValue::Date(_))
                | (
                    Self::Text | Self::Email | Self::Phone | Self::Password,
                    FieldValue::Text(_)
                )
        )
    }
}

/// Static description of one field on a sub-step form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub hint: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            hint: None,
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn hint(self, hint: &'static str) -> Self {
        Self {
            hint: Some(hint),
            ..self
        }
    }
}

/// A typed value stored against a field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
}

/// Field data of a single sub-step, keyed by field name.
pub type SubStepData = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFieldValueError {
    #[error("invalid number '{0}'")]
    Number(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    Date(String),

    #[error("invalid email address '{0}'")]
    Email(String),
}

impl FieldValue {
    /// Parses raw user input into the value shape for `kind`.
    ///
    /// Numbers accept a comma as thousands separator; empty numeric input is
    /// zero.
    pub fn parse_for(kind: FieldKind, raw: &str) -> Result<Self, ParseFieldValueError> {
        let trimmed = raw.trim();
        match kind {
            FieldKind::Number => {
                let normalized = trimmed.replace(',', "");
                if normalized.is_empty() {
                    return Ok(Self::Number(Decimal::ZERO));
                }
                normalized
                    .parse()
                    .map(Self::Number)
                    .map_err(|_| ParseFieldValueError::Number(raw.to_string()))
            }
            FieldKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|_| ParseFieldValueError::Date(raw.to_string())),
            FieldKind::Email if !trimmed.is_empty() && !trimmed.contains('@') => {
                Err(ParseFieldValueError::Email(raw.to_string()))
            }
            FieldKind::Text | FieldKind::Email | FieldKind::Phone | FieldKind::Password => {
                Ok(Self::Text(trimmed.to_string()))
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}
