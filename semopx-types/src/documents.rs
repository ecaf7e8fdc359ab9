//! Wire shapes of the static-report index and of a single result document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::SemopxError;

/// One page of the static-report index.
///
/// Fields are optional so an incomplete page surfaces as a structural error in
/// the walker rather than as an opaque decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPage {
    /// Documents listed on this page.
    #[serde(default)]
    pub items: Option<Vec<IndexItem>>,
    /// Paging metadata.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl IndexPage {
    /// Build a complete page.
    #[must_use]
    pub const fn new(items: Vec<IndexItem>, total_pages: u32) -> Self {
        Self {
            items: Some(items),
            pagination: Some(Pagination {
                total_pages: Some(total_pages),
            }),
        }
    }
}

/// A published document listed in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexItem {
    /// Publication date, ISO-8601 (`2024-01-01T00:00:00`); the first ten
    /// characters are the calendar date.
    #[serde(rename = "Date")]
    pub date: String,
    /// Identifier used to retrieve the document.
    #[serde(rename = "ResourceName")]
    pub resource_name: String,
}

impl IndexItem {
    /// Build an item.
    pub fn new(date: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            resource_name: resource_name.into(),
        }
    }

    /// Calendar date key (`YYYY-MM-DD`).
    ///
    /// # Errors
    /// Returns `Structure` if `Date` is shorter than ten characters.
    pub fn date_key(&self) -> Result<&str, SemopxError> {
        self.date.get(..10).ok_or_else(|| {
            SemopxError::structure(format!(
                "index item {} has malformed Date {:?}",
                self.resource_name, self.date
            ))
        })
    }
}

/// Paging metadata of an index page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total number of pages reported by the API.
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,
}

/// A result document downloaded for one resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    /// Data rows; absent means no rows.
    #[serde(default)]
    pub rows: Vec<ResultRow>,
}

/// A row of a result document.
///
/// The API sends each row as a positional array: `[0]` area descriptor,
/// `[1]` unused, `[2]` timestamp strings, `[3]` prices (per MWh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRow(pub Vec<Value>);

impl ResultRow {
    /// Build a row from its meaningful columns.
    pub fn new<S: Into<String>>(
        area: impl Into<Value>,
        timestamps: impl IntoIterator<Item = S>,
        prices: impl IntoIterator<Item = f64>,
    ) -> Self {
        let timestamps: Vec<Value> = timestamps
            .into_iter()
            .map(|s| Value::String(s.into()))
            .collect();
        let prices: Vec<Value> = prices.into_iter().map(Value::from).collect();
        Self(vec![
            area.into(),
            Value::Null,
            Value::Array(timestamps),
            Value::Array(prices),
        ])
    }

    fn column(&self, idx: usize, name: &str) -> Result<&Value, SemopxError> {
        self.0
            .get(idx)
            .ok_or_else(|| SemopxError::structure(format!("result row is missing {name} column")))
    }

    /// True if the area descriptor contains `area_code`.
    ///
    /// The descriptor is either a plain string, searched whole, or an
    /// `["<code>", "<description>"]` pair, where only the description is
    /// searched.
    ///
    /// # Errors
    /// Returns `Structure` if the column is missing or neither a string nor an
    /// array, or if an array has no string description.
    pub fn matches_area(&self, area_code: &str) -> Result<bool, SemopxError> {
        match self.column(0, "area")? {
            Value::String(s) => Ok(s.contains(area_code)),
            Value::Array(parts) => parts
                .get(1)
                .and_then(Value::as_str)
                .map(|desc| desc.contains(area_code))
                .ok_or_else(|| {
                    SemopxError::structure(format!(
                        "area descriptor has no description: {parts:?}"
                    ))
                }),
            other => Err(SemopxError::structure(format!(
                "unexpected area descriptor: {other}"
            ))),
        }
    }

    /// Timestamp strings of this row.
    ///
    /// # Errors
    /// Returns `Structure` if the column is missing or not an array of strings.
    pub fn timestamps(&self) -> Result<Vec<&str>, SemopxError> {
        let Value::Array(items) = self.column(2, "timestamp")? else {
            return Err(SemopxError::structure("timestamp column is not an array"));
        };
        items
            .iter()
            .map(|v| {
                v.as_str().ok_or_else(|| {
                    SemopxError::structure(format!("timestamp is not a string: {v}"))
                })
            })
            .collect()
    }

    /// Prices of this row, in the source unit (per MWh).
    ///
    /// # Errors
    /// Returns `Structure` if the column is missing or not an array of numbers.
    pub fn prices(&self) -> Result<Vec<f64>, SemopxError> {
        let Value::Array(items) = self.column(3, "price")? else {
            return Err(SemopxError::structure("price column is not an array"));
        };
        items
            .iter()
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| SemopxError::structure(format!("price is not a number: {v}")))
            })
            .collect()
    }
}
