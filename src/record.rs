//! Rows of CSV data addressed by column name.

use crate::error::FieldError;
use crate::header::Headers;
use crate::parse::{self, FromField};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

/// A single row of a CSV input.
///
/// The lenient getters (`get_*`) never fail: a column that does not exist,
/// a row that is too short for the column, and a value that cannot be parsed
/// all yield the zero value of the requested type. Use [`Record::try_get`]
/// to tell these cases apart.
#[derive(Clone, Debug)]
pub struct Record {
    row: u64,
    fields: Vec<String>,
    headers: Arc<Headers>,
}

impl Record {
    #[must_use]
    pub fn new(row: u64, fields: Vec<String>, headers: Arc<Headers>) -> Self {
        Self {
            row,
            fields,
            headers,
        }
    }

    /// Returns the zero-based position of this record among the data rows.
    #[must_use]
    pub fn row(&self) -> u64 {
        self.row
    }

    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over `(column name, value)` pairs.
    ///
    /// Fields without a column name and names without a field are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.fields.iter())
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn field(&self, name: &str) -> Result<&str, FieldError> {
        let index = self
            .headers
            .index_of(name)
            .ok_or_else(|| FieldError::MissingColumn(name.to_string()))?;
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| FieldError::MissingField {
                column: name.to_string(),
                index,
            })
    }

    /// Returns the value of column `name`, or an empty string if there is no
    /// such value.
    #[must_use]
    pub fn get_string(&self, name: &str) -> &str {
        self.field(name).unwrap_or_default()
    }

    /// Parses the value of column `name` as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no column `name`, the row has no field
    /// for it, or the value is not a valid `T`.
    pub fn try_get<T: FromField>(&self, name: &str) -> Result<T, FieldError> {
        let value = self.field(name)?;
        T::from_field(value).map_err(|source| FieldError::Parse {
            column: name.to_string(),
            source,
        })
    }

    /// Parses the value of column `name` as `T`, falling back to
    /// `T::default()`.
    #[must_use]
    pub fn get<T: FromField + Default>(&self, name: &str) -> T {
        self.try_get(name).unwrap_or_default()
    }

    #[must_use]
    pub fn get_int(&self, name: &str) -> isize {
        self.get(name)
    }

    #[must_use]
    pub fn get_int32(&self, name: &str) -> i32 {
        self.get(name)
    }

    #[must_use]
    pub fn get_int64(&self, name: &str) -> i64 {
        self.get(name)
    }

    #[must_use]
    pub fn get_float32(&self, name: &str) -> f32 {
        self.get(name)
    }

    #[must_use]
    pub fn get_float64(&self, name: &str) -> f64 {
        self.get(name)
    }

    /// Returns the value of column `name` as a boolean.
    ///
    /// Only `1`, `t`, `T`, `TRUE`, `true` and `True` are `true`; everything
    /// else, including a missing value, is `false`.
    #[must_use]
    pub fn get_boolean(&self, name: &str) -> bool {
        self.get(name)
    }

    /// Parses the value of column `name` with a `strftime`-style `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no column `name`, the row has no field
    /// for it, or the value does not match `format`.
    pub fn try_get_time(&self, format: &str, name: &str) -> Result<NaiveDateTime, FieldError> {
        let value = self.field(name)?;
        parse::parse_time(format, value).map_err(|source| FieldError::Parse {
            column: name.to_string(),
            source,
        })
    }

    /// Parses the value of column `name` with a `strftime`-style `format`,
    /// falling back to the Unix epoch.
    ///
    /// The result has no time zone: an offset parsed by `%z` is discarded.
    /// Use [`Record::get_datetime`] to keep it.
    #[must_use]
    pub fn get_time(&self, format: &str, name: &str) -> NaiveDateTime {
        self.try_get_time(format, name).unwrap_or_default()
    }

    /// Parses the value of column `name` with a `strftime`-style `format`
    /// containing a UTC offset field, such as `%z`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no column `name`, the row has no field
    /// for it, or the value does not match `format`.
    pub fn try_get_datetime(
        &self,
        format: &str,
        name: &str,
    ) -> Result<DateTime<FixedOffset>, FieldError> {
        let value = self.field(name)?;
        parse::parse_datetime(format, value).map_err(|source| FieldError::Parse {
            column: name.to_string(),
            source,
        })
    }

    /// Parses the value of column `name` like [`Record::try_get_datetime`],
    /// falling back to the Unix epoch in UTC.
    #[must_use]
    pub fn get_datetime(&self, format: &str, name: &str) -> DateTime<FixedOffset> {
        self.try_get_datetime(format, name).unwrap_or_default()
    }

    /// Returns the record as a JSON object keyed by column name, in column
    /// order.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .iter()
            .map(|(n, v)| (n.to_string(), Value::String(v.to_string())))
            .collect();
        Value::Object(map)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = std::cmp::min(self.headers.len(), self.fields.len());
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
