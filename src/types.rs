//! Core data model types.
//!
//! Sources produce schema-less [`Record`]s; [`crate::processing::project`] reconciles them into a
//! uniform [`Table`] whose cells are typed [`Value`]s.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Name of the leading identifier column of every non-empty [`Table`].
pub const ID_COLUMN: &str = "id";

/// A single typed value in a [`Record`] or [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// UTF-8 string.
    Text(String),
    /// 64-bit float.
    Number(f64),
    /// Boolean.
    Bool(bool),
    /// Date-time, rendered exactly as it was received.
    DateTime(Timestamp),
}

/// A parsed date-time that remembers its source text.
///
/// Sources send offsets and fractional digits (`2024-05-01T10:00:00+02:00`,
/// `2024-03-15T14:30:00.000Z`); search and export see that text unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    at: DateTime<FixedOffset>,
    source: String,
}

impl Timestamp {
    /// Parse an RFC 3339 string, keeping it verbatim for rendering.
    pub fn parse_rfc3339(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s).ok().map(|at| Self {
            at,
            source: s.to_string(),
        })
    }

    /// The instant, in UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.at.with_timezone(&Utc)
    }

    /// The original text.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            at: dt.fixed_offset(),
            source: dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Null,
    Text,
    Number,
    Bool,
    DateTime,
}

impl Value {
    /// Convenience constructor for [`Value::Text`].
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Text(_) => ValueKind::Text,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the number if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Stable textual rendering used by search and CSV export.
    ///
    /// - `Null` renders as the empty string.
    /// - Numbers use the shortest representation that round-trips (`30`, `35.5`).
    /// - Date-times keep their source text.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::DateTime(ts) => ts.as_str().to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt.into())
    }
}

/// One item returned by a record source: an externally assigned identifier plus named fields.
///
/// Field order is the order in which the source delivered them; it drives first-seen column
/// order during projection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// Identifier assigned by the data source.
    pub id: String,
    /// Ordered `(field name, value)` pairs. Names are unique within a record.
    pub fields: Vec<(String, Value)>,
}

impl Record {
    /// Create a record with no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style setter. Setting an existing field replaces its value in place.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, replacing any previous value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Iterate field names in source order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}

/// In-memory uniform table.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as [`Table::columns`]. Every row has
/// exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Ordered column names; the identifier column comes first when the table is non-empty.
    pub columns: Vec<String>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from columns and rows.
    ///
    /// # Panics
    ///
    /// Panics if any row has a different length than `columns`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        for (i, row) in rows.iter().enumerate() {
            assert!(
                row.len() == columns.len(),
                "row {} has {} cells but the table has {} columns",
                i,
                row.len(),
                columns.len()
            );
        }
        Self { columns, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, identifier column included.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Create a new table containing only rows that match `predicate`.
    ///
    /// The returned table preserves the original columns.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Textual rendering of every cell, row by row.
    pub fn cell_strings(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Value::render).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Record, Table, Timestamp, Value};

    #[test]
    fn render_uses_stable_forms() {
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Number(30.0).render(), "30");
        assert_eq!(Value::Number(35.5).render(), "35.5");
        assert_eq!(Value::Bool(false).render(), "false");
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(Value::from(dt).render(), "2024-03-01T09:30:00Z");
    }

    #[test]
    fn timestamp_renders_source_text() {
        let ts = Timestamp::parse_rfc3339("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(
            ts.instant(),
            Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
        );
        assert_eq!(Value::DateTime(ts).render(), "2024-05-01T10:00:00+02:00");

        let ms = Timestamp::parse_rfc3339("2024-03-15T14:30:00.000Z").unwrap();
        assert_eq!(Value::DateTime(ms).render(), "2024-03-15T14:30:00.000Z");
        assert!(Timestamp::parse_rfc3339("2024-03-15").is_none());
    }

    #[test]
    fn record_set_replaces_existing_field_in_place() {
        let rec = Record::new("r1")
            .with_field("a", 1.0)
            .with_field("b", "x")
            .with_field("a", 2.0);
        assert_eq!(rec.field_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(rec.get("a"), Some(&Value::Number(2.0)));
        assert_eq!(rec.get("missing"), None);
    }

    #[test]
    #[should_panic(expected = "row 0 has 1 cells")]
    fn table_new_rejects_ragged_rows() {
        let _ = Table::new(
            vec!["id".to_string(), "a".to_string()],
            vec![vec![Value::text("r1")]],
        );
    }
}
