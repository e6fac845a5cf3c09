//! JSON → [`Record`] conversion and local snapshot source.
//!
//! Records use the Airtable shape: `{"id": "rec…", "createdTime": "…", "fields": {…}}`.
//! Supported snapshot inputs:
//! - A JSON array of records: `[{"id":"r1","fields":{…}}, …]`
//! - A single list page: `{"records":[…], "offset":"…"}` (the offset is ignored)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::DashboardResult;
use crate::types::{Record, Timestamp, Value};

use super::RecordSource;

/// A record as delivered over the wire, before value conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default, rename = "createdTime")]
    pub created_time: Option<String>,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl RawRecord {
    /// Convert every field into a typed [`Value`], keeping field order.
    pub fn into_record(self) -> Record {
        Record {
            id: self.id,
            fields: self
                .fields
                .into_iter()
                .map(|(name, v)| (name, convert_json_value(v)))
                .collect(),
        }
    }
}

/// One page of a list-records response.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPage {
    pub records: Vec<RawRecord>,
    /// Cursor for the next page; absent on the last page.
    #[serde(default)]
    pub offset: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Snapshot {
    Records(Vec<RawRecord>),
    Page(RecordPage),
}

/// Map a JSON value onto the [`Value`] union.
///
/// - `null` → [`Value::Null`]
/// - strings parsing as RFC 3339 → [`Value::DateTime`] (source text kept), other strings → [`Value::Text`]
/// - arrays/objects (linked records, attachments, multi-selects) → compact JSON text
pub fn convert_json_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
        serde_json::Value::String(s) => match Timestamp::parse_rfc3339(&s) {
            Some(ts) => Value::DateTime(ts),
            None => Value::Text(s),
        },
        other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
            Value::Text(other.to_string())
        }
    }
}

/// Parse records from an in-memory JSON snapshot.
pub fn records_from_json_str(input: &str) -> DashboardResult<Vec<Record>> {
    let raw = match serde_json::from_str::<Snapshot>(input.trim())? {
        Snapshot::Records(records) => records,
        Snapshot::Page(page) => page.records,
    };
    Ok(raw.into_iter().map(RawRecord::into_record).collect())
}

/// Reads all records from a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("json path={}", self.path.display())
    }

    fn fetch_all_records(&self) -> DashboardResult<Vec<Record>> {
        let text = fs::read_to_string(&self.path)?;
        records_from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::{convert_json_value, records_from_json_str};
    use crate::types::Value;

    #[test]
    fn json_values_map_onto_value_union() {
        assert_eq!(convert_json_value(json!(null)), Value::Null);
        assert_eq!(convert_json_value(json!(true)), Value::Bool(true));
        assert_eq!(convert_json_value(json!(42)), Value::Number(42.0));
        assert_eq!(convert_json_value(json!("hello")), Value::text("hello"));
        match convert_json_value(json!("2024-05-01T10:00:00.000+02:00")) {
            Value::DateTime(ts) => {
                assert_eq!(ts.instant(), Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
                assert_eq!(ts.as_str(), "2024-05-01T10:00:00.000+02:00");
            }
            other => panic!("expected a date-time, got {other:?}"),
        }
        assert_eq!(
            convert_json_value(json!(["recA", "recB"])),
            Value::text("[\"recA\",\"recB\"]")
        );
    }

    #[test]
    fn date_only_strings_stay_text() {
        assert_eq!(convert_json_value(json!("2024-05-01")), Value::text("2024-05-01"));
    }

    #[test]
    fn snapshot_accepts_array_or_page_and_keeps_field_order() {
        let array = r#"[{"id":"r1","fields":{"Zeta":1,"Alpha":"a"}}]"#;
        let page = r#"{"records":[{"id":"r1","createdTime":"2024-01-01T00:00:00.000Z","fields":{"Zeta":1,"Alpha":"a"}}],"offset":"itr1"}"#;

        let from_array = records_from_json_str(array).unwrap();
        let from_page = records_from_json_str(page).unwrap();
        assert_eq!(from_array, from_page);
        assert_eq!(
            from_array[0].field_names().collect::<Vec<_>>(),
            vec!["Zeta", "Alpha"]
        );
    }

    #[test]
    fn record_without_fields_object_has_no_fields() {
        let records = records_from_json_str(r#"[{"id":"r1"}]"#).unwrap();
        assert_eq!(records[0].id, "r1");
        assert!(records[0].fields.is_empty());
    }
}
