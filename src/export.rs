//! CSV export of a [`Table`].
//!
//! [`to_csv`] produces plain UTF-8 CSV. The downloadable artifact ([`to_csv_download`]) prepends
//! a UTF-8 byte-order mark so spreadsheet applications detect the encoding.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, DashboardResult};
use crate::types::Table;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Header and cell strings read back from CSV data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvCells {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Serialize `table` as CSV: a header row of column names, then one line per row.
///
/// Cells use [`crate::types::Value::render`]; nulls become empty fields. Fields containing the
/// delimiter, a quote or a line break are quoted. A table without columns serializes to nothing.
pub fn to_csv(table: &Table) -> DashboardResult<Vec<u8>> {
    if table.columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|v| v.render()))?;
    }
    wtr.into_inner()
        .map_err(|e| DashboardError::Io(e.into_error()))
}

/// [`to_csv`] output prefixed with [`UTF8_BOM`].
pub fn to_csv_download(table: &Table) -> DashboardResult<Vec<u8>> {
    let body = to_csv(table)?;
    let mut out = Vec::with_capacity(UTF8_BOM.len() + body.len());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(&body);
    Ok(out)
}

/// File name of the downloadable artifact for `table_name`.
pub fn export_file_name(table_name: &str) -> String {
    format!("{table_name}_donnees.csv")
}

/// Write the downloadable artifact into `dir` and return its path.
pub fn write_csv_download(
    dir: impl AsRef<Path>,
    table_name: &str,
    table: &Table,
) -> DashboardResult<PathBuf> {
    let path = dir.as_ref().join(export_file_name(table_name));
    fs::write(&path, to_csv_download(table)?)?;
    Ok(path)
}

/// Read CSV produced by [`to_csv`] or [`to_csv_download`] back into strings.
///
/// A leading byte-order mark is skipped. Empty input yields no headers and no rows.
pub fn parse_csv(bytes: &[u8]) -> DashboardResult<CsvCells> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(CsvCells { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, parse_csv, to_csv, to_csv_download, CsvCells, UTF8_BOM};
    use crate::types::{Table, Value};

    fn table() -> Table {
        Table::new(
            vec!["id".to_string(), "Note".to_string(), "Age".to_string()],
            vec![
                vec![Value::text("r1"), Value::text("a, b"), Value::Number(30.0)],
                vec![Value::text("r2"), Value::text("say \"hi\"\nbye"), Value::Null],
            ],
        )
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let out = String::from_utf8(to_csv(&table()).unwrap()).unwrap();
        assert_eq!(
            out,
            "id,Note,Age\nr1,\"a, b\",30\nr2,\"say \"\"hi\"\"\nbye\",\n"
        );
    }

    #[test]
    fn download_starts_with_bom_and_parses_back() {
        let bytes = to_csv_download(&table()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let cells = parse_csv(&bytes).unwrap();
        assert_eq!(cells.headers, vec!["id", "Note", "Age"]);
        assert_eq!(cells.rows, table().cell_strings());
    }

    #[test]
    fn empty_table_serializes_to_nothing() {
        assert!(to_csv(&Table::default()).unwrap().is_empty());
        assert_eq!(parse_csv(b"").unwrap(), CsvCells::default());
    }

    #[test]
    fn file_name_follows_table_name() {
        assert_eq!(export_file_name("Clients"), "Clients_donnees.csv");
    }
}
