//! Projection of schema-less [`Record`]s into a uniform [`Table`].

use std::collections::HashSet;

use crate::types::{ID_COLUMN, Record, Table, Value};

/// Reconcile `records` into a single [`Table`].
///
/// - Columns are the identifier column followed by the union of all field names, in first-seen
///   order.
/// - A record lacking a column gets [`Value::Null`] in that cell.
/// - A field literally named `id` is shadowed by the record identifier.
/// - An empty input yields a table with no columns and no rows.
pub fn project(records: &[Record]) -> Table {
    if records.is_empty() {
        return Table::default();
    }

    let mut columns: Vec<String> = vec![ID_COLUMN.to_string()];
    let mut seen: HashSet<&str> = HashSet::from([ID_COLUMN]);
    for record in records {
        for name in record.field_names() {
            if seen.insert(name) {
                columns.push(name.to_string());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            let mut row = Vec::with_capacity(columns.len());
            row.push(Value::Text(record.id.clone()));
            for name in &columns[1..] {
                row.push(record.get(name).cloned().unwrap_or(Value::Null));
            }
            row
        })
        .collect();

    Table::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::project;
    use crate::types::{Record, Value};

    #[test]
    fn columns_are_union_in_first_seen_order() {
        let records = vec![
            Record::new("r1").with_field("Name", "Ada").with_field("Age", 36.0),
            Record::new("r2").with_field("City", "Paris").with_field("Name", "Bob"),
        ];
        let table = project(&records);

        assert_eq!(table.columns, vec!["id", "Name", "Age", "City"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.rows[1],
            vec![
                Value::text("r2"),
                Value::text("Bob"),
                Value::Null,
                Value::text("Paris"),
            ]
        );
    }

    #[test]
    fn record_without_fields_becomes_id_only_row() {
        let table = project(&[Record::new("r1")]);
        assert_eq!(table.columns, vec!["id"]);
        assert_eq!(table.rows, vec![vec![Value::text("r1")]]);
    }

    #[test]
    fn field_named_id_is_shadowed_by_identifier() {
        let table = project(&[Record::new("rec42").with_field("id", 7.0)]);
        assert_eq!(table.columns, vec!["id"]);
        assert_eq!(table.rows[0][0], Value::text("rec42"));
    }

    #[test]
    fn empty_input_yields_fully_empty_table() {
        let table = project(&[]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }
}
