//! Row filtering for [`crate::types::Table`].

use crate::types::{Table, Value};

/// Returns a new [`Table`] containing only rows for which `predicate` returns `true`.
///
/// This is a convenience wrapper around [`Table::filter_rows`].
pub fn filter_rows<F>(table: &Table, predicate: F) -> Table
where
    F: FnMut(&[Value]) -> bool,
{
    table.filter_rows(predicate)
}

/// Case-insensitive substring search across all columns.
///
/// - `None` or an empty query returns a copy of `table` (same rows, same order).
/// - Otherwise keeps the rows where at least one cell's [`Value::render`] contains `query`,
///   comparing lowercase forms of both.
pub fn filter(table: &Table, query: Option<&str>) -> Table {
    let needle = match query {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return table.clone(),
    };
    table.filter_rows(|row| row.iter().any(|cell| cell_matches(cell, &needle)))
}

fn cell_matches(cell: &Value, needle: &str) -> bool {
    match cell {
        Value::Null => false,
        other => other.render().to_lowercase().contains(needle),
    }
}

#[cfg(test)]
mod tests {
    use super::{filter, filter_rows};
    use crate::types::{Table, Value};

    fn sample_table() -> Table {
        Table::new(
            vec!["id".to_string(), "Name".to_string(), "Age".to_string()],
            vec![
                vec![Value::text("r1"), Value::text("Alice"), Value::Number(30.0)],
                vec![Value::text("r2"), Value::text("bob"), Value::Null],
                vec![Value::text("r3"), Value::text("BOBBY"), Value::Number(41.5)],
            ],
        )
    }

    #[test]
    fn empty_or_missing_query_is_identity() {
        let table = sample_table();
        assert_eq!(filter(&table, None), table);
        assert_eq!(filter(&table, Some("")), table);
    }

    #[test]
    fn query_matches_case_insensitively_and_keeps_order() {
        let table = sample_table();
        let out = filter(&table, Some("BoB"));
        assert_eq!(out.columns, table.columns);
        assert_eq!(out.rows, vec![table.rows[1].clone(), table.rows[2].clone()]);
        // Original unchanged
        assert_eq!(table.row_count(), 3);
    }

    #[test]
    fn query_matches_number_rendering() {
        let table = sample_table();
        let out = filter(&table, Some("41.5"));
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][0], Value::text("r3"));
    }

    #[test]
    fn query_matches_identifier_column() {
        let out = filter(&sample_table(), Some("R2"));
        assert_eq!(out.row_count(), 1);
    }

    #[test]
    fn filter_rows_can_return_empty_table() {
        let table = sample_table();
        let out = filter_rows(&table, |_| false);
        assert_eq!(out.columns, table.columns);
        assert!(out.rows.is_empty());
    }
}
