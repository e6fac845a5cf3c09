//! Descriptive statistics over numeric columns of a [`crate::types::Table`].

use crate::error::{DashboardError, DashboardResult};
use crate::types::{Table, Value};

/// Min/max/mean/median over the non-null values of one numeric column.
///
/// Values keep full precision; [`NumericStats::display`] formats them for presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Number of non-null values the statistics were computed over.
    pub count: usize,
}

impl NumericStats {
    /// Compute statistics over `values`.
    ///
    /// Returns `None` if `values` is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum / count as f64,
            median,
            count,
        })
    }

    /// `[min, max, mean, median]` formatted with two decimals.
    pub fn display(&self) -> [String; 4] {
        [self.min, self.max, self.mean, self.median].map(|v| format!("{v:.2}"))
    }
}

/// Statistics for one column, as returned by [`numeric_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub stats: NumericStats,
}

/// Returns `true` if every cell of the column at `idx` is a number or null.
pub fn is_numeric_column(table: &Table, idx: usize) -> bool {
    table
        .column_values(idx)
        .all(|v| matches!(v, Value::Number(_) | Value::Null))
}

/// Compute statistics for a single column.
///
/// - [`DashboardError::UnknownColumn`] if `column` is not in the table.
/// - [`DashboardError::NotNumeric`] if any non-null cell is not a number.
/// - [`DashboardError::EmptyColumn`] if the column has no non-null values.
pub fn numeric_column_stats(table: &Table, column: &str) -> DashboardResult<NumericStats> {
    let idx = table
        .index_of(column)
        .ok_or_else(|| DashboardError::UnknownColumn {
            column: column.to_string(),
        })?;
    if !is_numeric_column(table, idx) {
        return Err(DashboardError::NotNumeric {
            column: column.to_string(),
        });
    }

    let values: Vec<f64> = table.column_values(idx).filter_map(Value::as_number).collect();
    NumericStats::from_values(&values).ok_or_else(|| DashboardError::EmptyColumn {
        column: column.to_string(),
    })
}

/// Statistics for every numeric column, in column order.
///
/// Columns holding any non-numeric, non-null cell are skipped, as are numeric columns with no
/// non-null values ("no data"). Any other failure is returned.
pub fn numeric_stats(table: &Table) -> DashboardResult<Vec<ColumnStats>> {
    let mut out = Vec::new();
    for column in &table.columns {
        match numeric_column_stats(table, column) {
            Ok(stats) => out.push(ColumnStats {
                column: column.clone(),
                stats,
            }),
            Err(DashboardError::EmptyColumn { .. } | DashboardError::NotNumeric { .. }) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{numeric_column_stats, numeric_stats, NumericStats};
    use crate::error::DashboardError;
    use crate::types::{Table, Value};

    fn ages_table() -> Table {
        Table::new(
            vec![
                "id".to_string(),
                "Age".to_string(),
                "Name".to_string(),
                "Empty".to_string(),
            ],
            vec![
                vec![Value::text("r1"), Value::Number(30.0), Value::text("a"), Value::Null],
                vec![Value::text("r2"), Value::Number(40.0), Value::text("b"), Value::Null],
                vec![Value::text("r3"), Value::Null, Value::text("c"), Value::Null],
            ],
        )
    }

    #[test]
    fn stats_ignore_nulls() {
        let stats = numeric_column_stats(&ages_table(), "Age").unwrap();
        assert_eq!(stats.min, 30.0);
        assert_eq!(stats.max, 40.0);
        assert_eq!(stats.mean, 35.0);
        assert_eq!(stats.median, 35.0);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.display(), ["30.00", "40.00", "35.00", "35.00"].map(String::from));
    }

    #[test]
    fn median_of_odd_count_is_middle_value() {
        let stats = NumericStats::from_values(&[9.0, 1.0, 4.0]).unwrap();
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn mean_keeps_full_precision() {
        let stats = NumericStats::from_values(&[1.0, 2.0, 2.0]).unwrap();
        assert!((stats.mean - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.display()[2], "1.67");
    }

    #[test]
    fn all_null_column_is_empty_column_error() {
        let err = numeric_column_stats(&ages_table(), "Empty").unwrap_err();
        assert!(matches!(err, DashboardError::EmptyColumn { ref column } if column == "Empty"));
        assert_eq!(err.to_string(), "no data in column 'Empty'");
    }

    #[test]
    fn text_column_is_not_numeric() {
        let err = numeric_column_stats(&ages_table(), "Name").unwrap_err();
        assert!(matches!(err, DashboardError::NotNumeric { .. }));
        let err = numeric_column_stats(&ages_table(), "missing").unwrap_err();
        assert!(matches!(err, DashboardError::UnknownColumn { .. }));
    }

    #[test]
    fn numeric_stats_skips_text_and_empty_columns() {
        let out = numeric_stats(&ages_table()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].column, "Age");
    }

    #[test]
    fn numeric_stats_keeps_column_order_and_skips_no_data() {
        let table = Table::new(
            vec![
                "id".to_string(),
                "B".to_string(),
                "Blank".to_string(),
                "A".to_string(),
            ],
            vec![
                vec![Value::text("r1"), Value::Number(2.0), Value::Null, Value::Number(-1.0)],
                vec![Value::text("r2"), Value::Number(4.0), Value::Null, Value::Null],
            ],
        );
        assert!(matches!(
            numeric_column_stats(&table, "Blank"),
            Err(DashboardError::EmptyColumn { .. })
        ));
        let out = numeric_stats(&table).unwrap();
        let names: Vec<_> = out.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(out[0].stats.median, 3.0);
        assert_eq!(out[1].stats.count, 1);
    }

    #[test]
    fn bool_values_disqualify_a_column() {
        let table = Table::new(
            vec!["id".to_string(), "Flag".to_string()],
            vec![
                vec![Value::text("r1"), Value::Number(1.0)],
                vec![Value::text("r2"), Value::Bool(true)],
            ],
        );
        assert!(numeric_stats(&table).unwrap().is_empty());
    }
}
