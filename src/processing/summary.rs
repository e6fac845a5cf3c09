//! Per-column type/null/cardinality metadata.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::types::{Table, Value, ValueKind};

/// Descriptive type label inferred from the non-null values observed in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    /// Only numbers.
    Numeric,
    /// Only strings.
    Text,
    /// Only booleans.
    Boolean,
    /// Only date-times.
    DateTime,
    /// More than one kind of non-null value.
    Mixed,
    /// Every cell is null.
    Empty,
}

impl InferredType {
    pub fn label(&self) -> &'static str {
        match self {
            InferredType::Numeric => "numeric",
            InferredType::Text => "text",
            InferredType::Boolean => "boolean",
            InferredType::DateTime => "datetime",
            InferredType::Mixed => "mixed",
            InferredType::Empty => "empty",
        }
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub column: String,
    pub inferred_type: InferredType,
    /// Cells that are not [`Value::Null`].
    pub non_null_count: usize,
    /// Distinct non-null values. Nulls never count as a value.
    pub unique_count: usize,
}

/// Summarize every column (identifier included), in column order.
///
/// Distinctness compares kind and rendering, so `Number(1)` and `Text("1")` are two values and an
/// empty string is a present value distinct from a missing field.
pub fn column_summary(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| summarize_column(table, idx, column))
        .collect()
}

fn summarize_column(table: &Table, idx: usize, column: &str) -> ColumnSummary {
    let mut kinds: BTreeSet<ValueKind> = BTreeSet::new();
    let mut distinct: HashSet<(ValueKind, String)> = HashSet::new();
    let mut non_null_count = 0;

    for value in table.column_values(idx) {
        if value.is_null() {
            continue;
        }
        non_null_count += 1;
        kinds.insert(value.kind());
        distinct.insert(distinct_key(value));
    }

    ColumnSummary {
        column: column.to_string(),
        inferred_type: infer_type(&kinds),
        non_null_count,
        unique_count: distinct.len(),
    }
}

fn distinct_key(value: &Value) -> (ValueKind, String) {
    match value {
        // -0.0 and 0.0 are the same number.
        Value::Number(n) if *n == 0.0 => (ValueKind::Number, "0".to_string()),
        other => (other.kind(), other.render()),
    }
}

fn infer_type(kinds: &BTreeSet<ValueKind>) -> InferredType {
    let mut iter = kinds.iter();
    match (iter.next(), iter.next()) {
        (None, _) => InferredType::Empty,
        (Some(_), Some(_)) => InferredType::Mixed,
        (Some(kind), None) => match kind {
            ValueKind::Number => InferredType::Numeric,
            ValueKind::Text => InferredType::Text,
            ValueKind::Bool => InferredType::Boolean,
            ValueKind::DateTime => InferredType::DateTime,
            ValueKind::Null => InferredType::Empty,
        },
    }
}
