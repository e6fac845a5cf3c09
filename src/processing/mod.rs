//! In-memory table construction and transformations.
//!
//! The processing layer turns the [`crate::types::Record`]s returned by a source into a
//! [`crate::types::Table`] and derives everything the dashboard displays from it. Every function
//! here is pure: inputs are borrowed, outputs are fresh values, nothing is cached.
//!
//! - [`project()`]: records → uniform table (column union, nulls for missing fields)
//! - [`filter()`]: case-insensitive substring search across all columns
//! - [`numeric_stats()`]: min/max/mean/median per numeric column
//! - [`column_summary()`]: inferred type, non-null and distinct counts per column
//!
//! ## Example: project → filter → stats
//!
//! ```rust
//! use table_dashboard::processing::{filter, numeric_stats, project};
//! use table_dashboard::types::{Record, Value};
//!
//! let records = vec![
//!     Record::new("r1").with_field("Name", "Alice").with_field("Age", 30.0),
//!     Record::new("r2").with_field("Name", "bob").with_field("Age", 40.0),
//!     Record::new("r3").with_field("Name", "Carol").with_field("Age", Value::Null),
//! ];
//!
//! let table = project(&records);
//! assert_eq!(table.columns, vec!["id", "Name", "Age"]);
//!
//! let found = filter(&table, Some("B"));
//! assert_eq!(found.row_count(), 1);
//!
//! let stats = numeric_stats(&table).unwrap();
//! assert_eq!(stats[0].column, "Age");
//! assert_eq!(stats[0].stats.median, 35.0);
//! ```

pub mod filter;
pub mod project;
pub mod stats;
pub mod summary;

pub use filter::{filter, filter_rows};
pub use project::project;
pub use stats::{numeric_column_stats, numeric_stats, ColumnStats, NumericStats};
pub use summary::{column_summary, ColumnSummary, InferredType};
