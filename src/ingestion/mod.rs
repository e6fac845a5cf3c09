//! Record sources.
//!
//! Most callers should use [`fetch_records`] (from [`fetch`]) which:
//!
//! - calls a [`RecordSource`] once (no retry)
//! - returns the records in source order
//! - optionally reports success/failure/alerts to a [`FetchObserver`]
//!
//! Sources:
//! - [`airtable::AirtableSource`]: the hosted table, over HTTP
//! - [`json::JsonFileSource`]: a local JSON snapshot

pub mod airtable;
pub mod fetch;
pub mod json;
pub mod observability;

use crate::error::DashboardResult;
use crate::types::Record;

pub use airtable::AirtableSource;
pub use fetch::{fetch_records, severity_for_error, FetchOptions};
pub use json::{records_from_json_str, JsonFileSource};
pub use observability::{
    CompositeObserver, FetchContext, FetchObserver, FetchSeverity, FetchStats, FileObserver, StdErrObserver,
};

/// Supplies the full record set of one table.
///
/// Implementations perform a single blocking fetch and either return every record or fail with
/// one error.
pub trait RecordSource {
    /// Short description used in logs. Must not contain credentials.
    fn describe(&self) -> String;

    /// Fetch every record, in source order.
    fn fetch_all_records(&self) -> DashboardResult<Vec<Record>>;
}
