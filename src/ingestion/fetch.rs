//! Unified fetch entrypoint.
//!
//! [`fetch_records`] calls a [`RecordSource`] exactly once and, if an
//! [`super::observability::FetchObserver`] is configured, reports success/failure/alerts to it.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{DashboardError, DashboardResult};
use crate::types::Record;

use super::RecordSource;
use super::observability::{FetchContext, FetchObserver, FetchSeverity, FetchStats};

/// Options controlling [`fetch_records`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct FetchOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn FetchObserver>>,
    /// Failures at or above this severity also reach `on_alert`.
    pub alert_at_or_above: FetchSeverity,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: FetchSeverity::Critical,
        }
    }
}

/// Fetch every record from `source`.
///
/// When an observer is configured, this function reports:
///
/// - `on_fetched` on success, with record and field counts and the elapsed time
/// - `on_failed` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use table_dashboard::ingestion::{fetch_records, FetchOptions, JsonFileSource, StdErrObserver};
///
/// # fn main() -> Result<(), table_dashboard::DashboardError> {
/// let opts = FetchOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     ..Default::default()
/// };
/// let records = fetch_records(&JsonFileSource::new("snapshot.json"), &opts)?;
/// println!("records={}", records.len());
/// # Ok(())
/// # }
/// ```
pub fn fetch_records(
    source: &dyn RecordSource,
    options: &FetchOptions,
) -> DashboardResult<Vec<Record>> {
    let started = Instant::now();
    let result = source.fetch_all_records();
    let elapsed = started.elapsed();

    if let Some(obs) = options.observer.as_ref() {
        let ctx = FetchContext {
            source: source.describe(),
        };
        match &result {
            Ok(records) => obs.on_fetched(&ctx, FetchStats {
                records: records.len(),
                fields: distinct_fields(records),
                elapsed,
            }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failed(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn distinct_fields(records: &[Record]) -> usize {
    records
        .iter()
        .flat_map(Record::field_names)
        .collect::<HashSet<_>>()
        .len()
}

/// Severity assigned to a fetch failure.
pub fn severity_for_error(e: &DashboardError) -> FetchSeverity {
    match e {
        DashboardError::Connection { .. } | DashboardError::Io(_) => FetchSeverity::Critical,
        DashboardError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => FetchSeverity::Critical,
            _ => FetchSeverity::Error,
        },
        DashboardError::Json(_)
        | DashboardError::Config { .. }
        | DashboardError::EmptyColumn { .. }
        | DashboardError::NotNumeric { .. }
        | DashboardError::UnknownColumn { .. } => FetchSeverity::Error,
    }
}
