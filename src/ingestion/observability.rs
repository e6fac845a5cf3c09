//! Fetch outcome reporting.
//!
//! [`super::fetch_records`] hands every outcome to a [`FetchObserver`]. The bundled observers
//! print to stderr ([`StdErrObserver`]) or append to a log file ([`FileObserver`]); a
//! [`CompositeObserver`] feeds several at once.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use crate::error::DashboardError;

/// How bad a failed fetch is. Ordered, so a threshold can be compared against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FetchSeverity {
    /// The source answered but its payload or the settings were unusable.
    Error,
    /// The source could not be reached or read at all.
    Critical,
}

impl FetchSeverity {
    pub fn label(self) -> &'static str {
        match self {
            FetchSeverity::Error => "error",
            FetchSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for FetchSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which source a report is about.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// [`super::RecordSource::describe`] output. Never contains credentials.
    pub source: String,
}

/// What a successful fetch returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchStats {
    pub records: usize,
    /// Distinct field names across all records.
    pub fields: usize,
    /// Wall time of the source call.
    pub elapsed: Duration,
}

/// Receives fetch outcomes. Every hook defaults to doing nothing except `on_alert`, which
/// falls back to [`FetchObserver::on_failed`].
pub trait FetchObserver: Send + Sync {
    fn on_fetched(&self, _ctx: &FetchContext, _stats: FetchStats) {}

    fn on_failed(&self, _ctx: &FetchContext, _severity: FetchSeverity, _error: &DashboardError) {}

    /// A failure at or above [`super::FetchOptions::alert_at_or_above`]. Sent after `on_failed`.
    fn on_alert(&self, ctx: &FetchContext, severity: FetchSeverity, error: &DashboardError) {
        self.on_failed(ctx, severity, error)
    }
}

/// Forwards each report to every inner observer, in insertion order.
#[derive(Default)]
pub struct CompositeObserver {
    inner: Vec<Arc<dyn FetchObserver>>,
}

impl CompositeObserver {
    pub fn new(inner: Vec<Arc<dyn FetchObserver>>) -> Self {
        Self { inner }
    }

    /// Builder-style append.
    pub fn with(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.inner.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<Arc<dyn FetchObserver>> for CompositeObserver {
    fn from_iter<I: IntoIterator<Item = Arc<dyn FetchObserver>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.inner.len())
    }
}

impl FetchObserver for CompositeObserver {
    fn on_fetched(&self, ctx: &FetchContext, stats: FetchStats) {
        self.inner.iter().for_each(|o| o.on_fetched(ctx, stats));
    }

    fn on_failed(&self, ctx: &FetchContext, severity: FetchSeverity, error: &DashboardError) {
        self.inner.iter().for_each(|o| o.on_failed(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &FetchContext, severity: FetchSeverity, error: &DashboardError) {
        self.inner.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Human-readable lines on stderr, so they never mix with the dashboard on stdout.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl FetchObserver for StdErrObserver {
    fn on_fetched(&self, ctx: &FetchContext, stats: FetchStats) {
        eprintln!("{}", fetched_message(ctx, stats));
    }

    fn on_failed(&self, ctx: &FetchContext, severity: FetchSeverity, error: &DashboardError) {
        eprintln!("fetch failed ({severity}) from {}: {error}", ctx.source);
    }

    fn on_alert(&self, ctx: &FetchContext, severity: FetchSeverity, error: &DashboardError) {
        eprintln!("ALERT: {} is unavailable ({severity}): {error}", ctx.source);
    }
}

fn fetched_message(ctx: &FetchContext, stats: FetchStats) -> String {
    format!(
        "fetched {} records ({} fields) from {} in {}ms",
        stats.records,
        stats.fields,
        ctx.source,
        stats.elapsed.as_millis()
    )
}

/// Appends one `key=value` line per report to a log file.
///
/// Lines start with an RFC 3339 UTC timestamp followed by the event name (`fetched`, `failed`,
/// `alert`). The file is opened on the first report and kept open; if it cannot be opened the
/// reports are dropped and the fetch itself is unaffected.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log(&self, event: &str, detail: fmt::Arguments<'_>) {
        let Ok(mut slot) = self.file.lock() else {
            return;
        };
        if slot.is_none() {
            *slot = OpenOptions::new().create(true).append(true).open(&self.path).ok();
        }
        if let Some(file) = slot.as_mut() {
            let ts = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
            let _ = writeln!(file, "{ts} {event} {detail}");
        }
    }
}

impl FetchObserver for FileObserver {
    fn on_fetched(&self, ctx: &FetchContext, stats: FetchStats) {
        self.log(
            "fetched",
            format_args!(
                "records={} fields={} elapsed_ms={} source={}",
                stats.records,
                stats.fields,
                stats.elapsed.as_millis(),
                ctx.source
            ),
        );
    }

    fn on_failed(&self, ctx: &FetchContext, severity: FetchSeverity, error: &DashboardError) {
        self.log(
            "failed",
            format_args!("severity={severity} source={} error={error}", ctx.source),
        );
    }

    fn on_alert(&self, ctx: &FetchContext, severity: FetchSeverity, error: &DashboardError) {
        self.log(
            "alert",
            format_args!("severity={severity} source={} error={error}", ctx.source),
        );
    }
}
