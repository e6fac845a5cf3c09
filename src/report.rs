//! Dashboard state and plain-text views.
//!
//! One refresh fetches the records once and produces a [`DashboardState`]. A failed fetch does
//! not abort anything: it yields [`DashboardState::Unavailable`], which renders as the dashboard
//! heading, a single error message plus a configuration hint, and the time of the attempt.

use chrono::{DateTime, Local};

use crate::error::DashboardError;
use crate::ingestion::{fetch_records, FetchOptions, RecordSource};
use crate::processing::{column_summary, numeric_stats, project};
use crate::types::{Table, Value};

/// Dashboard heading, printed above every view.
pub const DASHBOARD_TITLE: &str = "Dashboard Données Airtable";

/// Shown under a connection error.
pub const CONNECTION_HINT: &str =
    "Vérifiez vos variables d'environnement (API_TOKEN, BASE_ID, TABLE_NAME)";

/// Shown instead of statistics when no column qualifies.
pub const NO_NUMERIC_COLUMNS: &str = "Aucune colonne numérique détectée";

/// Widest cell rendered by [`render_table`], in characters.
pub const MAX_CELL_WIDTH: usize = 40;

/// Outcome of one refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    /// Records were fetched and projected.
    Loaded {
        table: Table,
        refreshed_at: DateTime<Local>,
    },
    /// The fetch failed; the dashboard shows no data.
    Unavailable { message: String },
}

impl DashboardState {
    /// Fetch once from `source` and project the result.
    pub fn refresh(source: &dyn RecordSource, options: &FetchOptions) -> Self {
        match fetch_records(source, options) {
            Ok(records) => Self::Loaded {
                table: project(&records),
                refreshed_at: Local::now(),
            },
            Err(e) => Self::unavailable(&e),
        }
    }

    /// Degraded state for an error raised before or during the fetch.
    pub fn unavailable(error: &DashboardError) -> Self {
        Self::Unavailable {
            message: error.to_string(),
        }
    }

    /// The loaded table, if any.
    pub fn table(&self) -> Option<&Table> {
        match self {
            Self::Loaded { table, .. } => Some(table),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Error banner for the degraded state.
pub fn render_unavailable(message: &str) -> String {
    format!("Erreur de connexion: {message}\n{CONNECTION_HINT}\n")
}

/// Heading line followed by a blank line.
pub fn render_header() -> String {
    format!("{DASHBOARD_TITLE}\n\n")
}

/// The whole degraded page: heading, error banner, then the time of the failed attempt.
pub fn render_unavailable_page(message: &str, attempted_at: &DateTime<Local>) -> String {
    format!(
        "{}{}\n{}",
        render_header(),
        render_unavailable(message),
        render_caption(attempted_at)
    )
}

/// Headline metrics: record count, column count, connection status.
pub fn render_overview(table: &Table) -> String {
    format!(
        "Total Records: {} | Colonnes: {} | Statut: Connecté\n",
        table.row_count(),
        table.column_count()
    )
}

/// Aligned text grid of the table, header first.
///
/// Line breaks inside cells are flattened and cells wider than [`MAX_CELL_WIDTH`] are cut with
/// an ellipsis.
pub fn render_table(table: &Table) -> String {
    if table.columns.is_empty() {
        return "(aucune donnée)\n".to_string();
    }

    let header: Vec<String> = table.columns.iter().map(|c| display_cell(c)).collect();
    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|v| display_value(v)).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_grid_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_grid_line(&mut out, &rule, &widths);
    for row in &body {
        push_grid_line(&mut out, row, &widths);
    }
    out
}

fn push_grid_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}", w = *w))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

fn display_value(v: &Value) -> String {
    display_cell(&v.render())
}

fn display_cell(raw: &str) -> String {
    let flat: String = raw
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() > MAX_CELL_WIDTH {
        let cut: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{cut}…")
    } else {
        flat
    }
}

/// Min/max/mean/median per numeric column, two decimals.
///
/// Empty tables render nothing; tables without a numeric column render [`NO_NUMERIC_COLUMNS`].
pub fn render_stats(table: &Table) -> String {
    if table.is_empty() {
        return String::new();
    }
    let stats = match numeric_stats(table) {
        Ok(stats) => stats,
        Err(e) => return format!("{e}\n"),
    };
    if stats.is_empty() {
        return format!("{NO_NUMERIC_COLUMNS}\n");
    }

    let mut out = String::new();
    for entry in &stats {
        let [min, max, mean, median] = entry.stats.display();
        let col = &entry.column;
        out.push_str(&format!(
            "{col} - Min: {min} | {col} - Max: {max} | {col} - Moyenne: {mean} | {col} - Médiane: {median}\n"
        ));
    }
    out
}

/// Per-column type, non-null ratio and distinct count, as a markdown-style table.
pub fn render_details(table: &Table) -> String {
    let mut out = String::from("Colonne | Type | Non-null | Uniques\n---|---|---|---\n");
    for s in column_summary(table) {
        out.push_str(&format!(
            "`{}` | {} | {}/{} | {}\n",
            s.column,
            s.inferred_type,
            s.non_null_count,
            table.row_count(),
            s.unique_count
        ));
    }
    out
}

/// Last-refresh caption.
pub fn render_caption(refreshed_at: &DateTime<Local>) -> String {
    format!(
        "Dernière actualisation: {}\n",
        refreshed_at.format("%Y-%m-%d %H:%M:%S")
    )
}
