use thiserror::Error;

/// Convenience result type for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Error type returned by record sources, configuration loading, statistics and export.
///
/// This is a single error enum shared across the crate.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Underlying I/O error (e.g. snapshot file not found, export directory not writable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization/parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error (local snapshots).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote data source is unreachable, rejected the credential, or does not know the
    /// requested collection/table.
    #[error("connection error: {message}")]
    Connection { message: String },

    /// A required configuration setting is missing or blank.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Statistics were requested for a column with no non-null values.
    #[error("no data in column '{column}'")]
    EmptyColumn { column: String },

    /// Statistics were requested for a column holding non-numeric values.
    #[error("column '{column}' is not numeric")]
    NotNumeric { column: String },

    /// The named column does not exist in the table.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },
}

impl DashboardError {
    /// Build a [`DashboardError::Connection`] from any displayable cause.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}
