//! Explicit dashboard configuration.
//!
//! Settings are read once at startup (see [`DashboardConfig::from_env`]) and passed by reference
//! to the record source. Processing code never reads the environment.

use std::fmt;

use crate::error::{DashboardError, DashboardResult};

/// Default Airtable REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Environment variable holding the data-source credential.
pub const ENV_API_TOKEN: &str = "API_TOKEN";
/// Environment variable holding the collection (Airtable base) identifier.
pub const ENV_BASE_ID: &str = "BASE_ID";
/// Environment variable holding the table name.
pub const ENV_TABLE_NAME: &str = "TABLE_NAME";
/// Optional override of [`DEFAULT_API_URL`].
pub const ENV_API_URL: &str = "AIRTABLE_API_URL";

/// Connection settings for one table.
#[derive(Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Data-source credential (personal access token).
    pub api_token: String,
    /// Collection identifier (Airtable base id).
    pub base_id: String,
    /// Table name (or table id) within the base.
    pub table_name: String,
    /// REST endpoint root, without trailing slash.
    pub api_url: String,
}

impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_token", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("table_name", &self.table_name)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl DashboardConfig {
    pub fn new(
        api_token: impl Into<String>,
        base_id: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            api_token: api_token.into(),
            base_id: base_id.into(),
            table_name: table_name.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Load a `.env` file from the working directory if one exists, then read the settings from
    /// the process environment.
    pub fn from_env() -> DashboardResult<Self> {
        // A missing .env file is normal; variables may come from the real environment.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Required keys: `API_TOKEN`, `BASE_ID`, `TABLE_NAME`. Blank values count as missing.
    /// `AIRTABLE_API_URL` is optional.
    pub fn from_lookup<F>(mut lookup: F) -> DashboardResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut required = |key: &str| -> DashboardResult<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| DashboardError::Config {
                    message: format!("missing environment variable '{key}'"),
                })
        };

        let api_token = required(ENV_API_TOKEN)?;
        let base_id = required(ENV_BASE_ID)?;
        let table_name = required(ENV_TABLE_NAME)?;
        let api_url = lookup(ENV_API_URL)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_token,
            base_id,
            table_name,
            api_url,
        })
    }

    /// Override the REST endpoint root.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{DashboardConfig, DEFAULT_API_URL};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_reads_required_settings() {
        let cfg = DashboardConfig::from_lookup(lookup_from(&[
            ("API_TOKEN", "pat123"),
            ("BASE_ID", "appXYZ"),
            ("TABLE_NAME", "Clients"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_token, "pat123");
        assert_eq!(cfg.base_id, "appXYZ");
        assert_eq!(cfg.table_name, "Clients");
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn blank_setting_is_missing() {
        let err = DashboardConfig::from_lookup(lookup_from(&[
            ("API_TOKEN", "pat123"),
            ("BASE_ID", "  "),
            ("TABLE_NAME", "Clients"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: missing environment variable 'BASE_ID'"
        );
    }

    #[test]
    fn api_url_override_drops_trailing_slash() {
        let cfg = DashboardConfig::from_lookup(lookup_from(&[
            ("API_TOKEN", "t"),
            ("BASE_ID", "b"),
            ("TABLE_NAME", "n"),
            ("AIRTABLE_API_URL", "http://127.0.0.1:9000/v0/"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_url, "http://127.0.0.1:9000/v0");
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = DashboardConfig::new("secret-token", "app1", "T");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("<redacted>"));
    }
}
