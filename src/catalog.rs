use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The static match list this service aggregates over, read once at
/// startup. The catalog is the input contract: if it cannot be read the
/// process has nothing to serve and startup fails.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub matches: Vec<CatalogMatch>,
}

/// One raw catalog entry. `status` is kept as the source string here;
/// classification into the snapshot lists happens per refresh cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMatch {
    pub id: u64,
    pub home_team: Value,
    pub away_team: Value,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub start_time: Option<DateTime<Utc>>,
    pub status: String,
}

/// Startup-fatal catalog failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog {path} is unreadable: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Load and parse the catalog document. A document without a `matches`
/// key is an empty catalog, not an error; a missing or unparsable file
/// is fatal.
pub fn load(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
        path: path.display().to_string(),
        source,
    })
}
