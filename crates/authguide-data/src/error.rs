use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    /// The per-team bundle artifact does not exist. Surfaced to the user as
    /// "no detail data for this team", distinct from transport failures.
    #[error("no detail data for team {team}")]
    BundleMissing { team: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataError {
    /// True for the distinct "team has no detail data" condition.
    pub fn is_bundle_missing(&self) -> bool {
        matches!(self, Self::BundleMissing { .. })
    }
}
