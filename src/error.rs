use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to get HTML for url {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} for url {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid profile url {0}")]
    InvalidUrl(String),

    #[error("input file '{}' not found", .0.display())]
    MissingInput(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "browser")]
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
}

pub type Result<T> = std::result::Result<T, Error>;
