//! Error types shared by the CDDB client, TOC loading and exporters

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a disc lookup or export
///
/// Protocol-level misses ("no match", "no record") are not errors; they show
/// up as empty results instead.
#[derive(Error, Debug)]
pub enum CddbError {
    #[error("Invalid table of contents: {0}")]
    InvalidToc(String),

    #[error("Missing hello identity field: {0}")]
    MissingIdentity(&'static str),

    #[error("Invalid CGI URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CDDB server returned HTTP {0}")]
    HttpStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOC JSON: {0}")]
    TocFormat(#[from] serde_json::Error),

    #[error("Failed to read TOC file {path}: {source}")]
    TocFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Export failed: {0}")]
    Export(String),
}

pub type CddbResult<T> = Result<T, CddbError>;
