// src/utils/error.rs
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The six fields of a paper record, used to say which one failed to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperField {
    Title,
    Url,
    Authors,
    Date,
    Abstract,
    Topics,
}

impl fmt::Display for PaperField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaperField::Title => "title",
            PaperField::Url => "url",
            PaperField::Authors => "authors",
            PaperField::Date => "date",
            PaperField::Abstract => "abstract",
            PaperField::Topics => "topics",
        };
        f.write_str(name)
    }
}

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No results container with class containing '{marker}' found in page")]
    Structure { marker: String },

    #[error("Could not extract {field} for paper #{index}: {reason}")]
    Field {
        index: usize,
        field: PaperField,
        reason: String,
    },

    #[error("Marker '{marker}' is not usable as a class selector: {reason}")]
    Selector { marker: String, reason: String },
}

#[derive(Error, Debug)]
pub enum DateError {
    #[error("expected 'DD Month YYYY' with a full English month name")]
    Shape,

    #[error("{0}")]
    Calendar(#[from] chrono::ParseError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Could not move output into place at {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// The destination the failed write was aimed at, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            StorageError::Io { path, .. } | StorageError::Persist { path, .. } => Some(path),
            StorageError::Serialization(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetching the listing failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Process exit status for this error. Output failures are kept apart
    /// from fetch and extraction failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Storage(_) => 2,
            _ => 1,
        }
    }
}
