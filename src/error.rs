// src/error.rs
//! Application error types with structured error handling.
//!
//! The taxonomy mirrors how failures propagate through a run: transport and
//! field-level problems are absorbed downstream, structural defects in a raw
//! response are recoverable once per property, and storage, session, sink and
//! configuration failures end the run.

use crate::api::Facet;
use crate::types::PropertyId;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a raw response could not be read as a seven-facet document.
///
/// This is not an error type on its own; it classifies the defect so the
/// reconciliation step and the run report can say what was wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralDefect {
    /// The body is empty (transport failure or an empty reply).
    EmptyBody,
    /// The body is not valid JSON.
    NotJson { message: String },
    /// The body is JSON but not an array of facet documents.
    NotABatch,
    /// The array stops before the given facet slot.
    MissingFacet(Facet),
    /// A required section inside a facet document is absent or mistyped.
    MissingSection { facet: Facet, path: &'static str },
    /// The portal answered a facet with GraphQL errors and no data.
    GraphqlErrors { facet: Facet, message: String },
}

impl fmt::Display for StructuralDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "empty response body"),
            Self::NotJson { message } => write!(f, "body is not JSON: {}", message),
            Self::NotABatch => write!(f, "body is not an array of facet documents"),
            Self::MissingFacet(facet) => {
                write!(f, "facet slot {} ({}) missing", facet.slot(), facet)
            }
            Self::MissingSection { facet, path } => {
                write!(f, "{} facet has no usable '{}'", facet, path)
            }
            Self::GraphqlErrors { facet, message } => {
                write!(f, "{} facet returned errors: {}", facet, message)
            }
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Structural parse failure for property {id}: {defect}")]
    StructuralParse {
        id: PropertyId,
        defect: StructuralDefect,
    },

    #[error("Property {id} still malformed after reissue: {defect}")]
    ReissueExhausted {
        id: PropertyId,
        defect: StructuralDefect,
    },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Raw storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Session acquisition failed: {0}")]
    Session(String),

    #[error("Sink error: {0}")]
    Sink(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Backup {path} cannot be reloaded: {reason}")]
    InvalidBackup { path: PathBuf, reason: String },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// The structural defect behind this error, if it is one.
    pub fn structural_defect(&self) -> Option<&StructuralDefect> {
        match self {
            Self::StructuralParse { defect, .. } | Self::ReissueExhausted { defect, .. } => {
                Some(defect)
            }
            _ => None,
        }
    }

    /// Whether this failure only concerns a single property and must not
    /// abort the run.
    pub fn is_row_local(&self) -> bool {
        matches!(
            self,
            Self::StructuralParse { .. } | Self::ReissueExhausted { .. }
        )
    }
}

// Allow converting from anyhow::Error, preserving error chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError {
            message: "dispatch worker task failed".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
