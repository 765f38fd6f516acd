// src/lib.rs
//! cre-harvest library: collects commercial real-estate property records
//! from a GraphQL portal, normalizes them, and loads them into a table.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `StructuralDefect`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `PipelineConfig`
//! - **Domain model**: `Column`, `Cell`, `ParsedRecord`, `PropertyTable`
//! - **Domain types**: `PropertyId`, `CredentialBundle`, `TableName`
//! - **Portal access**: `build`, `RequestBatch`, `GraphqlTransport`, `Dispatcher`, `Reconciler`
//! - **Processing**: `parse`, `normalize_record`, `TableSink`, `SqliteSink`
//! - **Orchestration**: `Harvest`, `RunReport`

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod session;
pub mod sink;
pub mod storage;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result, StructuralDefect};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, PipelineConfig, RunSource};

// --- Domain Model ---
pub use crate::model::{
    BedroomCategory, Cell, Column, FailedProperty, ParsedRecord, PropertyTable, UnitMixMetrics,
};

// --- Domain Types ---
pub use crate::types::{CredentialBundle, PropertyId, TableName};

// --- Portal Access ---
pub use crate::api::{
    build, ApiResponse, DispatchReport, Dispatcher, Facet, GraphqlTransport, PortalHttpClient,
    Reconciler, RequestBatch,
};

// --- Processing ---
pub use crate::normalize::{normalize_record, normalize_table};
pub use crate::parser::parse;
pub use crate::session::{CookieExportSession, SessionProvider, StaticSession};
pub use crate::sink::{read_backup, write_backup, LoadReport, SqliteSink, TableSink};
pub use crate::storage::{RawEntry, RawStore};

// --- Orchestration ---
pub use crate::pipeline::{reload_backup, Harvest, Login, RunReport};
