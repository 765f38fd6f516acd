// src/api/mod.rs
//! Portal interaction: building request batches, sending them, and fanning
//! them out across a bounded worker pool.
//!
//! Business logic depends on [`GraphqlTransport`], never on HTTP details.

pub mod client;
mod dispatcher;
pub mod queries;
mod reissue;

use crate::error::AppError;
use crate::types::CredentialBundle;

/// The ability to send one request batch to the portal.
#[async_trait::async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Sends the batch and returns whatever the portal answered, whatever
    /// the status. `Err` means no response was received at all.
    async fn post_batch(
        &self,
        batch: &RequestBatch,
        credentials: &CredentialBundle,
    ) -> Result<ApiResponse<String>, AppError>;
}

// Re-export the public interface
pub use client::{extract_response_text, ApiResponse, PortalHttpClient};
pub use dispatcher::{DispatchReport, Dispatcher};
pub use queries::{build, Facet, RequestBatch};
pub use reissue::Reconciler;
