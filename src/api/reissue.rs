// src/api/reissue.rs
//! The single synchronous retry for a structurally broken response.

use super::{build, GraphqlTransport};
use crate::error::AppError;
use crate::model::ParsedRecord;
use crate::parser;
use crate::storage::RawStore;
use crate::types::{CredentialBundle, PropertyId};
use chrono::NaiveDate;
use std::sync::Arc;

/// Re-requests one property, overwrites its stored body, and parses again.
pub struct Reconciler {
    transport: Arc<dyn GraphqlTransport>,
    store: RawStore,
}

impl Reconciler {
    pub fn new(transport: Arc<dyn GraphqlTransport>, store: RawStore) -> Self {
        Self { transport, store }
    }

    /// Reissues the request for `id`, replacing the raw file stored under
    /// `collection_date`.
    ///
    /// # Errors
    ///
    /// [`AppError::ReissueExhausted`] when the fresh body is still
    /// structurally broken; storage failures propagate unchanged.
    pub async fn reconcile(
        &self,
        id: PropertyId,
        collection_date: NaiveDate,
        credentials: &CredentialBundle,
    ) -> Result<ParsedRecord, AppError> {
        log::info!("Reissuing request for property {}", id);
        let body = match self.transport.post_batch(&build(id), credentials).await {
            Ok(response) => {
                log::info!("Request URL: {}", response.url);
                log::info!("Response Status Code: {}", response.status);
                response.data
            }
            Err(e) => {
                log::warn!("Reissue for property {} got no response: {}", id, e);
                String::new()
            }
        };
        self.store.write(id, collection_date, &body)?;

        parser::parse(id, &body).map_err(|err| match err {
            AppError::StructuralParse { id, defect } => AppError::ReissueExhausted { id, defect },
            other => other,
        })
    }
}
