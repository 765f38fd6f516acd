// src/api/dispatcher.rs
//! Bounded concurrent fan-out of request batches.
//!
//! One task per property is spawned immediately, in input order; a
//! semaphore keeps at most `pool_size` of them on the wire. Each task sends
//! its `(identifier, outcome)` pair back over a channel, and the collector
//! persists bodies in completion order. Nothing is parsed here.

use super::{build, ApiResponse, GraphqlTransport};
use crate::error::AppError;
use crate::storage::{RawEntry, RawStore};
use crate::types::{CredentialBundle, PropertyId};
use chrono::NaiveDate;
use indexmap::IndexSet;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

type Outcome = (PropertyId, Result<ApiResponse<String>, AppError>);

/// What a dispatch pass left behind in raw storage.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// One entry per identifier, in completion order.
    pub written: Vec<RawEntry>,
    /// Identifiers for which no response was received; an empty body was
    /// stored for each.
    pub transport_failures: Vec<PropertyId>,
}

/// Sends every property's batch and stores each raw body.
pub struct Dispatcher {
    transport: Arc<dyn GraphqlTransport>,
    store: RawStore,
    pool_size: usize,
    progress: bool,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn GraphqlTransport>, store: RawStore, pool_size: usize) -> Self {
        Self {
            transport,
            store,
            pool_size: pool_size.max(1),
            progress: false,
        }
    }

    /// Logs a `[completed/total]` counter per collected response.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Dispatches all identifiers and writes one raw response per identifier
    /// under `collection_date`. Repeated identifiers are sent once.
    ///
    /// Transport failures are not retried; only storage failures abort.
    pub async fn dispatch(
        &self,
        ids: &[PropertyId],
        credentials: &CredentialBundle,
        collection_date: NaiveDate,
    ) -> Result<DispatchReport, AppError> {
        self.store.ensure_dir()?;
        let unique: IndexSet<PropertyId> = ids.iter().copied().collect();
        if unique.len() < ids.len() {
            log::warn!(
                "Skipping {} repeated property identifiers",
                ids.len() - unique.len()
            );
        }
        let total = unique.len();
        log::info!(
            "Dispatching {} requests with up to {} in flight",
            total,
            self.pool_size
        );

        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let credentials = Arc::new(credentials.clone());
        let (tx, mut rx) = mpsc::unbounded_channel::<Outcome>();
        let mut join_set = JoinSet::new();

        for &id in &unique {
            let semaphore = Arc::clone(&semaphore);
            let transport = Arc::clone(&self.transport);
            let credentials = Arc::clone(&credentials);
            let tx = tx.clone();

            join_set.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => transport.post_batch(&build(id), &credentials).await,
                    Err(e) => Err(AppError::InternalError {
                        message: "dispatch pool closed".to_string(),
                        source: Some(Box::new(e)),
                    }),
                };
                // The collector only stops early on a storage failure, in
                // which case the remaining outcomes are moot.
                let _ = tx.send((id, outcome));
            });
        }
        drop(tx);

        let mut report = DispatchReport::default();
        while let Some((id, outcome)) = rx.recv().await {
            let body = match outcome {
                Ok(response) => {
                    log::info!("Request URL: {}", response.url);
                    log::info!("Response Status Code: {}", response.status);
                    response.data
                }
                Err(e) => {
                    log::warn!("No response for property {}: {}", id, e);
                    report.transport_failures.push(id);
                    String::new()
                }
            };

            let path = self.store.write(id, collection_date, &body)?;
            report.written.push(RawEntry {
                id,
                date: collection_date,
                path,
            });

            if self.progress {
                log::info!("[{}/{}] stored response for {}", report.written.len(), total, id);
            }
        }

        while let Some(joined) = join_set.join_next().await {
            joined?;
        }

        log::info!(
            "Dispatch complete: {} responses stored, {} without a response",
            report.written.len(),
            report.transport_failures.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequestBatch;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes the property id back and tracks peak concurrency.
    struct EchoTransport {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl GraphqlTransport for EchoTransport {
        async fn post_batch(
            &self,
            batch: &RequestBatch,
            _credentials: &CredentialBundle,
        ) -> Result<ApiResponse<String>, AppError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if batch.id().value() % 2 == 0 {
                return Err(AppError::MissingConfiguration("offline".to_string()));
            }
            Ok(ApiResponse {
                data: format!("body-{}", batch.id()),
                status: reqwest::StatusCode::OK,
                url: "https://portal.test/graphql".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_dispatch_writes_every_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path());
        let transport = Arc::new(EchoTransport {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let dispatcher =
            Dispatcher::new(transport.clone(), store.clone(), 3).with_progress(true);
        let ids: Vec<PropertyId> = (1..=10).map(PropertyId::new).collect();
        let credentials = CredentialBundle::from_pairs([("session", "s")]).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let report = dispatcher.dispatch(&ids, &credentials, date).await.unwrap();

        assert_eq!(report.written.len(), 10);
        assert_eq!(report.transport_failures.len(), 5);
        assert!(transport.peak.load(Ordering::SeqCst) <= 3);

        let odd = store.read(&store.path_for(PropertyId::new(7), date)).unwrap();
        assert_eq!(odd, "body-7");
        let even = store.read(&store.path_for(PropertyId::new(4), date)).unwrap();
        assert_eq!(even, "");
    }

    #[tokio::test]
    async fn test_repeated_identifiers_are_sent_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = RawStore::new(dir.path());
        let transport = Arc::new(EchoTransport {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let dispatcher = Dispatcher::new(transport, store, 4);
        let ids: Vec<PropertyId> = [5, 3, 5, 5].into_iter().map(PropertyId::new).collect();
        let credentials = CredentialBundle::from_pairs([("session", "s")]).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let report = dispatcher.dispatch(&ids, &credentials, date).await.unwrap();

        let mut written: Vec<u64> = report.written.iter().map(|e| e.id.value()).collect();
        written.sort_unstable();
        assert_eq!(written, vec![3, 5]);
    }
}
