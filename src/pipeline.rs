// src/pipeline.rs
//! One collection run, end to end:
//! session → dispatch → parse/reissue → normalize → backup → load → cleanup.
//!
//! Row-local failures (a property whose response stays broken after its
//! reissue) are collected in the report; everything else ends the run.

use crate::analytics::{Phase, PhaseTimings};
use crate::api::{DispatchReport, Dispatcher, GraphqlTransport, Reconciler};
use crate::error::AppError;
use crate::model::{FailedProperty, ParsedRecord, PropertyTable};
use crate::normalize::normalize_table;
use crate::parser;
use crate::session::SessionProvider;
use crate::sink::{read_backup, write_backup, LoadReport, TableSink};
use crate::storage::{RawEntry, RawStore};
use crate::types::{CredentialBundle, PropertyId};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Account credentials handed to the session provider.
#[derive(Clone)]
pub struct Login {
    pub username: String,
    pub password: String,
}

/// What a run did.
#[derive(Debug)]
pub struct RunReport {
    pub requested: usize,
    pub transport_failures: Vec<PropertyId>,
    pub reissued: usize,
    pub failures: Vec<FailedProperty>,
    pub load: LoadReport,
    pub backup: PathBuf,
    pub raw_files_removed: usize,
    pub timings: PhaseTimings,
}

/// Loads a compiled CSV backup into `sink` without contacting the portal.
///
/// The backup already holds normalized values, so it goes to the sink as is.
pub fn reload_backup<S: TableSink>(
    sink: &mut S,
    backup: &Path,
    collected_at: NaiveDateTime,
) -> Result<LoadReport, AppError> {
    log::info!("Reloading backup {}", backup.display());
    let table = read_backup(backup)?;
    sink.load(&table, collected_at)
}

/// The collaborators of a run.
pub struct Harvest<S: TableSink> {
    session: Arc<dyn SessionProvider>,
    transport: Arc<dyn GraphqlTransport>,
    store: RawStore,
    sink: S,
    workers: usize,
    progress: bool,
}

impl<S: TableSink> Harvest<S> {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        transport: Arc<dyn GraphqlTransport>,
        store: RawStore,
        sink: S,
        workers: usize,
    ) -> Self {
        Self {
            session,
            transport,
            store,
            sink,
            workers,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs every phase for `ids`, stamping the load with `collected_at`.
    pub async fn run(
        &mut self,
        ids: &[PropertyId],
        login: &Login,
        collected_at: NaiveDateTime,
    ) -> Result<RunReport, AppError> {
        let mut timings = PhaseTimings::start();

        let credentials = timings
            .time(
                Phase::Session,
                self.session.acquire(&login.username, &login.password),
            )
            .await?;

        let dispatcher =
            Dispatcher::new(Arc::clone(&self.transport), self.store.clone(), self.workers)
                .with_progress(self.progress);
        let dispatch = timings
            .time(
                Phase::Dispatch,
                dispatcher.dispatch(ids, &credentials, collected_at.date()),
            )
            .await?;

        let (table, reissued, failures) = timings
            .time(Phase::Parse, self.assemble(&dispatch, &credentials))
            .await?;
        let table = normalize_table(table);

        let backup = self.store.backup_path(collected_at.date());
        write_backup(&backup, &table)?;

        let load_started = std::time::Instant::now();
        let load = self.sink.load(&table, collected_at)?;
        timings.record(Phase::Load, load_started.elapsed());

        let raw_files_removed = self
            .store
            .remove_all(dispatch.written.iter().map(|entry| entry.path.as_path()))?;

        timings.finish();
        log::info!("Run complete: {}", timings);
        for failure in &failures {
            log::error!("No row for property {}", failure);
        }

        Ok(RunReport {
            requested: ids.len(),
            transport_failures: dispatch.transport_failures,
            reissued,
            failures,
            load,
            backup,
            raw_files_removed,
            timings,
        })
    }

    /// Parses every stored response, reissuing structurally broken ones once.
    async fn assemble(
        &self,
        dispatch: &DispatchReport,
        credentials: &CredentialBundle,
    ) -> Result<(PropertyTable, usize, Vec<FailedProperty>), AppError> {
        let reconciler = Reconciler::new(Arc::clone(&self.transport), self.store.clone());
        let mut table = PropertyTable::with_capacity(dispatch.written.len());
        let mut failures = Vec::new();
        let mut reissued = 0;

        for entry in &dispatch.written {
            match self.parse_entry(entry, &reconciler, credentials, &mut reissued).await {
                Ok(record) => table.push(record),
                Err(e) if e.is_row_local() => failures.push(FailedProperty {
                    id: entry.id,
                    cause: e.to_string(),
                }),
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Parsed {} responses into {} rows ({} reissued, {} failed)",
            dispatch.written.len(),
            table.len(),
            reissued,
            failures.len()
        );
        Ok((table, reissued, failures))
    }

    async fn parse_entry(
        &self,
        entry: &RawEntry,
        reconciler: &Reconciler,
        credentials: &CredentialBundle,
        reissued: &mut usize,
    ) -> Result<ParsedRecord, AppError> {
        let raw = self.store.read(&entry.path)?;
        match parser::parse(entry.id, &raw) {
            Err(AppError::StructuralParse { id, defect }) => {
                log::warn!("Property {}: {}; reissuing", id, defect);
                *reissued += 1;
                reconciler.reconcile(id, entry.date, credentials).await
            }
            other => other,
        }
    }
}
