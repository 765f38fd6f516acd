// src/session/cookie_export.rs
//! Session cookies handed over through a file by an external login helper.

use super::SessionProvider;
use crate::constants::{
    SESSION_FALLBACK_DELAY_SECS, SESSION_POLL_INTERVAL_MILLIS, SESSION_READY_TIMEOUT_SECS,
};
use crate::error::AppError;
use crate::types::CredentialBundle;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One cookie as exported by browser developer tools.
#[derive(Debug, Deserialize)]
struct ExportedCookie {
    name: String,
    value: String,
}

/// Either `{"name": "value", ...}` or `[{"name": ..., "value": ...}, ...]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CookieExport {
    Map(IndexMap<String, String>),
    List(Vec<ExportedCookie>),
}

/// Waits for a cookie export file and reads the session from it.
#[derive(Debug, Clone)]
pub struct CookieExportSession {
    path: PathBuf,
    ready_timeout: Duration,
    fallback_delay: Duration,
    poll_interval: Duration,
}

impl CookieExportSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ready_timeout: Duration::from_secs(SESSION_READY_TIMEOUT_SECS),
            fallback_delay: Duration::from_secs(SESSION_FALLBACK_DELAY_SECS),
            poll_interval: Duration::from_millis(SESSION_POLL_INTERVAL_MILLIS),
        }
    }

    /// Overrides the readiness wait, the fallback delay and the poll interval.
    pub fn with_timing(
        mut self,
        ready_timeout: Duration,
        fallback_delay: Duration,
        poll_interval: Duration,
    ) -> Self {
        self.ready_timeout = ready_timeout;
        self.fallback_delay = fallback_delay;
        self.poll_interval = poll_interval;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Polls until the export exists and is non-empty, or the wait expires.
    async fn wait_until_ready(&self) -> bool {
        let poll = async {
            loop {
                match tokio::fs::metadata(&self.path).await {
                    Ok(meta) if meta.len() > 0 => return,
                    _ => tokio::time::sleep(self.poll_interval).await,
                }
            }
        };
        tokio::time::timeout(self.ready_timeout, poll).await.is_ok()
    }

    async fn read_bundle(&self) -> Result<CredentialBundle, AppError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::Session(format!("cannot read {}: {}", self.path.display(), e)))?;
        parse_cookie_export(&text)
            .map_err(|e| AppError::Session(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait::async_trait]
impl SessionProvider for CookieExportSession {
    async fn acquire(&self, username: &str, _password: &str) -> Result<CredentialBundle, AppError> {
        log::info!(
            "Waiting for session cookies for {} at {}",
            username,
            self.path.display()
        );
        if !self.wait_until_ready().await {
            log::warn!(
                "Session not ready after {:?}, waiting a further {:?}",
                self.ready_timeout,
                self.fallback_delay
            );
            tokio::time::sleep(self.fallback_delay).await;
        }
        let bundle = self.read_bundle().await?;
        log::info!("Session acquired with {} cookies", bundle.len());
        Ok(bundle)
    }
}

/// Parses either export shape into a non-empty bundle.
pub fn parse_cookie_export(text: &str) -> Result<CredentialBundle, String> {
    let export: CookieExport =
        serde_json::from_str(text).map_err(|e| format!("not a cookie export: {}", e))?;
    let tokens: IndexMap<String, String> = match export {
        CookieExport::Map(map) => map,
        CookieExport::List(list) => list.into_iter().map(|c| (c.name, c.value)).collect(),
    };
    CredentialBundle::new(tokens).map_err(|e| e.to_string())
}
