// src/session/mod.rs
//! Session acquisition.
//!
//! Logging in happens outside this crate; a provider only has to hand back
//! the resulting named tokens.

mod cookie_export;

pub use cookie_export::{parse_cookie_export, CookieExportSession};

use crate::error::AppError;
use crate::types::CredentialBundle;

/// The ability to turn account credentials into session tokens.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    async fn acquire(&self, username: &str, password: &str) -> Result<CredentialBundle, AppError>;
}

/// A session that is already known, e.g. cookies passed in directly.
#[derive(Debug, Clone)]
pub struct StaticSession {
    bundle: CredentialBundle,
}

impl StaticSession {
    pub fn new(bundle: CredentialBundle) -> Self {
        Self { bundle }
    }
}

#[async_trait::async_trait]
impl SessionProvider for StaticSession {
    async fn acquire(
        &self,
        _username: &str,
        _password: &str,
    ) -> Result<CredentialBundle, AppError> {
        Ok(self.bundle.clone())
    }
}
