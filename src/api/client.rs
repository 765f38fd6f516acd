// src/api/client.rs
//! HTTP client wrapper for the portal's GraphQL endpoint.
//!
//! A thin layer over reqwest: fixed browser-like headers, the session
//! cookies, one POST per request batch. No parsing or business logic.

use super::{GraphqlTransport, RequestBatch};
use crate::constants::{PORTAL_ORIGIN, PORTAL_USER_AGENT, REQUEST_TIMEOUT_SECS};
use crate::error::AppError;
use crate::types::CredentialBundle;
use reqwest::{header, Client, Response};
use std::time::Duration;
use url::Url;

/// reqwest client preconfigured for the portal.
#[derive(Clone)]
pub struct PortalHttpClient {
    client: Client,
    endpoint: Url,
}

impl PortalHttpClient {
    pub fn new(endpoint: Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Headers every portal request carries.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(PORTAL_USER_AGENT),
        );
        headers.insert(
            header::ACCEPT_ENCODING,
            header::HeaderValue::from_static("gzip, deflate, br"),
        );
        headers.insert(
            header::CONNECTION,
            header::HeaderValue::from_static("keep-alive"),
        );
        headers.insert(header::ORIGIN, header::HeaderValue::from_static(PORTAL_ORIGIN));
        headers.insert(
            "x-requested-with",
            header::HeaderValue::from_static("XMLHttpRequest"),
        );
        headers
    }

    /// POSTs a raw JSON body with the session cookies attached.
    pub async fn post(
        &self,
        body: String,
        credentials: &CredentialBundle,
    ) -> Result<Response, AppError> {
        let cookie = header::HeaderValue::from_str(&credentials.cookie_header()).map_err(|e| {
            AppError::Session(format!("Session cookies are not a valid header value: {}", e))
        })?;

        log::debug!("POST {} ({} bytes)", self.endpoint, body.len());
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(header::COOKIE, cookie)
            .body(body)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait::async_trait]
impl GraphqlTransport for PortalHttpClient {
    async fn post_batch(
        &self,
        batch: &RequestBatch,
        credentials: &CredentialBundle,
    ) -> Result<ApiResponse<String>, AppError> {
        let response = self.post(batch.payload(), credentials).await?;
        extract_response_text(response).await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
///
/// Error statuses are not turned into errors: the body is whatever the
/// portal sent and is persisted as-is.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
