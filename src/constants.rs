// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Reading these constants should tell you how a run behaves: where it
//! talks to, how wide it fans out, how long it waits, and what shape the
//! sink expects.

// ---------------------------------------------------------------------------
// Portal endpoint
// ---------------------------------------------------------------------------

/// GraphQL endpoint that answers the facet batch.
pub const PORTAL_GRAPHQL_URL: &str = "https://product.costar.com/graphql";

/// Origin the portal's own front end sends; requests without it are refused.
pub const PORTAL_ORIGIN: &str = "https://product.costar.com";

/// Browser identity presented with every request.
pub const PORTAL_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// Currency code bound into the property-details facet.
pub const FINANCIAL_CURRENCY_CODE: &str = "USD";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Number of requests allowed in flight at once.
pub const DISPATCH_POOL_SIZE: usize = 16;

/// Upper bound accepted for `--workers`.
pub const DISPATCH_POOL_MAX: usize = 64;

/// Per-request timeout. A timed-out call is persisted as an empty body and
/// repaired by the reissue step.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

// ---------------------------------------------------------------------------
// Session acquisition
// ---------------------------------------------------------------------------

/// How long to wait for the login collaborator to signal readiness.
pub const SESSION_READY_TIMEOUT_SECS: u64 = 20;

/// Fixed delay used instead of failing when readiness never arrives.
pub const SESSION_FALLBACK_DELAY_SECS: u64 = 20;

/// Poll interval while waiting for readiness.
pub const SESSION_POLL_INTERVAL_MILLIS: u64 = 250;

// ---------------------------------------------------------------------------
// Raw storage
// ---------------------------------------------------------------------------

/// Date format embedded in raw response file names and the CSV backup.
pub const COLLECTION_DATE_FORMAT: &str = "%m.%d.%Y";

/// Extension of persisted raw responses.
pub const RAW_RESPONSE_EXTENSION: &str = "txt";

// ---------------------------------------------------------------------------
// Sink schema
// ---------------------------------------------------------------------------

/// Maximum stored length of the amenities column.
pub const AMENITIES_MAX_CHARS: usize = 250;

/// Delimiter between amenity entries.
pub const AMENITY_DELIMITER: &str = "; ";

/// Default target table when none is configured.
pub const DEFAULT_TABLE_NAME: &str = "PropertyExport";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing malformed response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
