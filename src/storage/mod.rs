// src/storage/mod.rs
//! Raw response persistence.
//!
//! Responses are written before any parsing happens, overwritten only by a
//! reissue, and deleted once the table has been loaded.

mod paths;
mod raw_store;

pub use paths::{backup_file_name, raw_file_name};
pub use raw_store::{RawEntry, RawStore};
