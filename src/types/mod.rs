use thiserror::Error;

mod credentials;
mod ids;
mod names;

pub use credentials::*;
pub use ids::*;
pub use names::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid property ID: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid table name: {name} - {reason}")]
    InvalidTableName { name: String, reason: String },
}
