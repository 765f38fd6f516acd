//! Session credentials handed over by the login collaborator.

use super::ValidationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named session tokens (browser cookies) used to authorize portal requests.
///
/// Insertion order is preserved so the rendered `Cookie` header is stable
/// across runs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialBundle(IndexMap<String, String>);

impl CredentialBundle {
    /// Builds a bundle, rejecting an empty token set.
    pub fn new(tokens: IndexMap<String, String>) -> Result<Self, ValidationError> {
        if tokens.is_empty() {
            return Err(ValidationError::EmptyField("credential bundle"));
        }
        Ok(Self(tokens))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the bundle as a `Cookie` header value.
    pub fn cookie_header(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// Token values never reach the logs.
impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_preserves_order() {
        let bundle =
            CredentialBundle::from_pairs([("session", "abc"), ("csrf", "xyz")]).unwrap();
        assert_eq!(bundle.cookie_header(), "session=abc; csrf=xyz");
        assert_eq!(bundle.get("csrf"), Some("xyz"));
    }

    #[test]
    fn test_empty_bundle_rejected() {
        let empty: [(&str, &str); 0] = [];
        assert!(CredentialBundle::from_pairs(empty).is_err());
    }

    #[test]
    fn test_debug_redacts_values() {
        let bundle = CredentialBundle::from_pairs([("session", "secret-token")]).unwrap();
        let rendered = format!("{:?}", bundle);
        assert!(rendered.contains("session"));
        assert!(!rendered.contains("secret-token"));
    }
}
