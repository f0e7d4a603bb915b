//! Endpoint identity.

use std::fmt;

/// A candidate base URL.
///
/// Identity is exact string equality: no case folding and no trailing-slash
/// canonicalization, so `http://a` and `http://a/` are different endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
