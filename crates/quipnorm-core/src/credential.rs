//! Session credential sent with every asset request.

use anyhow::{bail, Result};
use std::fmt;

/// Raw `Cookie` header value for an authenticated Quip session.
///
/// Obtained once at startup and handed to the asset store; never global.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reads the credential from the environment variable `var`.
    ///
    /// A missing or blank variable is a configuration error. The value is
    /// otherwise kept exactly as set.
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => Ok(Self(v)),
            _ => bail!("please set the environment variable ${}", var),
        }
    }

    pub fn cookie_header(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
