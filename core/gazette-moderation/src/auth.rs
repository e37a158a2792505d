//! HTTP Basic authentication gate for admin routes.
//!
//! Credentials are process-wide configuration, fixed for the lifetime of
//! the server. Every malformed input — missing header, wrong scheme,
//! undecodable payload, missing separator — fails closed.

use base64::{engine::general_purpose::STANDARD, Engine};

/// The configured admin username/password pair.
///
/// Constructed once at startup from the environment and handed to the
/// router. When either half is empty, authentication always fails and
/// admin routes are effectively disabled.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let creds = Self {
            username: username.into(),
            password: password.into(),
        };
        if !creds.is_configured() {
            tracing::warn!("admin credentials not configured; admin routes are disabled");
        }
        creds
    }

    /// Both halves must be non-empty for authentication to ever succeed.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Validates an `Authorization` header value against the configured
    /// pair. Exact, case-sensitive comparison on both fields.
    #[must_use]
    pub fn authenticate(&self, header: Option<&str>) -> bool {
        if !self.is_configured() {
            return false;
        }
        let Some(header) = header else {
            return false;
        };
        let Some((username, password)) = parse_basic_header(header) else {
            return false;
        };
        username == self.username && password == self.password
    }
}

/// Parses a `Basic <base64(username:password)>` header value.
fn parse_basic_header(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
