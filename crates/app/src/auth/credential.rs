//! Inbound credential forwarded to downstream services.

use std::fmt;

use zeroize::Zeroize;

const BEARER_SCHEME: &str = "bearer";

/// The caller's `Authorization` header value, carried verbatim.
///
/// The catalog never verifies this value itself. It is only checked for the
/// `Bearer <token>` shape and then forwarded unchanged to the inventory
/// service with every outbound request made on the caller's behalf.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    header: String,
}

impl Credential {
    /// Wrap an `Authorization` header value.
    ///
    /// Returns `None` unless the value uses the bearer scheme and carries a
    /// non-empty token.
    #[must_use]
    pub fn from_authorization_header(value: &str) -> Option<Self> {
        let (scheme, token) = value.split_once(' ')?;

        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) || token.trim().is_empty() {
            return None;
        }

        Some(Self {
            header: value.to_owned(),
        })
    }

    /// The header value exactly as it was received.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.header
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(**redacted**)")
    }
}

impl Drop for Credential {
    fn drop(&mut self) {
        self.header.zeroize();
    }
}
