//! Claims carried by every access token this backend issues.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User id (UUID, hyphenated)
    pub sub: String,
    /// Issuer; must equal `SecurityConfig::issuer`
    pub iss: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    /// Issued-at of the login that started this refresh chain. Carried
    /// unchanged through refreshes; the refresh window is measured from it.
    pub orig_iat: i64,
    /// Unique token id, the denylist key
    pub jti: String,
}
