//! Credential and token primitives: password hashing, JWT issuance and
//! verification, and the revocation denylist.

pub mod claims;
pub mod denylist;
pub mod jwt;
pub mod password;

pub use claims::Claims;
pub use jwt::{
    mint_access_token, refresh_access_token, revoke_access_token, verify_access_token,
    IssuedToken,
};
pub use password::{hash_password, verify_password};
