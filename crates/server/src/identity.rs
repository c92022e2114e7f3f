//! Credential and token seams.
//!
//! Hashing algorithms and token formats are deployment choices, so the
//! service only talks to these traits.

use crate::error::Result;

/// One-way password hashing
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Issues bearer tokens and resolves them back to a subject email
pub trait IdentityProvider: Send + Sync {
    fn issue_token(&self, subject: &str) -> Result<String>;

    /// `None` for malformed, forged or expired tokens
    fn verify_token(&self, token: &str) -> Option<String>;
}
