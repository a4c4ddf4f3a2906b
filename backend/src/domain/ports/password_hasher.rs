//! Port for one-way password hashing.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password digest.
    pub enum PasswordHasherError {
        /// The hashing backend rejected the input or its parameters.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

/// Hashes new passwords and checks login attempts against stored digests.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// `false` for a mismatch or an unreadable digest.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool;
}
