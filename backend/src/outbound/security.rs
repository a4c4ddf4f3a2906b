//! Argon2 implementation of the `PasswordHasher` port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as EncodedHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{Password, PasswordHash};

/// Argon2id hasher with the crate's default parameters and a random salt
/// per password.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        let Ok(parsed) = EncodedHash::new(hash.as_str()) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.expose().as_bytes(), &parsed)
            .is_ok()
    }
}
