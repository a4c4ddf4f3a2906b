//! Authentication primitives: passwords, stored hashes and login credentials.
//!
//! Plaintext passwords are held in [`Zeroizing`] buffers and never serialised.
//! Hashes are opaque strings produced by the
//! [`PasswordHasher`](crate::domain::ports::PasswordHasher) port.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum length accepted for a new or changed password.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Errors returned when password or credential inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// Login identifier (email or username) was blank.
    #[error("{field} is required")]
    EmptyIdentifier { field: &'static str },
    /// Password was empty.
    #[error("Password is required")]
    EmptyPassword,
    /// New password is shorter than [`PASSWORD_MIN_LEN`].
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
}

/// Plaintext password supplied by a caller.
///
/// The value keeps caller-provided whitespace so comparisons are not
/// surprising.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a password for a login attempt; only emptiness is rejected.
    pub fn for_login(raw: &str) -> Result<Self, CredentialValidationError> {
        if raw.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Accept a password that will be stored; enforces the minimum length.
    ///
    /// # Examples
    /// ```
    /// use laundry_backend::domain::Password;
    ///
    /// assert!(Password::for_storage("secret").is_ok());
    /// assert!(Password::for_storage("short").is_err());
    /// ```
    pub fn for_storage(raw: &str) -> Result<Self, CredentialValidationError> {
        if raw.chars().count() < PASSWORD_MIN_LEN {
            return Err(CredentialValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Expose the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Stored password digest.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a digest produced by a hasher or loaded from storage.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Borrow the encoded digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated login credentials used by the account services.
///
/// ## Invariants
/// - `identifier` is trimmed and non-empty.
/// - `password` is non-empty.
///
/// # Examples
/// ```
/// use laundry_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("username", "  dhobi ", "secret").unwrap();
/// assert_eq!(creds.identifier(), "dhobi");
/// assert_eq!(creds.password().expose(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    identifier: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from a raw identifier and password.
    ///
    /// `field` names the identifier in validation messages (`Email`,
    /// `Username`).
    pub fn try_from_parts(
        field: &'static str,
        identifier: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(CredentialValidationError::EmptyIdentifier { field });
        }
        Ok(Self {
            identifier: identifier.to_owned(),
            password: Password::for_login(password)?,
        })
    }

    /// Trimmed identifier suitable for lookups.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}
