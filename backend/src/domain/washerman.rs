//! Washerman (laundry operator) accounts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::{CredentialValidationError, Password, PasswordHash};
use super::error::FieldError;
use super::text::collapse_whitespace;

/// Width of the stored `washermen.username` column, in characters.
const MAX_USERNAME_CHARS: usize = 255;

/// Validation errors for washerman account fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WashermanValidationError {
    #[error("Username is required")]
    EmptyUsername,
    #[error("Username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error(transparent)]
    Password(#[from] CredentialValidationError),
}

impl WashermanValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::Password(_) => "password",
        }
    }

    /// Convert into a field-level error entry.
    pub fn to_field_error(&self) -> FieldError {
        FieldError::new(self.field(), self.to_string())
    }
}

/// Database identifier of a washerman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WashermanId(i32);

impl WashermanId {
    /// Wrap a raw database identifier.
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for WashermanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sanitised login name.
///
/// # Examples
/// ```
/// use laundry_backend::domain::Username;
///
/// let name = Username::new("  dhobi   ji ").unwrap();
/// assert_eq!(name.as_str(), "dhobi ji");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Sanitise and validate a raw username: whitespace runs collapse to
    /// one space and the result must be non-empty and fit its column.
    pub fn new(raw: &str) -> Result<Self, WashermanValidationError> {
        let sanitised = collapse_whitespace(raw);
        if sanitised.is_empty() {
            return Err(WashermanValidationError::EmptyUsername);
        }
        if sanitised.chars().count() > MAX_USERNAME_CHARS {
            return Err(WashermanValidationError::UsernameTooLong {
                max: MAX_USERNAME_CHARS,
            });
        }
        Ok(Self(sanitised))
    }

    /// Borrow the sanitised username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public washerman account view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WashermanProfile {
    #[schema(value_type = i32, example = 1)]
    pub id: WashermanId,
    #[schema(value_type = String, example = "dhobi")]
    pub username: Username,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored washerman record including the password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Washerman {
    pub profile: WashermanProfile,
    pub password_hash: PasswordHash,
}

/// Validated signup payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WashermanRegistration {
    pub username: Username,
    pub password: Password,
}

impl WashermanRegistration {
    /// Validate raw signup fields, username first.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, WashermanValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::for_storage(password)?,
        })
    }

    /// Validate every field and report all failures.
    pub fn field_errors(username: &str, password: &str) -> Vec<FieldError> {
        [
            Username::new(username).map(drop),
            Password::for_storage(password)
                .map(drop)
                .map_err(WashermanValidationError::from),
        ]
        .into_iter()
        .filter_map(Result::err)
        .map(|err| err.to_field_error())
        .collect()
    }
}

/// Validated partial update. Empty inputs are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WashermanChanges {
    pub username: Option<Username>,
    pub password: Option<Password>,
}

impl WashermanChanges {
    /// Validate the provided fields with the signup rules.
    pub fn try_from_parts(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, WashermanValidationError> {
        Ok(Self {
            username: username
                .filter(|raw| !raw.is_empty())
                .map(Username::new)
                .transpose()?,
            password: password
                .filter(|raw| !raw.is_empty())
                .map(Password::for_storage)
                .transpose()?,
        })
    }
}

/// Column changes applied by a repository update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WashermanPatch {
    pub username: Option<Username>,
    pub password_hash: Option<PasswordHash>,
    pub updated_at: DateTime<Utc>,
}
