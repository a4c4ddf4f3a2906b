//! Student accounts: bag numbers, institution emails and profile records.
//!
//! Raw signup and update payloads are validated here so both the HTTP
//! validation layer and the account service apply the same rules.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use super::auth::{CredentialValidationError, Password, PasswordHash};
use super::error::FieldError;
use super::text::collapse_whitespace;

/// Institution domain used when configuration does not override it.
pub const DEFAULT_EMAIL_DOMAIN: &str = "rishihood.edu.in";

/// Widths of the stored `students` columns, in characters.
const MAX_BAG_NO_CHARS: usize = 32;
const MAX_EMAIL_CHARS: usize = 255;

/// A free-text student field: wire name, message label and column width.
#[derive(Debug, Clone, Copy)]
struct TextField {
    field: &'static str,
    label: &'static str,
    max_chars: usize,
}

const NAME: TextField = TextField {
    field: "name",
    label: "Name",
    max_chars: 255,
};
const ENROLLMENT_NO: TextField = TextField {
    field: "enrollmentNo",
    label: "Enrollment number",
    max_chars: 64,
};
const PHONE_NO: TextField = TextField {
    field: "phoneNo",
    label: "Phone number",
    max_chars: 32,
};
const RESIDENCY_NO: TextField = TextField {
    field: "residencyNo",
    label: "Residency number",
    max_chars: 64,
};

static BAG_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn bag_number_regex() -> &'static Regex {
    BAG_NUMBER_RE.get_or_init(|| {
        Regex::new("^[BG]-[0-9]+$")
            .unwrap_or_else(|error| panic!("bag number regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validation errors for student account fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    /// A required text field was blank once sanitised.
    #[error("{label} is required")]
    Required {
        field: &'static str,
        label: &'static str,
    },
    /// Email does not belong to the institution domain.
    #[error("Please use your university email ending in {domain}")]
    EmailDomain { domain: String },
    /// Email is not shaped like `local@host.tld`.
    #[error("Invalid email format")]
    InvalidEmail,
    /// Bag number does not match `[BG]-<digits>`.
    #[error("Bag number must start with B- or G- followed by numbers")]
    InvalidBagNumber,
    /// Value is wider than its stored column.
    #[error("{label} must be at most {max} characters")]
    TooLong {
        field: &'static str,
        label: &'static str,
        max: usize,
    },
    /// Password rules were violated.
    #[error(transparent)]
    Password(#[from] CredentialValidationError),
}

impl StudentValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field, .. } | Self::TooLong { field, .. } => field,
            Self::EmailDomain { .. } | Self::InvalidEmail => "email",
            Self::InvalidBagNumber => "bagNo",
            Self::Password(_) => "password",
        }
    }

    /// Convert into a field-level error entry.
    pub fn to_field_error(&self) -> FieldError {
        FieldError::new(self.field(), self.to_string())
    }
}

/// Email acceptance rules for student accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailPolicy {
    domain: String,
}

impl EmailPolicy {
    /// Accept only addresses ending with `domain`.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into().trim().to_lowercase(),
        }
    }

    /// Institution domain suffix.
    pub fn domain(&self) -> &str {
        self.domain.as_str()
    }
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL_DOMAIN)
    }
}

/// Student laundry-bag identifier, `B-<digits>` or `G-<digits>`.
///
/// # Examples
/// ```
/// use laundry_backend::domain::BagNumber;
///
/// assert!(BagNumber::parse("B-12").is_ok());
/// assert!(BagNumber::parse("X-12").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BagNumber(String);

impl BagNumber {
    /// Validate a raw bag number. Whitespace is not tolerated.
    pub fn parse(raw: &str) -> Result<Self, StudentValidationError> {
        if raw.is_empty() {
            return Err(StudentValidationError::Required {
                field: "bagNo",
                label: "Bag number",
            });
        }
        if !bag_number_regex().is_match(raw) {
            return Err(StudentValidationError::InvalidBagNumber);
        }
        if raw.chars().count() > MAX_BAG_NO_CHARS {
            return Err(StudentValidationError::TooLong {
                field: "bagNo",
                label: "Bag number",
                max: MAX_BAG_NO_CHARS,
            });
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the bag number.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for BagNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for BagNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalise an email for storage and lookups: trimmed and lower-cased.
pub fn normalise_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Lower-cased student email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate an email against the institution policy.
    ///
    /// The domain rule is checked before the address shape.
    pub fn parse(raw: &str, policy: &EmailPolicy) -> Result<Self, StudentValidationError> {
        let normalised = normalise_email(raw);
        if normalised.is_empty() {
            return Err(StudentValidationError::Required {
                field: "email",
                label: "Email",
            });
        }
        if !normalised.ends_with(policy.domain()) {
            return Err(StudentValidationError::EmailDomain {
                domain: policy.domain().to_owned(),
            });
        }
        Self::parse_shape(&normalised)
    }

    /// Validate only the address shape; used for stored records.
    pub fn parse_shape(raw: &str) -> Result<Self, StudentValidationError> {
        let normalised = normalise_email(raw);
        if !email_regex().is_match(&normalised) {
            return Err(StudentValidationError::InvalidEmail);
        }
        if normalised.chars().count() > MAX_EMAIL_CHARS {
            return Err(StudentValidationError::TooLong {
                field: "email",
                label: "Email",
                max: MAX_EMAIL_CHARS,
            });
        }
        Ok(Self(normalised))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn required_text(raw: &str, column: TextField) -> Result<String, StudentValidationError> {
    let TextField {
        field,
        label,
        max_chars,
    } = column;
    let sanitised = collapse_whitespace(raw);
    if sanitised.is_empty() {
        return Err(StudentValidationError::Required { field, label });
    }
    if sanitised.chars().count() > max_chars {
        return Err(StudentValidationError::TooLong {
            field,
            label,
            max: max_chars,
        });
    }
    Ok(sanitised)
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|raw| !raw.is_empty())
}

/// Public student profile; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[schema(value_type = String, example = "B-12")]
    pub bag_no: BagNumber,
    #[schema(example = "Asha Verma")]
    pub name: String,
    #[schema(value_type = String, example = "asha@rishihood.edu.in")]
    pub email: EmailAddress,
    #[schema(example = "2023CS101")]
    pub enrollment_no: String,
    #[schema(example = "9876543210")]
    pub phone_no: String,
    #[schema(example = "H-204")]
    pub residency_no: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored student record including the password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub profile: StudentProfile,
    pub password_hash: PasswordHash,
}

/// Raw signup payload as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentSignup {
    pub bag_no: String,
    pub name: String,
    pub email: String,
    pub enrollment_no: String,
    pub password: String,
    pub phone_no: String,
    pub residency_no: String,
}

/// Signup payload after validation and sanitisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRegistration {
    pub bag_no: BagNumber,
    pub name: String,
    pub email: EmailAddress,
    pub enrollment_no: String,
    pub phone_no: String,
    pub residency_no: String,
    pub password: Password,
}

impl StudentSignup {
    /// Validate the payload, reporting the first failure.
    ///
    /// Business rules come first in a fixed order: email domain, email
    /// shape, bag number. Required-field and password checks follow.
    pub fn validate(&self, policy: &EmailPolicy) -> Result<StudentRegistration, StudentValidationError> {
        let email = EmailAddress::parse(&self.email, policy)?;
        let bag_no = BagNumber::parse(&self.bag_no)?;
        Ok(StudentRegistration {
            bag_no,
            name: required_text(&self.name, NAME)?,
            email,
            enrollment_no: required_text(&self.enrollment_no, ENROLLMENT_NO)?,
            phone_no: required_text(&self.phone_no, PHONE_NO)?,
            residency_no: required_text(&self.residency_no, RESIDENCY_NO)?,
            password: Password::for_storage(&self.password)?,
        })
    }

    /// Validate every field and report all failures in field order.
    pub fn field_errors(&self, policy: &EmailPolicy) -> Vec<FieldError> {
        let checks: [Result<(), StudentValidationError>; 7] = [
            BagNumber::parse(&self.bag_no).map(drop),
            required_text(&self.name, NAME).map(drop),
            EmailAddress::parse(&self.email, policy).map(drop),
            required_text(&self.enrollment_no, ENROLLMENT_NO).map(drop),
            Password::for_storage(&self.password)
                .map(drop)
                .map_err(StudentValidationError::from),
            required_text(&self.phone_no, PHONE_NO).map(drop),
            required_text(&self.residency_no, RESIDENCY_NO).map(drop),
        ];
        checks
            .into_iter()
            .filter_map(Result::err)
            .map(|err| err.to_field_error())
            .collect()
    }
}

/// Raw partial update; empty strings count as "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub enrollment_no: Option<String>,
    pub phone_no: Option<String>,
    pub residency_no: Option<String>,
    pub password: Option<String>,
}

/// Validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub enrollment_no: Option<String>,
    pub phone_no: Option<String>,
    pub residency_no: Option<String>,
    pub password: Option<Password>,
}

impl StudentUpdate {
    /// Validate each provided field with the signup rules.
    pub fn validate(&self, policy: &EmailPolicy) -> Result<StudentChanges, StudentValidationError> {
        Ok(StudentChanges {
            name: present(self.name.as_ref())
                .map(|raw| required_text(raw, NAME))
                .transpose()?,
            email: present(self.email.as_ref())
                .map(|raw| EmailAddress::parse(raw, policy))
                .transpose()?,
            phone_no: present(self.phone_no.as_ref())
                .map(|raw| required_text(raw, PHONE_NO))
                .transpose()?,
            residency_no: present(self.residency_no.as_ref())
                .map(|raw| required_text(raw, RESIDENCY_NO))
                .transpose()?,
            enrollment_no: present(self.enrollment_no.as_ref())
                .map(|raw| required_text(raw, ENROLLMENT_NO))
                .transpose()?,
            password: present(self.password.as_ref())
                .map(Password::for_storage)
                .transpose()?,
        })
    }
}

/// Column changes applied by a repository update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub enrollment_no: Option<String>,
    pub phone_no: Option<String>,
    pub residency_no: Option<String>,
    pub password_hash: Option<PasswordHash>,
    pub updated_at: DateTime<Utc>,
}

/// Unique keys probed before inserting or updating a student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUniqueKeys {
    pub email: Option<EmailAddress>,
    pub enrollment_no: Option<String>,
    pub bag_no: Option<BagNumber>,
}

/// Which unique field collided with an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StudentConflict {
    #[error("Email already exists")]
    Email,
    #[error("Enrollment number already exists")]
    EnrollmentNo,
    #[error("Bag number already exists")]
    BagNo,
}

impl StudentUniqueKeys {
    /// Report the highest-priority collision among `existing` records.
    ///
    /// Priority is email, then enrollment number, then bag number, so the
    /// reported field does not depend on the order the store returns rows.
    pub fn first_conflict(&self, existing: &[StudentProfile]) -> Option<StudentConflict> {
        let email_taken = self
            .email
            .as_ref()
            .is_some_and(|email| existing.iter().any(|s| &s.email == email));
        let enrollment_taken = self
            .enrollment_no
            .as_ref()
            .is_some_and(|no| existing.iter().any(|s| &s.enrollment_no == no));
        let bag_taken = self
            .bag_no
            .as_ref()
            .is_some_and(|bag| existing.iter().any(|s| &s.bag_no == bag));

        if email_taken {
            Some(StudentConflict::Email)
        } else if enrollment_taken {
            Some(StudentConflict::EnrollmentNo)
        } else if bag_taken {
            Some(StudentConflict::BagNo)
        } else {
            None
        }
    }
}
