//! Account signup and login handlers.
//!
//! ```text
//! POST /api/auth/student/signup
//! POST /api/auth/student/login    {"email":"a@rishihood.edu.in","password":"secret1"}
//! POST /api/auth/washerman/signup
//! POST /api/auth/washerman/login  {"username":"ravi","password":"secret1"}
//! ```
//!
//! Login returns the account profile; no session or token is issued.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::WashermanSignup;
use crate::domain::{
    EmailAddress, Error, FieldError, LoginCredentials, StudentProfile, StudentSignup,
    WashermanProfile, WashermanRegistration, normalise_email,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldErrors, FieldName};

const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const USERNAME: FieldName = FieldName::new("username");

/// Student signup body. Missing fields are reported by validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentSignupRequest {
    #[schema(example = "B-12")]
    pub bag_no: Option<String>,
    #[schema(example = "Asha Verma")]
    pub name: Option<String>,
    #[schema(example = "asha@rishihood.edu.in")]
    pub email: Option<String>,
    #[schema(example = "2023CS101")]
    pub enrollment_no: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
    #[schema(example = "9876543210")]
    pub phone_no: Option<String>,
    #[schema(example = "H-204")]
    pub residency_no: Option<String>,
}

impl From<StudentSignupRequest> for StudentSignup {
    fn from(value: StudentSignupRequest) -> Self {
        Self {
            bag_no: value.bag_no.unwrap_or_default(),
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            enrollment_no: value.enrollment_no.unwrap_or_default(),
            password: value.password.unwrap_or_default(),
            phone_no: value.phone_no.unwrap_or_default(),
            residency_no: value.residency_no.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct StudentLoginRequest {
    #[schema(example = "asha@rishihood.edu.in")]
    pub email: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Washerman signup and login body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct WashermanCredentialsRequest {
    #[schema(example = "ravi")]
    pub username: Option<String>,
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

fn credentials(
    field: &'static str,
    identifier: &str,
    password: &str,
) -> Result<LoginCredentials, Error> {
    LoginCredentials::try_from_parts(field, identifier, password)
        .map_err(|err| Error::validation(vec![FieldError::new(field, err.to_string())]))
}

/// Register a student account.
#[utoipa::path(
    post,
    path = "/api/auth/student/signup",
    request_body = StudentSignupRequest,
    responses(
        (status = 201, description = "Student registered", body = ApiResponse<StudentProfile>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 409, description = "Email, enrollment or bag number taken", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "studentSignup"
)]
#[post("/auth/student/signup")]
pub async fn student_signup(
    state: web::Data<HttpState>,
    payload: web::Json<StudentSignupRequest>,
) -> ApiResult<HttpResponse> {
    let signup = StudentSignup::from(payload.into_inner());
    let errors = signup.field_errors(&state.email_policy);
    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    let student = state.students.sign_up(signup).await?;
    Ok(ApiResponse::with_message("Student registered successfully", student).created())
}

/// Authenticate a student by email and password.
#[utoipa::path(
    post,
    path = "/api/auth/student/login",
    request_body = StudentLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<StudentProfile>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Invalid email or password", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "studentLogin"
)]
#[post("/auth/student/login")]
pub async fn student_login(
    state: web::Data<HttpState>,
    payload: web::Json<StudentLoginRequest>,
) -> ApiResult<HttpResponse> {
    let StudentLoginRequest { email, password } = payload.into_inner();
    let email = normalise_email(email.as_deref().unwrap_or_default());
    let password = password.unwrap_or_default();

    let mut errors = FieldErrors::new();
    if EmailAddress::parse_shape(&email).is_err() {
        errors.push(EMAIL, "Valid email is required");
    }
    if password.is_empty() {
        errors.push(PASSWORD, "Password is required");
    }
    errors.finish()?;

    let student = state
        .students
        .log_in(credentials("email", &email, &password)?)
        .await?;
    Ok(ApiResponse::with_message("Login successful", student).ok())
}

/// Register a washerman account.
#[utoipa::path(
    post,
    path = "/api/auth/washerman/signup",
    request_body = WashermanCredentialsRequest,
    responses(
        (status = 201, description = "Washerman registered", body = ApiResponse<WashermanProfile>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 409, description = "Username already exists", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "washermanSignup"
)]
#[post("/auth/washerman/signup")]
pub async fn washerman_signup(
    state: web::Data<HttpState>,
    payload: web::Json<WashermanCredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let WashermanCredentialsRequest { username, password } = payload.into_inner();
    let signup = WashermanSignup {
        username: username.unwrap_or_default(),
        password: password.unwrap_or_default(),
    };
    let errors = WashermanRegistration::field_errors(&signup.username, &signup.password);
    if !errors.is_empty() {
        return Err(Error::validation(errors));
    }

    let washerman = state.washermen.sign_up(signup).await?;
    Ok(ApiResponse::with_message("Washerman registered successfully", washerman).created())
}

/// Authenticate a washerman by username and password.
#[utoipa::path(
    post,
    path = "/api/auth/washerman/login",
    request_body = WashermanCredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<WashermanProfile>),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "washermanLogin"
)]
#[post("/auth/washerman/login")]
pub async fn washerman_login(
    state: web::Data<HttpState>,
    payload: web::Json<WashermanCredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let WashermanCredentialsRequest { username, password } = payload.into_inner();
    let username = username.unwrap_or_default();
    let password = password.unwrap_or_default();

    let mut errors = FieldErrors::new();
    errors.require_text(Some(&username), USERNAME, "Username is required");
    if password.is_empty() {
        errors.push(PASSWORD, "Password is required");
    }
    errors.finish()?;

    let washerman = state
        .washermen
        .log_in(credentials("username", &username, &password)?)
        .await?;
    Ok(ApiResponse::with_message("Login successful", washerman).ok())
}
