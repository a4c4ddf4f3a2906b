//! Driving port for washerman account use-cases.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, WashermanId, WashermanProfile};

/// Raw signup fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WashermanSignup {
    pub username: String,
    pub password: String,
}

/// Raw partial update; empty strings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WashermanUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WashermanAccounts: Send + Sync {
    async fn sign_up(&self, signup: WashermanSignup) -> Result<WashermanProfile, Error>;

    /// Authenticate by username. Any mismatch yields the same unauthorised
    /// error.
    async fn log_in(&self, credentials: LoginCredentials) -> Result<WashermanProfile, Error>;

    async fn list_washermen(&self) -> Result<Vec<WashermanProfile>, Error>;

    async fn update_washerman(
        &self,
        id: WashermanId,
        update: WashermanUpdate,
    ) -> Result<WashermanProfile, Error>;

    async fn delete_washerman(&self, id: WashermanId) -> Result<(), Error>;
}
