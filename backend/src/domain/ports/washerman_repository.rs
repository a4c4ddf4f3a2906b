//! Port for washerman persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{PasswordHash, Username, Washerman, WashermanId, WashermanPatch, WashermanProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by washerman repository adapters.
    pub enum WashermanRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "washerman repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "washerman repository query failed: {message}",
    }
}

/// Washerman row awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWasherman {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WashermanRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: WashermanId,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError>;

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Washerman>, WashermanRepositoryError>;

    /// Another account holding `username`, ignoring `id`.
    async fn find_by_username_excluding(
        &self,
        username: &Username,
        id: WashermanId,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError>;

    async fn insert(
        &self,
        washerman: &NewWasherman,
    ) -> Result<WashermanProfile, WashermanRepositoryError>;

    /// All accounts, newest first.
    async fn list(&self) -> Result<Vec<WashermanProfile>, WashermanRepositoryError>;

    async fn update(
        &self,
        id: WashermanId,
        patch: &WashermanPatch,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError>;

    /// Returns `false` when no such account exists.
    async fn delete(&self, id: WashermanId) -> Result<bool, WashermanRepositoryError>;
}
