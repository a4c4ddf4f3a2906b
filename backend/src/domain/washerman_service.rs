//! Washerman account service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::port_error_mapping::{map_password_hasher_error, map_washerman_repository_error};
use crate::domain::ports::{
    NewWasherman, PasswordHasher, WashermanAccounts, WashermanRepository, WashermanSignup,
    WashermanUpdate,
};
use crate::domain::{
    Error, LoginCredentials, Username, WashermanChanges, WashermanId, WashermanPatch,
    WashermanProfile, WashermanRegistration, WashermanValidationError,
};

const WASHERMAN_NOT_FOUND: &str = "Washerman not found";
const USERNAME_TAKEN: &str = "Username already exists";
const INVALID_LOGIN: &str = "Invalid credentials";

fn map_validation_error(error: WashermanValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Domain service implementing [`WashermanAccounts`].
#[derive(Clone)]
pub struct WashermanService<R, H> {
    washermen: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<R, H> WashermanService<R, H> {
    /// Create a service over the washerman store, hasher and clock.
    pub fn new(washermen: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            washermen,
            hasher,
            clock,
        }
    }
}

#[async_trait]
impl<R, H> WashermanAccounts for WashermanService<R, H>
where
    R: WashermanRepository,
    H: PasswordHasher,
{
    async fn sign_up(&self, signup: WashermanSignup) -> Result<WashermanProfile, Error> {
        let registration = WashermanRegistration::try_from_parts(&signup.username, &signup.password)
            .map_err(map_validation_error)?;
        let taken = self
            .washermen
            .find_by_username(&registration.username)
            .await
            .map_err(map_washerman_repository_error)?;
        if taken.is_some() {
            return Err(Error::conflict(USERNAME_TAKEN));
        }

        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(map_password_hasher_error)?;
        let profile = self
            .washermen
            .insert(&NewWasherman {
                username: registration.username,
                password_hash,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_washerman_repository_error)?;
        info!(washerman_id = %profile.id, "washerman registered");
        Ok(profile)
    }

    async fn log_in(&self, credentials: LoginCredentials) -> Result<WashermanProfile, Error> {
        let Ok(username) = Username::new(credentials.identifier()) else {
            return Err(Error::unauthorized(INVALID_LOGIN));
        };
        let washerman = self
            .washermen
            .find_by_username(&username)
            .await
            .map_err(map_washerman_repository_error)?;

        match washerman {
            Some(account) if self.hasher.verify(credentials.password(), &account.password_hash) => {
                Ok(account.profile)
            }
            _ => {
                warn!("washerman login rejected");
                Err(Error::unauthorized(INVALID_LOGIN))
            }
        }
    }

    async fn list_washermen(&self) -> Result<Vec<WashermanProfile>, Error> {
        self.washermen
            .list()
            .await
            .map_err(map_washerman_repository_error)
    }

    async fn update_washerman(
        &self,
        id: WashermanId,
        update: WashermanUpdate,
    ) -> Result<WashermanProfile, Error> {
        self.washermen
            .find_by_id(id)
            .await
            .map_err(map_washerman_repository_error)?
            .ok_or_else(|| Error::not_found(WASHERMAN_NOT_FOUND))?;
        let changes = WashermanChanges::try_from_parts(
            update.username.as_deref(),
            update.password.as_deref(),
        )
        .map_err(map_validation_error)?;

        if let Some(username) = &changes.username {
            let holder = self
                .washermen
                .find_by_username_excluding(username, id)
                .await
                .map_err(map_washerman_repository_error)?;
            if holder.is_some() {
                return Err(Error::conflict(USERNAME_TAKEN));
            }
        }

        let password_hash = changes
            .password
            .as_ref()
            .map(|password| self.hasher.hash(password))
            .transpose()
            .map_err(map_password_hasher_error)?;
        let profile = self
            .washermen
            .update(
                id,
                &WashermanPatch {
                    username: changes.username,
                    password_hash,
                    updated_at: self.clock.utc(),
                },
            )
            .await
            .map_err(map_washerman_repository_error)?
            .ok_or_else(|| Error::not_found(WASHERMAN_NOT_FOUND))?;
        info!(washerman_id = %profile.id, "washerman updated");
        Ok(profile)
    }

    async fn delete_washerman(&self, id: WashermanId) -> Result<(), Error> {
        let removed = self
            .washermen
            .delete(id)
            .await
            .map_err(map_washerman_repository_error)?;
        if !removed {
            return Err(Error::not_found(WASHERMAN_NOT_FOUND));
        }
        info!(washerman_id = %id, "washerman deleted");
        Ok(())
    }
}
