//! PostgreSQL-backed `WashermanRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewWasherman, WashermanRepository, WashermanRepositoryError};
use crate::domain::{
    PasswordHash, Username, Washerman, WashermanId, WashermanPatch, WashermanProfile,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewWashermanRow, WashermanChangeset, WashermanRow};
use super::pool::{DbPool, PoolError};
use super::schema::washermen;

/// Diesel implementation of the washerman repository port.
#[derive(Clone)]
pub struct DieselWashermanRepository {
    pool: DbPool,
}

impl DieselWashermanRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> WashermanRepositoryError {
    map_basic_pool_error(error, WashermanRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> WashermanRepositoryError {
    map_basic_diesel_error(
        error,
        WashermanRepositoryError::query,
        WashermanRepositoryError::connection,
    )
}

fn row_to_washerman(row: WashermanRow) -> Result<Washerman, WashermanRepositoryError> {
    let username = Username::new(&row.username)
        .map_err(|err| WashermanRepositoryError::query(format!("stored username: {err}")))?;
    Ok(Washerman {
        profile: WashermanProfile {
            id: WashermanId::new(row.id),
            username,
            created_at: row.created_at,
            updated_at: row.updated_at,
        },
        password_hash: PasswordHash::new(row.password_hash),
    })
}

fn row_to_profile(row: WashermanRow) -> Result<WashermanProfile, WashermanRepositoryError> {
    row_to_washerman(row).map(|washerman| washerman.profile)
}

#[async_trait]
impl WashermanRepository for DieselWashermanRepository {
    async fn find_by_id(
        &self,
        id: WashermanId,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = washermen::table
            .find(id.get())
            .select(WashermanRow::as_select())
            .first::<WashermanRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Washerman>, WashermanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = washermen::table
            .filter(washermen::username.eq(username.as_str()))
            .select(WashermanRow::as_select())
            .first::<WashermanRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_washerman).transpose()
    }

    async fn find_by_username_excluding(
        &self,
        username: &Username,
        id: WashermanId,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = washermen::table
            .filter(
                washermen::username
                    .eq(username.as_str())
                    .and(washermen::id.ne(id.get())),
            )
            .select(WashermanRow::as_select())
            .first::<WashermanRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn insert(
        &self,
        washerman: &NewWasherman,
    ) -> Result<WashermanProfile, WashermanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewWashermanRow {
            username: washerman.username.as_str(),
            password_hash: washerman.password_hash.as_str(),
            created_at: washerman.created_at,
            updated_at: washerman.created_at,
        };

        let row = diesel::insert_into(washermen::table)
            .values(&new_row)
            .returning(WashermanRow::as_returning())
            .get_result::<WashermanRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_profile(row)
    }

    async fn list(&self) -> Result<Vec<WashermanProfile>, WashermanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<WashermanRow> = washermen::table
            .order((washermen::created_at.desc(), washermen::id.desc()))
            .select(WashermanRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn update(
        &self,
        id: WashermanId,
        patch: &WashermanPatch,
    ) -> Result<Option<WashermanProfile>, WashermanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = WashermanChangeset {
            username: patch.username.as_ref().map(Username::as_str),
            password_hash: patch.password_hash.as_ref().map(PasswordHash::as_str),
            updated_at: patch.updated_at,
        };

        let row = diesel::update(washermen::table.find(id.get()))
            .set(&changeset)
            .returning(WashermanRow::as_returning())
            .get_result::<WashermanRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn delete(&self, id: WashermanId) -> Result<bool, WashermanRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(washermen::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
