//! PostgreSQL-backed `UserRepository` using Diesel.
//!
//! Name and token uniqueness come from `UNIQUE` constraints, so concurrent
//! registrations of one name resolve inside the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{AccessToken, Identity, NewIdentity, PasswordDigest, UserId, UserName};

use super::error_mapping::{DieselErrorTargets, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        &DieselErrorTargets {
            query: UserPersistenceError::query,
            connection: UserPersistenceError::connection,
            unique: Some(UserPersistenceError::duplicate_name),
        },
    )
}

fn row_to_identity(row: UserRow) -> Result<Identity, UserPersistenceError> {
    let corrupt = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("stored user {} is invalid: {err}", row.id))
    };
    let name = UserName::new(&row.name).map_err(corrupt)?;
    let digest = PasswordDigest::new(row.password_digest.clone()).map_err(corrupt)?;
    let token = AccessToken::parse(&row.token).map_err(corrupt)?;
    Ok(Identity::new(UserId::from_uuid(row.id), name, digest, token))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, identity: &NewIdentity) -> Result<Identity, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let new_row = NewUserRow {
            id: *identity.id.as_uuid(),
            name: identity.name.as_ref(),
            password_digest: identity.password_digest.as_str(),
            token: identity.token.expose(),
        };
        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_identity(row)
    }

    async fn find_by_name(&self, name: &UserName) -> Result<Option<Identity>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .filter(users::name.eq(name.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_identity).transpose()
    }

    async fn find_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<Identity>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = users::table
            .filter(users::token.eq(token.expose()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_identity).transpose()
    }
}
