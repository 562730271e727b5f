//! Account use-cases: registration, sign-in and bearer-token authentication.
//!
//! [`AccountService`] owns the credential rules and delegates storage,
//! hashing and token generation to driven ports. Argon2 work runs on the
//! blocking pool so it never stalls the request executor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHasher, RegisteredUser, RegistrationService, SignedIn,
    TokenAuthenticator, TokenIssuer, UserPersistenceError, UserRepository,
};
use crate::domain::{
    AccessToken, Error, Identity, LoginCredentials, NewIdentity, Password, PasswordDigest,
    RegistrationCredentials, UserId, UserName,
};

/// Map user persistence failures to transport-safe domain errors.
pub(crate) fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateName { .. } => {
            Error::duplicate_name("that name is already taken")
        }
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Registration, sign-in and token authentication over a user repository.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl AccountService {
    /// Create a service from its driven ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    async fn hash_password(&self, password: &Password) -> Result<PasswordDigest, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn verify_password(
        &self,
        password: &Password,
        digest: &PasswordDigest,
    ) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();
        let digest = digest.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(
        &self,
        credentials: &RegistrationCredentials,
    ) -> Result<RegisteredUser, Error> {
        let password_digest = self.hash_password(credentials.password()).await?;
        let new_identity = NewIdentity {
            id: UserId::random(),
            name: credentials.name().clone(),
            password_digest,
            token: self.tokens.issue(),
        };

        let identity = self
            .users
            .create(&new_identity)
            .await
            .map_err(map_user_persistence_error)?;

        info!(user_id = %identity.id(), "user registered");
        Ok(RegisteredUser {
            id: *identity.id(),
            token: identity.token().clone(),
        })
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignedIn, Error> {
        // Names that fail validation can never have been registered.
        let identity = match UserName::new(credentials.name()) {
            Ok(name) => self
                .users
                .find_by_name(&name)
                .await
                .map_err(map_user_persistence_error)?,
            Err(_) => None,
        };
        let identity = identity.ok_or_else(|| Error::not_found("user not found"))?;

        if !self
            .verify_password(credentials.password(), identity.password_digest())
            .await?
        {
            debug!(user_id = %identity.id(), "sign-in rejected: password mismatch");
            return Err(Error::invalid_request("incorrect password"));
        }

        info!(user_id = %identity.id(), "user signed in");
        Ok(SignedIn {
            user_id: *identity.id(),
            token: identity.token().clone(),
        })
    }
}

#[async_trait]
impl TokenAuthenticator for AccountService {
    async fn authenticate(&self, presented: Option<&str>) -> Result<Identity, Error> {
        let raw = presented
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::unauthorized("login required"))?;
        let token = AccessToken::parse(raw).map_err(|_| {
            debug!(length = raw.len(), "rejected malformed access token");
            Error::unauthorized("invalid access token")
        })?;

        self.users
            .find_by_token(&token)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("invalid access token"))
    }
}
