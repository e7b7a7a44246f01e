// Credential lifecycle: Unauthenticated -> TokenIssued -> Authenticated | Rejected

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenSigner;
use crate::core::errors::ServiceError;
use crate::core::models::UserAccount;
use crate::store::UserStore;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AuthService {
    users: Arc<dyn UserStore>,
    signer: TokenSigner,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, signer: TokenSigner) -> Self {
        Self { users, signer }
    }

    /// Verify a username/password pair against the credential store.
    ///
    /// Unknown username, wrong password, and disabled account all map to the
    /// same `InvalidCredentials` so the response never confirms whether a
    /// username exists. Storage failures propagate as themselves - a broken
    /// user file is a 500, not a rejection.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserAccount, ServiceError> {
        let account = match self.users.get(username).await? {
            Some(account) => account,
            None => {
                warn!(username = %username, "Login attempt for unknown username");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        if account.disabled {
            warn!(username = %username, "Login attempt for disabled account");
            return Err(ServiceError::InvalidCredentials);
        }

        if !verify_password(password, &account.password_hash) {
            warn!(username = %username, "Login attempt with wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Authenticate, then issue a signed bearer token for the account.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ServiceError> {
        let account = self.authenticate(username, password).await?;
        let token = self.signer.issue(&account.username)?;
        info!(username = %account.username, "Token issued");
        Ok(token)
    }

    /// Resolve a presented bearer token to its account.
    ///
    /// A token whose subject no longer exists, or has been disabled since
    /// issuance, is rejected the same way as a bad signature.
    pub async fn resolve_current_user(&self, token: &str) -> Result<UserAccount, ServiceError> {
        let username = self.signer.verify(token)?;

        let account = self
            .users
            .get(&username)
            .await?
            .ok_or(ServiceError::InvalidToken)?;

        if account.disabled {
            warn!(username = %username, "Valid token presented for disabled account");
            return Err(ServiceError::InvalidToken);
        }

        Ok(account)
    }

    /// Register a new account with a freshly hashed password.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        email: &str,
    ) -> Result<UserAccount, ServiceError> {
        if self.users.get(username).await?.is_some() {
            return Err(ServiceError::Conflict);
        }

        let account = UserAccount {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            disabled: false,
        };

        self.users.upsert(account.clone()).await?;
        info!(username = %username, "User created");
        Ok(account)
    }
}
