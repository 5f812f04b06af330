use std::collections::HashMap;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::account::{AccountId, Coins};
use super::repository::{AccountStore, StoreError};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
  #[error("credential mismatch for {0}")]
  CredentialMismatch(AccountId),

  #[error("failed to derive credential material")]
  CredentialDerivation,

  #[error("persistence failure: {0}")]
  Persistence(#[from] StoreError),
}

/// Resolves identities to accounts, provisioning first-time identities with
/// the configured starting balance.
///
/// Credential material is stored as a salted argon2 hash and is opaque to the
/// rest of the system. Provisioning shares the account store with the
/// transaction coordinator but never opens a multi-write scope.
pub struct Directory<S> {
  store: S,
  starting_balance: Coins,
  credentials: Mutex<HashMap<AccountId, String>>,
}

impl<S> Directory<S>
where
  S: AccountStore,
{
  pub fn new(store: S, starting_balance: Coins) -> Self {
    Self {
      store,
      starting_balance,
      credentials: Mutex::new(HashMap::new()),
    }
  }

  /// Resolve a known identity by verifying its secret, or provision a new
  /// account when the identity is seen for the first time.
  pub async fn resolve_or_create(
    &self,
    username: &str,
    secret: &str,
  ) -> Result<AccountId, DirectoryError> {
    let mut credentials = self.credentials.lock().await;

    match credentials.get(username) {
      Some(stored) => {
        let parsed =
          PasswordHash::new(stored).map_err(|_| DirectoryError::CredentialDerivation)?;
        Argon2::default()
          .verify_password(secret.as_bytes(), &parsed)
          .map_err(|_| {
            warn!(username, "credential mismatch");
            DirectoryError::CredentialMismatch(username.to_string())
          })?;
        Ok(username.to_string())
      }
      None => {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
          .hash_password(secret.as_bytes(), &salt)
          .map_err(|_| DirectoryError::CredentialDerivation)?
          .to_string();

        self
          .store
          .create_account(username, self.starting_balance)
          .await?;
        credentials.insert(username.to_string(), hash);
        info!(username, balance = self.starting_balance, "provisioned account");
        Ok(username.to_string())
      }
    }
  }
}
