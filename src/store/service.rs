use async_trait::async_trait;
use thiserror::Error;

use super::account::{AccountId, AccountSummary, Coins};
use super::catalog::Catalog;
use super::coordinator::{Coordinator, CoordinatorError};
use super::directory::{Directory, DirectoryError};
use super::repository::{AccountStore, Ledger, StoreError};
use super::summary::SummaryBuilder;

pub type Result<T> = core::result::Result<T, ServiceError>;

/// The logical operations accepted by the merch store, with
/// already-authenticated identities except for [`Operation::Authenticate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
  Authenticate {
    username: String,
    secret: String,
  },
  Transfer {
    sender: AccountId,
    recipient: AccountId,
    amount: Coins,
  },
  Purchase {
    account: AccountId,
    item: String,
  },
  Summary {
    account: AccountId,
  },
}

/// Successful result of a processed [`Operation`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  Authenticated(AccountId),
  Transferred,
  Purchased,
  Summary(AccountSummary),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
  #[error(transparent)]
  Transaction(#[from] CoordinatorError),

  #[error(transparent)]
  Identity(#[from] DirectoryError),

  #[error("persistence failure: {0}")]
  Persistence(#[from] StoreError),
}

/// Interface implemented by the merch store service.
/// The operations are `async` to allow interaction with external persistence.
#[async_trait]
pub trait MerchStore {
  /// Process one operation and return its outcome, or a distinguishable error
  /// so the request layer can map it to an appropriate external status.
  async fn process(&self, operation: Operation) -> Result<Outcome>;

  /// A summary for every known account, useful to report the store state.
  async fn account_summaries(&self) -> Result<Vec<AccountSummary>>;
}

/// Composition of the identity directory, the transaction coordinator and the
/// summary builder over one shared store.
pub struct Service<S, C> {
  directory: Directory<S>,
  coordinator: Coordinator<S, C>,
  summaries: SummaryBuilder<S>,
}

impl<S, C> Service<S, C>
where
  S: AccountStore + Ledger + Clone,
  C: Catalog,
{
  pub fn new(store: S, catalog: C, starting_balance: Coins) -> Self {
    Self {
      directory: Directory::new(store.clone(), starting_balance),
      coordinator: Coordinator::new(store.clone(), catalog),
      summaries: SummaryBuilder::new(store),
    }
  }
}

#[async_trait]
impl<S, C> MerchStore for Service<S, C>
where
  S: AccountStore + Ledger + Clone,
  C: Catalog,
{
  async fn process(&self, operation: Operation) -> Result<Outcome> {
    match operation {
      Operation::Authenticate { username, secret } => {
        let account = self.directory.resolve_or_create(&username, &secret).await?;
        Ok(Outcome::Authenticated(account))
      }
      Operation::Transfer {
        sender,
        recipient,
        amount,
      } => {
        self
          .coordinator
          .transfer_coins(&sender, &recipient, amount)
          .await?;
        Ok(Outcome::Transferred)
      }
      Operation::Purchase { account, item } => {
        self.coordinator.buy_item(&account, &item).await?;
        Ok(Outcome::Purchased)
      }
      Operation::Summary { account } => {
        let summary = self
          .summaries
          .summary(&account)
          .await
          .map_err(CoordinatorError::from)?;
        Ok(Outcome::Summary(summary))
      }
    }
  }

  async fn account_summaries(&self) -> Result<Vec<AccountSummary>> {
    Ok(self.summaries.all().await?)
  }
}
