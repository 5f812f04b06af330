use thiserror::Error;
use tracing::{info, warn};

use super::account::{AccountId, Coins, TransferRecord};
use super::catalog::Catalog;
use super::repository::{AccountStore, AtomicScope, StoreError};

pub type Result<T> = core::result::Result<T, CoordinatorError>;

/// Possible outcomes of a failed transfer or purchase.
/// Business rejections ([`InsufficientFunds`](CoordinatorError::InsufficientFunds),
/// [`InvalidArgument`](CoordinatorError::InvalidArgument)) and lookup misses are
/// final; [`Persistence`](CoordinatorError::Persistence) is transient and the
/// whole operation can be retried, since nothing was applied.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordinatorError {
  #[error("account not found: {0}")]
  AccountNotFound(AccountId),

  #[error("item not found: {0}")]
  ItemNotFound(String),

  #[error("insufficient funds: required {required}, available {available}")]
  InsufficientFunds { required: Coins, available: Coins },

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("persistence failure: {0}")]
  Persistence(StoreError),
}

impl From<StoreError> for CoordinatorError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::AccountNotFound(id) => CoordinatorError::AccountNotFound(id),
      other => CoordinatorError::Persistence(other),
    }
  }
}

/// Orchestrates the read-modify-write sequence of transfers and purchases as a
/// single atomic unit against the account store and the ledger.
///
/// Every balance check happens inside the scope, so a concurrent operation
/// debiting the same account can never sneak past a stale sufficiency check.
/// On any error path the scope is dropped without commit and no partial state
/// is ever visible.
#[derive(Debug, Clone)]
pub struct Coordinator<S, C> {
  store: S,
  catalog: C,
}

impl<S, C> Coordinator<S, C>
where
  S: AccountStore,
  C: Catalog,
{
  pub fn new(store: S, catalog: C) -> Self {
    Self { store, catalog }
  }

  /// Move `amount` coins from `sender` to `recipient` and append the transfer
  /// to the ledger, all-or-nothing.
  pub async fn transfer_coins(&self, sender: &str, recipient: &str, amount: Coins) -> Result<()> {
    if amount == 0 {
      return Err(CoordinatorError::InvalidArgument(
        "transfer amount must be positive".to_string(),
      ));
    }
    if sender == recipient {
      return Err(CoordinatorError::InvalidArgument(
        "sender and recipient must differ".to_string(),
      ));
    }

    let mut scope = self.store.begin().await?;

    let sender_balance = scope.balance(sender).await?;
    if sender_balance < amount {
      warn!(
        sender,
        amount,
        available = sender_balance,
        "transfer rejected: insufficient funds"
      );
      return Err(CoordinatorError::InsufficientFunds {
        required: amount,
        available: sender_balance,
      });
    }

    let recipient_balance = scope.balance(recipient).await?;

    scope.set_balance(sender, sender_balance - amount).await?;
    scope
      .set_balance(recipient, recipient_balance + amount)
      .await?;
    scope
      .record_transfer(TransferRecord::new(sender, recipient, amount))
      .await?;

    scope.commit().await?;
    info!(sender, recipient, amount, "transfer committed");
    Ok(())
  }

  /// Debit `account` by the catalog price of `item` and grant the item,
  /// atomically as a pair.
  pub async fn buy_item(&self, account: &str, item: &str) -> Result<()> {
    let price = self
      .catalog
      .price(item)
      .ok_or_else(|| CoordinatorError::ItemNotFound(item.to_string()))?;

    let mut scope = self.store.begin().await?;

    let balance = scope.balance(account).await?;
    if balance < price {
      warn!(
        account,
        item,
        price,
        available = balance,
        "purchase rejected: insufficient funds"
      );
      return Err(CoordinatorError::InsufficientFunds {
        required: price,
        available: balance,
      });
    }

    scope.set_balance(account, balance - price).await?;
    scope.grant_item(account, item).await?;

    scope.commit().await?;
    info!(account, item, price, "purchase committed");
    Ok(())
  }
}
