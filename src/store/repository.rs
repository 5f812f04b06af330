use async_trait::async_trait;
use thiserror::Error;

use super::account::{AccountId, Coins, InventoryEntry, TransferRecord};

pub type Result<T> = core::result::Result<T, StoreError>;

/// Errors surfaced by the persistence contract.
/// [`StoreError::Unavailable`] is transient: the operation either fully applied
/// or fully rolled back, so the caller may safely retry the whole operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
  #[error("account not found: {0}")]
  AccountNotFound(AccountId),

  #[error("account already exists: {0}")]
  DuplicateAccount(AccountId),

  #[error("store unavailable: {0}")]
  Unavailable(String),
}

/// Durable table of accounts keyed by identity.
///
/// Balance mutations go exclusively through an [`AtomicScope`] obtained from
/// [`AccountStore::begin`]; the plain [`AccountStore::balance`] read only ever
/// observes committed state.
#[async_trait]
pub trait AccountStore: Send + Sync {
  type Scope: AtomicScope;

  /// Open an atomic scope. The scope serializes conflicting writes to the same
  /// account, so acquiring it may block on contention.
  async fn begin(&self) -> Result<Self::Scope>;

  async fn balance(&self, id: &str) -> Result<Coins>;

  /// Provision a new account. Accounts are never deleted.
  async fn create_account(&self, id: &str, starting_balance: Coins) -> Result<()>;

  /// All known account identities, ordered by identity.
  async fn accounts(&self) -> Result<Vec<AccountId>>;
}

/// A unit of work whose writes become visible all-at-once or not at all.
///
/// Writes are staged until [`AtomicScope::commit`]; dropping the scope without
/// committing discards every staged write, so rollback is guaranteed on any
/// exit path (normal return, error return or panic).
#[async_trait]
pub trait AtomicScope: Send {
  /// Read a balance as seen from inside the scope, including staged writes.
  async fn balance(&self, id: &str) -> Result<Coins>;

  async fn set_balance(&mut self, id: &str, balance: Coins) -> Result<()>;

  /// Stage an append to the transfer ledger.
  async fn record_transfer(&mut self, record: TransferRecord) -> Result<()>;

  /// Stage an inventory grant: create the entry at quantity 1 or increment it.
  async fn grant_item(&mut self, id: &str, item: &str) -> Result<()>;

  /// Apply every staged write. Once commit starts it cannot be canceled.
  async fn commit(self) -> Result<()>;
}

/// Read side of the append-only history: completed transfers and granted items.
#[async_trait]
pub trait Ledger: Send + Sync {
  /// Transfers where the account is the recipient, in insertion order.
  async fn transfers_received(&self, id: &str) -> Result<Vec<TransferRecord>>;

  /// Transfers where the account is the sender, in insertion order.
  async fn transfers_sent(&self, id: &str) -> Result<Vec<TransferRecord>>;

  async fn inventory_of(&self, id: &str) -> Result<Vec<InventoryEntry>>;
}
