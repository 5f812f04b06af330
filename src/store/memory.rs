use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::account::{AccountId, Coins, InventoryEntry, TransferRecord};
use super::repository::{AccountStore, AtomicScope, Ledger, Result, StoreError};

#[derive(Debug, Default)]
struct AccountRow {
  balance: Coins,
  inventory: Vec<InventoryEntry>,
}

#[derive(Debug, Default)]
struct State {
  accounts: HashMap<AccountId, AccountRow>,
  transfers: Vec<TransferRecord>,
}

/// Implementation of [`AccountStore`] and [`Ledger`] that uses memory to store
/// accounts, inventories and the transfer ledger.
///
/// The whole state sits behind a single [`Mutex`], and a [`MemoryScope`] holds
/// the guard for its entire lifetime. That gives the two guarantees of the
/// transactional contract: scopes touching the same account are serialized
/// (sufficiency is always re-validated under the lock), and staged writes
/// become visible all-at-once on commit or not at all.
///
/// Cloning is cheap and clones observe the same state, so the store can be
/// shared between the coordinator, the directory and the summary builder.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
  state: Arc<Mutex<State>>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl AccountStore for InMemoryStore {
  type Scope = MemoryScope;

  async fn begin(&self) -> Result<Self::Scope> {
    let guard = self.state.clone().lock_owned().await;
    Ok(MemoryScope {
      guard,
      staged: Staged::default(),
    })
  }

  async fn balance(&self, id: &str) -> Result<Coins> {
    let state = self.state.lock().await;
    state
      .accounts
      .get(id)
      .map(|row| row.balance)
      .ok_or_else(|| StoreError::AccountNotFound(id.to_string()))
  }

  async fn create_account(&self, id: &str, starting_balance: Coins) -> Result<()> {
    let mut state = self.state.lock().await;
    if state.accounts.contains_key(id) {
      return Err(StoreError::DuplicateAccount(id.to_string()));
    }
    state.accounts.insert(
      id.to_string(),
      AccountRow {
        balance: starting_balance,
        inventory: Vec::new(),
      },
    );
    Ok(())
  }

  async fn accounts(&self) -> Result<Vec<AccountId>> {
    let state = self.state.lock().await;
    let mut ids: Vec<AccountId> = state.accounts.keys().cloned().collect();
    ids.sort();
    Ok(ids)
  }
}

#[async_trait]
impl Ledger for InMemoryStore {
  async fn transfers_received(&self, id: &str) -> Result<Vec<TransferRecord>> {
    let state = self.state.lock().await;
    Ok(
      state
        .transfers
        .iter()
        .filter(|record| record.recipient == id)
        .cloned()
        .collect(),
    )
  }

  async fn transfers_sent(&self, id: &str) -> Result<Vec<TransferRecord>> {
    let state = self.state.lock().await;
    Ok(
      state
        .transfers
        .iter()
        .filter(|record| record.sender == id)
        .cloned()
        .collect(),
    )
  }

  async fn inventory_of(&self, id: &str) -> Result<Vec<InventoryEntry>> {
    let state = self.state.lock().await;
    state
      .accounts
      .get(id)
      .map(|row| row.inventory.clone())
      .ok_or_else(|| StoreError::AccountNotFound(id.to_string()))
  }
}

#[derive(Debug, Default)]
struct Staged {
  balances: HashMap<AccountId, Coins>,
  transfers: Vec<TransferRecord>,
  grants: Vec<(AccountId, String)>,
}

/// Atomic scope over the in-memory state.
///
/// Holds the state lock for its whole lifetime and stages writes on the side;
/// only [`AtomicScope::commit`] applies them. Dropping the scope releases the
/// lock and discards the staged writes, leaving no residue.
pub struct MemoryScope {
  guard: OwnedMutexGuard<State>,
  staged: Staged,
}

impl MemoryScope {
  fn existing(&self, id: &str) -> Result<&AccountRow> {
    self
      .guard
      .accounts
      .get(id)
      .ok_or_else(|| StoreError::AccountNotFound(id.to_string()))
  }
}

#[async_trait]
impl AtomicScope for MemoryScope {
  async fn balance(&self, id: &str) -> Result<Coins> {
    if let Some(balance) = self.staged.balances.get(id) {
      return Ok(*balance);
    }
    self.existing(id).map(|row| row.balance)
  }

  async fn set_balance(&mut self, id: &str, balance: Coins) -> Result<()> {
    self.existing(id)?;
    self.staged.balances.insert(id.to_string(), balance);
    Ok(())
  }

  async fn record_transfer(&mut self, record: TransferRecord) -> Result<()> {
    self.staged.transfers.push(record);
    Ok(())
  }

  async fn grant_item(&mut self, id: &str, item: &str) -> Result<()> {
    self.existing(id)?;
    self.staged.grants.push((id.to_string(), item.to_string()));
    Ok(())
  }

  async fn commit(mut self) -> Result<()> {
    let Staged {
      balances,
      transfers,
      grants,
    } = std::mem::take(&mut self.staged);

    for (id, balance) in balances {
      if let Some(row) = self.guard.accounts.get_mut(&id) {
        row.balance = balance;
      }
    }
    self.guard.transfers.extend(transfers);
    for (id, item) in grants {
      if let Some(row) = self.guard.accounts.get_mut(&id) {
        match row.inventory.iter_mut().find(|entry| entry.item == item) {
          Some(entry) => entry.quantity += 1,
          None => row.inventory.push(InventoryEntry::new(item, 1)),
        }
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {

  use super::*;

  #[tokio::test]
  async fn create_account_and_read_balance() {
    let store = InMemoryStore::new();

    store.create_account("alice", 1000).await.unwrap();

    assert_eq!(store.balance("alice").await, Ok(1000));
  }

  #[tokio::test]
  async fn create_account_twice_fails() {
    let store = InMemoryStore::new();
    store.create_account("alice", 1000).await.unwrap();

    let result = store.create_account("alice", 1000).await;

    assert_eq!(
      result,
      Err(StoreError::DuplicateAccount("alice".to_string()))
    );
  }

  #[tokio::test]
  async fn balance_of_unknown_account() {
    let store = InMemoryStore::new();

    let result = store.balance("ghost").await;

    assert_eq!(result, Err(StoreError::AccountNotFound("ghost".to_string())));
  }

  #[tokio::test]
  async fn accounts_are_ordered_by_identity() {
    let store = InMemoryStore::new();
    store.create_account("carol", 10).await.unwrap();
    store.create_account("alice", 10).await.unwrap();
    store.create_account("bob", 10).await.unwrap();

    let accounts = store.accounts().await.unwrap();

    assert_eq!(accounts, vec!["alice", "bob", "carol"]);
  }

  #[tokio::test]
  async fn scope_commit_applies_staged_writes() {
    let store = InMemoryStore::new();
    store.create_account("alice", 1000).await.unwrap();
    store.create_account("bob", 1000).await.unwrap();

    let mut scope = store.begin().await.unwrap();
    scope.set_balance("alice", 800).await.unwrap();
    scope.set_balance("bob", 1200).await.unwrap();
    scope
      .record_transfer(TransferRecord::new("alice", "bob", 200))
      .await
      .unwrap();
    scope.commit().await.unwrap();

    assert_eq!(store.balance("alice").await, Ok(800));
    assert_eq!(store.balance("bob").await, Ok(1200));
    assert_eq!(store.transfers_sent("alice").await.unwrap().len(), 1);
    assert_eq!(store.transfers_received("bob").await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn scope_drop_discards_staged_writes() {
    let store = InMemoryStore::new();
    store.create_account("alice", 1000).await.unwrap();

    {
      let mut scope = store.begin().await.unwrap();
      scope.set_balance("alice", 0).await.unwrap();
      scope
        .record_transfer(TransferRecord::new("alice", "bob", 1000))
        .await
        .unwrap();
      // dropped without commit
    }

    assert_eq!(store.balance("alice").await, Ok(1000));
    assert_eq!(store.transfers_sent("alice").await.unwrap(), vec![]);
  }

  #[tokio::test]
  async fn scope_reads_observe_staged_writes() {
    let store = InMemoryStore::new();
    store.create_account("alice", 1000).await.unwrap();

    let mut scope = store.begin().await.unwrap();
    scope.set_balance("alice", 700).await.unwrap();

    assert_eq!(scope.balance("alice").await, Ok(700));
  }

  #[tokio::test]
  async fn scope_set_balance_unknown_account() {
    let store = InMemoryStore::new();

    let mut scope = store.begin().await.unwrap();
    let result = scope.set_balance("ghost", 100).await;

    assert_eq!(result, Err(StoreError::AccountNotFound("ghost".to_string())));
  }

  #[tokio::test]
  async fn grant_item_creates_then_increments() {
    let store = InMemoryStore::new();
    store.create_account("alice", 1000).await.unwrap();

    let mut scope = store.begin().await.unwrap();
    scope.grant_item("alice", "cup").await.unwrap();
    scope.grant_item("alice", "cup").await.unwrap();
    scope.grant_item("alice", "pen").await.unwrap();
    scope.commit().await.unwrap();

    assert_eq!(
      store.inventory_of("alice").await.unwrap(),
      vec![InventoryEntry::new("cup", 2), InventoryEntry::new("pen", 1)]
    );
  }
}
