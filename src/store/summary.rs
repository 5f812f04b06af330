use super::account::AccountSummary;
use super::repository::{AccountStore, Ledger, Result};

/// Composes the read-only account aggregate: balance, inventory and
/// incoming/outgoing transfer history. Side-effect free; never takes the
/// write path of the store.
#[derive(Debug, Clone)]
pub struct SummaryBuilder<S> {
  store: S,
}

impl<S> SummaryBuilder<S>
where
  S: AccountStore + Ledger,
{
  pub fn new(store: S) -> Self {
    Self { store }
  }

  pub async fn summary(&self, account: &str) -> Result<AccountSummary> {
    let balance = self.store.balance(account).await?;
    let inventory = self.store.inventory_of(account).await?;
    let received = self.store.transfers_received(account).await?;
    let sent = self.store.transfers_sent(account).await?;

    Ok(AccountSummary {
      account_id: account.to_string(),
      balance,
      inventory,
      received,
      sent,
    })
  }

  /// Summaries for every known account, ordered by identity.
  pub async fn all(&self) -> Result<Vec<AccountSummary>> {
    let mut summaries = Vec::new();
    for id in self.store.accounts().await? {
      summaries.push(self.summary(&id).await?);
    }
    Ok(summaries)
  }
}

#[cfg(test)]
mod tests {

  use super::*;
  use crate::store::account::{InventoryEntry, TransferRecord};
  use crate::store::memory::InMemoryStore;
  use crate::store::repository::{AtomicScope, StoreError};

  async fn populated_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.create_account("alice", 800).await.unwrap();
    store.create_account("bob", 1200).await.unwrap();

    let mut scope = store.begin().await.unwrap();
    scope
      .record_transfer(TransferRecord::new("alice", "bob", 200))
      .await
      .unwrap();
    scope
      .record_transfer(TransferRecord::new("bob", "alice", 50))
      .await
      .unwrap();
    scope.grant_item("alice", "cup").await.unwrap();
    scope.commit().await.unwrap();

    store
  }

  #[tokio::test]
  async fn summary_composes_balance_inventory_and_history() {
    let store = populated_store().await;

    let summary = SummaryBuilder::new(store).summary("alice").await.unwrap();

    assert_eq!(summary.account_id, "alice");
    assert_eq!(summary.balance, 800);
    assert_eq!(summary.inventory, vec![InventoryEntry::new("cup", 1)]);
    assert_eq!(summary.sent.len(), 1);
    assert_eq!(summary.sent[0].recipient, "bob");
    assert_eq!(summary.sent[0].amount, 200);
    assert_eq!(summary.received.len(), 1);
    assert_eq!(summary.received[0].sender, "bob");
    assert_eq!(summary.received[0].amount, 50);
  }

  #[tokio::test]
  async fn summary_is_idempotent() {
    let builder = SummaryBuilder::new(populated_store().await);

    let first = builder.summary("alice").await.unwrap();
    let second = builder.summary("alice").await.unwrap();

    assert_eq!(first, second);
  }

  #[tokio::test]
  async fn summary_of_unknown_account() {
    let builder = SummaryBuilder::new(InMemoryStore::new());

    let result = builder.summary("ghost").await;

    assert_eq!(result, Err(StoreError::AccountNotFound("ghost".to_string())));
  }

  #[tokio::test]
  async fn all_returns_one_summary_per_account_ordered() {
    let builder = SummaryBuilder::new(populated_store().await);

    let summaries = builder.all().await.unwrap();

    let ids: Vec<&str> = summaries.iter().map(|s| s.account_id.as_str()).collect();
    assert_eq!(ids, vec!["alice", "bob"]);
  }
}
