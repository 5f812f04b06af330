use chrono::{DateTime, Utc};

/// Alias for an account identity (the employee username)
pub type AccountId = String;

/// Alias for an amount of coins. Balances are non-negative by construction.
pub type Coins = u64;

/// A merchandise item owned by an account, with the number of times it was purchased.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryEntry {
  pub item: String,
  pub quantity: u32,
}

impl InventoryEntry {
  pub fn new(item: impl Into<String>, quantity: u32) -> Self {
    Self {
      item: item.into(),
      quantity,
    }
  }
}

/// An immutable fact recording a completed coin transfer.
/// Records are append-only; they are never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
  pub sender: AccountId,
  pub recipient: AccountId,
  pub amount: Coins,
  pub timestamp: DateTime<Utc>,
}

impl TransferRecord {
  pub fn new(sender: impl Into<AccountId>, recipient: impl Into<AccountId>, amount: Coins) -> Self {
    Self {
      sender: sender.into(),
      recipient: recipient.into(),
      amount,
      timestamp: Utc::now(),
    }
  }
}

/// Read-only aggregate of an account state: current balance, owned items
/// and the incoming/outgoing transfer history.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
  pub account_id: AccountId,
  pub balance: Coins,
  pub inventory: Vec<InventoryEntry>,
  pub received: Vec<TransferRecord>,
  pub sent: Vec<TransferRecord>,
}
