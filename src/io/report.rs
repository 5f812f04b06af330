use serde::Serialize;

use crate::store::{AccountSummary, Coins};

/// One row per account in the end-of-batch report, used to serialize into a
/// CSV file. Inventory is flattened into a `item:quantity` list and the
/// histories into received/sent coin totals.
#[derive(Debug, PartialEq, Serialize)]
pub struct SummaryRow {
  account: String,
  balance: Coins,
  items: String,
  received: Coins,
  sent: Coins,
}

impl From<AccountSummary> for SummaryRow {
  /// A conversion between the domain representation of an account summary into
  /// a serializable structure
  fn from(summary: AccountSummary) -> Self {
    let items = summary
      .inventory
      .iter()
      .map(|entry| format!("{}:{}", entry.item, entry.quantity))
      .collect::<Vec<String>>()
      .join(";");
    let received = summary.received.iter().map(|record| record.amount).sum();
    let sent = summary.sent.iter().map(|record| record.amount).sum();

    SummaryRow {
      account: summary.account_id,
      balance: summary.balance,
      items,
      received,
      sent,
    }
  }
}
