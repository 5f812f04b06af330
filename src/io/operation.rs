use std::convert::TryFrom;

use serde::Deserialize;

use crate::store::{self, Coins};

/// The kinds of operations supported by the reader
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
  Auth,
  Transfer,
  Buy,
  Summary,
}

/// A deserializable operation. The meaning of `target` depends on the kind:
/// the secret for `auth`, the recipient for `transfer`, the item for `buy`.
#[derive(Debug, Deserialize)]
pub struct Operation {
  #[serde(rename = "op")]
  kind: OperationType,

  actor: String,

  target: String,

  amount: Option<Coins>,
}

impl TryFrom<Operation> for store::Operation {
  type Error = anyhow::Error;

  /// Conversion from a deserializable operation into one that can be used by
  /// the domain logic.
  fn try_from(operation: Operation) -> Result<Self, Self::Error> {
    match operation.kind {
      OperationType::Auth => Ok(store::Operation::Authenticate {
        username: operation.actor,
        secret: operation.target,
      }),
      OperationType::Transfer => {
        let amount = operation
          .amount
          .ok_or_else(|| anyhow::anyhow!("transfer requires an amount"))?;
        Ok(store::Operation::Transfer {
          sender: operation.actor,
          recipient: operation.target,
          amount,
        })
      }
      OperationType::Buy => Ok(store::Operation::Purchase {
        account: operation.actor,
        item: operation.target,
      }),
      OperationType::Summary => Ok(store::Operation::Summary {
        account: operation.actor,
      }),
    }
  }
}
