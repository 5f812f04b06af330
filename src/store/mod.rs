//! This module contains the domain logic of the merch store: accounts holding
//! coin balances, coin transfers between accounts, and purchases of catalog
//! items.
//!
//! The [`Coordinator`] is the only component that opens a multi-statement
//! atomic scope against an [`AccountStore`]; the [`InMemoryStore`] is an
//! adapter that honors the transactional contract using memory. A real
//! persistence adapter would plug in at the [`AccountStore`]/[`Ledger`] seam.
//

mod account;
mod catalog;
mod coordinator;
mod directory;
mod memory;
mod repository;
mod service;
mod summary;

pub use account::{AccountId, AccountSummary, Coins, InventoryEntry, TransferRecord};
pub use catalog::{Catalog, StaticCatalog};
pub use coordinator::{Coordinator, CoordinatorError};
pub use directory::{Directory, DirectoryError};
pub use memory::InMemoryStore;
pub use repository::{AccountStore, AtomicScope, Ledger, StoreError};
pub use service::{MerchStore, Operation, Outcome, Service, ServiceError};
pub use summary::SummaryBuilder;

#[cfg(test)]
pub(crate) use service::Result as ServiceResult;
