use std::collections::HashMap;

use super::account::Coins;

/// Static item → price mapping, seeded at deployment time and read-only at runtime.
pub trait Catalog: Send + Sync {
  fn price(&self, item: &str) -> Option<Coins>;
}

/// A [`Catalog`] backed by a fixed in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
  prices: HashMap<String, Coins>,
}

impl StaticCatalog {
  pub fn new(prices: HashMap<String, Coins>) -> Self {
    Self { prices }
  }
}

impl std::iter::FromIterator<(String, Coins)> for StaticCatalog {
  fn from_iter<T: IntoIterator<Item = (String, Coins)>>(iter: T) -> Self {
    Self {
      prices: iter.into_iter().collect(),
    }
  }
}

impl Catalog for StaticCatalog {
  fn price(&self, item: &str) -> Option<Coins> {
    self.prices.get(item).copied()
  }
}
