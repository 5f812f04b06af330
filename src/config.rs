use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::store::Coins;

pub const DEFAULT_STARTING_BALANCE: Coins = 1000;

/// Deployment configuration: the balance granted to new accounts and the
/// catalog seed. The catalog is read once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
  #[serde(default = "default_starting_balance")]
  pub starting_balance: Coins,

  pub catalog: HashMap<String, Coins>,
}

fn default_starting_balance() -> Coins {
  DEFAULT_STARTING_BALANCE
}

impl Config {
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let raw = std::fs::read_to_string(path.as_ref())
      .with_context(|| format!("reading config from {}", path.as_ref().display()))?;
    toml::from_str(&raw).context("parsing config")
  }

  /// The catalog seeded at the original deployment, used when no config file
  /// is given.
  pub fn default_seed() -> Self {
    let catalog = vec![
      ("t-shirt", 80),
      ("cup", 20),
      ("book", 50),
      ("pen", 10),
      ("powerbank", 200),
      ("hoody", 300),
      ("umbrella", 200),
      ("socks", 10),
      ("wallet", 50),
      ("pink-hoody", 500),
    ]
    .into_iter()
    .map(|(name, price)| (name.to_string(), price))
    .collect();

    Self {
      starting_balance: DEFAULT_STARTING_BALANCE,
      catalog,
    }
  }
}
