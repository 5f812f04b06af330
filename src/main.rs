mod config;
mod io;
mod processors;
mod store;

use anyhow::Result;
use tokio::io::AsyncRead;

use crate::config::Config;
use crate::io::{CsvOperationsReader, CsvSummariesWriter};
use crate::store::{InMemoryStore, Service, StaticCatalog};

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let config = match std::env::args().nth(2) {
    Some(path) => Config::load(path)?,
    None => Config::default_seed(),
  };

  let reader = get_operations_async_read().await?;
  let operations_reader = CsvOperationsReader::new(reader);
  let catalog = StaticCatalog::new(config.catalog);
  let merch_store = Service::new(InMemoryStore::new(), catalog, config.starting_balance);
  let summaries_writer = CsvSummariesWriter::new(tokio::io::stdout());

  processors::simple::run(operations_reader, merch_store, summaries_writer).await
}

type OperationsAsyncRead = Box<dyn AsyncRead + Unpin + Send + Sync>;

/// This allows to use either a file if the path is specified in the command line,
/// or the stdin otherwise, which might be more convenient for pipe the data.
async fn get_operations_async_read() -> Result<OperationsAsyncRead> {
  match std::env::args().nth(1) {
    Some(path) => tokio::fs::File::open(path)
      .await
      .map(|file| Box::new(file) as OperationsAsyncRead)
      .map_err(anyhow::Error::from),
    None => Ok(Box::new(tokio::io::stdin()) as OperationsAsyncRead),
  }
}
