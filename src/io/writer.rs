use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWrite;
use tokio_stream::StreamExt;

use crate::store::AccountSummary;

/// Interface for an account summaries writer
#[async_trait(?Send)]
pub trait SummariesWriter {
  /// Write the account summaries provided by the [`Iterator`] and return
  /// whether the operation was successful or not.
  async fn write_summaries<'a, T>(&'a mut self, summaries: T) -> Result<()>
  where
    T: Iterator<Item = AccountSummary> + 'a;
}

/// An implementation of [`SummariesWriter`] for the CSV format.
pub struct CsvSummariesWriter<W>(W);

impl<W> CsvSummariesWriter<W>
where
  W: AsyncWrite + Unpin + Send + Sync,
{
  pub fn new(writer: W) -> Self {
    Self(writer)
  }
}

#[async_trait(?Send)]
impl<W> SummariesWriter for CsvSummariesWriter<W>
where
  W: AsyncWrite + Unpin + Send + Sync,
{
  async fn write_summaries<'a, T>(&'a mut self, summaries: T) -> Result<()>
  where
    T: Iterator<Item = AccountSummary> + 'a,
  {
    let mut rows = Box::pin(tokio_stream::iter(
      summaries.map(super::report::SummaryRow::from),
    ));

    let mut serializer = csv_async::AsyncSerializer::from_writer(&mut self.0);
    while let Some(row) = rows.next().await {
      serializer.serialize(row).await?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {

  use std::io::Cursor;
  use std::iter;

  use super::*;
  use crate::store::InventoryEntry;

  fn summary(account: &str, balance: u64, inventory: Vec<InventoryEntry>) -> AccountSummary {
    AccountSummary {
      account_id: account.to_string(),
      balance,
      inventory,
      received: vec![],
      sent: vec![],
    }
  }

  #[tokio::test]
  async fn write_summaries_fails() {
    let buff: &mut [u8] = &mut [0u8, 0, 0, 0];
    let mut buffer = Cursor::new(buff);
    let mut writer = CsvSummariesWriter::new(&mut buffer);

    let summaries = vec![
      summary("alice", 800, vec![InventoryEntry::new("cup", 1)]),
      summary("bob", 1200, vec![]),
    ]
    .into_iter();

    let result = writer.write_summaries(summaries).await;

    assert!(result.is_err());
  }

  #[tokio::test]
  async fn write_summaries_empty() {
    let mut buffer = Vec::<u8>::with_capacity(1024);
    let mut writer = CsvSummariesWriter::new(&mut buffer);

    let result = writer.write_summaries(iter::empty()).await;

    assert!(result.is_ok());
    assert_eq!(String::from_utf8_lossy(buffer.as_slice()), "".to_string())
  }

  #[tokio::test]
  async fn write_summaries_success() {
    let mut buffer = Vec::<u8>::with_capacity(1024);
    let mut writer = CsvSummariesWriter::new(&mut buffer);

    let summaries = vec![
      summary("alice", 800, vec![InventoryEntry::new("cup", 1)]),
      summary("bob", 1200, vec![]),
    ]
    .into_iter();

    let result = writer.write_summaries(summaries).await;

    assert!(result.is_ok());
    assert_eq!(
      String::from_utf8_lossy(buffer.as_slice()),
      "account,balance,items,received,sent\nalice,800,cup:1,0,0\nbob,1200,,0,0\n".to_string()
    )
  }
}
