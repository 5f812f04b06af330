use anyhow::Result;
use tokio_stream::StreamExt;
use tracing::warn;

use crate::io::{OperationsReader, SummariesWriter};
use crate::store::MerchStore;

/// This is a simple batch processor that
/// - reads operations from an [`OperationsReader`]
/// - runs them through a [`MerchStore`]
/// - writes a report with the summary of every account using a [`SummariesWriter`]
///
/// The idea is that all those components can be replaced with different implementations.
///
/// This processor tries to be as resilient as possible, meaning that:
/// - errors from the operations reader are logged and skipped
/// - business rejections from the merch store (insufficient funds, unknown
///   accounts or items, credential mismatches) are logged and skipped
///
/// A request/response front end (for example an HTTP delivery layer) would use
/// the same [`MerchStore`] interface, mapping each error of the taxonomy to an
/// appropriate external status instead of skipping it.
///
pub async fn run<R, S, W>(
  mut operations_reader: R,
  merch_store: S,
  mut summaries_writer: W,
) -> Result<()>
where
  R: OperationsReader,
  S: MerchStore,
  W: SummariesWriter,
{
  let mut operations = operations_reader.read_operations();

  while let Some(maybe_operation) = operations.next().await {
    match maybe_operation {
      Ok(operation) => {
        if let Err(err) = merch_store.process(operation).await {
          warn!(%err, "operation rejected");
        }
      }
      Err(err) => warn!(%err, "skipping malformed operation"),
    }
  }

  let summaries = merch_store.account_summaries().await?;
  summaries_writer.write_summaries(summaries.into_iter()).await
}
