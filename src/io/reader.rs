use std::convert::TryFrom;

use anyhow::Result;
use tokio::io::AsyncRead;
use tokio_stream::{Stream, StreamExt};

use crate::store::Operation;

/// Interface to read operations from an external source
pub trait OperationsReader {
  /// Read operations and return an [`Stream`] of possibly successful operations.
  /// Each item yielded by the stream is either `Ok` if the operation was read
  /// successfully, or `Err` if there was any kind of problem (like wrong format).
  fn read_operations<'a>(&'a mut self) -> Box<dyn Stream<Item = Result<Operation>> + Unpin + 'a>;
}

/// Implementation of [`OperationsReader`] for the CSV format.
pub struct CsvOperationsReader<R>(R);

impl<R> CsvOperationsReader<R>
where
  R: AsyncRead + Unpin + Send + Sync,
{
  pub fn new(reader: R) -> Self {
    Self(reader)
  }
}

impl<R> OperationsReader for CsvOperationsReader<R>
where
  R: AsyncRead + Unpin + Send + Sync,
{
  fn read_operations<'a>(&'a mut self) -> Box<dyn Stream<Item = Result<Operation>> + Unpin + 'a> {
    Box::new(
      csv_async::AsyncReaderBuilder::new()
        .flexible(true)
        .create_reader(&mut self.0)
        .into_records()
        .map(|maybe_record| {
          maybe_record
            .and_then(|mut record| {
              record.trim();
              if record.len() == 3 {
                record.push_field("");
              }
              record.deserialize::<super::operation::Operation>(None)
            })
            .map_err(anyhow::Error::from)
            .and_then(Operation::try_from)
        }),
    )
  }
}
