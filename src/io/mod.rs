//! This module contains all the components needed to read and write data from files (specifically CSV)
//!
//! The [`reader`] module contains a reader of operations from CSV and [`writer`] modules contains an
//! account summaries writer into CSV. It would be possible to add new file formats by implementing the
//! traits [`OperationsReader`] and [`SummariesWriter`] respectively.
//!
//! The [`operation`] and [`report`] modules contain structs needed to serialize/deserialize data.
//! They are intentionally duplicated from the domain model to decouple the IO details from the domain
//! logic and allow their evolution independently.
//!

mod operation;
mod reader;
mod report;
mod writer;

pub use reader::{CsvOperationsReader, OperationsReader};
pub use writer::{CsvSummariesWriter, SummariesWriter};
