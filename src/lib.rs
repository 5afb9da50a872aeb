pub mod client;
pub mod collection;
pub mod demo;
pub mod documents;
pub mod error;
pub mod obs;
pub mod options;
mod query;
pub mod storage;
pub mod util;

pub use crate::client::Connection;
pub use crate::collection::{DocumentCollection, MongoCollection, UpdateOutcome};
pub use crate::demo::{DemoReport, DocumentStoreDemo};
pub use crate::error::{Error, Result};
pub use crate::options::options::ConnectionOptions;
pub use crate::storage::MemoryCollection;
