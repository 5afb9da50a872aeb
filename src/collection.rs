use crate::error::{Error, Result};
use bson::{doc, Bson, Document};

/// Outcome of an `update_one` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Number of documents matched by the filter (0 or 1).
    pub matched_count: u64,
    /// Number of documents actually changed (0 or 1).
    pub modified_count: u64,
}

/// The operations the demo runs against a collection.
///
/// Implemented by [`MongoCollection`] for a live server and by
/// [`MemoryCollection`](crate::storage::MemoryCollection) for an in-process
/// store with the same semantics.
pub trait DocumentCollection {
    /// `database.collection`.
    fn namespace(&self) -> String;

    /// Inserts `document` and returns its `_id`, generated by the store when
    /// the document has none.
    fn insert_one(&self, document: Document) -> Result<Bson>;

    /// Total number of documents in the collection.
    fn count_documents(&self) -> Result<u64>;

    fn find_one(&self, filter: Document) -> Result<Option<Document>>;

    /// Applies `update` (an update operator document such as
    /// `{ "$set": { "a.b": 1 } }`) to the first document matching `filter`.
    fn update_one(&self, filter: Document, update: Document) -> Result<UpdateOutcome>;
}

/// A collection on a MongoDB server, accessed through the blocking driver API.
///
/// The database and the collection are created by the server on first write.
#[derive(Clone)]
pub struct MongoCollection {
    inner: mongodb::sync::Collection<Document>,
}

impl MongoCollection {
    pub fn new(inner: mongodb::sync::Collection<Document>) -> MongoCollection {
        MongoCollection { inner }
    }
}

impl DocumentCollection for MongoCollection {
    fn namespace(&self) -> String {
        self.inner.namespace().to_string()
    }

    fn insert_one(&self, document: Document) -> Result<Bson> {
        let result = self.inner.insert_one(document).run().map_err(Error::Write)?;
        Ok(result.inserted_id)
    }

    fn count_documents(&self) -> Result<u64> {
        self.inner.count_documents(doc! {}).run().map_err(Error::Read)
    }

    fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        self.inner.find_one(filter).run().map_err(Error::Read)
    }

    fn update_one(&self, filter: Document, update: Document) -> Result<UpdateOutcome> {
        let result = self
            .inner
            .update_one(filter, update)
            .run()
            .map_err(Error::Write)?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }
}
