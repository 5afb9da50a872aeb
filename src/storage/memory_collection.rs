use crate::collection::{DocumentCollection, UpdateOutcome};
use crate::error::{Error, Result};
use crate::obs::logger::LoggerAndTracer;
use crate::query::execution::{filters, updates};
use crate::query::update::parse_update;
use crate::util::bson_utils::{bson_eq, prepend_field};
use crate::event;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use std::sync::{Arc, Mutex, MutexGuard};

/// A collection held in process memory.
///
/// Mirrors what the server does for the operations the demo uses: `_id`
/// generation on insert, uniqueness of `_id`, exact-match filters and `$set`
/// updates with dotted and positional paths. Documents are kept in insertion
/// order.
pub struct MemoryCollection {
    namespace: String,
    documents: Mutex<Vec<Document>>,
    logger: Arc<dyn LoggerAndTracer>,
}

impl MemoryCollection {
    pub fn new(database: &str, collection: &str, logger: Arc<dyn LoggerAndTracer>) -> MemoryCollection {
        MemoryCollection {
            namespace: format!("{}.{}", database, collection),
            documents: Mutex::new(Vec::new()),
            logger,
        }
    }

    fn documents(&self) -> Result<MutexGuard<'_, Vec<Document>>> {
        self.documents
            .lock()
            .map_err(|_| Error::UnexpectedError(format!("Collection {} is poisoned", self.namespace)))
    }
}

impl DocumentCollection for MemoryCollection {
    fn namespace(&self) -> String {
        self.namespace.clone()
    }

    fn insert_one(&self, document: Document) -> Result<Bson> {
        let mut documents = self.documents()?;

        let (id, document) = match document.get("_id") {
            Some(id) => (id.clone(), document),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                (id.clone(), prepend_field(document, "_id", id))
            }
        };

        let duplicate = documents
            .iter()
            .filter_map(|d| d.get("_id"))
            .find(|existing| bson_eq(existing, &id));
        if let Some(existing) = duplicate {
            return Err(Error::WriteRejected(format!(
                "Duplicate key error. dup key: {{ _id: {} }}",
                existing
            )));
        }

        documents.push(document);
        event!(self.logger, "insert done, namespace={}, _id={}", self.namespace, id);
        Ok(id)
    }

    fn count_documents(&self) -> Result<u64> {
        Ok(self.documents()?.len() as u64)
    }

    fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        let predicate = filters::to_filter(&filter)?;
        let documents = self.documents()?;
        Ok(documents.iter().find(|d| predicate(d)).cloned())
    }

    fn update_one(&self, filter: Document, update: Document) -> Result<UpdateOutcome> {
        let predicate = filters::to_filter(&filter)?;
        let update = parse_update(&update)?;

        let mut documents = self.documents()?;
        let target = match documents.iter_mut().find(|d| predicate(d)) {
            Some(target) => target,
            None => {
                event!(self.logger, "update done, namespace={}, matched=0", self.namespace);
                return Ok(UpdateOutcome::default());
            }
        };

        // Applied to a copy so that a rejected update leaves the document untouched.
        let mut updated = target.clone();
        let modified = updates::apply_update(&update, &mut updated)?;

        if updated.get("_id") != target.get("_id") {
            return Err(Error::WriteRejected(
                "Performing an update on the path '_id' would modify the immutable field '_id'"
                    .to_string(),
            ));
        }

        if modified {
            *target = updated;
        }

        event!(
            self.logger,
            "update done, namespace={}, matched=1, modified={}",
            self.namespace,
            modified as u64
        );
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: modified as u64,
        })
    }
}
