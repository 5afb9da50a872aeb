use crate::collection::{DocumentCollection, UpdateOutcome};
use crate::documents::{menu_from_fields, menu_from_json};
use crate::error::{Error, Result};
use crate::obs::logger::LoggerAndTracer;
use crate::util::dates::parse_iso8601;
use crate::{event, info, warn};
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use std::sync::Arc;

/// The date written by [`DocumentStoreDemo::add_typed_date_field`]. It is the
/// same instant the JSON menu holds as a plain string.
pub const MENU_DATE: &str = "2020-06-28T08:18:56Z";

const BANNER: &str = "########################################################################";

/// What a full run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// `_id` of the menu parsed from JSON, the one the updates target.
    pub from_json: ObjectId,
    /// `_id` of the menu built in code.
    pub from_code: ObjectId,
    /// Documents in the collection after both inserts.
    pub count: u64,
}

/// Runs the demo steps against a collection and reports each of them
/// through the logger at `Info`.
pub struct DocumentStoreDemo<C: DocumentCollection> {
    collection: C,
    logger: Arc<dyn LoggerAndTracer>,
}

impl<C: DocumentCollection> DocumentStoreDemo<C> {
    pub fn new(collection: C, logger: Arc<dyn LoggerAndTracer>) -> Self {
        DocumentStoreDemo { collection, logger }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Inserts both menus, counts, then updates the JSON menu three times.
    /// Stops at the first failure.
    pub fn run(&self) -> Result<DemoReport> {
        let from_json = self.insert(menu_from_json()?)?;
        let from_code = self.insert(menu_from_fields())?;
        let count = self.count()?;

        info!(self.logger, "{}", BANNER);
        info!(
            self.logger,
            "\tThe collection {} has {} documents",
            self.collection.namespace(),
            count
        );

        self.add_scalar_field(from_json)?;
        self.add_typed_date_field(from_json)?;
        self.update_nested_array_element(from_json)?;

        Ok(DemoReport {
            from_json,
            from_code,
            count,
        })
    }

    /// Inserts `document` and returns the `_id` the store generated for it.
    pub fn insert(&self, document: Document) -> Result<ObjectId> {
        let id = match self.collection.insert_one(document)? {
            Bson::ObjectId(id) => id,
            other => {
                return Err(Error::UnexpectedError(format!(
                    "Expected a generated ObjectId, got: {}",
                    other
                )))
            }
        };
        info!(self.logger, "################## Inserted a document with _id: {}", id);
        Ok(id)
    }

    pub fn count(&self) -> Result<u64> {
        self.collection.count_documents()
    }

    /// `{ $set: { "menu.id2": "setNewField" } }`
    pub fn add_scalar_field(&self, id: ObjectId) -> Result<UpdateOutcome> {
        let outcome = self.set_field(id, "menu.id2", Bson::String("setNewField".to_string()))?;
        info!(
            self.logger,
            "################## update document with _id: {}, adding a field menu.id2",
            id
        );
        Ok(outcome)
    }

    /// `{ $set: { "menu.date": ISODate("2020-06-28T08:18:56Z") } }`
    pub fn add_typed_date_field(&self, id: ObjectId) -> Result<UpdateOutcome> {
        let date = parse_iso8601(MENU_DATE)?;
        let outcome = self.set_field(id, "menu.date", Bson::DateTime(date))?;
        info!(
            self.logger,
            "################## update document with _id: {}, adding a field menu.date (as ISODate type)",
            id
        );
        Ok(outcome)
    }

    /// `{ $set: { "menu.popup.menuitem.1.onclick": "ShowDateTime()Up" } }`
    pub fn update_nested_array_element(&self, id: ObjectId) -> Result<UpdateOutcome> {
        let outcome = self.set_field(
            id,
            "menu.popup.menuitem.1.onclick",
            Bson::String("ShowDateTime()Up".to_string()),
        )?;
        info!(
            self.logger,
            "################## update document with _id: {}, update menu.popup.menuitem: position 1 update onclick",
            id
        );
        Ok(outcome)
    }

    /// Sets one field of the document with the given `_id`. The outcome is
    /// reported but does not fail the step when nothing matched.
    fn set_field(&self, id: ObjectId, path: &str, value: Bson) -> Result<UpdateOutcome> {
        let mut fields = Document::new();
        fields.insert(path, value);

        let outcome = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": fields })?;

        event!(
            self.logger,
            "set done, _id={}, path={}, matched={}, modified={}",
            id,
            path,
            outcome.matched_count,
            outcome.modified_count
        );
        if outcome.matched_count == 0 {
            warn!(self.logger, "No document with _id {} to update", id);
        }
        Ok(outcome)
    }
}
