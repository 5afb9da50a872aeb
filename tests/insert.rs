use bson::{doc, Bson};
use minimal_deps::obs::logger::NoOpLogger;
use minimal_deps::{DocumentCollection, MemoryCollection};
use std::sync::Arc;

fn setup() -> MemoryCollection {
    MemoryCollection::new("test_db", "test", Arc::new(NoOpLogger))
}

#[test]
fn insert_duplicate_id_is_rejected() {
    let collection = setup();

    let doc = doc! {"_id": 365, "x": 1};

    // First insert should succeed.
    collection.insert_one(doc.clone()).unwrap();

    // Second insert with the same _id should fail.
    let error = collection.insert_one(doc).unwrap_err();
    assert!(error.is_write_error());
    assert_eq!(
        format!("{}", error),
        "Duplicate key error. dup key: { _id: 365 }"
    );
}

#[test]
fn insert_without_id_gets_a_fresh_object_id() {
    let collection = setup();

    let first = collection.insert_one(doc! {"x": 1}).unwrap();
    let second = collection.insert_one(doc! {"x": 1}).unwrap();

    assert!(matches!(first, Bson::ObjectId(_)));
    assert!(matches!(second, Bson::ObjectId(_)));
    assert_ne!(first, second);
    assert_eq!(collection.count_documents().unwrap(), 2);
}

#[test]
fn inserted_document_starts_with_id() {
    let collection = setup();

    let id = collection.insert_one(doc! {"menu": {"id": "file"}}).unwrap();
    let stored = collection.find_one(doc! {"_id": id.clone()}).unwrap().unwrap();

    let keys: Vec<&String> = stored.keys().collect();
    assert_eq!(keys, vec!["_id", "menu"]);
    assert_eq!(stored.get("_id"), Some(&id));
}
