use crate::error::{Error, Result};
use crate::util::bson_utils::{bson_eq, get_path};
use bson::{Bson, Document};

/// Builds a predicate from an exact-match filter such as `{ "_id": <id> }`.
///
/// Every field of the filter must be present in the document with an equal
/// value; keys may be dotted paths. An empty filter matches every document.
/// Query operators (`$eq`, `$and`, ...) are not supported.
pub fn to_filter(filter: &Document) -> Result<impl Fn(&Document) -> bool> {
    let mut conditions: Vec<(String, Bson)> = Vec::with_capacity(filter.len());
    for (key, value) in filter {
        if key.starts_with('$') {
            return Err(Error::InvalidRequest(format!(
                "Unsupported query operator: {}",
                key
            )));
        }
        if let Bson::Document(d) = value {
            if let Some(op) = d.keys().find(|k| k.starts_with('$')) {
                return Err(Error::InvalidRequest(format!(
                    "Unsupported query operator: {}",
                    op
                )));
            }
        }
        conditions.push((key.clone(), value.clone()));
    }

    Ok(move |doc: &Document| {
        conditions.iter().all(|(path, expected)| match get_path(doc, path) {
            Some(actual) => bson_eq(actual, expected),
            None => false,
        })
    })
}
