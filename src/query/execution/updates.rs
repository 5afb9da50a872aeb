use crate::error::{Error, Result};
use crate::query::update::{UpdateExpr, UpdateOp, UpdatePathComponent};
use bson::{Bson, Document};

/// Applies every operation of `update` to `doc`, in order.
///
/// Returns `true` if the document changed. A `$set` writing the value a field
/// already holds leaves the document untouched and counts as unmodified.
pub fn apply_update(update: &UpdateExpr, doc: &mut Document) -> Result<bool> {
    let before = doc.clone();
    for op in &update.ops {
        match op {
            UpdateOp::Set { path, value } => set(doc, path, value.clone())?,
        }
    }
    Ok(before != *doc)
}

fn set(doc: &mut Document, path: &[UpdatePathComponent], value: Bson) -> Result<()> {
    let (last, parent_path) = path
        .split_last()
        .ok_or_else(|| Error::InvalidRequest("Update path cannot be empty".to_string()))?;

    let mut component = BsonComponent::Document(doc);
    for path_component in parent_path {
        component = component.step(path_component)?;
    }
    component.assign(last, value)
}

/// A container reached while walking an update path.
#[derive(Debug)]
enum BsonComponent<'a> {
    Document(&'a mut Document),
    Array(&'a mut bson::Array),
}

impl<'a> BsonComponent<'a> {
    /// Moves one level down, creating an empty document for a missing field or
    /// for an array index past the end (the gap is filled with nulls).
    fn step(self, path_component: &UpdatePathComponent) -> Result<BsonComponent<'a>> {
        match self {
            BsonComponent::Document(doc) => {
                // A numeric component names a field when the parent is a document.
                let name = path_component.to_string();
                if !doc.contains_key(&name) {
                    doc.insert(name.clone(), Bson::Document(Document::new()));
                }
                match doc.get_mut(&name) {
                    Some(Bson::Document(d)) => Ok(BsonComponent::Document(d)),
                    Some(Bson::Array(a)) => Ok(BsonComponent::Array(a)),
                    _ => Err(Error::WriteRejected(format!(
                        "Cannot traverse into non-container field '{}'",
                        name
                    ))),
                }
            }
            BsonComponent::Array(arr) => match path_component {
                UpdatePathComponent::ArrayElement(index) => {
                    let index = *index;
                    if index >= arr.len() {
                        pad_with_nulls(arr, index);
                        arr.push(Bson::Document(Document::new()));
                    }
                    match &mut arr[index] {
                        Bson::Document(d) => Ok(BsonComponent::Document(d)),
                        Bson::Array(a) => Ok(BsonComponent::Array(a)),
                        _ => Err(Error::WriteRejected(format!(
                            "Cannot traverse into non-container element at index {}",
                            index
                        ))),
                    }
                }
                UpdatePathComponent::FieldName(name) => Err(Error::WriteRejected(format!(
                    "Cannot use field name '{}' to index into an array",
                    name
                ))),
            },
        }
    }

    fn assign(self, last_component: &UpdatePathComponent, value: Bson) -> Result<()> {
        match (self, last_component) {
            (BsonComponent::Document(doc), component) => {
                doc.insert(component.to_string(), value);
            }
            (BsonComponent::Array(arr), UpdatePathComponent::ArrayElement(index)) => {
                if *index < arr.len() {
                    arr[*index] = value;
                } else {
                    pad_with_nulls(arr, *index);
                    arr.push(value);
                }
            }
            (BsonComponent::Array(_), UpdatePathComponent::FieldName(name)) => {
                return Err(Error::WriteRejected(format!(
                    "Cannot use field name '{}' to index into an array",
                    name
                )))
            }
        }
        Ok(())
    }
}

fn pad_with_nulls(arr: &mut bson::Array, len: usize) {
    while arr.len() < len {
        arr.push(Bson::Null);
    }
}
