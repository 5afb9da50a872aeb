use std::fmt;
use bson::{Bson, Document};
use crate::error::{Error, Result};

/// Represents a component in an update path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePathComponent {
    /// A named field (e.g., "field" in "document.field").
    FieldName(String),
    /// A numeric component (e.g., "1" in "array.1"). Indexes into an array, or
    /// names a field when the parent is a document.
    ArrayElement(usize),
}

impl fmt::Display for UpdatePathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePathComponent::FieldName(name) => write!(f, "{}", name),
            UpdatePathComponent::ArrayElement(index) => write!(f, "{}", index),
        }
    }
}

/// A path for an update operation, composed of `UpdatePathComponent`s.
pub type UpdatePath = Vec<UpdatePathComponent>;

pub fn format_path(path: &[UpdatePathComponent]) -> String {
    path.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Represents a single update operation.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOp {
    /// `$set`: Sets the value of a field, creating missing parents.
    Set { path: UpdatePath, value: Bson },
}

impl UpdateOp {
    pub fn path(&self) -> &UpdatePath {
        match self {
            UpdateOp::Set { path, .. } => path,
        }
    }
}

/// A parsed update document, e.g. `{ "$set": { "a.b": 1, "c.0": 2 } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpr {
    pub ops: Vec<UpdateOp>,
}

pub fn parse_update(update: &Document) -> Result<UpdateExpr> {
    let mut ops = Vec::new();

    for (key, value) in update.iter() {
        if !key.starts_with('$') {
            return Err(Error::InvalidRequest(format!(
                "Update operator must start with '$': {}",
                key
            )));
        }

        match key.as_str() {
            "$set" => {
                let sub_doc = value.as_document().ok_or_else(|| {
                    Error::InvalidRequest("$set value must be a document".to_string())
                })?;
                for (path, val) in sub_doc {
                    ops.push(UpdateOp::Set {
                        path: parse_update_path(path)?,
                        value: val.clone(),
                    });
                }
            }
            op => {
                return Err(Error::InvalidRequest(format!(
                    "Unsupported update operator: {}",
                    op
                )))
            }
        }
    }

    if ops.is_empty() {
        return Err(Error::InvalidRequest(
            "Update document must contain at least one field".to_string(),
        ));
    }

    validate_no_conflicts(&ops)?;

    Ok(UpdateExpr { ops })
}

pub fn parse_update_path(path: &str) -> Result<UpdatePath> {
    path.split('.').map(parse_update_path_component).collect()
}

fn parse_update_path_component(component: &str) -> Result<UpdatePathComponent> {
    if component.is_empty() {
        return Err(Error::InvalidRequest(
            "An empty update path component is not valid".to_string(),
        ));
    }
    if component.starts_with('$') {
        return Err(Error::InvalidRequest(format!(
            "Positional operators are not supported: {}",
            component
        )));
    }
    if let Ok(index) = component.parse::<usize>() {
        Ok(UpdatePathComponent::ArrayElement(index))
    } else {
        Ok(UpdatePathComponent::FieldName(component.to_string()))
    }
}

/// Two paths conflict when one is a prefix of the other
/// (e.g. `a.b` and `a.b.c`), as the server would refuse them.
fn validate_no_conflicts(ops: &[UpdateOp]) -> Result<()> {
    for (i, a) in ops.iter().enumerate() {
        for b in &ops[i + 1..] {
            let (a, b) = (a.path(), b.path());
            let len = a.len().min(b.len());
            if a[..len] == b[..len] {
                return Err(Error::InvalidRequest(format!(
                    "Updating the path '{}' would create a conflict at '{}'",
                    format_path(b),
                    format_path(&a[..len])
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn field(s: &str) -> UpdatePathComponent {
        UpdatePathComponent::FieldName(s.to_string())
    }

    fn index(i: usize) -> UpdatePathComponent {
        UpdatePathComponent::ArrayElement(i)
    }

    #[test]
    fn test_parse_positional_path() {
        let update = parse_update(&doc! { "$set": { "menu.popup.menuitem.1.onclick": "x" } }).unwrap();
        assert_eq!(
            update.ops,
            vec![UpdateOp::Set {
                path: vec![field("menu"), field("popup"), field("menuitem"), index(1), field("onclick")],
                value: Bson::String("x".to_string()),
            }]
        );
        assert_eq!(format_path(update.ops[0].path()), "menu.popup.menuitem.1.onclick");
    }

    #[test]
    fn test_rejects_replacement_document() {
        let err = parse_update(&doc! { "menu.id2": "x" }).unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_rejects_unsupported_operator() {
        let err = parse_update(&doc! { "$inc": { "a": 1 } }).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported update operator: $inc");
    }

    #[test]
    fn test_rejects_empty_and_positional_components() {
        assert!(parse_update(&doc! { "$set": { "a..b": 1 } }).is_err());
        assert!(parse_update(&doc! { "$set": { "a.$[].b": 1 } }).is_err());
        assert!(parse_update(&doc! { "$set": {} }).is_err());
    }

    #[test]
    fn test_rejects_conflicting_paths() {
        let err = parse_update(&doc! { "$set": { "a.b": 1, "a.b.c": 2 } }).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Updating the path 'a.b.c' would create a conflict at 'a.b'"
        );
        assert!(parse_update(&doc! { "$set": { "a.b": 1, "a.c": 2 } }).is_ok());
    }
}
