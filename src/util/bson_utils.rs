use bson::{Bson, Document};

/// Returns a copy of `doc` with `key: value` as its very first field.
/// An existing field with the same key is dropped from its old position.
pub fn prepend_field(doc: Document, key: &str, value: Bson) -> Document {
    let mut result = Document::new();
    result.insert(key, value);
    for (k, v) in doc {
        if k != key {
            result.insert(k, v);
        }
    }
    result
}

/// Resolves a dotted path (`menu.popup.menuitem.1.onclick`) against `doc`.
///
/// A numeric component indexes into an array, or names a field when the value
/// at that level is a document.
pub fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut components = path.split('.');
    let mut current = doc.get(components.next()?)?;

    for component in components {
        current = match current {
            Bson::Document(d) => d.get(component)?,
            Bson::Array(a) => a.get(component.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// The name the server uses for the type of `value` (as reported by `$type`).
pub fn type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Double(_) => "double",
        Bson::String(_) => "string",
        Bson::Document(_) => "object",
        Bson::Array(_) => "array",
        Bson::Binary(_) => "binData",
        Bson::Undefined => "undefined",
        Bson::ObjectId(_) => "objectId",
        Bson::Boolean(_) => "bool",
        Bson::DateTime(_) => "date",
        Bson::Null => "null",
        Bson::RegularExpression(_) => "regex",
        Bson::DbPointer(_) => "dbPointer",
        Bson::JavaScriptCode(_) => "javascript",
        Bson::Symbol(_) => "symbol",
        Bson::JavaScriptCodeWithScope(_) => "javascriptWithScope",
        Bson::Int32(_) => "int",
        Bson::Timestamp(_) => "timestamp",
        Bson::Int64(_) => "long",
        Bson::Decimal128(_) => "decimal",
        Bson::MaxKey => "maxKey",
        Bson::MinKey => "minKey",
        #[allow(unreachable_patterns)]
        _ => "unknown",
    }
}

/// Equality as used by an exact-match filter: numbers compare by value across
/// `int`, `long` and `double`, everything else must match in type and value.
/// Embedded documents compare field by field, in order.
pub fn bson_eq(a: &Bson, b: &Bson) -> bool {
    match (a, b) {
        // Handle NaN correctly (MongoDB: NaN == NaN)
        (Bson::Double(x), Bson::Double(y)) if x.is_nan() && y.is_nan() => true,
        (Bson::Double(x), Bson::Double(y)) => x == y,

        // Normalize and compare mixed numeric types
        (Bson::Int32(x), Bson::Int64(y)) => *x as i64 == *y,
        (Bson::Int64(x), Bson::Int32(y)) => *x == *y as i64,
        (Bson::Int32(x), Bson::Double(y)) => *x as f64 == *y,
        (Bson::Double(x), Bson::Int32(y)) => *x == *y as f64,
        (Bson::Int64(x), Bson::Double(y)) => *x as f64 == *y,
        (Bson::Double(x), Bson::Int64(y)) => *x == *y as f64,

        (Bson::Document(a), Bson::Document(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|((ak, av), (bk, bv))| ak == bk && bson_eq(av, bv))
        }

        (Bson::Array(a), Bson::Array(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(x, y)| bson_eq(x, y))
        }

        // Default strict equality for other types
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    #[test]
    fn test_prepend_field() {
        let id = ObjectId::new();
        let doc = prepend_field(doc! { "a": 1, "b": 2 }, "_id", Bson::ObjectId(id));
        let keys: Vec<&String> = doc.keys().collect();
        assert_eq!(keys, vec!["_id", "a", "b"]);
        assert_eq!(doc.get_object_id("_id").unwrap(), id);
    }

    #[test]
    fn test_prepend_field_replaces_existing() {
        let doc = prepend_field(doc! { "a": 1, "_id": 5 }, "_id", Bson::Int32(7));
        assert_eq!(doc, doc! { "_id": 7, "a": 1 });
    }

    #[test]
    fn test_get_path() {
        let doc = doc! { "menu": { "popup": { "menuitem": [ { "v": "a" }, { "v": "b" } ] }, "0": "zero" } };
        assert_eq!(get_path(&doc, "menu.popup.menuitem.1.v"), Some(&Bson::String("b".to_string())));
        assert_eq!(get_path(&doc, "menu.0"), Some(&Bson::String("zero".to_string())));
        assert_eq!(get_path(&doc, "menu.popup.menuitem.2.v"), None);
        assert_eq!(get_path(&doc, "menu.popup.menuitem.x"), None);
        assert_eq!(get_path(&doc, "missing"), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&Bson::String("2020-06-28T08:18:56Z".to_string())), "string");
        assert_eq!(type_name(&Bson::DateTime(bson::DateTime::now())), "date");
        assert_eq!(type_name(&Bson::ObjectId(ObjectId::new())), "objectId");
    }

    #[test]
    fn test_bson_eq() {
        assert!(bson_eq(&Bson::Int32(1), &Bson::Int64(1)));
        assert!(bson_eq(&Bson::Double(2.0), &Bson::Int32(2)));
        assert!(bson_eq(&Bson::Double(f64::NAN), &Bson::Double(f64::NAN)));
        assert!(!bson_eq(&Bson::String("1".to_string()), &Bson::Int32(1)));
        assert!(bson_eq(&Bson::from(doc! { "a": 1, "b": 2i64 }), &Bson::from(doc! { "a": 1i64, "b": 2 })));
        assert!(!bson_eq(&Bson::from(doc! { "a": 1, "b": 2 }), &Bson::from(doc! { "b": 2, "a": 1 })));
    }
}
