//! The two sample menus the demo inserts.
//!
//! Both describe the same structure. They differ in one place:
//! `menu.popup.menuitem.1.value` is a string in the menu parsed from JSON and a
//! BSON date in the menu built in code, since JSON has no date type and
//! parsing never guesses one.

use crate::error::{Error, Result};
use bson::{Bson, Document};

pub const MENU_JSON: &str = r#"{"menu": {
  "id": "fileFromJSON",
  "value": "File",
  "popup": {
    "menuitem": [
      {"value": "New", "onclick": "CreateNewDoc()"},
      {"value": "2020-06-28T08:18:56Z", "onclick": "ShowDateTime()"}
    ]
  }
}}"#;

/// Parses [`MENU_JSON`].
pub fn menu_from_json() -> Result<Document> {
    parse_document(MENU_JSON)
}

/// Parses a JSON object into a document, keeping the field order of the text.
/// Plain strings stay strings whatever they look like. Extended JSON wrappers
/// such as `{"$date": ..}` become the BSON type they name.
pub fn parse_document(json: &str) -> Result<Document> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(Error::InvalidRequest(format!(
            "Expected a JSON object, got: {}",
            value
        )));
    }
    Ok(bson::to_document(&value)?)
}

/// Builds the menu field by field. The second item's `value` is the current
/// time, stored as a BSON date.
pub fn menu_from_fields() -> Document {
    let mut new_item = Document::new();
    new_item.insert("value", "New");
    new_item.insert("onclick", "CreateNewDoc()");

    let mut date_item = Document::new();
    date_item.insert("value", Bson::DateTime(bson::DateTime::from_chrono(chrono::Utc::now())));
    date_item.insert("onclick", "ShowDateTime()");

    let mut popup = Document::new();
    popup.insert("menuitem", vec![Bson::Document(new_item), Bson::Document(date_item)]);

    let mut menu = Document::new();
    menu.insert("id", "fileFromCode");
    menu.insert("value", "File");
    menu.insert("popup", popup);

    let mut document = Document::new();
    document.insert("menu", menu);
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::bson_utils::{get_path, type_name};
    use bson::doc;

    /// Same keys, in the same order, at every level.
    fn same_shape(a: &Bson, b: &Bson) -> bool {
        match (a, b) {
            (Bson::Document(a), Bson::Document(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ak, av), (bk, bv))| ak == bk && same_shape(av, bv))
            }
            (Bson::Array(a), Bson::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_shape(x, y))
            }
            (Bson::Document(_), _) | (_, Bson::Document(_)) => false,
            (Bson::Array(_), _) | (_, Bson::Array(_)) => false,
            _ => true,
        }
    }

    #[test]
    fn test_json_date_stays_a_string() {
        let menu = menu_from_json().unwrap();
        let value = get_path(&menu, "menu.popup.menuitem.1.value").unwrap();
        assert_eq!(value, &Bson::String("2020-06-28T08:18:56Z".to_string()));
        assert_eq!(type_name(value), "string");
    }

    #[test]
    fn test_code_date_is_a_date() {
        let before = chrono::Utc::now().timestamp_millis();
        let menu = menu_from_fields();
        let after = chrono::Utc::now().timestamp_millis();

        let value = get_path(&menu, "menu.popup.menuitem.1.value").unwrap();
        assert_eq!(type_name(value), "date");
        let millis = value.as_datetime().unwrap().timestamp_millis();
        assert!(before <= millis && millis <= after);
    }

    #[test]
    fn test_same_structure_different_type() {
        let from_json = Bson::Document(menu_from_json().unwrap());
        let from_code = Bson::Document(menu_from_fields());
        assert!(same_shape(&from_json, &from_code));

        let (from_json, from_code) = (from_json.as_document().unwrap(), from_code.as_document().unwrap());
        let path = "menu.popup.menuitem.1.value";
        assert_ne!(
            type_name(get_path(from_json, path).unwrap()),
            type_name(get_path(from_code, path).unwrap())
        );
        assert_eq!(get_path(from_json, "menu.id"), Some(&Bson::String("fileFromJSON".to_string())));
        assert_eq!(get_path(from_code, "menu.id"), Some(&Bson::String("fileFromCode".to_string())));
    }

    #[test]
    fn test_json_parse_is_deterministic_and_ordered() {
        let menu = menu_from_json().unwrap();
        assert_eq!(menu, menu_from_json().unwrap());
        assert!(!menu.contains_key("_id"));
        assert_eq!(
            menu,
            doc! { "menu": {
                "id": "fileFromJSON",
                "value": "File",
                "popup": { "menuitem": [
                    { "value": "New", "onclick": "CreateNewDoc()" },
                    { "value": "2020-06-28T08:18:56Z", "onclick": "ShowDateTime()" }
                ] }
            } }
        );
    }

    #[test]
    fn test_parse_document_rejects_non_objects() {
        assert!(matches!(parse_document("[1, 2]"), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_parse_document_reads_extended_json() {
        let doc = parse_document(r#"{"plain": "2020-06-28T08:18:56Z", "typed": {"$date": "2020-06-28T08:18:56Z"}}"#)
            .unwrap();
        assert_eq!(doc.get_str("plain").unwrap(), "2020-06-28T08:18:56Z");
        assert_eq!(
            doc.get_datetime("typed").unwrap(),
            &bson::DateTime::from_millis(1_593_332_336_000)
        );
        assert!(matches!(parse_document("{\"menu\": "), Err(Error::JsonError(_))));
    }
}
