//! Form schema types
//!
//! The schema is the static JSON document exported from the form-management
//! system. It is loaded once and never mutated.

use crate::core::error::FormError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Exported schemas write `null` for absent optional values
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Kind of question, as named in the schema document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    ShortAnswer,
    LongAnswer,
    Radio,
    Dropdown,

    /// Any type this renderer does not know (checkboxes, grids, ...)
    #[serde(other)]
    Unsupported,
}

/// One selectable option of a radio or dropdown question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldOption {
    pub label: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Marks the free-text "other" option of a radio question
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom: bool,
}

impl FieldOption {
    /// Element id used in the rendered page
    ///
    /// Falls back to `<field_id>-<index>` when the schema leaves the id empty.
    pub fn element_id(&self, field_id: &str, index: usize) -> String {
        if self.id.is_empty() {
            format!("{}-{}", field_id, index)
        } else {
            self.id.clone()
        }
    }
}

/// One question of the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormField {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    pub label: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<FieldOption>,
}

impl FormField {
    /// Regular (non "other") options in schema order
    pub fn choices(&self) -> impl Iterator<Item = &FieldOption> {
        self.options.iter().filter(|o| !o.custom)
    }

    /// The free-text "other" option, if the question has one
    pub fn custom_option(&self) -> Option<&FieldOption> {
        self.options.iter().find(|o| o.custom)
    }
}

/// The whole form document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Identifier of the form at the provider
    #[serde(default)]
    pub form_id: Option<String>,

    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// Load a schema from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a schema from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Find a field by id
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Collected answers keyed by field id, in schema order
pub type FormValues = IndexMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"{
        "title": "Hackathon",
        "formId": "1FAIpQLSe",
        "fields": [
            { "id": "100", "type": "SHORT_ANSWER", "label": "Email", "required": true },
            { "id": "200", "type": "CHECKBOX", "label": "Pick many" },
            {
                "id": "300",
                "type": "RADIO",
                "label": "Track",
                "options": [
                    { "label": "Web", "id": "web" },
                    { "label": "Other", "custom": true }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_schema() {
        let schema = FormSchema::from_json_str(SCHEMA).unwrap();

        assert_eq!(schema.title.as_deref(), Some("Hackathon"));
        assert_eq!(schema.form_id.as_deref(), Some("1FAIpQLSe"));
        assert_eq!(schema.fields.len(), 3);
        assert_eq!(schema.fields[0].kind, FieldKind::ShortAnswer);
        assert!(schema.fields[0].required);
        assert_eq!(schema.fields[0].description, "");
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let schema = FormSchema::from_json_str(SCHEMA).unwrap();
        assert_eq!(schema.fields[1].kind, FieldKind::Unsupported);
    }

    #[test]
    fn test_custom_option_split() {
        let schema = FormSchema::from_json_str(SCHEMA).unwrap();
        let radio = schema.field("300").unwrap();

        assert_eq!(radio.choices().count(), 1);
        assert_eq!(radio.custom_option().unwrap().label, "Other");
    }

    #[test]
    fn test_option_element_id_fallback() {
        let option = FieldOption {
            label: "Other".to_string(),
            id: String::new(),
            custom: true,
        };
        assert_eq!(option.element_id("300", 1), "300-1");
    }

    #[test]
    fn test_null_optional_values_default() {
        let schema = FormSchema::from_json_str(
            r#"{
                "fields": [
                    { "id": "1", "type": "SHORT_ANSWER", "label": "Email",
                      "description": null, "required": true, "options": null },
                    { "id": "2", "type": "RADIO", "label": "Track", "required": null,
                      "options": [{ "label": "Web", "id": null, "custom": null }] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.fields[0].description, "");
        assert!(schema.fields[0].required);
        assert!(schema.fields[0].options.is_empty());
        assert!(!schema.fields[1].required);
        assert_eq!(schema.fields[1].options[0].id, "");
        assert!(!schema.fields[1].options[0].custom);
    }

    #[test]
    fn test_invalid_schema() {
        let err = FormSchema::from_json_str("{ \"fields\": 3 }").unwrap_err();
        assert!(matches!(err, FormError::Schema(_)));
    }
}
