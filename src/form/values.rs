//! Aggregation of submitted controls into a single payload

use super::provider::{OTHER_OPTION, OTHER_RESPONSE_SUFFIX};
use crate::core::form::{FieldKind, FormSchema, FormValues};
use std::collections::HashMap;

/// Collect raw control values into answers keyed by field id
///
/// Answers follow schema order. Unsupported fields and empty answers are
/// dropped. When the "other" radio option is selected its free text replaces
/// the selection.
pub fn collect_values(schema: &FormSchema, raw: &HashMap<String, String>) -> FormValues {
    let mut values = FormValues::new();

    for field in &schema.fields {
        if field.kind == FieldKind::Unsupported {
            continue;
        }

        let Some(value) = raw.get(&field.id) else {
            continue;
        };

        let value = if field.kind == FieldKind::Radio && value == OTHER_OPTION {
            let key = format!("{}{}", field.id, OTHER_RESPONSE_SUFFIX);
            raw.get(&key).map(|s| s.trim()).unwrap_or_default()
        } else {
            value.trim()
        };

        if !value.is_empty() {
            values.insert(field.id.clone(), value.to_string());
        }
    }

    values
}
