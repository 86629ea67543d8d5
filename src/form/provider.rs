//! Form provider capability
//!
//! The provider owns the schema and the submission call. The renderer only
//! talks to it through [`FormProvider::register`] and
//! [`FormProvider::submit`], so tests can inject a fake provider.

use crate::core::error::FormError;
use crate::core::form::{FieldKind, FormField, FormSchema, FormValues};
use async_trait::async_trait;
use serde::Serialize;

/// Value submitted by the radio control when the "other" option is picked
pub const OTHER_OPTION: &str = "__other_option__";

/// Suffix of the control carrying the free text of the "other" option
pub const OTHER_RESPONSE_SUFFIX: &str = "-other_option_response";

/// One option bound to a control
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BoundOption {
    pub element_id: String,
    pub label: String,
    /// Value submitted when this option is selected
    pub value: String,
}

/// Everything a rendered control needs to bind to a field
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldBinding {
    /// Control name; collected values are keyed by it
    pub name: String,
    pub label: String,
    pub description: String,
    pub required: bool,
    pub options: Vec<BoundOption>,
    pub custom_option: Option<BoundOption>,
    /// Name of the free-text control of the "other" option
    pub custom_input_name: Option<String>,
}

impl FieldBinding {
    /// Bind a schema field
    pub fn from_field(field: &FormField) -> Self {
        let options = field
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.custom)
            .map(|(i, o)| BoundOption {
                element_id: o.element_id(&field.id, i),
                label: o.label.clone(),
                value: o.label.clone(),
            })
            .collect();

        let custom = field
            .options
            .iter()
            .enumerate()
            .find(|(_, o)| o.custom)
            .filter(|_| field.kind == FieldKind::Radio);

        Self {
            name: field.id.clone(),
            label: field.label.clone(),
            description: field.description.clone(),
            required: field.required,
            options,
            custom_option: custom.map(|(i, o)| BoundOption {
                element_id: o.element_id(&field.id, i),
                label: o.label.clone(),
                value: OTHER_OPTION.to_string(),
            }),
            custom_input_name: custom.map(|_| format!("{}{}", field.id, OTHER_RESPONSE_SUFFIX)),
        }
    }
}

/// Injected form-provider capability
#[async_trait]
pub trait FormProvider: Send + Sync {
    /// The static schema the form is rendered from
    fn schema(&self) -> &FormSchema;

    /// Binding for a field, or `None` if the provider does not know it
    fn register(&self, field_id: &str) -> Option<FieldBinding> {
        self.schema().field(field_id).map(FieldBinding::from_field)
    }

    /// Forward collected values to the provider
    async fn submit(&self, values: &FormValues) -> Result<(), FormError>;
}

/// Provider backed by a published Google Form
pub struct GoogleFormsProvider {
    schema: FormSchema,
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleFormsProvider {
    pub fn new(schema: FormSchema) -> Self {
        let endpoint = format!(
            "https://docs.google.com/forms/d/e/{}/formResponse",
            schema.form_id.as_deref().unwrap_or_default()
        );
        Self {
            schema,
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Override the submission URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Encode values as Google Forms `entry.<id>` pairs
    ///
    /// A radio answer that matches none of the option labels is sent as the
    /// "other" option with its free text.
    pub fn entries(&self, values: &FormValues) -> Vec<(String, String)> {
        let mut entries = Vec::with_capacity(values.len());

        for (id, value) in values {
            let key = format!("entry.{}", id);
            let is_other = self.schema.field(id).is_some_and(|field| {
                field.kind == FieldKind::Radio
                    && field.custom_option().is_some()
                    && !field.choices().any(|o| &o.label == value)
            });

            if is_other {
                entries.push((key.clone(), OTHER_OPTION.to_string()));
                entries.push((format!("{}.other_option_response", key), value.clone()));
            } else {
                entries.push((key, value.clone()));
            }
        }

        entries
    }
}

#[async_trait]
impl FormProvider for GoogleFormsProvider {
    fn schema(&self) -> &FormSchema {
        &self.schema
    }

    async fn submit(&self, values: &FormValues) -> Result<(), FormError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&self.entries(values))
            .send()
            .await
            .map_err(|e| FormError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "form provider rejected submission");
            return Err(FormError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::info!(answers = values.len(), "form submitted to provider");
        Ok(())
    }
}
