//! Schema-driven form rendering
//!
//! Each schema field maps to one of four input variants. A field whose type
//! is not recognized is skipped silently: no error and no placeholder.

use super::controller::FormState;
use super::provider::{FieldBinding, FormProvider};
use crate::core::error::FormError;
use crate::core::form::{FieldKind, FormValues};
use serde::Serialize;
use std::sync::Arc;
use tera::{Context, Tera};

const PAGE: &str = "form.html";

/// Path the form is served from and posts back to
pub const FORM_PATH: &str = "/";

/// Input variant chosen for a field
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputVariant {
    ShortAnswer,
    LongAnswer,
    Radio,
    Dropdown,
}

impl InputVariant {
    fn for_kind(kind: FieldKind) -> Option<Self> {
        match kind {
            FieldKind::ShortAnswer => Some(Self::ShortAnswer),
            FieldKind::LongAnswer => Some(Self::LongAnswer),
            FieldKind::Radio => Some(Self::Radio),
            FieldKind::Dropdown => Some(Self::Dropdown),
            FieldKind::Unsupported => None,
        }
    }
}

/// One rendered question
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionInput {
    pub variant: InputVariant,
    /// `type` attribute of text inputs
    pub input_type: &'static str,
    pub binding: FieldBinding,
    /// Previously entered answer, echoed back after a failed submit
    pub value: String,
}

/// What the page shows besides the questions
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub state: FormState,
    pub message: Option<String>,
    pub values: FormValues,
}

/// Renders the registration form
pub struct FormRenderer {
    provider: Arc<dyn FormProvider>,
    tera: Tera,
}

impl FormRenderer {
    pub fn new(provider: Arc<dyn FormProvider>) -> Result<Self, FormError> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE, include_str!("../../templates/form.html"))
            .map_err(|e| FormError::Schema(e.to_string()))?;

        Ok(Self { provider, tera })
    }

    /// Questions in schema order, unsupported fields skipped
    pub fn questions(&self, values: &FormValues) -> Vec<QuestionInput> {
        self.provider
            .schema()
            .fields
            .iter()
            .filter_map(|field| {
                let variant = InputVariant::for_kind(field.kind)?;
                let binding = self.provider.register(&field.id)?;
                let input_type = if variant == InputVariant::ShortAnswer
                    && binding.label.to_lowercase() == "email"
                {
                    "email"
                } else {
                    "text"
                };

                Some(QuestionInput {
                    variant,
                    input_type,
                    value: values.get(&field.id).cloned().unwrap_or_default(),
                    binding,
                })
            })
            .collect()
    }

    /// Render the full HTML page
    pub fn render_page(&self, view: &PageView) -> Result<String, FormError> {
        let schema = self.provider.schema();

        let mut context = Context::new();
        context.insert(
            "page_title",
            schema.title.as_deref().unwrap_or("Registration"),
        );
        context.insert("title", &schema.title);
        context.insert("description", &schema.description);
        context.insert("action", FORM_PATH);
        context.insert("questions", &self.questions(&view.values));
        context.insert("state", &view.state);
        context.insert("message", &view.message);

        self.tera
            .render(PAGE, &context)
            .map_err(|e| FormError::Schema(format!("failed to render form: {}", e)))
    }
}
