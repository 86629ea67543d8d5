//! Registration form: schema-driven rendering and submit lifecycle
//!
//! - [`provider`]: the injected form-provider capability
//! - [`renderer`]: maps schema fields to input variants and renders the page
//! - [`values`]: aggregates submitted controls into one payload
//! - [`controller`]: owns the `default` / `loading` / `error` state

pub mod controller;
pub mod provider;
pub mod renderer;
pub mod values;

pub use controller::{FormController, FormState, SubmitHook};
pub use provider::{FieldBinding, FormProvider, GoogleFormsProvider};
pub use renderer::{FORM_PATH, FormRenderer, InputVariant, PageView, QuestionInput};
pub use values::collect_values;
