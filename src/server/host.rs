//! Shared state handed to every handler

use crate::core::error::{ApiError, ApiResult};
use crate::core::form::FormValues;
use crate::form::controller::BUSY_MESSAGE;
use crate::form::{FormController, FormProvider, FormRenderer, FormState, PageView, SubmitHook};
use crate::registration::RegistrationService;
use axum::response::Html;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Everything the registration form routes need
pub struct FormHost {
    pub provider: Arc<dyn FormProvider>,
    pub renderer: FormRenderer,

    /// Whether a confirmation is chained after each provider submit
    pub chains_confirmation: bool,

    /// Held for the whole submit; a second submit finds it locked
    controller: Mutex<FormController>,
}

impl FormHost {
    pub fn new(
        provider: Arc<dyn FormProvider>,
        renderer: FormRenderer,
        hook: Option<Arc<dyn SubmitHook>>,
    ) -> Self {
        Self {
            chains_confirmation: hook.is_some(),
            controller: Mutex::new(FormController::new(provider.clone()).with_hook(hook)),
            provider,
            renderer,
        }
    }

    /// Run one submission, or refuse it while another one is in flight
    ///
    /// The answers are kept in the returned view only when the submit did
    /// not go through.
    pub async fn submit(&self, values: FormValues) -> PageView {
        let Ok(mut controller) = self.controller.try_lock() else {
            tracing::warn!("form submission refused, another one is in flight");
            return PageView {
                state: FormState::Loading,
                message: Some(BUSY_MESSAGE.to_string()),
                values,
            };
        };

        let state = controller.submit(&values).await;

        PageView {
            state,
            message: controller.message().map(str::to_string),
            values: if state == FormState::Error {
                values
            } else {
                FormValues::new()
            },
        }
    }

    /// Render the page, turning template failures into a 500
    pub fn render(&self, view: &PageView) -> ApiResult<Html<String>> {
        self.renderer
            .render_page(view)
            .map(Html)
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}

/// Host context built once by [`ServerBuilder`](super::ServerBuilder)
pub struct ServerHost {
    pub registration: RegistrationService,

    /// Present only when a form provider was configured
    pub form: Option<Arc<FormHost>>,
}

impl ServerHost {
    pub fn new(registration: RegistrationService) -> Self {
        Self {
            registration,
            form: None,
        }
    }

    pub fn with_form(mut self, form: FormHost) -> Self {
        self.form = Some(Arc::new(form));
        self
    }

    /// Whether the form page is served
    pub fn has_form(&self) -> bool {
        self.form.is_some()
    }
}
