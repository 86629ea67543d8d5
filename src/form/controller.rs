//! Submit lifecycle of the registration form

use super::provider::FormProvider;
use crate::core::error::FormError;
use crate::core::form::FormValues;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Message shown after a successful submission
pub const SUCCESS_MESSAGE: &str = "Form submitted with success!";

/// Message shown when a submit arrives while another one is in flight
pub const BUSY_MESSAGE: &str = "A submission is already in progress, please wait";

/// State of the form, driven by submit lifecycle events only
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    #[default]
    Default,
    Loading,
    Error,
}

/// Application-specific step chained after a successful provider submit
#[async_trait]
pub trait SubmitHook: Send + Sync {
    async fn after_submit(&self, values: &FormValues) -> Result<(), FormError>;
}

/// Owns the form state and runs submissions
pub struct FormController {
    provider: Arc<dyn FormProvider>,
    hook: Option<Arc<dyn SubmitHook>>,
    state: FormState,
    message: Option<String>,
}

impl FormController {
    pub fn new(provider: Arc<dyn FormProvider>) -> Self {
        Self {
            provider,
            hook: None,
            state: FormState::Default,
            message: None,
        }
    }

    pub fn with_hook(mut self, hook: Option<Arc<dyn SubmitHook>>) -> Self {
        self.hook = hook;
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// User-visible outcome of the last submission
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The submit control is disabled while a submission is in flight
    pub fn is_submit_disabled(&self) -> bool {
        self.state == FormState::Loading
    }

    /// Enter `Loading`; returns false if a submission is already in flight
    pub fn begin(&mut self) -> bool {
        if self.state == FormState::Loading {
            return false;
        }
        self.state = FormState::Loading;
        self.message = None;
        true
    }

    /// Record the outcome of the in-flight submission
    pub fn finish(&mut self, outcome: Result<(), FormError>) -> FormState {
        match outcome {
            Ok(()) => {
                self.state = FormState::Default;
                self.message = Some(SUCCESS_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "form submission failed");
                self.state = FormState::Error;
                self.message = Some(e.to_string());
            }
        }
        self.state
    }

    /// Submit collected values: provider first, then the chained hook
    pub async fn submit(&mut self, values: &FormValues) -> FormState {
        if !self.begin() {
            return self.state;
        }

        let outcome = self.run(values).await;
        self.finish(outcome)
    }

    async fn run(&self, values: &FormValues) -> Result<(), FormError> {
        self.provider.submit(values).await?;
        if let Some(hook) = &self.hook {
            hook.after_submit(values).await?;
        }
        Ok(())
    }
}
