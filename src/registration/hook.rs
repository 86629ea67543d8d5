//! Confirmation chained after a successful form submit

use super::RegistrationService;
use crate::core::error::FormError;
use crate::core::form::FormValues;
use crate::form::SubmitHook;
use async_trait::async_trait;

/// Confirms the registration using answers from the submitted form
pub struct ConfirmRegistrationHook {
    service: RegistrationService,
    email_field: String,
    name_field: Option<String>,
}

impl ConfirmRegistrationHook {
    pub fn new(
        service: RegistrationService,
        email_field: impl Into<String>,
        name_field: Option<String>,
    ) -> Self {
        Self {
            service,
            email_field: email_field.into(),
            name_field,
        }
    }
}

#[async_trait]
impl SubmitHook for ConfirmRegistrationHook {
    async fn after_submit(&self, values: &FormValues) -> Result<(), FormError> {
        let email = values
            .get(&self.email_field)
            .map(String::as_str)
            .unwrap_or_default();
        let name = self
            .name_field
            .as_ref()
            .and_then(|field| values.get(field))
            .map(String::as_str)
            .unwrap_or_default();

        self.service
            .confirm(email, name)
            .await
            .map(|_| ())
            .map_err(|e| FormError::Confirmation(e.to_string()))
    }
}
