//! Registration confirmation flow
//!
//! One request walks a single linear chain: normalize and validate the email,
//! derive the user id, check the ticket, confirm, then notify. Nothing is
//! retried.

mod hook;

pub use hook::ConfirmRegistrationHook;

use crate::core::error::{ApiError, ApiResult};
use crate::core::identity::{email_to_id, is_valid_email, normalize_email};
use crate::core::service::RegistrationStore;
use crate::core::user::ConfUser;
use crate::mail::{ConfirmationTemplate, Mailer};
use std::sync::Arc;

/// Confirms registrations and sends the notification email
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn RegistrationStore>,
    mailer: Arc<dyn Mailer>,
    template: Arc<ConfirmationTemplate>,
    id_secret: Option<String>,
}

impl RegistrationService {
    pub fn new(
        store: Arc<dyn RegistrationStore>,
        mailer: Arc<dyn Mailer>,
        template: ConfirmationTemplate,
    ) -> Self {
        Self {
            store,
            mailer,
            template: Arc::new(template),
            id_secret: None,
        }
    }

    /// Salt user id derivation; must match the store's secret
    pub fn with_id_secret(mut self, secret: Option<String>) -> Self {
        self.id_secret = secret;
        self
    }

    /// Confirm the registration for `email` under the display name `name`
    ///
    /// A failure to send the notification is logged and does not fail the
    /// call, since the registration is already confirmed at that point.
    pub async fn confirm(&self, email: &str, name: &str) -> ApiResult<ConfUser> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ApiError::BadEmail);
        }

        let id = email_to_id(&email, self.id_secret.as_deref());

        if self.store.ticket_number(&id).await?.is_none() {
            tracing::debug!(user_id = %id, "no ticket for email");
            return Err(ApiError::EmailNotFound);
        }

        if let Err(e) = self.store.confirm(&id, name).await {
            tracing::warn!(user_id = %id, error = %e, "confirm step failed");
            return Err(ApiError::RegistrationNotCompleted);
        }

        tracing::info!(user_id = %id, "registration confirmed");

        let display_name = match self.store.get_user(&id).await {
            Ok(Some(user)) => user.name.unwrap_or_else(|| name.to_string()),
            Ok(None) => {
                tracing::warn!(user_id = %id, "confirmed user record missing");
                name.to_string()
            }
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "failed to fetch confirmed user");
                name.to_string()
            }
        };

        self.notify(&id, &email, &display_name).await;

        Ok(ConfUser { id, email })
    }

    async fn notify(&self, id: &str, email: &str, name: &str) {
        let message = match self.template.compose(email, name) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(user_id = %id, error = %e, "failed to compose confirmation email");
                return;
            }
        };

        if let Err(e) = self.mailer.send(message).await {
            tracing::error!(user_id = %id, error = %e, "failed to send confirmation email");
        }
    }
}
