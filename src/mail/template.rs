//! Confirmation email templates rendered with tera

use super::OutgoingEmail;
use crate::config::EventConfig;
use crate::core::error::MailError;
use tera::{Context, Tera};

const SUBJECT: &str = "confirmation_subject.txt";
const TEXT: &str = "confirmation.txt";
const HTML: &str = "confirmation.html";

/// Renders the "you are registered" email
///
/// The HTML body is autoescaped, so display names cannot inject markup.
pub struct ConfirmationTemplate {
    tera: Tera,
    event: EventConfig,
}

impl ConfirmationTemplate {
    pub fn new(event: EventConfig) -> Result<Self, MailError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (SUBJECT, include_str!("../../templates/confirmation_subject.txt")),
            (TEXT, include_str!("../../templates/confirmation.txt")),
            (HTML, include_str!("../../templates/confirmation.html")),
        ])
        .map_err(|e| MailError::Template {
            template: "confirmation".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { tera, event })
    }

    /// Compose the email for a confirmed attendee
    pub fn compose(&self, to: &str, name: &str) -> Result<OutgoingEmail, MailError> {
        let mut context = Context::new();
        context.insert("name", name);
        context.insert("event_name", &self.event.event_name);
        context.insert("schedule", &self.event.schedule);
        context.insert("community_url", &self.event.community_url);

        Ok(OutgoingEmail {
            from_name: self.event.sender_name.clone(),
            to: to.to_string(),
            subject: self.render(SUBJECT, &context)?.trim().to_string(),
            text: self.render(TEXT, &context)?,
            html: self.render(HTML, &context)?,
        })
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, MailError> {
        self.tera
            .render(template, context)
            .map_err(|e| MailError::Template {
                template: template.to_string(),
                message: e.to_string(),
            })
    }
}
