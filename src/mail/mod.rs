//! Outbound email
//!
//! The transport is an explicitly constructed [`Mailer`] passed into the
//! registration service, so tests and development runs can swap in
//! [`InMemoryMailer`].

pub mod smtp;
pub mod template;

use crate::core::error::MailError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

pub use smtp::SmtpMailer;
pub use template::ConfirmationTemplate;

/// A message ready to hand to a transport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender display name
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Mail transport capability
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// Mailer that keeps every message in memory
///
/// Used when no SMTP server is configured, and by tests.
#[derive(Clone, Default)]
pub struct InMemoryMailer {
    outbox: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first
    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        tracing::info!(to = %email.to, subject = %email.subject, "queued email in memory");
        self.outbox.lock().await.push(email);
        Ok(())
    }
}
