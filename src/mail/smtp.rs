//! SMTP mailer backed by lettre

use super::{Mailer, OutgoingEmail};
use crate::config::SmtpConfig;
use crate::core::error::MailError;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP transport over implicit TLS
///
/// The connection pool lives inside the transport; build one per process and
/// share it through an `Arc<dyn Mailer>`.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
}

impl SmtpMailer {
    /// Build the transport from configuration
    ///
    /// The SMTP login doubles as the sender address.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let sender = parse_address(&config.login)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.login.clone(),
                config.password.clone(),
            ))
            .build();

        tracing::info!(host = %config.host, port = config.port, "SMTP mailer configured");

        Ok(Self { transport, sender })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let from = Mailbox::new(Some(email.from_name.clone()), self.sender.clone());
        let to = Mailbox::new(None, parse_address(&email.to)?);

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.parse::<Address>()
        .map_err(|_| MailError::InvalidAddress {
            address: raw.to_string(),
        })
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(&email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::info!(to = %email.to, "confirmation email sent");
        Ok(())
    }
}
