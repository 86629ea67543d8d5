use confreg::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "confreg=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store = InMemoryRegistrationStore::new()
        .with_id_secret(config.email_id_secret.clone())
        .with_attendees(&config.event.attendees)
        .await;
    tracing::info!(attendees = store.len().await, "registration store ready");

    let mut builder = ServerBuilder::new()
        .with_store(store)
        .with_event(config.event.clone())
        .with_id_secret(config.email_id_secret.clone())
        .with_form_config(config.form.clone());

    builder = match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "using SMTP transport");
            builder.with_mailer(SmtpMailer::new(smtp)?)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, confirmation emails are kept in memory");
            builder.with_mailer(InMemoryMailer::new())
        }
    };

    match FormSchema::from_json_file(&config.form_schema_path) {
        Ok(schema) => {
            tracing::info!(fields = schema.fields.len(), "form schema loaded");
            builder = builder.with_form_provider(GoogleFormsProvider::new(schema));
        }
        Err(e) => {
            tracing::warn!(
                path = %config.form_schema_path.display(),
                error = %e,
                "form schema not loaded, form page disabled"
            );
        }
    }

    builder.serve(&config.bind_addr).await
}
