//! ServerBuilder for fluent API to build the HTTP server

use super::host::{FormHost, ServerHost};
use super::router::build_routes;
use crate::config::{EventConfig, FormConfig};
use crate::core::service::RegistrationStore;
use crate::form::{FormProvider, FormRenderer, SubmitHook};
use crate::mail::{ConfirmationTemplate, Mailer};
use crate::registration::{ConfirmRegistrationHook, RegistrationService};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the registration server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryRegistrationStore::new())
///     .with_mailer(InMemoryMailer::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn RegistrationStore>>,
    mailer: Option<Arc<dyn Mailer>>,
    event: EventConfig,
    id_secret: Option<String>,
    form_provider: Option<Arc<dyn FormProvider>>,
    form_config: FormConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            mailer: None,
            event: EventConfig::default(),
            id_secret: None,
            form_provider: None,
            form_config: FormConfig::default(),
        }
    }

    /// Set the registration store (required)
    pub fn with_store(mut self, store: impl RegistrationStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the mail transport (required)
    pub fn with_mailer(mut self, mailer: impl Mailer + 'static) -> Self {
        self.mailer = Some(Arc::new(mailer));
        self
    }

    /// Event wording used by the confirmation email
    pub fn with_event(mut self, event: EventConfig) -> Self {
        self.event = event;
        self
    }

    /// Salt for user id derivation; the store must use the same one
    pub fn with_id_secret(mut self, secret: Option<String>) -> Self {
        self.id_secret = secret;
        self
    }

    /// Serve the registration form backed by this provider
    pub fn with_form_provider(mut self, provider: impl FormProvider + 'static) -> Self {
        self.form_provider = Some(Arc::new(provider));
        self
    }

    /// Field ids used to chain a confirmation after each form submit
    pub fn with_form_config(mut self, config: FormConfig) -> Self {
        self.form_config = config;
        self
    }

    /// Build the shared host without binding any transport
    pub fn build_host(mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("RegistrationStore is required. Call .with_store()"))?;
        let mailer = self
            .mailer
            .take()
            .ok_or_else(|| anyhow::anyhow!("Mailer is required. Call .with_mailer()"))?;

        let template = ConfirmationTemplate::new(self.event)?;
        let registration =
            RegistrationService::new(store, mailer, template).with_id_secret(self.id_secret);

        let mut host = ServerHost::new(registration.clone());

        if let Some(provider) = self.form_provider.take() {
            let renderer = FormRenderer::new(provider.clone())?;
            let hook = self.form_config.email_field.map(|email_field| {
                tracing::info!(email_field = %email_field, "form submits chain a confirmation");
                Arc::new(ConfirmRegistrationHook::new(
                    registration,
                    email_field,
                    self.form_config.name_field,
                )) as Arc<dyn SubmitHook>
            });

            host = host.with_form(FormHost::new(provider, renderer, hook));
        }

        Ok(host)
    }

    /// Build the final router, wrapped in request tracing
    pub fn build(self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        Ok(build_routes(host).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http())))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Stops accepting connections on SIGTERM or Ctrl+C and lets in-flight
    /// requests finish.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(addr = %addr, "server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for SIGTERM or Ctrl+C
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        },
    }
}
