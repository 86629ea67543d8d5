//! # confreg
//!
//! Event registration confirmation service.
//!
//! - A schema-driven registration form whose answers go to an external form
//!   provider
//! - `POST /api/confirm`, which confirms an attendee that already holds a
//!   ticket and emails them a confirmation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use confreg::prelude::*;
//!
//! let store = InMemoryRegistrationStore::new()
//!     .with_attendees(["alice@example.com"])
//!     .await;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .with_mailer(InMemoryMailer::new())
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod form;
pub mod mail;
pub mod registration;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ApiResult, ConfigError, FormError, MailError},
        form::{FieldKind, FormSchema, FormValues},
        identity::{email_to_id, is_valid_email, normalize_email},
        service::RegistrationStore,
        user::{ConfUser, UserRecord},
    };

    // === Form ===
    pub use crate::form::{
        FormController, FormProvider, FormRenderer, FormState, GoogleFormsProvider, SubmitHook,
        collect_values,
    };

    // === Mail ===
    pub use crate::mail::{ConfirmationTemplate, InMemoryMailer, Mailer, OutgoingEmail, SmtpMailer};

    // === Registration ===
    pub use crate::registration::{ConfirmRegistrationHook, RegistrationService};

    // === Storage ===
    pub use crate::storage::InMemoryRegistrationStore;

    // === Config ===
    pub use crate::config::{AppConfig, EventConfig, FormConfig, SmtpConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
