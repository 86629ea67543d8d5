//! Core types shared by the endpoint, the form and the storage layer

pub mod error;
pub mod form;
pub mod identity;
pub mod service;
pub mod user;

pub use error::{ApiError, ApiResult, ConfigError, FormError, MailError};
pub use form::{FieldKind, FieldOption, FormField, FormSchema, FormValues};
pub use identity::{email_to_id, is_valid_email, normalize_email};
pub use service::RegistrationStore;
pub use user::{ConfUser, UserRecord};
