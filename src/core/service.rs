//! Service trait for the registration data-access layer

use crate::core::user::UserRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Data-access collaborator for registration records
///
/// Implementations own persistence. The framework only relies on these three
/// calls and is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Ticket number handed out at the initial registration step, if any
    async fn ticket_number(&self, user_id: &str) -> Result<Option<u64>>;

    /// Mark the registration confirmed with the given display name
    ///
    /// Fails when the record is missing the expected prior state.
    async fn confirm(&self, user_id: &str, name: &str) -> Result<()>;

    /// Fetch the full user record
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>>;
}
