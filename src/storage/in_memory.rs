//! In-memory implementation of RegistrationStore for testing and development

use crate::core::identity::{email_to_id, normalize_email};
use crate::core::service::RegistrationStore;
use crate::core::user::UserRecord;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    last_ticket: u64,
}

/// In-memory registration store
///
/// Useful for testing and development. Records are keyed by the derived user
/// id, so the store must be built with the same id secret as the service.
#[derive(Clone)]
pub struct InMemoryRegistrationStore {
    inner: Arc<RwLock<Inner>>,
    id_secret: Option<String>,
}

impl InMemoryRegistrationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            id_secret: None,
        }
    }

    /// Use a secret when deriving user ids
    pub fn with_id_secret(mut self, secret: Option<String>) -> Self {
        self.id_secret = secret;
        self
    }

    /// Register every email in the list
    pub async fn with_attendees<I, S>(self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for email in emails {
            self.register(email.as_ref()).await;
        }
        self
    }

    /// Initial registration step: create the record and hand out a ticket
    ///
    /// Registering the same email twice returns the existing record.
    pub async fn register(&self, email: &str) -> UserRecord {
        let email = normalize_email(email);
        let id = email_to_id(&email, self.id_secret.as_deref());

        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.users.get(&id) {
            return existing.clone();
        }

        inner.last_ticket += 1;
        let record = UserRecord::new(id.clone(), email, Some(inner.last_ticket));
        inner.users.insert(id, record.clone());
        tracing::debug!(user_id = %record.id, ticket = inner.last_ticket, "registered attendee");
        record
    }

    /// Insert a record as-is
    pub async fn insert(&self, record: UserRecord) {
        self.inner
            .write()
            .await
            .users
            .insert(record.id.clone(), record);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryRegistrationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn ticket_number(&self, user_id: &str) -> Result<Option<u64>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(user_id).and_then(|u| u.ticket_number))
    }

    async fn confirm(&self, user_id: &str, name: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| anyhow!("No registration for user {}", user_id))?;

        if user.ticket_number.is_none() {
            return Err(anyhow!("User {} has no ticket", user_id));
        }

        user.name = Some(name.to_string());
        user.confirmed_at = Some(Utc::now());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(user_id).cloned())
    }
}
