//! Registration records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confirmed user as returned by the confirmation endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfUser {
    /// Deterministic id derived from the normalized email
    pub id: String,
    pub email: String,
}

/// Persisted registration record owned by the registration store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,

    /// Ticket number handed out at the initial registration step
    pub ticket_number: Option<u64>,

    /// Display name, set by the confirm step
    pub name: Option<String>,

    pub created_at: DateTime<Utc>,

    /// When the registration was confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Create an unconfirmed record
    pub fn new(id: impl Into<String>, email: impl Into<String>, ticket_number: Option<u64>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            ticket_number,
            name: None,
            created_at: Utc::now(),
            confirmed_at: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some()
    }
}
