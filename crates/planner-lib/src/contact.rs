//! Contact-message intake
//!
//! Validates submitted messages and keeps them in an in-memory inbox.
//! Forwarding to a human-read inbox happens in the HTTP service.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Longest accepted message body, in characters
pub const MAX_MESSAGE_CHARS: usize = 5_000;

/// Longest accepted name/subject, in characters
pub const MAX_FIELD_CHARS: usize = 200;

/// Messages kept in memory before the oldest are dropped
pub const DEFAULT_MAX_RECORDS: usize = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("{field} is too long ({len} characters, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// Submitted contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Trim whitespace and check every field
    pub fn validate(self) -> Result<Self, ContactError> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        check_field("name", &form.name, MAX_FIELD_CHARS)?;
        check_field("subject", &form.subject, MAX_FIELD_CHARS)?;
        check_field("message", &form.message, MAX_MESSAGE_CHARS)?;
        check_field("email", &form.email, MAX_FIELD_CHARS)?;

        if !is_plausible_email(&form.email) {
            return Err(ContactError::InvalidEmail(form.email));
        }

        Ok(form)
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> Result<(), ContactError> {
    let len = value.chars().count();
    if len == 0 {
        return Err(ContactError::EmptyField(field));
    }
    if len > max {
        return Err(ContactError::TooLong { field, len, max });
    }
    Ok(())
}

/// One `@`, a non-empty local part, and a dotted domain with no empty labels
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// A stored contact message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// RFC 3339, UTC
    pub created_at: String,
    pub forwarded: bool,
}

/// In-memory inbox of the most recent messages
#[derive(Debug, Clone)]
pub struct ContactInbox {
    records: Arc<RwLock<VecDeque<ContactRecord>>>,
    max_records: usize,
}

impl Default for ContactInbox {
    fn default() -> Self {
        Self::bounded(DEFAULT_MAX_RECORDS)
    }
}

impl ContactInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_records` messages (at least one)
    pub fn bounded(max_records: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            max_records: max_records.max(1),
        }
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Validate and store a message
    pub async fn submit(&self, form: ContactForm) -> Result<ContactRecord, ContactError> {
        let form = form.validate()?;

        let record = ContactRecord {
            id: Uuid::new_v4().to_string(),
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            created_at: chrono::Utc::now().to_rfc3339(),
            forwarded: false,
        };

        let mut records = self.records.write().await;
        while records.len() >= self.max_records {
            records.pop_front();
        }
        records.push_back(record.clone());
        Ok(record)
    }

    /// Record the forwarding outcome for a stored message
    pub async fn mark_forwarded(&self, id: &str, forwarded: bool) -> bool {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.forwarded = forwarded;
                true
            }
            None => false,
        }
    }

    pub async fn get(&self, id: &str) -> Option<ContactRecord> {
        self.records.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
