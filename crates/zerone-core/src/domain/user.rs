use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::error::DomainError;

/// User entity - a registered member and potential post author.
///
/// Deleting an account only flips `is_deleted`; the row and the email stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl User {
    /// Change the display name, bumping `updated_at`.
    pub fn rename(&mut self, first_name: String, last_name: String) -> Result<(), DomainError> {
        require_text("first_name", &first_name)?;
        require_text("last_name", &last_name)?;
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }
}

/// A user that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self, DomainError> {
        require_text("first_name", &first_name)?;
        require_text("last_name", &last_name)?;
        Ok(Self {
            email,
            password_hash,
            first_name,
            last_name,
            created_at: Utc::now(),
        })
    }
}
