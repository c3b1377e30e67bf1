/// User domain type
use super::ids::UserId;
use crate::error::{Result, SpendwiseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Login email, stored lowercased
    pub email: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for registering a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Trimmed display name
    pub name: String,
    /// Normalized (lowercased) login email
    pub email: String,
    /// bcrypt hash, never the plain password
    pub password_hash: String,
}

impl NewUser {
    /// Validate registration input around an already hashed password
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password_hash: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SpendwiseError::MissingField("name"));
        }

        Ok(Self {
            name,
            email: normalize_email(email)?,
            password_hash: password_hash.into(),
        })
    }
}

/// Lowercase and trim an email, rejecting values without an `@`
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(SpendwiseError::MissingField("email"));
    }
    if !email.contains('@') {
        return Err(SpendwiseError::invalid_input("email is not valid"));
    }
    Ok(email)
}
