//! Donor registry records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered donor
///
/// The password hash is persisted by the store but never sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub blood_group: String,
    pub contact: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Donor {
    /// Copy without the password hash, for responses
    pub fn public(&self) -> Self {
        Self {
            password_hash: String::new(),
            ..self.clone()
        }
    }
}

/// Registration form
///
/// A donor registered without a password is listed but can never log in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub contact: String,
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
