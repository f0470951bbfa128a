use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::errors::LeaseUpError;

/// Administrator account (`user` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAdminUser {
    pub id: Option<i64>,
    pub username: String,
    pub password_hash: String,
}

impl NewAdminUser {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn validate(&self) -> Result<(), LeaseUpError> {
        require_text("username", &self.username)?;
        require_text("password_hash", &self.password_hash)
    }
}

/// Tenant self-service account (`tenant_user` table)
///
/// Distinct from [`crate::model::Tenant`], which is the tenancy record a
/// lease binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTenantUser {
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    /// Defaults to the insert time when `None`
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTenantUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phone: None,
            created_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), LeaseUpError> {
        require_text("username", &self.username)?;
        require_text("email", &self.email)?;
        require_text("password_hash", &self.password_hash)
    }
}
