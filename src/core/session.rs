//! Session context for the connected user.
//!
//! The identity is read once when the application boots and handed to each
//! controller explicitly; nothing in this crate looks it up globally.

use serde::Deserialize;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::core::router::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// Stored user document as persisted by the login page
#[derive(Debug, Deserialize)]
struct StoredUser {
    #[serde(rename = "type")]
    user_type: Option<UserType>,
    email: Option<String>,
}

/// Read-only identity of the connected user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub email: String,
    pub user_type: UserType,
    pub jwt: Option<String>,
}

impl SessionContext {
    pub fn new(email: impl Into<String>, user_type: UserType) -> Self {
        Self {
            email: email.into(),
            user_type,
            jwt: None,
        }
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    /// Parse the stored user JSON.
    ///
    /// A missing type defaults to `Employee`; a missing email or malformed
    /// document is rejected.
    pub fn from_json(user_json: &str) -> Result<Self> {
        let stored: StoredUser = serde_json::from_str(user_json)
            .map_err(|e| AppError::Session(format!("Invalid stored user: {}", e)))?;

        let email = stored
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AppError::Session("Stored user has no email".to_string()))?;

        Ok(Self::new(
            email,
            stored.user_type.unwrap_or(UserType::Employee),
        ))
    }

    /// Page the user lands on once signed in
    pub fn home_route(&self) -> Route {
        match self.user_type {
            UserType::Employee => Route::Bills,
            UserType::Admin => Route::Dashboard,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let session = Self::from_json(&config.user_json)?;
        Ok(match &config.jwt {
            Some(jwt) => session.with_jwt(jwt.clone()),
            None => session,
        })
    }
}
