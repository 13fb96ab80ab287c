//! Wire types for the user-management backend.
//!
//! Field names follow the backend's snake_case JSON. Request types are split
//! per endpoint so the "password only when supplied" rule lives in the types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned user identifier.
///
/// The backend issues UUID strings, but integer ids are accepted as well and
/// normalized to their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => UserId(s),
            RawId::Number(n) => UserId(n.to_string()),
        })
    }
}

/// A user account as returned by the list/create/update endpoints.
///
/// There is deliberately no password field: whatever the backend sends under
/// `password` is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_user: Option<String>,
}

/// Login form input, trimmed and checked for presence.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Trims both fields; returns `None` when either is empty afterwards.
    pub fn from_input(username: &str, password: &str) -> Option<Self> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body for `POST /admin/users`. A password is always sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_user: Option<String>,
}

/// Body for `PUT /admin/users/{id}`. `password: None` keeps the current one
/// and is omitted from the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_user: Option<String>,
}

/// Response of `POST /admin/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Profile fields returned by the end-user login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Response of `POST /login`, in either of the shapes the backend has used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserLoginResponse {
    Session { token: String, user_info: UserInfo },
    Legacy(UserInfo),
}

impl UserLoginResponse {
    pub fn username(&self) -> &str {
        match self {
            UserLoginResponse::Session { user_info, .. } | UserLoginResponse::Legacy(user_info) => {
                &user_info.username
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            UserLoginResponse::Session { token, .. } => Some(token),
            UserLoginResponse::Legacy(_) => None,
        }
    }
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
