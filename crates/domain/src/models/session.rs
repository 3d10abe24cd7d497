//! Admin session state.
//!
//! A session is either anonymous or tied to a username. Transitions are pure;
//! persisting the session is the token's job, not this type's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
    },
}

impl Session {
    pub fn login(self, username: impl Into<String>) -> Session {
        Session::Authenticated {
            username: username.into(),
        }
    }

    pub fn logout(self) -> Session {
        Session::Anonymous
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { username } => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn to_response(&self) -> SessionResponse {
        SessionResponse {
            authenticated: self.is_authenticated(),
            username: self.username().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
