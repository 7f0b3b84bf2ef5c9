//! GoTrue session types.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use serde::Deserialize;

use rewired_core::{Email, UserId};

use super::BackendError;

/// A signed-in user's session.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct AuthSession {
    /// The signed-in user.
    pub user_id: UserId,
    /// The address the user signed in with.
    pub email: Email,
    /// Bearer token sent with user-scoped requests.
    pub(crate) access_token: SecretString,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// =============================================================================
// Wire shapes (GoTrue /auth/v1 responses)
// =============================================================================

/// Successful response from `/auth/v1/token` and `/auth/v1/signup`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: AuthUserBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthUserBody {
    pub id: String,
    pub email: String,
}

/// Error body GoTrue returns on rejected credentials. Older deployments use
/// `msg`, newer ones `error_description`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthErrorBody {
    pub error_description: Option<String>,
    pub msg: Option<String>,
}

impl AuthErrorBody {
    pub fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .unwrap_or_else(|| "authentication rejected".to_owned())
    }
}

impl TokenResponse {
    /// Build a session, stamping the expiry from the token lifetime.
    pub fn into_session(self) -> Result<AuthSession, BackendError> {
        let email = Email::parse(&self.user.email)
            .map_err(|e| BackendError::Auth(format!("invalid email in session: {e}")))?;

        Ok(AuthSession {
            user_id: UserId::new(self.user.id),
            email,
            access_token: SecretString::from(self.access_token),
            expires_at: Utc::now() + Duration::seconds(self.expires_in),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_into_session() {
        let json = r#"{
            "access_token": "tok-abc123",
            "expires_in": 3600,
            "user": {"id": "u-1", "email": "shopper@rewired.shop"}
        }"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let session = response.into_session().unwrap();

        assert_eq!(session.user_id, UserId::new("u-1"));
        assert_eq!(session.email.as_str(), "shopper@rewired.shop");
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let json = r#"{
            "access_token": "tok-abc123",
            "expires_in": 3600,
            "user": {"id": "u-1", "email": "shopper@rewired.shop"}
        }"#;
        let session: AuthSession = serde_json::from_str::<TokenResponse>(json)
            .unwrap()
            .into_session()
            .unwrap();

        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tok-abc123"));
    }

    #[test]
    fn test_auth_error_body_prefers_error_description() {
        let body = AuthErrorBody {
            error_description: Some("Invalid login credentials".to_owned()),
            msg: Some("legacy".to_owned()),
        };
        assert_eq!(body.message(), "Invalid login credentials");

        let empty = AuthErrorBody {
            error_description: None,
            msg: None,
        };
        assert_eq!(empty.message(), "authentication rejected");
    }
}
