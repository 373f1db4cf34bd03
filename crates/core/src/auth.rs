use serde::{Deserialize, Serialize};

use crate::{AppResult, NonEmptyString};

/// User information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    email: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from authentication collaborator data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
        }
    }

    /// Returns the stable subject claim from the authentication provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Bearer token issued by the authentication collaborator and forwarded to
/// the menu service on fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(NonEmptyString);

impl AccessToken {
    /// Creates a validated bearer token.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
