//! Sign-in boundary
//!
//! The session only sees the [`Authenticator`] trait. The bundled
//! [`MockAuthenticator`] accepts any well-formed input and never talks to a
//! server.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::User;

/// What the user typed into the login or signup form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Login {
        email: String,
        password: String,
    },
    Signup {
        name: String,
        email: String,
        password: String,
    },
}

impl Credentials {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn signup(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Signup {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Login { email, .. } | Self::Signup { email, .. } => email,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Invalid email or password.")]
    Rejected,
}

/// Turns credentials into a signed-in user
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError>;
}

/// Client-side stand-in for a real identity provider
#[derive(Debug, Clone, Default)]
pub struct MockAuthenticator;

impl MockAuthenticator {
    const LOGIN_NAME: &'static str = "Wanderer";
    const LOGIN_MOBILE: &'static str = "123-456-7890";
    const SIGNUP_MOBILE: &'static str = "987-654-3210";
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, AuthError> {
        debug!(email = %credentials.email(), "MockAuthenticator::authenticate: called");
        let user = match credentials {
            Credentials::Login { email, password } => {
                if email.trim().is_empty() || password.is_empty() {
                    return Err(AuthError::MissingFields);
                }
                User {
                    name: Self::LOGIN_NAME.to_string(),
                    email: email.trim().to_string(),
                    mobile: Self::LOGIN_MOBILE.to_string(),
                }
            }
            Credentials::Signup { name, email, password } => {
                if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
                    return Err(AuthError::MissingFields);
                }
                User {
                    name: name.trim().to_string(),
                    email: email.trim().to_string(),
                    mobile: Self::SIGNUP_MOBILE.to_string(),
                }
            }
        };

        info!(email = %user.email, "User signed in");
        Ok(user)
    }
}
