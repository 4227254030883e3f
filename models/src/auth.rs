use crate::error::model_error::ModelError;

use common::{ErrorLocation, RedactedSecret};

use std::panic::Location;

use serde::Serialize;

/// Login form input.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: RedactedSecret,
}

impl Credentials {
    #[track_caller]
    pub fn new(username: impl Into<String>, password: impl Into<RedactedSecret>) -> Result<Self, ModelError> {
        let username = username.into().trim().to_string();
        if username.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Username is required"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let password = password.into();
        if password.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Password is required"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &RedactedSecret {
        &self.password
    }
}

/// Registration form input.
#[derive(Debug, Clone)]
pub struct Registration {
    credentials: Credentials,
    email: String,
}

impl Registration {
    #[track_caller]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<RedactedSecret>,
    ) -> Result<Self, ModelError> {
        let credentials = Credentials::new(username, password)?;

        let email = email.into().trim().to_string();
        let valid_email = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
            None => false,
        };
        if !valid_email {
            return Err(ModelError::Validation {
                message: format!("Invalid email address: '{email}'"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { credentials, email })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// JSON body for `POST /register`.
    pub fn to_request_body(&self) -> RegistrationBody<'_> {
        RegistrationBody {
            username: self.credentials.username(),
            email: &self.email,
            password: self.credentials.password().expose(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegistrationBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Bearer token issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: RedactedSecret,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: impl Into<RedactedSecret>) -> Self {
        Self {
            access_token: token.into(),
            token_type: String::from("bearer"),
        }
    }
}
