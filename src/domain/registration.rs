use secrecy::Secret;
use serde_json::{Map, Value};

use super::validation::{FieldError, ValidationError};

const USERNAME: &str = "username";
const PASSWORD: &str = "password";
const EMAIL: &str = "email";

#[derive(Debug)]
pub struct Registration {
    pub username: String,
    pub password: Secret<String>,
    pub email: String,
}

/// What a caller gets back after registering: the request minus its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub username: String,
    pub email: String,
}

pub fn register(registration: Registration) -> RegisteredUser {
    let Registration {
        username, email, ..
    } = registration;
    RegisteredUser { username, email }
}

impl Registration {
    /// Checks the shape of a decoded JSON body, collecting every bad field
    /// before giving up. Values are taken as-is; unknown keys are ignored.
    pub fn parse(payload: &Value) -> Result<Self, ValidationError> {
        let Some(fields) = payload.as_object() else {
            return Err(FieldError::not_an_object().into());
        };

        let mut errors = Vec::new();
        let username = required_string(fields, USERNAME, &mut errors);
        let password = required_string(fields, PASSWORD, &mut errors);
        let email = required_string(fields, EMAIL, &mut errors);

        match (username, password, email) {
            (Some(username), Some(password), Some(email)) if errors.is_empty() => Ok(Self {
                username,
                password: Secret::new(password),
                email,
            }),
            _ => Err(ValidationError(errors)),
        }
    }
}

fn required_string(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(value)) => Some(value.clone()),
        Some(_) => {
            errors.push(FieldError::not_a_string(name));
            None
        }
        None => {
            errors.push(FieldError::missing(name));
            None
        }
    }
}
