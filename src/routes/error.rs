use poem_openapi::Object;

use crate::domain::{FieldError, ValidationError};

#[derive(Debug, Object)]
pub struct ErrorMessage {
    message: String,
}

impl ErrorMessage {
    pub fn new_error<E: std::fmt::Display>(message: E) -> Self {
        ErrorMessage {
            message: format!("{}", message),
        }
    }
}

#[derive(Debug, Object)]
pub struct FieldErrorBody {
    loc: Vec<String>,
    msg: String,
    #[oai(rename = "type")]
    kind: String,
}

/// 422 payload: one entry per rejected location.
#[derive(Debug, Object)]
pub struct ValidationErrorBody {
    detail: Vec<FieldErrorBody>,
}

impl From<FieldError> for FieldErrorBody {
    fn from(err: FieldError) -> Self {
        Self {
            kind: err.kind.to_string(),
            loc: err.loc,
            msg: err.msg,
        }
    }
}

impl From<ValidationError> for ValidationErrorBody {
    fn from(err: ValidationError) -> Self {
        Self {
            detail: err.into_errors().into_iter().map(Into::into).collect(),
        }
    }
}
