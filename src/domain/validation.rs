use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Missing,
    StringType,
    DictType,
    JsonInvalid,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Missing => "missing",
            ErrorKind::StringType => "string_type",
            ErrorKind::DictType => "dict_type",
            ErrorKind::JsonInvalid => "json_invalid",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected location in an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    pub kind: ErrorKind,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self {
            loc: body_loc(Some(field)),
            msg: "Field required".to_owned(),
            kind: ErrorKind::Missing,
        }
    }

    pub fn not_a_string(field: &str) -> Self {
        Self {
            loc: body_loc(Some(field)),
            msg: "Input should be a valid string".to_owned(),
            kind: ErrorKind::StringType,
        }
    }

    pub fn not_an_object() -> Self {
        Self {
            loc: body_loc(None),
            msg: "Input should be a valid dictionary".to_owned(),
            kind: ErrorKind::DictType,
        }
    }

    pub fn invalid_json<E: fmt::Display>(reason: E) -> Self {
        Self {
            loc: body_loc(None),
            msg: reason.to_string(),
            kind: ErrorKind::JsonInvalid,
        }
    }
}

fn body_loc(field: Option<&str>) -> Vec<String> {
    std::iter::once("body")
        .chain(field)
        .map(str::to_owned)
        .collect()
}

#[derive(Debug, thiserror::Error)]
#[error("{} invalid field(s) in request body", .0.len())]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for ValidationError {
    fn from(err: FieldError) -> Self {
        ValidationError(vec![err])
    }
}
