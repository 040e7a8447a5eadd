mod registration;
pub use registration::{register, RegisteredUser, Registration};

mod validation;
pub use validation::{ErrorKind, FieldError, ValidationError};
