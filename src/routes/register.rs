use poem::Endpoint;
use poem_openapi::{payload::Json, ApiResponse, Object, OpenApi, OpenApiService};
use serde_json::Value;
use tracing::{error, info, warn};

use super::json_by_default;
use super::error::{ErrorMessage, ValidationErrorBody};
use crate::{
    dispatch::{Dispatch, DispatchError},
    domain::{register, FieldError, RegisteredUser, Registration, ValidationError},
};

pub struct Api {
    dispatch: Dispatch,
}

pub fn get_api_service(
    dispatch: Dispatch,
    server_url: &str,
) -> (OpenApiService<Api, ()>, impl Endpoint) {
    let api_service = OpenApiService::new(Api::new(dispatch), "register", "0.1").server(server_url);
    let ui = api_service.swagger_ui();
    (api_service, ui)
}

impl Api {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }
}

#[OpenApi]
impl Api {
    #[oai(path = "/register", method = "post", transform = "json_by_default")]
    #[tracing::instrument(
        skip(self, body),
        name = "new registration",
        fields(
            user = tracing::field::Empty,
            dispatch = ?self.dispatch
        )
    )]
    async fn register(&self, body: Json<Value>) -> RegisterResponse {
        let registration = match Registration::parse(&body.0) {
            Ok(registration) => registration,
            Err(e) => {
                warn!(error = %e, "rejected registration payload");
                return e.into();
            }
        };
        tracing::Span::current().record("user", registration.username.as_str());

        match self.dispatch.run(move || register(registration)).await {
            Ok(user) => {
                info!("registration accepted");
                RegisterResponse::Created(Json(user.into()))
            }
            Err(e) => e.into(),
        }
    }
}

#[derive(Debug, Object)]
pub struct CreatedUser {
    username: String,
    email: String,
}

impl From<RegisteredUser> for CreatedUser {
    fn from(user: RegisteredUser) -> Self {
        Self {
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(ApiResponse)]
#[oai(bad_request_handler = "invalid_payload")]
pub enum RegisterResponse {
    #[oai(status = 201)]
    Created(Json<CreatedUser>),

    #[oai(status = 422)]
    Unprocessable(Json<ValidationErrorBody>),

    #[oai(status = 500)]
    InternalServerError(Json<ErrorMessage>),
}

// payloads that never decode into JSON land here instead of the handler
fn invalid_payload(err: poem::Error) -> RegisterResponse {
    warn!(error = %err, "undecodable registration payload");
    ValidationError::from(FieldError::invalid_json(err)).into()
}

impl From<ValidationError> for RegisterResponse {
    fn from(value: ValidationError) -> Self {
        RegisterResponse::Unprocessable(Json(value.into()))
    }
}

impl From<DispatchError> for RegisterResponse {
    fn from(value: DispatchError) -> Self {
        error!(error = value.to_string(), "registration handler failed");
        RegisterResponse::InternalServerError(Json(ErrorMessage::new_error(value)))
    }
}
