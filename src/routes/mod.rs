pub mod error;
pub mod health;
pub mod register;

use poem::http::{header::CONTENT_TYPE, HeaderValue};
use poem::middleware::Tracing;
use poem::{get, Request, Route};
use poem::{Endpoint, EndpointExt};

use self::health::health_check;
use crate::configuration::Configuration;

/// Builds a fresh router; nothing is shared between the routes it returns.
pub fn default_route(conf: &Configuration) -> Route {
    let (register_service, ui) = register::get_api_service(conf.app.dispatch, &conf.base_url());
    Route::new()
        .at("/api/v1/health_check", get(health_check))
        .nest("/", register_service)
        .nest("/docs", ui)
}

fn add_tracing(ep: impl Endpoint) -> impl Endpoint {
    ep.with(Tracing)
}

// bodies sent without any Content-Type are decoded as JSON
fn json_by_default(ep: impl Endpoint) -> impl Endpoint {
    add_tracing(ep.before(|mut req: Request| async move {
        if !req.headers().contains_key(CONTENT_TYPE) {
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok::<_, poem::Error>(req)
    }))
}
