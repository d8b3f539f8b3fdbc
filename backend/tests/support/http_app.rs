//! HTTP app and multipart helpers over the in-memory backend.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use recipes_backend::Trace;
use recipes_backend::domain::{UserId, UserProfile};
use recipes_backend::inbound::http::routes;
use recipes_backend::inbound::http::state::HttpState;
use recipes_backend::test_support::InMemoryBackend;

pub const BOUNDARY: &str = "integration-boundary";

/// Application mounting every route over `backend`.
pub fn app(
    backend: &InMemoryBackend,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(backend.http_ports())))
        .wrap(Trace)
        .configure(routes::configure)
}

/// Backend with one registered cook.
pub fn backend_with_cook() -> (InMemoryBackend, UserProfile) {
    let backend = InMemoryBackend::default();
    let cook = backend.add_user_named(UserId::random(), "cook");
    (backend, cook)
}

/// Text or file part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// Encode `parts` as a `multipart/form-data` body delimited by [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/jpeg\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
