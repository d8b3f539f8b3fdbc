//! Test helpers for inbound HTTP components.

use actix_web::{App, web};

use crate::Trace;
use crate::domain::{UserId, UserProfile};
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::test_support::InMemoryBackend;

pub(crate) const OWNER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

pub(crate) fn owner_id() -> UserId {
    UserId::new(OWNER_ID).expect("fixture user id")
}

/// Backend seeded with one user, `chef`, owning [`OWNER_ID`].
pub(crate) fn seeded_backend() -> (InMemoryBackend, UserProfile) {
    let backend = InMemoryBackend::default();
    let owner = backend.add_user_named(owner_id(), "chef");
    (backend, owner)
}

/// Application with every route wired over `backend`.
pub(crate) fn test_app(
    backend: &InMemoryBackend,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let state = HttpState::new(backend.http_ports());
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(routes::configure)
}
