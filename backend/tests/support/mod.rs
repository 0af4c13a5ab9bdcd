//! Shared helpers for HTTP integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use argon2::Params;
use mockable::DefaultClock;
use recruit_admin::domain::{Password, UserDraft, UserId};
use recruit_admin::inbound::http::health::HealthState;
use recruit_admin::inbound::http::session_config::SessionSettings;
use recruit_admin::inbound::http::state::HttpState;
use recruit_admin::outbound::memory::MemoryStore;
use recruit_admin::outbound::password::Argon2PasswordHasher;
use recruit_admin::server::{AppDependencies, build_app, memory_http_state};
use serde_json::{Value, json};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery";

/// Argon2id with the cheapest parameters the crate accepts.
pub fn fast_hasher() -> Arc<Argon2PasswordHasher> {
    let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
        .expect("minimum argon2 parameters are valid");
    Arc::new(Argon2PasswordHasher::with_params(params))
}

/// In-memory state holding one administrator.
pub async fn seeded_state() -> HttpState {
    let state = memory_http_state(MemoryStore::new(), fast_hasher(), Arc::new(DefaultClock));
    state
        .accounts
        .register(
            UserId::random(),
            UserDraft {
                email: ADMIN_EMAIL.to_owned(),
                name: "Administrator".to_owned(),
                department_id: None,
            },
            Password::new("password", ADMIN_PASSWORD).expect("valid password"),
        )
        .await
        .expect("register administrator");
    state
}

/// Initialise the full application over `state`.
pub async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let health_state = HealthState::new();
    health_state.mark_ready();
    actix_test::init_service(build_app(AppDependencies {
        health_state: web::Data::new(health_state),
        http_state: web::Data::new(state),
        session: SessionSettings::ephemeral(),
        swagger_ui: false,
    }))
    .await
}

/// Log in as the seeded administrator and return the session cookie.
pub async fn login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Cookie<'static> {
    login_as(app, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Log in with the given credentials and return the session cookie.
pub async fn login_as(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": email, "password": password}))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Send a JSON request with the session cookie and return status and body.
pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let response = actix_test::call_service(app, request.cookie(cookie.clone()).to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}
