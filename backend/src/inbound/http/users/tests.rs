//! Tests for authentication and user handlers.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockAccountCommand, MockLoginService};
use crate::inbound::http::test_utils::{memory_state, test_session_middleware};
use crate::outbound::memory::MemoryStore;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "correct horse battery";

async fn seeded_state() -> (HttpState, User) {
    let state = memory_state(&MemoryStore::new());
    let admin = state
        .accounts
        .register(
            UserId::random(),
            UserDraft {
                email: ADMIN_EMAIL.to_owned(),
                name: "Admin".to_owned(),
                department_id: None,
            },
            Password::new("password", ADMIN_PASSWORD).expect("valid password"),
        )
        .await
        .expect("register admin");
    (state, admin)
}

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(configure),
    )
}

async fn login_cookie(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    password: &str,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: ADMIN_EMAIL.to_owned(),
            password: password.to_owned(),
        })
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

#[actix_web::test]
async fn login_returns_the_user_and_a_session_cookie() {
    let (state, admin) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": "  Admin@Example.com ", "password": ADMIN_PASSWORD}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.response().cookies().any(|c| c.name() == "session"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], json!(admin.user_id().to_string()));
    assert_eq!(body["email"], json!(ADMIN_EMAIL));
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[actix_web::test]
async fn wrong_password_is_unauthorised() {
    let (state, _) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"email": ADMIN_EMAIL, "password": "not the password"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.response().cookies().all(|c| c.name() != "session"));
}

#[rstest]
#[case(json!({"email": " ", "password": "secret"}), "email")]
#[case(json!({"email": "admin@example.com", "password": ""}), "password")]
#[case(json!({"email": "admin@example.com"}), "password")]
#[actix_web::test]
async fn blank_login_fields_are_rejected(#[case] payload: Value, #[case] field: &str) {
    let mut login = MockLoginService::new();
    login.expect_authenticate().never();
    let mut state = memory_state(&MemoryStore::new());
    state.login = Arc::new(login);
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"], json!({"field": field, "code": "empty"}));
}

#[actix_web::test]
async fn me_requires_a_session() {
    let (state, _) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::get().uri("/api/v1/me").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn me_returns_the_logged_in_user() {
    let (state, admin) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_PASSWORD).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/me")
        .cookie(cookie)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["id"], json!(admin.user_id().to_string()));
    assert_eq!(body["name"], json!("Admin"));
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let (state, _) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_PASSWORD).await;

    let logout = actix_test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, logout).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = response
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let me = actix_test::TestRequest::get()
        .uri("/api/v1/me")
        .cookie(cleared)
        .to_request();
    let response = actix_test::call_service(&app, me).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_user_then_duplicate_email_conflicts() {
    let (state, admin) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_PASSWORD).await;
    let payload = json!({
        "email": "Hanako@Example.com",
        "name": "Hanako Yamada",
        "password": "another good one",
    });

    let create = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .cookie(cookie.clone())
        .set_json(&payload)
        .to_request();
    let response = actix_test::call_service(&app, create).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["email"], json!("hanako@example.com"));
    assert_eq!(body["createdBy"], json!(admin.user_id().to_string()));

    let duplicate = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .cookie(cookie)
        .set_json(&payload)
        .to_request();
    let response = actix_test::call_service(&app, duplicate).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn create_user_rejects_short_password_without_calling_the_service() {
    let (mut state, _) = seeded_state().await;
    let mut accounts = MockAccountCommand::new();
    accounts.expect_register().never();
    state.accounts = Arc::new(accounts);
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_PASSWORD).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .cookie(cookie)
        .set_json(json!({"email": "x@example.com", "name": "X", "password": "short"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], json!("password"));
}

#[actix_web::test]
async fn own_password_change_checks_the_current_password() {
    let (state, admin) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_PASSWORD).await;
    let uri = format!("/api/v1/users/{}/password", admin.user_id());

    let wrong = actix_test::TestRequest::put()
        .uri(&uri)
        .cookie(cookie.clone())
        .set_json(json!({"currentPassword": "nope nope", "newPassword": "brand new secret"}))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, wrong).await.status(),
        StatusCode::FORBIDDEN
    );

    let right = actix_test::TestRequest::put()
        .uri(&uri)
        .cookie(cookie)
        .set_json(json!({"currentPassword": ADMIN_PASSWORD, "newPassword": "brand new secret"}))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, right).await.status(),
        StatusCode::NO_CONTENT
    );

    login_cookie(&app, "brand new secret").await;
}

#[actix_web::test]
async fn password_change_rejects_malformed_ids() {
    let (state, _) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_PASSWORD).await;

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/users/42/password")
        .cookie(cookie)
        .set_json(json!({"newPassword": "brand new secret"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body["details"],
        json!({"field": "id", "value": "42", "code": "invalid_uuid"})
    );
}

#[actix_web::test]
async fn users_listing_pages_results() {
    let (state, _) = seeded_state().await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, ADMIN_PASSWORD).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users?page=1&perPage=10&keyword=ADMIN")
        .cookie(cookie)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["total"], json!(1));
    assert_eq!(body["perPage"], json!(10));
    assert_eq!(body["items"][0]["email"], json!(ADMIN_EMAIL));
}
