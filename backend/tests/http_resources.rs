//! End-to-end tests for the resource endpoints over in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use rstest::rstest;
use serde_json::{Value, json};

use support::{init_app, login, login_as, seeded_state, send};

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("id field").to_owned()
}

#[actix_web::test]
async fn department_lifecycle() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, created) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/departments")
            .set_json(json!({"name": "Human Resources"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Human Resources");
    assert!(created["createdBy"].is_string());
    let id = id_of(&created);
    let item = format!("/api/v1/departments/{id}");

    let (status, fetched) = send(&app, &cookie, TestRequest::get().uri(&item)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        &cookie,
        TestRequest::put()
            .uri(&item)
            .set_json(json!({"name": "People Ops"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "People Ops");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, page) = send(
        &app,
        &cookie,
        TestRequest::get().uri("/api/v1/departments?keyword=people"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], id);

    let (status, _) = send(&app, &cookie, TestRequest::delete().uri(&item)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, &cookie, TestRequest::get().uri(&item)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn blank_name_is_rejected_with_field_details() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, body) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/departments")
            .set_json(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "name");
    assert_eq!(body["details"]["code"], "empty");
}

#[actix_web::test]
async fn duplicate_names_conflict() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;
    let create = || {
        TestRequest::post()
            .uri("/api/v1/companies")
            .set_json(json!({"name": "Acme", "industry": "Manufacturing"}))
    };

    let (status, _) = send(&app, &cookie, create()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, &cookie, create()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[case::get(TestRequest::get())]
#[case::update(TestRequest::put().set_json(json!({"name": "Nowhere"})))]
#[case::delete(TestRequest::delete())]
#[actix_web::test]
async fn unknown_ids_are_not_found(#[case] request: TestRequest) {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, body) = send(
        &app,
        &cookie,
        request.uri("/api/v1/universities/00000000-0000-0000-0000-000000000001"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case("/api/v1/departments")]
#[case("/api/v1/students?recruitYearId=00000000-0000-0000-0000-000000000001")]
#[case("/api/v1/search-conditions")]
#[actix_web::test]
async fn listings_require_a_session(#[case] uri: &str) {
    let app = init_app(seeded_state().await).await;
    let response = actix_test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn faculty_requires_an_existing_university() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, body) = send(
        &app,
        &cookie,
        TestRequest::post().uri("/api/v1/faculties").set_json(json!({
            "universityId": "00000000-0000-0000-0000-000000000001",
            "name": "Law"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn universities_with_faculties_cannot_be_deleted() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (_, university) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/universities")
            .set_json(json!({"name": "Tohoku University"})),
    )
    .await;
    let university_id = id_of(&university);
    let (status, faculty) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/faculties")
            .set_json(json!({"universityId": university_id, "name": "Engineering"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(faculty["universityId"], university_id);

    let (status, page) = send(
        &app,
        &cookie,
        TestRequest::get().uri(&format!("/api/v1/faculties?universityId={university_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);

    let (status, body) = send(
        &app,
        &cookie,
        TestRequest::delete().uri(&format!("/api/v1/universities/{university_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn deviation_values_require_a_score() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (_, university) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/universities")
            .set_json(json!({"name": "Kyushu University"})),
    )
    .await;
    let (_, faculty) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/faculties")
            .set_json(json!({"universityId": id_of(&university), "name": "Economics"})),
    )
    .await;
    let faculty_id = id_of(&faculty);

    let (status, body) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/deviation-values")
            .set_json(json!({"facultyId": faculty_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "value");
    assert_eq!(body["details"]["code"], "empty");

    let (status, created) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/deviation-values")
            .set_json(json!({"facultyId": faculty_id, "value": 0.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["value"], 0.0);
}

#[rstest]
#[case::beyond_integer_column(json!({"name": "Hall", "capacity": 3_000_000_000_u64}), StatusCode::BAD_REQUEST)]
#[case::largest_integer(json!({"name": "Hall", "capacity": 2_147_483_647}), StatusCode::CREATED)]
#[actix_web::test]
async fn event_location_capacity_is_bounded(#[case] body: Value, #[case] expected: StatusCode) {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, response) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/event-locations")
            .set_json(body),
    )
    .await;
    assert_eq!(status, expected);
    if expected == StatusCode::BAD_REQUEST {
        assert_eq!(response["details"]["field"], "capacity");
        assert_eq!(response["details"]["code"], "out_of_range");
    }
}

#[actix_web::test]
async fn deleting_a_user_clears_their_authorship() {
    let app = init_app(seeded_state().await).await;
    let admin = login(&app).await;

    let (status, author) = send(
        &app,
        &admin,
        TestRequest::post().uri("/api/v1/users").set_json(json!({
            "email": "hanako@example.com",
            "name": "Hanako",
            "password": "another long secret",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let author_id = id_of(&author);

    let hanako = login_as(&app, "hanako@example.com", "another long secret").await;
    let (status, department) = send(
        &app,
        &hanako,
        TestRequest::post()
            .uri("/api/v1/departments")
            .set_json(json!({"name": "Legal"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(department["createdBy"], author_id.as_str());

    let (status, _) = send(
        &app,
        &admin,
        TestRequest::delete().uri(&format!("/api/v1/users/{author_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, fetched) = send(
        &app,
        &admin,
        TestRequest::get().uri(&format!("/api/v1/departments/{}", id_of(&department))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["createdBy"], Value::Null);
    assert_eq!(fetched["updatedBy"], Value::Null);
}

#[actix_web::test]
async fn deleting_a_student_removes_their_educational_backgrounds() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, year) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/recruit-years")
            .set_json(json!({"year": 2027, "name": "Class of 2027", "isActive": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, student) = send(
        &app,
        &cookie,
        TestRequest::post().uri("/api/v1/students").set_json(json!({
            "name": "Hanako Yamada",
            "recruitYearId": id_of(&year)
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = id_of(&student);

    let (status, _) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/educational-backgrounds")
            .set_json(json!({
                "studentId": student_id,
                "schoolName": "Sendai High School",
                "graduationYear": 2023
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let backgrounds = format!("/api/v1/educational-backgrounds?studentId={student_id}");
    let (_, page) = send(&app, &cookie, TestRequest::get().uri(&backgrounds)).await;
    assert_eq!(page["total"], 1);

    let (status, _) = send(
        &app,
        &cookie,
        TestRequest::delete().uri(&format!("/api/v1/students/{student_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, page) = send(&app, &cookie, TestRequest::get().uri(&backgrounds)).await;
    assert_eq!(page["total"], 0);
}

#[actix_web::test]
async fn malformed_json_is_reported() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, body) = send(
        &app,
        &cookie,
        TestRequest::post()
            .uri("/api/v1/departments")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_json");
}

#[actix_web::test]
async fn malformed_query_is_reported() {
    let app = init_app(seeded_state().await).await;
    let cookie = login(&app).await;

    let (status, body) = send(
        &app,
        &cookie,
        TestRequest::get().uri("/api/v1/departments?perPage=abc"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_query");
}

#[actix_web::test]
async fn responses_carry_a_trace_id() {
    let app = init_app(seeded_state().await).await;
    let response = actix_test::call_service(
        &app,
        TestRequest::get().uri("/api/v1/me").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let header = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["traceId"], header);
}

#[actix_web::test]
async fn unknown_routes_return_json_not_found() {
    let app = init_app(seeded_state().await).await;
    let response =
        actix_test::call_service(&app, TestRequest::get().uri("/nowhere").to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn health_probes_succeed(#[case] uri: &str) {
    let app = init_app(seeded_state().await).await;
    let response = actix_test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
}
