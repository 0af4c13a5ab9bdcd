//! The OpenAPI document: health probes, the `/api/v1` modules nested from
//! their own `Api` structs, the error envelope and the session cookie scheme.
//! Served by Swagger UI and printed by the `openapi-dump` binary.

use crate::inbound::http::resources::{
    companies, departments, deviation_values, educational_backgrounds, event_locations,
    faculties, interviewers, recruit_years, search_conditions, students, teachers, universities,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers `SessionCookie`, which every `/api/v1` route except login uses.
struct SessionCookieScheme;

impl Modify for SessionCookieScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// Everything the service exposes over HTTP.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SessionCookieScheme),
    info(
        title = "Recruit admin API",
        description = "Session-authenticated administration of recruiting, event and school data."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    nest(
        (path = "/api/v1", api = users::Api),
        (path = "/api/v1", api = departments::Api),
        (path = "/api/v1", api = event_locations::Api),
        (path = "/api/v1", api = search_conditions::Api),
        (path = "/api/v1", api = universities::Api),
        (path = "/api/v1", api = faculties::Api),
        (path = "/api/v1", api = deviation_values::Api),
        (path = "/api/v1", api = recruit_years::Api),
        (path = "/api/v1", api = companies::Api),
        (path = "/api/v1", api = students::Api),
        (path = "/api/v1", api = teachers::Api),
        (path = "/api/v1", api = interviewers::Api),
        (path = "/api/v1", api = educational_backgrounds::Api),
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "auth", description = "Login, logout and the current user"),
        (name = "users", description = "User accounts and passwords"),
        (name = "departments", description = "Organisational departments"),
        (name = "event-locations", description = "Venues for recruiting events"),
        (name = "search-conditions", description = "Saved search filters"),
        (name = "schools", description = "Universities, faculties and deviation values"),
        (name = "recruiting", description = "Recruit years, companies and interviewers"),
        (name = "people", description = "Students, teachers and educational backgrounds"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
