//! Authentication and user administration handlers.
//!
//! ```text
//! POST   /api/v1/login {"email":"admin@example.com","password":"..."}
//! POST   /api/v1/logout
//! GET    /api/v1/me
//! GET    /api/v1/users
//! POST   /api/v1/users
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! PUT    /api/v1/users/{id}/password
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{
    Error, ErrorCode, LoginCredentials, LoginValidationError, Page, Password, User, UserDraft,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bodies::{CreateUserBody, DraftBody, PasswordChangeBody, UserBody};
use crate::inbound::http::resources::{parse_id, resource_endpoints};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"admin@example.com","password":"correct horse battery"}`
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": "empty" }))
}

/// Authenticate and establish a session.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.sign_in(&user_id)?;
    let user = state.users.query.get(*user_id.as_uuid()).await?;
    info!(user_id = %user_id, "user logged in");
    Ok(web::Json(user))
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// Return the logged-in user.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.users.query.get(*user_id.as_uuid()).await.map_err(|err| {
        // A session can outlive its user.
        if err.code() == ErrorCode::NotFound {
            session.sign_out();
            Error::unauthorized("login required")
        } else {
            err
        }
    })?;
    Ok(web::Json(user))
}

resource_endpoints!(
    @read_write users,
    resource: User,
    body: UserBody,
    state: users,
    collection: "/users",
    item: "/users/{id}",
    tag: "users",
    parent: department_id,
);

/// Create a user with an initial password.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tag = "users",
    operation_id = "create_users"
)]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let CreateUserBody { user, password } = payload.into_inner();
    let draft: UserDraft = user.into_draft()?;
    let password = Password::new("password", &password)?;
    let created = state.accounts.register(actor, draft, password).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Set a user's password.
///
/// Changing your own password requires `currentPassword`.
#[utoipa::path(
    put,
    path = "/users/{id}/password",
    params(("id" = String, Path, format = Uuid, description = "User identifier")),
    request_body = PasswordChangeBody,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Current password did not match", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tag = "users",
    operation_id = "change_password"
)]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<String>,
    payload: web::Json<PasswordChangeBody>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let target = UserId::from_uuid(parse_id(&id)?);
    let PasswordChangeBody {
        current_password,
        new_password,
    } = payload.into_inner();
    let new_password = Password::new("newPassword", &new_password)?;
    state
        .accounts
        .change_password(actor, target, current_password, new_password)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// OpenAPI paths for authentication and users.
#[derive(utoipa::OpenApi)]
#[openapi(paths(
    login,
    logout,
    current_user,
    list,
    create,
    get,
    update,
    delete,
    change_password
))]
pub struct Api;

/// Register authentication and user routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/logout", web::post().to(logout))
        .route("/me", web::get().to(current_user))
        .service(
            web::resource("/users")
                .route(web::get().to(list))
                .route(web::post().to(create)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(get))
                .route(web::put().to(update))
                .route(web::delete().to(delete)),
        )
        .route("/users/{id}/password", web::put().to(change_password));
}

#[cfg(test)]
mod tests;
