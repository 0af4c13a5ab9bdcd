//! Route table for the versioned API.
//!
//! ```text
//! /api/v1/login, /logout, /me          authentication
//! /api/v1/users[/{id}[/password]]      user administration
//! /api/v1/{resource}[/{id}]            generic resources
//! ```

use actix_web::web;

use crate::inbound::http::{resources, users};

/// Register every `/api/v1` route on `cfg`.
///
/// The caller mounts this under the `/api/v1` scope and wraps it with the
/// session middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    users::configure(cfg);
    resources::configure(cfg);
}
