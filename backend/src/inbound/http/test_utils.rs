//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use argon2::Params;
use mockable::DefaultClock;

use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::outbound::password::Argon2PasswordHasher;
use crate::server::memory_http_state;

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionSettings::ephemeral().middleware()
}

/// Argon2id with the cheapest parameters the crate accepts.
pub fn fast_hasher() -> Arc<Argon2PasswordHasher> {
    let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
        .expect("minimum argon2 parameters are valid");
    Arc::new(Argon2PasswordHasher::with_params(params))
}

/// In-memory state over `store`.
pub fn memory_state(store: &MemoryStore) -> HttpState {
    memory_http_state(store.clone(), fast_hasher(), Arc::new(DefaultClock))
}
