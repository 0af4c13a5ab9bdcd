//! Signed-in user tracking on top of the cookie session.
//!
//! Handlers never touch `actix_session::Session` directly; they ask
//! [`SessionContext`] who is acting and let it answer 401 when nobody is.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{Error, UserId};

/// Session key holding the acting user's id.
pub(crate) const ACTOR_KEY: &str = "actor";

#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Record `user_id` as the acting user, renewing the session first so a
    /// cookie issued before login never becomes authenticated.
    pub fn sign_in(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(ACTOR_KEY, *user_id.as_uuid())
            .map_err(|error| Error::internal(format!("session write failed: {error}")))?;
        debug!(user_id = %user_id, "session established");
        Ok(())
    }

    /// Forget the acting user and expire the cookie.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// Acting user, if any. An unreadable value counts as signed out.
    pub fn actor(&self) -> Option<UserId> {
        match self.0.get::<Uuid>(ACTOR_KEY) {
            Ok(id) => id.map(UserId::from_uuid),
            Err(error) => {
                warn!(%error, "discarding unreadable session actor");
                None
            }
        }
    }

    /// Acting user or `401 unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.actor()
            .ok_or_else(|| Error::unauthorized("sign in to continue"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self::new) })
    }
}
