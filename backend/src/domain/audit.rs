//! Audit columns shared by every stored row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Who performed a write and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditStamp {
    actor: Option<UserId>,
    at: DateTime<Utc>,
}

impl AuditStamp {
    /// Stamp for a write performed by `actor` at `at`.
    pub fn new(actor: Option<UserId>, at: DateTime<Utc>) -> Self {
        Self { actor, at }
    }

    /// Stamp for writes performed by the system itself, such as seeding.
    pub fn system(at: DateTime<Utc>) -> Self {
        Self { actor: None, at }
    }

    pub fn actor(&self) -> Option<UserId> {
        self.actor
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Creation and modification metadata attached to an entity.
///
/// Serialises flattened into the owning entity as `createdBy`, `updatedBy`,
/// `createdAt` and `updatedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditTrail {
    /// User whose session created the row; absent for seeded rows.
    #[schema(value_type = Option<String>, format = Uuid)]
    created_by: Option<UserId>,
    /// User whose session last modified the row.
    #[schema(value_type = Option<String>, format = Uuid)]
    updated_by: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AuditTrail {
    /// Trail for a freshly created row: both halves carry the same stamp.
    pub fn created(stamp: AuditStamp) -> Self {
        Self {
            created_by: stamp.actor,
            updated_by: stamp.actor,
            created_at: stamp.at,
            updated_at: stamp.at,
        }
    }

    /// Rebuild a trail from stored columns.
    pub fn from_parts(
        created_by: Option<UserId>,
        updated_by: Option<UserId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            created_by,
            updated_by,
            created_at,
            updated_at,
        }
    }

    /// Copy of this trail with the `updated_*` half replaced.
    #[must_use]
    pub fn touched(self, stamp: AuditStamp) -> Self {
        Self {
            updated_by: stamp.actor,
            updated_at: stamp.at,
            ..self
        }
    }

    /// Drop `user` from both actor columns, as `ON DELETE SET NULL` does.
    ///
    /// Returns whether anything changed.
    pub fn forget_actor(&mut self, user: UserId) -> bool {
        let mut changed = false;
        for actor in [&mut self.created_by, &mut self.updated_by] {
            if *actor == Some(user) {
                *actor = None;
                changed = true;
            }
        }
        changed
    }

    pub fn created_by(&self) -> Option<UserId> {
        self.created_by
    }

    pub fn updated_by(&self) -> Option<UserId> {
        self.updated_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
