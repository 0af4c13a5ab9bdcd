//! Venues that host recruiting events.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::{in_range, optional_text, required_text};
use crate::domain::{AuditTrail, FieldError};

/// Largest capacity a PostgreSQL `integer` column holds.
pub const CAPACITY_MAX: u32 = 2_147_483_647;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLocationDraft {
    pub name: String,
    pub address: Option<String>,
    pub capacity: Option<u32>,
}

/// An event venue, unique by case-insensitive name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventLocation {
    id: Uuid,
    #[schema(example = "Tokyo Head Office")]
    name: String,
    address: Option<String>,
    capacity: Option<u32>,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl EventLocation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }
}

impl Resource for EventLocation {
    type Draft = EventLocationDraft;

    const KIND: ResourceKind = ResourceKind::EventLocation;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: EventLocationDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            capacity: draft.capacity,
            audit,
        }
    }

    fn validate(draft: EventLocationDraft) -> Result<EventLocationDraft, FieldError> {
        Ok(EventLocationDraft {
            name: required_text("name", &draft.name)?,
            address: optional_text("address", draft.address.as_deref())?,
            capacity: draft
                .capacity
                .map(|capacity| in_range("capacity", capacity, 0, CAPACITY_MAX))
                .transpose()?,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.to_lowercase())
    }
}
