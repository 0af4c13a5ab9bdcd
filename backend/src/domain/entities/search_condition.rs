//! Saved student search filters.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::resource::{Resource, ResourceKind};
use crate::domain::validation::{FieldCode, required_text};
use crate::domain::{AuditTrail, FieldError};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConditionDraft {
    pub name: String,
    pub conditions: Value,
}

/// A named, reusable set of search filters.
///
/// `conditions` is an opaque JSON object owned by the client; only its shape
/// is checked.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchCondition {
    id: Uuid,
    #[schema(example = "Science majors 2027")]
    name: String,
    #[schema(value_type = Object)]
    conditions: Value,
    #[serde(flatten)]
    audit: AuditTrail,
}

impl SearchCondition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conditions(&self) -> &Value {
        &self.conditions
    }
}

impl Resource for SearchCondition {
    type Draft = SearchConditionDraft;

    const KIND: ResourceKind = ResourceKind::SearchCondition;

    fn id(&self) -> Uuid {
        self.id
    }

    fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    fn assemble(id: Uuid, draft: SearchConditionDraft, audit: AuditTrail) -> Self {
        Self {
            id,
            name: draft.name,
            conditions: draft.conditions,
            audit,
        }
    }

    fn validate(draft: SearchConditionDraft) -> Result<SearchConditionDraft, FieldError> {
        let name = required_text("name", &draft.name)?;
        if !draft.conditions.is_object() {
            return Err(FieldError::new(
                "conditions",
                FieldCode::NotAnObject,
                "conditions must be a JSON object",
            ));
        }
        Ok(SearchConditionDraft {
            name,
            conditions: draft.conditions,
        })
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
