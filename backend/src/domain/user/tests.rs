//! Tests for the domain user model.

use super::*;
use crate::domain::{AuditStamp, FieldCode};
use chrono::Utc;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn draft() -> UserDraft {
    UserDraft {
        email: "  Ada@Example.com ".to_owned(),
        name: " Ada Lovelace ".to_owned(),
        department_id: None,
    }
}

#[rstest]
#[case("", UserIdError::Empty)]
#[case("not-a-uuid", UserIdError::Invalid)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserIdError::Invalid)]
fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserIdError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_through_display() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
fn validate_normalises_email_and_name(draft: UserDraft) {
    let valid = User::validate(draft).expect("valid draft");
    assert_eq!(valid.email, "ada@example.com");
    assert_eq!(valid.name, "Ada Lovelace");
}

#[rstest]
#[case("", "Ada", "email", FieldCode::Empty)]
#[case("nope", "Ada", "email", FieldCode::InvalidEmail)]
#[case("ada@example.com", "  ", "name", FieldCode::Empty)]
fn validate_rejects_bad_fields(
    #[case] email: &str,
    #[case] name: &str,
    #[case] field: &str,
    #[case] code: FieldCode,
) {
    let err = User::validate(UserDraft {
        email: email.to_owned(),
        name: name.to_owned(),
        department_id: None,
    })
    .expect_err("invalid draft");
    assert_eq!((err.field(), err.code()), (field, code));
}

#[rstest]
fn serialisation_flattens_audit_and_omits_password(draft: UserDraft) {
    let id = UserId::new(VALID_ID).expect("valid id");
    let department = Uuid::new_v4();
    let user = User::assemble(
        *id.as_uuid(),
        UserDraft {
            department_id: Some(department),
            ..User::validate(draft).expect("valid draft")
        },
        AuditTrail::created(AuditStamp::system(Utc::now())),
    );

    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value["id"], json!(VALID_ID));
    assert_eq!(value["email"], json!("ada@example.com"));
    assert_eq!(value["departmentId"], json!(department.to_string()));
    assert!(value.get("createdAt").is_some());
    assert!(value.get("password").is_none());
    assert!(value.get("passwordHash").is_none());
}

#[rstest]
fn department_is_a_restricting_reference(draft: UserDraft) {
    let department = Uuid::new_v4();
    let user = User::assemble(
        Uuid::new_v4(),
        UserDraft {
            department_id: Some(department),
            ..draft
        },
        AuditTrail::created(AuditStamp::system(Utc::now())),
    );

    assert_eq!(
        user.references(),
        vec![Reference::restrict(ResourceKind::Department, department)]
    );
    assert_eq!(user.parent_id(), Some(department));
}
