//! Behaviour of the in-memory adapters.

use chrono::Utc;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::entities::{
    Department, DepartmentDraft, EducationalBackground, EducationalBackgroundDraft, Faculty,
    FacultyDraft, Student, StudentDraft, University, UniversityDraft,
};
use crate::domain::ports::{
    CredentialRepository, MasterDataSeedRepository, MasterDataSeedRequest, ResourceRepository,
    ResourceRepositoryError, SeedRow, SeedingResult,
};
use crate::domain::{AuditStamp, ListQuery, PasswordHash, Resource, User, UserDraft, UserId};

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new()
}

fn stamp() -> AuditStamp {
    AuditStamp::new(Some(UserId::random()), Utc::now())
}

fn department(name: &str) -> DepartmentDraft {
    DepartmentDraft {
        name: name.to_owned(),
    }
}

fn student(name: &str) -> StudentDraft {
    StudentDraft {
        name: name.to_owned(),
        name_kana: None,
        email: None,
        phone: None,
        university_id: None,
        faculty_id: None,
        recruit_year_id: None,
    }
}

#[rstest]
#[tokio::test]
async fn list_sorts_filters_and_pages(store: MemoryStore) {
    let repo = InMemoryResourceRepository::<Department>::new(store);
    for name in ["sales", "Accounting", "Legal", "Marketing"] {
        repo.insert(Uuid::new_v4(), &department(name), &stamp())
            .await
            .expect("insert succeeds");
    }

    let first = repo
        .list(&ListQuery::new(Some(1), Some(2), None, None).expect("valid"))
        .await
        .expect("list succeeds");
    let names: Vec<_> = first.items.iter().map(Department::name).collect();
    assert_eq!(names, vec!["Accounting", "Legal"]);
    assert_eq!(first.total, 4);

    let filtered = repo
        .list(&ListQuery::new(None, None, Some("ING".to_owned()), None).expect("valid"))
        .await
        .expect("list succeeds");
    let names: Vec<_> = filtered.items.iter().map(Department::name).collect();
    assert_eq!(names, vec!["Accounting", "Marketing"]);
}

#[rstest]
#[tokio::test]
async fn duplicate_names_conflict_case_insensitively(store: MemoryStore) {
    let repo = InMemoryResourceRepository::<Department>::new(store);
    repo.insert(Uuid::new_v4(), &department("Sales"), &stamp())
        .await
        .expect("first insert");

    let err = repo
        .insert(Uuid::new_v4(), &department("SALES"), &stamp())
        .await
        .expect_err("duplicate rejected");
    assert!(matches!(err, ResourceRepositoryError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn update_keeps_creation_audit_and_allows_same_name(store: MemoryStore) {
    let repo = InMemoryResourceRepository::<Department>::new(store);
    let id = Uuid::new_v4();
    let created = repo
        .insert(id, &department("Sales"), &stamp())
        .await
        .expect("insert");

    let editor = stamp();
    let updated = repo
        .update(id, &department("Sales"), &editor)
        .await
        .expect("update")
        .expect("row exists");

    assert_eq!(updated.audit().created_by(), created.audit().created_by());
    assert_eq!(updated.audit().updated_by(), editor.actor());

    let missing = repo
        .update(Uuid::new_v4(), &department("Other"), &editor)
        .await
        .expect("update of missing row is not an error");
    assert!(missing.is_none());
}

#[rstest]
#[tokio::test]
async fn references_must_exist_and_block_deletes(store: MemoryStore) {
    let universities = InMemoryResourceRepository::<University>::new(store.clone());
    let faculties = InMemoryResourceRepository::<Faculty>::new(store);

    let orphan = faculties
        .insert(
            Uuid::new_v4(),
            &FacultyDraft {
                university_id: Uuid::new_v4(),
                name: "Law".to_owned(),
            },
            &stamp(),
        )
        .await
        .expect_err("missing university");
    assert!(matches!(orphan, ResourceRepositoryError::MissingReference { .. }));

    let university_id = Uuid::new_v4();
    universities
        .insert(
            university_id,
            &UniversityDraft {
                name: "Kyoto".to_owned(),
            },
            &stamp(),
        )
        .await
        .expect("university");
    let faculty_id = Uuid::new_v4();
    faculties
        .insert(
            faculty_id,
            &FacultyDraft {
                university_id,
                name: "Law".to_owned(),
            },
            &stamp(),
        )
        .await
        .expect("faculty");

    let blocked = universities
        .delete(university_id)
        .await
        .expect_err("still referenced");
    assert!(matches!(blocked, ResourceRepositoryError::InUse { .. }));

    assert!(faculties.delete(faculty_id).await.expect("delete faculty"));
    assert!(universities.delete(university_id).await.expect("delete university"));
    assert!(!universities.delete(university_id).await.expect("second delete"));
}

#[rstest]
#[tokio::test]
async fn deleting_student_cascades_backgrounds(store: MemoryStore) {
    let students = InMemoryResourceRepository::<Student>::new(store.clone());
    let backgrounds = InMemoryResourceRepository::<EducationalBackground>::new(store);
    let student_id = Uuid::new_v4();
    students
        .insert(student_id, &student("Hanako"), &stamp())
        .await
        .expect("student");
    let background_id = Uuid::new_v4();
    backgrounds
        .insert(
            background_id,
            &EducationalBackgroundDraft {
                student_id,
                school_name: "North High".to_owned(),
                department_name: None,
                admission_year: None,
                graduation_year: None,
            },
            &stamp(),
        )
        .await
        .expect("background");

    assert!(students.delete(student_id).await.expect("delete student"));
    assert!(
        backgrounds
            .find_by_id(background_id)
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn credentials_follow_user_rows(store: MemoryStore) {
    let credentials = InMemoryCredentialRepository::new(store);
    let id = Uuid::new_v4();
    let draft = UserDraft {
        email: "admin@example.com".to_owned(),
        name: "Admin".to_owned(),
        department_id: None,
    };
    credentials
        .create_with_password(id, &draft, &PasswordHash::new("first"), &stamp())
        .await
        .expect("create user");

    let found = credentials
        .find_by_email("ADMIN@example.com")
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(found.password_hash, Some(PasswordHash::new("first")));

    let user_id = UserId::from_uuid(id);
    assert!(
        credentials
            .update_password(user_id, &PasswordHash::new("second"), &stamp())
            .await
            .expect("update")
    );
    let reloaded = credentials
        .find_by_id(user_id)
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(reloaded.password_hash, Some(PasswordHash::new("second")));
}

#[rstest]
#[tokio::test]
async fn deleting_a_user_clears_their_audit_columns(store: MemoryStore) {
    let credentials = InMemoryCredentialRepository::new(store.clone());
    let users = InMemoryResourceRepository::<User>::new(store.clone());
    let departments = InMemoryResourceRepository::<Department>::new(store);
    let author = Uuid::new_v4();
    credentials
        .create_with_password(
            author,
            &UserDraft {
                email: "author@example.com".to_owned(),
                name: "Author".to_owned(),
                department_id: None,
            },
            &PasswordHash::new("hash"),
            &stamp(),
        )
        .await
        .expect("create author");
    let author_stamp = AuditStamp::new(Some(UserId::from_uuid(author)), Utc::now());
    let editor_stamp = stamp();

    let written = departments
        .insert(Uuid::new_v4(), &department("Legal"), &author_stamp)
        .await
        .expect("insert by author");
    let edited = departments
        .insert(Uuid::new_v4(), &department("Sales"), &author_stamp)
        .await
        .expect("insert by author");
    departments
        .update(edited.id(), &department("Sales"), &editor_stamp)
        .await
        .expect("update by editor");

    assert!(users.delete(author).await.expect("delete author"));

    let written = departments
        .find_by_id(written.id())
        .await
        .expect("lookup")
        .expect("department survives");
    assert_eq!(written.audit().created_by(), None);
    assert_eq!(written.audit().updated_by(), None);

    let edited = departments
        .find_by_id(edited.id())
        .await
        .expect("lookup")
        .expect("department survives");
    assert_eq!(edited.audit().created_by(), None);
    assert_eq!(edited.audit().updated_by(), editor_stamp.actor());
}

fn seed_request(key: &str, departments: &[&str]) -> MasterDataSeedRequest {
    MasterDataSeedRequest {
        seed_key: key.to_owned(),
        stamp: AuditStamp::system(Utc::now()),
        departments: departments
            .iter()
            .map(|name| SeedRow {
                id: Uuid::new_v4(),
                draft: department(name),
            })
            .collect(),
        universities: Vec::new(),
        faculties: Vec::new(),
        recruit_years: Vec::new(),
        event_locations: Vec::new(),
        companies: Vec::new(),
        administrator: None,
    }
}

#[rstest]
#[tokio::test]
async fn seeding_is_recorded_once(store: MemoryStore) {
    let seeds = InMemoryMasterDataSeedRepository::new(store.clone());
    let request = seed_request("baseline", &["Sales", "Legal"]);

    assert_eq!(
        seeds.seed(&request).await.expect("first run"),
        SeedingResult::Applied
    );
    assert_eq!(
        seeds.seed(&request).await.expect("second run"),
        SeedingResult::AlreadySeeded
    );

    let departments = InMemoryResourceRepository::<Department>::new(store);
    let page = departments
        .list(&ListQuery::default())
        .await
        .expect("list");
    assert_eq!(page.total, 2);
}

#[rstest]
#[tokio::test]
async fn failed_seed_leaves_no_rows(store: MemoryStore) {
    let seeds = InMemoryMasterDataSeedRepository::new(store.clone());
    seeds
        .seed(&seed_request("broken", &["Sales", "sales"]))
        .await
        .expect_err("duplicate names abort the seed");

    let departments = InMemoryResourceRepository::<Department>::new(store);
    let page = departments
        .list(&ListQuery::default())
        .await
        .expect("list");
    assert_eq!(page.total, 0);
}
