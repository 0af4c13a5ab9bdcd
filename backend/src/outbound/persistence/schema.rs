//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts. `password_hash` is only read by the credential repository.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Varchar,
        department_id -> Nullable<Uuid>,
        password_hash -> Nullable<Text>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    departments (id) {
        id -> Uuid,
        name -> Varchar,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    event_locations (id) {
        id -> Uuid,
        name -> Varchar,
        address -> Nullable<Varchar>,
        capacity -> Nullable<Int4>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saved student search filters. `conditions` is always a JSON object.
    search_conditions (id) {
        id -> Uuid,
        name -> Varchar,
        conditions -> Jsonb,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    universities (id) {
        id -> Uuid,
        name -> Varchar,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    faculties (id) {
        id -> Uuid,
        university_id -> Uuid,
        name -> Varchar,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    deviation_values (id) {
        id -> Uuid,
        faculty_id -> Uuid,
        value -> Float8,
        source -> Nullable<Varchar>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    recruit_years (id) {
        id -> Uuid,
        year -> Int4,
        name -> Varchar,
        is_active -> Bool,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    companies (id) {
        id -> Uuid,
        name -> Varchar,
        industry -> Nullable<Varchar>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    students (id) {
        id -> Uuid,
        name -> Varchar,
        name_kana -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        university_id -> Nullable<Uuid>,
        faculty_id -> Nullable<Uuid>,
        recruit_year_id -> Nullable<Uuid>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    teachers (id) {
        id -> Uuid,
        name -> Varchar,
        school_name -> Varchar,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    interviewers (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Nullable<Varchar>,
        department_id -> Nullable<Uuid>,
        recruit_year_id -> Nullable<Uuid>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Schooling history; rows are removed with their student.
    educational_backgrounds (id) {
        id -> Uuid,
        student_id -> Uuid,
        school_name -> Varchar,
        department_name -> Nullable<Varchar>,
        admission_year -> Nullable<Int4>,
        graduation_year -> Nullable<Int4>,
        created_by -> Nullable<Uuid>,
        updated_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per applied master-data seed.
    seed_runs (seed_key) {
        seed_key -> Text,
        row_count -> Int4,
        applied_at -> Timestamptz,
    }
}

diesel::joinable!(users -> departments (department_id));
diesel::joinable!(faculties -> universities (university_id));
diesel::joinable!(deviation_values -> faculties (faculty_id));
diesel::joinable!(educational_backgrounds -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    departments,
    event_locations,
    search_conditions,
    universities,
    faculties,
    deviation_values,
    recruit_years,
    companies,
    students,
    teachers,
    interviewers,
    educational_backgrounds,
    seed_runs,
);
