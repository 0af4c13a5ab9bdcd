//! CRUD endpoints for the administrable resources.
//!
//! ```text
//! GET    /api/v1/{resource}?page=1&perPage=20&keyword=tokyo
//! GET    /api/v1/{resource}/{id}
//! POST   /api/v1/{resource}
//! PUT    /api/v1/{resource}/{id}
//! DELETE /api/v1/{resource}/{id}
//! ```
//!
//! Every resource exposes the same five operations, so [`resource_endpoints!`]
//! stamps out one module of handlers per resource. Each module documents its
//! paths in a local `Api` and registers them through `configure`. Handlers
//! require a session and delegate to the resource's command or query port.

use uuid::Uuid;

use crate::domain::entities::{
    Company, Department, DeviationValue, EducationalBackground, EventLocation, Faculty,
    Interviewer, RecruitYear, SearchCondition, Student, Teacher, University,
};
use crate::domain::{Error, ListQuery, Resource};
use crate::inbound::http::bodies::{
    CompanyBody, DepartmentBody, DeviationValueBody, EducationalBackgroundBody, EventLocationBody,
    FacultyBody, InterviewerBody, RecruitYearBody, SearchConditionBody, StudentBody, TeacherBody,
    UniversityBody,
};
use crate::inbound::http::validation::{FieldName, parse_optional_uuid, parse_uuid};

const ID: FieldName = FieldName::new("id");

/// Parse the `{id}` path segment.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, Error> {
    parse_uuid(raw, ID)
}

/// Validate raw listing parameters for resource `T`.
pub(crate) fn list_query<T: Resource>(
    page: Option<u32>,
    per_page: Option<u32>,
    keyword: Option<String>,
    parent: Option<&str>,
) -> Result<ListQuery, Error> {
    let parent_field = FieldName::new(T::KIND.parent_param().unwrap_or("parentId"));
    let parent_id = parse_optional_uuid(parent, parent_field)?;
    Ok(ListQuery::new(page, per_page, keyword, parent_id)?)
}

macro_rules! resource_endpoints {
    // List, read, update and delete handlers plus `ListParams`. The caller
    // must have `Page` and `ErrorSchema` in scope for the OpenAPI attributes.
    (
        @read_write $module:ident,
        resource: $resource:ident,
        body: $body:ident,
        state: $field:ident,
        collection: $collection:literal,
        item: $item:literal,
        tag: $tag:literal,
        $(parent: $parent:ident,)?
    ) => {
        /// Listing query string.
        #[derive(Debug, Default, serde::Deserialize, utoipa::IntoParams)]
        #[serde(default, rename_all = "camelCase")]
        #[into_params(parameter_in = Query)]
        pub struct ListParams {
            /// 1-based page number.
            #[param(minimum = 1)]
            pub page: Option<u32>,
            /// Page size, at most 100.
            #[param(minimum = 1, maximum = 100)]
            pub per_page: Option<u32>,
            /// Case-insensitive substring filter.
            pub keyword: Option<String>,
            $(
                /// Restrict the listing to one parent.
                #[param(format = Uuid)]
                pub $parent: Option<String>,
            )?
        }

        #[utoipa::path(
            get,
            path = $collection,
            params(ListParams),
            responses(
                (status = 200, description = "One page of matching rows", body = Page<$resource>),
                (status = 400, description = "Invalid query", body = ErrorSchema),
                (status = 401, description = "Login required", body = ErrorSchema),
                (status = 503, description = "Database unavailable", body = ErrorSchema)
            ),
            tag = $tag,
            operation_id = concat!("list_", stringify!($module))
        )]
        pub async fn list(
            state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
            session: $crate::inbound::http::session::SessionContext,
            params: actix_web::web::Query<ListParams>,
        ) -> $crate::inbound::http::ApiResult<actix_web::web::Json<$crate::domain::Page<$resource>>> {
            session.require_user_id()?;
            let ListParams { page, per_page, keyword, $($parent,)? } = params.into_inner();
            let parent: Option<String> = None $(.or($parent))?;
            let query = $crate::inbound::http::resources::list_query::<$resource>(
                page,
                per_page,
                keyword,
                parent.as_deref(),
            )?;
            Ok(actix_web::web::Json(state.$field.query.list(query).await?))
        }

        #[utoipa::path(
            get,
            path = $item,
            params(("id" = String, Path, format = Uuid, description = "Row identifier")),
            responses(
                (status = 200, description = "The row", body = $resource),
                (status = 400, description = "Malformed id", body = ErrorSchema),
                (status = 401, description = "Login required", body = ErrorSchema),
                (status = 404, description = "No such row", body = ErrorSchema)
            ),
            tag = $tag,
            operation_id = concat!("get_", stringify!($module))
        )]
        pub async fn get(
            state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
            session: $crate::inbound::http::session::SessionContext,
            id: actix_web::web::Path<String>,
        ) -> $crate::inbound::http::ApiResult<actix_web::web::Json<$resource>> {
            session.require_user_id()?;
            let id = $crate::inbound::http::resources::parse_id(&id)?;
            Ok(actix_web::web::Json(state.$field.query.get(id).await?))
        }

        #[utoipa::path(
            put,
            path = $item,
            params(("id" = String, Path, format = Uuid, description = "Row identifier")),
            request_body = $body,
            responses(
                (status = 200, description = "Updated row", body = $resource),
                (status = 400, description = "Validation failed", body = ErrorSchema),
                (status = 401, description = "Login required", body = ErrorSchema),
                (status = 404, description = "No such row", body = ErrorSchema),
                (status = 409, description = "Duplicate value", body = ErrorSchema)
            ),
            tag = $tag,
            operation_id = concat!("update_", stringify!($module))
        )]
        pub async fn update(
            state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
            session: $crate::inbound::http::session::SessionContext,
            id: actix_web::web::Path<String>,
            payload: actix_web::web::Json<$body>,
        ) -> $crate::inbound::http::ApiResult<actix_web::web::Json<$resource>> {
            let actor = session.require_user_id()?;
            let id = $crate::inbound::http::resources::parse_id(&id)?;
            let draft = $crate::inbound::http::bodies::DraftBody::into_draft(payload.into_inner())?;
            Ok(actix_web::web::Json(
                state.$field.command.update(actor, id, draft).await?,
            ))
        }

        #[utoipa::path(
            delete,
            path = $item,
            params(("id" = String, Path, format = Uuid, description = "Row identifier")),
            responses(
                (status = 204, description = "Deleted"),
                (status = 400, description = "Malformed id", body = ErrorSchema),
                (status = 401, description = "Login required", body = ErrorSchema),
                (status = 404, description = "No such row", body = ErrorSchema),
                (status = 409, description = "Still referenced", body = ErrorSchema)
            ),
            tag = $tag,
            operation_id = concat!("delete_", stringify!($module))
        )]
        pub async fn delete(
            state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
            session: $crate::inbound::http::session::SessionContext,
            id: actix_web::web::Path<String>,
        ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
            let actor = session.require_user_id()?;
            let id = $crate::inbound::http::resources::parse_id(&id)?;
            state.$field.command.delete(actor, id).await?;
            Ok(actix_web::HttpResponse::NoContent().finish())
        }
    };

    // Full module: the shared handlers plus a generic create.
    (
        $(#[$meta:meta])*
        $module:ident {
            resource: $resource:ident,
            body: $body:ident,
            state: $field:ident,
            collection: $collection:literal,
            item: $item:literal,
            tag: $tag:literal,
            $(parent: $parent:ident,)?
        }
    ) => {
        $(#[$meta])*
        pub mod $module {
            use super::*;
            use $crate::domain::Page;
            use $crate::inbound::http::schemas::ErrorSchema;

            resource_endpoints!(
                @read_write $module,
                resource: $resource,
                body: $body,
                state: $field,
                collection: $collection,
                item: $item,
                tag: $tag,
                $(parent: $parent,)?
            );

            #[utoipa::path(
                post,
                path = $collection,
                request_body = $body,
                responses(
                    (status = 201, description = "Created row", body = $resource),
                    (status = 400, description = "Validation failed", body = ErrorSchema),
                    (status = 401, description = "Login required", body = ErrorSchema),
                    (status = 409, description = "Duplicate value", body = ErrorSchema)
                ),
                tag = $tag,
                operation_id = concat!("create_", stringify!($module))
            )]
            pub async fn create(
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                session: $crate::inbound::http::session::SessionContext,
                payload: actix_web::web::Json<$body>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let actor = session.require_user_id()?;
                let draft =
                    $crate::inbound::http::bodies::DraftBody::into_draft(payload.into_inner())?;
                let created = state.$field.command.create(actor, draft).await?;
                Ok(actix_web::HttpResponse::Created().json(created))
            }

            /// OpenAPI paths for this resource.
            #[derive(utoipa::OpenApi)]
            #[openapi(paths(list, create, get, update, delete))]
            pub struct Api;

            /// Register the collection and item routes.
            pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
                cfg.service(
                    actix_web::web::resource($collection)
                        .route(actix_web::web::get().to(list))
                        .route(actix_web::web::post().to(create)),
                )
                .service(
                    actix_web::web::resource($item)
                        .route(actix_web::web::get().to(get))
                        .route(actix_web::web::put().to(update))
                        .route(actix_web::web::delete().to(delete)),
                );
            }
        }
    };
}

pub(crate) use resource_endpoints;

resource_endpoints! {
    /// `/departments`
    departments {
        resource: Department,
        body: DepartmentBody,
        state: departments,
        collection: "/departments",
        item: "/departments/{id}",
        tag: "departments",
    }
}

resource_endpoints! {
    /// `/event-locations`
    event_locations {
        resource: EventLocation,
        body: EventLocationBody,
        state: event_locations,
        collection: "/event-locations",
        item: "/event-locations/{id}",
        tag: "event-locations",
    }
}

resource_endpoints! {
    /// `/search-conditions`
    search_conditions {
        resource: SearchCondition,
        body: SearchConditionBody,
        state: search_conditions,
        collection: "/search-conditions",
        item: "/search-conditions/{id}",
        tag: "search-conditions",
    }
}

resource_endpoints! {
    /// `/universities`
    universities {
        resource: University,
        body: UniversityBody,
        state: universities,
        collection: "/universities",
        item: "/universities/{id}",
        tag: "schools",
    }
}

resource_endpoints! {
    /// `/faculties`, filterable by `universityId`.
    faculties {
        resource: Faculty,
        body: FacultyBody,
        state: faculties,
        collection: "/faculties",
        item: "/faculties/{id}",
        tag: "schools",
        parent: university_id,
    }
}

resource_endpoints! {
    /// `/deviation-values`, filterable by `facultyId`.
    deviation_values {
        resource: DeviationValue,
        body: DeviationValueBody,
        state: deviation_values,
        collection: "/deviation-values",
        item: "/deviation-values/{id}",
        tag: "schools",
        parent: faculty_id,
    }
}

resource_endpoints! {
    /// `/recruit-years`
    recruit_years {
        resource: RecruitYear,
        body: RecruitYearBody,
        state: recruit_years,
        collection: "/recruit-years",
        item: "/recruit-years/{id}",
        tag: "recruiting",
    }
}

resource_endpoints! {
    /// `/companies`
    companies {
        resource: Company,
        body: CompanyBody,
        state: companies,
        collection: "/companies",
        item: "/companies/{id}",
        tag: "recruiting",
    }
}

resource_endpoints! {
    /// `/students`, filterable by `recruitYearId`.
    students {
        resource: Student,
        body: StudentBody,
        state: students,
        collection: "/students",
        item: "/students/{id}",
        tag: "people",
        parent: recruit_year_id,
    }
}

resource_endpoints! {
    /// `/teachers`
    teachers {
        resource: Teacher,
        body: TeacherBody,
        state: teachers,
        collection: "/teachers",
        item: "/teachers/{id}",
        tag: "people",
    }
}

resource_endpoints! {
    /// `/interviewers`, filterable by `recruitYearId`.
    interviewers {
        resource: Interviewer,
        body: InterviewerBody,
        state: interviewers,
        collection: "/interviewers",
        item: "/interviewers/{id}",
        tag: "recruiting",
        parent: recruit_year_id,
    }
}

resource_endpoints! {
    /// `/educational-backgrounds`, filterable by `studentId`.
    educational_backgrounds {
        resource: EducationalBackground,
        body: EducationalBackgroundBody,
        state: educational_backgrounds,
        collection: "/educational-backgrounds",
        item: "/educational-backgrounds/{id}",
        tag: "people",
        parent: student_id,
    }
}

/// Register every generic resource module.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    departments::configure(cfg);
    event_locations::configure(cfg);
    search_conditions::configure(cfg);
    universities::configure(cfg);
    faculties::configure(cfg);
    deviation_values::configure(cfg);
    recruit_years::configure(cfg);
    companies::configure(cfg);
    students::configure(cfg);
    teachers::configure(cfg);
    interviewers::configure(cfg);
    educational_backgrounds::configure(cfg);
}
