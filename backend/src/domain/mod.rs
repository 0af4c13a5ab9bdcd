//! Domain primitives, entities and services.
//!
//! Purpose: define the strongly typed resources administered through the
//! API, the ports the service talks through and the services implementing
//! the driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `Resource`/`ResourceKind`: uniform shape of every entity.
//! - `entities`: the master-data and recruiting records.
//! - `ResourceCommandService`/`ResourceQueryService`: generic CQRS services.
//! - `AccountService`/`CredentialLoginService`: credentials and login.
//! - `MasterDataSeeder`: applies registry seeds.

pub mod account_service;
pub mod audit;
pub mod auth;
pub mod entities;
pub mod error;
pub mod listing;
pub mod master_data;
pub mod ports;
pub mod resource;
pub mod resource_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::{AccountService, CredentialLoginService};
pub use self::audit::{AuditStamp, AuditTrail};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MAX, PASSWORD_MIN, Password, PasswordHash,
    UNKNOWN_ACCOUNT_HASH,
};
pub use self::error::{Error, ErrorCode, ErrorPayloadError};
pub use self::listing::{DEFAULT_PER_PAGE, ListQuery, MAX_PER_PAGE, Page};
pub use self::master_data::{
    MasterDataSeedOutcome, MasterDataSeeder, MasterDataSeedingError, seeded_id,
};
pub use self::resource::{Reference, Resource, ResourceKind};
pub use self::resource_service::{ResourceCommandService, ResourceQueryService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserId, UserIdError};
pub use self::validation::{FieldCode, FieldError};
