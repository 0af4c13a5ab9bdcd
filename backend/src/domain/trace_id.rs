//! Correlation id for one API request.
//!
//! `middleware::Trace` puts the id in tokio task-local storage for the
//! lifetime of the request, so [`crate::domain::Error`] constructors and log
//! lines can read it without it being passed around. Work moved onto another
//! task must be wrapped in [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Request and response header carrying the id.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static REQUEST_TRACE: TraceId;
}

/// ```
/// use recruit_admin::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "6f1c2a4e-8d0b-4c4e-9a51-0f2f7c3d9b10".parse().unwrap();
/// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Use the caller's id when it is a UUID, otherwise mint a v4 one.
    pub fn from_header_or_generate(header: Option<&str>) -> Self {
        match header.map(str::trim).map(str::parse) {
            Some(Ok(id)) => id,
            _ => Self(Uuid::new_v4()),
        }
    }

    /// Id of the request the current task is serving.
    pub fn current() -> Option<Self> {
        REQUEST_TRACE.try_with(|id| *id).ok()
    }

    pub async fn scope<F: Future>(trace_id: Self, work: F) -> F::Output {
        REQUEST_TRACE.scope(trace_id, work).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse().map(Self)
    }
}
