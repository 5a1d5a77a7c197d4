//! Task-local trace id for the request being served.
//!
//! `TraceSpan` establishes the scope; error rendering and db error mapping
//! read it so log lines and the `x-trace-id` header agree. Outside a request
//! the id reads as "unknown".

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` as the current request's id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
