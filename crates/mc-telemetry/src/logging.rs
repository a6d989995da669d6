//! Structured log macros.
//!
//! Every event carries a `subsystem` field so output from the layers can be
//! filtered uniformly:
//!
//! - `peer`: host of the peer involved
//! - `query`: name of the typed query

/// Log a peer-related event with standard fields.
///
/// ```rust,ignore
/// log_peer_event!(warn, "registry", "benchmark failed", peer.host, error = %e);
/// ```
#[macro_export]
macro_rules! log_peer_event {
    ($level:ident, $subsystem:expr, $msg:expr, $peer:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            peer = %$peer,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a query-related event with standard fields.
///
/// ```rust,ignore
/// log_query_event!(info, "cli", "query resolved", "balance", amount = 5);
/// ```
#[macro_export]
macro_rules! log_query_event {
    ($level:ident, $subsystem:expr, $msg:expr, $query:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            query = $query,
            $($($field)*,)?
            $msg
        )
    };
}
