use http::StatusCode;

/// Domain errors that a boundary layer can translate into a response
///
/// The core never builds responses itself. Whatever transport sits in
/// front of the orchestrator asks the error for its status and a message
/// that is safe to show callers.
pub trait HttpError: std::error::Error {
    /// Transport status for this error kind
    fn status_code(&self) -> StatusCode;

    /// Machine-readable kind (e.g. `rate_limit_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;

    /// Seconds a caller should wait before retrying, when meaningful
    fn retry_after(&self) -> Option<u64> {
        None
    }
}
