//! Upstream service error types.

/// A third-party service returned a non-success HTTP status.
///
/// The status and response body are propagated to the immediate caller;
/// the core never retries these automatically.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upstream Error: status {} ({}) at line {} in {}", status, body, line, file)]
pub struct UpstreamError {
    /// HTTP status code returned by the upstream service
    pub status: u16,
    /// Response body, as returned by the service
    pub body: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfarer_error::UpstreamError;
    ///
    /// let err = UpstreamError::new(429, "rate limit exceeded");
    /// assert_eq!(err.status, 429);
    /// ```
    #[track_caller]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            status,
            body: body.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
