use thiserror::Error;

/// Failures talking to the ticketing API
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Ticketmaster API key is not configured")]
    MissingApiKey,
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Ticketmaster rejected the API key")]
    Unauthorized,
    #[error("Ticketmaster API error {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    ResponseParseFailed(String),
}
