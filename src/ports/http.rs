//! HTTP port for resolver lookups and remote stat sources.

use serde::{Deserialize, Serialize};

use super::PortError;

/// Status and body of a completed GET request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for 2xx responses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP client.
pub trait HttpClient: Send + Sync {
    /// Issues a GET request with extra `headers`.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the body cannot be read.
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, PortError>;
}
