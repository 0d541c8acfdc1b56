//! Live HTTP client using `reqwest`'s blocking API.

use reqwest::blocking::Client;

use crate::ports::http::{HttpClient, HttpResponse};
use crate::ports::PortError;

const USER_AGENT: &str = concat!("import-graph/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client shared by every remote source.
pub struct LiveHttpClient {
    client: Client,
}

impl LiveHttpClient {
    /// Creates a client with the crate's user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, PortError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl HttpClient for LiveHttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, PortError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response =
            request.send().map_err(|e| -> PortError { format!("GET {url}: {e}").into() })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| -> PortError { format!("failed to read body of {url}: {e}").into() })?;
        Ok(HttpResponse { status, body })
    }
}
