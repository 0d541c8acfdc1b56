//! Replaying adapter for the `HttpClient` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{HttpClient, HttpResponse, PortError};

/// Serves recorded HTTP responses.
pub struct ReplayingHttpClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingHttpClient {
    /// Creates a replaying client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl HttpClient for ReplayingHttpClient {
    fn get(&self, _url: &str, _headers: &[(&str, &str)]) -> Result<HttpResponse, PortError> {
        replay_result(next_output(&self.replayer, "http", "get"), "http::get")
    }
}
