//! Recording adapter for the `HttpClient` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{HttpClient, HttpResponse, PortError};

/// Records HTTP exchanges while delegating to an inner client.
pub struct RecordingHttpClient {
    inner: Box<dyn HttpClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHttpClient {
    /// Wraps `inner`, logging to `recorder`.
    pub fn new(inner: Box<dyn HttpClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

/// Only the URL is recorded; header values may carry credentials.
#[derive(Serialize)]
struct GetInput<'a> {
    url: &'a str,
}

impl HttpClient for RecordingHttpClient {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, PortError> {
        let result = self.inner.get(url, headers);
        record_result(&self.recorder, "http", "get", &GetInput { url }, &result);
        result
    }
}
