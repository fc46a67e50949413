//! Blocking ureq transport with a bounded per-call timeout.
//!
//! Status-as-error is disabled so 4xx/5xx responses come back as data and
//! the core client interprets them. Only failures that kept a response from
//! arriving surface as `ApiError::Timeout` or `ApiError::Transport`.

use std::io;
use std::time::Duration;

use drive_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};
use tracing::trace;

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&mut self, req: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let headers = &req.headers;
        let body = req.body.as_deref().unwrap_or("");

        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.url), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.url), headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(&req.url), headers).send(body.as_bytes()),
            HttpMethod::Put => with_headers(self.agent.put(&req.url), headers).send(body.as_bytes()),
        };
        let mut response = result.map_err(map_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(map_error)?;
        trace!(status, bytes = body.len(), "response read");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        ureq::Error::Io(ref io_err)
            if matches!(io_err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) =>
        {
            ApiError::Timeout
        }
        other => ApiError::Transport(other.to_string()),
    }
}
