//! Executing `HttpRequest` values over the network.
//!
//! # Design
//! The request builder stays free of I/O; a `Transport` is the one place
//! that talks to the network. `UreqTransport` is the blocking
//! implementation used by the runner and the integration tests. It disables
//! ureq's status-code-as-error behavior so `4xx`/`5xx` come back as data.
//! There is no timeout and no retry: a failed round-trip is final.

use tracing::debug;
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::unversioned::multipart::{Form, Part};
use ureq::{Body, RequestBuilder};

use crate::error::ApiError;
use crate::form::{FormPart, MultipartForm};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};

/// Performs one HTTP round-trip.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(&url), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&url), &headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&url), &headers), body.as_ref()),
            HttpMethod::Put => send(with_headers(self.agent.put(&url), &headers), body.as_ref()),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        // Error pages are not always UTF-8; keep the status and a lossy body.
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        debug!(status, bytes = bytes.len(), "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<&RequestBody>,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        None => builder.send_empty(),
        Some(RequestBody::Bytes(bytes)) => builder.send(&bytes[..]),
        Some(RequestBody::Multipart(form)) => builder.send(multipart(form)?),
    }
}

/// Render `form` with ureq's encoder, which also sets the boundary header.
fn multipart(form: &MultipartForm) -> Result<Form<'_>, ureq::Error> {
    let mut out = Form::new();
    for (name, part) in form.parts() {
        out = match part {
            FormPart::Text(value) => out.text(name, value),
            FormPart::File(photo) => out.part(
                name,
                Part::bytes(&photo.bytes)
                    .file_name(&photo.disposition_file_name())
                    .mime_str(photo.content_type)?,
            ),
        };
    }
    Ok(out)
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
