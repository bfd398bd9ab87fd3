//! Outbound HTTP transport.

use std::time::Duration;

use common_utils::{
    consts,
    errors::CustomResult,
    request::{Method, Request, RequestContent},
};
use error_stack::ResultExt;
use masking::ExposeInterface;
use payswitch_interfaces::{errors::HttpClientError, types::Response};

/// One HTTPS exchange with a processor. Implemented by the reqwest-backed
/// transport and by recording stubs in tests.
#[async_trait::async_trait]
pub trait Connection: Send + Sync {
    async fn send_request(&self, request: Request) -> CustomResult<Response, HttpClientError>;
}

/// Default pooled client: 60 second total timeout, TLS 1.2 minimum.
pub fn default_http_client() -> CustomResult<reqwest::Client, HttpClientError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(consts::REQUEST_TIMEOUT_SECS))
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .build()
        .change_context(HttpClientError::ClientConstructionFailed)
}

/// Like [`default_http_client`] but pinned to HTTP/1.1, for gateways whose
/// legacy endpoints mishandle protocol upgrades.
pub fn http1_only_client() -> CustomResult<reqwest::Client, HttpClientError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(consts::REQUEST_TIMEOUT_SECS))
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .http1_only()
        .build()
        .change_context(HttpClientError::ClientConstructionFailed)
}

pub struct ReqwestConnection {
    client: reqwest::Client,
}

impl ReqwestConnection {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Connection for ReqwestConnection {
    async fn send_request(&self, request: Request) -> CustomResult<Response, HttpClientError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in request.headers {
            builder = builder.header(&name, value.into_inner());
        }
        if let Some(body) = request.body {
            let payload = match body {
                RequestContent::RawBytes(bytes) => bytes,
                other => other.get_inner_value().expose().into_bytes(),
            };
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(|error| {
            let report = error_stack::report!(error);
            if report.current_context().is_timeout() {
                report.change_context(HttpClientError::RequestTimeoutReceived)
            } else {
                report.change_context(HttpClientError::RequestNotSent)
            }
        })?;

        let status_code = response.status().as_u16();
        let headers = Some(response.headers().clone());
        let body = response
            .bytes()
            .await
            .change_context(HttpClientError::ResponseStreamEnded)?;

        Ok(Response {
            headers,
            response: body,
            status_code,
        })
    }
}
