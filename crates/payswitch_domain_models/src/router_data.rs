use std::marker::PhantomData;

use common_enums::{AttemptStatus, Environment};
use masking::Secret;

/// One flow's worth of state: what goes to the processor and what came back.
///
/// `Flow` is a marker from [`crate::router_flow_types`]; `Request` and
/// `Response` are the matching payloads from
/// [`crate::router_request_types`] and [`crate::router_response_types`].
#[derive(Clone, Debug)]
pub struct RouterData<Flow, Request, Response> {
    pub flow: PhantomData<Flow>,
    pub environment: Environment,
    pub connector_auth_type: ConnectorAuthType,
    pub status: AttemptStatus,
    /// Processor sandbox flag carried per request when the processor has no
    /// separate sandbox host.
    pub test_mode: Option<bool>,
    pub request: Request,
    pub response: Result<Response, ErrorResponse>,
    pub connector_http_status_code: Option<u16>,
}

impl<Flow, Request, Response> RouterData<Flow, Request, Response> {
    /// Start a new attempt in the given environment with a pending status
    /// and no response.
    pub fn new(
        environment: Environment,
        connector_auth_type: ConnectorAuthType,
        request: Request,
    ) -> Self {
        Self {
            flow: PhantomData,
            environment,
            connector_auth_type,
            status: AttemptStatus::Pending,
            test_mode: None,
            request,
            response: Err(ErrorResponse::default()),
            connector_http_status_code: None,
        }
    }
}

/// Credential shapes accepted by the supported processors.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    /// A single API key, sent in a header.
    HeaderKey { api_key: Secret<String> },
    /// Credential pair, typically sent inside the request body.
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    /// Credential pair plus a signing secret for request signatures.
    SignatureKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
    },
    /// Four-part credential for processors with nested merchant scoping.
    MultiAuthKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
        key2: Secret<String>,
    },
    #[default]
    NoKey,
}

/// Normalized processor error, also used for declines.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ErrorResponse {
    /// Processor error or decline code, verbatim.
    pub code: String,
    /// Processor error message, verbatim.
    pub message: String,
    /// Longer processor-supplied explanation when one exists.
    pub reason: Option<String>,
    /// HTTP status the processor answered with.
    pub status_code: u16,
    /// Transaction reference when the processor assigned one despite failing.
    pub connector_transaction_id: Option<String>,
    /// Set when the processor rejected the call because the transaction was
    /// already captured. Callers use this to retry a void as a refund.
    pub already_captured: bool,
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self {
            code: common_utils::consts::NO_ERROR_CODE.to_string(),
            message: common_utils::consts::NO_ERROR_MESSAGE.to_string(),
            reason: None,
            // Placeholder until a response arrives.
            status_code: 0,
            connector_transaction_id: None,
            already_captured: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router_flow_types::Authorize;

    #[test]
    fn new_router_data_is_pending() {
        let data: RouterData<Authorize, (), ()> =
            RouterData::new(Environment::Sandbox, ConnectorAuthType::NoKey, ());
        assert_eq!(data.status, AttemptStatus::Pending);
        assert!(data.response.is_err());
    }
}
