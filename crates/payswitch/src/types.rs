//! The canonical response callers receive from every operation.

use std::collections::HashMap;

use common_enums::{AvsResponse, CvvResponse, TokenType};
use masking::PeekInterface;
use payswitch_domain_models::{
    router_data::RouterData,
    router_response_types::{PaymentsResponseData, RtauResponse},
};

/// Outcome of one authorize, capture, void, or refund call, identical in
/// shape across processors. Constructed once from the processor's answer
/// and never mutated.
#[derive(Clone, Debug, Default)]
pub struct GatewayResponse {
    /// Whether the processor approved the operation.
    pub success: bool,
    /// Processor transaction id; non-empty whenever `success` is true.
    pub transaction_reference: String,
    pub avs_result: AvsResponse,
    pub cvv_result: CvvResponse,
    /// Processor AVS code, verbatim.
    pub avs_raw: Option<String>,
    /// Processor CVV code, verbatim.
    pub cvv_raw: Option<String>,
    /// Approval or response code, verbatim.
    pub response_code: Option<String>,
    /// Decline or error code, verbatim from the processor, never
    /// rewritten.
    pub error_code: Option<String>,
    /// Human-readable decline or error text from the processor.
    pub error_message: Option<String>,
    /// A capture declined because the transaction was already captured.
    pub already_captured: bool,
    /// HTTP status of the processor exchange.
    pub status_code: u16,
    /// Raw response headers, present only when the request opted in via
    /// [`common_utils::consts::INCLUDE_RESPONSE_HEADERS_OPTION`].
    pub headers: Option<http::HeaderMap>,
    /// Tokens the processor minted during this call.
    pub created_tokens: Option<HashMap<TokenType, String>>,
    /// Real-time account-updater result, when the processor returned one.
    pub rtau: Option<RtauResponse>,
    /// Network transaction id for later merchant-initiated payments.
    pub network_transaction_id: Option<String>,
}

impl GatewayResponse {
    pub(crate) fn from_router_data<Flow, Request>(
        data: &RouterData<Flow, Request, PaymentsResponseData>,
        headers: Option<http::HeaderMap>,
    ) -> Self {
        match &data.response {
            Ok(response) => Self {
                success: true,
                transaction_reference: response
                    .resource_id
                    .get_connector_transaction_id()
                    .unwrap_or_default()
                    .to_string(),
                avs_result: response.avs_response,
                cvv_result: response.cvv_response,
                avs_raw: response.avs_raw.clone(),
                cvv_raw: response.cvv_raw.clone(),
                response_code: response.response_code.clone(),
                error_code: None,
                error_message: None,
                already_captured: false,
                status_code: data.connector_http_status_code.unwrap_or_default(),
                headers,
                created_tokens: (!response.created_tokens.is_empty()).then(|| {
                    response
                        .created_tokens
                        .iter()
                        .map(|(kind, token)| (*kind, token.peek().to_string()))
                        .collect()
                }),
                rtau: response.rtau.clone(),
                network_transaction_id: response.network_transaction_id.clone(),
            },
            Err(error) => Self {
                success: false,
                transaction_reference: error
                    .connector_transaction_id
                    .clone()
                    .unwrap_or_default(),
                error_code: Some(error.code.clone()),
                error_message: Some(error.message.clone()),
                already_captured: error.already_captured,
                status_code: error.status_code,
                headers,
                ..Self::default()
            },
        }
    }
}
