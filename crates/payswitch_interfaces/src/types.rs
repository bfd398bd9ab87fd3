//! Shared response type and per-flow trait aliases.

use payswitch_domain_models::{
    router_flow_types::{Authorize, Capture, Refund, TSync, Void},
    router_request_types::{
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsVoidData, RefundsData,
        TransactionSyncData,
    },
    router_response_types::{PaymentsResponseData, TransactionSyncResponseData},
};

use crate::api::ConnectorIntegration;

/// Raw HTTP response from a processor.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}

/// Type alias for `ConnectorIntegration<Authorize, PaymentsAuthorizeData, PaymentsResponseData>`
pub type PaymentsAuthorizeType =
    dyn ConnectorIntegration<Authorize, PaymentsAuthorizeData, PaymentsResponseData>;
/// Type alias for `ConnectorIntegration<Capture, PaymentsCaptureData, PaymentsResponseData>`
pub type PaymentsCaptureType =
    dyn ConnectorIntegration<Capture, PaymentsCaptureData, PaymentsResponseData>;
/// Type alias for `ConnectorIntegration<Void, PaymentsVoidData, PaymentsResponseData>`
pub type PaymentsVoidType = dyn ConnectorIntegration<Void, PaymentsVoidData, PaymentsResponseData>;
/// Type alias for `ConnectorIntegration<Refund, RefundsData, PaymentsResponseData>`
pub type RefundExecuteType = dyn ConnectorIntegration<Refund, RefundsData, PaymentsResponseData>;
/// Type alias for `ConnectorIntegration<TSync, TransactionSyncData, TransactionSyncResponseData>`
pub type TransactionSyncType =
    dyn ConnectorIntegration<TSync, TransactionSyncData, TransactionSyncResponseData>;
