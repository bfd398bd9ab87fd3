use std::collections::HashMap;

use cards::CardExpiration;
use common_enums::{
    AvsResponse, CvvResponse, RtauStatus, TokenType, TransactionEventType,
};
use common_utils::types::MinorUnit;
use masking::Secret;

/// Identifier a processor assigned to a transaction.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum ResponseId {
    ConnectorTransactionId(String),
    #[default]
    NoResponseId,
}

impl ResponseId {
    pub fn get_connector_transaction_id(&self) -> Option<&str> {
        match self {
            Self::ConnectorTransactionId(id) => Some(id),
            Self::NoResponseId => None,
        }
    }
}

/// Normalized response for the payment flows (authorize, capture, void,
/// refund). Declines travel as [`crate::router_data::ErrorResponse`]
/// instead.
#[derive(Clone, Debug, Default)]
pub struct PaymentsResponseData {
    pub resource_id: ResponseId,
    /// Normalized address verification result.
    pub avs_response: AvsResponse,
    /// Normalized card verification result.
    pub cvv_response: CvvResponse,
    /// Processor AVS code, verbatim.
    pub avs_raw: Option<String>,
    /// Processor CVV code, verbatim.
    pub cvv_raw: Option<String>,
    /// Processor approval or response code, verbatim.
    pub response_code: Option<String>,
    /// Network transaction id, kept for later merchant-initiated payments.
    pub network_transaction_id: Option<String>,
    /// Tokens the processor minted during this call.
    pub created_tokens: HashMap<TokenType, Secret<String>>,
    /// Real-time account updater payload, when the processor returned one.
    pub rtau: Option<RtauResponse>,
}

/// Account updater details accompanying an authorization.
#[derive(Clone, Debug, Default)]
pub struct RtauResponse {
    pub status: RtauStatus,
    pub updated_card_last4: Option<String>,
    pub updated_card_bin: Option<String>,
    pub updated_expiration: Option<CardExpiration>,
}

/// Settlement state of a transaction as reported by the processor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementState {
    /// Captured and settled; only a refund can return funds.
    Settled,
    /// Captured but not yet settled; a void still works.
    CapturedPendingSettlement,
    /// Authorized only, or any other pre-capture state.
    #[default]
    NotSettled,
}

/// Response for the settlement-state lookup flow.
#[derive(Clone, Debug, Default)]
pub struct TransactionSyncResponseData {
    pub resource_id: ResponseId,
    pub settlement_state: SettlementState,
}

/// Normalized webhook notification.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TransactionEvent {
    pub event_type: TransactionEventType,
    /// Processor transaction id the event refers to.
    pub transaction_reference: String,
    /// Whether the underlying operation succeeded.
    pub success: bool,
    /// Caller's own reference when the processor echoed one back.
    pub merchant_reference: Option<String>,
    pub amount: Option<MinorUnit>,
    pub currency: Option<common_enums::Currency>,
}
