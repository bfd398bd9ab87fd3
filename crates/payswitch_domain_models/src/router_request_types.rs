use std::collections::HashMap;

use common_enums::{Currency, ProcessingInitiator};
use common_utils::types::MinorUnit;
use masking::Secret;

use crate::{
    address::Address,
    payment_method_data::{Card, ThreeDSecureData},
};

/// Extra per-request knobs keyed by name.
///
/// Recognized keys are connector specific, except
/// [`common_utils::consts::INCLUDE_RESPONSE_HEADERS_OPTION`] which asks the
/// dispatch layer to copy the processor's HTTP response headers into the
/// result.
pub type RequestOptions = HashMap<String, serde_json::Value>;

/// Request payload for the authorize flow.
#[derive(Clone, Debug)]
pub struct PaymentsAuthorizeData {
    pub amount: MinorUnit,
    pub currency: Currency,
    pub card: Card,
    pub billing_address: Address,
    pub shipping_address: Option<Address>,
    /// Caller's own reference for this attempt, echoed to the processor
    /// where the processor supports one.
    pub client_transaction_reference: Option<String>,
    /// Order or invoice reference shown on statements and reports.
    pub merchant_order_reference: Option<String>,
    /// Sales channel hint, processor specific (for example `"web"`).
    pub channel: Option<String>,
    /// Electronic commerce indicator from an upstream wallet or 3DS flow.
    pub eci: Option<String>,
    /// Network token cryptogram for wallet payments.
    pub payment_cryptogram: Option<Secret<String>>,
    pub three_ds: Option<ThreeDSecureData>,
    pub level3: Option<Level3Data>,
    pub processing_initiator: Option<ProcessingInitiator>,
    /// Network transaction id from the initial stored-credential payment,
    /// required for merchant-initiated follow-ups.
    pub previous_network_transaction_id: Option<String>,
    pub options: RequestOptions,
}

/// Request payload for the capture flow.
#[derive(Clone, Debug)]
pub struct PaymentsCaptureData {
    /// Processor transaction id returned by the authorization.
    pub connector_transaction_id: String,
    /// Captures the full authorized amount when absent.
    pub amount: Option<MinorUnit>,
    pub currency: Currency,
    pub client_transaction_reference: Option<String>,
    pub options: RequestOptions,
}

/// Request payload for the void flow.
#[derive(Clone, Debug)]
pub struct PaymentsVoidData {
    pub connector_transaction_id: String,
    pub client_transaction_reference: Option<String>,
    pub options: RequestOptions,
}

/// Request payload for the refund flow.
#[derive(Clone, Debug)]
pub struct RefundsData {
    pub connector_transaction_id: String,
    pub amount: MinorUnit,
    pub currency: Currency,
    /// Last four PAN digits, required by processors that want them echoed
    /// on credit requests.
    pub card_last4: Option<String>,
    pub client_transaction_reference: Option<String>,
    pub options: RequestOptions,
}

/// Request payload for the settlement-state lookup flow.
#[derive(Clone, Debug)]
pub struct TransactionSyncData {
    pub connector_transaction_id: String,
    pub options: RequestOptions,
}

/// Level 3 interchange data.
#[derive(Clone, Debug, Default)]
pub struct Level3Data {
    pub customer_reference: Option<String>,
    pub tax_amount: Option<MinorUnit>,
    pub duty_amount: Option<MinorUnit>,
    pub freight_amount: Option<MinorUnit>,
    pub destination_postal_code: Option<Secret<String>>,
    pub destination_country_code: Option<String>,
    pub line_items: Vec<Level3LineItem>,
}

#[derive(Clone, Debug, Default)]
pub struct Level3LineItem {
    pub product_code: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub unit_of_measure: Option<String>,
    pub unit_price: Option<MinorUnit>,
    pub total_amount: Option<MinorUnit>,
    pub tax_amount: Option<MinorUnit>,
    pub commodity_code: Option<String>,
    pub discount_amount: Option<MinorUnit>,
}
