use std::{collections::HashMap, sync::LazyLock};

use common_enums::{enums, AttemptStatus, AvsResponse, CvvResponse, TransactionEventType};
use common_utils::{consts, types::MinorUnit};
use masking::Secret;
use payswitch_domain_models::{
    router_data::{ConnectorAuthType, ErrorResponse, RouterData},
    router_response_types::{PaymentsResponseData, ResponseId, TransactionEvent},
    types::{
        PaymentsAuthorizeRouterData, PaymentsCaptureRouterData, PaymentsVoidRouterData,
        RefundsRouterData,
    },
};
use payswitch_interfaces::errors;
use serde::{Deserialize, Serialize};

use crate::{types::ResponseRouterData, utils::ConnectorTransactionIdData};

pub struct CheckoutRouterData<T> {
    pub amount: MinorUnit,
    pub router_data: T,
}

impl<T> From<(MinorUnit, T)> for CheckoutRouterData<T> {
    fn from((amount, router_data): (MinorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct CheckoutAuthType {
    pub secret_key: Secret<String>,
    pub processing_channel_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for CheckoutAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                secret_key: api_key.clone(),
                processing_channel_id: key1.clone(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutBillingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<enums::CountryAlpha2>,
}

#[derive(Debug, Serialize)]
pub struct CardSource {
    #[serde(rename = "type")]
    pub source_type: &'static str,
    pub number: cards::CardNumber,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<CheckoutBillingAddress>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPaymentType {
    Regular,
    Recurring,
    Unscheduled,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantInitiatedReason {
    Recurring,
    Unscheduled,
}

#[derive(Debug, Serialize)]
pub struct PaymentsRequest {
    pub source: CardSource,
    pub amount: MinorUnit,
    pub currency: enums::Currency,
    pub capture: bool,
    pub processing_channel_id: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<CheckoutPaymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_initiated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_payment_id: Option<String>,
}

impl TryFrom<&CheckoutRouterData<&PaymentsAuthorizeRouterData>> for PaymentsRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &CheckoutRouterData<&PaymentsAuthorizeRouterData>,
    ) -> Result<Self, Self::Error> {
        let auth = CheckoutAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;
        let card = &request.card;
        let billing = &request.billing_address;

        let source = CardSource {
            source_type: "card",
            number: card.card_number.clone(),
            expiry_month: Secret::new(card.card_exp.two_digit_month()),
            expiry_year: Secret::new(card.card_exp.four_digit_year()),
            cvv: {
                use masking::PeekInterface;
                (!card.card_cvc.peek().is_empty()).then(|| card.card_cvc.clone())
            },
            name: billing.full_name(),
            billing_address: Some(CheckoutBillingAddress {
                address_line1: billing.line1.clone(),
                address_line2: billing.line2.clone(),
                city: billing.city.clone(),
                state: billing.state.clone(),
                zip: billing.zip.clone(),
                country: billing.country,
            }),
        };

        let (payment_type, merchant_initiated) = match request.processing_initiator {
            None => (None, None),
            Some(
                enums::ProcessingInitiator::InitialCardOnFile
                | enums::ProcessingInitiator::StoredCardholderInitiated,
            ) => (Some(CheckoutPaymentType::Unscheduled), None),
            Some(enums::ProcessingInitiator::InitialRecurring) => {
                (Some(CheckoutPaymentType::Recurring), None)
            }
            Some(enums::ProcessingInitiator::StoredMerchantInitiated) => {
                (Some(CheckoutPaymentType::Unscheduled), Some(true))
            }
            Some(enums::ProcessingInitiator::FollowingRecurring) => {
                (Some(CheckoutPaymentType::Recurring), Some(true))
            }
        };

        Ok(Self {
            source,
            amount: item.amount,
            currency: request.currency,
            capture: false,
            processing_channel_id: auth.processing_channel_id,
            reference: request.client_transaction_reference.clone(),
            payment_type,
            merchant_initiated,
            previous_payment_id: request.previous_network_transaction_id.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CaptureRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<MinorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TryFrom<&CheckoutRouterData<&PaymentsCaptureRouterData>> for CaptureRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &CheckoutRouterData<&PaymentsCaptureRouterData>,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: Some(item.amount),
            reference: item.router_data.request.client_transaction_reference.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct VoidRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TryFrom<&PaymentsVoidRouterData> for VoidRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &PaymentsVoidRouterData) -> Result<Self, Self::Error> {
        Ok(Self {
            reference: item.request.client_transaction_reference.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RefundRequest {
    pub amount: MinorUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TryFrom<&CheckoutRouterData<&RefundsRouterData>> for RefundRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &CheckoutRouterData<&RefundsRouterData>) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: item.amount,
            reference: item.router_data.request.client_transaction_reference.clone(),
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum CheckoutPaymentStatus {
    Authorized,
    Captured,
    Declined,
    Voided,
    #[serde(rename = "Partially Refunded")]
    PartiallyRefunded,
    Refunded,
    Pending,
    #[serde(rename = "Card Verified")]
    CardVerified,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutSource {
    pub avs_check: Option<String>,
    pub cvv_check: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PaymentsResponse {
    pub id: Option<String>,
    pub action_id: Option<String>,
    pub status: Option<CheckoutPaymentStatus>,
    pub approved: Option<bool>,
    pub response_code: Option<String>,
    pub response_summary: Option<String>,
    pub reference: Option<String>,
    pub scheme_id: Option<String>,
    pub source: Option<CheckoutSource>,
}

/// Modification endpoints (capture, void, refund) answer 202 with just the
/// action id and reference.
#[derive(Debug, Deserialize, Serialize)]
pub struct ActionResponse {
    pub action_id: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutErrorResponse {
    pub request_id: Option<String>,
    pub error_type: Option<String>,
    pub error_codes: Option<Vec<String>>,
}

pub(crate) static AVS_MAP: LazyLock<HashMap<&'static str, AvsResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("A", AvsResponse::ZipNoMatchAddressMatch),
        ("B", AvsResponse::ZipUnverifiedAddressMatch),
        ("C", AvsResponse::NoMatch),
        ("D", AvsResponse::Match),
        ("E", AvsResponse::Error),
        ("G", AvsResponse::Unsupported),
        ("I", AvsResponse::Unsupported),
        ("M", AvsResponse::Match),
        ("N", AvsResponse::NoMatch),
        ("P", AvsResponse::ZipMatchAddressUnverified),
        ("R", AvsResponse::Error),
        ("S", AvsResponse::Unsupported),
        ("U", AvsResponse::Unsupported),
        ("W", AvsResponse::Zip9MatchAddressNoMatch),
        ("X", AvsResponse::Zip9MatchAddressMatch),
        ("Y", AvsResponse::Zip5MatchAddressMatch),
        ("Z", AvsResponse::Zip5MatchAddressNoMatch),
    ])
});

pub(crate) static CVV_MAP: LazyLock<HashMap<&'static str, CvvResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("Y", CvvResponse::Match),
        ("N", CvvResponse::NoMatch),
        ("P", CvvResponse::NotProcessed),
        ("U", CvvResponse::Unsupported),
        ("X", CvvResponse::NoResponse),
        ("D", CvvResponse::Suspicious),
    ])
});

pub(crate) fn translate_avs(raw: &str) -> AvsResponse {
    AVS_MAP.get(raw).copied().unwrap_or(AvsResponse::Unknown)
}

pub(crate) fn translate_cvv(raw: &str) -> CvvResponse {
    CVV_MAP.get(raw).copied().unwrap_or(CvvResponse::Unknown)
}

impl<Flow, Request>
    TryFrom<ResponseRouterData<Flow, PaymentsResponse, Request, PaymentsResponseData>>
    for RouterData<Flow, Request, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<Flow, PaymentsResponse, Request, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let approved = item.response.approved.unwrap_or(false)
            || matches!(
                item.response.status,
                Some(CheckoutPaymentStatus::Captured)
                    | Some(CheckoutPaymentStatus::Voided)
                    | Some(CheckoutPaymentStatus::Refunded)
            );
        let (status, response) = if approved {
            let avs_raw = item
                .response
                .source
                .as_ref()
                .and_then(|source| source.avs_check.clone());
            let cvv_raw = item
                .response
                .source
                .as_ref()
                .and_then(|source| source.cvv_check.clone());
            (
                item.flow_success,
                Ok(PaymentsResponseData {
                    resource_id: item
                        .response
                        .id
                        .clone()
                        .map(ResponseId::ConnectorTransactionId)
                        .unwrap_or_default(),
                    avs_response: avs_raw.as_deref().map(translate_avs).unwrap_or_default(),
                    cvv_response: cvv_raw.as_deref().map(translate_cvv).unwrap_or_default(),
                    avs_raw,
                    cvv_raw,
                    response_code: item.response.response_code.clone(),
                    network_transaction_id: item.response.scheme_id.clone(),
                    created_tokens: HashMap::new(),
                    rtau: None,
                }),
            )
        } else {
            (
                AttemptStatus::Failure,
                Err(ErrorResponse {
                    code: item
                        .response
                        .response_code
                        .clone()
                        .unwrap_or_else(|| consts::NO_ERROR_CODE.to_string()),
                    message: item
                        .response
                        .response_summary
                        .clone()
                        .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
                    reason: item.response.response_summary.clone(),
                    status_code: item.http_code,
                    connector_transaction_id: item.response.id.clone(),
                    already_captured: false,
                }),
            )
        };
        Ok(Self {
            status,
            response,
            connector_http_status_code: Some(item.http_code),
            ..item.data
        })
    }
}

/// Capture, void, and refund come back as a bare action acknowledgement
/// without the payment id, so it is read back off the request.
impl<Flow, Request: ConnectorTransactionIdData>
    TryFrom<ResponseRouterData<Flow, ActionResponse, Request, PaymentsResponseData>>
    for RouterData<Flow, Request, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<Flow, ActionResponse, Request, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let transaction_id = item.data.request.connector_transaction_id().to_string();
        Ok(Self {
            status: item.flow_success,
            response: Ok(PaymentsResponseData {
                resource_id: ResponseId::ConnectorTransactionId(transaction_id),
                response_code: item.response.action_id.clone(),
                ..PaymentsResponseData::default()
            }),
            connector_http_status_code: Some(item.http_code),
            ..item.data
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutWebhookData {
    pub id: Option<String>,
    pub action_id: Option<String>,
    pub reference: Option<String>,
    pub amount: Option<MinorUnit>,
    pub currency: Option<enums::Currency>,
    pub response_code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CheckoutWebhookBody {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: CheckoutWebhookData,
}

pub(crate) fn translate_webhook(body: &CheckoutWebhookBody) -> Option<TransactionEvent> {
    let (event_type, success) = match body.event_type.as_str() {
        "payment_captured" => (TransactionEventType::Capture, true),
        "payment_capture_declined" => (TransactionEventType::Capture, false),
        "payment_voided" => (TransactionEventType::Void, true),
        "payment_void_declined" => (TransactionEventType::Void, false),
        "payment_refunded" => (TransactionEventType::Refund, true),
        "payment_refund_declined" => (TransactionEventType::Refund, false),
        _ => return None,
    };
    Some(TransactionEvent {
        event_type,
        transaction_reference: body.data.id.clone().unwrap_or_default(),
        success,
        merchant_reference: body.data.reference.clone(),
        amount: body.data.amount,
        currency: body.data.currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avs_and_cvv_default_to_unknown() {
        assert_eq!(translate_avs("X"), AvsResponse::Zip9MatchAddressMatch);
        assert_eq!(translate_avs("nope"), AvsResponse::Unknown);
        assert_eq!(translate_cvv("Y"), CvvResponse::Match);
        assert_eq!(translate_cvv("?"), CvvResponse::Unknown);
    }

    #[test]
    fn refund_declined_webhook_translates_unsuccessful() {
        let body = CheckoutWebhookBody {
            event_type: "payment_refund_declined".to_string(),
            data: CheckoutWebhookData {
                id: Some("pay_abc".to_string()),
                action_id: Some("act_def".to_string()),
                reference: Some("order-1".to_string()),
                amount: Some(MinorUnit::new(500)),
                currency: Some(enums::Currency::EUR),
                response_code: None,
            },
        };
        let event = translate_webhook(&body).unwrap();
        assert_eq!(event.event_type, TransactionEventType::Refund);
        assert!(!event.success);
    }
}
