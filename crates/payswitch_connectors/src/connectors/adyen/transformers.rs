use std::{collections::HashMap, sync::LazyLock};

use common_enums::{
    enums, AttemptStatus, AvsResponse, CvvResponse, TokenType, TransactionEventType,
};
use common_utils::{ext_traits::safe_str, types::MinorUnit};
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

use crate::types::ResponseRouterData;

pub struct AdyenRouterData<T> {
    pub amount: MinorUnit,
    pub router_data: T,
}

impl<T> From<(MinorUnit, T)> for AdyenRouterData<T> {
    fn from((amount, router_data): (MinorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct AdyenAuthType {
    pub api_key: Secret<String>,
    pub merchant_account: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for AdyenAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                api_key: api_key.clone(),
                merchant_account: key1.clone(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Amount {
    pub currency: enums::Currency,
    pub value: MinorUnit,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenCard {
    #[serde(rename = "type")]
    pub payment_type: &'static str,
    pub number: cards::CardNumber,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenBillingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number_or_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<enums::CountryAlpha2>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AdyenShopperInteraction {
    Ecommerce,
    #[serde(rename = "ContAuth")]
    ContinuedAuthentication,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum AdyenRecurringModel {
    UnscheduledCardOnFile,
    Subscription,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenMpiData {
    pub directory_response: String,
    pub authentication_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cavv: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_authentication_verification_value: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eci: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenPaymentRequest {
    pub amount: Amount,
    pub merchant_account: Secret<String>,
    pub payment_method: AdyenCard,
    pub reference: String,
    pub shopper_interaction: AdyenShopperInteraction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_processing_model: Option<AdyenRecurringModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_payment_method: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<AdyenBillingAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpi_data: Option<AdyenMpiData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl TryFrom<&AdyenRouterData<&PaymentsAuthorizeRouterData>> for AdyenPaymentRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &AdyenRouterData<&PaymentsAuthorizeRouterData>,
    ) -> Result<Self, Self::Error> {
        let auth = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;
        let card = &request.card;

        let payment_method = AdyenCard {
            payment_type: "scheme",
            number: card.card_number.clone(),
            expiry_month: Secret::new(card.card_exp.two_digit_month()),
            expiry_year: Secret::new(card.card_exp.four_digit_year()),
            cvc: non_empty_cvc(&card.card_cvc),
            holder_name: request.billing_address.full_name(),
        };

        let (shopper_interaction, recurring_processing_model, store_payment_method) =
            cof_indicators(request.processing_initiator);

        let mpi_data = request.payment_cryptogram.as_ref().map(|cryptogram| AdyenMpiData {
            directory_response: "Y".to_string(),
            authentication_response: "Y".to_string(),
            cavv: None,
            token_authentication_verification_value: Some(cryptogram.clone()),
            eci: request.eci.clone().or_else(|| Some("02".to_string())),
        });

        let billing_address = Some(AdyenBillingAddress {
            street: request.billing_address.line1.clone(),
            house_number_or_name: request.billing_address.line2.clone(),
            city: request.billing_address.city.clone(),
            state_or_province: request.billing_address.state.clone(),
            postal_code: request.billing_address.zip.clone(),
            country: request.billing_address.country,
        });

        Ok(Self {
            amount: Amount {
                currency: request.currency,
                value: item.amount,
            },
            merchant_account: auth.merchant_account,
            payment_method,
            reference: safe_str(request.client_transaction_reference.as_ref()).to_string(),
            shopper_interaction,
            recurring_processing_model,
            store_payment_method,
            shopper_reference: request.merchant_order_reference.clone(),
            network_payment_reference: request.previous_network_transaction_id.clone(),
            billing_address,
            mpi_data,
            channel: request.channel.clone(),
        })
    }
}

fn non_empty_cvc(cvc: &Secret<String>) -> Option<Secret<String>> {
    use masking::PeekInterface;
    (!cvc.peek().is_empty()).then(|| cvc.clone())
}

fn cof_indicators(
    initiator: Option<enums::ProcessingInitiator>,
) -> (
    AdyenShopperInteraction,
    Option<AdyenRecurringModel>,
    Option<bool>,
) {
    match initiator {
        None => (AdyenShopperInteraction::Ecommerce, None, None),
        Some(enums::ProcessingInitiator::InitialCardOnFile) => (
            AdyenShopperInteraction::Ecommerce,
            Some(AdyenRecurringModel::UnscheduledCardOnFile),
            Some(true),
        ),
        Some(enums::ProcessingInitiator::InitialRecurring) => (
            AdyenShopperInteraction::Ecommerce,
            Some(AdyenRecurringModel::Subscription),
            Some(true),
        ),
        Some(enums::ProcessingInitiator::StoredCardholderInitiated) => (
            AdyenShopperInteraction::ContinuedAuthentication,
            Some(AdyenRecurringModel::UnscheduledCardOnFile),
            None,
        ),
        Some(enums::ProcessingInitiator::StoredMerchantInitiated) => (
            AdyenShopperInteraction::ContinuedAuthentication,
            Some(AdyenRecurringModel::UnscheduledCardOnFile),
            None,
        ),
        Some(enums::ProcessingInitiator::FollowingRecurring) => (
            AdyenShopperInteraction::ContinuedAuthentication,
            Some(AdyenRecurringModel::Subscription),
            None,
        ),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenCaptureRequest {
    pub merchant_account: Secret<String>,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TryFrom<&AdyenRouterData<&PaymentsCaptureRouterData>> for AdyenCaptureRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &AdyenRouterData<&PaymentsCaptureRouterData>) -> Result<Self, Self::Error> {
        let auth = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        Ok(Self {
            merchant_account: auth.merchant_account,
            amount: Amount {
                currency: item.router_data.request.currency,
                value: item.amount,
            },
            reference: item.router_data.request.client_transaction_reference.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenCancelRequest {
    pub merchant_account: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TryFrom<&PaymentsVoidRouterData> for AdyenCancelRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &PaymentsVoidRouterData) -> Result<Self, Self::Error> {
        let auth = AdyenAuthType::try_from(&item.connector_auth_type)?;
        Ok(Self {
            merchant_account: auth.merchant_account,
            reference: item.request.client_transaction_reference.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenRefundRequest {
    pub merchant_account: Secret<String>,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl TryFrom<&AdyenRouterData<&RefundsRouterData>> for AdyenRefundRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &AdyenRouterData<&RefundsRouterData>) -> Result<Self, Self::Error> {
        let auth = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        Ok(Self {
            merchant_account: auth.merchant_account,
            amount: Amount {
                currency: item.router_data.request.currency,
                value: item.amount,
            },
            reference: item.router_data.request.client_transaction_reference.clone(),
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum AdyenStatus {
    Authorised,
    Refused,
    Cancelled,
    Error,
    Pending,
    Received,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenAdditionalData {
    #[serde(rename = "avsResult")]
    pub avs_result: Option<String>,
    #[serde(rename = "cvcResult")]
    pub cvc_result: Option<String>,
    #[serde(rename = "recurring.recurringDetailReference")]
    pub recurring_detail_reference: Option<Secret<String>>,
    pub network_tx_reference: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenPaymentResponse {
    pub psp_reference: Option<String>,
    pub result_code: Option<AdyenStatus>,
    /// Asynchronous flows (capture, cancel, refund) answer with a status
    /// instead of a result code.
    pub status: Option<String>,
    pub refusal_reason: Option<String>,
    pub refusal_reason_code: Option<String>,
    pub additional_data: Option<AdyenAdditionalData>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenErrorResponse {
    pub status: i32,
    pub error_code: String,
    pub message: String,
    pub error_type: Option<String>,
    pub psp_reference: Option<String>,
}

/// Adyen `avsResult` additional data, keyed by the leading numeric code of
/// the `"N Description"` string.
pub(crate) static AVS_MAP: LazyLock<HashMap<&'static str, AvsResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("0", AvsResponse::Unknown),
        ("1", AvsResponse::ZipNoMatchAddressMatch),
        ("2", AvsResponse::NoMatch),
        ("3", AvsResponse::Unsupported),
        ("4", AvsResponse::Unsupported),
        ("5", AvsResponse::Skipped),
        ("6", AvsResponse::Zip5MatchAddressNoMatch),
        ("7", AvsResponse::Match),
        ("8", AvsResponse::Error),
        ("9", AvsResponse::ZipMatchAddressUnverified),
        ("10", AvsResponse::ZipUnverifiedAddressMatch),
        ("11", AvsResponse::Error),
        ("12", AvsResponse::NoMatch),
        ("13", AvsResponse::Unsupported),
        ("14", AvsResponse::ZipMatchAddressUnverified),
        ("15", AvsResponse::ZipUnverifiedAddressMatch),
        ("16", AvsResponse::NoMatch),
        ("17", AvsResponse::NoMatch),
        ("18", AvsResponse::Skipped),
        ("19", AvsResponse::Zip5MatchAddressNoMatch),
        ("20", AvsResponse::Match),
        ("21", AvsResponse::Zip5MatchAddressNoMatch),
        ("22", AvsResponse::NoMatch),
        ("23", AvsResponse::ZipNoMatchAddressMatch),
        ("24", AvsResponse::Zip5MatchAddressNoMatch),
        ("25", AvsResponse::ZipNoMatchAddressMatch),
        ("26", AvsResponse::NoMatch),
    ])
});

/// Adyen `cvcResult` codes, same leading-number format.
pub(crate) static CVV_MAP: LazyLock<HashMap<&'static str, CvvResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("0", CvvResponse::Unknown),
        ("1", CvvResponse::Match),
        ("2", CvvResponse::NoMatch),
        ("3", CvvResponse::NotProcessed),
        ("4", CvvResponse::RequiredButMissing),
        ("5", CvvResponse::Unsupported),
        ("6", CvvResponse::Skipped),
    ])
});

/// Extract the leading numeric code from Adyen's `"N Description"` strings.
fn leading_code(raw: &str) -> &str {
    raw.split_whitespace().next().unwrap_or("")
}

pub(crate) fn translate_avs(raw: &str) -> AvsResponse {
    AVS_MAP
        .get(leading_code(raw))
        .copied()
        .unwrap_or(AvsResponse::Unknown)
}

pub(crate) fn translate_cvv(raw: &str) -> CvvResponse {
    CVV_MAP
        .get(leading_code(raw))
        .copied()
        .unwrap_or(CvvResponse::Unknown)
}

fn attempt_status(response: &AdyenPaymentResponse, flow_success: AttemptStatus) -> AttemptStatus {
    match (&response.result_code, response.status.as_deref()) {
        (Some(AdyenStatus::Authorised), _) => flow_success,
        (Some(AdyenStatus::Refused) | Some(AdyenStatus::Error), _) => AttemptStatus::Failure,
        (Some(AdyenStatus::Cancelled), _) => AttemptStatus::Voided,
        // Modification endpoints acknowledge with "received".
        (None, Some("received")) => flow_success,
        _ => AttemptStatus::Pending,
    }
}

fn build_payments_response(
    response: &AdyenPaymentResponse,
) -> PaymentsResponseData {
    let additional = response.additional_data.as_ref();
    let avs_raw = additional.and_then(|data| data.avs_result.clone());
    let cvv_raw = additional.and_then(|data| data.cvc_result.clone());
    let mut created_tokens = HashMap::new();
    if let Some(token) = additional.and_then(|data| data.recurring_detail_reference.clone()) {
        created_tokens.insert(TokenType::Payment, token);
    }
    PaymentsResponseData {
        resource_id: response
            .psp_reference
            .clone()
            .map(ResponseId::ConnectorTransactionId)
            .unwrap_or_default(),
        avs_response: avs_raw.as_deref().map(translate_avs).unwrap_or_default(),
        cvv_response: cvv_raw.as_deref().map(translate_cvv).unwrap_or_default(),
        avs_raw,
        cvv_raw,
        response_code: response
            .result_code
            .as_ref()
            .map(|code| format!("{code:?}")),
        network_transaction_id: additional.and_then(|data| data.network_tx_reference.clone()),
        created_tokens,
        rtau: None,
    }
}

fn build_decline(response: &AdyenPaymentResponse, http_code: u16) -> ErrorResponse {
    ErrorResponse {
        code: response
            .refusal_reason_code
            .clone()
            .unwrap_or_else(|| common_utils::consts::NO_ERROR_CODE.to_string()),
        message: response
            .refusal_reason
            .clone()
            .unwrap_or_else(|| common_utils::consts::NO_ERROR_MESSAGE.to_string()),
        reason: response.refusal_reason.clone(),
        status_code: http_code,
        connector_transaction_id: response.psp_reference.clone(),
        already_captured: false,
    }
}

impl<Flow, Request>
    TryFrom<ResponseRouterData<Flow, AdyenPaymentResponse, Request, PaymentsResponseData>>
    for RouterData<Flow, Request, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<Flow, AdyenPaymentResponse, Request, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let status = attempt_status(&item.response, item.flow_success);
        let response = if status == AttemptStatus::Failure {
            Err(build_decline(&item.response, item.http_code))
        } else {
            Ok(build_payments_response(&item.response))
        };
        Ok(Self {
            status,
            response,
            connector_http_status_code: Some(item.http_code),
            ..item.data
        })
    }
}

/// One notification item of an Adyen webhook batch.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenNotificationRequestItem {
    pub event_code: String,
    pub success: String,
    pub psp_reference: String,
    pub original_reference: Option<String>,
    pub merchant_reference: Option<String>,
    pub amount: Option<AdyenWebhookAmount>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AdyenWebhookAmount {
    pub currency: enums::Currency,
    pub value: MinorUnit,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdyenNotificationItem {
    pub notification_request_item: AdyenNotificationRequestItem,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenWebhookBody {
    pub live: Option<String>,
    pub notification_items: Vec<AdyenNotificationItem>,
}

pub(crate) fn translate_event(
    item: &AdyenNotificationRequestItem,
) -> Option<TransactionEvent> {
    let event_type = match item.event_code.as_str() {
        "CAPTURE" => TransactionEventType::Capture,
        "CANCELLATION" | "TECHNICAL_CANCEL" => TransactionEventType::Void,
        "REFUND" => TransactionEventType::Refund,
        _ => return None,
    };
    Some(TransactionEvent {
        event_type,
        transaction_reference: item.psp_reference.clone(),
        success: item.success == "true",
        merchant_reference: item.merchant_reference.clone(),
        amount: item.amount.as_ref().map(|amount| amount.value),
        currency: item.amount.as_ref().map(|amount| amount.currency),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avs_table_is_total_with_unknown_default() {
        for code in AVS_MAP.keys() {
            assert!(code.parse::<u8>().is_ok(), "non-numeric key {code}");
        }
        assert_eq!(translate_avs("99 made up"), AvsResponse::Unknown);
        assert_eq!(translate_avs(""), AvsResponse::Unknown);
        assert_eq!(
            translate_avs("7 Both postal code and address match"),
            AvsResponse::Match
        );
    }

    #[test]
    fn cvv_codes_use_leading_number() {
        assert_eq!(translate_cvv("1 Matches"), CvvResponse::Match);
        assert_eq!(translate_cvv("2 Does not match"), CvvResponse::NoMatch);
        assert_eq!(translate_cvv("bogus"), CvvResponse::Unknown);
    }

    #[test]
    fn capture_notification_translates() {
        let item = AdyenNotificationRequestItem {
            event_code: "CAPTURE".to_string(),
            success: "true".to_string(),
            psp_reference: "8837544667111111".to_string(),
            original_reference: Some("8837544667000000".to_string()),
            merchant_reference: Some("order-42".to_string()),
            amount: Some(AdyenWebhookAmount {
                currency: enums::Currency::USD,
                value: MinorUnit::new(1000),
            }),
        };
        let event = translate_event(&item).unwrap();
        assert_eq!(event.event_type, TransactionEventType::Capture);
        assert!(event.success);
        assert_eq!(event.merchant_reference.as_deref(), Some("order-42"));
    }

    #[test]
    fn unrelated_notification_is_skipped() {
        let item = AdyenNotificationRequestItem {
            event_code: "REPORT_AVAILABLE".to_string(),
            success: "true".to_string(),
            psp_reference: "x".to_string(),
            original_reference: None,
            merchant_reference: None,
            amount: None,
        };
        assert!(translate_event(&item).is_none());
    }
}
