use std::{collections::HashMap, sync::LazyLock};

use common_enums::{
    enums, AttemptStatus, AvsResponse, CvvResponse, TransactionEventType,
};
use common_utils::{
    consts,
    ext_traits::truncate_string,
    types::StringMajorUnit,
};
use masking::Secret;
use payswitch_domain_models::{
    router_data::{ConnectorAuthType, ErrorResponse, RouterData},
    router_response_types::{
        PaymentsResponseData, ResponseId, SettlementState, TransactionEvent,
        TransactionSyncResponseData,
    },
    types::{
        PaymentsAuthorizeRouterData, PaymentsCaptureRouterData, PaymentsVoidRouterData,
        RefundsRouterData, TransactionSyncRouterData,
    },
};
use payswitch_interfaces::errors;
use serde::{Deserialize, Serialize};

use crate::{types::ResponseRouterData, utils};

const MAX_ORDER_DESCRIPTION_LENGTH: usize = 255;

pub struct AuthorizedotnetRouterData<T> {
    pub amount: StringMajorUnit,
    pub router_data: T,
}

impl<T> From<(StringMajorUnit, T)> for AuthorizedotnetRouterData<T> {
    fn from((amount, router_data): (StringMajorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct AuthorizedotnetAuthType {
    pub name: Secret<String>,
    pub transaction_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for AuthorizedotnetAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                name: api_key.clone(),
                transaction_key: key1.clone(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAuthentication {
    pub name: Secret<String>,
    pub transaction_key: Secret<String>,
}

impl From<&AuthorizedotnetAuthType> for MerchantAuthentication {
    fn from(auth: &AuthorizedotnetAuthType) -> Self {
        Self {
            name: auth.name.clone(),
            transaction_key: auth.transaction_key.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardDetails {
    pub card_number: cards::CardNumber,
    /// `YYYY-MM`.
    pub expiration_date: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_code: Option<Secret<String>>,
}

/// Refunds echo the card as `"XXXX" + last4` instead of a full PAN.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedCardDetails {
    pub card_number: Secret<String>,
    pub expiration_date: Secret<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CardPayment {
    Full(CreditCardDetails),
    Masked(MaskedCardDetails),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub credit_card: CardPayment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    AuthOnlyTransaction,
    PriorAuthCaptureTransaction,
    VoidTransaction,
    RefundTransaction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Secret<String>>,
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
#[serde(rename_all = "camelCase")]
pub struct ProcessingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subsequent_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stored_credentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_first_subsequent_auth: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsequentAuthInformation {
    pub original_network_trans_id: String,
    pub reason: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<StringMajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<enums::Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_trans_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<BillTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_options: Option<ProcessingOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsequent_auth_information: Option<SubsequentAuthInformation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBody {
    pub merchant_authentication: MerchantAuthentication,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    pub transaction_request: TransactionRequest,
}

/// Top level JSON envelope, `{"createTransactionRequest": {...}}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub create_transaction_request: TransactionBody,
}

impl TryFrom<&AuthorizedotnetRouterData<&PaymentsAuthorizeRouterData>>
    for CreateTransactionRequest
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &AuthorizedotnetRouterData<&PaymentsAuthorizeRouterData>,
    ) -> Result<Self, Self::Error> {
        let auth = AuthorizedotnetAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;
        let card = &request.card;

        let payment = PaymentDetails {
            credit_card: CardPayment::Full(CreditCardDetails {
                card_number: card.card_number.clone(),
                expiration_date: Secret::new(card.card_exp.year_month_dashed()),
                card_code: {
                    use masking::PeekInterface;
                    (!card.card_cvc.peek().is_empty()).then(|| card.card_cvc.clone())
                },
            }),
        };

        let billing = &request.billing_address;
        let bill_to = BillTo {
            first_name: billing.first_name.clone().or_else(|| {
                card.card_holder_first_name.clone()
            }),
            last_name: billing.last_name.clone().or_else(|| {
                card.card_holder_last_name.clone()
            }),
            address: billing.line1.clone(),
            city: billing.city.clone(),
            state: billing.state.clone(),
            zip: billing.zip.clone(),
            country: billing.country,
        };

        let order = request.merchant_order_reference.as_ref().map(|reference| Order {
            invoice_number: Some(truncate_string(reference, 20)),
            description: Some(truncate_string(reference, MAX_ORDER_DESCRIPTION_LENGTH)),
        });

        let (processing_options, subsequent_auth_information) =
            cof_options(request.processing_initiator, request.previous_network_transaction_id.as_deref());

        Ok(Self {
            create_transaction_request: TransactionBody {
                merchant_authentication: MerchantAuthentication::from(&auth),
                ref_id: request.client_transaction_reference.clone(),
                transaction_request: TransactionRequest {
                    transaction_type: TransactionType::AuthOnlyTransaction,
                    amount: Some(item.amount.clone()),
                    currency_code: Some(request.currency),
                    payment: Some(payment),
                    ref_trans_id: None,
                    order,
                    bill_to: Some(bill_to),
                    processing_options,
                    subsequent_auth_information,
                },
            },
        })
    }
}

fn cof_options(
    initiator: Option<enums::ProcessingInitiator>,
    previous_network_transaction_id: Option<&str>,
) -> (Option<ProcessingOptions>, Option<SubsequentAuthInformation>) {
    match initiator {
        None => (None, None),
        Some(
            enums::ProcessingInitiator::InitialCardOnFile
            | enums::ProcessingInitiator::InitialRecurring,
        ) => (
            Some(ProcessingOptions {
                is_subsequent_auth: None,
                is_stored_credentials: Some(true),
                is_first_subsequent_auth: Some(true),
            }),
            None,
        ),
        Some(enums::ProcessingInitiator::StoredCardholderInitiated) => (
            Some(ProcessingOptions {
                is_subsequent_auth: None,
                is_stored_credentials: Some(true),
                is_first_subsequent_auth: None,
            }),
            None,
        ),
        Some(
            enums::ProcessingInitiator::StoredMerchantInitiated
            | enums::ProcessingInitiator::FollowingRecurring,
        ) => (
            Some(ProcessingOptions {
                is_subsequent_auth: Some(true),
                is_stored_credentials: Some(true),
                is_first_subsequent_auth: None,
            }),
            previous_network_transaction_id.map(|id| SubsequentAuthInformation {
                original_network_trans_id: id.to_string(),
                reason: "resubmission",
            }),
        ),
    }
}

impl TryFrom<&AuthorizedotnetRouterData<&PaymentsCaptureRouterData>> for CreateTransactionRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &AuthorizedotnetRouterData<&PaymentsCaptureRouterData>,
    ) -> Result<Self, Self::Error> {
        let auth = AuthorizedotnetAuthType::try_from(&item.router_data.connector_auth_type)?;
        Ok(Self {
            create_transaction_request: TransactionBody {
                merchant_authentication: MerchantAuthentication::from(&auth),
                ref_id: item.router_data.request.client_transaction_reference.clone(),
                transaction_request: TransactionRequest {
                    transaction_type: TransactionType::PriorAuthCaptureTransaction,
                    amount: Some(item.amount.clone()),
                    currency_code: None,
                    payment: None,
                    ref_trans_id: Some(item.router_data.request.connector_transaction_id.clone()),
                    order: None,
                    bill_to: None,
                    processing_options: None,
                    subsequent_auth_information: None,
                },
            },
        })
    }
}

impl TryFrom<&PaymentsVoidRouterData> for CreateTransactionRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &PaymentsVoidRouterData) -> Result<Self, Self::Error> {
        let auth = AuthorizedotnetAuthType::try_from(&item.connector_auth_type)?;
        Ok(Self {
            create_transaction_request: TransactionBody {
                merchant_authentication: MerchantAuthentication::from(&auth),
                ref_id: item.request.client_transaction_reference.clone(),
                transaction_request: TransactionRequest {
                    transaction_type: TransactionType::VoidTransaction,
                    amount: None,
                    currency_code: None,
                    payment: None,
                    ref_trans_id: Some(item.request.connector_transaction_id.clone()),
                    order: None,
                    bill_to: None,
                    processing_options: None,
                    subsequent_auth_information: None,
                },
            },
        })
    }
}

/// Refund requests echo the masked card the processor expects,
/// `"XXXX" + last4`.
impl TryFrom<&AuthorizedotnetRouterData<&RefundsRouterData>> for CreateTransactionRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &AuthorizedotnetRouterData<&RefundsRouterData>,
    ) -> Result<Self, Self::Error> {
        let auth = AuthorizedotnetAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;
        let last4 = request
            .card_last4
            .clone()
            .ok_or_else(utils::missing_field_err("refund.card_last4"))?;
        Ok(Self {
            create_transaction_request: TransactionBody {
                merchant_authentication: MerchantAuthentication::from(&auth),
                ref_id: request.client_transaction_reference.clone(),
                transaction_request: TransactionRequest {
                    transaction_type: TransactionType::RefundTransaction,
                    amount: Some(item.amount.clone()),
                    currency_code: Some(request.currency),
                    payment: Some(PaymentDetails {
                        credit_card: CardPayment::Masked(MaskedCardDetails {
                            card_number: Secret::new(format!("XXXX{last4}")),
                            expiration_date: Secret::new("XXXX".to_string()),
                        }),
                    }),
                    ref_trans_id: Some(request.connector_transaction_id.clone()),
                    order: None,
                    bill_to: None,
                    processing_options: None,
                    subsequent_auth_information: None,
                },
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailsBody {
    pub merchant_authentication: MerchantAuthentication,
    pub trans_id: String,
}

/// `{"getTransactionDetailsRequest": {...}}`, the settlement-state query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetailsRequest {
    pub get_transaction_details_request: TransactionDetailsBody,
}

impl TryFrom<&TransactionSyncRouterData> for TransactionDetailsRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &TransactionSyncRouterData) -> Result<Self, Self::Error> {
        let auth = AuthorizedotnetAuthType::try_from(&item.connector_auth_type)?;
        Ok(Self {
            get_transaction_details_request: TransactionDetailsBody {
                merchant_authentication: MerchantAuthentication::from(&auth),
                trans_id: item.request.connector_transaction_id.clone(),
            },
        })
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Error,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ResponseMessage {
    pub code: String,
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessages {
    pub result_code: ResultCode,
    pub message: Vec<ResponseMessage>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponseError {
    pub error_code: String,
    pub error_text: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub response_code: Option<String>,
    pub auth_code: Option<String>,
    pub avs_result_code: Option<String>,
    pub cvv_result_code: Option<String>,
    pub trans_id: Option<String>,
    pub network_trans_id: Option<String>,
    pub errors: Option<Vec<TransactionResponseError>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedotnetPaymentsResponse {
    pub transaction_response: Option<TransactionResponse>,
    pub messages: ResponseMessages,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncTransaction {
    pub trans_id: String,
    pub transaction_status: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedotnetSyncResponse {
    pub transaction: Option<SyncTransaction>,
    pub messages: ResponseMessages,
}

/// The processor rejects captures of already-captured authorizations with
/// this code.
pub(crate) const ALREADY_CAPTURED_CODE: &str = "E00027";

/// Approved is `"1"`; `"2"` declined, `"3"` error, `"4"` held for review.
fn is_approved(transaction: &TransactionResponse) -> bool {
    transaction.response_code.as_deref() == Some("1")
}

pub(crate) static AVS_MAP: LazyLock<HashMap<&'static str, AvsResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("A", AvsResponse::ZipNoMatchAddressMatch),
        ("B", AvsResponse::ZipUnverifiedAddressMatch),
        ("E", AvsResponse::Error),
        ("G", AvsResponse::Unsupported),
        ("N", AvsResponse::NoMatch),
        ("P", AvsResponse::Skipped),
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
        ("M", CvvResponse::Match),
        ("N", CvvResponse::NoMatch),
        ("P", CvvResponse::NotProcessed),
        ("S", CvvResponse::RequiredButMissing),
        ("U", CvvResponse::Unsupported),
    ])
});

pub(crate) fn translate_avs(raw: &str) -> AvsResponse {
    AVS_MAP.get(raw).copied().unwrap_or(AvsResponse::Unknown)
}

pub(crate) fn translate_cvv(raw: &str) -> CvvResponse {
    CVV_MAP.get(raw).copied().unwrap_or(CvvResponse::Unknown)
}

fn first_error(response: &AuthorizedotnetPaymentsResponse) -> (String, String) {
    if let Some(error) = response
        .transaction_response
        .as_ref()
        .and_then(|transaction| transaction.errors.as_ref())
        .and_then(|errors| errors.first())
    {
        return (error.error_code.clone(), error.error_text.clone());
    }
    response
        .messages
        .message
        .first()
        .map(|message| (message.code.clone(), message.text.clone()))
        .unwrap_or_else(|| {
            (
                consts::NO_ERROR_CODE.to_string(),
                consts::NO_ERROR_MESSAGE.to_string(),
            )
        })
}

impl<Flow, Request>
    TryFrom<
        ResponseRouterData<Flow, AuthorizedotnetPaymentsResponse, Request, PaymentsResponseData>,
    > for RouterData<Flow, Request, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<
            Flow,
            AuthorizedotnetPaymentsResponse,
            Request,
            PaymentsResponseData,
        >,
    ) -> Result<Self, Self::Error> {
        let approved = item.response.messages.result_code == ResultCode::Ok
            && item
                .response
                .transaction_response
                .as_ref()
                .is_some_and(is_approved);
        let (status, response) = if approved {
            let transaction = item
                .response
                .transaction_response
                .as_ref()
                .ok_or(errors::ConnectorError::ResponseHandlingFailed)?;
            let avs_raw = transaction.avs_result_code.clone();
            let cvv_raw = transaction.cvv_result_code.clone();
            (
                item.flow_success,
                Ok(PaymentsResponseData {
                    resource_id: transaction
                        .trans_id
                        .clone()
                        .map(ResponseId::ConnectorTransactionId)
                        .unwrap_or_default(),
                    avs_response: avs_raw.as_deref().map(translate_avs).unwrap_or_default(),
                    cvv_response: cvv_raw.as_deref().map(translate_cvv).unwrap_or_default(),
                    avs_raw,
                    cvv_raw,
                    response_code: transaction.response_code.clone(),
                    network_transaction_id: transaction.network_trans_id.clone(),
                    created_tokens: HashMap::new(),
                    rtau: None,
                }),
            )
        } else {
            let (code, message) = first_error(&item.response);
            (
                AttemptStatus::Failure,
                Err(ErrorResponse {
                    already_captured: code == ALREADY_CAPTURED_CODE,
                    code,
                    message: message.clone(),
                    reason: Some(message),
                    status_code: item.http_code,
                    connector_transaction_id: item
                        .response
                        .transaction_response
                        .as_ref()
                        .and_then(|transaction| transaction.trans_id.clone()),
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

impl
    TryFrom<
        ResponseRouterData<
            payswitch_domain_models::router_flow_types::TSync,
            AuthorizedotnetSyncResponse,
            payswitch_domain_models::router_request_types::TransactionSyncData,
            TransactionSyncResponseData,
        >,
    > for TransactionSyncRouterData
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<
            payswitch_domain_models::router_flow_types::TSync,
            AuthorizedotnetSyncResponse,
            payswitch_domain_models::router_request_types::TransactionSyncData,
            TransactionSyncResponseData,
        >,
    ) -> Result<Self, Self::Error> {
        let response = match (&item.response.messages.result_code, &item.response.transaction) {
            (ResultCode::Ok, Some(transaction)) => Ok(TransactionSyncResponseData {
                resource_id: ResponseId::ConnectorTransactionId(transaction.trans_id.clone()),
                settlement_state: settlement_state(&transaction.transaction_status),
            }),
            _ => {
                let (code, message) = item
                    .response
                    .messages
                    .message
                    .first()
                    .map(|message| (message.code.clone(), message.text.clone()))
                    .unwrap_or_else(|| {
                        (
                            consts::NO_ERROR_CODE.to_string(),
                            consts::NO_ERROR_MESSAGE.to_string(),
                        )
                    });
                Err(ErrorResponse {
                    code,
                    message: message.clone(),
                    reason: Some(message),
                    status_code: item.http_code,
                    connector_transaction_id: None,
                    already_captured: false,
                })
            }
        };
        Ok(Self {
            response,
            connector_http_status_code: Some(item.http_code),
            ..item.data
        })
    }
}

pub(crate) fn settlement_state(raw: &str) -> SettlementState {
    match raw {
        "settledSuccessfully" | "refundSettledSuccessfully" => SettlementState::Settled,
        "capturedPendingSettlement" | "refundPendingSettlement" => {
            SettlementState::CapturedPendingSettlement
        }
        _ => SettlementState::NotSettled,
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedotnetWebhookPayload {
    pub id: Option<String>,
    pub response_code: Option<i64>,
    pub merchant_reference_id: Option<String>,
    pub auth_amount: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedotnetWebhookBody {
    pub notification_id: String,
    pub event_type: String,
    pub payload: AuthorizedotnetWebhookPayload,
}

pub(crate) fn translate_webhook(
    body: &AuthorizedotnetWebhookBody,
) -> Option<TransactionEvent> {
    let event_type = if body.event_type.contains(".capture.") {
        TransactionEventType::Capture
    } else if body.event_type.contains(".void.") {
        TransactionEventType::Void
    } else if body.event_type.contains(".refund.") {
        TransactionEventType::Refund
    } else {
        return None;
    };
    Some(TransactionEvent {
        event_type,
        transaction_reference: body.payload.id.clone().unwrap_or_default(),
        success: body.payload.response_code.unwrap_or(0) == 1,
        merchant_reference: body.payload.merchant_reference_id.clone(),
        amount: None,
        currency: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avs_x_is_nine_digit_full_match() {
        assert_eq!(translate_avs("X"), AvsResponse::Zip9MatchAddressMatch);
        assert_eq!(translate_avs("Y"), AvsResponse::Zip5MatchAddressMatch);
        assert_eq!(translate_avs("?"), AvsResponse::Unknown);
    }

    #[test]
    fn cvv_table_has_unknown_default() {
        assert_eq!(translate_cvv("M"), CvvResponse::Match);
        assert_eq!(translate_cvv(""), CvvResponse::Unknown);
    }

    #[test]
    fn settlement_states_classify() {
        assert_eq!(
            settlement_state("settledSuccessfully"),
            SettlementState::Settled
        );
        assert_eq!(
            settlement_state("capturedPendingSettlement"),
            SettlementState::CapturedPendingSettlement
        );
        assert_eq!(
            settlement_state("authorizedPendingCapture"),
            SettlementState::NotSettled
        );
    }

    #[test]
    fn webhook_capture_event_translates() {
        let body = AuthorizedotnetWebhookBody {
            notification_id: "abc".to_string(),
            event_type: "net.authorize.payment.capture.created".to_string(),
            payload: AuthorizedotnetWebhookPayload {
                id: Some("60123456789".to_string()),
                response_code: Some(1),
                merchant_reference_id: Some("inv-9".to_string()),
                auth_amount: Some(12.5),
            },
        };
        let event = translate_webhook(&body).unwrap();
        assert_eq!(event.event_type, TransactionEventType::Capture);
        assert!(event.success);
        assert_eq!(event.transaction_reference, "60123456789");
    }
}
