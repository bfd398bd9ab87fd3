use std::{collections::HashMap, sync::LazyLock};

use cards::CardNumber;
use common_enums::{AttemptStatus, AvsResponse, Currency, CvvResponse, Environment};
use common_utils::types::StringMajorUnit;
use masking::{PeekInterface, Secret};
use payswitch_domain_models::{
    router_data::{ConnectorAuthType, ErrorResponse, RouterData},
    router_response_types::{PaymentsResponseData, ResponseId},
    types::{
        PaymentsAuthorizeRouterData, PaymentsCaptureRouterData, PaymentsVoidRouterData,
        RefundsRouterData,
    },
};
use payswitch_interfaces::errors;
use serde::{Deserialize, Serialize};

use crate::types::ResponseRouterData;

pub struct NmiRouterData<T> {
    pub amount: StringMajorUnit,
    pub router_data: T,
}

impl<T> From<(StringMajorUnit, T)> for NmiRouterData<T> {
    fn from((amount, router_data): (StringMajorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct NmiAuthType {
    pub(super) security_key: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for NmiAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        if let ConnectorAuthType::HeaderKey { api_key } = auth_type {
            Ok(Self {
                security_key: api_key.to_owned(),
            })
        } else {
            Err(errors::ConnectorError::FailedToObtainAuthType)?
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Auth,
    Capture,
    Void,
    Refund,
}

fn test_mode_flag<Flow, Request, Response>(
    router_data: &RouterData<Flow, Request, Response>,
) -> Option<&'static str> {
    let test = router_data
        .test_mode
        .unwrap_or(router_data.environment == Environment::Sandbox);
    test.then_some("enabled")
}

/// Gateway form payload for an auth-only transaction. The shared host
/// means test traffic is flagged per request instead of per endpoint.
#[derive(Debug, Serialize)]
pub struct NmiPaymentsRequest {
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    security_key: Secret<String>,
    ccnumber: CardNumber,
    ccexp: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvv: Option<Secret<String>>,
    amount: StringMajorUnit,
    currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    orderid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address1: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zip: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<common_enums::CountryAlpha2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_mode: Option<&'static str>,
}

impl TryFrom<&NmiRouterData<&PaymentsAuthorizeRouterData>> for NmiPaymentsRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &NmiRouterData<&PaymentsAuthorizeRouterData>,
    ) -> Result<Self, Self::Error> {
        let auth = NmiAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;
        let card = &request.card;
        let billing = &request.billing_address;

        Ok(Self {
            transaction_type: TransactionType::Auth,
            security_key: auth.security_key,
            ccnumber: card.card_number.clone(),
            ccexp: Secret::new(card.card_exp.month_year_compact()),
            cvv: (!card.card_cvc.peek().is_empty()).then(|| card.card_cvc.clone()),
            amount: item.amount.clone(),
            currency: request.currency,
            orderid: request
                .merchant_order_reference
                .clone()
                .or_else(|| request.client_transaction_reference.clone()),
            first_name: billing
                .first_name
                .clone()
                .or_else(|| card.card_holder_first_name.clone()),
            last_name: billing
                .last_name
                .clone()
                .or_else(|| card.card_holder_last_name.clone()),
            address1: billing.line1.clone(),
            city: billing.city.clone(),
            state: billing.state.clone(),
            zip: billing.zip.clone(),
            country: billing.country,
            test_mode: test_mode_flag(item.router_data),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NmiCaptureRequest {
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    security_key: Secret<String>,
    transactionid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<StringMajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_mode: Option<&'static str>,
}

impl TryFrom<&NmiRouterData<&PaymentsCaptureRouterData>> for NmiCaptureRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &NmiRouterData<&PaymentsCaptureRouterData>) -> Result<Self, Self::Error> {
        let auth = NmiAuthType::try_from(&item.router_data.connector_auth_type)?;
        Ok(Self {
            transaction_type: TransactionType::Capture,
            security_key: auth.security_key,
            transactionid: item.router_data.request.connector_transaction_id.clone(),
            amount: Some(item.amount.clone()),
            test_mode: test_mode_flag(item.router_data),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NmiVoidRequest {
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    security_key: Secret<String>,
    transactionid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_mode: Option<&'static str>,
}

impl TryFrom<&PaymentsVoidRouterData> for NmiVoidRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &PaymentsVoidRouterData) -> Result<Self, Self::Error> {
        let auth = NmiAuthType::try_from(&item.connector_auth_type)?;
        Ok(Self {
            transaction_type: TransactionType::Void,
            security_key: auth.security_key,
            transactionid: item.request.connector_transaction_id.clone(),
            test_mode: test_mode_flag(item),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct NmiRefundRequest {
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    security_key: Secret<String>,
    transactionid: String,
    amount: StringMajorUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_mode: Option<&'static str>,
}

impl TryFrom<&NmiRouterData<&RefundsRouterData>> for NmiRefundRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &NmiRouterData<&RefundsRouterData>) -> Result<Self, Self::Error> {
        let auth = NmiAuthType::try_from(&item.router_data.connector_auth_type)?;
        Ok(Self {
            transaction_type: TransactionType::Refund,
            security_key: auth.security_key,
            transactionid: item.router_data.request.connector_transaction_id.clone(),
            amount: item.amount.clone(),
            test_mode: test_mode_flag(item.router_data),
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub enum NmiResponseCode {
    #[serde(alias = "1")]
    Approved,
    #[serde(alias = "2")]
    Declined,
    #[serde(alias = "3")]
    Error,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StandardResponse {
    pub response: NmiResponseCode,
    pub responsetext: Option<String>,
    pub authcode: Option<String>,
    pub transactionid: String,
    pub avsresponse: Option<String>,
    pub cvvresponse: Option<String>,
    pub orderid: Option<String>,
    pub response_code: Option<String>,
}

static AVS_MAP: LazyLock<HashMap<&'static str, AvsResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("X", AvsResponse::Zip9MatchAddressMatch),
        ("Y", AvsResponse::Zip5MatchAddressMatch),
        ("D", AvsResponse::Match),
        ("M", AvsResponse::Match),
        ("A", AvsResponse::ZipNoMatchAddressMatch),
        ("B", AvsResponse::ZipUnverifiedAddressMatch),
        ("W", AvsResponse::Zip9MatchAddressNoMatch),
        ("Z", AvsResponse::Zip5MatchAddressNoMatch),
        ("P", AvsResponse::ZipMatchAddressUnverified),
        ("L", AvsResponse::ZipMatchAddressUnverified),
        ("N", AvsResponse::NoMatch),
        ("C", AvsResponse::NoMatch),
        ("U", AvsResponse::Unknown),
        ("G", AvsResponse::Unsupported),
        ("I", AvsResponse::Skipped),
        ("R", AvsResponse::Error),
        ("E", AvsResponse::Error),
        ("S", AvsResponse::Unsupported),
        ("0", AvsResponse::Unknown),
    ])
});

static CVV_MAP: LazyLock<HashMap<&'static str, CvvResponse>> = LazyLock::new(|| {
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

impl<Flow, Request>
    TryFrom<ResponseRouterData<Flow, StandardResponse, Request, PaymentsResponseData>>
    for RouterData<Flow, Request, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<Flow, StandardResponse, Request, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let response = &item.response;
        let avs_raw = response
            .avsresponse
            .clone()
            .filter(|code| !code.is_empty());
        let cvv_raw = response
            .cvvresponse
            .clone()
            .filter(|code| !code.is_empty());

        match response.response {
            NmiResponseCode::Approved => Ok(Self {
                status: item.flow_success,
                response: Ok(PaymentsResponseData {
                    resource_id: ResponseId::ConnectorTransactionId(
                        response.transactionid.clone(),
                    ),
                    avs_response: avs_raw
                        .as_deref()
                        .map(translate_avs)
                        .unwrap_or_default(),
                    cvv_response: cvv_raw
                        .as_deref()
                        .map(translate_cvv)
                        .unwrap_or_default(),
                    avs_raw,
                    cvv_raw,
                    response_code: response
                        .authcode
                        .clone()
                        .filter(|code| !code.is_empty())
                        .or_else(|| response.response_code.clone()),
                    ..Default::default()
                }),
                connector_http_status_code: Some(item.http_code),
                ..item.data
            }),
            NmiResponseCode::Declined | NmiResponseCode::Error => Ok(Self {
                status: AttemptStatus::Failure,
                response: Err(ErrorResponse {
                    code: response.response_code.clone().unwrap_or_else(|| {
                        common_utils::consts::NO_ERROR_CODE.to_string()
                    }),
                    message: response.responsetext.clone().unwrap_or_else(|| {
                        common_utils::consts::NO_ERROR_MESSAGE.to_string()
                    }),
                    reason: response.responsetext.clone(),
                    status_code: item.http_code,
                    connector_transaction_id: (!response.transactionid.is_empty())
                        .then(|| response.transactionid.clone()),
                    already_captured: false,
                }),
                connector_http_status_code: Some(item.http_code),
                ..item.data
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_response_parses_from_form_body() {
        let body = b"response=1&responsetext=SUCCESS&authcode=123456&transactionid=100001&avsresponse=Y&cvvresponse=M&orderid=ord-1&response_code=100";
        let parsed: StandardResponse = serde_urlencoded::from_bytes(body).unwrap();
        assert!(matches!(parsed.response, NmiResponseCode::Approved));
        assert_eq!(parsed.transactionid, "100001");
        assert_eq!(parsed.avsresponse.as_deref(), Some("Y"));
    }

    #[test]
    fn declined_response_parses() {
        let body = b"response=2&responsetext=DECLINE&authcode=&transactionid=100002&avsresponse=N&cvvresponse=N&orderid=&response_code=200";
        let parsed: StandardResponse = serde_urlencoded::from_bytes(body).unwrap();
        assert!(matches!(parsed.response, NmiResponseCode::Declined));
    }

    #[test]
    fn avs_table_covers_gateway_codes() {
        assert_eq!(translate_avs("X"), AvsResponse::Zip9MatchAddressMatch);
        assert_eq!(translate_avs("N"), AvsResponse::NoMatch);
        assert_eq!(translate_avs("0"), AvsResponse::Unknown);
        assert_eq!(translate_avs("zzz"), AvsResponse::Unknown);
    }

    #[test]
    fn cvv_table_covers_gateway_codes() {
        assert_eq!(translate_cvv("M"), CvvResponse::Match);
        assert_eq!(translate_cvv("S"), CvvResponse::RequiredButMissing);
    }

    #[test]
    fn approved_capture_converts_with_the_flow_status() {
        let data: PaymentsCaptureRouterData = RouterData::new(
            common_enums::Environment::Sandbox,
            payswitch_domain_models::router_data::ConnectorAuthType::HeaderKey {
                api_key: masking::Secret::new("key".to_string()),
            },
            payswitch_domain_models::router_request_types::PaymentsCaptureData {
                connector_transaction_id: "100001".to_string(),
                amount: Some(common_utils::types::MinorUnit::new(500)),
                currency: common_enums::Currency::USD,
                client_transaction_reference: None,
                options: std::collections::HashMap::new(),
            },
        );
        let body = b"response=1&responsetext=SUCCESS&authcode=123456&transactionid=100001&orderid=&response_code=100";
        let response: StandardResponse = serde_urlencoded::from_bytes(body).unwrap();

        let converted = RouterData::try_from(ResponseRouterData {
            response,
            data,
            http_code: 200,
            flow_success: AttemptStatus::Charged,
        })
        .unwrap();

        assert_eq!(converted.status, AttemptStatus::Charged);
        let payment = converted.response.unwrap();
        assert_eq!(
            payment.resource_id.get_connector_transaction_id(),
            Some("100001")
        );
        assert_eq!(payment.response_code.as_deref(), Some("123456"));
    }
}
