use std::{collections::HashMap, sync::LazyLock};

use cards::CardNumber;
use common_enums::{AttemptStatus, AvsResponse, Currency, CvvResponse};
use common_utils::types::StringMinorUnit;
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

use crate::{types::ResponseRouterData, utils};

const INDUSTRY_TYPE_ECOMMERCE: &str = "EC";
const TERMINAL_ID: &str = "001";

pub struct OrbitalRouterData<T> {
    pub amount: StringMinorUnit,
    pub router_data: T,
}

impl<T> From<(StringMinorUnit, T)> for OrbitalRouterData<T> {
    fn from((amount, router_data): (StringMinorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct OrbitalAuthType {
    pub(super) merchant_id: Secret<String>,
    pub(super) bin: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for OrbitalAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        if let ConnectorAuthType::BodyKey { api_key, key1 } = auth_type {
            Ok(Self {
                merchant_id: api_key.to_owned(),
                bin: key1.to_owned(),
            })
        } else {
            Err(errors::ConnectorError::FailedToObtainAuthType)?
        }
    }
}

fn currency_exponent(currency: Currency) -> &'static str {
    if currency.is_zero_decimal_currency() {
        "0"
    } else if currency.is_three_decimal_currency() {
        "3"
    } else {
        "2"
    }
}

/// `<Request><NewOrder>` for an auth-only order (MessageType A) or a
/// follow-on refund (MessageType R). Element order matters to the
/// gateway's DTD, so the struct fields mirror it.
#[derive(Debug, Serialize)]
#[serde(rename = "Request")]
pub struct OrbitalNewOrderEnvelope {
    #[serde(rename = "NewOrder")]
    new_order: NewOrder,
}

#[derive(Debug, Serialize)]
pub struct NewOrder {
    #[serde(rename = "IndustryType")]
    industry_type: &'static str,
    #[serde(rename = "MessageType")]
    message_type: &'static str,
    #[serde(rename = "BIN")]
    bin: Secret<String>,
    #[serde(rename = "MerchantID")]
    merchant_id: Secret<String>,
    #[serde(rename = "TerminalID")]
    terminal_id: &'static str,
    #[serde(rename = "AccountNum", skip_serializing_if = "Option::is_none")]
    account_num: Option<CardNumber>,
    #[serde(rename = "Exp", skip_serializing_if = "Option::is_none")]
    exp: Option<Secret<String>>,
    #[serde(rename = "CurrencyCode")]
    currency_code: &'static str,
    #[serde(rename = "CurrencyExponent")]
    currency_exponent: &'static str,
    #[serde(rename = "CardSecVal", skip_serializing_if = "Option::is_none")]
    card_sec_val: Option<Secret<String>>,
    #[serde(rename = "AVSzip", skip_serializing_if = "Option::is_none")]
    avs_zip: Option<Secret<String>>,
    #[serde(rename = "AVSaddress1", skip_serializing_if = "Option::is_none")]
    avs_address1: Option<Secret<String>>,
    #[serde(rename = "AVScity", skip_serializing_if = "Option::is_none")]
    avs_city: Option<String>,
    #[serde(rename = "AVSstate", skip_serializing_if = "Option::is_none")]
    avs_state: Option<Secret<String>>,
    #[serde(rename = "AVSname", skip_serializing_if = "Option::is_none")]
    avs_name: Option<Secret<String>>,
    #[serde(rename = "OrderID")]
    order_id: String,
    #[serde(rename = "Amount")]
    amount: StringMinorUnit,
    #[serde(rename = "TxRefNum", skip_serializing_if = "Option::is_none")]
    tx_ref_num: Option<String>,
}

impl TryFrom<&OrbitalRouterData<&PaymentsAuthorizeRouterData>> for OrbitalNewOrderEnvelope {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &OrbitalRouterData<&PaymentsAuthorizeRouterData>,
    ) -> Result<Self, Self::Error> {
        let auth = OrbitalAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;
        let card = &request.card;
        let billing = &request.billing_address;

        let order_id = request
            .client_transaction_reference
            .clone()
            .or_else(|| request.merchant_order_reference.clone())
            .ok_or_else(utils::missing_field_err("client_transaction_reference"))?;

        Ok(Self {
            new_order: NewOrder {
                industry_type: INDUSTRY_TYPE_ECOMMERCE,
                message_type: "A",
                bin: auth.bin,
                merchant_id: auth.merchant_id,
                terminal_id: TERMINAL_ID,
                account_num: Some(card.card_number.clone()),
                exp: Some(Secret::new(card.card_exp.month_year_compact())),
                currency_code: request.currency.iso_4217_numeric(),
                currency_exponent: currency_exponent(request.currency),
                card_sec_val: (!card.card_cvc.peek().is_empty())
                    .then(|| card.card_cvc.clone()),
                avs_zip: billing.zip.clone(),
                avs_address1: billing.line1.clone(),
                avs_city: billing.city.clone(),
                avs_state: billing.state.clone(),
                avs_name: billing.full_name(),
                order_id,
                amount: item.amount.clone(),
                tx_ref_num: None,
            },
        })
    }
}

impl TryFrom<&OrbitalRouterData<&RefundsRouterData>> for OrbitalNewOrderEnvelope {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &OrbitalRouterData<&RefundsRouterData>) -> Result<Self, Self::Error> {
        let auth = OrbitalAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;

        let order_id = request
            .client_transaction_reference
            .clone()
            .ok_or_else(utils::missing_field_err("client_transaction_reference"))?;

        Ok(Self {
            new_order: NewOrder {
                industry_type: INDUSTRY_TYPE_ECOMMERCE,
                message_type: "R",
                bin: auth.bin,
                merchant_id: auth.merchant_id,
                terminal_id: TERMINAL_ID,
                account_num: None,
                exp: None,
                currency_code: request.currency.iso_4217_numeric(),
                currency_exponent: currency_exponent(request.currency),
                card_sec_val: None,
                avs_zip: None,
                avs_address1: None,
                avs_city: None,
                avs_state: None,
                avs_name: None,
                order_id,
                amount: item.amount.clone(),
                tx_ref_num: Some(request.connector_transaction_id.clone()),
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename = "Request")]
pub struct OrbitalCaptureEnvelope {
    #[serde(rename = "MarkForCapture")]
    mark_for_capture: MarkForCapture,
}

#[derive(Debug, Serialize)]
pub struct MarkForCapture {
    #[serde(rename = "OrderID")]
    order_id: String,
    #[serde(rename = "Amount")]
    amount: StringMinorUnit,
    #[serde(rename = "BIN")]
    bin: Secret<String>,
    #[serde(rename = "MerchantID")]
    merchant_id: Secret<String>,
    #[serde(rename = "TerminalID")]
    terminal_id: &'static str,
    #[serde(rename = "TxRefNum")]
    tx_ref_num: String,
}

impl TryFrom<&OrbitalRouterData<&PaymentsCaptureRouterData>> for OrbitalCaptureEnvelope {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &OrbitalRouterData<&PaymentsCaptureRouterData>) -> Result<Self, Self::Error> {
        let auth = OrbitalAuthType::try_from(&item.router_data.connector_auth_type)?;
        let request = &item.router_data.request;

        let order_id = request
            .client_transaction_reference
            .clone()
            .ok_or_else(utils::missing_field_err("client_transaction_reference"))?;

        Ok(Self {
            mark_for_capture: MarkForCapture {
                order_id,
                amount: item.amount.clone(),
                bin: auth.bin,
                merchant_id: auth.merchant_id,
                terminal_id: TERMINAL_ID,
                tx_ref_num: request.connector_transaction_id.clone(),
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename = "Request")]
pub struct OrbitalReversalEnvelope {
    #[serde(rename = "Reversal")]
    reversal: Reversal,
}

#[derive(Debug, Serialize)]
pub struct Reversal {
    #[serde(rename = "TxRefNum")]
    tx_ref_num: String,
    #[serde(rename = "OrderID")]
    order_id: String,
    #[serde(rename = "BIN")]
    bin: Secret<String>,
    #[serde(rename = "MerchantID")]
    merchant_id: Secret<String>,
    #[serde(rename = "TerminalID")]
    terminal_id: &'static str,
}

impl TryFrom<&PaymentsVoidRouterData> for OrbitalReversalEnvelope {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &PaymentsVoidRouterData) -> Result<Self, Self::Error> {
        let auth = OrbitalAuthType::try_from(&item.connector_auth_type)?;

        let order_id = item
            .request
            .client_transaction_reference
            .clone()
            .ok_or_else(utils::missing_field_err("client_transaction_reference"))?;

        Ok(Self {
            reversal: Reversal {
                tx_ref_num: item.request.connector_transaction_id.clone(),
                order_id,
                bin: auth.bin,
                merchant_id: auth.merchant_id,
                terminal_id: TERMINAL_ID,
            },
        })
    }
}

/// `<Response>` envelope; exactly one of the children is present per
/// message type.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename = "Response")]
pub struct OrbitalResponse {
    #[serde(rename = "NewOrderResp")]
    pub new_order_resp: Option<OrbitalResult>,
    #[serde(rename = "MarkForCaptureResp")]
    pub mark_for_capture_resp: Option<OrbitalResult>,
    #[serde(rename = "ReversalResp")]
    pub reversal_resp: Option<OrbitalResult>,
    #[serde(rename = "QuickResp")]
    pub quick_resp: Option<OrbitalResult>,
}

impl OrbitalResponse {
    pub fn result(&self) -> Option<&OrbitalResult> {
        self.new_order_resp
            .as_ref()
            .or(self.mark_for_capture_resp.as_ref())
            .or(self.reversal_resp.as_ref())
            .or(self.quick_resp.as_ref())
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OrbitalResult {
    #[serde(rename = "ProcStatus")]
    pub proc_status: String,
    #[serde(rename = "ApprovalStatus")]
    pub approval_status: Option<String>,
    #[serde(rename = "RespCode")]
    pub resp_code: Option<String>,
    #[serde(rename = "AVSRespCode")]
    pub avs_resp_code: Option<String>,
    #[serde(rename = "CVV2RespCode")]
    pub cvv2_resp_code: Option<String>,
    #[serde(rename = "TxRefNum")]
    pub tx_ref_num: Option<String>,
    #[serde(rename = "AuthCode")]
    pub auth_code: Option<String>,
    #[serde(rename = "StatusMsg")]
    pub status_msg: Option<String>,
}

static AVS_MAP: LazyLock<HashMap<&'static str, AvsResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("1", AvsResponse::Skipped),
        ("2", AvsResponse::Match),
        ("3", AvsResponse::Zip9MatchAddressNoMatch),
        ("4", AvsResponse::Zip5MatchAddressNoMatch),
        ("5", AvsResponse::ZipNoMatchAddressMatch),
        ("6", AvsResponse::NoMatch),
        ("7", AvsResponse::Unsupported),
        ("8", AvsResponse::Unsupported),
        ("9", AvsResponse::Error),
        ("A", AvsResponse::ZipNoMatchAddressMatch),
        ("B", AvsResponse::Error),
        ("C", AvsResponse::Unsupported),
        ("D", AvsResponse::Unknown),
        ("H", AvsResponse::Match),
        ("G", AvsResponse::Unsupported),
        ("M2", AvsResponse::Match),
        ("M3", AvsResponse::NoMatch),
        ("R", AvsResponse::Error),
    ])
});

static CVV_MAP: LazyLock<HashMap<&'static str, CvvResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("M", CvvResponse::Match),
        ("N", CvvResponse::NoMatch),
        ("P", CvvResponse::NotProcessed),
        ("S", CvvResponse::RequiredButMissing),
        ("U", CvvResponse::Unsupported),
        ("I", CvvResponse::Skipped),
        ("Y", CvvResponse::Match),
    ])
});

pub(crate) fn translate_avs(raw: &str) -> AvsResponse {
    AVS_MAP.get(raw).copied().unwrap_or(AvsResponse::Unknown)
}

pub(crate) fn translate_cvv(raw: &str) -> CvvResponse {
    CVV_MAP.get(raw).copied().unwrap_or(CvvResponse::Unknown)
}

fn is_approved(result: &OrbitalResult) -> bool {
    result.proc_status == "0" && result.approval_status.as_deref() != Some("0")
}

impl<Flow, Request>
    TryFrom<ResponseRouterData<Flow, OrbitalResponse, Request, PaymentsResponseData>>
    for RouterData<Flow, Request, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<Flow, OrbitalResponse, Request, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let result = item
            .response
            .result()
            .ok_or(errors::ConnectorError::ResponseHandlingFailed)?;
        let transaction_id = result.tx_ref_num.clone();
        // The gateway pads fixed-width response codes with spaces.
        let avs_raw = result
            .avs_resp_code
            .as_deref()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());
        let cvv_raw = result
            .cvv2_resp_code
            .as_deref()
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        if is_approved(result) {
            Ok(Self {
                status: item.flow_success,
                response: Ok(PaymentsResponseData {
                    resource_id: transaction_id
                        .map(ResponseId::ConnectorTransactionId)
                        .unwrap_or_default(),
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
                    response_code: result
                        .auth_code
                        .clone()
                        .or_else(|| result.resp_code.clone()),
                    ..Default::default()
                }),
                connector_http_status_code: Some(item.http_code),
                ..item.data
            })
        } else {
            Ok(Self {
                status: AttemptStatus::Failure,
                response: Err(ErrorResponse {
                    code: result
                        .resp_code
                        .clone()
                        .unwrap_or_else(|| result.proc_status.clone()),
                    message: result.status_msg.clone().unwrap_or_else(|| {
                        common_utils::consts::NO_ERROR_MESSAGE.to_string()
                    }),
                    reason: result.status_msg.clone(),
                    status_code: item.http_code,
                    connector_transaction_id: transaction_id,
                    already_captured: false,
                }),
                connector_http_status_code: Some(item.http_code),
                ..item.data
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use common_utils::ext_traits::XmlExt;

    use super::*;

    #[test]
    fn approved_new_order_response_parses() {
        let body = r#"<Response><NewOrderResp><ProcStatus>0</ProcStatus><ApprovalStatus>1</ApprovalStatus><RespCode>00</RespCode><AVSRespCode>H </AVSRespCode><CVV2RespCode>M</CVV2RespCode><TxRefNum>5FCCE4</TxRefNum><AuthCode>tst554</AuthCode></NewOrderResp></Response>"#;
        let parsed: OrbitalResponse = body.parse_xml("OrbitalResponse").unwrap();
        let result = parsed.result().unwrap();
        assert!(is_approved(result));
        assert_eq!(result.tx_ref_num.as_deref(), Some("5FCCE4"));
    }

    #[test]
    fn declined_new_order_response_parses() {
        let body = r#"<Response><NewOrderResp><ProcStatus>0</ProcStatus><ApprovalStatus>0</ApprovalStatus><RespCode>05</RespCode><StatusMsg>Do Not Honor</StatusMsg><TxRefNum>5FCCE5</TxRefNum></NewOrderResp></Response>"#;
        let parsed: OrbitalResponse = body.parse_xml("OrbitalResponse").unwrap();
        assert!(!is_approved(parsed.result().unwrap()));
    }

    #[test]
    fn gateway_error_has_nonzero_proc_status() {
        let body = r#"<Response><QuickResp><ProcStatus>841</ProcStatus><StatusMsg>Error validating card/account number range</StatusMsg></QuickResp></Response>"#;
        let parsed: OrbitalResponse = body.parse_xml("OrbitalResponse").unwrap();
        assert!(!is_approved(parsed.result().unwrap()));
    }

    #[test]
    fn avs_numeric_codes_translate() {
        assert_eq!(translate_avs("2"), AvsResponse::Match);
        assert_eq!(translate_avs("6"), AvsResponse::NoMatch);
        assert_eq!(translate_avs("zz"), AvsResponse::Unknown);
    }

    #[test]
    fn currency_exponent_tracks_currency() {
        assert_eq!(currency_exponent(Currency::USD), "2");
        assert_eq!(currency_exponent(Currency::JPY), "0");
        assert_eq!(currency_exponent(Currency::BHD), "3");
    }
}
