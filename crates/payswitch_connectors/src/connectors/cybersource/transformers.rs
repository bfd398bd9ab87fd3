use std::{collections::HashMap, sync::LazyLock};

use cards::{CardExpiration, CardNumber};
use common_enums::{
    enums, AttemptStatus, AvsResponse, CardNetwork, Currency, CvvResponse, RtauStatus,
};
use common_utils::{
    ext_traits::safe_str,
    pii::Email,
    types::{MinorUnit, StringMajorUnit, StringMajorUnitForConnector},
};
use masking::{PeekInterface, Secret};
use payswitch_domain_models::{
    router_data::{ConnectorAuthType, ErrorResponse, RouterData},
    router_response_types::{PaymentsResponseData, ResponseId, RtauResponse},
    types::{
        PaymentsAuthorizeRouterData, PaymentsCaptureRouterData, PaymentsVoidRouterData,
        RefundsRouterData,
    },
};
use payswitch_interfaces::errors;
use serde::{Deserialize, Serialize};

use crate::{
    types::ResponseRouterData,
    utils::{self, AddressData},
};

pub struct CybersourceRouterData<T> {
    pub amount: StringMajorUnit,
    pub router_data: T,
}

impl<T> From<(StringMajorUnit, T)> for CybersourceRouterData<T> {
    fn from((amount, router_data): (StringMajorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

pub struct CybersourceAuthType {
    pub(super) api_key: Secret<String>,
    pub(super) merchant_account: Secret<String>,
    pub(super) api_secret: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for CybersourceAuthType {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        if let ConnectorAuthType::SignatureKey {
            api_key,
            key1,
            api_secret,
        } = auth_type
        {
            Ok(Self {
                api_key: api_key.to_owned(),
                merchant_account: key1.to_owned(),
                api_secret: api_secret.to_owned(),
            })
        } else {
            Err(errors::ConnectorError::FailedToObtainAuthType)?
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsRequest {
    client_reference_information: ClientReferenceInformation,
    processing_information: ProcessingInformation,
    payment_information: PaymentInformation,
    order_information: OrderInformationWithBill,
    #[serde(skip_serializing_if = "Option::is_none")]
    consumer_authentication_information: Option<ConsumerAuthenticationInformation>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientReferenceInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingInformation {
    capture: bool,
    commerce_indicator: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    authorization_options: Option<AuthorizationOptions>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationOptions {
    initiator: Initiator,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Initiator {
    #[serde(rename = "type")]
    initiator_type: InitiatorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    credential_stored_on_file: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stored_credential_used: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_initiated_transaction: Option<MerchantInitiatedTransaction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InitiatorType {
    Customer,
    Merchant,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInitiatedTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_transaction_id: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInformation {
    card: CardDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    number: CardNumber,
    expiration_month: Secret<String>,
    expiration_year: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_code: Option<Secret<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    card_type: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInformationWithBill {
    amount_details: AmountDetails,
    bill_to: BillTo,
    #[serde(skip_serializing_if = "Option::is_none")]
    ship_to: Option<ShipTo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line_items: Option<Vec<LineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invoice_details: Option<InvoiceDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountDetails {
    total_amount: StringMajorUnit,
    currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax_amount: Option<StringMajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duty_amount: Option<StringMajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    freight_amount: Option<StringMajorUnit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillTo {
    first_name: Secret<String>,
    last_name: Secret<String>,
    address1: Secret<String>,
    locality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    administrative_area: Option<Secret<String>>,
    postal_code: Secret<String>,
    country: enums::CountryAlpha2,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Email>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipTo {
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    product_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_of_measure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit_price: Option<StringMajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_amount: Option<StringMajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax_amount: Option<StringMajorUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commodity_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_amount: Option<StringMajorUnit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    purchase_order_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerAuthenticationInformation {
    #[serde(skip_serializing_if = "Option::is_none")]
    cavv: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xid: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ucaf_authentication_data: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directory_server_transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pa_specification_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eci_raw: Option<String>,
}

/// Cybersource numeric card type codes.
fn card_type_code(network: CardNetwork) -> Option<&'static str> {
    match network {
        CardNetwork::Visa => Some("001"),
        CardNetwork::Mastercard => Some("002"),
        CardNetwork::AmericanExpress => Some("003"),
        CardNetwork::Discover => Some("004"),
        CardNetwork::JCB => Some("007"),
        CardNetwork::UnionPay => Some("062"),
        CardNetwork::Unknown => None,
    }
}

/// Commerce indicator for network-token payments, keyed by card network.
fn token_commerce_indicator(network: CardNetwork) -> &'static str {
    match network {
        CardNetwork::AmericanExpress => "aesk",
        CardNetwork::Discover => "dipb",
        CardNetwork::Mastercard => "spa",
        _ => "internet",
    }
}

fn cof_authorization_options(
    initiator: Option<enums::ProcessingInitiator>,
    previous_network_transaction_id: Option<&str>,
) -> Option<AuthorizationOptions> {
    let initiator = match initiator? {
        enums::ProcessingInitiator::InitialCardOnFile
        | enums::ProcessingInitiator::InitialRecurring => Initiator {
            initiator_type: InitiatorType::Customer,
            credential_stored_on_file: Some(true),
            stored_credential_used: None,
            merchant_initiated_transaction: None,
        },
        enums::ProcessingInitiator::StoredCardholderInitiated => Initiator {
            initiator_type: InitiatorType::Customer,
            credential_stored_on_file: None,
            stored_credential_used: Some(true),
            merchant_initiated_transaction: None,
        },
        enums::ProcessingInitiator::StoredMerchantInitiated => Initiator {
            initiator_type: InitiatorType::Merchant,
            credential_stored_on_file: None,
            stored_credential_used: Some(true),
            merchant_initiated_transaction: Some(MerchantInitiatedTransaction {
                reason: Some("unscheduled"),
                previous_transaction_id: previous_network_transaction_id
                    .map(|id| Secret::new(id.to_string())),
            }),
        },
        enums::ProcessingInitiator::FollowingRecurring => Initiator {
            initiator_type: InitiatorType::Merchant,
            credential_stored_on_file: None,
            stored_credential_used: Some(true),
            merchant_initiated_transaction: Some(MerchantInitiatedTransaction {
                reason: Some("recurring"),
                previous_transaction_id: previous_network_transaction_id
                    .map(|id| Secret::new(id.to_string())),
            }),
        },
    };
    Some(AuthorizationOptions { initiator })
}

fn major(
    amount: Option<MinorUnit>,
    currency: Currency,
) -> Result<Option<StringMajorUnit>, error_stack::Report<errors::ConnectorError>> {
    amount
        .map(|value| utils::convert_amount(&StringMajorUnitForConnector, value, currency))
        .transpose()
}

impl TryFrom<&CybersourceRouterData<&PaymentsAuthorizeRouterData>> for PaymentsRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &CybersourceRouterData<&PaymentsAuthorizeRouterData>,
    ) -> Result<Self, Self::Error> {
        let request = &item.router_data.request;
        let card = &request.card;
        let network = card.network();

        let payment_information = PaymentInformation {
            card: CardDetails {
                number: card.card_number.clone(),
                expiration_month: Secret::new(card.card_exp.two_digit_month()),
                expiration_year: Secret::new(card.card_exp.four_digit_year()),
                security_code: (!card.card_cvc.peek().is_empty())
                    .then(|| card.card_cvc.clone()),
                card_type: card_type_code(network),
            },
        };

        let billing = &request.billing_address;
        let bill_to = BillTo {
            first_name: billing
                .first_name
                .clone()
                .or_else(|| card.card_holder_first_name.clone())
                .ok_or_else(utils::missing_field_err("billing.first_name"))?,
            last_name: billing
                .last_name
                .clone()
                .or_else(|| card.card_holder_last_name.clone())
                .ok_or_else(utils::missing_field_err("billing.last_name"))?,
            address1: billing.get_line1()?,
            locality: billing.get_city()?,
            administrative_area: billing.state.clone(),
            postal_code: billing.get_zip()?,
            country: billing.get_country()?,
            email: billing.email.clone(),
        };

        let (ship_to, line_items, tax_amount, duty_amount, freight_amount, invoice_details) =
            match &request.level3 {
                None => (None, None, None, None, None, None),
                Some(level3) => {
                    let items = level3
                        .line_items
                        .iter()
                        .map(|line| {
                            Ok(LineItem {
                                product_code: line.product_code.clone(),
                                product_name: line.description.clone(),
                                quantity: line.quantity,
                                unit_of_measure: line.unit_of_measure.clone(),
                                unit_price: major(line.unit_price, request.currency)?,
                                total_amount: major(line.total_amount, request.currency)?,
                                tax_amount: major(line.tax_amount, request.currency)?,
                                commodity_code: line.commodity_code.clone(),
                                discount_amount: major(line.discount_amount, request.currency)?,
                            })
                        })
                        .collect::<Result<Vec<_>, Self::Error>>()?;
                    (
                        Some(ShipTo {
                            postal_code: level3.destination_postal_code.clone(),
                            country: level3.destination_country_code.clone(),
                        }),
                        (!items.is_empty()).then_some(items),
                        major(level3.tax_amount, request.currency)?,
                        major(level3.duty_amount, request.currency)?,
                        major(level3.freight_amount, request.currency)?,
                        level3.customer_reference.clone().map(|reference| {
                            InvoiceDetails {
                                purchase_order_number: Some(reference),
                            }
                        }),
                    )
                }
            };

        // A network-token cryptogram rides in the consumer authentication
        // block; Mastercard wants it in ucafAuthenticationData, everyone
        // else in cavv. 3-DS results use the same block.
        let (commerce_indicator, consumer_authentication_information) =
            match (&request.payment_cryptogram, &request.three_ds) {
                (Some(cryptogram), _) => {
                    let (cavv, ucaf) = if network == CardNetwork::Mastercard {
                        (None, Some(cryptogram.clone()))
                    } else {
                        (Some(cryptogram.clone()), None)
                    };
                    (
                        token_commerce_indicator(network),
                        Some(ConsumerAuthenticationInformation {
                            cavv,
                            xid: None,
                            ucaf_authentication_data: ucaf,
                            directory_server_transaction_id: None,
                            pa_specification_version: None,
                            eci_raw: request.eci.clone(),
                        }),
                    )
                }
                (None, Some(three_ds)) => (
                    if network == CardNetwork::Mastercard {
                        "spa"
                    } else {
                        "vbv"
                    },
                    Some(ConsumerAuthenticationInformation {
                        cavv: three_ds.cavv.clone(),
                        xid: three_ds.xid.clone(),
                        ucaf_authentication_data: None,
                        directory_server_transaction_id: three_ds.ds_transaction_id.clone(),
                        pa_specification_version: three_ds.version.clone(),
                        eci_raw: three_ds.eci.clone().or_else(|| request.eci.clone()),
                    }),
                ),
                (None, None) => ("internet", None),
            };

        Ok(Self {
            client_reference_information: ClientReferenceInformation {
                code: request.client_transaction_reference.clone(),
            },
            processing_information: ProcessingInformation {
                capture: false,
                commerce_indicator,
                authorization_options: cof_authorization_options(
                    request.processing_initiator,
                    request.previous_network_transaction_id.as_deref(),
                ),
            },
            payment_information,
            order_information: OrderInformationWithBill {
                amount_details: AmountDetails {
                    total_amount: item.amount.clone(),
                    currency: request.currency,
                    tax_amount,
                    duty_amount,
                    freight_amount,
                },
                bill_to,
                ship_to,
                line_items,
                invoice_details,
            },
            consumer_authentication_information,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    client_reference_information: ClientReferenceInformation,
    order_information: OrderInformationAmount,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInformationAmount {
    amount_details: CaptureAmountDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureAmountDetails {
    total_amount: StringMajorUnit,
    currency: Currency,
}

impl TryFrom<&CybersourceRouterData<&PaymentsCaptureRouterData>> for CaptureRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: &CybersourceRouterData<&PaymentsCaptureRouterData>,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            client_reference_information: ClientReferenceInformation {
                code: item.router_data.request.client_transaction_reference.clone(),
            },
            order_information: OrderInformationAmount {
                amount_details: CaptureAmountDetails {
                    total_amount: item.amount.clone(),
                    currency: item.router_data.request.currency,
                },
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoidRequest {
    client_reference_information: ClientReferenceInformation,
    reversal_information: ReversalInformation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReversalInformation {
    reason: &'static str,
}

impl TryFrom<&PaymentsVoidRouterData> for VoidRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &PaymentsVoidRouterData) -> Result<Self, Self::Error> {
        Ok(Self {
            client_reference_information: ClientReferenceInformation {
                code: item.request.client_transaction_reference.clone(),
            },
            reversal_information: ReversalInformation {
                reason: "cancellation",
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    client_reference_information: ClientReferenceInformation,
    order_information: OrderInformationAmount,
}

impl TryFrom<&CybersourceRouterData<&RefundsRouterData>> for RefundRequest {
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(item: &CybersourceRouterData<&RefundsRouterData>) -> Result<Self, Self::Error> {
        Ok(Self {
            client_reference_information: ClientReferenceInformation {
                code: item.router_data.request.client_transaction_reference.clone(),
            },
            order_information: OrderInformationAmount {
                amount_details: CaptureAmountDetails {
                    total_amount: item.amount.clone(),
                    currency: item.router_data.request.currency,
                },
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CybersourcePaymentStatus {
    Authorized,
    AuthorizedPendingReview,
    AuthorizedRiskDeclined,
    Pending,
    Transmitted,
    Reversed,
    Voided,
    Declined,
    InvalidRequest,
    Rejected,
    ServerError,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CybersourcePaymentsResponse {
    pub id: String,
    pub status: Option<CybersourcePaymentStatus>,
    pub client_reference_information: Option<ClientReferenceInformation>,
    pub processor_information: Option<ProcessorInformation>,
    pub account_updater_information: Option<AccountUpdaterInformation>,
    pub error_information: Option<CybersourceErrorInformation>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorInformation {
    pub approval_code: Option<String>,
    pub network_transaction_id: Option<String>,
    pub response_code: Option<String>,
    pub avs: Option<AvsInformation>,
    pub card_verification: Option<CardVerification>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvsInformation {
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVerification {
    pub result_code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdaterInformation {
    pub status: Option<String>,
    pub new_card_number: Option<Secret<String>>,
    pub new_expiration_month: Option<String>,
    pub new_expiration_year: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CybersourceErrorInformation {
    pub reason: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CybersourceErrorResponse {
    pub reason: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
}

static AVS_MAP: LazyLock<HashMap<&'static str, AvsResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("A", AvsResponse::ZipNoMatchAddressMatch),
        ("B", AvsResponse::ZipUnverifiedAddressMatch),
        ("C", AvsResponse::NoMatch),
        ("D", AvsResponse::Match),
        ("E", AvsResponse::Error),
        ("F", AvsResponse::NameNoMatch),
        ("G", AvsResponse::Unsupported),
        ("H", AvsResponse::NameNoMatch),
        ("I", AvsResponse::Skipped),
        ("K", AvsResponse::NameMatchZipNoMatchAddressNoMatch),
        ("L", AvsResponse::NameMatchZipMatchAddressNoMatch),
        ("M", AvsResponse::Match),
        ("N", AvsResponse::NoMatch),
        ("O", AvsResponse::NameMatchZipNoMatchAddressMatch),
        ("P", AvsResponse::ZipMatchAddressUnverified),
        ("R", AvsResponse::Error),
        ("S", AvsResponse::Unsupported),
        ("T", AvsResponse::NameNoMatch),
        ("U", AvsResponse::Unknown),
        ("W", AvsResponse::Zip9MatchAddressNoMatch),
        ("X", AvsResponse::Zip9MatchAddressMatch),
        ("Y", AvsResponse::Zip5MatchAddressMatch),
        ("Z", AvsResponse::Zip5MatchAddressNoMatch),
        ("1", AvsResponse::Skipped),
    ])
});

static CVV_MAP: LazyLock<HashMap<&'static str, CvvResponse>> = LazyLock::new(|| {
    HashMap::from([
        ("M", CvvResponse::Match),
        ("N", CvvResponse::NoMatch),
        ("P", CvvResponse::NotProcessed),
        ("S", CvvResponse::RequiredButMissing),
        ("U", CvvResponse::Unsupported),
        ("X", CvvResponse::NoResponse),
        ("D", CvvResponse::Suspicious),
        ("1", CvvResponse::Unsupported),
        ("2", CvvResponse::Unknown),
        ("3", CvvResponse::Skipped),
    ])
});

pub(crate) fn translate_avs(raw: &str) -> AvsResponse {
    AVS_MAP.get(raw).copied().unwrap_or(AvsResponse::Unknown)
}

pub(crate) fn translate_cvv(raw: &str) -> CvvResponse {
    CVV_MAP.get(raw).copied().unwrap_or(CvvResponse::Unknown)
}

fn translate_rtau_status(raw: &str) -> RtauStatus {
    match raw {
        "NEW_ACCOUNT" | "NEW_EXPIRY" => RtauStatus::CardChanged,
        "EXPIRED_CARD" => RtauStatus::CardExpired,
        "CLOSED_ACCOUNT" => RtauStatus::CloseAccount,
        "CONTACT_CUSTOMER" => RtauStatus::ContactCardAccountHolder,
        _ => RtauStatus::Unknown,
    }
}

fn translate_rtau(info: &AccountUpdaterInformation) -> Option<RtauResponse> {
    let status = info.status.as_deref().map(translate_rtau_status)?;
    let (updated_card_last4, updated_card_bin) = match &info.new_card_number {
        Some(pan) => {
            let pan = pan.peek();
            (
                (pan.len() >= 4).then(|| pan[pan.len() - 4..].to_string()),
                (pan.len() >= 6).then(|| pan[..6].to_string()),
            )
        }
        None => (None, None),
    };
    let updated_expiration = match (&info.new_expiration_month, &info.new_expiration_year) {
        (Some(month), Some(year)) => {
            match (month.parse::<u8>(), year.parse::<u16>()) {
                (Ok(month), Ok(year)) => CardExpiration::new(month, year).ok(),
                _ => None,
            }
        }
        _ => None,
    };
    Some(RtauResponse {
        status,
        updated_card_last4,
        updated_card_bin,
        updated_expiration,
    })
}

fn is_approved(status: &CybersourcePaymentStatus) -> bool {
    matches!(
        status,
        CybersourcePaymentStatus::Authorized
            | CybersourcePaymentStatus::AuthorizedPendingReview
            | CybersourcePaymentStatus::Pending
            | CybersourcePaymentStatus::Transmitted
            | CybersourcePaymentStatus::Reversed
            | CybersourcePaymentStatus::Voided
    )
}

impl<Flow, Request>
    TryFrom<ResponseRouterData<Flow, CybersourcePaymentsResponse, Request, PaymentsResponseData>>
    for RouterData<Flow, Request, PaymentsResponseData>
{
    type Error = error_stack::Report<errors::ConnectorError>;

    fn try_from(
        item: ResponseRouterData<Flow, CybersourcePaymentsResponse, Request, PaymentsResponseData>,
    ) -> Result<Self, Self::Error> {
        let response = &item.response;
        let approved = response.status.as_ref().is_some_and(is_approved);
        let processor = response.processor_information.as_ref();
        let avs_raw = processor
            .and_then(|info| info.avs.as_ref())
            .and_then(|avs| avs.code.clone());
        let cvv_raw = processor
            .and_then(|info| info.card_verification.as_ref())
            .and_then(|cvv| cvv.result_code.clone());

        if approved {
            Ok(Self {
                status: item.flow_success,
                response: Ok(PaymentsResponseData {
                    resource_id: ResponseId::ConnectorTransactionId(response.id.clone()),
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
                    response_code: processor.and_then(|info| {
                        info.approval_code
                            .clone()
                            .or_else(|| info.response_code.clone())
                    }),
                    network_transaction_id: processor
                        .and_then(|info| info.network_transaction_id.clone()),
                    rtau: response
                        .account_updater_information
                        .as_ref()
                        .and_then(translate_rtau),
                    ..Default::default()
                }),
                connector_http_status_code: Some(item.http_code),
                ..item.data
            })
        } else {
            let error = response.error_information.as_ref();
            Ok(Self {
                status: AttemptStatus::Failure,
                response: Err(ErrorResponse {
                    code: error
                        .and_then(|info| info.reason.clone())
                        .or_else(|| {
                            processor.and_then(|info| info.response_code.clone())
                        })
                        .unwrap_or_else(|| {
                            common_utils::consts::NO_ERROR_CODE.to_string()
                        }),
                    message: safe_str(error.and_then(|info| info.message.as_ref()))
                        .to_string(),
                    reason: error.and_then(|info| info.message.clone()),
                    status_code: item.http_code,
                    connector_transaction_id: Some(response.id.clone()),
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
    use super::*;

    #[test]
    fn avs_code_y_is_full_match() {
        assert_eq!(translate_avs("Y"), AvsResponse::Zip5MatchAddressMatch);
        assert_eq!(translate_avs("X"), AvsResponse::Zip9MatchAddressMatch);
        assert_eq!(translate_avs("??"), AvsResponse::Unknown);
    }

    #[test]
    fn cvv_code_m_is_match() {
        assert_eq!(translate_cvv("M"), CvvResponse::Match);
        assert_eq!(translate_cvv("D"), CvvResponse::Suspicious);
    }

    #[test]
    fn rtau_new_account_carries_updated_fields() {
        let info = AccountUpdaterInformation {
            status: Some("NEW_ACCOUNT".to_string()),
            new_card_number: Some(Secret::new("4111111111111111".to_string())),
            new_expiration_month: Some("03".to_string()),
            new_expiration_year: Some("2030".to_string()),
        };
        let rtau = translate_rtau(&info).unwrap();
        assert_eq!(rtau.status, RtauStatus::CardChanged);
        assert_eq!(rtau.updated_card_last4.as_deref(), Some("1111"));
        assert_eq!(rtau.updated_card_bin.as_deref(), Some("411111"));
        assert!(rtau.updated_expiration.is_some());
    }

    #[test]
    fn rtau_closed_account_maps_without_card_data() {
        let info = AccountUpdaterInformation {
            status: Some("CLOSED_ACCOUNT".to_string()),
            new_card_number: None,
            new_expiration_month: None,
            new_expiration_year: None,
        };
        let rtau = translate_rtau(&info).unwrap();
        assert_eq!(rtau.status, RtauStatus::CloseAccount);
        assert!(rtau.updated_card_last4.is_none());
    }

    #[test]
    fn card_type_codes_follow_network() {
        assert_eq!(card_type_code(CardNetwork::Visa), Some("001"));
        assert_eq!(card_type_code(CardNetwork::Unknown), None);
    }

    #[test]
    fn cryptogram_lands_in_the_consumer_authentication_block() {
        use std::str::FromStr;

        use common_utils::types::{AmountConvertor, MinorUnit};
        use payswitch_domain_models::{
            address::Address,
            payment_method_data::Card,
            router_request_types::PaymentsAuthorizeData,
        };

        let data = RouterData::new(
            enums::Environment::Sandbox,
            ConnectorAuthType::SignatureKey {
                api_key: Secret::new("key-id".to_string()),
                key1: Secret::new("merchant".to_string()),
                api_secret: Secret::new("c2VjcmV0".to_string()),
            },
            PaymentsAuthorizeData {
                amount: MinorUnit::new(1099),
                currency: Currency::USD,
                card: Card {
                    card_number: CardNumber::from_str("5555555555554444").unwrap(),
                    card_exp: CardExpiration::new(3, 2030).unwrap(),
                    card_cvc: Secret::new("123".to_string()),
                    card_holder_first_name: Some(Secret::new("Ada".to_string())),
                    card_holder_last_name: Some(Secret::new("Lovelace".to_string())),
                    card_network: None,
                },
                billing_address: Address {
                    line1: Some(Secret::new("1 Main St".to_string())),
                    city: Some("Columbus".to_string()),
                    zip: Some(Secret::new("43123".to_string())),
                    country: Some(enums::CountryAlpha2::US),
                    email: Some("buyer@example.com".parse().unwrap()),
                    ..Address::default()
                },
                shipping_address: None,
                client_transaction_reference: Some("attempt-1".to_string()),
                merchant_order_reference: None,
                channel: None,
                eci: Some("02".to_string()),
                payment_cryptogram: Some(Secret::new("AAAA".to_string())),
                three_ds: None,
                level3: None,
                processing_initiator: None,
                previous_network_transaction_id: None,
                options: HashMap::new(),
            },
        );
        let amount = StringMajorUnitForConnector
            .convert(MinorUnit::new(1099), Currency::USD)
            .unwrap();
        let request =
            PaymentsRequest::try_from(&CybersourceRouterData::from((amount, &data))).unwrap();

        let serialized = serde_json::to_value(&request).unwrap();
        assert_eq!(
            serialized["processingInformation"]["commerceIndicator"],
            "spa"
        );
        assert_eq!(
            serialized["consumerAuthenticationInformation"]["ucafAuthenticationData"],
            "AAAA"
        );
        assert!(serialized["consumerAuthenticationInformation"]["cavv"].is_null());
        assert_eq!(
            serialized["orderInformation"]["billTo"]["email"],
            "buyer@example.com"
        );
    }

    #[test]
    fn token_commerce_indicator_follows_network() {
        assert_eq!(token_commerce_indicator(CardNetwork::Mastercard), "spa");
        assert_eq!(
            token_commerce_indicator(CardNetwork::AmericanExpress),
            "aesk"
        );
        assert_eq!(token_commerce_indicator(CardNetwork::Visa), "internet");
    }
}
