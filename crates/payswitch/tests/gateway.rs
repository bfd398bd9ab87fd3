//! End-to-end gateway tests against a canned transport.

use std::{
    collections::{HashMap, VecDeque},
    str::FromStr,
    sync::{Arc, Mutex},
};

use cards::{CardExpiration, CardNumber};
use common_enums::{AvsResponse, Currency, CvvResponse, Environment, TransactionEventType};
use common_utils::{
    consts,
    errors::CustomResult,
    request::Request,
    types::MinorUnit,
};
use masking::{ExposeInterface, Secret};
use payswitch::{
    client::Connection,
    gateways::{Gateway, PaymentGateway},
    Card, ConnectorAuthType, GatewayError, PaymentsAuthorizeData, PaymentsCaptureData,
    RefundsData,
};
use payswitch_domain_models::address::Address;
use payswitch_interfaces::{errors::HttpClientError, types::Response};
use tokio_util::sync::CancellationToken;

/// Transport that replays queued responses and records what was sent.
#[derive(Clone, Default)]
struct CannedConnection {
    requests: Arc<Mutex<Vec<Request>>>,
    responses: Arc<Mutex<VecDeque<Response>>>,
}

impl CannedConnection {
    fn push(&self, response: Response) {
        self.responses
            .lock()
            .expect("poisoned lock")
            .push_back(response);
    }

    fn sent(&self) -> Vec<Request> {
        std::mem::take(&mut *self.requests.lock().expect("poisoned lock"))
    }
}

#[async_trait::async_trait]
impl Connection for CannedConnection {
    async fn send_request(&self, request: Request) -> CustomResult<Response, HttpClientError> {
        self.requests.lock().expect("poisoned lock").push(request);
        self.responses
            .lock()
            .expect("poisoned lock")
            .pop_front()
            .ok_or_else(|| error_stack::report!(HttpClientError::RequestNotSent))
    }
}

/// Transport that never answers, for cancellation tests.
struct StalledConnection;

#[async_trait::async_trait]
impl Connection for StalledConnection {
    async fn send_request(&self, _request: Request) -> CustomResult<Response, HttpClientError> {
        std::future::pending().await
    }
}

fn json_response(status_code: u16, body: serde_json::Value) -> Response {
    Response {
        headers: None,
        response: bytes::Bytes::from(body.to_string()),
        status_code,
    }
}

fn authorizedotnet_gateway(connection: CannedConnection) -> impl PaymentGateway {
    Gateway::authorizedotnet(
        ConnectorAuthType::BodyKey {
            api_key: Secret::new("login-id".to_string()),
            key1: Secret::new("transaction-key".to_string()),
        },
        Environment::Sandbox,
        None,
    )
    .expect("client construction")
    .with_connection(Box::new(connection))
}

fn nmi_gateway(connection: CannedConnection) -> impl PaymentGateway {
    Gateway::nmi(
        ConnectorAuthType::HeaderKey {
            api_key: Secret::new("security-key".to_string()),
        },
        Environment::Sandbox,
        None,
    )
    .expect("client construction")
    .with_connection(Box::new(connection))
}

fn authorize_request() -> PaymentsAuthorizeData {
    PaymentsAuthorizeData {
        amount: MinorUnit::new(1099),
        currency: Currency::USD,
        card: Card {
            card_number: CardNumber::from_str("4111111111111111").expect("valid test pan"),
            card_exp: CardExpiration::new(3, 2030).expect("valid expiration"),
            card_cvc: Secret::new("123".to_string()),
            card_holder_first_name: Some(Secret::new("Ada".to_string())),
            card_holder_last_name: Some(Secret::new("Lovelace".to_string())),
            card_network: None,
        },
        billing_address: Address {
            line1: Some(Secret::new("1 Main St".to_string())),
            city: Some("Columbus".to_string()),
            zip: Some(Secret::new("43123".to_string())),
            ..Address::default()
        },
        shipping_address: None,
        client_transaction_reference: Some("attempt-1".to_string()),
        merchant_order_reference: Some("order-1".to_string()),
        channel: None,
        eci: None,
        payment_cryptogram: None,
        three_ds: None,
        level3: None,
        processing_initiator: None,
        previous_network_transaction_id: None,
        options: HashMap::new(),
    }
}

fn refund_request() -> RefundsData {
    RefundsData {
        connector_transaction_id: "60123".to_string(),
        amount: MinorUnit::new(1099),
        currency: Currency::USD,
        card_last4: Some("1111".to_string()),
        client_transaction_reference: Some("attempt-1".to_string()),
        options: HashMap::new(),
    }
}

fn approved_payment_body() -> serde_json::Value {
    serde_json::json!({
        "transactionResponse": {
            "responseCode": "1",
            "authCode": "ABC123",
            "avsResultCode": "Y",
            "cvvResultCode": "M",
            "transId": "60123",
            "networkTransId": "NTID0001",
            "errors": null
        },
        "messages": {
            "resultCode": "Ok",
            "message": [{ "code": "I00001", "text": "Successful." }]
        }
    })
}

fn sync_body(transaction_status: &str) -> serde_json::Value {
    serde_json::json!({
        "transaction": {
            "transId": "60123",
            "transactionStatus": transaction_status
        },
        "messages": {
            "resultCode": "Ok",
            "message": [{ "code": "I00001", "text": "Successful." }]
        }
    })
}

fn body_text(request: &Request) -> String {
    request
        .body
        .as_ref()
        .expect("request body")
        .get_inner_value()
        .expose()
}

#[tokio::test]
async fn authorize_approval_normalizes_verification_results() {
    let connection = CannedConnection::default();
    connection.push(json_response(200, approved_payment_body()));
    let gateway = authorizedotnet_gateway(connection.clone());

    let result = gateway
        .authorize(authorize_request())
        .await
        .expect("authorize");

    assert!(result.success);
    assert_eq!(result.transaction_reference, "60123");
    assert_eq!(result.avs_result, AvsResponse::Zip5MatchAddressMatch);
    assert_eq!(result.cvv_result, CvvResponse::Match);
    assert_eq!(result.avs_raw.as_deref(), Some("Y"));
    assert_eq!(result.network_transaction_id.as_deref(), Some("NTID0001"));
    assert_eq!(result.status_code, 200);
    assert!(result.headers.is_none());

    let sent = connection.sent();
    assert_eq!(sent.len(), 1);
    assert!(body_text(&sent[0]).contains("authOnlyTransaction"));
}

#[tokio::test]
async fn authorize_decline_surfaces_processor_error() {
    let connection = CannedConnection::default();
    connection.push(json_response(
        200,
        serde_json::json!({
            "transactionResponse": {
                "responseCode": "2",
                "transId": "60124",
                "errors": [{
                    "errorCode": "2",
                    "errorText": "This transaction has been declined."
                }]
            },
            "messages": {
                "resultCode": "Ok",
                "message": [{ "code": "I00001", "text": "Successful." }]
            }
        }),
    ));
    let gateway = authorizedotnet_gateway(connection);

    let result = gateway
        .authorize(authorize_request())
        .await
        .expect("authorize");

    assert!(!result.success);
    assert_eq!(result.transaction_reference, "60124");
    assert_eq!(result.error_code.as_deref(), Some("2"));
    assert_eq!(
        result.error_message.as_deref(),
        Some("This transaction has been declined.")
    );
    assert!(!result.already_captured);
}

#[tokio::test]
async fn partial_capture_sends_the_reduced_amount() {
    let connection = CannedConnection::default();
    connection.push(json_response(200, approved_payment_body()));
    let gateway = authorizedotnet_gateway(connection.clone());

    let result = gateway
        .capture(PaymentsCaptureData {
            connector_transaction_id: "60123".to_string(),
            amount: Some(MinorUnit::new(500)),
            currency: Currency::USD,
            client_transaction_reference: None,
            options: HashMap::new(),
        })
        .await
        .expect("capture");

    assert!(result.success);
    let sent = connection.sent();
    let body = body_text(&sent[0]);
    assert!(body.contains("priorAuthCaptureTransaction"));
    assert!(body.contains("\"amount\":\"5.00\""));
}

#[tokio::test]
async fn void_releases_an_authorization() {
    let connection = CannedConnection::default();
    connection.push(json_response(200, approved_payment_body()));
    let gateway = authorizedotnet_gateway(connection.clone());

    let result = gateway
        .void(payswitch::PaymentsVoidData {
            connector_transaction_id: "60123".to_string(),
            client_transaction_reference: None,
            options: HashMap::new(),
        })
        .await
        .expect("void");

    assert!(result.success);
    assert!(body_text(&connection.sent()[0]).contains("voidTransaction"));
}

#[tokio::test]
async fn duplicate_capture_is_flagged() {
    let connection = CannedConnection::default();
    connection.push(json_response(
        200,
        serde_json::json!({
            "transactionResponse": null,
            "messages": {
                "resultCode": "Error",
                "message": [{
                    "code": "E00027",
                    "text": "The transaction was unsuccessful."
                }]
            }
        }),
    ));
    let gateway = authorizedotnet_gateway(connection);

    let result = gateway
        .capture(PaymentsCaptureData {
            connector_transaction_id: "60123".to_string(),
            amount: Some(MinorUnit::new(1099)),
            currency: Currency::USD,
            client_transaction_reference: None,
            options: HashMap::new(),
        })
        .await
        .expect("capture");

    assert!(!result.success);
    assert!(result.already_captured);
    assert_eq!(result.error_code.as_deref(), Some("E00027"));
}

#[tokio::test]
async fn response_headers_propagate_only_on_request() {
    let mut headers = http::HeaderMap::new();
    headers.insert("request-id", http::HeaderValue::from_static("req-77"));

    let connection = CannedConnection::default();
    connection.push(Response {
        headers: Some(headers.clone()),
        response: bytes::Bytes::from(approved_payment_body().to_string()),
        status_code: 200,
    });
    connection.push(Response {
        headers: Some(headers),
        response: bytes::Bytes::from(approved_payment_body().to_string()),
        status_code: 200,
    });
    let gateway = authorizedotnet_gateway(connection);

    let silent = gateway
        .authorize(authorize_request())
        .await
        .expect("authorize");
    assert!(silent.headers.is_none());

    let mut request = authorize_request();
    request.options.insert(
        consts::INCLUDE_RESPONSE_HEADERS_OPTION.to_string(),
        serde_json::Value::Bool(true),
    );
    let chatty = gateway.authorize(request).await.expect("authorize");
    let returned = chatty.headers.expect("headers requested");
    assert_eq!(
        returned.get("request-id").and_then(|v| v.to_str().ok()),
        Some("req-77")
    );
}

#[tokio::test]
async fn proxy_failure_header_short_circuits() {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        consts::PROXY_ERROR_HEADER,
        http::HeaderValue::from_static("detokenization failed"),
    );

    let connection = CannedConnection::default();
    connection.push(Response {
        headers: Some(headers),
        response: bytes::Bytes::from_static(b""),
        status_code: 200,
    });
    let gateway = authorizedotnet_gateway(connection);

    let error = gateway
        .authorize(authorize_request())
        .await
        .expect_err("proxy failure");
    assert_eq!(
        error.current_context(),
        &GatewayError::ProxyError("detokenization failed".to_string())
    );
}

#[tokio::test]
async fn refund_before_settlement_becomes_void() {
    let connection = CannedConnection::default();
    connection.push(json_response(200, sync_body("capturedPendingSettlement")));
    connection.push(json_response(200, approved_payment_body()));
    let gateway = authorizedotnet_gateway(connection.clone());

    let result = gateway.refund(refund_request()).await.expect("refund");

    assert!(result.success);
    let sent = connection.sent();
    assert_eq!(sent.len(), 2);
    assert!(body_text(&sent[0]).contains("getTransactionDetailsRequest"));
    assert!(body_text(&sent[1]).contains("voidTransaction"));
}

#[tokio::test]
async fn refund_after_settlement_stays_a_refund() {
    let connection = CannedConnection::default();
    connection.push(json_response(200, sync_body("settledSuccessfully")));
    connection.push(json_response(200, approved_payment_body()));
    let gateway = authorizedotnet_gateway(connection.clone());

    let result = gateway.refund(refund_request()).await.expect("refund");

    assert!(result.success);
    let sent = connection.sent();
    assert_eq!(sent.len(), 2);
    assert!(body_text(&sent[1]).contains("refundTransaction"));
}

#[tokio::test]
async fn settlement_lookup_failure_is_the_refund_failure() {
    let connection = CannedConnection::default();
    connection.push(json_response(
        200,
        serde_json::json!({
            "transaction": null,
            "messages": {
                "resultCode": "Error",
                "message": [{
                    "code": "E00040",
                    "text": "The record cannot be found."
                }]
            }
        }),
    ));
    let gateway = authorizedotnet_gateway(connection.clone());

    let result = gateway.refund(refund_request()).await.expect("refund");

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some("E00040"));
    assert_eq!(connection.sent().len(), 1);
}

#[tokio::test]
async fn refund_without_settlement_query_goes_straight_out() {
    let connection = CannedConnection::default();
    connection.push(Response {
        headers: None,
        response: bytes::Bytes::from_static(
            b"response=1&responsetext=SUCCESS&authcode=123456&transactionid=7788&orderid=attempt-1&response_code=100",
        ),
        status_code: 200,
    });
    let gateway = nmi_gateway(connection.clone());

    let result = gateway.refund(refund_request()).await.expect("refund");

    assert!(result.success);
    assert_eq!(result.transaction_reference, "7788");
    let sent = connection.sent();
    assert_eq!(sent.len(), 1);
    assert!(body_text(&sent[0]).contains("type=refund"));
}

#[tokio::test]
async fn cancellation_aborts_an_in_flight_call() {
    let gateway = Gateway::authorizedotnet(
        ConnectorAuthType::BodyKey {
            api_key: Secret::new("login-id".to_string()),
            key1: Secret::new("transaction-key".to_string()),
        },
        Environment::Sandbox,
        None,
    )
    .expect("client construction")
    .with_connection(Box::new(StalledConnection));

    let token = CancellationToken::new();
    token.cancel();

    let error = gateway
        .authorize_with_cancellation(authorize_request(), token)
        .await
        .expect_err("cancelled");
    assert_eq!(error.current_context(), &GatewayError::Cancelled);
}

#[tokio::test]
async fn webhook_body_translates_to_events() {
    let gateway = authorizedotnet_gateway(CannedConnection::default());

    let events = gateway
        .parse_webhook(
            serde_json::json!({
                "notificationId": "note-1",
                "eventType": "net.authorize.payment.capture.created",
                "payload": {
                    "id": "60123",
                    "responseCode": 1,
                    "merchantReferenceId": "order-1"
                }
            })
            .to_string()
            .as_bytes(),
        )
        .expect("webhook");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, TransactionEventType::Capture);
    assert_eq!(events[0].transaction_reference, "60123");
    assert!(events[0].success);
}
