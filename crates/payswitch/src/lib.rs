//! Processor-agnostic card-not-present payment library.
//!
//! One canonical request model goes in, one canonical
//! [`GatewayResponse`](types::GatewayResponse) comes out, whatever the
//! processor speaks on the wire. Construct a per-processor gateway from
//! [`gateways`] and drive it through the
//! [`PaymentGateway`](gateways::PaymentGateway) trait.

pub mod client;
pub mod errors;
pub mod gateways;
pub mod logger;
pub mod services;
pub mod types;

pub use common_enums::Environment;
pub use payswitch_domain_models::{
    payment_method_data::{Card, ThreeDSecureData},
    router_data::ConnectorAuthType,
    router_request_types::{
        Level3Data, Level3LineItem, PaymentsAuthorizeData, PaymentsCaptureData,
        PaymentsVoidData, RefundsData,
    },
    router_response_types::TransactionEvent,
};

pub use crate::{
    errors::GatewayError,
    gateways::{Gateway, PaymentGateway},
    types::GatewayResponse,
};
