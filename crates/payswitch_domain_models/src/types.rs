//! Flow-specific aliases over [`crate::router_data::RouterData`].

use crate::{
    router_data::RouterData,
    router_flow_types::{Authorize, Capture, Refund, TSync, Void},
    router_request_types::{
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsVoidData, RefundsData,
        TransactionSyncData,
    },
    router_response_types::{PaymentsResponseData, TransactionSyncResponseData},
};

pub type PaymentsAuthorizeRouterData =
    RouterData<Authorize, PaymentsAuthorizeData, PaymentsResponseData>;
pub type PaymentsCaptureRouterData = RouterData<Capture, PaymentsCaptureData, PaymentsResponseData>;
pub type PaymentsVoidRouterData = RouterData<Void, PaymentsVoidData, PaymentsResponseData>;
pub type RefundsRouterData = RouterData<Refund, RefundsData, PaymentsResponseData>;
pub type TransactionSyncRouterData =
    RouterData<TSync, TransactionSyncData, TransactionSyncResponseData>;
