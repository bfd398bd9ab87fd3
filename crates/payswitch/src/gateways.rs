//! Per-processor gateway façades.
//!
//! A [`Gateway`] owns a connector, credentials, an environment, and an
//! HTTP client, and exposes the canonical operations through
//! [`PaymentGateway`]. Constructors take `(auth, environment, optional
//! client)`; pass `None` to get the default pooled client.

use common_enums::Environment;
use common_utils::{consts, errors::CustomResult};
use error_stack::ResultExt;
use payswitch_connectors::{Adyen, Authorizedotnet, Checkout, Cybersource, Nmi, Orbital};
use payswitch_domain_models::{
    router_data::{ConnectorAuthType, RouterData},
    router_flow_types::{Authorize, Capture, Refund, TSync, Void},
    router_request_types::{
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsVoidData, RefundsData,
        RequestOptions, TransactionSyncData,
    },
    router_response_types::{
        PaymentsResponseData, SettlementState, TransactionEvent, TransactionSyncResponseData,
    },
};
use payswitch_interfaces::{
    api::{BoxedConnectorIntegration, Connector, ConnectorIntegrationAny},
    configs::Connectors,
    webhooks::IncomingWebhook,
};
use tokio_util::sync::CancellationToken;

use crate::{
    client::{self, Connection, ReqwestConnection},
    errors::GatewayError,
    logger, services,
    types::GatewayResponse,
};

fn wants_headers(options: &RequestOptions) -> bool {
    options.contains_key(consts::INCLUDE_RESPONSE_HEADERS_OPTION)
}

/// The canonical operations every processor gateway supports.
///
/// The `*_with_cancellation` variants race the operation against a
/// [`CancellationToken`]; a cancelled call yields
/// [`GatewayError::Cancelled`] and never a partial response.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn authorize(
        &self,
        request: PaymentsAuthorizeData,
    ) -> CustomResult<GatewayResponse, GatewayError>;

    async fn capture(
        &self,
        request: PaymentsCaptureData,
    ) -> CustomResult<GatewayResponse, GatewayError>;

    async fn void(
        &self,
        request: PaymentsVoidData,
    ) -> CustomResult<GatewayResponse, GatewayError>;

    async fn refund(
        &self,
        request: RefundsData,
    ) -> CustomResult<GatewayResponse, GatewayError>;

    /// Translate a processor webhook body into canonical events.
    fn parse_webhook(&self, body: &[u8]) -> CustomResult<Vec<TransactionEvent>, GatewayError>;

    async fn authorize_with_cancellation(
        &self,
        request: PaymentsAuthorizeData,
        token: CancellationToken,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tokio::select! {
            _ = token.cancelled() => Err(error_stack::report!(GatewayError::Cancelled)),
            result = self.authorize(request) => result,
        }
    }

    async fn capture_with_cancellation(
        &self,
        request: PaymentsCaptureData,
        token: CancellationToken,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tokio::select! {
            _ = token.cancelled() => Err(error_stack::report!(GatewayError::Cancelled)),
            result = self.capture(request) => result,
        }
    }

    async fn void_with_cancellation(
        &self,
        request: PaymentsVoidData,
        token: CancellationToken,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tokio::select! {
            _ = token.cancelled() => Err(error_stack::report!(GatewayError::Cancelled)),
            result = self.void(request) => result,
        }
    }

    async fn refund_with_cancellation(
        &self,
        request: RefundsData,
        token: CancellationToken,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        tokio::select! {
            _ = token.cancelled() => Err(error_stack::report!(GatewayError::Cancelled)),
            result = self.refund(request) => result,
        }
    }
}

/// A processor bound to credentials, an environment, and a transport.
pub struct Gateway<C: Connector + 'static> {
    connector: &'static C,
    auth: ConnectorAuthType,
    environment: Environment,
    connectors: Connectors,
    connection: Box<dyn Connection>,
}

impl<C: Connector + 'static> Gateway<C> {
    fn with_connector(
        connector: &'static C,
        auth: ConnectorAuthType,
        environment: Environment,
        client: Option<reqwest::Client>,
    ) -> CustomResult<Self, GatewayError> {
        let client = match client {
            Some(client) => client,
            None => client::default_http_client()
                .change_context(GatewayError::ClientConstructionFailed)?,
        };
        Ok(Self {
            connector,
            auth,
            environment,
            connectors: Connectors::for_environment(environment),
            connection: Box::new(ReqwestConnection::new(client)),
        })
    }

    /// Swap the transport, for tests that record outbound requests.
    pub fn with_connection(mut self, connection: Box<dyn Connection>) -> Self {
        self.connection = connection;
        self
    }

    async fn run_payment_flow<Flow, Req>(
        &self,
        request: Req,
        include_headers: bool,
    ) -> CustomResult<GatewayResponse, GatewayError>
    where
        C: payswitch_interfaces::api::ConnectorIntegration<Flow, Req, PaymentsResponseData>,
        Flow: Clone + Send + Sync + 'static,
        Req: Clone + Send + Sync + 'static,
    {
        let router_data = RouterData::<Flow, Req, PaymentsResponseData>::new(
            self.environment,
            self.auth.clone(),
            request,
        );
        let integration: BoxedConnectorIntegration<'_, Flow, Req, PaymentsResponseData> =
            self.connector.get_connector_integration();
        let (handled, headers) = services::execute_connector_processing_step(
            self.connection.as_ref(),
            integration,
            &router_data,
            &self.connectors,
        )
        .await?;
        Ok(GatewayResponse::from_router_data(
            &handled,
            include_headers.then_some(headers).flatten(),
        ))
    }

    /// Settlement state for a captured transaction, when the processor has
    /// the query. `None` when it does not.
    async fn settlement_state(
        &self,
        request: &RefundsData,
    ) -> CustomResult<Option<Result<SettlementState, GatewayResponse>>, GatewayError> {
        let sync_data = TransactionSyncData {
            connector_transaction_id: request.connector_transaction_id.clone(),
            options: request.options.clone(),
        };
        let router_data = RouterData::<TSync, TransactionSyncData, TransactionSyncResponseData>::new(
            self.environment,
            self.auth.clone(),
            sync_data,
        );
        let integration: BoxedConnectorIntegration<
            '_,
            TSync,
            TransactionSyncData,
            TransactionSyncResponseData,
        > = self.connector.get_connector_integration();

        // Builders are pure, so probing for support costs one extra
        // construction and no traffic.
        let supported = integration
            .build_request(&router_data, &self.connectors)
            .change_context(GatewayError::RequestConstructionFailed)?
            .is_some();
        if !supported {
            return Ok(None);
        }

        let (handled, _) = services::execute_connector_processing_step(
            self.connection.as_ref(),
            integration,
            &router_data,
            &self.connectors,
        )
        .await?;

        Ok(Some(match handled.response {
            Ok(sync) => Ok(sync.settlement_state),
            // The side trip's failure is the refund's failure.
            Err(error) => Err(GatewayResponse {
                success: false,
                transaction_reference: error
                    .connector_transaction_id
                    .clone()
                    .unwrap_or_default(),
                error_code: Some(error.code),
                error_message: Some(error.message),
                already_captured: error.already_captured,
                status_code: error.status_code,
                ..GatewayResponse::default()
            }),
        }))
    }
}

#[async_trait::async_trait]
impl<C: Connector + 'static> PaymentGateway for Gateway<C> {
    async fn authorize(
        &self,
        request: PaymentsAuthorizeData,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        let include_headers = wants_headers(&request.options);
        self.run_payment_flow::<Authorize, _>(request, include_headers)
            .await
    }

    async fn capture(
        &self,
        request: PaymentsCaptureData,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        let include_headers = wants_headers(&request.options);
        self.run_payment_flow::<Capture, _>(request, include_headers)
            .await
    }

    async fn void(
        &self,
        request: PaymentsVoidData,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        let include_headers = wants_headers(&request.options);
        self.run_payment_flow::<Void, _>(request, include_headers)
            .await
    }

    /// Refund, routed through a settlement-state lookup when the processor
    /// supports one: a not-yet-settled transaction is voided on the wire
    /// and the void is surfaced as the refund's result.
    async fn refund(
        &self,
        request: RefundsData,
    ) -> CustomResult<GatewayResponse, GatewayError> {
        let include_headers = wants_headers(&request.options);

        match self.settlement_state(&request).await? {
            None | Some(Ok(SettlementState::Settled)) => {
                self.run_payment_flow::<Refund, _>(request, include_headers)
                    .await
            }
            Some(Ok(
                SettlementState::CapturedPendingSettlement | SettlementState::NotSettled,
            )) => {
                logger::info!(
                    transaction = %request.connector_transaction_id,
                    "transaction not settled, voiding instead of refunding"
                );
                let void_data = PaymentsVoidData {
                    connector_transaction_id: request.connector_transaction_id,
                    client_transaction_reference: request.client_transaction_reference,
                    options: request.options,
                };
                self.run_payment_flow::<Void, _>(void_data, include_headers)
                    .await
            }
            Some(Err(failure)) => Ok(failure),
        }
    }

    fn parse_webhook(&self, body: &[u8]) -> CustomResult<Vec<TransactionEvent>, GatewayError> {
        self.connector
            .parse_webhook_payload(body)
            .change_context(GatewayError::WebhookDecodingFailed)
    }
}

impl Gateway<Adyen> {
    pub fn adyen(
        auth: ConnectorAuthType,
        environment: Environment,
        client: Option<reqwest::Client>,
    ) -> CustomResult<Self, GatewayError> {
        Self::with_connector(Adyen::new(), auth, environment, client)
    }
}

impl Gateway<Authorizedotnet> {
    pub fn authorizedotnet(
        auth: ConnectorAuthType,
        environment: Environment,
        client: Option<reqwest::Client>,
    ) -> CustomResult<Self, GatewayError> {
        Self::with_connector(Authorizedotnet::new(), auth, environment, client)
    }
}

impl Gateway<Checkout> {
    pub fn checkout(
        auth: ConnectorAuthType,
        environment: Environment,
        client: Option<reqwest::Client>,
    ) -> CustomResult<Self, GatewayError> {
        Self::with_connector(Checkout::new(), auth, environment, client)
    }
}

impl Gateway<Cybersource> {
    pub fn cybersource(
        auth: ConnectorAuthType,
        environment: Environment,
        client: Option<reqwest::Client>,
    ) -> CustomResult<Self, GatewayError> {
        Self::with_connector(Cybersource::new(), auth, environment, client)
    }
}

impl Gateway<Nmi> {
    pub fn nmi(
        auth: ConnectorAuthType,
        environment: Environment,
        client: Option<reqwest::Client>,
    ) -> CustomResult<Self, GatewayError> {
        Self::with_connector(Nmi::new(), auth, environment, client)
    }
}

impl Gateway<Orbital> {
    /// The gateway's endpoint negotiates HTTP/2 badly, so the default
    /// transport here is pinned to HTTP/1.1.
    pub fn orbital(
        auth: ConnectorAuthType,
        environment: Environment,
        client: Option<reqwest::Client>,
    ) -> CustomResult<Self, GatewayError> {
        let client = match client {
            Some(client) => client,
            None => client::http1_only_client()
                .change_context(GatewayError::ClientConstructionFailed)?,
        };
        Self::with_connector(Orbital::new(), auth, environment, Some(client))
    }
}
