//! Request execution: one flow, one HTTPS exchange, one updated
//! [`RouterData`].

use common_enums::AttemptStatus;
use common_utils::{consts, errors::CustomResult};
use error_stack::ResultExt;
use payswitch_domain_models::router_data::RouterData;
use payswitch_interfaces::{api::BoxedConnectorIntegration, configs::Connectors};

use crate::{client::Connection, errors::GatewayError, logger};

/// Build the processor request for one flow, send it, and fold the answer
/// back into the router data.
///
/// Non-2xx statuses are not transport errors; they are handed to the
/// connector's error parsing and come back as a populated
/// `Err(ErrorResponse)` slot. Returns the response headers alongside so
/// callers can propagate them on request.
pub async fn execute_connector_processing_step<Flow, Req, Resp>(
    connection: &dyn Connection,
    connector_integration: BoxedConnectorIntegration<'_, Flow, Req, Resp>,
    req: &RouterData<Flow, Req, Resp>,
    connectors: &Connectors,
) -> CustomResult<(RouterData<Flow, Req, Resp>, Option<http::HeaderMap>), GatewayError>
where
    Flow: Clone + 'static,
    Req: Clone + 'static,
    Resp: Clone + 'static,
{
    let request = connector_integration
        .build_request(req, connectors)
        .change_context(GatewayError::RequestConstructionFailed)?
        .ok_or_else(|| error_stack::report!(GatewayError::FlowNotSupported))?;

    logger::info!(method = ?request.method, url = %request.url, "sending processor request");

    let response = connection
        .send_request(request)
        .await
        .change_context(GatewayError::SendFailed)?;

    logger::info!(status_code = response.status_code, "processor responded");

    // A tokenization proxy in front of the processor flags its own
    // failures with a response header; that is never a processor answer.
    if let Some(value) = response
        .headers
        .as_ref()
        .and_then(|headers| headers.get(consts::PROXY_ERROR_HEADER))
    {
        let detail = value.to_str().unwrap_or("unreadable header").to_string();
        return Err(error_stack::report!(GatewayError::ProxyError(detail)));
    }

    let headers = response.headers.clone();
    let status_code = response.status_code;

    let handled = match status_code {
        200..=299 => connector_integration.handle_response(req, response),
        500..=599 => connector_integration
            .get_5xx_error_response(response)
            .map(|error| {
                let mut data = req.clone();
                data.status = AttemptStatus::Failure;
                data.response = Err(error);
                data.connector_http_status_code = Some(status_code);
                data
            }),
        _ => connector_integration
            .get_error_response(response)
            .map(|error| {
                let mut data = req.clone();
                data.status = AttemptStatus::Failure;
                data.response = Err(error);
                data.connector_http_status_code = Some(status_code);
                data
            }),
    }
    .change_context(GatewayError::ResponseHandlingFailed)?;

    Ok((handled, headers))
}
