pub mod transformers;

use common_enums::AttemptStatus;
use common_utils::{
    errors::CustomResult,
    ext_traits::{strip_utf8_bom, BytesExt},
    request::{Method, Request, RequestBuilder, RequestContent},
    types::{AmountConvertor, StringMajorUnit, StringMajorUnitForConnector},
};
use error_stack::ResultExt;
use payswitch_domain_models::{
    router_data::{ErrorResponse, RouterData},
    router_flow_types::{Authorize, Capture, Refund, TSync, Void},
    router_request_types::{
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsVoidData, RefundsData,
        TransactionSyncData,
    },
    router_response_types::{
        PaymentsResponseData, TransactionEvent, TransactionSyncResponseData,
    },
    types::{
        PaymentsAuthorizeRouterData, PaymentsCaptureRouterData, PaymentsVoidRouterData,
        RefundsRouterData, TransactionSyncRouterData,
    },
};
use payswitch_interfaces::{
    api::{ConnectorCommon, ConnectorCommonExt, ConnectorIntegration},
    configs::Connectors,
    errors,
    types::{self, Response},
    webhooks::IncomingWebhook,
};
use transformers as authorizedotnet;

use crate::{constants::headers, types::ResponseRouterData, utils};

#[derive(Clone)]
pub struct Authorizedotnet {
    amount_converter: &'static (dyn AmountConvertor<Output = StringMajorUnit> + Sync),
}

impl Authorizedotnet {
    pub fn new() -> &'static Self {
        &Self {
            amount_converter: &StringMajorUnitForConnector,
        }
    }
}

/// Responses arrive with a UTF-8 byte order mark ahead of the JSON.
fn preprocess_response(res: Response) -> Response {
    Response {
        response: strip_utf8_bom(&res.response),
        ..res
    }
}

impl<Flow, Request, Response> ConnectorCommonExt<Flow, Request, Response> for Authorizedotnet
where
    Self: ConnectorIntegration<Flow, Request, Response>,
{
    fn build_headers(
        &self,
        _req: &RouterData<Flow, Request, Response>,
        _connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        // Credentials ride in the body; only the content type goes up top.
        Ok(vec![(
            headers::CONTENT_TYPE.to_string(),
            self.common_get_content_type().to_string().into(),
        )])
    }
}

impl ConnectorCommon for Authorizedotnet {
    fn id(&self) -> &'static str {
        "authorizedotnet"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.authorizedotnet.base_url.as_ref()
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let res = preprocess_response(res);
        let response: authorizedotnet::AuthorizedotnetPaymentsResponse = res
            .response
            .parse_struct("AuthorizedotnetErrorResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        let (code, message) = response
            .messages
            .message
            .first()
            .map(|message| (message.code.clone(), message.text.clone()))
            .unwrap_or_else(|| {
                (
                    common_utils::consts::NO_ERROR_CODE.to_string(),
                    common_utils::consts::NO_ERROR_MESSAGE.to_string(),
                )
            });
        Ok(ErrorResponse {
            status_code: res.status_code,
            already_captured: code == authorizedotnet::ALREADY_CAPTURED_CODE,
            code,
            message: message.clone(),
            reason: Some(message),
            connector_transaction_id: None,
        })
    }
}

fn request_url(base_url: &str) -> String {
    format!("{base_url}xml/v1/request.api")
}

impl ConnectorIntegration<Authorize, PaymentsAuthorizeData, PaymentsResponseData>
    for Authorizedotnet
{
    fn get_headers(
        &self,
        req: &PaymentsAuthorizeRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &PaymentsAuthorizeRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(request_url(self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &PaymentsAuthorizeRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.amount,
            req.request.currency,
        )?;
        let connector_router_data = authorizedotnet::AuthorizedotnetRouterData::from((amount, req));
        let connector_req =
            authorizedotnet::CreateTransactionRequest::try_from(&connector_router_data)?;
        Ok(RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &PaymentsAuthorizeRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::PaymentsAuthorizeType::get_url(
                    self, req, connectors,
                )?)
                .attach_default_headers()
                .headers(types::PaymentsAuthorizeType::get_headers(
                    self, req, connectors,
                )?)
                .set_body(types::PaymentsAuthorizeType::get_request_body(
                    self, req, connectors,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &PaymentsAuthorizeRouterData,
        res: Response,
    ) -> CustomResult<PaymentsAuthorizeRouterData, errors::ConnectorError> {
        let res = preprocess_response(res);
        let response: authorizedotnet::AuthorizedotnetPaymentsResponse = res
            .response
            .parse_struct("AuthorizedotnetPaymentsResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterData::try_from(ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
            flow_success: AttemptStatus::Authorized,
        })
    }

    fn get_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl ConnectorIntegration<Capture, PaymentsCaptureData, PaymentsResponseData>
    for Authorizedotnet
{
    fn get_headers(
        &self,
        req: &PaymentsCaptureRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &PaymentsCaptureRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(request_url(self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &PaymentsCaptureRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let amount = req
            .request
            .amount
            .ok_or_else(utils::missing_field_err("capture.amount"))?;
        let amount = utils::convert_amount(self.amount_converter, amount, req.request.currency)?;
        let connector_router_data = authorizedotnet::AuthorizedotnetRouterData::from((amount, req));
        let connector_req =
            authorizedotnet::CreateTransactionRequest::try_from(&connector_router_data)?;
        Ok(RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &PaymentsCaptureRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::PaymentsCaptureType::get_url(self, req, connectors)?)
                .attach_default_headers()
                .headers(types::PaymentsCaptureType::get_headers(
                    self, req, connectors,
                )?)
                .set_body(types::PaymentsCaptureType::get_request_body(
                    self, req, connectors,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &PaymentsCaptureRouterData,
        res: Response,
    ) -> CustomResult<PaymentsCaptureRouterData, errors::ConnectorError> {
        let res = preprocess_response(res);
        let response: authorizedotnet::AuthorizedotnetPaymentsResponse = res
            .response
            .parse_struct("AuthorizedotnetCaptureResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterData::try_from(ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
            flow_success: AttemptStatus::Charged,
        })
    }

    fn get_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl ConnectorIntegration<Void, PaymentsVoidData, PaymentsResponseData> for Authorizedotnet {
    fn get_headers(
        &self,
        req: &PaymentsVoidRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &PaymentsVoidRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(request_url(self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &PaymentsVoidRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let connector_req = authorizedotnet::CreateTransactionRequest::try_from(req)?;
        Ok(RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &PaymentsVoidRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::PaymentsVoidType::get_url(self, req, connectors)?)
                .attach_default_headers()
                .headers(types::PaymentsVoidType::get_headers(self, req, connectors)?)
                .set_body(types::PaymentsVoidType::get_request_body(
                    self, req, connectors,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &PaymentsVoidRouterData,
        res: Response,
    ) -> CustomResult<PaymentsVoidRouterData, errors::ConnectorError> {
        let res = preprocess_response(res);
        let response: authorizedotnet::AuthorizedotnetPaymentsResponse = res
            .response
            .parse_struct("AuthorizedotnetVoidResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterData::try_from(ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
            flow_success: AttemptStatus::Voided,
        })
    }

    fn get_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl ConnectorIntegration<Refund, RefundsData, PaymentsResponseData> for Authorizedotnet {
    fn get_headers(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(request_url(self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &RefundsRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let amount = utils::convert_amount(
            self.amount_converter,
            req.request.amount,
            req.request.currency,
        )?;
        let connector_router_data = authorizedotnet::AuthorizedotnetRouterData::from((amount, req));
        let connector_req =
            authorizedotnet::CreateTransactionRequest::try_from(&connector_router_data)?;
        Ok(RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::RefundExecuteType::get_url(self, req, connectors)?)
                .attach_default_headers()
                .headers(types::RefundExecuteType::get_headers(self, req, connectors)?)
                .set_body(types::RefundExecuteType::get_request_body(
                    self, req, connectors,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &RefundsRouterData,
        res: Response,
    ) -> CustomResult<RefundsRouterData, errors::ConnectorError> {
        let res = preprocess_response(res);
        let response: authorizedotnet::AuthorizedotnetPaymentsResponse = res
            .response
            .parse_struct("AuthorizedotnetRefundResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        RouterData::try_from(ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
            flow_success: AttemptStatus::Charged,
        })
    }

    fn get_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl ConnectorIntegration<TSync, TransactionSyncData, TransactionSyncResponseData>
    for Authorizedotnet
{
    fn get_headers(
        &self,
        req: &TransactionSyncRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, masking::Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &TransactionSyncRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(request_url(self.base_url(connectors)))
    }

    fn get_request_body(
        &self,
        req: &TransactionSyncRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let connector_req = authorizedotnet::TransactionDetailsRequest::try_from(req)?;
        Ok(RequestContent::Json(Box::new(connector_req)))
    }

    fn build_request(
        &self,
        req: &TransactionSyncRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Option<Request>, errors::ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(Method::Post)
                .url(&types::TransactionSyncType::get_url(self, req, connectors)?)
                .attach_default_headers()
                .headers(types::TransactionSyncType::get_headers(
                    self, req, connectors,
                )?)
                .set_body(types::TransactionSyncType::get_request_body(
                    self, req, connectors,
                )?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &TransactionSyncRouterData,
        res: Response,
    ) -> CustomResult<TransactionSyncRouterData, errors::ConnectorError> {
        let res = preprocess_response(res);
        let response: authorizedotnet::AuthorizedotnetSyncResponse = res
            .response
            .parse_struct("AuthorizedotnetSyncResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        TransactionSyncRouterData::try_from(ResponseRouterData {
            response,
            data: data.clone(),
            http_code: res.status_code,
            flow_success: AttemptStatus::Pending,
        })
    }

    fn get_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        self.build_error_response(res)
    }
}

impl IncomingWebhook for Authorizedotnet {
    fn parse_webhook_payload(
        &self,
        body: &[u8],
    ) -> CustomResult<Vec<TransactionEvent>, errors::ConnectorError> {
        let webhook: authorizedotnet::AuthorizedotnetWebhookBody = body
            .parse_struct("AuthorizedotnetWebhookBody")
            .change_context(errors::ConnectorError::WebhookBodyDecodingFailed)?;
        Ok(authorizedotnet::translate_webhook(&webhook)
            .into_iter()
            .collect())
    }
}
