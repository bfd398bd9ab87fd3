pub mod transformers;

use base64::Engine;
use common_enums::AttemptStatus;
use common_utils::{
    consts,
    crypto::{self, SignMessage},
    date_time,
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Method, Request, RequestBuilder, RequestContent},
    types::{AmountConvertor, StringMajorUnit, StringMajorUnitForConnector},
};
use error_stack::ResultExt;
use masking::{ExposeInterface, Mask, Maskable, PeekInterface};
use payswitch_domain_models::{
    router_data::{ConnectorAuthType, ErrorResponse, RouterData},
    router_flow_types::{Authorize, Capture, Refund, TSync, Void},
    router_request_types::{
        PaymentsAuthorizeData, PaymentsCaptureData, PaymentsVoidData, RefundsData,
        TransactionSyncData,
    },
    router_response_types::{PaymentsResponseData, TransactionSyncResponseData},
    types::{
        PaymentsAuthorizeRouterData, PaymentsCaptureRouterData, PaymentsVoidRouterData,
        RefundsRouterData,
    },
};
use payswitch_interfaces::{
    api::{ConnectorCommon, ConnectorCommonExt, ConnectorIntegration},
    configs::Connectors,
    errors,
    types::{self, Response},
    webhooks::IncomingWebhook,
};
use transformers as cybersource;
use url::Url;

use crate::{constants::headers, types::ResponseRouterData, utils};

#[derive(Clone)]
pub struct Cybersource {
    amount_converter: &'static (dyn AmountConvertor<Output = StringMajorUnit> + Sync),
}

impl Cybersource {
    pub fn new() -> &'static Self {
        &Self {
            amount_converter: &StringMajorUnitForConnector,
        }
    }

    pub fn generate_digest(&self, payload: &[u8]) -> String {
        consts::BASE64_ENGINE.encode(crypto::sha256_digest(payload))
    }

    pub fn generate_signature(
        &self,
        auth: cybersource::CybersourceAuthType,
        host: &str,
        resource: &str,
        digest: &str,
        date: &str,
    ) -> CustomResult<String, errors::ConnectorError> {
        let merchant_account = auth.merchant_account.peek();
        let headers = format!("host date (request-target) digest {}", headers::V_C_MERCHANT_ID);
        let signature_string = format!(
            "host: {host}\ndate: {date}\n(request-target): post {resource}\ndigest: SHA-256={digest}\n{}: {merchant_account}",
            headers::V_C_MERCHANT_ID
        );
        let key_value = crypto::decode_base64_secret(auth.api_secret.expose().as_str())
            .change_context(errors::ConnectorError::RequestSigningFailed)?;
        let signature_value = consts::BASE64_ENGINE.encode(
            crypto::HmacSha256
                .sign_message(&key_value, signature_string.as_bytes())
                .change_context(errors::ConnectorError::RequestSigningFailed)?,
        );
        Ok(format!(
            r#"keyid="{}", algorithm="HmacSHA256", headers="{headers}", signature="{signature_value}""#,
            auth.api_key.peek()
        ))
    }
}

impl<Flow, Request, Response> ConnectorCommonExt<Flow, Request, Response> for Cybersource
where
    Self: ConnectorIntegration<Flow, Request, Response>,
{
    fn build_headers(
        &self,
        req: &RouterData<Flow, Request, Response>,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        let date = date_time::now_http_date()
            .change_context(errors::ConnectorError::RequestEncodingFailed)?;
        let auth = cybersource::CybersourceAuthType::try_from(&req.connector_auth_type)?;
        let merchant_account = auth.merchant_account.clone();
        let base_url = self.base_url(connectors);
        let parsed = Url::parse(base_url)
            .change_context(errors::ConnectorError::RequestEncodingFailed)?;
        let host = parsed
            .host_str()
            .ok_or(errors::ConnectorError::RequestEncodingFailed)?;
        // Every flow posts, so the signed header set always carries a digest.
        let resource: String = self
            .get_url(req, connectors)?
            .chars()
            .skip(base_url.len() - 1)
            .collect();
        let body = self.get_request_body(req, connectors)?;
        let sha256 = self.generate_digest(body.get_inner_value().expose().as_bytes());
        let signature = self.generate_signature(auth, host, &resource, &sha256, &date)?;

        Ok(vec![
            (
                headers::CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
            (
                headers::V_C_MERCHANT_ID.to_string(),
                merchant_account.into_masked(),
            ),
            (headers::DATE.to_string(), date.clone().into()),
            (headers::HOST.to_string(), host.to_string().into()),
            (
                headers::DIGEST.to_string(),
                format!("SHA-256={sha256}").into_masked(),
            ),
            (headers::SIGNATURE.to_string(), signature.into_masked()),
        ])
    }
}

impl ConnectorCommon for Cybersource {
    fn id(&self) -> &'static str {
        "cybersource"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json;charset=utf-8"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.cybersource.base_url.as_ref()
    }

    fn get_auth_header(
        &self,
        _auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        // Credentials enter through the signed header set in build_headers.
        Ok(Vec::new())
    }

    fn build_error_response(
        &self,
        res: Response,
    ) -> CustomResult<ErrorResponse, errors::ConnectorError> {
        let response: cybersource::CybersourceErrorResponse = res
            .response
            .parse_struct("CybersourceErrorResponse")
            .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;
        Ok(ErrorResponse {
            status_code: res.status_code,
            code: response
                .reason
                .clone()
                .unwrap_or_else(|| consts::NO_ERROR_CODE.to_string()),
            message: response
                .message
                .clone()
                .unwrap_or_else(|| consts::NO_ERROR_MESSAGE.to_string()),
            reason: response.message,
            connector_transaction_id: None,
            already_captured: false,
        })
    }
}

impl ConnectorIntegration<Authorize, PaymentsAuthorizeData, PaymentsResponseData> for Cybersource {
    fn get_headers(
        &self,
        req: &PaymentsAuthorizeRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        _req: &PaymentsAuthorizeRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!("{}pts/v2/payments/", self.base_url(connectors)))
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
        let connector_router_data = cybersource::CybersourceRouterData::from((amount, req));
        let connector_req = cybersource::PaymentsRequest::try_from(&connector_router_data)?;
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
        let response: cybersource::CybersourcePaymentsResponse = res
            .response
            .parse_struct("CybersourcePaymentsResponse")
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

impl ConnectorIntegration<Capture, PaymentsCaptureData, PaymentsResponseData> for Cybersource {
    fn get_headers(
        &self,
        req: &PaymentsCaptureRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        req: &PaymentsCaptureRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!(
            "{}pts/v2/payments/{}/captures",
            self.base_url(connectors),
            req.request.connector_transaction_id
        ))
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
        let connector_router_data = cybersource::CybersourceRouterData::from((amount, req));
        let connector_req = cybersource::CaptureRequest::try_from(&connector_router_data)?;
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
        let response: cybersource::CybersourcePaymentsResponse = res
            .response
            .parse_struct("CybersourceCaptureResponse")
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

impl ConnectorIntegration<Void, PaymentsVoidData, PaymentsResponseData> for Cybersource {
    fn get_headers(
        &self,
        req: &PaymentsVoidRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        req: &PaymentsVoidRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!(
            "{}pts/v2/payments/{}/reversals",
            self.base_url(connectors),
            req.request.connector_transaction_id
        ))
    }

    fn get_request_body(
        &self,
        req: &PaymentsVoidRouterData,
        _connectors: &Connectors,
    ) -> CustomResult<RequestContent, errors::ConnectorError> {
        let connector_req = cybersource::VoidRequest::try_from(req)?;
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
        let response: cybersource::CybersourcePaymentsResponse = res
            .response
            .parse_struct("CybersourceVoidResponse")
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

impl ConnectorIntegration<Refund, RefundsData, PaymentsResponseData> for Cybersource {
    fn get_headers(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, errors::ConnectorError> {
        self.build_headers(req, connectors)
    }

    fn get_url(
        &self,
        req: &RefundsRouterData,
        connectors: &Connectors,
    ) -> CustomResult<String, errors::ConnectorError> {
        Ok(format!(
            "{}pts/v2/payments/{}/refunds",
            self.base_url(connectors),
            req.request.connector_transaction_id
        ))
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
        let connector_router_data = cybersource::CybersourceRouterData::from((amount, req));
        let connector_req = cybersource::RefundRequest::try_from(&connector_router_data)?;
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
        let response: cybersource::CybersourcePaymentsResponse = res
            .response
            .parse_struct("CybersourceRefundResponse")
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

// Cybersource exposes no settlement-state query here; refunds always go
// out as refunds.
impl ConnectorIntegration<TSync, TransactionSyncData, TransactionSyncResponseData>
    for Cybersource
{
}

impl IncomingWebhook for Cybersource {}

#[cfg(test)]
mod tests {
    use masking::Secret;

    use super::*;

    #[test]
    fn digest_is_base64_sha256_of_the_body() {
        assert_eq!(
            Cybersource::new().generate_digest(b"{}"),
            "RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o="
        );
    }

    #[test]
    fn signature_header_names_the_signed_fields() {
        let auth = cybersource::CybersourceAuthType::try_from(&ConnectorAuthType::SignatureKey {
            api_key: Secret::new("key-id".to_string()),
            key1: Secret::new("merchant".to_string()),
            api_secret: Secret::new("c2VjcmV0".to_string()),
        })
        .unwrap();
        let signature = Cybersource::new()
            .generate_signature(
                auth,
                "apitest.cybersource.com",
                "/pts/v2/payments/",
                "RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o=",
                "Sun, 06 Nov 1994 08:49:37 GMT",
            )
            .unwrap();
        assert!(signature.starts_with(r#"keyid="key-id", algorithm="HmacSHA256""#));
        assert!(
            signature.contains(r#"headers="host date (request-target) digest v-c-merchant-id""#)
        );
    }
}
