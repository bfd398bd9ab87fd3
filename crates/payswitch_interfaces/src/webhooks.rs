//! Incoming webhook handling.

use common_utils::errors::CustomResult;
use payswitch_domain_models::router_response_types::TransactionEvent;

use crate::errors;

/// Decodes processor webhook payloads into normalized transaction events.
///
/// A single payload may carry several notifications (Adyen batches them),
/// hence the `Vec`.
pub trait IncomingWebhook: Sync {
    fn parse_webhook_payload(
        &self,
        _body: &[u8],
    ) -> CustomResult<Vec<TransactionEvent>, errors::ConnectorError> {
        Err(errors::ConnectorError::WebhooksNotImplemented.into())
    }
}
