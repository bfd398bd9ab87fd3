//! Caller-facing error taxonomy.
//!
//! Processor declines are not errors; they come back as
//! [`GatewayResponse`](crate::types::GatewayResponse) with `success =
//! false`. These variants cover everything that prevents a canonical
//! response from existing at all.

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GatewayError {
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Failed to build the processor request")]
    RequestConstructionFailed,
    #[error("Flow is not supported by this processor")]
    FlowNotSupported,
    #[error("Failed to send the request to the processor")]
    SendFailed,
    #[error("Tokenization proxy reported a failure: {0}")]
    ProxyError(String),
    #[error("Failed to interpret the processor response")]
    ResponseHandlingFailed,
    #[error("Failed to decode the webhook payload")]
    WebhookDecodingFailed,
    #[error("Operation was cancelled before completion")]
    Cancelled,
}
