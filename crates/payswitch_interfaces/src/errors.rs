//! Connector errors.

/// Everything that can go wrong while building a request for, or handling a
/// response from, a processor.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Error while obtaining URL for the integration")]
    FailedToObtainIntegrationUrl,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Request encoding failed : {0}")]
    RequestEncodingFailedWithReason(String),
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to convert the amount to the connector's unit")]
    AmountConversionFailed,
    #[error("Failed to execute a processing step: {0:?}")]
    ProcessingStepFailed(Option<bytes::Bytes>),
    #[error("The connector returned an unexpected response: {0:?}")]
    UnexpectedResponseError(bytes::Bytes),
    #[error("Failed to handle connector response")]
    ResponseHandlingFailed,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("This step has not been implemented for: {0}")]
    NotImplemented(String),
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
    #[error("Missing connector transaction ID")]
    MissingConnectorTransactionID,
    #[error("Webhooks not implemented for this connector")]
    WebhooksNotImplemented,
    #[error("Failed to decode webhook event body")]
    WebhookBodyDecodingFailed,
    #[error("Incoming webhook event type not found")]
    WebhookEventTypeNotFound,
    #[error("Invalid Data format")]
    InvalidDataFormat { field_name: &'static str },
    #[error("Failed to sign the outgoing request")]
    RequestSigningFailed,
    #[error("The request was cancelled before a response arrived")]
    RequestCancelled,
}

/// Transport-level failures raised by the HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Failed to send the request to the connector")]
    RequestNotSent,
    #[error("The connection closed before a complete response arrived")]
    ResponseStreamEnded,
    #[error("The request timed out")]
    RequestTimeoutReceived,
    #[error("Failed to decode the response body")]
    ResponseDecodingFailed,
    #[error("URL parsing failed")]
    UrlParsingFailed,
}
