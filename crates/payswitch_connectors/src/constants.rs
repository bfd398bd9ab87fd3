/// Header Constants
pub mod headers {
    pub const ACCEPT: &str = "Accept";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CONTENT_TRANSFER_ENCODING: &str = "Content-transfer-encoding";
    pub const DATE: &str = "Date";
    pub const DIGEST: &str = "Digest";
    pub const DOCUMENT_TYPE: &str = "Document-type";
    pub const HOST: &str = "Host";
    pub const IDEMPOTENCY_KEY: &str = "Idempotency-Key";
    pub const MIME_VERSION: &str = "MIME-Version";
    pub const REQUEST_NUMBER: &str = "Request-number";
    pub const SIGNATURE: &str = "Signature";
    pub const TRACE_NUMBER: &str = "Trace-number";
    pub const V_C_DATE: &str = "v-c-date";
    pub const V_C_MERCHANT_ID: &str = "v-c-merchant-id";
    pub const X_API_KEY: &str = "X-API-Key";
}
