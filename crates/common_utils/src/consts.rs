//! Workspace-wide constants.

/// Base64 engine used for every encoding in the workspace.
pub const BASE64_ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Placeholder error code when a processor reply carries none.
pub const NO_ERROR_CODE: &str = "No error code";

/// Placeholder error message when a processor reply carries none.
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Total request timeout applied by the default HTTP client, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Request-options key that opts a call into response-header propagation.
pub const INCLUDE_RESPONSE_HEADERS_OPTION: &str = "include_response_headers";

/// Response header set by a tokenization proxy when the failure is the
/// proxy's, not the processor's.
pub const PROXY_ERROR_HEADER: &str = "X-Proxy-Error";

/// Library name reported in the outbound `User-Agent`.
pub const LIBRARY_NAME: &str = "payswitch";

/// Library version reported in the outbound `User-Agent`.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `"<LibraryName>/<Version>"` for the outbound `User-Agent` header.
pub fn user_agent() -> String {
    format!("{LIBRARY_NAME}/{LIBRARY_VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_carries_name_and_version() {
        let agent = user_agent();
        assert!(agent.starts_with("payswitch/"));
        assert_eq!(agent, format!("payswitch/{LIBRARY_VERSION}"));
    }
}
