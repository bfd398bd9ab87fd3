//! Processor-bound HTTP request representation.
//!
//! Connectors build a [`Request`] describing method, URL, headers, and a
//! typed body; the transport layer serializes the body per its
//! [`RequestContent`] variant. Header values ride as [`Maskable`] so
//! credentials stay masked through logging.

use masking::{Maskable, Secret};
use serde::{Deserialize, Serialize};

/// Header set carried on a [`Request`].
pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

/// HTTP methods the processors use.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

/// Typed request body; the variant fixes the serialization the transport
/// applies.
pub enum RequestContent {
    /// JSON object body.
    Json(Box<dyn erased_serde::Serialize + Send + Sync>),
    /// `application/x-www-form-urlencoded` name/value body.
    FormUrlEncoded(Box<dyn erased_serde::Serialize + Send + Sync>),
    /// XML document body (no prolog; use `RawBytes` when one is required).
    Xml(Box<dyn erased_serde::Serialize + Send + Sync>),
    /// Pre-serialized bytes, for bodies with prologs or vendor framing.
    RawBytes(Vec<u8>),
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
            Self::FormUrlEncoded(_) => "FormUrlEncodedRequestBody",
            Self::Xml(_) => "XmlRequestBody",
            Self::RawBytes(_) => "RawBytesRequestBody",
        })
    }
}

impl RequestContent {
    /// Serialize the body to its wire string.
    ///
    /// Used by signature schemes that sign the exact body bytes, and by
    /// tests asserting wire shapes.
    pub fn get_inner_value(&self) -> Secret<String> {
        match self {
            Self::Json(payload) => serde_json::to_string(payload).unwrap_or_default().into(),
            Self::FormUrlEncoded(payload) => serde_urlencoded::to_string(payload)
                .unwrap_or_default()
                .into(),
            Self::Xml(payload) => quick_xml::se::to_string(payload).unwrap_or_default().into(),
            Self::RawBytes(payload) => String::from_utf8_lossy(payload).into_owned().into(),
        }
    }
}

/// A fully described processor-bound request.
#[derive(Debug)]
pub struct Request {
    /// Target URL.
    pub url: String,
    /// Header set, values maskable.
    pub headers: Headers,
    /// HTTP method.
    pub method: Method,
    /// Typed body, absent for bodiless methods.
    pub body: Option<RequestContent>,
}

impl Request {
    /// Start a request with `method` and `url`.
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: String::from(url),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    /// Attach a body.
    pub fn set_body<T: Into<RequestContent>>(&mut self, body: T) {
        self.body.replace(body.into());
    }

    /// Insert one header.
    pub fn add_header(&mut self, header: &str, value: Maskable<String>) {
        self.headers.insert((String::from(header), value));
    }
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    headers: Headers,
    method: Method,
    body: Option<RequestContent>,
}

impl RequestBuilder {
    /// Start building; method defaults to GET.
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::with_capacity(1024),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    /// Set the target URL.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    /// Set the method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add the headers every outbound request carries, currently just the
    /// library `User-Agent`.
    pub fn attach_default_headers(mut self) -> Self {
        self.headers
            .insert(("User-Agent".to_string(), crate::consts::user_agent().into()));
        self
    }

    /// Insert one plain header.
    pub fn header(mut self, header: &str, value: &str) -> Self {
        self.headers.insert((header.into(), value.into()));
        self
    }

    /// Extend with prepared headers.
    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Attach a body.
    pub fn set_body<T: Into<RequestContent>>(mut self, body: T) -> Self {
        self.body.replace(body.into());
        self
    }

    /// Finish.
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
