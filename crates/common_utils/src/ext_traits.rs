//! Extension traits for parsing wire bodies and shaping field values.

use bytes::Bytes;
use error_stack::ResultExt;
use masking::{ExposeInterface, Secret, Strategy};
use serde::de::DeserializeOwned;

use crate::errors::{CustomResult, ParsingError, ValidationError};

/// Deserialize JSON out of a byte buffer with a named error context.
pub trait BytesExt {
    /// Parse `self` into `T`, naming `type_name` in the failure report.
    fn parse_struct<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned;
}

impl BytesExt for Bytes {
    fn parse_struct<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                format!("Unable to parse {type_name} from the response body")
            })
    }
}

impl BytesExt for [u8] {
    fn parse_struct<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(self).change_context(ParsingError::StructParseFailure(type_name))
    }
}

/// Deserialize an XML document.
pub trait XmlExt {
    /// Parse the XML in `self` into `T`.
    fn parse_xml<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned;
}

impl XmlExt for str {
    fn parse_xml<T>(&self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: DeserializeOwned,
    {
        quick_xml::de::from_str(self).change_context(ParsingError::StructParseFailure(type_name))
    }
}

/// Strip a leading UTF-8 byte-order mark.
///
/// Some legacy processors prefix response bodies with a BOM, which breaks
/// strict JSON and XML parsers.
pub fn strip_utf8_bom(bytes: &Bytes) -> Bytes {
    match bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        Some(stripped) => Bytes::copy_from_slice(stripped),
        None => bytes.clone(),
    }
}

/// Required-value extraction over optionals.
pub trait OptionExt<T> {
    /// Unwrap or report [`ValidationError::MissingRequiredField`].
    fn get_required_value(self, field_name: &str) -> CustomResult<T, ValidationError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn get_required_value(self, field_name: &str) -> CustomResult<T, ValidationError> {
        self.ok_or_else(|| {
            error_stack::report!(ValidationError::MissingRequiredField {
                field_name: field_name.to_string(),
            })
        })
    }
}

/// Prefix of `value` holding at most `max_length` characters.
///
/// Length-constrained processor fields (invoice numbers, order references)
/// are truncated rather than rejected.
pub fn truncate_string(value: &str, max_length: usize) -> String {
    value.chars().take(max_length).collect()
}

/// `primary` unless it is empty, else `fallback`.
pub fn default_if_empty<'a>(primary: &'a str, fallback: &'a str) -> &'a str {
    if primary.is_empty() {
        fallback
    } else {
        primary
    }
}

/// The inner string of an optional, empty when absent.
pub fn safe_str(value: Option<&String>) -> &str {
    value.map(String::as_str).unwrap_or_default()
}

/// Like [`safe_str`] for optional secrets, cloning the exposed value.
pub fn safe_secret_string<I>(value: Option<Secret<String, I>>) -> String
where
    I: Strategy<String>,
{
    value.map(ExposeInterface::expose).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_prefix_preserving() {
        assert_eq!(truncate_string("order-12345", 8), "order-12");
        assert_eq!(truncate_string("short", 32), "short");
        assert_eq!(truncate_string("", 4), "");
    }

    #[test]
    fn default_if_empty_prefers_non_empty() {
        assert_eq!(default_if_empty("value", "fallback"), "value");
        assert_eq!(default_if_empty("", "fallback"), "fallback");
    }

    #[test]
    fn safe_str_handles_absent() {
        assert_eq!(safe_str(None), "");
        let owned = "present".to_string();
        assert_eq!(safe_str(Some(&owned)), "present");
    }

    #[test]
    fn bom_is_stripped_once() {
        let with_bom = Bytes::from_static(&[0xEF, 0xBB, 0xBF, b'{', b'}']);
        assert_eq!(strip_utf8_bom(&with_bom).as_ref(), b"{}");
        let without = Bytes::from_static(b"{}");
        assert_eq!(strip_utf8_bom(&without).as_ref(), b"{}");
    }
}
