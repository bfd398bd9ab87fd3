//! Clock helpers for signature timestamps.

use time::{macros::format_description, OffsetDateTime, PrimitiveDateTime};

use crate::errors::{CustomResult, ParsingError};
use error_stack::ResultExt;

/// Current UTC time without the offset component.
pub fn now() -> PrimitiveDateTime {
    let utc = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(utc.date(), utc.time())
}

/// Current time in the RFC 7231 IMF-fixdate shape required by HTTP `Date`
/// headers and signature strings, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn now_http_date() -> CustomResult<String, ParsingError> {
    format_http_date(OffsetDateTime::now_utc())
}

/// Render `moment` as an RFC 7231 IMF-fixdate.
pub fn format_http_date(moment: OffsetDateTime) -> CustomResult<String, ParsingError> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    moment
        .format(&format)
        .change_context(ParsingError::EncodeError("http-date"))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn http_date_shape() {
        let rendered =
            format_http_date(datetime!(1994-11-06 08:49:37 UTC)).expect("formattable instant");
        assert_eq!(rendered, "Sun, 06 Nov 1994 08:49:37 GMT");
    }
}
