//! Personally identifiable information wrappers.

use std::{fmt, str::FromStr};

use masking::{PeekInterface, Secret, Strategy};
use serde::{Deserialize, Deserializer, Serialize};

/// Masking strategy that keeps the domain visible.
pub enum EmailStrategy {}

impl<T> Strategy<T> for EmailStrategy
where
    T: AsRef<str>,
{
    fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match value.as_ref().split_once('@') {
            Some((_, domain)) => write!(f, "*****@{domain}"),
            None => f.write_str("*** invalid email ***"),
        }
    }
}

/// An email address, masked in logs.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct Email(Secret<String, EmailStrategy>);

/// Error for strings that are not shaped like an email address.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("not a valid email address")]
pub struct EmailParseError;

impl Email {
    /// Borrow the address.
    pub fn peek(&self) -> &str {
        self.0.peek()
    }
}

impl FromStr for Email {
    type Err = EmailParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
                Ok(Self(Secret::new(value.to_string())))
            }
            _ => Err(EmailParseError),
        }
    }
}

impl TryFrom<String> for Email {
    type Error = EmailParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Debug for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plausible_addresses() {
        assert!("buyer@example.com".parse::<Email>().is_ok());
        assert_eq!("no-at-sign".parse::<Email>(), Err(EmailParseError));
        assert_eq!("@example.com".parse::<Email>(), Err(EmailParseError));
    }

    #[test]
    fn debug_masks_the_local_part() {
        let email: Email = "buyer@example.com".parse().expect("valid address");
        assert_eq!(format!("{email:?}"), "*****@example.com");
    }
}
