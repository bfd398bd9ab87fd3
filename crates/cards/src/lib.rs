//! Card number and expiration types.
//!
//! [`CardNumber`] is a Luhn-validated, always-masked PAN; [`CardExpiration`]
//! owns the month/year validity rules and every wire shape the processors
//! want expiry dates in.

#![warn(missing_docs)]

use std::{fmt, str::FromStr};

use common_enums::CardNetwork;
use masking::{PeekInterface, Secret, Strategy, WithType};
use serde::{Deserialize, Deserializer, Serialize};

/// Errors building card types from caller input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CardError {
    /// PAN failed structural validation.
    #[error("card number is not a valid PAN")]
    InvalidCardNumber,
    /// Month outside 1..=12.
    #[error("expiration month must be between 1 and 12")]
    InvalidExpirationMonth,
    /// Year not a four-digit year.
    #[error("expiration year must be a four digit year")]
    InvalidExpirationYear,
}

/// A primary account number.
///
/// Construction validates length (12–19 digits) and the Luhn checksum.
/// `Debug` shows the first six digits only; the full PAN is reachable through
/// [`CardNumber::peek`] alone.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct CardNumber(Secret<String, CardNumberStrategy>);

impl CardNumber {
    /// Borrow the full PAN.
    pub fn peek(&self) -> &str {
        self.0.peek()
    }

    /// First six digits of the PAN.
    pub fn get_card_isin(&self) -> String {
        self.0.peek().chars().take(6).collect()
    }

    /// Last four digits of the PAN.
    pub fn get_last4(&self) -> String {
        let pan = self.0.peek();
        pan.chars()
            .skip(pan.len().saturating_sub(4))
            .collect()
    }

    /// Infer the card scheme from the leading digits.
    pub fn infer_network(&self) -> CardNetwork {
        let pan = self.0.peek();
        let first_two: String = pan.chars().take(2).collect();
        match pan.chars().next() {
            Some('4') => CardNetwork::Visa,
            Some('5') if matches!(first_two.as_str(), "51" | "52" | "53" | "54" | "55") => {
                CardNetwork::Mastercard
            }
            Some('3') if matches!(first_two.as_str(), "34" | "37") => {
                CardNetwork::AmericanExpress
            }
            Some('3') if first_two.as_str() == "35" => CardNetwork::JCB,
            Some('6') if pan.starts_with("6011") || first_two.as_str() == "65" => {
                CardNetwork::Discover
            }
            Some('6') if first_two.as_str() == "62" => CardNetwork::UnionPay,
            _ => CardNetwork::Unknown,
        }
    }
}

impl FromStr for CardNumber {
    type Err = CardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let digits = value.split_whitespace().collect::<String>();
        if !(12..=19).contains(&digits.len())
            || !digits.chars().all(|c| c.is_ascii_digit())
            || !luhn_valid(&digits)
        {
            return Err(CardError::InvalidCardNumber);
        }
        Ok(Self(Secret::new(digits)))
    }
}

impl TryFrom<String> for CardNumber {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Masking strategy for PANs: keep the ISIN visible for debugging BIN
/// routing, hide the rest.
pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pan = value.as_ref();
        if pan.len() < 12 {
            return WithType::fmt(value, f);
        }
        write!(f, "{}{}", &pan[..6], "*".repeat(pan.len() - 6))
    }
}

fn luhn_valid(digits: &str) -> bool {
    let sum = digits
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .fold(0u32, |acc, (index, digit)| {
            let doubled = if index % 2 == 1 { digit * 2 } else { digit };
            acc + if doubled > 9 { doubled - 9 } else { doubled }
        });
    sum % 10 == 0
}

/// Validated card expiration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExpiration {
    month: u8,
    year: u16,
}

impl CardExpiration {
    /// Build from a 1-based month and a four-digit year.
    pub fn new(month: u8, year: u16) -> Result<Self, CardError> {
        if !(1..=12).contains(&month) {
            return Err(CardError::InvalidExpirationMonth);
        }
        if !(1000..=9999).contains(&year) {
            return Err(CardError::InvalidExpirationYear);
        }
        Ok(Self { month, year })
    }

    /// 1-based month.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Four-digit year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Zero-padded two-digit month, `"07"`.
    pub fn two_digit_month(&self) -> String {
        format!("{:02}", self.month)
    }

    /// Low two digits of the year, `"28"`.
    ///
    /// Computed as `year % 100` rather than by slicing the string form, so it
    /// stays the arithmetic low-order digits for any four-digit year.
    pub fn two_digit_year(&self) -> String {
        format!("{:02}", self.year % 100)
    }

    /// Four-digit year, `"2028"`.
    pub fn four_digit_year(&self) -> String {
        format!("{:04}", self.year)
    }

    /// `"MM/YY"`.
    pub fn month_year_slash(&self) -> String {
        format!("{}/{}", self.two_digit_month(), self.two_digit_year())
    }

    /// `"MMYY"`.
    pub fn month_year_compact(&self) -> String {
        format!("{}{}", self.two_digit_month(), self.two_digit_year())
    }

    /// `"YYYY-MM"`.
    pub fn year_month_dashed(&self) -> String {
        format!("{}-{}", self.four_digit_year(), self.two_digit_month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_luhn_valid_pan() {
        let number: CardNumber = "4111111111111111".parse().expect("valid test PAN");
        assert_eq!(number.get_card_isin(), "411111");
        assert_eq!(number.get_last4(), "1111");
        assert_eq!(number.infer_network(), CardNetwork::Visa);
    }

    #[test]
    fn rejects_luhn_invalid_pan() {
        assert_eq!(
            "4111111111111112".parse::<CardNumber>(),
            Err(CardError::InvalidCardNumber)
        );
        assert_eq!("41".parse::<CardNumber>(), Err(CardError::InvalidCardNumber));
    }

    #[test]
    fn debug_masks_past_the_isin() {
        let number: CardNumber = "4111111111111111".parse().expect("valid test PAN");
        assert_eq!(format!("{number:?}"), "411111**********");
    }

    #[test]
    fn expiry_shapes() {
        let expiry = CardExpiration::new(10, 2028).expect("valid expiry");
        assert_eq!(expiry.month_year_slash(), "10/28");
        assert_eq!(expiry.month_year_compact(), "1028");
        assert_eq!(expiry.year_month_dashed(), "2028-10");
    }

    #[test]
    fn expiry_bounds() {
        assert_eq!(
            CardExpiration::new(13, 2028),
            Err(CardError::InvalidExpirationMonth)
        );
        assert_eq!(
            CardExpiration::new(1, 28),
            Err(CardError::InvalidExpirationYear)
        );
    }

    #[test]
    fn network_inference() {
        let mastercard: CardNumber = "5555555555554444".parse().expect("valid test PAN");
        assert_eq!(mastercard.infer_network(), CardNetwork::Mastercard);
        let amex: CardNumber = "378282246310005".parse().expect("valid test PAN");
        assert_eq!(amex.infer_network(), CardNetwork::AmericanExpress);
    }
}
