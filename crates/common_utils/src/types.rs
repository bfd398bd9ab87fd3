//! Amount units and the conversions between the canonical minor-unit
//! representation and each processor's wire shape.

use std::{
    fmt::Display,
    ops::{Add, Sub},
};

use common_enums::Currency;
use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ParsingError};

/// Amount in the currency's minor unit (cents for USD). The canonical
/// representation everywhere inside the library; wire shapes exist only at
/// the connector boundary.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Wrap a raw minor-unit amount.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw minor-unit amount.
    pub fn get_amount_as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for MinorUnit {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for MinorUnit {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// An amount and its currency.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Money {
    /// Amount in minor units.
    pub amount: MinorUnit,
    /// ISO 4217 currency.
    pub currency: Currency,
}

impl Money {
    /// Build from raw minor units and a currency.
    pub fn new(amount: MinorUnit, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

/// Minor units rendered as a digit string with no decimal point, `"100"`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StringMinorUnit(String);

impl StringMinorUnit {
    fn new(value: String) -> Self {
        Self(value)
    }

    /// The wire string.
    pub fn get_amount_as_string(&self) -> &str {
        &self.0
    }
}

/// Major units rendered as a decimal string honoring the currency exponent,
/// `"1.00"` for 100 US cents, `"100"` for 100 JPY.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StringMajorUnit(String);

impl StringMajorUnit {
    fn new(value: String) -> Self {
        Self(value)
    }

    /// The wire string.
    pub fn get_amount_as_string(&self) -> &str {
        &self.0
    }
}

/// Major units as a float, for processors with numeric JSON amount fields.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct FloatMajorUnit(f64);

impl FloatMajorUnit {
    fn new(value: f64) -> Self {
        Self(value)
    }

    /// The wire value.
    pub fn get_amount_as_f64(&self) -> f64 {
        self.0
    }
}

/// Conversion between the canonical [`MinorUnit`] and one wire shape.
pub trait AmountConvertor: Send + Sync {
    /// Processor-facing representation.
    type Output;

    /// Canonical to wire.
    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError>;

    /// Wire back to canonical.
    fn convert_back(
        &self,
        amount: Self::Output,
        currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError>;
}

/// Converter for processors that take minor units as an integer string.
#[derive(Clone, Copy, Debug)]
pub struct StringMinorUnitForConnector;

impl AmountConvertor for StringMinorUnitForConnector {
    type Output = StringMinorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        _currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError> {
        Ok(StringMinorUnit::new(amount.get_amount_as_i64().to_string()))
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        _currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError> {
        let value = amount
            .0
            .parse::<i64>()
            .change_context(ParsingError::AmountConversionFailure)?;
        Ok(MinorUnit::new(value))
    }
}

/// Converter for processors that take a major-unit decimal string.
#[derive(Clone, Copy, Debug)]
pub struct StringMajorUnitForConnector;

impl AmountConvertor for StringMajorUnitForConnector {
    type Output = StringMajorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError> {
        let minor = amount.get_amount_as_i64();
        let rendered = if currency.is_zero_decimal_currency() {
            minor.to_string()
        } else if currency.is_three_decimal_currency() {
            format!("{}.{:03}", minor / 1000, (minor % 1000).abs())
        } else {
            format!("{}.{:02}", minor / 100, (minor % 100).abs())
        };
        Ok(StringMajorUnit::new(rendered))
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError> {
        let value = amount
            .0
            .parse::<f64>()
            .change_context(ParsingError::AmountConversionFailure)?;
        let scale = if currency.is_zero_decimal_currency() {
            1.0
        } else if currency.is_three_decimal_currency() {
            1000.0
        } else {
            100.0
        };
        #[allow(clippy::as_conversions)]
        Ok(MinorUnit::new((value * scale).round() as i64))
    }
}

/// Converter for processors with float JSON amount fields.
#[derive(Clone, Copy, Debug)]
pub struct FloatMajorUnitForConnector;

impl AmountConvertor for FloatMajorUnitForConnector {
    type Output = FloatMajorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError> {
        #[allow(clippy::as_conversions)]
        let minor = amount.get_amount_as_i64() as f64;
        let value = if currency.is_zero_decimal_currency() {
            minor
        } else if currency.is_three_decimal_currency() {
            minor / 1000.0
        } else {
            minor / 100.0
        };
        Ok(FloatMajorUnit::new(value))
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError> {
        let scale = if currency.is_zero_decimal_currency() {
            1.0
        } else if currency.is_three_decimal_currency() {
            1000.0
        } else {
            100.0
        };
        #[allow(clippy::as_conversions)]
        Ok(MinorUnit::new((amount.0 * scale).round() as i64))
    }
}

/// Converter for processors that take minor units as a JSON integer.
#[derive(Clone, Copy, Debug)]
pub struct MinorUnitForConnector;

impl AmountConvertor for MinorUnitForConnector {
    type Output = MinorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        _currency: Currency,
    ) -> CustomResult<Self::Output, ParsingError> {
        Ok(amount)
    }

    fn convert_back(
        &self,
        amount: Self::Output,
        _currency: Currency,
    ) -> CustomResult<MinorUnit, ParsingError> {
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimal_major_string() {
        let converted = StringMajorUnitForConnector
            .convert(MinorUnit::new(100), Currency::USD)
            .expect("two-decimal conversion");
        assert_eq!(converted.get_amount_as_string(), "1.00");

        let converted = StringMajorUnitForConnector
            .convert(MinorUnit::new(5), Currency::USD)
            .expect("two-decimal conversion");
        assert_eq!(converted.get_amount_as_string(), "0.05");

        let converted = StringMajorUnitForConnector
            .convert(MinorUnit::new(123456), Currency::USD)
            .expect("two-decimal conversion");
        assert_eq!(converted.get_amount_as_string(), "1234.56");
    }

    #[test]
    fn zero_and_three_decimal_major_string() {
        let yen = StringMajorUnitForConnector
            .convert(MinorUnit::new(100), Currency::JPY)
            .expect("zero-decimal conversion");
        assert_eq!(yen.get_amount_as_string(), "100");

        let dinar = StringMajorUnitForConnector
            .convert(MinorUnit::new(1500), Currency::BHD)
            .expect("three-decimal conversion");
        assert_eq!(dinar.get_amount_as_string(), "1.500");
    }

    #[test]
    fn minor_string_has_no_decimal_point() {
        let converted = StringMinorUnitForConnector
            .convert(MinorUnit::new(100), Currency::USD)
            .expect("minor-unit conversion");
        assert_eq!(converted.get_amount_as_string(), "100");
    }

    #[test]
    fn major_string_round_trips() {
        let converter = StringMajorUnitForConnector;
        let original = MinorUnit::new(12345);
        let wire = converter
            .convert(original, Currency::USD)
            .expect("conversion");
        let back = converter
            .convert_back(wire, Currency::USD)
            .expect("round trip");
        assert_eq!(back, original);
    }

    #[test]
    fn float_major_unit_divides_by_exponent() {
        let converted = FloatMajorUnitForConnector
            .convert(MinorUnit::new(150), Currency::USD)
            .expect("float conversion");
        assert_eq!(converted.get_amount_as_f64(), 1.5);
    }
}
