use common_enums::CountryAlpha2;
use common_utils::pii::Email;
use masking::{PeekInterface, Secret};

/// Billing or shipping address attached to a payment attempt.
///
/// Every field is optional; connectors pick out what their processor
/// requires and fail with a missing-field error when a mandated field
/// is absent.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Address {
    pub first_name: Option<Secret<String>>,
    pub last_name: Option<Secret<String>>,
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub zip: Option<Secret<String>>,
    pub country: Option<CountryAlpha2>,
    pub company: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<Secret<String>>,
}

impl Address {
    /// First and last name joined with a single space, skipping empty parts.
    pub fn full_name(&self) -> Option<Secret<String>> {
        let first = self
            .first_name
            .as_ref()
            .map(|name| name.peek().trim().to_string())
            .filter(|name| !name.is_empty());
        let last = self
            .last_name
            .as_ref()
            .map(|name| name.peek().trim().to_string())
            .filter(|name| !name.is_empty());
        match (first, last) {
            (Some(first), Some(last)) => Some(Secret::new(format!("{first} {last}"))),
            (Some(single), None) | (None, Some(single)) => Some(Secret::new(single)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_both_parts() {
        let address = Address {
            first_name: Some(Secret::new("Ada".to_string())),
            last_name: Some(Secret::new("Lovelace".to_string())),
            ..Address::default()
        };
        assert_eq!(address.full_name().unwrap().peek(), "Ada Lovelace");
    }

    #[test]
    fn full_name_skips_blank_parts() {
        let address = Address {
            first_name: Some(Secret::new("  ".to_string())),
            last_name: Some(Secret::new("Lovelace".to_string())),
            ..Address::default()
        };
        assert_eq!(address.full_name().unwrap().peek(), "Lovelace");
        assert!(Address::default().full_name().is_none());
    }
}
