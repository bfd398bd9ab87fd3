use cards::{CardExpiration, CardNumber};
use common_enums::CardNetwork;
use masking::Secret;

/// Card details as supplied by the caller.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Card {
    pub card_number: CardNumber,
    pub card_exp: CardExpiration,
    /// May be empty for stored-credential transactions.
    pub card_cvc: Secret<String>,
    pub card_holder_first_name: Option<Secret<String>>,
    pub card_holder_last_name: Option<Secret<String>>,
    pub card_network: Option<CardNetwork>,
}

impl Card {
    /// The caller-supplied network, falling back to the IIN-inferred one.
    pub fn network(&self) -> CardNetwork {
        self.card_network
            .clone()
            .unwrap_or_else(|| self.card_number.infer_network())
    }
}

/// 3-D Secure authentication results collected outside this library.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ThreeDSecureData {
    pub eci: Option<String>,
    pub cavv: Option<Secret<String>>,
    pub xid: Option<Secret<String>>,
    pub ds_transaction_id: Option<String>,
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn network_prefers_explicit_value() {
        let card = Card {
            card_number: CardNumber::from_str("4111111111111111").unwrap(),
            card_exp: CardExpiration::new(3, 2030).unwrap(),
            card_cvc: Secret::new("123".to_string()),
            card_holder_first_name: None,
            card_holder_last_name: None,
            card_network: Some(CardNetwork::Mastercard),
        };
        assert_eq!(card.network(), CardNetwork::Mastercard);
    }

    #[test]
    fn network_falls_back_to_inference() {
        let card = Card {
            card_number: CardNumber::from_str("4111111111111111").unwrap(),
            card_exp: CardExpiration::new(3, 2030).unwrap(),
            card_cvc: Secret::new("123".to_string()),
            card_holder_first_name: None,
            card_holder_last_name: None,
            card_network: None,
        };
        assert_eq!(card.network(), CardNetwork::Visa);
    }
}
