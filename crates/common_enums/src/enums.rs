//! Core enums: currencies, countries, card networks, statuses, and the
//! normalized verification-code taxonomies callers branch on.

use serde::{Deserialize, Serialize};

/// Processor environment. Selects the base URL (or, for processors without a
/// sandbox host, a per-request test flag).
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Environment {
    /// Processor test environment.
    #[default]
    Sandbox,
    /// Live processing.
    Production,
}

/// ISO 4217 currency codes used by the supported processors.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[rustfmt::skip]
pub enum Currency {
    AED, AUD, BHD, BRL, CAD, CHF, CLP, CNY, CZK, DKK, EUR, GBP, HKD, HUF, IDR,
    ILS, INR, IQD, JOD, JPY, KRW, KWD, LYD, MXN, MYR, NOK, NZD, OMR, PHP, PLN,
    RON, SAR, SEK, SGD, THB, TND, TRY, TWD,
    #[default]
    USD,
    VND, ZAR,
}

impl Currency {
    /// Currencies whose minor unit equals the major unit (exponent 0).
    pub fn is_zero_decimal_currency(self) -> bool {
        matches!(self, Self::CLP | Self::JPY | Self::KRW | Self::VND)
    }

    /// Currencies with a three-decimal exponent.
    pub fn is_three_decimal_currency(self) -> bool {
        matches!(
            self,
            Self::BHD | Self::IQD | Self::JOD | Self::KWD | Self::LYD | Self::OMR | Self::TND
        )
    }

    /// ISO 4217 numeric code, required by processors with numeric currency
    /// fields.
    pub fn iso_4217_numeric(self) -> &'static str {
        match self {
            Self::AED => "784",
            Self::AUD => "036",
            Self::BHD => "048",
            Self::BRL => "986",
            Self::CAD => "124",
            Self::CHF => "756",
            Self::CLP => "152",
            Self::CNY => "156",
            Self::CZK => "203",
            Self::DKK => "208",
            Self::EUR => "978",
            Self::GBP => "826",
            Self::HKD => "344",
            Self::HUF => "348",
            Self::IDR => "360",
            Self::ILS => "376",
            Self::INR => "356",
            Self::IQD => "368",
            Self::JOD => "400",
            Self::JPY => "392",
            Self::KRW => "410",
            Self::KWD => "414",
            Self::LYD => "434",
            Self::MXN => "484",
            Self::MYR => "458",
            Self::NOK => "578",
            Self::NZD => "554",
            Self::OMR => "512",
            Self::PHP => "608",
            Self::PLN => "985",
            Self::RON => "946",
            Self::SAR => "682",
            Self::SEK => "752",
            Self::SGD => "702",
            Self::THB => "764",
            Self::TND => "788",
            Self::TRY => "949",
            Self::TWD => "901",
            Self::USD => "840",
            Self::VND => "704",
            Self::ZAR => "710",
        }
    }
}

/// ISO 3166-1 alpha-2 country codes.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[rustfmt::skip]
pub enum CountryAlpha2 {
    AD, AE, AF, AG, AI, AL, AM, AO, AQ, AR, AS, AT, AU, AW, AX, AZ, BA, BB,
    BD, BE, BF, BG, BH, BI, BJ, BL, BM, BN, BO, BQ, BR, BS, BT, BV, BW, BY,
    BZ, CA, CC, CD, CF, CG, CH, CI, CK, CL, CM, CN, CO, CR, CU, CV, CW, CX,
    CY, CZ, DE, DJ, DK, DM, DO, DZ, EC, EE, EG, EH, ER, ES, ET, FI, FJ, FK,
    FM, FO, FR, GA, GB, GD, GE, GF, GG, GH, GI, GL, GM, GN, GP, GQ, GR, GS,
    GT, GU, GW, GY, HK, HM, HN, HR, HT, HU, ID, IE, IL, IM, IN, IO, IQ, IR,
    IS, IT, JE, JM, JO, JP, KE, KG, KH, KI, KM, KN, KP, KR, KW, KY, KZ, LA,
    LB, LC, LI, LK, LR, LS, LT, LU, LV, LY, MA, MC, MD, ME, MF, MG, MH, MK,
    ML, MM, MN, MO, MP, MQ, MR, MS, MT, MU, MV, MW, MX, MY, MZ, NA, NC, NE,
    NF, NG, NI, NL, NO, NP, NR, NU, NZ, OM, PA, PE, PF, PG, PH, PK, PL, PM,
    PN, PR, PS, PT, PW, PY, QA, RE, RO, RS, RU, RW, SA, SB, SC, SD, SE, SG,
    SH, SI, SJ, SK, SL, SM, SN, SO, SR, SS, ST, SV, SX, SY, SZ, TC, TD, TF,
    TG, TH, TJ, TK, TL, TM, TN, TO, TR, TT, TV, TW, TZ, UA, UG, UM, US, UY,
    UZ, VA, VC, VE, VG, VI, VN, VU, WF, WS, YE, YT, ZA, ZM, ZW,
}

/// Card scheme of the presented card.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CardNetwork {
    /// Scheme not recognized or not supplied.
    #[default]
    Unknown,
    /// Visa.
    Visa,
    /// Mastercard.
    Mastercard,
    /// American Express.
    AmericanExpress,
    /// Discover.
    Discover,
    /// JCB.
    JCB,
    /// UnionPay.
    UnionPay,
}

/// Where the transaction sits in its lifecycle after a processor reply.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttemptStatus {
    /// Authorization approved, funds held, not yet captured.
    Authorized,
    /// Captured (or sale approved).
    Charged,
    /// Authorization reversed before settlement.
    Voided,
    /// Processor declined or errored the attempt.
    Failure,
    /// Reply received but state not yet final.
    #[default]
    Pending,
}

impl AttemptStatus {
    /// Whether the attempt reached an approved state.
    pub fn is_approved(self) -> bool {
        matches!(self, Self::Authorized | Self::Charged | Self::Voided)
    }
}

/// Refund outcome reported by the processor.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RefundStatus {
    /// Refund accepted.
    Success,
    /// Refund rejected.
    Failure,
    /// Refund accepted but not yet final.
    #[default]
    Pending,
}

/// Credential-on-file taxonomy: who initiated the transaction and whether the
/// stored credential is being created or replayed. Drives per-processor COF
/// indicators, billing-type flags, and stored-card markers.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProcessingInitiator {
    /// Cardholder-initiated first use, card stored for later.
    InitialCardOnFile,
    /// First transaction of a recurring agreement.
    InitialRecurring,
    /// Cardholder-initiated use of an already-stored card.
    StoredCardholderInitiated,
    /// Merchant-initiated use of an already-stored card.
    StoredMerchantInitiated,
    /// Subsequent installment of a recurring agreement.
    FollowingRecurring,
}

/// Kind of asynchronous transaction event delivered by a processor webhook.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionEventType {
    /// A capture settled or was accepted asynchronously.
    Capture,
    /// An authorization was reversed.
    Void,
    /// A refund completed.
    Refund,
}

/// Kind of token a processor minted during an operation.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TokenType {
    /// Customer-level profile token.
    Customer,
    /// Payment-instrument token.
    Payment,
    /// Network token reference.
    NetworkToken,
}

/// Normalized address-verification outcome. `Unknown` is the total-mapping
/// default for codes a processor never documented.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AvsResponse {
    /// Raw code not in the processor's documented table.
    #[default]
    Unknown,
    /// Issuer or processor errored while checking.
    Error,
    /// Issuer does not support AVS for this card or country.
    Unsupported,
    /// Check not performed.
    Skipped,
    /// Full match on every checked component.
    Match,
    /// No component matched.
    NoMatch,
    /// Nine-digit ZIP and street address both match.
    Zip9MatchAddressMatch,
    /// Nine-digit ZIP matches, street address does not.
    Zip9MatchAddressNoMatch,
    /// Five-digit ZIP and street address both match.
    Zip5MatchAddressMatch,
    /// Five-digit ZIP matches, street address does not.
    Zip5MatchAddressNoMatch,
    /// ZIP (precision unspecified) and street address both match.
    ZipMatchAddressMatch,
    /// Street address matches, ZIP does not.
    ZipNoMatchAddressMatch,
    /// ZIP matches, street address could not be verified.
    ZipMatchAddressUnverified,
    /// Street address matches, ZIP could not be verified.
    ZipUnverifiedAddressMatch,
    /// Cardholder name does not match.
    NameNoMatch,
    /// Name and ZIP match, street address does not.
    NameMatchZipMatchAddressNoMatch,
    /// Name and street address match, ZIP does not.
    NameMatchZipNoMatchAddressMatch,
    /// Name matches, neither ZIP nor street address match.
    NameMatchZipNoMatchAddressNoMatch,
}

/// Normalized card-verification-value outcome.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CvvResponse {
    /// Raw code not in the processor's documented table.
    #[default]
    Unknown,
    /// Issuer gave no answer.
    NoResponse,
    /// Issuer or processor errored while checking.
    Error,
    /// Issuer does not support CVV checks.
    Unsupported,
    /// CVV matches.
    Match,
    /// CVV does not match.
    NoMatch,
    /// CVV present but not processed.
    NotProcessed,
    /// CVV should have been present and was not.
    RequiredButMissing,
    /// Issuer reports the CVV data as suspicious.
    Suspicious,
    /// Check deliberately skipped.
    Skipped,
}

/// Real-time account-updater outcome.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RtauStatus {
    /// Updater did not run or returned nothing.
    #[default]
    NoResponse,
    /// Updater returned an unrecognized code.
    Unknown,
    /// Card number or expiry changed; updated fields accompany this status.
    CardChanged,
    /// Card expired with no replacement on file.
    CardExpired,
    /// Account closed; stop charging it.
    CloseAccount,
    /// Issuer asks the merchant to contact the cardholder.
    ContactCardAccountHolder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_exponent_classification() {
        assert!(Currency::JPY.is_zero_decimal_currency());
        assert!(Currency::BHD.is_three_decimal_currency());
        assert!(!Currency::USD.is_zero_decimal_currency());
        assert!(!Currency::USD.is_three_decimal_currency());
    }

    #[test]
    fn environment_default_is_sandbox() {
        assert_eq!(Environment::default(), Environment::Sandbox);
    }

    #[test]
    fn avs_serializes_snake_case() {
        let value = serde_json::to_string(&AvsResponse::Zip5MatchAddressMatch)
            .expect("serializable enum");
        assert_eq!(value, "\"zip5_match_address_match\"");
    }
}
