//! Connector endpoint configuration.

use common_enums::Environment;

/// Endpoints for one connector.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ConnectorParams {
    /// Primary API host.
    pub base_url: String,
    /// Host for auxiliary APIs when the connector splits them, such as a
    /// separate reporting or query endpoint.
    pub secondary_base_url: Option<String>,
}

impl ConnectorParams {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            secondary_base_url: None,
        }
    }
}

/// Base URLs for every supported connector.
///
/// [`Connectors::for_environment`] fills in the processors' published hosts;
/// deserializing from configuration lets deployments override any of them,
/// which Adyen live traffic requires since its host carries a
/// merchant-specific prefix.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Connectors {
    pub adyen: ConnectorParams,
    pub authorizedotnet: ConnectorParams,
    pub checkout: ConnectorParams,
    pub cybersource: ConnectorParams,
    pub nmi: ConnectorParams,
    pub orbital: ConnectorParams,
}

impl Connectors {
    /// Published endpoints for the given environment.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Sandbox => Self {
                adyen: ConnectorParams::new("https://checkout-test.adyen.com/"),
                authorizedotnet: ConnectorParams::new("https://apitest.authorize.net/"),
                checkout: ConnectorParams::new("https://api.sandbox.checkout.com/"),
                cybersource: ConnectorParams::new("https://apitest.cybersource.com/"),
                nmi: ConnectorParams::new("https://secure.nmi.com/"),
                orbital: ConnectorParams::new("https://orbitalvar1.chasepaymentech.com/"),
            },
            Environment::Production => Self {
                adyen: ConnectorParams::new("https://checkout-live.adyenpayments.com/"),
                authorizedotnet: ConnectorParams::new("https://api.authorize.net/"),
                checkout: ConnectorParams::new("https://api.checkout.com/"),
                cybersource: ConnectorParams::new("https://api.cybersource.com/"),
                nmi: ConnectorParams::new("https://secure.nmi.com/"),
                orbital: ConnectorParams::new("https://orbital1.chasepaymentech.com/"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_and_production_differ() {
        let sandbox = Connectors::for_environment(Environment::Sandbox);
        let production = Connectors::for_environment(Environment::Production);
        assert_ne!(sandbox.adyen.base_url, production.adyen.base_url);
        // NMI keys off a per-request flag instead of a separate host.
        assert_eq!(sandbox.nmi.base_url, production.nmi.base_url);
    }
}
