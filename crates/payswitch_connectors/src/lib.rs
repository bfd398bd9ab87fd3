//! Processor integrations.
//!
//! One module per processor, each split into a main file implementing the
//! [`payswitch_interfaces::api::ConnectorIntegration`] flows and a
//! `transformers` module holding the wire types and the conversions between
//! them and the canonical model.

pub mod connectors;
pub mod constants;
pub mod types;
pub mod utils;

pub use connectors::{
    Adyen, Authorizedotnet, Checkout, Cybersource, Nmi, Orbital,
};
