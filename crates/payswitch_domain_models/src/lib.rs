//! Processor-independent types shared by every connector.
//!
//! The model follows a single pattern: a generic [`router_data::RouterData`]
//! carries one flow's request payload into a connector and the normalized
//! response (or a normalized error) back out. Connectors convert between
//! these types and their own wire formats with `TryFrom` implementations.

pub mod address;
pub mod payment_method_data;
pub mod router_data;
pub mod router_flow_types;
pub mod router_request_types;
pub mod router_response_types;
pub mod types;
