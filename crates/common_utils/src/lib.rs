//! Utilities shared across the payswitch workspace: errors, amount units,
//! request plumbing, crypto, and parsing helpers.

#![warn(missing_docs)]

pub mod consts;
pub mod crypto;
pub mod date_time;
pub mod errors;
pub mod ext_traits;
pub mod pii;
pub mod request;
pub mod types;
