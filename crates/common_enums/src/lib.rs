//! Enums shared across the payswitch workspace.

#![warn(missing_docs)]

pub mod enums;

pub use enums::*;
