//! Secret-keeping wrapper types for card data and credentials.
//!
//! Values wrapped in [`Secret`] cannot be reached accidentally: `Debug`
//! prints a mask and access requires an explicit [`PeekInterface::peek`] or
//! [`ExposeInterface::expose`] call.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use zeroize::Zeroize as ZeroizableSecret;

mod abs;
mod maskable;
mod secret;
mod serde_impl;
mod strategy;

pub use abs::{ExposeInterface, ExposeOptionInterface, PeekInterface};
pub use maskable::{Mask, Maskable};
pub use secret::Secret;
pub use serde_impl::masked_serialize;
pub use strategy::{Strategy, WithType, WithoutType};

/// Glob-import target carrying the access traits.
///
/// `use masking::prelude::*;`
pub mod prelude {
    pub use super::{ExposeInterface, ExposeOptionInterface, PeekInterface};
}
