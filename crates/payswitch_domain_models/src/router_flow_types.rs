//! Marker types for the supported payment flows. Used as the `Flow`
//! parameter of [`crate::router_data::RouterData`] so each connector can
//! implement one integration per flow.

/// Authorization hold on a card.
#[derive(Clone, Copy, Debug)]
pub struct Authorize;

/// Capture of a previously authorized amount.
#[derive(Clone, Copy, Debug)]
pub struct Capture;

/// Reversal of an unsettled transaction.
#[derive(Clone, Copy, Debug)]
pub struct Void;

/// Refund of a settled transaction.
#[derive(Clone, Copy, Debug)]
pub struct Refund;

/// Settlement-state lookup for a transaction.
#[derive(Clone, Copy, Debug)]
pub struct TSync;
