//! Structured logging facade.

pub use tracing::{debug, error, info, warn};
