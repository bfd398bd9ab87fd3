use core::fmt;

/// Decides how a secret renders in `Debug` output.
pub trait Strategy<T> {
    /// Write the masked representation of `value`.
    fn fmt(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Mask that names the wrapped type, the default for [`crate::Secret`].
pub struct WithType;

impl<T> Strategy<T> for WithType {
    fn fmt(_: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("*** ")?;
        f.write_str(core::any::type_name::<T>())?;
        f.write_str(" ***")
    }
}

/// Mask that reveals nothing, not even the type.
pub struct WithoutType;

impl<T> Strategy<T> for WithoutType {
    fn fmt(_: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("*** ***")
    }
}
