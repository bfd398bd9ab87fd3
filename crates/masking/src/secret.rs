use core::fmt;
use std::marker::PhantomData;

use crate::{strategy::Strategy, PeekInterface, WithType};

/// A value that must not leak into logs.
///
/// The only ways to the inner value are [`PeekInterface::peek`] (borrow) and
/// [`crate::ExposeInterface::expose`] (consume). `Debug` delegates to the
/// masking [`Strategy`] chosen as the second type parameter.
pub struct Secret<S, I = WithType>
where
    I: Strategy<S>,
{
    pub(crate) inner_secret: S,
    pub(crate) marker: PhantomData<I>,
}

impl<S, I> Secret<S, I>
where
    I: Strategy<S>,
{
    /// Wrap a secret value.
    pub fn new(secret: S) -> Self {
        Self {
            inner_secret: secret,
            marker: PhantomData,
        }
    }
}

impl<S, I> PeekInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn peek(&self) -> &S {
        &self.inner_secret
    }
}

impl<S, I> From<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn from(secret: S) -> Self {
        Self::new(secret)
    }
}

impl<S, I> Clone for Secret<S, I>
where
    S: Clone,
    I: Strategy<S>,
{
    fn clone(&self) -> Self {
        Self {
            inner_secret: self.inner_secret.clone(),
            marker: PhantomData,
        }
    }
}

impl<S, I> PartialEq for Secret<S, I>
where
    S: PartialEq,
    I: Strategy<S>,
{
    fn eq(&self, other: &Self) -> bool {
        self.peek().eq(other.peek())
    }
}

impl<S, I> Eq for Secret<S, I>
where
    S: Eq,
    I: Strategy<S>,
{
}

impl<S, I> std::hash::Hash for Secret<S, I>
where
    S: std::hash::Hash,
    I: Strategy<S>,
{
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.peek().hash(state);
    }
}

impl<S, I> fmt::Debug for Secret<S, I>
where
    I: Strategy<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        I::fmt(&self.inner_secret, f)
    }
}

impl<S, I> Default for Secret<S, I>
where
    S: Default,
    I: Strategy<S>,
{
    fn default() -> Self {
        S::default().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_the_value() {
        let secret: Secret<String> = Secret::new("4111111111111111".to_string());
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("4111"));
        assert!(rendered.contains("String"));
    }

    #[test]
    fn peek_borrows_without_consuming() {
        let secret: Secret<String> = "737".to_string().into();
        assert_eq!(secret.peek(), "737");
        assert_eq!(secret.peek(), "737");
    }
}
