use crate::{Secret, Strategy};

/// Borrow the inner secret value.
pub trait PeekInterface<S> {
    /// Only borrowing access to the secret value.
    fn peek(&self) -> &S;
}

/// Consume a secret and return the inner value.
pub trait ExposeInterface<S> {
    /// Consume the wrapper and hand back the secret.
    fn expose(self) -> S;
}

/// Expose helpers over optional secrets.
pub trait ExposeOptionInterface<S> {
    /// Clone and expose the inner value, defaulting when absent.
    fn expose_option(&self) -> S;
}

impl<S, I> ExposeInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn expose(self) -> S {
        self.inner_secret
    }
}

impl<S, I> ExposeOptionInterface<Option<S>> for Option<Secret<S, I>>
where
    S: Clone,
    I: Strategy<S>,
{
    fn expose_option(&self) -> Option<S> {
        self.as_ref().map(|secret| secret.peek().clone())
    }
}

impl<I> ExposeOptionInterface<String> for Option<Secret<String, I>>
where
    I: Strategy<String>,
{
    fn expose_option(&self) -> String {
        self.as_ref()
            .map(|secret| secret.peek().clone())
            .unwrap_or_default()
    }
}
