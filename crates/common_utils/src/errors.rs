//! Error types for universal use.

/// `Result` with the error wrapped in an [`error_stack::Report`].
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Failure while parsing a value or wire body.
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    /// Could not deserialize bytes into the named structure.
    #[error("Failed to parse {0}")]
    StructParseFailure(&'static str),
    /// Could not serialize the named structure for the wire.
    #[error("Failed to serialize {0}")]
    EncodeError(&'static str),
    /// Amount conversion between units failed.
    #[error("Failed to convert amount between units")]
    AmountConversionFailure,
}

/// Input that failed validation before any wire activity.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField {
        /// Name of the absent field.
        field_name: String,
    },
    /// A field carried an unusable value.
    #[error("Incorrect value provided for field: {field_name}")]
    IncorrectValueProvided {
        /// Name of the offending field.
        field_name: &'static str,
    },
}

/// Cryptographic primitive failures.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Signing the message failed.
    #[error("Failed to sign message")]
    MessageSigningFailed,
    /// Signature verification failed.
    #[error("Failed to verify signature")]
    SignatureVerificationFailed,
}
