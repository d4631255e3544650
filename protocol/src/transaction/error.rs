use thiserror::Error;

/// Errors produced by the transaction factory.
///
/// A decode either yields a whole [`Transaction`](super::Transaction) or
/// one of these; nothing partially built ever escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// `transaction.type` is not a kind this crate knows.
    #[error("unimplemented transaction with type {0} (0x{0:04X})")]
    UnknownType(u16),

    /// An aggregate was found inside another aggregate.
    #[error("nested aggregate at inner index {index}")]
    NestedAggregate { index: usize },

    /// An address-or-alias field had a shape other than a hex string or an
    /// object carrying `address` or `id`.
    #[error("Recipient type not recognised: {0}")]
    UnrecognisedRecipient(String),

    /// A required field is absent or null.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field is present but could not be parsed.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A collection is longer than its count field in the binary layout.
    #[error("`{field}` has {len} entries, too many for the binary layout")]
    Oversized { field: &'static str, len: usize },
}

impl DecodingError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
