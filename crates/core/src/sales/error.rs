//! Sales error types.

use thiserror::Error;

/// Reasons a raw store row is discarded before metric computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// Issuance date is missing.
    #[error("issuance date is missing")]
    MissingIssuedAt,

    /// Issuance date could not be parsed.
    #[error("issuance date is not a valid date: {0}")]
    InvalidIssuedAt(String),

    /// Line total is missing.
    #[error("line total is missing")]
    MissingLineTotal,

    /// Line total could not be parsed.
    #[error("line total is not a valid number: {0}")]
    InvalidLineTotal(String),

    /// A numeric field is too large to aggregate.
    #[error("{field} is out of range: {value}")]
    AmountOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value as read from the store.
        value: String,
    },

    /// Sale document identifier is missing.
    #[error("document identifier is missing")]
    MissingDocumentId,
}
