//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the heritage rules.
/// None of them is transient: the caller has to fix the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("money amount must not be negative: {0}")]
    InvalidMoneyAmount(i64),

    #[error("property count must not be negative: {0}")]
    InvalidPropertyCount(i64),

    #[error("land extension must not be negative: {0}")]
    InvalidLandExtension(i64),

    #[error("property price must not be negative: {0}")]
    InvalidPropertyPrice(i64),

    #[error("land extension m² price must not be negative: {0}")]
    InvalidLandExtensionUnitPrice(i64),

    #[error("member name must not be empty")]
    EmptyName,

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("member is already dead: {0}")]
    MemberCannotBeDead(String),

    #[error("family tree deeper than {limit} generations")]
    TreeTooDeep { limit: usize },

    #[error("siblings share birth date and name: {0}")]
    AmbiguousSiblingOrder(String),

    #[error("value overflow while computing {0}")]
    ValueOverflow(&'static str),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
