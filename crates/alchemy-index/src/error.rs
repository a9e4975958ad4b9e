//! Error types for recipe index construction.

use thiserror::Error;

/// Errors that can occur while building a recipe index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A record or base set entry has an empty element name.
    #[error("empty element name")]
    EmptyElement,

    /// Two records for the same result disagree on its tier.
    #[error("conflicting tier for {element}: {existing} vs {found}")]
    ConflictingTier {
        /// The result element.
        element: String,
        /// Tier recorded first.
        existing: u32,
        /// Tier found on a later record.
        found: u32,
    },

    /// A record claims to produce a base element.
    #[error("base element cannot be produced: {0}")]
    BaseElementProduced(String),
}

/// Result type for index operations.
pub type IndexResult<T> = std::result::Result<T, IndexError>;
