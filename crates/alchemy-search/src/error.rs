//! Error types for recipe search.

use alchemy_index::IndexError;
use thiserror::Error;

/// Errors that can occur before a search starts.
///
/// Unresolvable elements and short result lists are not errors: they come
/// back as placeholder leaves, unresolved paths, or fewer solutions than
/// requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Target is neither a base element nor known to the index.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Target name is empty after trimming.
    #[error("Empty target element")]
    EmptyTarget,

    /// Requested result quota is not positive.
    #[error("Invalid quota: {0} (must be at least 1)")]
    InvalidQuota(usize),

    /// Unrecognized search mode string.
    #[error("Invalid search mode: {0} (expected 'single' or 'multiple')")]
    InvalidMode(String),

    /// Unrecognized search strategy string.
    #[error("Invalid search strategy: {0} (expected 'bfs' or 'dfs')")]
    InvalidStrategy(String),

    /// Unrecognized output kind string.
    #[error("Invalid output kind: {0} (expected 'tree' or 'path')")]
    InvalidOutput(String),

    /// Error from building the recipe index.
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

impl SearchError {
    /// Returns true if the error means the target does not exist.
    ///
    /// Callers map this to their own not-found signal; every other
    /// variant is an invalid request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchError::ElementNotFound(_))
    }
}

/// Result type for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_element_not_found() {
        let err = SearchError::ElementNotFound("unicorn".to_string());
        assert_eq!(err.to_string(), "Element not found: unicorn");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_display_invalid_quota() {
        let err = SearchError::InvalidQuota(0);
        assert_eq!(err.to_string(), "Invalid quota: 0 (must be at least 1)");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_display_invalid_mode() {
        let err = SearchError::InvalidMode("many".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid search mode: many (expected 'single' or 'multiple')"
        );
    }

    #[test]
    fn test_error_from_index_error() {
        let err: SearchError = IndexError::EmptyElement.into();
        assert!(matches!(err, SearchError::Index(_)));
        assert_eq!(err.to_string(), "Index error: empty element name");
    }
}
