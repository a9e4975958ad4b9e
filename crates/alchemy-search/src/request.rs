//! Search requests.

use std::fmt;
use std::str::FromStr;

use alchemy_index::Element;

use crate::error::SearchError;

/// How many solutions a search asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// One solution.
    #[default]
    Single,
    /// Up to the request's quota of solutions.
    Multiple,
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            _ => Err(SearchError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Multiple => f.write_str("multiple"),
        }
    }
}

/// Traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Breadth-first.
    #[default]
    Bfs,
    /// Depth-first.
    Dfs,
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            _ => Err(SearchError::InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bfs => f.write_str("bfs"),
            Self::Dfs => f.write_str("dfs"),
        }
    }
}

/// Shape of the solutions a search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    /// Production trees.
    #[default]
    Tree,
    /// Tier-respecting production paths.
    Path,
}

impl FromStr for OutputKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "path" => Ok(Self::Path),
            _ => Err(SearchError::InvalidOutput(s.to_string())),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => f.write_str("tree"),
            Self::Path => f.write_str("path"),
        }
    }
}

/// A search for one target element.
///
/// # Example
///
/// ```rust
/// use alchemy_search::{OutputKind, SearchMode, SearchRequest, Strategy};
///
/// let request = SearchRequest::multiple("Stone", 3)
///     .with_strategy(Strategy::Dfs)
///     .paths();
///
/// assert_eq!(request.target.as_str(), "stone");
/// assert_eq!(request.mode, SearchMode::Multiple);
/// assert_eq!(request.output, OutputKind::Path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Element to produce.
    pub target: Element,
    /// One solution or many.
    pub mode: SearchMode,
    /// Traversal order.
    pub strategy: Strategy,
    /// Maximum number of solutions in multiple mode. Ignored in single mode.
    pub quota: usize,
    /// Trees or paths.
    pub output: OutputKind,
}

impl SearchRequest {
    /// Creates a single-solution BFS tree request.
    pub fn new(target: impl Into<Element>) -> Self {
        Self {
            target: target.into(),
            mode: SearchMode::Single,
            strategy: Strategy::default(),
            quota: 1,
            output: OutputKind::default(),
        }
    }

    /// Shorthand for [`new`](Self::new).
    pub fn single(target: impl Into<Element>) -> Self {
        Self::new(target)
    }

    /// Creates a multiple-solution request with the given quota.
    pub fn multiple(target: impl Into<Element>, quota: usize) -> Self {
        Self {
            mode: SearchMode::Multiple,
            quota,
            ..Self::new(target)
        }
    }

    /// Sets the search mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the traversal order.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the solution quota.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    /// Sets the output kind.
    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    /// Asks for production paths.
    pub fn paths(self) -> Self {
        self.with_output(OutputKind::Path)
    }

    /// Asks for production trees.
    pub fn trees(self) -> Self {
        self.with_output(OutputKind::Tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!("single".parse::<SearchMode>().unwrap(), SearchMode::Single);
        assert_eq!(" Multiple ".parse::<SearchMode>().unwrap(), SearchMode::Multiple);

        let err = "many".parse::<SearchMode>().unwrap_err();
        assert!(matches!(err, SearchError::InvalidMode(ref m) if m == "many"));
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("BFS".parse::<Strategy>().unwrap(), Strategy::Bfs);
        assert_eq!("dfs".parse::<Strategy>().unwrap(), Strategy::Dfs);
        assert!(matches!(
            "astar".parse::<Strategy>(),
            Err(SearchError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_parse_output() {
        assert_eq!("tree".parse::<OutputKind>().unwrap(), OutputKind::Tree);
        assert_eq!("Path".parse::<OutputKind>().unwrap(), OutputKind::Path);
        assert!("graph".parse::<OutputKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in [SearchMode::Single, SearchMode::Multiple] {
            assert_eq!(mode.to_string().parse::<SearchMode>().unwrap(), mode);
        }
        for strategy in [Strategy::Bfs, Strategy::Dfs] {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_request_defaults() {
        let request = SearchRequest::new("Mud");
        assert_eq!(request.target.as_str(), "mud");
        assert_eq!(request.mode, SearchMode::Single);
        assert_eq!(request.strategy, Strategy::Bfs);
        assert_eq!(request.output, OutputKind::Tree);
        assert_eq!(request.quota, 1);
    }

    #[test]
    fn test_request_builder_chain() {
        let request = SearchRequest::single("stone")
            .with_mode(SearchMode::Multiple)
            .with_quota(5)
            .with_strategy(Strategy::Dfs)
            .paths();

        assert_eq!(request.mode, SearchMode::Multiple);
        assert_eq!(request.quota, 5);
        assert_eq!(request.strategy, Strategy::Dfs);
        assert_eq!(request.output, OutputKind::Path);
        assert_eq!(request.trees().output, OutputKind::Tree);
    }
}
