//! Search result types.

use std::time::Duration;

use crate::path::RecipePath;
use crate::tree::RecipeNode;

/// Solutions of one search, trees or paths depending on the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solutions {
    /// Production trees.
    Trees(Vec<RecipeNode>),
    /// Production paths.
    Paths(Vec<RecipePath>),
}

impl Solutions {
    /// Returns the number of solutions.
    pub fn len(&self) -> usize {
        match self {
            Solutions::Trees(trees) => trees.len(),
            Solutions::Paths(paths) => paths.len(),
        }
    }

    /// Returns true if there are no solutions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the trees, or `None` for a path search.
    pub fn trees(&self) -> Option<&[RecipeNode]> {
        match self {
            Solutions::Trees(trees) => Some(trees),
            Solutions::Paths(_) => None,
        }
    }

    /// Returns the paths, or `None` for a tree search.
    pub fn paths(&self) -> Option<&[RecipePath]> {
        match self {
            Solutions::Paths(paths) => Some(paths),
            Solutions::Trees(_) => None,
        }
    }
}

/// Result of a search.
///
/// # Example
///
/// ```rust
/// use alchemy_search::{RecipeIndex, RecipeSearcher, SearchRequest};
///
/// let index = RecipeIndex::builder()
///     .recipe("mud", "water", "earth", 1)
///     .build()?;
/// let searcher = RecipeSearcher::new(&index);
///
/// let outcome = searcher.search(&SearchRequest::new("mud"))?;
/// println!("{} nodes in {:?}", outcome.stats.nodes_visited, outcome.stats.duration);
///
/// if let Some(tree) = outcome.first_tree() {
///     print!("{tree}");
/// }
/// # Ok::<(), alchemy_search::SearchError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Trees or paths found.
    pub solutions: Solutions,
    /// Search statistics.
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Creates an outcome, filling in the solution count.
    pub fn new(solutions: Solutions, nodes_visited: usize, duration: Duration) -> Self {
        let stats = SearchStats::new(duration, nodes_visited, solutions.len());
        Self { solutions, stats }
    }

    /// Returns the number of solutions.
    pub fn count(&self) -> usize {
        self.solutions.len()
    }

    /// Returns the first tree of a tree search.
    pub fn first_tree(&self) -> Option<&RecipeNode> {
        self.solutions.trees().and_then(|trees| trees.first())
    }

    /// Returns the first path of a path search.
    pub fn first_path(&self) -> Option<&RecipePath> {
        self.solutions.paths().and_then(|paths| paths.first())
    }
}

/// Statistics from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Wall-clock time of the search.
    pub duration: Duration,
    /// Nodes the search visited; how they are counted depends on the algorithm.
    pub nodes_visited: usize,
    /// Number of solutions returned.
    pub solutions: usize,
}

impl SearchStats {
    /// Creates new search stats.
    pub fn new(duration: Duration, nodes_visited: usize, solutions: usize) -> Self {
        Self {
            duration,
            nodes_visited,
            solutions,
        }
    }

    /// Duration in whole milliseconds.
    pub fn millis(&self) -> u128 {
        self.duration.as_millis()
    }
}
