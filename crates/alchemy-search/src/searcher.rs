//! Recipe search engine.

use std::time::Instant;

use alchemy_index::Element;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::config::SearchConfig;
use crate::diverse::DiversePathSearch;
use crate::error::{SearchError, SearchResult};
use crate::path::{PathResolver, RecipePath};
use crate::request::{OutputKind, SearchMode, SearchRequest, Strategy};
use crate::result::{SearchOutcome, Solutions};
use crate::traits::RecipeSource;
use crate::tree::RecipeNode;
use crate::trees::{MultiTreeBuilder, SingleTreeBuilder};

/// Main recipe search engine.
///
/// The searcher validates a [`SearchRequest`], dispatches it to the tree
/// builder, path resolver or diverse path search it names, and times the
/// run. It holds no state between calls; one searcher can serve any number
/// of concurrent searches over the same source.
///
/// # Example
///
/// ```rust
/// use alchemy_search::{RecipeIndex, RecipeSearcher, SearchRequest, Strategy};
///
/// let index = RecipeIndex::builder()
///     .recipe("mud", "water", "earth", 1)
///     .recipe("steam", "water", "fire", 1)
///     .build()?;
/// let searcher = RecipeSearcher::new(&index);
///
/// let outcome = searcher.search(&SearchRequest::new("mud"))?;
/// assert_eq!(outcome.stats.nodes_visited, 6);
///
/// let steam = searcher.single_tree("steam", Strategy::Dfs)?;
/// assert_eq!(steam.count(), 1);
///
/// assert!(searcher.search(&SearchRequest::new("unicorn")).unwrap_err().is_not_found());
/// # Ok::<(), alchemy_search::SearchError>(())
/// ```
pub struct RecipeSearcher<'a> {
    source: &'a dyn RecipeSource,
    config: SearchConfig,
}

impl<'a> RecipeSearcher<'a> {
    /// Creates a searcher with default configuration.
    pub fn new(source: &'a dyn RecipeSource) -> Self {
        Self::with_config(source, SearchConfig::default())
    }

    /// Creates a searcher with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use alchemy_search::{RecipeIndex, RecipeSearcher, SearchConfig};
    /// use std::time::Duration;
    ///
    /// let index = RecipeIndex::builder().recipe("mud", "water", "earth", 1).build()?;
    /// let config = SearchConfig::builder()
    ///     .with_max_workers(2)
    ///     .with_attempt_delay(Duration::ZERO)
    ///     .build();
    ///
    /// let searcher = RecipeSearcher::with_config(&index, config);
    /// assert_eq!(searcher.config().max_workers, 2);
    /// # Ok::<(), alchemy_search::SearchError>(())
    /// ```
    pub fn with_config(source: &'a dyn RecipeSource, config: SearchConfig) -> Self {
        Self { source, config }
    }

    /// Returns a reference to the searcher configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs a search.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchOutcome)` - The trees or paths found and search stats
    /// * `Err(SearchError)` - If the request is invalid or the target is unknown
    ///
    /// An element that cannot be produced is not an error: tree searches
    /// return it as a leaf and path searches as an unresolved path.
    pub fn search(&self, request: &SearchRequest) -> SearchResult<SearchOutcome> {
        self.search_with_token(request, &CancelToken::new())
    }

    /// Runs a search that the caller can abort through `token`.
    ///
    /// Only multiple-mode searches observe the token. An aborted search
    /// returns whatever it had collected, or the usual placeholder.
    ///
    /// A token is single-use: once a search reaches its quota or is aborted
    /// the token never runs again, and any later multiple-mode search given
    /// the same token returns only the placeholder. Pass a fresh
    /// [`CancelToken`] to every call.
    pub fn search_with_token(
        &self,
        request: &SearchRequest,
        token: &CancelToken,
    ) -> SearchResult<SearchOutcome> {
        self.validate(request)?;

        let start = Instant::now();
        let target = &request.target;
        debug!(
            target = %target,
            mode = %request.mode,
            strategy = %request.strategy,
            output = %request.output,
            quota = request.quota,
            "search started"
        );

        let (solutions, visits) = match (request.output, request.mode) {
            (OutputKind::Tree, SearchMode::Single) => {
                let builder = SingleTreeBuilder::new(self.source);
                let (tree, visits) = match request.strategy {
                    Strategy::Bfs => builder.build_bfs(target),
                    Strategy::Dfs => builder.build_dfs(target),
                };
                (Solutions::Trees(vec![tree]), visits)
            }
            (OutputKind::Tree, SearchMode::Multiple) => {
                let builder = MultiTreeBuilder::new(self.source, token);
                match request.strategy {
                    Strategy::Bfs => {
                        let (tree, visits) = builder.build_bfs(target);
                        (Solutions::Trees(vec![tree]), visits)
                    }
                    Strategy::Dfs => {
                        let (trees, visits) = builder.build_dfs(target, request.quota);
                        (Solutions::Trees(trees), visits)
                    }
                }
            }
            (OutputKind::Path, SearchMode::Single) => {
                let resolver = PathResolver::new(self.source);
                let (path, visits) = match request.strategy {
                    Strategy::Bfs => resolver.resolve_bfs(target),
                    Strategy::Dfs => resolver.resolve_dfs(target),
                };
                (Solutions::Paths(vec![path]), visits)
            }
            (OutputKind::Path, SearchMode::Multiple) => {
                let search = DiversePathSearch::new(self.source, &self.config, token);
                let (paths, visits) = search.run(target, request.strategy, request.quota);
                (Solutions::Paths(paths), visits)
            }
        };

        let outcome = SearchOutcome::new(solutions, visits, start.elapsed());
        debug!(
            target = %target,
            solutions = outcome.stats.solutions,
            nodes_visited = outcome.stats.nodes_visited,
            elapsed_ms = outcome.stats.millis(),
            "search finished"
        );
        Ok(outcome)
    }

    fn validate(&self, request: &SearchRequest) -> SearchResult<()> {
        if request.target.is_empty() {
            return Err(SearchError::EmptyTarget);
        }
        if request.quota == 0 {
            return Err(SearchError::InvalidQuota(request.quota));
        }
        if !self.source.contains(&request.target) {
            return Err(SearchError::ElementNotFound(request.target.to_string()));
        }
        Ok(())
    }

    /// Finds one production tree.
    pub fn single_tree(
        &self,
        target: impl Into<Element>,
        strategy: Strategy,
    ) -> SearchResult<SearchOutcome> {
        self.search(&SearchRequest::single(target).with_strategy(strategy))
    }

    /// Finds up to `quota` production trees.
    ///
    /// With [`Strategy::Bfs`] this is always one tree whose root lists every
    /// top-level recipe of the target; see [`MultiTreeBuilder::build_bfs`].
    pub fn multiple_trees(
        &self,
        target: impl Into<Element>,
        strategy: Strategy,
        quota: usize,
    ) -> SearchResult<SearchOutcome> {
        self.search(&SearchRequest::multiple(target, quota).with_strategy(strategy))
    }

    /// Finds one production path.
    pub fn single_path(
        &self,
        target: impl Into<Element>,
        strategy: Strategy,
    ) -> SearchResult<SearchOutcome> {
        self.search(&SearchRequest::single(target).with_strategy(strategy).paths())
    }

    /// Finds up to `quota` distinct production paths.
    pub fn multiple_paths(
        &self,
        target: impl Into<Element>,
        strategy: Strategy,
        quota: usize,
    ) -> SearchResult<SearchOutcome> {
        self.search(
            &SearchRequest::multiple(target, quota)
                .with_strategy(strategy)
                .paths(),
        )
    }

    /// Returns the tree of a single-tree search.
    pub fn tree_for(
        &self,
        target: impl Into<Element>,
        strategy: Strategy,
    ) -> SearchResult<RecipeNode> {
        let target = target.into();
        let outcome = self.single_tree(target.clone(), strategy)?;
        match outcome.solutions {
            Solutions::Trees(mut trees) if !trees.is_empty() => Ok(trees.swap_remove(0)),
            _ => Ok(RecipeNode::leaf(target)),
        }
    }

    /// Returns the single path of a single-path search.
    pub fn path_for(
        &self,
        target: impl Into<Element>,
        strategy: Strategy,
    ) -> SearchResult<RecipePath> {
        let target = target.into();
        let outcome = self.single_path(target.clone(), strategy)?;
        match outcome.solutions {
            Solutions::Paths(mut paths) if !paths.is_empty() => Ok(paths.swap_remove(0)),
            _ => Ok(RecipePath::unresolved(target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::SearchState;
    use alchemy_index::RecipeIndex;
    use std::time::Duration;

    fn create_mud_index() -> RecipeIndex {
        RecipeIndex::builder()
            .recipe("mud", "water", "earth", 1)
            .recipe("steam", "water", "fire", 1)
            .build()
            .unwrap()
    }

    fn create_stone_index() -> RecipeIndex {
        RecipeIndex::builder()
            .recipe("mud", "water", "earth", 1)
            .recipe("lava", "earth", "fire", 1)
            .recipe("dust", "earth", "air", 1)
            .recipe("stone", "lava", "air", 2)
            .recipe("stone", "mud", "lava", 2)
            .recipe("stone", "dust", "fire", 2)
            .build()
            .unwrap()
    }

    fn fast_searcher(index: &RecipeIndex) -> RecipeSearcher<'_> {
        let config = SearchConfig::builder()
            .with_attempt_delay(Duration::ZERO)
            .build();
        RecipeSearcher::with_config(index, config)
    }

    #[test]
    fn test_single_bfs_mud_scenario() {
        let index = create_mud_index();
        let searcher = RecipeSearcher::new(&index);

        let outcome = searcher.search(&SearchRequest::new("mud")).unwrap();

        let tree = outcome.first_tree().unwrap();
        assert_eq!(tree.render(), "mud\n├── water\n└── earth\n");
        assert_eq!(outcome.stats.nodes_visited, 6);
        assert_eq!(outcome.stats.solutions, 1);
    }

    #[test]
    fn test_single_dfs_steam_scenario() {
        let index = create_mud_index();
        let searcher = RecipeSearcher::new(&index);

        let tree = searcher.tree_for("Steam", Strategy::Dfs).unwrap();

        let children: Vec<&str> = tree.ingredients.iter().map(|c| c.element.as_str()).collect();
        assert_eq!(children, vec!["water", "fire"]);
    }

    #[test]
    fn test_multiple_trees_single_rule() {
        let index = create_mud_index();
        let searcher = RecipeSearcher::new(&index);

        let outcome = searcher.multiple_trees("mud", Strategy::Dfs, 3).unwrap();

        assert_eq!(outcome.count(), 1);
    }

    #[test]
    fn test_multiple_trees_huge_quota() {
        let index = create_mud_index();
        let searcher = RecipeSearcher::new(&index);

        let outcome = searcher
            .multiple_trees("mud", Strategy::Dfs, usize::MAX)
            .unwrap();

        assert_eq!(outcome.count(), 1);
        assert!(outcome.first_tree().unwrap().is_resolved(&index));
    }

    #[test]
    fn test_multiple_trees_bfs_is_one_fan_out_tree() {
        let index = create_stone_index();
        let searcher = RecipeSearcher::new(&index);

        let outcome = searcher.multiple_trees("stone", Strategy::Bfs, 3).unwrap();

        assert_eq!(outcome.count(), 1);
        assert_eq!(outcome.first_tree().unwrap().ingredients.len(), 6);
    }

    #[test]
    fn test_single_path() {
        let index = create_stone_index();
        let searcher = RecipeSearcher::new(&index);

        let path = searcher.path_for("stone", Strategy::Bfs).unwrap();

        assert!(path.found);
        assert!(path.replays_to_target(&index));
    }

    #[test]
    fn test_multiple_paths_are_distinct() {
        let index = create_stone_index();
        let searcher = fast_searcher(&index);

        let outcome = searcher.multiple_paths("stone", Strategy::Dfs, 3).unwrap();
        let paths = outcome.solutions.paths().unwrap();

        assert!(!paths.is_empty() && paths.len() <= 3);
        for (i, a) in paths.iter().enumerate() {
            assert!(a.replays_to_target(&index));
            for b in &paths[i + 1..] {
                assert_ne!(a.signature(), b.signature());
            }
        }
    }

    #[test]
    fn test_unknown_target_is_not_found() {
        let index = create_mud_index();
        let searcher = RecipeSearcher::new(&index);

        let err = searcher.search(&SearchRequest::new("unicorn")).unwrap_err();

        assert_eq!(err, SearchError::ElementNotFound("unicorn".to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_requests() {
        let index = create_mud_index();
        let searcher = RecipeSearcher::new(&index);

        assert_eq!(
            searcher.search(&SearchRequest::new("  ")).unwrap_err(),
            SearchError::EmptyTarget
        );
        assert_eq!(
            searcher.multiple_trees("mud", Strategy::Dfs, 0).unwrap_err(),
            SearchError::InvalidQuota(0)
        );
        // quota is checked before existence
        assert_eq!(
            searcher.multiple_paths("unicorn", Strategy::Bfs, 0).unwrap_err(),
            SearchError::InvalidQuota(0)
        );
    }

    #[test]
    fn test_base_target_for_every_shape() {
        let index = create_mud_index();
        let searcher = fast_searcher(&index);

        for strategy in [Strategy::Bfs, Strategy::Dfs] {
            let tree = searcher.tree_for("water", strategy).unwrap();
            assert_eq!(tree, RecipeNode::leaf(Element::new("water")));

            let path = searcher.path_for("water", strategy).unwrap();
            assert!(path.found);
            assert!(path.is_empty());

            let outcome = searcher.single_tree("water", strategy).unwrap();
            assert!(outcome.stats.nodes_visited >= 1);
        }
    }

    #[test]
    fn test_search_with_aborted_token() {
        let index = create_stone_index();
        let searcher = fast_searcher(&index);
        let token = CancelToken::new();
        token.abort();

        let request = SearchRequest::multiple("stone", 3).with_strategy(Strategy::Dfs);
        let outcome = searcher.search_with_token(&request, &token).unwrap();

        assert_eq!(outcome.first_tree(), Some(&RecipeNode::leaf(Element::new("stone"))));
        assert_eq!(token.state(), SearchState::Aborted);
    }

    #[test]
    fn test_spent_token_is_not_reusable() {
        let index = create_stone_index();
        let searcher = fast_searcher(&index);
        let request = SearchRequest::multiple("stone", 1).with_strategy(Strategy::Dfs);
        let token = CancelToken::new();

        let first = searcher.search_with_token(&request, &token).unwrap();
        assert!(first.first_tree().unwrap().is_resolved(&index));
        assert_eq!(token.state(), SearchState::QuotaReached);

        let reused = searcher.search_with_token(&request, &token).unwrap();
        assert_eq!(reused.first_tree(), Some(&RecipeNode::leaf(Element::new("stone"))));

        let fresh = searcher
            .search_with_token(&request, &CancelToken::new())
            .unwrap();
        assert!(fresh.first_tree().unwrap().is_resolved(&index));
    }
}
