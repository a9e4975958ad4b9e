//! # alchemy-search
//!
//! Recipe search engine for two-ingredient crafting systems.
//!
//! Given a read-only [`RecipeSource`] (usually an
//! [`alchemy_index::RecipeIndex`]) and a target element, the engine finds
//! how the target can be produced from the base elements:
//!
//! - **Single tree** - one production tree, breadth- or depth-first
//! - **Multiple trees** - up to N alternative trees, ingredients resolved
//!   concurrently and cancelled once the quota is met
//! - **Single path** - one ordered, replayable list of `a + b = c` steps
//!   that never combines an ingredient of equal or higher tier
//! - **Multiple paths** - up to N distinct paths from a pool of randomized,
//!   reproducibly seeded workers
//!
//! ## Quick Start
//!
//! ```rust
//! use alchemy_search::{RecipeIndex, RecipeSearcher, SearchRequest, Strategy};
//!
//! let index = RecipeIndex::builder()
//!     .recipe("mud", "water", "earth", 1)
//!     .recipe("lava", "earth", "fire", 1)
//!     .recipe("stone", "lava", "air", 2)
//!     .recipe("stone", "mud", "lava", 2)
//!     .build()?;
//! let searcher = RecipeSearcher::new(&index);
//!
//! let outcome = searcher.search(&SearchRequest::new("stone"))?;
//! print!("{}", outcome.first_tree().unwrap());
//!
//! let request = SearchRequest::multiple("stone", 2)
//!     .with_strategy(Strategy::Dfs)
//!     .paths();
//! for path in searcher.search(&request)?.solutions.paths().unwrap() {
//!     println!("{}", path.signature());
//! }
//! # Ok::<(), alchemy_search::SearchError>(())
//! ```
//!
//! ## Visit Counts
//!
//! Every search reports `nodes_visited` next to its solutions. The unit
//! depends on the algorithm: recursive calls for the tree DFS, discoveries
//! (base elements included) for the BFS variants, popped elements for the
//! path DFS. Compare counts only between runs of the same search kind.
//!
//! ## Feature Flags
//!
//! - `serde` - Enables `serde` support on the index types
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     alchemy-search                        │
//! │                                                           │
//! │  RecipeSearcher                                           │
//! │  ├── SingleTreeBuilder    (bfs / dfs)                     │
//! │  ├── MultiTreeBuilder     (rayon + bounded channel)       │
//! │  ├── PathResolver         (tier-checked bfs / dfs)        │
//! │  └── DiversePathSearch    (seeded workers, dedup)         │
//! │                                                           │
//! │  Dependencies:                                            │
//! │  └── alchemy-index - RecipeIndex (implements RecipeSource)│
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cancel;
mod config;
mod diverse;
mod error;
mod path;
mod request;
mod result;
mod rng;
mod searcher;
mod traits;
mod tree;
mod trees;

// Public re-exports
pub use cancel::{CancelToken, SearchState};
pub use config::{
    SearchConfig, SearchConfigBuilder, DEFAULT_ATTEMPT_DELAY, DEFAULT_MAX_ATTEMPTS_PER_WORKER,
    DEFAULT_MAX_STALE_ATTEMPTS, DEFAULT_MAX_WORKERS, MAX_STREAM_CAPACITY,
};
pub use diverse::{next_seed, DiversePathSearch, RandomizedResolver};
pub use error::{SearchError, SearchResult};
pub use path::{PathResolver, ProductionStep, RecipePath};
pub use request::{OutputKind, SearchMode, SearchRequest, Strategy};
pub use result::{SearchOutcome, SearchStats, Solutions};
pub use searcher::RecipeSearcher;
pub use traits::RecipeSource;
pub use tree::RecipeNode;
pub use trees::{MultiTreeBuilder, SingleTreeBuilder};

// Re-export commonly used types from dependencies for convenience
pub use alchemy_index::{Element, IngredientPair, RecipeIndex, RecipeRecord, Usage};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<SearchConfig> = None;
        let _: Option<SearchOutcome> = None;
        let _: Option<SearchStats> = None;
        let _: Option<RecipePath> = None;
        let _: Option<SearchResult<()>> = None;
    }

    #[test]
    fn test_re_exports() {
        let element = Element::new("Mud");
        let index = RecipeIndex::builder()
            .recipe("mud", "water", "earth", 1)
            .build()
            .unwrap();
        let source: &dyn RecipeSource = &index;
        assert!(source.contains(&element));
    }
}
