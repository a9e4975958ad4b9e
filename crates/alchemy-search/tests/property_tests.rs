//! Property tests over randomly generated tiered indexes.

use std::collections::HashSet;
use std::time::Duration;

use alchemy_index::DEFAULT_BASE_ELEMENTS;
use alchemy_search::Strategy as SearchStrategy;
use alchemy_search::{RecipeIndex, RecipeSearcher, SearchConfig};
use proptest::prelude::*;

/// Product `i` gets tier `i + 1` and only combines base elements or
/// earlier products, so every product is reachable. Kept small: the
/// multi-tree search re-resolves shared ingredients on every branch.
fn tiered_index() -> impl Strategy<Value = RecipeIndex> {
    prop::collection::vec(
        prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..3),
        1..8,
    )
    .prop_map(|products| {
        let mut names: Vec<String> = DEFAULT_BASE_ELEMENTS.iter().map(|s| s.to_string()).collect();
        let mut builder = RecipeIndex::builder();
        for (i, pairs) in products.iter().enumerate() {
            let name = format!("item{i}");
            for (left, right) in pairs {
                let left = left.get(&names).clone();
                let right = right.get(&names).clone();
                builder =
                    builder.recipe(name.as_str(), left.as_str(), right.as_str(), i as u32 + 1);
            }
            names.push(name);
        }
        builder.build().unwrap()
    })
}

fn fast_config() -> SearchConfig {
    SearchConfig::builder()
        .with_attempt_delay(Duration::ZERO)
        .with_max_stale_attempts(8)
        .with_max_attempts_per_worker(32)
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn single_paths_replay(index in tiered_index()) {
        let searcher = RecipeSearcher::new(&index);
        for product in index.products() {
            for strategy in [SearchStrategy::Bfs, SearchStrategy::Dfs] {
                let path = searcher.path_for(product.clone(), strategy).unwrap();
                prop_assert!(path.found);
                prop_assert!(path.replays_to_target(&index));
                let results: HashSet<_> = path.steps.iter().map(|s| &s.result).collect();
                prop_assert_eq!(results.len(), path.steps.len());
            }
        }
    }

    #[test]
    fn single_trees_resolve(index in tiered_index()) {
        let searcher = RecipeSearcher::new(&index);
        for product in index.products() {
            for strategy in [SearchStrategy::Bfs, SearchStrategy::Dfs] {
                let tree = searcher.tree_for(product.clone(), strategy).unwrap();
                prop_assert_eq!(&tree.element, product);
                prop_assert!(tree.is_binary());
                prop_assert!(tree.is_resolved(&index));
            }
        }
    }

    #[test]
    fn multiple_trees_respect_quota(index in tiered_index(), quota in 1usize..6) {
        let searcher = RecipeSearcher::new(&index);
        let target = index.products().last().unwrap().clone();

        let outcome = searcher.multiple_trees(target, SearchStrategy::Dfs, quota).unwrap();
        let trees = outcome.solutions.trees().unwrap();

        prop_assert!(!trees.is_empty());
        prop_assert!(trees.len() <= quota);
        for tree in trees {
            prop_assert!(tree.is_binary());
            prop_assert!(tree.is_resolved(&index));
        }
    }

    #[test]
    fn diverse_paths_are_distinct(
        index in tiered_index(),
        quota in 1usize..5,
        dfs in any::<bool>(),
    ) {
        let searcher = RecipeSearcher::with_config(&index, fast_config());
        let target = index.products().last().unwrap().clone();
        let strategy = if dfs { SearchStrategy::Dfs } else { SearchStrategy::Bfs };

        let outcome = searcher.multiple_paths(target, strategy, quota).unwrap();
        let paths = outcome.solutions.paths().unwrap();

        prop_assert!(!paths.is_empty());
        prop_assert!(paths.len() <= quota);
        let signatures: HashSet<String> = paths.iter().map(|p| p.signature()).collect();
        prop_assert_eq!(signatures.len(), paths.len());
        for path in paths {
            prop_assert!(path.found);
            prop_assert!(path.replays_to_target(&index));
        }
    }
}
