//! Multi-solution tree builders.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use alchemy_index::Element;
use crossbeam_channel::{Receiver, Sender};
use hashbrown::HashSet;
use rayon::prelude::*;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::config::MAX_STREAM_CAPACITY;
use crate::traits::RecipeSource;
use crate::tree::RecipeNode;
use crate::trees::single::SingleTreeBuilder;

/// Builds several production trees for a target.
///
/// The two builders have deliberately different contracts:
///
/// - [`build_dfs`](Self::build_dfs) returns up to `quota` separate trees,
///   each a complete alternative production of the target.
/// - [`build_bfs`](Self::build_bfs) returns a single tree whose root lists
///   every top-level ingredient pair of the target side by side, each
///   ingredient resolved with the single-solution BFS.
pub struct MultiTreeBuilder<'a> {
    source: &'a dyn RecipeSource,
    token: &'a CancelToken,
}

impl<'a> MultiTreeBuilder<'a> {
    /// Creates a builder over `source` that stops when `token` leaves `Running`.
    pub fn new(source: &'a dyn RecipeSource, token: &'a CancelToken) -> Self {
        Self { source, token }
    }

    /// Collects up to `quota` alternative trees for `target`.
    ///
    /// Both ingredients of every rule are resolved concurrently, and each
    /// ingredient itself yields up to `quota` alternatives; the cartesian
    /// product of the two alternative sets are the candidates for the rule.
    /// Candidates for the target stream through a channel of at most
    /// [`MAX_STREAM_CAPACITY`] slots; the first `quota` received are kept
    /// and the token is moved to `QuotaReached`, which every branch checks
    /// before recursing or sending.
    ///
    /// Always returns at least one tree: if nothing was produced, the
    /// target comes back as an unresolved leaf.
    pub fn build_dfs(&self, target: &Element, quota: usize) -> (Vec<RecipeNode>, usize) {
        let quota = quota.max(1);
        let visits = AtomicUsize::new(0);
        let (tx, rx) = crossbeam_channel::bounded(quota.min(MAX_STREAM_CAPACITY));

        let mut trees = thread::scope(|scope| {
            let visits = &visits;
            scope.spawn(move || self.stream_candidates(target, quota, visits, tx));
            self.collect(rx, quota)
        });

        if trees.is_empty() {
            trees.push(RecipeNode::leaf(target.clone()));
        }
        (trees, visits.into_inner())
    }

    fn collect(&self, rx: Receiver<Arc<RecipeNode>>, quota: usize) -> Vec<RecipeNode> {
        let mut trees = Vec::new();
        for tree in rx.iter() {
            trees.push(Arc::unwrap_or_clone(tree));
            if trees.len() >= quota {
                if self.token.reach_quota() {
                    debug!(quota, "tree quota reached, cancelling branches");
                }
                break;
            }
        }
        // Dropping the receiver fails any pending send, so the producer cannot block.
        trees
    }

    fn stream_candidates(
        &self,
        target: &Element,
        quota: usize,
        visits: &AtomicUsize,
        tx: Sender<Arc<RecipeNode>>,
    ) {
        visits.fetch_add(1, Ordering::Relaxed);
        if !self.token.is_running() {
            return;
        }
        if self.source.is_base(target) {
            let _ = tx.send(Arc::new(RecipeNode::leaf(target.clone())));
            return;
        }

        let mut visited = HashSet::new();
        visited.insert(target.clone());

        for pair in self.source.recipes_for(target) {
            if !self.token.is_running() {
                return;
            }
            let (lefts, rights) = rayon::join(
                || self.alternatives(&pair.left, &visited, quota, visits),
                || self.alternatives(&pair.right, &visited, quota, visits),
            );
            for left in &lefts {
                for right in &rights {
                    if !self.token.is_running() {
                        return;
                    }
                    let node = RecipeNode::combine(target.clone(), left.clone(), right.clone());
                    if tx.send(Arc::new(node)).is_err() {
                        return;
                    }
                }
            }
        }
    }

    /// Up to `quota` alternative sub-trees for `element`.
    ///
    /// Empty when the element has no usable rule, so the parent rule that
    /// needed it produces nothing. Base elements and elements already on
    /// the branch yield a single leaf.
    fn alternatives(
        &self,
        element: &Element,
        visited: &HashSet<Element>,
        quota: usize,
        visits: &AtomicUsize,
    ) -> Vec<Arc<RecipeNode>> {
        visits.fetch_add(1, Ordering::Relaxed);
        if !self.token.is_running() {
            return Vec::new();
        }
        if self.source.is_base(element) || visited.contains(element) {
            return vec![Arc::new(RecipeNode::leaf(element.clone()))];
        }

        // Never mutate the caller's set: concurrent siblings are reading it.
        let mut visited = visited.clone();
        visited.insert(element.clone());

        let mut out = Vec::new();
        for pair in self.source.recipes_for(element) {
            if !self.token.is_running() {
                break;
            }
            let (lefts, rights) = rayon::join(
                || self.alternatives(&pair.left, &visited, quota, visits),
                || self.alternatives(&pair.right, &visited, quota, visits),
            );
            for left in &lefts {
                for right in &rights {
                    out.push(Arc::new(RecipeNode::combine(
                        element.clone(),
                        left.clone(),
                        right.clone(),
                    )));
                    if out.len() >= quota {
                        return out;
                    }
                }
            }
        }
        out
    }

    /// Builds one tree fanning out into every top-level pair of `target`.
    ///
    /// The root's children are `[left_0, right_0, left_1, right_1, ...]` in
    /// index order. Pairs are resolved in parallel, each ingredient with
    /// the single-solution BFS; the visit count is the root plus the sum
    /// of those searches.
    pub fn build_bfs(&self, target: &Element) -> (RecipeNode, usize) {
        let single = SingleTreeBuilder::new(self.source);
        let pairs = self.source.recipes_for(target);

        let branches: Vec<(Arc<RecipeNode>, Arc<RecipeNode>, usize)> = pairs
            .par_iter()
            .map(|pair| {
                let ((left, left_visits), (right, right_visits)) = rayon::join(
                    || single.bfs_node(&pair.left),
                    || single.bfs_node(&pair.right),
                );
                (left, right, left_visits + right_visits)
            })
            .collect();

        let mut visits = 1;
        let mut children = Vec::with_capacity(branches.len() * 2);
        for (left, right, branch_visits) in branches {
            children.push(left);
            children.push(right);
            visits += branch_visits;
        }

        (RecipeNode::fan_out(target.clone(), children), visits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::SearchState;
    use alchemy_index::RecipeIndex;

    fn create_mud_index() -> RecipeIndex {
        RecipeIndex::builder()
            .recipe("mud", "water", "earth", 1)
            .recipe("steam", "water", "fire", 1)
            .build()
            .unwrap()
    }

    /// stone has two rules, and mud (used by the second) has two as well.
    fn create_branching_index() -> RecipeIndex {
        RecipeIndex::builder()
            .recipe("mud", "water", "earth", 1)
            .recipe("mud", "earth", "rain", 2)
            .recipe("rain", "water", "air", 1)
            .recipe("lava", "earth", "fire", 1)
            .recipe("stone", "lava", "air", 3)
            .recipe("stone", "mud", "lava", 3)
            .build()
            .unwrap()
    }

    #[test]
    fn test_dfs_single_rule_yields_one_tree() {
        let index = create_mud_index();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, visits) = builder.build_dfs(&Element::new("mud"), 3);

        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].element.as_str(), "mud");
        assert!(trees[0].is_binary());
        assert_eq!(visits, 3);
        assert_eq!(token.state(), SearchState::Running);
    }

    #[test]
    fn test_dfs_collects_distinct_alternatives() {
        let index = create_branching_index();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, _) = builder.build_dfs(&Element::new("stone"), 10);

        // lava + air, mud(water, earth) + lava, mud(earth, rain) + lava
        assert_eq!(trees.len(), 3);
        for tree in &trees {
            assert!(tree.is_binary());
            assert!(tree.is_resolved(&index));
        }
        for (i, a) in trees.iter().enumerate() {
            for b in &trees[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_dfs_respects_quota() {
        let index = create_branching_index();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, _) = builder.build_dfs(&Element::new("stone"), 2);

        assert_eq!(trees.len(), 2);
        assert_eq!(token.state(), SearchState::QuotaReached);
    }

    #[test]
    fn test_dfs_base_element() {
        let index = create_mud_index();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, visits) = builder.build_dfs(&Element::new("air"), 5);

        assert_eq!(trees, vec![RecipeNode::leaf(Element::new("air"))]);
        assert_eq!(visits, 1);
    }

    #[test]
    fn test_dfs_unresolvable_target_gets_placeholder() {
        let index = RecipeIndex::builder()
            .recipe("golem", "clay", "life", 5)
            .build()
            .unwrap();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, _) = builder.build_dfs(&Element::new("golem"), 3);

        assert_eq!(trees, vec![RecipeNode::leaf(Element::new("golem"))]);
    }

    #[test]
    fn test_dfs_aborted_token_returns_placeholder() {
        let index = create_branching_index();
        let token = CancelToken::new();
        token.abort();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, _) = builder.build_dfs(&Element::new("stone"), 3);

        assert_eq!(trees, vec![RecipeNode::leaf(Element::new("stone"))]);
    }

    #[test]
    fn test_dfs_huge_quota_is_an_upper_bound() {
        let index = create_mud_index();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, _) = builder.build_dfs(&Element::new("mud"), usize::MAX);

        assert_eq!(trees.len(), 1);
        assert!(trees[0].is_resolved(&index));
        assert_eq!(token.state(), SearchState::Running);
    }

    #[test]
    fn test_dfs_cycle_guard_yields_leaf_alternative() {
        let index = RecipeIndex::builder()
            .recipe("life", "water", "fire", 1)
            .recipe("chicken", "egg", "air", 3)
            .recipe("chicken", "life", "air", 3)
            .recipe("egg", "chicken", "earth", 4)
            .build()
            .unwrap();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (trees, _) = builder.build_dfs(&Element::new("egg"), 5);

        // chicken(egg, air) stops at the egg already on the branch.
        assert_eq!(trees.len(), 2);
        assert!(trees.iter().all(|t| t.is_binary()));
        let resolved: Vec<_> = trees.iter().filter(|t| t.is_resolved(&index)).collect();
        assert_eq!(resolved.len(), 1);
        let looped = trees.iter().find(|t| !t.is_resolved(&index)).unwrap();
        assert!(looped.leaves().iter().any(|e| e.as_str() == "egg"));
    }

    #[test]
    fn test_bfs_fans_out_over_every_pair() {
        let index = create_branching_index();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (tree, visits) = builder.build_bfs(&Element::new("stone"));

        let children: Vec<&str> = tree
            .ingredients
            .iter()
            .map(|c| c.element.as_str())
            .collect();
        assert_eq!(children, vec!["lava", "air", "mud", "lava"]);
        assert!(!tree.is_binary());
        assert!(tree.ingredients.iter().all(|c| c.is_binary()));
        assert!(visits > 1);
    }

    #[test]
    fn test_bfs_without_rules_is_bare_leaf() {
        let index = create_mud_index();
        let token = CancelToken::new();
        let builder = MultiTreeBuilder::new(&index, &token);

        let (tree, visits) = builder.build_bfs(&Element::new("water"));

        assert_eq!(tree, RecipeNode::leaf(Element::new("water")));
        assert_eq!(visits, 1);
    }
}
