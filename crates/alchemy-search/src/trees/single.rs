//! Single-solution tree builders.

use std::sync::Arc;

use alchemy_index::Element;
use hashbrown::{HashMap, HashSet};

use crate::traits::RecipeSource;
use crate::tree::RecipeNode;

/// Builds one production tree for a target.
///
/// - [`build_dfs`](Self::build_dfs) commits to the first rule (in index
///   order) whose ingredients both resolve, recursing depth-first.
/// - [`build_bfs`](Self::build_bfs) expands outward from the base elements
///   one production level at a time, so it finds a tree of minimal
///   production depth.
///
/// Neither guarantees the smallest tree. Both return the number of visits
/// they made next to the tree.
pub struct SingleTreeBuilder<'a> {
    source: &'a dyn RecipeSource,
}

impl<'a> SingleTreeBuilder<'a> {
    /// Creates a builder over `source`.
    pub fn new(source: &'a dyn RecipeSource) -> Self {
        Self { source }
    }

    /// Resolves `target` depth-first.
    ///
    /// Counts one visit per recursive call. Deterministic for a given index.
    pub fn build_dfs(&self, target: &Element) -> (RecipeNode, usize) {
        let mut visits = 0;
        let tree = self
            .resolve_dfs(target, &HashSet::new(), &mut visits)
            .map(Arc::unwrap_or_clone)
            .unwrap_or_else(|| RecipeNode::leaf(target.clone()));
        (tree, visits)
    }

    /// Returns `None` only when `element` is already on the current branch.
    ///
    /// An element with no usable rule comes back as an unresolved leaf.
    fn resolve_dfs(
        &self,
        element: &Element,
        visited: &HashSet<Element>,
        visits: &mut usize,
    ) -> Option<Arc<RecipeNode>> {
        *visits += 1;

        if self.source.is_base(element) {
            return Some(Arc::new(RecipeNode::leaf(element.clone())));
        }
        if visited.contains(element) {
            return None;
        }

        // Each branch owns its copy; sibling rules must not see each other's marks.
        let mut visited = visited.clone();
        visited.insert(element.clone());

        for pair in self.source.recipes_for(element) {
            let left = self.resolve_dfs(&pair.left, &visited, visits);
            let right = self.resolve_dfs(&pair.right, &visited, visits);
            if let (Some(left), Some(right)) = (left, right) {
                return Some(Arc::new(RecipeNode::combine(element.clone(), left, right)));
            }
        }

        Some(Arc::new(RecipeNode::leaf(element.clone())))
    }

    /// Resolves `target` breadth-first from the base elements.
    ///
    /// Counts one visit per discovered element, base elements included.
    pub fn build_bfs(&self, target: &Element) -> (RecipeNode, usize) {
        let (node, visits) = self.bfs_node(target);
        (Arc::unwrap_or_clone(node), visits)
    }

    pub(crate) fn bfs_node(&self, target: &Element) -> (Arc<RecipeNode>, usize) {
        let mut visits = 0;
        let mut discovered: HashMap<Element, Arc<RecipeNode>> = HashMap::new();

        for base in self.source.base_elements() {
            discovered.insert(base.clone(), Arc::new(RecipeNode::leaf(base.clone())));
            visits += 1;
        }

        while !discovered.contains_key(target) {
            // Level-synchronous: a round only combines what earlier rounds found.
            let mut round = Vec::new();
            for product in self.source.products() {
                if discovered.contains_key(product) {
                    continue;
                }
                for pair in self.source.recipes_for(product) {
                    if let (Some(left), Some(right)) =
                        (discovered.get(&pair.left), discovered.get(&pair.right))
                    {
                        let node =
                            RecipeNode::combine(product.clone(), left.clone(), right.clone());
                        round.push((product.clone(), Arc::new(node)));
                        break;
                    }
                }
            }

            if round.is_empty() {
                break;
            }
            visits += round.len();
            discovered.extend(round);
        }

        let node = discovered
            .remove(target)
            .unwrap_or_else(|| Arc::new(RecipeNode::leaf(target.clone())));
        (node, visits)
    }
}
