//! Recipe trees.

use std::fmt;
use std::sync::Arc;

use alchemy_index::Element;

use crate::traits::RecipeSource;

/// One resolved production: an element and the sub-trees of its ingredients.
///
/// Tree builders only ever create leaves or nodes with exactly two
/// children. A leaf is either a base element or an element the search could
/// not resolve; tell them apart with [`is_resolved`](Self::is_resolved),
/// not by counting children. The multi-branch BFS root is the one exception
/// to the two-children shape: it lists every top-level pair side by side.
///
/// Children are reference-counted so a sub-tree can be shared by many
/// parents without copying.
///
/// # Example
///
/// ```rust
/// use alchemy_search::{Element, RecipeNode};
/// use std::sync::Arc;
///
/// let mud = RecipeNode::combine(
///     Element::new("mud"),
///     Arc::new(RecipeNode::leaf(Element::new("water"))),
///     Arc::new(RecipeNode::leaf(Element::new("earth"))),
/// );
/// assert_eq!(mud.node_count(), 3);
/// assert_eq!(mud.render(), "mud\n├── water\n└── earth\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeNode {
    /// The element this node produces.
    pub element: Element,
    /// Ingredient sub-trees (empty for leaves).
    pub ingredients: Vec<Arc<RecipeNode>>,
}

impl RecipeNode {
    /// Creates a leaf.
    pub fn leaf(element: Element) -> Self {
        Self {
            element,
            ingredients: Vec::new(),
        }
    }

    /// Creates a node produced from two ingredient sub-trees.
    pub fn combine(element: Element, left: Arc<RecipeNode>, right: Arc<RecipeNode>) -> Self {
        Self {
            element,
            ingredients: vec![left, right],
        }
    }

    /// Creates a node listing arbitrary children.
    pub(crate) fn fan_out(element: Element, ingredients: Vec<Arc<RecipeNode>>) -> Self {
        Self {
            element,
            ingredients,
        }
    }

    /// Returns true if the node has no ingredients.
    pub fn is_leaf(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Number of nodes in the tree, counting shared sub-trees once per use.
    pub fn node_count(&self) -> usize {
        1 + self
            .ingredients
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    /// Length of the longest root-to-leaf chain (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .ingredients
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Returns the leaf elements, left to right.
    pub fn leaves(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Element>) {
        if self.is_leaf() {
            out.push(&self.element);
        }
        for child in &self.ingredients {
            child.collect_leaves(out);
        }
    }

    /// Returns true if every leaf is a base element of `source`.
    pub fn is_resolved(&self, source: &dyn RecipeSource) -> bool {
        self.leaves().into_iter().all(|leaf| source.is_base(leaf))
    }

    /// Returns true if every inner node has exactly two children.
    pub fn is_binary(&self) -> bool {
        match self.ingredients.len() {
            0 => true,
            2 => self.ingredients.iter().all(|child| child.is_binary()),
            _ => false,
        }
    }

    /// Renders the tree with box-drawing guides, one element per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, "", "");
        out
    }

    fn render_into(&self, out: &mut String, prefix: &str, child_prefix: &str) {
        out.push_str(prefix);
        out.push_str(self.element.as_str());
        out.push('\n');

        let last = self.ingredients.len().saturating_sub(1);
        for (i, child) in self.ingredients.iter().enumerate() {
            if i == last {
                child.render_into(
                    out,
                    &format!("{child_prefix}└── "),
                    &format!("{child_prefix}    "),
                );
            } else {
                child.render_into(
                    out,
                    &format!("{child_prefix}├── "),
                    &format!("{child_prefix}│   "),
                );
            }
        }
    }
}

impl fmt::Display for RecipeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
