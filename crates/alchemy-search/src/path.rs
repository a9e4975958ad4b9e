//! Path resolution: ordered production steps instead of trees.
//!
//! The resolvers walk forward from the base elements, discovering every
//! element whose rule combines two already-discovered, strictly-lower-tier
//! ingredients, and remember which rule discovered each element. The path
//! is then read back from the target in post-order, so every step only
//! uses base elements or results of earlier steps.

use std::fmt;

use alchemy_index::{Element, IngredientPair};
use hashbrown::{HashMap, HashSet};

use crate::traits::{respects_tiers, RecipeSource};

/// One production: `left + right = result`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductionStep {
    /// First ingredient.
    pub left: Element,
    /// Second ingredient.
    pub right: Element,
    /// Produced element.
    pub result: Element,
}

impl ProductionStep {
    /// Creates a step from a result and the pair that produced it.
    pub fn new(result: Element, pair: &IngredientPair) -> Self {
        Self {
            left: pair.left.clone(),
            right: pair.right.clone(),
            result,
        }
    }
}

impl fmt::Display for ProductionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} = {}", self.left, self.right, self.result)
    }
}

/// An ordered, replayable sequence of production steps ending in `target`.
///
/// # Example
///
/// ```rust
/// use alchemy_search::{Element, PathResolver, RecipeIndex};
///
/// let index = RecipeIndex::builder()
///     .recipe("mud", "water", "earth", 1)
///     .recipe("brick", "mud", "fire", 2)
///     .build()
///     .unwrap();
///
/// let (path, _) = PathResolver::new(&index).resolve_bfs(&Element::new("brick"));
/// let steps: Vec<String> = path.steps.iter().map(|s| s.to_string()).collect();
/// assert_eq!(steps, vec!["water + earth = mud", "mud + fire = brick"]);
/// assert!(path.replays_to_target(&index));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePath {
    /// The element the path produces.
    pub target: Element,
    /// Steps in dependency order; empty for base elements.
    pub steps: Vec<ProductionStep>,
    /// Whether the target was reached.
    pub found: bool,
}

impl RecipePath {
    /// Creates a path for a target that could not be reached.
    pub fn unresolved(target: Element) -> Self {
        Self {
            target,
            steps: Vec::new(),
            found: false,
        }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Exact textual identity of the step sequence, used for deduplication.
    pub fn signature(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Replays the steps against `source` and checks they produce the target.
    ///
    /// Every step must be a rule of `source` whose ingredients are base
    /// elements or results of earlier steps. An unresolved path is valid
    /// only when it is empty.
    pub fn replays_to_target(&self, source: &dyn RecipeSource) -> bool {
        if !self.found {
            return self.steps.is_empty();
        }

        let mut produced: HashSet<&Element> = source.base_elements().iter().collect();
        for step in &self.steps {
            let is_rule = source
                .recipes_for(&step.result)
                .iter()
                .any(|pair| pair.left == step.left && pair.right == step.right);
            if !is_rule || !produced.contains(&step.left) || !produced.contains(&step.right) {
                return false;
            }
            produced.insert(&step.result);
        }
        produced.contains(&self.target)
    }
}

impl fmt::Display for RecipePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.found {
            return write!(f, "{}: no path", self.target);
        }
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Per-search discovery state: what is reachable and which rule reached it.
///
/// Owned by exactly one resolver run; never shared between threads.
#[derive(Debug, Clone)]
pub(crate) struct Discovery {
    discovered: HashSet<Element>,
    order: Vec<Element>,
    recipe_used: HashMap<Element, IngredientPair>,
}

impl Discovery {
    /// Starts with every base element discovered.
    pub(crate) fn seeded(source: &dyn RecipeSource) -> Self {
        let base = source.base_elements();
        Self {
            discovered: base.iter().cloned().collect(),
            order: base.to_vec(),
            recipe_used: HashMap::new(),
        }
    }

    pub(crate) fn is_discovered(&self, element: &Element) -> bool {
        self.discovered.contains(element)
    }

    /// Discovered elements in discovery order.
    pub(crate) fn order(&self) -> &[Element] {
        &self.order
    }

    pub(crate) fn discover(&mut self, result: Element, pair: IngredientPair) {
        if self.discovered.insert(result.clone()) {
            self.order.push(result.clone());
            self.recipe_used.insert(result, pair);
        }
    }

    /// Reads the path to `target` back out of the recorded rules.
    pub(crate) fn into_path(self, target: &Element) -> RecipePath {
        if !self.discovered.contains(target) {
            return RecipePath::unresolved(target.clone());
        }
        let mut steps = Vec::new();
        let mut emitted = HashSet::new();
        self.emit(target, &mut emitted, &mut steps);
        RecipePath {
            target: target.clone(),
            steps,
            found: true,
        }
    }

    fn emit(
        &self,
        element: &Element,
        emitted: &mut HashSet<Element>,
        steps: &mut Vec<ProductionStep>,
    ) {
        let Some(pair) = self.recipe_used.get(element) else {
            return;
        };
        if !emitted.insert(element.clone()) {
            return;
        }
        self.emit(&pair.left, emitted, steps);
        self.emit(&pair.right, emitted, steps);
        steps.push(ProductionStep::new(element.clone(), pair));
    }
}

/// Resolves a production path for a target using the tier rule.
pub struct PathResolver<'a> {
    source: &'a dyn RecipeSource,
}

impl<'a> PathResolver<'a> {
    /// Creates a resolver over `source`.
    pub fn new(source: &'a dyn RecipeSource) -> Self {
        Self { source }
    }

    /// Round-based frontier expansion.
    ///
    /// Every round scans the undiscovered products in index order and
    /// discovers each one the moment one of its rules becomes usable.
    /// Stops as soon as the target is discovered or a round finds nothing.
    /// Counts base elements plus every discovery.
    pub fn resolve_bfs(&self, target: &Element) -> (RecipePath, usize) {
        let mut discovery = Discovery::seeded(self.source);
        let mut visits = self.source.base_elements().len();

        'rounds: while !discovery.is_discovered(target) {
            let mut progressed = false;
            for product in self.source.products() {
                if discovery.is_discovered(product) {
                    continue;
                }
                if let Some(pair) = self.usable_rule(product, &discovery) {
                    discovery.discover(product.clone(), pair.clone());
                    visits += 1;
                    progressed = true;
                    if product == target {
                        break 'rounds;
                    }
                }
            }
            if !progressed {
                break;
            }
        }

        (discovery.into_path(target), visits)
    }

    /// Stack-driven backtracking expansion.
    ///
    /// Pops an element, and on its first visit scans every undiscovered
    /// product for a usable rule, pushing whatever becomes discovered.
    /// Stops as soon as the target is discovered or the stack empties.
    /// Counts one visit per popped, previously unvisited element.
    pub fn resolve_dfs(&self, target: &Element) -> (RecipePath, usize) {
        let mut discovery = Discovery::seeded(self.source);
        let mut visits = 0;

        if discovery.is_discovered(target) {
            return (discovery.into_path(target), 1);
        }

        let mut stack: Vec<Element> = self.source.base_elements().to_vec();
        let mut visited = HashSet::new();

        'search: while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            visits += 1;

            for product in self.source.products() {
                if discovery.is_discovered(product) {
                    continue;
                }
                if let Some(pair) = self.usable_rule(product, &discovery) {
                    discovery.discover(product.clone(), pair.clone());
                    stack.push(product.clone());
                    if product == target {
                        break 'search;
                    }
                }
            }
        }

        (discovery.into_path(target), visits)
    }

    /// First rule of `product`, in index order, that respects tiers and
    /// combines two discovered ingredients.
    fn usable_rule(&self, product: &Element, discovery: &Discovery) -> Option<&'a IngredientPair> {
        self.source.recipes_for(product).iter().find(|pair| {
            discovery.is_discovered(&pair.left)
                && discovery.is_discovered(&pair.right)
                && respects_tiers(self.source, product, pair)
        })
    }
}
