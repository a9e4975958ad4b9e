//! The read-only recipe source the search engine queries.
//!
//! [`RecipeSource`] abstracts the index so the engine can run against any
//! immutable rule set. [`RecipeIndex`] implements it directly.
//!
//! # Example: a custom source
//!
//! ```ignore
//! use alchemy_search::{Element, IngredientPair, RecipeSource, Usage};
//!
//! impl RecipeSource for MyRules {
//!     fn recipes_for(&self, element: &Element) -> &[IngredientPair] {
//!         self.rules.get(element).map(Vec::as_slice).unwrap_or(&[])
//!     }
//!     // ...
//! }
//! ```

use alchemy_index::{Element, IngredientPair, RecipeIndex, Usage};

/// Read-only view over a rule set.
///
/// Implementations must never change while a search is running; searches
/// share one source across threads without locking.
pub trait RecipeSource: Send + Sync {
    /// Ingredient pairs producing `element`, in a stable order.
    fn recipes_for(&self, element: &Element) -> &[IngredientPair];

    /// Tier of `element`, if it has one.
    fn tier(&self, element: &Element) -> Option<u32>;

    /// Checks if `element` is a base element.
    fn is_base(&self, element: &Element) -> bool;

    /// Base elements in a stable order.
    fn base_elements(&self) -> &[Element];

    /// Every produced element in a stable order.
    fn products(&self) -> &[Element];

    /// Rules in which `element` is an ingredient.
    fn uses_of(&self, element: &Element) -> &[Usage];

    /// Checks if `element` is known to the source at all.
    fn contains(&self, element: &Element) -> bool {
        self.is_base(element) || !self.recipes_for(element).is_empty()
    }
}

impl RecipeSource for RecipeIndex {
    fn recipes_for(&self, element: &Element) -> &[IngredientPair] {
        RecipeIndex::recipes_for(self, element)
    }

    fn tier(&self, element: &Element) -> Option<u32> {
        RecipeIndex::tier(self, element)
    }

    fn is_base(&self, element: &Element) -> bool {
        RecipeIndex::is_base(self, element)
    }

    fn base_elements(&self) -> &[Element] {
        RecipeIndex::base_elements(self)
    }

    fn products(&self) -> &[Element] {
        RecipeIndex::products(self)
    }

    fn uses_of(&self, element: &Element) -> &[Usage] {
        RecipeIndex::uses_of(self, element)
    }

    fn contains(&self, element: &Element) -> bool {
        RecipeIndex::contains(self, element)
    }
}

/// Checks the tier rule: both ingredients must rank strictly below the result.
///
/// An element without a tier can never take part in a valid production.
pub(crate) fn respects_tiers(
    source: &dyn RecipeSource,
    result: &Element,
    pair: &IngredientPair,
) -> bool {
    let Some(result_tier) = source.tier(result) else {
        return false;
    };
    let below = |element: &Element| matches!(source.tier(element), Some(t) if t < result_tier);
    below(&pair.left) && below(&pair.right)
}
