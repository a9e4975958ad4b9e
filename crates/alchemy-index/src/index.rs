//! The immutable recipe index and its builder.

use hashbrown::{HashMap, HashSet};

use crate::element::{Element, IngredientPair, Usage};
use crate::error::{IndexError, IndexResult};

/// Elements every recipe chain starts from.
pub const DEFAULT_BASE_ELEMENTS: [&str; 4] = ["air", "earth", "fire", "water"];

/// Tier assigned to base elements.
pub const BASE_TIER: u32 = 0;

/// One flat production row: `ingredient1 + ingredient2 = element` at `tier`.
///
/// This is the shape produced by flattening scraped recipe pages. With the
/// `serde` feature the field names match the flattened JSON
/// (`Element`, `Ingredient1`, `Ingredient2`, `Tier`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct RecipeRecord {
    /// The produced element.
    pub element: Element,
    /// First ingredient.
    pub ingredient1: Element,
    /// Second ingredient.
    pub ingredient2: Element,
    /// Rank of the produced element.
    pub tier: u32,
}

impl RecipeRecord {
    /// Creates a record, normalizing all names.
    pub fn new(
        element: impl Into<Element>,
        ingredient1: impl Into<Element>,
        ingredient2: impl Into<Element>,
        tier: u32,
    ) -> Self {
        Self {
            element: element.into(),
            ingredient1: ingredient1.into(),
            ingredient2: ingredient2.into(),
            tier,
        }
    }
}

/// Immutable mapping from element to the ingredient pairs that produce it.
///
/// Built once by [`RecipeIndexBuilder`] and never mutated afterwards, so a
/// single index can be shared by reference across any number of concurrent
/// searches without locking.
///
/// # Example
///
/// ```rust
/// use alchemy_index::{Element, RecipeIndex};
///
/// let index = RecipeIndex::builder()
///     .recipe("mud", "water", "earth", 1)
///     .recipe("steam", "water", "fire", 1)
///     .build()
///     .unwrap();
///
/// let mud = Element::new("Mud");
/// assert_eq!(index.recipes_for(&mud).len(), 1);
/// assert_eq!(index.tier(&mud), Some(1));
/// assert!(index.is_base(&Element::new("water")));
/// ```
#[derive(Debug, Clone)]
pub struct RecipeIndex {
    base: Vec<Element>,
    base_set: HashSet<Element>,
    products: Vec<Element>,
    recipes: HashMap<Element, Vec<IngredientPair>>,
    tiers: HashMap<Element, u32>,
    uses: HashMap<Element, Vec<Usage>>,
    known: HashSet<Element>,
    rule_count: usize,
}

impl RecipeIndex {
    /// Creates a builder with the default base elements.
    pub fn builder() -> RecipeIndexBuilder {
        RecipeIndexBuilder::new()
    }

    /// Builds an index from flat records using the default base elements.
    pub fn from_records(records: impl IntoIterator<Item = RecipeRecord>) -> IndexResult<Self> {
        RecipeIndexBuilder::new().records(records).build()
    }

    /// Returns the ingredient pairs producing `element`, in insertion order.
    ///
    /// Empty for base elements and for elements no rule produces.
    pub fn recipes_for(&self, element: &Element) -> &[IngredientPair] {
        self.recipes.get(element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the tier of an element, if it has one.
    ///
    /// Base elements have tier [`BASE_TIER`]; elements that appear only as
    /// ingredients have no tier.
    pub fn tier(&self, element: &Element) -> Option<u32> {
        if self.base_set.contains(element) {
            return Some(BASE_TIER);
        }
        self.tiers.get(element).copied()
    }

    /// Returns true if `element` is a base element.
    pub fn is_base(&self, element: &Element) -> bool {
        self.base_set.contains(element)
    }

    /// Returns the base elements in their configured order.
    pub fn base_elements(&self) -> &[Element] {
        &self.base
    }

    /// Returns every produced element in first-insertion order.
    pub fn products(&self) -> &[Element] {
        &self.products
    }

    /// Returns the rules in which `element` is an ingredient.
    pub fn uses_of(&self, element: &Element) -> &[Usage] {
        self.uses.get(element).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if the element is known as a base, product or ingredient.
    pub fn contains(&self, element: &Element) -> bool {
        self.known.contains(element)
    }

    /// Returns an iterator over every known element.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.known.iter()
    }

    /// Returns the number of produced elements.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if no rule is indexed.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns the total number of production rules.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }
}

/// Builder for [`RecipeIndex`].
///
/// Rules are kept in the order they are added; duplicate rules for the same
/// result are dropped.
#[derive(Debug, Clone)]
pub struct RecipeIndexBuilder {
    base: Vec<Element>,
    records: Vec<RecipeRecord>,
}

impl Default for RecipeIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeIndexBuilder {
    /// Creates a builder seeded with [`DEFAULT_BASE_ELEMENTS`].
    pub fn new() -> Self {
        Self {
            base: DEFAULT_BASE_ELEMENTS.iter().map(Element::new).collect(),
            records: Vec::new(),
        }
    }

    /// Replaces the base element set.
    pub fn with_base_elements<I, E>(mut self, base: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        self.base = base.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a rule `ingredient1 + ingredient2 = element`.
    pub fn recipe(
        mut self,
        element: impl Into<Element>,
        ingredient1: impl Into<Element>,
        ingredient2: impl Into<Element>,
        tier: u32,
    ) -> Self {
        self.records
            .push(RecipeRecord::new(element, ingredient1, ingredient2, tier));
        self
    }

    /// Adds a single flat record.
    pub fn record(mut self, record: RecipeRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Adds many flat records.
    pub fn records(mut self, records: impl IntoIterator<Item = RecipeRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Validates the records and freezes them into an index.
    pub fn build(self) -> IndexResult<RecipeIndex> {
        let mut base = Vec::with_capacity(self.base.len());
        let mut base_set = HashSet::with_capacity(self.base.len());
        for element in self.base {
            if element.is_empty() {
                return Err(IndexError::EmptyElement);
            }
            if base_set.insert(element.clone()) {
                base.push(element);
            }
        }

        let mut index = RecipeIndex {
            known: base_set.clone(),
            base,
            base_set,
            products: Vec::new(),
            recipes: HashMap::new(),
            tiers: HashMap::new(),
            uses: HashMap::new(),
            rule_count: 0,
        };

        for record in self.records {
            index.insert(record)?;
        }

        Ok(index)
    }
}

impl RecipeIndex {
    fn insert(&mut self, record: RecipeRecord) -> IndexResult<()> {
        let RecipeRecord {
            element,
            ingredient1,
            ingredient2,
            tier,
        } = record;

        if element.is_empty() || ingredient1.is_empty() || ingredient2.is_empty() {
            return Err(IndexError::EmptyElement);
        }
        if self.base_set.contains(&element) {
            return Err(IndexError::BaseElementProduced(element.to_string()));
        }

        match self.tiers.get(&element).copied() {
            Some(existing) if existing != tier => {
                return Err(IndexError::ConflictingTier {
                    element: element.to_string(),
                    existing,
                    found: tier,
                });
            }
            Some(_) => {}
            None => {
                self.tiers.insert(element.clone(), tier);
            }
        }

        let pair = IngredientPair::new(ingredient1.clone(), ingredient2.clone());
        if !self.recipes.contains_key(&element) {
            self.products.push(element.clone());
        }
        let pairs = self.recipes.entry(element.clone()).or_default();
        if pairs.contains(&pair) {
            return Ok(());
        }
        pairs.push(pair.clone());
        self.rule_count += 1;

        self.uses
            .entry(ingredient1.clone())
            .or_default()
            .push(Usage {
                partner: ingredient2.clone(),
                result: element.clone(),
                pair: pair.clone(),
            });
        if ingredient1 != ingredient2 {
            self.uses
                .entry(ingredient2.clone())
                .or_default()
                .push(Usage {
                    partner: ingredient1.clone(),
                    result: element.clone(),
                    pair: pair.clone(),
                });
        }

        self.known.insert(ingredient1);
        self.known.insert(ingredient2);
        self.known.insert(element);
        Ok(())
    }
}
