//! # alchemy-index
//!
//! Immutable recipe index for two-ingredient crafting systems.
//!
//! A crafting system starts from a fixed set of base elements and produces
//! every other element by combining exactly two ingredients. Each produced
//! element carries a *tier*: any legal rule producing it combines
//! strictly-lower-tier ingredients, which keeps productions acyclic.
//!
//! This crate provides:
//! - **Element**: case-normalized, cheaply clonable identifiers
//! - **RecipeIndex**: element → ordered ingredient pairs, tiers, base set and
//!   a reverse "used in" index, frozen after construction
//! - **RecipeRecord**: the flat `(element, ingredient1, ingredient2, tier)`
//!   row the index is built from
//!
//! ## Usage
//!
//! ```rust
//! use alchemy_index::{Element, RecipeIndex, RecipeRecord};
//!
//! let records = vec![
//!     RecipeRecord::new("Mud", "Water", "Earth", 1),
//!     RecipeRecord::new("Steam", "Water", "Fire", 1),
//! ];
//! let index = RecipeIndex::from_records(records).unwrap();
//!
//! assert!(index.is_base(&Element::new("fire")));
//! assert_eq!(index.products().len(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Derives `Serialize`/`Deserialize` for elements and records

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod element;
mod error;
mod index;

pub use element::{Element, IngredientPair, Usage};
pub use error::{IndexError, IndexResult};
pub use index::{RecipeIndex, RecipeIndexBuilder, RecipeRecord, BASE_TIER, DEFAULT_BASE_ELEMENTS};
