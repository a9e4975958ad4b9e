//! Element identifiers and ingredient pairs.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A case-normalized element name.
///
/// Names are trimmed and lower-cased on construction, so two elements
/// compare equal whenever their names match case-insensitively. Cloning is
/// cheap (the text is reference-counted), which matters because search
/// state clones elements into per-branch maps constantly.
///
/// # Example
///
/// ```rust
/// use alchemy_index::Element;
///
/// let a = Element::new("  Water ");
/// let b = Element::new("WATER");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "water");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(Arc<str>);

impl Element {
    /// Creates an element from any name, normalizing case and whitespace.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref().trim().to_lowercase()))
    }

    /// Returns the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the normalized name is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({:?})", self.as_str())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Element {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Element {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Element {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Element {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Element {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(name))
    }
}

/// Two ingredients that combine into some result element.
///
/// Order is preserved as recorded, but carries no meaning for the
/// combination itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IngredientPair {
    /// First ingredient.
    pub left: Element,
    /// Second ingredient.
    pub right: Element,
}

impl IngredientPair {
    /// Creates a pair from two ingredients.
    pub fn new(left: impl Into<Element>, right: impl Into<Element>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns true if `element` is one of the two ingredients.
    pub fn contains(&self, element: &Element) -> bool {
        &self.left == element || &self.right == element
    }
}

impl fmt::Display for IngredientPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}", self.left, self.right)
    }
}

/// One entry of the reverse index: `element + partner = result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    /// The other ingredient of the rule.
    pub partner: Element,
    /// The element the rule produces.
    pub result: Element,
    /// The rule's ingredients in their recorded order.
    pub pair: IngredientPair,
}
