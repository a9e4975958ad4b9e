//! Tree builders: one tree, or several alternatives.

mod multi;
mod single;

pub use multi::MultiTreeBuilder;
pub use single::SingleTreeBuilder;
