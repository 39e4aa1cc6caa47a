//! Owned tree model shared by the combiner and the property filter.
//!
//! A configuration layer is an [`Element`] whose children are [`Node`]s:
//! nested elements, text and comments. Attributes keep their source order and
//! are unique by name.

pub mod error;
pub mod node;
pub mod xml;

pub use error::TreeError;
pub use node::{Attributes, Element, Node};
pub use xml::{from_roxmltree, parse};
