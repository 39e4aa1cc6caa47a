//! Layered merging of configuration trees.
//!
//! Layers are supplied from least to most dominant. Each element may carry a
//! `combine.self` policy (how it merges with its counterpart) and a
//! `combine.children` policy (how its child list merges). Sibling elements are
//! paired across layers by tag name and `id` attribute.
//!
//! ```ignore
//! let mut combiner = Combiner::new();
//! combiner.combine(&defaults)?;
//! combiner.combine(&overrides)?;
//! let merged = combiner.finalize()?;
//! ```

pub mod combiner;
pub mod error;
pub mod merge;
pub mod policy;
pub mod siblings;

pub use combiner::{Combiner, combine_all};
pub use error::CombineError;
pub use merge::merge;
pub use policy::{COMBINE_CHILDREN, COMBINE_SELF, CombineChildren, CombineSelf, strip_merge_attributes};
pub use siblings::Key;
