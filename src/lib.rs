//! Layered XML configuration.
//!
//! Several configuration fragments are merged from least to most dominant,
//! driven by per-element `combine.self` / `combine.children` policies, and
//! `${...}` placeholders in the result are expanded afterwards.
//!
//! ```ignore
//! let config = LayeredConfig::new()
//!     .add_xml(DEFAULTS)?
//!     .add_xml(SITE)?
//!     .build()?;
//! println!("{}", config.to_xml_string()?);
//! ```

pub mod error;
pub mod options;
pub mod pipeline;

pub use error::ConfigError;
pub use options::ConfigOptions;
pub use pipeline::LayeredConfig;

pub use layerconf_combine::{
    COMBINE_CHILDREN, COMBINE_SELF, CombineChildren, CombineError, CombineSelf, Combiner, Key, combine_all,
    merge, strip_merge_attributes,
};
pub use layerconf_props::{
    CompoundPropertyResolver, ENV_PREFIX, EnvironmentPropertyResolver, MapPropertyResolver, ONEOF_PREFIX,
    OneOfPropertyResolver, PrefixedPropertyResolver, PropertyError, PropertyResolver,
    RecursivePropertyResolver, ResolveContext, XmlPropertyResolver, environment_resolver, filter,
    filter_element, resolve,
};
pub use layerconf_tree::{Attributes, Element, Node, TreeError, parse};
