//! `${...}` placeholder expansion backed by a chain of property resolvers.
//!
//! Resolvers are small and composable: a [`CompoundPropertyResolver`] tries
//! its members in order, a [`RecursivePropertyResolver`] lets names and values
//! contain placeholders themselves, and [`OneOfPropertyResolver`] picks the
//! first alternative that resolves. Each top-level [`filter`] or [`resolve`]
//! call gets its own [`ResolveContext`], so one chain can be shared freely.

pub mod compound;
pub mod error;
pub mod filter;
pub mod oneof;
pub mod placeholder;
pub mod prefixed;
pub mod recursive;
pub mod resolver;
pub mod sources;
pub mod xml;

pub use compound::CompoundPropertyResolver;
pub use error::PropertyError;
pub use filter::filter_element;
pub use oneof::{ONEOF_PREFIX, OneOfPropertyResolver};
pub use placeholder::{Part, has_placeholders, split};
pub use prefixed::PrefixedPropertyResolver;
pub use recursive::RecursivePropertyResolver;
pub use resolver::{PropertyResolver, ResolveContext, filter, resolve};
pub use sources::{ENV_PREFIX, EnvironmentPropertyResolver, MapPropertyResolver, environment_resolver};
pub use xml::XmlPropertyResolver;
