//! Property sources supplied by the host: in-memory maps, a `<properties>`
//! section of the document and the process environment.

use crate::error::PropertyError;
use crate::prefixed::PrefixedPropertyResolver;
use crate::resolver::{PropertyResolver, ResolveContext};
use layerconf_tree::Element;
use std::collections::HashMap;

/// Prefix under which environment variables are visible.
pub const ENV_PREFIX: &str = "env.";

/// Name to value map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapPropertyResolver {
    values: HashMap<String, String>,
}

impl MapPropertyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads a properties section such as
    ///
    /// ```xml
    /// <properties>
    ///   <db.host>localhost</db.host>
    ///   <db.url>jdbc://${db.host}</db.url>
    /// </properties>
    /// ```
    ///
    /// Each child element becomes one property named after its tag, with its
    /// text content as the raw (unfiltered) value. A tag given twice keeps the
    /// last value.
    pub fn from_section(section: &Element) -> Self {
        section
            .child_elements()
            .map(|child| (child.tag.clone(), child.text_content()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapPropertyResolver {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl PropertyResolver for MapPropertyResolver {
    fn resolve(
        &self,
        name: &str,
        _ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        Ok(self.values.get(name).cloned())
    }
}

/// Process environment variables by their bare name.
///
/// Unset variables and values that are not valid unicode are absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentPropertyResolver;

impl PropertyResolver for EnvironmentPropertyResolver {
    fn resolve(
        &self,
        name: &str,
        _ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        if name.is_empty() {
            return Ok(None);
        }
        Ok(std::env::var(name).ok())
    }
}

/// Environment variables under [`ENV_PREFIX`], e.g. `${env.HOME}`.
pub fn environment_resolver() -> PrefixedPropertyResolver<EnvironmentPropertyResolver> {
    PrefixedPropertyResolver::new(ENV_PREFIX, EnvironmentPropertyResolver)
}
