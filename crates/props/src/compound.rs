use crate::error::PropertyError;
use crate::resolver::{PropertyResolver, ResolveContext};

/// Tries its resolvers in registration order; the first value found wins.
///
/// A resolver that returns an error ends the search immediately, even if a
/// later resolver could have answered.
#[derive(Debug, Default)]
pub struct CompoundPropertyResolver {
    resolvers: Vec<Box<dyn PropertyResolver>>,
}

impl CompoundPropertyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with(mut self, resolver: impl PropertyResolver + 'static) -> Self {
        self.push(Box::new(resolver));
        self
    }

    pub fn push(&mut self, resolver: Box<dyn PropertyResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PropertyResolver for CompoundPropertyResolver {
    fn resolve(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        for resolver in &self.resolvers {
            if let Some(prefix) = resolver.prefix() {
                if !name.starts_with(prefix) {
                    continue;
                }
            }
            if let Some(value) = resolver.resolve(name, ctx)? {
                return Ok(Some(value));
            }
        }
        log::trace!("No resolver provided a value for '{}'", name);
        Ok(None)
    }
}
