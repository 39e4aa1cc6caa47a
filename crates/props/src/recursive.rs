use crate::error::PropertyError;
use crate::resolver::{PropertyResolver, ResolveContext};

/// Lets names and values of the wrapped resolver contain placeholders.
///
/// For a request `name`:
/// 1. `name` is filtered through the whole chain, so names may be computed;
/// 2. the filtered name is looked up in the wrapped resolver;
/// 3. the value found is filtered through the whole chain again.
///
/// A name that is requested again while it is still being resolved is a
/// circular dependency and fails with [`PropertyError::Circular`].
#[derive(Debug, Clone)]
pub struct RecursivePropertyResolver<R> {
    inner: R,
}

impl<R: PropertyResolver> RecursivePropertyResolver<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn resolve_entered(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        let filtered = ctx.filter(name)?;
        if filtered == name {
            return self.lookup(name, ctx);
        }

        ctx.enter(&filtered)?;
        let result = self.lookup(&filtered, ctx);
        ctx.leave(&filtered);
        result
    }

    fn lookup(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        match self.inner.resolve(name, ctx)? {
            Some(value) => ctx.filter(&value).map(Some),
            None => Ok(None),
        }
    }
}

impl<R: PropertyResolver> PropertyResolver for RecursivePropertyResolver<R> {
    fn resolve(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        ctx.enter(name)?;
        let result = self.resolve_entered(name, ctx);
        ctx.leave(name);
        result
    }
}
