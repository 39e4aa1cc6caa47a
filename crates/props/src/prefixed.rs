use crate::error::PropertyError;
use crate::resolver::{PropertyResolver, ResolveContext};

/// Serves names that start with a fixed prefix, such as `env.`.
///
/// The prefix is stripped before the inner resolver is asked, so an inner
/// resolver over environment variables sees `HOME` for `env.HOME`.
#[derive(Debug, Clone)]
pub struct PrefixedPropertyResolver<R> {
    prefix: String,
    inner: R,
}

impl<R: PropertyResolver> PrefixedPropertyResolver<R> {
    pub fn new(prefix: impl Into<String>, inner: R) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: PropertyResolver> PropertyResolver for PrefixedPropertyResolver<R> {
    fn resolve(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        match name.strip_prefix(self.prefix.as_str()) {
            Some(rest) => self.inner.resolve(rest, ctx),
            None => Ok(None),
        }
    }

    fn prefix(&self) -> Option<&str> {
        Some(&self.prefix)
    }
}
