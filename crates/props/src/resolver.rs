//! The resolver contract and the per-call resolution context.

use crate::error::PropertyError;
use crate::placeholder::{Part, has_placeholders, split};
use std::collections::HashSet;
use std::fmt::Debug;

/// A source of property values.
///
/// `resolve` returns `Ok(None)` when this resolver simply does not know the
/// name, letting a compound chain try the next resolver. Returning an error
/// instead is final: the chain stops and the error reaches the caller.
///
/// Nested lookups (for example a value that references another property) go
/// through [`ResolveContext::resolve`], which starts again at the top of the
/// chain that the current call was made against.
pub trait PropertyResolver: Send + Sync + Debug {
    fn resolve(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError>;

    /// A literal prefix every name this resolver can answer starts with.
    ///
    /// Compound resolvers skip resolvers whose prefix does not match; it has
    /// no other effect on results.
    fn prefix(&self) -> Option<&str> {
        None
    }
}

impl<R: PropertyResolver + ?Sized> PropertyResolver for Box<R> {
    fn resolve(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        (**self).resolve(name, ctx)
    }

    fn prefix(&self) -> Option<&str> {
        (**self).prefix()
    }
}

/// State for one top-level resolution: the chain to restart nested lookups
/// at, and the names currently being resolved (for cycle detection).
///
/// A context is created per call and never shared, so concurrent filtering
/// against the same resolver chain is independent.
#[derive(Debug)]
pub struct ResolveContext<'r> {
    top: &'r dyn PropertyResolver,
    in_progress: HashSet<String>,
}

impl<'r> ResolveContext<'r> {
    pub fn new(top: &'r dyn PropertyResolver) -> Self {
        Self {
            top,
            in_progress: HashSet::new(),
        }
    }

    pub fn top(&self) -> &'r dyn PropertyResolver {
        self.top
    }

    /// Looks `name` up through the whole chain.
    pub fn resolve(&mut self, name: &str) -> Result<Option<String>, PropertyError> {
        let top = self.top;
        top.resolve(name, self)
    }

    /// Replaces every placeholder in `text` with its resolved value.
    pub fn filter(&mut self, text: &str) -> Result<String, PropertyError> {
        if !has_placeholders(text) {
            return Ok(text.to_string());
        }
        let mut out = String::with_capacity(text.len());
        for part in split(text) {
            match part {
                Part::Literal(literal) => out.push_str(literal),
                Part::Placeholder(name) => match self.resolve(name)? {
                    Some(value) => out.push_str(&value),
                    None => return Err(PropertyError::not_found(name)),
                },
            }
        }
        Ok(out)
    }

    /// Marks `name` as being resolved, failing if it already is.
    pub fn enter(&mut self, name: &str) -> Result<(), PropertyError> {
        if !self.in_progress.insert(name.to_string()) {
            log::warn!("Circular property dependency detected on '{}'", name);
            return Err(PropertyError::Circular {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn leave(&mut self, name: &str) {
        self.in_progress.remove(name);
    }

    pub fn is_in_progress(&self, name: &str) -> bool {
        self.in_progress.contains(name)
    }
}

/// Expands every placeholder in `text` against `resolver`.
///
/// Text without placeholders is returned unchanged.
pub fn filter(text: &str, resolver: &dyn PropertyResolver) -> Result<String, PropertyError> {
    ResolveContext::new(resolver).filter(text)
}

/// Resolves a single property name against `resolver`.
pub fn resolve(name: &str, resolver: &dyn PropertyResolver) -> Result<Option<String>, PropertyError> {
    ResolveContext::new(resolver).resolve(name)
}
