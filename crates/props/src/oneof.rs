use crate::error::PropertyError;
use crate::placeholder::{Part, split};
use crate::resolver::{PropertyResolver, ResolveContext};

/// Prefix of names handled by [`OneOfPropertyResolver`].
pub const ONEOF_PREFIX: &str = "oneof:";

/// Picks the first alternative that fully resolves.
///
/// Handles names of the form `oneof:<alt1>,<alt2>,...`. Alternatives are
/// separated by commas outside placeholders and tried left to right. The
/// first one whose placeholders all resolve is returned with them
/// substituted; if none does, the name is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneOfPropertyResolver;

impl OneOfPropertyResolver {
    pub fn new() -> Self {
        Self
    }
}

impl PropertyResolver for OneOfPropertyResolver {
    fn resolve(
        &self,
        name: &str,
        ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        let Some(body) = name.strip_prefix(ONEOF_PREFIX) else {
            return Ok(None);
        };

        for alternative in alternatives(&split(body)) {
            if let Some(value) = try_alternative(&alternative, ctx)? {
                return Ok(Some(value));
            }
        }
        log::debug!("No alternative of '{}' could be resolved", name);
        Ok(None)
    }

    fn prefix(&self) -> Option<&str> {
        Some(ONEOF_PREFIX)
    }
}

fn alternatives<'a>(parts: &[Part<'a>]) -> Vec<Vec<Part<'a>>> {
    let mut all = Vec::new();
    let mut current = Vec::new();
    for part in parts {
        match part {
            Part::Placeholder(_) => current.push(*part),
            Part::Literal(text) => {
                let mut segments = text.split(',');
                if let Some(first) = segments.next() {
                    if !first.is_empty() {
                        current.push(Part::Literal(first));
                    }
                }
                for segment in segments {
                    all.push(std::mem::take(&mut current));
                    if !segment.is_empty() {
                        current.push(Part::Literal(segment));
                    }
                }
            }
        }
    }
    all.push(current);
    all
}

/// Substitutes every placeholder of one alternative, or returns `None` if any
/// of them cannot be resolved.
fn try_alternative(
    parts: &[Part<'_>],
    ctx: &mut ResolveContext<'_>,
) -> Result<Option<String>, PropertyError> {
    let mut out = String::new();
    for part in parts {
        match part {
            Part::Literal(text) => out.push_str(text),
            Part::Placeholder(name) => match ctx.resolve(name) {
                Ok(Some(value)) => out.push_str(&value),
                Ok(None) | Err(PropertyError::NotFound { .. }) => return Ok(None),
                Err(e) => return Err(e),
            },
        }
    }
    Ok(Some(out))
}
