use crate::error::PropertyError;
use crate::resolver::{PropertyResolver, ResolveContext};
use layerconf_tree::Element;

/// Resolves dotted paths such as `server.http.port` against a tree.
///
/// With `match_root` set, the first segment has to name the root element.
/// At every element an attribute whose name equals the whole remaining path
/// wins; otherwise the lookup descends into the single child whose tag is the
/// next segment. No match or an ambiguous match makes the name absent. The
/// value of an element is its concatenated text content.
#[derive(Debug, Clone)]
pub struct XmlPropertyResolver {
    root: Element,
    match_root: bool,
}

impl XmlPropertyResolver {
    pub fn new(root: Element, match_root: bool) -> Self {
        Self { root, match_root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Follows `path` from the root without any placeholder handling.
    pub fn lookup(&self, path: &str) -> Option<String> {
        let mut rest = path;
        if self.match_root {
            rest = strip_segment(rest, &self.root.tag)?;
        }

        let mut current = &self.root;
        loop {
            if rest.is_empty() {
                return Some(current.text_content());
            }
            if let Some(value) = current.attr(rest) {
                return Some(value.to_string());
            }

            let segment = rest.split('.').next().unwrap_or(rest);
            current = single_child(current, segment)?;
            rest = strip_segment(rest, segment)?;
        }
    }
}

/// Removes `segment` and the dot following it from the front of `path`.
fn strip_segment<'p>(path: &'p str, segment: &str) -> Option<&'p str> {
    let rest = path.strip_prefix(segment)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('.')
}

fn single_child<'e>(parent: &'e Element, tag: &str) -> Option<&'e Element> {
    let mut matches = parent.child_elements().filter(|child| child.tag == tag);
    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first),
    }
}

impl PropertyResolver for XmlPropertyResolver {
    fn resolve(
        &self,
        name: &str,
        _ctx: &mut ResolveContext<'_>,
    ) -> Result<Option<String>, PropertyError> {
        Ok(self.lookup(name))
    }
}
