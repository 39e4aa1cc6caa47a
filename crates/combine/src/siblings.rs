//! Grouping of a child list into keyed elements with their leading trivia.

use layerconf_tree::{Element, Node};

/// Identity used to pair sibling elements across two layers.
///
/// A missing `id` only matches another missing `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key<'t> {
    pub tag: &'t str,
    pub id: Option<&'t str>,
}

impl<'t> Key<'t> {
    pub fn of(element: &'t Element) -> Self {
        Self {
            tag: &element.tag,
            id: element.id(),
        }
    }
}

/// A child element together with the comments and whitespace directly before it.
#[derive(Debug, Clone)]
pub struct Sibling<'t> {
    pub leading: Vec<&'t Node>,
    pub element: &'t Element,
}

impl<'t> Sibling<'t> {
    pub fn key(&self) -> Key<'t> {
        Key::of(self.element)
    }
}

/// The child list of one element, split into keyed siblings and stray nodes.
///
/// Stray nodes are non-whitespace text, and any trivia that is not directly
/// followed by an element. They keep their relative source order.
#[derive(Debug, Clone, Default)]
pub struct Siblings<'t> {
    pub elements: Vec<Sibling<'t>>,
    pub stray: Vec<&'t Node>,
}

impl<'t> Siblings<'t> {
    pub fn of(parent: &'t Element) -> Self {
        let mut siblings = Siblings::default();
        let mut pending: Vec<&'t Node> = Vec::new();

        for node in &parent.children {
            match node {
                Node::Element(element) => siblings.elements.push(Sibling {
                    leading: std::mem::take(&mut pending),
                    element,
                }),
                _ if node.is_trivia() => pending.push(node),
                _ => {
                    siblings.stray.append(&mut pending);
                    siblings.stray.push(node);
                }
            }
        }
        siblings.stray.append(&mut pending);
        siblings
    }

    pub fn of_optional(parent: Option<&'t Element>) -> Self {
        parent.map(Siblings::of).unwrap_or_default()
    }

    pub fn has_text(&self) -> bool {
        self.stray.iter().any(|n| matches!(n, Node::Text(_)) && !n.is_trivia())
    }

    pub fn has_whitespace(&self) -> bool {
        self.stray.iter().any(|n| matches!(n, Node::Text(_)) && n.is_trivia())
    }
}
