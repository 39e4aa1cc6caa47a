use crate::error::PropertyError;
use crate::resolver::{PropertyResolver, ResolveContext};
use layerconf_tree::{Element, Node};

/// Expands placeholders in every attribute value and text node below and
/// including `root`. Tags, attribute names and comments are left alone.
///
/// Nodes are visited in document order. Stops at the first placeholder that
/// cannot be resolved; the tree may then be partly filtered.
pub fn filter_element(root: &mut Element, resolver: &dyn PropertyResolver) -> Result<(), PropertyError> {
    for value in root.attrs.values_mut() {
        filter_in_place(value, resolver)?;
    }
    let mut stack: Vec<&mut Node> = root.children.iter_mut().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            Node::Element(element) => {
                for value in element.attrs.values_mut() {
                    filter_in_place(value, resolver)?;
                }
                stack.extend(element.children.iter_mut().rev());
            }
            Node::Text(text) => filter_in_place(text, resolver)?,
            Node::Comment(_) => {}
        }
    }
    Ok(())
}

fn filter_in_place(text: &mut String, resolver: &dyn PropertyResolver) -> Result<(), PropertyError> {
    let filtered = ResolveContext::new(resolver).filter(text)?;
    if filtered != *text {
        *text = filtered;
    }
    Ok(())
}
