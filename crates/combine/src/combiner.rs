//! Folding a sequence of layers into one tree.

use crate::error::CombineError;
use crate::merge::merge;
use crate::policy::CombineSelf;
use layerconf_tree::{Element, Node};

/// Accumulates layers supplied in ascending priority.
///
/// The first layer is stored as-is; every later layer is merged as the
/// dominant side over everything accumulated so far. A combiner is not meant
/// to be shared between threads while layers are still being added.
#[derive(Debug, Default)]
pub struct Combiner {
    accumulated: Option<Element>,
    layers: usize,
}

impl Combiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one more, more dominant layer into the accumulated tree.
    ///
    /// On error the accumulated tree is left as it was before the call.
    pub fn combine(&mut self, layer: &Element) -> Result<(), CombineError> {
        let number = self.layers + 1;
        let merged = match &self.accumulated {
            None => layer.clone(),
            Some(recessive) => {
                merge(Some(recessive), layer)?.ok_or_else(|| CombineError::RootRemoved {
                    layer: number,
                    tag: layer.tag.clone(),
                })?
            }
        };
        log::debug!("Combined layer {} with root <{}>", number, layer.tag);
        self.accumulated = Some(merged);
        self.layers = number;
        Ok(())
    }

    /// The tree accumulated so far, before `DEFAULTS` skeletons are removed.
    pub fn accumulated(&self) -> Option<&Element> {
        self.accumulated.as_ref()
    }

    /// Number of layers combined so far.
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Returns the merged root, with every element still marked `DEFAULTS`
    /// removed together with its leading trivia.
    pub fn finalize(self) -> Result<Element, CombineError> {
        let mut root = self.accumulated.ok_or(CombineError::NoInput)?;
        let removed = remove_defaults(&mut root)?;
        log::debug!(
            "Finalized {} layer(s); removed {} default-only element(s)",
            self.layers,
            removed
        );
        Ok(root)
    }
}

/// Combines `layers` in order and finalizes the result.
pub fn combine_all<'a, I>(layers: I) -> Result<Element, CombineError>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut combiner = Combiner::new();
    for layer in layers {
        combiner.combine(layer)?;
    }
    combiner.finalize()
}

fn remove_defaults(root: &mut Element) -> Result<usize, CombineError> {
    let mut removed = 0;
    let mut stack = vec![root];

    while let Some(element) = stack.pop() {
        let children = std::mem::take(&mut element.children);
        let mut kept = Vec::with_capacity(children.len());
        for child in children {
            if let Node::Element(e) = &child {
                if CombineSelf::declared(e)? == Some(CombineSelf::Defaults) {
                    while kept.last().is_some_and(Node::is_trivia) {
                        kept.pop();
                    }
                    removed += 1;
                    continue;
                }
            }
            kept.push(child);
        }
        element.children = kept;
        stack.extend(element.children.iter_mut().filter_map(Node::as_element_mut));
    }

    Ok(removed)
}
