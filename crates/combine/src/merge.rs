//! Pairwise merge of a recessive and a dominant element.
//!
//! The merge walks both trees with an explicit stack of partially built
//! elements, so deeply nested input cannot exhaust the native call stack.
//! Inputs are only borrowed; every node in the result is a fresh copy.

use crate::error::CombineError;
use crate::policy::{COMBINE_SELF, CombineChildren, CombineSelf};
use crate::siblings::{Key, Sibling, Siblings};
use layerconf_tree::{Element, Node};
use std::collections::{HashMap, HashSet};

/// One pending unit of work inside a partially built element.
enum Step<'t> {
    Copy(&'t Node),
    CopyElement(&'t Element),
    Merge {
        leading: Vec<&'t Node>,
        recessive: Option<&'t Element>,
        dominant: &'t Element,
    },
}

/// An element whose children are still being produced.
struct Frame<'t> {
    element: Element,
    /// Trivia that goes in front of `element` once it is attached to its parent.
    leading: Vec<&'t Node>,
    steps: std::vec::IntoIter<Step<'t>>,
}

enum Opened<'t> {
    Done(Option<Element>),
    Frame(Frame<'t>),
}

/// Merges `dominant` over `recessive`.
///
/// Returns `Ok(None)` when the dominant element asks to be removed.
pub fn merge(
    recessive: Option<&Element>,
    dominant: &Element,
) -> Result<Option<Element>, CombineError> {
    let mut stack = match open(recessive, dominant)? {
        Opened::Done(result) => return Ok(result),
        Opened::Frame(frame) => vec![frame],
    };

    loop {
        let Some(frame) = stack.last_mut() else {
            return Ok(None);
        };
        match frame.steps.next() {
            Some(Step::Copy(node)) => frame.element.children.push(node.clone()),
            Some(Step::CopyElement(element)) => {
                frame.element.children.push(Node::Element(element.clone()))
            }
            Some(Step::Merge {
                leading,
                recessive,
                dominant,
            }) => match open(recessive, dominant)? {
                Opened::Done(Some(element)) => attach(frame, &leading, element),
                Opened::Done(None) => {}
                Opened::Frame(mut child) => {
                    child.leading = leading;
                    stack.push(child);
                }
            },
            None => {
                let Some(done) = stack.pop() else {
                    return Ok(None);
                };
                match stack.last_mut() {
                    Some(parent) => attach(parent, &done.leading, done.element),
                    None => return Ok(Some(done.element)),
                }
            }
        }
    }
}

fn attach(parent: &mut Frame<'_>, leading: &[&Node], element: Element) {
    parent
        .element
        .children
        .extend(leading.iter().map(|node| (*node).clone()));
    parent.element.children.push(Node::Element(element));
}

/// Decides how a pair merges. Pairs that need their children merged become a
/// new frame; everything else is finished immediately.
fn open<'t>(
    recessive: Option<&'t Element>,
    dominant: &'t Element,
) -> Result<Opened<'t>, CombineError> {
    let dominant_self = CombineSelf::declared(dominant)?;
    let recessive_self = CombineSelf::declared_on(recessive)?;

    if dominant_self == Some(CombineSelf::Remove) {
        return Ok(Opened::Done(None));
    }
    if dominant_self == Some(CombineSelf::Override)
        || recessive_self == Some(CombineSelf::Overridable)
    {
        let mut copy = dominant.clone();
        copy.remove_attr(COMBINE_SELF);
        return Ok(Opened::Done(Some(copy)));
    }

    let children_policy = match CombineChildren::declared(dominant)? {
        Some(policy) => policy,
        None => CombineChildren::declared_on(recessive)?.unwrap_or_default(),
    };

    let steps = match (children_policy, recessive) {
        (CombineChildren::Append, None) => return Ok(Opened::Done(Some(dominant.clone()))),
        (CombineChildren::Append, Some(_)) => dominant
            .children
            .iter()
            .map(|node| match node {
                Node::Element(element) => Step::Merge {
                    leading: Vec::new(),
                    recessive: None,
                    dominant: element,
                },
                other => Step::Copy(other),
            })
            .collect(),
        (CombineChildren::Merge, _) => plan_children(recessive, dominant)?,
    };

    let mut element = Element::new(dominant.tag.clone());
    if let Some(recessive) = recessive {
        element.attrs.extend_from(&recessive.attrs);
        if children_policy == CombineChildren::Append {
            let end = recessive
                .children
                .iter()
                .rposition(|node| !node.is_trivia())
                .map_or(0, |i| i + 1);
            element.children = recessive.children[..end].to_vec();
        }
    }
    element.attrs.extend_from(&dominant.attrs);

    let resolved_self = match dominant_self {
        Some(policy) => Some(policy),
        None if recessive_self != Some(CombineSelf::Defaults) => recessive_self,
        None => None,
    };
    match resolved_self {
        Some(policy) => {
            element.set_attr(COMBINE_SELF, policy.as_str());
        }
        None => {
            element.remove_attr(COMBINE_SELF);
        }
    }

    Ok(Opened::Frame(Frame {
        element,
        leading: Vec::new(),
        steps: steps.into_iter(),
    }))
}

/// Lays out the merged child list of a `MERGE` pair.
///
/// Recessive elements come first in their own order, merged in place when
/// they pair 1:1 with a dominant sibling. Unpaired dominant elements follow,
/// then stray text and trailing trivia. Recessive stray whitespace is dropped
/// when the dominant side has its own.
fn plan_children<'t>(
    recessive: Option<&'t Element>,
    dominant: &'t Element,
) -> Result<Vec<Step<'t>>, CombineError> {
    let recessive_siblings = Siblings::of_optional(recessive);
    let dominant_siblings = Siblings::of(dominant);

    let dominant_tags: HashSet<&str> = dominant_siblings
        .elements
        .iter()
        .map(|s| s.element.tag.as_str())
        .collect();

    let mut retained: Vec<Sibling<'t>> = Vec::with_capacity(recessive_siblings.elements.len());
    for sibling in recessive_siblings.elements {
        let policy = CombineSelf::declared(sibling.element)?;
        if policy == Some(CombineSelf::OverridableByTag)
            && dominant_tags.contains(sibling.element.tag.as_str())
        {
            continue;
        }
        retained.push(sibling);
    }

    let pairing = Pairing::new(&retained, &dominant_siblings.elements);

    let mut steps = Vec::new();
    for sibling in &retained {
        match pairing.counterpart(sibling.key()) {
            Some(counterpart) => {
                let leading = if counterpart.leading.is_empty() {
                    sibling.leading.clone()
                } else {
                    counterpart.leading.clone()
                };
                steps.push(Step::Merge {
                    leading,
                    recessive: Some(sibling.element),
                    dominant: counterpart.element,
                });
            }
            None => {
                steps.extend(sibling.leading.iter().copied().map(Step::Copy));
                steps.push(Step::CopyElement(sibling.element));
            }
        }
    }

    for sibling in &dominant_siblings.elements {
        if pairing.counterpart(sibling.key()).is_none() {
            steps.push(Step::Merge {
                leading: sibling.leading.clone(),
                recessive: None,
                dominant: sibling.element,
            });
        }
    }

    // Stray text goes after the elements, so in mixed content the text of a
    // merged element ends up behind its child elements.
    let dominant_has_text = dominant_siblings.has_text();
    let dominant_has_whitespace = dominant_siblings.has_whitespace();
    steps.extend(
        recessive_siblings
            .stray
            .into_iter()
            .filter(|node| match node {
                Node::Text(_) if node.is_trivia() => !dominant_has_whitespace,
                _ => !dominant_has_text || node.is_trivia(),
            })
            .map(Step::Copy),
    );
    steps.extend(dominant_siblings.stray.into_iter().map(Step::Copy));

    Ok(steps)
}

/// Which dominant sibling, if any, each key pairs with.
///
/// A key pairs only when it occurs exactly once on each side. A key without an
/// `id` additionally requires its tag to be unique on both sides, so anonymous
/// siblings are never matched against each other by position.
struct Pairing<'s, 't> {
    dominant: HashMap<Key<'t>, &'s Sibling<'t>>,
    recessive_keys: HashMap<Key<'t>, usize>,
    dominant_keys: HashMap<Key<'t>, usize>,
    recessive_tags: HashMap<&'t str, usize>,
    dominant_tags: HashMap<&'t str, usize>,
}

impl<'s, 't> Pairing<'s, 't> {
    fn new(recessive: &'s [Sibling<'t>], dominant: &'s [Sibling<'t>]) -> Self {
        let mut pairing = Pairing {
            dominant: HashMap::new(),
            recessive_keys: HashMap::new(),
            dominant_keys: HashMap::new(),
            recessive_tags: HashMap::new(),
            dominant_tags: HashMap::new(),
        };
        for sibling in recessive {
            *pairing.recessive_keys.entry(sibling.key()).or_insert(0) += 1;
            *pairing.recessive_tags.entry(sibling.element.tag.as_str()).or_insert(0) += 1;
        }
        for sibling in dominant {
            pairing.dominant.insert(sibling.key(), sibling);
            *pairing.dominant_keys.entry(sibling.key()).or_insert(0) += 1;
            *pairing.dominant_tags.entry(sibling.element.tag.as_str()).or_insert(0) += 1;
        }
        pairing
    }

    fn counterpart(&self, key: Key<'t>) -> Option<&'s Sibling<'t>> {
        let once = |counts: &HashMap<Key<'t>, usize>| counts.get(&key) == Some(&1);
        if !once(&self.recessive_keys) || !once(&self.dominant_keys) {
            return None;
        }
        if key.id.is_none()
            && (self.recessive_tags.get(key.tag) != Some(&1)
                || self.dominant_tags.get(key.tag) != Some(&1))
        {
            return None;
        }
        self.dominant.get(&key).copied()
    }
}
