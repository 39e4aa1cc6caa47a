//! Declarative merge policies carried as attributes on configuration elements.

use crate::error::CombineError;
use layerconf_tree::Element;
use std::fmt;

/// Attribute controlling how an element merges with its counterpart.
pub const COMBINE_SELF: &str = "combine.self";

/// Attribute controlling how an element's child list merges.
pub const COMBINE_CHILDREN: &str = "combine.children";

/// How an element merges with the element it is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombineSelf {
    /// Attributes and children are merged recursively.
    #[default]
    Merge,
    /// The element is removed from the result.
    Remove,
    /// The element replaces its recessive counterpart wholesale.
    Override,
    /// The element only provides defaults; it disappears at finalization
    /// unless a more dominant layer supplies a counterpart.
    Defaults,
    /// Any dominant counterpart replaces this element wholesale.
    Overridable,
    /// Any dominant sibling with the same tag name discards this element.
    OverridableByTag,
}

/// How an element's children merge with its counterpart's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CombineChildren {
    /// Children are paired by key and merged.
    #[default]
    Merge,
    /// Dominant children are appended after the recessive ones.
    Append,
}

impl CombineSelf {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombineSelf::Merge => "MERGE",
            CombineSelf::Remove => "REMOVE",
            CombineSelf::Override => "OVERRIDE",
            CombineSelf::Defaults => "DEFAULTS",
            CombineSelf::Overridable => "OVERRIDABLE",
            CombineSelf::OverridableByTag => "OVERRIDABLE_BY_TAG",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let policy = match text.trim().to_ascii_uppercase().as_str() {
            "MERGE" => CombineSelf::Merge,
            "REMOVE" => CombineSelf::Remove,
            "OVERRIDE" => CombineSelf::Override,
            "DEFAULTS" => CombineSelf::Defaults,
            "OVERRIDABLE" => CombineSelf::Overridable,
            "OVERRIDABLE_BY_TAG" => CombineSelf::OverridableByTag,
            _ => return None,
        };
        Some(policy)
    }

    /// The policy explicitly declared on `element`, if any.
    pub fn declared(element: &Element) -> Result<Option<Self>, CombineError> {
        declared(element, COMBINE_SELF, Self::parse)
    }

    /// Like [`CombineSelf::declared`] but accepts an absent element.
    pub fn declared_on(element: Option<&Element>) -> Result<Option<Self>, CombineError> {
        element.map_or(Ok(None), Self::declared)
    }
}

impl CombineChildren {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombineChildren::Merge => "MERGE",
            CombineChildren::Append => "APPEND",
        }
    }

    fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "MERGE" => Some(CombineChildren::Merge),
            "APPEND" => Some(CombineChildren::Append),
            _ => None,
        }
    }

    pub fn declared(element: &Element) -> Result<Option<Self>, CombineError> {
        declared(element, COMBINE_CHILDREN, Self::parse)
    }

    pub fn declared_on(element: Option<&Element>) -> Result<Option<Self>, CombineError> {
        element.map_or(Ok(None), Self::declared)
    }
}

fn declared<T>(
    element: &Element,
    attribute: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, CombineError> {
    match element.attr(attribute) {
        None => Ok(None),
        Some(text) => parse(text)
            .map(Some)
            .ok_or_else(|| CombineError::InvalidPolicy {
                element: element.tag.clone(),
                attribute,
                value: text.to_string(),
            }),
    }
}

impl fmt::Display for CombineSelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CombineChildren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Removes `combine.self` and `combine.children` from every element of the tree.
pub fn strip_merge_attributes(root: &mut Element) {
    let mut stack = vec![root];
    while let Some(element) = stack.pop() {
        element.remove_attr(COMBINE_SELF);
        element.remove_attr(COMBINE_CHILDREN);
        stack.extend(element.children.iter_mut().filter_map(|c| c.as_element_mut()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing_is_case_insensitive() {
        let el = Element::new("service").with_attr(COMBINE_SELF, "overridable_by_tag");
        assert_eq!(
            CombineSelf::declared(&el).unwrap(),
            Some(CombineSelf::OverridableByTag)
        );

        let el = Element::new("service").with_attr(COMBINE_CHILDREN, "Append");
        assert_eq!(
            CombineChildren::declared(&el).unwrap(),
            Some(CombineChildren::Append)
        );
    }

    #[test]
    fn test_missing_policy_is_none() {
        let el = Element::new("service");
        assert_eq!(CombineSelf::declared(&el).unwrap(), None);
        assert_eq!(CombineChildren::declared_on(None).unwrap(), None);
    }

    #[test]
    fn test_invalid_policy_names_element_and_value() {
        let el = Element::new("service").with_attr(COMBINE_SELF, "sometimes");
        let err = CombineSelf::declared(&el).unwrap_err();
        assert_eq!(
            err,
            CombineError::InvalidPolicy {
                element: "service".to_string(),
                attribute: COMBINE_SELF,
                value: "sometimes".to_string(),
            }
        );
        let message = err.to_string();
        assert!(message.contains("service"));
        assert!(message.contains("sometimes"));
    }

    #[test]
    fn test_strip_merge_attributes_is_deep() {
        let mut root = Element::new("config")
            .with_attr(COMBINE_CHILDREN, "append")
            .with_child(
                Element::new("service")
                    .with_attr("id", "1")
                    .with_attr(COMBINE_SELF, "override"),
            );
        strip_merge_attributes(&mut root);

        assert!(root.attr(COMBINE_CHILDREN).is_none());
        let service = root.child_elements().next().unwrap();
        assert!(service.attr(COMBINE_SELF).is_none());
        assert_eq!(service.id(), Some("1"));
    }
}
