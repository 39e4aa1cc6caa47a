// Adapters between XML text and the owned tree: roxmltree for reading,
// quick-xml for writing diagnostics output.
use crate::error::TreeError;
use crate::node::{Element, Node};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

/// Parses an XML document and returns an owned copy of its root element.
///
/// Processing instructions and the document prolog are dropped; comments and
/// all text (including whitespace) are kept so trivia survives merging.
pub fn parse(text: &str) -> Result<Element, TreeError> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(from_roxmltree(doc.root_element()))
}

/// Copies a parsed roxmltree element into the owned tree.
pub fn from_roxmltree(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());
    for attr in node.attributes() {
        element.attrs.set(attr.name(), attr.value());
    }
    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(from_roxmltree(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.children.push(Node::text(text));
            }
        } else if child.is_comment() {
            element
                .children
                .push(Node::comment(child.text().unwrap_or("")));
        }
    }
    element
}

enum WriteStep<'a> {
    Enter(&'a Element),
    Text(&'a str),
    Comment(&'a str),
    Close(&'a str),
}

impl Element {
    /// Serializes the element without adding or removing any whitespace.
    pub fn to_xml_string(&self) -> Result<String, TreeError> {
        let mut writer = Writer::new(Vec::new());
        let mut stack = vec![WriteStep::Enter(self)];

        while let Some(step) = stack.pop() {
            let event = match step {
                WriteStep::Enter(element) => {
                    let mut start = BytesStart::new(element.tag.as_str());
                    for (name, value) in element.attrs.iter() {
                        start.push_attribute((name, value));
                    }
                    if element.children.is_empty() {
                        Event::Empty(start)
                    } else {
                        stack.push(WriteStep::Close(&element.tag));
                        for child in element.children.iter().rev() {
                            stack.push(match child {
                                Node::Element(e) => WriteStep::Enter(e),
                                Node::Text(t) => WriteStep::Text(t),
                                Node::Comment(c) => WriteStep::Comment(c),
                            });
                        }
                        Event::Start(start)
                    }
                }
                WriteStep::Text(text) => Event::Text(BytesText::new(text)),
                WriteStep::Comment(content) => Event::Comment(BytesText::from_escaped(content)),
                WriteStep::Close(tag) => Event::End(BytesEnd::new(tag)),
            };
            writer
                .write_event(event)
                .map_err(|e| TreeError::Serialize(e.to_string()))?;
        }

        Ok(String::from_utf8(writer.into_inner())?)
    }
}
