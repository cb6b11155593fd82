//! Minimal owned element tree on top of `quick_xml`, with the handful of
//! structural queries the descriptor extraction needs.

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),
    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("unexpected end of document")]
    Truncated,
    #[error("document has no root element")]
    NoRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
}

#[derive(Debug, Default)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

/// One step of a structural path: a tag name, optionally filtered by an
/// attribute value.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    tag: &'a str,
    attr: Option<(&'a str, &'a str)>,
}

impl<'a> Step<'a> {
    pub fn tag(tag: &'a str) -> Self {
        Step { tag, attr: None }
    }

    pub fn with(tag: &'a str, key: &'a str, value: &'a str) -> Self {
        Step {
            tag,
            attr: Some((key, value)),
        }
    }

    fn matches(&self, element: &Element) -> bool {
        element.name == self.tag
            && self
                .attr
                .is_none_or(|(key, value)| element.attr(key) == Some(value))
    }
}

impl Element {
    fn open(start: &BytesStart) -> Result<Element, XmlError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            ..Element::default()
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Character data directly inside this element, untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }

    /// All elements below this one in document order, excluding itself.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut pending: Vec<&Element> = self.children.iter().rev().collect();
        while let Some(element) = pending.pop() {
            out.push(element);
            pending.extend(element.children.iter().rev());
        }
        out
    }

    /// Elements reached by matching `path[0]` against any descendant and
    /// each following step against direct children.
    pub fn find_all(&self, path: &[Step]) -> Vec<&Element> {
        let Some((first, rest)) = path.split_first() else {
            return Vec::new();
        };
        let mut found: Vec<&Element> = self
            .descendants()
            .into_iter()
            .filter(|e| first.matches(e))
            .collect();
        for step in rest {
            found = found
                .into_iter()
                .flat_map(|e| e.children().filter(move |c| step.matches(c)))
                .collect();
        }
        found
    }

    pub fn find(&self, path: &[Step]) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(XmlError::MultipleRoots),
    }
    Ok(())
}

/// Parse a whole document into its root element.
pub fn parse(text: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::open(&start)?),
            Event::Empty(start) => {
                let element = Element::open(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(XmlError::Truncated)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(t) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if !stack.is_empty() {
        return Err(XmlError::Truncated);
    }
    root.ok_or(XmlError::NoRoot)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<root>
    <a name="one"><b>first</b></a>
    <nested><a name="two"><b>second</b><b>third</b></a></nested>
    <b>top-level</b>
    <c value="x &amp; y"/>
</root>"#;

    #[test]
    fn parses_elements_attributes_and_text() {
        let root = parse(DOC).unwrap();
        assert_eq!(root.name, "root");
        assert_eq!(root.children().count(), 4);
        let c = root.find(&[Step::tag("c")]).unwrap();
        assert_eq!(c.attr("value"), Some("x & y"));
        assert_eq!(c.attr("missing"), None);
    }

    #[test]
    fn find_all_keeps_document_order() {
        let root = parse(DOC).unwrap();
        let texts: Vec<&str> = root
            .find_all(&[Step::tag("a"), Step::tag("b")])
            .into_iter()
            .map(Element::text)
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn attribute_filter_narrows_the_step() {
        let root = parse(DOC).unwrap();
        let found = root.find_all(&[Step::with("a", "name", "two"), Step::tag("b")]);
        assert_eq!(found.len(), 2);
        assert!(root.find(&[Step::with("a", "name", "three")]).is_none());
    }

    #[test]
    fn descendant_search_excludes_self() {
        let root = parse(DOC).unwrap();
        assert!(root.find(&[Step::tag("root")]).is_none());
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(parse("<root><a></b></root>").is_err());
        assert!(parse("<root><a>").is_err());
        assert!(matches!(parse(""), Err(XmlError::NoRoot)));
        assert!(matches!(parse("<a/><b/>"), Err(XmlError::MultipleRoots)));
    }
}
