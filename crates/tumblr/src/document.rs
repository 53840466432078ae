//! Owned XML element tree
//!
//! The API answers with a small, shallow document, so it is read into an
//! owned tree once and the mapping layer walks it with `find`/`find_all`.
//! Every element also carries the optional-field helpers the mappers use:
//! a missing child or attribute becomes an empty string, while numeric
//! attributes keep "absent" distinct from "present".

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::TumblrError;

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse a complete document from raw XML bytes.
    pub fn parse(xml: &[u8]) -> crate::Result<Self> {
        Self::from_reader(xml)
    }

    /// Parse a complete document from any buffered reader.
    pub fn from_reader<R: BufRead>(input: R) -> crate::Result<Self> {
        let mut reader = Reader::from_reader(input);

        let mut buf = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => open.push(Element::from_start(&e)?),
                Ok(Event::Empty(e)) => {
                    let element = Element::from_start(&e)?;
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let mut element = open
                        .pop()
                        .ok_or_else(|| TumblrError::Parse("unmatched closing tag".to_string()))?;
                    element.finish_text();
                    attach(&mut open, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| parse_error(e, reader.buffer_position()))?;
                    push_text(&mut open, &text)?;
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    push_text(&mut open, &text)?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(parse_error(e, reader.buffer_position())),
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = open.last() {
            return Err(TumblrError::Parse(format!(
                "unexpected end of document inside <{}>",
                unclosed.name
            )));
        }

        root.map(|root| Document { root })
            .ok_or_else(|| TumblrError::Parse("document has no root element".to_string()))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn parse_error(err: impl std::fmt::Display, position: impl std::fmt::Display) -> TumblrError {
    TumblrError::Parse(format!("{} at byte {}", err, position))
}

fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) -> crate::Result<()> {
    if let Some(parent) = open.last_mut() {
        if parent.children.is_empty() {
            parent.finish_text();
        }
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(TumblrError::Parse(format!(
            "second root element <{}>",
            element.name
        )))
    }
}

fn push_text(open: &mut [Element], text: &str) -> crate::Result<()> {
    match open.last_mut() {
        Some(element) => {
            element.push_text(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(TumblrError::Parse(
            "text content outside the root element".to_string(),
        )),
    }
}

/// One element of the tree: name, attributes, leading text and children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> crate::Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| TumblrError::Parse(format!("<{}>: {}", name, e)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| TumblrError::Parse(format!("<{}> attribute '{}': {}", name, key, e)))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            text: None,
            children: Vec::new(),
        })
    }

    /// Only text seen before the first child element counts as the element's text.
    fn push_text(&mut self, text: &str) {
        if !self.children.is_empty() || text.is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }

    /// Trim the leading text once it is complete; whitespace-only text is dropped.
    fn finish_text(&mut self) {
        self.text = self
            .text
            .take()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == tag)
    }

    /// All direct children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == tag)
    }

    /// Text of the first `tag` child, or `""` when the child or its text is missing.
    pub fn child_text(&self, tag: &str) -> String {
        self.find(tag)
            .and_then(Element::text)
            .unwrap_or_default()
            .to_string()
    }

    /// Value of an attribute, or `""` when it is missing.
    pub fn attr_text(&self, name: &str) -> String {
        self.attr(name).unwrap_or_default().to_string()
    }

    /// Integer attribute that may legitimately be absent.
    ///
    /// Absence yields `Ok(None)`; a value that is present but not an integer
    /// is an error rather than being folded into "absent".
    pub fn optional_int(&self, name: &'static str) -> crate::Result<Option<i64>> {
        let Some(raw) = self.attr(name) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| TumblrError::InvalidInteger {
                element: self.name.clone(),
                attribute: name,
                value: raw.to_string(),
            })
    }

    /// Integer attribute the wire format always carries.
    pub fn required_int(&self, name: &'static str) -> crate::Result<i64> {
        self.optional_int(name)?
            .ok_or_else(|| TumblrError::MissingAttribute {
                element: self.name.clone(),
                attribute: name,
            })
    }
}
