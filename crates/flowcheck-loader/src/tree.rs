//! A minimal generic XML tree, used because `<body>` may nest arbitrary
//! `zofar` elements at any depth and we need to walk them looking for
//! `variable`/`visible` attributes rather than deserialize into a fixed
//! shape.

use crate::error::LoadError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

/// One XML element, with its namespace-prefix-stripped local name, its
/// attributes, its child elements in document order, and any direct text.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Direct children with the given local name.
    pub fn child_named<'a>(&'a self, name: &str) -> Option<&'a Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All descendants (including indirect ones) with the given local name,
    /// in document order.
    pub fn descendants_named<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.descendants_named(name, out);
        }
    }
}

/// Parses an XML document into a tree rooted at its single top-level
/// element, stripping namespace prefixes from every element's local name.
pub fn parse_tree(xml: &str) -> Result<Element, LoadError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(LoadError::MalformedXml { message: format!("{e} at byte {}", reader.buffer_position()) })
            }
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                stack.push(element_from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let el = element_from_start(&e)?;
                push_child(&mut stack, &mut root, el);
            }
            Ok(Event::End(_)) => {
                if let Some(el) = stack.pop() {
                    push_child(&mut stack, &mut root, el);
                }
            }
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| LoadError::MalformedXml { message: "document has no root element".to_string() })
}

fn push_child(stack: &mut Vec<Element>, root: &mut Option<Element>, el: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(el);
    } else {
        *root = Some(el);
    }
}

fn element_from_start(e: &quick_xml::events::BytesStart) -> Result<Element, LoadError> {
    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| LoadError::MalformedXml { message: err.to_string() })?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .decode_and_unescape_value(e.decoder())
            .map_err(|err| LoadError::MalformedXml { message: err.to_string() })?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(Element { name, attrs, children: Vec::new() })
}
