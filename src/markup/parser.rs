//! Element tree construction over quick-xml's pull reader.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::element::Element;
use super::MarkupError;

/// Parse a document into its top-level elements.
///
/// An input with no elements yields an empty vector. Character data is only
/// allowed inside elements.
pub fn parse_document(input: &str) -> Result<Vec<Element>, MarkupError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut roots = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    loop {
        let event = reader.read_event().map_err(|source| MarkupError::Syntax {
            position: reader.error_position() as usize,
            source,
        })?;
        match event {
            Event::Start(start) => open.push(element(&start, &reader)?),
            Event::Empty(start) => {
                let element = element(&start, &reader)?;
                attach(&mut open, &mut roots, element);
            }
            // the reader checks end names against the open start tag
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    attach(&mut open, &mut roots, element);
                }
            }
            Event::Text(_) if open.is_empty() => {
                return Err(MarkupError::StrayText {
                    position: reader.buffer_position() as usize,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match open.pop() {
        Some(unclosed) => Err(MarkupError::UnexpectedEof(format!(
            "missing `</{}>`",
            unclosed.tag
        ))),
        None => Ok(roots),
    }
}

/// Parse a document that holds exactly one top-level element.
pub fn parse_fragment(input: &str) -> Result<Element, MarkupError> {
    let mut roots = parse_document(input)?;
    match roots.len() {
        1 => Ok(roots.remove(0)),
        0 => Err(MarkupError::UnexpectedEof("expected an element".into())),
        n => Err(MarkupError::MultipleRoots(n)),
    }
}

fn element(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element, MarkupError> {
    let syntax = |source: quick_xml::Error| MarkupError::Syntax {
        position: reader.buffer_position() as usize,
        source,
    };

    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    // repeated attributes are kept; lookups take the last one
    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(|e| syntax(e.into()))?;
        let value = attr.unescape_value().map_err(syntax)?;
        element.attrs.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            value.into_owned(),
        ));
    }
    Ok(element)
}

fn attach(open: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}
