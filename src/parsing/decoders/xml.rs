//! XML decoder.
//!
//! Reads the direct children of the root element. Each child's tag becomes a
//! field. The value is the child's leading text, entity-unescaped and kept
//! verbatim, up to its first element child. A child with no leading text maps
//! to `null`. Grandchildren and any text after them are ignored.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;

use crate::parsing::types::{Format, ParseError, ParseResult, Record};

/// Depth at which a child of the root is open.
const CHILD_DEPTH: usize = 2;

/// A direct child of the root that is still open.
struct OpenChild {
    name: String,
    text: Option<String>,
    /// Set once a grandchild opens; later text is not the child's own.
    sealed: bool,
}

impl OpenChild {
    fn new(name: String) -> Self {
        Self {
            name,
            text: None,
            sealed: false,
        }
    }

    fn push(&mut self, text: &str) {
        if !self.sealed {
            self.text.get_or_insert_with(String::new).push_str(text);
        }
    }

    fn into_field(self) -> (String, Value) {
        (self.name, self.text.map_or(Value::Null, Value::String))
    }
}

pub fn decode(bytes: &[u8]) -> ParseResult<Record> {
    let mut reader = Reader::from_reader(bytes);
    let mut record = Record::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut current: Option<OpenChild> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    root_opened(&mut saw_root)?;
                } else if depth == 1 {
                    current = Some(OpenChild::new(tag_name(e.name().as_ref())));
                } else if depth == CHILD_DEPTH {
                    seal(&mut current);
                }
                depth += 1;
            }

            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    root_opened(&mut saw_root)?;
                } else if depth == 1 {
                    record.insert(tag_name(e.name().as_ref()), Value::Null);
                } else if depth == CHILD_DEPTH {
                    seal(&mut current);
                }
            }

            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| error("closing tag without an open element"))?;
                if depth == 1 {
                    if let Some(child) = current.take() {
                        let (name, value) = child.into_field();
                        record.insert(name, value);
                    }
                }
            }

            Ok(Event::Text(e)) => {
                let text = e.unescape().map_err(error)?;
                if depth == CHILD_DEPTH {
                    if let Some(child) = current.as_mut() {
                        child.push(&text);
                    }
                } else if depth == 0 && !text.trim().is_empty() {
                    return Err(error("text outside the root element"));
                }
            }

            Ok(Event::CData(e)) => {
                if depth == CHILD_DEPTH {
                    if let Some(child) = current.as_mut() {
                        child.push(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }

            Ok(Event::Eof) => break,

            // Declarations, comments, processing instructions, doctype
            Ok(_) => {}

            Err(e) => return Err(error(e)),
        }
    }

    if depth != 0 {
        return Err(error("unexpected end of document: unclosed element"));
    }
    if !saw_root {
        return Err(error("missing root element"));
    }

    Ok(record)
}

fn root_opened(saw_root: &mut bool) -> ParseResult<()> {
    if *saw_root {
        return Err(error("more than one root element"));
    }
    *saw_root = true;
    Ok(())
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn seal(current: &mut Option<OpenChild>) {
    if let Some(child) = current.as_mut() {
        child.sealed = true;
    }
}

fn error(message: impl std::fmt::Display) -> ParseError {
    ParseError::decode(Format::Xml, message)
}
