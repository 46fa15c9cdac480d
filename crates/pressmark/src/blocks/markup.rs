//! Attribute editing on the root element of a markup fragment.
//!
//! Rendered blocks only ever need their outermost element touched, so
//! [`TagProcessor`] tokenizes up to the first start tag and leaves the rest of
//! the fragment as opaque text. Edits are spliced into the original tag:
//! attributes that were not set keep their exact source bytes.

use std::borrow::Cow;
use std::ops::Range;

use quick_xml::escape::{escape, resolve_html5_entity};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Error tokenizing a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// The fragment could not be tokenized up to its first tag.
    Tokenize { position: usize, message: String },
}

impl std::fmt::Display for MarkupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkupError::Tokenize { position, message } => {
                write!(f, "malformed markup at byte {}: {}", position, message)
            }
        }
    }
}

impl std::error::Error for MarkupError {}

/// One attribute of the root element.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrSlot {
    name: String,
    /// Decoded value.
    value: String,
    /// Source bytes of an existing attribute; `None` for added ones.
    span: Option<Range<usize>>,
    dirty: bool,
}

impl AttrSlot {
    fn render(&self) -> String {
        format!("{}=\"{}\"", self.name, escape(self.value.as_str()))
    }
}

/// The first element of a fragment and where its attributes sit.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RootTag {
    name: String,
    attributes: Vec<AttrSlot>,
    /// Where added attributes are spliced in: after the last existing
    /// attribute, or after the tag name.
    insert_at: usize,
    modified: bool,
}

/// Byte range of one attribute within the raw tag text, searching from
/// `cursor`. `raw_value_len` is the length of the attribute's raw value.
fn attribute_span(raw: &str, cursor: usize, key: &str, raw_value_len: usize) -> Option<Range<usize>> {
    let key_start = cursor + raw.get(cursor..)?.find(key)?;
    let key_end = key_start + key.len();

    let Some(value) = raw[key_end..].trim_start().strip_prefix('=') else {
        return Some(key_start..key_end);
    };
    let value = value.trim_start();
    let value_start = raw.len() - value.len();
    let end = match value.chars().next() {
        Some(quote @ ('"' | '\'')) => match value[1..].find(quote) {
            Some(close) => value_start + close + 2,
            None => raw.len(),
        },
        _ => value_start + raw_value_len,
    };
    Some(key_start..end.min(raw.len()))
}

impl RootTag {
    /// Reads the tag whose `<` sits at `start` in the source.
    fn from_event(e: &BytesStart<'_>, raw: &str, start: usize) -> Result<Self, MarkupError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        let base = start + 1;
        let mut cursor = name.len();
        let mut attributes = Vec::new();

        for attr in e.html_attributes().with_checks(false).flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = match attr.unescape_value_with(resolve_html5_entity) {
                Ok(v) => v.into_owned(),
                Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
            };
            let span = attribute_span(raw, cursor, &key, attr.value.len()).ok_or_else(|| {
                MarkupError::Tokenize {
                    position: base + cursor,
                    message: format!("cannot locate attribute {}", key),
                }
            })?;
            cursor = span.end;
            attributes.push(AttrSlot {
                name: key,
                value,
                span: Some(base + span.start..base + span.end),
                dirty: false,
            });
        }

        Ok(Self {
            name,
            attributes,
            insert_at: base + cursor,
            modified: false,
        })
    }
}

fn reader_offset(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

/// Finds the `<` of a tag event in the source, searching from `from`.
///
/// The event carries the raw text between `<` and `>` (minus the `/` of a
/// self-closing tag), which appears verbatim in the source.
fn locate_tag(html: &str, from: usize, raw: &str) -> Result<usize, MarkupError> {
    let needle = format!("<{}", raw);
    html.get(from..)
        .and_then(|rest| rest.find(&needle))
        .map(|idx| from + idx)
        .ok_or_else(|| MarkupError::Tokenize {
            position: from,
            message: format!("cannot locate tag <{}>", raw),
        })
}

/// Outcome of scanning a fragment from some offset.
enum Scan {
    Root(RootTag),
    /// A `<` not followed by a tag name, at this offset. It is text.
    Stray(usize),
    NoElement,
}

fn scan(html: &str, offset: usize) -> Result<Scan, MarkupError> {
    let mut reader = Reader::from_reader(html[offset..].as_bytes());
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = false;

    loop {
        let from = offset + reader_offset(&reader).saturating_sub(1);
        let e = match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => e,
            Ok(Event::Eof) => return Ok(Scan::NoElement),
            Ok(_) => continue,
            Err(err) => {
                return Err(MarkupError::Tokenize {
                    position: offset
                        + usize::try_from(reader.error_position()).unwrap_or(usize::MAX),
                    message: err.to_string(),
                });
            }
        };

        let raw = std::str::from_utf8(&e).map_err(|err| MarkupError::Tokenize {
            position: from,
            message: err.to_string(),
        })?;
        let start = locate_tag(html, from, raw)?;
        if !e.name().as_ref().first().is_some_and(u8::is_ascii_alphabetic) {
            return Ok(Scan::Stray(start));
        }
        return RootTag::from_event(&e, raw, start).map(Scan::Root);
    }
}

/// Reads and edits the attributes of a fragment's first element.
///
/// # Example
///
/// ```rust
/// use pressmark::blocks::TagProcessor;
///
/// let mut p = TagProcessor::new("<div class=\"wp-block-query\"><p>Hi</p></div>").unwrap();
/// p.set_attribute("data-wp-context", "{}");
/// assert_eq!(
///     p.updated_html(),
///     "<div class=\"wp-block-query\" data-wp-context=\"{}\"><p>Hi</p></div>"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TagProcessor<'a> {
    html: &'a str,
    root: Option<RootTag>,
}

impl<'a> TagProcessor<'a> {
    /// Tokenizes `html` up to its first start or self-closing tag.
    ///
    /// A `<` that does not open a tag name is text, as in HTML.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Tokenize`] if the markup before the first tag,
    /// or the tag itself, cannot be tokenized.
    pub fn new(html: &'a str) -> Result<Self, MarkupError> {
        let mut offset = 0;
        while offset < html.len() {
            match scan(html, offset)? {
                Scan::Root(root) => {
                    return Ok(Self {
                        html,
                        root: Some(root),
                    })
                }
                Scan::Stray(at) => offset = at + 1,
                Scan::NoElement => break,
            }
        }
        Ok(Self { html, root: None })
    }

    /// Returns true if the fragment contains an element.
    pub fn has_tag(&self) -> bool {
        self.root.is_some()
    }

    /// Returns the name of the first element.
    pub fn tag_name(&self) -> Option<&str> {
        self.root.as_ref().map(|r| r.name.as_str())
    }

    /// Returns the decoded value of an attribute on the first element.
    ///
    /// Attribute names match case-insensitively. Valueless attributes read
    /// as the empty string.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.root.as_ref().and_then(|root| {
            root.attributes
                .iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .map(|a| a.value.as_str())
        })
    }

    /// Sets an attribute on the first element.
    ///
    /// An existing attribute keeps its position; a new one is appended.
    /// Returns false if the fragment has no element.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        match root
            .attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(slot) => {
                slot.value = value.to_string();
                slot.dirty = true;
            }
            None => root.attributes.push(AttrSlot {
                name: name.to_string(),
                value: value.to_string(),
                span: None,
                dirty: true,
            }),
        }
        root.modified = true;
        true
    }

    /// Returns the fragment with all edits applied.
    ///
    /// An untouched fragment comes back byte for byte, and so does every
    /// attribute that was not set.
    pub fn updated_html(&self) -> Cow<'a, str> {
        let root = match &self.root {
            Some(root) if root.modified => root,
            _ => return Cow::Borrowed(self.html),
        };

        let mut html = String::with_capacity(self.html.len() + 64);
        let mut cursor = 0;
        for slot in root.attributes.iter().filter(|a| a.dirty) {
            if let Some(span) = &slot.span {
                html.push_str(&self.html[cursor..span.start]);
                html.push_str(&slot.render());
                cursor = span.end;
            }
        }
        html.push_str(&self.html[cursor..root.insert_at]);
        for slot in root.attributes.iter().filter(|a| a.span.is_none()) {
            html.push(' ');
            html.push_str(&slot.render());
        }
        html.push_str(&self.html[root.insert_at..]);
        Cow::Owned(html)
    }
}

/// Sets attributes on the root element of `html`.
///
/// Markup that cannot be tokenized is returned unchanged.
pub fn set_root_attributes(html: &str, attributes: &[(&str, &str)]) -> String {
    match TagProcessor::new(html) {
        Ok(mut p) => {
            for (name, value) in attributes {
                p.set_attribute(name, value);
            }
            p.updated_html().into_owned()
        }
        Err(err) => {
            log::warn!("leaving block markup unchanged: {}", err);
            html.to_string()
        }
    }
}
