//! Recursive-descent XML reader.
//!
//! One driver loop serves every element type: attributes are checked
//! against the element's expected set and handed to its typed reader, and
//! each child start tag is dispatched through [`SedElement::create_child`]
//! (the tag-routing hook), falling back to opaque-subtree capture (math,
//! literal XML) or text children (`<value>`), and finally to a logged skip
//! for anything unrecognized.
//!
//! Nothing recoverable aborts the parse. Every anomaly lands in the error
//! log with a line/column, and the tree comes back fully formed.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::SedElement;
use crate::error::{SedError, SedErrorCode, SedErrorLog, SedIoError, SedSeverity};
use crate::schema::document::SedDocument;
use crate::validation;
use crate::xml::marshal::AttrContext;

/// Parses a document from an XML string.
///
/// Returns `Err` only for tokenizer-level problems (malformed XML, missing
/// root); schema anomalies are logged on the returned document.
pub(crate) fn document_from_str(xml: &str) -> Result<SedDocument, SedIoError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = SedDocument::default();
    let mut log = SedErrorLog::default();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                read_root(&mut reader, xml, &mut doc, &e, &mut log, false)?;
                break;
            }
            Event::Empty(e) => {
                read_root(&mut reader, xml, &mut doc, &e, &mut log, true)?;
                break;
            }
            Event::Eof => return Err(SedIoError::MissingRoot),
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }

    doc.take_error_log(log);
    check_root_namespace(&mut doc);
    validation::validate_document(&mut doc);
    Ok(doc)
}

fn read_root(
    reader: &mut Reader<&[u8]>,
    src: &str,
    doc: &mut SedDocument,
    start: &BytesStart<'_>,
    log: &mut SedErrorLog,
    empty: bool,
) -> Result<(), SedIoError> {
    let tag = local_name(start);
    if tag == "sedML" {
        read_element(reader, src, doc, start, log, empty)
    } else {
        let (line, column) = line_col(src, reader.buffer_position() as usize);
        log.add(SedError::new(
            SedErrorCode::UnrecognizedElement,
            SedSeverity::Fatal,
            format!("The root element is <{tag}>, expected <sedML>."),
            Some(line),
            Some(column),
        ));
        if !empty {
            reader.read_to_end(start.name())?;
        }
        Ok(())
    }
}

/// Flags a missing or foreign namespace on the parsed root.
fn check_root_namespace(doc: &mut SedDocument) {
    let xmlns = doc.xmlns().map(str::to_owned);
    match xmlns.as_deref() {
        None => doc.log_error(SedError::new(
            SedErrorCode::NsUndeclared,
            SedSeverity::Error,
            "The <sedML> element does not declare the SED-ML namespace.".to_owned(),
            None,
            None,
        )),
        Some(uri) if !crate::namespaces::is_sedml_namespace(uri) => {
            let message =
                format!("The <sedML> element is in the namespace '{uri}', which is not a SED-ML namespace.");
            doc.log_error(SedError::new(
                SedErrorCode::ElementNotInNs,
                SedSeverity::Error,
                message,
                None,
                None,
            ));
        }
        Some(_) => {}
    }
}

/// Reads one element: attributes first, then the child loop until the
/// matching end tag. `empty` marks an empty-element tag (no child loop).
pub(crate) fn read_element(
    reader: &mut Reader<&[u8]>,
    src: &str,
    elem: &mut dyn SedElement,
    start: &BytesStart<'_>,
    log: &mut SedErrorLog,
    empty: bool,
) -> Result<(), SedIoError> {
    let (line, column) = line_col(src, reader.buffer_position() as usize);
    read_attributes(elem, start, log, line, column)?;

    if empty {
        return Ok(());
    }

    loop {
        match reader.read_event()? {
            Event::Start(e) => read_child(reader, src, elem, &e, log, false)?,
            Event::Empty(e) => read_child(reader, src, elem, &e, log, true)?,
            Event::End(_) => break,
            Event::Eof => {
                return Err(SedIoError::UnexpectedEof(elem.element_name().to_owned()))
            }
            // Whitespace, comments, CDATA at element level.
            _ => {}
        }
    }
    Ok(())
}

fn read_attributes(
    elem: &mut dyn SedElement,
    start: &BytesStart<'_>,
    log: &mut SedErrorLog,
    line: u64,
    column: u64,
) -> Result<(), SedIoError> {
    let expected = elem.expected_attributes();
    let element_name = elem.element_name();

    for attr in start.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        let key = attr.key;

        // Namespace declarations are routed separately; the document root
        // stores them, everything else ignores them.
        if key.as_ref() == b"xmlns" {
            elem.read_namespace_decl(None, &value);
            continue;
        }
        if let Some(prefix) = key.prefix() {
            if prefix.as_ref() == b"xmlns" {
                let local = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
                elem.read_namespace_decl(Some(&local), &value);
                continue;
            }
            if prefix.as_ref() == b"xml" {
                continue;
            }
        }

        let name = String::from_utf8_lossy(key.as_ref()).into_owned();
        let mut ctx = AttrContext::new(log, element_name, line, column);
        if expected.contains(&name.as_str()) {
            elem.read_attribute(&name, &value, &mut ctx);
        } else {
            ctx.log_unknown_attribute(elem.allowed_attributes_code(), &name);
        }
    }
    Ok(())
}

fn read_child(
    reader: &mut Reader<&[u8]>,
    src: &str,
    parent: &mut dyn SedElement,
    start: &BytesStart<'_>,
    log: &mut SedErrorLog,
    empty: bool,
) -> Result<(), SedIoError> {
    let tag = local_name(start);
    let parent_name = parent.element_name();

    if parent.wants_raw_child(&tag) {
        let raw = if empty {
            String::new()
        } else {
            let span = reader.read_to_end(start.name())?;
            src[span.start as usize..span.end as usize].trim().to_owned()
        };
        parent.store_raw_child(&tag, &raw);
        return Ok(());
    }

    if parent.wants_text_child(&tag) {
        let text = if empty {
            Cow::Borrowed("")
        } else {
            reader.read_text(start.name())?
        };
        let (line, column) = line_col(src, reader.buffer_position() as usize);
        let mut ctx = AttrContext::new(log, parent_name, line, column);
        parent.read_text_child(&tag, text.trim(), &mut ctx);
        return Ok(());
    }

    match parent.create_child(&tag) {
        Some(child) => {
            log::debug!("reading <{tag}> inside <{parent_name}>");
            read_element(reader, src, child, start, log, empty)
        }
        None => {
            let (line, column) = line_col(src, reader.buffer_position() as usize);
            log.add(SedError::new(
                SedErrorCode::UnrecognizedElement,
                SedSeverity::Warning,
                format!("Skipping unrecognized element <{tag}> inside <{parent_name}>."),
                Some(line),
                Some(column),
            ));
            if !empty {
                reader.read_to_end(start.name())?;
            }
            Ok(())
        }
    }
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Translates a byte offset into a 1-based line/column pair.
fn line_col(src: &str, pos: usize) -> (u64, u64) {
    let pos = pos.min(src.len());
    let consumed = &src.as_bytes()[..pos];
    let line = consumed.iter().filter(|b| **b == b'\n').count() as u64 + 1;
    let column = consumed
        .iter()
        .rev()
        .position(|b| *b == b'\n')
        .unwrap_or(pos) as u64
        + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_is_one_based() {
        let src = "abc\ndef\ng";
        assert_eq!(line_col(src, 0), (1, 1));
        assert_eq!(line_col(src, 2), (1, 3));
        assert_eq!(line_col(src, 4), (2, 1));
        assert_eq!(line_col(src, 8), (3, 1));
    }
}
