//! Recursive XML writer.
//!
//! Serialization walks the element tree through the same `SedElement`
//! surface the reader uses: each element emits its set attributes, then its
//! children in document order. Childless elements are written in
//! empty-element form, and `listOf…` wrappers are only emitted when the
//! container is non-empty (callers check [`SedElement::has_children`]).
//!
//! The document entry point also performs namespace reconciliation: the
//! canonical SED-ML namespace for the document's level/version is installed
//! on the root, and a conflicting pre-existing default binding is moved to
//! the synthetic `addedPrefix` prefix rather than silently overwritten.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::core::{MathML, SedElement, XmlFragment};
use crate::error::SedIoError;
use crate::namespaces::{sedml_namespace_uri, MATHML_XMLNS};
use crate::schema::document::SedDocument;
use crate::xml::marshal::format_double;

/// The concrete sink every `write_children` implementation targets.
pub type XmlWriter = Writer<Vec<u8>>;

/// Serializes a document to an indented XML string, with declaration.
pub(crate) fn document_to_string(doc: &SedDocument) -> Result<String, SedIoError> {
    let mut doc = doc.clone();
    reconcile_namespaces(&mut doc);

    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut w, &doc)?;

    let mut out = String::from_utf8(w.into_inner())?;
    out.push('\n');
    Ok(out)
}

/// Ensures the root carries the canonical SED-ML namespace for the
/// document's level/version.
fn reconcile_namespaces(doc: &mut SedDocument) {
    let canonical = sedml_namespace_uri(doc.effective_level(), doc.effective_version());
    let current = doc.xmlns().map(str::to_owned);
    match current {
        Some(uri) if uri == canonical => {}
        Some(other) => {
            log::warn!(
                "default namespace '{other}' conflicts with the SED-ML namespace; \
                 rebinding it as 'addedPrefix'"
            );
            doc.declare_namespace("addedPrefix", other);
            doc.set_xmlns(canonical);
        }
        None => doc.set_xmlns(canonical),
    }
}

/// Writes one element and its subtree.
pub(crate) fn write_element(w: &mut XmlWriter, elem: &dyn SedElement) -> Result<(), SedIoError> {
    let name = elem.element_name();
    let mut start = BytesStart::new(name);
    elem.write_attributes(&mut start);

    if elem.has_children() {
        w.write_event(Event::Start(start))?;
        elem.write_children(w)?;
        w.write_event(Event::End(BytesEnd::new(name)))?;
    } else {
        w.write_event(Event::Empty(start))?;
    }
    Ok(())
}

/// Writes a `listOf…` container only when it has content.
pub(crate) fn write_list(w: &mut XmlWriter, list: &dyn SedElement) -> Result<(), SedIoError> {
    if list.has_children() {
        write_element(w, list)?;
    }
    Ok(())
}

/// Writes an optional scalar child element.
pub(crate) fn write_child(
    w: &mut XmlWriter,
    child: &Option<impl SedElement>,
) -> Result<(), SedIoError> {
    if let Some(c) = child {
        write_element(w, c)?;
    }
    Ok(())
}

/// Writes an optional `<math>` child, raw content under the canonical
/// MathML namespace.
pub(crate) fn write_math(w: &mut XmlWriter, math: &Option<MathML>) -> Result<(), SedIoError> {
    if let Some(m) = math {
        let mut start = BytesStart::new("math");
        start.push_attribute(("xmlns", MATHML_XMLNS));
        w.write_event(Event::Start(start))?;
        w.write_event(Event::Text(BytesText::from_escaped(m.content())))?;
        w.write_event(Event::End(BytesEnd::new("math")))?;
    }
    Ok(())
}

/// Writes an optional opaque-XML child (`newXML`, `dimensionDescription`).
pub(crate) fn write_fragment(
    w: &mut XmlWriter,
    tag: &'static str,
    fragment: &Option<XmlFragment>,
) -> Result<(), SedIoError> {
    if let Some(frag) = fragment {
        w.write_event(Event::Start(BytesStart::new(tag)))?;
        w.write_event(Event::Text(BytesText::from_escaped(frag.content())))?;
        w.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}

/// Writes a run of `<value>…</value>` text children (vector ranges).
pub(crate) fn write_value_elements(w: &mut XmlWriter, values: &[f64]) -> Result<(), SedIoError> {
    for v in values {
        w.write_event(Event::Start(BytesStart::new("value")))?;
        w.write_event(Event::Text(BytesText::new(&format_double(*v))))?;
        w.write_event(Event::End(BytesEnd::new("value")))?;
    }
    Ok(())
}
