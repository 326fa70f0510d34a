use std::path::PathBuf;

use crate::error::SedIoError;
use crate::schema::document::SedDocument;
use crate::xml;

/// Parses a SED-ML document from a string.
///
/// Parsing is best-effort: recoverable problems (unknown attributes,
/// malformed values, unrecognized elements) are recorded in the returned
/// document's error log rather than aborting the parse. Only structural
/// failures, such as malformed XML or a missing `<sedML>` root, surface as
/// an `Err`.
pub fn read_sedml_string(xml: &str) -> Result<SedDocument, SedIoError> {
    let doc = xml::reader::document_from_str(xml)?;
    log::debug!(
        "parsed SED-ML L{}V{} document ({} issue(s) logged)",
        doc.effective_level(),
        doc.effective_version(),
        doc.num_errors()
    );
    Ok(doc)
}

/// Reads and parses a SED-ML document from a file.
///
/// See [`read_sedml_string`] for the error-handling contract.
pub fn read_sedml_file(path: impl Into<PathBuf>) -> Result<SedDocument, SedIoError> {
    let path = path.into();
    log::debug!("reading SED-ML document from {}", path.display());
    let xml = std::fs::read_to_string(path)?;
    read_sedml_string(&xml)
}

/// Serializes a document to a SED-ML string, including the XML declaration.
///
/// Namespace declarations that would collide with the SED-ML default
/// namespace are reassigned a prefix before writing, so the output is
/// always well-formed.
pub fn write_sedml_string(doc: &SedDocument) -> Result<String, SedIoError> {
    xml::writer::document_to_string(doc)
}

/// Serializes a document and writes it to a file.
pub fn write_sedml_file(path: impl Into<PathBuf>, doc: &SedDocument) -> Result<(), SedIoError> {
    let path = path.into();
    log::debug!("writing SED-ML document to {}", path.display());
    let xml = write_sedml_string(doc)?;
    std::fs::write(path, xml)?;
    Ok(())
}

/// Serializes the element tree to pretty-printed JSON.
///
/// This is an inspection and interchange convenience; the XML form is the
/// normative SED-ML encoding. Opaque MathML and literal-XML children are
/// emitted as strings.
pub fn write_json_string(doc: &SedDocument) -> Result<String, SedIoError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiment.sedml");

        let mut doc = SedDocument::new(1, 4);
        let model = doc.create_model();
        model.set_id("m1");
        model.set_source("model.xml");

        write_sedml_file(&path, &doc).unwrap();
        let reread = read_sedml_file(&path).unwrap();
        assert_eq!(reread.models().len(), 1);
        assert_eq!(reread.model("m1").and_then(|m| m.source()), Some("model.xml"));
    }

    #[test]
    fn json_export_carries_the_tree() {
        let mut doc = SedDocument::new(1, 4);
        doc.create_model().set_id("m1");

        let json = write_json_string(&doc).unwrap();
        assert!(json.contains("\"m1\""));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_sedml_file("/no/such/file.sedml").unwrap_err();
        assert!(matches!(err, SedIoError::Io(_)));
    }
}
