//! Document-level consistency checks.

use std::collections::HashSet;

use crate::core::SedElement;
use crate::error::{SedError, SedErrorCode, SedErrorLog, SedSeverity};
use crate::schema::document::SedDocument;

use super::{attributes, references};

/// Runs the post-parse consistency checks and appends their diagnostics to
/// the document's error log. Also invoked on freshly built documents before
/// serialization by callers that want the same reporting.
pub fn validate_document(doc: &mut SedDocument) {
    let mut log = SedErrorLog::default();

    check_duplicate_ids(doc, &mut log);
    attributes::check_required(doc, &mut log);
    references::check_references(doc, &mut log);

    for error in log.errors() {
        doc.log_error(error.clone());
    }
}

/// Every id lives in a single document-wide SId namespace.
fn check_duplicate_ids(doc: &SedDocument, log: &mut SedErrorLog) {
    let mut seen: HashSet<&str> = HashSet::new();

    for dd in doc.data_descriptions() {
        note(&mut seen, dd.id(), log);
        for source in dd.data_sources() {
            note(&mut seen, source.id(), log);
        }
    }
    for model in doc.models() {
        note(&mut seen, model.id(), log);
    }
    for sim in doc.simulations() {
        note(&mut seen, sim.id(), log);
    }
    for task in doc.tasks() {
        note(&mut seen, task.id(), log);
    }
    for dg in doc.data_generators() {
        note(&mut seen, dg.id(), log);
        for v in dg.variables() {
            note(&mut seen, v.id(), log);
        }
        for p in dg.parameters() {
            note(&mut seen, p.id(), log);
        }
    }
    for output in doc.outputs() {
        note(&mut seen, output.id(), log);
    }
    for style in doc.styles() {
        note(&mut seen, style.id(), log);
    }
}

fn note<'a>(seen: &mut HashSet<&'a str>, id: Option<&'a str>, log: &mut SedErrorLog) {
    if let Some(id) = id {
        if !seen.insert(id) {
            log.add(SedError::new(
                SedErrorCode::DuplicateComponentId,
                SedSeverity::Error,
                format!("The id '{id}' is used by more than one element."),
                None,
                None,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_across_containers_are_reported() {
        let mut doc = SedDocument::new(1, 4);
        let m = doc.create_model();
        m.set_id("shared");
        m.set_source("model.xml");
        let t = doc.create_task();
        t.set_id("shared");

        validate_document(&mut doc);
        assert!(doc.error_log().contains(SedErrorCode::DuplicateComponentId));
    }

    #[test]
    fn well_formed_document_validates_cleanly() {
        let mut doc = SedDocument::new(1, 4);
        let m = doc.create_model();
        m.set_id("m1");
        m.set_source("model.xml");

        validate_document(&mut doc);
        assert_eq!(doc.num_errors(), 0);
    }
}
