//! Required-attribute and required-child checks.
//!
//! Walks the whole tree and logs one diagnostic per element whose schema-
//! required attributes or children are missing. The codes come from each
//! element's own allowed-attributes diagnostic.

use crate::collections::SedListOf;
use crate::core::SedElement;
use crate::error::{SedError, SedErrorCode, SedErrorLog, SedSeverity};
use crate::schema::datagen::{SedParameter, SedVariable};
use crate::schema::document::SedDocument;
use crate::schema::output::{SedOutput, SedPlot2D, SedPlot3D};
use crate::schema::simulation::{SedAlgorithm, SedAlgorithmParameter};
use crate::schema::task::{SedAbstractTask, SedRange, SedRepeatedTask, SedSetValue};

pub(crate) fn check_required(doc: &SedDocument, log: &mut SedErrorLog) {
    check(doc, log);

    for model in doc.models() {
        check(model, log);
        for change in model.changes() {
            check(change, log);
            if let crate::schema::model::SedChange::ComputeChange(cc) = change {
                check_variables(cc.variables(), log);
                check_parameters(cc.parameters(), log);
            }
        }
    }

    for sim in doc.simulations() {
        check(sim, log);
        use crate::schema::simulation::SedSimulation as S;
        let algorithm = match sim {
            S::UniformTimeCourse(s) => s.algorithm(),
            S::OneStep(s) => s.algorithm(),
            S::SteadyState(s) => s.algorithm(),
            S::Analysis(s) => s.algorithm(),
        };
        if let Some(a) = algorithm {
            check_algorithm(a, log);
        }
    }

    for task in doc.tasks() {
        check(task, log);
        match task {
            SedAbstractTask::Task(_) => {}
            SedAbstractTask::RepeatedTask(rt) => check_repeated_task(rt, log),
            SedAbstractTask::ParameterEstimationTask(pe) => {
                if let Some(a) = pe.algorithm() {
                    check_algorithm(a, log);
                }
                for p in pe.adjustable_parameters() {
                    check(p, log);
                    if let Some(b) = p.bounds() {
                        check(b, log);
                    }
                    for r in p.experiment_references() {
                        check(r, log);
                    }
                }
                for fe in pe.fit_experiments() {
                    check(fe, log);
                    if let Some(a) = fe.algorithm() {
                        check_algorithm(a, log);
                    }
                    for m in fe.fit_mappings() {
                        check(m, log);
                    }
                }
            }
        }
    }

    for dg in doc.data_generators() {
        check(dg, log);
        check_variables(dg.variables(), log);
        check_parameters(dg.parameters(), log);
    }

    for output in doc.outputs() {
        check(output, log);
        match output {
            SedOutput::Report(r) => {
                for ds in r.data_sets() {
                    check(ds, log);
                }
            }
            SedOutput::Plot2D(p) => check_plot2d(p, log),
            SedOutput::Plot3D(p) => check_plot3d(p, log),
            SedOutput::Figure(f) => {
                for sp in f.sub_plots() {
                    check(sp, log);
                }
            }
        }
    }

    for style in doc.styles() {
        check(style, log);
        if let Some(f) = style.fill() {
            check(f, log);
        }
    }

    for dd in doc.data_descriptions() {
        check(dd, log);
        for source in dd.data_sources() {
            check(source, log);
            for slice in source.slices() {
                check(slice, log);
            }
        }
    }
}

fn check_repeated_task(rt: &SedRepeatedTask, log: &mut SedErrorLog) {
    for range in rt.ranges() {
        check(range, log);
        if let SedRange::FunctionalRange(fr) = range {
            check_variables(fr.variables(), log);
            check_parameters(fr.parameters(), log);
        }
    }
    for sv in rt.changes() {
        check_set_value(sv, log);
    }
    for st in rt.sub_tasks() {
        check(st, log);
        for sv in st.changes() {
            check_set_value(sv, log);
        }
    }
}

fn check_set_value(sv: &SedSetValue, log: &mut SedErrorLog) {
    check(sv, log);
    check_variables(sv.variables(), log);
    check_parameters(sv.parameters(), log);
}

fn check_plot2d(p: &SedPlot2D, log: &mut SedErrorLog) {
    for axis in [p.x_axis(), p.y_axis(), p.right_y_axis()].into_iter().flatten() {
        check(axis, log);
    }
    for curve in p.curves() {
        check(curve, log);
    }
}

fn check_plot3d(p: &SedPlot3D, log: &mut SedErrorLog) {
    for axis in [p.x_axis(), p.y_axis(), p.z_axis()].into_iter().flatten() {
        check(axis, log);
    }
    for surface in p.surfaces() {
        check(surface, log);
    }
}

fn check_algorithm(a: &SedAlgorithm, log: &mut SedErrorLog) {
    check(a, log);
    for p in a.parameters() {
        check_algorithm_parameter(p, log);
    }
}

fn check_algorithm_parameter(p: &SedAlgorithmParameter, log: &mut SedErrorLog) {
    check(p, log);
    for nested in p.parameters() {
        check_algorithm_parameter(nested, log);
    }
}

fn check_variables(vars: &SedListOf<SedVariable>, log: &mut SedErrorLog) {
    for v in vars {
        check(v, log);
        for d in v.applied_dimensions() {
            check(d, log);
        }
    }
}

fn check_parameters(params: &SedListOf<SedParameter>, log: &mut SedErrorLog) {
    for p in params {
        check(p, log);
    }
}

fn check(elem: &dyn SedElement, log: &mut SedErrorLog) {
    if !elem.has_required_attributes() {
        log.add(SedError::new(
            elem.allowed_attributes_code(),
            SedSeverity::Error,
            format!(
                "The <{}> element is missing one or more required attributes.",
                elem.element_name()
            ),
            None,
            None,
        ));
    }
    if !elem.has_required_elements() {
        log.add(SedError::new(
            SedErrorCode::NotSchemaConformant,
            SedSeverity::Error,
            format!(
                "The <{}> element is missing one or more required child elements.",
                elem.element_name()
            ),
            None,
            None,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_attributes_are_logged_per_element() {
        let mut doc = SedDocument::new(1, 4);
        // No source: incomplete.
        doc.create_model().set_id("m1");
        // Complete.
        let t = doc.create_task();
        t.set_id("t1");

        let mut log = SedErrorLog::default();
        check_required(&doc, &mut log);

        assert_eq!(log.num_errors(), 1);
        assert!(log.contains(SedErrorCode::ModelAllowedAttributes));
    }

    #[test]
    fn document_without_level_and_version_is_incomplete() {
        let doc = SedDocument::default();
        assert!(!doc.has_required_attributes());

        let mut log = SedErrorLog::default();
        check_required(&doc, &mut log);
        assert!(log.contains(SedErrorCode::DocumentAllowedAttributes));
    }

    #[test]
    fn nested_elements_are_walked() {
        let mut doc = SedDocument::new(1, 4);
        let dg = doc.create_data_generator();
        dg.set_id("dg1");
        dg.set_math(crate::core::MathML::new("<ci> v </ci>"));
        // Variable without an id.
        dg.variables_mut().push_unchecked(SedVariable::default());

        let mut log = SedErrorLog::default();
        check_required(&doc, &mut log);
        assert!(log.contains(SedErrorCode::VariableAllowedAttributes));
    }
}
