//! Cross-reference target checks.
//!
//! Reference attributes are stored verbatim at parse time; this pass checks
//! that each one names an element of the right kind, logging the targeted
//! "must be" diagnostic when it does not. References are resolved against
//! the whole document, except range references, which resolve inside their
//! own repeated task.

use std::collections::HashSet;

use crate::core::SedElement;
use crate::error::{SedError, SedErrorCode, SedErrorLog, SedSeverity};
use crate::schema::document::SedDocument;
use crate::schema::output::{SedAbstractCurve, SedAxis, SedOutput};
use crate::schema::task::{SedAbstractTask, SedRange, SedRepeatedTask, SedSetValue};

pub(crate) fn check_references(doc: &SedDocument, log: &mut SedErrorLog) {
    let models: HashSet<&str> = doc.models().iter().filter_map(|m| m.id()).collect();
    let simulations: HashSet<&str> =
        doc.simulations().iter().filter_map(|s| s.id()).collect();
    let tasks: HashSet<&str> = doc.tasks().iter().filter_map(|t| t.id()).collect();
    let generators: HashSet<&str> =
        doc.data_generators().iter().filter_map(|g| g.id()).collect();
    let styles: HashSet<&str> = doc.styles().iter().filter_map(|s| s.id()).collect();
    let plots: HashSet<&str> = doc
        .outputs()
        .iter()
        .filter(|o| matches!(o, SedOutput::Plot2D(_) | SedOutput::Plot3D(_)))
        .filter_map(|o| o.id())
        .collect();
    let data_sources: HashSet<&str> = doc
        .data_descriptions()
        .iter()
        .flat_map(|dd| dd.data_sources().iter())
        .filter_map(|s| s.id())
        .collect();

    for task in doc.tasks() {
        match task {
            SedAbstractTask::Task(t) => {
                ensure(log, &models, t.model_reference(),
                    SedErrorCode::TaskModelReferenceMustBeModel, "task", "modelReference");
                ensure(log, &simulations, t.simulation_reference(),
                    SedErrorCode::TaskSimulationReferenceMustBeSimulation, "task",
                    "simulationReference");
            }
            SedAbstractTask::RepeatedTask(rt) => {
                check_repeated_task(rt, &models, &tasks, &data_sources, log);
            }
            SedAbstractTask::ParameterEstimationTask(pe) => {
                let experiments: HashSet<&str> =
                    pe.fit_experiments().iter().filter_map(|e| e.id()).collect();
                for p in pe.adjustable_parameters() {
                    ensure(log, &models, p.model_reference(),
                        SedErrorCode::AdjustableParameterModelReferenceMustBeModel,
                        "adjustableParameter", "modelReference");
                    for r in p.experiment_references() {
                        ensure(log, &experiments, r.experiment_id(),
                            SedErrorCode::ExperimentReferenceMustBeFitExperiment,
                            "experimentReference", "experimentId");
                    }
                }
                for fe in pe.fit_experiments() {
                    for m in fe.fit_mappings() {
                        ensure(log, &data_sources, m.data_source(),
                            SedErrorCode::FitMappingDataSourceMustBeDataSource,
                            "fitMapping", "dataSource");
                        ensure(log, &generators, m.target(),
                            SedErrorCode::FitMappingTargetMustBeDataGenerator,
                            "fitMapping", "target");
                        ensure(log, &data_sources, m.point_weight(),
                            SedErrorCode::FitMappingPointWeightMustBeDataSource,
                            "fitMapping", "pointWeight");
                    }
                }
            }
        }
    }

    for dg in doc.data_generators() {
        for v in dg.variables() {
            ensure(log, &tasks, v.task_reference(),
                SedErrorCode::VariableTaskReferenceMustBeAbstractTask, "variable",
                "taskReference");
            ensure(log, &models, v.model_reference(),
                SedErrorCode::VariableModelReferenceMustBeModel, "variable",
                "modelReference");
        }
    }

    for output in doc.outputs() {
        match output {
            SedOutput::Report(r) => {
                for ds in r.data_sets() {
                    ensure(log, &generators, ds.data_reference(),
                        SedErrorCode::DataSetDataReferenceMustBeDataGenerator, "dataSet",
                        "dataReference");
                }
            }
            SedOutput::Plot2D(p) => {
                for axis in [p.x_axis(), p.y_axis(), p.right_y_axis()] {
                    check_axis(axis, &styles, log);
                }
                for curve in p.curves() {
                    check_curve(curve, &generators, &styles, log);
                }
            }
            SedOutput::Plot3D(p) => {
                for axis in [p.x_axis(), p.y_axis(), p.z_axis()] {
                    check_axis(axis, &styles, log);
                }
                for s in p.surfaces() {
                    ensure(log, &generators, s.x_data_reference(),
                        SedErrorCode::SurfaceXDataReferenceMustBeDataGenerator, "surface",
                        "xDataReference");
                    ensure(log, &generators, s.y_data_reference(),
                        SedErrorCode::SurfaceYDataReferenceMustBeDataGenerator, "surface",
                        "yDataReference");
                    ensure(log, &generators, s.z_data_reference(),
                        SedErrorCode::SurfaceZDataReferenceMustBeDataGenerator, "surface",
                        "zDataReference");
                    ensure(log, &styles, s.style(),
                        SedErrorCode::SurfaceStyleMustBeStyle, "surface", "style");
                }
            }
            SedOutput::Figure(f) => {
                for sp in f.sub_plots() {
                    ensure(log, &plots, sp.plot(),
                        SedErrorCode::SubPlotPlotMustBePlot, "subPlot", "plot");
                }
            }
        }
    }

    for style in doc.styles() {
        ensure(log, &styles, style.base_style(),
            SedErrorCode::StyleBaseStyleMustBeStyle, "style", "baseStyle");
    }
}

fn check_repeated_task(
    rt: &SedRepeatedTask,
    models: &HashSet<&str>,
    tasks: &HashSet<&str>,
    data_sources: &HashSet<&str>,
    log: &mut SedErrorLog,
) {
    let ranges: HashSet<&str> = rt.ranges().iter().filter_map(|r| r.id()).collect();

    ensure(log, &ranges, rt.range(),
        SedErrorCode::RepeatedTaskRangeMustBeRange, "repeatedTask", "range");

    for range in rt.ranges() {
        match range {
            SedRange::FunctionalRange(fr) => {
                ensure(log, &ranges, fr.range(),
                    SedErrorCode::FunctionalRangeRangeMustBeRange, "functionalRange",
                    "range");
            }
            SedRange::DataRange(dr) => {
                ensure(log, data_sources, dr.source_reference(),
                    SedErrorCode::DataRangeSourceReferenceMustBeSId, "dataRange",
                    "sourceReference");
            }
            _ => {}
        }
    }

    for sv in rt.changes() {
        check_set_value(sv, models, &ranges, log);
    }
    for st in rt.sub_tasks() {
        ensure(log, tasks, st.task(),
            SedErrorCode::SubTaskTaskMustBeAbstractTask, "subTask", "task");
        for sv in st.changes() {
            check_set_value(sv, models, &ranges, log);
        }
    }
}

fn check_set_value(
    sv: &SedSetValue,
    models: &HashSet<&str>,
    ranges: &HashSet<&str>,
    log: &mut SedErrorLog,
) {
    ensure(log, models, sv.model_reference(),
        SedErrorCode::SetValueModelReferenceMustBeModel, "setValue", "modelReference");
    ensure(log, ranges, sv.range(),
        SedErrorCode::SetValueRangeMustBeRange, "setValue", "range");
}

fn check_curve(
    curve: &SedAbstractCurve,
    generators: &HashSet<&str>,
    styles: &HashSet<&str>,
    log: &mut SedErrorLog,
) {
    match curve {
        SedAbstractCurve::Curve(c) => {
            ensure(log, generators, c.x_data_reference(),
                SedErrorCode::AbstractCurveXDataReferenceMustBeDataGenerator, "curve",
                "xDataReference");
            ensure(log, generators, c.y_data_reference(),
                SedErrorCode::CurveYDataReferenceMustBeDataGenerator, "curve",
                "yDataReference");
            ensure(log, styles, c.style(),
                SedErrorCode::AbstractCurveStyleMustBeStyle, "curve", "style");
        }
        SedAbstractCurve::ShadedArea(a) => {
            ensure(log, generators, a.x_data_reference(),
                SedErrorCode::AbstractCurveXDataReferenceMustBeDataGenerator, "shadedArea",
                "xDataReference");
            ensure(log, generators, a.y_data_reference_from(),
                SedErrorCode::ShadedAreaYDataReferenceFromMustBeDataGenerator, "shadedArea",
                "yDataReferenceFrom");
            ensure(log, generators, a.y_data_reference_to(),
                SedErrorCode::ShadedAreaYDataReferenceToMustBeDataGenerator, "shadedArea",
                "yDataReferenceTo");
            ensure(log, styles, a.style(),
                SedErrorCode::AbstractCurveStyleMustBeStyle, "shadedArea", "style");
        }
    }
}

fn check_axis(axis: Option<&SedAxis>, styles: &HashSet<&str>, log: &mut SedErrorLog) {
    if let Some(axis) = axis {
        ensure(log, styles, axis.style(),
            SedErrorCode::AxisStyleMustBeStyle, axis.element_name(), "style");
    }
}

/// Logs `code` when a set reference does not name a known target. Unset
/// references are fine here; required-ness is the attribute pass's job.
fn ensure(
    log: &mut SedErrorLog,
    targets: &HashSet<&str>,
    reference: Option<&str>,
    code: SedErrorCode,
    element: &str,
    attribute: &str,
) {
    if let Some(r) = reference {
        if !targets.contains(r) {
            log.add(SedError::new(
                code,
                SedSeverity::Error,
                format!(
                    "The {attribute} attribute on <{element}> refers to '{r}', which does \
                     not exist or is not of the required kind."
                ),
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
    fn dangling_task_references_are_flagged() {
        let mut doc = SedDocument::new(1, 4);
        let t = doc.create_task();
        t.set_id("t1");
        t.set_model_reference("no_such_model");

        let mut log = SedErrorLog::default();
        check_references(&doc, &mut log);
        assert!(log.contains(SedErrorCode::TaskModelReferenceMustBeModel));
    }

    #[test]
    fn resolved_references_stay_quiet() {
        let mut doc = SedDocument::new(1, 4);
        let m = doc.create_model();
        m.set_id("m1");
        m.set_source("model.xml");
        let s = doc.create_uniform_time_course();
        s.set_id("sim1");
        let t = doc.create_task();
        t.set_id("t1");
        t.set_model_reference("m1");
        t.set_simulation_reference("sim1");

        let mut log = SedErrorLog::default();
        check_references(&doc, &mut log);
        assert_eq!(log.num_errors(), 0);
    }

    #[test]
    fn range_references_resolve_inside_their_repeated_task() {
        let mut doc = SedDocument::new(1, 4);
        doc.create_task().set_id("inner");
        let rt = doc.create_repeated_task();
        rt.set_id("rt1");
        rt.set_range("r_outside");
        rt.set_reset_model(true);

        let mut log = SedErrorLog::default();
        check_references(&doc, &mut log);
        assert!(log.contains(SedErrorCode::RepeatedTaskRangeMustBeRange));
    }

    #[test]
    fn axis_style_references_are_checked() {
        let mut doc = SedDocument::new(1, 4);
        let p = doc.create_plot2d();
        p.set_id("p1");
        let mut axis = crate::schema::output::SedAxis::for_slot("xAxis");
        axis.set_style("missing_style");
        p.set_x_axis(axis);
        assert_eq!(p.x_axis().map(|a| a.element_name()), Some("xAxis"));

        let mut log = SedErrorLog::default();
        check_references(&doc, &mut log);
        assert!(log.contains(SedErrorCode::AxisStyleMustBeStyle));
    }
}
