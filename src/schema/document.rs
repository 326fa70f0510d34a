//! The document root: level/version, namespace bookkeeping, the seven
//! top-level containers, and the per-document error log.

use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::collections::SedListOf;
use crate::core::{SedElement, SedTypeCode};
use crate::error::{SedError, SedErrorCode, SedErrorLog, SedIoError, SedOperationError};
use crate::namespaces::{SEDML_DEFAULT_LEVEL, SEDML_DEFAULT_VERSION};
use crate::schema::datadesc::SedDataDescription;
use crate::schema::datagen::SedDataGenerator;
use crate::schema::model::SedModel;
use crate::schema::output::{SedFigure, SedOutput, SedPlot2D, SedPlot3D, SedReport};
use crate::schema::simulation::{
    SedAnalysis, SedOneStep, SedSimulation, SedSteadyState, SedUniformTimeCourse,
};
use crate::schema::style::SedStyle;
use crate::schema::task::{
    SedAbstractTask, SedParameterEstimationTask, SedRepeatedTask, SedTask,
};
use crate::xml::marshal::{self, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// An in-memory SED-ML document.
///
/// Containers appear in the schema's document order; a freshly parsed
/// document additionally carries the parse/validation error log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SedDocument {
    metaid: Option<String>,
    level: Option<u32>,
    version: Option<u32>,
    xmlns: Option<String>,
    declared_namespaces: Vec<(String, String)>,
    data_descriptions: SedListOf<SedDataDescription>,
    models: SedListOf<SedModel>,
    simulations: SedListOf<SedSimulation>,
    tasks: SedListOf<SedAbstractTask>,
    data_generators: SedListOf<SedDataGenerator>,
    outputs: SedListOf<SedOutput>,
    styles: SedListOf<SedStyle>,
    error_log: SedErrorLog,
}

impl SedDocument {
    /// A document at the given level and version.
    pub fn new(level: u32, version: u32) -> Self {
        Self {
            level: Some(level),
            version: Some(version),
            ..Self::default()
        }
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_copy_attr!(level, set_level, is_set_level, unset_level, level, u32);
    sed_copy_attr!(version, set_version, is_set_version, unset_version, version, u32);

    /// The declared level, or the library default when unset.
    pub fn effective_level(&self) -> u32 {
        self.level.unwrap_or(SEDML_DEFAULT_LEVEL)
    }

    /// The declared version, or the library default when unset.
    pub fn effective_version(&self) -> u32 {
        self.version.unwrap_or(SEDML_DEFAULT_VERSION)
    }

    /// The default XML namespace of the root element, if any.
    pub fn xmlns(&self) -> Option<&str> {
        self.xmlns.as_deref()
    }

    pub fn set_xmlns(&mut self, uri: impl Into<String>) {
        self.xmlns = Some(uri.into());
    }

    /// Declares (or redeclares) a prefixed namespace on the root.
    pub fn declare_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        let prefix = prefix.into();
        let uri = uri.into();
        match self.declared_namespaces.iter_mut().find(|(p, _)| *p == prefix) {
            Some(entry) => entry.1 = uri,
            None => self.declared_namespaces.push((prefix, uri)),
        }
    }

    /// The prefixed namespaces declared on the root, in declaration order.
    pub fn declared_namespaces(&self) -> &[(String, String)] {
        &self.declared_namespaces
    }

    // -- containers --------------------------------------------------------

    pub fn data_descriptions(&self) -> &SedListOf<SedDataDescription> {
        &self.data_descriptions
    }

    pub fn data_descriptions_mut(&mut self) -> &mut SedListOf<SedDataDescription> {
        &mut self.data_descriptions
    }

    pub fn models(&self) -> &SedListOf<SedModel> {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut SedListOf<SedModel> {
        &mut self.models
    }

    pub fn simulations(&self) -> &SedListOf<SedSimulation> {
        &self.simulations
    }

    pub fn simulations_mut(&mut self) -> &mut SedListOf<SedSimulation> {
        &mut self.simulations
    }

    pub fn tasks(&self) -> &SedListOf<SedAbstractTask> {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut SedListOf<SedAbstractTask> {
        &mut self.tasks
    }

    pub fn data_generators(&self) -> &SedListOf<SedDataGenerator> {
        &self.data_generators
    }

    pub fn data_generators_mut(&mut self) -> &mut SedListOf<SedDataGenerator> {
        &mut self.data_generators
    }

    pub fn outputs(&self) -> &SedListOf<SedOutput> {
        &self.outputs
    }

    pub fn outputs_mut(&mut self) -> &mut SedListOf<SedOutput> {
        &mut self.outputs
    }

    pub fn styles(&self) -> &SedListOf<SedStyle> {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut SedListOf<SedStyle> {
        &mut self.styles
    }

    // -- validated insertion ----------------------------------------------

    /// Rejects children from a later level/version than the document.
    fn check_level_version(&self, elem: &dyn SedElement) -> Result<(), SedOperationError> {
        let (level, version) = elem.first_introduced();
        let doc = (self.effective_level(), self.effective_version());
        if doc.0 < level {
            Err(SedOperationError::LevelMismatch)
        } else if doc < (level, version) {
            Err(SedOperationError::VersionMismatch)
        } else {
            Ok(())
        }
    }

    pub fn add_data_description(
        &mut self,
        dd: SedDataDescription,
    ) -> Result<(), SedOperationError> {
        self.check_level_version(&dd)?;
        self.data_descriptions.append(dd)
    }

    pub fn add_model(&mut self, model: SedModel) -> Result<(), SedOperationError> {
        self.check_level_version(&model)?;
        self.models.append(model)
    }

    pub fn add_simulation(&mut self, simulation: SedSimulation) -> Result<(), SedOperationError> {
        self.check_level_version(&simulation)?;
        self.simulations.append(simulation)
    }

    pub fn add_task(&mut self, task: SedAbstractTask) -> Result<(), SedOperationError> {
        self.check_level_version(&task)?;
        self.tasks.append(task)
    }

    pub fn add_data_generator(&mut self, dg: SedDataGenerator) -> Result<(), SedOperationError> {
        self.check_level_version(&dg)?;
        self.data_generators.append(dg)
    }

    pub fn add_output(&mut self, output: SedOutput) -> Result<(), SedOperationError> {
        self.check_level_version(&output)?;
        self.outputs.append(output)
    }

    pub fn add_style(&mut self, style: SedStyle) -> Result<(), SedOperationError> {
        self.check_level_version(&style)?;
        self.styles.append(style)
    }

    // -- factories ---------------------------------------------------------

    pub fn create_model(&mut self) -> &mut SedModel {
        self.models.push_unchecked(SedModel::default())
    }

    pub fn create_data_description(&mut self) -> &mut SedDataDescription {
        self.data_descriptions.push_unchecked(SedDataDescription::default())
    }

    pub fn create_data_generator(&mut self) -> &mut SedDataGenerator {
        self.data_generators.push_unchecked(SedDataGenerator::default())
    }

    pub fn create_style(&mut self) -> &mut SedStyle {
        self.styles.push_unchecked(SedStyle::default())
    }

    pub fn create_uniform_time_course(&mut self) -> &mut SedUniformTimeCourse {
        let slot = self
            .simulations
            .push_unchecked(SedSimulation::UniformTimeCourse(Default::default()));
        match slot {
            SedSimulation::UniformTimeCourse(s) => s,
            _ => unreachable!(),
        }
    }

    pub fn create_one_step(&mut self) -> &mut SedOneStep {
        let slot = self
            .simulations
            .push_unchecked(SedSimulation::OneStep(Default::default()));
        match slot {
            SedSimulation::OneStep(s) => s,
            _ => unreachable!(),
        }
    }

    pub fn create_steady_state(&mut self) -> &mut SedSteadyState {
        let slot = self
            .simulations
            .push_unchecked(SedSimulation::SteadyState(Default::default()));
        match slot {
            SedSimulation::SteadyState(s) => s,
            _ => unreachable!(),
        }
    }

    pub fn create_analysis(&mut self) -> &mut SedAnalysis {
        let slot = self
            .simulations
            .push_unchecked(SedSimulation::Analysis(Default::default()));
        match slot {
            SedSimulation::Analysis(s) => s,
            _ => unreachable!(),
        }
    }

    pub fn create_task(&mut self) -> &mut SedTask {
        let slot = self.tasks.push_unchecked(SedAbstractTask::Task(Default::default()));
        match slot {
            SedAbstractTask::Task(t) => t,
            _ => unreachable!(),
        }
    }

    pub fn create_repeated_task(&mut self) -> &mut SedRepeatedTask {
        let slot = self
            .tasks
            .push_unchecked(SedAbstractTask::RepeatedTask(Default::default()));
        match slot {
            SedAbstractTask::RepeatedTask(t) => t,
            _ => unreachable!(),
        }
    }

    pub fn create_parameter_estimation_task(&mut self) -> &mut SedParameterEstimationTask {
        let slot = self
            .tasks
            .push_unchecked(SedAbstractTask::ParameterEstimationTask(Default::default()));
        match slot {
            SedAbstractTask::ParameterEstimationTask(t) => t,
            _ => unreachable!(),
        }
    }

    pub fn create_report(&mut self) -> &mut SedReport {
        let slot = self.outputs.push_unchecked(SedOutput::Report(Default::default()));
        match slot {
            SedOutput::Report(o) => o,
            _ => unreachable!(),
        }
    }

    pub fn create_plot2d(&mut self) -> &mut SedPlot2D {
        let slot = self.outputs.push_unchecked(SedOutput::Plot2D(Default::default()));
        match slot {
            SedOutput::Plot2D(o) => o,
            _ => unreachable!(),
        }
    }

    pub fn create_plot3d(&mut self) -> &mut SedPlot3D {
        let slot = self.outputs.push_unchecked(SedOutput::Plot3D(Default::default()));
        match slot {
            SedOutput::Plot3D(o) => o,
            _ => unreachable!(),
        }
    }

    pub fn create_figure(&mut self) -> &mut SedFigure {
        let slot = self.outputs.push_unchecked(SedOutput::Figure(Default::default()));
        match slot {
            SedOutput::Figure(o) => o,
            _ => unreachable!(),
        }
    }

    // -- lookups -----------------------------------------------------------

    pub fn model(&self, id: &str) -> Option<&SedModel> {
        self.models.get_by_id(id)
    }

    pub fn simulation(&self, id: &str) -> Option<&SedSimulation> {
        self.simulations.get_by_id(id)
    }

    pub fn task(&self, id: &str) -> Option<&SedAbstractTask> {
        self.tasks.get_by_id(id)
    }

    pub fn data_generator(&self, id: &str) -> Option<&SedDataGenerator> {
        self.data_generators.get_by_id(id)
    }

    pub fn output(&self, id: &str) -> Option<&SedOutput> {
        self.outputs.get_by_id(id)
    }

    pub fn style(&self, id: &str) -> Option<&SedStyle> {
        self.styles.get_by_id(id)
    }

    pub fn data_description(&self, id: &str) -> Option<&SedDataDescription> {
        self.data_descriptions.get_by_id(id)
    }

    // -- diagnostics -------------------------------------------------------

    /// The parse/validation log of this document.
    pub fn error_log(&self) -> &SedErrorLog {
        &self.error_log
    }

    pub fn num_errors(&self) -> usize {
        self.error_log.num_errors()
    }

    pub fn error(&self, n: usize) -> Option<&SedError> {
        self.error_log.error(n)
    }

    /// Appends one diagnostic to the document's log.
    pub fn log_error(&mut self, error: SedError) {
        self.error_log.add(error);
    }

    /// Installs the log accumulated during parsing.
    pub(crate) fn take_error_log(&mut self, log: SedErrorLog) {
        self.error_log = log;
    }
}

impl SedElement for SedDocument {
    fn element_name(&self) -> &'static str {
        "sedML"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Document
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::DocumentAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "level", "version"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "level" => {
                self.level =
                    ctx.uint(name, value, SedErrorCode::DocumentLevelMustBeNonNegativeInteger)
            }
            "version" => {
                self.version =
                    ctx.uint(name, value, SedErrorCode::DocumentVersionMustBeNonNegativeInteger)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        if let Some(uri) = &self.xmlns {
            start.push_attribute(("xmlns", uri.as_str()));
        }
        for (prefix, uri) in &self.declared_namespaces {
            start.push_attribute((format!("xmlns:{prefix}").as_str(), uri.as_str()));
        }
        marshal::push_str(start, "metaid", &self.metaid);
        start.push_attribute(("level", self.effective_level().to_string().as_str()));
        start.push_attribute(("version", self.effective_version().to_string().as_str()));
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "listOfDataDescriptions" => Some(&mut self.data_descriptions),
            "listOfModels" => Some(&mut self.models),
            "listOfSimulations" => Some(&mut self.simulations),
            "listOfTasks" => Some(&mut self.tasks),
            "listOfDataGenerators" => Some(&mut self.data_generators),
            "listOfOutputs" => Some(&mut self.outputs),
            "listOfStyles" => Some(&mut self.styles),
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_list(w, &self.data_descriptions)?;
        writer::write_list(w, &self.models)?;
        writer::write_list(w, &self.simulations)?;
        writer::write_list(w, &self.tasks)?;
        writer::write_list(w, &self.data_generators)?;
        writer::write_list(w, &self.outputs)?;
        writer::write_list(w, &self.styles)
    }

    fn has_children(&self) -> bool {
        !self.data_descriptions.is_empty()
            || !self.models.is_empty()
            || !self.simulations.is_empty()
            || !self.tasks.is_empty()
            || !self.data_generators.is_empty()
            || !self.outputs.is_empty()
            || !self.styles.is_empty()
    }

    // Defaults are only substituted on write; a document that never declared
    // its level or version is incomplete.
    fn has_required_attributes(&self) -> bool {
        self.level.is_some() && self.version.is_some()
    }

    fn read_namespace_decl(&mut self, prefix: Option<&str>, uri: &str) {
        match prefix {
            None => self.xmlns = Some(uri.to_owned()),
            Some(p) => self.declare_namespace(p, uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_fill_in_level_and_version() {
        let doc = SedDocument::default();
        assert!(!doc.is_set_level());
        assert_eq!(doc.effective_level(), 1);
        assert_eq!(doc.effective_version(), 4);

        let doc = SedDocument::new(1, 2);
        assert_eq!(doc.effective_version(), 2);
    }

    #[test]
    fn factories_return_the_new_child_in_place() {
        let mut doc = SedDocument::new(1, 4);
        doc.create_model().set_id("m1");
        let sim = doc.create_uniform_time_course();
        sim.set_id("sim1");

        assert_eq!(doc.models().len(), 1);
        assert_eq!(doc.simulations().len(), 1);
        assert!(doc.model("m1").is_some());
    }

    #[test]
    fn add_rejects_children_newer_than_the_document() {
        let mut doc = SedDocument::new(1, 1);

        let mut style = SedStyle::new();
        style.set_id("s1");
        assert_eq!(
            doc.add_style(style.clone()),
            Err(SedOperationError::VersionMismatch)
        );

        let mut doc14 = SedDocument::new(1, 4);
        assert_eq!(doc14.add_style(style), Ok(()));
    }

    #[test]
    fn add_rejects_duplicate_ids_across_one_container() {
        let mut doc = SedDocument::new(1, 4);
        let mut m = SedModel::new();
        m.set_id("m1");
        m.set_source("a.xml");
        doc.add_model(m.clone()).unwrap();

        assert_eq!(
            doc.add_model(m),
            Err(SedOperationError::DuplicateObjectId("m1".into()))
        );
    }

    #[test]
    fn namespace_declarations_replace_by_prefix() {
        let mut doc = SedDocument::default();
        doc.declare_namespace("sbml", "http://www.sbml.org/sbml/level3/version1/core");
        doc.declare_namespace("sbml", "http://www.sbml.org/sbml/level3/version2/core");
        assert_eq!(doc.declared_namespaces().len(), 1);
        assert!(doc.declared_namespaces()[0].1.ends_with("version2/core"));
    }

    #[test]
    fn lookup_resolves_tasks_by_id() {
        let mut doc = SedDocument::new(1, 4);
        doc.create_task().set_id("task1");
        assert!(doc.task("task1").is_some());
        assert!(doc.task("task2").is_none());
    }
}
