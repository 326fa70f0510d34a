//! Tasks: the binding of simulations to models, including nested repeats
//! over ranges and parameter-estimation experiments.

use derive_builder::Builder;
use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::collections::SedListOf;
use crate::core::{MathML, SedElement, SedTypeCode};
use crate::error::{SedErrorCode, SedIoError, SedSeverity};
use crate::schema::datagen::{SedParameter, SedVariable};
use crate::schema::fit::{SedAdjustableParameter, SedFitExperiment, SedObjective};
use crate::schema::simulation::SedAlgorithm;
use crate::xml::marshal::{self, parse_double, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// Runs one simulation against one model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedTask {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    model_reference: Option<String>,
    simulation_reference: Option<String>,
}

impl SedTask {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(
        model_reference,
        set_model_reference,
        is_set_model_reference,
        unset_model_reference,
        model_reference
    );
    sed_string_attr!(
        simulation_reference,
        set_simulation_reference,
        is_set_simulation_reference,
        unset_simulation_reference,
        simulation_reference
    );
}

impl SedElement for SedTask {
    fn element_name(&self) -> &'static str {
        "task"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Task
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::TaskAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "modelReference", "simulationReference"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "modelReference" => {
                self.model_reference =
                    ctx.sid_ref(name, value, SedErrorCode::TaskModelReferenceMustBeModel)
            }
            "simulationReference" => {
                self.simulation_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::TaskSimulationReferenceMustBeSimulation,
                )
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "modelReference", &self.model_reference);
        marshal::push_str(start, "simulationReference", &self.simulation_reference);
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// One member run of a repeated task, ordered by `order`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedSubTask {
    metaid: Option<String>,
    order: Option<i32>,
    task: Option<String>,
    changes: SedListOf<SedSetValue>,
}

impl SedSubTask {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_copy_attr!(order, set_order, is_set_order, unset_order, order, i32);
    sed_string_attr!(
        /// The id of the task this sub-task executes.
        task,
        set_task,
        is_set_task,
        unset_task,
        task
    );

    pub fn changes(&self) -> &SedListOf<SedSetValue> {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut SedListOf<SedSetValue> {
        &mut self.changes
    }
}

impl SedElement for SedSubTask {
    fn element_name(&self) -> &'static str {
        "subTask"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::SubTask
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::SubTaskAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "order", "task"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "order" => {
                self.order = ctx.int(name, value, SedErrorCode::SubTaskOrderMustBeInteger)
            }
            "task" => {
                self.task = ctx.sid_ref(name, value, SedErrorCode::SubTaskTaskMustBeAbstractTask)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_int(start, "order", &self.order);
        marshal::push_str(start, "task", &self.task);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        (tag == "listOfChanges").then_some(&mut self.changes as &mut dyn SedElement)
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_list(w, &self.changes)
    }

    fn has_children(&self) -> bool {
        !self.changes.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.order.is_some() && self.task.is_some()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 2)
    }
}

sed_list_item!(SedSubTask, "subTask", "listOfSubTasks");

/// Assigns a range-driven value into the model before each repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedSetValue {
    metaid: Option<String>,
    target: Option<String>,
    symbol: Option<String>,
    model_reference: Option<String>,
    range: Option<String>,
    math: Option<MathML>,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
}

impl SedSetValue {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);
    sed_string_attr!(symbol, set_symbol, is_set_symbol, unset_symbol, symbol);
    sed_string_attr!(
        model_reference,
        set_model_reference,
        is_set_model_reference,
        unset_model_reference,
        model_reference
    );
    sed_string_attr!(range, set_range, is_set_range, unset_range, range);

    pub fn math(&self) -> Option<&MathML> {
        self.math.as_ref()
    }

    pub fn set_math(&mut self, math: MathML) {
        self.math = Some(math);
    }

    pub fn is_set_math(&self) -> bool {
        self.math.is_some()
    }

    pub fn variables(&self) -> &SedListOf<SedVariable> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut SedListOf<SedVariable> {
        &mut self.variables
    }

    pub fn parameters(&self) -> &SedListOf<SedParameter> {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut SedListOf<SedParameter> {
        &mut self.parameters
    }
}

impl SedElement for SedSetValue {
    fn element_name(&self) -> &'static str {
        "setValue"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::SetValue
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::SetValueAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "target", "symbol", "modelReference", "range"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "target" => self.target = ctx.string(name, value),
            "symbol" => self.symbol = ctx.string(name, value),
            "modelReference" => {
                self.model_reference =
                    ctx.sid_ref(name, value, SedErrorCode::SetValueModelReferenceMustBeModel)
            }
            "range" => {
                self.range = ctx.sid_ref(name, value, SedErrorCode::SetValueRangeMustBeRange)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "target", &self.target);
        marshal::push_str(start, "symbol", &self.symbol);
        marshal::push_str(start, "modelReference", &self.model_reference);
        marshal::push_str(start, "range", &self.range);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "listOfVariables" => Some(&mut self.variables),
            "listOfParameters" => Some(&mut self.parameters),
            _ => None,
        }
    }

    fn wants_raw_child(&self, tag: &str) -> bool {
        tag == "math"
    }

    fn store_raw_child(&mut self, _tag: &str, raw: &str) {
        self.math = Some(MathML::new(raw));
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_math(w, &self.math)?;
        writer::write_list(w, &self.variables)?;
        writer::write_list(w, &self.parameters)
    }

    fn has_children(&self) -> bool {
        self.math.is_some() || !self.variables.is_empty() || !self.parameters.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.model_reference.is_some()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 2)
    }
}

sed_list_item!(SedSetValue, "setValue", "listOfChanges");

/// Uniformly spaced range, linear or logarithmic per `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedUniformRange {
    metaid: Option<String>,
    id: Option<String>,
    start: Option<f64>,
    end: Option<f64>,
    number_of_steps: Option<i32>,
    range_type: Option<String>,
}

impl SedUniformRange {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_copy_attr!(start, set_start, is_set_start, unset_start, start, f64);
    sed_copy_attr!(end, set_end, is_set_end, unset_end, end, f64);
    sed_copy_attr!(
        number_of_steps,
        set_number_of_steps,
        is_set_number_of_steps,
        unset_number_of_steps,
        number_of_steps,
        i32
    );
    sed_string_attr!(
        /// `"linear"` or `"log"`.
        range_type,
        set_range_type,
        is_set_range_type,
        unset_range_type,
        range_type
    );
}

impl SedElement for SedUniformRange {
    fn element_name(&self) -> &'static str {
        "uniformRange"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::UniformRange
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::UniformRangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &[
            "metaid",
            "id",
            "start",
            "end",
            "numberOfSteps",
            "numberOfPoints",
            "type",
        ]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "start" => {
                self.start = ctx.double(name, value, SedErrorCode::UniformRangeStartMustBeDouble)
            }
            "end" => self.end = ctx.double(name, value, SedErrorCode::UniformRangeEndMustBeDouble),
            "numberOfSteps" | "numberOfPoints" => {
                self.number_of_steps =
                    ctx.int(name, value, SedErrorCode::UniformRangeNumberOfStepsMustBeInteger)
            }
            "type" => self.range_type = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_double(start, "start", &self.start);
        marshal::push_double(start, "end", &self.end);
        marshal::push_int(start, "numberOfSteps", &self.number_of_steps);
        marshal::push_str(start, "type", &self.range_type);
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
            && self.start.is_some()
            && self.end.is_some()
            && self.number_of_steps.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 2)
    }
}

/// An explicit list of values, carried as `<value>` text children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedVectorRange {
    metaid: Option<String>,
    id: Option<String>,
    values: Vec<f64>,
}

impl SedVectorRange {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn set_values(&mut self, values: Vec<f64>) {
        self.values = values;
    }

    pub fn add_value(&mut self, value: f64) {
        self.values.push(value);
    }
}

impl SedElement for SedVectorRange {
    fn element_name(&self) -> &'static str {
        "vectorRange"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::VectorRange
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::VectorRangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
    }

    fn wants_text_child(&self, tag: &str) -> bool {
        tag == "value"
    }

    fn read_text_child(&mut self, _tag: &str, text: &str, ctx: &mut AttrContext<'_>) {
        match parse_double(text) {
            Some(v) => self.values.push(v),
            None => ctx.log(
                SedErrorCode::VectorRangeValueMustBeDoubleList,
                SedSeverity::Error,
                format!("The <value> '{text}' in <vectorRange> is not a double."),
            ),
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_value_elements(w, &self.values)
    }

    fn has_children(&self) -> bool {
        !self.values.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 2)
    }
}

/// Derives each value by evaluating math over another range's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedFunctionalRange {
    metaid: Option<String>,
    id: Option<String>,
    range: Option<String>,
    math: Option<MathML>,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
}

impl SedFunctionalRange {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(range, set_range, is_set_range, unset_range, range);

    pub fn math(&self) -> Option<&MathML> {
        self.math.as_ref()
    }

    pub fn set_math(&mut self, math: MathML) {
        self.math = Some(math);
    }

    pub fn is_set_math(&self) -> bool {
        self.math.is_some()
    }

    pub fn variables(&self) -> &SedListOf<SedVariable> {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut SedListOf<SedVariable> {
        &mut self.variables
    }

    pub fn parameters(&self) -> &SedListOf<SedParameter> {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut SedListOf<SedParameter> {
        &mut self.parameters
    }
}

impl SedElement for SedFunctionalRange {
    fn element_name(&self) -> &'static str {
        "functionalRange"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::FunctionalRange
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::FunctionalRangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "range"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "range" => {
                self.range = ctx.sid_ref(name, value, SedErrorCode::FunctionalRangeRangeMustBeRange)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "range", &self.range);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "listOfVariables" => Some(&mut self.variables),
            "listOfParameters" => Some(&mut self.parameters),
            _ => None,
        }
    }

    fn wants_raw_child(&self, tag: &str) -> bool {
        tag == "math"
    }

    fn store_raw_child(&mut self, _tag: &str, raw: &str) {
        self.math = Some(MathML::new(raw));
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_math(w, &self.math)?;
        writer::write_list(w, &self.variables)?;
        writer::write_list(w, &self.parameters)
    }

    fn has_children(&self) -> bool {
        self.math.is_some() || !self.variables.is_empty() || !self.parameters.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn has_required_elements(&self) -> bool {
        self.math.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 2)
    }
}

/// Draws values from a data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedDataRange {
    metaid: Option<String>,
    id: Option<String>,
    source_reference: Option<String>,
}

impl SedDataRange {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(
        source_reference,
        set_source_reference,
        is_set_source_reference,
        unset_source_reference,
        source_reference
    );
}

impl SedElement for SedDataRange {
    fn element_name(&self) -> &'static str {
        "dataRange"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::DataRange
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::DataRangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "sourceReference"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "sourceReference" => {
                self.source_reference =
                    ctx.sid_ref(name, value, SedErrorCode::DataRangeSourceReferenceMustBeSId)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "sourceReference", &self.source_reference);
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some() && self.source_reference.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_element_group! {
    /// Any of the range kinds a `listOfRanges` may hold.
    SedRange, "listOfRanges" {
        UniformRange(SedUniformRange) => "uniformRange",
        VectorRange(SedVectorRange) => "vectorRange",
        FunctionalRange(SedFunctionalRange) => "functionalRange",
        DataRange(SedDataRange) => "dataRange",
    }
}

/// Repeats its sub-tasks once per value of the selected range, applying the
/// set-value changes before each repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedRepeatedTask {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    range: Option<String>,
    reset_model: Option<bool>,
    concatenate: Option<bool>,
    ranges: SedListOf<SedRange>,
    changes: SedListOf<SedSetValue>,
    sub_tasks: SedListOf<SedSubTask>,
}

impl SedRepeatedTask {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(
        /// The id of the master range.
        range,
        set_range,
        is_set_range,
        unset_range,
        range
    );
    sed_copy_attr!(
        reset_model,
        set_reset_model,
        is_set_reset_model,
        unset_reset_model,
        reset_model,
        bool
    );
    sed_copy_attr!(
        concatenate,
        set_concatenate,
        is_set_concatenate,
        unset_concatenate,
        concatenate,
        bool
    );

    pub fn ranges(&self) -> &SedListOf<SedRange> {
        &self.ranges
    }

    pub fn ranges_mut(&mut self) -> &mut SedListOf<SedRange> {
        &mut self.ranges
    }

    pub fn changes(&self) -> &SedListOf<SedSetValue> {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut SedListOf<SedSetValue> {
        &mut self.changes
    }

    pub fn sub_tasks(&self) -> &SedListOf<SedSubTask> {
        &self.sub_tasks
    }

    pub fn sub_tasks_mut(&mut self) -> &mut SedListOf<SedSubTask> {
        &mut self.sub_tasks
    }
}

impl SedElement for SedRepeatedTask {
    fn element_name(&self) -> &'static str {
        "repeatedTask"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::RepeatedTask
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::RepeatedTaskAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "range", "resetModel", "concatenate"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "range" => {
                self.range = ctx.sid_ref(name, value, SedErrorCode::RepeatedTaskRangeMustBeRange)
            }
            "resetModel" => {
                self.reset_model =
                    ctx.boolean(name, value, SedErrorCode::RepeatedTaskResetModelMustBeBoolean)
            }
            "concatenate" => {
                self.concatenate =
                    ctx.boolean(name, value, SedErrorCode::RepeatedTaskConcatenateMustBeBoolean)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "range", &self.range);
        marshal::push_bool(start, "resetModel", &self.reset_model);
        marshal::push_bool(start, "concatenate", &self.concatenate);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "listOfRanges" => Some(&mut self.ranges),
            "listOfChanges" => Some(&mut self.changes),
            "listOfSubTasks" => Some(&mut self.sub_tasks),
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_list(w, &self.ranges)?;
        writer::write_list(w, &self.changes)?;
        writer::write_list(w, &self.sub_tasks)
    }

    fn has_children(&self) -> bool {
        !self.ranges.is_empty() || !self.changes.is_empty() || !self.sub_tasks.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some() && self.range.is_some() && self.reset_model.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 2)
    }
}

/// Fits adjustable parameters against experimental data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedParameterEstimationTask {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    algorithm: Option<SedAlgorithm>,
    objective: Option<SedObjective>,
    adjustable_parameters: SedListOf<SedAdjustableParameter>,
    fit_experiments: SedListOf<SedFitExperiment>,
}

impl SedParameterEstimationTask {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);

    pub fn algorithm(&self) -> Option<&SedAlgorithm> {
        self.algorithm.as_ref()
    }

    pub fn set_algorithm(&mut self, algorithm: SedAlgorithm) {
        self.algorithm = Some(algorithm);
    }

    pub fn objective(&self) -> Option<&SedObjective> {
        self.objective.as_ref()
    }

    pub fn set_objective(&mut self, objective: SedObjective) {
        self.objective = Some(objective);
    }

    pub fn adjustable_parameters(&self) -> &SedListOf<SedAdjustableParameter> {
        &self.adjustable_parameters
    }

    pub fn adjustable_parameters_mut(&mut self) -> &mut SedListOf<SedAdjustableParameter> {
        &mut self.adjustable_parameters
    }

    pub fn fit_experiments(&self) -> &SedListOf<SedFitExperiment> {
        &self.fit_experiments
    }

    pub fn fit_experiments_mut(&mut self) -> &mut SedListOf<SedFitExperiment> {
        &mut self.fit_experiments
    }
}

impl SedElement for SedParameterEstimationTask {
    fn element_name(&self) -> &'static str {
        "parameterEstimationTask"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::ParameterEstimationTask
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::AbstractTaskAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "algorithm" => {
                Some(self.algorithm.insert(SedAlgorithm::default()) as &mut dyn SedElement)
            }
            "leastSquareObjectiveFunction" => {
                Some(self.objective.insert(SedObjective::default()) as &mut dyn SedElement)
            }
            "listOfAdjustableParameters" => Some(&mut self.adjustable_parameters),
            "listOfFitExperiments" => Some(&mut self.fit_experiments),
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_child(w, &self.algorithm)?;
        writer::write_child(w, &self.objective)?;
        writer::write_list(w, &self.adjustable_parameters)?;
        writer::write_list(w, &self.fit_experiments)
    }

    fn has_children(&self) -> bool {
        self.algorithm.is_some()
            || self.objective.is_some()
            || !self.adjustable_parameters.is_empty()
            || !self.fit_experiments.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn has_required_elements(&self) -> bool {
        self.algorithm.is_some() && self.objective.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_element_group! {
    /// Any of the task kinds a `listOfTasks` may hold.
    SedAbstractTask, "listOfTasks" {
        Task(SedTask) => "task",
        RepeatedTask(SedRepeatedTask) => "repeatedTask",
        ParameterEstimationTask(SedParameterEstimationTask) => "parameterEstimationTask",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::SedListItem;
    use crate::error::SedErrorLog;

    #[test]
    fn repeated_task_requires_range_and_reset_flag() {
        let mut t = SedRepeatedTask::new();
        t.set_id("rt");
        t.set_range("r1");
        assert!(!t.has_required_attributes());
        t.set_reset_model(true);
        assert!(t.has_required_attributes());
    }

    #[test]
    fn vector_range_collects_value_children() {
        let mut r = SedVectorRange::new();
        r.set_id("vr");
        assert!(r.wants_text_child("value"));
        assert!(!r.wants_text_child("values"));

        let mut log = SedErrorLog::default();
        let mut ctx = AttrContext::new(&mut log, "vectorRange", 1, 1);
        r.read_text_child("value", "1", &mut ctx);
        r.read_text_child("value", "4", &mut ctx);
        r.read_text_child("value", "ten", &mut ctx);

        assert_eq!(r.values(), &[1.0, 4.0]);
        assert!(log.contains(SedErrorCode::VectorRangeValueMustBeDoubleList));
    }

    #[test]
    fn range_group_dispatches_all_kinds() {
        for tag in ["uniformRange", "vectorRange", "functionalRange", "dataRange"] {
            assert!(SedRange::accepts_tag(tag), "{tag}");
        }
        assert!(SedRange::from_tag("range").is_none());
    }

    #[test]
    fn estimation_task_requires_algorithm_and_objective() {
        let mut t = SedParameterEstimationTask::new();
        t.set_id("pe1");
        assert!(!t.has_required_elements());

        t.create_child("algorithm").expect("algorithm slot");
        t.create_child("leastSquareObjectiveFunction").expect("objective slot");
        assert!(t.has_required_elements());
        assert_eq!(t.first_introduced(), (1, 4));
    }
}
