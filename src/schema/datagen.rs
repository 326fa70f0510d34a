//! Data generators and the variable/parameter vocabulary they share with
//! compute changes, functional ranges, and set-value changes.
//!
//! A `dataGenerator` post-processes raw simulation results: its math
//! expression combines variables (observables pulled from a task's model)
//! and constant parameters into one output column.

use derive_builder::Builder;
use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::collections::SedListOf;
use crate::core::{MathML, SedElement, SedTypeCode};
use crate::error::{SedErrorCode, SedIoError};
use crate::xml::marshal::{self, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// A model observable: addressed by XPath `target` or reserved `symbol`
/// (e.g. `urn:sedml:symbol:time`), resolved against a task's model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedVariable {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    symbol: Option<String>,
    target: Option<String>,
    task_reference: Option<String>,
    model_reference: Option<String>,
    term: Option<String>,
    dimension_term: Option<String>,
    applied_dimensions: SedListOf<SedAppliedDimension>,
}

impl SedVariable {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(symbol, set_symbol, is_set_symbol, unset_symbol, symbol);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);
    sed_string_attr!(
        task_reference,
        set_task_reference,
        is_set_task_reference,
        unset_task_reference,
        task_reference
    );
    sed_string_attr!(
        model_reference,
        set_model_reference,
        is_set_model_reference,
        unset_model_reference,
        model_reference
    );
    sed_string_attr!(term, set_term, is_set_term, unset_term, term);
    sed_string_attr!(
        dimension_term,
        set_dimension_term,
        is_set_dimension_term,
        unset_dimension_term,
        dimension_term
    );

    pub fn applied_dimensions(&self) -> &SedListOf<SedAppliedDimension> {
        &self.applied_dimensions
    }

    pub fn applied_dimensions_mut(&mut self) -> &mut SedListOf<SedAppliedDimension> {
        &mut self.applied_dimensions
    }
}

impl SedElement for SedVariable {
    fn element_name(&self) -> &'static str {
        "variable"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Variable
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::VariableAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &[
            "metaid",
            "id",
            "name",
            "symbol",
            "target",
            "taskReference",
            "modelReference",
            "term",
            "dimensionTerm",
        ]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "symbol" => self.symbol = ctx.string(name, value),
            "target" => self.target = ctx.string(name, value),
            "taskReference" => {
                self.task_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::VariableTaskReferenceMustBeAbstractTask,
                )
            }
            "modelReference" => {
                self.model_reference =
                    ctx.sid_ref(name, value, SedErrorCode::VariableModelReferenceMustBeModel)
            }
            "term" => self.term = ctx.string(name, value),
            "dimensionTerm" => self.dimension_term = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "symbol", &self.symbol);
        marshal::push_str(start, "target", &self.target);
        marshal::push_str(start, "taskReference", &self.task_reference);
        marshal::push_str(start, "modelReference", &self.model_reference);
        marshal::push_str(start, "term", &self.term);
        marshal::push_str(start, "dimensionTerm", &self.dimension_term);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        (tag == "listOfAppliedDimensions")
            .then_some(&mut self.applied_dimensions as &mut dyn SedElement)
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_list(w, &self.applied_dimensions)
    }

    fn has_children(&self) -> bool {
        !self.applied_dimensions.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

sed_list_item!(SedVariable, "variable", "listOfVariables");

/// Selects which dimension of a multi-dimensional result a variable
/// collapses over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedAppliedDimension {
    metaid: Option<String>,
    target: Option<String>,
    dimension_target: Option<String>,
}

impl SedAppliedDimension {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);
    sed_string_attr!(
        dimension_target,
        set_dimension_target,
        is_set_dimension_target,
        unset_dimension_target,
        dimension_target
    );
}

impl SedElement for SedAppliedDimension {
    fn element_name(&self) -> &'static str {
        "appliedDimension"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::AppliedDimension
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::AppliedDimensionAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "target", "dimensionTarget"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "target" => self.target = ctx.string(name, value),
            "dimensionTarget" => self.dimension_target = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "target", &self.target);
        marshal::push_str(start, "dimensionTarget", &self.dimension_target);
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_list_item!(
    SedAppliedDimension,
    "appliedDimension",
    "listOfAppliedDimensions"
);

/// A named constant usable in the surrounding math expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedParameter {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    value: Option<f64>,
}

impl SedParameter {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_copy_attr!(value, set_value, is_set_value, unset_value, value, f64);
}

impl SedElement for SedParameter {
    fn element_name(&self) -> &'static str {
        "parameter"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Parameter
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ParameterAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "value"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "value" => {
                self.value = ctx.double(name, value, SedErrorCode::ParameterValueMustBeDouble)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_double(start, "value", &self.value);
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some() && self.value.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

sed_list_item!(SedParameter, "parameter", "listOfParameters");

/// One output column: a math expression over variables and parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedDataGenerator {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    math: Option<MathML>,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
}

impl SedDataGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);

    pub fn math(&self) -> Option<&MathML> {
        self.math.as_ref()
    }

    pub fn set_math(&mut self, math: MathML) {
        self.math = Some(math);
    }

    pub fn is_set_math(&self) -> bool {
        self.math.is_some()
    }

    pub fn unset_math(&mut self) {
        self.math = None;
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

impl SedElement for SedDataGenerator {
    fn element_name(&self) -> &'static str {
        "dataGenerator"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::DataGenerator
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::DataGeneratorAllowedAttributes
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
}

sed_list_item!(SedDataGenerator, "dataGenerator", "listOfDataGenerators");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_generator_requires_math() {
        let mut dg = SedDataGenerator::new();
        dg.set_id("dg1");
        assert!(dg.has_required_attributes());
        assert!(!dg.has_required_elements());

        dg.store_raw_child("math", "<ci> time </ci>");
        assert!(dg.has_required_elements());
        assert_eq!(dg.math().map(MathML::content), Some("<ci> time </ci>"));
    }

    #[test]
    fn variable_accepts_the_full_level1_attribute_set() {
        let v = SedVariable::new();
        for attr in ["symbol", "target", "taskReference", "term", "dimensionTerm"] {
            assert!(v.expected_attributes().contains(&attr), "{attr}");
        }
    }

    #[test]
    fn parameter_requires_id_and_value() {
        let mut p = SedParameter::new();
        p.set_id("k1");
        assert!(!p.has_required_attributes());
        p.set_value(0.5);
        assert!(p.has_required_attributes());
    }
}
