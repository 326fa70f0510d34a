//! The parameter-estimation vocabulary: fit experiments, mappings between
//! data sources and observables, adjustable parameters with bounds, and the
//! least-squares objective. All of it entered the schema in Level 1
//! Version 4.

use derive_builder::Builder;
use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::collections::SedListOf;
use crate::core::{SedElement, SedTypeCode};
use crate::error::{SedErrorCode, SedIoError};
use crate::schema::simulation::SedAlgorithm;
use crate::schema::types::{ExperimentType, MappingType, ScaleType};
use crate::xml::marshal::{self, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// The least-squares objective of a parameter-estimation task. The element
/// is a marker; the schema defines no attributes for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedObjective {
    metaid: Option<String>,
}

impl SedObjective {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
}

impl SedElement for SedObjective {
    fn element_name(&self) -> &'static str {
        "leastSquareObjectiveFunction"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::LeastSquareObjectiveFunction
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        if name == "metaid" {
            self.metaid = ctx.metaid(value);
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

/// Lower and upper bounds of an adjustable parameter, on a given scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedBounds {
    metaid: Option<String>,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    scale: Option<ScaleType>,
}

impl SedBounds {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_copy_attr!(
        lower_bound,
        set_lower_bound,
        is_set_lower_bound,
        unset_lower_bound,
        lower_bound,
        f64
    );
    sed_copy_attr!(
        upper_bound,
        set_upper_bound,
        is_set_upper_bound,
        unset_upper_bound,
        upper_bound,
        f64
    );
    sed_enum_attr!(scale, set_scale, is_set_scale, unset_scale, scale, ScaleType);
}

impl SedElement for SedBounds {
    fn element_name(&self) -> &'static str {
        "bounds"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Bounds
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::BoundsAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "lowerBound", "upperBound", "scale"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "lowerBound" => {
                self.lower_bound =
                    ctx.double(name, value, SedErrorCode::BoundsLowerBoundMustBeDouble)
            }
            "upperBound" => {
                self.upper_bound =
                    ctx.double(name, value, SedErrorCode::BoundsUpperBoundMustBeDouble)
            }
            "scale" => {
                self.scale = ctx.enumeration(name, value, SedErrorCode::BoundsScaleMustBeScaleTypeEnum)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_double(start, "lowerBound", &self.lower_bound);
        marshal::push_double(start, "upperBound", &self.upper_bound);
        marshal::push_enum(start, "scale", &self.scale);
    }

    fn has_required_attributes(&self) -> bool {
        self.lower_bound.is_some() && self.upper_bound.is_some()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

/// Points an adjustable parameter at one of the task's fit experiments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedExperimentReference {
    metaid: Option<String>,
    experiment_id: Option<String>,
}

impl SedExperimentReference {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(
        experiment_id,
        set_experiment_id,
        is_set_experiment_id,
        unset_experiment_id,
        experiment_id
    );
}

impl SedElement for SedExperimentReference {
    fn element_name(&self) -> &'static str {
        "experimentReference"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::ExperimentReference
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ExperimentReferenceAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "experimentId"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "experimentId" => {
                self.experiment_id =
                    ctx.sid_ref(name, value, SedErrorCode::ExperimentReferenceMustBeFitExperiment)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "experimentId", &self.experiment_id);
    }

    fn has_required_attributes(&self) -> bool {
        self.experiment_id.is_some()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_list_item!(
    SedExperimentReference,
    "experimentReference",
    "listOfExperimentReferences"
);

/// A model quantity the estimation is allowed to vary, within bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedAdjustableParameter {
    metaid: Option<String>,
    id: Option<String>,
    initial_value: Option<f64>,
    model_reference: Option<String>,
    target: Option<String>,
    bounds: Option<SedBounds>,
    experiment_references: SedListOf<SedExperimentReference>,
}

impl SedAdjustableParameter {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_copy_attr!(
        initial_value,
        set_initial_value,
        is_set_initial_value,
        unset_initial_value,
        initial_value,
        f64
    );
    sed_string_attr!(
        model_reference,
        set_model_reference,
        is_set_model_reference,
        unset_model_reference,
        model_reference
    );
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);

    pub fn bounds(&self) -> Option<&SedBounds> {
        self.bounds.as_ref()
    }

    pub fn set_bounds(&mut self, bounds: SedBounds) {
        self.bounds = Some(bounds);
    }

    pub fn is_set_bounds(&self) -> bool {
        self.bounds.is_some()
    }

    pub fn experiment_references(&self) -> &SedListOf<SedExperimentReference> {
        &self.experiment_references
    }

    pub fn experiment_references_mut(&mut self) -> &mut SedListOf<SedExperimentReference> {
        &mut self.experiment_references
    }
}

impl SedElement for SedAdjustableParameter {
    fn element_name(&self) -> &'static str {
        "adjustableParameter"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::AdjustableParameter
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::AdjustableParameterAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "initialValue", "modelReference", "target"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "initialValue" => {
                self.initial_value = ctx.double(
                    name,
                    value,
                    SedErrorCode::AdjustableParameterInitialValueMustBeDouble,
                )
            }
            "modelReference" => {
                self.model_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::AdjustableParameterModelReferenceMustBeModel,
                )
            }
            "target" => self.target = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_double(start, "initialValue", &self.initial_value);
        marshal::push_str(start, "modelReference", &self.model_reference);
        marshal::push_str(start, "target", &self.target);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "bounds" => Some(self.bounds.insert(SedBounds::default()) as &mut dyn SedElement),
            "listOfExperimentReferences" => Some(&mut self.experiment_references),
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_child(w, &self.bounds)?;
        writer::write_list(w, &self.experiment_references)
    }

    fn has_children(&self) -> bool {
        self.bounds.is_some() || !self.experiment_references.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.target.is_some()
    }

    fn has_required_elements(&self) -> bool {
        self.bounds.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_list_item!(
    SedAdjustableParameter,
    "adjustableParameter",
    "listOfAdjustableParameters"
);

/// Binds one experimental data source to the observable (or condition) it
/// constrains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedFitMapping {
    metaid: Option<String>,
    data_source: Option<String>,
    target: Option<String>,
    mapping_type: Option<MappingType>,
    weight: Option<f64>,
    point_weight: Option<String>,
}

impl SedFitMapping {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(
        data_source,
        set_data_source,
        is_set_data_source,
        unset_data_source,
        data_source
    );
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);
    sed_enum_attr!(
        mapping_type,
        set_mapping_type,
        is_set_mapping_type,
        unset_mapping_type,
        mapping_type,
        MappingType
    );
    sed_copy_attr!(weight, set_weight, is_set_weight, unset_weight, weight, f64);
    sed_string_attr!(
        point_weight,
        set_point_weight,
        is_set_point_weight,
        unset_point_weight,
        point_weight
    );
}

impl SedElement for SedFitMapping {
    fn element_name(&self) -> &'static str {
        "fitMapping"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::FitMapping
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::FitMappingAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "dataSource", "target", "type", "weight", "pointWeight"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "dataSource" => {
                self.data_source =
                    ctx.sid_ref(name, value, SedErrorCode::FitMappingDataSourceMustBeDataSource)
            }
            "target" => {
                self.target =
                    ctx.sid_ref(name, value, SedErrorCode::FitMappingTargetMustBeDataGenerator)
            }
            "type" => {
                self.mapping_type =
                    ctx.enumeration(name, value, SedErrorCode::FitMappingTypeMustBeMappingTypeEnum)
            }
            "weight" => {
                self.weight = ctx.double(name, value, SedErrorCode::FitMappingWeightMustBeDouble)
            }
            "pointWeight" => {
                self.point_weight =
                    ctx.sid_ref(name, value, SedErrorCode::FitMappingPointWeightMustBeDataSource)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "dataSource", &self.data_source);
        marshal::push_str(start, "target", &self.target);
        marshal::push_enum(start, "type", &self.mapping_type);
        marshal::push_double(start, "weight", &self.weight);
        marshal::push_str(start, "pointWeight", &self.point_weight);
    }

    fn has_required_attributes(&self) -> bool {
        self.data_source.is_some()
            && self.target.is_some()
            && matches!(self.mapping_type, Some(t) if t.is_known())
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_list_item!(SedFitMapping, "fitMapping", "listOfFitMappings");

/// One experiment the fit is scored against: its kind, algorithm, and the
/// mappings from experimental data to model observables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedFitExperiment {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    experiment_type: Option<ExperimentType>,
    algorithm: Option<SedAlgorithm>,
    fit_mappings: SedListOf<SedFitMapping>,
}

impl SedFitExperiment {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_enum_attr!(
        experiment_type,
        set_experiment_type,
        is_set_experiment_type,
        unset_experiment_type,
        experiment_type,
        ExperimentType
    );

    pub fn algorithm(&self) -> Option<&SedAlgorithm> {
        self.algorithm.as_ref()
    }

    pub fn set_algorithm(&mut self, algorithm: SedAlgorithm) {
        self.algorithm = Some(algorithm);
    }

    pub fn fit_mappings(&self) -> &SedListOf<SedFitMapping> {
        &self.fit_mappings
    }

    pub fn fit_mappings_mut(&mut self) -> &mut SedListOf<SedFitMapping> {
        &mut self.fit_mappings
    }
}

impl SedElement for SedFitExperiment {
    fn element_name(&self) -> &'static str {
        "fitExperiment"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::FitExperiment
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::FitExperimentAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "type"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "type" => {
                self.experiment_type = ctx.enumeration(
                    name,
                    value,
                    SedErrorCode::FitExperimentTypeMustBeExperimentTypeEnum,
                )
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_enum(start, "type", &self.experiment_type);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "algorithm" => {
                Some(self.algorithm.insert(SedAlgorithm::default()) as &mut dyn SedElement)
            }
            "listOfFitMappings" => Some(&mut self.fit_mappings),
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_child(w, &self.algorithm)?;
        writer::write_list(w, &self.fit_mappings)
    }

    fn has_children(&self) -> bool {
        self.algorithm.is_some() || !self.fit_mappings.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_list_item!(SedFitExperiment, "fitExperiment", "listOfFitExperiments");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_mapping_requires_a_known_type() {
        let mut m = SedFitMapping::new();
        m.set_data_source("ds_time");
        m.set_target("dg_obs");
        assert!(!m.has_required_attributes());
        m.set_mapping_type(MappingType::Observable);
        assert!(m.has_required_attributes());
        m.set_mapping_type(MappingType::Invalid);
        assert!(!m.has_required_attributes());
    }

    #[test]
    fn adjustable_parameter_requires_bounds() {
        let mut p = SedAdjustableParameter::new();
        p.set_target("/sbml:sbml/sbml:model/sbml:listOfParameters/sbml:parameter[@id='k1']");
        assert!(p.has_required_attributes());
        assert!(!p.has_required_elements());
        p.create_child("bounds").expect("bounds slot");
        assert!(p.has_required_elements());
    }

    #[test]
    fn bounds_requires_both_ends() {
        let mut b = SedBounds::new();
        b.set_lower_bound(0.001);
        assert!(!b.has_required_attributes());
        b.set_upper_bound(10.0);
        assert!(b.has_required_attributes());
    }
}
