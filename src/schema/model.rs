//! Models and the model pre-processing changes.
//!
//! A `model` names an external definition (SBML, CellML, …) by `source` and
//! `language`, and carries an ordered `listOfChanges` applied to it before
//! simulation. Four of the change kinds address the target document by
//! XPath; `computeChange` additionally computes the new value from a math
//! expression over variables and parameters.

use derive_builder::Builder;
use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::collections::SedListOf;
use crate::core::{MathML, SedElement, SedTypeCode, XmlFragment};
use crate::error::{SedErrorCode, SedIoError};
use crate::schema::datagen::{SedParameter, SedVariable};
use crate::xml::marshal::{self, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// A reference to a model, plus the changes applied to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedModel {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    language: Option<String>,
    source: Option<String>,
    changes: SedListOf<SedChange>,
}

impl SedModel {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(
        /// URN of the model language, e.g. `urn:sedml:language:sbml`.
        language,
        set_language,
        is_set_language,
        unset_language,
        language
    );
    sed_string_attr!(
        /// Where the model definition lives: a file name, URI, or the id of
        /// another model in the same document.
        source,
        set_source,
        is_set_source,
        unset_source,
        source
    );

    pub fn changes(&self) -> &SedListOf<SedChange> {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut SedListOf<SedChange> {
        &mut self.changes
    }
}

impl SedElement for SedModel {
    fn element_name(&self) -> &'static str {
        "model"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Model
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ModelAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "language", "source"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "language" => self.language = ctx.string(name, value),
            "source" => self.source = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "language", &self.language);
        marshal::push_str(start, "source", &self.source);
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
        self.id.is_some() && self.source.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

sed_list_item!(SedModel, "model", "listOfModels");

/// Replaces the value of the attribute addressed by `target`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedChangeAttribute {
    metaid: Option<String>,
    target: Option<String>,
    new_value: Option<String>,
}

impl SedChangeAttribute {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);
    sed_string_attr!(
        new_value,
        set_new_value,
        is_set_new_value,
        unset_new_value,
        new_value
    );
}

impl SedElement for SedChangeAttribute {
    fn element_name(&self) -> &'static str {
        "changeAttribute"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::ChangeAttribute
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ChangeAttributeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "target", "newValue"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "target" => self.target = ctx.string(name, value),
            "newValue" => self.new_value = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "target", &self.target);
        marshal::push_str(start, "newValue", &self.new_value);
    }

    fn has_required_attributes(&self) -> bool {
        self.target.is_some() && self.new_value.is_some()
    }
}

/// Inserts a literal-XML payload as a child of the `target` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedAddXml {
    metaid: Option<String>,
    target: Option<String>,
    new_xml: Option<XmlFragment>,
}

impl SedAddXml {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);

    pub fn new_xml(&self) -> Option<&XmlFragment> {
        self.new_xml.as_ref()
    }

    pub fn set_new_xml(&mut self, xml: XmlFragment) {
        self.new_xml = Some(xml);
    }

    pub fn is_set_new_xml(&self) -> bool {
        self.new_xml.is_some()
    }

    pub fn unset_new_xml(&mut self) {
        self.new_xml = None;
    }
}

impl SedElement for SedAddXml {
    fn element_name(&self) -> &'static str {
        "addXML"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::AddXml
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ChangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "target"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "target" => self.target = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "target", &self.target);
    }

    fn wants_raw_child(&self, tag: &str) -> bool {
        tag == "newXML"
    }

    fn store_raw_child(&mut self, _tag: &str, raw: &str) {
        self.new_xml = Some(XmlFragment::new(raw));
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_fragment(w, "newXML", &self.new_xml)
    }

    fn has_children(&self) -> bool {
        self.new_xml.is_some()
    }

    fn has_required_attributes(&self) -> bool {
        self.target.is_some()
    }

    fn has_required_elements(&self) -> bool {
        self.new_xml.is_some()
    }
}

/// Replaces the `target` element with a literal-XML payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedChangeXml {
    metaid: Option<String>,
    target: Option<String>,
    new_xml: Option<XmlFragment>,
}

impl SedChangeXml {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);

    pub fn new_xml(&self) -> Option<&XmlFragment> {
        self.new_xml.as_ref()
    }

    pub fn set_new_xml(&mut self, xml: XmlFragment) {
        self.new_xml = Some(xml);
    }

    pub fn is_set_new_xml(&self) -> bool {
        self.new_xml.is_some()
    }

    pub fn unset_new_xml(&mut self) {
        self.new_xml = None;
    }
}

impl SedElement for SedChangeXml {
    fn element_name(&self) -> &'static str {
        "changeXML"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::ChangeXml
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ChangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "target"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "target" => self.target = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "target", &self.target);
    }

    fn wants_raw_child(&self, tag: &str) -> bool {
        tag == "newXML"
    }

    fn store_raw_child(&mut self, _tag: &str, raw: &str) {
        self.new_xml = Some(XmlFragment::new(raw));
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_fragment(w, "newXML", &self.new_xml)
    }

    fn has_children(&self) -> bool {
        self.new_xml.is_some()
    }

    fn has_required_attributes(&self) -> bool {
        self.target.is_some()
    }

    fn has_required_elements(&self) -> bool {
        self.new_xml.is_some()
    }
}

/// Removes the `target` element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedRemoveXml {
    metaid: Option<String>,
    target: Option<String>,
}

impl SedRemoveXml {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);
}

impl SedElement for SedRemoveXml {
    fn element_name(&self) -> &'static str {
        "removeXML"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::RemoveXml
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ChangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "target"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "target" => self.target = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "target", &self.target);
    }

    fn has_required_attributes(&self) -> bool {
        self.target.is_some()
    }
}

/// Computes a new value for the `target` from a math expression over the
/// listed variables and parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedComputeChange {
    metaid: Option<String>,
    target: Option<String>,
    symbol: Option<String>,
    math: Option<MathML>,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
}

impl SedComputeChange {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(target, set_target, is_set_target, unset_target, target);
    sed_string_attr!(symbol, set_symbol, is_set_symbol, unset_symbol, symbol);

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

impl SedElement for SedComputeChange {
    fn element_name(&self) -> &'static str {
        "computeChange"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::ComputeChange
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ChangeAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "target", "symbol"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "target" => self.target = ctx.string(name, value),
            "symbol" => self.symbol = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "target", &self.target);
        marshal::push_str(start, "symbol", &self.symbol);
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
        self.target.is_some()
    }

    fn has_required_elements(&self) -> bool {
        self.math.is_some()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 2)
    }
}

sed_element_group! {
    /// Any of the five change kinds a `listOfChanges` may hold.
    SedChange, "listOfChanges" {
        ChangeAttribute(SedChangeAttribute) => "changeAttribute",
        ChangeXml(SedChangeXml) => "changeXML",
        AddXml(SedAddXml) => "addXML",
        RemoveXml(SedRemoveXml) => "removeXML",
        ComputeChange(SedComputeChange) => "computeChange",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::SedListItem;

    #[test]
    fn model_requires_id_and_source() {
        let mut m = SedModel::new();
        assert!(!m.has_required_attributes());
        m.set_id("m1");
        assert!(!m.has_required_attributes());
        m.set_source("oscillator.xml");
        assert!(m.has_required_attributes());
    }

    #[test]
    fn change_group_dispatches_by_tag() {
        assert!(SedChange::accepts_tag("computeChange"));
        assert!(!SedChange::accepts_tag("listOfChanges"));

        let change = SedChange::from_tag("changeAttribute").expect("known tag");
        assert_eq!(change.element_name(), "changeAttribute");
        assert_eq!(change.type_code(), SedTypeCode::ChangeAttribute);
        assert!(SedChange::from_tag("mutate").is_none());
    }

    #[test]
    fn change_attribute_requires_target_and_new_value() {
        let mut c = SedChangeAttribute::new();
        c.set_target("/sbml:sbml/sbml:model/@id");
        assert!(!c.has_required_attributes());
        c.set_new_value("m2");
        assert!(c.has_required_attributes());
    }

    #[test]
    fn add_xml_requires_payload_element() {
        let mut c = SedAddXml::new();
        c.set_target("/sbml:sbml/sbml:model");
        assert!(c.has_required_attributes());
        assert!(!c.has_required_elements());
        c.store_raw_child("newXML", "<parameter id=\"k\" value=\"1\"/>");
        assert!(c.has_required_elements());
        assert_eq!(
            c.new_xml().map(XmlFragment::content),
            Some("<parameter id=\"k\" value=\"1\"/>")
        );
    }

    #[test]
    fn compute_change_builds_math_and_variables() {
        let mut c = SedComputeChange::new();
        c.set_target("/sbml:sbml/sbml:model/sbml:listOfSpecies/sbml:species[@id='S1']");
        c.set_math(MathML::new("<ci> v1 </ci>"));

        let child = c.create_child("listOfVariables").expect("variables list");
        assert_eq!(child.element_name(), "listOfVariables");
        assert!(c.create_child("listOfRanges").is_none());
        assert!(c.wants_raw_child("math"));
        assert!(c.has_required_elements());
    }
}
