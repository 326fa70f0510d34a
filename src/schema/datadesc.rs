//! External data descriptions: NuML-described datasets sliced into data
//! sources usable by ranges, data generators, and fit experiments.
//!
//! The `dimensionDescription` child is NuML content; it is captured and
//! written back verbatim, like math.

use derive_builder::Builder;
use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::collections::SedListOf;
use crate::core::{SedElement, SedTypeCode, XmlFragment};
use crate::error::{SedErrorCode, SedIoError};
use crate::xml::marshal::{self, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// One slice through a dataset dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedSlice {
    metaid: Option<String>,
    reference: Option<String>,
    value: Option<String>,
    index: Option<String>,
    start_index: Option<i32>,
    end_index: Option<i32>,
}

impl SedSlice {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(reference, set_reference, is_set_reference, unset_reference, reference);
    sed_string_attr!(value, set_value, is_set_value, unset_value, value);
    sed_string_attr!(index, set_index, is_set_index, unset_index, index);
    sed_copy_attr!(
        start_index,
        set_start_index,
        is_set_start_index,
        unset_start_index,
        start_index,
        i32
    );
    sed_copy_attr!(
        end_index,
        set_end_index,
        is_set_end_index,
        unset_end_index,
        end_index,
        i32
    );
}

impl SedElement for SedSlice {
    fn element_name(&self) -> &'static str {
        "slice"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Slice
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::SliceAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "reference", "value", "index", "startIndex", "endIndex"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "reference" => {
                self.reference = ctx.sid_ref(name, value, SedErrorCode::SliceReferenceMustBeSId)
            }
            "value" => self.value = ctx.string(name, value),
            "index" => self.index = ctx.sid_ref(name, value, SedErrorCode::SliceIndexMustBeSId),
            "startIndex" => {
                self.start_index = ctx.int(name, value, SedErrorCode::SliceStartIndexMustBeInteger)
            }
            "endIndex" => {
                self.end_index = ctx.int(name, value, SedErrorCode::SliceEndIndexMustBeInteger)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "reference", &self.reference);
        marshal::push_str(start, "value", &self.value);
        marshal::push_str(start, "index", &self.index);
        marshal::push_int(start, "startIndex", &self.start_index);
        marshal::push_int(start, "endIndex", &self.end_index);
    }

    fn has_required_attributes(&self) -> bool {
        self.reference.is_some() && self.value.is_some()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 3)
    }
}

sed_list_item!(SedSlice, "slice", "listOfSlices");

/// Extracts one series from the described dataset, either by index set or
/// by slicing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedDataSource {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    index_set: Option<String>,
    slices: SedListOf<SedSlice>,
}

impl SedDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(index_set, set_index_set, is_set_index_set, unset_index_set, index_set);

    pub fn slices(&self) -> &SedListOf<SedSlice> {
        &self.slices
    }

    pub fn slices_mut(&mut self) -> &mut SedListOf<SedSlice> {
        &mut self.slices
    }
}

impl SedElement for SedDataSource {
    fn element_name(&self) -> &'static str {
        "dataSource"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::DataSource
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::DataSourceAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "indexSet"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "indexSet" => {
                self.index_set = ctx.sid_ref(name, value, SedErrorCode::DataSourceIndexSetMustBeSId)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "indexSet", &self.index_set);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        (tag == "listOfSlices").then_some(&mut self.slices as &mut dyn SedElement)
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_list(w, &self.slices)
    }

    fn has_children(&self) -> bool {
        !self.slices.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 3)
    }
}

sed_list_item!(SedDataSource, "dataSource", "listOfDataSources");

/// An external dataset: its location, format, dimension description, and
/// the data sources carved out of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedDataDescription {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    format: Option<String>,
    source: Option<String>,
    dimension_description: Option<XmlFragment>,
    data_sources: SedListOf<SedDataSource>,
}

impl SedDataDescription {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(
        /// URN of the data format, e.g. `urn:sedml:format:numl`.
        format,
        set_format,
        is_set_format,
        unset_format,
        format
    );
    sed_string_attr!(source, set_source, is_set_source, unset_source, source);

    pub fn dimension_description(&self) -> Option<&XmlFragment> {
        self.dimension_description.as_ref()
    }

    pub fn set_dimension_description(&mut self, description: XmlFragment) {
        self.dimension_description = Some(description);
    }

    pub fn is_set_dimension_description(&self) -> bool {
        self.dimension_description.is_some()
    }

    pub fn data_sources(&self) -> &SedListOf<SedDataSource> {
        &self.data_sources
    }

    pub fn data_sources_mut(&mut self) -> &mut SedListOf<SedDataSource> {
        &mut self.data_sources
    }
}

impl SedElement for SedDataDescription {
    fn element_name(&self) -> &'static str {
        "dataDescription"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::DataDescription
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::DataDescriptionAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "format", "source"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "format" => self.format = ctx.string(name, value),
            "source" => self.source = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "format", &self.format);
        marshal::push_str(start, "source", &self.source);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        (tag == "listOfDataSources").then_some(&mut self.data_sources as &mut dyn SedElement)
    }

    fn wants_raw_child(&self, tag: &str) -> bool {
        tag == "dimensionDescription"
    }

    fn store_raw_child(&mut self, _tag: &str, raw: &str) {
        self.dimension_description = Some(XmlFragment::new(raw));
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_fragment(w, "dimensionDescription", &self.dimension_description)?;
        writer::write_list(w, &self.data_sources)
    }

    fn has_children(&self) -> bool {
        self.dimension_description.is_some() || !self.data_sources.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some() && self.source.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 3)
    }
}

sed_list_item!(SedDataDescription, "dataDescription", "listOfDataDescriptions");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_description_requires_id_and_source() {
        let mut dd = SedDataDescription::new();
        dd.set_id("data1");
        assert!(!dd.has_required_attributes());
        dd.set_source("./experiment.numl");
        assert!(dd.has_required_attributes());
        assert_eq!(dd.first_introduced(), (1, 3));
    }

    #[test]
    fn dimension_description_is_captured_verbatim() {
        let mut dd = SedDataDescription::new();
        assert!(dd.wants_raw_child("dimensionDescription"));
        dd.store_raw_child(
            "dimensionDescription",
            "<compositeDescription name=\"time\"/>",
        );
        assert_eq!(
            dd.dimension_description().map(XmlFragment::content),
            Some("<compositeDescription name=\"time\"/>")
        );
    }

    #[test]
    fn slice_requires_reference_and_value() {
        let mut s = SedSlice::new();
        s.set_reference("time_dim");
        assert!(!s.has_required_attributes());
        s.set_value("0");
        assert!(s.has_required_attributes());
    }
}
