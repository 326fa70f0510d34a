//! Outputs: reports, 2D/3D plots, and composed figures.

use derive_builder::Builder;
use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::collections::SedListOf;
use crate::core::{SedElement, SedTypeCode};
use crate::error::{SedErrorCode, SedIoError};
use crate::schema::types::{AxisType, CurveType, SurfaceType};
use crate::xml::marshal::{self, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// A plot axis. The same type serves every axis slot; the XML tag comes
/// from the slot it occupies (`xAxis`, `yAxis`, `zAxis`, `rightYAxis`).
#[derive(Debug, Clone, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedAxis {
    tag: &'static str,
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    axis_type: Option<AxisType>,
    min: Option<f64>,
    max: Option<f64>,
    grid: Option<bool>,
    reverse: Option<bool>,
    style: Option<String>,
}

impl Default for SedAxis {
    fn default() -> Self {
        Self::for_slot("xAxis")
    }
}

impl SedAxis {
    pub fn for_slot(tag: &'static str) -> Self {
        Self {
            tag,
            metaid: None,
            id: None,
            name: None,
            axis_type: None,
            min: None,
            max: None,
            grid: None,
            reverse: None,
            style: None,
        }
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_enum_attr!(
        axis_type,
        set_axis_type,
        is_set_axis_type,
        unset_axis_type,
        axis_type,
        AxisType
    );
    sed_copy_attr!(min, set_min, is_set_min, unset_min, min, f64);
    sed_copy_attr!(max, set_max, is_set_max, unset_max, max, f64);
    sed_copy_attr!(grid, set_grid, is_set_grid, unset_grid, grid, bool);
    sed_copy_attr!(reverse, set_reverse, is_set_reverse, unset_reverse, reverse, bool);
    sed_string_attr!(style, set_style, is_set_style, unset_style, style);
}

impl SedElement for SedAxis {
    fn element_name(&self) -> &'static str {
        self.tag
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Axis
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::AxisAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &[
            "metaid", "id", "name", "type", "min", "max", "grid", "reverse", "style",
        ]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "type" => {
                self.axis_type =
                    ctx.enumeration(name, value, SedErrorCode::AxisTypeMustBeAxisTypeEnum)
            }
            "min" => self.min = ctx.double(name, value, SedErrorCode::AxisMinMustBeDouble),
            "max" => self.max = ctx.double(name, value, SedErrorCode::AxisMaxMustBeDouble),
            "grid" => self.grid = ctx.boolean(name, value, SedErrorCode::AxisGridMustBeBoolean),
            "reverse" => {
                self.reverse = ctx.boolean(name, value, SedErrorCode::AxisReverseMustBeBoolean)
            }
            "style" => self.style = ctx.sid_ref(name, value, SedErrorCode::AxisStyleMustBeStyle),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_enum(start, "type", &self.axis_type);
        marshal::push_double(start, "min", &self.min);
        marshal::push_double(start, "max", &self.max);
        marshal::push_bool(start, "grid", &self.grid);
        marshal::push_bool(start, "reverse", &self.reverse);
        marshal::push_str(start, "style", &self.style);
    }

    fn has_required_attributes(&self) -> bool {
        matches!(self.axis_type, Some(t) if t.is_known())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

/// One column of a report, labelled and bound to a data generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedDataSet {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    label: Option<String>,
    data_reference: Option<String>,
}

impl SedDataSet {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(label, set_label, is_set_label, unset_label, label);
    sed_string_attr!(
        data_reference,
        set_data_reference,
        is_set_data_reference,
        unset_data_reference,
        data_reference
    );
}

impl SedElement for SedDataSet {
    fn element_name(&self) -> &'static str {
        "dataSet"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::DataSet
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::DataSetAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "label", "dataReference"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "label" => self.label = ctx.string(name, value),
            "dataReference" => {
                self.data_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::DataSetDataReferenceMustBeDataGenerator,
                )
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "label", &self.label);
        marshal::push_str(start, "dataReference", &self.data_reference);
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some() && self.label.is_some() && self.data_reference.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

sed_list_item!(SedDataSet, "dataSet", "listOfDataSets");

/// Tabular output: an ordered run of labelled data sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedReport {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    data_sets: SedListOf<SedDataSet>,
}

impl SedReport {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);

    pub fn data_sets(&self) -> &SedListOf<SedDataSet> {
        &self.data_sets
    }

    pub fn data_sets_mut(&mut self) -> &mut SedListOf<SedDataSet> {
        &mut self.data_sets
    }
}

impl SedElement for SedReport {
    fn element_name(&self) -> &'static str {
        "report"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Report
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::OutputAllowedAttributes
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
        (tag == "listOfDataSets").then_some(&mut self.data_sets as &mut dyn SedElement)
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_list(w, &self.data_sets)
    }

    fn has_children(&self) -> bool {
        !self.data_sets.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// A single 2D curve, bound to x/y data generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedCurve {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    log_x: Option<bool>,
    log_y: Option<bool>,
    order: Option<i32>,
    style: Option<String>,
    x_data_reference: Option<String>,
    y_data_reference: Option<String>,
    curve_type: Option<CurveType>,
    x_error_upper: Option<String>,
    x_error_lower: Option<String>,
    y_error_upper: Option<String>,
    y_error_lower: Option<String>,
}

impl SedCurve {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_copy_attr!(log_x, set_log_x, is_set_log_x, unset_log_x, log_x, bool);
    sed_copy_attr!(log_y, set_log_y, is_set_log_y, unset_log_y, log_y, bool);
    sed_copy_attr!(order, set_order, is_set_order, unset_order, order, i32);
    sed_string_attr!(style, set_style, is_set_style, unset_style, style);
    sed_string_attr!(
        x_data_reference,
        set_x_data_reference,
        is_set_x_data_reference,
        unset_x_data_reference,
        x_data_reference
    );
    sed_string_attr!(
        y_data_reference,
        set_y_data_reference,
        is_set_y_data_reference,
        unset_y_data_reference,
        y_data_reference
    );
    sed_enum_attr!(
        curve_type,
        set_curve_type,
        is_set_curve_type,
        unset_curve_type,
        curve_type,
        CurveType
    );
    sed_string_attr!(
        x_error_upper,
        set_x_error_upper,
        is_set_x_error_upper,
        unset_x_error_upper,
        x_error_upper
    );
    sed_string_attr!(
        x_error_lower,
        set_x_error_lower,
        is_set_x_error_lower,
        unset_x_error_lower,
        x_error_lower
    );
    sed_string_attr!(
        y_error_upper,
        set_y_error_upper,
        is_set_y_error_upper,
        unset_y_error_upper,
        y_error_upper
    );
    sed_string_attr!(
        y_error_lower,
        set_y_error_lower,
        is_set_y_error_lower,
        unset_y_error_lower,
        y_error_lower
    );
}

impl SedElement for SedCurve {
    fn element_name(&self) -> &'static str {
        "curve"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Curve
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::CurveAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &[
            "metaid",
            "id",
            "name",
            "logX",
            "logY",
            "order",
            "style",
            "xDataReference",
            "yDataReference",
            "type",
            "xErrorUpper",
            "xErrorLower",
            "yErrorUpper",
            "yErrorLower",
        ]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "logX" => {
                self.log_x = ctx.boolean(name, value, SedErrorCode::AbstractCurveLogXMustBeBoolean)
            }
            "logY" => self.log_y = ctx.boolean(name, value, SedErrorCode::CurveLogYMustBeBoolean),
            "order" => {
                self.order = ctx.int(name, value, SedErrorCode::AbstractCurveOrderMustBeInteger)
            }
            "style" => {
                self.style = ctx.sid_ref(name, value, SedErrorCode::AbstractCurveStyleMustBeStyle)
            }
            "xDataReference" => {
                self.x_data_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::AbstractCurveXDataReferenceMustBeDataGenerator,
                )
            }
            "yDataReference" => {
                self.y_data_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::CurveYDataReferenceMustBeDataGenerator,
                )
            }
            "type" => {
                self.curve_type =
                    ctx.enumeration(name, value, SedErrorCode::CurveTypeMustBeCurveTypeEnum)
            }
            "xErrorUpper" => self.x_error_upper = ctx.string(name, value),
            "xErrorLower" => self.x_error_lower = ctx.string(name, value),
            "yErrorUpper" => self.y_error_upper = ctx.string(name, value),
            "yErrorLower" => self.y_error_lower = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_bool(start, "logX", &self.log_x);
        marshal::push_bool(start, "logY", &self.log_y);
        marshal::push_int(start, "order", &self.order);
        marshal::push_str(start, "style", &self.style);
        marshal::push_str(start, "xDataReference", &self.x_data_reference);
        marshal::push_str(start, "yDataReference", &self.y_data_reference);
        marshal::push_enum(start, "type", &self.curve_type);
        marshal::push_str(start, "xErrorUpper", &self.x_error_upper);
        marshal::push_str(start, "xErrorLower", &self.x_error_lower);
        marshal::push_str(start, "yErrorUpper", &self.y_error_upper);
        marshal::push_str(start, "yErrorLower", &self.y_error_lower);
    }

    // xDataReference is optional; only the y reference and the kind are
    // mandatory.
    fn has_required_attributes(&self) -> bool {
        self.y_data_reference.is_some()
            && matches!(self.curve_type, Some(t) if t.is_known())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// The filled region between two y series over a common x series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedShadedArea {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    log_x: Option<bool>,
    order: Option<i32>,
    style: Option<String>,
    x_data_reference: Option<String>,
    y_data_reference_from: Option<String>,
    y_data_reference_to: Option<String>,
}

impl SedShadedArea {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_copy_attr!(log_x, set_log_x, is_set_log_x, unset_log_x, log_x, bool);
    sed_copy_attr!(order, set_order, is_set_order, unset_order, order, i32);
    sed_string_attr!(style, set_style, is_set_style, unset_style, style);
    sed_string_attr!(
        x_data_reference,
        set_x_data_reference,
        is_set_x_data_reference,
        unset_x_data_reference,
        x_data_reference
    );
    sed_string_attr!(
        y_data_reference_from,
        set_y_data_reference_from,
        is_set_y_data_reference_from,
        unset_y_data_reference_from,
        y_data_reference_from
    );
    sed_string_attr!(
        y_data_reference_to,
        set_y_data_reference_to,
        is_set_y_data_reference_to,
        unset_y_data_reference_to,
        y_data_reference_to
    );
}

impl SedElement for SedShadedArea {
    fn element_name(&self) -> &'static str {
        "shadedArea"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::ShadedArea
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::ShadedAreaAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &[
            "metaid",
            "id",
            "name",
            "logX",
            "order",
            "style",
            "xDataReference",
            "yDataReferenceFrom",
            "yDataReferenceTo",
        ]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "logX" => {
                self.log_x = ctx.boolean(name, value, SedErrorCode::AbstractCurveLogXMustBeBoolean)
            }
            "order" => {
                self.order = ctx.int(name, value, SedErrorCode::AbstractCurveOrderMustBeInteger)
            }
            "style" => {
                self.style = ctx.sid_ref(name, value, SedErrorCode::AbstractCurveStyleMustBeStyle)
            }
            "xDataReference" => {
                self.x_data_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::AbstractCurveXDataReferenceMustBeDataGenerator,
                )
            }
            "yDataReferenceFrom" => {
                self.y_data_reference_from = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::ShadedAreaYDataReferenceFromMustBeDataGenerator,
                )
            }
            "yDataReferenceTo" => {
                self.y_data_reference_to = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::ShadedAreaYDataReferenceToMustBeDataGenerator,
                )
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_bool(start, "logX", &self.log_x);
        marshal::push_int(start, "order", &self.order);
        marshal::push_str(start, "style", &self.style);
        marshal::push_str(start, "xDataReference", &self.x_data_reference);
        marshal::push_str(start, "yDataReferenceFrom", &self.y_data_reference_from);
        marshal::push_str(start, "yDataReferenceTo", &self.y_data_reference_to);
    }

    fn has_required_attributes(&self) -> bool {
        self.y_data_reference_from.is_some() && self.y_data_reference_to.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_element_group! {
    /// Any of the curve kinds a `listOfCurves` may hold.
    SedAbstractCurve, "listOfCurves" {
        Curve(SedCurve) => "curve",
        ShadedArea(SedShadedArea) => "shadedArea",
    }
}

/// A single 3D surface over x/y/z data generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedSurface {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    log_x: Option<bool>,
    log_y: Option<bool>,
    log_z: Option<bool>,
    order: Option<i32>,
    style: Option<String>,
    x_data_reference: Option<String>,
    y_data_reference: Option<String>,
    z_data_reference: Option<String>,
    surface_type: Option<SurfaceType>,
}

impl SedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_copy_attr!(log_x, set_log_x, is_set_log_x, unset_log_x, log_x, bool);
    sed_copy_attr!(log_y, set_log_y, is_set_log_y, unset_log_y, log_y, bool);
    sed_copy_attr!(log_z, set_log_z, is_set_log_z, unset_log_z, log_z, bool);
    sed_copy_attr!(order, set_order, is_set_order, unset_order, order, i32);
    sed_string_attr!(style, set_style, is_set_style, unset_style, style);
    sed_string_attr!(
        x_data_reference,
        set_x_data_reference,
        is_set_x_data_reference,
        unset_x_data_reference,
        x_data_reference
    );
    sed_string_attr!(
        y_data_reference,
        set_y_data_reference,
        is_set_y_data_reference,
        unset_y_data_reference,
        y_data_reference
    );
    sed_string_attr!(
        z_data_reference,
        set_z_data_reference,
        is_set_z_data_reference,
        unset_z_data_reference,
        z_data_reference
    );
    sed_enum_attr!(
        surface_type,
        set_surface_type,
        is_set_surface_type,
        unset_surface_type,
        surface_type,
        SurfaceType
    );
}

impl SedElement for SedSurface {
    fn element_name(&self) -> &'static str {
        "surface"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Surface
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::SurfaceAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &[
            "metaid",
            "id",
            "name",
            "logX",
            "logY",
            "logZ",
            "order",
            "style",
            "xDataReference",
            "yDataReference",
            "zDataReference",
            "type",
        ]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "logX" => {
                self.log_x = ctx.boolean(name, value, SedErrorCode::AbstractCurveLogXMustBeBoolean)
            }
            "logY" => {
                self.log_y = ctx.boolean(name, value, SedErrorCode::CurveLogYMustBeBoolean)
            }
            "logZ" => {
                self.log_z = ctx.boolean(name, value, SedErrorCode::SurfaceLogZMustBeBoolean)
            }
            "order" => {
                self.order = ctx.int(name, value, SedErrorCode::AbstractCurveOrderMustBeInteger)
            }
            "style" => self.style = ctx.sid_ref(name, value, SedErrorCode::SurfaceStyleMustBeStyle),
            "xDataReference" => {
                self.x_data_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::SurfaceXDataReferenceMustBeDataGenerator,
                )
            }
            "yDataReference" => {
                self.y_data_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::SurfaceYDataReferenceMustBeDataGenerator,
                )
            }
            "zDataReference" => {
                self.z_data_reference = ctx.sid_ref(
                    name,
                    value,
                    SedErrorCode::SurfaceZDataReferenceMustBeDataGenerator,
                )
            }
            "type" => {
                self.surface_type =
                    ctx.enumeration(name, value, SedErrorCode::SurfaceTypeMustBeSurfaceTypeEnum)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_bool(start, "logX", &self.log_x);
        marshal::push_bool(start, "logY", &self.log_y);
        marshal::push_bool(start, "logZ", &self.log_z);
        marshal::push_int(start, "order", &self.order);
        marshal::push_str(start, "style", &self.style);
        marshal::push_str(start, "xDataReference", &self.x_data_reference);
        marshal::push_str(start, "yDataReference", &self.y_data_reference);
        marshal::push_str(start, "zDataReference", &self.z_data_reference);
        marshal::push_enum(start, "type", &self.surface_type);
    }

    fn has_required_attributes(&self) -> bool {
        self.z_data_reference.is_some()
            && matches!(self.surface_type, Some(t) if t.is_known())
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

sed_list_item!(SedSurface, "surface", "listOfSurfaces");

/// A 2D plot: curves plus optional x, y, and right-hand y axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedPlot2D {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    legend: Option<bool>,
    height: Option<f64>,
    width: Option<f64>,
    curves: SedListOf<SedAbstractCurve>,
    x_axis: Option<SedAxis>,
    y_axis: Option<SedAxis>,
    right_y_axis: Option<SedAxis>,
}

impl SedPlot2D {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_copy_attr!(legend, set_legend, is_set_legend, unset_legend, legend, bool);
    sed_copy_attr!(height, set_height, is_set_height, unset_height, height, f64);
    sed_copy_attr!(width, set_width, is_set_width, unset_width, width, f64);

    pub fn curves(&self) -> &SedListOf<SedAbstractCurve> {
        &self.curves
    }

    pub fn curves_mut(&mut self) -> &mut SedListOf<SedAbstractCurve> {
        &mut self.curves
    }

    pub fn x_axis(&self) -> Option<&SedAxis> {
        self.x_axis.as_ref()
    }

    pub fn set_x_axis(&mut self, mut axis: SedAxis) {
        axis.tag = "xAxis";
        self.x_axis = Some(axis);
    }

    pub fn y_axis(&self) -> Option<&SedAxis> {
        self.y_axis.as_ref()
    }

    pub fn set_y_axis(&mut self, mut axis: SedAxis) {
        axis.tag = "yAxis";
        self.y_axis = Some(axis);
    }

    pub fn right_y_axis(&self) -> Option<&SedAxis> {
        self.right_y_axis.as_ref()
    }

    pub fn set_right_y_axis(&mut self, mut axis: SedAxis) {
        axis.tag = "rightYAxis";
        self.right_y_axis = Some(axis);
    }
}

impl SedElement for SedPlot2D {
    fn element_name(&self) -> &'static str {
        "plot2D"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Plot2D
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::PlotAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "legend", "height", "width"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "legend" => {
                self.legend = ctx.boolean(name, value, SedErrorCode::PlotLegendMustBeBoolean)
            }
            "height" => {
                self.height = ctx.double(name, value, SedErrorCode::PlotHeightMustBeDouble)
            }
            "width" => self.width = ctx.double(name, value, SedErrorCode::PlotWidthMustBeDouble),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_bool(start, "legend", &self.legend);
        marshal::push_double(start, "height", &self.height);
        marshal::push_double(start, "width", &self.width);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "listOfCurves" => Some(&mut self.curves),
            "xAxis" => Some(self.x_axis.insert(SedAxis::for_slot("xAxis")) as &mut dyn SedElement),
            "yAxis" => Some(self.y_axis.insert(SedAxis::for_slot("yAxis")) as &mut dyn SedElement),
            "rightYAxis" => {
                Some(self.right_y_axis.insert(SedAxis::for_slot("rightYAxis"))
                    as &mut dyn SedElement)
            }
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_child(w, &self.x_axis)?;
        writer::write_child(w, &self.y_axis)?;
        writer::write_child(w, &self.right_y_axis)?;
        writer::write_list(w, &self.curves)
    }

    fn has_children(&self) -> bool {
        self.x_axis.is_some()
            || self.y_axis.is_some()
            || self.right_y_axis.is_some()
            || !self.curves.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// A 3D plot: surfaces plus optional x, y, and z axes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedPlot3D {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    legend: Option<bool>,
    height: Option<f64>,
    width: Option<f64>,
    surfaces: SedListOf<SedSurface>,
    x_axis: Option<SedAxis>,
    y_axis: Option<SedAxis>,
    z_axis: Option<SedAxis>,
}

impl SedPlot3D {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_copy_attr!(legend, set_legend, is_set_legend, unset_legend, legend, bool);
    sed_copy_attr!(height, set_height, is_set_height, unset_height, height, f64);
    sed_copy_attr!(width, set_width, is_set_width, unset_width, width, f64);

    pub fn surfaces(&self) -> &SedListOf<SedSurface> {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut SedListOf<SedSurface> {
        &mut self.surfaces
    }

    pub fn x_axis(&self) -> Option<&SedAxis> {
        self.x_axis.as_ref()
    }

    pub fn set_x_axis(&mut self, mut axis: SedAxis) {
        axis.tag = "xAxis";
        self.x_axis = Some(axis);
    }

    pub fn y_axis(&self) -> Option<&SedAxis> {
        self.y_axis.as_ref()
    }

    pub fn set_y_axis(&mut self, mut axis: SedAxis) {
        axis.tag = "yAxis";
        self.y_axis = Some(axis);
    }

    pub fn z_axis(&self) -> Option<&SedAxis> {
        self.z_axis.as_ref()
    }

    pub fn set_z_axis(&mut self, mut axis: SedAxis) {
        axis.tag = "zAxis";
        self.z_axis = Some(axis);
    }
}

impl SedElement for SedPlot3D {
    fn element_name(&self) -> &'static str {
        "plot3D"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Plot3D
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::PlotAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "legend", "height", "width"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "legend" => {
                self.legend = ctx.boolean(name, value, SedErrorCode::PlotLegendMustBeBoolean)
            }
            "height" => {
                self.height = ctx.double(name, value, SedErrorCode::PlotHeightMustBeDouble)
            }
            "width" => self.width = ctx.double(name, value, SedErrorCode::PlotWidthMustBeDouble),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_bool(start, "legend", &self.legend);
        marshal::push_double(start, "height", &self.height);
        marshal::push_double(start, "width", &self.width);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "listOfSurfaces" => Some(&mut self.surfaces),
            "xAxis" => Some(self.x_axis.insert(SedAxis::for_slot("xAxis")) as &mut dyn SedElement),
            "yAxis" => Some(self.y_axis.insert(SedAxis::for_slot("yAxis")) as &mut dyn SedElement),
            "zAxis" => Some(self.z_axis.insert(SedAxis::for_slot("zAxis")) as &mut dyn SedElement),
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_child(w, &self.x_axis)?;
        writer::write_child(w, &self.y_axis)?;
        writer::write_child(w, &self.z_axis)?;
        writer::write_list(w, &self.surfaces)
    }

    fn has_children(&self) -> bool {
        self.x_axis.is_some()
            || self.y_axis.is_some()
            || self.z_axis.is_some()
            || !self.surfaces.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Positions one plot inside a figure's grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedSubPlot {
    metaid: Option<String>,
    id: Option<String>,
    plot: Option<String>,
    row: Option<i32>,
    col: Option<i32>,
    row_span: Option<i32>,
    col_span: Option<i32>,
}

impl SedSubPlot {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(plot, set_plot, is_set_plot, unset_plot, plot);
    sed_copy_attr!(row, set_row, is_set_row, unset_row, row, i32);
    sed_copy_attr!(col, set_col, is_set_col, unset_col, col, i32);
    sed_copy_attr!(row_span, set_row_span, is_set_row_span, unset_row_span, row_span, i32);
    sed_copy_attr!(col_span, set_col_span, is_set_col_span, unset_col_span, col_span, i32);
}

impl SedElement for SedSubPlot {
    fn element_name(&self) -> &'static str {
        "subPlot"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::SubPlot
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::SubPlotAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "plot", "row", "col", "rowSpan", "colSpan"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "plot" => self.plot = ctx.sid_ref(name, value, SedErrorCode::SubPlotPlotMustBePlot),
            "row" => self.row = ctx.int(name, value, SedErrorCode::SubPlotRowMustBeInteger),
            "col" => self.col = ctx.int(name, value, SedErrorCode::SubPlotColMustBeInteger),
            "rowSpan" => {
                self.row_span = ctx.int(name, value, SedErrorCode::SubPlotRowSpanMustBeInteger)
            }
            "colSpan" => {
                self.col_span = ctx.int(name, value, SedErrorCode::SubPlotColSpanMustBeInteger)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "plot", &self.plot);
        marshal::push_int(start, "row", &self.row);
        marshal::push_int(start, "col", &self.col);
        marshal::push_int(start, "rowSpan", &self.row_span);
        marshal::push_int(start, "colSpan", &self.col_span);
    }

    fn has_required_attributes(&self) -> bool {
        self.plot.is_some() && self.row.is_some() && self.col.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_list_item!(SedSubPlot, "subPlot", "listOfSubPlots");

/// A grid of sub-plots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedFigure {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    num_rows: Option<i32>,
    num_cols: Option<i32>,
    sub_plots: SedListOf<SedSubPlot>,
}

impl SedFigure {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_copy_attr!(num_rows, set_num_rows, is_set_num_rows, unset_num_rows, num_rows, i32);
    sed_copy_attr!(num_cols, set_num_cols, is_set_num_cols, unset_num_cols, num_cols, i32);

    pub fn sub_plots(&self) -> &SedListOf<SedSubPlot> {
        &self.sub_plots
    }

    pub fn sub_plots_mut(&mut self) -> &mut SedListOf<SedSubPlot> {
        &mut self.sub_plots
    }
}

impl SedElement for SedFigure {
    fn element_name(&self) -> &'static str {
        "figure"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Figure
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::FigureAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "numRows", "numCols"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "numRows" => {
                self.num_rows = ctx.int(name, value, SedErrorCode::FigureNumRowsMustBeInteger)
            }
            "numCols" => {
                self.num_cols = ctx.int(name, value, SedErrorCode::FigureNumColsMustBeInteger)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_int(start, "numRows", &self.num_rows);
        marshal::push_int(start, "numCols", &self.num_cols);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        (tag == "listOfSubPlots").then_some(&mut self.sub_plots as &mut dyn SedElement)
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_list(w, &self.sub_plots)
    }

    fn has_children(&self) -> bool {
        !self.sub_plots.is_empty()
    }

    fn has_required_attributes(&self) -> bool {
        self.id.is_some() && self.num_rows.is_some() && self.num_cols.is_some()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

sed_element_group! {
    /// Any of the output kinds a `listOfOutputs` may hold.
    SedOutput, "listOfOutputs" {
        Report(SedReport) => "report",
        Plot2D(SedPlot2D) => "plot2D",
        Plot3D(SedPlot3D) => "plot3D",
        Figure(SedFigure) => "figure",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::SedListItem;

    #[test]
    fn axis_takes_its_tag_from_the_slot() {
        let mut plot = SedPlot2D::new();
        plot.set_id("p1");
        plot.create_child("xAxis").expect("x axis slot");
        plot.create_child("rightYAxis").expect("right y axis slot");

        assert_eq!(plot.x_axis().map(|a| a.element_name()), Some("xAxis"));
        assert_eq!(
            plot.right_y_axis().map(|a| a.element_name()),
            Some("rightYAxis")
        );
        assert!(plot.y_axis().is_none());
    }

    #[test]
    fn axis_requires_a_known_type() {
        let mut axis = SedAxis::for_slot("yAxis");
        assert!(!axis.has_required_attributes());
        axis.set_axis_type(AxisType::Log10);
        assert!(axis.has_required_attributes());
        axis.set_axis_type(AxisType::Invalid);
        assert!(!axis.has_required_attributes());
    }

    #[test]
    fn curve_requires_y_reference_and_type() {
        let mut curve = SedCurve::new();
        curve.set_id("c1");
        curve.set_x_data_reference("dg_time");
        curve.set_y_data_reference("dg_s1");
        assert!(!curve.has_required_attributes());

        curve.set_curve_type(CurveType::Points);
        assert!(curve.has_required_attributes());

        // The x reference is optional.
        curve.unset_x_data_reference();
        assert!(curve.has_required_attributes());
    }

    #[test]
    fn surface_requires_z_reference_and_type() {
        let mut surface = SedSurface::new();
        surface.set_id("srf1");
        surface.set_z_data_reference("dg_z");
        assert!(!surface.has_required_attributes());

        surface.set_surface_type(SurfaceType::HeatMap);
        assert!(surface.has_required_attributes());
    }

    #[test]
    fn data_set_requires_label_and_reference() {
        let mut ds = SedDataSet::new();
        ds.set_id("ds1");
        ds.set_label("time");
        assert!(!ds.has_required_attributes());
        ds.set_data_reference("dg_time");
        assert!(ds.has_required_attributes());
    }

    #[test]
    fn output_group_covers_reports_plots_and_figures() {
        for tag in ["report", "plot2D", "plot3D", "figure"] {
            let out = SedOutput::from_tag(tag).expect("known tag");
            assert_eq!(out.element_name(), tag);
        }
        assert!(SedOutput::from_tag("plot4D").is_none());
    }

    #[test]
    fn curve_group_accepts_shaded_areas() {
        assert!(SedAbstractCurve::accepts_tag("curve"));
        assert!(SedAbstractCurve::accepts_tag("shadedArea"));
        assert!(!SedAbstractCurve::accepts_tag("surface"));
    }
}
