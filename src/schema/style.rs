//! Reusable visual styles for curves, surfaces, and axes.
//!
//! Styles cascade through `baseStyle`: an unset facet falls back to the
//! referenced base. Colors are hex strings (`RRGGBB` or `RRGGBBAA`); the
//! library stores them verbatim.

use derive_builder::Builder;
use quick_xml::events::BytesStart;
use serde::Serialize;

use crate::core::{SedElement, SedTypeCode};
use crate::error::{SedErrorCode, SedIoError};
use crate::schema::types::{LineType, MarkerType};
use crate::xml::marshal::{self, AttrContext};
use crate::xml::writer::{self, XmlWriter};

/// Line facet of a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedLine {
    metaid: Option<String>,
    line_type: Option<LineType>,
    color: Option<String>,
    thickness: Option<f64>,
}

impl SedLine {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_enum_attr!(
        line_type,
        set_line_type,
        is_set_line_type,
        unset_line_type,
        line_type,
        LineType
    );
    sed_string_attr!(color, set_color, is_set_color, unset_color, color);
    sed_copy_attr!(
        thickness,
        set_thickness,
        is_set_thickness,
        unset_thickness,
        thickness,
        f64
    );
}

impl SedElement for SedLine {
    fn element_name(&self) -> &'static str {
        "line"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Line
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::LineAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "type", "color", "thickness"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "type" => {
                self.line_type =
                    ctx.enumeration(name, value, SedErrorCode::LineTypeMustBeLineTypeEnum)
            }
            "color" => self.color = ctx.string(name, value),
            "thickness" => {
                self.thickness = ctx.double(name, value, SedErrorCode::LineThicknessMustBeDouble)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_enum(start, "type", &self.line_type);
        marshal::push_str(start, "color", &self.color);
        marshal::push_double(start, "thickness", &self.thickness);
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

/// Marker facet of a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedMarker {
    metaid: Option<String>,
    size: Option<f64>,
    marker_type: Option<MarkerType>,
    fill: Option<String>,
    line_color: Option<String>,
    line_thickness: Option<f64>,
}

impl SedMarker {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_copy_attr!(size, set_size, is_set_size, unset_size, size, f64);
    sed_enum_attr!(
        marker_type,
        set_marker_type,
        is_set_marker_type,
        unset_marker_type,
        marker_type,
        MarkerType
    );
    sed_string_attr!(fill, set_fill, is_set_fill, unset_fill, fill);
    sed_string_attr!(
        line_color,
        set_line_color,
        is_set_line_color,
        unset_line_color,
        line_color
    );
    sed_copy_attr!(
        line_thickness,
        set_line_thickness,
        is_set_line_thickness,
        unset_line_thickness,
        line_thickness,
        f64
    );
}

impl SedElement for SedMarker {
    fn element_name(&self) -> &'static str {
        "marker"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Marker
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::MarkerAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "size", "type", "fill", "lineColor", "lineThickness"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "size" => self.size = ctx.double(name, value, SedErrorCode::MarkerSizeMustBeDouble),
            "type" => {
                self.marker_type =
                    ctx.enumeration(name, value, SedErrorCode::MarkerTypeMustBeMarkerTypeEnum)
            }
            "fill" => self.fill = ctx.string(name, value),
            "lineColor" => self.line_color = ctx.string(name, value),
            "lineThickness" => {
                self.line_thickness =
                    ctx.double(name, value, SedErrorCode::MarkerLineThicknessMustBeDouble)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_double(start, "size", &self.size);
        marshal::push_enum(start, "type", &self.marker_type);
        marshal::push_str(start, "fill", &self.fill);
        marshal::push_str(start, "lineColor", &self.line_color);
        marshal::push_double(start, "lineThickness", &self.line_thickness);
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

/// Fill facet of a style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedFill {
    metaid: Option<String>,
    color: Option<String>,
}

impl SedFill {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(color, set_color, is_set_color, unset_color, color);
}

impl SedElement for SedFill {
    fn element_name(&self) -> &'static str {
        "fill"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Fill
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::FillAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "color"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "color" => self.color = ctx.string(name, value),
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "color", &self.color);
    }

    fn has_required_attributes(&self) -> bool {
        self.color.is_some()
    }

    fn first_introduced(&self) -> (u32, u32) {
        (1, 4)
    }
}

/// A named style, optionally deriving from a base style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SedStyle {
    metaid: Option<String>,
    id: Option<String>,
    name: Option<String>,
    base_style: Option<String>,
    line: Option<SedLine>,
    marker: Option<SedMarker>,
    fill: Option<SedFill>,
}

impl SedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    sed_string_attr!(metaid, set_metaid, is_set_metaid, unset_metaid, metaid);
    sed_string_attr!(id, set_id, is_set_id, unset_id, id);
    sed_string_attr!(name, set_name, is_set_name, unset_name, name);
    sed_string_attr!(
        base_style,
        set_base_style,
        is_set_base_style,
        unset_base_style,
        base_style
    );

    pub fn line(&self) -> Option<&SedLine> {
        self.line.as_ref()
    }

    pub fn set_line(&mut self, line: SedLine) {
        self.line = Some(line);
    }

    pub fn marker(&self) -> Option<&SedMarker> {
        self.marker.as_ref()
    }

    pub fn set_marker(&mut self, marker: SedMarker) {
        self.marker = Some(marker);
    }

    pub fn fill(&self) -> Option<&SedFill> {
        self.fill.as_ref()
    }

    pub fn set_fill(&mut self, fill: SedFill) {
        self.fill = Some(fill);
    }
}

impl SedElement for SedStyle {
    fn element_name(&self) -> &'static str {
        "style"
    }

    fn type_code(&self) -> SedTypeCode {
        SedTypeCode::Style
    }

    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::StyleAllowedAttributes
    }

    fn expected_attributes(&self) -> &'static [&'static str] {
        &["metaid", "id", "name", "baseStyle"]
    }

    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>) {
        match name {
            "metaid" => self.metaid = ctx.metaid(value),
            "id" => self.id = ctx.sid(value),
            "name" => self.name = ctx.string(name, value),
            "baseStyle" => {
                self.base_style = ctx.sid_ref(name, value, SedErrorCode::StyleBaseStyleMustBeStyle)
            }
            _ => {}
        }
    }

    fn write_attributes(&self, start: &mut BytesStart<'static>) {
        marshal::push_str(start, "metaid", &self.metaid);
        marshal::push_str(start, "id", &self.id);
        marshal::push_str(start, "name", &self.name);
        marshal::push_str(start, "baseStyle", &self.base_style);
    }

    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        match tag {
            "line" => Some(self.line.insert(SedLine::default()) as &mut dyn SedElement),
            "marker" => Some(self.marker.insert(SedMarker::default()) as &mut dyn SedElement),
            "fill" => Some(self.fill.insert(SedFill::default()) as &mut dyn SedElement),
            _ => None,
        }
    }

    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        writer::write_child(w, &self.line)?;
        writer::write_child(w, &self.marker)?;
        writer::write_child(w, &self.fill)
    }

    fn has_children(&self) -> bool {
        self.line.is_some() || self.marker.is_some() || self.fill.is_some()
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

sed_list_item!(SedStyle, "style", "listOfStyles");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_facets_are_created_in_place() {
        let mut style = SedStyle::new();
        style.set_id("dashed_red");
        style.create_child("line").expect("line slot");
        style.create_child("fill").expect("fill slot");
        assert!(style.create_child("shadow").is_none());

        assert!(style.line().is_some());
        assert!(style.marker().is_none());
        assert!(style.has_children());
    }

    #[test]
    fn unknown_marker_token_is_present_but_not_set() {
        let mut marker = SedMarker::new();
        marker.set_marker_type(MarkerType::from_xml_str("starfish"));
        assert!(!marker.is_set_marker_type());
        assert_eq!(marker.marker_type(), Some(MarkerType::Invalid));
    }
}
