//! The shared element contract.
//!
//! Every concrete SED-ML type implements [`SedElement`], which carries the
//! full XML contract for one element: its tag name and typecode, the set of
//! attributes a parser should accept, the typed attribute reader/writer, and
//! the child-dispatch hooks that let the generic reader and writer recurse
//! through the tree without per-type special cases at the call site.
//!
//! The trait is object-safe on purpose: the reader works on
//! `&mut dyn SedElement`, so one driver loop serves all ~40 element types.

use quick_xml::events::BytesStart;
use serde::{Deserialize, Serialize};

use crate::error::{SedErrorCode, SedIoError};
use crate::xml::marshal::AttrContext;
use crate::xml::writer::XmlWriter;

/// Numeric tag identifying an element's concrete schema type; used by
/// generic traversal code instead of downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SedTypeCode {
    Document,
    Model,
    ChangeAttribute,
    AddXml,
    ChangeXml,
    RemoveXml,
    ComputeChange,
    UniformTimeCourse,
    OneStep,
    SteadyState,
    Analysis,
    Algorithm,
    AlgorithmParameter,
    Task,
    RepeatedTask,
    ParameterEstimationTask,
    SubTask,
    SetValue,
    UniformRange,
    VectorRange,
    FunctionalRange,
    DataRange,
    DataGenerator,
    Variable,
    AppliedDimension,
    Parameter,
    Report,
    Plot2D,
    Plot3D,
    Figure,
    SubPlot,
    Curve,
    ShadedArea,
    Surface,
    DataSet,
    Axis,
    Style,
    Line,
    Marker,
    Fill,
    DataDescription,
    DataSource,
    Slice,
    FitExperiment,
    FitMapping,
    AdjustableParameter,
    Bounds,
    LeastSquareObjectiveFunction,
    ExperimentReference,
    ListOf,
}

/// An opaque MathML expression.
///
/// The library does not interpret math; it stores the raw inner XML of the
/// `<math>` element and writes it back verbatim under the canonical MathML
/// namespace. Deep-copied with `Clone`, single-owned like every other child.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MathML(String);

impl MathML {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// The raw inner XML of the `<math>` element.
    pub fn content(&self) -> &str {
        &self.0
    }
}

/// An opaque literal-XML payload, as carried by `newXML` on the
/// `addXML`/`changeXML` model changes and by `dimensionDescription` on data
/// descriptions (NuML content the library does not interpret).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XmlFragment(String);

impl XmlFragment {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn content(&self) -> &str {
        &self.0
    }
}

/// The per-element XML contract. See the module docs.
///
/// Methods with defaults cover the common case (no children, nothing
/// required); concrete types override exactly what their schema declares.
pub trait SedElement {
    /// The element's XML tag name. Usually fixed per type; a few types
    /// (axes) take their tag from the slot they occupy.
    fn element_name(&self) -> &'static str;

    fn type_code(&self) -> SedTypeCode;

    /// The diagnostic code logged when an unknown attribute appears on this
    /// element.
    fn allowed_attributes_code(&self) -> SedErrorCode {
        SedErrorCode::UnknownCoreAttribute
    }

    /// Attribute names the parser accepts on this element. Anything else in
    /// the XML is logged as an unknown attribute.
    fn expected_attributes(&self) -> &'static [&'static str];

    /// Parses one attribute token into its typed slot, logging anomalies
    /// through `ctx`. Called only for names in [`expected_attributes`].
    ///
    /// [`expected_attributes`]: SedElement::expected_attributes
    fn read_attribute(&mut self, name: &str, value: &str, ctx: &mut AttrContext<'_>);

    /// Emits the attributes whose slots are set, in schema order.
    fn write_attributes(&self, start: &mut BytesStart<'static>);

    /// Tag-dispatched child construction: returns the freshly created (or
    /// in-place) child for `tag`, or `None` when the tag does not belong to
    /// this element. The reader recurses into whatever is returned.
    fn create_child(&mut self, tag: &str) -> Option<&mut dyn SedElement> {
        let _ = tag;
        None
    }

    /// True when `tag` is an opaque child whose inner XML should be
    /// captured verbatim (math, literal-XML payloads).
    fn wants_raw_child(&self, tag: &str) -> bool {
        let _ = tag;
        false
    }

    fn store_raw_child(&mut self, tag: &str, raw: &str) {
        let _ = (tag, raw);
    }

    /// True when `tag` is a text-content child (e.g. `<value>` under
    /// `vectorRange`).
    fn wants_text_child(&self, tag: &str) -> bool {
        let _ = tag;
        false
    }

    fn read_text_child(&mut self, tag: &str, text: &str, ctx: &mut AttrContext<'_>) {
        let _ = (tag, text, ctx);
    }

    /// Writes the child elements in document order. List containers are
    /// only written when non-empty.
    fn write_children(&self, w: &mut XmlWriter) -> Result<(), SedIoError> {
        let _ = w;
        Ok(())
    }

    /// True when the element has any children to write; childless elements
    /// are emitted in empty-element form.
    fn has_children(&self) -> bool {
        false
    }

    /// Pure predicate: all schema-required attributes are set. Not
    /// consulted by read/write; used by validation and by container
    /// insertion checks.
    fn has_required_attributes(&self) -> bool {
        true
    }

    /// Pure predicate: all schema-required child elements are present.
    fn has_required_elements(&self) -> bool {
        true
    }

    /// The element's `id` attribute, if the type declares one and it is set.
    fn id(&self) -> Option<&str> {
        None
    }

    /// The (level, version) in which this element type first appeared.
    /// Document-level `add_*` operations reject children newer than the
    /// document.
    fn first_introduced(&self) -> (u32, u32) {
        (1, 1)
    }

    /// Receives `xmlns` / `xmlns:prefix` declarations seen on this
    /// element's start tag. Only the document root stores them.
    fn read_namespace_decl(&mut self, prefix: Option<&str>, uri: &str) {
        let _ = (prefix, uri);
    }
}
