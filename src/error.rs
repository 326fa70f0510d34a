//! Diagnostics and error types.
//!
//! Two very different failure surfaces live here, and keeping them apart is
//! deliberate:
//! - [`SedErrorLog`] collects *schema diagnostics* produced while reading or
//!   validating a document. Parsing is best-effort: anomalies are logged and
//!   the parse continues with sentinel values, so callers always get a fully
//!   formed tree back and inspect the log afterwards.
//! - [`SedIoError`] and [`SedOperationError`] are ordinary Rust errors for
//!   I/O entry points and mutating container operations respectively.
//!
//! Diagnostic codes keep libSEDML's published numbers (as enum
//! discriminants) so `SedErrorCode::code()` stays bit-compatible with
//! tooling that consumes the numeric catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a logged diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SedSeverity {
    Warning,
    Error,
    Fatal,
    SchemaError,
}

/// Numeric diagnostic codes, bit-compatible with the libSEDML catalog.
///
/// Only the codes this crate actually emits are carried; the numeric ranges
/// follow the upstream convention (101xx namespace, 103xx identifiers,
/// 2xxxx per-element schema rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum SedErrorCode {
    Unknown = 10000,
    UnrecognizedElement = 10002,
    NotSchemaConformant = 10003,
    InvalidMathElement = 10201,

    NsUndeclared = 10101,
    ElementNotInNs = 10102,

    DuplicateComponentId = 10301,
    IdSyntaxRule = 10302,
    InvalidMetaidSyntax = 10303,

    DocumentAllowedAttributes = 20203,
    DocumentLevelMustBeNonNegativeInteger = 20205,
    DocumentVersionMustBeNonNegativeInteger = 20206,

    ModelAllowedAttributes = 20303,
    ModelSourceMustBeString = 20305,
    ModelLanguageMustBeString = 20307,

    ChangeAllowedAttributes = 20403,
    ChangeTargetMustBeString = 20404,
    AddXmlAllowedElements = 20503,
    ChangeAttributeAllowedAttributes = 20603,
    ChangeAttributeNewValueMustBeString = 20604,

    VariableAllowedAttributes = 20703,
    VariableTaskReferenceMustBeAbstractTask = 20707,
    VariableModelReferenceMustBeModel = 20708,

    ParameterAllowedAttributes = 20803,
    ParameterValueMustBeDouble = 20804,

    SimulationAllowedAttributes = 20903,

    UniformTimeCourseAllowedAttributes = 21003,
    UniformTimeCourseInitialTimeMustBeDouble = 21004,
    UniformTimeCourseOutputStartTimeMustBeDouble = 21005,
    UniformTimeCourseOutputEndTimeMustBeDouble = 21006,
    UniformTimeCourseNumberOfStepsMustBeInteger = 21008,

    AlgorithmAllowedAttributes = 21103,
    AlgorithmKisaoIdMustBeString = 21105,

    AbstractTaskAllowedAttributes = 21203,

    TaskAllowedAttributes = 21303,
    TaskModelReferenceMustBeModel = 21304,
    TaskSimulationReferenceMustBeSimulation = 21305,

    DataGeneratorAllowedAttributes = 21403,

    OutputAllowedAttributes = 21503,

    PlotAllowedAttributes = 21603,
    PlotLegendMustBeBoolean = 21605,
    PlotHeightMustBeDouble = 21606,
    PlotWidthMustBeDouble = 21607,

    AbstractCurveAllowedAttributes = 21903,
    AbstractCurveLogXMustBeBoolean = 21905,
    AbstractCurveOrderMustBeInteger = 21906,
    AbstractCurveStyleMustBeStyle = 21907,
    AbstractCurveXDataReferenceMustBeDataGenerator = 21909,

    CurveAllowedAttributes = 22003,
    CurveYDataReferenceMustBeDataGenerator = 22004,
    CurveLogYMustBeBoolean = 22005,
    CurveTypeMustBeCurveTypeEnum = 22006,

    SurfaceAllowedAttributes = 22103,
    SurfaceZDataReferenceMustBeDataGenerator = 22104,
    SurfaceXDataReferenceMustBeDataGenerator = 22106,
    SurfaceYDataReferenceMustBeDataGenerator = 22107,
    SurfaceTypeMustBeSurfaceTypeEnum = 22108,
    SurfaceStyleMustBeStyle = 22109,
    SurfaceLogZMustBeBoolean = 22112,

    DataSetAllowedAttributes = 22203,
    DataSetDataReferenceMustBeDataGenerator = 22205,

    AlgorithmParameterAllowedAttributes = 22403,
    AlgorithmParameterValueMustBeString = 22406,

    SetValueAllowedAttributes = 22803,
    SetValueModelReferenceMustBeModel = 22805,
    SetValueRangeMustBeRange = 22808,

    UniformRangeAllowedAttributes = 22903,
    UniformRangeStartMustBeDouble = 22904,
    UniformRangeEndMustBeDouble = 22905,
    UniformRangeNumberOfStepsMustBeInteger = 22906,

    VectorRangeAllowedAttributes = 23003,
    VectorRangeValueMustBeDoubleList = 23004,

    FunctionalRangeAllowedAttributes = 23103,
    FunctionalRangeRangeMustBeRange = 23105,

    SubTaskAllowedAttributes = 23203,
    SubTaskOrderMustBeInteger = 23204,
    SubTaskTaskMustBeAbstractTask = 23205,

    OneStepAllowedAttributes = 23303,
    OneStepStepMustBeDouble = 23304,

    RepeatedTaskAllowedAttributes = 23503,
    RepeatedTaskRangeMustBeRange = 23505,
    RepeatedTaskResetModelMustBeBoolean = 23506,
    RepeatedTaskConcatenateMustBeBoolean = 23513,

    DataDescriptionAllowedAttributes = 23703,

    DataSourceAllowedAttributes = 23803,
    DataSourceIndexSetMustBeSId = 23806,

    SliceAllowedAttributes = 23903,
    SliceReferenceMustBeSId = 23904,
    SliceIndexMustBeSId = 23906,
    SliceStartIndexMustBeInteger = 23907,
    SliceEndIndexMustBeInteger = 23908,

    AdjustableParameterAllowedAttributes = 24303,
    AdjustableParameterInitialValueMustBeDouble = 24305,
    AdjustableParameterModelReferenceMustBeModel = 24306,

    ExperimentReferenceAllowedAttributes = 24403,
    ExperimentReferenceMustBeFitExperiment = 24404,

    FitExperimentAllowedAttributes = 24503,
    FitExperimentTypeMustBeExperimentTypeEnum = 24505,

    FitMappingAllowedAttributes = 24603,
    FitMappingDataSourceMustBeDataSource = 24604,
    FitMappingTargetMustBeDataGenerator = 24605,
    FitMappingTypeMustBeMappingTypeEnum = 24606,
    FitMappingWeightMustBeDouble = 24607,
    FitMappingPointWeightMustBeDataSource = 24608,

    BoundsAllowedAttributes = 24703,
    BoundsLowerBoundMustBeDouble = 24704,
    BoundsUpperBoundMustBeDouble = 24705,
    BoundsScaleMustBeScaleTypeEnum = 24706,

    FigureAllowedAttributes = 24803,
    FigureNumRowsMustBeInteger = 24805,
    FigureNumColsMustBeInteger = 24806,

    SubPlotAllowedAttributes = 24903,
    SubPlotPlotMustBePlot = 24904,
    SubPlotRowMustBeInteger = 24905,
    SubPlotColMustBeInteger = 24906,
    SubPlotRowSpanMustBeInteger = 24907,
    SubPlotColSpanMustBeInteger = 24908,

    AxisAllowedAttributes = 25003,
    AxisTypeMustBeAxisTypeEnum = 25004,
    AxisMinMustBeDouble = 25005,
    AxisMaxMustBeDouble = 25006,
    AxisGridMustBeBoolean = 25007,
    AxisStyleMustBeStyle = 25008,
    AxisReverseMustBeBoolean = 25009,

    StyleAllowedAttributes = 25103,
    StyleBaseStyleMustBeStyle = 25105,

    LineAllowedAttributes = 25203,
    LineTypeMustBeLineTypeEnum = 25204,
    LineThicknessMustBeDouble = 25206,

    MarkerAllowedAttributes = 25303,
    MarkerSizeMustBeDouble = 25304,
    MarkerTypeMustBeMarkerTypeEnum = 25305,
    MarkerLineThicknessMustBeDouble = 25308,

    FillAllowedAttributes = 25403,

    AppliedDimensionAllowedAttributes = 25603,

    DataRangeAllowedAttributes = 25703,
    DataRangeSourceReferenceMustBeSId = 25704,

    ShadedAreaAllowedAttributes = 25903,
    ShadedAreaYDataReferenceFromMustBeDataGenerator = 25904,
    ShadedAreaYDataReferenceToMustBeDataGenerator = 25905,

    UnknownCoreAttribute = 99994,
}

impl SedErrorCode {
    /// The numeric code as published by libSEDML.
    pub fn code(&self) -> u32 {
        *self as u32
    }
}

/// One logged diagnostic: code, severity, human-readable message, and the
/// source location when the anomaly was detected during parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SedError {
    code: SedErrorCode,
    severity: SedSeverity,
    message: String,
    line: Option<u64>,
    column: Option<u64>,
}

impl SedError {
    pub fn new(
        code: SedErrorCode,
        severity: SedSeverity,
        message: impl Into<String>,
        line: Option<u64>,
        column: Option<u64>,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            line,
            column,
        }
    }

    pub fn code(&self) -> SedErrorCode {
        self.code
    }

    /// The numeric error id (libSEDML-compatible).
    pub fn error_id(&self) -> u32 {
        self.code.code()
    }

    pub fn severity(&self) -> SedSeverity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn column(&self) -> Option<u64> {
        self.column
    }
}

impl std::fmt::Display for SedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(l), Some(c)) => write!(
                f,
                "({}) [line {l}, column {c}] {}",
                self.code.code(),
                self.message
            ),
            _ => write!(f, "({}) {}", self.code.code(), self.message),
        }
    }
}

/// Accumulating diagnostic log owned by a [`SedDocument`].
///
/// [`SedDocument`]: crate::schema::document::SedDocument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SedErrorLog {
    errors: Vec<SedError>,
}

impl SedErrorLog {
    pub fn num_errors(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The nth logged diagnostic, in logging order.
    pub fn error(&self, n: usize) -> Option<&SedError> {
        self.errors.get(n)
    }

    pub fn errors(&self) -> &[SedError] {
        &self.errors
    }

    pub fn contains(&self, code: SedErrorCode) -> bool {
        self.errors.iter().any(|e| e.code() == code)
    }

    pub fn num_with_severity(&self, severity: SedSeverity) -> usize {
        self.errors.iter().filter(|e| e.severity() == severity).count()
    }

    pub(crate) fn add(&mut self, error: SedError) {
        self.errors.push(error);
    }

    pub(crate) fn extend(&mut self, errors: impl IntoIterator<Item = SedError>) {
        self.errors.extend(errors);
    }
}

/// Outcome of a mutating container or document operation that failed.
///
/// These mirror the fixed operation-return codes of the original C++ API;
/// successful operations return `Ok(())` instead of a success constant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SedOperationError {
    #[error("invalid attribute value")]
    InvalidAttributeValue,

    #[error("the object's SED-ML level does not match the document")]
    LevelMismatch,

    #[error("the object's SED-ML version does not match the document")]
    VersionMismatch,

    #[error("the object's namespaces do not match the document")]
    NamespacesMismatch,

    #[error("an object with id '{0}' already exists in this container")]
    DuplicateObjectId(String),

    #[error("the object is missing required attributes")]
    InvalidObject,

    #[error("the operation failed")]
    OperationFailed,
}

/// Errors from the I/O entry points. Everything here is unrecoverable at
/// the XML token level; recoverable schema problems go to the error log.
#[derive(Debug, Error)]
pub enum SedIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the input contains no root element")]
    MissingRoot,

    #[error("unexpected end of input inside <{0}>")]
    UnexpectedEof(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_keep_libsedml_numbers() {
        assert_eq!(SedErrorCode::NsUndeclared.code(), 10101);
        assert_eq!(SedErrorCode::DuplicateComponentId.code(), 10301);
        assert_eq!(SedErrorCode::DocumentLevelMustBeNonNegativeInteger.code(), 20205);
        assert_eq!(SedErrorCode::TaskModelReferenceMustBeModel.code(), 21304);
        assert_eq!(SedErrorCode::AxisTypeMustBeAxisTypeEnum.code(), 25004);
    }

    #[test]
    fn log_accumulates_in_order() {
        let mut log = SedErrorLog::default();
        log.add(SedError::new(
            SedErrorCode::IdSyntaxRule,
            SedSeverity::Error,
            "bad id",
            Some(3),
            Some(7),
        ));
        log.add(SedError::new(
            SedErrorCode::NsUndeclared,
            SedSeverity::Warning,
            "no namespace",
            None,
            None,
        ));

        assert_eq!(log.num_errors(), 2);
        assert_eq!(log.error(0).map(|e| e.error_id()), Some(10302));
        assert!(log.contains(SedErrorCode::NsUndeclared));
        assert_eq!(log.num_with_severity(SedSeverity::Warning), 1);
        assert!(log.error(2).is_none());
    }
}
