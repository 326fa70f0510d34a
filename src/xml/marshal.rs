//! The attribute marshaller.
//!
//! [`AttrContext`] is handed to every element while its attributes are being
//! read. It performs the typed conversions (string, SId, SIdRef, integer,
//! double, boolean, enumeration) and logs each anomaly to the document's
//! error log with the schema's diagnostic code — parsing never fails over a
//! bad attribute, it stores the type's sentinel and keeps going.
//!
//! The writing half is a set of small helpers that emit only set slots,
//! with full-precision doubles and `true`/`false` booleans.

use quick_xml::events::BytesStart;

use crate::error::{SedError, SedErrorCode, SedErrorLog, SedSeverity};
use crate::schema::types::SedEnum;
use crate::validation::identifiers::{is_valid_metaid, is_valid_sid};

/// Per-element attribute-reading context: the log plus enough location
/// information for useful messages.
pub struct AttrContext<'a> {
    log: &'a mut SedErrorLog,
    element: &'static str,
    line: u64,
    column: u64,
}

impl<'a> AttrContext<'a> {
    pub(crate) fn new(
        log: &'a mut SedErrorLog,
        element: &'static str,
        line: u64,
        column: u64,
    ) -> Self {
        Self {
            log,
            element,
            line,
            column,
        }
    }

    pub(crate) fn log(&mut self, code: SedErrorCode, severity: SedSeverity, message: String) {
        self.log.add(SedError::new(
            code,
            severity,
            message,
            Some(self.line),
            Some(self.column),
        ));
    }

    pub(crate) fn log_unknown_attribute(&mut self, code: SedErrorCode, name: &str) {
        let message = format!(
            "Unknown attribute '{name}' on <{}>; it has been ignored.",
            self.element
        );
        self.log(code, SedSeverity::Error, message);
    }

    /// Plain optional string. An empty token is treated as unset and
    /// flagged, because SED-ML distinguishes "absent" from "empty".
    pub fn string(&mut self, name: &str, value: &str) -> Option<String> {
        if value.is_empty() {
            let message = format!("The {name} attribute on <{}> is empty.", self.element);
            self.log(SedErrorCode::NotSchemaConformant, SedSeverity::Warning, message);
            return None;
        }
        Some(value.to_owned())
    }

    /// An `id`-typed attribute: syntax-checked against the SId rules, but
    /// the raw token is stored regardless so the tree stays inspectable.
    pub fn sid(&mut self, value: &str) -> Option<String> {
        if value.is_empty() {
            let message = format!("The id attribute on <{}> is empty.", self.element);
            self.log(SedErrorCode::IdSyntaxRule, SedSeverity::Error, message);
            return None;
        }
        if !is_valid_sid(value) {
            let message = format!(
                "The id '{value}' on <{}> does not conform to the SId syntax.",
                self.element
            );
            self.log(SedErrorCode::IdSyntaxRule, SedSeverity::Error, message);
        }
        Some(value.to_owned())
    }

    /// A reference to another element's id. A syntactically invalid
    /// reference logs the targeted code but the raw string is still stored;
    /// whether the target exists is checked later by validation.
    pub fn sid_ref(&mut self, name: &str, value: &str, code: SedErrorCode) -> Option<String> {
        if value.is_empty() {
            let message = format!("The {name} attribute on <{}> is empty.", self.element);
            self.log(code, SedSeverity::Error, message);
            return None;
        }
        if !is_valid_sid(value) {
            let message = format!(
                "The {name} attribute on <{}> is '{value}', which does not conform to the \
                 SId syntax.",
                self.element
            );
            self.log(code, SedSeverity::Error, message);
        }
        Some(value.to_owned())
    }

    /// The `metaid` core attribute (an XML ID).
    pub fn metaid(&mut self, value: &str) -> Option<String> {
        if value.is_empty() {
            return None;
        }
        if !is_valid_metaid(value) {
            let message = format!(
                "The metaid '{value}' on <{}> does not conform to the XML ID syntax.",
                self.element
            );
            self.log(SedErrorCode::InvalidMetaidSyntax, SedSeverity::Error, message);
        }
        Some(value.to_owned())
    }

    pub fn int(&mut self, name: &str, value: &str, code: SedErrorCode) -> Option<i32> {
        match value.parse::<i32>() {
            Ok(v) => Some(v),
            Err(_) => {
                let message = format!(
                    "The {name} attribute on <{}> is '{value}', which is not an integer.",
                    self.element
                );
                self.log(code, SedSeverity::Error, message);
                None
            }
        }
    }

    pub fn uint(&mut self, name: &str, value: &str, code: SedErrorCode) -> Option<u32> {
        match value.parse::<u32>() {
            Ok(v) => Some(v),
            Err(_) => {
                let message = format!(
                    "The {name} attribute on <{}> is '{value}', which is not a non-negative \
                     integer.",
                    self.element
                );
                self.log(code, SedSeverity::Error, message);
                None
            }
        }
    }

    pub fn double(&mut self, name: &str, value: &str, code: SedErrorCode) -> Option<f64> {
        match parse_double(value) {
            Some(v) => Some(v),
            None => {
                let message = format!(
                    "The {name} attribute on <{}> is '{value}', which is not a double.",
                    self.element
                );
                self.log(code, SedSeverity::Error, message);
                None
            }
        }
    }

    pub fn boolean(&mut self, name: &str, value: &str, code: SedErrorCode) -> Option<bool> {
        match value {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => {
                let message = format!(
                    "The {name} attribute on <{}> is '{value}', which is not a boolean.",
                    self.element
                );
                self.log(code, SedSeverity::Error, message);
                None
            }
        }
    }

    /// An enumerated attribute. A token outside the string table still
    /// stores the `Invalid` sentinel, so presence stays observable, and the
    /// "must be <EnumType>" diagnostic is logged.
    pub fn enumeration<T: SedEnum>(
        &mut self,
        name: &str,
        value: &str,
        code: SedErrorCode,
    ) -> Option<T> {
        let parsed = T::from_xml_str(value);
        if parsed.as_xml_str().is_none() {
            let message = format!(
                "The {name} attribute on <{}> is '{value}', which is not a known \
                 enumeration value.",
                self.element
            );
            self.log(code, SedSeverity::Error, message);
        }
        Some(parsed)
    }
}

/// Parses a schema double, accepting the XML Schema spellings of the
/// special values.
pub(crate) fn parse_double(value: &str) -> Option<f64> {
    match value {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        _ => value.parse::<f64>().ok(),
    }
}

/// Formats a double with full round-trip precision, using the XML Schema
/// spellings for the special values.
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value == f64::INFINITY {
        "INF".to_owned()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_owned()
    } else {
        value.to_string()
    }
}

/// Emits an optional string attribute if set.
pub(crate) fn push_str(start: &mut BytesStart<'static>, name: &str, value: &Option<String>) {
    if let Some(v) = value {
        start.push_attribute((name, v.as_str()));
    }
}

/// Emits an optional integer attribute if set.
pub(crate) fn push_int(start: &mut BytesStart<'static>, name: &str, value: &Option<i32>) {
    if let Some(v) = value {
        start.push_attribute((name, v.to_string().as_str()));
    }
}

/// Emits an optional unsigned-integer attribute if set.
pub(crate) fn push_uint(start: &mut BytesStart<'static>, name: &str, value: &Option<u32>) {
    if let Some(v) = value {
        start.push_attribute((name, v.to_string().as_str()));
    }
}

/// Emits an optional double attribute if set, full precision.
pub(crate) fn push_double(start: &mut BytesStart<'static>, name: &str, value: &Option<f64>) {
    if let Some(v) = value {
        start.push_attribute((name, format_double(*v).as_str()));
    }
}

/// Emits an optional boolean attribute if set, as `true`/`false`.
pub(crate) fn push_bool(start: &mut BytesStart<'static>, name: &str, value: &Option<bool>) {
    if let Some(v) = value {
        start.push_attribute((name, if *v { "true" } else { "false" }));
    }
}

/// Emits an enumerated attribute if set to a known value; the `Invalid`
/// sentinel is never written.
pub(crate) fn push_enum<T: SedEnum>(
    start: &mut BytesStart<'static>,
    name: &str,
    value: &Option<T>,
) {
    if let Some(text) = value.as_ref().and_then(SedEnum::as_xml_str) {
        start.push_attribute((name, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_round_trip_including_specials() {
        for v in [0.0, 1.0, -2.5, 1e-9, 3.141592653589793] {
            let text = format_double(v);
            assert_eq!(parse_double(&text), Some(v));
        }
        assert_eq!(format_double(f64::INFINITY), "INF");
        assert_eq!(parse_double("-INF"), Some(f64::NEG_INFINITY));
        assert!(parse_double("NaN").is_some_and(f64::is_nan));
        assert!(parse_double("bogus").is_none());
    }

    #[test]
    fn bad_int_logs_and_returns_none() {
        let mut log = SedErrorLog::default();
        let mut ctx = AttrContext::new(&mut log, "subTask", 4, 2);

        let parsed = ctx.int("order", "first", SedErrorCode::SubTaskOrderMustBeInteger);
        assert!(parsed.is_none());
        assert_eq!(log.num_errors(), 1);
        assert_eq!(log.error(0).map(|e| e.error_id()), Some(23204));
        assert_eq!(log.error(0).and_then(|e| e.line()), Some(4));
    }

    #[test]
    fn invalid_sidref_is_logged_but_kept() {
        let mut log = SedErrorLog::default();
        let mut ctx = AttrContext::new(&mut log, "task", 1, 1);

        let kept = ctx.sid_ref(
            "modelReference",
            "1model",
            SedErrorCode::TaskModelReferenceMustBeModel,
        );
        assert_eq!(kept.as_deref(), Some("1model"));
        assert!(log.contains(SedErrorCode::TaskModelReferenceMustBeModel));
    }

    #[test]
    fn empty_sidref_is_unset() {
        let mut log = SedErrorLog::default();
        let mut ctx = AttrContext::new(&mut log, "task", 1, 1);

        let kept = ctx.sid_ref(
            "modelReference",
            "",
            SedErrorCode::TaskModelReferenceMustBeModel,
        );
        assert!(kept.is_none());
        assert_eq!(log.num_errors(), 1);
    }
}
