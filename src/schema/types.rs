//! SED-ML enumerated attribute types.
//!
//! Each enumeration carries an explicit `Invalid` sentinel: an attribute
//! token outside the string table is stored as `Invalid` (so the slot still
//! reads as present) and is never written back to XML. The string tables
//! are the schema's, verbatim.

/// Shared behavior of the enumerated attribute types; implemented by the
/// `sed_enum!` macro.
pub trait SedEnum: Copy {
    fn from_xml_str(s: &str) -> Self;
    fn as_xml_str(&self) -> Option<&'static str>;

    /// False for the `Invalid` sentinel.
    fn is_known(&self) -> bool {
        self.as_xml_str().is_some()
    }
}

sed_enum! {
    /// Scale of a plot axis.
    AxisType {
        Linear => "linear",
        Log10 => "log10",
    }
}

sed_enum! {
    /// Dash pattern of a styled line.
    LineType {
        None => "none",
        Solid => "solid",
        Dash => "dash",
        Dot => "dot",
        DashDot => "dashDot",
        DashDotDot => "dashDotDot",
    }
}

sed_enum! {
    /// Marker glyph of a styled curve.
    MarkerType {
        None => "none",
        Square => "square",
        Circle => "circle",
        Diamond => "diamond",
        XCross => "xCross",
        Plus => "plus",
        Star => "star",
        TriangleUp => "triangleUp",
        TriangleDown => "triangleDown",
        TriangleLeft => "triangleLeft",
        TriangleRight => "triangleRight",
        HDash => "hDash",
        VDash => "vDash",
    }
}

sed_enum! {
    /// Rendering of a 2D curve.
    CurveType {
        Points => "points",
        Bar => "bar",
        BarStacked => "barStacked",
        HorizontalBar => "horizontalBar",
        HorizontalBarStacked => "horizontalBarStacked",
    }
}

sed_enum! {
    /// Rendering of a 3D surface.
    SurfaceType {
        ParametricCurve => "parametricCurve",
        SurfaceMesh => "surfaceMesh",
        SurfaceContour => "surfaceContour",
        Contour => "contour",
        HeatMap => "heatMap",
        StackedCurves => "stackedCurves",
        Bar => "bar",
    }
}

sed_enum! {
    /// Role of a fit mapping in a parameter-estimation experiment.
    MappingType {
        Time => "time",
        ExperimentalCondition => "experimentalCondition",
        Observable => "observable",
    }
}

sed_enum! {
    /// Kind of a fit experiment.
    ExperimentType {
        SteadyState => "steadyState",
        TimeCourse => "timeCourse",
    }
}

sed_enum! {
    /// Scale of an adjustable parameter's bounds.
    ScaleType {
        Linear => "linear",
        Log => "log",
        Log10 => "log10",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens_round_trip() {
        assert_eq!(AxisType::from_xml_str("log10"), AxisType::Log10);
        assert_eq!(AxisType::Log10.as_xml_str(), Some("log10"));
        assert_eq!(MarkerType::from_xml_str("triangleUp"), MarkerType::TriangleUp);
        assert_eq!(
            CurveType::HorizontalBarStacked.as_xml_str(),
            Some("horizontalBarStacked")
        );
        assert_eq!(
            MappingType::from_xml_str("experimentalCondition"),
            MappingType::ExperimentalCondition
        );
    }

    #[test]
    fn unknown_tokens_become_invalid() {
        assert_eq!(AxisType::from_xml_str("bogus"), AxisType::Invalid);
        // Matching is case-sensitive, like the schema.
        assert_eq!(AxisType::from_xml_str("Linear"), AxisType::Invalid);
        assert!(AxisType::Invalid.as_xml_str().is_none());
        assert!(!AxisType::Invalid.is_known());
    }

    #[test]
    fn display_uses_the_xml_token() {
        assert_eq!(LineType::DashDotDot.to_string(), "dashDotDot");
        assert_eq!(LineType::Invalid.to_string(), "invalid");
    }
}
