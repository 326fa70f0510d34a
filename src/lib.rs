//! SED-ML Rust Library
//!
//! This library provides an in-memory object model and XML (de)serialization
//! for SED-ML (Simulation Experiment Description Markup Language) documents,
//! including:
//! - The complete Level 1 element inventory (models, simulations, tasks,
//!   data generators, outputs, styles, data descriptions, fit experiments)
//! - Lossless XML round-trip through quick-xml
//! - A best-effort parser that accumulates diagnostics instead of aborting
//! - Schema validation (required attributes, identifier syntax,
//!   cross-reference targets) with libSEDML-compatible error codes
//!
//! The library performs no simulation, integration, or plotting; its only
//! job is the structural mapping between an owned element tree and an XML
//! document conforming to the SED-ML schema.

#![warn(unused_imports)]

#[macro_use]
mod macros;

/// Shared element behavior: the `SedElement` trait, typecodes, and the
/// opaque MathML / XML-fragment wrappers.
pub mod core;

/// Generic ordered, owning child containers (the `listOf…` pattern).
pub mod collections;

/// Diagnostic codes, severities, the per-document error log, and the
/// API-level error enums.
pub mod error;

/// SED-ML namespace URIs and the level/version table.
pub mod namespaces;

/// File and string entry points for reading and writing documents.
pub mod io;

/// The SED-ML element structs, one module per schema cluster.
pub mod schema {
    pub mod datadesc;
    pub mod datagen;
    pub mod document;
    pub mod fit;
    pub mod model;
    pub mod output;
    pub mod simulation;
    pub mod style;
    pub mod task;
    pub mod types;
}

/// Post-parse semantic validation of a document.
pub mod validation {
    pub use self::validator::validate_document;

    pub mod attributes;
    pub mod identifiers;
    pub mod references;
    pub mod validator;
}

/// XML marshalling: the attribute reader/writer, the recursive-descent
/// event driver, and the document writer.
pub mod xml {
    pub(crate) mod marshal;
    pub(crate) mod reader;
    pub mod writer;

    pub use self::marshal::AttrContext;
    pub use self::writer::XmlWriter;
}

/// Commonly used types and functionality re-exported for convenience
pub mod prelude {
    pub use crate::collections::{SedListItem, SedListOf};
    pub use crate::core::{MathML, SedElement, SedTypeCode, XmlFragment};
    pub use crate::error::{
        SedError, SedErrorCode, SedErrorLog, SedIoError, SedOperationError, SedSeverity,
    };
    pub use crate::io::{
        read_sedml_file, read_sedml_string, write_json_string, write_sedml_file,
        write_sedml_string,
    };
    pub use crate::namespaces::{sedml_namespace_uri, SEDML_DEFAULT_LEVEL, SEDML_DEFAULT_VERSION};
    pub use crate::schema::datadesc::*;
    pub use crate::schema::datagen::*;
    pub use crate::schema::document::*;
    pub use crate::schema::fit::*;
    pub use crate::schema::model::*;
    pub use crate::schema::output::*;
    pub use crate::schema::simulation::*;
    pub use crate::schema::style::*;
    pub use crate::schema::task::*;
    pub use crate::schema::types::*;
    pub use crate::validation::validate_document;
}
