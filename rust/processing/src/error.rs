// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for processing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building domain elements
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing geometry: {0}")]
    MissingGeometry(String),

    #[error(transparent)]
    Degenerate(#[from] ifc_slicer_geometry::Error),

    #[error(transparent)]
    Core(#[from] ifc_slicer_core::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn missing(msg: impl Into<String>) -> Self {
        Error::MissingGeometry(msg.into())
    }

    /// Failure category reported for this error
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::MissingGeometry(_) => FailureKind::MissingGeometry,
            Error::Degenerate(_) => FailureKind::Degenerate,
            Error::Core(_) | Error::Serialization(_) => FailureKind::Unreadable,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Why typed extraction of an element failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required representation, point list or layer set is absent
    MissingGeometry,
    /// Geometry exists but is degenerate (zero-length axis, bad depth, ...)
    Degenerate,
    /// Element fields could not be read
    Unreadable,
    /// No extractor is registered for the element's type
    Unsupported,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::MissingGeometry => "missing geometry",
            FailureKind::Degenerate => "degenerate geometry",
            FailureKind::Unreadable => "unreadable element",
            FailureKind::Unsupported => "unsupported type",
        };
        f.write_str(name)
    }
}

/// A per-element extraction failure
///
/// Failures never abort a classification pass; they are collected next to the
/// category map for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    /// Element identifier, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,
    /// Declared type name, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub kind: FailureKind,
    pub message: String,
}

impl ExtractionFailure {
    pub fn new(
        global_id: Option<&str>,
        type_name: Option<&str>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            global_id: global_id.map(String::from),
            type_name: type_name.map(String::from),
            kind,
            message: message.into(),
        }
    }

    pub fn from_error(global_id: Option<&str>, type_name: Option<&str>, error: &Error) -> Self {
        Self::new(global_id, type_name, error.kind(), error.to_string())
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}: {}",
            self.global_id.as_deref().unwrap_or("?"),
            self.type_name.as_deref().unwrap_or("?"),
            self.kind,
            self.message
        )
    }
}

impl std::error::Error for ExtractionFailure {}
