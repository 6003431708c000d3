// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for raw element access
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the raw element accessor layer
#[derive(Error, Debug)]
pub enum Error {
    /// The element's fields cannot be read at all
    #[error("Unreadable element: {reason}")]
    UnreadableElement { reason: String },

    /// A single attribute exists but does not have the expected shape
    #[error("Malformed attribute '{attribute}': {reason}")]
    MalformedAttribute { attribute: String, reason: String },

    /// The input collection itself is structurally invalid
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Error::UnreadableElement {
            reason: reason.into(),
        }
    }

    pub fn malformed(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}
