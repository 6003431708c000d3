// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in geometry primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Zero-length vector normalization, non-positive radius, ...
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

impl Error {
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Error::DegenerateGeometry(msg.into())
    }
}
