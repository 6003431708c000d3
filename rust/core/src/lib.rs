// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Slicer Core
//!
//! Backend-neutral access to raw building-model elements.
//!
//! The classification pipeline never touches a parsing engine's object model
//! directly. Engines implement [`RawElement`] and [`RawModel`] and hand out
//! plain records: representations with nested point structures, material
//! layer sets, and a serializable info record.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_slicer_core::{JsonModel, RawElement, RawModel, ElementType};
//!
//! let model = JsonModel::from_str(content)?;
//! for element in model.elements()? {
//!     let type_name = element.type_name()?;
//!     println!("{} -> {:?}", type_name, ElementType::parse(type_name));
//! }
//! ```

pub mod element;
pub mod error;
pub mod json;
pub mod schema;
pub mod value;

pub use element::{
    MaterialAssociation, MaterialLayerRecord, MaterialLayerSetRecord, RawElement, RawInfo,
    RawModel, Representation, RepresentationItem, CURVE_2D, SWEPT_SOLID,
};
pub use error::{Error, Result};
pub use json::{JsonElement, JsonModel, PointTable};
pub use schema::ElementType;
pub use value::{Coordinates, EntityId, RawValue};
