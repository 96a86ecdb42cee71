//! Data model types for DICOM metadata.
//!
//! This module contains the in-memory record types the resolver reads:
//! - Tags (attribute identifiers)
//! - Values (absent, scalar, or sequence)
//! - Items (nested records inside sequences)
//! - MetaData (the base record, one or more instances)
//! - Tag paths (addresses of nested attributes)

pub mod item;
pub mod meta;
pub mod path;
pub mod tag;
pub mod value;

pub use item::Item;
pub use meta::{Element, MetaData};
pub use path::TagPath;
pub use tag::Tag;
pub use value::Value;
