//! dicom-frames: frame-indexed attribute resolution for DICOM metadata.
//!
//! Enhanced multi-frame DICOM objects store per-frame attributes in
//! functional groups instead of the top level of the record. This crate
//! provides a view over such records that answers "what is attribute X for
//! frame N", applying the override precedence between per-frame groups,
//! shared groups, the base record, and vendor-private sequences.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use dicom_frames::{tags, FrameResolver, Item, MetaData, Tag, Value};
//!
//! let mut meta = MetaData::new();
//! meta.set(tags::MODALITY, "MR");
//! meta.set(tags::NUMBER_OF_FRAMES, Value::int(2));
//! meta.set(tags::SHARED_FUNCTIONAL_GROUPS_SEQUENCE, Item::new());
//! meta.set(
//!     tags::PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE,
//!     Value::sequence([
//!         Item::new().with(tags::WINDOW_CENTER, Value::int(40)),
//!         Item::new().with(tags::WINDOW_CENTER, Value::int(60)),
//!     ]),
//! );
//!
//! let resolver = FrameResolver::new(Arc::new(meta));
//! assert_eq!(resolver.get(1, tags::WINDOW_CENTER).as_int(), Some(60));
//! assert_eq!(resolver.get(1, tags::MODALITY).as_str(), Some("MR"));
//! assert_eq!(
//!     resolver.resolve_private_tag(0, Tag::new(0x0029, 0x0010), "NOBODY"),
//!     Tag::UNRESOLVED
//! );
//! ```
//!
//! # Modules
//!
//! - [`model`]: Record types (Tag, Value, Item, MetaData, TagPath)
//! - [`resolver`]: The frame-indexed view and its options
//! - [`validate`]: Functional group consistency checks
//! - [`tags`]: Well-known tags
//! - [`error`]: Error types
//!
//! # Logging
//!
//! Resolver construction is logged at `debug` level and private-sequence
//! fallbacks at `trace` level through [`tracing`]. The crate installs no
//! subscriber.

pub mod error;
pub mod model;
pub mod resolver;
pub mod tags;
pub mod validate;

// Re-export commonly used types at crate root
pub use error::{Error, Result, ValidationError};
pub use model::{Element, Item, MetaData, Tag, TagPath, Value};
pub use resolver::{FrameResolver, ResolverOptions};
pub use validate::validate_functional_groups;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
