//! Frame-indexed attribute resolution over functional groups.
//!
//! Enhanced multi-frame objects keep most attributes in two functional group
//! sequences instead of the top level of the record:
//! - **SharedFunctionalGroupsSequence**: one item, applies to every frame
//! - **PerFrameFunctionalGroupsSequence**: one item per frame
//!
//! Each group item holds attributes directly, or nested one level down in
//! a macro sequence (e.g. PixelSpacing inside PixelMeasuresSequence).
//! Vendors add their own private macro sequences too.
//!
//! [`FrameResolver`] answers "what is attribute X for frame N" by searching,
//! in order:
//!
//! 1. the per-frame item for N, directly, then inside its public sequences
//! 2. the shared item, directly, then inside its public sequences
//! 3. the top level of the base record
//! 4. the first match found inside a private sequence in steps 1-2
//!
//! A match inside a private sequence is remembered while the search goes on,
//! so a vendor attribute can never shadow a public one, but remains
//! reachable when nothing else defines it.
//!
//! Records without functional groups are viewed "flat": frame N is simply
//! instance N of the base record.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use dicom_frames::{tags, FrameResolver, Item, MetaData, Value};
//!
//! let mut meta = MetaData::new();
//! meta.set(tags::NUMBER_OF_FRAMES, Value::int(2));
//! meta.set(
//!     tags::SHARED_FUNCTIONAL_GROUPS_SEQUENCE,
//!     Item::new().with(
//!         tags::PIXEL_MEASURES_SEQUENCE,
//!         Item::new().with(tags::PIXEL_SPACING, "0.5\\0.5"),
//!     ),
//! );
//! meta.set(
//!     tags::PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE,
//!     Value::sequence((0..2).map(|f| {
//!         Item::new().with(
//!             tags::FRAME_CONTENT_SEQUENCE,
//!             Item::new().with(tags::IN_STACK_POSITION_NUMBER, Value::int(f + 1)),
//!         )
//!     })),
//! );
//!
//! let resolver = FrameResolver::new(Arc::new(meta));
//! assert_eq!(resolver.frame_count(), 2);
//! assert_eq!(resolver.get(1, tags::IN_STACK_POSITION_NUMBER).as_int(), Some(2));
//! assert_eq!(resolver.get(1, tags::PIXEL_SPACING).as_str(), Some("0.5"));
//! assert!(!resolver.has(tags::NUMBER_OF_FRAMES));
//! ```

mod options;

pub use options::ResolverOptions;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::model::{Item, MetaData, Tag, TagPath, Value};
use crate::tags;

/// How a resolver maps frame numbers onto the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Frame N is instance `base_instance + N` of the record.
    Flat,
    /// Frame N is item N of the per-frame functional groups.
    PerFrame,
}

/// Outcome of searching the functional group items.
enum Found<T> {
    /// Found directly in a group item or inside a public sequence.
    Public(T),
    /// Only found inside a private sequence.
    Private(T),
    Missing,
}

/// A frame-indexed view of a metadata record.
///
/// The resolver shares ownership of the record and never modifies it.
/// Cloning is cheap: clones share the record and answer identically.
///
/// Lookups are defensive: a frame outside `0..frame_count()`, or a resolver
/// built without a record, yields the invalid value (or
/// [`Tag::UNRESOLVED`]) rather than panicking.
#[derive(Debug, Clone)]
pub struct FrameResolver {
    meta: Option<Arc<MetaData>>,
    mode: Mode,
    base_instance: usize,
    frame_count: usize,
    options: ResolverOptions,
}

impl Default for FrameResolver {
    fn default() -> Self {
        Self::empty()
    }
}

impl FrameResolver {
    /// Creates a resolver over a whole record.
    pub fn new(meta: Arc<MetaData>) -> Self {
        Self::with_options(Some(meta), None, ResolverOptions::default())
    }

    /// Creates a resolver over a single instance of a record.
    pub fn for_instance(meta: Arc<MetaData>, instance: usize) -> Self {
        Self::with_options(Some(meta), Some(instance), ResolverOptions::default())
    }

    /// Creates a resolver with no record. Every lookup reports absence.
    pub fn empty() -> Self {
        Self::with_options(None, None, ResolverOptions::default())
    }

    /// Creates a resolver with explicit options.
    ///
    /// `instance` selects a single instance of the record; `None` views the
    /// whole record.
    pub fn with_options(
        meta: Option<Arc<MetaData>>,
        instance: Option<usize>,
        options: ResolverOptions,
    ) -> Self {
        let base_instance = instance.unwrap_or(0);
        let Some(record) = meta.as_deref() else {
            return Self {
                meta: None,
                mode: Mode::Flat,
                base_instance,
                frame_count: 0,
                options,
            };
        };

        let shared = record.get(base_instance, tags::SHARED_FUNCTIONAL_GROUPS_SEQUENCE);
        let per_frame = record.get(base_instance, tags::PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE);

        let (mode, frame_count) = if is_group_sequence(shared) && is_group_sequence(per_frame) {
            let declared = record
                .get(base_instance, tags::NUMBER_OF_FRAMES)
                .as_int()
                .and_then(|n| usize::try_from(n).ok())
                .filter(|n| *n > 0);
            (Mode::PerFrame, declared.unwrap_or(per_frame.count()))
        } else if instance.is_some() {
            (Mode::Flat, 1)
        } else {
            (Mode::Flat, record.instance_count())
        };

        debug!(
            ?mode,
            frame_count,
            base_instance,
            instances = record.instance_count(),
            "created frame resolver"
        );

        Self {
            meta,
            mode,
            base_instance,
            frame_count,
            options,
        }
    }

    /// Returns the number of frames this resolver exposes.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Returns true if the record has functional groups.
    pub fn is_per_frame(&self) -> bool {
        self.mode == Mode::PerFrame
    }

    /// Returns the record instance the view starts at.
    pub fn base_instance(&self) -> usize {
        self.base_instance
    }

    /// Returns the options in effect.
    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// Returns the underlying record, if any.
    pub fn meta(&self) -> Option<&Arc<MetaData>> {
        self.meta.as_ref()
    }

    /// Returns the value of an attribute for a frame.
    ///
    /// Returns the invalid value if the attribute is not found anywhere.
    pub fn get(&self, frame: usize, tag: Tag) -> &Value {
        let Some(meta) = self.meta_for(frame) else {
            return Value::invalid();
        };
        if self.mode == Mode::Flat {
            return meta.get(self.base_instance + frame, tag);
        }
        if self.options.hide_number_of_frames && tag == tags::NUMBER_OF_FRAMES {
            return Value::invalid();
        }

        let found = self.search_groups(meta, frame, |item| {
            let value = item.get(tag);
            value.is_valid().then_some(value)
        });
        let private = match found {
            Found::Public(value) => return value,
            Found::Private(value) => Some(value),
            Found::Missing => None,
        };

        let value = meta.get(self.base_instance, tag);
        match private {
            Some(private) if !value.is_valid() => {
                trace!(%tag, frame, "using attribute from private sequence");
                private
            }
            _ => value,
        }
    }

    /// Returns the value of an attribute for the first frame.
    pub fn get_default(&self, tag: Tag) -> &Value {
        self.get(0, tag)
    }

    /// Returns true if the first frame has a valid value for the attribute.
    pub fn has(&self, tag: Tag) -> bool {
        self.get(0, tag).is_valid()
    }

    /// Follows a tag path for a frame.
    ///
    /// The head of the path is resolved through the functional groups like
    /// [`get`](Self::get); the remaining hops descend into that value.
    pub fn get_path(&self, frame: usize, path: &TagPath) -> &Value {
        path.hops()
            .try_fold(self.get(frame, path.head()), |value, (index, tag)| {
                value.items().get(index).map(|item| item.get(tag))
            })
            .unwrap_or(Value::invalid())
    }

    /// Resolves a private placeholder tag for a frame.
    ///
    /// Searches the same sources in the same order as [`get`](Self::get).
    /// Within a functional group item, a resolution only counts if the item
    /// also holds a value for the resolved tag. Returns [`Tag::UNRESOLVED`]
    /// if the creator has no block anywhere.
    pub fn resolve_private_tag(&self, frame: usize, ptag: Tag, creator: &str) -> Tag {
        let Some(meta) = self.meta_for(frame) else {
            return Tag::UNRESOLVED;
        };
        if self.mode == Mode::Flat {
            return meta.resolve_private_tag(self.base_instance + frame, ptag, creator);
        }

        let found = self.search_groups(meta, frame, |item| {
            let tag = item.resolve_private_tag(ptag, creator);
            (!tag.is_unresolved() && item.get(tag).is_valid()).then_some(tag)
        });
        let private = match found {
            Found::Public(tag) => return tag,
            Found::Private(tag) => tag,
            Found::Missing => Tag::UNRESOLVED,
        };

        let tag = meta.resolve_private_tag(self.base_instance, ptag, creator);
        if tag.is_unresolved() {
            if !private.is_unresolved() {
                trace!(%ptag, creator, frame, "using private tag from private sequence");
            }
            return private;
        }
        tag
    }

    /// Resolves a private placeholder tag for the first frame.
    pub fn resolve_private_tag_default(&self, ptag: Tag, creator: &str) -> Tag {
        self.resolve_private_tag(0, ptag, creator)
    }

    /// Returns the record if `frame` is in range.
    fn meta_for(&self, frame: usize) -> Option<&MetaData> {
        if frame >= self.frame_count {
            return None;
        }
        self.meta.as_deref()
    }

    /// Searches the per-frame item for `frame`, then the shared item.
    ///
    /// `probe` is tried on each group item, then on every nested item held
    /// by a single-item sequence in the group item. The first public hit is
    /// returned at once. The first hit inside a private sequence is held
    /// back as a fallback.
    fn search_groups<'a, T>(
        &self,
        meta: &'a MetaData,
        frame: usize,
        probe: impl Fn(&'a Item) -> Option<T>,
    ) -> Found<T> {
        let per_frame = meta
            .get(self.base_instance, tags::PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE)
            .items()
            .get(frame);
        let shared = meta
            .get(self.base_instance, tags::SHARED_FUNCTIONAL_GROUPS_SEQUENCE)
            .items()
            .first();

        let mut private = None;
        for group in per_frame.into_iter().chain(shared) {
            if let Some(hit) = probe(group) {
                return Found::Public(hit);
            }
            for (seq_tag, value) in group {
                let Some(hit) = value.single_item().and_then(&probe) else {
                    continue;
                };
                if !seq_tag.is_private() {
                    return Found::Public(hit);
                }
                if private.is_none() && self.options.private_fallback {
                    trace!(%seq_tag, frame, "found candidate in private sequence");
                    private = Some(hit);
                }
            }
        }

        match private {
            Some(hit) => Found::Private(hit),
            None => Found::Missing,
        }
    }
}

/// Returns true if a value can serve as a functional group sequence.
fn is_group_sequence(value: &Value) -> bool {
    value.is_sequence() && value.count() > 0
}
