//! Error types for record construction and functional group validation.
//!
//! Attribute resolution itself never fails: absence is reported through an
//! invalid [`Value`](crate::Value) or [`Tag::UNRESOLVED`](crate::Tag::UNRESOLVED).

use thiserror::Error;

use crate::model::Tag;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error while building or addressing a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("instance {instance} out of range (record has {count} instances)")]
    InstanceOutOfRange { instance: usize, count: usize },

    #[error("no free private creator block in group {group:04X} for {creator:?}")]
    PrivateBlocksExhausted { group: u16, creator: String },

    #[error("invalid tag {input:?}: expected gggg,eeee in hex")]
    InvalidTag { input: String },

    #[error("invalid tag path {input:?}")]
    InvalidPath { input: String },

    #[error("{tag} is not a sequence")]
    NotASequence { tag: Tag },
}

/// Structural problem with the functional groups of a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("per-frame functional groups present without shared functional groups")]
    MissingSharedGroups,

    #[error("shared functional groups present without per-frame functional groups")]
    MissingPerFrameGroups,

    #[error("shared functional groups must hold exactly one item, found {count}")]
    SharedGroupItemCount { count: usize },

    #[error("NumberOfFrames is {declared:?} but per-frame functional groups hold {items} items")]
    FrameCountMismatch { declared: Option<i64>, items: usize },
}
