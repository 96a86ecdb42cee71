//! Structural validation of functional groups.
//!
//! The resolver is lenient: a record with only one of the two functional
//! group sequences is simply viewed flat, and a missing NumberOfFrames is
//! tolerated. This module reports those inconsistencies for callers that
//! want to reject or warn about them.

use crate::error::ValidationError;
use crate::model::MetaData;
use crate::tags;

/// Validates the functional group layout of one instance of a record.
///
/// Checks that:
/// - the shared and per-frame sequences are either both present or both absent
/// - the shared sequence holds exactly one item
/// - NumberOfFrames matches the number of per-frame items
///
/// A record with neither sequence is valid.
pub fn validate_functional_groups(meta: &MetaData, instance: usize) -> Result<(), ValidationError> {
    let shared = meta.get(instance, tags::SHARED_FUNCTIONAL_GROUPS_SEQUENCE);
    let per_frame = meta.get(instance, tags::PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE);

    match (shared.is_valid(), per_frame.is_valid()) {
        (false, false) => return Ok(()),
        (false, true) => return Err(ValidationError::MissingSharedGroups),
        (true, false) => return Err(ValidationError::MissingPerFrameGroups),
        (true, true) => {}
    }

    let shared_items = shared.items().len();
    if shared_items != 1 {
        return Err(ValidationError::SharedGroupItemCount { count: shared_items });
    }

    let declared = meta.get(instance, tags::NUMBER_OF_FRAMES).as_int();
    let items = per_frame.items().len();
    if declared != i64::try_from(items).ok() {
        return Err(ValidationError::FrameCountMismatch { declared, items });
    }

    Ok(())
}
