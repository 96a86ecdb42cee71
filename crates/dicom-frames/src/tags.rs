//! Well-known attribute tags.
//!
//! Only the tags that functional group resolution depends on, plus the
//! common functional group macros, are listed here. This is not a data
//! dictionary.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::model::Tag;

pub const SOP_INSTANCE_UID: Tag = Tag::new(0x0008, 0x0018);
pub const MODALITY: Tag = Tag::new(0x0008, 0x0060);
pub const SLICE_THICKNESS: Tag = Tag::new(0x0018, 0x0050);
pub const IMAGE_POSITION_PATIENT: Tag = Tag::new(0x0020, 0x0032);
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag::new(0x0020, 0x0037);
pub const IN_STACK_POSITION_NUMBER: Tag = Tag::new(0x0020, 0x9057);
pub const FRAME_CONTENT_SEQUENCE: Tag = Tag::new(0x0020, 0x9111);
pub const PLANE_POSITION_SEQUENCE: Tag = Tag::new(0x0020, 0x9113);
pub const PLANE_ORIENTATION_SEQUENCE: Tag = Tag::new(0x0020, 0x9116);

/// Number of frames in a multi-frame image. Describes the whole record.
pub const NUMBER_OF_FRAMES: Tag = Tag::new(0x0028, 0x0008);
pub const ROWS: Tag = Tag::new(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag::new(0x0028, 0x0011);
pub const PIXEL_SPACING: Tag = Tag::new(0x0028, 0x0030);
pub const WINDOW_CENTER: Tag = Tag::new(0x0028, 0x1050);
pub const WINDOW_WIDTH: Tag = Tag::new(0x0028, 0x1051);
pub const PIXEL_MEASURES_SEQUENCE: Tag = Tag::new(0x0028, 0x9110);
pub const FRAME_VOI_LUT_SEQUENCE: Tag = Tag::new(0x0028, 0x9132);

/// Functional groups that apply to every frame. Holds one item.
pub const SHARED_FUNCTIONAL_GROUPS_SEQUENCE: Tag = Tag::new(0x5200, 0x9229);

/// Functional groups for each frame. Holds one item per frame.
pub const PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE: Tag = Tag::new(0x5200, 0x9230);

const KEYWORDS: &[(Tag, &str)] = &[
    (SOP_INSTANCE_UID, "SOPInstanceUID"),
    (MODALITY, "Modality"),
    (SLICE_THICKNESS, "SliceThickness"),
    (IMAGE_POSITION_PATIENT, "ImagePositionPatient"),
    (IMAGE_ORIENTATION_PATIENT, "ImageOrientationPatient"),
    (IN_STACK_POSITION_NUMBER, "InStackPositionNumber"),
    (FRAME_CONTENT_SEQUENCE, "FrameContentSequence"),
    (PLANE_POSITION_SEQUENCE, "PlanePositionSequence"),
    (PLANE_ORIENTATION_SEQUENCE, "PlaneOrientationSequence"),
    (NUMBER_OF_FRAMES, "NumberOfFrames"),
    (ROWS, "Rows"),
    (COLUMNS, "Columns"),
    (PIXEL_SPACING, "PixelSpacing"),
    (WINDOW_CENTER, "WindowCenter"),
    (WINDOW_WIDTH, "WindowWidth"),
    (PIXEL_MEASURES_SEQUENCE, "PixelMeasuresSequence"),
    (FRAME_VOI_LUT_SEQUENCE, "FrameVOILUTSequence"),
    (SHARED_FUNCTIONAL_GROUPS_SEQUENCE, "SharedFunctionalGroupsSequence"),
    (PER_FRAME_FUNCTIONAL_GROUPS_SEQUENCE, "PerFrameFunctionalGroupsSequence"),
];

lazy_static! {
    static ref BY_TAG: FxHashMap<Tag, &'static str> = KEYWORDS.iter().copied().collect();
    static ref BY_KEYWORD: FxHashMap<&'static str, Tag> =
        KEYWORDS.iter().map(|(tag, keyword)| (*keyword, *tag)).collect();
}

/// Returns the keyword of a well-known tag.
pub fn keyword(tag: Tag) -> Option<&'static str> {
    BY_TAG.get(&tag).copied()
}

/// Looks up a well-known tag by keyword (case-sensitive).
pub fn from_keyword(keyword: &str) -> Option<Tag> {
    BY_KEYWORD.get(keyword).copied()
}
