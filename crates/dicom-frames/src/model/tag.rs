//! Attribute tags.
//!
//! A tag is a (group, element) pair. Odd groups are private (vendor-defined),
//! even groups are public (standards-defined).

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A (group, element) attribute identifier.
///
/// Tags order by their 32-bit key, which is the order elements appear in
/// an item or a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag {
    group: u16,
    element: u16,
}

impl Tag {
    /// Sentinel returned when a private tag cannot be resolved.
    pub const UNRESOLVED: Tag = Tag::new(0xFFFF, 0xFFFF);

    /// Creates a tag from its group and element numbers.
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }

    /// Creates a tag from its 32-bit key (group in the high half).
    pub const fn from_key(key: u32) -> Self {
        Self {
            group: (key >> 16) as u16,
            element: key as u16,
        }
    }

    /// Returns the group number.
    pub const fn group(self) -> u16 {
        self.group
    }

    /// Returns the element number.
    pub const fn element(self) -> u16 {
        self.element
    }

    /// Returns the 32-bit key (group in the high half).
    pub const fn key(self) -> u32 {
        ((self.group as u32) << 16) | self.element as u32
    }

    /// Returns true if the group number is odd.
    pub const fn is_private(self) -> bool {
        self.group & 1 == 1
    }

    /// Returns true if this tag holds a private creator name.
    ///
    /// Creator elements live at (gggg,0010) through (gggg,00FF) in a
    /// private group.
    pub const fn is_private_creator(self) -> bool {
        self.is_private() && self.element >= 0x0010 && self.element <= 0x00FF
    }

    /// Returns true if this is the unresolved sentinel.
    pub const fn is_unresolved(self) -> bool {
        self.group == 0xFFFF && self.element == 0xFFFF
    }

    /// Returns the tag that a placeholder resolves to for the given block.
    ///
    /// The block number replaces the high byte of the element.
    pub(crate) const fn in_block(self, block: u8) -> Tag {
        Tag::new(self.group, ((block as u16) << 8) | (self.element & 0x00FF))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.group, self.element)
    }
}

impl FromStr for Tag {
    type Err = Error;

    /// Parses `gggg,eeee`, `(gggg,eeee)` or `ggggeeee` (hex, any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidTag {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let inner = match trimmed.strip_prefix('(') {
            Some(rest) => rest.strip_suffix(')').ok_or_else(invalid)?,
            None => trimmed,
        };

        let (group, element) = match inner.split_once(',') {
            Some((g, e)) => (g.trim(), e.trim()),
            None if inner.len() == 8 && inner.is_ascii() => inner.split_at(4),
            None => return Err(invalid()),
        };

        let is_hex4 = |part: &str| part.len() == 4 && part.bytes().all(|b| b.is_ascii_hexdigit());
        if !is_hex4(group) || !is_hex4(element) {
            return Err(invalid());
        }
        let group = u16::from_str_radix(group, 16).map_err(|_| invalid())?;
        let element = u16::from_str_radix(element, 16).map_err(|_| invalid())?;
        Ok(Tag::new(group, element))
    }
}

impl From<(u16, u16)> for Tag {
    fn from((group, element): (u16, u16)) -> Self {
        Tag::new(group, element)
    }
}
