//! Nested records.
//!
//! An item is an ordered set of data elements, the unit that sequences are
//! made of. Functional group items are items, and so are the macro items
//! nested one level inside them.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{Tag, TagPath, Value};

/// First and last element numbers of private creator slots in a group.
const FIRST_CREATOR_BLOCK: u16 = 0x0010;
const LAST_CREATOR_BLOCK: u16 = 0x00FF;

/// An ordered mapping from tag to value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    elements: BTreeMap<Tag, Value>,
}

impl Item {
    /// Creates an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a data element, replacing any existing value.
    ///
    /// Setting [`Value::Invalid`] removes the element.
    pub fn set(&mut self, tag: Tag, value: impl Into<Value>) {
        let value = value.into();
        if value.is_valid() {
            self.elements.insert(tag, value);
        } else {
            self.elements.remove(&tag);
        }
    }

    /// Builder-style variant of [`Item::set`].
    pub fn with(mut self, tag: Tag, value: impl Into<Value>) -> Self {
        self.set(tag, value);
        self
    }

    /// Returns the value for a tag, or the invalid value if absent.
    pub fn get(&self, tag: Tag) -> &Value {
        self.elements.get(&tag).unwrap_or(Value::invalid())
    }

    /// Returns true if the item holds a valid value for the tag.
    pub fn has(&self, tag: Tag) -> bool {
        self.elements.contains_key(&tag)
    }

    /// Removes a data element and returns its value.
    pub fn remove(&mut self, tag: Tag) -> Option<Value> {
        self.elements.remove(&tag)
    }

    /// Returns the number of data elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the item has no data elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the data elements in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Value)> + '_ {
        self.elements.iter().map(|(tag, value)| (*tag, value))
    }

    /// Follows a tag path from this item.
    ///
    /// Returns the invalid value if any hop is missing or is not a sequence
    /// with enough items.
    pub fn get_path(&self, path: &TagPath) -> &Value {
        path.hops()
            .try_fold(self.get(path.head()), |value, (index, tag)| {
                value.items().get(index).map(|item| item.get(tag))
            })
            .unwrap_or(Value::invalid())
    }

    /// Sets the attribute named by a tag path, creating intermediate
    /// sequences and items as needed.
    ///
    /// Fails with [`Error::NotASequence`] if a hop passes through an
    /// existing value that is not a sequence.
    pub fn set_path(&mut self, path: &TagPath, value: impl Into<Value>) -> Result<()> {
        let mut item = self;
        let mut tag = path.head();
        for (index, next) in path.hops() {
            let slot = item
                .elements
                .entry(tag)
                .or_insert_with(|| Value::Sequence(Vec::new()));
            let Value::Sequence(items) = slot else {
                return Err(Error::NotASequence { tag });
            };
            if items.len() <= index {
                items.resize_with(index + 1, Item::new);
            }
            item = &mut items[index];
            tag = next;
        }
        item.set(tag, value);
        Ok(())
    }

    /// Resolves a private placeholder tag under the given creator.
    ///
    /// The placeholder's low element byte is kept and the high byte is
    /// replaced by the block number of the matching creator element.
    /// Public tags are returned unchanged. Returns [`Tag::UNRESOLVED`] if no
    /// creator element in the group matches.
    pub fn resolve_private_tag(&self, ptag: Tag, creator: &str) -> Tag {
        if !ptag.is_private() {
            return ptag;
        }
        match self.find_creator_block(ptag.group(), creator) {
            Some(block) => ptag.in_block(block),
            None => Tag::UNRESOLVED,
        }
    }

    /// Resolves a private placeholder tag, reserving a block if necessary.
    ///
    /// When the creator has no block yet, the lowest free creator slot in the
    /// group is claimed by writing the creator name into it.
    pub fn resolve_private_tag_for_writing(&mut self, ptag: Tag, creator: &str) -> Result<Tag> {
        if !ptag.is_private() {
            return Ok(ptag);
        }
        let group = ptag.group();
        if let Some(block) = self.find_creator_block(group, creator) {
            return Ok(ptag.in_block(block));
        }

        let free = (FIRST_CREATOR_BLOCK..=LAST_CREATOR_BLOCK)
            .find(|element| !self.has(Tag::new(group, *element)))
            .ok_or_else(|| Error::PrivateBlocksExhausted {
                group,
                creator: creator.to_string(),
            })?;
        self.set(Tag::new(group, free), Value::text(creator));
        Ok(ptag.in_block(free as u8))
    }

    /// Finds the block number reserved for `creator` in `group`.
    fn find_creator_block(&self, group: u16, creator: &str) -> Option<u8> {
        let first = Tag::new(group, FIRST_CREATOR_BLOCK);
        let last = Tag::new(group, LAST_CREATOR_BLOCK);
        self.elements
            .range(first..=last)
            .find(|(_, value)| creator_matches(value, creator))
            .map(|(tag, _)| tag.element() as u8)
    }
}

/// Compares a creator element against a creator name, ignoring the trailing
/// space padding that text values carry on the wire.
pub(crate) fn creator_matches(value: &Value, creator: &str) -> bool {
    value
        .as_str()
        .is_some_and(|name| name.trim_end_matches([' ', '\0']) == creator.trim_end_matches(' '))
}

impl<'a> IntoIterator for &'a Item {
    type Item = (Tag, &'a Value);
    type IntoIter = std::iter::Map<
        std::collections::btree_map::Iter<'a, Tag, Value>,
        fn((&'a Tag, &'a Value)) -> (Tag, &'a Value),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let copy_tag: fn((&'a Tag, &'a Value)) -> (Tag, &'a Value) = |(tag, value)| (*tag, value);
        self.elements.iter().map(copy_tag)
    }
}

impl FromIterator<(Tag, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (Tag, Value)>>(iter: I) -> Self {
        let mut item = Item::new();
        for (tag, value) in iter {
            item.set(tag, value);
        }
        item
    }
}
