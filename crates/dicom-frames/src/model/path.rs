//! Paths into nested sequences.
//!
//! A tag path names an attribute at some depth: a head tag, followed by
//! `(item index, tag)` hops into the sequences along the way.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::Tag;

/// A path from a record or item down to a nested attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPath {
    head: Tag,
    hops: Vec<(usize, Tag)>,
}

impl TagPath {
    /// Creates a path naming a single top-level attribute.
    pub fn new(head: Tag) -> Self {
        Self {
            head,
            hops: Vec::new(),
        }
    }

    /// Appends a hop into item `index` of the last sequence, then `tag`.
    pub fn push(mut self, index: usize, tag: Tag) -> Self {
        self.hops.push((index, tag));
        self
    }

    /// Returns the first tag of the path.
    pub fn head(&self) -> Tag {
        self.head
    }

    /// Returns the number of tags in the path.
    pub fn len(&self) -> usize {
        self.hops.len() + 1
    }

    /// Always false: a path names at least one tag.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if the path has at least one hop after the head.
    pub fn has_tail(&self) -> bool {
        !self.hops.is_empty()
    }

    /// Returns the tag at position `i` (the head is position 0).
    pub fn tag(&self, i: usize) -> Option<Tag> {
        match i {
            0 => Some(self.head),
            _ => self.hops.get(i - 1).map(|(_, tag)| *tag),
        }
    }

    /// Returns the item index used to step from tag `i` into tag `i + 1`.
    pub fn index(&self, i: usize) -> Option<usize> {
        self.hops.get(i).map(|(index, _)| *index)
    }

    /// Returns the path that remains after the head and its item index.
    ///
    /// Returns `None` for a single-tag path.
    pub fn tail(&self) -> Option<TagPath> {
        let (_, head) = *self.hops.first()?;
        Some(TagPath {
            head,
            hops: self.hops[1..].to_vec(),
        })
    }

    /// Iterates over the `(item index, tag)` hops after the head.
    pub fn hops(&self) -> impl Iterator<Item = (usize, Tag)> + '_ {
        self.hops.iter().copied()
    }
}

impl From<Tag> for TagPath {
    fn from(tag: Tag) -> Self {
        TagPath::new(tag)
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.head)?;
        for (index, tag) in &self.hops {
            write!(f, ",{},{}", index, tag)?;
        }
        write!(f, "]")
    }
}

impl FromStr for TagPath {
    type Err = Error;

    /// Parses the display form, e.g. `[(5200,9230),0,(0028,9110)]`.
    ///
    /// The brackets are optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPath {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(trimmed);

        // Every tag spans two comma-separated parts, every index one.
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() < 2 || (parts.len() - 2) % 3 != 0 {
            return Err(invalid());
        }
        let tag_at = |i: usize| -> Result<Tag, Error> {
            format!("{},{}", parts[i], parts[i + 1])
                .parse()
                .map_err(|_| invalid())
        };

        let mut path = TagPath::new(tag_at(0)?);
        for i in (2..parts.len()).step_by(3) {
            let index = parts[i].parse::<usize>().map_err(|_| invalid())?;
            path = path.push(index, tag_at(i + 1)?);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let a = Tag::new(0x5200, 0x9230);
        let b = Tag::new(0x0028, 0x9110);
        let c = Tag::new(0x0028, 0x0030);
        let path = TagPath::new(a).push(3, b).push(0, c);

        assert_eq!(path.len(), 3);
        assert_eq!(path.head(), a);
        assert_eq!(path.tag(1), Some(b));
        assert_eq!(path.tag(2), Some(c));
        assert_eq!(path.tag(3), None);
        assert_eq!(path.index(0), Some(3));
        assert_eq!(path.index(1), Some(0));
        assert_eq!(path.index(2), None);
        assert!(path.has_tail());
    }

    #[test]
    fn test_tail() {
        let a = Tag::new(0x5200, 0x9230);
        let b = Tag::new(0x0028, 0x9110);
        let c = Tag::new(0x0028, 0x0030);
        let path = TagPath::new(a).push(3, b).push(0, c);

        let tail = path.tail().unwrap();
        assert_eq!(tail, TagPath::new(b).push(0, c));
        assert_eq!(tail.tail().unwrap(), TagPath::new(c));
        assert!(TagPath::new(c).tail().is_none());
    }

    #[test]
    fn test_display() {
        let path = TagPath::new(Tag::new(0x0009, 0x1013)).push(1, Tag::new(0x0009, 0x1014));
        assert_eq!(path.to_string(), "[(0009,1013),1,(0009,1014)]");
        assert_eq!(TagPath::from(Tag::new(0x0008, 0x0060)).to_string(), "[(0008,0060)]");
    }

    #[test]
    fn test_parse() {
        let path = TagPath::new(Tag::new(0x5200, 0x9230))
            .push(2, Tag::new(0x0028, 0x9110))
            .push(0, Tag::new(0x0028, 0x0030));
        assert_eq!(path.to_string().parse::<TagPath>().unwrap(), path);
        assert_eq!(
            "5200,9230, 0, 0028,9110".parse::<TagPath>().unwrap(),
            TagPath::new(Tag::new(0x5200, 0x9230)).push(0, Tag::new(0x0028, 0x9110))
        );
        assert!("[(5200,9230),x,(0028,9110)]".parse::<TagPath>().is_err());
        assert!("[(5200,9230),0]".parse::<TagPath>().is_err());
        assert!(matches!("".parse::<TagPath>(), Err(Error::InvalidPath { .. })));
    }
}
