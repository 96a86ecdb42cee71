//! The base metadata record.
//!
//! A record holds the attributes of one or more instances (for example, the
//! files of a series loaded together). Each data element is stored either
//! once for the whole record, or as one value per instance when the
//! instances disagree.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::item::creator_matches;
use crate::model::{Tag, TagPath, Value};

/// A data element of a record: one shared value or one value per instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// The same value for every instance.
    Shared(Value),
    /// One value per instance, indexed by instance number.
    PerInstance(Vec<Value>),
}

impl Element {
    /// Returns true if the element stores a separate value per instance.
    pub fn is_per_instance(&self) -> bool {
        matches!(self, Element::PerInstance(_))
    }

    /// Returns the value seen by the given instance.
    pub fn value_at(&self, instance: usize) -> &Value {
        match self {
            Element::Shared(value) => value,
            Element::PerInstance(values) => values.get(instance).unwrap_or(Value::invalid()),
        }
    }
}

/// A metadata record with one or more instances.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaData {
    instances: usize,
    elements: BTreeMap<Tag, Element>,
}

impl Default for MetaData {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaData {
    /// Creates an empty record with a single instance.
    pub fn new() -> Self {
        Self::with_instances(1)
    }

    /// Creates an empty record with `count` instances (at least one).
    pub fn with_instances(count: usize) -> Self {
        Self {
            instances: count.max(1),
            elements: BTreeMap::new(),
        }
    }

    /// Returns the number of instances in the record.
    pub fn instance_count(&self) -> usize {
        self.instances
    }

    /// Returns the number of data elements (per-instance elements count once).
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Sets a data element for every instance.
    ///
    /// Setting [`Value::Invalid`] erases the element.
    pub fn set(&mut self, tag: Tag, value: impl Into<Value>) {
        let value = value.into();
        if value.is_valid() {
            self.elements.insert(tag, Element::Shared(value));
        } else {
            self.elements.remove(&tag);
        }
    }

    /// Sets a data element for one instance.
    ///
    /// A shared element is split into per-instance values first, so the
    /// other instances keep the value they had.
    pub fn set_at(&mut self, instance: usize, tag: Tag, value: impl Into<Value>) -> Result<()> {
        if instance >= self.instances {
            return Err(Error::InstanceOutOfRange {
                instance,
                count: self.instances,
            });
        }
        if self.instances == 1 {
            self.set(tag, value);
            return Ok(());
        }

        let count = self.instances;
        let element = self
            .elements
            .entry(tag)
            .or_insert_with(|| Element::PerInstance(vec![Value::Invalid; count]));
        if let Element::Shared(shared) = element {
            let shared = shared.clone();
            *element = Element::PerInstance(vec![shared; count]);
        }
        let cleared = match element {
            Element::PerInstance(values) => {
                values[instance] = value.into();
                values.iter().all(|v| !v.is_valid())
            }
            Element::Shared(_) => false,
        };
        if cleared {
            self.elements.remove(&tag);
        }
        Ok(())
    }

    /// Returns the value of a data element for an instance.
    ///
    /// Returns the invalid value if the element is absent or the instance is
    /// out of range.
    pub fn get(&self, instance: usize, tag: Tag) -> &Value {
        if instance >= self.instances {
            return Value::invalid();
        }
        self.elements
            .get(&tag)
            .map_or(Value::invalid(), |element| element.value_at(instance))
    }

    /// Returns true if the instance has a valid value for the tag.
    pub fn has(&self, instance: usize, tag: Tag) -> bool {
        self.get(instance, tag).is_valid()
    }

    /// Finds the stored element for a tag.
    pub fn find(&self, tag: Tag) -> Option<&Element> {
        self.elements.get(&tag)
    }

    /// Removes a data element from every instance.
    pub fn erase(&mut self, tag: Tag) -> Option<Element> {
        self.elements.remove(&tag)
    }

    /// Iterates over the stored elements in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Element)> + '_ {
        self.elements.iter().map(|(tag, element)| (*tag, element))
    }

    /// Follows a tag path from the top level of an instance.
    pub fn get_path(&self, instance: usize, path: &TagPath) -> &Value {
        path.hops()
            .try_fold(self.get(instance, path.head()), |value, (index, tag)| {
                value.items().get(index).map(|item| item.get(tag))
            })
            .unwrap_or(Value::invalid())
    }

    /// Resolves a private placeholder tag under the given creator, as seen
    /// by one instance.
    ///
    /// Public tags are returned unchanged. Returns [`Tag::UNRESOLVED`] if
    /// the instance has no matching creator element in the tag's group.
    pub fn resolve_private_tag(&self, instance: usize, ptag: Tag, creator: &str) -> Tag {
        if !ptag.is_private() {
            return ptag;
        }
        if instance >= self.instances {
            return Tag::UNRESOLVED;
        }
        let group = ptag.group();
        self.elements
            .range(Tag::new(group, 0x0010)..=Tag::new(group, 0x00FF))
            .find(|(_, element)| creator_matches(element.value_at(instance), creator))
            .map_or(Tag::UNRESOLVED, |(tag, _)| ptag.in_block(tag.element() as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;

    const MODALITY: Tag = Tag::new(0x0008, 0x0060);
    const ACQUISITION_DATE_TIME: Tag = Tag::new(0x0008, 0x002A);

    #[test]
    fn test_set_get_erase() {
        let mut meta = MetaData::new();
        meta.set(MODALITY, "CT");
        assert_eq!(meta.get(0, MODALITY).as_str(), Some("CT"));
        assert!(meta.has(0, MODALITY));
        assert!(!meta.has(0, ACQUISITION_DATE_TIME));

        meta.set(MODALITY, "MR");
        assert_eq!(meta.get(0, MODALITY).as_str(), Some("MR"));
        assert!(meta.erase(MODALITY).is_some());
        assert!(!meta.has(0, MODALITY));
        assert_eq!(meta.element_count(), 0);
        assert!(meta.erase(MODALITY).is_none());
    }

    #[test]
    fn test_multiple_instances() {
        let mut meta = MetaData::with_instances(3);
        meta.set(MODALITY, "CT");
        for i in 0..3 {
            assert_eq!(meta.get(i, MODALITY).as_str(), Some("CT"));
        }

        meta.set_at(1, MODALITY, "MR").unwrap();
        assert_eq!(meta.get(0, MODALITY).as_str(), Some("CT"));
        assert_eq!(meta.get(1, MODALITY).as_str(), Some("MR"));
        assert_eq!(meta.get(2, MODALITY).as_str(), Some("CT"));
        assert!(meta.find(MODALITY).unwrap().is_per_instance());

        // Record-wide set collapses back to one value
        meta.set(MODALITY, "MR");
        for i in 0..3 {
            assert_eq!(meta.get(i, MODALITY).as_str(), Some("MR"));
        }
        assert!(!meta.find(MODALITY).unwrap().is_per_instance());
        assert_eq!(meta.element_count(), 1);
        assert_eq!(meta.instance_count(), 3);
    }

    #[test]
    fn test_set_at_out_of_range() {
        let mut meta = MetaData::with_instances(2);
        let result = meta.set_at(2, MODALITY, "CT");
        assert!(matches!(
            result,
            Err(Error::InstanceOutOfRange { instance: 2, count: 2 })
        ));
        assert!(!meta.get(2, MODALITY).is_valid());
    }

    #[test]
    fn test_set_at_clearing_all_instances_erases() {
        let mut meta = MetaData::with_instances(2);
        meta.set_at(0, MODALITY, "CT").unwrap();
        assert!(!meta.has(1, MODALITY));
        meta.set_at(0, MODALITY, Value::Invalid).unwrap();
        assert!(meta.find(MODALITY).is_none());
    }

    #[test]
    fn test_iteration_order() {
        let mut meta = MetaData::with_instances(2);
        meta.set_at(0, MODALITY, "CT").unwrap();
        meta.set_at(1, MODALITY, "MR").unwrap();
        meta.set(ACQUISITION_DATE_TIME, "20130126080000.000000+0700");

        let tags: Vec<Tag> = meta.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, vec![ACQUISITION_DATE_TIME, MODALITY]);
    }

    #[test]
    fn test_get_path() {
        let series_uid = Tag::new(0x0020, 0x000E);
        let referenced_series = Tag::new(0x0008, 0x1115);
        let mut meta = MetaData::new();
        meta.set(
            referenced_series,
            Item::new().with(series_uid, "1.2.840.113619.2.176.2025.4110284.7478.1276100777.239"),
        );
        let path = TagPath::new(referenced_series).push(0, series_uid);
        assert!(meta.get_path(0, &path).is_valid());
        assert!(!meta.get_path(0, &TagPath::new(referenced_series).push(1, series_uid)).is_valid());
    }

    #[test]
    fn test_resolve_private_tag_per_instance() {
        let creator = Tag::new(0x0019, 0x0010);
        let mut meta = MetaData::with_instances(2);
        meta.set_at(0, creator, "SIEMENS MR HEADER").unwrap();
        meta.set_at(1, creator, "GEMS_ACQU_01").unwrap();

        let ptag = Tag::new(0x0019, 0x000C);
        assert_eq!(
            meta.resolve_private_tag(0, ptag, "SIEMENS MR HEADER"),
            Tag::new(0x0019, 0x100C)
        );
        assert_eq!(
            meta.resolve_private_tag(1, ptag, "SIEMENS MR HEADER"),
            Tag::UNRESOLVED
        );
        assert_eq!(
            meta.resolve_private_tag(1, ptag, "GEMS_ACQU_01"),
            Tag::new(0x0019, 0x100C)
        );
        assert_eq!(meta.resolve_private_tag(5, ptag, "GEMS_ACQU_01"), Tag::UNRESOLVED);
    }
}
