//! Attribute values.
//!
//! A value is either absent, a scalar payload holding one or more repeated
//! values, or a sequence of nested items.

use crate::model::Item;

/// The shared "not present" value handed out by lookups that find nothing.
static INVALID: Value = Value::Invalid;

/// A tagged attribute value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value. Returned for missing or hidden attributes.
    #[default]
    Invalid,

    /// One or more text values (multi-valued strings are split on `\`).
    Text(Vec<String>),

    /// One or more signed integers.
    Int(Vec<i64>),

    /// One or more floating point numbers.
    Float(Vec<f64>),

    /// Opaque bytes. Counts as a single value.
    Bytes(Vec<u8>),

    /// A sequence of nested items.
    Sequence(Vec<Item>),
}

impl Value {
    /// Returns a reference to the shared invalid value.
    pub fn invalid() -> &'static Value {
        &INVALID
    }

    /// Creates a text value, splitting on the `\` value delimiter.
    pub fn text(s: impl AsRef<str>) -> Self {
        Value::Text(s.as_ref().split('\\').map(str::to_string).collect())
    }

    /// Creates a single integer value.
    pub fn int(v: i64) -> Self {
        Value::Int(vec![v])
    }

    /// Creates a single float value.
    pub fn float(v: f64) -> Self {
        Value::Float(vec![v])
    }

    /// Creates a sequence value from items.
    pub fn sequence(items: impl IntoIterator<Item = Item>) -> Self {
        Value::Sequence(items.into_iter().collect())
    }

    /// Returns false only for [`Value::Invalid`].
    pub fn is_valid(&self) -> bool {
        !matches!(self, Value::Invalid)
    }

    /// Returns true if this value is a sequence (possibly empty).
    pub fn is_sequence(&self) -> bool {
        matches!(self, Value::Sequence(_))
    }

    /// Returns the number of repeated values.
    ///
    /// For sequences this is the number of items. Bytes count as one value
    /// unless empty.
    pub fn count(&self) -> usize {
        match self {
            Value::Invalid => 0,
            Value::Text(v) => v.len(),
            Value::Int(v) => v.len(),
            Value::Float(v) => v.len(),
            Value::Bytes(b) => usize::from(!b.is_empty()),
            Value::Sequence(items) => items.len(),
        }
    }

    /// Returns the items of a sequence, or an empty slice for any other value.
    pub fn items(&self) -> &[Item] {
        match self {
            Value::Sequence(items) => items,
            _ => &[],
        }
    }

    /// Returns the only item of a sequence that holds exactly one item.
    pub fn single_item(&self) -> Option<&Item> {
        match self.items() {
            [item] => Some(item),
            _ => None,
        }
    }

    /// Returns the first value as an integer.
    ///
    /// Text is trimmed and parsed (integer or decimal string), floats are
    /// truncated toward zero. Returns `None` if there is no convertible value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => v.first().copied(),
            Value::Float(v) => v.first().filter(|f| f.is_finite()).map(|f| f.trunc() as i64),
            Value::Text(v) => {
                let s = v.first()?.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            }
            _ => None,
        }
    }

    /// Returns the first value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(v) => v.first().map(|i| *i as f64),
            Value::Float(v) => v.first().copied(),
            Value::Text(v) => v.first()?.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns the first text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => v.first().map(String::as_str),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<Vec<Item>> for Value {
    fn from(items: Vec<Item>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        Value::Sequence(vec![item])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tag;

    #[test]
    fn test_validity() {
        assert!(!Value::Invalid.is_valid());
        assert!(!Value::invalid().is_valid());
        assert!(Value::int(0).is_valid());
        // An empty sequence is still a present value
        assert!(Value::Sequence(vec![]).is_valid());
        assert_eq!(Value::default(), Value::Invalid);
    }

    #[test]
    fn test_count() {
        assert_eq!(Value::Invalid.count(), 0);
        assert_eq!(Value::text("0.5\\0.5").count(), 2);
        assert_eq!(Value::Int(vec![1, 2, 3]).count(), 3);
        assert_eq!(Value::Bytes(vec![]).count(), 0);
        assert_eq!(Value::Bytes(vec![1, 2]).count(), 1);
        assert_eq!(Value::sequence([Item::new(), Item::new()]).count(), 2);
    }

    #[test]
    fn test_single_item() {
        let mut item = Item::new();
        item.set(Tag::new(0x0018, 0x0050), Value::float(1.5));
        let one = Value::from(item.clone());
        assert_eq!(one.single_item(), Some(&item));

        let two = Value::sequence([item.clone(), item]);
        assert!(two.single_item().is_none());
        assert!(Value::int(1).single_item().is_none());
        assert!(Value::int(1).items().is_empty());
    }

    #[test]
    fn test_as_int() {
        assert_eq!(Value::int(12).as_int(), Some(12));
        assert_eq!(Value::text(" 40 ").as_int(), Some(40));
        assert_eq!(Value::text("7.9").as_int(), Some(7));
        assert_eq!(Value::float(-2.5).as_int(), Some(-2));
        assert_eq!(Value::float(f64::NAN).as_int(), None);
        assert_eq!(Value::text("abc").as_int(), None);
        assert_eq!(Value::Invalid.as_int(), None);
        assert_eq!(Value::Int(vec![]).as_int(), None);
    }

    #[test]
    fn test_as_str_and_float() {
        let v = Value::text("MR\\CT");
        assert_eq!(v.as_str(), Some("MR"));
        assert_eq!(Value::int(3).as_float(), Some(3.0));
        assert_eq!(Value::text("0.25").as_float(), Some(0.25));
        assert!(Value::int(3).as_str().is_none());
    }
}
