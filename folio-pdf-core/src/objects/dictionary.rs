use crate::error::{PdfError, Result};
use crate::objects::{Array, Object, ObjectId, PdfName, PdfString};
use indexmap::IndexMap;

/// A mapping from names to objects.
///
/// Keys keep their insertion order so that serialized output is stable across
/// runs; equality ignores order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dictionary {
    entries: IndexMap<PdfName, Object>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts or overwrites `key`. Overwriting keeps the key's position.
    pub fn set(&mut self, key: impl Into<PdfName>, value: impl Into<Object>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key.as_bytes())
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.entries.get_mut(key.as_bytes())
    }

    /// Removes `key`, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Object> {
        self.entries.shift_remove(key.as_bytes())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &PdfName> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Object> {
        self.entries.values()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PdfName, &Object)> {
        self.entries.iter()
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&PdfName, &mut Object)> {
        self.entries.iter_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PdfName, &Object)> {
        self.entries.iter()
    }

    pub fn get_dict(&self, key: &str) -> Option<&Dictionary> {
        self.get(key).and_then(Object::as_dict)
    }

    pub fn get_dict_mut(&mut self, key: &str) -> Option<&mut Dictionary> {
        self.get_mut(key).and_then(Object::as_dict_mut)
    }

    pub fn get_array(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(Object::as_array)
    }

    pub fn get_array_mut(&mut self, key: &str) -> Option<&mut Array> {
        self.get_mut(key).and_then(Object::as_array_mut)
    }

    pub fn get_name(&self, key: &str) -> Option<&PdfName> {
        self.get(key).and_then(Object::as_name)
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Object::as_f64)
    }

    pub fn get_string(&self, key: &str) -> Option<&PdfString> {
        self.get(key).and_then(Object::as_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Object::as_bool)
    }

    pub fn get_reference(&self, key: &str) -> Option<ObjectId> {
        self.get(key).and_then(Object::as_reference)
    }

    /// Returns the direct child dictionary under `key`, creating an empty one
    /// when the key is absent.
    ///
    /// Fails without modifying anything when the key holds another kind of
    /// object, including a reference to an indirect dictionary.
    pub fn get_or_insert_dict(&mut self, key: &str) -> Result<&mut Dictionary> {
        let entry = self
            .entries
            .entry(PdfName::from(key))
            .or_insert_with(|| Object::Dictionary(Dictionary::new()));
        match entry {
            Object::Dictionary(dict) => Ok(dict),
            other => Err(PdfError::WrongObjectKind {
                key: key.to_string(),
                expected: "dictionary",
                found: other.kind().as_str(),
            }),
        }
    }

    /// Array counterpart of [`Dictionary::get_or_insert_dict`].
    pub fn get_or_insert_array(&mut self, key: &str) -> Result<&mut Array> {
        let entry = self
            .entries
            .entry(PdfName::from(key))
            .or_insert_with(|| Object::Array(Array::new()));
        match entry {
            Object::Array(array) => Ok(array),
            other => Err(PdfError::WrongObjectKind {
                key: key.to_string(),
                expected: "array",
                found: other.kind().as_str(),
            }),
        }
    }
}

impl FromIterator<(PdfName, Object)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (PdfName, Object)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a PdfName, &'a Object);
    type IntoIter = indexmap::map::Iter<'a, PdfName, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
