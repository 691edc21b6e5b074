use std::borrow::{Borrow, Cow};
use std::fmt;

/// A PDF name, stored as raw bytes without the leading slash.
///
/// Dictionaries are keyed by `PdfName` and looked up by `&str` through the
/// `Borrow<[u8]>` impl.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdfName(Vec<u8>);

impl PdfName {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name as UTF-8 text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Borrow<[u8]> for PdfName {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for PdfName {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for PdfName {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&[u8]> for PdfName {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for PdfName {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&PdfName> for PdfName {
    fn from(name: &PdfName) -> Self {
        name.clone()
    }
}

impl PartialEq<str> for PdfName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for PdfName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Display for PdfName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_name_from_str() {
        let name = PdfName::from("Type");
        assert_eq!(name.as_bytes(), b"Type");
        assert_eq!(name.as_str(), Some("Type"));
        assert_eq!(name, "Type");
    }

    #[test]
    fn test_borrowed_hash_matches() {
        // Lookups by &[u8] rely on this.
        let name = PdfName::from("Subtype");
        let borrowed: &[u8] = name.borrow();
        assert_eq!(hash_of(&name), hash_of(borrowed));
    }

    #[test]
    fn test_non_utf8_name() {
        let name = PdfName::new(vec![0x41, 0xFF]);
        assert_eq!(name.as_str(), None);
        assert_eq!(name.len(), 2);
        assert_eq!(name.to_string_lossy(), "A\u{FFFD}");
    }

    #[test]
    fn test_display_has_slash() {
        assert_eq!(PdfName::from("Annot").to_string(), "/Annot");
    }
}
