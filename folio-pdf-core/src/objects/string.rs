use std::hash::{Hash, Hasher};

const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// How the bytes of a [`PdfString`] were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Raw bytes, no text encoding implied.
    #[default]
    Bytes,
    /// Single-byte text in the ASCII subset of PDFDocEncoding.
    PdfDoc,
    /// UTF-16BE prefixed with the `FE FF` byte-order mark.
    UnicodeBig,
}

/// A PDF string: bytes plus presentation hints.
///
/// Equality and hashing consider only the bytes; the encoding tag and the
/// hex-writing flag affect how the string is produced and written.
#[derive(Debug, Clone, Default)]
pub struct PdfString {
    bytes: Vec<u8>,
    encoding: TextEncoding,
    hex_writing: bool,
}

impl PdfString {
    /// Raw byte string.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            encoding: TextEncoding::Bytes,
            hex_writing: false,
        }
    }

    /// Text string, PDFDocEncoding when possible and UTF-16BE otherwise.
    pub fn from_text(text: &str) -> Self {
        if is_pdf_doc_text(text) {
            Self::with_encoding(text, TextEncoding::PdfDoc)
        } else {
            Self::with_encoding(text, TextEncoding::UnicodeBig)
        }
    }

    /// Text string with an explicit encoding.
    ///
    /// Text that PDFDocEncoding cannot represent is stored as UTF-16BE and
    /// tagged accordingly.
    pub fn with_encoding(text: &str, encoding: TextEncoding) -> Self {
        let (bytes, encoding) = match encoding {
            TextEncoding::Bytes => (text.as_bytes().to_vec(), TextEncoding::Bytes),
            TextEncoding::PdfDoc if is_pdf_doc_text(text) => {
                (text.as_bytes().to_vec(), TextEncoding::PdfDoc)
            }
            TextEncoding::PdfDoc | TextEncoding::UnicodeBig => {
                (encode_utf16_be(text), TextEncoding::UnicodeBig)
            }
        };
        Self {
            bytes,
            encoding,
            hex_writing: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_hex_writing(&self) -> bool {
        self.hex_writing
    }

    pub fn set_hex_writing(&mut self, hex_writing: bool) -> &mut Self {
        self.hex_writing = hex_writing;
        self
    }

    pub fn with_hex_writing(mut self, hex_writing: bool) -> Self {
        self.hex_writing = hex_writing;
        self
    }

    /// Decodes the bytes as text.
    ///
    /// A leading `FE FF` selects UTF-16BE; otherwise UTF-8 is tried and bytes
    /// that are not valid UTF-8 are mapped one-to-one onto Latin-1.
    pub fn to_text(&self) -> String {
        if let Some(units) = self.bytes.strip_prefix(&UTF16_BE_BOM) {
            let code_units: Vec<u16> = units
                .chunks(2)
                .map(|pair| match pair {
                    [hi, lo] => u16::from_be_bytes([*hi, *lo]),
                    [hi] => u16::from_be_bytes([*hi, 0]),
                    _ => 0,
                })
                .collect();
            return String::from_utf16_lossy(&code_units);
        }
        match std::str::from_utf8(&self.bytes) {
            Ok(text) => text.to_string(),
            Err(_) => self.bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

impl PartialEq for PdfString {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for PdfString {}

impl Hash for PdfString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl From<&str> for PdfString {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for PdfString {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl From<Vec<u8>> for PdfString {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for PdfString {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

fn is_pdf_doc_text(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, ' '..='~' | '\t' | '\n' | '\r'))
}

fn encode_utf16_be(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&UTF16_BE_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}
