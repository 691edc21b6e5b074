use crate::writer::number::RealPrecision;

/// What the serializer does with a reference that does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingReferencePolicy {
    /// Write the `null` object in place of the reference.
    #[default]
    WriteNull,
    /// Fail the whole write with [`PdfError::DanglingReference`](crate::error::PdfError::DanglingReference).
    Error,
}

/// Options for serializing objects and framing a file.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Version written in the `%PDF-x.y` header.
    pub pdf_version: String,
    /// Put dictionary entries on one line instead of one per line.
    pub compact: bool,
    pub real_precision: RealPrecision,
    pub dangling_references: DanglingReferencePolicy,
    /// Two identifiers for the trailer `ID` array. Omitted when `None`.
    pub document_id: Option<([u8; 16], [u8; 16])>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            pdf_version: "1.7".to_string(),
            compact: false,
            real_precision: RealPrecision::Adaptive,
            dangling_references: DanglingReferencePolicy::WriteNull,
            document_id: None,
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pdf_version(mut self, version: impl Into<String>) -> Self {
        self.pdf_version = version.into();
        self
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn with_real_precision(mut self, precision: RealPrecision) -> Self {
        self.real_precision = precision;
        self
    }

    pub fn with_dangling_references(mut self, policy: DanglingReferencePolicy) -> Self {
        self.dangling_references = policy;
        self
    }

    pub fn with_document_id(mut self, original: [u8; 16], current: [u8; 16]) -> Self {
        self.document_id = Some((original, current));
        self
    }
}
