//! # folio-pdf
//!
//! The object model and writer at the bottom of a PDF producer: primitive
//! values, a registry of indirect objects, typed views over dictionaries and
//! a serializer that turns the graph into byte-exact PDF syntax.
//!
//! ## Features
//!
//! - **Object model**: null, booleans, numbers, strings, names, arrays,
//!   dictionaries, streams and indirect references
//! - **Registry**: object numbers and generations, freeing and reuse, cycles
//!   through references
//! - **Deterministic serialization**: the same graph always gives the same bytes
//! - **Dictionary views**: link annotations, actions and signature
//!   dictionaries edited in place, with advisories for suspicious changes
//! - **File framing**: header, cross-reference table and trailer
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_pdf::actions::Action;
//! use folio_pdf::annotations::LinkAnnotation;
//! use folio_pdf::geometry::Rectangle;
//! use folio_pdf::{Document, PdfObjectWrapper, Result, WriterConfig};
//!
//! # fn main() -> Result<()> {
//! let mut doc = Document::new();
//! doc.set_title("Links");
//! let page = doc.add_page(612.0, 792.0)?;
//!
//! let rect = Rectangle::from_position_and_size(72.0, 700.0, 200.0, 14.0);
//! let link = doc.add_annotation(page, LinkAnnotation::create(rect))?;
//!
//! let mut view: LinkAnnotation<'_> = doc.objects_mut().view(link)?;
//! view.set_action_from(&Action::uri("https://example.com"));
//!
//! let bytes = doc.to_bytes(&WriterConfig::default())?;
//! assert!(bytes.ends_with(b"%%EOF\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Diagnostics
//!
//! Views never fail for mutations that are legal but odd, such as replacing
//! a link's action with a destination. They report an [`Advisory`] to a
//! [`DiagnosticSink`] instead. The default sink logs through `tracing`;
//! [`CollectingSink`] keeps the advisories for inspection.

pub mod actions;
pub mod annotations;
pub mod date;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod geometry;
pub mod objects;
pub mod signatures;
pub mod views;
pub mod writer;

pub use diagnostics::{Advisory, AdvisoryKind, CollectingSink, DiagnosticSink, Severity, TracingSink};
pub use document::{Document, DocumentInfo, DocumentMetadata};
pub use error::{PdfError, Result};
pub use objects::{
    Array, Dictionary, Object, ObjectId, ObjectRegistry, PdfName, PdfString, Stream, TextEncoding,
};
pub use views::PdfObjectWrapper;
pub use writer::{DanglingReferencePolicy, ObjectSerializer, PdfWriter, RealPrecision, WriterConfig, XrefTable};

/// Current version of folio-pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PDF versions the writer can put in the file header.
pub mod pdf_version {
    pub const SUPPORTED_VERSIONS: &[&str] =
        &["1.0", "1.1", "1.2", "1.3", "1.4", "1.5", "1.6", "1.7", "2.0"];
}
