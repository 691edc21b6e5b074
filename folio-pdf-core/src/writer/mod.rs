//! Serialization: number formatting, object syntax and file framing.

mod config;
pub mod number;
mod pdf_writer;
mod serializer;
mod xref;

pub use config::{DanglingReferencePolicy, WriterConfig};
pub use number::{format_number, format_real, RealPrecision};
pub use pdf_writer::PdfWriter;
pub use serializer::{write_name, write_string, ObjectSerializer};
pub use xref::{XrefEntry, XrefTable};
