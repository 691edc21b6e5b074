//! Digital signature dictionaries.
//!
//! Only the dictionary side is covered here: building and editing the entries
//! a signature handler fills in. Computing digests and CMS containers is left
//! to the caller, who writes the result with [`Signature::set_contents`].

mod build_properties;
mod signature;

pub use build_properties::{SignatureAppProperties, SignatureBuildProperties};
pub use signature::Signature;
