//! The object model: primitives, containers and the indirect object arena.

mod array;
mod dictionary;
mod name;
mod primitive;
mod registry;
mod stream;
mod string;

pub use array::Array;
pub use dictionary::Dictionary;
pub use name::PdfName;
pub use primitive::{Object, ObjectId, ObjectKind};
pub use registry::{ObjectRegistry, Slot, SlotState};
pub use stream::Stream;
pub use string::{PdfString, TextEncoding};
