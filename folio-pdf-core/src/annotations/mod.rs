//! Annotation dictionary views (ISO 32000-1 Section 12.5)

mod annotation;
mod link;

pub use annotation::{
    Annotation, AnnotationFlags, AnnotationType, AnnotationView, BorderStyle, BorderStyleType,
};
pub use link::{HighlightMode, LinkAnnotation};
