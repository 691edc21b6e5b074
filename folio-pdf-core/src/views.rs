//! Typed views over dictionaries.
//!
//! A view borrows one [`Dictionary`] mutably and exposes typed accessors for
//! the keys a particular object kind uses. Views own nothing: every write goes
//! straight into the borrowed dictionary, so a change made through one view is
//! visible to any later view of the same dictionary.

use crate::diagnostics::{tracing_sink, Advisory, AdvisoryKind, DiagnosticSink};
use crate::objects::{Dictionary, Object, PdfName};

/// Common contract of every dictionary view.
pub trait PdfObjectWrapper<'a>: Sized {
    /// Wraps `dict`, reporting advisories to `sink`.
    fn wrap(dict: &'a mut Dictionary, sink: &'a dyn DiagnosticSink) -> Self;

    fn get_object(&self) -> &Dictionary;

    fn get_object_mut(&mut self) -> &mut Dictionary;

    fn sink(&self) -> &dyn DiagnosticSink;

    /// Wraps `dict` with advisories going to `tracing`.
    fn from_dictionary(dict: &'a mut Dictionary) -> Self {
        Self::wrap(dict, tracing_sink())
    }

    /// Writes `key` unconditionally. Every typed setter goes through here.
    fn put(&mut self, key: impl Into<PdfName>, value: impl Into<Object>) -> &mut Self {
        self.get_object_mut().set(key, value);
        self
    }

    fn remove_key(&mut self, key: &str) -> &mut Self {
        self.get_object_mut().remove(key);
        self
    }

    fn advise(&self, kind: AdvisoryKind, message: impl Into<String>) {
        self.sink().report(Advisory::new(kind, message));
    }

    /// Whether the dictionary has to be written as an indirect object.
    fn must_be_indirect(&self) -> bool {
        false
    }
}

/// Declares a view struct over a borrowed dictionary and implements
/// [`PdfObjectWrapper`] for it.
macro_rules! dictionary_view {
    ($(#[$meta:meta])* $vis:vis struct $name:ident; must_be_indirect = $indirect:expr) => {
        $(#[$meta])*
        $vis struct $name<'a> {
            dict: &'a mut $crate::objects::Dictionary,
            sink: &'a dyn $crate::diagnostics::DiagnosticSink,
        }

        impl<'a> $crate::views::PdfObjectWrapper<'a> for $name<'a> {
            fn wrap(
                dict: &'a mut $crate::objects::Dictionary,
                sink: &'a dyn $crate::diagnostics::DiagnosticSink,
            ) -> Self {
                Self { dict, sink }
            }

            fn get_object(&self) -> &$crate::objects::Dictionary {
                &*self.dict
            }

            fn get_object_mut(&mut self) -> &mut $crate::objects::Dictionary {
                &mut *self.dict
            }

            fn sink(&self) -> &dyn $crate::diagnostics::DiagnosticSink {
                self.sink
            }

            fn must_be_indirect(&self) -> bool {
                $indirect
            }
        }

        impl std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("dict", &self.dict)
                    .finish_non_exhaustive()
            }
        }
    };
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $crate::views::dictionary_view!($(#[$meta])* $vis struct $name; must_be_indirect = false);
    };
}

pub(crate) use dictionary_view;
