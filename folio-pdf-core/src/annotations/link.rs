//! Link annotations (ISO 32000-1 Section 12.5.6.5)
//!
//! A link either jumps to a destination (`Dest`) or runs an action (`A`),
//! never both. Setting one through the typed setters removes the other and
//! reports an advisory.

use crate::actions::{Action, Destination};
use crate::annotations::annotation::{AnnotationType, AnnotationView, BorderStyleType};
use crate::diagnostics::AdvisoryKind;
use crate::error::{PdfError, Result};
use crate::geometry::Rectangle;
use crate::objects::{Array, Dictionary, Object};
use crate::views::{dictionary_view, PdfObjectWrapper};

/// Visual effect when the link is activated (`H` entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightMode {
    None,
    #[default]
    Invert,
    Outline,
    /// Push (3D effect)
    Push,
}

impl HighlightMode {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            HighlightMode::None => "N",
            HighlightMode::Invert => "I",
            HighlightMode::Outline => "O",
            HighlightMode::Push => "P",
        }
    }

    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "N" => Some(HighlightMode::None),
            "I" => Some(HighlightMode::Invert),
            "O" => Some(HighlightMode::Outline),
            "P" => Some(HighlightMode::Push),
            _ => None,
        }
    }
}

dictionary_view! {
    /// View over a link annotation dictionary.
    pub struct LinkAnnotation;
}

impl<'a> AnnotationView<'a> for LinkAnnotation<'a> {}

impl LinkAnnotation<'_> {
    /// Builds a new link annotation dictionary covering `rect`.
    pub fn create(rect: Rectangle) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Annot"));
        dict.set("Subtype", Object::name(AnnotationType::Link.pdf_name()));
        dict.set("Rect", rect);
        dict
    }

    /// The raw `Dest` entry: an explicit destination array, or the name or
    /// string of a named destination.
    pub fn destination_object(&self) -> Option<&Object> {
        self.dict.get("Dest")
    }

    /// Sets `Dest`, removing any action.
    ///
    /// A destination array that starts with a page number is written but
    /// reported, since a page index only makes sense for a remote document.
    pub fn set_destination(&mut self, destination: Object) -> Result<&mut Self> {
        if !matches!(
            destination,
            Object::Array(_) | Object::Name(_) | Object::String(_)
        ) {
            return Err(PdfError::WrongObjectKind {
                key: "Dest".to_string(),
                expected: "array, name or string",
                found: destination.kind().as_str(),
            });
        }

        if self.dict.remove("A").is_some() {
            self.advise(
                AdvisoryKind::DestinationReplacesAction,
                "destination set on a link annotation with an action; the action was removed",
            );
        }
        if let Object::Array(array) = &destination {
            if array.first().is_some_and(Object::is_number) {
                self.advise(
                    AdvisoryKind::InvalidDestinationType,
                    "link destination addresses its page by number instead of by reference",
                );
            }
        }
        Ok(self.put("Dest", destination))
    }

    pub fn set_destination_from(&mut self, destination: &Destination) -> Result<&mut Self> {
        self.set_destination(destination.to_object())
    }

    pub fn remove_destination(&mut self) -> &mut Self {
        self.remove_key("Dest")
    }

    pub fn action(&self) -> Option<&Dictionary> {
        self.dict.get_dict("A")
    }

    /// Writes `A` as given. Unlike [`set_action_from`](Self::set_action_from)
    /// this leaves an existing `Dest` in place.
    pub fn set_action(&mut self, action: Dictionary) -> &mut Self {
        self.put("A", action)
    }

    /// Sets `A` from a built action, removing any destination.
    pub fn set_action_from(&mut self, action: &Action) -> &mut Self {
        if self.dict.remove("Dest").is_some() {
            self.advise(
                AdvisoryKind::ActionReplacesDestination,
                "action set on a link annotation with a destination; the destination was removed",
            );
        }
        self.put("A", action.to_dict())
    }

    pub fn remove_action(&mut self) -> &mut Self {
        self.remove_key("A")
    }

    /// `None` when `H` is absent; readers then use [`HighlightMode::Invert`].
    pub fn highlight_mode(&self) -> Option<HighlightMode> {
        self.dict
            .get_name("H")
            .and_then(|name| name.as_str())
            .and_then(HighlightMode::from_pdf_name)
    }

    pub fn set_highlight_mode(&mut self, mode: HighlightMode) -> &mut Self {
        self.put("H", Object::name(mode.pdf_name()))
    }

    /// The `PA` URI action, kept for the benefit of accessibility tools.
    pub fn uri_action(&self) -> Option<&Dictionary> {
        self.dict.get_dict("PA")
    }

    pub fn set_uri_action(&mut self, action: Dictionary) -> &mut Self {
        self.put("PA", action)
    }

    pub fn quad_points(&self) -> Option<Vec<f64>> {
        self.dict.get_array("QuadPoints").and_then(Array::to_numbers)
    }

    /// Each quadrilateral takes 8 numbers.
    pub fn set_quad_points(&mut self, points: &[f64]) -> Result<&mut Self> {
        if points.len() % 8 != 0 {
            return Err(PdfError::InvalidArrayLength {
                key: "QuadPoints".to_string(),
                len: points.len(),
                multiple: 8,
            });
        }
        Ok(self.put("QuadPoints", Array::from_numbers(points.iter().copied())))
    }

    pub fn border_style(&self) -> Option<&Dictionary> {
        self.dict.get_dict("BS")
    }

    pub fn set_border_style(&mut self, border_style: Dictionary) -> &mut Self {
        self.put("BS", border_style)
    }

    /// Sets `BS/S`, creating the border style dictionary when needed.
    pub fn set_border_style_preset(&mut self, style: BorderStyleType) -> Result<&mut Self> {
        self.dict
            .get_or_insert_dict("BS")?
            .set("S", Object::name(style.pdf_name()));
        Ok(self)
    }

    /// Sets `BS/D`, creating the border style dictionary when needed.
    pub fn set_dash_pattern(&mut self, dash: &[f64]) -> Result<&mut Self> {
        self.dict
            .get_or_insert_dict("BS")?
            .set("D", Array::from_numbers(dash.iter().copied()));
        Ok(self)
    }
}
