//! Entries shared by every annotation dictionary (ISO 32000-1 Section 12.5.2)

use crate::date::{format_pdf_date, parse_pdf_date};
use crate::diagnostics::AdvisoryKind;
use crate::error::{PdfError, Result};
use crate::geometry::Rectangle;
use crate::objects::{Array, Dictionary, Object, ObjectId, PdfString};
use crate::views::{dictionary_view, PdfObjectWrapper};
use bitflags::bitflags;
use chrono::{DateTime, Utc};

/// Annotation subtypes according to ISO 32000-1 Table 169
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationType {
    Text,
    Link,
    FreeText,
    Line,
    Square,
    Circle,
    Polygon,
    PolyLine,
    Highlight,
    Underline,
    Squiggly,
    StrikeOut,
    Stamp,
    Caret,
    Ink,
    Popup,
    FileAttachment,
    Sound,
    Movie,
    /// Form field
    Widget,
    Screen,
    PrinterMark,
    TrapNet,
    Watermark,
}

const ANNOTATION_TYPES: [AnnotationType; 24] = [
    AnnotationType::Text,
    AnnotationType::Link,
    AnnotationType::FreeText,
    AnnotationType::Line,
    AnnotationType::Square,
    AnnotationType::Circle,
    AnnotationType::Polygon,
    AnnotationType::PolyLine,
    AnnotationType::Highlight,
    AnnotationType::Underline,
    AnnotationType::Squiggly,
    AnnotationType::StrikeOut,
    AnnotationType::Stamp,
    AnnotationType::Caret,
    AnnotationType::Ink,
    AnnotationType::Popup,
    AnnotationType::FileAttachment,
    AnnotationType::Sound,
    AnnotationType::Movie,
    AnnotationType::Widget,
    AnnotationType::Screen,
    AnnotationType::PrinterMark,
    AnnotationType::TrapNet,
    AnnotationType::Watermark,
];

impl AnnotationType {
    /// Get PDF subtype name
    pub fn pdf_name(&self) -> &'static str {
        match self {
            AnnotationType::Text => "Text",
            AnnotationType::Link => "Link",
            AnnotationType::FreeText => "FreeText",
            AnnotationType::Line => "Line",
            AnnotationType::Square => "Square",
            AnnotationType::Circle => "Circle",
            AnnotationType::Polygon => "Polygon",
            AnnotationType::PolyLine => "PolyLine",
            AnnotationType::Highlight => "Highlight",
            AnnotationType::Underline => "Underline",
            AnnotationType::Squiggly => "Squiggly",
            AnnotationType::StrikeOut => "StrikeOut",
            AnnotationType::Stamp => "Stamp",
            AnnotationType::Caret => "Caret",
            AnnotationType::Ink => "Ink",
            AnnotationType::Popup => "Popup",
            AnnotationType::FileAttachment => "FileAttachment",
            AnnotationType::Sound => "Sound",
            AnnotationType::Movie => "Movie",
            AnnotationType::Widget => "Widget",
            AnnotationType::Screen => "Screen",
            AnnotationType::PrinterMark => "PrinterMark",
            AnnotationType::TrapNet => "TrapNet",
            AnnotationType::Watermark => "Watermark",
        }
    }

    pub fn from_pdf_name(name: &str) -> Option<Self> {
        ANNOTATION_TYPES
            .iter()
            .copied()
            .find(|annotation_type| annotation_type.pdf_name() == name)
    }
}

bitflags! {
    /// Annotation flags (`F` entry, ISO 32000-1 Table 165)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AnnotationFlags: u32 {
        const INVISIBLE = 1 << 0;
        const HIDDEN = 1 << 1;
        const PRINT = 1 << 2;
        const NO_ZOOM = 1 << 3;
        const NO_ROTATE = 1 << 4;
        const NO_VIEW = 1 << 5;
        const READ_ONLY = 1 << 6;
        const LOCKED = 1 << 7;
        const TOGGLE_NO_VIEW = 1 << 8;
        const LOCKED_CONTENTS = 1 << 9;
    }
}

/// Border style (`S` entry of a border style dictionary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyleType {
    #[default]
    Solid,
    Dashed,
    Beveled,
    Inset,
    /// Bottom edge only
    Underline,
}

impl BorderStyleType {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BorderStyleType::Solid => "S",
            BorderStyleType::Dashed => "D",
            BorderStyleType::Beveled => "B",
            BorderStyleType::Inset => "I",
            BorderStyleType::Underline => "U",
        }
    }

    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "S" => Some(BorderStyleType::Solid),
            "D" => Some(BorderStyleType::Dashed),
            "B" => Some(BorderStyleType::Beveled),
            "I" => Some(BorderStyleType::Inset),
            "U" => Some(BorderStyleType::Underline),
            _ => None,
        }
    }
}

/// Owned border style, written as a `BS` dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderStyle {
    /// Width in points
    pub width: f64,
    pub style: BorderStyleType,
    pub dash_pattern: Option<Vec<f64>>,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            style: BorderStyleType::Solid,
            dash_pattern: None,
        }
    }
}

impl BorderStyle {
    pub fn to_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Border"));
        dict.set("W", self.width);
        dict.set("S", Object::name(self.style.pdf_name()));
        if let Some(dash) = &self.dash_pattern {
            dict.set("D", Array::from_numbers(dash.iter().copied()));
        }
        dict
    }
}

/// Accessors every annotation dictionary supports.
///
/// All methods have default implementations on top of
/// [`PdfObjectWrapper`]; an annotation view opts in with an empty impl.
pub trait AnnotationView<'a>: PdfObjectWrapper<'a> {
    /// `None` when `Subtype` is missing or unknown.
    fn subtype(&self) -> Option<AnnotationType> {
        self.get_object()
            .get_name("Subtype")
            .and_then(|name| name.as_str())
            .and_then(AnnotationType::from_pdf_name)
    }

    /// `None` when `Rect` is missing or not four numbers.
    fn rect(&self) -> Option<Rectangle> {
        self.get_object()
            .get_array("Rect")
            .and_then(|rect| Rectangle::from_array(rect).ok())
    }

    fn set_rect(&mut self, rect: Rectangle) -> &mut Self {
        self.put("Rect", rect)
    }

    fn contents(&self) -> Option<String> {
        self.get_object().get_string("Contents").map(PdfString::to_text)
    }

    fn set_contents(&mut self, contents: &str) -> &mut Self {
        self.put("Contents", PdfString::from_text(contents))
    }

    /// Annotation name (`NM`), unique among the annotations of a page.
    fn name(&self) -> Option<String> {
        self.get_object().get_string("NM").map(PdfString::to_text)
    }

    fn set_name(&mut self, name: &str) -> &mut Self {
        self.put("NM", PdfString::from_text(name))
    }

    /// Unknown bits are dropped. A missing `F` means no flags.
    fn flags(&self) -> AnnotationFlags {
        self.get_object()
            .get("F")
            .and_then(Object::as_i64)
            .map(|bits| AnnotationFlags::from_bits_truncate(bits as u32))
            .unwrap_or_default()
    }

    fn set_flags(&mut self, flags: AnnotationFlags) -> &mut Self {
        self.put("F", flags.bits())
    }

    /// Colour components (`C`): empty for transparent, then gray, RGB or CMYK.
    fn color(&self) -> Option<Vec<f64>> {
        self.get_object().get_array("C").and_then(Array::to_numbers)
    }

    /// Writes `C`. Only 0, 1, 3 or 4 components are allowed; components
    /// outside `0..=1` are written but reported.
    fn set_color(&mut self, components: &[f64]) -> Result<&mut Self> {
        if !matches!(components.len(), 0 | 1 | 3 | 4) {
            return Err(PdfError::InvalidValue {
                key: "C".to_string(),
                reason: format!("{} colour components, expected 0, 1, 3 or 4", components.len()),
            });
        }
        if components.iter().any(|c| !(0.0..=1.0).contains(c)) {
            self.advise(
                AdvisoryKind::SuspiciousValue,
                format!("colour components {components:?} outside 0..1"),
            );
        }
        Ok(self.put("C", Array::from_numbers(components.iter().copied())))
    }

    /// Page the annotation is placed on (`P`).
    fn page(&self) -> Option<ObjectId> {
        self.get_object().get_reference("P")
    }

    fn set_page(&mut self, page: ObjectId) -> &mut Self {
        self.put("P", page)
    }

    /// `None` when `M` is missing or not a PDF date.
    fn modified(&self) -> Option<DateTime<Utc>> {
        let text = self.get_object().get_string("M")?.to_text();
        parse_pdf_date(&text).ok()
    }

    fn set_modified(&mut self, date: DateTime<Utc>) -> &mut Self {
        self.put("M", PdfString::from_text(&format_pdf_date(date)))
    }

    /// `Border` as `[horizontal_radius vertical_radius width]`, followed by a
    /// dash array when one is present.
    fn border(&self) -> Option<Array> {
        self.get_object().get_array("Border").cloned()
    }

    fn set_border(&mut self, horizontal_radius: f64, vertical_radius: f64, width: f64) -> &mut Self {
        self.put(
            "Border",
            Array::from_numbers([horizontal_radius, vertical_radius, width]),
        )
    }
}

dictionary_view! {
    /// View over an annotation of any subtype.
    pub struct Annotation;
}

impl<'a> AnnotationView<'a> for Annotation<'a> {}

impl Annotation<'_> {
    /// Builds a bare annotation dictionary: `Type`, `Subtype` and `Rect`.
    pub fn create(annotation_type: AnnotationType, rect: Rectangle) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Annot"));
        dict.set("Subtype", Object::name(annotation_type.pdf_name()));
        dict.set("Rect", rect);
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::geometry::Point;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn square() -> Dictionary {
        Annotation::create(
            AnnotationType::Square,
            Rectangle::new(Point::new(10.0, 20.0), Point::new(110.0, 70.0)),
        )
    }

    #[test]
    fn test_annotation_type_names() {
        assert_eq!(AnnotationType::Link.pdf_name(), "Link");
        assert_eq!(AnnotationType::from_pdf_name("FreeText"), Some(AnnotationType::FreeText));
        assert_eq!(AnnotationType::from_pdf_name("Sticky"), None);
    }

    #[test]
    fn test_create_and_subtype() {
        let mut dict = square();
        let view = Annotation::from_dictionary(&mut dict);
        assert_eq!(view.subtype(), Some(AnnotationType::Square));
        assert_eq!(view.rect().map(|r| r.width()), Some(100.0));
        assert_eq!(view.get_object().get_name("Type").unwrap(), &"Annot");
    }

    #[test]
    fn test_text_entries() {
        let mut dict = square();
        let mut view = Annotation::from_dictionary(&mut dict);
        view.set_contents("Résumé").set_name("annot-1");

        assert_eq!(view.contents().as_deref(), Some("Résumé"));
        assert_eq!(view.name().as_deref(), Some("annot-1"));
    }

    #[test]
    fn test_flags() {
        let mut dict = square();
        let mut view = Annotation::from_dictionary(&mut dict);
        assert!(view.flags().is_empty());

        view.set_flags(AnnotationFlags::PRINT | AnnotationFlags::NO_ZOOM);
        assert_eq!(view.get_object().get_number("F"), Some(12.0));
        assert!(view.flags().contains(AnnotationFlags::PRINT));
    }

    #[test]
    fn test_color_lengths() {
        let sink = CollectingSink::new();
        let mut dict = square();
        let mut view = Annotation::wrap(&mut dict, &sink);

        view.set_color(&[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(view.color(), Some(vec![1.0, 0.0, 0.0]));
        view.set_color(&[]).unwrap();
        assert_eq!(view.color(), Some(vec![]));

        let result = view.set_color(&[0.5, 0.5]);
        assert!(matches!(result, Err(PdfError::InvalidValue { .. })));
        assert_eq!(view.color(), Some(vec![]));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_out_of_range_color_is_reported() {
        let sink = CollectingSink::new();
        let mut dict = square();
        let mut view = Annotation::wrap(&mut dict, &sink);

        view.set_color(&[255.0]).unwrap();
        assert_eq!(view.color(), Some(vec![255.0]));
        assert_eq!(sink.kinds(), vec![AdvisoryKind::SuspiciousValue]);
    }

    #[test]
    fn test_page_and_modified() {
        let mut dict = square();
        let mut view = Annotation::from_dictionary(&mut dict);
        let date = Utc.with_ymd_and_hms(2024, 2, 29, 13, 5, 0).unwrap();

        view.set_page(ObjectId::new(3, 0)).set_modified(date);
        assert_eq!(view.page(), Some(ObjectId::new(3, 0)));
        assert_eq!(view.modified(), Some(date));
        assert_eq!(
            view.get_object().get_string("M").map(|s| s.to_text()),
            Some("D:20240229130500+00'00".to_string())
        );
    }

    #[test]
    fn test_border() {
        let mut dict = square();
        let mut view = Annotation::from_dictionary(&mut dict);
        assert!(view.border().is_none());

        view.set_border(0.0, 0.0, 2.0);
        assert_eq!(
            view.border().and_then(|b| b.to_numbers()),
            Some(vec![0.0, 0.0, 2.0])
        );
    }

    #[test]
    fn test_border_style_dict() {
        let style = BorderStyle {
            width: 2.0,
            style: BorderStyleType::Dashed,
            dash_pattern: Some(vec![3.0, 1.0]),
        };
        let dict = style.to_dict();
        assert_eq!(dict.get_name("S").unwrap(), &"D");
        assert_eq!(dict.get_array("D").and_then(Array::to_numbers), Some(vec![3.0, 1.0]));
        assert_eq!(BorderStyleType::from_pdf_name("U"), Some(BorderStyleType::Underline));
    }
}
