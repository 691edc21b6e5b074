//! Explicit destinations (ISO 32000-1 Section 12.3.2)

use crate::geometry::Rectangle;
use crate::objects::{Array, Object, ObjectId};

/// How the target page is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationType {
    /// Display page with coordinates (left, top) at upper-left corner
    XYZ {
        left: Option<f64>,
        top: Option<f64>,
        zoom: Option<f64>,
    },
    /// Fit entire page in window
    Fit,
    FitH { top: Option<f64> },
    FitV { left: Option<f64> },
    FitR { rect: Rectangle },
    /// Fit page bounding box in window
    FitB,
    FitBH { top: Option<f64> },
    FitBV { left: Option<f64> },
}

impl DestinationType {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            DestinationType::XYZ { .. } => "XYZ",
            DestinationType::Fit => "Fit",
            DestinationType::FitH { .. } => "FitH",
            DestinationType::FitV { .. } => "FitV",
            DestinationType::FitR { .. } => "FitR",
            DestinationType::FitB => "FitB",
            DestinationType::FitBH { .. } => "FitBH",
            DestinationType::FitBV { .. } => "FitBV",
        }
    }
}

/// Target page of a destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageDestination {
    /// Page index (0-based). Only valid in remote go-to actions; a link
    /// annotation using this form gets an advisory.
    PageNumber(u32),
    PageRef(ObjectId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub page: PageDestination,
    pub dest_type: DestinationType,
}

impl Destination {
    pub fn xyz(
        page: PageDestination,
        left: Option<f64>,
        top: Option<f64>,
        zoom: Option<f64>,
    ) -> Self {
        Self {
            page,
            dest_type: DestinationType::XYZ { left, top, zoom },
        }
    }

    pub fn fit(page: PageDestination) -> Self {
        Self {
            page,
            dest_type: DestinationType::Fit,
        }
    }

    pub fn fit_h(page: PageDestination, top: Option<f64>) -> Self {
        Self {
            page,
            dest_type: DestinationType::FitH { top },
        }
    }

    pub fn fit_v(page: PageDestination, left: Option<f64>) -> Self {
        Self {
            page,
            dest_type: DestinationType::FitV { left },
        }
    }

    pub fn fit_r(page: PageDestination, rect: Rectangle) -> Self {
        Self {
            page,
            dest_type: DestinationType::FitR { rect },
        }
    }

    pub fn fit_b(page: PageDestination) -> Self {
        Self {
            page,
            dest_type: DestinationType::FitB,
        }
    }

    /// `[page /Type params...]`, with `null` for unspecified parameters.
    pub fn to_array(&self) -> Array {
        let mut arr = Array::new();

        match self.page {
            PageDestination::PageNumber(num) => arr.push(num),
            PageDestination::PageRef(id) => arr.push(id),
        }
        arr.push(Object::name(self.dest_type.pdf_name()));

        let optional = |value: Option<f64>| value.map(Object::Number).unwrap_or(Object::Null);
        match &self.dest_type {
            DestinationType::XYZ { left, top, zoom } => {
                arr.push(optional(*left));
                arr.push(optional(*top));
                arr.push(optional(*zoom));
            }
            DestinationType::Fit | DestinationType::FitB => {}
            DestinationType::FitH { top } | DestinationType::FitBH { top } => {
                arr.push(optional(*top));
            }
            DestinationType::FitV { left } | DestinationType::FitBV { left } => {
                arr.push(optional(*left));
            }
            DestinationType::FitR { rect } => {
                arr.push(rect.lower_left.x);
                arr.push(rect.lower_left.y);
                arr.push(rect.upper_right.x);
                arr.push(rect.upper_right.y);
            }
        }

        arr
    }

    pub fn to_object(&self) -> Object {
        Object::Array(self.to_array())
    }
}
