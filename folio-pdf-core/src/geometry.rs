//! Points and rectangles in default user space.

use crate::error::{PdfError, Result};
use crate::objects::{Array, Object};

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// A rectangle given by its lower-left and upper-right corners, as used by
/// `Rect`, `MediaBox` and `FitR` destinations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub lower_left: Point,
    pub upper_right: Point,
}

impl Rectangle {
    pub fn new(lower_left: Point, upper_right: Point) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    pub fn from_position_and_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            lower_left: Point::new(x, y),
            upper_right: Point::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f64 {
        self.upper_right.x - self.lower_left.x
    }

    pub fn height(&self) -> f64 {
        self.upper_right.y - self.lower_left.y
    }

    /// `[llx lly urx ury]`
    pub fn to_array(&self) -> Array {
        Array::from_numbers([
            self.lower_left.x,
            self.lower_left.y,
            self.upper_right.x,
            self.upper_right.y,
        ])
    }

    /// Reads a four-number rectangle array. Corners are normalized so that
    /// the lower-left one really is lower-left.
    pub fn from_array(array: &Array) -> Result<Self> {
        match array.to_numbers().as_deref() {
            Some(&[x1, y1, x2, y2]) => Ok(Self::new(
                Point::new(x1.min(x2), y1.min(y2)),
                Point::new(x1.max(x2), y1.max(y2)),
            )),
            _ => Err(PdfError::InvalidValue {
                key: "Rect".to_string(),
                reason: format!("expected 4 numbers, got {} elements", array.len()),
            }),
        }
    }
}

impl From<Rectangle> for Object {
    fn from(rect: Rectangle) -> Self {
        Object::Array(rect.to_array())
    }
}
