//! Planar value types used by every entity in the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures raised by geometric operations that have no defined result.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GeometryError {
    /// A vector without a direction (zero or non-finite length) was normalized.
    #[error("cannot normalize a vector of length {length}")]
    ZeroLength {
        /// Length reported for the offending vector.
        length: f32,
    },
    /// A rectangle was requested with a non-positive or non-finite extent.
    #[error("rectangle size {width}x{height} must be positive and finite")]
    DegenerateSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

/// Two-dimensional vector measured in playfield units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component, growing to the right.
    pub x: f32,
    /// Vertical component, growing downward.
    pub y: f32,
}

impl Vector2 {
    /// Vector with both components set to zero.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum of `self` and `other`.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Multiplies both components by `factor`.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit vector pointing in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroLength`] when the vector has no direction,
    /// which would otherwise yield NaN components.
    pub fn normalized(self) -> Result<Self, GeometryError> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(GeometryError::ZeroLength { length });
        }
        Ok(Self::new(self.x / length, self.y / length))
    }
}

/// Axis-aligned bounding box anchored at its upper-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    upper_left: Vector2,
    width: f32,
    height: f32,
}

impl Rectangle {
    /// Creates a rectangle from its upper-left corner and extent.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateSize`] unless both dimensions are
    /// positive and finite.
    pub fn new(upper_left: Vector2, width: f32, height: f32) -> Result<Self, GeometryError> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(GeometryError::DegenerateSize { width, height });
        }
        Ok(Self {
            upper_left,
            width,
            height,
        })
    }

    /// Creates a rectangle of `size` whose center lies at `center`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Rectangle::new`].
    pub fn centered(center: Vector2, size: Vector2) -> Result<Self, GeometryError> {
        let upper_left = center.subtract(size.scale(0.5));
        Self::new(upper_left, size.x, size.y)
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn upper_left(&self) -> Vector2 {
        self.upper_left
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// X coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.upper_left.x
    }

    /// Y coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.upper_left.y
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.upper_left.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.upper_left.y + self.height
    }

    /// Geometric center.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        Vector2::new(
            self.upper_left.x + self.width / 2.0,
            self.upper_left.y + self.height / 2.0,
        )
    }

    /// Returns the rectangle moved by `delta`, keeping its size.
    #[must_use]
    pub fn translated(&self, delta: Vector2) -> Self {
        Self {
            upper_left: self.upper_left.add(delta),
            ..*self
        }
    }

    /// Reports whether the interiors of the two rectangles overlap.
    ///
    /// Rectangles that only share an edge or a corner do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Visible simulation area spanning `0..width` by `0..height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    /// Horizontal extent of the playfield.
    pub width: f32,
    /// Vertical extent of the playfield.
    pub height: f32,
}

impl Playfield {
    /// Creates a playfield description.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reports whether `rect` lies completely beyond one of the playfield edges.
    ///
    /// A rectangle still overlapping the playfield by any amount, or merely
    /// touching an edge from outside, is not considered outside.
    #[must_use]
    pub fn is_fully_outside(&self, rect: &Rectangle) -> bool {
        rect.bottom() < 0.0
            || rect.top() > self.height
            || rect.right() < 0.0
            || rect.left() > self.width
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
