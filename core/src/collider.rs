//! Collision shapes and the positioned body shared by every entity.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::geometry::{Rectangle, Vector2};

/// Geometric test applied when an entity participates in collision checks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Collides as its full bounding box.
    Square,
    /// Collides as a circle inscribed in a square bounding box.
    Circle {
        /// Radius of the circle in playfield units.
        radius: f32,
    },
}

impl ColliderShape {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle { .. } => "circle",
        }
    }
}

/// Rejection raised while validating a collider against its bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ColliderError {
    /// Circle colliders require a square bounding box.
    #[error("circle collider needs a square box, got {width}x{height}")]
    OvalCircle {
        /// Width of the offending bounding box.
        width: f32,
        /// Height of the offending bounding box.
        height: f32,
    },
}

/// Failure to evaluate a collision between two bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CollisionError {
    /// No geometry is implemented for this combination of shapes.
    #[error("collision between {left} and {right} colliders is not supported")]
    UnsupportedPairing {
        /// Shape of the body performing the test.
        left: &'static str,
        /// Shape of the body being tested against.
        right: &'static str,
    },
}

/// Bounding box plus collider shape; the positioned part of every entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    rect: Rectangle,
    collider: ColliderShape,
}

impl Body {
    /// Validates `collider` against `rect` and builds the body.
    ///
    /// # Errors
    ///
    /// Returns [`ColliderError::OvalCircle`] when a circle is requested on a
    /// non-square box.
    pub fn try_new(rect: Rectangle, collider: ColliderShape) -> Result<Self, ColliderError> {
        if matches!(collider, ColliderShape::Circle { .. })
            && (rect.width() - rect.height()).abs() > f32::EPSILON
        {
            return Err(ColliderError::OvalCircle {
                width: rect.width(),
                height: rect.height(),
            });
        }
        Ok(Self { rect, collider })
    }

    /// Builds the body, coercing an invalid collider to [`ColliderShape::Square`].
    ///
    /// The coercion is reported through `tracing` so the simulation keeps
    /// running with a usable shape.
    #[must_use]
    pub fn new(rect: Rectangle, collider: ColliderShape) -> Self {
        Self::try_new(rect, collider).unwrap_or_else(|error| {
            warn!(%error, "coercing collider to square");
            Self {
                rect,
                collider: ColliderShape::Square,
            }
        })
    }

    /// Builds a body with a square collider.
    #[must_use]
    pub const fn square(rect: Rectangle) -> Self {
        Self {
            rect,
            collider: ColliderShape::Square,
        }
    }

    /// Current bounding box.
    #[must_use]
    pub const fn rect(&self) -> &Rectangle {
        &self.rect
    }

    /// Collider shape in effect.
    #[must_use]
    pub const fn collider(&self) -> ColliderShape {
        self.collider
    }

    /// Moves the bounding box by `delta`.
    pub fn translate(&mut self, delta: Vector2) {
        self.rect = self.rect.translated(delta);
    }

    /// Tests this body against `other`.
    ///
    /// # Errors
    ///
    /// Returns [`CollisionError::UnsupportedPairing`] for any pairing other
    /// than square against square.
    pub fn collides_with(&self, other: &Self) -> Result<bool, CollisionError> {
        match (self.collider, other.collider) {
            (ColliderShape::Square, ColliderShape::Square) => Ok(self.rect.intersects(&other.rect)),
            (left, right) => Err(CollisionError::UnsupportedPairing {
                left: left.name(),
                right: right.name(),
            }),
        }
    }
}

/// Any positioned, collidable simulation object.
pub trait Entity {
    /// Body describing where the entity is and how it collides.
    fn body(&self) -> &Body;

    /// Bounding box of the entity.
    fn rect(&self) -> &Rectangle {
        self.body().rect()
    }

    /// Tests this entity against another.
    ///
    /// # Errors
    ///
    /// Propagates [`CollisionError`] from [`Body::collides_with`].
    fn collides_with<E: Entity + ?Sized>(&self, other: &E) -> Result<bool, CollisionError> {
        self.body().collides_with(other.body())
    }
}

impl Entity for Body {
    fn body(&self) -> &Body {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rectangle {
        Rectangle::new(Vector2::new(x, y), width, height).expect("valid rectangle")
    }

    #[test]
    fn square_circle_is_accepted() {
        let body = Body::try_new(rect(0.0, 0.0, 8.0, 8.0), ColliderShape::Circle { radius: 4.0 })
            .expect("square box accepts a circle");
        assert_eq!(body.collider(), ColliderShape::Circle { radius: 4.0 });
    }

    #[test]
    fn oval_circle_is_rejected() {
        let result = Body::try_new(rect(0.0, 0.0, 8.0, 4.0), ColliderShape::Circle { radius: 4.0 });
        assert_eq!(
            result,
            Err(ColliderError::OvalCircle {
                width: 8.0,
                height: 4.0
            })
        );
    }

    #[test]
    fn oval_circle_is_coerced_to_square() {
        let body = Body::new(rect(0.0, 0.0, 8.0, 4.0), ColliderShape::Circle { radius: 4.0 });
        assert_eq!(body.collider(), ColliderShape::Square);
        assert_eq!(body.rect(), &rect(0.0, 0.0, 8.0, 4.0));
    }

    #[test]
    fn squares_delegate_to_rectangle_intersection() {
        let a = Body::square(rect(0.0, 0.0, 10.0, 10.0));
        let b = Body::square(rect(5.0, 5.0, 10.0, 10.0));
        let c = Body::square(rect(10.0, 0.0, 10.0, 10.0));

        assert_eq!(a.collides_with(&b), Ok(true));
        assert_eq!(a.collides_with(&c), Ok(false));
    }

    #[test]
    fn circle_pairings_are_reported_instead_of_missing() {
        let square = Body::square(rect(0.0, 0.0, 10.0, 10.0));
        let circle = Body::new(rect(0.0, 0.0, 10.0, 10.0), ColliderShape::Circle { radius: 5.0 });

        assert_eq!(
            square.collides_with(&circle),
            Err(CollisionError::UnsupportedPairing {
                left: "square",
                right: "circle"
            })
        );
        assert_eq!(
            circle.collides_with(&circle),
            Err(CollisionError::UnsupportedPairing {
                left: "circle",
                right: "circle"
            })
        );
    }

    #[test]
    fn translate_moves_the_box() {
        let mut body = Body::square(rect(0.0, 0.0, 10.0, 10.0));
        body.translate(Vector2::new(3.0, -2.0));
        assert_eq!(body.rect().upper_left(), Vector2::new(3.0, -2.0));
    }
}
