#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that validates tower footprints before construction.
//!
//! Validation never mutates funds or the tower collection; the world pays
//! for and appends a tower only after [`placement_check`] succeeds.

use hq_defence_core::{GeometryError, PlacementError, Rectangle, TowerKind, Vector2};

/// Minimum balance below which the placement preview is always shown invalid.
pub const BLUEPRINT_MIN_FUNDS: u32 = 40;

/// Declarative placement preview describing a potential tower construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Kind of tower proposed for placement.
    pub kind: TowerKind,
    /// Footprint the tower would occupy if placed.
    pub rect: Rectangle,
    /// Indicates whether the preview should be drawn as a valid location.
    pub placeable: bool,
}

/// Footprint of a `kind` tower centered on `center`.
///
/// # Errors
///
/// Propagates [`GeometryError::DegenerateSize`], which the tower catalog
/// never triggers.
pub fn footprint(center: Vector2, kind: TowerKind) -> Result<Rectangle, GeometryError> {
    Rectangle::centered(center, kind.size())
}

/// Validates a tower placement against the HQ, existing towers, and funds.
///
/// Checks run in that order and the first failure is reported.
///
/// # Errors
///
/// Returns the [`PlacementError`] describing the first failed check.
pub fn placement_check<'a, I>(
    footprint: &Rectangle,
    cost: u32,
    hq: &Rectangle,
    towers: I,
    funds: u32,
) -> Result<(), PlacementError>
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    if footprint.intersects(hq) {
        return Err(PlacementError::OverlapsHq);
    }

    if towers.into_iter().any(|tower| footprint.intersects(tower)) {
        return Err(PlacementError::OverlapsTower);
    }

    if funds < cost {
        return Err(PlacementError::InsufficientFunds { cost, funds });
    }

    Ok(())
}

/// Reports whether a `kind` tower centered on `center` may be placed.
#[must_use]
pub fn can_place<'a, I>(
    center: Vector2,
    kind: TowerKind,
    hq: &Rectangle,
    towers: I,
    funds: u32,
) -> bool
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    footprint(center, kind)
        .map(|rect| placement_check(&rect, kind.cost(), hq, towers, funds).is_ok())
        .unwrap_or(false)
}

/// Reports whether the placement preview should be drawn as valid.
///
/// Mirrors [`can_place`] and additionally requires the balance to reach
/// [`BLUEPRINT_MIN_FUNDS`].
#[must_use]
pub fn blueprint_is_valid<'a, I>(
    center: Vector2,
    kind: TowerKind,
    hq: &Rectangle,
    towers: I,
    funds: u32,
) -> bool
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    funds >= BLUEPRINT_MIN_FUNDS && can_place(center, kind, hq, towers, funds)
}

/// Builds the preview a presentation layer draws under the cursor.
///
/// Returns `None` only when the footprint cannot be formed.
#[must_use]
pub fn preview<'a, I>(
    center: Vector2,
    kind: TowerKind,
    hq: &Rectangle,
    towers: I,
    funds: u32,
) -> Option<PlacementPreview>
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    let rect = footprint(center, kind).ok()?;
    Some(PlacementPreview {
        kind,
        rect,
        placeable: blueprint_is_valid(center, kind, hq, towers, funds),
    })
}
