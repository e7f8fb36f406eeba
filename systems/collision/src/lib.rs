#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Circle-versus-tile collision resolution.
//!
//! Overlapping ground tiles are resolved one at a time in row-major scan
//! order, each pushing the circle out along its axis of least penetration.
//! A later tile sees the position already corrected by an earlier one, so
//! corners can jitter or let a fast body slip through; that order dependence
//! is part of how the game feels and is kept as is.

use tilerun_core::{PhysicsBody, PhysicsClass, TileFieldView, Vec2};

/// Summary of the tiles a body touched during one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Number of ground tiles the body was pushed out of.
    pub ground: u32,
    /// Whether a death tile was overlapped.
    pub death: bool,
}

/// Axis along which a separation moves the circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal push.
    Horizontal,
    /// Vertical push.
    Vertical,
}

/// Minimal push that moves a circle out of one rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Separation {
    /// Axis of the push.
    pub axis: Axis,
    /// Signed distance along the axis.
    pub offset: f32,
}

/// Resolves `body` against every solid tile under its bounding box.
///
/// Ground overlaps move the body and zero the velocity component on the
/// separating axis. Death overlaps set health to zero without moving it.
pub fn resolve(tiles: TileFieldView<'_>, body: &mut PhysicsBody) -> Contacts {
    let mut contacts = Contacts::default();
    let Some(range) = TileRange::covering(&tiles, body.position, body.radius) else {
        return contacts;
    };
    let tile_length = tiles.tile_length();

    for row in range.min_row..=range.max_row {
        for column in range.min_column..=range.max_column {
            let class = tiles.physics_class(column, row);
            if !class.is_solid() {
                continue;
            }

            let min = Vec2::new(column as f32 * tile_length, row as f32 * tile_length);
            let max = min + Vec2::splat(tile_length);
            if !circle_overlaps_rect(body.position, body.radius, min, max) {
                continue;
            }

            match class {
                PhysicsClass::Death => {
                    body.health = 0;
                    contacts.death = true;
                }
                PhysicsClass::Ground => {
                    let separation = least_penetration(body.position, body.radius, min, max);
                    match separation.axis {
                        Axis::Horizontal => {
                            body.position.x += separation.offset;
                            body.velocity.x = 0.0;
                        }
                        Axis::Vertical => {
                            body.position.y += separation.offset;
                            body.velocity.y = 0.0;
                        }
                    }
                    contacts.ground += 1;
                }
                PhysicsClass::None => {}
            }
        }
    }

    contacts
}

/// Reports whether the tile directly under the circle's lowest point is ground.
#[must_use]
pub fn check_ground_below(tiles: TileFieldView<'_>, position: Vec2, radius: f32) -> bool {
    tiles.physics_class_at(Vec2::new(position.x, position.y + radius)) == PhysicsClass::Ground
}

/// Closest-point test between a circle and an axis-aligned rectangle.
///
/// Touching edges do not count as overlap.
#[must_use]
pub fn circle_overlaps_rect(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    let closest = center.clamp(min, max);
    center.distance_squared(closest) < radius * radius
}

/// Chooses the smallest of the four axis pushes that separate the circle
/// from the rectangle.
///
/// Candidates are tried in the order right, left, down, up; the first
/// strictly smallest wins.
#[must_use]
pub fn least_penetration(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> Separation {
    let candidates = [
        (max.x - (center.x - radius), Axis::Horizontal, 1.0),
        ((center.x + radius) - min.x, Axis::Horizontal, -1.0),
        (max.y - (center.y - radius), Axis::Vertical, 1.0),
        ((center.y + radius) - min.y, Axis::Vertical, -1.0),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.0 < best.0 {
            best = *candidate;
        }
    }

    let (depth, axis, sign) = best;
    Separation {
        axis,
        offset: depth * sign,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TileRange {
    min_column: i64,
    max_column: i64,
    min_row: i64,
    max_row: i64,
}

impl TileRange {
    fn covering(tiles: &TileFieldView<'_>, center: Vec2, radius: f32) -> Option<Self> {
        if tiles.columns() == 0 || tiles.rows() == 0 || !(tiles.tile_length() > 0.0) {
            return None;
        }
        let last_column = i64::from(tiles.columns()) - 1;
        let last_row = i64::from(tiles.rows()) - 1;
        let (min_column, min_row) = tiles.tile_of(center - Vec2::splat(radius));
        let (max_column, max_row) = tiles.tile_of(center + Vec2::splat(radius));

        Some(Self {
            min_column: min_column.clamp(0, last_column),
            max_column: max_column.clamp(0, last_column),
            min_row: min_row.clamp(0, last_row),
            max_row: max_row.clamp(0, last_row),
        })
    }
}
