//! Packed tile cells and read-only tile field access.
//!
//! A cell multiplexes three values into a single `u32`:
//!
//! | bits    | meaning                   |
//! |---------|---------------------------|
//! | 31..=20 | tileset identifier + 1    |
//! | 19..=16 | physics class bits        |
//! | 15..=0  | tile index + 1 (wrapping) |
//!
//! Values below [`COMPOSITE_THRESHOLD`] predate tileset attribution and only
//! carry the legacy sentinels `1` (ground) and `2` (death).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest raw value interpreted as a composite cell.
pub const COMPOSITE_THRESHOLD: u32 = 0x0010_0000;

/// Largest tileset identifier that survives encoding.
///
/// The stored value carries a +1 bias inside 12 bits, so identifier 4095 has
/// no representation and is clamped to this value.
pub const TILESET_ID_MAX: u16 = 0x0ffe;

const TILESET_SHIFT: u32 = 20;
const PHYSICS_SHIFT: u32 = 16;
const TILESET_MASK: u32 = 0x0fff;
const PHYSICS_MASK: u32 = 0x000f;
const INDEX_MASK: u32 = 0xffff;

const LEGACY_GROUND: u32 = 1;
const LEGACY_DEATH: u32 = 2;

/// Collision category attached to a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicsClass {
    /// Tile does not participate in collision.
    #[default]
    None,
    /// Solid tile that entities stand on and are pushed out of.
    Ground,
    /// Tile that kills any entity overlapping it.
    Death,
}

impl PhysicsClass {
    /// Interprets the four physics bits stored in a composite cell.
    ///
    /// Unassigned bit patterns behave like [`PhysicsClass::None`].
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Ground,
            2 => Self::Death,
            _ => Self::None,
        }
    }

    /// Bit pattern used when packing the class into a cell.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Ground => 1,
            Self::Death => 2,
        }
    }

    /// Reports whether the class takes part in collision resolution.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Decoded contents of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileContents {
    /// Cell value zero.
    Empty,
    /// Pre-tileset value; only the physics class is meaningful.
    Legacy {
        /// Class derived from the legacy sentinel.
        physics: PhysicsClass,
    },
    /// Tileset-attributed cell.
    Composite {
        /// Tileset the sprite belongs to.
        tileset: u16,
        /// Raw four-bit physics field.
        physics_bits: u8,
        /// Sprite index within the tileset's sheet.
        tile_index: u16,
    },
}

impl TileContents {
    /// Physics class carried by the contents.
    #[must_use]
    pub const fn physics_class(&self) -> PhysicsClass {
        match self {
            Self::Empty => PhysicsClass::None,
            Self::Legacy { physics } => *physics,
            Self::Composite { physics_bits, .. } => PhysicsClass::from_bits(*physics_bits),
        }
    }
}

/// Single packed tile value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileCell(u32);

impl TileCell {
    /// Cell with no contents.
    pub const EMPTY: Self = Self(0);
    /// Legacy solid ground sentinel.
    pub const LEGACY_GROUND: Self = Self(LEGACY_GROUND);
    /// Legacy death sentinel.
    pub const LEGACY_DEATH: Self = Self(LEGACY_DEATH);

    /// Wraps a raw cell value as stored in level files.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw packed value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Packs a tileset-attributed cell.
    ///
    /// Physics bits beyond the low four are discarded, tileset identifiers
    /// above [`TILESET_ID_MAX`] clamp to it, and the tile index bias wraps so
    /// that every `u16` index is representable.
    #[must_use]
    pub const fn encode(tileset: u16, physics_bits: u8, tile_index: u16) -> Self {
        let tileset = if tileset > TILESET_ID_MAX {
            TILESET_ID_MAX
        } else {
            tileset
        };
        let tileset_field = (tileset as u32 + 1) & TILESET_MASK;
        let physics_field = physics_bits as u32 & PHYSICS_MASK;
        let index_field = (tile_index as u32).wrapping_add(1) & INDEX_MASK;
        Self(
            (tileset_field << TILESET_SHIFT) | (physics_field << PHYSICS_SHIFT) | index_field,
        )
    }

    /// Unpacks the cell.
    #[must_use]
    pub const fn decode(self) -> TileContents {
        let raw = self.0;
        if raw == 0 {
            return TileContents::Empty;
        }

        if raw < COMPOSITE_THRESHOLD {
            let physics = match raw {
                LEGACY_GROUND => PhysicsClass::Ground,
                LEGACY_DEATH => PhysicsClass::Death,
                _ => PhysicsClass::None,
            };
            return TileContents::Legacy { physics };
        }

        let tileset_field = (raw >> TILESET_SHIFT) & TILESET_MASK;
        let physics_field = (raw >> PHYSICS_SHIFT) & PHYSICS_MASK;
        let index_field = raw & INDEX_MASK;
        TileContents::Composite {
            tileset: (tileset_field - 1) as u16,
            physics_bits: physics_field as u8,
            tile_index: (index_field as u16).wrapping_sub(1),
        }
    }

    /// Physics class derived from the encoding.
    #[must_use]
    pub const fn physics_class(self) -> PhysicsClass {
        self.decode().physics_class()
    }

    /// Reports whether the cell holds no contents.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Read-only view over a rectangular grid of packed cells.
///
/// Every query is total: coordinates outside the grid read as
/// [`TileCell::EMPTY`].
#[derive(Clone, Copy, Debug)]
pub struct TileFieldView<'a> {
    cells: &'a [TileCell],
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl<'a> TileFieldView<'a> {
    /// Captures a view over row-major `cells`.
    #[must_use]
    pub const fn new(cells: &'a [TileCell], columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            cells,
            columns,
            rows,
            tile_length,
        }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Edge length of one square tile in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Width of the field in world units.
    #[must_use]
    pub fn pixel_width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Height of the field in world units.
    #[must_use]
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Cell at the given tile coordinates.
    #[must_use]
    pub fn cell(&self, column: i64, row: i64) -> TileCell {
        self.index(column, row)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(TileCell::EMPTY)
    }

    /// Tile coordinates containing `point`, floored toward negative infinity.
    #[must_use]
    pub fn tile_of(&self, point: Vec2) -> (i64, i64) {
        if self.tile_length <= 0.0 {
            return (-1, -1);
        }
        (
            (point.x / self.tile_length).floor() as i64,
            (point.y / self.tile_length).floor() as i64,
        )
    }

    /// Cell containing the world-space `point`.
    #[must_use]
    pub fn world_cell(&self, point: Vec2) -> TileCell {
        let (column, row) = self.tile_of(point);
        self.cell(column, row)
    }

    /// Physics class of the cell containing `point`.
    #[must_use]
    pub fn physics_class_at(&self, point: Vec2) -> PhysicsClass {
        self.world_cell(point).physics_class()
    }

    /// Physics class of the cell at the given tile coordinates.
    #[must_use]
    pub fn physics_class(&self, column: i64, row: i64) -> PhysicsClass {
        self.cell(column, row).physics_class()
    }

    fn index(&self, column: i64, row: i64) -> Option<usize> {
        if column < 0 || row < 0 || column >= i64::from(self.columns) || row >= i64::from(self.rows)
        {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        Some(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_round_trip_preserves_fields() {
        for tileset in [0, 1, 2047, TILESET_ID_MAX] {
            for physics_bits in 0..=PHYSICS_MASK as u8 {
                for tile_index in [0, 1, 0x7fff, 0xfffe, u16::MAX] {
                    let cell = TileCell::encode(tileset, physics_bits, tile_index);
                    assert!(cell.raw() >= COMPOSITE_THRESHOLD);
                    assert_eq!(
                        cell.decode(),
                        TileContents::Composite {
                            tileset,
                            physics_bits,
                            tile_index,
                        },
                        "tileset {tileset}, physics {physics_bits}, index {tile_index}"
                    );
                }
            }
        }
    }

    #[test]
    fn encode_places_fields_at_documented_offsets() {
        let cell = TileCell::encode(2, 1, 4);
        assert_eq!(cell.raw(), (3 << 20) | (1 << 16) | 5);
    }

    #[test]
    fn oversized_inputs_are_clamped_or_masked() {
        let cell = TileCell::encode(u16::MAX, 0xf2, 3);
        assert_eq!(
            cell.decode(),
            TileContents::Composite {
                tileset: TILESET_ID_MAX,
                physics_bits: 2,
                tile_index: 3,
            }
        );
    }

    #[test]
    fn legacy_sentinels_map_to_physics_classes() {
        assert_eq!(TileCell::from_raw(0).decode(), TileContents::Empty);
        assert_eq!(
            TileCell::from_raw(1).physics_class(),
            PhysicsClass::Ground
        );
        assert_eq!(TileCell::from_raw(2).physics_class(), PhysicsClass::Death);
        assert_eq!(
            TileCell::from_raw(3).decode(),
            TileContents::Legacy {
                physics: PhysicsClass::None
            }
        );
        assert_eq!(
            TileCell::from_raw(COMPOSITE_THRESHOLD - 1).physics_class(),
            PhysicsClass::None
        );
    }

    #[test]
    fn unassigned_physics_bits_are_not_solid() {
        let cell = TileCell::encode(1, 7, 1);
        assert_eq!(cell.physics_class(), PhysicsClass::None);
        assert!(!cell.physics_class().is_solid());
    }

    #[test]
    fn view_reads_empty_outside_grid() {
        let cells = vec![TileCell::LEGACY_GROUND; 4];
        let view = TileFieldView::new(&cells, 2, 2, 16.0);

        assert_eq!(view.cell(1, 1), TileCell::LEGACY_GROUND);
        assert_eq!(view.cell(-1, 0), TileCell::EMPTY);
        assert_eq!(view.cell(2, 0), TileCell::EMPTY);
        assert_eq!(view.cell(0, 2), TileCell::EMPTY);
        assert_eq!(
            view.physics_class_at(Vec2::new(40.0, 8.0)),
            PhysicsClass::None
        );
    }

    #[test]
    fn world_coordinates_floor_toward_negative_infinity() {
        let cells = vec![TileCell::LEGACY_DEATH; 4];
        let view = TileFieldView::new(&cells, 2, 2, 16.0);

        assert_eq!(view.tile_of(Vec2::new(-0.5, 15.9)), (-1, 0));
        assert_eq!(view.tile_of(Vec2::new(16.0, 16.0)), (1, 1));
        assert_eq!(
            view.physics_class_at(Vec2::new(-0.5, 4.0)),
            PhysicsClass::None
        );
        assert_eq!(
            view.physics_class_at(Vec2::new(0.0, 4.0)),
            PhysicsClass::Death
        );
    }
}
