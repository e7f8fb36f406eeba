//! Owned storage of the level's packed tile cells.

use tilerun_core::{TileCell, TileFieldView};

/// Rectangular grid of packed tile cells in row-major order.
#[derive(Clone, Debug)]
pub struct TileField {
    columns: u32,
    rows: u32,
    tile_length: f32,
    cells: Vec<TileCell>,
}

impl TileField {
    /// Creates a field holding the provided cells.
    ///
    /// The cell vector is padded with empty cells or truncated so that it
    /// holds exactly `columns * rows` entries.
    #[must_use]
    pub(crate) fn new(columns: u32, rows: u32, tile_length: f32, mut cells: Vec<TileCell>) -> Self {
        let len = columns as usize * rows as usize;
        cells.resize(len, TileCell::EMPTY);
        Self {
            columns,
            rows,
            tile_length,
            cells,
        }
    }

    /// Field with no cells.
    #[must_use]
    pub(crate) fn empty(tile_length: f32) -> Self {
        Self::new(0, 0, tile_length, Vec::new())
    }

    /// Number of columns contained in the field.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the field.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the field measured in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the field measured in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Row-major cells.
    #[must_use]
    pub fn cells(&self) -> &[TileCell] {
        &self.cells
    }

    /// Borrowed view consumed by the collision and AI systems.
    #[must_use]
    pub fn view(&self) -> TileFieldView<'_> {
        TileFieldView::new(&self.cells, self.columns, self.rows, self.tile_length)
    }

    /// Overwrites one cell, returning whether the coordinates were inside the field.
    pub(crate) fn set(&mut self, column: u32, row: u32, cell: TileCell) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        let index = row as usize * self.columns as usize + column as usize;
        self.cells[index] = cell;
        true
    }
}
