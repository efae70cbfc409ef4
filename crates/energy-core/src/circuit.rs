//! The circuit aggregate: a set of tiles keyed by position.
//!
//! Power propagation lives in [`crate::propagation`]; this module holds
//! storage, tile-level edits, and grid resizing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::CoreError;
use crate::geometry::{touching_side, GridPosition, TilingKind};
use crate::part::Part;
use crate::rng::ScrambleRng;
use crate::tile::Tile;

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// Height and width of the smallest rectangle anchored at the origin that
/// contains every tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub height: u32,
    pub width: u32,
}

impl Dimension {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Number of cells in the rectangle.
    pub fn area(&self) -> usize {
        self.height as usize * self.width as usize
    }
}

// ---------------------------------------------------------------------------
// Circuit
// ---------------------------------------------------------------------------

/// A grid of tiles sharing one tiling.
///
/// The tiling is fixed either at construction ([`Circuit::with_shape`]) or
/// by the first tile inserted; tiles of another tiling are rejected, so a
/// circuit never mixes shapes. At most one tile occupies each position.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    shape: Option<TilingKind>,
    tiles: BTreeMap<GridPosition, Tile>,
}

impl Circuit {
    /// An empty circuit whose tiling is set by its first tile.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty circuit locked to `shape`.
    pub fn with_shape(shape: TilingKind) -> Self {
        Self {
            shape: Some(shape),
            tiles: BTreeMap::new(),
        }
    }

    /// A circuit locked to `shape` holding one empty tile at the origin.
    pub fn with_origin(shape: TilingKind) -> Self {
        let mut circuit = Self::with_shape(shape);
        circuit.insert_blank(shape, GridPosition::ORIGIN);
        circuit
    }

    /// The tiling of this circuit, if one has been fixed.
    pub fn shape(&self) -> Option<TilingKind> {
        self.shape
    }

    // -- Queries --

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        self.tiles.contains_key(&pos)
    }

    pub fn tile_at(&self, pos: GridPosition) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    pub(crate) fn tile_mut(&mut self, pos: GridPosition) -> Option<&mut Tile> {
        self.tiles.get_mut(&pos)
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.values_mut()
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// All occupied positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.tiles.keys().copied()
    }

    fn tiles_with_part(&self, part: Part) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(move |t| t.part() == part)
    }

    pub fn sources(&self) -> impl Iterator<Item = &Tile> {
        self.tiles_with_part(Part::Source)
    }

    pub fn hotspots(&self) -> impl Iterator<Item = &Tile> {
        self.tiles_with_part(Part::Hotspot)
    }

    pub fn lamps(&self) -> impl Iterator<Item = &Tile> {
        self.tiles_with_part(Part::Lamp)
    }

    pub fn contains_lamp(&self) -> bool {
        self.lamps().next().is_some()
    }

    /// `(max_row + 1, max_col + 1)`, or `(0, 0)` when empty.
    pub fn dimension(&self) -> Dimension {
        self.tiles
            .keys()
            .fold(None, |acc: Option<(u32, u32)>, p| match acc {
                None => Some((p.row(), p.col())),
                Some((r, c)) => Some((r.max(p.row()), c.max(p.col()))),
            })
            .map(|(r, c)| Dimension::new(r + 1, c + 1))
            .unwrap_or_default()
    }

    /// `true` if the circuit is non-empty and square.
    pub fn all_square(&self) -> bool {
        !self.is_empty() && self.shape == Some(TilingKind::Square)
    }

    /// `true` if the circuit is non-empty and hexagonal.
    pub fn all_hexagon(&self) -> bool {
        !self.is_empty() && self.shape == Some(TilingKind::Hexagon)
    }

    // -- Tile set edits --

    /// Insert a tile. Returns `Ok(false)` if its position is taken.
    ///
    /// Fails with [`CoreError::MixedShape`] if the tile's tiling differs
    /// from the circuit's.
    pub fn add_tile(&mut self, tile: Tile) -> Result<bool, CoreError> {
        if let Some(expected) = self.shape {
            if expected != tile.shape() {
                return Err(CoreError::MixedShape {
                    expected,
                    found: tile.shape(),
                });
            }
        }
        let pos = tile.position();
        if self.tiles.contains_key(&pos) {
            return Ok(false);
        }
        self.shape.get_or_insert(tile.shape());
        self.tiles.insert(pos, tile);
        Ok(true)
    }

    /// Delete the tile at `pos`. The origin tile is pinned and never removed.
    pub fn remove_tile(&mut self, pos: GridPosition) -> bool {
        if pos.is_origin() {
            return false;
        }
        self.tiles.remove(&pos).is_some()
    }

    // -- Single tile edits --

    pub fn connect_edge(&mut self, pos: GridPosition, edge: usize) -> bool {
        self.tile_mut(pos).is_some_and(|t| t.connect(edge))
    }

    pub fn disconnect_edge(&mut self, pos: GridPosition, edge: usize) -> bool {
        self.tile_mut(pos).is_some_and(|t| t.disconnect(edge))
    }

    pub fn set_part(&mut self, pos: GridPosition, part: Part) -> bool {
        match self.tile_mut(pos) {
            Some(tile) => {
                tile.set_part(part);
                true
            }
            None => false,
        }
    }

    pub fn clear_tile(&mut self, pos: GridPosition) -> bool {
        match self.tile_mut(pos) {
            Some(tile) => {
                tile.clear();
                true
            }
            None => false,
        }
    }

    /// Rotate the tile at `pos`. `false` if absent or not rotatable.
    pub fn rotate_tile_at(&mut self, pos: GridPosition) -> bool {
        self.tile_mut(pos).is_some_and(Tile::rotate)
    }

    /// Clear every tile, keeping the footprint.
    pub fn clear(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.clear();
        }
    }

    /// Connect the facing edges of two adjacent tiles.
    /// Returns `true` if either flag changed.
    pub fn link(&mut self, a: GridPosition, b: GridPosition) -> bool {
        self.set_link(a, b, true)
    }

    /// Disconnect the facing edges of two adjacent tiles.
    /// Returns `true` if either flag changed.
    pub fn unlink(&mut self, a: GridPosition, b: GridPosition) -> bool {
        self.set_link(a, b, false)
    }

    fn set_link(&mut self, a: GridPosition, b: GridPosition, connected: bool) -> bool {
        let Some(shape) = self.shape else {
            return false;
        };
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let Some(edge) = touching_side(a, b, shape) else {
            return false;
        };
        let near = if connected {
            self.connect_edge(a, edge)
        } else {
            self.disconnect_edge(a, edge)
        };
        let far = if connected {
            self.connect_edge(b, shape.opposite(edge))
        } else {
            self.disconnect_edge(b, shape.opposite(edge))
        };
        near || far
    }

    /// Rotate every rotatable tile by a random, non-zero number of steps.
    pub fn scramble(&mut self, rng: &mut ScrambleRng) {
        for tile in self.tiles.values_mut() {
            if !tile.part().rotatable() {
                continue;
            }
            let steps = rng.range(1, tile.edge_count());
            for _ in 0..steps {
                tile.rotate();
            }
        }
    }

    // -- Resizing --

    /// Tiling used for new cells: the circuit's own, square by default.
    fn resize_shape(&self) -> TilingKind {
        self.shape.unwrap_or(TilingKind::Square)
    }

    fn insert_blank(&mut self, shape: TilingKind, pos: GridPosition) -> bool {
        if self.tiles.contains_key(&pos) {
            return false;
        }
        self.shape.get_or_insert(shape);
        self.tiles.insert(pos, Tile::empty(shape, pos));
        true
    }

    /// Row holding the last cell of `col`. Odd hexagonal columns sit half a
    /// cell lower and hold one cell fewer.
    fn last_row_of(shape: TilingKind, height: u32, col: u32) -> u32 {
        if shape == TilingKind::Hexagon && col % 2 == 1 {
            height.saturating_sub(2)
        } else {
            height.saturating_sub(1)
        }
    }

    /// Row receiving the new cell of `col` when a row is appended. Odd
    /// hexagonal columns grow into row `height - 1`, which on a single-row
    /// grid is already occupied.
    fn next_row_of(shape: TilingKind, height: u32, col: u32) -> u32 {
        if shape == TilingKind::Hexagon && col % 2 == 1 {
            height - 1
        } else {
            height
        }
    }

    /// Append a row of empty tiles below the grid.
    pub fn add_row(&mut self) -> bool {
        let shape = self.resize_shape();
        if self.is_empty() {
            return self.insert_blank(shape, GridPosition::ORIGIN);
        }
        let Dimension { height, width } = self.dimension();
        let mut changed = false;
        for col in 0..width {
            let row = Self::next_row_of(shape, height, col);
            changed |= self.insert_blank(shape, GridPosition::at(row, col));
        }
        changed
    }

    /// Delete the bottom row.
    ///
    /// Refused on a single-row grid, and on a two-row hexagonal grid wider
    /// than it is tall, where odd columns would be left without cells.
    pub fn remove_row(&mut self) -> bool {
        let shape = self.resize_shape();
        let Dimension { height, width } = self.dimension();
        if height <= 1 {
            debug!(height, "refusing to remove the last row");
            return false;
        }
        if shape == TilingKind::Hexagon && height == 2 && width > height {
            debug!(height, width, "refusing to remove a row from a flat hexagonal grid");
            return false;
        }
        let mut changed = false;
        for col in 0..width {
            let row = Self::last_row_of(shape, height, col);
            changed |= self.remove_tile(GridPosition::at(row, col));
        }
        changed
    }

    /// Append a column of empty tiles to the right of the grid.
    ///
    /// Refused on a single-row hexagonal grid.
    pub fn add_column(&mut self) -> bool {
        let shape = self.resize_shape();
        if self.is_empty() {
            return self.insert_blank(shape, GridPosition::ORIGIN);
        }
        let Dimension { height, width } = self.dimension();
        if shape == TilingKind::Hexagon && height == 1 {
            debug!("refusing to add a column to a single-row hexagonal grid");
            return false;
        }
        let mut changed = false;
        for row in 0..=Self::last_row_of(shape, height, width) {
            changed |= self.insert_blank(shape, GridPosition::at(row, width));
        }
        changed
    }

    /// Delete the rightmost column. Refused when only one column is left.
    pub fn remove_column(&mut self) -> bool {
        let Dimension { height, width } = self.dimension();
        if width <= 1 {
            debug!(width, "refusing to remove the last column");
            return false;
        }
        let mut changed = false;
        for row in 0..height {
            changed |= self.remove_tile(GridPosition::at(row, width - 1));
        }
        changed
    }
}
