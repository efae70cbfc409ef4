//! Read-only access to a circuit for renderers.

use crate::circuit::{Circuit, Dimension};
use crate::geometry::{GridPosition, TilingKind};
use crate::tile::Tile;

/// Borrowed, read-only view of a [`Circuit`].
///
/// Front ends draw from this without being able to edit the puzzle.
#[derive(Debug, Clone, Copy)]
pub struct CircuitView<'a> {
    circuit: &'a Circuit,
}

impl<'a> CircuitView<'a> {
    pub fn new(circuit: &'a Circuit) -> Self {
        Self { circuit }
    }

    pub fn dimension(&self) -> Dimension {
        self.circuit.dimension()
    }

    pub fn shape(&self) -> Option<TilingKind> {
        self.circuit.shape()
    }

    pub fn all_square(&self) -> bool {
        self.circuit.all_square()
    }

    pub fn all_hexagon(&self) -> bool {
        self.circuit.all_hexagon()
    }

    pub fn tile_at(&self, pos: GridPosition) -> Option<&'a Tile> {
        self.circuit.tile_at(pos)
    }

    /// Every tile, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = &'a Tile> + 'a {
        self.circuit.tiles()
    }

    pub fn is_solved(&self) -> bool {
        self.circuit.is_solved()
    }

    /// Rows of the bounding rectangle, each with one slot per column.
    /// Cells without a tile are `None`.
    pub fn rows(&self) -> Vec<Vec<Option<&'a Tile>>> {
        let Dimension { height, width } = self.dimension();
        (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| self.circuit.tile_at(GridPosition::at(row, col)))
                    .collect()
            })
            .collect()
    }
}

impl Circuit {
    pub fn view(&self) -> CircuitView<'_> {
        CircuitView::new(self)
    }
}
