//! Circuit fixtures: blank grids in either tiling and a few small solved
//! puzzles. Unit tests use them directly; integration tests and benches
//! reach them through the `test-utils` feature.

use crate::circuit::Circuit;
use crate::geometry::{GridPosition, TilingKind};
use crate::part::Part;
use crate::tile::Tile;

// ===========================================================================
// Positions
// ===========================================================================

pub fn pos(row: u32, col: u32) -> GridPosition {
    GridPosition::at(row, col)
}

// ===========================================================================
// Grids
// ===========================================================================

/// A `height` by `width` grid of empty tiles in the given tiling.
///
/// Hexagonal grids leave out the bottom cell of every odd column, the same
/// footprint a level file declares.
pub fn grid(shape: TilingKind, height: u32, width: u32) -> Circuit {
    let mut circuit = Circuit::with_shape(shape);
    for row in 0..height {
        for col in 0..width {
            if shape == TilingKind::Hexagon && col % 2 == 1 && row + 1 == height {
                continue;
            }
            circuit
                .add_tile(Tile::empty(shape, pos(row, col)))
                .expect("fixture tiles share one shape");
        }
    }
    circuit
}

pub fn square_grid(height: u32, width: u32) -> Circuit {
    grid(TilingKind::Square, height, width)
}

pub fn hex_grid(height: u32, width: u32) -> Circuit {
    grid(TilingKind::Hexagon, height, width)
}

// ===========================================================================
// Puzzles
// ===========================================================================

/// Source at `(0, 0)` facing right, lamp at `(0, 1)` facing left.
pub fn source_lamp_pair() -> Circuit {
    let mut circuit = square_grid(1, 2);
    circuit.set_part(pos(0, 0), Part::Source);
    circuit.set_part(pos(0, 1), Part::Lamp);
    circuit.link(pos(0, 0), pos(0, 1));
    circuit
}

/// A serpentine cable through a square grid, source at the origin and a
/// lamp at the far end. Every tile lies on the path.
pub fn serpentine(height: u32, width: u32) -> Circuit {
    let mut circuit = square_grid(height, width);
    let mut path = Vec::new();
    for row in 0..height {
        if row % 2 == 0 {
            path.extend((0..width).map(|col| pos(row, col)));
        } else {
            path.extend((0..width).rev().map(|col| pos(row, col)));
        }
    }
    for pair in path.windows(2) {
        circuit.link(pair[0], pair[1]);
    }
    circuit.set_part(GridPosition::ORIGIN, Part::Source);
    if let Some(&last) = path.last() {
        if !last.is_origin() {
            circuit.set_part(last, Part::Lamp);
        }
    }
    circuit
}
