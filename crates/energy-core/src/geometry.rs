//! Grid coordinates and the adjacency rules of the two tilings.
//!
//! Square tiles number their edges clockwise from the top: 0 top, 1 right,
//! 2 bottom, 3 left. Hexagonal tiles are flat-topped and laid out in
//! columns, odd columns sitting half a cell lower than even ones ("brick"
//! offset). Their edges run clockwise from the top: 0 top, 1 upper right,
//! 2 lower right, 3 bottom, 4 lower left, 5 upper left.
//!
//! The edge facing back across a link is always `(edge + n / 2) % n`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Tiling kind
// ---------------------------------------------------------------------------

/// The tiling a tile belongs to. Fixes the edge count and adjacency rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TilingKind {
    /// Four edges.
    Square,
    /// Six edges.
    Hexagon,
}

impl TilingKind {
    /// Largest edge count over all tilings.
    pub const MAX_EDGES: usize = 6;

    /// Both tilings.
    pub fn all() -> [TilingKind; 2] {
        [TilingKind::Square, TilingKind::Hexagon]
    }

    /// Number of edges of a tile of this kind.
    pub const fn edge_count(self) -> usize {
        match self {
            TilingKind::Square => 4,
            TilingKind::Hexagon => 6,
        }
    }

    /// The edge on the far side of a link leaving through `edge`.
    pub const fn opposite(self, edge: usize) -> usize {
        let n = self.edge_count();
        (edge + n / 2) % n
    }

    /// Degrees turned by one rotation step.
    pub const fn rotation_step(self) -> u16 {
        (360 / self.edge_count()) as u16
    }

    /// Single-character code used in level file headers.
    pub const fn code(self) -> char {
        match self {
            TilingKind::Square => 'S',
            TilingKind::Hexagon => 'H',
        }
    }

    /// Parse a level file shape code.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "S" => Ok(TilingKind::Square),
            "H" => Ok(TilingKind::Hexagon),
            other => Err(CoreError::UnknownShapeCode(other.to_string())),
        }
    }

    /// `(d_row, d_col)` of the cell behind `edge` for a cell in a column of
    /// the given parity. `None` if `edge` is out of range.
    fn offset(self, edge: usize, odd_column: bool) -> Option<(i64, i64)> {
        match self {
            TilingKind::Square => SQUARE_OFFSETS.get(edge).copied(),
            TilingKind::Hexagon if odd_column => HEX_ODD_OFFSETS.get(edge).copied(),
            TilingKind::Hexagon => HEX_EVEN_OFFSETS.get(edge).copied(),
        }
    }
}

/// Top, right, bottom, left.
const SQUARE_OFFSETS: [(i64, i64); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

const HEX_EVEN_OFFSETS: [(i64, i64); 6] = [
    (-1, 0),  // top
    (-1, 1),  // upper right
    (0, 1),   // lower right
    (1, 0),   // bottom
    (0, -1),  // lower left
    (-1, -1), // upper left
];

const HEX_ODD_OFFSETS: [(i64, i64); 6] = [
    (-1, 0), // top
    (0, 1),  // upper right
    (1, 1),  // lower right
    (1, 0),  // bottom
    (1, -1), // lower left
    (0, -1), // upper left
];

// ---------------------------------------------------------------------------
// Grid position
// ---------------------------------------------------------------------------

/// A `(row, column)` cell address. Ordered row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    row: u32,
    col: u32,
}

impl GridPosition {
    /// The `(0, 0)` cell.
    pub const ORIGIN: GridPosition = GridPosition { row: 0, col: 0 };

    /// Validating constructor for signed input.
    pub fn new(row: i64, col: i64) -> Result<Self, CoreError> {
        match (u32::try_from(row), u32::try_from(col)) {
            (Ok(row), Ok(col)) => Ok(Self { row, col }),
            _ => Err(CoreError::InvalidPosition { row, col }),
        }
    }

    /// Construct from coordinates that cannot be negative.
    pub const fn at(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub const fn row(&self) -> u32 {
        self.row
    }

    pub const fn col(&self) -> u32 {
        self.col
    }

    pub const fn is_origin(&self) -> bool {
        self.row == 0 && self.col == 0
    }

    /// Cell shifted by `(d_row, d_col)`, or `None` past the grid boundary.
    fn shifted(&self, (d_row, d_col): (i64, i64)) -> Option<Self> {
        Self::new(self.row as i64 + d_row, self.col as i64 + d_col).ok()
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// The cell behind `edge` of `pos`, or `None` if the edge index is out of
/// range or the neighbour would have a negative coordinate.
pub fn neighbor_at(pos: GridPosition, shape: TilingKind, edge: usize) -> Option<GridPosition> {
    let odd_column = pos.col % 2 == 1;
    shape
        .offset(edge, odd_column)
        .and_then(|offset| pos.shifted(offset))
}

/// Every `(edge, neighbour)` pair of `pos`, in edge order, skipping edges
/// that face off the grid.
pub fn neighbors_by_edge(
    pos: GridPosition,
    shape: TilingKind,
) -> impl Iterator<Item = (usize, GridPosition)> {
    (0..shape.edge_count()).filter_map(move |edge| neighbor_at(pos, shape, edge).map(|n| (edge, n)))
}

/// The up-to-`edge_count` cells adjacent to `pos`, in edge order.
pub fn neighbor_positions(pos: GridPosition, shape: TilingKind) -> Vec<GridPosition> {
    neighbors_by_edge(pos, shape).map(|(_, n)| n).collect()
}

/// The edge of `a` that faces `b`, or `None` if they are not adjacent.
pub fn touching_side(a: GridPosition, b: GridPosition, shape: TilingKind) -> Option<usize> {
    neighbors_by_edge(a, shape).find_map(|(edge, n)| (n == b).then_some(edge))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u32, col: u32) -> GridPosition {
        GridPosition::at(row, col)
    }

    // -----------------------------------------------------------------------
    // GridPosition
    // -----------------------------------------------------------------------

    #[test]
    fn position_new_accepts_non_negative() {
        let p = GridPosition::new(3, 7).unwrap();
        assert_eq!(p.row(), 3);
        assert_eq!(p.col(), 7);
        assert_eq!(GridPosition::new(0, 0).unwrap(), GridPosition::ORIGIN);
    }

    #[test]
    fn position_new_rejects_negative() {
        assert_eq!(
            GridPosition::new(-1, 0),
            Err(CoreError::InvalidPosition { row: -1, col: 0 })
        );
        assert!(GridPosition::new(0, -5).is_err());
        assert!(GridPosition::new(-2, -2).is_err());
    }

    #[test]
    fn positions_order_row_major() {
        let mut v = vec![pos(1, 0), pos(0, 2), pos(0, 1), pos(1, 1)];
        v.sort();
        assert_eq!(v, vec![pos(0, 1), pos(0, 2), pos(1, 0), pos(1, 1)]);
    }

    #[test]
    fn position_display() {
        assert_eq!(pos(2, 5).to_string(), "(2, 5)");
    }

    // -----------------------------------------------------------------------
    // TilingKind
    // -----------------------------------------------------------------------

    #[test]
    fn opposite_edges() {
        assert_eq!(TilingKind::Square.opposite(0), 2);
        assert_eq!(TilingKind::Square.opposite(3), 1);
        assert_eq!(TilingKind::Hexagon.opposite(1), 4);
        assert_eq!(TilingKind::Hexagon.opposite(5), 2);
    }

    #[test]
    fn shape_codes() {
        assert_eq!(TilingKind::from_code("S"), Ok(TilingKind::Square));
        assert_eq!(TilingKind::from_code("H"), Ok(TilingKind::Hexagon));
        assert!(matches!(
            TilingKind::from_code("Q"),
            Err(CoreError::UnknownShapeCode(ref c)) if c == "Q"
        ));
        for kind in TilingKind::all() {
            assert_eq!(
                TilingKind::from_code(&kind.code().to_string()),
                Ok(kind)
            );
        }
    }

    #[test]
    fn rotation_steps() {
        assert_eq!(TilingKind::Square.rotation_step(), 90);
        assert_eq!(TilingKind::Hexagon.rotation_step(), 60);
    }

    // -----------------------------------------------------------------------
    // Square adjacency
    // -----------------------------------------------------------------------

    #[test]
    fn square_interior_neighbors() {
        let n = neighbor_positions(pos(2, 2), TilingKind::Square);
        assert_eq!(n, vec![pos(1, 2), pos(2, 3), pos(3, 2), pos(2, 1)]);
    }

    #[test]
    fn square_origin_skips_boundary() {
        let n: Vec<_> = neighbors_by_edge(GridPosition::ORIGIN, TilingKind::Square).collect();
        assert_eq!(n, vec![(1, pos(0, 1)), (2, pos(1, 0))]);
    }

    #[test]
    fn square_touching_side() {
        assert_eq!(touching_side(pos(1, 1), pos(0, 1), TilingKind::Square), Some(0));
        assert_eq!(touching_side(pos(1, 1), pos(1, 2), TilingKind::Square), Some(1));
        assert_eq!(touching_side(pos(1, 1), pos(2, 1), TilingKind::Square), Some(2));
        assert_eq!(touching_side(pos(1, 1), pos(1, 0), TilingKind::Square), Some(3));
        assert_eq!(touching_side(pos(1, 1), pos(2, 2), TilingKind::Square), None);
        assert_eq!(touching_side(pos(1, 1), pos(1, 1), TilingKind::Square), None);
    }

    // -----------------------------------------------------------------------
    // Hexagon adjacency
    // -----------------------------------------------------------------------

    #[test]
    fn hex_even_column_neighbors() {
        let n: Vec<_> = neighbors_by_edge(pos(2, 2), TilingKind::Hexagon).collect();
        assert_eq!(
            n,
            vec![
                (0, pos(1, 2)),
                (1, pos(1, 3)),
                (2, pos(2, 3)),
                (3, pos(3, 2)),
                (4, pos(2, 1)),
                (5, pos(1, 1)),
            ]
        );
    }

    #[test]
    fn hex_odd_column_neighbors() {
        let n: Vec<_> = neighbors_by_edge(pos(2, 3), TilingKind::Hexagon).collect();
        assert_eq!(
            n,
            vec![
                (0, pos(1, 3)),
                (1, pos(2, 4)),
                (2, pos(3, 4)),
                (3, pos(3, 3)),
                (4, pos(3, 2)),
                (5, pos(2, 2)),
            ]
        );
    }

    #[test]
    fn hex_top_row_even_column_loses_upper_diagonals() {
        let n = neighbor_positions(pos(0, 2), TilingKind::Hexagon);
        assert_eq!(n, vec![pos(0, 3), pos(1, 2), pos(0, 1)]);
    }

    #[test]
    fn hex_touching_side_respects_parity() {
        // Same row, adjacent columns: lower right from even, upper left from odd.
        assert_eq!(touching_side(pos(1, 0), pos(1, 1), TilingKind::Hexagon), Some(2));
        assert_eq!(touching_side(pos(1, 1), pos(1, 0), TilingKind::Hexagon), Some(5));
        // Not adjacent on a hex grid even though it would be diagonal.
        assert_eq!(touching_side(pos(1, 0), pos(2, 1), TilingKind::Hexagon), None);
    }

    #[test]
    fn touching_side_inverts_neighbors() {
        for kind in TilingKind::all() {
            for row in 0..5 {
                for col in 0..5 {
                    let p = pos(row, col);
                    for (edge, n) in neighbors_by_edge(p, kind) {
                        assert_eq!(touching_side(p, n, kind), Some(edge));
                        assert_eq!(touching_side(n, p, kind), Some(kind.opposite(edge)));
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_range_edge_has_no_neighbor() {
        assert_eq!(neighbor_at(pos(1, 1), TilingKind::Square, 4), None);
        assert_eq!(neighbor_at(pos(1, 1), TilingKind::Hexagon, 6), None);
    }
}
