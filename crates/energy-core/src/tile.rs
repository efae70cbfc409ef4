//! A single grid cell: its part, per-edge connections, and power state.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::error::CoreError;
use crate::geometry::{touching_side, GridPosition, TilingKind};
use crate::part::Part;

/// One cell of a circuit.
///
/// Equality and hashing use `(position, part)` only, so two tiles at the
/// same cell with the same part compare equal whatever their edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    shape: TilingKind,
    position: GridPosition,
    part: Part,
    /// Only the first `shape.edge_count()` entries are meaningful.
    edges: [bool; TilingKind::MAX_EDGES],
    /// Display-only rotation phase in degrees, `0..360`.
    rotation: u16,
    powered: bool,
}

impl Tile {
    /// A tile with every edge disconnected.
    pub fn new(shape: TilingKind, position: GridPosition, part: Part) -> Self {
        Self {
            shape,
            position,
            part,
            edges: [false; TilingKind::MAX_EDGES],
            rotation: 0,
            powered: part == Part::Source,
        }
    }

    /// A tile with the given connection flags, one per edge.
    ///
    /// Fails with [`CoreError::InvalidBorder`] if `edges` does not have
    /// exactly `shape.edge_count()` entries.
    pub fn with_edges(
        shape: TilingKind,
        position: GridPosition,
        part: Part,
        edges: &[bool],
    ) -> Result<Self, CoreError> {
        if edges.len() != shape.edge_count() {
            return Err(CoreError::InvalidBorder {
                shape,
                expected: shape.edge_count(),
                actual: edges.len(),
            });
        }
        let mut tile = Self::new(shape, position, part);
        tile.edges[..edges.len()].copy_from_slice(edges);
        Ok(tile)
    }

    pub fn empty(shape: TilingKind, position: GridPosition) -> Self {
        Self::new(shape, position, Part::Empty)
    }

    pub fn square(position: GridPosition, part: Part) -> Self {
        Self::new(TilingKind::Square, position, part)
    }

    pub fn hexagon(position: GridPosition, part: Part) -> Self {
        Self::new(TilingKind::Hexagon, position, part)
    }

    // -- Accessors --

    pub fn shape(&self) -> TilingKind {
        self.shape
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn part(&self) -> Part {
        self.part
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// Rotation phase in degrees.
    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.shape.edge_count()
    }

    /// Connection flag per edge.
    pub fn edges(&self) -> &[bool] {
        &self.edges[..self.edge_count()]
    }

    /// Whether `edge` is connected. Out-of-range edges are not.
    pub fn is_connected(&self, edge: usize) -> bool {
        self.edges().get(edge).copied().unwrap_or(false)
    }

    /// Indices of connected edges, ascending.
    pub fn connected_edges(&self) -> Vec<usize> {
        (0..self.edge_count()).filter(|&e| self.edges[e]).collect()
    }

    /// Indices of disconnected edges, ascending.
    pub fn disconnected_edges(&self) -> Vec<usize> {
        (0..self.edge_count()).filter(|&e| !self.edges[e]).collect()
    }

    pub fn connected_count(&self) -> usize {
        self.edges().iter().filter(|&&e| e).count()
    }

    pub fn is_disconnected(&self) -> bool {
        self.connected_count() == 0
    }

    /// Empty part and no connected edge.
    pub fn is_empty(&self) -> bool {
        self.part == Part::Empty && self.is_disconnected()
    }

    // -- Mutation --

    /// Connect `edge`. Returns `true` if the flag changed.
    pub fn connect(&mut self, edge: usize) -> bool {
        self.set_edge(edge, true)
    }

    /// Disconnect `edge`. Returns `true` if the flag changed.
    pub fn disconnect(&mut self, edge: usize) -> bool {
        self.set_edge(edge, false)
    }

    /// Connect several edges at once. Returns how many flags changed.
    pub fn connect_many(&mut self, edges: &[usize]) -> usize {
        edges.iter().filter(|&&e| self.connect(e)).count()
    }

    fn set_edge(&mut self, edge: usize, connected: bool) -> bool {
        if edge >= self.edge_count() || self.edges[edge] == connected {
            return false;
        }
        self.edges[edge] = connected;
        true
    }

    /// Turn the tile one step counter-clockwise: every connection moves to
    /// the next edge index. No-op for parts that cannot rotate.
    pub fn rotate(&mut self) -> bool {
        if !self.part.rotatable() {
            return false;
        }
        let n = self.edge_count();
        self.edges[..n].rotate_right(1);
        self.rotation = (self.rotation + self.shape.rotation_step()) % 360;
        true
    }

    /// Set the powered flag. Sources ignore this and stay powered.
    pub fn set_powered(&mut self, powered: bool) {
        if self.part != Part::Source {
            self.powered = powered;
        }
    }

    /// Replace the part. Installing a source powers the tile.
    pub fn set_part(&mut self, part: Part) {
        self.part = part;
        if part == Part::Source {
            self.powered = true;
        }
    }

    /// Reset to an empty part with every edge disconnected.
    pub fn clear(&mut self) {
        self.part = Part::Empty;
        self.edges = [false; TilingKind::MAX_EDGES];
    }

    // -- Relations --

    /// The edge of this tile that faces `other`, if they are adjacent.
    pub fn touching_side(&self, other: &Tile) -> Option<usize> {
        touching_side(self.position, other.position, self.shape)
    }

    /// `true` if both tiles share a shape, are adjacent, and both facing
    /// edges are connected.
    pub fn is_linked_to(&self, other: &Tile) -> bool {
        if self.shape != other.shape {
            return false;
        }
        match self.touching_side(other) {
            Some(edge) => self.is_connected(edge) && other.is_connected(self.shape.opposite(edge)),
            None => false,
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.part == other.part
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
        self.part.hash(state);
    }
}
