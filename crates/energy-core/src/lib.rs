//! Energy Core -- the puzzle model behind the energy tile game.
//!
//! A puzzle is a grid of tiles, square or hexagonal. Each tile carries a
//! part (source, hotspot, lamp or nothing) and a set of connected edges.
//! The player rotates tiles until power flowing out of every source
//! reaches every lamp.
//!
//! # Key Types
//!
//! - [`geometry::TilingKind`] -- Square or hexagonal tiling: edge count,
//!   opposite edges and neighbour offsets.
//! - [`geometry::GridPosition`] -- Non-negative `(row, col)` address.
//! - [`tile::Tile`] -- One cell: part, edge flags, rotation phase, power.
//! - [`circuit::Circuit`] -- The tile set: editing, resizing and scrambling.
//!   Power flow is implemented in [`propagation`].
//! - [`view::CircuitView`] -- Read-only access for renderers.
//! - [`rng::ScrambleRng`] -- Seeded generator for reproducible scrambles.
//!
//! # Power Flow
//!
//! Edits never update power on their own. After changing a circuit, call
//! [`Circuit::propagate_electricity`] (blackout, then flood) before asking
//! [`Circuit::is_solved`].
//!
//! ```rust,ignore
//! let mut circuit = Circuit::new();
//! circuit.add_tile(Tile::square(GridPosition::at(0, 0), Part::Source))?;
//! circuit.add_tile(Tile::square(GridPosition::at(0, 1), Part::Lamp))?;
//! circuit.link(GridPosition::at(0, 0), GridPosition::at(0, 1));
//! circuit.propagate_electricity();
//! assert!(circuit.is_solved());
//! ```

pub mod circuit;
pub mod error;
pub mod geometry;
pub mod part;
pub mod propagation;
pub mod rng;
pub mod tile;
pub mod view;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use circuit::{Circuit, Dimension};
pub use error::CoreError;
pub use geometry::{GridPosition, TilingKind};
pub use part::Part;
pub use rng::ScrambleRng;
pub use tile::Tile;
pub use view::CircuitView;
