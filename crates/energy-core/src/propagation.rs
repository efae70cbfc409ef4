//! Power flow through a circuit.
//!
//! Power starts at every source and spreads breadth-first along links: two
//! adjacent tiles are linked when both facing edges are connected. Hotspots
//! additionally reach every other hotspot regardless of distance.
//!
//! Every pass starts from a blackout, so the powered set always reflects the
//! current layout and nothing stale survives an edit.

use std::collections::{BTreeSet, VecDeque};
use tracing::trace;

use crate::circuit::Circuit;
use crate::geometry::{neighbors_by_edge, GridPosition};
use crate::part::Part;
use crate::tile::Tile;

impl Circuit {
    /// Positions power can flow to from `pos`: linked adjacent tiles, plus
    /// every other hotspot when `pos` holds a hotspot.
    pub fn neighbors_of(&self, pos: GridPosition) -> Vec<GridPosition> {
        let Some(tile) = self.tile_at(pos) else {
            return Vec::new();
        };
        let mut result: Vec<GridPosition> = neighbors_by_edge(pos, tile.shape())
            .filter_map(|(_, n)| self.tile_at(n))
            .filter(|n| tile.is_linked_to(n))
            .map(Tile::position)
            .collect();
        if tile.part() == Part::Hotspot {
            for other in self.hotspots().map(Tile::position) {
                if other != pos && !result.contains(&other) {
                    result.push(other);
                }
            }
        }
        result
    }

    /// Unpower every tile except sources.
    pub fn blackout(&mut self) {
        for tile in self.tiles_mut() {
            tile.set_powered(false);
        }
    }

    /// Unpower everything, then spread power from every source to
    /// everything reachable.
    pub fn propagate_electricity(&mut self) {
        self.blackout();
        let mut frontier: VecDeque<GridPosition> = self.sources().map(Tile::position).collect();
        let mut queued: BTreeSet<GridPosition> = frontier.iter().copied().collect();

        while let Some(current) = frontier.pop_front() {
            if let Some(tile) = self.tile_mut(current) {
                tile.set_powered(true);
            }
            for next in self.neighbors_of(current) {
                let powered = self.tile_at(next).is_some_and(Tile::is_powered);
                if !powered && queued.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        trace!(
            visited = queued.len(),
            powered = self.tiles().filter(|t| t.is_powered()).count(),
            "propagated"
        );
    }

    /// `true` when the circuit has tiles and every lamp is powered.
    ///
    /// A circuit with no lamp counts as solved once it has any tile.
    pub fn is_solved(&self) -> bool {
        !self.is_empty() && self.lamps().all(Tile::is_powered)
    }

    /// Positions of every powered tile, row-major.
    pub fn powered_positions(&self) -> Vec<GridPosition> {
        self.tiles()
            .filter(|t| t.is_powered())
            .map(Tile::position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{GridPosition, TilingKind};
    use crate::part::Part;
    use crate::test_utils::*;
    use crate::tile::Tile;
    use crate::Circuit;

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    #[test]
    fn source_powers_linked_lamp() {
        let mut c = source_lamp_pair();
        c.propagate_electricity();
        assert!(c.tile_at(pos(0, 1)).unwrap().is_powered());
        assert!(c.is_solved());
    }

    #[test]
    fn misaligned_edge_blocks_power() {
        let mut c = source_lamp_pair();
        c.disconnect_edge(pos(0, 1), 3);
        c.connect_edge(pos(0, 1), 0);
        c.propagate_electricity();
        assert!(!c.tile_at(pos(0, 1)).unwrap().is_powered());
        assert!(!c.is_solved());
    }

    #[test]
    fn rotating_lamp_into_place_solves() {
        let mut c = source_lamp_pair();
        c.rotate_tile_at(pos(0, 1));
        c.propagate_electricity();
        assert!(!c.is_solved());
        for _ in 0..3 {
            c.rotate_tile_at(pos(0, 1));
        }
        c.propagate_electricity();
        assert!(c.is_solved());
    }

    #[test]
    fn power_follows_a_chain() {
        let mut c = square_grid(1, 4);
        c.set_part(pos(0, 0), Part::Source);
        c.set_part(pos(0, 3), Part::Lamp);
        for col in 0..3 {
            c.link(pos(0, col), pos(0, col + 1));
        }
        c.propagate_electricity();
        assert_eq!(c.powered_positions().len(), 4);
        assert!(c.is_solved());

        c.unlink(pos(0, 1), pos(0, 2));
        c.propagate_electricity();
        assert_eq!(c.powered_positions(), vec![pos(0, 0), pos(0, 1)]);
        assert!(!c.is_solved());
    }

    #[test]
    fn hex_chain_across_parity() {
        let mut c = hex_grid(3, 3);
        c.set_part(pos(1, 0), Part::Source);
        c.set_part(pos(1, 2), Part::Lamp);
        c.link(pos(1, 0), pos(1, 1));
        c.link(pos(1, 1), pos(1, 2));
        c.propagate_electricity();
        assert!(c.is_solved());
    }

    // -----------------------------------------------------------------------
    // Hotspots
    // -----------------------------------------------------------------------

    #[test]
    fn hotspots_relay_without_links() {
        let mut c = square_grid(6, 6);
        c.set_part(pos(0, 0), Part::Source);
        c.set_part(pos(0, 1), Part::Hotspot);
        c.set_part(pos(5, 5), Part::Hotspot);
        c.set_part(pos(5, 4), Part::Lamp);
        c.link(pos(0, 0), pos(0, 1));
        c.link(pos(5, 5), pos(5, 4));
        c.propagate_electricity();
        assert!(c.tile_at(pos(5, 5)).unwrap().is_powered());
        assert!(c.is_solved());
    }

    #[test]
    fn hotspot_neighbors_exclude_itself() {
        let mut c = square_grid(3, 3);
        c.set_part(pos(0, 0), Part::Hotspot);
        c.set_part(pos(2, 2), Part::Hotspot);
        assert_eq!(c.neighbors_of(pos(0, 0)), vec![pos(2, 2)]);
        assert_eq!(c.neighbors_of(pos(2, 2)), vec![pos(0, 0)]);
    }

    #[test]
    fn unpowered_hotspots_stay_dark() {
        let mut c = square_grid(3, 3);
        c.set_part(pos(0, 0), Part::Hotspot);
        c.set_part(pos(2, 2), Part::Hotspot);
        c.propagate_electricity();
        assert!(c.powered_positions().is_empty());
    }

    // -----------------------------------------------------------------------
    // Blackout and fixed point
    // -----------------------------------------------------------------------

    #[test]
    fn blackout_keeps_sources_lit() {
        let mut c = source_lamp_pair();
        c.propagate_electricity();
        c.blackout();
        assert_eq!(c.powered_positions(), vec![pos(0, 0)]);
    }

    #[test]
    fn propagation_is_a_fixed_point() {
        let mut c = source_lamp_pair();
        c.propagate_electricity();
        let first = c.powered_positions();
        c.propagate_electricity();
        assert_eq!(c.powered_positions(), first);
    }

    #[test]
    fn stale_power_is_cleared() {
        let mut c = source_lamp_pair();
        c.propagate_electricity();
        c.unlink(pos(0, 0), pos(0, 1));
        assert!(c.tile_at(pos(0, 1)).unwrap().is_powered());
        c.propagate_electricity();
        assert!(!c.tile_at(pos(0, 1)).unwrap().is_powered());
    }

    #[test]
    fn manual_power_does_not_leak() {
        let mut c = square_grid(1, 3);
        c.set_part(pos(0, 2), Part::Lamp);
        c.link(pos(0, 1), pos(0, 2));
        c.tile_mut(pos(0, 1)).unwrap().set_powered(true);
        c.propagate_electricity();
        assert!(c.powered_positions().is_empty());
    }

    // -----------------------------------------------------------------------
    // Solved predicate
    // -----------------------------------------------------------------------

    #[test]
    fn empty_circuit_is_not_solved() {
        assert!(!Circuit::new().is_solved());
    }

    #[test]
    fn lampless_circuit_is_solved() {
        let mut c = Circuit::new();
        c.add_tile(Tile::square(GridPosition::ORIGIN, Part::Empty))
            .unwrap();
        assert!(c.is_solved());
    }

    #[test]
    fn neighbors_of_missing_tile_is_empty() {
        let c = Circuit::with_shape(TilingKind::Square);
        assert!(c.neighbors_of(pos(0, 0)).is_empty());
    }
}
