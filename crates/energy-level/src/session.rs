//! Play and edit sessions wrapping a [`Level`].
//!
//! Sessions keep power up to date: every successful edit is followed by a
//! full refresh, so `is_solved` always reflects the current layout.

use energy_core::{CircuitView, GridPosition, Part, ScrambleRng};
use tracing::{debug, info};

use crate::error::LevelError;
use crate::level::Level;
use crate::store::LevelStore;

// ===========================================================================
// Game
// ===========================================================================

/// A level being played. The only move is rotating a tile.
#[derive(Debug, Clone)]
pub struct GameSession {
    level: Level,
}

impl GameSession {
    /// Scramble every rotatable tile and compute the initial power state.
    pub fn start(mut level: Level, rng: &mut ScrambleRng) -> Self {
        let circuit = level.circuit_mut();
        circuit.scramble(rng);
        circuit.propagate_electricity();
        debug!(id = level.id(), "game started");
        Self { level }
    }

    /// Rotate the tile at `pos`. Returns `false` if nothing turned.
    pub fn rotate(&mut self, pos: GridPosition) -> bool {
        let circuit = self.level.circuit_mut();
        if !circuit.rotate_tile_at(pos) {
            return false;
        }
        circuit.propagate_electricity();
        if circuit.is_solved() {
            info!(id = self.level.id(), "level solved");
        }
        true
    }

    pub fn is_solved(&self) -> bool {
        self.level.is_finished()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn view(&self) -> CircuitView<'_> {
        self.level.circuit().view()
    }
}

// ===========================================================================
// Editor
// ===========================================================================

/// A level being edited, with a dirty bit tracking unsaved changes.
#[derive(Debug, Clone)]
pub struct EditorSession {
    level: Level,
    dirty: bool,
}

impl EditorSession {
    pub fn new(mut level: Level) -> Self {
        level.circuit_mut().propagate_electricity();
        Self { level, dirty: false }
    }

    /// Refresh power and mark dirty if `changed`, then pass it through.
    fn after_edit(&mut self, changed: bool) -> bool {
        if changed {
            self.level.circuit_mut().propagate_electricity();
            self.dirty = true;
        }
        changed
    }

    pub fn connect_edge(&mut self, pos: GridPosition, edge: usize) -> bool {
        let changed = self.level.circuit_mut().connect_edge(pos, edge);
        self.after_edit(changed)
    }

    pub fn disconnect_edge(&mut self, pos: GridPosition, edge: usize) -> bool {
        let changed = self.level.circuit_mut().disconnect_edge(pos, edge);
        self.after_edit(changed)
    }

    /// Wire two adjacent tiles together (drag gesture).
    pub fn link(&mut self, a: GridPosition, b: GridPosition) -> bool {
        let changed = self.level.circuit_mut().link(a, b);
        self.after_edit(changed)
    }

    /// Cut the wire between two adjacent tiles.
    pub fn unlink(&mut self, a: GridPosition, b: GridPosition) -> bool {
        let changed = self.level.circuit_mut().unlink(a, b);
        self.after_edit(changed)
    }

    pub fn set_part(&mut self, pos: GridPosition, part: Part) -> bool {
        let changed = self.level.circuit_mut().set_part(pos, part);
        self.after_edit(changed)
    }

    pub fn clear_tile(&mut self, pos: GridPosition) -> bool {
        let changed = self.level.circuit_mut().clear_tile(pos);
        self.after_edit(changed)
    }

    pub fn clear(&mut self) {
        self.level.circuit_mut().clear();
        self.after_edit(true);
    }

    pub fn add_row(&mut self) -> bool {
        let changed = self.level.circuit_mut().add_row();
        self.after_edit(changed)
    }

    pub fn remove_row(&mut self) -> bool {
        let changed = self.level.circuit_mut().remove_row();
        self.after_edit(changed)
    }

    pub fn add_column(&mut self) -> bool {
        let changed = self.level.circuit_mut().add_column();
        self.after_edit(changed)
    }

    pub fn remove_column(&mut self) -> bool {
        let changed = self.level.circuit_mut().remove_column();
        self.after_edit(changed)
    }

    /// `true` if there are edits not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_solved(&self) -> bool {
        self.level.is_finished()
    }

    pub fn contains_lamp(&self) -> bool {
        self.level.circuit().contains_lamp()
    }

    /// Persist the level if it is solved.
    ///
    /// Returns `Ok(false)` without writing when some lamp is unlit. A
    /// successful save clears the dirty bit.
    pub fn save(&mut self, store: &LevelStore) -> Result<bool, LevelError> {
        if !self.is_solved() {
            debug!(id = self.level.id(), "not saving an unsolved level");
            return Ok(false);
        }
        store.save(&self.level)?;
        self.dirty = false;
        Ok(true)
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn view(&self) -> CircuitView<'_> {
        self.level.circuit().view()
    }
}
