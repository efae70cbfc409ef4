use std::path::Path;

use energy_core::{Circuit, TilingKind};

use crate::codec;
use crate::error::LevelError;

/// A numbered puzzle: an identifier and the circuit it owns.
#[derive(Debug, Clone)]
pub struct Level {
    id: u32,
    circuit: Circuit,
}

impl Level {
    pub fn new(id: u32, circuit: Circuit) -> Self {
        Self { id, circuit }
    }

    /// A fresh level holding a single empty tile at the origin.
    pub fn blank(id: u32, shape: TilingKind) -> Self {
        Self::new(id, Circuit::with_origin(shape))
    }

    /// Decode level file text.
    pub fn decode(id: u32, text: &str) -> Result<Self, LevelError> {
        Ok(Self::new(id, codec::decode(text)?))
    }

    /// Encode the circuit as level file text.
    pub fn encode(&self) -> String {
        codec::encode(&self.circuit)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    /// `true` once every lamp is lit. Reflects the last propagation pass.
    pub fn is_finished(&self) -> bool {
        self.circuit.is_solved()
    }
}

/// Level identifier encoded in a file name: the digits of `level12.nrg`
/// give `12`. `None` if the name has no digits or they overflow.
pub fn level_id_from_path(path: &Path) -> Option<u32> {
    let name = path.file_name()?.to_str()?;
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}
