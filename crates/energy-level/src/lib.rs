//! Energy Level -- level files, storage and sessions for the energy puzzle.
//!
//! - [`codec`] -- line-oriented `.nrg` text format for circuits.
//! - [`level::Level`] -- a numbered circuit.
//! - [`store::LevelStore`] -- playable and editable copies on disk, laid out
//!   by a [`config::StoreConfig`] (RON, TOML or JSON).
//! - [`session`] -- [`GameSession`] for play and [`EditorSession`] for
//!   editing, both keeping power up to date after every change.
//!
//! This crate logs through `tracing` but never installs a subscriber.

pub mod codec;
pub mod config;
pub mod error;
pub mod level;
pub mod session;
pub mod store;

pub use codec::{decode, encode};
pub use config::StoreConfig;
pub use error::LevelError;
pub use level::{level_id_from_path, Level};
pub use session::{EditorSession, GameSession};
pub use store::{LevelKind, LevelStore};
