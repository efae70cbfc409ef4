//! Headless checker: installs a few bundled levels into a scratch store,
//! verifies each stored solution lights every lamp, then scrambles it and
//! reports how much of the circuit stays powered.
//!
//! Run with: `cargo run --package energy-level --example headless_check [store.ron]`
//!
//! Set `RUST_LOG=energy_level=debug` for store and session logs.

use std::path::Path;

use energy_core::{Circuit, GridPosition, Part, ScrambleRng, TilingKind};
use energy_level::{GameSession, Level, LevelKind, LevelStore, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SEED: u64 = 0x5EED;

fn bundled_levels() -> Vec<Level> {
    let texts = [
        "1 2 S\nS 1 L 3\n",
        "2 3 S\nS 1 2 . 1 3 L 3\nL 0 . .\n",
        "3 3 H\nS 2 3 W 5 .\nL 0 . W 3\n. . L 0\n",
    ];
    let mut levels: Vec<Level> = texts
        .iter()
        .enumerate()
        .filter_map(|(i, text)| match Level::decode(i as u32 + 1, text) {
            Ok(level) => Some(level),
            Err(e) => {
                eprintln!("bundled level {} is invalid: {e}", i + 1);
                None
            }
        })
        .collect();

    let mut hotspots = Circuit::with_origin(TilingKind::Square);
    for _ in 1..6 {
        hotspots.add_row();
        hotspots.add_column();
    }
    hotspots.set_part(GridPosition::at(0, 0), Part::Source);
    hotspots.set_part(GridPosition::at(0, 1), Part::Hotspot);
    hotspots.set_part(GridPosition::at(5, 5), Part::Hotspot);
    hotspots.set_part(GridPosition::at(5, 4), Part::Lamp);
    hotspots.link(GridPosition::at(0, 0), GridPosition::at(0, 1));
    hotspots.link(GridPosition::at(5, 5), GridPosition::at(5, 4));
    levels.push(Level::new(levels.len() as u32 + 1, hotspots));
    levels
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "energy_level=info,energy_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::load(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("failed to load store config: {e}");
            std::process::exit(1);
        }),
        None => StoreConfig::default(),
    };
    config.root = std::env::temp_dir().join(format!("energy_headless_{}", std::process::id()));

    let store = LevelStore::new(config);
    let bundled = bundled_levels();
    if let Err(e) = store.install(&bundled) {
        eprintln!("install failed: {e}");
        std::process::exit(1);
    }

    let ids = store.list(LevelKind::Playable).unwrap_or_default();
    println!("=== {} levels in {} ===\n", ids.len(), store.config().root.display());

    let mut rng = ScrambleRng::new(SEED);
    let mut failures = 0;
    for id in ids {
        let mut level = match store.load(LevelKind::Playable, id) {
            Ok(level) => level,
            Err(e) => {
                println!("level {id}: FAIL ({e})");
                failures += 1;
                continue;
            }
        };

        level.circuit_mut().propagate_electricity();
        let dim = level.circuit().dimension();
        let solved = level.is_finished();
        println!(
            "level {id}: {}x{} {:?}, {} tiles, {} lamps, solution {}",
            dim.height,
            dim.width,
            level.circuit().shape().unwrap_or(TilingKind::Square),
            level.circuit().len(),
            level.circuit().lamps().count(),
            if solved { "PASS" } else { "FAIL" },
        );
        if !solved {
            failures += 1;
        }

        let game = GameSession::start(level, &mut rng);
        let view = game.view();
        let powered = view.tiles().filter(|t| t.is_powered()).count();
        println!(
            "    scrambled: {powered}/{} powered, solved = {}",
            view.tiles().count(),
            view.is_solved()
        );
    }

    let _ = std::fs::remove_dir_all(&store.config().root);
    if failures > 0 {
        println!("\n{failures} level(s) failed.");
        std::process::exit(1);
    }
    println!("\nAll levels passed.");
}
