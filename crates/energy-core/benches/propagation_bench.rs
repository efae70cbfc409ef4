//! Criterion benchmarks for power propagation and scrambling.
//!
//! Two benchmark groups:
//! - `propagation`: full propagation on serpentine, hexagonal comb and hotspot-heavy grids
//! - `scramble`: randomize every tile of a large grid

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use energy_core::test_utils::*;
use energy_core::{Circuit, Part, ScrambleRng};

// ===========================================================================
// Circuit builders
// ===========================================================================

/// A square grid where every tile on the diagonal is a hotspot and every
/// other tile is wired to its right-hand neighbour.
fn build_hotspot_field(size: u32) -> Circuit {
    let mut circuit = square_grid(size, size);
    for row in 0..size {
        for col in 0..size.saturating_sub(1) {
            circuit.link(pos(row, col), pos(row, col + 1));
        }
        circuit.set_part(pos(row, row), Part::Hotspot);
        circuit.set_part(pos(row, size - 1), Part::Lamp);
    }
    circuit.set_part(pos(0, 0), Part::Source);
    circuit
}

/// A hexagonal grid wired as a comb: the top row runs across and every
/// column hangs down from it, ending in a lamp.
fn build_hex_comb(size: u32) -> Circuit {
    let mut circuit = hex_grid(size, size);
    for col in 0..size {
        if col + 1 < size {
            circuit.link(pos(0, col), pos(0, col + 1));
        }
        let mut row = 0;
        while circuit.contains(pos(row + 1, col)) {
            circuit.link(pos(row, col), pos(row + 1, col));
            row += 1;
        }
        circuit.set_part(pos(row, col), Part::Lamp);
    }
    circuit.set_part(pos(0, 0), Part::Source);
    circuit
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation");

    for size in [8u32, 32, 64] {
        let mut circuit = serpentine(size, size);
        group.bench_with_input(BenchmarkId::new("serpentine", size), &size, |b, _| {
            b.iter(|| {
                circuit.propagate_electricity();
                circuit.is_solved()
            });
        });

        let mut circuit = build_hex_comb(size);
        group.bench_with_input(BenchmarkId::new("hex_comb", size), &size, |b, _| {
            b.iter(|| {
                circuit.propagate_electricity();
                circuit.is_solved()
            });
        });

        let mut circuit = build_hotspot_field(size);
        group.bench_with_input(BenchmarkId::new("hotspot_field", size), &size, |b, _| {
            b.iter(|| {
                circuit.propagate_electricity();
                circuit.is_solved()
            });
        });
    }

    group.finish();
}

fn bench_scramble(c: &mut Criterion) {
    let mut group = c.benchmark_group("scramble");

    group.bench_function("scramble_64x64", |b| {
        b.iter_batched(
            || (serpentine(64, 64), ScrambleRng::new(7)),
            |(mut circuit, mut rng)| {
                circuit.scramble(&mut rng);
                circuit.propagate_electricity();
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_propagation, bench_scramble);
criterion_main!(benches);
