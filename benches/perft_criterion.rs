use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_tactics::game_state::game_state::GameState;
use plum_tactics::move_generation::perft::{perft, perft_divide, perft_nodes, PerftCounts};

/// A reference position with its published leaf statistics at `depth`.
struct Reference {
    name: &'static str,
    fen: &'static str,
    depth: u8,
    counts: PerftCounts,
}

const fn counts(
    nodes: u64,
    captures: u64,
    en_passant: u64,
    castles: u64,
    promotions: u64,
    checks: u64,
) -> PerftCounts {
    PerftCounts {
        nodes,
        captures,
        en_passant,
        castles,
        promotions,
        checks,
        checkmates: 0,
    }
}

const REFERENCES: &[Reference] = &[
    Reference {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        depth: 3,
        counts: counts(8902, 34, 0, 0, 0, 12),
    },
    Reference {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 2,
        counts: counts(2039, 351, 1, 91, 0, 3),
    },
    Reference {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 3,
        counts: counts(2812, 209, 2, 0, 0, 267),
    },
    Reference {
        name: "promotions",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        depth: 2,
        counts: counts(264, 87, 0, 6, 48, 10),
    },
];

fn load(reference: &Reference) -> GameState {
    let game = GameState::from_fen(reference.fen).expect("benchmark FEN should parse");
    assert_eq!(
        perft(&game, reference.depth),
        reference.counts,
        "leaf statistics mismatch for {}",
        reference.name
    );
    game
}

/// Node-only counting against full statistics gathering on the same trees.
fn bench_counting_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_counting");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for reference in REFERENCES {
        let game = load(reference);
        let depth = reference.depth;
        group.throughput(Throughput::Elements(reference.counts.nodes));

        group.bench_with_input(BenchmarkId::new("nodes", reference.name), &game, |b, game| {
            b.iter(|| black_box(perft_nodes(black_box(game), depth)));
        });
        group.bench_with_input(BenchmarkId::new("statistics", reference.name), &game, |b, game| {
            b.iter(|| black_box(perft(black_box(game), depth)));
        });
    }

    group.finish();
}

/// Root split one ply deeper than the statistics check, as used when
/// bisecting a move generator mismatch.
fn bench_divide(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_divide");
    group.sample_size(10);

    for reference in REFERENCES {
        let game = load(reference);
        let depth = reference.depth + 1;
        let expected = perft_nodes(&game, depth);

        group.bench_with_input(BenchmarkId::from_parameter(reference.name), &game, |b, game| {
            b.iter(|| {
                let split = perft_divide(black_box(game), depth);
                let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
                assert_eq!(total, expected);
                black_box(split.len())
            });
        });
    }

    group.finish();
}

criterion_group!(perft_benches, bench_counting_modes, bench_divide);
criterion_main!(perft_benches);
