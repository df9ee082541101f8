use std::time::Instant;

use rayon::prelude::*;

use chess_core::{perft, Position};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 250_000;

struct PerftCase {
    line: usize,
    fen: String,
    depths: Vec<(u8, u64)>,
}

fn parse_epd_line(line: usize, text: &str) -> Option<PerftCase> {
    let mut parts = text.split(';');
    let fen = parts.next()?.trim();
    if fen.is_empty() {
        return None;
    }

    let mut depths: Vec<(u8, u64)> = parts
        .filter_map(|part| {
            let (key, val) = part.trim().split_once(' ')?;
            let depth = key.strip_prefix('D')?.parse().ok()?;
            let expected = val.trim().parse().ok()?;
            Some((depth, expected))
        })
        .collect();
    if depths.is_empty() {
        return None;
    }
    depths.sort_by_key(|(d, _)| *d);
    Some(PerftCase {
        line,
        fen: fen.to_string(),
        depths,
    })
}

#[test]
fn perft_from_standard_epd() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();
    let cases: Vec<PerftCase> = include_str!("standard.epd")
        .lines()
        .enumerate()
        .filter_map(|(i, line)| parse_epd_line(i + 1, line))
        .collect();
    assert_eq!(cases.len(), 6);

    cases.par_iter().for_each(|case| {
        let pos = Position::from_fen(&case.fen).unwrap();
        let started = Instant::now();
        let mut total = 0u64;

        for &(depth, expected) in &case.depths {
            if !full && expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {depth} for line {} ({expected} nodes), set {FULL_PERFT_ENV}=1 to run all.",
                    case.line
                );
                continue;
            }
            let got = perft(&pos, depth);
            assert_eq!(
                got, expected,
                "perft mismatch for '{}' at depth {depth}",
                case.fen
            );
            total += got;
        }

        println!(
            "line {:02}: {total} nodes in {:.3?}",
            case.line,
            started.elapsed()
        );
    });
}

#[test]
fn perft_depth_zero_counts_root() {
    assert_eq!(perft(&Position::startpos(), 0), 1);
}
