use chess_core::{legal_moves, parse_uci_move, START_FEN};

use super::*;

fn run(session: &mut Session, line: &str) -> (Control, String) {
    let mut out = Vec::new();
    let control = session.handle(line, &mut out).unwrap();
    (control, String::from_utf8(out).unwrap())
}

fn session() -> Session {
    Session::new(EngineConfig::default())
}

fn bestmove(output: &str) -> &str {
    output
        .lines()
        .find_map(|l| l.strip_prefix("bestmove "))
        .expect("no bestmove line")
}

#[test]
fn test_uci_handshake() {
    let mut s = session();
    let (control, out) = run(&mut s, "uci");
    assert_eq!(control, Control::Continue);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("id name Minimax"));
    assert_eq!(lines[1], "id author minimax-chess");
    assert_eq!(lines[2], "option name Depth type spin default 3 min 1 max 8");
    assert_eq!(lines[3], "uciok");

    assert_eq!(run(&mut s, "isready").1, "readyok\n");
}

#[test]
fn test_blank_line_is_ignored() {
    let mut s = session();
    assert_eq!(run(&mut s, "   "), (Control::Continue, String::new()));
}

#[test]
fn test_position_with_moves() {
    let mut s = session();
    let (_, out) = run(&mut s, "position startpos moves e2e4 e7e5 g1f3");
    assert!(out.is_empty());
    assert_eq!(
        s.position.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );

    run(&mut s, "ucinewgame");
    assert_eq!(s.position.to_fen(), START_FEN);
}

#[test]
fn test_bad_position_keeps_previous() {
    let mut s = session();
    run(&mut s, "position startpos moves d2d4");
    let before = s.position.to_fen();

    for line in [
        "position startpos moves e2e5",
        "position fen not/a/fen w - -",
        "position fen 4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
        "position somewhere",
    ] {
        let (control, out) = run(&mut s, line);
        assert_eq!(control, Control::Continue);
        assert!(out.starts_with("info string "), "{line}: {out}");
        assert_eq!(s.position.to_fen(), before, "{line}");
    }
}

#[test]
fn test_go_from_startpos() {
    let mut s = session();
    run(&mut s, "position startpos");
    let (_, out) = run(&mut s, "go depth 1");
    let mv = parse_uci_move(&s.position, bestmove(&out)).unwrap();
    assert!(legal_moves(&s.position).contains(&mv));
    assert!(out.starts_with("info depth 1 nodes 21"));
}

#[test]
fn test_go_takes_hanging_pawn() {
    let mut s = session();
    run(&mut s, "position fen 4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    let (_, out) = run(&mut s, "go depth 2");
    assert_eq!(bestmove(&out), "e4d5");
    assert!(out.contains("score cp 100"), "{out}");
}

#[test]
fn test_go_scores_from_side_to_move() {
    let mut s = session();
    run(&mut s, "position fen 4k3/8/8/3p4/4P3/8/8/4K3 b - - 0 1");
    let (_, out) = run(&mut s, "go depth 2");
    assert_eq!(bestmove(&out), "d5e4");
    assert!(out.contains("score cp 100"), "{out}");
}

#[test]
fn test_go_mate_has_no_cp_score() {
    let mut s = session();
    run(&mut s, "position fen 6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    let (_, out) = run(&mut s, "go depth 1");
    assert_eq!(bestmove(&out), "e1e8");
    assert!(!out.contains("score cp"));
}

#[test]
fn test_go_when_game_is_over() {
    let mut s = session();
    run(&mut s, "position startpos moves f2f3 e7e5 g2g4 d8h4");
    let (_, out) = run(&mut s, "go");
    assert_eq!(out, "bestmove 0000\n");
}

#[test]
fn test_go_rejects_bad_depth() {
    let mut s = session();
    for line in ["go depth 0", "go depth 99", "go depth x", "go depth"] {
        let (_, out) = run(&mut s, line);
        assert!(out.starts_with("info string "), "{line}: {out}");
        assert_eq!(bestmove(&out), "0000", "{line}");
    }
}

#[test]
fn test_setoption_depth() {
    let mut s = session();
    assert_eq!(s.depth(), 3);

    let (_, out) = run(&mut s, "setoption name Depth value 2");
    assert!(out.is_empty());
    assert_eq!(s.depth(), 2);

    for line in [
        "setoption name Depth value 0",
        "setoption name Depth value 9",
        "setoption name Depth value deep",
        "setoption name Hash value 16",
    ] {
        let (_, out) = run(&mut s, line);
        assert!(out.starts_with("info string "), "{line}: {out}");
        assert_eq!(s.depth(), 2, "{line}");
    }

    let (_, out) = run(&mut s, "uci");
    assert!(out.contains("option name Depth type spin default 2 min 1 max 8"));
}

#[test]
fn test_display_board() {
    let mut s = session();
    let (_, out) = run(&mut s, "d");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "r n b q k b n r");
    assert_eq!(lines[7], "R N B Q K B N R");
    assert_eq!(lines[8], format!("Fen: {START_FEN}"));
    assert_eq!(lines[9], "Result: * (ongoing)");
}

#[test]
fn test_unknown_command() {
    let mut s = session();
    let (control, out) = run(&mut s, "xyzzy 42");
    assert_eq!(control, Control::Continue);
    assert_eq!(out, "Unknown command: xyzzy 42\n");
}

#[test]
fn test_stop_and_quit() {
    let mut s = session();
    assert_eq!(run(&mut s, "stop"), (Control::Continue, String::new()));
    assert_eq!(run(&mut s, "quit").0, Control::Quit);
}
