use super::*;

#[test]
fn test_startpos_fen_round_trip() {
    let pos = Position::startpos();
    assert_eq!(pos.to_fen(), START_FEN);
    assert_eq!(Position::from_fen(START_FEN).unwrap().to_fen(), START_FEN);
}

#[test]
fn test_fen_defaults_clocks() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    assert_eq!(pos.side_to_move, Color::Black);
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 1);
    assert_eq!(pos.castling, CastlingRights::NONE);
}

#[test]
fn test_fen_rejects_garbage() {
    for fen in [
        "",
        "8/8/8/8/8/8/8 w - -",
        "9/8/8/8/8/8/8/8 w - -",
        "4k3/8/8/8/8/8/8/4K3 x - -",
        "4k3/8/8/8/8/8/8/4K3 w Z -",
        "4k3/8/8/8/8/8/8/4X3 w - -",
        "4k3/8/8/8/8/8/8/4K3 w - z9",
    ] {
        assert!(
            matches!(Position::from_fen(fen), Err(ChessError::InvalidFen { .. })),
            "accepted {fen:?}"
        );
    }
}

#[test]
fn test_validate_catches_impossible_positions() {
    let no_black_king = Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(matches!(
        no_black_king.validate(),
        Err(ChessError::InvalidPosition { .. })
    ));

    // Black is in check but it is White's move.
    let wrong_side = Position::from_fen("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1").unwrap();
    assert!(wrong_side.validate().is_err());

    assert!(Position::startpos().validate().is_ok());
}

#[test]
fn test_apply_leaves_original_untouched() {
    let pos = Position::startpos();
    let mv = crate::parse_uci_move(&pos, "e2e4").unwrap();
    let next = pos.apply(mv).unwrap();

    assert_eq!(pos.to_fen(), START_FEN);
    assert_eq!(
        next.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
    assert_eq!(next.last_move(), Some(mv));
    assert_eq!(pos.last_move(), None);
}

#[test]
fn test_apply_rejects_illegal_moves() {
    let pos = Position::startpos();
    // Rook cannot jump its own pawn.
    assert!(matches!(
        pos.apply(Move::new(0, 16)),
        Err(ChessError::IllegalMove { .. })
    ));
    // Black piece on White's move.
    assert!(pos.apply(Move::new(52, 36)).is_err());
    // Pinned bishop may not leave the pin line.
    let pinned = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    assert!(pinned.apply(Move::new(12, 19)).is_err());
}

#[test]
fn test_make_unmake_restores_position() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut pos = Position::from_fen(fen).unwrap();
    for mv in crate::legal_moves(&pos) {
        let undo = pos.make_move(mv);
        pos.unmake_move(mv, undo);
        assert_eq!(pos.to_fen(), fen, "unmake of {mv} corrupted the board");
    }
}

#[test]
fn test_castling_moves_rook_and_clears_rights() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = crate::parse_uci_move(&pos, "e1g1").unwrap();
    assert!(castle.is_castle);
    let next = pos.apply(castle).unwrap();
    assert_eq!(next.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
}

#[test]
fn test_validate_rejects_stray_en_passant_square() {
    for fen in [
        // Black king stands where the pushed pawn should be.
        "8/8/8/3Pk3/8/8/8/4K3 w - e6 0 1",
        // Wrong rank for White to move.
        "4k3/8/8/3pP3/8/8/8/4K3 w - d3 0 1",
        // Start square still occupied.
        "4k3/3r4/8/3pP3/8/8/8/4K3 w - d6 0 1",
        // Skipped square occupied.
        "4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1",
        // The pawn beyond the square belongs to the side to move.
        "4k3/8/8/8/4p3/8/8/4K3 b - e3 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        assert!(
            matches!(pos.validate(), Err(ChessError::InvalidPosition { .. })),
            "{fen}"
        );
    }

    for fen in [
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    ] {
        assert!(Position::from_fen(fen).unwrap().validate().is_ok(), "{fen}");
    }
}

#[test]
fn test_en_passant_capture_removes_pawn() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let ep = crate::parse_uci_move(&pos, "e5d6").unwrap();
    assert!(ep.is_en_passant);
    let next = pos.apply(ep).unwrap();
    assert_eq!(next.piece_at(35), None); // d5
    assert_eq!(
        next.piece_at(43),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );
}

#[test]
fn test_display_grid() {
    let text = Position::startpos().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "r n b q k b n r");
    assert_eq!(lines[4], ". . . . . . . .");
    assert_eq!(lines[7], "R N B Q K B N R");
}
