use super::*;

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_move_order_is_stable() {
    let pos = Position::startpos();
    assert_eq!(legal_moves(&pos), legal_moves(&pos));
    // a1..h8 scan: the b1 knight comes before any pawn.
    assert_eq!(legal_moves(&pos)[0].from, 1);
}

#[test]
fn test_promotions_generate_four_moves() {
    let pos = Position::from_fen("8/4P1k1/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promos: Vec<Move> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.promo.is_some())
        .collect();
    assert_eq!(promos.len(), 4);
}

#[test]
fn test_no_castling_through_check() {
    // Black rook on f8 covers f1.
    let pos = Position::from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| !m.is_castle));
}

#[test]
fn test_has_legal_move_matches_generation() {
    let mated =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    assert!(!has_legal_move(&mated));
    assert!(legal_moves(&mated).is_empty());
    assert!(has_legal_move(&Position::startpos()));
}
