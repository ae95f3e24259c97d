use super::*;
use crate::uci::parse_uci_move;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn test_startpos_matches_start_fen() {
    assert_eq!(Position::startpos(), Position::from_fen(START_FEN).unwrap());
    assert_eq!(Position::startpos().to_fen(), START_FEN);
}

#[test]
fn test_fen_round_trip_keeps_rights_and_ep() {
    let fen = "r3k2r/8/8/3pP3/8/8/8/R3K2R w Kq d6 3 17";
    assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
}

#[test]
fn test_fen_errors() {
    assert_eq!(Position::from_fen("8/8 w"), Err(FenError::MissingFields(2)));
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8 w - -"),
        Err(FenError::RankCount(7))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K2 w - -"),
        Err(FenError::RankWidth { rank: 7 })
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4X3 w - -"),
        Err(FenError::Piece('X'))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
        Err(FenError::SideToMove("x".to_string()))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::Kings(Color::Black))
    );
}

#[test]
fn test_make_unmake_restores_every_move_kind() {
    let start = Position::from_fen("r3k2r/1P6/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").unwrap();
    for uci in ["e1g1", "e1c1", "e5d6", "b7a8q", "b7b8n", "a1a8"] {
        let mut pos = start.clone();
        let mv = parse_uci_move(&pos, uci).unwrap();
        let undo = pos.make_move(mv).unwrap();
        assert_ne!(pos, start, "{uci} should change the position");
        pos.unmake_move(mv, undo);
        assert_eq!(pos, start, "{uci} should unmake cleanly");
    }
}

#[test]
fn test_castling_moves_rook_and_drops_rights() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "e1g1").unwrap();
    assert!(mv.is_castle);
    pos.make_move(mv).unwrap();

    assert_eq!(pos.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(pos.piece_at(sq("h1")), None);
    assert!(!pos.castling.wk && !pos.castling.wq);
    assert!(pos.castling.bk && pos.castling.bq);
}

#[test]
fn test_capturing_rook_on_corner_drops_right() {
    let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = parse_uci_move(&pos, "a1a8").unwrap();
    pos.make_move(mv).unwrap();
    assert!(!pos.castling.wq);
    assert!(!pos.castling.bq);
    assert!(pos.castling.bk);
}

#[test]
fn test_double_push_sets_en_passant_square() {
    let mut pos = Position::startpos();
    let mv = parse_uci_move(&pos, "e2e4").unwrap();
    pos.make_move(mv).unwrap();
    assert_eq!(pos.en_passant, Some(sq("e3")));
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.side_to_move, Color::Black);
}

#[test]
fn test_make_move_from_empty_square_is_refused() {
    let mut pos = Position::startpos();
    assert!(pos.make_move(Move::new(sq("e4"), sq("e5"))).is_none());
    assert_eq!(pos, Position::startpos());
}

#[test]
fn test_square_attacks() {
    let pos = Position::from_fen("4k3/8/8/8/3p4/8/8/R3K3 w - - 0 1").unwrap();
    // Black pawn d4 covers c3 and e3.
    assert!(pos.is_square_attacked(sq("c3"), Color::Black));
    assert!(pos.is_square_attacked(sq("e3"), Color::Black));
    assert!(!pos.is_square_attacked(sq("d3"), Color::Black));
    // White rook a1 sweeps the a-file and the first rank up to the king.
    assert!(pos.is_square_attacked(sq("a8"), Color::White));
    assert!(pos.is_square_attacked(sq("d1"), Color::White));
}
