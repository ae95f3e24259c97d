use super::*;
use chess_core::{Game, RulesEngine};
use rand::rngs::mock::StepRng;

fn candidates(fen: &str) -> Vec<LegalMove> {
    Game::from_fen(fen).unwrap().legal_moves(None)
}

// White can check with Ra8+, capture with exd5, or push quietly.
const CHECK_AVAILABLE: &str = "4k3/8/8/3p4/4P3/8/8/R3K3 w Q - 0 1";
// Same idea without the rook: a capture and some quiet moves, no checks.
const CAPTURE_ONLY: &str = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1";

#[test]
fn tiered_engine_handles_no_candidates() {
    let mut engine = TieredEngine::seeded(7);
    assert!(engine.choose_move(&[]).is_none());

    let mated = candidates("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    assert!(engine.choose_move(&mated).is_none());
}

#[test]
fn tiered_engine_always_prefers_checks() {
    let moves = candidates(CHECK_AVAILABLE);
    assert!(moves.iter().any(|m| !m.gives_check()));

    for seed in 0..50 {
        let mut engine = TieredEngine::seeded(seed);
        let (pick, tier) = engine.choose_tiered(&moves).unwrap();
        assert_eq!(tier, Tier::Check);
        assert!(pick.gives_check(), "seed {seed} picked {}", pick.san);
    }
}

#[test]
fn tiered_engine_is_reproducible_from_seed() {
    let moves = candidates(chess_core::START_FEN);
    let run = |seed| {
        let mut engine = TieredEngine::seeded(seed);
        (0..10)
            .map(|_| engine.choose_move(&moves).unwrap().san)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn tiered_engine_capture_chance_bounds() {
    let moves = candidates(CAPTURE_ONLY);

    let mut always = TieredEngine::seeded(1).with_capture_chance(1.0);
    for _ in 0..20 {
        let (pick, tier) = always.choose_tiered(&moves).unwrap();
        assert_eq!(tier, Tier::Capture);
        assert_eq!(pick.san, "exd5");
    }

    let mut never = TieredEngine::seeded(1).with_capture_chance(0.0);
    for _ in 0..20 {
        let (_, tier) = never.choose_tiered(&moves).unwrap();
        assert_eq!(tier, Tier::Any);
    }
}

#[test]
fn tiered_engine_takes_captures_sometimes() {
    let moves = candidates(CAPTURE_ONLY);
    let mut engine = TieredEngine::seeded(2024);
    let capture_tier = (0..400)
        .filter(|_| engine.choose_tiered(&moves).unwrap().1 == Tier::Capture)
        .count();
    assert!((100..300).contains(&capture_tier), "got {capture_tier}");
}

#[test]
fn tiered_engine_accepts_any_rng() {
    let moves = candidates(chess_core::START_FEN);
    let mut engine = TieredEngine::with_rng(StepRng::new(0, 1));
    let pick = engine.choose_move(&moves).unwrap();
    assert!(moves.contains(&pick));
}

#[test]
fn tiered_engine_clamps_capture_chance() {
    assert_eq!(TieredEngine::seeded(0).with_capture_chance(3.0).capture_chance(), 1.0);
    assert_eq!(TieredEngine::seeded(0).with_capture_chance(-1.0).capture_chance(), 0.0);
}
