use super::*;
use crate::audio::{RecordingBackend, Recorded};
use chess_core::{AppliedMove, LegalMove, Piece, PieceKind, Snapshot};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn mv(from: &str, to: &str) -> Message {
    Message::MoveRequested(MoveRequest::new(sq(from), sq(to)))
}

/// Always plays the first legal move it is offered.
struct FirstMove;

impl Engine for FirstMove {
    fn choose_move(&mut self, candidates: &[LegalMove]) -> Option<LegalMove> {
        candidates.first().cloned()
    }

    fn name(&self) -> &str {
        "first"
    }
}

fn audio() -> (AudioEngine, RecordingBackend) {
    let backend = RecordingBackend::new();
    let mut audio = AudioEngine::new(backend.clone());
    audio.request_start();
    audio.finish_start();
    backend.clear();
    (audio, backend)
}

fn conductor(config: &ConductorConfig) -> (Conductor, Vec<Effect>) {
    Conductor::new(config, Box::new(FirstMove))
}

fn scheduled(effects: &[Effect]) -> ScheduledMove {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::Schedule { scheduled, .. } => Some(*scheduled),
            Effect::CancelPending => None,
        })
        .expect("a computer move should be scheduled")
}

// =============================================================================
// Human moves and turn flow
// =============================================================================

#[test]
fn test_human_move_starts_computer_thinking() {
    let (mut c, effects) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();
    assert!(effects.is_empty());
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);

    let effects = c.update(mv("e2", "e4"), &mut audio).unwrap();
    assert_eq!(c.history(), ["e4"]);
    assert_eq!(c.game().turn(), Color::Black);
    assert_eq!(c.state(), TurnState::ComputerThinking);
    match &effects[..] {
        [Effect::Schedule { delay, scheduled }] => {
            assert_eq!(*delay, Duration::from_millis(1000));
            assert_eq!(scheduled.epoch, c.epoch());
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn test_computer_move_commits_after_delay() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();
    let effects = c.update(mv("e2", "e4"), &mut audio).unwrap();

    let effects = c
        .update(Message::ComputerMoveReady(scheduled(&effects)), &mut audio)
        .unwrap();
    assert!(effects.is_empty());
    assert_eq!(c.history().len(), 2);
    assert_eq!(c.game().turn(), Color::White);
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);
}

#[test]
fn test_requests_rejected_while_thinking() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();
    c.update(mv("e2", "e4"), &mut audio).unwrap();

    assert_eq!(c.update(mv("d2", "d4"), &mut audio), Err(TurnError::ComputerThinking));
    assert_eq!(
        c.update(Message::SquareClicked(sq("d2")), &mut audio),
        Err(TurnError::ComputerThinking)
    );
    assert_eq!(c.history(), ["e4"]);
}

/// Offers a null move (from == to) the first `misses` times it is asked,
/// then plays the first legal move.
struct Stubborn {
    misses: usize,
}

impl Engine for Stubborn {
    fn choose_move(&mut self, candidates: &[LegalMove]) -> Option<LegalMove> {
        let mut pick = candidates.first().cloned()?;
        if self.misses > 0 {
            self.misses -= 1;
            pick.mv.to = pick.mv.from;
        }
        Some(pick)
    }

    fn name(&self) -> &str {
        "stubborn"
    }
}

#[test]
fn test_rejected_computer_move_asks_again() {
    let config = ConductorConfig::default();
    let (mut c, _): (Conductor, _) = Conductor::new(&config, Box::new(Stubborn { misses: 1 }));
    let (mut audio, backend) = audio();
    let effects = c.update(mv("e2", "e4"), &mut audio).unwrap();
    let bad = scheduled(&effects);
    assert_eq!(bad.request.from, bad.request.to);
    backend.clear();

    let effects = c.update(Message::ComputerMoveReady(bad), &mut audio).unwrap();
    assert_eq!(c.state(), TurnState::ComputerThinking);
    assert_eq!(c.history(), ["e4"]);
    assert!(backend.recorded().is_empty());
    let retry = scheduled(&effects);
    assert_eq!(retry.epoch, c.epoch());
    assert_ne!(retry.request.from, retry.request.to);

    // Still the computer's turn, so the human is told to wait.
    assert_eq!(c.update(mv("d2", "d4"), &mut audio), Err(TurnError::ComputerThinking));

    let effects = c.update(Message::ComputerMoveReady(retry), &mut audio).unwrap();
    assert!(effects.is_empty());
    assert_eq!(c.history().len(), 2);
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);
    c.update(mv("d2", "d4"), &mut audio).unwrap();
    assert_eq!(c.history().len(), 3);
}

#[test]
fn test_illegal_move_leaves_board_unchanged() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, backend) = audio();
    let before = c.view();

    assert_eq!(
        c.update(mv("e2", "e5"), &mut audio),
        Err(TurnError::InvalidMove {
            from: sq("e2"),
            to: sq("e5")
        })
    );
    assert_eq!(c.view(), before);
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);
    assert!(backend.recorded().is_empty());
}

#[test]
fn test_turns_alternate() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();
    for (n, (from, to)) in [("e2", "e4"), ("g1", "f3"), ("f1", "c4")].into_iter().enumerate() {
        let effects = c.update(mv(from, to), &mut audio).unwrap();
        assert_eq!(c.history().len(), 2 * n + 1);
        c.update(Message::ComputerMoveReady(scheduled(&effects)), &mut audio)
            .unwrap();
        assert_eq!(c.history().len(), 2 * n + 2);
        assert_eq!(c.game().turn(), Color::White);
    }
}

#[test]
fn test_human_as_black_waits_for_computer() {
    let config = ConductorConfig {
        human_color: crate::config::Side::Black,
        ..ConductorConfig::default()
    };
    let (mut c, effects) = conductor(&config);
    let (mut audio, _) = audio();
    assert_eq!(c.state(), TurnState::ComputerThinking);
    assert_eq!(c.update(mv("e7", "e5"), &mut audio), Err(TurnError::ComputerThinking));

    c.update(Message::ComputerMoveReady(scheduled(&effects)), &mut audio)
        .unwrap();
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);
    assert_eq!(c.game().turn(), Color::Black);
}

#[test]
fn test_checkmate_ends_game() {
    let rules = Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 1").unwrap();
    let game = GameState::with_rules(rules, Color::White, false);
    let config = ConductorConfig::default();
    let (mut c, _) = Conductor::with_game(game, &config, Box::new(FirstMove));
    let (mut audio, backend) = audio();

    let effects = c.update(mv("h5", "f7"), &mut audio).unwrap();
    assert!(effects.is_empty());
    assert_eq!(c.state(), TurnState::GameOver);
    assert_eq!(c.history(), ["Qxf7#"]);
    assert!(c.view().status.contains("White wins"));
    assert_eq!(backend.phrases()[0].phrase, Phrase::Checkmate);

    assert_eq!(c.update(mv("e8", "f7"), &mut audio), Err(TurnError::GameOver));
    assert_eq!(c.update(Message::SquareClicked(sq("a2")), &mut audio), Err(TurnError::GameOver));
    assert_eq!(c.history().len(), 1);
}

// =============================================================================
// Click-to-move
// =============================================================================

#[test]
fn test_click_select_and_deselect() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();

    c.update(Message::SquareClicked(sq("e7")), &mut audio).unwrap();
    assert_eq!(c.selected(), None, "opponent pieces are not selectable");
    c.update(Message::SquareClicked(sq("e4")), &mut audio).unwrap();
    assert_eq!(c.selected(), None);

    c.update(Message::SquareClicked(sq("e2")), &mut audio).unwrap();
    assert_eq!(c.selected(), Some(sq("e2")));
    c.update(Message::SquareClicked(sq("e2")), &mut audio).unwrap();
    assert_eq!(c.selected(), None);
}

#[test]
fn test_click_moves_selected_piece() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();

    c.update(Message::SquareClicked(sq("g1")), &mut audio).unwrap();
    let effects = c.update(Message::SquareClicked(sq("f3")), &mut audio).unwrap();
    assert_eq!(c.history(), ["Nf3"]);
    assert_eq!(c.selected(), None);
    assert_eq!(effects.len(), 1);
}

#[test]
fn test_click_rejected_move_reselects_own_piece() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();

    c.update(Message::SquareClicked(sq("g1")), &mut audio).unwrap();
    c.update(Message::SquareClicked(sq("b1")), &mut audio).unwrap();
    assert_eq!(c.selected(), Some(sq("b1")));
    assert!(c.history().is_empty());

    let err = c.update(Message::SquareClicked(sq("b4")), &mut audio);
    assert!(matches!(err, Err(TurnError::InvalidMove { .. })));
    assert_eq!(c.selected(), None);
}

// =============================================================================
// Reset, side switch and stale work
// =============================================================================

#[test]
fn test_stale_computer_move_ignored_after_reset() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();
    let effects = c.update(mv("e2", "e4"), &mut audio).unwrap();
    let pending = scheduled(&effects);

    let effects = c.update(Message::NewGame, &mut audio).unwrap();
    assert_eq!(effects, [Effect::CancelPending]);
    assert!(c.history().is_empty());
    assert_ne!(c.epoch(), pending.epoch);

    c.update(Message::ComputerMoveReady(pending), &mut audio).unwrap();
    assert!(c.history().is_empty());
    assert_eq!(c.game().turn(), Color::White);
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);
}

#[test]
fn test_reset_after_game_over() {
    let rules = Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 0 1").unwrap();
    let game = GameState::with_rules(rules, Color::White, false);
    let (mut c, _) = Conductor::with_game(game, &ConductorConfig::default(), Box::new(FirstMove));
    let (mut audio, backend) = audio();
    c.update(mv("h5", "f7"), &mut audio).unwrap();
    backend.clear();

    c.update(Message::NewGame, &mut audio).unwrap();
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);
    assert_eq!(c.game().rules.piece_at(sq("e2")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(backend.phrases()[0].phrase, Phrase::Opening);
}

#[test]
fn test_switch_sides_while_thinking_cancels() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();
    let effects = c.update(mv("e2", "e4"), &mut audio).unwrap();
    let pending = scheduled(&effects);

    let effects = c.update(Message::SwitchSides, &mut audio).unwrap();
    assert_eq!(effects, [Effect::CancelPending]);
    assert_eq!(c.human_color(), Color::Black);
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);

    c.update(Message::ComputerMoveReady(pending), &mut audio).unwrap();
    assert_eq!(c.history(), ["e4"]);

    c.update(mv("e7", "e5"), &mut audio).unwrap();
    assert_eq!(c.history(), ["e4", "e5"]);
    assert_eq!(c.state(), TurnState::ComputerThinking);
}

#[test]
fn test_switch_sides_hands_turn_to_computer() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, _) = audio();
    c.update(Message::SquareClicked(sq("e2")), &mut audio).unwrap();

    let effects = c.update(Message::SwitchSides, &mut audio).unwrap();
    assert_eq!(c.selected(), None);
    assert_eq!(c.state(), TurnState::ComputerThinking);
    let pending = scheduled(&effects);

    c.update(Message::ComputerMoveReady(pending), &mut audio).unwrap();
    assert_eq!(c.history().len(), 1);
    assert_eq!(c.game().turn(), Color::Black);
    assert_eq!(c.state(), TurnState::AwaitingHumanInput);
}

// =============================================================================
// Audio
// =============================================================================

#[test]
fn test_moves_are_sonified() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, backend) = audio();
    c.update(mv("e2", "e4"), &mut audio).unwrap();

    let notes = backend.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].pitch, crate::sonify::Pitch::for_square(sq("e4")));
}

#[test]
fn test_mute_toggle_silences_moves() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, backend) = audio();
    c.update(Message::ToggleMute, &mut audio).unwrap();
    assert!(c.is_muted());

    c.update(mv("e2", "e4"), &mut audio).unwrap();
    assert!(backend.recorded().is_empty());
    assert_eq!(c.history(), ["e4"]);
}

#[test]
fn test_opening_phrase_when_audio_starts() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let backend = RecordingBackend::new();
    let mut audio = AudioEngine::new(backend.clone());

    c.update(mv("e2", "e4"), &mut audio).unwrap();
    assert!(backend.recorded().is_empty(), "audio before init is dropped");

    audio.request_start();
    c.update(Message::AudioStarted, &mut audio).unwrap();
    assert_eq!(backend.recorded()[0], Recorded::Started);
    assert_eq!(backend.phrases()[0].phrase, Phrase::Opening);
}

#[test]
fn test_audio_failure_does_not_block_moves() {
    let (mut c, _) = conductor(&ConductorConfig::default());
    let (mut audio, backend) = audio();
    backend.fail_triggers(true);

    c.update(mv("e2", "e4"), &mut audio).unwrap();
    assert_eq!(c.history(), ["e4"]);
    assert_eq!(c.state(), TurnState::ComputerThinking);
}

// =============================================================================
// Rules disagreement
// =============================================================================

/// Real rules, but reports every square as empty.
#[derive(Default)]
struct Blind(Game);

impl RulesEngine for Blind {
    fn current_turn(&self) -> Color {
        self.0.current_turn()
    }
    fn legal_moves(&self, from: Option<Square>) -> Vec<LegalMove> {
        self.0.legal_moves(from)
    }
    fn piece_at(&self, _sq: Square) -> Option<Piece> {
        None
    }
    fn apply_move(&mut self, from: Square, to: Square, promo: Option<PieceKind>) -> Option<AppliedMove> {
        self.0.apply_move(from, to, promo)
    }
    fn is_check(&self) -> bool {
        self.0.is_check()
    }
    fn is_checkmate(&self) -> bool {
        self.0.is_checkmate()
    }
    fn is_stalemate(&self) -> bool {
        self.0.is_stalemate()
    }
    fn is_draw(&self) -> bool {
        self.0.is_draw()
    }
    fn snapshot(&self) -> Snapshot {
        self.0.snapshot()
    }
    fn restore(&mut self, snapshot: Snapshot) {
        self.0.restore(snapshot)
    }
}

#[test]
fn test_inconsistent_rules_roll_back() {
    let config = ConductorConfig::default();
    let (mut c, _) = Conductor::<Blind>::new(&config, Box::new(FirstMove));
    let (mut audio, backend) = audio();

    assert_eq!(
        c.update(mv("e2", "e4"), &mut audio),
        Err(TurnError::InternalInconsistency {
            from: sq("e2"),
            to: sq("e4")
        })
    );
    assert!(c.history().is_empty());
    assert_eq!(c.game().rules.0.ply(), 0);
    assert_eq!(c.game().turn(), Color::White);
    assert!(backend.recorded().is_empty());
}
