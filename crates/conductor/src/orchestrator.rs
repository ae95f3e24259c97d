//! Turn orchestration
//!
//! [`Conductor`] is the only thing that mutates the game. It consumes one
//! [`Message`] at a time, commits at most one move per message, asks the
//! audio engine to play whatever the move sounds like, and returns the
//! deferred work (the computer's thinking delay) as [`Effect`]s.

use std::time::Duration;

use chess_core::{Color, Engine, Game, RulesEngine, Square};

use crate::audio::AudioEngine;
use crate::classify::{classify, ClassifiedMove, MoveOutcome, MoveRequest, PreMove};
use crate::config::ConductorConfig;
use crate::error::TurnError;
use crate::game::{BoardView, Controller, GameState};
use crate::scheduler::{Effect, Epoch, ScheduledMove};
use crate::sonify::{sonify_move, sonify_phrase, Phrase, Timing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingHumanInput,
    ComputerThinking,
    /// Transient: a move was just committed and the next state is being
    /// decided.
    MoveCommitted,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A click on the board.
    SquareClicked(Square),
    /// A complete move from the board surface (drag and drop, typed move).
    MoveRequested(MoveRequest),
    /// The thinking delay for a scheduled computer move has elapsed.
    ComputerMoveReady(ScheduledMove),
    /// Audio initialization finished.
    AudioStarted,
    NewGame,
    SwitchSides,
    ToggleMute,
}

impl Message {
    /// Messages that come straight from the user and may unlock audio.
    pub fn is_user_gesture(&self) -> bool {
        !matches!(self, Message::ComputerMoveReady(_) | Message::AudioStarted)
    }
}

pub struct Conductor<R = Game> {
    game: GameState<R>,
    engine: Box<dyn Engine>,
    state: TurnState,
    epoch: Epoch,
    timing: Timing,
    thinking_delay: Duration,
}

impl<R: RulesEngine + Default> Conductor<R> {
    /// A fresh game. If the computer moves first, its move is already
    /// scheduled in the returned effects.
    pub fn new(config: &ConductorConfig, engine: Box<dyn Engine>) -> (Self, Vec<Effect>) {
        let game = GameState::new(config.human_color(), config.muted);
        Self::with_game(game, config, engine)
    }

    fn reset(&mut self, audio: &mut AudioEngine, effects: &mut Vec<Effect>) {
        let epoch = self.epoch.bump();
        tracing::info!(%epoch, "new game");
        effects.push(Effect::CancelPending);
        self.game.reset();
        self.engine.new_game();
        audio.play(&sonify_phrase(Phrase::Opening, self.game.muted));
        self.resume(effects);
    }
}

impl<R: RulesEngine> Conductor<R> {
    /// Start from an existing game state, e.g. a custom position.
    pub fn with_game(
        game: GameState<R>,
        config: &ConductorConfig,
        engine: Box<dyn Engine>,
    ) -> (Self, Vec<Effect>) {
        let mut conductor = Self {
            game,
            engine,
            state: TurnState::AwaitingHumanInput,
            epoch: Epoch::default(),
            timing: config.timing(),
            thinking_delay: config.thinking_delay(),
        };
        tracing::info!(
            human = %conductor.game.players.human(),
            engine = conductor.engine.name(),
            "session started"
        );
        let mut effects = Vec::new();
        conductor.resume(&mut effects);
        (conductor, effects)
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn history(&self) -> &[String] {
        self.game.history()
    }

    pub fn selected(&self) -> Option<Square> {
        self.game.selected
    }

    pub fn is_muted(&self) -> bool {
        self.game.muted
    }

    /// Handle one message. On error nothing on the board has changed.
    pub fn update(&mut self, message: Message, audio: &mut AudioEngine) -> Result<Vec<Effect>, TurnError>
    where
        R: Default,
    {
        let mut effects = Vec::new();
        match message {
            Message::SquareClicked(sq) => self.click(sq, audio, &mut effects)?,

            Message::MoveRequested(request) => {
                self.check_human_turn()?;
                if let Err(err) = self.attempt(request, audio, &mut effects) {
                    self.game.selected = None;
                    return Err(err);
                }
            }

            Message::ComputerMoveReady(scheduled) => self.computer_move(scheduled, audio, &mut effects),

            Message::AudioStarted => {
                if audio.finish_start() {
                    audio.play(&sonify_phrase(Phrase::Opening, self.game.muted));
                }
            }

            Message::NewGame => self.reset(audio, &mut effects),

            Message::SwitchSides => self.switch_sides(&mut effects),

            Message::ToggleMute => {
                self.game.muted = !self.game.muted;
                tracing::debug!(muted = self.game.muted, "mute toggled");
            }
        }
        Ok(effects)
    }

    fn check_human_turn(&self) -> Result<(), TurnError> {
        match self.state {
            TurnState::GameOver => Err(TurnError::GameOver),
            TurnState::ComputerThinking => Err(TurnError::ComputerThinking),
            _ if self.game.to_move() != Controller::Human => Err(TurnError::NotHumanTurn),
            _ => Ok(()),
        }
    }

    fn click(&mut self, sq: Square, audio: &mut AudioEngine, effects: &mut Vec<Effect>) -> Result<(), TurnError> {
        self.check_human_turn()?;

        match self.game.selected {
            None => {
                if self.game.is_human_piece(sq) {
                    self.game.selected = Some(sq);
                }
                Ok(())
            }
            Some(selected) if selected == sq => {
                self.game.selected = None;
                Ok(())
            }
            Some(selected) => match self.attempt(MoveRequest::new(selected, sq), audio, effects) {
                Ok(_) => Ok(()),
                Err(_) if self.game.is_human_piece(sq) => {
                    self.game.selected = Some(sq);
                    Ok(())
                }
                Err(err) => {
                    self.game.selected = None;
                    Err(err)
                }
            },
        }
    }

    fn computer_move(
        &mut self,
        scheduled: ScheduledMove,
        audio: &mut AudioEngine,
        effects: &mut Vec<Effect>,
    ) {
        if scheduled.epoch != self.epoch || self.state != TurnState::ComputerThinking {
            tracing::debug!(
                scheduled = %scheduled.epoch,
                current = %self.epoch,
                state = ?self.state,
                "ignoring stale computer move"
            );
            return;
        }

        if let Err(err) = self.attempt(scheduled.request, audio, effects) {
            // Still the computer's turn; pick again.
            tracing::error!(error = %err, request = ?scheduled.request, "computer move failed");
            self.resume(effects);
        }
    }

    /// Ask the rules to play the move, classify it and commit it.
    fn attempt(
        &mut self,
        request: MoveRequest,
        audio: &mut AudioEngine,
        effects: &mut Vec<Effect>,
    ) -> Result<ClassifiedMove, TurnError> {
        let rules = &mut self.game.rules;
        let before = rules.snapshot();
        let pre = PreMove::capture(rules, &request);
        let applied = rules.apply_move(request.from, request.to, request.promotion);

        match classify(&pre, &request, applied.as_ref(), rules) {
            MoveOutcome::Accepted(m) => {
                self.commit(&m, audio, effects);
                Ok(m)
            }
            MoveOutcome::Rejected if applied.is_some() => {
                rules.restore(before);
                Err(TurnError::InternalInconsistency {
                    from: request.from,
                    to: request.to,
                })
            }
            MoveOutcome::Rejected => {
                tracing::debug!(from = %request.from, to = %request.to, "move rejected");
                Err(TurnError::InvalidMove {
                    from: request.from,
                    to: request.to,
                })
            }
        }
    }

    fn commit(&mut self, m: &ClassifiedMove, audio: &mut AudioEngine, effects: &mut Vec<Effect>) {
        self.state = TurnState::MoveCommitted;
        self.game.record(m);
        tracing::info!(
            ply = self.game.history().len(),
            san = %m.notation,
            by = ?self.game.players.controller(m.piece.color),
            "move committed"
        );

        let outcome = MoveOutcome::Accepted(m.clone());
        audio.play(&sonify_move(&outcome, self.game.muted, &self.timing));
        self.resume(effects);
    }

    /// Settle into the state the board calls for: game over, the computer
    /// thinking, or waiting for the human.
    fn resume(&mut self, effects: &mut Vec<Effect>) {
        if self.game.rules.is_game_over() {
            self.state = TurnState::GameOver;
            tracing::info!(status = %self.status(), "game over");
            return;
        }
        match self.game.to_move() {
            Controller::Human => self.state = TurnState::AwaitingHumanInput,
            Controller::Computer => self.begin_thinking(effects),
        }
    }

    fn begin_thinking(&mut self, effects: &mut Vec<Effect>) {
        let candidates = self.game.rules.legal_moves(None);
        let Some(pick) = self.engine.choose_move(&candidates) else {
            // Nothing to play. Terminal, but the rules already said so.
            self.state = TurnState::GameOver;
            return;
        };

        self.state = TurnState::ComputerThinking;
        let mut request = MoveRequest::new(pick.mv.from, pick.mv.to);
        request.promotion = pick.mv.promo;
        tracing::debug!(san = %pick.san, delay_ms = self.thinking_delay.as_millis() as u64, "computer thinking");
        effects.push(Effect::Schedule {
            delay: self.thinking_delay,
            scheduled: ScheduledMove {
                epoch: self.epoch,
                request,
            },
        });
    }

    fn switch_sides(&mut self, effects: &mut Vec<Effect>) {
        self.game.players.switch();
        self.game.selected = None;
        tracing::info!(human = %self.game.players.human(), "sides switched");

        match self.state {
            TurnState::GameOver => {}
            TurnState::ComputerThinking => {
                self.epoch.bump();
                effects.push(Effect::CancelPending);
                self.resume(effects);
            }
            TurnState::AwaitingHumanInput | TurnState::MoveCommitted => self.resume(effects),
        }
    }

    fn status(&self) -> String {
        let rules = &self.game.rules;
        let turn = rules.current_turn();
        if rules.is_checkmate() {
            return format!("Checkmate, {} wins", turn.other());
        }
        if rules.is_stalemate() {
            return "Draw by stalemate".to_string();
        }
        if rules.is_draw() {
            return "Draw".to_string();
        }
        let who = match self.game.players.controller(turn) {
            Controller::Human => "your move",
            Controller::Computer if self.state == TurnState::ComputerThinking => "computer is thinking",
            Controller::Computer => "computer to move",
        };
        let check = if rules.is_check() { ", check" } else { "" };
        format!("{turn} to move ({who}){check}")
    }

    /// Snapshot of everything the board surface draws.
    pub fn view(&self) -> BoardView {
        let mut squares = [None; 64];
        for sq in Square::all() {
            squares[sq.index()] = self.game.rules.piece_at(sq);
        }
        BoardView {
            squares,
            turn: self.game.turn(),
            human: self.game.players.human(),
            selected: self.game.selected,
            last_move: self.game.last_move,
            status: self.status(),
            history: self.game.history().to_vec(),
            muted: self.game.muted,
        }
    }

    pub fn human_color(&self) -> Color {
        self.game.players.human()
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
