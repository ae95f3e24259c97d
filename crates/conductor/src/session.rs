//! Session driver
//!
//! Owns the orchestrator and the audio engine, feeds them messages one at a
//! time and turns their effects into tokio tasks that post messages back on
//! the session's channel.

use chess_core::{Game, RulesEngine};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::audio::AudioEngine;
use crate::error::TurnError;
use crate::orchestrator::{Conductor, Message};
use crate::scheduler::Effect;

pub struct Session<R = Game> {
    conductor: Conductor<R>,
    audio: AudioEngine,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    pending: Option<JoinHandle<()>>,
}

impl<R: RulesEngine + Default> Session<R> {
    /// Must be called inside a tokio runtime; `effects` are the ones
    /// returned alongside the conductor.
    pub fn new(conductor: Conductor<R>, effects: Vec<Effect>, audio: AudioEngine) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut session = Self {
            conductor,
            audio,
            tx,
            rx,
            pending: None,
        };
        session.run(effects);
        session
    }

    pub fn conductor(&self) -> &Conductor<R> {
        &self.conductor
    }

    pub fn audio(&self) -> &AudioEngine {
        &self.audio
    }

    /// Handle for posting messages from elsewhere (another task, a UI).
    pub fn sender(&self) -> mpsc::UnboundedSender<Message> {
        self.tx.clone()
    }

    /// Wait for the next message posted to the session. Never returns `None`
    /// while the session is alive, since it holds a sender itself.
    pub async fn recv(&mut self) -> Option<Message> {
        self.rx.recv().await
    }

    /// Process one message. User gestures also unlock audio.
    pub fn handle(&mut self, message: Message) -> Result<(), TurnError> {
        if message.is_user_gesture() && self.audio.request_start() {
            let tx = self.tx.clone();
            tokio::spawn(async move {
                tokio::task::yield_now().await;
                let _ = tx.send(Message::AudioStarted);
            });
        }

        let effects = self.conductor.update(message, &mut self.audio)?;
        self.run(effects);
        Ok(())
    }

    /// Receive and process the next message.
    pub async fn step(&mut self) -> Option<Result<(), TurnError>> {
        let message = self.recv().await?;
        Some(self.handle(message))
    }

    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Schedule { delay, scheduled } => {
                    self.cancel_pending();
                    let tx = self.tx.clone();
                    self.pending = Some(tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(Message::ComputerMoveReady(scheduled));
                    }));
                }
                Effect::CancelPending => self.cancel_pending(),
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    /// Stop timers and release the audio device.
    pub fn shutdown(mut self) {
        self.cancel_pending();
        self.audio.dispose();
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
