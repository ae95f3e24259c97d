//! Audio playback
//!
//! [`AudioEngine`] owns a backend and its lifecycle. Playback is
//! fire-and-forget: events sent before the backend is ready are dropped, and
//! backend failures are logged and swallowed so they never reach the turn
//! logic.

use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::sonify::{AudioEvent, NoteEvent, PhraseCue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Something that can make (or pretend to make) sound.
pub trait AudioBackend: Send {
    /// Acquire the output device. Called once per successful initialization.
    fn start(&mut self) -> Result<(), AudioError>;

    fn trigger_note(&mut self, note: &NoteEvent) -> Result<(), AudioError>;

    fn trigger_phrase(&mut self, cue: &PhraseCue) -> Result<(), AudioError>;

    /// Release the output device.
    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Uninitialized,
    /// A user gesture asked for audio; the backend is not up yet.
    Starting,
    Ready,
    /// The backend refused to start. The next gesture retries.
    Failed,
    Disposed,
}

pub struct AudioEngine {
    backend: Box<dyn AudioBackend>,
    state: AudioState,
}

impl AudioEngine {
    pub fn new(backend: impl AudioBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            state: AudioState::Uninitialized,
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == AudioState::Ready
    }

    /// Note a user gesture. Returns true when initialization should now be
    /// kicked off.
    pub fn request_start(&mut self) -> bool {
        match self.state {
            AudioState::Uninitialized | AudioState::Failed => {
                self.state = AudioState::Starting;
                true
            }
            AudioState::Starting | AudioState::Ready | AudioState::Disposed => false,
        }
    }

    /// Complete initialization. Returns whether audio is ready afterwards.
    pub fn finish_start(&mut self) -> bool {
        if self.state != AudioState::Starting {
            return self.is_ready();
        }
        match self.backend.start() {
            Ok(()) => {
                tracing::info!("audio ready");
                self.state = AudioState::Ready;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "audio failed to start");
                self.state = AudioState::Failed;
                false
            }
        }
    }

    /// Hand events to the backend in order. Returns how many were accepted.
    pub fn play(&mut self, events: &[AudioEvent]) -> usize {
        if events.is_empty() {
            return 0;
        }
        if !self.is_ready() {
            tracing::debug!(state = ?self.state, dropped = events.len(), "audio not ready, dropping events");
            return 0;
        }

        let mut played = 0;
        for event in events {
            let result = match event {
                AudioEvent::Note(note) => self.backend.trigger_note(note),
                AudioEvent::Phrase(cue) => self.backend.trigger_phrase(cue),
            };
            match result {
                Ok(()) => played += 1,
                Err(err) => tracing::warn!(error = %err, ?event, "audio event failed"),
            }
        }
        played
    }

    pub fn dispose(&mut self) {
        if self.state == AudioState::Ready {
            self.backend.stop();
        }
        self.state = AudioState::Disposed;
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        if self.state == AudioState::Ready {
            self.backend.stop();
        }
    }
}

// =============================================================================
// Backends
// =============================================================================

/// Writes every event to the log instead of a sound card.
#[derive(Debug)]
pub struct LogBackend {
    tempo_bpm: u32,
}

impl LogBackend {
    pub fn new(tempo_bpm: u32) -> Self {
        Self { tempo_bpm }
    }
}

impl AudioBackend for LogBackend {
    fn start(&mut self) -> Result<(), AudioError> {
        tracing::debug!(tempo_bpm = self.tempo_bpm, "log audio backend started");
        Ok(())
    }

    fn trigger_note(&mut self, note: &NoteEvent) -> Result<(), AudioError> {
        let envelope = note.channel.envelope();
        tracing::info!(
            channel = %note.channel,
            pitch = %note.pitch,
            length = note.length.name(),
            at_ms = note.offset_ms,
            attack_ms = envelope.attack_ms,
            decay_ms = envelope.decay_ms,
            sustain_pct = envelope.sustain_pct,
            release_ms = envelope.release_ms,
            "note"
        );
        Ok(())
    }

    fn trigger_phrase(&mut self, cue: &PhraseCue) -> Result<(), AudioError> {
        tracing::info!(
            phrase = %cue.phrase,
            synth = %cue.phrase.instrument(),
            span_ms = cue.phrase.span_ms(self.tempo_bpm),
            at_ms = cue.offset_ms,
            "phrase"
        );
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!("log audio backend stopped");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Started,
    Note(NoteEvent),
    Phrase(PhraseCue),
    Stopped,
}

#[derive(Debug, Default)]
struct Recording {
    log: Vec<Recorded>,
    fail_start: bool,
    fail_triggers: bool,
}

/// Test double: records what it is asked to play and can be told to fail.
/// Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn fail_start(&self, fail: bool) {
        self.lock().fail_start = fail;
    }

    pub fn fail_triggers(&self, fail: bool) {
        self.lock().fail_triggers = fail;
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.lock().log.clone()
    }

    pub fn notes(&self) -> Vec<NoteEvent> {
        self.lock()
            .log
            .iter()
            .filter_map(|r| match r {
                Recorded::Note(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn phrases(&self) -> Vec<PhraseCue> {
        self.lock()
            .log
            .iter()
            .filter_map(|r| match r {
                Recorded::Phrase(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().log.clear();
    }
}

impl AudioBackend for RecordingBackend {
    fn start(&mut self) -> Result<(), AudioError> {
        let mut rec = self.lock();
        if rec.fail_start {
            return Err(AudioError::Unavailable("no output device".into()));
        }
        rec.log.push(Recorded::Started);
        Ok(())
    }

    fn trigger_note(&mut self, note: &NoteEvent) -> Result<(), AudioError> {
        let mut rec = self.lock();
        if rec.fail_triggers {
            return Err(AudioError::Backend("voice allocation failed".into()));
        }
        rec.log.push(Recorded::Note(*note));
        Ok(())
    }

    fn trigger_phrase(&mut self, cue: &PhraseCue) -> Result<(), AudioError> {
        let mut rec = self.lock();
        if rec.fail_triggers {
            return Err(AudioError::Backend("voice allocation failed".into()));
        }
        rec.log.push(Recorded::Phrase(*cue));
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().log.push(Recorded::Stopped);
    }
}

#[cfg(test)]
#[path = "audio_tests.rs"]
mod audio_tests;
