//! Presentation feedback events.
//!
//! Feedback is fire-and-forget: the engine emits an event and never looks
//! at the outcome. Sinks must not fail.

use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Effect discriminator
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectId {
    /// Transmutation tool discharged over a region
    Power = 0,
}

/// A single audible/visual cue.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// Which effect to play
    pub effect: EffectId,
    /// Where to play it
    pub position: Vec3,
    /// Loudness, 1.0 is nominal
    pub volume: f32,
    /// Pitch multiplier, scales with charge
    pub pitch: f32,
}

/// Receiver of presentation feedback.
pub trait FeedbackSink {
    /// Emits one event. Never fails.
    fn emit(&mut self, event: FeedbackEvent);
}

/// Sink that records every event, in order.
#[derive(Clone, Debug, Default)]
pub struct FeedbackLog {
    events: Vec<FeedbackEvent>,
}

impl FeedbackLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far.
    #[must_use]
    pub fn events(&self) -> &[FeedbackEvent] {
        &self.events
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut self.events)
    }
}

impl FeedbackSink for FeedbackLog {
    fn emit(&mut self, event: FeedbackEvent) {
        self.events.push(event);
    }
}
