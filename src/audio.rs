//! Fire-and-forget sound cues. Playback failures never reach the scoring code.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Chime,       // mascot point
    Pop,         // balloon popped
    Celebration, // threshold reached
    Ambient,     // looping background bed
}

impl AudioCue {
    /// DOM id of the `<audio>` element carrying this cue.
    pub fn element_id(self) -> &'static str {
        match self {
            AudioCue::Chime => "pookie-chime",
            AudioCue::Pop => "pookie-pop",
            AudioCue::Celebration => "pookie-celebration",
            AudioCue::Ambient => "pookie-ambient",
        }
    }

    pub fn volume(self) -> f64 {
        match self {
            AudioCue::Chime => 0.4,
            AudioCue::Pop => 0.3,
            AudioCue::Celebration => 0.5,
            AudioCue::Ambient => 0.08,
        }
    }

    pub fn looping(self) -> bool {
        matches!(self, AudioCue::Ambient)
    }
}

pub trait AudioCues {
    fn play(&mut self, cue: AudioCue);
}

/// No audio backend (headless runs, muted page).
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioCues for SilentAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Remembers every cue; clones share the log.
#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    played: Rc<RefCell<Vec<AudioCue>>>,
}

impl RecordingAudio {
    pub fn played(&self) -> Vec<AudioCue> {
        self.played.borrow().clone()
    }

    pub fn count(&self, cue: AudioCue) -> usize {
        self.played.borrow().iter().filter(|c| **c == cue).count()
    }
}

impl AudioCues for RecordingAudio {
    fn play(&mut self, cue: AudioCue) {
        self.played.borrow_mut().push(cue);
    }
}
