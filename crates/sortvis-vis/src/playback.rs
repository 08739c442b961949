//! Playback controls for sorting traces.
//!
//! All mutable UI state lives in [`PlaybackState`]. Commands are applied by
//! [`PlaybackState::apply`], which never touches a timer itself: it returns a
//! [`TimerDirective`] telling the owner of the auto-advance task what to do.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortvis_steps::{Algorithm, Frame, FrameSequence};

/// Fastest auto-advance interval.
pub const MIN_SPEED_MS: u64 = 100;

/// Slowest auto-advance interval.
pub const MAX_SPEED_MS: u64 = 1000;

/// Interval used until the speed is changed.
pub const DEFAULT_SPEED_MS: u64 = 500;

/// Clamp a requested interval into the supported range.
pub fn clamp_speed(speed_ms: u64) -> u64 {
    speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}

/// Frame sequences for every algorithm, generated once from one input.
#[derive(Debug, Clone)]
pub struct FrameLibrary {
    input: Vec<i32>,
    sequences: [FrameSequence; 3],
}

impl FrameLibrary {
    /// Generate all three traces for `input`.
    pub fn new(input: &[i32]) -> Self {
        Self {
            input: input.to_vec(),
            sequences: Algorithm::ALL.map(|alg| alg.generate_steps(input)),
        }
    }

    /// The sequence every trace started from.
    pub fn input(&self) -> &[i32] {
        &self.input
    }

    /// The trace for `algorithm`.
    pub fn frames(&self, algorithm: Algorithm) -> &FrameSequence {
        &self.sequences[algorithm.index()]
    }

    /// Index of the final frame of `algorithm`'s trace.
    pub fn last_index(&self, algorithm: Algorithm) -> usize {
        self.frames(algorithm).last_index()
    }
}

/// What the owner of the auto-advance task should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Cancel any running task, then start one at this period.
    Start(Duration),
    /// Cancel any running task.
    Cancel,
    /// Leave the task as it is.
    Keep,
}

/// Step direction for manual navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    Forward,
    Backward,
}

/// A command that changes playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackCommand {
    /// Switch traces; rewinds and stops.
    SelectAlgorithm { algorithm: Algorithm },
    /// Start auto-advance, rewinding first if at the final frame.
    Play,
    /// Stop auto-advance, keeping the current frame.
    Pause,
    /// Play when paused, pause when playing.
    TogglePlay,
    /// Move one frame, clamped to the trace.
    Step { direction: StepDirection },
    /// Jump to a frame, clamped to the trace.
    Seek { frame: usize },
    /// Change the interval used by the next `Play`.
    SetSpeed { speed_ms: u64 },
    /// Rewind to the first frame and stop.
    Reset,
    /// One auto-advance step, issued by the timer.
    Tick,
}

/// The mutable playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub algorithm: Algorithm,
    pub current_frame: usize,
    pub speed_ms: u64,
    pub is_playing: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Algorithm::default(), DEFAULT_SPEED_MS)
    }
}

impl PlaybackState {
    /// Stopped at the first frame of `algorithm`.
    pub fn new(algorithm: Algorithm, speed_ms: u64) -> Self {
        Self {
            algorithm,
            current_frame: 0,
            speed_ms: clamp_speed(speed_ms),
            is_playing: false,
        }
    }

    /// Auto-advance period at the current speed.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Apply `command`, keeping `current_frame` within the active trace.
    pub fn apply(&mut self, command: PlaybackCommand, library: &FrameLibrary) -> TimerDirective {
        let last = library.last_index(self.algorithm);

        match command {
            PlaybackCommand::SelectAlgorithm { algorithm } => {
                self.algorithm = algorithm;
                self.stop_at(0)
            }
            PlaybackCommand::Play => self.play(last),
            PlaybackCommand::Pause => {
                self.is_playing = false;
                TimerDirective::Cancel
            }
            PlaybackCommand::TogglePlay => {
                if self.is_playing {
                    self.is_playing = false;
                    TimerDirective::Cancel
                } else {
                    self.play(last)
                }
            }
            PlaybackCommand::Step { direction } => {
                match direction {
                    StepDirection::Forward if self.current_frame < last => self.current_frame += 1,
                    StepDirection::Backward if self.current_frame > 0 => self.current_frame -= 1,
                    _ => {}
                }
                self.current_frame = self.current_frame.min(last);
                TimerDirective::Keep
            }
            PlaybackCommand::Seek { frame } => {
                self.current_frame = frame.min(last);
                TimerDirective::Keep
            }
            PlaybackCommand::SetSpeed { speed_ms } => {
                // Takes effect on the next Play; a running task keeps its cadence.
                self.speed_ms = clamp_speed(speed_ms);
                TimerDirective::Keep
            }
            PlaybackCommand::Reset => self.stop_at(0),
            PlaybackCommand::Tick => self.tick(last),
        }
    }

    fn play(&mut self, last: usize) -> TimerDirective {
        if self.current_frame >= last {
            self.current_frame = 0;
        }
        if last == 0 {
            // A single frame has nothing to advance to.
            self.is_playing = false;
            return TimerDirective::Cancel;
        }
        self.is_playing = true;
        TimerDirective::Start(self.interval())
    }

    fn tick(&mut self, last: usize) -> TimerDirective {
        if !self.is_playing {
            return TimerDirective::Cancel;
        }
        if self.current_frame < last {
            self.current_frame += 1;
        }
        if self.current_frame >= last {
            self.current_frame = last;
            self.is_playing = false;
            return TimerDirective::Cancel;
        }
        TimerDirective::Keep
    }

    fn stop_at(&mut self, frame: usize) -> TimerDirective {
        self.current_frame = frame;
        self.is_playing = false;
        TimerDirective::Cancel
    }
}

/// Playback controller: the frame library plus the state that indexes it.
#[derive(Debug, Clone)]
pub struct Playback {
    library: FrameLibrary,
    state: PlaybackState,
}

impl Playback {
    /// Create a stopped controller over the traces of `input`.
    pub fn new(input: &[i32], algorithm: Algorithm, speed_ms: u64) -> Self {
        Self {
            library: FrameLibrary::new(input),
            state: PlaybackState::new(algorithm, speed_ms),
        }
    }

    /// Apply a command and report what to do with the auto-advance task.
    pub fn apply(&mut self, command: PlaybackCommand) -> TimerDirective {
        self.state.apply(command, &self.library)
    }

    /// Get the current playback state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Get the traces of every algorithm.
    pub fn library(&self) -> &FrameLibrary {
        &self.library
    }

    /// Get the selected algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.state.algorithm
    }

    /// The active trace.
    pub fn frames(&self) -> &FrameSequence {
        self.library.frames(self.state.algorithm)
    }

    /// Get the current frame number.
    pub fn current_frame(&self) -> usize {
        self.state.current_frame
    }

    /// Get the total number of frames in the active trace.
    pub fn total_frames(&self) -> usize {
        self.frames().len()
    }

    /// The frame being displayed.
    pub fn current(&self) -> &Frame {
        self.frames().get_clamped(self.state.current_frame)
    }

    /// Whether auto-advance is running.
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Whether a forward step would move.
    pub fn can_step_forward(&self) -> bool {
        self.state.current_frame < self.frames().last_index()
    }

    /// Whether a backward step would move.
    pub fn can_step_backward(&self) -> bool {
        self.state.current_frame > 0
    }

    /// Calculate progress as a fraction (0.0 - 1.0) of the way to the final frame.
    pub fn progress(&self) -> f64 {
        let last = self.frames().last_index();
        if last == 0 {
            1.0
        } else {
            self.state.current_frame as f64 / last as f64
        }
    }

    /// Build the status view for the frontend.
    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub algorithm: Algorithm,
    pub current_frame: usize,
    pub total_frames: usize,
    pub step_label: String,
    pub is_playing: bool,
    pub speed_ms: u64,
    pub can_step_forward: bool,
    pub can_step_backward: bool,
    pub progress: f64,
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        let total_frames = playback.total_frames();
        Self {
            algorithm: playback.algorithm(),
            current_frame: playback.current_frame(),
            total_frames,
            step_label: format!("Step: {}/{}", playback.current_frame() + 1, total_frames),
            is_playing: playback.is_playing(),
            speed_ms: playback.state.speed_ms,
            can_step_forward: playback.can_step_forward(),
            can_step_backward: playback.can_step_backward(),
            progress: playback.progress(),
        }
    }
}
