//! Sortvis Playback and Server
//!
//! Step-by-step playback of sorting traces, served to a browser.
//!
//! # Architecture
//!
//! - **Playback**: Pure reducer over an explicit, serializable state
//! - **Timer**: Owns the single auto-advance task
//! - **Controller**: Applies commands and timer changes atomically, broadcasts updates
//! - **Server**: REST commands, read-only views and a WebSocket stream
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! VisServer::new(config).serve().await?;
//! ```

mod config;
mod controller;
mod error;
mod playback;
mod server;
mod timer;

pub use config::VisConfig;
pub use controller::{Controller, PlaybackUpdate};
pub use error::{Error, Result};
pub use playback::{
    clamp_speed, FrameLibrary, Playback, PlaybackCommand, PlaybackState, PlaybackStatus,
    StepDirection, TimerDirective, DEFAULT_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS,
};
pub use server::VisServer;
pub use timer::AutoAdvance;

#[cfg(test)]
mod tests {
    use super::*;
    use sortvis_steps::{Algorithm, DEFAULT_INPUT};

    #[test]
    fn library_holds_every_trace() {
        let library = FrameLibrary::new(&DEFAULT_INPUT);
        assert_eq!(library.input(), &DEFAULT_INPUT);

        for alg in Algorithm::ALL {
            let frames = library.frames(alg);
            assert_eq!(frames, &alg.generate_steps(&DEFAULT_INPUT));
            assert_eq!(library.last_index(alg), frames.len() - 1);
        }
    }

    #[test]
    fn full_walkthrough_reaches_sorted_frame() {
        let mut playback = Playback::new(&DEFAULT_INPUT, Algorithm::Insertion, DEFAULT_SPEED_MS);
        let forward = PlaybackCommand::Step { direction: StepDirection::Forward };

        while playback.can_step_forward() {
            playback.apply(forward);
        }

        let frame = playback.current();
        assert_eq!(frame.array, vec![2, 3, 4, 5, 8]);
        assert_eq!(frame.sorted, vec![0, 1, 2, 3, 4]);
        assert_eq!(playback.status().step_label, format!("Step: {0}/{0}", playback.total_frames()));
    }
}
