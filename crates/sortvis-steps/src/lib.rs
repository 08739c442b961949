//! Sortvis Step Generation
//!
//! Instrumented bubble, insertion and selection sort. Each generator runs the
//! textbook algorithm over a copy of its input and records a [`Frame`] at every
//! comparison, swap, shift and placement.
//!
//! # Frames
//!
//! A frame is a full snapshot: the working array, a narration string, the
//! indices being compared or exchanged, and the indices already finalized.
//! Generators are pure and deterministic; their output is a fully
//! materialized, immutable [`FrameSequence`].
//!
//! # Usage
//!
//! ```
//! use sortvis_steps::{Algorithm, DEFAULT_INPUT};
//!
//! let frames = Algorithm::Selection.generate_steps(&DEFAULT_INPUT);
//! assert_eq!(frames.first().array, DEFAULT_INPUT);
//! assert_eq!(frames.last().array, vec![2, 3, 4, 5, 8]);
//! ```

mod algorithm;
mod error;
mod frame;

pub mod bubble;
pub mod insertion;
pub mod selection;

pub use algorithm::{Algorithm, AlgorithmInfo};
pub use error::ParseAlgorithmError;
pub use frame::{Frame, FrameSequence, Mark};

/// The fixed sequence every visualization starts from.
pub const DEFAULT_INPUT: [i32; 5] = [5, 3, 8, 4, 2];
