//! The algorithm variants and their descriptive metadata.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseAlgorithmError;
use crate::frame::FrameSequence;
use crate::{bubble, insertion, selection};

/// A sorting algorithm that can be traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Selection,
}

/// Display text for an algorithm's info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlgorithmInfo {
    pub algorithm: Algorithm,
    pub name: &'static str,
    pub summary: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

impl Algorithm {
    /// Every variant, in menu order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Bubble, Algorithm::Insertion, Algorithm::Selection];

    /// Generate the full frame trace of this algorithm over `input`.
    ///
    /// Deterministic: the same input always yields the same sequence.
    pub fn generate_steps(&self, input: &[i32]) -> FrameSequence {
        match self {
            Algorithm::Bubble => bubble::generate_steps(input),
            Algorithm::Insertion => insertion::generate_steps(input),
            Algorithm::Selection => selection::generate_steps(input),
        }
    }

    /// Position within [`Algorithm::ALL`].
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Algorithm::Bubble => 0,
            Algorithm::Insertion => 1,
            Algorithm::Selection => 2,
        }
    }

    /// Lowercase key used in config and on the wire.
    pub const fn key(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Selection => "selection",
        }
    }

    pub const fn info(&self) -> AlgorithmInfo {
        match self {
            Algorithm::Bubble => AlgorithmInfo {
                algorithm: Algorithm::Bubble,
                name: "Bubble Sort",
                summary: "Repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
                time_complexity: "O(n²)",
                space_complexity: "O(1)",
            },
            Algorithm::Insertion => AlgorithmInfo {
                algorithm: Algorithm::Insertion,
                name: "Insertion Sort",
                summary: "Builds the final sorted array one item at a time by taking each element and inserting it into its correct position.",
                time_complexity: "O(n²)",
                space_complexity: "O(1)",
            },
            Algorithm::Selection => AlgorithmInfo {
                algorithm: Algorithm::Selection,
                name: "Selection Sort",
                summary: "Repeatedly selects the smallest (or largest) element from the unsorted portion and moves it to the sorted portion.",
                time_complexity: "O(n²)",
                space_complexity: "O(1)",
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}
