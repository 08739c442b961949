//! Frames: one visualization instant of a sorting trace.

use std::fmt;
use std::ops::Index;

/// Highlight category of a single bar within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mark {
    /// Not involved in the current operation
    Idle,
    /// Part of the current comparison
    Comparing,
    /// Being exchanged or shifted
    Swapping,
    /// Finalized in its sorted position
    Sorted,
}

/// A full snapshot of the working array plus narration.
///
/// Frames never describe a diff: `array` always holds every element,
/// so a renderer can draw any frame without looking at its neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub array: Vec<i32>,
    pub description: String,
    pub comparing: Option<Vec<usize>>,
    pub swapping: Option<Vec<usize>>,
    pub sorted: Vec<usize>,
}

impl Frame {
    /// A frame with no comparing or swapping markers.
    pub fn idle(array: &[i32], description: impl Into<String>, sorted: &[usize]) -> Self {
        Self {
            array: array.to_vec(),
            description: description.into(),
            comparing: None,
            swapping: None,
            sorted: sorted.to_vec(),
        }
    }

    /// Attach a comparing marker.
    pub fn comparing(mut self, indices: &[usize]) -> Self {
        self.comparing = Some(indices.to_vec());
        self
    }

    /// Attach a swapping marker.
    pub fn swapping(mut self, indices: &[usize]) -> Self {
        self.swapping = Some(indices.to_vec());
        self
    }

    /// Resolve how the bar at `index` should be highlighted.
    ///
    /// Precedence is `Sorted > Swapping > Comparing > Idle`.
    pub fn mark(&self, index: usize) -> Mark {
        let contains = |set: &Option<Vec<usize>>| set.as_ref().is_some_and(|s| s.contains(&index));

        if self.sorted.contains(&index) {
            Mark::Sorted
        } else if contains(&self.swapping) {
            Mark::Swapping
        } else if contains(&self.comparing) {
            Mark::Comparing
        } else {
            Mark::Idle
        }
    }

    /// Marks for every bar, in array order.
    pub fn marks(&self) -> Vec<Mark> {
        (0..self.array.len()).map(|i| self.mark(i)).collect()
    }
}

/// An immutable, non-empty, fully materialized list of frames.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FrameSequence(Vec<Frame>);

impl FrameSequence {
    /// Number of frames (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: generators seed every sequence with an initial frame.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the final frame.
    pub fn last_index(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Frame at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.0.get(index)
    }

    /// Frame at `index`, clamped to the final frame.
    pub fn get_clamped(&self, index: usize) -> &Frame {
        &self.0[index.min(self.last_index())]
    }

    /// The initial frame, showing the unsorted input.
    pub fn first(&self) -> &Frame {
        &self.0[0]
    }

    /// The completion frame.
    pub fn last(&self) -> &Frame {
        &self.0[self.last_index()]
    }

    /// Iterate frames in playback order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.0.iter()
    }

    /// Borrow all frames as a slice.
    pub fn as_slice(&self) -> &[Frame] {
        &self.0
    }
}

impl Index<usize> for FrameSequence {
    type Output = Frame;

    fn index(&self, index: usize) -> &Frame {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Formats an array as `[a, b, c]` for narration.
pub(crate) struct Listing<'a>(pub &'a [i32]);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

/// Collects frames during generation.
///
/// Seeded with the initial frame, so the finished sequence is never empty.
pub(crate) struct Recorder {
    frames: Vec<Frame>,
}

impl Recorder {
    pub(crate) fn start(initial: Frame) -> Self {
        Self { frames: vec![initial] }
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn finish(self) -> FrameSequence {
        FrameSequence(self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_formats_like_narration() {
        assert_eq!(Listing(&[5, 3, 8]).to_string(), "[5, 3, 8]");
        assert_eq!(Listing(&[7]).to_string(), "[7]");
        assert_eq!(Listing(&[]).to_string(), "[]");
    }

    #[test]
    fn mark_precedence() {
        let frame = Frame::idle(&[1, 2, 3, 4], "test", &[3])
            .comparing(&[0, 1])
            .swapping(&[1, 3]);

        assert_eq!(frame.mark(0), Mark::Comparing);
        assert_eq!(frame.mark(1), Mark::Swapping);
        assert_eq!(frame.mark(2), Mark::Idle);
        assert_eq!(frame.mark(3), Mark::Sorted);
    }

    #[test]
    fn marks_cover_every_bar() {
        let frame = Frame::idle(&[4, 2], "two bars", &[]);
        assert_eq!(frame.marks(), vec![Mark::Idle, Mark::Idle]);
    }

    #[test]
    fn clamped_access_never_overruns() {
        let mut recorder = Recorder::start(Frame::idle(&[1], "a", &[]));
        recorder.push(Frame::idle(&[1], "b", &[0]));
        let seq = recorder.finish();

        assert_eq!(seq.last_index(), 1);
        assert_eq!(seq.get_clamped(99).description, "b");
        assert!(seq.get(2).is_none());
        assert_eq!(seq.first().description, "a");
        assert_eq!(seq.last().description, "b");
    }
}
