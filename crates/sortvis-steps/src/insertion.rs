//! Insertion sort trace.
//!
//! The sorted prefix grows by one element per outer step; elements larger
//! than the one being inserted are shifted right until its slot is found.

use crate::frame::{Frame, FrameSequence, Listing, Recorder};

/// Indices `0..len` as a sorted set.
fn prefix(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// Generate the insertion sort frames for `input`.
pub fn generate_steps(input: &[i32]) -> FrameSequence {
    let mut array = input.to_vec();
    let n = array.len();

    // A single-element prefix is trivially sorted.
    let mut rec = Recorder::start(Frame::idle(
        &array,
        format!("Starting insertion sort with array {}", Listing(&array)),
        &prefix(n.min(1)),
    ));

    for i in 1..n {
        let current = array[i];
        let sorted = prefix(i);

        rec.push(
            Frame::idle(
                &array,
                format!(
                    "Taking element {} at position {} to insert into the sorted portion",
                    current, i
                ),
                &sorted,
            )
            .comparing(&[i]),
        );

        // `hole` is the slot `current` will land in; `hole - 1` is compared next.
        let mut hole = i;
        while hole > 0 && array[hole - 1] > current {
            let j = hole - 1;

            rec.push(
                Frame::idle(
                    &array,
                    format!("Comparing {} with {} at position {}", current, array[j], j),
                    &sorted,
                )
                .comparing(&[i, j]),
            );

            rec.push(
                Frame::idle(
                    &array,
                    format!(
                        "{} > {}, shifting {} to the right",
                        array[j], current, array[j]
                    ),
                    &sorted,
                )
                .comparing(&[i, j])
                .swapping(&[j, j + 1]),
            );

            array[j + 1] = array[j];
            hole = j;

            rec.push(
                Frame::idle(&array, "Shifted element, continuing comparison", &sorted)
                    .comparing(&[i]),
            );
        }

        array[hole] = current;

        rec.push(Frame::idle(
            &array,
            format!("Inserted {} at position {}", current, hole),
            &prefix(i + 1),
        ));
    }

    rec.push(Frame::idle(
        &array,
        format!("Sorting complete! Final array: {}", Listing(&array)),
        &prefix(n),
    ));

    rec.finish()
}
