//! Selection sort trace.
//!
//! Each outer step scans the unsorted suffix for its minimum and moves it to
//! the front of that suffix, so sorted indices are appended from the front.

use crate::frame::{Frame, FrameSequence, Listing, Recorder};

/// Generate the selection sort frames for `input`.
pub fn generate_steps(input: &[i32]) -> FrameSequence {
    let mut array = input.to_vec();
    let n = array.len();
    let mut sorted: Vec<usize> = Vec::with_capacity(n);

    let mut rec = Recorder::start(Frame::idle(
        &array,
        format!("Starting selection sort with array {}", Listing(&array)),
        &sorted,
    ));

    for i in 0..n.saturating_sub(1) {
        let mut min_index = i;

        rec.push(
            Frame::idle(
                &array,
                format!(
                    "Looking for the minimum element in the unsorted portion starting at index {}",
                    i
                ),
                &sorted,
            )
            .comparing(&[i]),
        );

        for j in i + 1..n {
            rec.push(
                Frame::idle(
                    &array,
                    format!(
                        "Comparing current minimum {} with {}",
                        array[min_index], array[j]
                    ),
                    &sorted,
                )
                .comparing(&[min_index, j]),
            );

            if array[j] < array[min_index] {
                rec.push(
                    Frame::idle(
                        &array,
                        format!(
                            "{} < {}, updating minimum to {} at position {}",
                            array[j], array[min_index], array[j], j
                        ),
                        &sorted,
                    )
                    .comparing(&[j, min_index]),
                );
                min_index = j;
            } else {
                rec.push(
                    Frame::idle(
                        &array,
                        format!(
                            "{} >= {}, minimum remains at position {}",
                            array[j], array[min_index], min_index
                        ),
                        &sorted,
                    )
                    .comparing(&[min_index, j]),
                );
            }
        }

        if min_index != i {
            rec.push(
                Frame::idle(
                    &array,
                    format!(
                        "Swapping minimum element {} with element at position {} ({})",
                        array[min_index], i, array[i]
                    ),
                    &sorted,
                )
                .swapping(&[i, min_index]),
            );
            array.swap(i, min_index);
        } else {
            rec.push(Frame::idle(
                &array,
                format!("Element {} is already in its correct position", array[i]),
                &sorted,
            ));
        }

        sorted.push(i);
        rec.push(Frame::idle(
            &array,
            format!("Element {} is now in its correct position", array[i]),
            &sorted,
        ));
    }

    if n > 0 {
        sorted.push(n - 1);
    }
    rec.push(Frame::idle(
        &array,
        format!("Sorting complete! Final array: {}", Listing(&array)),
        &sorted,
    ));

    rec.finish()
}
