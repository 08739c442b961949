//! Bubble sort trace.
//!
//! Each pass carries the largest remaining element to the end, so sorted
//! indices are placed from the back and prepended to the sorted set.

use crate::frame::{Frame, FrameSequence, Listing, Recorder};

/// Generate the bubble sort frames for `input`.
pub fn generate_steps(input: &[i32]) -> FrameSequence {
    let mut array = input.to_vec();
    let n = array.len();
    let mut sorted: Vec<usize> = Vec::with_capacity(n);

    let mut rec = Recorder::start(Frame::idle(
        &array,
        format!("Starting bubble sort with array {}", Listing(&array)),
        &sorted,
    ));

    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            rec.push(
                Frame::idle(
                    &array,
                    format!(
                        "Comparing elements at positions {} and {}: {} and {}",
                        j,
                        j + 1,
                        array[j],
                        array[j + 1]
                    ),
                    &sorted,
                )
                .comparing(&[j, j + 1]),
            );

            if array[j] > array[j + 1] {
                rec.push(
                    Frame::idle(
                        &array,
                        format!("{} > {}, swapping elements", array[j], array[j + 1]),
                        &sorted,
                    )
                    .comparing(&[j, j + 1])
                    .swapping(&[j, j + 1]),
                );

                array.swap(j, j + 1);

                rec.push(Frame::idle(
                    &array,
                    format!("Swapped elements, new array is {}", Listing(&array)),
                    &sorted,
                ));
            } else {
                rec.push(
                    Frame::idle(
                        &array,
                        format!("{} <= {}, no swap needed", array[j], array[j + 1]),
                        &sorted,
                    )
                    .comparing(&[j, j + 1]),
                );
            }
        }

        let placed = n - 1 - i;
        sorted.insert(0, placed);
        rec.push(Frame::idle(
            &array,
            format!("Element {} is now in its correct position", array[placed]),
            &sorted,
        ));
    }

    // The last remaining element is in place once every pass is done.
    if n > 0 {
        sorted.insert(0, 0);
    }
    rec.push(Frame::idle(
        &array,
        format!("Sorting complete! Final array: {}", Listing(&array)),
        &sorted,
    ));

    rec.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_first_and_last_frames() {
        let frames = generate_steps(&[5, 3, 8, 4, 2]);

        assert_eq!(frames.first().array, vec![5, 3, 8, 4, 2]);
        assert_eq!(
            frames.first().description,
            "Starting bubble sort with array [5, 3, 8, 4, 2]"
        );

        let last = frames.last();
        assert_eq!(last.array, vec![2, 3, 4, 5, 8]);
        assert_eq!(last.description, "Sorting complete! Final array: [2, 3, 4, 5, 8]");
        assert_eq!(last.sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn swap_is_narrated_in_three_frames() {
        let frames = generate_steps(&[2, 1]);
        let descriptions: Vec<_> = frames.iter().map(|f| f.description.as_str()).collect();

        assert_eq!(
            descriptions,
            vec![
                "Starting bubble sort with array [2, 1]",
                "Comparing elements at positions 0 and 1: 2 and 1",
                "2 > 1, swapping elements",
                "Swapped elements, new array is [1, 2]",
                "Element 2 is now in its correct position",
                "Sorting complete! Final array: [1, 2]",
            ]
        );

        assert_eq!(frames[2].comparing, Some(vec![0, 1]));
        assert_eq!(frames[2].swapping, Some(vec![0, 1]));
        assert_eq!(frames[2].array, vec![2, 1]);
        assert_eq!(frames[3].comparing, None);
        assert_eq!(frames[3].array, vec![1, 2]);
    }

    #[test]
    fn equal_values_never_swap() {
        let frames = generate_steps(&[4, 4]);

        assert!(frames.iter().all(|f| f.swapping.is_none()));
        assert_eq!(frames[2].description, "4 <= 4, no swap needed");
        assert_eq!(frames[2].comparing, Some(vec![0, 1]));
    }

    #[test]
    fn sorted_set_is_front_loaded() {
        let frames = generate_steps(&[3, 2, 1]);
        let placements: Vec<_> = frames
            .iter()
            .filter(|f| f.description.ends_with("correct position"))
            .map(|f| f.sorted.clone())
            .collect();

        assert_eq!(placements, vec![vec![2], vec![1, 2]]);
        assert_eq!(frames.last().sorted, vec![0, 1, 2]);
    }

    #[test]
    fn trivial_inputs() {
        let empty = generate_steps(&[]);
        assert_eq!(empty.len(), 2);
        assert!(empty.last().sorted.is_empty());

        let single = generate_steps(&[9]);
        assert_eq!(single.len(), 2);
        assert!(single.first().sorted.is_empty());
        assert_eq!(single.last().sorted, vec![0]);
    }
}
