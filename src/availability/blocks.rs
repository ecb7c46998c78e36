use std::collections::BTreeSet;

use crate::availability::hour::Hour;

/// A run of booked hours that are adjacent in the visible grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Block {
    /// First booked hour of the run.
    pub anchor: Hour,
    /// Last booked hour of the run.
    pub last: Hour,
    /// Index of `anchor` in the candidate list.
    pub position: usize,
    /// Number of grid rows the run covers.
    pub len: usize,
}

impl Block {
    /// Distance from the top of the grid, in units of `slot_height`.
    pub fn offset(&self, slot_height: f32) -> f32 {
        self.position as f32 * slot_height
    }

    pub fn extent(&self, slot_height: f32) -> f32 {
        self.len as f32 * slot_height
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.position..self.position + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Where the run ends, as shown in a block caption.
    pub fn end(&self) -> String {
        self.last.end_label()
    }
}

/// Groups booked hours into blocks over an ordered grid of candidate hours.
///
/// Runs follow adjacency in `candidates`, not in hour value, so a grid with
/// gaps may join hours that are not consecutive on the clock.
pub fn blocks(candidates: &[Hour], booked: &BTreeSet<Hour>) -> Vec<Block> {
    let mut found = Vec::new();
    let mut index = 0;
    while index < candidates.len() {
        let hour = candidates[index];
        if !booked.contains(&hour) {
            index += 1;
            continue;
        }

        let start = index;
        let mut end = index;
        while end + 1 < candidates.len() && booked.contains(&candidates[end + 1]) {
            end += 1;
        }
        found.push(Block {
            anchor: hour,
            last: candidates[end],
            position: start,
            len: end - start + 1,
        });
        index = end + 1;
    }
    found
}
