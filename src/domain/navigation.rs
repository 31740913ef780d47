//! Keyboard navigation over the frame grid.
//!
//! Pure searches over the frame list treated as a row-major grid:
//! - Directional search skips processed frames and stops at the grid edge
//! - Sequential search walks array order and wraps around

use crate::frame::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}

/// Finds the nearest unprocessed frame from `current` in `direction`.
///
/// # Arguments
/// * `frames` - Frames in grid order
/// * `current` - Index of the focused frame
/// * `columns` - Frames per row
/// * `direction` - Search direction
///
/// # Returns
/// Index of the target frame, or `None` when the edge is reached first
pub fn find_in_direction(frames: &[Frame], current: usize, columns: usize, direction: Direction) -> Option<usize> {
    if frames.is_empty() || columns == 0 || current >= frames.len() {
        return None;
    }
    let max_row = ((frames.len() - 1) / columns) as isize;
    let (d_row, d_col) = direction.step();
    let mut row = (current / columns) as isize + d_row;
    let mut col = (current % columns) as isize + d_col;

    while row >= 0 && row <= max_row && col >= 0 && col < columns as isize {
        let index = row as usize * columns + col as usize;
        if frames.get(index).is_some_and(Frame::is_unprocessed) {
            return Some(index);
        }
        row += d_row;
        col += d_col;
    }
    None
}

/// Next unprocessed frame after `current` in array order, wrapping to the start.
///
/// With no current frame the search starts at the first frame. The current
/// frame itself is returned when it is the only unprocessed one.
pub fn next_unprocessed(frames: &[Frame], current: Option<usize>) -> Option<usize> {
    let start = current.map_or(0, |i| i + 1).min(frames.len());
    (start..frames.len())
        .chain(0..start)
        .find(|&i| frames[i].is_unprocessed())
}

/// Previous unprocessed frame before `current` in array order, wrapping to the end.
pub fn previous_unprocessed(frames: &[Frame], current: Option<usize>) -> Option<usize> {
    let len = frames.len();
    let before = match current {
        Some(i) => i.min(len),
        None => len,
    };
    (0..before)
        .rev()
        .chain((before..len).rev())
        .find(|&i| frames[i].is_unprocessed())
}
