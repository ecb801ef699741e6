//! Shape of a 4-D `(time, x, y, depth)` dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Extents of a 4-D atmosphere dataset. Depth is the fastest-varying axis,
/// so a single `(time, x, y)` column is contiguous in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape4 {
    pub time: usize,
    pub x: usize,
    pub y: usize,
    pub depth: usize,
}

impl Shape4 {
    pub fn new(time: usize, x: usize, y: usize, depth: usize) -> Self {
        Self { time, x, y, depth }
    }

    /// Build from a list of dimension lengths. Returns None unless exactly four.
    pub fn from_dims(dims: &[usize]) -> Option<Self> {
        match *dims {
            [time, x, y, depth] => Some(Self::new(time, x, y, depth)),
            _ => None,
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.time * self.x * self.y * self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat offset of the first sample of the `(t, x, y)` column.
    pub fn column_start(&self, t: usize, x: usize, y: usize) -> usize {
        ((t * self.x + x) * self.y + y) * self.depth
    }

    /// Flat offset of a single sample.
    pub fn offset(&self, t: usize, x: usize, y: usize, z: usize) -> usize {
        self.column_start(t, x, y) + z
    }

    pub fn as_array(&self) -> [usize; 4] {
        [self.time, self.x, self.y, self.depth]
    }
}

impl fmt::Display for Shape4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.time, self.x, self.y, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dims() {
        assert_eq!(Shape4::from_dims(&[2, 1, 1, 5]), Some(Shape4::new(2, 1, 1, 5)));
        assert_eq!(Shape4::from_dims(&[2, 5]), None);
    }

    #[test]
    fn test_offsets_are_row_major() {
        let shape = Shape4::new(3, 2, 2, 4);
        assert_eq!(shape.len(), 48);
        assert_eq!(shape.column_start(0, 0, 0), 0);
        assert_eq!(shape.column_start(0, 0, 1), 4);
        assert_eq!(shape.column_start(0, 1, 0), 8);
        assert_eq!(shape.column_start(1, 0, 0), 16);
        assert_eq!(shape.offset(2, 1, 1, 3), 47);
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape4::new(1, 1, 1, 82).to_string(), "(1, 1, 1, 82)");
    }
}
