use std::sync::{Arc, OnceLock};

/// Number of checkers in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// The board indices (`row * cols + col`) of one straight run of cells.
pub type Line = [usize; WIN_LENGTH];

/// Enumerates every straight run of `N` cells on a `rows` x `cols` board.
///
/// The order is fixed: ascending diagonals, descending diagonals, horizontal
/// runs, vertical runs. Overlapping runs are all kept, since the same cells
/// can belong to runs in several directions.
///
/// ```
/// use connect4::all_lines;
/// assert_eq!(all_lines::<4>(6, 7).len(), 69);
/// assert_eq!(all_lines::<4>(6, 7)[0], [0, 8, 16, 24]);
/// ```
pub fn all_lines<const N: usize>(rows: usize, cols: usize) -> Vec<[usize; N]> {
    if N == 0 || rows < N || cols < N {
        return Vec::new();
    }
    let mut lines = Vec::new();
    // Ascending diagonals
    for r in 0..=rows - N {
        for c in 0..=cols - N {
            lines.push(std::array::from_fn(|i| (r + i) * cols + c + i));
        }
    }
    // Descending diagonals, starting in any row with N - 1 rows below it
    for r in N - 1..rows {
        for c in 0..=cols - N {
            lines.push(std::array::from_fn(|i| (r - i) * cols + c + i));
        }
    }
    // Horizontal
    for c in 0..=cols - N {
        for r in 0..rows {
            lines.push(std::array::from_fn(|i| r * cols + c + i));
        }
    }
    // Vertical
    for c in 0..cols {
        for r in 0..=rows - N {
            lines.push(std::array::from_fn(|i| (r + i) * cols + c));
        }
    }
    lines
}

/// The dimensions of a board together with its precomputed lines.
///
/// This never changes after construction and is shared between all boards
/// of the same size, so that neither evaluation nor the terminal check has
/// to recompute the lines.
#[derive(Debug, PartialEq, Eq)]
pub struct Geometry {
    rows: usize,
    cols: usize,
    lines: Vec<Line>,
}

impl Geometry {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            lines: all_lines(rows, cols),
        }
    }

    /// The shared geometry of the standard 6 x 7 board.
    pub fn standard() -> Arc<Geometry> {
        static STANDARD: OnceLock<Arc<Geometry>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Arc::new(Geometry::new(crate::ROWS, crate::COLS)))
            .clone()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_cells(&self) -> usize {
        self.rows * self.cols
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::*;

    #[test]
    fn standard_board_has_69_lines() {
        let lines = all_lines::<4>(6, 7);
        assert_eq!(lines.len(), 69);

        let is_horizontal = |l: &Line| l.windows(2).all(|w| w[1] == w[0] + 1);
        let is_vertical = |l: &Line| l.windows(2).all(|w| w[1] == w[0] + 7);
        assert_eq!(lines.iter().filter(|l| is_horizontal(l)).count(), 24);
        assert_eq!(lines.iter().filter(|l| is_vertical(l)).count(), 21);
        assert_eq!(
            lines
                .iter()
                .filter(|l| !is_horizontal(l) && !is_vertical(l))
                .count(),
            24
        );
    }

    #[test]
    fn enumeration_order() {
        let lines = all_lines::<4>(6, 7);
        // First ascending diagonal, first descending diagonal
        assert_eq!(lines[0], [0, 8, 16, 24]);
        assert_eq!(lines[12], [21, 15, 9, 3]);
        // First horizontal run, first vertical run
        assert_eq!(lines[24], [0, 1, 2, 3]);
        assert_eq!(lines[48], [0, 7, 14, 21]);
        assert_eq!(lines[68], [20, 27, 34, 41]);
    }

    #[test]
    fn no_duplicate_lines() {
        let lines = all_lines::<4>(6, 7);
        let distinct: BTreeSet<Line> = lines.iter().copied().collect();
        assert_eq!(distinct.len(), lines.len());
    }

    #[test]
    fn boards_smaller_than_a_line() {
        assert!(all_lines::<4>(3, 7).is_empty());
        assert!(all_lines::<4>(6, 2).is_empty());
        assert_eq!(all_lines::<4>(4, 4).len(), 10);
    }

    #[test]
    fn boards_of_other_heights() {
        assert_eq!(all_lines::<4>(7, 7).len(), 88);
        assert_eq!(all_lines::<4>(5, 7).len(), 50);
        let lines = all_lines::<4>(7, 7);
        // Descending diagonals start at row 3 on every board height
        assert_eq!(lines[16], [21, 15, 9, 3]);
        assert!(lines.contains(&[42, 36, 30, 24]));
    }

    #[test]
    fn standard_geometry_is_shared() {
        let a = Geometry::standard();
        let b = Geometry::standard();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, Geometry::new(6, 7));
    }

    quickcheck! {
        fn enumeration_is_idempotent(rows: u8, cols: u8) -> bool {
            let rows = usize::from(rows % 10);
            let cols = usize::from(cols % 10);
            all_lines::<4>(rows, cols) == all_lines::<4>(rows, cols)
        }

        fn every_run_is_counted_once(rows: u8, cols: u8) -> bool {
            let rows = usize::from(rows % 10);
            let cols = usize::from(cols % 10);
            let lines = all_lines::<4>(rows, cols);
            let distinct: BTreeSet<Line> = lines.iter().copied().collect();
            let expected = if rows < 4 || cols < 4 {
                0
            } else {
                rows * (cols - 3) + cols * (rows - 3) + 2 * (rows - 3) * (cols - 3)
            };
            lines.len() == expected && distinct.len() == expected
        }

        fn lines_are_in_bounds_and_straight(rows: u8, cols: u8) -> bool {
            let rows = usize::from(rows % 10);
            let cols = usize::from(cols % 10);
            all_lines::<4>(rows, cols).iter().all(|line| {
                let coords: Vec<(isize, isize)> = line
                    .iter()
                    .map(|&idx| ((idx / cols) as isize, (idx % cols) as isize))
                    .collect();
                let step = (coords[1].0 - coords[0].0, coords[1].1 - coords[0].1);
                line.iter().all(|&idx| idx < rows * cols)
                    && step != (0, 0)
                    && coords
                        .windows(2)
                        .all(|w| (w[1].0 - w[0].0, w[1].1 - w[0].1) == step)
            })
        }
    }
}
