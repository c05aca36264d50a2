//! Line rasterizer - Bresenham paths between grid cells.
//!
//! Fast pointer motion can skip cells between two move events; the edit
//! engine walks the path between the previous and the new cursor so strokes
//! stay gap-free.

use crate::types::Coord;

/// Iterator over the 8-connected cells from `from` to `to`, both inclusive.
#[derive(Debug, Clone)]
pub struct LineCells {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

/// Rasterize the path between two cells (x = column, y = row)
///
/// ```
/// use tetris_editor_core::line::line;
/// use tetris_editor_core::types::Coord;
///
/// let cells: Vec<_> = line(Coord::new(0, 0), Coord::new(1, 3)).collect();
/// assert_eq!(cells.first(), Some(&Coord::new(0, 0)));
/// assert_eq!(cells.last(), Some(&Coord::new(1, 3)));
/// assert_eq!(cells.len(), 4);
/// ```
pub fn line(from: Coord, to: Coord) -> LineCells {
    let (x0, y0) = (from.col as i32, from.row as i32);
    let (x1, y1) = (to.col as i32, to.row as i32);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    LineCells {
        x: x0,
        y: y0,
        x1,
        y1,
        dx,
        dy,
        sx: if x0 < x1 { 1 } else { -1 },
        sy: if y0 < y1 { 1 } else { -1 },
        err: dx - dy,
        done: false,
    }
}

impl Iterator for LineCells {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.done {
            return None;
        }
        // Every emitted point lies between the two i8 endpoints.
        let current = Coord::new(self.y as i8, self.x as i8);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let rest = (self.x1 - self.x).abs().max((self.y1 - self.y).abs()) as usize + 1;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for LineCells {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(from: (i8, i8), to: (i8, i8)) -> Vec<(i8, i8)> {
        line(Coord::new(from.0, from.1), Coord::new(to.0, to.1))
            .map(|c| (c.row, c.col))
            .collect()
    }

    #[test]
    fn single_point() {
        assert_eq!(collect((4, 4), (4, 4)), vec![(4, 4)]);
    }

    #[test]
    fn runs_backwards_from_start_to_end() {
        assert_eq!(
            collect((5, 2), (5, -1)),
            vec![(5, 2), (5, 1), (5, 0), (5, -1)]
        );
    }

    #[test]
    fn steep_line_has_no_gaps() {
        let cells = collect((0, 0), (7, 2));
        assert_eq!(cells.len(), 8);
        for pair in cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
        }
    }

    #[test]
    fn size_hint_is_exact() {
        let mut it = line(Coord::new(0, 0), Coord::new(3, 9));
        assert_eq!(it.len(), 10);
        it.next();
        assert_eq!(it.len(), 9);
        assert_eq!(it.count(), 9);
    }
}
