/// Single coordinate axis, used for the board side length and for positions.
pub type Coord = u8;

/// Count type used for mine, flag and cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains inside a `side`x`side` square.
fn apply_delta(coords: Coord2, delta: (i8, i8), side: Coord) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= side {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= side {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the up to 8 neighbors of a cell, skipping positions outside the board.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    side: Coord,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.side);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Iterates every position of the inclusive rectangle spanned by two corners, row by row.
#[derive(Debug, Clone)]
pub struct RectIter {
    min: Coord2,
    max: Coord2,
    next: Option<Coord2>,
}

impl RectIter {
    pub(crate) fn new(a: Coord2, b: Coord2) -> Self {
        let min = (a.0.min(b.0), a.1.min(b.1));
        let max = (a.0.max(b.0), a.1.max(b.1));
        Self {
            min,
            max,
            next: Some(min),
        }
    }
}

impl Iterator for RectIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let (x, y) = current;
        self.next = if x < self.max.0 {
            Some((x + 1, y))
        } else if y < self.max.1 {
            Some((self.min.0, y + 1))
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn center_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((2, 2), 5).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(2, 2)));
    }

    #[test]
    fn corners_and_edges_are_clipped() {
        assert_eq!(NeighborIter::new((0, 0), 4).count(), 3);
        assert_eq!(NeighborIter::new((3, 3), 4).count(), 3);
        assert_eq!(NeighborIter::new((0, 2), 4).count(), 5);
        assert_eq!(NeighborIter::new((0, 0), 1).count(), 0);
    }

    #[test]
    fn rect_is_inclusive_and_order_independent() {
        let forward: Vec<_> = RectIter::new((1, 1), (2, 3)).collect();
        let backward: Vec<_> = RectIter::new((2, 3), (1, 1)).collect();
        assert_eq!(forward.len(), 6);
        assert_eq!(forward, backward);
        assert_eq!(forward.first(), Some(&(1, 1)));
        assert_eq!(forward.last(), Some(&(2, 3)));
        assert_eq!(RectIter::new((4, 4), (4, 4)).count(), 1);
    }
}
