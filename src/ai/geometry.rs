//! Static line geometry: every set of four cells that could host a win.

use crate::game::Shape;

/// A board coordinate, column first. Row 0 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: usize,
    pub row: usize,
}

impl Coord {
    pub const fn new(col: usize, row: usize) -> Self {
        Coord { col, row }
    }
}

/// Four adjacent, co-linear cells.
pub type Quartet = [Coord; 4];

/// All quartets of one board shape, in a fixed order: horizontals,
/// verticals, rising diagonals, then falling diagonals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuartetCatalog {
    shape: Shape,
    quartets: Vec<Quartet>,
}

impl QuartetCatalog {
    pub fn build(shape: Shape) -> Self {
        let Shape { columns, rows } = shape;
        // Number of starting offsets for a run of four along one axis.
        let col_starts = (columns + 1).saturating_sub(4);
        let row_starts = (rows + 1).saturating_sub(4);
        let mut quartets = Vec::with_capacity(expected_len(shape));

        for i in 0..col_starts {
            for j in 0..rows {
                quartets.push(line(i, j, 1, 0));
            }
        }

        for i in 0..columns {
            for j in 0..row_starts {
                quartets.push(line(i, j, 0, 1));
            }
        }

        for i in 0..col_starts {
            for j in 0..row_starts {
                quartets.push(line(i, j, 1, 1));
            }
        }

        for i in 0..col_starts {
            for j in (3..rows).rev() {
                quartets.push(line(i, j, 1, -1));
            }
        }

        QuartetCatalog { shape, quartets }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn quartets(&self) -> &[Quartet] {
        &self.quartets
    }

    pub fn len(&self) -> usize {
        self.quartets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quartets.is_empty()
    }
}

/// Closed-form quartet count for a shape.
pub fn expected_len(shape: Shape) -> usize {
    let c = (shape.columns + 1).saturating_sub(4);
    let r = (shape.rows + 1).saturating_sub(4);
    c * shape.rows + shape.columns * r + 2 * c * r
}

fn line(col: usize, row: usize, dc: isize, dr: isize) -> Quartet {
    std::array::from_fn(|k| {
        let k = k as isize;
        Coord::new(
            (col as isize + dc * k) as usize,
            (row as isize + dr * k) as usize,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_unit_step(a: Coord, b: Coord) -> Option<(isize, isize)> {
        let dc = b.col as isize - a.col as isize;
        let dr = b.row as isize - a.row as isize;
        let step = (dc, dr);
        [(1, 0), (0, 1), (1, 1), (1, -1)]
            .contains(&step)
            .then_some(step)
    }

    #[test]
    fn standard_board_has_69_quartets() {
        let catalog = QuartetCatalog::build(Shape::standard());
        assert_eq!(catalog.len(), 69);
        assert_eq!(catalog.len(), expected_len(Shape::standard()));
    }

    #[test]
    fn count_matches_formula_for_many_shapes() {
        for columns in 4..=10 {
            for rows in 4..=10 {
                let shape = Shape::new(columns, rows);
                let catalog = QuartetCatalog::build(shape);
                let expected =
                    (columns - 3) * rows + columns * (rows - 3) + 2 * (columns - 3) * (rows - 3);
                assert_eq!(catalog.len(), expected, "shape {columns}x{rows}");
            }
        }
    }

    #[test]
    fn quartets_are_distinct_colinear_and_in_bounds() {
        let shape = Shape::new(8, 7);
        let catalog = QuartetCatalog::build(shape);
        let mut seen = HashSet::new();

        for quartet in catalog.quartets() {
            let cells: HashSet<_> = quartet.iter().copied().collect();
            assert_eq!(cells.len(), 4, "{quartet:?} repeats a cell");
            for coord in quartet {
                assert!(coord.col < shape.columns && coord.row < shape.rows);
            }

            let step = is_unit_step(quartet[0], quartet[1]).expect("adjacent cells");
            for pair in quartet.windows(2) {
                assert_eq!(is_unit_step(pair[0], pair[1]), Some(step));
            }

            let mut key = *quartet;
            key.sort();
            assert!(seen.insert(key), "{quartet:?} appears twice");
        }
    }

    #[test]
    fn families_come_in_fixed_order() {
        let catalog = QuartetCatalog::build(Shape::standard());
        let q = catalog.quartets();
        // 4 * 6 horizontals, then 7 * 3 verticals, then 4 * 3 of each diagonal
        assert_eq!(q[0], line(0, 0, 1, 0));
        assert_eq!(q[24], line(0, 0, 0, 1));
        assert_eq!(q[45], line(0, 0, 1, 1));
        assert_eq!(q[57], line(0, 5, 1, -1));
        assert_eq!(q[58], line(0, 4, 1, -1));
        assert_eq!(q[68], line(3, 3, 1, -1));
    }

    #[test]
    fn build_is_deterministic() {
        let shape = Shape::new(9, 5);
        assert_eq!(QuartetCatalog::build(shape), QuartetCatalog::build(shape));
    }

    #[test]
    fn narrow_shapes_drop_families() {
        let catalog = QuartetCatalog::build(Shape::new(3, 5));
        // only verticals: 3 columns * 2 starts
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.len(), expected_len(Shape::new(3, 5)));

        assert!(QuartetCatalog::build(Shape::new(3, 3)).is_empty());
    }
}
