use std::fmt;
use std::ops::Neg;

use crate::game::{Board, Player};

use super::geometry::QuartetCatalog;

/// Heuristic value of a position for one side.
///
/// `Loss` and `Win` stand for negative and positive infinity: a completed
/// line for the opponent or for the side being scored. The derived ordering
/// is `Loss < Value(_) < Win`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    Loss,
    Value(i64),
    Win,
}

impl Score {
    pub fn is_decisive(self) -> bool {
        matches!(self, Score::Win | Score::Loss)
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Loss => Score::Win,
            Score::Value(v) => Score::Value(-v),
            Score::Win => Score::Loss,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => f.write_str("-inf"),
            Score::Value(v) => write!(f, "{v}"),
            Score::Win => f.write_str("+inf"),
        }
    }
}

/// Weight of an uncontested quartet holding 1, 2 or 3 tokens of one side.
const PARTIAL_LINE_WEIGHTS: [i64; 4] = [0, 1, 10, 100];

/// Score `board` from `player`'s point of view.
///
/// Quartets holding tokens of both sides, or of neither, are worth nothing.
/// The first quartet filled by a single side ends the scan with `Win` or
/// `Loss`.
pub fn evaluate(board: &Board, catalog: &QuartetCatalog, player: Player) -> Score {
    debug_assert_eq!(board.shape(), catalog.shape());
    let own_cell = player.to_cell();
    let opp_cell = player.other().to_cell();
    let mut total = 0i64;

    for quartet in catalog.quartets() {
        let mut own = 0;
        let mut opp = 0;
        for coord in quartet {
            match board.get(coord.col, coord.row) {
                c if c == own_cell => own += 1,
                c if c == opp_cell => opp += 1,
                _ => {}
            }
        }

        match (own, opp) {
            (4, _) => return Score::Win,
            (_, 4) => return Score::Loss,
            (n, 0) => total += PARTIAL_LINE_WEIGHTS[n],
            (0, n) => total -= PARTIAL_LINE_WEIGHTS[n],
            _ => {}
        }
    }

    Score::Value(total)
}
