use std::ops::AddAssign;

use rayon::prelude::*;

use crate::game::{Board, Player};

use super::evaluation::{evaluate, Score};
use super::geometry::QuartetCatalog;

/// Node counts for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Every board the search visited, root included.
    pub nodes: u64,
    /// Visited boards where the recursion stopped.
    pub leaves: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
    }
}

/// Exhaustive fixed-depth negamax. No pruning, no caching beyond the
/// read-only quartet catalog.
pub struct Negamax<'a> {
    catalog: &'a QuartetCatalog,
    stats: SearchStats,
}

impl<'a> Negamax<'a> {
    pub fn new(catalog: &'a QuartetCatalog) -> Self {
        Negamax {
            catalog,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search `depth` plies from `board` with `player` to move.
    ///
    /// Returns the chosen successor (or `board` itself at a leaf) and its
    /// score from `player`'s point of view. Among successors with equal
    /// scores the rightmost one wins.
    pub fn search(&mut self, board: Board, depth: usize, player: Player) -> (Board, Score) {
        self.stats.nodes += 1;

        let score = evaluate(&board, self.catalog, player);
        if depth == 0 || score.is_decisive() || !board.has_open_cell() {
            self.stats.leaves += 1;
            return (board, score);
        }

        let mut best: Option<(Board, Score)> = None;
        for child in board.successors(player) {
            let (_, reply) = self.search(child.clone(), depth - 1, player.other());
            best = keep_later_ties(best, child, -reply);
        }

        best.unwrap_or((board, score))
    }

    /// Same result as [`Negamax::search`], with the root's successors searched
    /// on the rayon pool. Scores are combined in column order afterwards, so
    /// ties break exactly as in the sequential search.
    pub fn search_parallel(&mut self, board: Board, depth: usize, player: Player) -> (Board, Score) {
        let score = evaluate(&board, self.catalog, player);
        if depth == 0 || score.is_decisive() || !board.has_open_cell() {
            return self.search(board, depth, player);
        }

        let catalog = self.catalog;
        let branches: Vec<(Board, Score, SearchStats)> = board
            .successors(player)
            .into_par_iter()
            .map(|child| {
                let mut worker = Negamax::new(catalog);
                let (_, reply) = worker.search(child.clone(), depth - 1, player.other());
                (child, -reply, worker.stats)
            })
            .collect();

        self.stats.nodes += 1;
        let mut best: Option<(Board, Score)> = None;
        for (child, candidate, stats) in branches {
            self.stats += stats;
            best = keep_later_ties(best, child, candidate);
        }

        best.unwrap_or((board, score))
    }
}

/// Replace the incumbent whenever the candidate is at least as good.
fn keep_later_ties(best: Option<(Board, Score)>, child: Board, candidate: Score) -> Option<(Board, Score)> {
    match best {
        Some((_, incumbent)) if candidate < incumbent => best,
        _ => Some((child, candidate)),
    }
}
