use std::sync::Arc;

use crate::error::{ConfigError, EngineError};
use crate::game::{Board, GameState, Player, Shape};

use super::agent::Agent;
use super::geometry::QuartetCatalog;
use super::negamax::{Negamax, SearchStats};

/// Engine settings, loadable from the `[engine]` TOML section.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rack id the engine plays as: 1 or 2.
    pub player: u8,
    /// Search depth in plies. Values below 1 are treated as 1.
    pub difficulty: i64,
    /// Search the root's successors on the rayon pool.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            player: 1,
            difficulty: 4,
            parallel: false,
        }
    }
}

/// Search depth for a difficulty level. Non-positive levels become one ply.
pub fn plies_for(difficulty: i64) -> usize {
    usize::try_from(difficulty.max(1)).unwrap_or(usize::MAX)
}

/// Fixed-depth negamax player.
///
/// The player keeps one quartet catalog, built for the board shape it was
/// constructed with (or for the first board it sees) and rebuilt only when a
/// board of a different shape arrives.
pub struct ComputerPlayer {
    player: Player,
    plies: usize,
    parallel: bool,
    catalog: Option<Arc<QuartetCatalog>>,
    last_stats: SearchStats,
}

impl ComputerPlayer {
    pub fn new(player: Player, difficulty: i64) -> Self {
        ComputerPlayer {
            player,
            plies: plies_for(difficulty),
            parallel: false,
            catalog: None,
            last_stats: SearchStats::default(),
        }
    }

    /// Build the player with its catalog computed up front.
    pub fn with_shape(player: Player, difficulty: i64, shape: Shape) -> Self {
        let mut computer = Self::new(player, difficulty);
        computer.catalog = Some(Arc::new(QuartetCatalog::build(shape)));
        computer
    }

    pub fn from_config(config: &EngineConfig, shape: Shape) -> Result<Self, ConfigError> {
        let player = Player::from_id(config.player).ok_or_else(|| {
            ConfigError::Validation(format!(
                "engine.player must be 1 or 2, got {}",
                config.player
            ))
        })?;
        Ok(Self::with_shape(player, config.difficulty, shape).parallel(config.parallel))
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn opponent(&self) -> Player {
        self.player.other()
    }

    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Node counts from the most recent [`ComputerPlayer::pick_move`].
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    fn catalog_for(&mut self, shape: Shape) -> Arc<QuartetCatalog> {
        match &self.catalog {
            Some(catalog) if catalog.shape() == shape => Arc::clone(catalog),
            _ => {
                log::debug!(
                    "building quartet catalog for {}x{} board",
                    shape.columns,
                    shape.rows
                );
                let catalog = Arc::new(QuartetCatalog::build(shape));
                self.catalog = Some(Arc::clone(&catalog));
                catalog
            }
        }
    }

    /// Choose the column to drop the next token into.
    ///
    /// The board must not be full and must not already hold four in a line;
    /// in either case the search has nothing to play and this returns
    /// [`EngineError::NoDifference`].
    pub fn pick_move(&mut self, board: &Board) -> Result<usize, EngineError> {
        let catalog = self.catalog_for(board.shape());
        let mut search = Negamax::new(&catalog);
        let (chosen, score) = if self.parallel {
            search.search_parallel(board.clone(), self.plies, self.player)
        } else {
            search.search(board.clone(), self.plies, self.player)
        };
        self.last_stats = search.stats();

        let column = board
            .first_differing_column(&chosen)
            .ok_or(EngineError::NoDifference)?;
        if !board.is_column_playable(column) {
            return Err(EngineError::InconsistentSearch { column });
        }

        log::debug!(
            "{} picks column {} (score {}, {} plies, {} nodes)",
            self.player.name(),
            column,
            score,
            self.plies,
            self.last_stats.nodes
        );
        Ok(column)
    }
}

impl Agent for ComputerPlayer {
    fn select_action(&mut self, state: &GameState) -> Result<usize, EngineError> {
        if state.current_player() != self.player {
            return Err(EngineError::WrongTurn {
                expected: self.player.name(),
                actual: state.current_player().name(),
            });
        }
        self.pick_move(state.board())
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::evaluation::{evaluate, Score};
    use crate::ai::RandomAgent;
    use crate::game::GameOutcome;

    fn board(rack: &[Vec<u8>]) -> Board {
        Board::from_columns(rack).unwrap()
    }

    #[test]
    fn difficulty_is_clamped_to_one_ply() {
        assert_eq!(ComputerPlayer::new(Player::One, 0).plies(), 1);
        assert_eq!(ComputerPlayer::new(Player::One, -7).plies(), 1);
        assert_eq!(ComputerPlayer::new(Player::One, 5).plies(), 5);
    }

    #[test]
    fn opponent_is_the_other_side() {
        let computer = ComputerPlayer::new(Player::Two, 3);
        assert_eq!(computer.player(), Player::Two);
        assert_eq!(computer.opponent(), Player::One);
    }

    #[test]
    fn empty_board_depth_one_plays_center() {
        let mut computer = ComputerPlayer::new(Player::One, 1);
        assert_eq!(computer.pick_move(&Board::default()), Ok(3));
    }

    #[test]
    fn takes_vertical_win_in_column_two() {
        let mut rack = vec![vec![0; 6]; 7];
        rack[2] = vec![1, 1, 1, 0, 0, 0];
        rack[5] = vec![2, 2, 0, 0, 0, 0];
        rack[6] = vec![2, 0, 0, 0, 0, 0];
        let board = board(&rack);
        for difficulty in 1..=4 {
            let mut computer = ComputerPlayer::new(Player::One, difficulty);
            assert_eq!(computer.pick_move(&board), Ok(2), "difficulty {difficulty}");
        }
    }

    #[test]
    fn never_picks_a_full_column() {
        let rack = vec![
            vec![1, 2, 1, 2, 1, 2],
            vec![2, 1, 2, 1, 2, 1],
            vec![1, 2, 1, 2, 1, 2],
            vec![0; 6],
            vec![2, 1, 2, 1, 2, 1],
            vec![1, 2, 1, 2, 1, 2],
            vec![2, 1, 2, 1, 2, 1],
        ];
        let board = board(&rack);
        for difficulty in 1..=3 {
            let mut computer = ComputerPlayer::new(Player::Two, difficulty);
            assert_eq!(computer.pick_move(&board), Ok(3));
        }
    }

    #[test]
    fn depth_one_equals_greedy_reference() {
        let rack = vec![
            vec![1, 2, 0, 0, 0, 0],
            vec![2, 0, 0, 0, 0, 0],
            vec![1, 1, 2, 0, 0, 0],
            vec![2, 1, 0, 0, 0, 0],
            vec![0; 6],
            vec![1, 2, 2, 0, 0, 0],
            vec![0; 6],
        ];
        let board = board(&rack);
        let catalog = QuartetCatalog::build(board.shape());

        for player in [Player::One, Player::Two] {
            let mut expected: Option<usize> = None;
            let mut best: Option<Score> = None;
            for col in 0..board.columns() {
                if let Ok((child, _)) = board.with_token(col, player) {
                    let score = evaluate(&child, &catalog, player);
                    if best.map_or(true, |b| score >= b) {
                        best = Some(score);
                        expected = Some(col);
                    }
                }
            }
            let mut computer = ComputerPlayer::new(player, 1);
            assert_eq!(computer.pick_move(&board).ok(), expected);
        }
    }

    #[test]
    fn full_board_is_reported() {
        let board = board(&[vec![1, 2], vec![2, 1], vec![1, 2], vec![2, 1]]);
        let mut computer = ComputerPlayer::new(Player::One, 2);
        assert_eq!(computer.pick_move(&board), Err(EngineError::NoDifference));
    }

    #[test]
    fn catalog_follows_board_shape() {
        let mut computer = ComputerPlayer::with_shape(Player::One, 1, Shape::standard());
        assert_eq!(computer.pick_move(&Board::default()), Ok(3));

        // 5x4: columns 1 and 3 tie for the most quartets, the later one wins
        let small = Board::new(Shape::new(5, 4));
        assert_eq!(computer.pick_move(&small), Ok(3));
        assert_eq!(computer.catalog.as_ref().map(|c| c.shape()), Some(Shape::new(5, 4)));
    }

    #[test]
    fn parallel_search_agrees() {
        let mut rack = vec![vec![0; 6]; 7];
        rack[3] = vec![1, 2, 1, 0, 0, 0];
        rack[4] = vec![2, 0, 0, 0, 0, 0];
        let board = board(&rack);
        for difficulty in 1..=4 {
            let mut seq = ComputerPlayer::new(Player::Two, difficulty);
            let mut par = ComputerPlayer::new(Player::Two, difficulty).parallel(true);
            assert_eq!(seq.pick_move(&board), par.pick_move(&board));
            assert_eq!(seq.last_stats(), par.last_stats());
        }
    }

    #[test]
    fn from_config_rejects_unknown_player() {
        let config = EngineConfig {
            player: 3,
            ..EngineConfig::default()
        };
        assert!(ComputerPlayer::from_config(&config, Shape::standard()).is_err());
    }

    #[test]
    fn refuses_to_move_out_of_turn() {
        let mut computer = ComputerPlayer::new(Player::Two, 2);
        let state = GameState::initial(Shape::standard());
        assert!(matches!(
            computer.select_action(&state),
            Err(EngineError::WrongTurn { .. })
        ));
    }

    #[test]
    fn self_play_completes() {
        let mut first = ComputerPlayer::new(Player::One, 3);
        let mut second = ComputerPlayer::new(Player::Two, 2);
        let mut state = GameState::initial(Shape::standard());

        while !state.is_terminal() {
            let action = match state.current_player() {
                Player::One => first.select_action(&state).unwrap(),
                Player::Two => second.select_action(&state).unwrap(),
            };
            assert!(state.legal_actions().contains(&action));
            state = state.apply_move(action).unwrap();
        }
        assert!(state.outcome().is_some());
    }

    #[test]
    fn beats_random_agent() {
        let games = 10;
        let mut wins = 0;
        for seed in 0..games {
            let mut computer = ComputerPlayer::new(Player::One, 3);
            let mut random = RandomAgent::seeded(seed);
            let mut state = GameState::initial(Shape::standard());
            while !state.is_terminal() {
                let action = match state.current_player() {
                    Player::One => computer.select_action(&state).unwrap(),
                    Player::Two => random.select_action(&state).unwrap(),
                };
                state = state.apply_move(action).unwrap();
            }
            if state.outcome() == Some(GameOutcome::Winner(Player::One)) {
                wins += 1;
            }
        }
        assert!(wins >= 8, "Negamax won only {wins}/{games} against random play");
    }

    #[test]
    fn name_is_negamax() {
        let computer = ComputerPlayer::new(Player::One, 1);
        assert_eq!(computer.name(), "Negamax");
    }
}
