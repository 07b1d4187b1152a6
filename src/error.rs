use std::path::PathBuf;

/// Errors raised when building or modifying a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("rack has no columns")]
    NoColumns,

    #[error("rack has no rows")]
    NoRows,

    #[error("column {column} has {found} rows, expected {expected}")]
    Ragged {
        column: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell value {value} at column {column}, row {row}")]
    InvalidCell { column: usize, row: usize, value: u8 },

    #[error("floating token at column {column}, row {row}")]
    FloatingToken { column: usize, row: usize },

    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors raised when applying a move to a game in progress.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors raised by move selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("search returned a board identical to the input (is the board full?)")]
    NoDifference,

    #[error("search chose column {column}, which is not playable")]
    InconsistentSearch { column: usize },

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("engine plays {expected}, but it is {actual}'s turn")]
    WrongTurn {
        expected: &'static str,
        actual: &'static str,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
