use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use connect4_bot::ai::{Agent, ComputerPlayer, RandomAgent};
use connect4_bot::config::AppConfig;
use connect4_bot::game::{Board, GameOutcome, GameState, Player};

/// Fixed-depth negamax Connect Four bot.
#[derive(Parser)]
#[command(name = "connect4-bot", about = "Pick Connect Four moves with a fixed-depth negamax search")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "connect4.toml")]
    config: PathBuf,

    /// Override the engine's player id (1 or 2)
    #[arg(long, global = true)]
    player: Option<u8>,

    /// Override search depth in plies (values below 1 play at 1)
    #[arg(long, global = true, allow_negative_numbers = true)]
    difficulty: Option<i64>,

    /// Search the root's successors in parallel
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the column to play for a rack given as column-major JSON
    Move {
        /// Rack such as [[1,2,0,0,0,0],[0,0,0,0,0,0],...]; read from stdin when omitted
        #[arg(long)]
        rack: Option<String>,
    },
    /// Play a full game against another engine or a random opponent
    Play {
        /// Opponent search depth (defaults to the engine's)
        #[arg(long, allow_negative_numbers = true)]
        opponent_difficulty: Option<i64>,

        /// Let the opponent move uniformly at random
        #[arg(long)]
        random_opponent: bool,

        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Config => {
            print!("{}", AppConfig::default_toml().context("serializing default config")?);
            Ok(())
        }
        Command::Move { ref rack } => {
            let config = load_config(&cli)?;
            run_move(&config, rack.clone())
        }
        Command::Play {
            opponent_difficulty,
            random_opponent,
            seed,
        } => {
            let config = load_config(&cli)?;
            run_play(&config, opponent_difficulty, random_opponent, seed)
        }
    }
}

/// Load the TOML config and apply command-line overrides on top.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(player) = cli.player {
        app_config.engine.player = player;
    }
    if let Some(difficulty) = cli.difficulty {
        app_config.engine.difficulty = difficulty;
    }
    if cli.parallel {
        app_config.engine.parallel = true;
    }
    app_config.validate().context("validating configuration")?;
    Ok(app_config)
}

fn run_move(config: &AppConfig, rack: Option<String>) -> Result<()> {
    let json = match rack {
        Some(json) => json,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading rack from stdin")?;
            buf
        }
    };
    let columns: Vec<Vec<u8>> = serde_json::from_str(&json).context("parsing rack JSON")?;
    let board = Board::from_columns(&columns).context("invalid rack")?;
    if !board.has_open_cell() {
        bail!("the rack is full, there is no move to make");
    }

    let mut engine = ComputerPlayer::from_config(&config.engine, board.shape())?;
    let column = engine.pick_move(&board)?;
    println!("{column}");
    Ok(())
}

fn run_play(
    config: &AppConfig,
    opponent_difficulty: Option<i64>,
    random_opponent: bool,
    seed: Option<u64>,
) -> Result<()> {
    let shape = config.board.shape();
    let engine = ComputerPlayer::from_config(&config.engine, shape)?;
    let opponent_side = engine.opponent();

    let opponent: Box<dyn Agent> = if random_opponent {
        Box::new(seed.map_or_else(RandomAgent::new, RandomAgent::seeded))
    } else {
        let difficulty = opponent_difficulty.unwrap_or(config.engine.difficulty);
        Box::new(
            ComputerPlayer::with_shape(opponent_side, difficulty, shape)
                .parallel(config.engine.parallel),
        )
    };

    let engine_side = engine.player();
    let engine: Box<dyn Agent> = Box::new(engine);
    let (mut first, mut second) = match engine_side {
        Player::One => (engine, opponent),
        Player::Two => (opponent, engine),
    };
    println!(
        "{} ({}) vs {} ({})",
        Player::One.name(),
        first.name(),
        Player::Two.name(),
        second.name()
    );

    let mut state = GameState::initial(shape);
    while !state.is_terminal() {
        let mover = state.current_player();
        let agent = match mover {
            Player::One => &mut first,
            Player::Two => &mut second,
        };
        let column = agent
            .select_action(&state)
            .with_context(|| format!("{} failed to move", mover.name()))?;
        state = state
            .apply_move(column)
            .with_context(|| format!("{} chose column {column}", mover.name()))?;
        println!("{} plays column {column}\n{}\n", mover.name(), state.board());
    }

    match state.outcome() {
        Some(GameOutcome::Winner(player)) => println!("{} wins", player.name()),
        Some(GameOutcome::Draw) => println!("Draw"),
        None => bail!("game should be terminal but has no outcome"),
    }
    Ok(())
}
