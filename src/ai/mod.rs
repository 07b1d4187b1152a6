//! Move selection: quartet geometry, the position evaluator, fixed-depth
//! negamax, and the agents built on top of them.

mod agent;
mod computer;
pub mod evaluation;
pub mod geometry;
pub mod negamax;
mod random;

pub use agent::Agent;
pub use computer::{plies_for, ComputerPlayer, EngineConfig};
pub use evaluation::{evaluate, Score};
pub use geometry::{Coord, Quartet, QuartetCatalog};
pub use negamax::{Negamax, SearchStats};
pub use random::RandomAgent;
