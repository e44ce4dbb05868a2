pub mod evaluation;
pub mod greedy;
pub mod minimax;
pub mod random;
pub mod search;
mod tables;

use gambit_core::{Color, Move, Position};

/// Core trait for chess agents: pick a move for the side to move.
pub trait Agent {
    /// Chooses a move for the current position, or `None` when the side
    /// to move has no legal move. Implementations may mutate the position
    /// while thinking but must hand it back unchanged.
    fn choose_move(&mut self, position: &mut Position) -> Option<Move>;

    /// The agent's display name.
    fn name(&self) -> &str;
}

/// A participant in a game: a human when `agent` is `None`, a computer
/// otherwise.
pub struct Player {
    pub name: String,
    pub color: Color,
    pub agent: Option<Box<dyn Agent>>,
}

impl Player {
    pub fn human(name: impl Into<String>, color: Color) -> Self {
        Player {
            name: name.into(),
            color,
            agent: None,
        }
    }

    pub fn computer(name: impl Into<String>, color: Color, agent: Box<dyn Agent>) -> Self {
        Player {
            name: name.into(),
            color,
            agent: Some(agent),
        }
    }

    pub fn is_computer(&self) -> bool {
        self.agent.is_some()
    }
}

pub use evaluation::{material_value, Evaluator, MaterialEvaluator, PieceSquareEvaluator};
pub use greedy::CaptureAgent;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::Search;
