use gambit_core::{Move, Position};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::Agent;

/// Agent that chooses uniformly among the legal moves.
pub struct RandomAgent {
    name: String,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, position: &mut Position) -> Option<Move> {
        let moves = position.player_legal_moves(position.turn());
        moves.choose(&mut thread_rng()).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
