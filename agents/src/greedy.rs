use gambit_core::{Move, Position};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::Agent;

/// Agent that captures whenever it can, choosing randomly among captures;
/// otherwise it plays a random legal move.
pub struct CaptureAgent {
    name: String,
}

impl CaptureAgent {
    pub fn new() -> Self {
        CaptureAgent {
            name: "Capture".to_string(),
        }
    }
}

impl Default for CaptureAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for CaptureAgent {
    fn choose_move(&mut self, position: &mut Position) -> Option<Move> {
        let side = position.turn();
        let mut rng = thread_rng();

        let captures = position.player_legal_captures(side);
        if let Some(mv) = captures.choose(&mut rng) {
            return Some(*mv);
        }
        position.player_legal_moves(side).choose(&mut rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gambit_core::{Color, Piece, PieceKind, Square};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    #[test]
    fn test_capture_agent_prefers_captures() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(7, 7)));
        position.place(Piece::new(PieceKind::Rook, Color::White, sq(0, 7)));
        position.place(Piece::new(PieceKind::Pawn, Color::Black, sq(0, 3)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(7, 0)));

        let mut agent = CaptureAgent::new();
        let chosen = agent.choose_move(&mut position).unwrap();
        assert_eq!(chosen, Move::new(sq(0, 7), sq(0, 3)));
    }

    #[test]
    fn test_capture_agent_falls_back_to_any_move() {
        let mut agent = CaptureAgent::new();
        let mut position = Position::starting_position();
        let chosen = agent.choose_move(&mut position).unwrap();
        let legal = position.player_legal_moves(position.turn());
        assert!(legal.contains(&chosen));
    }
}
