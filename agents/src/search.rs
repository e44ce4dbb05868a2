//! Minimax search with alpha-beta pruning over the mutable position.
//! Children are explored by make/recurse/undo rather than by copying the
//! board, so there is exactly one position object for the whole tree.

use gambit_core::{Move, Position};

use crate::evaluation::Evaluator;

/// Fixed-depth adversarial search backed by an evaluator.
pub struct Search<E> {
    evaluator: E,
    max_depth: u32,
}

impl<E: Evaluator> Search<E> {
    pub fn new(evaluator: E, max_depth: u32) -> Self {
        Self {
            evaluator,
            max_depth,
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Plain minimax. White is fixed as the maximizing side for the whole
    /// tree, regardless of which node is current.
    pub fn minimax(&mut self, position: &mut Position, depth: u32, maximizing: bool) -> f64 {
        if depth == 0 || position.game_over() {
            return self.evaluator.evaluate(position);
        }

        let moves = position.player_legal_moves(position.turn());
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                let value = position.with_move(mv, |pos| self.minimax(pos, depth - 1, false));
                best = best.max(value);
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for mv in moves {
                let value = position.with_move(mv, |pos| self.minimax(pos, depth - 1, true));
                best = best.min(value);
            }
            best
        }
    }

    /// Minimax with alpha-beta pruning. Returns the same value as
    /// [`Self::minimax`] for every reachable node; pruning only reduces
    /// the node count.
    pub fn minimax_alpha_beta(
        &mut self,
        position: &mut Position,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        if depth == 0 || position.game_over() {
            return self.evaluator.evaluate(position);
        }

        let moves = position.player_legal_moves(position.turn());
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                let value = position.with_move(mv, |pos| {
                    self.minimax_alpha_beta(pos, depth - 1, alpha, beta, false)
                });
                best = best.max(value);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for mv in moves {
                let value = position.with_move(mv, |pos| {
                    self.minimax_alpha_beta(pos, depth - 1, alpha, beta, true)
                });
                best = best.min(value);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Best move for the side to move, or `None` when there is no legal
    /// move; callers check game-over state separately. Every root move is
    /// searched with a fresh (−∞, +∞) window; ties keep the first move in
    /// ordered sequence, and a position where every move loses still
    /// returns the first one.
    pub fn best_move(&mut self, position: &mut Position) -> Option<Move> {
        let moves = position.player_legal_moves(position.turn());
        let ordered = position.order_moves(moves);

        // White is the maximizing player.
        let maximizing = position.white_to_move();
        let depth = self.max_depth;

        let mut best_move = None;
        let mut best_value = 0.0;
        for mv in ordered {
            let value = position.with_move(mv, |pos| {
                self.minimax_alpha_beta(pos, depth, f64::NEG_INFINITY, f64::INFINITY, !maximizing)
            });
            let better = match best_move {
                None => true,
                Some(_) if maximizing => value > best_value,
                Some(_) => value < best_value,
            };
            if better {
                best_move = Some(mv);
                best_value = value;
            }
        }

        if let Some(mv) = best_move {
            tracing::debug!(%mv, value = best_value, "search complete");
        }
        best_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::MaterialEvaluator;
    use gambit_core::{Color, Piece, PieceKind, Square};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    fn mv(x1: u8, y1: u8, x2: u8, y2: u8) -> Move {
        Move::new(sq(x1, y1), sq(x2, y2))
    }

    /// Sparse middlegame-ish position: enough structure to make pruning
    /// fire without making the full tree expensive.
    fn sparse_position() -> Position {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(4, 7)));
        position.place(Piece::new(PieceKind::Queen, Color::White, sq(4, 4)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(4, 0)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, sq(0, 3)));
        position
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        for depth in 0..=3 {
            let mut plain = Search::new(MaterialEvaluator::new(), depth);
            let mut pruned = Search::new(MaterialEvaluator::new(), depth);

            let mut position = sparse_position();
            let expected = plain.minimax(&mut position, depth, true);
            let actual = pruned.minimax_alpha_beta(
                &mut position,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                true,
            );

            assert_eq!(actual, expected, "depth {}", depth);
            // Pruning may only reduce the number of evaluated nodes.
            assert!(pruned.evaluator().evaluations() <= plain.evaluator().evaluations());
        }
    }

    #[test]
    fn test_alpha_beta_prunes_nodes() {
        let depth = 3;
        let mut plain = Search::new(MaterialEvaluator::new(), depth);
        let mut pruned = Search::new(MaterialEvaluator::new(), depth);

        let mut position = sparse_position();
        plain.minimax(&mut position, depth, true);
        pruned.minimax_alpha_beta(
            &mut position,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
        );

        assert!(pruned.evaluator().evaluations() < plain.evaluator().evaluations());
    }

    #[test]
    fn test_search_leaves_position_untouched() {
        let mut search = Search::new(MaterialEvaluator::new(), 2);
        let mut position = sparse_position();
        let before = position.value_grid();
        search.best_move(&mut position);
        assert_eq!(position.value_grid(), before);
        assert!(position.white_to_move());
    }

    #[test]
    fn test_finds_back_rank_mate() {
        // Rb8 is mate: the rook on a7 seals the seventh row.
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(7, 7)));
        position.place(Piece::new(PieceKind::Rook, Color::White, sq(0, 1)));
        position.place(Piece::new(PieceKind::Rook, Color::White, sq(1, 7)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(4, 0)));

        let mut search = Search::new(MaterialEvaluator::new(), 1);
        let best = search.best_move(&mut position);
        assert_eq!(best, Some(mv(1, 7, 1, 0)));
    }

    #[test]
    fn test_black_minimizes() {
        // Black to move takes the hanging white queen.
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(7, 7)));
        position.place(Piece::new(PieceKind::Queen, Color::White, sq(0, 3)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(7, 0)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, sq(0, 0)));
        position.switch_turn();

        let mut search = Search::new(MaterialEvaluator::new(), 1);
        let best = search.best_move(&mut position);
        assert_eq!(best, Some(mv(0, 0, 0, 3)));
    }

    #[test]
    fn test_no_move_when_checkmated() {
        let mut position = Position::starting_position();
        for text in ["56_55", "41_43", "66_64", "30_74"] {
            let mv: Move = text.parse().unwrap();
            position.make_move(mv);
        }
        let mut search = Search::new(MaterialEvaluator::new(), 1);
        assert_eq!(search.best_move(&mut position), None);
    }
}
