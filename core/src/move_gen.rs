//! Move generation and legality: pseudo-legal moves per piece, the legal
//! filter, check/checkmate/stalemate classification and move ordering.

use crate::geometry::{pawn_captures, piece_moves, squares_between};
use crate::position::{PieceId, Position};
use crate::types::{Color, Move, PieceKind, Square};

impl Position {
    /// Pseudo-legal destinations for a piece: its empty-board geometry
    /// constrained by occupancy, blocking and capture rules. Whether the
    /// move leaves the mover's own king attacked is not considered here.
    pub fn possible_moves(&self, id: PieceId) -> Vec<Square> {
        let piece = *self.piece(id);
        let from = piece.square;
        let mut moves = Vec::new();

        for to in piece_moves(piece.kind, piece.color, from) {
            let target = self.piece_at(to);
            if target.is_some_and(|t| t.color == piece.color) {
                continue;
            }
            match piece.kind {
                // Pawns advance only onto empty squares with a clear path.
                PieceKind::Pawn => {
                    if target.is_none() && !self.any_piece_between(from, to) {
                        moves.push(to);
                    }
                }
                // Knights jump over anything.
                PieceKind::Knight => moves.push(to),
                _ => {
                    if !self.any_piece_between(from, to) {
                        moves.push(to);
                    }
                }
            }
        }

        // Pawn captures are admissible only onto occupied enemy squares.
        if piece.kind == PieceKind::Pawn {
            for to in pawn_captures(piece.color, from) {
                if self.piece_at(to).is_some_and(|t| t.color != piece.color) {
                    moves.push(to);
                }
            }
        }

        moves
    }

    /// All pseudo-legal moves for a side.
    pub fn player_possible_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for id in self.pieces_of(color) {
            let from = self.piece(id).square;
            for to in self.possible_moves(id) {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    /// True iff some piece of `attacker` pseudo-legally reaches `target`.
    /// Evaluated lazily with early exit; equivalent to asking whether the
    /// attacker's full pseudo-legal move set contains the square.
    fn attacks_square(&self, attacker: Color, target: Square) -> bool {
        for id in self.pieces_of(attacker) {
            let piece = self.piece(id);
            let from = piece.square;
            let in_geometry = match piece.kind {
                PieceKind::Pawn => pawn_captures(piece.color, from).contains(&target),
                _ => piece_moves(piece.kind, piece.color, from).contains(&target),
            };
            if !in_geometry {
                continue;
            }
            let jumps = matches!(piece.kind, PieceKind::Pawn | PieceKind::Knight);
            if jumps || !self.any_piece_between(from, target) {
                return true;
            }
        }
        false
    }

    fn any_piece_between(&self, a: Square, b: Square) -> bool {
        squares_between(a, b)
            .iter()
            .any(|square| self.piece_at(*square).is_some())
    }

    /// Check: the color's king square is reachable by the opponent's
    /// pseudo-legal moves. Pinned attackers still count — a move that
    /// would expose its own king can still deliver check.
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.attacks_square(color.opponent(), king),
            None => false,
        }
    }

    /// True iff making `mv` would leave `color`'s own king attacked.
    pub fn move_exposes_king(&mut self, mv: Move, color: Color) -> bool {
        self.with_move(mv, |position| position.in_check(color))
    }

    /// Legal destinations for a piece: pseudo-legal filtered through a
    /// make/test/undo cycle per candidate. This cycle dominates the cost
    /// of the engine.
    pub fn legal_moves_for(&mut self, id: PieceId) -> Vec<Square> {
        let piece = *self.piece(id);
        let mut legal = Vec::new();
        for to in self.possible_moves(id) {
            let mv = Move::new(piece.square, to);
            if !self.move_exposes_king(mv, piece.color) {
                legal.push(to);
            }
        }
        legal
    }

    /// All legal moves for a side.
    pub fn player_legal_moves(&mut self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for id in self.pieces_of(color) {
            let from = self.piece(id).square;
            for to in self.legal_moves_for(id) {
                moves.push(Move::new(from, to));
            }
        }
        moves
    }

    /// The legal moves that land on an occupied square.
    pub fn player_legal_captures(&mut self, color: Color) -> Vec<Move> {
        self.player_legal_moves(color)
            .into_iter()
            .filter(|mv| self.is_capture(*mv))
            .collect()
    }

    /// Checkmate: in check with no legal move.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.in_check(color) && self.player_legal_moves(color).is_empty()
    }

    /// Stalemate: not in check, but no legal move either.
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.in_check(color) && self.player_legal_moves(color).is_empty()
    }

    /// True when the side to move is checkmated or stalemated. Computed on
    /// demand; the position stores no result state.
    pub fn game_over(&mut self) -> bool {
        let side = self.turn();
        self.is_checkmate(side) || self.is_stalemate(side)
    }

    /// The move lands on an occupied square. Assumes `mv` is legal.
    pub fn is_capture(&self, mv: Move) -> bool {
        self.piece_at(mv.to).is_some()
    }

    /// The move carries a pawn to its far row. Assumes `mv` is legal.
    pub fn is_promotion(&self, mv: Move) -> bool {
        self.piece_at(mv.from).is_some_and(|piece| {
            piece.kind == PieceKind::Pawn && mv.to.y() == piece.color.promotion_row()
        })
    }

    /// The move gives check to the mover's opponent. Assumes `mv` is
    /// legal; tested with a make/test/undo cycle.
    pub fn gives_check(&mut self, mv: Move) -> bool {
        let Some(mover) = self.piece_at(mv.from).map(|piece| piece.color) else {
            return false;
        };
        self.with_move(mv, |position| position.in_check(mover.opponent()))
    }

    /// Orders moves to improve alpha-beta cutoffs: promotions, captures,
    /// checks, then the rest. Always a permutation of the input; ordering
    /// never changes the search result, only the node count.
    pub fn order_moves(&mut self, moves: Vec<Move>) -> Vec<Move> {
        let mut promotions = Vec::new();
        let mut captures = Vec::new();
        let mut checks = Vec::new();
        let mut others = Vec::new();

        for mv in moves {
            if self.is_promotion(mv) {
                promotions.push(mv);
            } else if self.is_capture(mv) {
                captures.push(mv);
            } else if self.gives_check(mv) {
                checks.push(mv);
            } else {
                others.push(mv);
            }
        }

        promotions.extend(captures);
        promotions.extend(checks);
        promotions.extend(others);
        promotions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    fn mv(x1: u8, y1: u8, x2: u8, y2: u8) -> Move {
        Move::new(sq(x1, y1), sq(x2, y2))
    }

    /// The position after 1.f3 e5 2.g4 Qh4#.
    fn fools_mate() -> Position {
        let mut position = Position::starting_position();
        for text in ["56_55", "41_43", "66_64", "30_74"] {
            let mv: Move = text.parse().unwrap();
            position.make_move(mv);
        }
        position
    }

    #[test]
    fn test_initial_legal_move_count() {
        let mut position = Position::starting_position();
        // 16 pawn advances plus 4 knight moves; nothing is pinned yet, so
        // the pseudo-legal and legal sets coincide.
        assert_eq!(position.player_possible_moves(Color::White).len(), 20);
        assert_eq!(position.player_legal_moves(Color::White).len(), 20);
        assert_eq!(position.player_legal_moves(Color::Black).len(), 20);
    }

    #[test]
    fn test_blocked_pieces_at_start() {
        let mut position = Position::starting_position();
        let rook = position.piece_id_at(sq(0, 7)).unwrap();
        let knight = position.piece_id_at(sq(1, 7)).unwrap();
        let bishop = position.piece_id_at(sq(2, 7)).unwrap();
        assert!(position.possible_moves(rook).is_empty());
        assert_eq!(position.legal_moves_for(knight).len(), 2);
        assert!(position.legal_moves_for(bishop).is_empty());
    }

    #[test]
    fn test_pawn_cannot_capture_forward() {
        let mut position = Position::empty();
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::White, sq(4, 4)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, sq(4, 3)));
        assert!(position.possible_moves(pawn).is_empty());
    }

    #[test]
    fn test_pawn_diagonal_capture() {
        let mut position = Position::empty();
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::White, sq(4, 4)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, sq(3, 3)));
        position.place(Piece::new(PieceKind::Knight, Color::White, sq(5, 3)));
        // Forward step, plus the enemy rook; the friendly knight's square
        // is not a capture.
        let moves = position.possible_moves(pawn);
        assert!(moves.contains(&sq(4, 3)));
        assert!(moves.contains(&sq(3, 3)));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_double_step_blocked_by_path() {
        let mut position = Position::empty();
        let pawn = position.place(Piece::new(PieceKind::Pawn, Color::White, sq(4, 6)));
        position.place(Piece::new(PieceKind::Knight, Color::Black, sq(4, 5)));
        assert!(position.possible_moves(pawn).is_empty());
    }

    #[test]
    fn test_sliders_stop_at_blockers() {
        let mut position = Position::empty();
        let rook = position.place(Piece::new(PieceKind::Rook, Color::White, sq(0, 7)));
        position.place(Piece::new(PieceKind::Pawn, Color::White, sq(0, 4)));
        position.place(Piece::new(PieceKind::Pawn, Color::Black, sq(4, 7)));
        let moves = position.possible_moves(rook);
        // Up the file until the friendly pawn, right until and including
        // the enemy pawn.
        assert!(moves.contains(&sq(0, 5)));
        assert!(!moves.contains(&sq(0, 4)));
        assert!(!moves.contains(&sq(0, 3)));
        assert!(moves.contains(&sq(4, 7)));
        assert!(!moves.contains(&sq(5, 7)));
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn test_fools_mate_is_checkmate() {
        let mut position = fools_mate();
        assert!(position.white_to_move());
        assert!(position.in_check(Color::White));
        assert!(position.player_legal_moves(Color::White).is_empty());
        assert!(position.is_checkmate(Color::White));
        assert!(!position.is_stalemate(Color::White));
        assert!(position.game_over());
    }

    #[test]
    fn test_lone_king_stalemate() {
        // White king a1, black king a3, black queen b3; white to move has
        // no legal move and is not in check.
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(0, 7)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(0, 5)));
        position.place(Piece::new(PieceKind::Queen, Color::Black, sq(1, 5)));

        assert!(!position.in_check(Color::White));
        assert!(position.player_legal_moves(Color::White).is_empty());
        assert!(position.is_stalemate(Color::White));
        assert!(!position.is_checkmate(Color::White));
        assert!(position.game_over());
    }

    #[test]
    fn test_pinned_piece_cannot_move_but_still_checks() {
        // The white bishop on e2 is pinned by the rook on e8, yet its
        // diagonal still delivers check to the black king on a6.
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(4, 7)));
        let bishop = position.place(Piece::new(PieceKind::Bishop, Color::White, sq(4, 6)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, sq(4, 0)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(0, 2)));

        assert!(position.legal_moves_for(bishop).is_empty());
        assert!(!position.possible_moves(bishop).is_empty());
        assert!(position.in_check(Color::Black));
        assert!(!position.in_check(Color::White));
    }

    #[test]
    fn test_move_exposes_king() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(4, 7)));
        position.place(Piece::new(PieceKind::Bishop, Color::White, sq(4, 6)));
        position.place(Piece::new(PieceKind::Rook, Color::Black, sq(4, 0)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(0, 2)));

        let before = position.value_grid();
        assert!(position.move_exposes_king(mv(4, 6, 3, 5), Color::White));
        assert!(!position.move_exposes_king(mv(4, 7, 3, 7), Color::White));
        // The probe must leave the position untouched.
        assert_eq!(position.value_grid(), before);
        assert!(position.white_to_move());
    }

    #[test]
    fn test_legal_captures_are_a_subset() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(7, 7)));
        position.place(Piece::new(PieceKind::Rook, Color::White, sq(0, 7)));
        position.place(Piece::new(PieceKind::Pawn, Color::Black, sq(0, 3)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(7, 0)));

        let captures = position.player_legal_captures(Color::White);
        assert_eq!(captures, vec![mv(0, 7, 0, 3)]);
        let moves = position.player_legal_moves(Color::White);
        assert!(captures.iter().all(|c| moves.contains(c)));
    }

    #[test]
    fn test_gives_check_classification() {
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(7, 7)));
        position.place(Piece::new(PieceKind::Rook, Color::White, sq(0, 7)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(4, 0)));

        assert!(position.gives_check(mv(0, 7, 4, 7)));
        assert!(!position.gives_check(mv(0, 7, 0, 4)));
        assert!(position.white_to_move());
    }

    #[test]
    fn test_order_moves_groups_and_preserves() {
        // A promotion, a capture, a check and a quiet move for white.
        let mut position = Position::empty();
        position.place(Piece::new(PieceKind::King, Color::White, sq(7, 7)));
        position.place(Piece::new(PieceKind::Pawn, Color::White, sq(0, 1)));
        position.place(Piece::new(PieceKind::Rook, Color::White, sq(2, 4)));
        position.place(Piece::new(PieceKind::Knight, Color::Black, sq(2, 2)));
        position.place(Piece::new(PieceKind::King, Color::Black, sq(5, 0)));

        let promotion = mv(0, 1, 0, 0);
        let capture = mv(2, 4, 2, 2);
        let check = mv(2, 4, 5, 4);
        let quiet = mv(7, 7, 7, 6);

        let ordered = position.order_moves(vec![quiet, check, capture, promotion]);
        assert_eq!(ordered, vec![promotion, capture, check, quiet]);
    }

    #[test]
    fn test_order_moves_is_a_permutation_of_legal_moves() {
        let mut position = Position::starting_position();
        let moves = position.player_legal_moves(Color::White);
        let ordered = position.order_moves(moves.clone());
        assert_eq!(ordered.len(), moves.len());
        assert!(moves.iter().all(|m| ordered.contains(m)));
    }
}
