//! Static position evaluation. Scores are from white's viewpoint:
//! positive favors white, negative favors black, with literal infinities
//! as the checkmate sentinels.

use gambit_core::{Color, PieceKind, Position};

use crate::tables;

/// Static scoring of a position, plus a monotonically incrementing
/// evaluation counter for diagnostics.
pub trait Evaluator {
    /// Scores the position: −∞ when white is checkmated, +∞ when black is
    /// checkmated, 0 on stalemate, otherwise white's total value minus
    /// black's.
    fn evaluate(&mut self, position: &mut Position) -> f64;

    /// Total value of one side's pieces.
    fn side_value(&self, position: &Position, color: Color) -> f64;

    /// Evaluations performed since construction or the last reset.
    fn evaluations(&self) -> u64;

    fn reset_evaluations(&mut self);
}

/// Sentinel for a finished game, if any: the mated side's opponent wins,
/// stalemate is worth 0 for both.
fn terminal_score(position: &mut Position) -> Option<f64> {
    let side = position.turn();
    if position.is_checkmate(side) {
        return Some(if position.white_to_move() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if position.is_stalemate(side) {
        return Some(0.0);
    }
    None
}

/// Material value in pawns.
pub fn material_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight => 3.0,
        PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

/// Material value in centipawns, used together with the piece-square
/// tables.
fn centipawn_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 100.0,
        PieceKind::Knight => 320.0,
        PieceKind::Bishop => 330.0,
        PieceKind::Rook => 500.0,
        PieceKind::Queen => 900.0,
        PieceKind::King => 0.0,
    }
}

/// Material-only evaluation.
#[derive(Debug, Default)]
pub struct MaterialEvaluator {
    evaluations: u64,
}

impl MaterialEvaluator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&mut self, position: &mut Position) -> f64 {
        self.evaluations += 1;
        if let Some(score) = terminal_score(position) {
            return score;
        }
        self.side_value(position, Color::White) - self.side_value(position, Color::Black)
    }

    fn side_value(&self, position: &Position, color: Color) -> f64 {
        position
            .pieces_of(color)
            .iter()
            .map(|id| material_value(position.piece(*id).kind))
            .sum()
    }

    fn evaluations(&self) -> u64 {
        self.evaluations
    }

    fn reset_evaluations(&mut self) {
        self.evaluations = 0;
    }
}

/// Material plus piece-square tables.
#[derive(Debug, Default)]
pub struct PieceSquareEvaluator {
    evaluations: u64,
}

impl PieceSquareEvaluator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Evaluator for PieceSquareEvaluator {
    fn evaluate(&mut self, position: &mut Position) -> f64 {
        self.evaluations += 1;
        if let Some(score) = terminal_score(position) {
            return score;
        }
        self.side_value(position, Color::White) - self.side_value(position, Color::Black)
    }

    fn side_value(&self, position: &Position, color: Color) -> f64 {
        position
            .pieces_of(color)
            .iter()
            .map(|id| {
                let piece = position.piece(*id);
                let square = piece.square;
                // Tables are authored from white's viewpoint; mirror the
                // row for black.
                let row = match color {
                    Color::White => square.y(),
                    Color::Black => 7 - square.y(),
                } as usize;
                let positional = tables::table_for(piece.kind)[row][square.x() as usize];
                centipawn_value(piece.kind) + f64::from(positional)
            })
            .sum()
    }

    fn evaluations(&self) -> u64 {
        self.evaluations
    }

    fn reset_evaluations(&mut self) {
        self.evaluations = 0;
    }
}
