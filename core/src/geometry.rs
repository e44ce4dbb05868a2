//! Empty-board move geometry and square arithmetic. Occupancy, blocking
//! and self-check are the position engine's concern; everything here is a
//! pure function of coordinates.

use crate::types::{Color, PieceKind, Square};

const STRAIGHT_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Destinations reachable by a piece of the given kind from `from` on an
/// empty board. Pawn captures are a separate geometry; see
/// [`pawn_captures`].
pub fn piece_moves(kind: PieceKind, color: Color, from: Square) -> Vec<Square> {
    match kind {
        PieceKind::Pawn => pawn_moves(color, from),
        PieceKind::Knight => delta_moves(from, &KNIGHT_DELTAS),
        PieceKind::Bishop => ray_moves(from, &DIAGONAL_DIRS),
        PieceKind::Rook => ray_moves(from, &STRAIGHT_DIRS),
        PieceKind::Queen => {
            let mut moves = ray_moves(from, &STRAIGHT_DIRS);
            moves.extend(ray_moves(from, &DIAGONAL_DIRS));
            moves
        }
        PieceKind::King => delta_moves(from, &KING_DELTAS),
    }
}

/// Diagonal capture squares for a pawn; direction depends on color.
pub fn pawn_captures(color: Color, from: Square) -> Vec<Square> {
    let dy = color.forward();
    [(-1, dy), (1, dy)]
        .iter()
        .filter_map(|&(dx, dy)| from.offset(dx, dy))
        .collect()
}

fn pawn_moves(color: Color, from: Square) -> Vec<Square> {
    let mut moves = Vec::new();
    let dy = color.forward();
    if let Some(one) = from.offset(0, dy) {
        moves.push(one);
        // The double step exists only from the starting row.
        if from.y() == color.pawn_start_row() {
            if let Some(two) = from.offset(0, 2 * dy) {
                moves.push(two);
            }
        }
    }
    moves
}

fn delta_moves(from: Square, deltas: &[(i8, i8)]) -> Vec<Square> {
    deltas
        .iter()
        .filter_map(|&(dx, dy)| from.offset(dx, dy))
        .collect()
}

fn ray_moves(from: Square, dirs: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(dx, dy) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(dx, dy) {
            moves.push(next);
            current = next;
        }
    }
    moves
}

/// The open interval of squares strictly between `a` and `b`, walked in
/// order from `a` toward `b`. Empty when the squares coincide or do not
/// share a row, column or exact diagonal; callers must not read blocking
/// information out of a non-aligned pair.
pub fn squares_between(a: Square, b: Square) -> Vec<Square> {
    let dx = b.x() as i8 - a.x() as i8;
    let dy = b.y() as i8 - a.y() as i8;
    if dx == 0 && dy == 0 {
        return Vec::new();
    }
    if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
        return Vec::new();
    }
    let (sx, sy) = (dx.signum(), dy.signum());
    let mut squares = Vec::new();
    for step in 1..dx.abs().max(dy.abs()) {
        if let Some(square) = a.offset(sx * step, sy * step) {
            squares.push(square);
        }
    }
    squares
}
