use std::fmt;

use crate::types::{Color, Move, Piece, PieceKind, Square};

/// Index of a piece in the position's arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PieceId(u8);

impl PieceId {
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Snapshot returned by [`Position::make_move`] and consumed by
/// [`Position::undo_move`]. The token is deliberately neither `Copy` nor
/// `Clone`: each make is undone at most once, and the make/undo pairs must
/// unwind in LIFO order across the search recursion.
#[derive(Debug)]
pub struct Undo {
    mv: Move,
    moved: PieceId,
    kind_before: PieceKind,
    captured: Option<PieceId>,
}

/// The board state: an arena of pieces, an 8x8 grid of arena indices and
/// the side to move. The grid is the single source of truth for occupancy;
/// the signed-value grid is a projection computed on read, never stored.
#[derive(Clone, Debug)]
pub struct Position {
    pieces: Vec<Piece>,
    grid: [[Option<PieceId>; 8]; 8],
    turn: Color,
}

impl Position {
    /// An empty board with white to move.
    pub fn empty() -> Self {
        Self {
            pieces: Vec::new(),
            grid: [[None; 8]; 8],
            turn: Color::White,
        }
    }

    /// The standard chess starting position.
    pub fn starting_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut position = Self::empty();
        for (x, &kind) in BACK_RANK.iter().enumerate() {
            let x = x as u8;
            position.place(Piece::new(kind, Color::Black, at(x, 0)));
            position.place(Piece::new(Pawn, Color::Black, at(x, 1)));
            position.place(Piece::new(Pawn, Color::White, at(x, 6)));
            position.place(Piece::new(kind, Color::White, at(x, 7)));
        }
        position
    }

    /// Adds a piece to the arena and its grid slot. Replaces any previous
    /// occupant of the slot in the grid (the arena entry is retained but
    /// unreachable). Intended for setup and scenario construction.
    pub fn place(&mut self, piece: Piece) -> PieceId {
        assert!(self.pieces.len() < u8::MAX as usize, "piece arena overflow");
        let id = PieceId(self.pieces.len() as u8);
        *self.slot_mut(piece.square) = Some(id);
        self.pieces.push(piece);
        id
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    pub fn piece_id_at(&self, square: Square) -> Option<PieceId> {
        self.grid[square.y() as usize][square.x() as usize]
    }

    /// Read-only accessor for renderers: the piece standing on a square.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.piece_id_at(square).map(|id| self.piece(id))
    }

    /// Read-only accessor for renderers: "white pawn"-style name of the
    /// piece on a square.
    pub fn piece_name_at(&self, square: Square) -> Option<String> {
        self.piece_at(square).map(Piece::name)
    }

    /// Signed value of the square: the piece code with the color's sign,
    /// or 0 for an empty square. Derived from the piece grid on every
    /// read.
    pub fn value_at(&self, square: Square) -> i8 {
        self.piece_at(square).map_or(0, Piece::signed_value)
    }

    /// The full signed-value grid, indexed `[y][x]`.
    pub fn value_grid(&self) -> [[i8; 8]; 8] {
        let mut grid = [[0i8; 8]; 8];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, value) in row.iter_mut().enumerate() {
                *value = self.value_at(at(x as u8, y as u8));
            }
        }
        grid
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn white_to_move(&self) -> bool {
        self.turn == Color::White
    }

    pub fn black_to_move(&self) -> bool {
        self.turn == Color::Black
    }

    /// Swaps the side to move. Turn transitions are confined to this
    /// method, `make_move` and `undo_move`.
    pub fn switch_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    /// Ids of all placed pieces of a color, in column-major grid order.
    pub fn pieces_of(&self, color: Color) -> Vec<PieceId> {
        let mut ids = Vec::new();
        for x in 0..8 {
            for y in 0..8 {
                if let Some(id) = self.piece_id_at(at(x, y)) {
                    if self.piece(id).color == color {
                        ids.push(id);
                    }
                }
            }
        }
        ids
    }

    /// The square of a color's king, while one is placed.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .into_iter()
            .map(|id| self.piece(id))
            .find(|piece| piece.kind == PieceKind::King)
            .map(|piece| piece.square)
    }

    /// Applies a move: transfers the piece, discards any captured occupant
    /// from the grid, applies auto-queen promotion and switches the turn.
    /// Returns the snapshot needed to reverse all of it.
    ///
    /// Panics when the from-square is empty; the engine trusts its call
    /// sites, and a violation is an internal bug rather than bad input.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self
            .piece_id_at(mv.from)
            .expect("make_move: no piece on the from-square");
        let captured = self.piece_id_at(mv.to);
        let kind_before = self.piece(moved).kind;

        *self.slot_mut(mv.from) = None;
        *self.slot_mut(mv.to) = Some(moved);
        self.pieces[moved.index()].square = mv.to;
        self.promote_pawn(moved);
        self.switch_turn();

        Undo {
            mv,
            moved,
            kind_before,
            captured,
        }
    }

    /// Reverses a move made by [`Self::make_move`]: restores the moved
    /// piece's pre-move identity (undoing promotion), replays the move
    /// backward, puts any captured piece back and switches the turn.
    pub fn undo_move(&mut self, undo: Undo) {
        let Undo {
            mv,
            moved,
            kind_before,
            captured,
        } = undo;
        debug_assert_eq!(
            self.piece_id_at(mv.to),
            Some(moved),
            "undo_move: moves must unwind in LIFO order"
        );

        let piece = &mut self.pieces[moved.index()];
        piece.kind = kind_before;
        piece.square = mv.from;
        *self.slot_mut(mv.from) = Some(moved);
        // A captured piece never left the arena and still records the
        // to-square as its position.
        *self.slot_mut(mv.to) = captured;
        self.switch_turn();
    }

    /// Runs `f` with `mv` applied and undoes the move on the way out, so
    /// an early return inside `f` cannot leave the position corrupted.
    pub fn with_move<T>(&mut self, mv: Move, f: impl FnOnce(&mut Position) -> T) -> T {
        let undo = self.make_move(mv);
        let result = f(self);
        self.undo_move(undo);
        result
    }

    /// Replaces a pawn standing on its far row with a queen of the same
    /// color; a no-op for anything else. Applied by `make_move`; exposed
    /// for frontends that drive the move sequence manually.
    pub fn promote_pawn(&mut self, id: PieceId) -> bool {
        let piece = &mut self.pieces[id.index()];
        if piece.kind == PieceKind::Pawn && piece.square.y() == piece.color.promotion_row() {
            piece.kind = PieceKind::Queen;
            true
        } else {
            false
        }
    }

    fn slot_mut(&mut self, square: Square) -> &mut Option<PieceId> {
        &mut self.grid[square.y() as usize][square.x() as usize]
    }
}

impl fmt::Display for Position {
    /// The signed-value grid with the formatting of the original state
    /// printer: fixed-width cells, comma separated, dashed border.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = "-".repeat(8 * 3 - 1);
        writeln!(f, "{line}")?;
        for row in self.value_grid() {
            let cells: Vec<String> = row.iter().map(|value| format!("{value:2}")).collect();
            writeln!(f, "{}", cells.join(","))?;
        }
        write!(f, "{line}")
    }
}

fn at(x: u8, y: u8) -> Square {
    Square::new(x, y).expect("coordinates are in range")
}
