use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing algebraic notation (a letter `a`-`h` followed by a digit
/// `1`-`8`).
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid string length")]
    BadLength,
    #[error("unexpected file char {0:?}")]
    BadFile(char),
    #[error("unexpected rank char {0:?}")]
    BadRank(char),
}

/// Error parsing move text (`"x1y1_x2y2"`, each coordinate a digit `0`-`7`).
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move text must be two 2-digit squares joined by '_'")]
    BadShape,
    #[error("unexpected coordinate char {0:?}")]
    BadDigit(char),
}

/// Represents one of the two players in chess.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the opposite color.
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Sign used by the signed-value board encoding: +1 white, -1 black.
    pub const fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Direction pawns of this color advance along y. White moves toward
    /// y = 0 (rank 8 is row 0), black toward y = 7.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row index pawns of this color start on.
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row index where pawns of this color promote.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six kinds of chess pieces, with the codes used by the signed-value
/// grid (1 = pawn .. 6 = king).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// The grid code of this kind (always positive; color adds the sign).
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Looks up a kind from an unsigned code.
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

/// A board square as (x, y) coordinates, both in 0..8. x grows rightward,
/// y grows downward; row y = 0 is rank 8.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    /// Creates a square from coordinates. Returns `None` when either
    /// coordinate is off the board.
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < 8 && y < 8 {
            Some(Square { x, y })
        } else {
            None
        }
    }

    pub const fn x(self) -> u8 {
        self.x
    }

    pub const fn y(self) -> u8 {
        self.y
    }

    /// Offsets by (dx, dy), returning `None` when the result leaves the
    /// board.
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x as i8 + dx;
        let y = self.y as i8 + dy;
        if x >= 0 && x < 8 && y >= 0 && y < 8 {
            Some(Square {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    /// Algebraic notation: column letter `'a' + x`, rank digit `8 - y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x) as char, 8 - self.y)
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(NotationError::BadLength);
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) {
            return Err(NotationError::BadFile(file as char));
        }
        if !(b'1'..=b'8').contains(&rank) {
            return Err(NotationError::BadRank(rank as char));
        }
        Ok(Square {
            x: file - b'a',
            y: 8 - (rank - b'0'),
        })
    }
}

/// A chess piece: kind, color and the square it currently stands on. The
/// square always matches the piece's slot in the position grid while the
/// piece is placed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            square,
        }
    }

    /// Signed board value: the kind code with the color's sign.
    pub const fn signed_value(&self) -> i8 {
        self.color.sign() * self.kind.code()
    }

    /// Rebuilds a piece from a signed grid value. Zero is the empty-square
    /// code and maps to `None`; any other magnitude without a kind mapping
    /// is diagnosed and also maps to `None`.
    pub fn from_signed_value(value: i8, square: Square) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let Some(kind) = PieceKind::from_code(value.abs()) else {
            tracing::warn!(value, "value does not represent a valid piece");
            return None;
        };
        let color = if value > 0 { Color::White } else { Color::Black };
        Some(Self::new(kind, color, square))
    }

    /// Full display name, e.g. "white pawn".
    pub fn name(&self) -> String {
        format!("{} {}", self.color, self.kind.name())
    }
}

/// A move as an ordered pair of squares. Moves are transient values built
/// during generation and search; they are never persisted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The same move walked backward.
    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for Move {
    /// Move text: `"x1y1_x2y2"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{}{}",
            self.from.x, self.from.y, self.to.x, self.to.y
        )
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s.split_once('_').ok_or(MoveParseError::BadShape)?;
        Ok(Move::new(parse_square_token(from)?, parse_square_token(to)?))
    }
}

fn parse_square_token(token: &str) -> Result<Square, MoveParseError> {
    let bytes = token.as_bytes();
    if bytes.len() != 2 {
        return Err(MoveParseError::BadShape);
    }
    let coord = |b: u8| match b {
        b'0'..=b'7' => Ok(b - b'0'),
        _ => Err(MoveParseError::BadDigit(b as char)),
    };
    Ok(Square {
        x: coord(bytes[0])?,
        y: coord(bytes[1])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    #[test]
    fn test_notation_round_trip() {
        for x in 0..8 {
            for y in 0..8 {
                let square = sq(x, y);
                let text = square.to_string();
                assert_eq!(text.parse::<Square>(), Ok(square), "square {}", text);
            }
        }
    }

    #[test]
    fn test_notation_examples() {
        assert_eq!(sq(2, 3).to_string(), "c5");
        assert_eq!(sq(0, 7).to_string(), "a1");
        assert_eq!("e4".parse::<Square>(), Ok(sq(4, 4)));
    }

    #[test]
    fn test_notation_rejects_malformed() {
        assert_eq!("i4".parse::<Square>(), Err(NotationError::BadFile('i')));
        assert_eq!("h9".parse::<Square>(), Err(NotationError::BadRank('9')));
        assert_eq!("h0".parse::<Square>(), Err(NotationError::BadRank('0')));
        assert_eq!("e44".parse::<Square>(), Err(NotationError::BadLength));
        assert_eq!("".parse::<Square>(), Err(NotationError::BadLength));
        assert_eq!("E4".parse::<Square>(), Err(NotationError::BadFile('E')));
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert_eq!(sq(0, 0).offset(-1, 0), None);
        assert_eq!(sq(7, 7).offset(1, 1), None);
        assert_eq!(sq(4, 6).offset(0, -2), Some(sq(4, 4)));
    }

    #[test]
    fn test_move_text() {
        let mv = Move::new(sq(6, 4), sq(4, 4));
        assert_eq!(mv.to_string(), "64_44");
        assert_eq!("64_44".parse::<Move>(), Ok(mv));
        assert_eq!(mv.reversed().to_string(), "44_64");
    }

    #[test]
    fn test_move_text_rejects_malformed() {
        assert_eq!("6444".parse::<Move>(), Err(MoveParseError::BadShape));
        assert_eq!("64_4".parse::<Move>(), Err(MoveParseError::BadShape));
        assert_eq!("68_44".parse::<Move>(), Err(MoveParseError::BadDigit('8')));
        assert_eq!("6a_44".parse::<Move>(), Err(MoveParseError::BadDigit('a')));
    }

    #[test]
    fn test_signed_values() {
        let white_queen = Piece::new(PieceKind::Queen, Color::White, sq(3, 7));
        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black, sq(0, 1));
        assert_eq!(white_queen.signed_value(), 5);
        assert_eq!(black_pawn.signed_value(), -1);
        assert_eq!(white_queen.name(), "white queen");
        assert_eq!(black_pawn.name(), "black pawn");
    }

    #[test]
    fn test_from_signed_value() {
        let square = sq(4, 4);
        assert_eq!(Piece::from_signed_value(0, square), None);
        assert_eq!(Piece::from_signed_value(7, square), None);
        assert_eq!(
            Piece::from_signed_value(-6, square),
            Some(Piece::new(PieceKind::King, Color::Black, square))
        );
        for value in 1..=6 {
            let piece = Piece::from_signed_value(value, square).unwrap();
            assert_eq!(piece.signed_value(), value);
        }
    }
}
