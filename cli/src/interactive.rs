use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent},
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use gambit_agents::{Agent, MinimaxAgent};
use gambit_core::{Color, Move, Position, Square, Undo};

use crate::piece_symbol;

/// Terminal game against the engine: move a cursor over the board, select
/// one of your pieces, and land it on a highlighted legal destination.
pub struct InteractiveGame {
    position: Position,
    engine: MinimaxAgent,
    cursor: (u8, u8), // (x, y); y = 0 is the top row, rank 8
    selected: Option<Square>,
    targets: Vec<Square>,
    history: Vec<Undo>,
    message: String,
}

impl InteractiveGame {
    pub fn new(depth: u32) -> Self {
        Self {
            position: Position::starting_position(),
            engine: MinimaxAgent::new(depth),
            cursor: (4, 6), // e2
            selected: None,
            targets: Vec::new(),
            history: Vec::new(),
            message: String::from("Use hjkl/arrows to move, Enter to select/move, q to quit"),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            self.draw_board()?;

            let side = self.position.turn();
            if self.position.game_over() {
                self.message = if self.position.is_checkmate(side) {
                    format!("Checkmate! {} wins!", side.opponent())
                } else {
                    String::from("Stalemate!")
                };
                self.draw_board()?;
                event::read()?; // Wait for any key
                break;
            }

            if self.position.in_check(side) {
                self.message = String::from("Check!");
            }

            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(0, 1),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(0, -1),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if self.handle_selection() {
                            self.engine_move()?;
                        }
                    }
                    KeyCode::Char('u') => self.undo_turn(),
                    KeyCode::Char('n') => self.new_game(),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) {
        let x = self.cursor.0 as i8 + dx;
        let y = self.cursor.1 as i8 + dy;
        if (0..8).contains(&x) && (0..8).contains(&y) {
            self.cursor = (x as u8, y as u8);
        }
    }

    /// Returns true when the player completed a move.
    fn handle_selection(&mut self) -> bool {
        let cursor_square = Square::new(self.cursor.0, self.cursor.1).unwrap();

        if self.selected.is_some() {
            if self.targets.contains(&cursor_square) {
                let mv = Move::new(self.selected.unwrap(), cursor_square);
                self.history.push(self.position.make_move(mv));
                self.selected = None;
                self.targets.clear();
                self.message = format!("Moved: {} to {}", mv.from, mv.to);
                return true;
            }
            // Anywhere else deselects.
            self.selected = None;
            self.targets.clear();
        }

        if let Some(id) = self.position.piece_id_at(cursor_square) {
            let piece = *self.position.piece(id);
            if piece.color == self.position.turn() {
                self.selected = Some(cursor_square);
                self.targets = self.position.legal_moves_for(id);
                self.message = format!("Selected {} at {}", piece.name(), cursor_square);
            }
        }

        false
    }

    fn engine_move(&mut self) -> io::Result<()> {
        self.message = String::from("Engine thinking...");
        self.draw_board()?;

        if let Some(mv) = self.engine.choose_move(&mut self.position) {
            tracing::debug!(%mv, "engine reply");
            self.history.push(self.position.make_move(mv));
            self.message = format!("{} played: {} to {}", self.engine.name(), mv.from, mv.to);
        }

        Ok(())
    }

    fn undo_turn(&mut self) {
        if self.history.len() >= 2 {
            // Unwind the engine's reply, then the player's move.
            for _ in 0..2 {
                if let Some(undo) = self.history.pop() {
                    self.position.undo_move(undo);
                }
            }
            self.selected = None;
            self.targets.clear();
            self.message = String::from("Undid last move");
        } else {
            self.message = String::from("Nothing to undo");
        }
    }

    fn new_game(&mut self) {
        self.position = Position::starting_position();
        self.history.clear();
        self.selected = None;
        self.targets.clear();
        self.cursor = (4, 6);
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;

        println!("gambit - play against the engine (vim keys: hjkl)\r");
        println!("Commands: Enter=select/move, u=undo, n=new, q=quit\r");
        println!("\r");
        println!("  a b c d e f g h  \r");
        println!(" ┌─────────────────┐\r");

        for y in 0..8u8 {
            print!("{}│ ", 8 - y);

            for x in 0..8u8 {
                let square = Square::new(x, y).unwrap();
                let is_cursor = self.cursor == (x, y);
                let is_selected = self.selected == Some(square);
                let is_target = self.targets.contains(&square);

                if is_cursor {
                    stdout.execute(SetBackgroundColor(TermColor::Yellow))?;
                } else if is_selected {
                    stdout.execute(SetBackgroundColor(TermColor::Green))?;
                } else if is_target {
                    stdout.execute(SetBackgroundColor(TermColor::Blue))?;
                } else if (x + y) % 2 == 0 {
                    stdout.execute(SetBackgroundColor(TermColor::DarkGrey))?;
                } else {
                    stdout.execute(SetBackgroundColor(TermColor::Black))?;
                }

                match self.position.piece_at(square) {
                    Some(piece) => {
                        if piece.color == Color::White {
                            stdout.execute(SetForegroundColor(TermColor::White))?;
                        } else {
                            stdout.execute(SetForegroundColor(TermColor::Magenta))?;
                        }
                        print!("{} ", piece_symbol(piece));
                    }
                    None => print!("  "),
                }

                stdout.execute(ResetColor)?;
            }

            println!("│{}\r", 8 - y);
        }

        println!(" └─────────────────┘\r");
        println!("  a b c d e f g h  \r");
        println!("\r");
        println!(
            "{} to move | {} plies played\r",
            self.position.turn(),
            self.history.len()
        );
        println!("\r");
        println!("{}\r", self.message);

        stdout.flush()?;
        Ok(())
    }
}
