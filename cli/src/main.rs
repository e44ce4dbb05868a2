mod interactive;

use std::env;

use gambit_agents::{
    Agent, CaptureAgent, Evaluator, MaterialEvaluator, MinimaxAgent, Player, RandomAgent,
};
use gambit_core::{Color, Piece, PieceKind, Position, Square};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("play") => {
            let depth = args
                .get(2)
                .and_then(|text| text.parse().ok())
                .unwrap_or(2);
            if let Err(err) = interactive::InteractiveGame::new(depth).run() {
                eprintln!("terminal error: {err}");
            }
        }
        Some("auto") => {
            let white = args.get(2).map(String::as_str).unwrap_or("capture");
            let black = args.get(3).map(String::as_str).unwrap_or("capture");
            let plies = args
                .get(4)
                .and_then(|text| text.parse().ok())
                .unwrap_or(200);
            match (agent_by_name(white), agent_by_name(black)) {
                (Some(white), Some(black)) => auto_play(
                    Player::computer("Merry", Color::White, white),
                    Player::computer("Pippin", Color::Black, black),
                    plies,
                ),
                _ => println!("agents: random, capture, minimax"),
            }
        }
        Some("report") => {
            let mut position = Position::starting_position();
            display_board(&position);
            game_report(&mut position, &mut MaterialEvaluator::new());
        }
        _ => {
            println!("gambit - chess engine");
            println!("Commands:");
            println!("  play [depth]                  - Play against the engine");
            println!("  auto [white] [black] [plies]  - Watch two agents play");
            println!("  report                        - Print the starting game report");
            println!("\nAgents for auto mode: random, capture, minimax");
        }
    }
}

fn agent_by_name(name: &str) -> Option<Box<dyn Agent>> {
    match name {
        "random" => Some(Box::new(RandomAgent::new())),
        "capture" => Some(Box::new(CaptureAgent::new())),
        "minimax" => Some(Box::new(MinimaxAgent::new(2))),
        _ => None,
    }
}

pub(crate) fn piece_symbol(piece: &Piece) -> char {
    match (piece.kind, piece.color) {
        (PieceKind::King, Color::White) => '♔',
        (PieceKind::Queen, Color::White) => '♕',
        (PieceKind::Rook, Color::White) => '♖',
        (PieceKind::Bishop, Color::White) => '♗',
        (PieceKind::Knight, Color::White) => '♘',
        (PieceKind::Pawn, Color::White) => '♙',
        (PieceKind::King, Color::Black) => '♚',
        (PieceKind::Queen, Color::Black) => '♛',
        (PieceKind::Rook, Color::Black) => '♜',
        (PieceKind::Bishop, Color::Black) => '♝',
        (PieceKind::Knight, Color::Black) => '♞',
        (PieceKind::Pawn, Color::Black) => '♟',
    }
}

fn display_board(position: &Position) {
    println!("\n  a b c d e f g h");
    println!("  ---------------");
    for y in 0..8 {
        print!("{} ", 8 - y);
        for x in 0..8 {
            let square = Square::new(x, y).unwrap();
            match position.piece_at(square) {
                Some(piece) => print!("{} ", piece_symbol(piece)),
                None => print!(". "),
            }
        }
        println!("| {}", 8 - y);
    }
    println!("  ---------------");
    println!("  a b c d e f g h\n");
}

/// Detailed state of the game for the side to move, in the shape of the
/// classic text report.
fn game_report(position: &mut Position, evaluator: &mut MaterialEvaluator) {
    let side = position.turn();
    let in_check = position.in_check(side);
    let in_checkmate = position.is_checkmate(side);
    let in_stalemate = position.is_stalemate(side);
    let game_over = position.game_over();
    let legal_moves = position.player_legal_moves(side).len();
    let white_total = evaluator.side_value(position, Color::White);
    let black_total = evaluator.side_value(position, Color::Black);
    let evaluation = evaluator.evaluate(position);

    println!("------------------------------------------");
    println!("Current player: {side}");
    println!("------------------------------------------");
    println!(" - In check:               {in_check}");
    println!(" - In checkmate:           {in_checkmate}");
    println!(" - In stalemate:           {in_stalemate}");
    println!(" - Game is over:           {game_over}");
    println!(" - Number of legal moves:  {legal_moves}");
    println!(" - White total value:      {white_total}");
    println!(" - Black total value:      {black_total}");
    println!(" - Evaluation:             {evaluation}");
    println!("------------------------------------------");
}

fn auto_play(mut white: Player, mut black: Player, plies: u32) {
    let mut position = Position::starting_position();
    let mut evaluator = MaterialEvaluator::new();

    println!("{} (white) vs {} (black)", white.name, black.name);
    display_board(&position);

    for ply in 1..=plies {
        if position.game_over() {
            break;
        }
        let player = if position.white_to_move() {
            &mut white
        } else {
            &mut black
        };
        let Some(agent) = player.agent.as_mut() else {
            break;
        };
        // An agent that returns no move ends the loop without advancing.
        let Some(mv) = agent.choose_move(&mut position) else {
            break;
        };
        println!("{}. {} ({}) plays {}", ply, player.name, agent.name(), mv);
        position.make_move(mv);
        display_board(&position);
        game_report(&mut position, &mut evaluator);
    }

    let side = position.turn();
    if position.is_checkmate(side) {
        println!("Checkmate! {} wins.", side.opponent());
    } else if position.is_stalemate(side) {
        println!("Stalemate.");
    } else {
        println!("Stopped after {plies} plies.");
    }
}
