use std::io::{self, BufRead};

use anyhow::Result;
use atomic_chess::{Game, GameStatus, Square};

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let mut game = Game::default();
    println!("{}", game.board());
    println!("{} to move. Enter moves like `e2 e4`.", game.current_player());
    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let (Some(from), Some(to)) = (words.next(), words.next()) else {
            if !line.trim().is_empty() {
                eprintln!("Enter two squares, like `e2 e4`.");
            }
            continue;
        };
        let (start, end) = match (from.parse::<Square>(), to.parse::<Square>()) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(error), _) | (_, Err(error)) => {
                eprintln!("Bad square: {error}");
                continue;
            }
        };
        if !game.make_move(start, end) {
            eprintln!("Illegal move: {start} {end}");
            continue;
        }
        println!("{}", game.board());
        match game.status() {
            GameStatus::Unfinished => println!("{} to move.", game.current_player()),
            status => {
                println!("{status}");
                break;
            }
        }
    }
    Ok(())
}
