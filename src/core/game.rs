use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, Color, ParseFenError};
use crate::utils::Square;

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Unfinished,
    WhiteWon,
    BlackWon,
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            GameStatus::Unfinished => "UNFINISHED",
            GameStatus::WhiteWon => "WHITE_WON",
            GameStatus::BlackWon => "BLACK_WON",
        })
    }
}

/** Single authority over board and turn state. Every mutation goes
 * through `make_move`; rejected moves leave the game untouched. */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    current_player: Color,
    status: GameStatus,
    history: Vec<(Square, Square)>,
}

impl Game {
    pub fn new() -> Game {
        Game::with_player(Default::default(), Color::White)
    }

    pub fn with_player(board: Board, player: Color) -> Game {
        let mut game = Game {
            board,
            current_player: player,
            status: GameStatus::Unfinished,
            history: Vec::new(),
        };
        // A handcrafted setup may already be missing a king.
        game.update_status();
        game
    }

    /** Piece placement and, optionally, side to move. Later FEN fields
     * are accepted and ignored. */
    pub fn from_fen(fen: &str) -> Result<Game, ParseFenError> {
        let mut fields = fen.split_whitespace();
        let board = Board::from_fen(fields.next().unwrap_or(""))?;
        let player = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(ParseFenError::SideToMove(other.to_string())),
        };
        Ok(Game::with_player(board, player))
    }

    /** Try to play a move for the side to move. Returns `false` for any
     * illegal or out-of-turn request without touching the board. */
    pub fn make_move(&mut self, start: Square, end: Square) -> bool {
        if self.status != GameStatus::Unfinished {
            debug!("Move {start} {end} rejected: game is over");
            return false;
        }
        if start == end {
            return false;
        }
        let piece = self.board.piece_at(start);
        if !piece.type_().is_valid() || piece.color() != self.current_player {
            return false;
        }
        if !piece.is_legal_move(start, end, &self.board) {
            return false;
        }

        // Capture is decided before the destination is overwritten.
        let capture = !self.board.is_empty(end);
        self.board.execute_move(start, end);
        if capture {
            self.board.explode(end);
        }
        self.current_player = self.current_player.opposite();
        self.update_status();
        self.history.push((start, end));
        true
    }

    fn update_status(&mut self) {
        // White is checked first: an explosion that removes both kings
        // at once is reported as a black win.
        if !self.board.king_alive(Color::White) {
            self.status = GameStatus::BlackWon;
        } else if !self.board.king_alive(Color::Black) {
            self.status = GameStatus::WhiteWon;
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.history.last().copied()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
