use std::fmt::{Debug, Display};

use log::trace;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use thiserror::Error;

use crate::utils::{compact_pos, surrounding, Square};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseFenError {
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),
    #[error("rank {0} does not describe exactly 8 squares")]
    RankWidth(u8),
    #[error("invalid piece character {0:?}")]
    Piece(char),
    #[error("invalid side to move {0:?}")]
    SideToMove(String),
}

/** Variation of 0x88 board */
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde_as(as = "Bytes")]
    arr: [u8; 128],
}

impl Board {
    #[rustfmt::skip]
    pub fn new() -> Board {
        Board {
            arr: [
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            ]
        }
    }

    /** Build a board from the piece-placement field of a FEN string. */
    pub fn from_fen(placement: &str) -> Result<Board, ParseFenError> {
        let mut board = Board::new();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseFenError::RankCount(ranks.len()));
        }
        for (idx, rank_str) in ranks.iter().enumerate() {
            // FEN lists rank 8 first
            let rank = 7 - idx as u8;
            let mut file = 0u8;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as u8;
                } else {
                    let kind = PieceType::from_char(ch).ok_or(ParseFenError::Piece(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(ParseFenError::RankWidth(rank + 1));
                    }
                    board.arr[compact_pos(rank, file) as usize] = kind as u8 | color as u8;
                    file += 1;
                }
            }
            if file != 8 {
                return Err(ParseFenError::RankWidth(rank + 1));
            }
        }
        Ok(board)
    }

    pub fn inside(&self) -> &[u8; 128] {
        &self.arr
    }

    pub fn get(&self, rank: u8, file: u8) -> Piece {
        let position = compact_pos(rank, file);
        Piece::from_code(self.arr[position as usize], position)
    }

    pub fn piece_at(&self, square: Square) -> Piece {
        Piece::from_code(self.arr[square.position() as usize], square.position())
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.arr[square.position() as usize] == 0x00
    }

    /** Relocate a piece. Caller must have validated the move. */
    pub fn execute_move(&mut self, start: Square, end: Square) {
        let code = self.arr[start.position() as usize];
        debug_assert!(code != 0x00, "Trying to move an empty square!");
        self.arr[start.position() as usize] = 0x00;
        self.arr[end.position() as usize] = PieceFlag::Moved.set(code);
    }

    /** Clear the capture square and every in-bounds neighbor,
     * the capturing piece included. */
    pub fn explode(&mut self, center: Square) {
        trace!("Explosion at {center}!");
        for neighbor in surrounding(center.position()) {
            self.arr[neighbor as usize] = 0x00;
        }
        self.arr[center.position() as usize] = 0x00;
    }

    pub fn king_alive(&self, color: Color) -> bool {
        self.iter_pieces()
            .any(|piece| piece.type_() == PieceType::King && piece.color() == color)
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = u8> + 'a {
        ITER_INDEX.iter().map(|&i| self.arr[i])
    }

    pub fn iter_pieces<'a>(&'a self) -> impl Iterator<Item = Piece> + 'a {
        ITER_INDEX
            .iter()
            .map(|&i| Piece::from_code(self.arr[i], i as u8))
            .filter(|piece| piece.type_().is_valid())
    }
}

impl Default for Board {
    #[rustfmt::skip]
    fn default() -> Self {
        Board {
            arr: [
                0x04, 0x02, 0x03, 0x05, 0x06, 0x03, 0x02, 0x04, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x81, 0x81, 0x81, 0x81, 0x81, 0x81, 0x81, 0x81, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
                0x84, 0x82, 0x83, 0x85, 0x86, 0x83, 0x82, 0x84, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            ]
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in (0..8u8).rev() {
            write!(f, "{}", rank + 1)?;
            for file in 0..8u8 {
                write!(f, " {}", self.get(rank, file).as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

const ITER_INDEX: [usize; 64] = {
    let mut arr = [0; 64];
    let mut file = 0;
    let mut rank = 0;
    while file < 8 {
        arr[file * 8 + rank] = rank << 4 | file;
        if rank < 7 {
            rank += 1;
        } else {
            rank = 0;
            file += 1;
        }
    }
    arr
};

/** Bits structure of piece code
 * Bit 7 -- Color of the piece
 * - 1 -- Black
 * - 0 -- White
 * Bit 3 -- Piece has moved flag
 * Bits 2-0 Piece type
 * - 1 -- Pawn
 * - 2 -- Knight
 * - 3 -- Bishop
 * - 4 -- Rook
 * - 5 -- Queen
 * - 6 -- King
 * - 7 -- Not used
 * - 0 -- Empty Square */
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    code: u8,
    position: u8,
}

pub enum PieceFlag {
    /** Bit 3 -- Piece has moved flag */
    Moved = 0x08,
}

impl PieceFlag {
    pub fn is_set(self, code: u8) -> bool {
        code & self as u8 != 0
    }

    fn set(self, code: u8) -> u8 {
        code | self as u8
    }
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color, position: u8) -> Piece {
        Piece {
            code: piece_type as u8 | color as u8,
            position,
        }
    }

    pub fn from_code(code: u8, position: u8) -> Piece {
        Piece { code, position }
    }

    pub fn color(&self) -> Color {
        Color::from_byte(self.code)
    }

    pub fn type_(&self) -> PieceType {
        PieceType::from_byte(self.code)
    }

    pub fn position(&self) -> usize {
        self.position as usize
    }

    pub fn has_moved(&self) -> bool {
        PieceFlag::Moved.is_set(self.code)
    }

    /** Variant ruleset: kings may move but may never capture, every
     * other piece is trusted as-is. Shape rules per piece type belong
     * in this one predicate when a fuller ruleset is layered on. */
    pub fn is_legal_move(&self, start: Square, end: Square, board: &Board) -> bool {
        debug_assert!(
            start.position() as usize == self.position(),
            "Piece asked about someone else's move!"
        );
        match self.type_() {
            PieceType::King => board.is_empty(end),
            _ => true,
        }
    }

    pub fn as_char(&self) -> char {
        let ch = match self.type_() {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
            PieceType::Invalid | PieceType::EmptySquare => return '.',
        };
        match self.color() {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("code", &self.code)
            .field("position", &self.position)
            .field("color", &self.color())
            .field("type", &self.type_())
            .finish()
    }
}

#[derive(PartialEq, Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub enum Color {
    Black = 0x80,
    #[default]
    White = 0x00,
}

impl Color {
    #[inline]
    fn from_byte(byte: u8) -> Color {
        unsafe { std::mem::transmute(byte & 0x80) }
    }

    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        Color::from_byte(value)
    }
}

impl From<Color> for u8 {
    fn from(value: Color) -> Self {
        value as u8
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub enum PieceType {
    Pawn = 0x01,
    Knight = 0x02,
    Bishop = 0x03,
    Rook = 0x04,
    Queen = 0x05,
    King = 0x06,
    Invalid = 0x07,
    EmptySquare = 0x00,
}

impl PieceType {
    #[inline]
    fn from_byte(byte: u8) -> PieceType {
        unsafe { std::mem::transmute(byte & 0x07) }
    }

    fn from_char(ch: char) -> Option<PieceType> {
        Some(match ch.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        })
    }

    pub fn is_valid(&self) -> bool {
        matches!(
            self,
            Self::Pawn | Self::Knight | Self::Bishop | Self::Rook | Self::Queen | Self::King
        )
    }
}

impl From<u8> for PieceType {
    fn from(value: u8) -> Self {
        PieceType::from_byte(value)
    }
}

impl From<PieceType> for u8 {
    fn from(value: PieceType) -> Self {
        value as u8
    }
}
