use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/** Offsets to the eight surrounding cells of a 0x88 position */
const SURROUNDING: &[u8] = &[0x11, 0x10, 0x0f, 0x01, 0xff, 0xf1, 0xf0, 0xef];

#[inline]
pub fn is_valid_coord(coord: u8) -> bool {
    coord & 0x88 == 0x00
}

#[inline]
pub fn compact_pos(rank: u8, file: u8) -> u8 {
    rank << 4 | file
}

#[inline]
pub fn unpack_pos<T: From<u8>, V: Into<u8>>(pos: V) -> (T, T) {
    let pos: u8 = pos.into();
    (((pos & 0xf0) >> 4).into(), (pos & 0x0f).into())
}

#[derive(Debug)]
pub struct SurroundingIterator {
    position: u8,
    index: usize,
}

impl Iterator for SurroundingIterator {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = SURROUNDING.get(self.index) {
            self.index += 1;
            let neighbor = self.position.wrapping_add(*offset);
            if is_valid_coord(neighbor) {
                return Some(neighbor);
            }
        }
        None
    }
}

/** In-bounds neighbors of a position, the position itself excluded.
 * Off-board offsets are skipped, there is no wraparound. */
pub fn surrounding(position: u8) -> SurroundingIterator {
    SurroundingIterator { position, index: 0 }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("square must be two characters, got {0:?}")]
    Length(String),
    #[error("file must be in 'a'..='h', got {0:?}")]
    File(char),
    #[error("rank must be in '1'..='8', got {0:?}")]
    Rank(char),
}

/** Board coordinate in 0x88 form: `rank << 4 | file`.
 * Built either from algebraic notation ("a1".."h8") or from
 * rank/file indexes, so a constructed value is always on the board. */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    pub fn new(rank: u8, file: u8) -> Square {
        debug_assert!(rank < 8 && file < 8, "Square off the board!");
        Square(compact_pos(rank, file))
    }

    pub fn position(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> u8 {
        self.0 >> 4
    }

    pub fn file(self) -> u8 {
        self.0 & 0x0f
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError::Length(s.to_string()));
        };
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::File(file)),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseSquareError::Rank(rank)),
        };
        Ok(Square(compact_pos(rank, file)))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}
