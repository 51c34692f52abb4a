// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! Checkers board for two players on the standard 8-by-8 board
//!
//! A _board_ represents the state of a checkers game and enforces the
//! rules while two players alternate moves. The following features are
//! supported:
//!
//! [x] Men move one square diagonally forward, kings in any direction
//! [x] Single and multi-jump captures
//! [x] Mandatory capture
//! [x] Crowning on the opponent's back rank
//! [x] Win detection when a side has no pieces left
//! [x] Numbered square notation (`12-16`, `12x19x28`)
//! [ ] Stalemate (a side with pieces but no legal move)
//! [ ] Draw by repetition or move count
//! [ ] Take backs
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on the
//!   board, addressed by row (0 at the top) and column (0 at the left).
//!   Only the 32 dark squares are playable and each has a
//!   `SquareNumber` from 1 to 32, counted row by row from the top left.
//!   The `SquareMap` translates between the two.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Masks can be combined or modified using
//!   bitwise `|`, `|=`, `&`, `&=` and `!` operators. The `iter()` method
//!   provides an efficient double-ended iterator.
//!
//! * `Material` represents a piece of a specific player. A `Piece` is
//!   either a `Man` or a `King`. `Player::One` starts at the top and
//!   moves down the board, `Player::Two` starts at the bottom and moves up.
//!
//! * A `Position` holds four disjoint masks (men and kings for each
//!   player) and whose turn it is. `LegalMoves` answers whether a single
//!   step or a single hop is legal, `Captures` searches every capture
//!   chain a player has, and `apply_simple_move` and
//!   `apply_capture_sequence` update the masks.
//!
//! * `PlayState` owns the position during a game. It enforces mandatory
//!   capture, validates a requested chain hop by hop before applying it,
//!   and reports a `GameStatus` after each move. A `Board` wraps it and
//!   accepts moves in numbered notation.
//!

use anyhow::Result;
use std::fmt;

mod captures;
mod material;
mod moves;
mod notation;
mod numbering;
mod play;
mod position;
mod square;

pub use captures::*;
pub use material::*;
pub use moves::*;
pub use notation::*;
pub use numbering::*;
pub use play::*;
pub use position::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Player;
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    state: PlayState,
}

impl Board {
    pub fn standard() -> Self {
        Self {
            state: PlayState::new(),
        }
    }
    pub fn from_position(position: Position) -> Self {
        Self {
            state: PlayState::from_position(position),
        }
    }
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }
    pub fn capture_required(&self) -> bool {
        self.state.capture_required()
    }
    pub fn submit_request(&mut self, request: &MoveRequest) -> Result<GameStatus> {
        self.state.submit(request)
    }
    /// Parses and plays one move, e.g. `12-16` or `12x19x28`.
    pub fn submit_notation(&mut self, notation: &str) -> Result<GameStatus> {
        let request = MoveRequest::parse(notation)?;
        self.submit_request(&request)
    }
}

impl Turn for Board {
    #[inline]
    fn turn(&self) -> Player {
        self.state.turn()
    }
}

impl AsRef<Position> for Board {
    fn as_ref(&self) -> &Position {
        self.state.as_ref()
    }
}

impl Pos for Board {}

impl LegalMoves for Board {}

impl Captures for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos: &Position = self.as_ref();
        fmt::Display::fmt(pos, f)
    }
}
