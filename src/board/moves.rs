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

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::captures::CaptureSequence;
use super::material::{Material, Player};
use super::position::Position;
use super::square::{Offset, Square};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Destination square is occupied")]
    Occupied,
    #[error("Squares are not diagonally adjacent")]
    NotDiagonal,
    #[error("A man can only move forward")]
    WrongDirection,
    #[error("No piece of yours on the starting square")]
    NotYourPiece,
    #[error("No opponent piece to jump over")]
    NoOpponentToCapture,
    #[error("Landing square is not directly beyond the captured piece")]
    NotAJump,
    #[error("A capture is available and must be taken")]
    CaptureRequired,
    #[error("A capture sequence needs at least one hop")]
    NoHops,
    #[error("The game is over")]
    GameOver,
}
use MoveError::*;

/// A non-capturing step to an adjacent diagonal square.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.from.number(), self.to.number()) {
            (Some(from), Some(to)) => write!(f, "{}-{}", from, to),
            _ => write!(f, "{}-{}", self.from, self.to),
        }
    }
}

/// A single jump: from `from`, over `over`, onto `to`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    pub from: Square,
    pub over: Square,
    pub to: Square,
}

impl Hop {
    pub fn new(from: Square, over: Square, to: Square) -> Self {
        Self { from, over, to }
    }

    /// The hop between two landing squares, jumping their midpoint.
    /// `None` unless the squares are exactly two diagonal steps apart.
    pub fn between(from: Square, to: Square) -> Option<Self> {
        let offset = to - from;
        if offset.row.abs() != 2 || offset.col.abs() != 2 {
            return None;
        }
        let over = (from + Offset::new(offset.row / 2, offset.col / 2))?;
        Some(Self::new(from, over, to))
    }
}

/// Legality of single steps and single hops. Direction is judged from the
/// piece standing on the starting square: kings go any way, men forward.
pub trait LegalMoves: AsRef<Position> {
    fn validate_simple_move(&self, player: Player, mv: Move) -> Result<(), MoveError> {
        let pos: &Position = self.as_ref();
        if pos.is_occupied(mv.to) {
            return Err(Occupied);
        }
        let offset = mv.to - mv.from;
        if !offset.is_diagonal_step() {
            return Err(NotDiagonal);
        }
        check_direction(pos, player, mv.from, offset)
    }

    fn is_simple_move_legal(&self, player: Player, mv: Move) -> bool {
        self.validate_simple_move(player, mv).is_ok()
    }

    fn validate_hop(&self, player: Player, hop: Hop) -> Result<(), MoveError> {
        let pos: &Position = self.as_ref();
        if pos.owner(hop.over) != Some(!player) {
            return Err(NoOpponentToCapture);
        }
        if pos.is_occupied(hop.to) {
            return Err(Occupied);
        }
        let step = hop.over - hop.from;
        if !step.is_diagonal_step() {
            return Err(NotDiagonal);
        }
        if hop.to - hop.from != step.scale(2) {
            return Err(NotAJump);
        }
        check_direction(pos, player, hop.from, step)
    }

    fn is_capture_hop_legal(&self, player: Player, hop: Hop) -> bool {
        self.validate_hop(player, hop).is_ok()
    }
}

impl LegalMoves for Position {}

fn check_direction(
    pos: &Position,
    player: Player,
    from: Square,
    step: Offset,
) -> Result<(), MoveError> {
    if pos.is_king(player, from) || step.row == player.forward() {
        Ok(())
    } else {
        Err(WrongDirection)
    }
}

impl Position {
    /// Moves one of `player`'s pieces a single diagonal step, crowning
    /// a man that reaches the back rank. Returns the material placed.
    pub fn apply_simple_move(&mut self, player: Player, mv: Move) -> Result<Material> {
        let material = self.mover(player, mv.from)?;
        self.validate_simple_move(player, mv)?;
        self.remove(mv.from);
        let landed = material.landing_on(mv.to);
        self.place(mv.to, landed);
        Ok(landed)
    }

    /// Commits a whole capture chain. The hops are not re-validated here,
    /// only the start square is checked to hold one of `player`'s pieces.
    pub fn apply_capture_sequence(
        &mut self,
        player: Player,
        sequence: &CaptureSequence,
    ) -> Result<Material> {
        let start = match sequence.start() {
            Some(start) if sequence.hop_count() > 0 => start,
            _ => return Err(NoHops.into()),
        };
        let material = self.mover(player, start)?;
        self.remove(start);
        let mut current = start;
        for &landing in sequence.landings() {
            self.remove(midpoint(current, landing));
            current = landing;
        }
        // crowning is judged on the final landing only
        let landed = material.landing_on(current);
        self.place(current, landed);
        Ok(landed)
    }

    fn mover(&self, player: Player, from: Square) -> Result<Material> {
        match self.contents(from) {
            Some(material) if material.player() == player => Ok(material),
            _ => Err(NotYourPiece.into()),
        }
    }
}

fn midpoint(from: Square, to: Square) -> Square {
    Square::new((from.row() + to.row()) / 2, (from.col() + to.col()) / 2)
}
