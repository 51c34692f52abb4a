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

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

use super::material::{Material, Pair, Piece, Player};
use super::square::{Mask, Square};
use super::Turn;

use Piece::*;
use Player::*;

// The four piece sets. A square belongs to at most one of them.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Masks {
    men: Pair<Mask>,
    kings: Pair<Mask>,
}

impl Masks {
    fn empty() -> Self {
        Self::default()
    }

    #[inline]
    fn pieces(&self, player: Player) -> Mask {
        self.men[player] | self.kings[player]
    }

    #[inline]
    fn occupied(&self) -> Mask {
        self.pieces(One) | self.pieces(Two)
    }

    fn set_for(&mut self, material: Material) -> &mut Mask {
        match material.piece() {
            Man => &mut self.men[material.player()],
            King => &mut self.kings[material.player()],
        }
    }

    fn clear(&mut self, square: Square) {
        for player in Player::iter() {
            self.men[player].reset(square);
            self.kings[player].reset(square);
        }
    }
}

/// A checkers position: who stands where, and whose turn it is.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    masks: Masks,
    turn: Player,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The opening position: twelve men per side on their home rows,
    /// Player One to move.
    pub fn new() -> Self {
        let mut position = Self::empty(One);
        for player in Player::iter() {
            let rows = player.home_rows();
            for square in Square::dark().filter(|square| rows.contains(&square.row())) {
                position.place(square, Material::new(player, Man));
            }
        }
        position
    }

    pub fn empty(turn: Player) -> Self {
        Self {
            masks: Masks::empty(),
            turn,
        }
    }

    #[inline]
    pub fn set_turn(&mut self, turn: Player) {
        self.turn = turn;
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.masks.occupied().contains(square)
    }

    #[inline]
    pub fn owner(&self, square: Square) -> Option<Player> {
        Player::iter().find(|player| self.masks.pieces(*player).contains(square))
    }

    #[inline]
    pub fn is_king(&self, player: Player, square: Square) -> bool {
        self.masks.kings[player].contains(square)
    }

    pub fn contents(&self, square: Square) -> Option<Material> {
        let player = self.owner(square)?;
        let piece = if self.is_king(player, square) { King } else { Man };
        Some(Material::new(player, piece))
    }

    /// Puts `material` on `square`, returning whatever stood there before.
    pub fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        debug_assert!(square.is_dark());
        let replaced = self.remove(square);
        *self.masks.set_for(material) |= square;
        replaced
    }

    /// Clears `square` from every piece set.
    pub fn remove(&mut self, square: Square) -> Option<Material> {
        let removed = self.contents(square);
        self.masks.clear(square);
        removed
    }

    /// Player `player` has won once the opponent has no men and no kings.
    #[inline]
    pub fn has_won(&self, player: Player) -> bool {
        self.masks.pieces(!player).is_empty()
    }

    /// Builder used to set up arbitrary positions.
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        match value {
            Some(material) => {
                self.place(square, material);
            }
            None => {
                self.remove(square);
            }
        }
        self
    }

    pub fn with_turn(mut self, turn: Player) -> Self {
        self.turn = turn;
        self
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Player {
        self.turn
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Pos for Position {}

/// Read-only views of a position, shared by everything that wraps one.
pub trait Pos: Turn + AsRef<Position> {
    #[inline]
    fn contents(&self, square: Square) -> Option<Material> {
        let pos: &Position = self.as_ref();
        pos.contents(square)
    }
    #[inline]
    fn men(&self, player: Player) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.men[player]
    }
    #[inline]
    fn kings(&self, player: Player) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.kings[player]
    }
    #[inline]
    fn pieces(&self, player: Player) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.pieces(player)
    }
    #[inline]
    fn occupied(&self) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.occupied()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   +------------------------+")?;
        for row in 0..8 {
            write!(f, " {} |", 8 - row)?;
            for col in 0..8 {
                let square = Square::new(row, col);
                match (self.contents(square), square.number()) {
                    (Some(material), _) => write!(f, " {} ", material.to_char())?,
                    (None, Some(number)) => write!(f, "{:>2} ", number)?,
                    (None, None) => write!(f, " . ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "   +------------------------+")?;
        writeln!(f, "     a  b  c  d  e  f  g  h")?;
        write!(
            f,
            "Player 1 (b): {} men, {} kings  Player 2 (w): {} men, {} kings  {} to move",
            self.men(One).len(),
            self.kings(One).len(),
            self.men(Two).len(),
            self.kings(Two).len(),
            self.turn,
        )
    }
}

#[cfg(test)]
impl Position {
    /// Panics unless the four piece sets are pairwise disjoint and only
    /// dark squares are occupied.
    pub(crate) fn assert_invariants(&self) {
        let sets = [
            self.masks.men[One],
            self.masks.kings[One],
            self.masks.men[Two],
            self.masks.kings[Two],
        ];
        for (i, a) in sets.iter().enumerate() {
            for b in sets.iter().skip(i + 1) {
                assert!((*a & *b).is_empty(), "overlapping piece sets in\n{}", self);
            }
        }
        for square in self.masks.occupied().iter() {
            assert!(square.is_dark(), "piece on light square {}", square);
        }
    }
}
