// Copyright 2026 Tobin Edwards
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
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

use super::square::Square;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    player: Player,
    piece: Piece,
}

impl Material {
    pub const ONE_MAN: Self = Self {
        player: One,
        piece: Man,
    };
    pub const ONE_KING: Self = Self {
        player: One,
        piece: King,
    };
    pub const TWO_MAN: Self = Self {
        player: Two,
        piece: Man,
    };
    pub const TWO_KING: Self = Self {
        player: Two,
        piece: King,
    };

    #[inline]
    pub const fn new(player: Player, piece: Piece) -> Self {
        Self { player, piece }
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        self.piece.is_king()
    }

    /// The material after landing on `to`: a man reaching its player's
    /// back rank is crowned, a king stays a king.
    #[inline]
    pub fn landing_on(self, to: Square) -> Self {
        if self.piece == Man && self.player.is_back_rank(to.row()) {
            Self::new(self.player, King)
        } else {
            self
        }
    }

    /// Board glyph: `b`/`B` for Player One, `w`/`W` for Player Two.
    pub fn to_char(&self) -> char {
        match (self.player, self.piece) {
            (One, Man) => 'b',
            (One, King) => 'B',
            (Two, Man) => 'w',
            (Two, King) => 'W',
        }
    }
}

use Player::{One, Two};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Player {
    #[strum(serialize = "Player 1")]
    One,
    #[strum(serialize = "Player 2")]
    Two,
}

impl Player {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }

    /// Row delta of a man's forward step.
    #[inline]
    pub const fn forward(&self) -> isize {
        match self {
            One => 1,
            Two => -1,
        }
    }

    /// The row where this player's men are crowned.
    #[inline]
    pub const fn back_rank(&self) -> usize {
        match self {
            One => 7,
            Two => 0,
        }
    }

    #[inline]
    pub const fn is_back_rank(&self, row: usize) -> bool {
        self.back_rank() == row
    }

    /// Rows occupied by this player's men in the opening position.
    pub const fn home_rows(&self) -> [usize; 3] {
        match self {
            One => [0, 1, 2],
            Two => [5, 6, 7],
        }
    }
}

impl Not for Player {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            One => Two,
            Two => One,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(one: T, two: T) -> Self {
        Self((one, two))
    }
}

impl<T> Pair<T> {
    pub fn one(&self) -> &T {
        &self.0 .0
    }
    pub fn one_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn two(&self) -> &T {
        &self.0 .1
    }
    pub fn two_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T: Hash> Hash for Pair<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.one().hash(state);
        self.two().hash(state);
    }
}

impl<T> Index<Player> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Player) -> &Self::Output {
        match index {
            One => self.one(),
            Two => self.two(),
        }
    }
}

impl<T> IndexMut<Player> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Player) -> &mut Self::Output {
        match index {
            One => self.one_mut(),
            Two => self.two_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Man,
    King,
}
use Piece::{King, Man};

impl Piece {
    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
}
