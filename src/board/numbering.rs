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

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::square::Square;

/// The conventional 1..=32 name of a dark square, numbered row-major
/// starting from Player One's home row.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SquareNumber(u8);

impl SquareNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 32;

    #[inline]
    pub fn new(value: u32) -> Option<Self> {
        match value {
            1..=32 => Some(Self(value as u8)),
            _ => None,
        }
    }

    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn to_square(self) -> Square {
        SquareMap::get().to_square(self)
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = SquareNumber> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl fmt::Display for SquareNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Square {
    /// The playable number of this square, `None` for light squares.
    #[inline]
    pub fn number(&self) -> Option<SquareNumber> {
        SquareMap::get().to_number(*self)
    }

    /// Shorthand for building positions by playable number.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside 1..=32.
    pub fn from_number(value: u32) -> Self {
        SquareNumber::new(value)
            .expect("Square::from_number: square number out of range")
            .to_square()
    }
}

/// Bijection between the 32 playable numbers and the dark bit indices.
#[derive(Debug)]
pub struct SquareMap {
    squares: [Square; 32],
    numbers: [Option<SquareNumber>; 64],
}

static SQUARE_MAP: Lazy<SquareMap> = Lazy::new(SquareMap::build);

impl SquareMap {
    #[inline]
    pub fn get() -> &'static SquareMap {
        &SQUARE_MAP
    }

    fn build() -> Self {
        let mut squares = [Square::from_index(0); 32];
        let mut numbers = [None; 64];
        for (i, square) in Square::dark().enumerate() {
            let number = SquareNumber(i as u8 + 1);
            squares[i] = square;
            numbers[square.to_index()] = Some(number);
        }
        Self { squares, numbers }
    }

    #[inline]
    pub fn to_square(&self, number: SquareNumber) -> Square {
        self.squares[(number.0 - 1) as usize]
    }

    #[inline]
    pub fn to_number(&self, square: Square) -> Option<SquareNumber> {
        self.numbers[square.to_index()]
    }
}
