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

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

use super::material::Player;
use super::moves::{Hop, LegalMoves, MoveError};
use super::position::{Pos, Position};
use super::square::{Direction, Offset, Square};

/// A chain of jumps by one piece: the start square followed by one
/// landing square per hop. An empty or single-square chain has no hops
/// and is rejected wherever a capture is expected.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default)]
pub struct CaptureSequence {
    squares: Vec<Square>,
}

impl CaptureSequence {
    pub fn new(squares: Vec<Square>) -> Self {
        Self { squares }
    }

    #[inline]
    pub fn start(&self) -> Option<Square> {
        self.squares.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<Square> {
        self.squares.last().copied()
    }

    #[inline]
    pub fn landings(&self) -> &[Square] {
        self.squares.get(1..).unwrap_or_default()
    }

    #[inline]
    pub fn hop_count(&self) -> usize {
        self.squares.len().saturating_sub(1)
    }

    fn push(&mut self, square: Square) {
        self.squares.push(square);
    }

    fn pop(&mut self) {
        self.squares.pop();
    }
}

impl fmt::Display for CaptureSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, square) in self.squares.iter().enumerate() {
            if i > 0 {
                write!(f, "x")?;
            }
            match square.number() {
                Some(number) => write!(f, "{}", number)?,
                None => write!(f, "{}", square)?,
            }
        }
        Ok(())
    }
}

/// Plays one hop on a copy of the board: the mover is relocated, the
/// jumped piece removed, and a man landing on its back rank crowned.
pub fn simulate_hop(pos: &Position, hop: Hop) -> Position {
    let mut next = *pos;
    if let Some(material) = next.remove(hop.from) {
        next.remove(hop.over);
        next.place(hop.to, material.landing_on(hop.to));
    }
    next
}

/// Exhaustive search for capture chains.
pub trait Captures: AsRef<Position> {
    /// Every capture chain available to `player`, one search per piece.
    fn all_captures(&self, player: Player) -> Vec<CaptureSequence> {
        let pos: &Position = self.as_ref();
        let mut results = Vec::new();
        for from in pos.pieces(player).iter() {
            collect_chains(pos, player, from, &mut CaptureSequence::new(vec![from]), &mut results);
        }
        debug!("{} capture chain(s) for {}", results.len(), player);
        results
    }

    /// Capture chains starting from the piece on `from`.
    fn captures_from(&self, player: Player, from: Square) -> Vec<CaptureSequence> {
        let pos: &Position = self.as_ref();
        let mut results = Vec::new();
        if pos.owner(from) == Some(player) {
            collect_chains(pos, player, from, &mut CaptureSequence::new(vec![from]), &mut results);
        }
        results
    }

    /// True when `player` has at least one capture. Any legal opening hop
    /// ends in at least one recorded chain, so the search stops there.
    fn any_capture_exists(&self, player: Player) -> bool {
        let pos: &Position = self.as_ref();
        pos.pieces(player)
            .iter()
            .any(|from| legal_hops(pos, player, from).next().is_some())
    }

    /// Checks a requested chain hop by hop, each hop against the board
    /// left by the hops before it.
    fn validate_captures(&self, player: Player, sequence: &CaptureSequence) -> Result<()> {
        let pos: &Position = self.as_ref();
        let start = match sequence.start() {
            Some(start) if sequence.hop_count() > 0 => start,
            _ => return Err(MoveError::NoHops.into()),
        };
        if pos.owner(start) != Some(player) {
            return Err(MoveError::NotYourPiece.into());
        }
        let mut board = *pos;
        let mut current = start;
        for &landing in sequence.landings() {
            let hop = Hop::between(current, landing).ok_or(MoveError::NotAJump)?;
            board.validate_hop(player, hop)?;
            board = simulate_hop(&board, hop);
            current = landing;
        }
        Ok(())
    }
}

impl Captures for Position {}

fn legal_hops(pos: &Position, player: Player, from: Square) -> impl Iterator<Item = Hop> + '_ {
    Direction::iter().filter_map(move |dir| {
        let step: Offset = dir.into();
        let over = (from + step)?;
        let to = (from + step.scale(2))?;
        let hop = Hop::new(from, over, to);
        pos.is_capture_hop_legal(player, hop).then_some(hop)
    })
}

// Each branch recurses on its own copy of the board. A chain is recorded
// at every dead end, so shorter alternatives are kept alongside longer ones.
fn collect_chains(
    pos: &Position,
    player: Player,
    from: Square,
    chain: &mut CaptureSequence,
    results: &mut Vec<CaptureSequence>,
) {
    let mut found = false;
    for hop in legal_hops(pos, player, from) {
        found = true;
        let next = simulate_hop(pos, hop);
        chain.push(hop.to);
        collect_chains(&next, player, hop.to, chain, results);
        chain.pop();
    }
    if !found && chain.hop_count() > 0 {
        results.push(chain.clone());
    }
}
