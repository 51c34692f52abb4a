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
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::captures::{CaptureSequence, Captures};
use super::material::Player;
use super::moves::{LegalMoves, Move, MoveError};
use super::notation::MoveRequest;
use super::position::{Pos, Position};
use super::Turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    AwaitingMove(Player),
    GameOver { winner: Player },
}

impl GameStatus {
    #[inline]
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::GameOver { winner } => Some(*winner),
            GameStatus::AwaitingMove(_) => None,
        }
    }
}

/// Owns the position and decides whose move it is, whether a capture is
/// forced, and when the game is over.
#[derive(Debug, Clone)]
pub struct PlayState {
    position: Position,
    status: GameStatus,
}

impl Default for PlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayState {
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// Starts play from an arbitrary position. A side with no pieces left
    /// has already lost.
    pub fn from_position(position: Position) -> Self {
        let player = position.turn();
        let status = if position.has_won(!player) {
            GameStatus::GameOver { winner: !player }
        } else if position.has_won(player) {
            GameStatus::GameOver { winner: player }
        } else {
            GameStatus::AwaitingMove(player)
        };
        Self { position, status }
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True when the side to move has a capture and so may not make a
    /// simple move.
    pub fn capture_required(&self) -> bool {
        match self.status {
            GameStatus::AwaitingMove(player) => self.any_capture_exists(player),
            GameStatus::GameOver { .. } => false,
        }
    }

    pub fn submit(&mut self, request: &MoveRequest) -> Result<GameStatus> {
        let result = match request.to_move() {
            Some(mv) => self.submit_move(mv),
            None => self.submit_captures(&request.to_capture_sequence().unwrap_or_default()),
        };
        if let Err(err) = &result {
            warn!("{} rejected: {}", request, err);
        }
        result
    }

    pub fn submit_move(&mut self, mv: Move) -> Result<GameStatus> {
        let player = self.awaiting()?;
        if self.any_capture_exists(player) {
            debug!("{} must capture, {} refused", player, mv);
            return Err(MoveError::CaptureRequired.into());
        }
        let was_king = self.position.is_king(player, mv.from);
        let placed = self.position.apply_simple_move(player, mv)?;
        info!("{} plays {}", player, mv);
        if placed.is_king() && !was_king {
            debug!("{} crowned on {}", player, mv);
        }
        Ok(self.complete_turn(player))
    }

    /// Validates every hop of `sequence` against the board before it is
    /// touched, then commits the chain.
    pub fn submit_captures(&mut self, sequence: &CaptureSequence) -> Result<GameStatus> {
        let player = self.awaiting()?;
        self.position.validate_captures(player, sequence)?;
        let was_king = sequence
            .start()
            .map_or(false, |start| self.position.is_king(player, start));
        let placed = self.position.apply_capture_sequence(player, sequence)?;
        info!("{} captures {}", player, sequence);
        if placed.is_king() && !was_king {
            debug!("{} crowned by {}", player, sequence);
        }
        Ok(self.complete_turn(player))
    }

    fn awaiting(&self) -> Result<Player> {
        match self.status {
            GameStatus::AwaitingMove(player) => Ok(player),
            GameStatus::GameOver { .. } => Err(MoveError::GameOver.into()),
        }
    }

    fn complete_turn(&mut self, player: Player) -> GameStatus {
        self.status = if self.position.has_won(player) {
            info!("{} wins", player);
            GameStatus::GameOver { winner: player }
        } else {
            self.position.set_turn(!player);
            GameStatus::AwaitingMove(!player)
        };
        self.status
    }
}

impl Turn for PlayState {
    fn turn(&self) -> Player {
        let pos: &Position = self.as_ref();
        pos.turn()
    }
}

impl AsRef<Position> for PlayState {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl Pos for PlayState {}

impl LegalMoves for PlayState {}

impl Captures for PlayState {}

#[cfg(test)]
mod tests {
    use crate::*;

    fn sq(n: u32) -> Square {
        Square::from_number(n)
    }

    fn request(s: &str) -> MoveRequest {
        MoveRequest::parse(s).unwrap()
    }

    fn error_of<T: std::fmt::Debug>(result: anyhow::Result<T>) -> MoveError {
        *result.unwrap_err().downcast_ref::<MoveError>().unwrap()
    }

    fn position_of(state: &PlayState) -> Position {
        let pos: &Position = state.as_ref();
        *pos
    }

    fn position(pieces: &[(u32, Material)]) -> Position {
        pieces
            .iter()
            .fold(Position::empty(Player::One), |pos, (n, material)| {
                pos.set_contents(sq(*n), Some(*material))
            })
    }

    #[test]
    fn test_opening_move() {
        let mut state = PlayState::new();
        assert_eq!(state.status(), GameStatus::AwaitingMove(Player::One));
        let status = state.submit(&request("12-16")).unwrap();
        assert_eq!(status, GameStatus::AwaitingMove(Player::Two));
        assert_eq!(state.turn(), Player::Two);
        assert_eq!(state.contents(sq(12)), None);
        assert_eq!(state.contents(sq(16)), Some(Material::ONE_MAN));
        position_of(&state).assert_invariants();
    }

    #[test]
    fn test_turns_alternate() {
        let mut state = PlayState::new();
        state.submit(&request("12-16")).unwrap();
        // 16 belongs to Player One and it is Player Two's move
        assert_eq!(
            error_of(state.submit(&request("16-20"))),
            MoveError::NotYourPiece
        );
        state.submit(&request("21-17")).unwrap();
        assert_eq!(state.status(), GameStatus::AwaitingMove(Player::One));
        position_of(&state).assert_invariants();
    }

    #[test]
    fn test_not_your_piece() {
        let mut state = PlayState::new();
        assert_eq!(
            error_of(state.submit(&request("21-17"))),
            MoveError::NotYourPiece
        );
        assert_eq!(
            error_of(state.submit(&request("21x14"))),
            MoveError::NotYourPiece
        );
        assert_eq!(position_of(&state), Position::new());
    }

    #[test]
    fn test_single_capture_wins() {
        let mut state = PlayState::from_position(position(&[
            (10, Material::ONE_MAN),
            (14, Material::TWO_MAN),
        ]));
        let status = state.submit(&request("10x17")).unwrap();
        assert_eq!(status, GameStatus::GameOver { winner: Player::One });
        assert_eq!(state.contents(sq(14)), None);
        assert_eq!(state.contents(sq(17)), Some(Material::ONE_MAN));
        position_of(&state).assert_invariants();
    }

    #[test]
    fn test_blocked_capture_rejected() {
        let before = position(&[
            (10, Material::ONE_MAN),
            (14, Material::TWO_MAN),
            (17, Material::TWO_MAN),
        ]);
        let mut state = PlayState::from_position(before);
        assert_eq!(
            error_of(state.submit(&request("10x17"))),
            MoveError::Occupied
        );
        assert_eq!(position_of(&state), before);
        assert_eq!(state.status(), GameStatus::AwaitingMove(Player::One));
    }

    #[test]
    fn test_chain_capture() {
        let mut state = PlayState::from_position(position(&[
            (10, Material::ONE_MAN),
            (14, Material::TWO_MAN),
            (22, Material::TWO_MAN),
            (29, Material::TWO_MAN),
        ]));
        let status = state.submit(&request("10x17x26")).unwrap();
        assert_eq!(status, GameStatus::AwaitingMove(Player::Two));
        assert_eq!(state.contents(sq(26)), Some(Material::ONE_MAN));
        assert_eq!(state.pieces(Player::Two).len(), 1);
        position_of(&state).assert_invariants();
    }

    #[test]
    fn test_partial_chain_accepted() {
        let mut state = PlayState::from_position(position(&[
            (10, Material::ONE_MAN),
            (14, Material::TWO_MAN),
            (22, Material::TWO_MAN),
        ]));
        let status = state.submit(&request("10x17")).unwrap();
        assert_eq!(status, GameStatus::AwaitingMove(Player::Two));
        assert_eq!(state.contents(sq(22)), Some(Material::TWO_MAN));
        position_of(&state).assert_invariants();
    }

    #[test]
    fn test_chain_capture_promotes_and_wins() {
        let mut state = PlayState::from_position(position(&[
            (14, Material::ONE_MAN),
            (18, Material::TWO_MAN),
            (27, Material::TWO_MAN),
        ]));
        let status = state.submit(&request("14x23x32")).unwrap();
        assert_eq!(status, GameStatus::GameOver { winner: Player::One });
        assert_eq!(state.contents(sq(32)), Some(Material::ONE_KING));
        position_of(&state).assert_invariants();
    }

    #[test]
    fn test_capture_is_mandatory() {
        let mut state = PlayState::from_position(position(&[
            (1, Material::ONE_MAN),
            (10, Material::ONE_MAN),
            (14, Material::TWO_MAN),
            (32, Material::TWO_MAN),
        ]));
        assert!(state.capture_required());
        assert_eq!(
            error_of(state.submit(&request("1-5"))),
            MoveError::CaptureRequired
        );
        assert_eq!(
            error_of(state.submit(&request("10-15"))),
            MoveError::CaptureRequired
        );
        state.submit(&request("10x17")).unwrap();
        assert!(!state.capture_required());
        position_of(&state).assert_invariants();
    }

    #[test]
    fn test_empty_capture_request() {
        let mut state = PlayState::new();
        assert_eq!(
            error_of(state.submit(&MoveRequest::Captures(Vec::new()))),
            MoveError::NoHops
        );
        assert_eq!(
            error_of(state.submit_captures(&CaptureSequence::default())),
            MoveError::NoHops
        );
        assert_eq!(position_of(&state), Position::new());
        assert_eq!(state.status(), GameStatus::AwaitingMove(Player::One));
    }

    #[test]
    fn test_invariants_hold_through_a_game() {
        // an exchange of two men each
        let mut state = PlayState::new();
        for (i, notation) in [
            "11-15", "22-18", "15x22", "25x18", "12-16", "18-14", "9x18", "23x14",
        ]
        .iter()
        .enumerate()
        {
            state
                .submit(&request(notation))
                .unwrap_or_else(|err| panic!("move {} ({}): {}", i, notation, err));
            position_of(&state).assert_invariants();
        }
        assert_eq!(state.pieces(Player::One).len(), 10);
        assert_eq!(state.pieces(Player::Two).len(), 10);
        assert_eq!(state.status(), GameStatus::AwaitingMove(Player::One));
    }

    #[test]
    fn test_game_over_rejects_requests() {
        let mut state = PlayState::from_position(position(&[
            (10, Material::ONE_MAN),
            (14, Material::TWO_MAN),
        ]));
        state.submit(&request("10x17")).unwrap();
        assert_eq!(
            error_of(state.submit(&request("17-21"))),
            MoveError::GameOver
        );
        assert_eq!(
            error_of(state.submit(&request("17x26"))),
            MoveError::GameOver
        );
        assert!(!state.capture_required());
    }

    #[test]
    fn test_from_finished_position() {
        let state = PlayState::from_position(position(&[(5, Material::ONE_KING)]));
        assert!(state.status().is_over());
        assert_eq!(state.status().winner(), Some(Player::One));
        let state = PlayState::from_position(
            position(&[(5, Material::TWO_MAN)]).with_turn(Player::Two),
        );
        assert_eq!(state.status(), GameStatus::GameOver { winner: Player::Two });
    }

    #[test]
    fn test_illegal_simple_move_keeps_turn() {
        let mut state = PlayState::new();
        assert_eq!(
            error_of(state.submit(&request("12-20"))),
            MoveError::NotDiagonal
        );
        assert_eq!(
            error_of(state.submit(&request("8-12"))),
            MoveError::Occupied
        );
        assert_eq!(state.status(), GameStatus::AwaitingMove(Player::One));
        assert_eq!(position_of(&state), Position::new());
    }
}
