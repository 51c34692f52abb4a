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
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

use crate::{Board, GameStatus, Notation, Player, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win(Player),
    Quit,
    EndOfInput,
}

/// A text-mode game between two players sharing one input stream.
pub struct Session<R, W> {
    board: Board,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(board: Board, input: R, output: W) -> Self {
        Self {
            board,
            input,
            output,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays until someone wins, a player quits, or the input runs out.
    /// Only a failure to write the output is returned as an error.
    pub fn run(&mut self) -> Result<GameResult> {
        loop {
            if let Some(winner) = self.board.status().winner() {
                return Ok(GameResult::Win(winner));
            }
            writeln!(self.output, "{}", self.board)?;
            if let Some(result) = self.play_turn()? {
                info!("session ended: {:?}", result);
                return Ok(result);
            }
        }
    }

    // Prompts until the side to move makes a legal move. Returns a result
    // when the session is over.
    fn play_turn(&mut self) -> Result<Option<GameResult>> {
        loop {
            self.prompt()?;
            let line = match self.read_line() {
                Some(line) => line,
                None => {
                    writeln!(self.output)?;
                    return Ok(Some(GameResult::EndOfInput));
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let request = match Notation::parse(&line) {
                Ok(Notation::Quit) => return Ok(Some(GameResult::Quit)),
                Ok(Notation::Move(request)) => request,
                Err(err) => {
                    debug!("unreadable input {:?}: {}", line.trim(), err);
                    writeln!(self.output, "Invalid move or format: {}. Try again.", err)?;
                    continue;
                }
            };
            match self.board.submit_request(&request) {
                Ok(GameStatus::GameOver { winner }) => {
                    writeln!(self.output, "{}", self.board)?;
                    writeln!(self.output, "{} wins! Congratulations.", winner)?;
                    return Ok(Some(GameResult::Win(winner)));
                }
                Ok(GameStatus::AwaitingMove(_)) => return Ok(None),
                Err(err) => {
                    writeln!(self.output, "Invalid move {}: {}. Try again.", request, err)?;
                }
            }
        }
    }

    fn prompt(&mut self) -> Result<()> {
        let player = self.board.turn();
        let direction = match player {
            Player::One => "b, moves down",
            Player::Two => "w, moves up",
        };
        write!(self.output, "{}'s turn ({}). ", player, direction)?;
        if self.board.capture_required() {
            write!(self.output, "Capture available! ")?;
        }
        write!(
            self.output,
            "Enter move (e.g. 12-16 or 12x19x28), or 'q' to quit: "
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(err) => {
                warn!("failed to read input: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    fn play(board: Board, input: &str) -> (GameResult, Position, String) {
        let mut output = Vec::new();
        let mut session = Session::new(board, input.as_bytes(), &mut output);
        let result = session.run().unwrap();
        let pos: &Position = session.board().as_ref();
        let position = *pos;
        drop(session);
        (result, position, String::from_utf8(output).unwrap())
    }

    fn sq(n: u32) -> Square {
        Square::from_number(n)
    }

    #[test]
    fn test_quit() {
        let (result, position, output) = play(Board::standard(), "q\n");
        assert_eq!(result, GameResult::Quit);
        assert_eq!(position, Position::new());
        assert!(output.contains("Player 1's turn (b, moves down)."));
        assert!(output.contains("Enter move (e.g. 12-16 or 12x19x28), or 'q' to quit: "));
        assert!(!output.contains("Capture available!"));
    }

    #[test]
    fn test_end_of_input() {
        let (result, _, output) = play(Board::standard(), "");
        assert_eq!(result, GameResult::EndOfInput);
        assert_eq!(output.matches("Enter move").count(), 1);
    }

    #[test]
    fn test_moves_alternate() {
        let (result, position, output) = play(Board::standard(), "12-16\n21 17\n");
        assert_eq!(result, GameResult::EndOfInput);
        assert_eq!(position.contents(sq(16)), Some(Material::ONE_MAN));
        assert_eq!(position.contents(sq(17)), Some(Material::TWO_MAN));
        assert_eq!(position.turn(), Player::One);
        assert!(output.contains("Player 2's turn (w, moves up)."));
        // one rendering per turn
        assert_eq!(output.matches(" 8 |").count(), 3);
    }

    #[test]
    fn test_empty_line_prompts_again() {
        let (result, _, output) = play(Board::standard(), "\n   \nq\n");
        assert_eq!(result, GameResult::Quit);
        assert_eq!(output.matches("Enter move").count(), 3);
        assert_eq!(output.matches(" 8 |").count(), 1);
    }

    #[test]
    fn test_errors_prompt_again() {
        let (result, position, output) = play(Board::standard(), "hello\n12-20\n0-4\nq\n");
        assert_eq!(result, GameResult::Quit);
        assert_eq!(position, Position::new());
        assert_eq!(output.matches("Try again.").count(), 3);
        assert!(output.contains("Invalid move 12-20: Squares are not diagonally adjacent."));
        assert!(output.contains("Square 0 is not between 1 and 32"));
        assert_eq!(output.matches("Player 1's turn").count(), 4);
    }

    #[test]
    fn test_capture_announced_and_game_won() {
        let board = Board::from_position(
            Position::empty(Player::One)
                .set_contents(sq(10), Some(Material::ONE_MAN))
                .set_contents(sq(14), Some(Material::TWO_MAN)),
        );
        let (result, position, output) = play(board, "9-13\n10x17\n");
        assert_eq!(result, GameResult::Win(Player::One));
        assert_eq!(position.contents(sq(17)), Some(Material::ONE_MAN));
        assert!(output.contains("Capture available!"));
        assert!(output.contains("A capture is available and must be taken"));
        assert!(output.ends_with("Player 1 wins! Congratulations.\n"));
    }

    #[test]
    fn test_finished_position() {
        let board = Board::from_position(
            Position::empty(Player::Two).set_contents(sq(3), Some(Material::ONE_KING)),
        );
        let (result, _, output) = play(board, "q\n");
        assert_eq!(result, GameResult::Win(Player::One));
        assert!(output.is_empty());
    }
}
