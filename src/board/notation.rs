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

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::captures::CaptureSequence;
use super::moves::Move;
use super::numbering::SquareNumber;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("Expected a move like 12-16 or a capture like 12x19x28")]
    Malformed,
    #[error("Square {0} is not between 1 and 32")]
    OutOfRange(String),
}
use NotationError::*;

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notation {
    Quit,
    Move(MoveRequest),
}

/// A move request in playable square numbers, not yet checked against
/// any position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    Simple {
        from: SquareNumber,
        to: SquareNumber,
    },
    Captures(Vec<SquareNumber>),
}

impl MoveRequest {
    /// Parses `12-16`, `12 16`, `12x19` or `12x19x28`.
    ///
    /// Two numbers joined by `-` or whitespace make a simple move. Any
    /// `x`/`X`, any other separator, or more than two numbers make a
    /// capture sequence. A `-` directly in front of a number that does
    /// not follow a digit is read as a sign, so `-9-13` names square -9.
    pub fn parse(s: &str) -> Result<Self, NotationError> {
        let s = s.trim();
        let (tokens, separators) = split_numbers(s).ok_or(Malformed)?;
        if tokens.len() < 2 {
            return Err(Malformed);
        }
        let numbers = tokens
            .iter()
            .map(|token| parse_number(token))
            .collect::<Result<Vec<_>, _>>()?;

        let is_capture = s.contains(['x', 'X']);
        if !is_capture && numbers.len() == 2 && separators.iter().all(|sep| is_simple_separator(sep)) {
            return Ok(MoveRequest::Simple {
                from: numbers[0],
                to: numbers[1],
            });
        }
        Ok(MoveRequest::Captures(numbers))
    }

    pub fn to_move(&self) -> Option<Move> {
        match self {
            MoveRequest::Simple { from, to } => Some(Move::new(from.to_square(), to.to_square())),
            MoveRequest::Captures(_) => None,
        }
    }

    pub fn to_capture_sequence(&self) -> Option<CaptureSequence> {
        match self {
            MoveRequest::Simple { .. } => None,
            MoveRequest::Captures(numbers) => Some(CaptureSequence::new(
                numbers.iter().map(|n| n.to_square()).collect(),
            )),
        }
    }
}

impl FromStr for MoveRequest {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRequest::Simple { from, to } => write!(f, "{}-{}", from, to),
            MoveRequest::Captures(numbers) => {
                for (i, number) in numbers.iter().enumerate() {
                    if i > 0 {
                        write!(f, "x")?;
                    }
                    write!(f, "{}", number)?;
                }
                Ok(())
            }
        }
    }
}

impl Notation {
    pub fn parse(s: &str) -> Result<Self, NotationError> {
        if s.trim() == "q" {
            return Ok(Notation::Quit);
        }
        MoveRequest::parse(s).map(Notation::Move)
    }
}

impl FromStr for Notation {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Splits `s` into its numbers and the text between them. A number may
// carry a leading `-` unless that `-` follows a digit. Returns `None` when
// any text comes before the first number or after the last one.
fn split_numbers(s: &str) -> Option<(Vec<&str>, Vec<&str>)> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut separators = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let signed = bytes[i] == b'-'
            && bytes.get(i + 1).map_or(false, u8::is_ascii_digit)
            && (i == 0 || !bytes[i - 1].is_ascii_digit());
        if !bytes[i].is_ascii_digit() && !signed {
            i += 1;
            continue;
        }
        if tokens.is_empty() {
            if i > 0 {
                return None;
            }
        } else {
            separators.push(&s[start..i]);
        }
        let mut end = i + 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        tokens.push(&s[i..end]);
        start = end;
        i = end;
    }
    if start < bytes.len() {
        return None;
    }
    Some((tokens, separators))
}

fn is_simple_separator(sep: &str) -> bool {
    let sep = sep.trim();
    sep.is_empty() || sep == "-"
}

fn parse_number(token: &str) -> Result<SquareNumber, NotationError> {
    token
        .parse::<u32>()
        .ok()
        .and_then(SquareNumber::new)
        .ok_or_else(|| OutOfRange(token.to_string()))
}
