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
use log::info;
use riff_checkers::{Board, Session};
use std::io::{self, Write};

const BANNER: &str = "\
Welcome to Riff Checkers (text mode).
Numbering: playable squares are labeled 1..32 on the board.
Player 1 (b) starts at the top and moves down. Player 2 (w) starts at the bottom and moves up.
Notation: 12-16 simple move, 12x19 capture (you may chain captures: 12x19x28).";

fn main() -> Result<()> {
    env_logger::init();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", BANNER)?;
    let result = Session::new(Board::standard(), stdin.lock(), &mut stdout).run()?;
    info!("game finished: {:?}", result);
    writeln!(stdout, "Goodbye.")?;
    Ok(())
}
