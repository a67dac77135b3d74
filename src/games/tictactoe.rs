//! Tic-Tac-Toe (2-player)
//!
//! Both sides are human; the core only enforces the rules. Cells are
//! numbered 1-9 in keypad order (7-8-9 across the top row on screen),
//! so digit `d` maps to cell index `d - 1`.

use serde::{Deserialize, Serialize};

use super::{GameFlow, MoveFeedback};
use crate::input::InputEvent;
use crate::results::ResultSink;

/// Result-file key.
pub const RESULT_KEY: &str = "tictactoe_results";

/// The eight winning triples, by cell index.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    XWins,
    OWins,
    Draw,
}

/// Full game state; everything the renderer needs is public.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicTacToe {
    pub board: [Cell; 9],
    pub current: Player,
    pub outcome: Outcome,
    pub moves: u32,
    pub feedback: MoveFeedback,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            board: [Cell::Empty; 9],
            current: Player::X,
            outcome: Outcome::InProgress,
            moves: 0,
            feedback: MoveFeedback::None,
        }
    }

    /// Advance one tick with this tick's events.
    pub fn update(&mut self, events: &[InputEvent], sink: &mut dyn ResultSink) -> GameFlow {
        self.feedback = MoveFeedback::None;
        for &event in events {
            match event {
                InputEvent::Digit(d @ 1..=9) => self.place(d as usize - 1, sink),
                InputEvent::Digit(_) => self.feedback = MoveFeedback::OutOfRange,
                InputEvent::Click { col, row } => {
                    if col < 3 && row < 3 {
                        self.place(row as usize * 3 + col as usize, sink);
                    } else {
                        self.feedback = MoveFeedback::OutOfRange;
                    }
                }
                InputEvent::Confirm | InputEvent::Press
                    if self.outcome != Outcome::InProgress =>
                {
                    return GameFlow::ReturnToMenu;
                }
                _ => {}
            }
        }
        GameFlow::Continue
    }

    /// Attempt a placement for the current player.
    fn place(&mut self, idx: usize, sink: &mut dyn ResultSink) {
        if self.outcome != Outcome::InProgress {
            self.feedback = MoveFeedback::Finished;
            return;
        }
        if self.board[idx] != Cell::Empty {
            self.feedback = MoveFeedback::Occupied;
            return;
        }

        self.board[idx] = self.current.cell();
        self.moves += 1;

        if self.wins(self.current) {
            self.outcome = match self.current {
                Player::X => Outcome::XWins,
                Player::O => Outcome::OWins,
            };
            log::info!("Tic-Tac-Toe: player {} wins", self.current.as_str());
            sink.append(
                RESULT_KEY,
                &format!("Player {} won in {} moves", self.current.as_str(), self.moves),
            );
        } else if self.moves == 9 {
            self.outcome = Outcome::Draw;
            log::info!("Tic-Tac-Toe: draw");
            sink.append(RESULT_KEY, "Draw");
        } else {
            self.current = self.current.other();
        }
    }

    /// Does `player` hold one of the eight triples?
    fn wins(&self, player: Player) -> bool {
        let mark = player.cell();
        WIN_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.board[i] == mark))
    }
}
