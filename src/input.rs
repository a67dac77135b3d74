//! Discrete per-tick input events
//!
//! The input adapter translates raw terminal keys into this vocabulary;
//! each core picks out the events it understands and ignores the rest.

use serde::{Deserialize, Serialize};

/// Four-way movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row/column delta for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// All four directions, indexable for uniform random picks.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// One discrete input event.
///
/// A tick carries a finite batch of these; the batch may be empty on
/// ticks where the player did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Directional movement (arrows or WASD)
    Move(Direction),
    /// A digit key, 0-9
    Digit(u8),
    /// Enter
    Confirm,
    /// Backspace
    Backspace,
    /// Return-to-menu request (Esc or M)
    Menu,
    /// Pointer click translated to game-space column/row by the adapter
    Click { col: u8, row: u8 },
    /// Any other key press (used to dismiss prompts)
    Press,
}
