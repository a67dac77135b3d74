//! The five game cores
//!
//! Pure state + rules only: no rendering, no raw input, no wall clock.
//! Each core follows the same lifecycle: constructed fresh on entry
//! (`new`), advanced once per tick with that tick's input events
//! (`update`), and exposed read-only to the renderer via the arcade's
//! snapshot.

pub mod codebreaker;
pub mod memory;
pub mod space;
pub mod tictactoe;
pub mod zombie;

pub use codebreaker::BreakTheCode;
pub use memory::SwapCards;
pub use space::SpaceSurvivor;
pub use tictactoe::TicTacToe;
pub use zombie::ZombieEscape;

use serde::{Deserialize, Serialize};

/// What the arcade should do after a core's update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameFlow {
    /// Keep ticking this core
    Continue,
    /// Player dismissed a finished game; hand control back to the menu
    ReturnToMenu,
}

/// Advisory feedback about the most recent input.
///
/// Invalid moves never fail the tick; they leave state untouched and
/// set this field so the adapter can explain the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveFeedback {
    #[default]
    None,
    /// The cell or card is already taken/revealed
    Occupied,
    /// Selection index outside the board
    OutOfRange,
    /// Guess committed with fewer than the required digits
    TooShort,
    /// Two cards are face up awaiting resolution; input is held
    RevealWindow,
    /// The round is over; only dismiss/menu input is accepted
    Finished,
}
