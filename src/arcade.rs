//! Arcade mode state machine
//!
//! Owns "which game is active", dispatches each tick's input batch to
//! the active core, and hands the renderer a read-only snapshot. Games
//! never see each other; re-entering a game always constructs it fresh
//! with a forked sub-seed.

use serde::{Deserialize, Serialize};

use crate::games::{
    BreakTheCode, GameFlow, SpaceSurvivor, SwapCards, TicTacToe, ZombieEscape,
};
use crate::input::{Direction, InputEvent};
use crate::results::ResultSink;
use crate::rng::ArcadeRng;
use crate::settings::{ArcadeConfig, ConfigError};

/// Menu entries, in selection order (digits 1-6).
pub const MENU_ENTRIES: [&str; 6] = [
    "Tic-Tac-Toe",
    "Space Survivor",
    "Break The Code",
    "Escape Zombie Land",
    "Swap Cards",
    "Exit Arcade",
];

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcadeMode {
    Menu,
    TicTacToe,
    SpaceSurvivor,
    BreakTheCode,
    ZombieEscape,
    SwapCards,
}

/// The active game core; exactly one exists outside the menu.
enum ActiveGame {
    TicTacToe(TicTacToe),
    SpaceSurvivor(SpaceSurvivor),
    BreakTheCode(BreakTheCode),
    ZombieEscape(ZombieEscape),
    SwapCards(SwapCards),
}

/// What the driving loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// The menu's exit entry was selected
    Exit,
}

/// Read-only view of the active core for the renderer.
pub enum Snapshot<'a> {
    Menu { cursor: usize },
    TicTacToe(&'a TicTacToe),
    SpaceSurvivor(&'a SpaceSurvivor),
    BreakTheCode(&'a BreakTheCode),
    ZombieEscape(&'a ZombieEscape),
    SwapCards(&'a SwapCards),
}

/// Drawing surface contract: consumes a snapshot, never mutates state.
pub trait RenderAdapter {
    fn draw(&mut self, snapshot: &Snapshot);
}

/// The arcade itself.
pub struct Arcade {
    config: ArcadeConfig,
    rng: ArcadeRng,
    sink: Box<dyn ResultSink>,
    active: Option<ActiveGame>,
    menu_cursor: usize,
}

impl Arcade {
    /// Build the arcade. Fails fast on a degenerate configuration; no
    /// game is allowed to start from one.
    pub fn new(
        config: ArcadeConfig,
        sink: Box<dyn ResultSink>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("Arcade ready (seed {seed})");
        Ok(Self {
            config,
            rng: ArcadeRng::new(seed),
            sink,
            active: None,
            menu_cursor: 0,
        })
    }

    /// Current mode.
    pub fn mode(&self) -> ArcadeMode {
        match &self.active {
            None => ArcadeMode::Menu,
            Some(ActiveGame::TicTacToe(_)) => ArcadeMode::TicTacToe,
            Some(ActiveGame::SpaceSurvivor(_)) => ArcadeMode::SpaceSurvivor,
            Some(ActiveGame::BreakTheCode(_)) => ArcadeMode::BreakTheCode,
            Some(ActiveGame::ZombieEscape(_)) => ArcadeMode::ZombieEscape,
            Some(ActiveGame::SwapCards(_)) => ArcadeMode::SwapCards,
        }
    }

    /// Process one tick's input batch.
    ///
    /// A menu request is observed before any game logic runs this tick,
    /// so it can never race a partially applied update; outcomes a core
    /// reached on earlier ticks are already persisted by then.
    pub fn tick(&mut self, events: &[InputEvent]) -> TickOutcome {
        if events.iter().any(|e| matches!(e, InputEvent::Menu)) {
            if self.active.is_some() {
                log::info!("Returning to menu (game state discarded)");
                self.active = None;
                return TickOutcome::Running;
            }
            // Esc on the menu means leave the arcade
            return TickOutcome::Exit;
        }

        if let Some(game) = self.active.as_mut() {
            let flow = match game {
                ActiveGame::TicTacToe(g) => g.update(events, self.sink.as_mut()),
                ActiveGame::SpaceSurvivor(g) => g.update(events, self.sink.as_mut()),
                ActiveGame::BreakTheCode(g) => g.update(events, self.sink.as_mut()),
                ActiveGame::ZombieEscape(g) => g.update(events, self.sink.as_mut()),
                ActiveGame::SwapCards(g) => g.update(events, self.sink.as_mut()),
            };
            if flow == GameFlow::ReturnToMenu {
                self.active = None;
            }
            return TickOutcome::Running;
        }

        self.menu_tick(events)
    }

    /// Menu-mode input: cursor movement, digit shortcuts, confirm.
    fn menu_tick(&mut self, events: &[InputEvent]) -> TickOutcome {
        for &event in events {
            match event {
                InputEvent::Move(Direction::Up) => {
                    self.menu_cursor =
                        (self.menu_cursor + MENU_ENTRIES.len() - 1) % MENU_ENTRIES.len();
                }
                InputEvent::Move(Direction::Down) => {
                    self.menu_cursor = (self.menu_cursor + 1) % MENU_ENTRIES.len();
                }
                InputEvent::Digit(d @ 1..=6) => {
                    self.menu_cursor = d as usize - 1;
                    if self.select(self.menu_cursor) == TickOutcome::Exit {
                        return TickOutcome::Exit;
                    }
                }
                InputEvent::Confirm => {
                    if self.select(self.menu_cursor) == TickOutcome::Exit {
                        return TickOutcome::Exit;
                    }
                }
                _ => {}
            }
            // A selection swapped the active core; drop the rest of the
            // batch so stale menu input can't leak into the fresh game
            if self.active.is_some() {
                break;
            }
        }
        TickOutcome::Running
    }

    /// Activate a menu entry; each entry constructs its core fresh.
    fn select(&mut self, index: usize) -> TickOutcome {
        let game = match index {
            0 => ActiveGame::TicTacToe(TicTacToe::new()),
            1 => ActiveGame::SpaceSurvivor(SpaceSurvivor::new(&self.config, self.rng.fork())),
            2 => ActiveGame::BreakTheCode(BreakTheCode::new(&self.config, &mut self.rng)),
            3 => ActiveGame::ZombieEscape(ZombieEscape::new(&self.config, self.rng.fork())),
            4 => ActiveGame::SwapCards(SwapCards::new(&self.config, &mut self.rng)),
            _ => {
                log::info!("Exit selected");
                return TickOutcome::Exit;
            }
        };
        log::info!("Starting {}", MENU_ENTRIES[index]);
        self.active = Some(game);
        TickOutcome::Running
    }

    /// Read-only snapshot for the render adapter.
    pub fn snapshot(&self) -> Snapshot<'_> {
        match &self.active {
            None => Snapshot::Menu {
                cursor: self.menu_cursor,
            },
            Some(ActiveGame::TicTacToe(g)) => Snapshot::TicTacToe(g),
            Some(ActiveGame::SpaceSurvivor(g)) => Snapshot::SpaceSurvivor(g),
            Some(ActiveGame::BreakTheCode(g)) => Snapshot::BreakTheCode(g),
            Some(ActiveGame::ZombieEscape(g)) => Snapshot::ZombieEscape(g),
            Some(ActiveGame::SwapCards(g)) => Snapshot::SwapCards(g),
        }
    }
}
