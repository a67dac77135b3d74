//! Swap Cards (memory match)
//!
//! A shuffled deck of symbol pairs, selected two at a time. A mismatch
//! opens a reveal window: both cards stay face up for a fixed number of
//! ticks during which selection input is held, then flip back. The
//! window is a tick countdown, not a sleep, so the adapter stays in
//! control of real-time pacing.

use serde::{Deserialize, Serialize};

use super::{GameFlow, MoveFeedback};
use crate::input::InputEvent;
use crate::results::ResultSink;
use crate::rng::ArcadeRng;
use crate::settings::ArcadeConfig;

/// Result-file key.
pub const RESULT_KEY: &str = "swapcards_best_score";

/// Cards per display row.
pub const ROW_WIDTH: usize = 4;

/// One card slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Symbol id in `[0, pair_count)`; rendered as 'A' + id
    pub symbol: u8,
    pub revealed: bool,
    pub matched: bool,
}

/// Full game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapCards {
    pub cards: Vec<Card>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub pair_count: usize,
    /// First card of the pair being selected
    pub pending_first: Option<usize>,
    /// Ticks left of the mismatch reveal window; nonzero means two
    /// cards are face up awaiting resolution and selection is held
    pub reveal_ticks: u32,
    pub feedback: MoveFeedback,
    /// Digits typed toward a 1-based slot number
    pub entry: Vec<u8>,
    pub done: bool,
    window_ticks: u32,
    hide_pair: Option<(usize, usize)>,
}

impl SwapCards {
    pub fn new(config: &ArcadeConfig, rng: &mut ArcadeRng) -> Self {
        let pair_count = config.pair_count;
        let mut symbols: Vec<u8> = (0..pair_count as u8).flat_map(|s| [s, s]).collect();
        rng.shuffle(&mut symbols);
        let cards = symbols
            .into_iter()
            .map(|symbol| Card {
                symbol,
                revealed: false,
                matched: false,
            })
            .collect();
        Self {
            cards,
            moves: 0,
            matched_pairs: 0,
            pair_count,
            pending_first: None,
            reveal_ticks: 0,
            feedback: MoveFeedback::None,
            entry: Vec::new(),
            done: false,
            window_ticks: config.reveal_window_ticks,
            hide_pair: None,
        }
    }

    /// Total slot count.
    pub fn slot_count(&self) -> usize {
        self.cards.len()
    }

    /// Advance one tick: run the reveal-window countdown, then apply
    /// this tick's selections.
    pub fn update(&mut self, events: &[InputEvent], sink: &mut dyn ResultSink) -> GameFlow {
        self.feedback = MoveFeedback::None;

        if self.reveal_ticks > 0 {
            self.reveal_ticks -= 1;
            if self.reveal_ticks == 0 {
                if let Some((a, b)) = self.hide_pair.take() {
                    self.cards[a].revealed = false;
                    self.cards[b].revealed = false;
                }
            }
        }

        for &event in events {
            if self.done {
                if matches!(event, InputEvent::Confirm | InputEvent::Press) {
                    return GameFlow::ReturnToMenu;
                }
                continue;
            }
            match event {
                InputEvent::Digit(d) => {
                    if self.entry.len() < 2 {
                        self.entry.push(d);
                    }
                }
                InputEvent::Backspace => {
                    self.entry.pop();
                }
                InputEvent::Confirm => {
                    let number = self
                        .entry
                        .iter()
                        .fold(0usize, |acc, &d| acc * 10 + d as usize);
                    self.entry.clear();
                    if number >= 1 && number <= self.slot_count() {
                        self.select(number - 1, sink);
                    } else {
                        self.feedback = MoveFeedback::OutOfRange;
                    }
                }
                InputEvent::Click { col, row } => {
                    let idx = row as usize * ROW_WIDTH + col as usize;
                    if (col as usize) < ROW_WIDTH && idx < self.slot_count() {
                        self.select(idx, sink);
                    } else {
                        self.feedback = MoveFeedback::OutOfRange;
                    }
                }
                _ => {}
            }
        }
        GameFlow::Continue
    }

    /// Attempt to flip the card at `idx`.
    fn select(&mut self, idx: usize, sink: &mut dyn ResultSink) {
        if self.reveal_ticks > 0 {
            self.feedback = MoveFeedback::RevealWindow;
            return;
        }
        if self.cards[idx].matched || self.pending_first == Some(idx) {
            self.feedback = MoveFeedback::Occupied;
            return;
        }

        self.cards[idx].revealed = true;
        match self.pending_first.take() {
            None => self.pending_first = Some(idx),
            Some(first) => {
                self.moves += 1;
                if self.cards[first].symbol == self.cards[idx].symbol {
                    self.cards[first].matched = true;
                    self.cards[idx].matched = true;
                    self.matched_pairs += 1;
                    if self.matched_pairs == self.pair_count {
                        self.done = true;
                        log::info!("Swap Cards: cleared in {} moves", self.moves);
                        sink.append(RESULT_KEY, &format!("Completed in {} moves", self.moves));
                    }
                } else {
                    self.hide_pair = Some((first, idx));
                    self.reveal_ticks = self.window_ticks.max(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::MemorySink;

    fn game(seed: u64) -> SwapCards {
        SwapCards::new(&ArcadeConfig::default(), &mut ArcadeRng::new(seed))
    }

    fn select(g: &mut SwapCards, slot: usize, sink: &mut MemorySink) {
        // Type the 1-based slot number and confirm
        let number = slot + 1;
        let mut events = Vec::new();
        if number >= 10 {
            events.push(InputEvent::Digit((number / 10) as u8));
        }
        events.push(InputEvent::Digit((number % 10) as u8));
        events.push(InputEvent::Confirm);
        g.update(&events, sink);
    }

    /// Index of the other card holding the same symbol.
    fn partner(g: &SwapCards, idx: usize) -> usize {
        g.cards
            .iter()
            .enumerate()
            .find(|&(i, c)| i != idx && c.symbol == g.cards[idx].symbol)
            .map(|(i, _)| i)
            .unwrap()
    }

    #[test]
    fn test_deal_is_two_of_each_symbol() {
        for seed in 0..50 {
            let g = game(seed);
            let mut counts = vec![0u32; g.pair_count];
            for card in &g.cards {
                counts[card.symbol as usize] += 1;
            }
            assert!(counts.iter().all(|&c| c == 2), "seed {seed}: {counts:?}");
            assert_eq!(g.slot_count(), g.pair_count * 2);
        }
    }

    #[test]
    fn test_match_pair_sticks() {
        let mut g = game(7);
        let mut sink = MemorySink::new();
        let first = 0;
        let second = partner(&g, first);
        select(&mut g, first, &mut sink);
        select(&mut g, second, &mut sink);
        assert!(g.cards[first].matched && g.cards[second].matched);
        assert_eq!(g.matched_pairs, 1);
        assert_eq!(g.moves, 1);
        assert_eq!(g.reveal_ticks, 0);
    }

    #[test]
    fn test_mismatch_opens_window_then_hides() {
        let mut g = game(7);
        let mut sink = MemorySink::new();
        let first = 0;
        let wrong = (1..g.slot_count())
            .find(|&i| g.cards[i].symbol != g.cards[first].symbol)
            .unwrap();
        select(&mut g, first, &mut sink);
        select(&mut g, wrong, &mut sink);
        assert!(g.reveal_ticks > 0);
        assert!(g.cards[first].revealed && g.cards[wrong].revealed);

        // Selections during the window are held
        let third = partner(&g, first);
        select(&mut g, third, &mut sink);
        assert_eq!(g.feedback, MoveFeedback::RevealWindow);
        assert!(!g.cards[third].revealed);

        // Drain the countdown; both cards flip back
        for _ in 0..g.reveal_ticks + 1 {
            g.update(&[], &mut sink);
        }
        assert_eq!(g.reveal_ticks, 0);
        assert!(!g.cards[first].revealed && !g.cards[wrong].revealed);
    }

    #[test]
    fn test_reselect_pending_first_rejected() {
        let mut g = game(9);
        let mut sink = MemorySink::new();
        select(&mut g, 3, &mut sink);
        select(&mut g, 3, &mut sink);
        assert_eq!(g.feedback, MoveFeedback::Occupied);
        assert_eq!(g.moves, 0);
        assert_eq!(g.pending_first, Some(3));
    }

    #[test]
    fn test_full_playthrough_terminates() {
        let mut g = game(11);
        let mut sink = MemorySink::new();
        // Play with perfect memory: match every symbol directly
        for idx in 0..g.slot_count() {
            if g.cards[idx].matched {
                continue;
            }
            let mate = partner(&g, idx);
            select(&mut g, idx, &mut sink);
            select(&mut g, mate, &mut sink);
        }
        assert!(g.done);
        assert_eq!(g.matched_pairs, g.pair_count);
        assert!(g.moves >= g.pair_count as u32);
        assert_eq!(sink.lines.len(), 1);
        assert!(sink.lines[0].1.contains(&format!("in {} moves", g.moves)));

        assert_eq!(
            g.update(&[InputEvent::Confirm], &mut sink),
            GameFlow::ReturnToMenu
        );
    }
}
