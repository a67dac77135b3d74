//! Terminal render/input adapter
//!
//! The outer shell of the arcade: translates raw key events into the
//! core's input vocabulary and draws core snapshots with crossterm.
//! Strictly one-way in each direction; nothing in here mutates game
//! state, and draw failures are logged rather than surfaced.

use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::Instant;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use crate::arcade::{MENU_ENTRIES, RenderAdapter, Snapshot};
use crate::games::memory::ROW_WIDTH;
use crate::games::tictactoe::{Cell, Outcome as TttOutcome};
use crate::games::{codebreaker, zombie, MoveFeedback, SwapCards};
use crate::input::{Direction, InputEvent};

/// Map one key event into the core vocabulary.
fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let event = match key.code {
        KeyCode::Up => InputEvent::Move(Direction::Up),
        KeyCode::Down => InputEvent::Move(Direction::Down),
        KeyCode::Left => InputEvent::Move(Direction::Left),
        KeyCode::Right => InputEvent::Move(Direction::Right),
        KeyCode::Enter => InputEvent::Confirm,
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Esc => InputEvent::Menu,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => InputEvent::Move(Direction::Up),
            's' => InputEvent::Move(Direction::Down),
            'a' => InputEvent::Move(Direction::Left),
            'd' => InputEvent::Move(Direction::Right),
            'm' => InputEvent::Menu,
            '0'..='9' => InputEvent::Digit(c as u8 - b'0'),
            _ => InputEvent::Press,
        },
        _ => InputEvent::Press,
    };
    Some(event)
}

/// Drain key events until `deadline`, translated for the core.
///
/// Always returns at the deadline so the tick rate stays fixed whether
/// or not the player is typing.
pub fn poll_events(deadline: Instant) -> io::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(events);
        }
        if event::poll(deadline - now)? {
            if let Event::Key(key) = event::read()? {
                if let Some(mapped) = map_key(key) {
                    events.push(mapped);
                }
            }
        }
    }
}

/// Crossterm-backed renderer. Raw mode and the alternate screen are
/// held for the renderer's lifetime and restored on drop.
pub struct TerminalRenderer {
    out: Stdout,
    results_dir: PathBuf,
}

impl TerminalRenderer {
    pub fn new(results_dir: PathBuf) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out, results_dir })
    }

    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        match snapshot {
            Snapshot::Menu { cursor } => self.render_menu(*cursor)?,
            Snapshot::TicTacToe(g) => self.render_tictactoe(g)?,
            Snapshot::SpaceSurvivor(g) => self.render_space(g)?,
            Snapshot::BreakTheCode(g) => self.render_codebreaker(g)?,
            Snapshot::ZombieEscape(g) => self.render_zombie(g)?,
            Snapshot::SwapCards(g) => self.render_cards(g)?,
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    fn title(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(Color::Yellow),
            Print(format!(" == {text} ==\r\n")),
            SetForegroundColor(Color::DarkGrey),
            Print(" Esc/M: menu\r\n\r\n"),
            ResetColor,
        )
    }

    fn line(&mut self, color: Color, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(color),
            Print(format!(" {text}\r\n")),
            ResetColor,
        )
    }

    fn feedback_line(&mut self, feedback: MoveFeedback) -> io::Result<()> {
        let message = match feedback {
            MoveFeedback::None => return Ok(()),
            MoveFeedback::Occupied => "Invalid selection: already taken.",
            MoveFeedback::OutOfRange => "Selection out of range.",
            MoveFeedback::TooShort => "Enter exactly 4 digits.",
            MoveFeedback::RevealWindow => "Wait for the cards to flip back.",
            MoveFeedback::Finished => "Round over - press Enter.",
        };
        self.line(Color::Red, message)
    }

    fn render_menu(&mut self, cursor: usize) -> io::Result<()> {
        self.title("GAME HUB")?;
        for (i, entry) in MENU_ENTRIES.iter().enumerate() {
            let marker = if i == cursor { ">" } else { " " };
            let color = if i == cursor { Color::Cyan } else { Color::White };
            self.line(color, &format!("{marker} [{}] {entry}", i + 1))?;
        }
        self.line(Color::DarkGrey, "")?;
        self.line(Color::DarkGrey, "1-6 or arrows + Enter")?;
        Ok(())
    }

    fn render_tictactoe(&mut self, g: &crate::games::TicTacToe) -> io::Result<()> {
        self.title("TIC-TAC-TOE")?;
        // Keypad orientation: cells 7-8-9 across the top
        for row in (0..3).rev() {
            let mut text = String::new();
            for col in 0..3 {
                let idx = row * 3 + col;
                let mark = match g.board[idx] {
                    Cell::Empty => char::from(b'1' + idx as u8),
                    Cell::X => 'X',
                    Cell::O => 'O',
                };
                text.push(' ');
                text.push(mark);
                if col < 2 {
                    text.push_str(" |");
                }
            }
            self.line(Color::White, &text)?;
            if row > 0 {
                self.line(Color::DarkGrey, "---+---+---")?;
            }
        }
        self.line(Color::White, "")?;
        match g.outcome {
            TttOutcome::InProgress => {
                self.line(Color::Cyan, &format!("Player {} to move (1-9)", g.current.as_str()))?
            }
            TttOutcome::XWins => self.line(Color::Green, "Player X wins!")?,
            TttOutcome::OWins => self.line(Color::Green, "Player O wins!")?,
            TttOutcome::Draw => self.line(Color::Yellow, "It's a draw!")?,
        }
        self.feedback_line(g.feedback)
    }

    fn render_space(&mut self, g: &crate::games::SpaceSurvivor) -> io::Result<()> {
        self.title("SPACE SURVIVOR")?;
        let width = g.field().x as usize;
        let height = g.field().y as usize;
        let ship_col = g.player_x.round() as usize;
        for row in 0..height {
            let mut text = vec![' '; width];
            for asteroid in &g.asteroids {
                let col = asteroid.pos.x.round() as usize;
                let arow = asteroid.pos.y.round();
                if arow >= 0.0 && (arow as usize) == row && col < width {
                    text[col] = '*';
                }
            }
            if row == height - 1 && ship_col < width {
                text[ship_col] = '^';
            }
            self.line(Color::White, &text.into_iter().collect::<String>())?;
        }
        self.line(Color::Yellow, &format!("SCORE: {}", g.score))?;
        if !g.alive {
            self.line(Color::Red, "CRASH! You hit an asteroid.")?;
            self.line(Color::DarkGrey, "Press Enter to continue...")?;
        }
        Ok(())
    }

    fn render_codebreaker(&mut self, g: &crate::games::BreakTheCode) -> io::Result<()> {
        self.title("BREAK THE CODE")?;
        self.line(Color::White, "Crack the 4-digit code. Digits are unique.")?;
        for (i, record) in g.history.iter().enumerate() {
            let digits: String = record
                .digits
                .iter()
                .map(|d| char::from(b'0' + d))
                .collect();
            self.line(
                Color::White,
                &format!(
                    "{:2}. {digits}   {} exact, {} close",
                    i + 1,
                    record.exact,
                    record.partial
                ),
            )?;
        }
        match g.outcome {
            codebreaker::Outcome::InProgress => {
                let typed: String = g.entry.iter().map(|d| char::from(b'0' + d)).collect();
                self.line(
                    Color::Cyan,
                    &format!(
                        "Attempt {}/{} > {typed}_",
                        g.attempts_used + 1,
                        g.max_attempts
                    ),
                )?;
            }
            codebreaker::Outcome::Won => {
                self.line(Color::Green, "CONGRATULATIONS! You cracked the code!")?;
                self.render_leaderboard()?;
            }
            codebreaker::Outcome::Lost => {
                if let Some(secret) = g.revealed_secret() {
                    let code: String = secret.iter().map(|d| char::from(b'0' + d)).collect();
                    self.line(Color::Red, &format!("Out of attempts! The code was {code}."))?;
                }
                self.render_leaderboard()?;
            }
        }
        self.feedback_line(g.feedback)
    }

    /// Top five lines of the win log. Read here, never by the core.
    fn render_leaderboard(&mut self) -> io::Result<()> {
        let path = self
            .results_dir
            .join(format!("{}.txt", codebreaker::RESULT_KEY));
        self.line(Color::Yellow, "LEADERBOARD")?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                for line in contents.lines().take(5) {
                    self.line(Color::White, line)?;
                }
            }
            Err(_) => self.line(Color::DarkGrey, "No records yet.")?,
        }
        self.line(Color::DarkGrey, "Press Enter to continue...")
    }

    fn render_zombie(&mut self, g: &crate::games::ZombieEscape) -> io::Result<()> {
        self.title("ESCAPE ZOMBIE LAND")?;
        self.line(Color::White, "Reach [S], avoid [Z]. Move with WASD/arrows.")?;
        for row in 0..g.grid_size {
            let mut text = String::new();
            for col in 0..g.grid_size {
                let cell = zombie::Cell::new(row, col);
                let mark = if cell == g.player {
                    'P'
                } else if cell == g.zombie {
                    'Z'
                } else if cell == g.safe {
                    'S'
                } else {
                    '.'
                };
                text.push(mark);
                text.push(' ');
            }
            self.line(Color::White, &text)?;
        }
        match g.outcome {
            zombie::Outcome::InProgress => {
                self.line(Color::Cyan, &format!("Turns: {}", g.turns))?
            }
            zombie::Outcome::Escaped => {
                self.line(Color::Green, "YOU ESCAPED!")?;
                self.line(Color::DarkGrey, "Press Enter to continue...")?
            }
            zombie::Outcome::Caught => {
                self.line(Color::Red, "CAUGHT BY ZOMBIE! Game over.")?;
                self.line(Color::DarkGrey, "Press Enter to continue...")?
            }
        }
        Ok(())
    }

    fn render_cards(&mut self, g: &SwapCards) -> io::Result<()> {
        self.title("SWAP CARDS")?;
        for (i, card) in g.cards.iter().enumerate() {
            if i % ROW_WIDTH == 0 && i > 0 {
                queue!(self.out, Print("\r\n"))?;
            }
            if i % ROW_WIDTH == 0 {
                queue!(self.out, Print(" "))?;
            }
            let (color, text) = if card.revealed || card.matched {
                let symbol = char::from(b'A' + card.symbol);
                let color = if card.matched { Color::Green } else { Color::Yellow };
                (color, format!("[{symbol} ]"))
            } else {
                (Color::DarkGrey, format!("[{:2}]", i + 1))
            };
            queue!(
                self.out,
                SetForegroundColor(color),
                Print(text),
                Print(" "),
                ResetColor
            )?;
        }
        queue!(self.out, Print("\r\n\r\n"))?;
        self.line(
            Color::White,
            &format!("Moves: {}  Matches: {}/{}", g.moves, g.matched_pairs, g.pair_count),
        )?;
        if g.done {
            self.line(Color::Green, "All pairs matched!")?;
            self.line(Color::DarkGrey, "Press Enter to continue...")?;
        } else {
            let typed: String = g.entry.iter().map(|d| char::from(b'0' + d)).collect();
            self.line(
                Color::Cyan,
                &format!("Card number (1-{}) > {typed}_", g.slot_count()),
            )?;
        }
        self.feedback_line(g.feedback)
    }
}

impl RenderAdapter for TerminalRenderer {
    fn draw(&mut self, snapshot: &Snapshot) {
        if let Err(err) = self.render(snapshot) {
            log::warn!("Draw failed: {err}");
        }
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
