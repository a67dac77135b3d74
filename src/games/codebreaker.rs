//! Break The Code (Mastermind)
//!
//! The secret is four pairwise-distinct digits. Guesses are typed
//! digit-by-digit into a pending buffer and committed with Confirm;
//! feedback is the classic two-pass scoring where every secret digit is
//! consumed at most once across both passes.

use serde::{Deserialize, Serialize};

use super::{GameFlow, MoveFeedback};
use crate::consts::CODE_LENGTH;
use crate::input::InputEvent;
use crate::results::ResultSink;
use crate::rng::ArcadeRng;
use crate::settings::ArcadeConfig;

/// Result-file key (win log doubles as the leaderboard).
pub const RESULT_KEY: &str = "codebreaker_leaderboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// A committed guess with its feedback pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub digits: [u8; CODE_LENGTH],
    /// Right digit, right position
    pub exact: u8,
    /// Right digit, wrong position
    pub partial: u8,
}

/// Full game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakTheCode {
    secret: [u8; CODE_LENGTH],
    /// Digits typed so far for the next guess
    pub entry: Vec<u8>,
    pub history: Vec<GuessRecord>,
    pub attempts_used: u8,
    pub max_attempts: u8,
    pub outcome: Outcome,
    pub feedback: MoveFeedback,
    player: String,
}

impl BreakTheCode {
    pub fn new(config: &ArcadeConfig, rng: &mut ArcadeRng) -> Self {
        Self {
            secret: generate_secret(rng),
            entry: Vec::with_capacity(CODE_LENGTH),
            history: Vec::new(),
            attempts_used: 0,
            max_attempts: config.max_attempts,
            outcome: Outcome::InProgress,
            feedback: MoveFeedback::None,
            player: config.player_name.clone(),
        }
    }

    /// The secret, revealed to the renderer only after the round ends.
    pub fn revealed_secret(&self) -> Option<[u8; CODE_LENGTH]> {
        (self.outcome != Outcome::InProgress).then_some(self.secret)
    }

    /// Advance one tick with this tick's events.
    pub fn update(&mut self, events: &[InputEvent], sink: &mut dyn ResultSink) -> GameFlow {
        self.feedback = MoveFeedback::None;
        for &event in events {
            if self.outcome != Outcome::InProgress {
                if matches!(event, InputEvent::Confirm | InputEvent::Press) {
                    return GameFlow::ReturnToMenu;
                }
                continue;
            }
            match event {
                InputEvent::Digit(d) => {
                    if self.entry.len() < CODE_LENGTH {
                        self.entry.push(d);
                    }
                }
                InputEvent::Backspace => {
                    self.entry.pop();
                }
                InputEvent::Confirm => self.commit(sink),
                _ => {}
            }
        }
        GameFlow::Continue
    }

    /// Commit the pending entry as a guess.
    fn commit(&mut self, sink: &mut dyn ResultSink) {
        if self.entry.len() != CODE_LENGTH {
            self.feedback = MoveFeedback::TooShort;
            return;
        }
        let mut digits = [0u8; CODE_LENGTH];
        digits.copy_from_slice(&self.entry);
        self.entry.clear();

        let (exact, partial) = score_guess(&self.secret, &digits);
        self.history.push(GuessRecord { digits, exact, partial });
        self.attempts_used += 1;

        if exact as usize == CODE_LENGTH {
            self.outcome = Outcome::Won;
            log::info!("Break The Code: cracked in {} attempts", self.attempts_used);
            sink.append(
                RESULT_KEY,
                &format!(
                    "{} cracked the code in {} attempts.",
                    self.player, self.attempts_used
                ),
            );
        } else if self.attempts_used >= self.max_attempts {
            self.outcome = Outcome::Lost;
            log::info!("Break The Code: out of attempts");
            sink.append(
                RESULT_KEY,
                &format!(
                    "{} ran out of attempts. Code was {}.",
                    self.player,
                    code_string(&self.secret)
                ),
            );
        }
    }
}

/// Draw four distinct digits: Fisher-Yates shuffle of 0-9, take the prefix.
pub fn generate_secret(rng: &mut ArcadeRng) -> [u8; CODE_LENGTH] {
    let mut digits: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    rng.shuffle(&mut digits);
    let mut secret = [0u8; CODE_LENGTH];
    secret.copy_from_slice(&digits[..CODE_LENGTH]);
    secret
}

/// Classic Mastermind feedback.
///
/// First pass counts exact-position matches and consumes those secret
/// positions; second pass pairs each remaining guess digit with at most
/// one unconsumed secret digit.
pub fn score_guess(secret: &[u8; CODE_LENGTH], guess: &[u8; CODE_LENGTH]) -> (u8, u8) {
    let mut exact = 0u8;
    let mut partial = 0u8;
    let mut secret_used = [false; CODE_LENGTH];
    let mut guess_used = [false; CODE_LENGTH];

    for i in 0..CODE_LENGTH {
        if guess[i] == secret[i] {
            exact += 1;
            secret_used[i] = true;
            guess_used[i] = true;
        }
    }

    for i in 0..CODE_LENGTH {
        if guess_used[i] {
            continue;
        }
        for j in 0..CODE_LENGTH {
            if !secret_used[j] && guess[i] == secret[j] {
                partial += 1;
                secret_used[j] = true;
                break;
            }
        }
    }

    (exact, partial)
}

fn code_string(code: &[u8; CODE_LENGTH]) -> String {
    code.iter().map(|d| char::from(b'0' + d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_ATTEMPTS;
    use crate::results::MemorySink;

    fn fixed_secret(secret: [u8; CODE_LENGTH]) -> BreakTheCode {
        let mut game = BreakTheCode::new(&ArcadeConfig::default(), &mut ArcadeRng::new(1));
        game.secret = secret;
        game
    }

    fn guess(game: &mut BreakTheCode, digits: &[u8], sink: &mut MemorySink) {
        let mut events: Vec<InputEvent> =
            digits.iter().map(|&d| InputEvent::Digit(d)).collect();
        events.push(InputEvent::Confirm);
        game.update(&events, sink);
    }

    #[test]
    fn test_scoring_pairing_vectors() {
        assert_eq!(score_guess(&[0, 1, 9, 2], &[1, 9, 0, 2]), (1, 3));
        assert_eq!(score_guess(&[0, 1, 9, 2], &[0, 1, 9, 2]), (4, 0));
        assert_eq!(score_guess(&[0, 1, 9, 2], &[5, 6, 7, 8]), (0, 0));
        // Full derangement: everything right-digit-wrong-place
        assert_eq!(score_guess(&[0, 1, 9, 2], &[1, 0, 2, 9]), (0, 4));
    }

    #[test]
    fn test_scoring_consumes_each_secret_digit_once() {
        // Guess repeats a digit the secret holds once: only one credit
        assert_eq!(score_guess(&[0, 1, 2, 3], &[1, 1, 1, 1]), (1, 0));
        assert_eq!(score_guess(&[0, 1, 2, 3], &[1, 1, 5, 5]), (1, 1));
    }

    #[test]
    fn test_secrets_are_always_distinct() {
        let mut rng = ArcadeRng::new(0xC0DE);
        for _ in 0..10_000 {
            let secret = generate_secret(&mut rng);
            for i in 0..CODE_LENGTH {
                for j in (i + 1)..CODE_LENGTH {
                    assert_ne!(secret[i], secret[j], "duplicate digit in {secret:?}");
                }
            }
        }
    }

    #[test]
    fn test_end_to_end_win_script() {
        let mut game = fixed_secret([1, 2, 3, 4]);
        let mut sink = MemorySink::new();

        guess(&mut game, &[1, 2, 4, 3], &mut sink);
        assert_eq!(game.outcome, Outcome::InProgress);
        assert_eq!(game.attempts_used, 1);
        let rec = game.history[0];
        assert_eq!((rec.exact, rec.partial), (2, 2));

        guess(&mut game, &[1, 2, 3, 4], &mut sink);
        assert_eq!(game.outcome, Outcome::Won);
        assert_eq!(game.attempts_used, 2);
        assert_eq!(sink.lines.len(), 1);
        assert!(sink.lines[0].1.contains("cracked the code in 2 attempts"));
        assert_eq!(game.revealed_secret(), Some([1, 2, 3, 4]));
    }

    #[test]
    fn test_short_guess_rejected_without_consuming_attempt() {
        let mut game = fixed_secret([1, 2, 3, 4]);
        let mut sink = MemorySink::new();
        game.update(
            &[InputEvent::Digit(1), InputEvent::Digit(2), InputEvent::Confirm],
            &mut sink,
        );
        assert_eq!(game.feedback, MoveFeedback::TooShort);
        assert_eq!(game.attempts_used, 0);
        // The partial entry survives for the next tick
        assert_eq!(game.entry, vec![1, 2]);
    }

    #[test]
    fn test_backspace_edits_entry() {
        let mut game = fixed_secret([1, 2, 3, 4]);
        let mut sink = MemorySink::new();
        game.update(
            &[
                InputEvent::Digit(9),
                InputEvent::Backspace,
                InputEvent::Digit(1),
            ],
            &mut sink,
        );
        assert_eq!(game.entry, vec![1]);
    }

    #[test]
    fn test_losing_consumes_all_attempts() {
        let mut game = fixed_secret([1, 2, 3, 4]);
        let mut sink = MemorySink::new();
        for _ in 0..MAX_ATTEMPTS {
            guess(&mut game, &[5, 6, 7, 8], &mut sink);
        }
        assert_eq!(game.outcome, Outcome::Lost);
        assert_eq!(game.attempts_used, MAX_ATTEMPTS);
        assert_eq!(sink.lines.len(), 1);
        assert!(sink.lines[0].1.contains("Code was 1234"));

        // Frozen after the terminal outcome
        guess(&mut game, &[1, 2, 3, 4], &mut sink);
        assert_eq!(game.attempts_used, MAX_ATTEMPTS);
    }

    #[test]
    fn test_feedback_sum_never_exceeds_code_length() {
        let mut rng = ArcadeRng::new(99);
        for _ in 0..2_000 {
            let secret = generate_secret(&mut rng);
            let guess = [
                rng.below(10) as u8,
                rng.below(10) as u8,
                rng.below(10) as u8,
                rng.below(10) as u8,
            ];
            let (exact, partial) = score_guess(&secret, &guess);
            assert!((exact + partial) as usize <= CODE_LENGTH);
        }
    }
}
