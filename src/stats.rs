//! Play statistics over finished daily sessions.
//!
//! Random games (date sentinel 0) and unfinished sessions are excluded.
//! Streaks walk the games newest-first, so `current_streak` is the run of
//! wins ending at the most recent game.

use crate::domain::{GameResult, Mode, Session};

/// Histogram buckets: wins in 1..=4 attempts, wins in 5 or more, losses.
pub const GUESS_BUCKETS: usize = 6;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModeStats {
    /// Wins since the last loss, counted from the newest game.
    pub current_streak: u32,
    /// Longest consecutive win run on record.
    pub max_streak: u32,
    /// Attempt-count histogram; the final bucket counts losses.
    pub guess_counts: [u32; GUESS_BUCKETS],
    /// Mean attempts across wins, 0 with no wins.
    pub average_guesses: f64,
    /// Mean purchased hints across wins (classic mode), 0 with no wins.
    pub average_hints: f64,
}

/// Aggregate one mode's record out of a store snapshot.
pub fn for_mode(mode: Mode, sessions: &[Session]) -> ModeStats {
    let mut games: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.mode == mode && s.is_daily() && s.is_terminal())
        .collect();
    games.sort_by(|a, b| b.date.cmp(&a.date));

    let mut current_streak = 0;
    let mut broken = false;
    let mut max_streak = 0;
    let mut run = 0;
    for game in &games {
        if game.result == GameResult::Win {
            if !broken {
                current_streak += 1;
            }
            run += 1;
        } else {
            broken = true;
            max_streak = max_streak.max(run);
            run = 0;
        }
    }
    max_streak = max_streak.max(run);

    let mut guess_counts = [0u32; GUESS_BUCKETS];
    let mut sum_guesses = 0usize;
    let mut sum_hints = 0u32;
    let mut wins = 0u32;
    for game in &games {
        if game.result == GameResult::Win {
            if mode == Mode::Classic {
                sum_hints += u32::from(game.hints);
            }
            sum_guesses += game.attempts.len();
            wins += 1;
            // A win always has at least the winning attempt.
            let bucket = game.attempts.len().clamp(1, 5);
            guess_counts[bucket - 1] += 1;
        } else {
            guess_counts[GUESS_BUCKETS - 1] += 1;
        }
    }
    let average_guesses = if wins > 0 { sum_guesses as f64 / f64::from(wins) } else { 0.0 };
    let average_hints = if wins > 0 { f64::from(sum_hints) / f64::from(wins) } else { 0.0 };

    ModeStats {
        current_streak,
        max_streak,
        guess_counts,
        average_guesses,
        average_hints,
    }
}
