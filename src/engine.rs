//! Puzzle session state machine.
//!
//! `apply` is a pure transition function: given the committed session, the
//! puzzle it plays, and a player action, it returns the successor session
//! or a rejection that leaves the input untouched. It never panics and
//! never mutates in place; committing the successor is the caller's side
//! effect. `view` derives the values the caller renders from.

use std::fmt;

use crate::domain::{GameResult, KanjiMeta, Mode, Puzzle, Session};
use crate::util::is_single_han;

/// Classic mode sells at most three metadata hints.
pub const META_HINT_LIMIT: u8 = 3;

/// Maximum attempts for a hidden-mode session: the initial reveal state
/// plus one per extra hint.
pub fn attempt_limit(puzzle: &Puzzle) -> usize {
    puzzle.extra_hints.len() + 1
}

/// A player action against a live session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Submit a single-kanji guess.
    Guess(String),
    /// Hidden mode: spend an attempt to reveal the next extra hint.
    Skip,
    /// Classic mode: give up immediately.
    Forfeit,
    /// Classic mode: purchase the next metadata hint.
    BuyHint,
}

/// Why an action was refused. Rejections are values, not errors in the
/// failure sense: the session is untouched and play continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The guess is not exactly one Han-script character.
    InvalidCharacter,
    /// The guess was already attempted this session.
    DuplicateGuess,
    /// The session already has a result.
    AlreadyTerminal,
    /// All three metadata hints are already purchased.
    HintLimitReached,
    /// The action does not exist in this session's rule variant.
    ModeMismatch,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::InvalidCharacter => "漢字１文字を入力してください",
            Rejection::DuplicateGuess => "この漢字はすでに回答しました",
            Rejection::AlreadyTerminal => "このパズルはすでに終了しました",
            Rejection::HintLimitReached => "ヒントはもうありません",
            Rejection::ModeMismatch => "このモードでは使えない操作です",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for Rejection {}

/// Metadata hints unlock in a fixed ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaHint {
    Level,
    StrokeCount,
    Radical,
}

/// The unlock order: level, then stroke count, then radical.
pub static META_HINT_ORDER: [MetaHint; META_HINT_LIMIT as usize] =
    [MetaHint::Level, MetaHint::StrokeCount, MetaHint::Radical];

impl MetaHint {
    /// Hints unlocked by `purchased` buys, in unlock order.
    pub fn unlocked(purchased: u8) -> &'static [MetaHint] {
        let n = (purchased as usize).min(META_HINT_ORDER.len());
        &META_HINT_ORDER[..n]
    }

    /// Button caption before the hint is revealed.
    pub fn caption(&self) -> &'static str {
        match self {
            MetaHint::Level => "漢検級",
            MetaHint::StrokeCount => "画数",
            MetaHint::Radical => "部首",
        }
    }

    /// Revealed hint text for the answer kanji.
    pub fn text(&self, meta: &KanjiMeta, answer: &str) -> String {
        match self {
            MetaHint::Level => meta.level_label(),
            MetaHint::StrokeCount => meta.stroke_label(),
            MetaHint::Radical => meta.radical_label(answer),
        }
    }
}

/// Apply one action. On rejection the session is returned unchanged to the
/// caller in the sense that no successor exists; on success the successor
/// carries exactly one appended attempt, an incremented hint count, or a
/// result transition.
pub fn apply(session: &Session, puzzle: &Puzzle, action: &Action) -> Result<Session, Rejection> {
    if session.is_terminal() {
        return Err(Rejection::AlreadyTerminal);
    }
    match (session.mode, action) {
        (_, Action::Guess(guess)) => {
            if !is_single_han(guess) {
                return Err(Rejection::InvalidCharacter);
            }
            if session.attempts.iter().any(|a| a.as_deref() == Some(guess.as_str())) {
                return Err(Rejection::DuplicateGuess);
            }
            let mut next = session.clone();
            next.attempts.push(Some(guess.clone()));
            if *guess == puzzle.answer {
                // Win takes precedence even on the final attempt.
                next.result = GameResult::Win;
            } else if next.mode == Mode::Hidden && next.attempts.len() >= attempt_limit(puzzle) {
                next.result = GameResult::Lose;
            }
            Ok(next)
        }
        (Mode::Hidden, Action::Skip) => {
            let mut next = session.clone();
            next.attempts.push(None);
            if next.attempts.len() >= attempt_limit(puzzle) {
                next.result = GameResult::Lose;
            }
            Ok(next)
        }
        (Mode::Classic, Action::Forfeit) => {
            let mut next = session.clone();
            next.result = GameResult::Lose;
            Ok(next)
        }
        (Mode::Classic, Action::BuyHint) => {
            if session.hints >= META_HINT_LIMIT {
                return Err(Rejection::HintLimitReached);
            }
            let mut next = session.clone();
            next.hints += 1;
            Ok(next)
        }
        (Mode::Classic, Action::Skip)
        | (Mode::Hidden, Action::Forfeit)
        | (Mode::Hidden, Action::BuyHint) => Err(Rejection::ModeMismatch),
    }
}

/// Derived values for rendering a session against its puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct View {
    /// Extra hints unlocked so far: one per attempt, capped by the puzzle.
    pub reveal_count: usize,
    pub is_terminal: bool,
    pub result: GameResult,
}

pub fn view(session: &Session, puzzle: &Puzzle) -> View {
    View {
        reveal_count: session.attempts.len().min(puzzle.extra_hints.len()),
        is_terminal: session.is_terminal(),
        result: session.result,
    }
}
