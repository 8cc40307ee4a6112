//! Game flows shared by any frontend embedding the core.
//!
//! This includes:
//!   - Opening the daily or a random game (fetch + session bootstrap)
//!   - Applying player actions through the pure state machine
//!   - Sharing the score card to a clipboard
//!   - Restarting a random game and the dev-only session reset
//!
//! The state machine itself stays pure: these functions read the committed
//! session, call `engine::apply`, and commit the successor. A rejection or
//! a failed fetch leaves the store untouched, and no failure here ever
//! crosses into another session's record.

use std::fmt;

use tracing::{info, instrument, warn};

use crate::api::FetchError;
use crate::clipboard::{Clipboard, ClipboardError};
use crate::daily;
use crate::domain::{Difficulty, GameResult, Mode, Puzzle, Session, SessionKey, RANDOM_DATE};
use crate::engine::{self, Action, Rejection};
use crate::score;
use crate::state::AppState;
use crate::store::StoreError;

/// Everything a view needs to run one game: the identity, the immutable
/// puzzle, and the session snapshot at open time. The store remains the
/// source of truth for the session as play progresses.
#[derive(Clone, Debug)]
pub struct OpenedGame {
    pub key: SessionKey,
    pub puzzle: Puzzle,
    pub session: Session,
}

#[derive(Debug)]
pub enum GameError {
    Fetch(FetchError),
    Store(StoreError),
    /// The action was refused by the rules; session state is unchanged.
    Rejected(Rejection),
    /// Share was requested before the session finished.
    NotFinished,
    Clipboard(ClipboardError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Fetch(e) => e.fmt(f),
            GameError::Store(e) => e.fmt(f),
            GameError::Rejected(r) => r.fmt(f),
            GameError::NotFinished => write!(f, "session has no result yet"),
            GameError::Clipboard(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Fetch(e) => Some(e),
            GameError::Store(e) => Some(e),
            GameError::Rejected(r) => Some(r),
            GameError::NotFinished => None,
            GameError::Clipboard(e) => Some(e),
        }
    }
}

impl From<FetchError> for GameError {
    fn from(e: FetchError) -> Self {
        GameError::Fetch(e)
    }
}

impl From<StoreError> for GameError {
    fn from(e: StoreError) -> Self {
        GameError::Store(e)
    }
}

impl From<Rejection> for GameError {
    fn from(r: Rejection) -> Self {
        GameError::Rejected(r)
    }
}

impl From<ClipboardError> for GameError {
    fn from(e: ClipboardError) -> Self {
        GameError::Clipboard(e)
    }
}

/// Open today's game: fetch the daily puzzle (the server assigns the
/// difficulty) and create the session on first sight.
#[instrument(level = "info", skip(state), fields(mode = mode.as_str()))]
pub async fn open_daily(state: &AppState, mode: Mode) -> Result<OpenedGame, GameError> {
    let puzzle = state.client.fetch_today(mode).await?;
    let key = SessionKey {
        mode,
        difficulty: puzzle.difficulty,
        date: daily::today_stamp(),
    };
    let session = match state.store.get(&key).await {
        Some(existing) => existing,
        None => {
            let fresh = Session::new(key);
            state.store.put(fresh.clone()).await;
            fresh
        }
    };
    info!(target: "session", key = ?key, attempts = session.attempts.len(), "daily game opened");
    Ok(OpenedGame { key, puzzle, session })
}

/// Open (or resume) the random game at a difficulty. The fetched puzzle is
/// cached inside the session so a reload replays the same puzzle instead
/// of fetching a different one.
#[instrument(level = "info", skip(state), fields(mode = mode.as_str(), difficulty = difficulty.as_str()))]
pub async fn open_random(
    state: &AppState,
    mode: Mode,
    difficulty: Difficulty,
) -> Result<OpenedGame, GameError> {
    let key = SessionKey { mode, difficulty, date: RANDOM_DATE };
    if let Some(existing) = state.store.get(&key).await {
        if let Some(puzzle) = existing.puzzle.clone() {
            info!(target: "session", key = ?key, "random game resumed");
            return Ok(OpenedGame { key, puzzle, session: existing });
        }
    }
    let puzzle = state.client.fetch_random(mode, difficulty).await?;
    let mut fresh = Session::new(key);
    fresh.puzzle = Some(puzzle.clone());
    state.store.put(fresh.clone()).await;
    info!(target: "session", key = ?key, "random game started");
    Ok(OpenedGame { key, puzzle, session: fresh })
}

/// Abandon the current random game and fetch a new one.
#[instrument(level = "info", skip(state), fields(mode = mode.as_str(), difficulty = difficulty.as_str()))]
pub async fn restart_random(
    state: &AppState,
    mode: Mode,
    difficulty: Difficulty,
) -> Result<OpenedGame, GameError> {
    let key = SessionKey { mode, difficulty, date: RANDOM_DATE };
    state.store.delete(&key).await;
    open_random(state, mode, difficulty).await
}

async fn transition(
    state: &AppState,
    game: &OpenedGame,
    action: Action,
) -> Result<Session, GameError> {
    let current = state
        .store
        .get(&game.key)
        .await
        .ok_or(StoreError::NotFound(game.key))?;
    let next = engine::apply(&current, &game.puzzle, &action)?;
    state.store.put(next.clone()).await;
    if next.is_terminal() {
        info!(
            target: "session",
            key = ?game.key,
            result = ?next.result,
            attempts = next.attempts.len(),
            "game finished"
        );
    }
    Ok(next)
}

/// Submit a guess. Returns the committed successor session, or the
/// rejection that left the session untouched.
pub async fn submit_guess(
    state: &AppState,
    game: &OpenedGame,
    guess: &str,
) -> Result<Session, GameError> {
    transition(state, game, Action::Guess(guess.to_string())).await
}

/// Hidden mode: spend an attempt to reveal the next extra hint.
pub async fn skip_turn(state: &AppState, game: &OpenedGame) -> Result<Session, GameError> {
    transition(state, game, Action::Skip).await
}

/// Classic mode: give up.
pub async fn forfeit(state: &AppState, game: &OpenedGame) -> Result<Session, GameError> {
    transition(state, game, Action::Forfeit).await
}

/// Classic mode: purchase the next metadata hint.
pub async fn buy_meta_hint(state: &AppState, game: &OpenedGame) -> Result<Session, GameError> {
    transition(state, game, Action::BuyHint).await
}

/// Format the score card for a finished game and copy it out.
pub async fn share_score(
    state: &AppState,
    game: &OpenedGame,
    clipboard: &dyn Clipboard,
) -> Result<String, GameError> {
    let session = state
        .store
        .get(&game.key)
        .await
        .ok_or(StoreError::NotFound(game.key))?;
    if !session.is_terminal() {
        return Err(GameError::NotFinished);
    }
    let card = score::format_share(&session, &game.puzzle);
    clipboard.write_text(&card)?;
    Ok(card)
}

/// Dev-only escape hatch: wind a session back to the initial playing
/// state without touching its cached puzzle.
#[instrument(level = "info", skip(state), fields(key = ?key))]
pub async fn reset_session(state: &AppState, key: &SessionKey) -> Result<Session, GameError> {
    warn!(target: "session", key = ?key, "resetting session");
    let session = state
        .store
        .modify(key, |s| {
            s.attempts.clear();
            s.hints = 0;
            s.result = GameResult::None;
        })
        .await?;
    Ok(session)
}
