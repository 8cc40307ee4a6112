//! Kanjidle · daily kanji puzzle, client-side game core
//!
//! - Pure puzzle session state machine (guess / skip / forfeit / hints)
//! - Score-card formatting and play statistics
//! - Puzzle API client, keyed session store with live updates, daily clock
//!
//! Important env variables:
//!   KANJIDLE_CONFIG_PATH : path to TOML config (api_url, timeout_secs)
//!   KANJIDLE_API_URL     : overrides the puzzle API base URL
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

pub mod api;
pub mod clipboard;
pub mod config;
pub mod daily;
pub mod domain;
pub mod engine;
pub mod logic;
pub mod score;
pub mod state;
pub mod stats;
pub mod store;
pub mod telemetry;
pub mod util;

pub use api::{FetchError, PuzzleClient};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use config::ClientConfig;
pub use domain::{
    Difficulty, GameResult, Hint, KanjiMeta, Loc, Mode, Puzzle, Seed, Session, SessionKey,
};
pub use engine::{apply, view, Action, MetaHint, Rejection, View};
pub use logic::{GameError, OpenedGame};
pub use score::format_share;
pub use state::AppState;
pub use stats::ModeStats;
pub use store::{SessionStore, StoreError, StoreEvent};
