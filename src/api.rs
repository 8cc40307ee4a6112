//! Puzzle API client.
//!
//! One endpoint: `GET {base}/v1/{seed}?mode={mode}[&difficulty={level}]`
//! returning the puzzle JSON. No authentication, no retries; a non-2xx
//! status or a decode failure surfaces as a [`FetchError`] carrying the
//! underlying message, and reloading is the caller's recovery path.

use std::fmt;
use std::time::Duration;

use tracing::{error, info, instrument};

use crate::config::ClientConfig;
use crate::domain::{Difficulty, Mode, Puzzle, Seed};
use crate::util::trunc_for_log;

#[derive(Debug)]
pub enum FetchError {
    /// Connection, TLS, or timeout trouble before a response arrived.
    Transport(String),
    /// The server answered with a non-success status.
    Status { status: u16, body: String },
    /// The body did not parse as a puzzle.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "puzzle fetch failed: {msg}"),
            FetchError::Status { status, body } => {
                write!(f, "puzzle fetch returned status {status}: {body}")
            }
            FetchError::Decode(msg) => write!(f, "puzzle response did not parse: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Clone)]
pub struct PuzzleClient {
    client: reqwest::Client,
    base_url: String,
}

impl PuzzleClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, seed: Seed, mode: Mode, difficulty: Option<Difficulty>) -> String {
        let mut url = format!(
            "{}/v1/{}?mode={}",
            self.base_url,
            seed.as_str(),
            mode.as_str()
        );
        if let Some(d) = difficulty {
            url.push_str("&difficulty=");
            url.push_str(d.as_str());
        }
        url
    }

    /// Today's puzzle; the server picks the difficulty.
    pub async fn fetch_today(&self, mode: Mode) -> Result<Puzzle, FetchError> {
        self.fetch(Seed::Today, mode, None).await
    }

    /// A random puzzle at the requested difficulty.
    pub async fn fetch_random(
        &self,
        mode: Mode,
        difficulty: Difficulty,
    ) -> Result<Puzzle, FetchError> {
        self.fetch(Seed::Random, mode, Some(difficulty)).await
    }

    #[instrument(level = "info", skip(self), fields(seed = seed.as_str(), mode = mode.as_str()))]
    async fn fetch(
        &self,
        seed: Seed,
        mode: Mode,
        difficulty: Option<Difficulty>,
    ) -> Result<Puzzle, FetchError> {
        let url = self.url(seed, mode, difficulty);
        let res = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(target: "puzzle", %url, status = status.as_u16(), "puzzle fetch failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: trunc_for_log(&body, 200),
            });
        }
        let puzzle = res.json::<Puzzle>().await.map_err(|e| {
            error!(target: "puzzle", %url, error = %e, "puzzle response did not parse");
            FetchError::Decode(e.to_string())
        })?;
        info!(
            target: "puzzle",
            difficulty = puzzle.difficulty.as_str(),
            extra_hints = puzzle.extra_hints.len(),
            "puzzle fetched"
        );
        Ok(puzzle)
    }
}
