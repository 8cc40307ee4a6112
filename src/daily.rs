//! UTC day boundaries and the next-puzzle countdown.
//!
//! Daily sessions are keyed by the UTC-midnight epoch timestamp in
//! milliseconds. The ticker only recomputes the displayed countdown and
//! flags the boundary crossing; it never touches session state.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// UTC-midnight stamp (epoch milliseconds) for the day containing `at`.
pub fn day_stamp(at: DateTime<Utc>) -> i64 {
    at.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight exists for every date")
        .and_utc()
        .timestamp_millis()
}

/// Today's UTC day stamp.
pub fn today_stamp() -> i64 {
    day_stamp(Utc::now())
}

/// `yyyy-mm-dd` rendering of a day stamp. Not meaningful for the random
/// sentinel; callers branch on that before formatting.
pub fn format_day(stamp: i64) -> String {
    match Utc.timestamp_millis_opt(stamp) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d").to_string(),
        _ => String::new(),
    }
}

/// Milliseconds in one day.
const DAY_MS: i64 = 86_400_000;

/// Time remaining until the next UTC midnight.
pub fn until_next_day(at: DateTime<Utc>) -> Duration {
    Duration::milliseconds(day_stamp(at) + DAY_MS - at.timestamp_millis())
}

/// `hh:mm:ss` rendering of a countdown; negative durations clamp to zero.
pub fn format_countdown(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// One countdown observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailyTick {
    /// Day stamp at observation time.
    pub day: i64,
    /// Milliseconds until the next boundary.
    pub remaining_ms: i64,
    /// True on the first tick after a boundary crossing; the caller
    /// reloads the daily puzzle when it sees this.
    pub rolled_over: bool,
}

/// Handle to a running once-per-second countdown ticker. Dropping the
/// handle tears the ticker down.
pub struct DailyTicker {
    ticks: watch::Receiver<DailyTick>,
    handle: JoinHandle<()>,
}

impl DailyTicker {
    pub fn ticks(&self) -> watch::Receiver<DailyTick> {
        self.ticks.clone()
    }
}

impl Drop for DailyTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the countdown ticker on the current runtime.
pub fn spawn_daily_ticker() -> DailyTicker {
    let now = Utc::now();
    let (tx, rx) = watch::channel(DailyTick {
        day: day_stamp(now),
        remaining_ms: until_next_day(now).num_milliseconds(),
        rolled_over: false,
    });
    let handle = tokio::spawn(async move {
        let mut last_day = day_stamp(Utc::now());
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let now = Utc::now();
            let day = day_stamp(now);
            let rolled_over = day != last_day;
            if rolled_over {
                debug!(target: "kanjidle", %day, "daily boundary crossed");
                last_day = day;
            }
            let tick = DailyTick {
                day,
                remaining_ms: until_next_day(now).num_milliseconds(),
                rolled_over,
            };
            if tx.send(tick).is_err() {
                // All receivers gone; stop ticking.
                break;
            }
        }
    });
    DailyTicker { ticks: rx, handle }
}
