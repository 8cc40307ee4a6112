//! Domain models: puzzle wire shapes, game modes, and the persisted session.
//!
//! The wire types mirror the puzzle API exactly (snake_case fields, `L`/`R`
//! hint positions). The session record is serde-ready because the store
//! treats it as an opaque JSON-shaped value; `#[serde(default)]` on the
//! fields added after the first release doubles as the schema upgrade path
//! (old records gain default values when read back).

use serde::{Deserialize, Serialize};

/// Game rule variant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Classic,
    Hidden,
}

impl Mode {
    /// Wire value used in the fetch query string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Classic => "classic",
            Mode::Hidden => "hidden",
        }
    }

    /// Display label as shown in the UI and the share text.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Classic => "クラシック",
            Mode::Hidden => "隠しヒント",
        }
    }
}

/// Which puzzle a fetch asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seed {
    Today,
    Random,
}

impl Seed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Seed::Today => "today",
            Seed::Random => "random",
        }
    }
}

/// Server-assigned puzzle difficulty.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Simple,
    Easy,
    Normal,
    Hard,
    Lunatic,
    Lunatic2,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Simple => "simple",
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Lunatic => "lunatic",
            Difficulty::Lunatic2 => "lunatic2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Simple => "絵本級・Simple",
            Difficulty::Easy => "童話級・Easy",
            Difficulty::Normal => "漫画級・Normal",
            Difficulty::Hard => "芝居級・Hard",
            Difficulty::Lunatic => "奇譚級・Lunatic",
            Difficulty::Lunatic2 => "倜儻級・Profound",
        }
    }
}

/// Side of a two-character compound occupied by the hidden answer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Loc {
    L,
    R,
}

/// One compound hint: the shown character plus the side the answer takes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hint {
    pub answer: Loc,
    pub hint: String,
}

/// School-level classification of a kanji.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KanjiClass {
    Kyoiku,
    Joyo,
    Kentei,
    All,
}

/// Kun reading with optional okurigana, encoded as a JSON pair.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Kun(
    pub String,
    #[serde(skip_serializing_if = "Option::is_none", default)] pub Option<String>,
);

/// Metadata about the answer kanji, revealed piecewise in classic mode.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct KanjiMeta {
    pub level: String,
    pub class: KanjiClass,
    pub stroke_count: usize,
    pub radical: String,
    pub on: Vec<String>,
    pub kun: Vec<Kun>,
}

impl KanjiMeta {
    /// Kanken level button text: `"" → 配当外`, `0101j → 1/準1級`, a trailing
    /// `j` means a pre-level (準), and the leading zero is stripped.
    pub fn level_label(&self) -> String {
        if self.level.is_empty() {
            return "配当外".to_string();
        }
        if self.level == "0101j" {
            return "1/準1級".to_string();
        }
        let pre = if self.level.ends_with('j') { "準" } else { "" };
        let digits = self
            .level
            .trim_end_matches('j')
            .trim_start_matches('0');
        format!("{pre}{digits}級")
    }

    pub fn stroke_label(&self) -> String {
        format!("{}画", self.stroke_count)
    }

    /// Radical button text. Some radicals are the kanji itself, which would
    /// give the answer away, so those render as a fixed phrase instead.
    pub fn radical_label(&self, answer: &str) -> String {
        if self.radical.split('・').any(|r| r == answer) {
            "部首は漢字と同じ".to_string()
        } else {
            self.radical.split('・').collect::<Vec<_>>().join(" ")
        }
    }
}

/// A fetched puzzle, immutable for the lifetime of a session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Puzzle {
    pub hints: Vec<Hint>,
    pub extra_hints: Vec<Hint>,
    pub answer: String,
    #[serde(default)]
    pub answer_meta: Option<KanjiMeta>,
    pub difficulty: Difficulty,
}

/// Render hints as compound previews, e.g. `◯地　◯底　内◯　熱◯`.
/// With `answer` given, the answer character replaces the placeholder.
pub fn pretty(hints: &[Hint], answer: Option<&str>) -> String {
    let answer = answer.unwrap_or("◯");
    hints
        .iter()
        .map(|h| match h.answer {
            Loc::L => format!("{}{}", answer, h.hint),
            Loc::R => format!("{}{}", h.hint, answer),
        })
        .collect::<Vec<_>>()
        .join("　")
}

/// Terminal outcome of a session. Leaves `None` at most once and never
/// returns to it except through an explicit reset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    None,
    Win,
    Lose,
}

/// Day stamp sentinel for non-daily (random) sessions.
pub const RANDOM_DATE: i64 = 0;

/// Unique session identity: one session exists per key.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub mode: Mode,
    pub difficulty: Difficulty,
    /// UTC-midnight epoch milliseconds, or [`RANDOM_DATE`].
    pub date: i64,
}

/// Per-day, per-mode, per-difficulty play record.
///
/// `attempts` entries are `Some(guess)` or `None` for a skip, append-only
/// while the session is live. `hints` counts purchased metadata hints
/// (classic mode only). `puzzle` caches the fetched puzzle for random
/// sessions so a reload replays the same puzzle.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub date: i64,
    pub attempts: Vec<Option<String>>,
    pub result: GameResult,
    #[serde(default)]
    pub hints: u8,
    #[serde(default)]
    pub puzzle: Option<Puzzle>,
}

impl Session {
    /// Fresh playing session for the given identity.
    pub fn new(key: SessionKey) -> Self {
        Self {
            mode: key.mode,
            difficulty: key.difficulty,
            date: key.date,
            attempts: Vec::new(),
            result: GameResult::None,
            hints: 0,
            puzzle: None,
        }
    }

    pub fn key(&self) -> SessionKey {
        SessionKey {
            mode: self.mode,
            difficulty: self.difficulty,
            date: self.date,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.result != GameResult::None
    }

    pub fn is_daily(&self) -> bool {
        self.date != RANDOM_DATE
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn puzzle_wire_shape_round_trips() {
        let json = r#"{
            "hints": [
                { "answer": "L", "hint": "地" },
                { "answer": "R", "hint": "内" }
            ],
            "extra_hints": [
                { "answer": "L", "hint": "臓" }
            ],
            "answer": "心",
            "answer_meta": {
                "level": "09",
                "class": "kyoiku",
                "stroke_count": 4,
                "radical": "心",
                "on": ["シン"],
                "kun": [["こころ"], ["うら", null]]
            },
            "difficulty": "normal"
        }"#;
        let p: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(p.answer, "心");
        assert_eq!(p.difficulty, Difficulty::Normal);
        assert_eq!(p.hints[0].answer, Loc::L);
        let meta = p.answer_meta.as_ref().unwrap();
        assert_eq!(meta.class, KanjiClass::Kyoiku);
        assert_eq!(meta.kun[0], Kun("こころ".into(), None));

        let back: Puzzle = serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn hidden_mode_puzzle_without_meta() {
        let json = r#"{
            "hints": [{ "answer": "R", "hint": "熱" }],
            "extra_hints": [],
            "answer": "心",
            "difficulty": "hard"
        }"#;
        let p: Puzzle = serde_json::from_str(json).unwrap();
        assert_eq!(p.answer_meta, None);
    }

    #[test]
    fn old_session_records_gain_defaults() {
        // A v1 record predating the `hints` and `puzzle` fields.
        let json = r#"{
            "mode": "classic",
            "difficulty": "easy",
            "date": 1719446400000,
            "attempts": ["日", null],
            "result": "none"
        }"#;
        let s: Session = serde_json::from_str(json).unwrap();
        assert_eq!(s.hints, 0);
        assert_eq!(s.puzzle, None);
        assert_eq!(s.attempts, vec![Some("日".to_string()), None]);
        assert!(!s.is_terminal());
    }

    #[test]
    fn kanken_level_labels() {
        let meta = |level: &str| KanjiMeta {
            level: level.to_string(),
            class: KanjiClass::All,
            stroke_count: 4,
            radical: "心".to_string(),
            on: vec![],
            kun: vec![],
        };
        assert_eq!(meta("").level_label(), "配当外");
        assert_eq!(meta("0101j").level_label(), "1/準1級");
        assert_eq!(meta("02j").level_label(), "準2級");
        assert_eq!(meta("09").level_label(), "9級");
        assert_eq!(meta("10").level_label(), "10級");
        assert_eq!(meta("01").level_label(), "1級");
    }

    #[test]
    fn radical_labels() {
        let meta = KanjiMeta {
            level: "09".to_string(),
            class: KanjiClass::Kyoiku,
            stroke_count: 4,
            radical: "心・忄".to_string(),
            on: vec![],
            kun: vec![],
        };
        assert_eq!(meta.radical_label("心"), "部首は漢字と同じ");
        assert_eq!(meta.radical_label("時"), "心 忄");
    }

    #[test]
    fn mode_and_difficulty_labels() {
        assert_eq!(Mode::Hidden.label(), "隠しヒント");
        assert_eq!(Mode::Classic.label(), "クラシック");
        assert_eq!(Difficulty::Normal.label(), "漫画級・Normal");
        assert_eq!(Difficulty::Lunatic2.label(), "倜儻級・Profound");
        assert_eq!(Difficulty::Lunatic2.as_str(), "lunatic2");
    }

    #[test]
    fn pretty_renders_compounds() {
        let hints = vec![
            Hint { answer: Loc::L, hint: "地".into() },
            Hint { answer: Loc::L, hint: "底".into() },
            Hint { answer: Loc::R, hint: "内".into() },
            Hint { answer: Loc::R, hint: "熱".into() },
        ];
        assert_eq!(pretty(&hints, None), "◯地　◯底　内◯　熱◯");
        assert_eq!(pretty(&hints, Some("心")), "心地　心底　内心　熱心");
    }
}
