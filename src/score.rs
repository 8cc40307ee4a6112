//! Shareable score card for a finished session.
//!
//! The card is the coin read as a 3×3 tile grid: edges are the four
//! always-revealed hints, corners are the four extra hints (revealed
//! clockwise from the top-left), the centre is the answer. Formatting is a
//! pure function of `(session, puzzle)`; the same inputs always yield the
//! byte-identical card.

use crate::daily;
use crate::domain::{GameResult, Mode, Puzzle, Session};
use crate::engine::attempt_limit;

const TILE_WIN: &str = "🟩";
const TILE_LOSE: &str = "🟥";
const TILE_HINT: &str = "🟨";
const TILE_HIDDEN: &str = "⬜";

/// Fixed product line, shared with the page header.
pub const TITLE: &str = "Kanjidle・漢字パズル";

/// Static link appended to every card.
pub const SHARE_URL: &str = "https://kanjidle.onecomp.one";

/// Corner indices run clockwise from the top-left, matching the order
/// extra hints come into view.
fn grid(centre: &str, corners_revealed: usize) -> String {
    let corner = |i: usize| if corners_revealed > i { TILE_HINT } else { TILE_HIDDEN };
    format!(
        "{}{}{}\n{}{}{}\n{}{}{}",
        corner(0),
        TILE_HINT,
        corner(1),
        TILE_HINT,
        centre,
        TILE_HINT,
        corner(3),
        TILE_HINT,
        corner(2),
    )
}

/// Render the share card.
///
/// # Panics
///
/// The session must be finished; calling this with `result == None` is a
/// caller bug and asserts.
pub fn format_share(session: &Session, puzzle: &Puzzle) -> String {
    assert!(session.is_terminal(), "score card requires a finished session");

    let date_label = if session.is_daily() {
        daily::format_day(session.date)
    } else {
        "ランダム".to_string()
    };
    let header = format!("{} {} {}", TITLE, date_label, session.mode.label());

    let won = session.result == GameResult::Win;
    let attempts = session.attempts.len();
    let grid = match (session.mode, won) {
        // The colored region grows outward: fewest attempts, bare ring.
        (Mode::Hidden, true) => grid(TILE_WIN, attempts.saturating_sub(1).min(4)),
        (Mode::Hidden, false) => grid(TILE_LOSE, 4),
        (Mode::Classic, true) => grid(TILE_WIN, 0),
        (Mode::Classic, false) => grid(TILE_LOSE, 0),
    };

    let footer = match (session.mode, won) {
        (Mode::Hidden, true) => format!("{}/{}", attempts, attempt_limit(puzzle)),
        (Mode::Hidden, false) => format!("X/{}", attempt_limit(puzzle)),
        (Mode::Classic, true) => format!("{}回目・ヒント{}個", attempts, session.hints),
        (Mode::Classic, false) => format!("{}回でギブ・ヒント{}個", attempts, session.hints),
    };

    format!("{header}\n{grid}\n{footer}\n{SHARE_URL}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::{Difficulty, Hint, Loc, SessionKey, RANDOM_DATE};
    use crate::engine::{apply, Action};

    fn puzzle(mode: Mode) -> Puzzle {
        let extra = if mode == Mode::Hidden {
            ["臓", "中", "安", "配"]
                .iter()
                .map(|h| Hint { answer: Loc::L, hint: (*h).to_string() })
                .collect()
        } else {
            Vec::new()
        };
        Puzzle {
            hints: vec![
                Hint { answer: Loc::L, hint: "地".into() },
                Hint { answer: Loc::R, hint: "内".into() },
            ],
            extra_hints: extra,
            answer: "心".to_string(),
            answer_meta: None,
            difficulty: Difficulty::Normal,
        }
    }

    // 2024-06-27 UTC midnight.
    const DATE: i64 = 1_719_446_400_000;

    fn session(mode: Mode) -> Session {
        Session::new(SessionKey { mode, difficulty: Difficulty::Normal, date: DATE })
    }

    #[test]
    fn hidden_win_on_the_last_attempt_fills_the_ring() {
        let p = puzzle(Mode::Hidden);
        let mut s = session(Mode::Hidden);
        for _ in 0..4 {
            s = apply(&s, &p, &Action::Skip).unwrap();
        }
        s = apply(&s, &p, &Action::Guess("心".into())).unwrap();
        assert_eq!(s.result, GameResult::Win);
        assert_eq!(
            format_share(&s, &p),
            "Kanjidle・漢字パズル 2024-06-27 隠しヒント\n\
             🟨🟨🟨\n\
             🟨🟩🟨\n\
             🟨🟨🟨\n\
             5/5\n\
             https://kanjidle.onecomp.one"
        );
    }

    #[test]
    fn hidden_first_try_win_leaves_corners_unrevealed() {
        let p = puzzle(Mode::Hidden);
        let s = apply(&session(Mode::Hidden), &p, &Action::Guess("心".into())).unwrap();
        assert_eq!(
            format_share(&s, &p),
            "Kanjidle・漢字パズル 2024-06-27 隠しヒント\n\
             ⬜🟨⬜\n\
             🟨🟩🟨\n\
             ⬜🟨⬜\n\
             1/5\n\
             https://kanjidle.onecomp.one"
        );
    }

    #[test]
    fn hidden_win_grids_differ_per_attempt_count() {
        let p = puzzle(Mode::Hidden);
        let mut cards = Vec::new();
        for n in 1..=5usize {
            let mut s = session(Mode::Hidden);
            for _ in 0..n - 1 {
                s = apply(&s, &p, &Action::Skip).unwrap();
            }
            s = apply(&s, &p, &Action::Guess("心".into())).unwrap();
            cards.push(format_share(&s, &p));
        }
        for pair in cards.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        // Corner reveal order is clockwise from top-left.
        assert!(cards[1].contains("🟨🟨⬜\n🟨🟩🟨\n⬜🟨⬜"));
        assert!(cards[2].contains("🟨🟨🟨\n🟨🟩🟨\n⬜🟨⬜"));
        assert!(cards[3].contains("🟨🟨🟨\n🟨🟩🟨\n⬜🟨🟨"));
    }

    #[test]
    fn hidden_loss_is_the_fixed_all_miss_card() {
        let p = puzzle(Mode::Hidden);
        let mut s = session(Mode::Hidden);
        for g in ["日", "月", "火", "水", "木"] {
            s = apply(&s, &p, &Action::Guess(g.into())).unwrap();
        }
        assert_eq!(s.result, GameResult::Lose);
        assert_eq!(
            format_share(&s, &p),
            "Kanjidle・漢字パズル 2024-06-27 隠しヒント\n\
             🟨🟨🟨\n\
             🟨🟥🟨\n\
             🟨🟨🟨\n\
             X/5\n\
             https://kanjidle.onecomp.one"
        );
    }

    #[test]
    fn classic_win_card_ignores_attempt_count() {
        let p = puzzle(Mode::Classic);
        let mut s = session(Mode::Classic);
        for g in ["日", "月", "火"] {
            s = apply(&s, &p, &Action::Guess(g.into())).unwrap();
        }
        s = apply(&s, &p, &Action::BuyHint).unwrap();
        s = apply(&s, &p, &Action::Guess("心".into())).unwrap();
        assert_eq!(
            format_share(&s, &p),
            "Kanjidle・漢字パズル 2024-06-27 クラシック\n\
             ⬜🟨⬜\n\
             🟨🟩🟨\n\
             ⬜🟨⬜\n\
             4回目・ヒント1個\n\
             https://kanjidle.onecomp.one"
        );

        // Same ring for a one-guess win; only the footer differs.
        let quick = apply(&session(Mode::Classic), &p, &Action::Guess("心".into())).unwrap();
        let card = format_share(&quick, &p);
        assert!(card.contains("⬜🟨⬜\n🟨🟩🟨\n⬜🟨⬜"));
        assert!(card.contains("1回目・ヒント0個"));
    }

    #[test]
    fn classic_forfeit_card() {
        let p = puzzle(Mode::Classic);
        let mut s = session(Mode::Classic);
        s = apply(&s, &p, &Action::Guess("日".into())).unwrap();
        s = apply(&s, &p, &Action::Guess("月".into())).unwrap();
        s = apply(&s, &p, &Action::Forfeit).unwrap();
        let card = format_share(&s, &p);
        assert!(card.contains("⬜🟨⬜\n🟨🟥🟨\n⬜🟨⬜"));
        assert!(card.contains("2回でギブ・ヒント0個"));
    }

    #[test]
    fn random_sessions_show_the_random_label() {
        let p = puzzle(Mode::Hidden);
        let mut s = Session::new(SessionKey {
            mode: Mode::Hidden,
            difficulty: Difficulty::Normal,
            date: RANDOM_DATE,
        });
        s = apply(&s, &p, &Action::Guess("心".into())).unwrap();
        assert!(format_share(&s, &p)
            .starts_with("Kanjidle・漢字パズル ランダム 隠しヒント"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let p = puzzle(Mode::Hidden);
        let s = apply(&session(Mode::Hidden), &p, &Action::Guess("心".into())).unwrap();
        assert_eq!(format_share(&s, &p), format_share(&s, &p));
    }

    #[test]
    #[should_panic(expected = "finished session")]
    fn unfinished_sessions_are_a_caller_bug() {
        let p = puzzle(Mode::Hidden);
        let s = session(Mode::Hidden);
        let _ = format_share(&s, &p);
    }
}
