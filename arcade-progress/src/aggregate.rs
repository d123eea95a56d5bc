use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};

use arcade_core::{GameId, LevelId, SessionRecord};
use arcade_store::{ArcadeStore, Storage};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// Day-to-day gaps within this band still count as consecutive,
/// tolerating DST shifts and clock skew.
const STREAK_GAP_MIN_MS: i64 = (DAY_MS as f64 * 0.8) as i64;
const STREAK_GAP_MAX_MS: i64 = (DAY_MS as f64 * 1.2) as i64;

/// Every stored record across all (game, level, zen) views, newest
/// first, de-duplicated by the record's identity tuple.
pub fn all_history<S: Storage>(store: &ArcadeStore<S>) -> Vec<SessionRecord> {
    let mut merged = Vec::new();
    for game in GameId::ALL {
        for level in LevelId::ALL {
            for zen in [false, true] {
                merged.extend(store.filter_history(game, level, zen));
            }
        }
    }
    merged.sort_by(|a, b| b.t.cmp(&a.t));
    let mut seen = HashSet::new();
    merged.retain(|x| seen.insert((x.t, x.score, x.game, x.level, x.zen)));
    merged
}

/// Start of the UTC calendar day containing `t`.
fn day_start_ms(t: i64) -> i64 {
    t.div_euclid(DAY_MS) * DAY_MS
}

/// Start of the Monday-based ISO week containing `t`.
fn week_start_ms(t: i64) -> i64 {
    let days_from_monday = DateTime::<Utc>::from_timestamp_millis(t)
        .map(|d| d.weekday().num_days_from_monday() as i64)
        .unwrap_or(0);
    day_start_ms(t) - days_from_monday * DAY_MS
}

/// Consecutive days with at least one session, counting back from the
/// most recent active day and stopping at the first out-of-band gap.
pub fn streak_days(history: &[SessionRecord]) -> u32 {
    let mut days: Vec<i64> = history.iter().map(|x| day_start_ms(x.t)).collect();
    days.sort_unstable();
    days.dedup();
    days.reverse();

    let Some(&first) = days.first() else { return 0 };
    let mut streak = 1;
    let mut cur = first;
    for &day in &days[1..] {
        let gap = cur - day;
        if (STREAK_GAP_MIN_MS..=STREAK_GAP_MAX_MS).contains(&gap) {
            streak += 1;
            cur = day;
        } else {
            break;
        }
    }
    streak
}

/// Sessions whose Monday-based week matches the week of `now_ms`.
pub fn count_week_of(history: &[SessionRecord], now_ms: i64) -> usize {
    let week = week_start_ms(now_ms);
    history
        .iter()
        .filter(|x| week_start_ms(x.t) == week)
        .count()
}

pub fn count_this_week(history: &[SessionRecord]) -> usize {
    count_week_of(history, Utc::now().timestamp_millis())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Averages {
    pub sessions: usize,
    pub avg_score: Option<i32>,
    /// Mean accuracy percent, rounded.
    pub avg_acc: Option<u32>,
    /// Mean reaction time over records that have one.
    pub avg_rt: Option<u32>,
}

pub fn averages(history: &[SessionRecord]) -> Averages {
    if history.is_empty() {
        return Averages {
            sessions: 0,
            avg_score: None,
            avg_acc: None,
            avg_rt: None,
        };
    }

    let n = history.len();
    let avg_score =
        (history.iter().map(|x| x.score as f64).sum::<f64>() / n as f64).round() as i32;
    let avg_acc = (history.iter().map(|x| x.acc as f64).sum::<f64>() / n as f64).round() as u32;

    let rts: Vec<u32> = history.iter().filter_map(|x| x.rt).collect();
    let avg_rt = if rts.is_empty() {
        None
    } else {
        Some((rts.iter().map(|&v| v as f64).sum::<f64>() / rts.len() as f64).round() as u32)
    };

    Averages {
        sessions: n,
        avg_score: Some(avg_score),
        avg_acc: Some(avg_acc),
        avg_rt,
    }
}
