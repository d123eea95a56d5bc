use chrono::Utc;

use arcade_core::{GameId, SessionRecord};

use crate::aggregate::{count_week_of, streak_days};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeId {
    FirstSession,
    TenSessions,
    FiftySessions,
    Streak3,
    Streak7,
    Weekly3,
    Weekly5,
    Acc90,
    Rt300,
    Score250,
    AllGames,
}

/// A derived achievement; recomputed from history on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub id: BadgeId,
    pub title: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub unlocked: bool,
}

/// The full badge board for the given (merged, deduplicated) history.
pub fn badges(history: &[SessionRecord]) -> Vec<Badge> {
    badges_at(history, Utc::now().timestamp_millis())
}

/// Same as [`badges`], with an explicit "now" for the weekly counts.
pub fn badges_at(history: &[SessionRecord], now_ms: i64) -> Vec<Badge> {
    let sessions = history.len();
    let streak = streak_days(history);
    let week_count = count_week_of(history, now_ms);

    let best_score = history.iter().map(|x| x.score).max().unwrap_or(0);
    let has_acc_90 = history.iter().any(|x| x.acc >= 90);
    let has_rt_300 = history
        .iter()
        .any(|x| x.rt.is_some_and(|rt| rt <= 300) && x.acc >= 70);
    let all_games = GameId::ALL
        .iter()
        .all(|g| history.iter().any(|x| x.game == *g));

    let entry = |id, title, description, emoji, unlocked| Badge {
        id,
        title,
        description,
        emoji,
        unlocked,
    };

    vec![
        entry(
            BadgeId::FirstSession,
            "First session",
            "You ran your very first session.",
            "✨",
            sessions >= 1,
        ),
        entry(
            BadgeId::TenSessions,
            "Regular",
            "10 sessions completed.",
            "📌",
            sessions >= 10,
        ),
        entry(
            BadgeId::FiftySessions,
            "Machine",
            "50 sessions completed.",
            "🏁",
            sessions >= 50,
        ),
        entry(
            BadgeId::Streak3,
            "3-day streak",
            "3 consecutive days with at least 1 session.",
            "🔥",
            streak >= 3,
        ),
        entry(
            BadgeId::Streak7,
            "7-day streak",
            "7 consecutive days. Rock solid.",
            "🌋",
            streak >= 7,
        ),
        entry(
            BadgeId::Weekly3,
            "Weekly goal",
            "3 sessions this week.",
            "🗓️",
            week_count >= 3,
        ),
        entry(
            BadgeId::Weekly5,
            "Perfect week",
            "5 sessions this week.",
            "🏆",
            week_count >= 5,
        ),
        entry(
            BadgeId::Acc90,
            "Sharpshooter",
            "Reach ≥ 90% accuracy in one session.",
            "🎯",
            has_acc_90,
        ),
        entry(
            BadgeId::Rt300,
            "Lightning",
            "Mean RT ≤ 300 ms (with ≥ 70% accuracy).",
            "⚡",
            has_rt_300,
        ),
        entry(
            BadgeId::Score250,
            "Big score",
            "Reach a score of 250 or more.",
            "🚀",
            best_score >= 250,
        ),
        entry(
            BadgeId::AllGames,
            "Explorer",
            "Play all 3 games at least once.",
            "🧭",
            all_games,
        ),
    ]
}
