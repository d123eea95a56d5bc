use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use arcade_core::{GameId, LevelId, SessionRecord};

use crate::storage::Storage;

const HISTORY_KEY: &str = "focusArcade.history.v1";
const BEST_PREFIX: &str = "focusArcade.best.v1";

/// Retention cap: only the most recent entries are kept on append.
pub const HISTORY_CAP: usize = 200;
/// Per-(game, level, zen) query cap.
pub const FILTER_CAP: usize = 40;

pub const CSV_HEADER: &str = "date,game,level,zen,score,acc,rt,streakBest";

/// Persisted session log plus per-configuration best scores.
///
/// Append-only over an injected [`Storage`]; every read degrades to an
/// empty default when the underlying value is missing or corrupt.
pub struct ArcadeStore<S: Storage> {
    storage: S,
}

impl<S: Storage> ArcadeStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Full stored history, oldest first.
    pub fn history(&self) -> Vec<SessionRecord> {
        let Some(raw) = self.storage.get(HISTORY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(err) => {
                debug!(%err, "unreadable history, treating as empty");
                Vec::new()
            }
        }
    }

    /// Appends one record, dropping the oldest entries beyond the cap.
    pub fn push_history(&mut self, record: SessionRecord) {
        let mut list = self.history();
        list.push(record);
        if list.len() > HISTORY_CAP {
            list.drain(..list.len() - HISTORY_CAP);
        }
        // SessionRecord serialization cannot fail.
        let raw = serde_json::to_string(&list).unwrap_or_default();
        self.storage.set(HISTORY_KEY, &raw);
    }

    /// Last [`FILTER_CAP`] records matching (game, level, zen), in
    /// stored order (oldest of the window first).
    pub fn filter_history(&self, game: GameId, level: LevelId, zen: bool) -> Vec<SessionRecord> {
        let matches: Vec<SessionRecord> = self
            .history()
            .into_iter()
            .filter(|h| h.game == game && h.level == level && h.zen == zen)
            .collect();
        let skip = matches.len().saturating_sub(FILTER_CAP);
        matches.into_iter().skip(skip).collect()
    }

    pub fn clear_history(&mut self) {
        self.storage.remove(HISTORY_KEY);
    }

    /// Pretty-printed JSON array of the full history.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.history()).unwrap_or_else(|_| "[]".to_string())
    }

    /// CSV export: fixed header, one quoted-field row per record.
    pub fn export_csv(&self) -> String {
        let mut lines = vec![CSV_HEADER.to_string()];
        for h in self.history() {
            let date = DateTime::<Utc>::from_timestamp_millis(h.t)
                .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_default();
            let rt = h.rt.map(|v| v.to_string()).unwrap_or_default();
            lines.push(format!(
                "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"",
                date,
                h.game.as_str(),
                h.level.as_str(),
                h.zen,
                h.score,
                h.acc,
                rt,
                h.streak_best,
            ));
        }
        lines.join("\n")
    }

    fn best_key(game: GameId, level: LevelId, zen: bool) -> String {
        format!(
            "{}.{}.{}.{}",
            BEST_PREFIX,
            game.as_str(),
            level.as_str(),
            if zen { "zen" } else { "std" }
        )
    }

    /// Best recorded score for one configuration, 0 when none.
    pub fn best(&self, game: GameId, level: LevelId, zen: bool) -> i32 {
        self.storage
            .get(&Self::best_key(game, level, zen))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Stores `score` if it beats the previous best; returns the best
    /// either way.
    pub fn record_best(&mut self, game: GameId, level: LevelId, zen: bool, score: i32) -> i32 {
        let prev = self.best(game, level, zen);
        if score > prev {
            self.storage
                .set(&Self::best_key(game, level, zen), &score.to_string());
        }
        prev.max(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn record(t: i64, game: GameId, score: i32) -> SessionRecord {
        SessionRecord {
            t,
            game,
            level: LevelId::Beginner,
            zen: false,
            score,
            acc: 90,
            rt: Some(500),
            streak_best: 5,
        }
    }

    fn store() -> ArcadeStore<MemoryStorage> {
        ArcadeStore::new(MemoryStorage::new())
    }

    #[test]
    fn retention_keeps_most_recent_200() {
        let mut store = store();
        for i in 0..250 {
            store.push_history(record(i, GameId::Flanker, i as i32));
        }
        let history = store.history();
        assert_eq!(history.len(), HISTORY_CAP);
        // The 50 oldest are gone, order preserved for the rest.
        assert_eq!(history.first().unwrap().t, 50);
        assert_eq!(history.last().unwrap().t, 249);
        assert!(history.windows(2).all(|w| w[0].t < w[1].t));
    }

    #[test]
    fn filter_matches_and_caps_at_40() {
        let mut store = store();
        for i in 0..60 {
            store.push_history(record(i, GameId::Flanker, i as i32));
            store.push_history(record(1000 + i, GameId::Gonogo, i as i32));
        }
        let filtered = store.filter_history(GameId::Flanker, LevelId::Beginner, false);
        assert_eq!(filtered.len(), FILTER_CAP);
        assert!(filtered.iter().all(|h| h.game == GameId::Flanker));
        // Most recent 40 matches, oldest of the window first.
        assert_eq!(filtered.first().unwrap().t, 20);
        assert_eq!(filtered.last().unwrap().t, 59);

        assert!(store
            .filter_history(GameId::Flanker, LevelId::Expert, false)
            .is_empty());
    }

    #[test]
    fn corrupt_history_reads_as_empty() {
        let mut store = store();
        store.storage_mut().set("focusArcade.history.v1", "definitely not json");
        assert!(store.history().is_empty());
        // And appending over garbage starts a fresh log.
        store.push_history(record(1, GameId::Oddball, 10));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn clear_then_query_is_empty() {
        let mut store = store();
        store.push_history(record(1, GameId::Flanker, 10));
        store.clear_history();
        for game in GameId::ALL {
            for level in LevelId::ALL {
                for zen in [false, true] {
                    assert!(store.filter_history(game, level, zen).is_empty());
                }
            }
        }
        assert_eq!(store.export_csv(), CSV_HEADER);
    }

    #[test]
    fn csv_rows_are_quoted_with_iso_dates() {
        let mut store = store();
        store.push_history(SessionRecord {
            t: 0,
            game: GameId::Gonogo,
            level: LevelId::Explorer,
            zen: true,
            score: 1132,
            acc: 96,
            rt: None,
            streak_best: 14,
        });
        let csv = store.export_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(
                "\"1970-01-01T00:00:00.000Z\",\"gonogo\",\"explorer\",\"true\",\"1132\",\"96\",\"\",\"14\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn export_json_round_trips() {
        let mut store = store();
        store.push_history(record(5, GameId::Oddball, 321));
        let parsed: Vec<SessionRecord> = serde_json::from_str(&store.export_json()).unwrap();
        assert_eq!(parsed, store.history());
    }

    #[test]
    fn best_score_only_improves() {
        let mut store = store();
        assert_eq!(store.best(GameId::Flanker, LevelId::Expert, true), 0);
        assert_eq!(store.record_best(GameId::Flanker, LevelId::Expert, true, 800), 800);
        assert_eq!(store.record_best(GameId::Flanker, LevelId::Expert, true, 500), 800);
        assert_eq!(store.best(GameId::Flanker, LevelId::Expert, true), 800);
        // Other configurations are independent.
        assert_eq!(store.best(GameId::Flanker, LevelId::Expert, false), 0);
    }

    #[test]
    fn unparseable_best_reads_as_zero() {
        let mut store = store();
        store
            .storage_mut()
            .set("focusArcade.best.v1.flanker.beginner.std", "NaN");
        assert_eq!(store.best(GameId::Flanker, LevelId::Beginner, false), 0);
    }
}
