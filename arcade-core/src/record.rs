use serde::{Deserialize, Serialize};

use crate::game::{GameId, LevelId};

/// One completed session, appended to history and never mutated.
///
/// Field names follow the persisted JSON layout, so stores written by
/// earlier builds keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Completion time, epoch milliseconds.
    pub t: i64,
    pub game: GameId,
    pub level: LevelId,
    pub zen: bool,
    pub score: i32,
    /// Accuracy percent over answered trials, 0..=100.
    pub acc: u32,
    /// Mean reaction time over correct answered trials, if any.
    pub rt: Option<u32>,
    #[serde(rename = "streakBest")]
    pub streak_best: u32,
}
