use serde::{Deserialize, Serialize};

/// The three attention mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    Flanker,
    Gonogo,
    Oddball,
}

impl GameId {
    pub const ALL: [GameId; 3] = [GameId::Flanker, GameId::Gonogo, GameId::Oddball];

    /// Player-facing game title.
    pub fn label(&self) -> &'static str {
        match self {
            GameId::Flanker => "Arrow Mania",
            GameId::Gonogo => "Stop & Go",
            GameId::Oddball => "Catch the Bonus",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Flanker => "flanker",
            GameId::Gonogo => "gonogo",
            GameId::Oddball => "oddball",
        }
    }
}

/// Named difficulty levels, exactly three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelId {
    Beginner,
    Explorer,
    Expert,
}

impl LevelId {
    pub const ALL: [LevelId; 3] = [LevelId::Beginner, LevelId::Explorer, LevelId::Expert];

    pub fn label(&self) -> &'static str {
        match self {
            LevelId::Beginner => "Beginner",
            LevelId::Explorer => "Explorer",
            LevelId::Expert => "Expert",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelId::Beginner => "beginner",
            LevelId::Explorer => "explorer",
            LevelId::Expert => "expert",
        }
    }
}

/// Age bands the therapist picks from; each maps to a session preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    From7To9,
    From10To12,
    From13To14,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [
        AgeGroup::From7To9,
        AgeGroup::From10To12,
        AgeGroup::From13To14,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::From7To9 => "7-9",
            AgeGroup::From10To12 => "10-12",
            AgeGroup::From13To14 => "13-14",
        }
    }

    pub fn parse(s: &str) -> Option<AgeGroup> {
        Self::ALL.iter().copied().find(|a| a.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::From7To9 => "7–9 years",
            AgeGroup::From10To12 => "10–12 years",
            AgeGroup::From13To14 => "13–14 years",
        }
    }
}

/// Presentation mode. Affects wording only, never scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Child,
    Therapist,
}

/// Instruction line shown before a session starts.
pub fn instruction(game: GameId, mode: Mode) -> &'static str {
    match mode {
        Mode::Child => match game {
            GameId::Flanker => "Look at the middle arrow. Press ← or →.",
            GameId::Gonogo => "Press SPACE on GO 🟢. Touch nothing on STOP 🔴.",
            GameId::Oddball => "Press SPACE (or click) only on ⭐ BONUS ⭐.",
        },
        Mode::Therapist => {
            "Flanker: ←/→ • Go/No-Go: Space on GO, inhibition on STOP • Oddball: respond on BONUS"
        }
    }
}
