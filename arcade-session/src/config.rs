use arcade_core::{AgeGroup, GameId, LevelId, Mode};

/// Per-level session parameters. Rates are probabilities in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyConfig {
    pub trials: u32,
    /// Response window per stimulus.
    pub stim_ms: u64,
    /// Pause between trials.
    pub iti_ms: u64,
    /// Flanker: chance the flankers point away from the target.
    pub incong_rate: f64,
    /// Go/No-Go: chance a trial is a Go trial.
    pub go_rate: f64,
    /// Oddball: chance a trial shows the bonus symbol.
    pub bonus_rate: f64,
}

/// Trial counts are clamped to this range after any adjustment.
pub const TRIALS_MIN: u32 = 6;
pub const TRIALS_MAX: u32 = 200;

/// The three named difficulty levels.
pub fn level_config(level: LevelId) -> DifficultyConfig {
    match level {
        LevelId::Beginner => DifficultyConfig {
            trials: 25,
            stim_ms: 1500,
            iti_ms: 450,
            incong_rate: 0.35,
            go_rate: 0.75,
            bonus_rate: 0.18,
        },
        LevelId::Explorer => DifficultyConfig {
            trials: 35,
            stim_ms: 1150,
            iti_ms: 420,
            incong_rate: 0.45,
            go_rate: 0.72,
            bonus_rate: 0.15,
        },
        LevelId::Expert => DifficultyConfig {
            trials: 45,
            stim_ms: 900,
            iti_ms: 380,
            incong_rate: 0.55,
            go_rate: 0.70,
            bonus_rate: 0.12,
        },
    }
}

/// What an age band pre-selects in the therapist panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgePreset {
    pub trials_factor: f64,
    pub slow: bool,
    pub default_level: LevelId,
}

pub fn age_preset(age: AgeGroup) -> AgePreset {
    match age {
        AgeGroup::From7To9 => AgePreset {
            trials_factor: 0.5,
            slow: true,
            default_level: LevelId::Beginner,
        },
        AgeGroup::From10To12 => AgePreset {
            trials_factor: 1.0,
            slow: true,
            default_level: LevelId::Explorer,
        },
        AgeGroup::From13To14 => AgePreset {
            trials_factor: 1.0,
            slow: false,
            default_level: LevelId::Expert,
        },
    }
}

/// Base level config adjusted for session length and pacing.
///
/// Zen and slow pacing stretch the stimulus window and the inter-trial
/// pause; neither touches the rates, so scoring pressure is unchanged.
pub fn effective_config(level: LevelId, zen: bool, trials_factor: f64, slow: bool) -> DifficultyConfig {
    let base = level_config(level);
    let trials = (base.trials as f64 * trials_factor).round() as i64;
    let trials = trials.clamp(TRIALS_MIN as i64, TRIALS_MAX as i64) as u32;
    let zen_scale = if zen { 1.1 } else { 1.0 };
    let stim_ms = (base.stim_ms as f64 * zen_scale * if slow { 1.35 } else { 1.0 }).round() as u64;
    let iti_ms = (base.iti_ms as f64 * zen_scale * if slow { 1.15 } else { 1.0 }).round() as u64;
    DifficultyConfig {
        trials,
        stim_ms,
        iti_ms,
        ..base
    }
}

/// Everything the runner needs to execute one session.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub game: GameId,
    pub level: LevelId,
    pub zen: bool,
    pub mode: Mode,
    pub config: DifficultyConfig,
}

impl SessionPlan {
    pub fn new(
        game: GameId,
        level: LevelId,
        zen: bool,
        mode: Mode,
        trials_factor: f64,
        slow: bool,
    ) -> Self {
        Self {
            game,
            level,
            zen,
            mode,
            config: effective_config(level, zen, trials_factor, slow),
        }
    }
}
