pub mod config;
pub mod generate;
pub mod race;
pub mod runner;
pub mod score;

pub use config::{age_preset, effective_config, level_config, AgePreset, DifficultyConfig, SessionPlan};
pub use generate::generate;
pub use race::{await_response, CancelToken, ChannelInput, InputSource, RunGuard, ScriptedInput};
pub use runner::{NullObserver, SessionObserver, SessionRunner, SessionState, SessionSummary};
pub use score::compute_score;
