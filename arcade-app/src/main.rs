mod bot;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arcade_core::game::instruction;
use arcade_core::{AgeGroup, GameId, LevelId, Mode};
use arcade_progress::{all_history, averages, badges, count_this_week, streak_days};
use arcade_session::{age_preset, SessionPlan, SessionRunner};
use arcade_store::{ArcadeStore, JsonFileStorage};
use arcade_timing::VirtualClock;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    Flanker,
    Gonogo,
    Oddball,
}

impl From<GameArg> for GameId {
    fn from(g: GameArg) -> Self {
        match g {
            GameArg::Flanker => GameId::Flanker,
            GameArg::Gonogo => GameId::Gonogo,
            GameArg::Oddball => GameId::Oddball,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Beginner,
    Explorer,
    Expert,
}

impl From<LevelArg> for LevelId {
    fn from(l: LevelArg) -> Self {
        match l {
            LevelArg::Beginner => LevelId::Beginner,
            LevelArg::Explorer => LevelId::Explorer,
            LevelArg::Expert => LevelId::Expert,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgeArg {
    #[value(name = "7-9")]
    Young,
    #[value(name = "10-12")]
    Middle,
    #[value(name = "13-14")]
    Teen,
}

impl From<AgeArg> for AgeGroup {
    fn from(a: AgeArg) -> Self {
        match a {
            AgeArg::Young => AgeGroup::From7To9,
            AgeArg::Middle => AgeGroup::From10To12,
            AgeArg::Teen => AgeGroup::From13To14,
        }
    }
}

/// Headless focus-arcade simulator: runs bot-played sessions against a
/// persistent store and prints the therapist dashboard.
#[derive(Parser, Debug)]
#[command(name = "focus-arcade", version)]
struct Args {
    /// Game to play.
    #[arg(long, value_enum, default_value = "flanker")]
    game: GameArg,

    /// Difficulty level; defaults to the age preset's level.
    #[arg(long, value_enum)]
    level: Option<LevelArg>,

    /// Age band preset (sets session length, pacing and level).
    #[arg(long, value_enum)]
    age: Option<AgeArg>,

    /// Zen mode: no per-trial feedback.
    #[arg(long)]
    zen: bool,

    /// Number of sessions to simulate.
    #[arg(long, default_value_t = 1)]
    sessions: u32,

    /// Probability the bot acts correctly on each trial.
    #[arg(long, default_value_t = 0.85)]
    accuracy: f64,

    /// RNG seed for reproducible runs.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Store file; created on first use.
    #[arg(long, default_value = "focus-arcade.json")]
    store: PathBuf,

    /// Export history as CSV to stdout after the runs.
    #[arg(long)]
    export_csv: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        (0.0..=1.0).contains(&args.accuracy),
        "--accuracy must be within 0..=1"
    );

    let mut store = ArcadeStore::new(JsonFileStorage::open(&args.store));

    if let Some(age) = args.age {
        let age: AgeGroup = age.into();
        let preset = age_preset(age);
        store.set_age(age);
        store.set_trials_factor(preset.trials_factor);
        store.set_slow(preset.slow);
    }

    let game: GameId = args.game.into();
    let level: LevelId = args
        .level
        .map(Into::into)
        .unwrap_or_else(|| age_preset(store.age()).default_level);
    let plan = SessionPlan::new(
        game,
        level,
        args.zen,
        Mode::Therapist,
        store.trials_factor(),
        store.slow(),
    );
    info!(
        game = game.as_str(),
        level = level.as_str(),
        zen = args.zen,
        trials = plan.config.trials,
        stim_ms = plan.config.stim_ms,
        iti_ms = plan.config.iti_ms,
        "session plan"
    );

    // Virtual time pinned to the wall clock: sessions run instantly
    // while records carry realistic timestamps.
    let clock = VirtualClock::new();
    let epoch_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    clock.advance(epoch_ms);

    println!("{}", instruction(game, Mode::Therapist));
    let mut runner = SessionRunner::new(StdRng::seed_from_u64(args.seed), clock.clone());
    for i in 0..args.sessions {
        let (mut eyes, mut hands) = bot::bot(args.seed ^ (i as u64 + 1), args.accuracy, clock.clone());
        let Some(summary) = runner.run(&plan, &mut hands, &mut store, &mut eyes) else {
            continue;
        };
        let rec = &summary.record;
        println!(
            "session {:>3}: score {:>5}  acc {:>3}%  rt {}  streak {}  (best {})",
            i + 1,
            rec.score,
            rec.acc,
            rec.rt.map(|v| format!("{v} ms")).unwrap_or_else(|| "—".into()),
            rec.streak_best,
            summary.best,
        );
    }

    let history = all_history(&store);
    let avg = averages(&history);
    println!();
    println!(
        "{} — {} / zen: {}",
        game.label(),
        level.label(),
        if args.zen { "on" } else { "off" }
    );
    println!(
        "sessions: {}  streak: {} day(s)  this week: {}",
        avg.sessions,
        streak_days(&history),
        count_this_week(&history)
    );
    if let (Some(score), Some(acc)) = (avg.avg_score, avg.avg_acc) {
        let rt = avg
            .avg_rt
            .map(|v| format!("{v} ms"))
            .unwrap_or_else(|| "—".into());
        println!("averages: score {score}, accuracy {acc}%, rt {rt}");
    }

    println!();
    for badge in badges(&history) {
        let mark = if badge.unlocked { "●" } else { "○" };
        println!("{} {} {} — {}", mark, badge.emoji, badge.title, badge.description);
    }

    if args.export_csv {
        println!();
        println!("{}", store.export_csv());
    }

    Ok(())
}
