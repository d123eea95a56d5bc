use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use arcade_core::{evaluate, Evaluation, Mode, SessionRecord, Trial};
use arcade_store::{ArcadeStore, Storage};
use arcade_timing::Clock;

use crate::config::SessionPlan;
use crate::generate::generate;
use crate::race::{await_response, CancelToken, InputSource, RunGuard};
use crate::score::compute_score;

/// Cancellable sleeps are sliced so a stop lands within one slice.
const SLEEP_SLICE_MS: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed,
    Stopped,
}

/// What the runner hands back after natural completion.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub record: SessionRecord,
    /// Best score for this (game, level, zen) after the update.
    pub best: i32,
}

/// Presentation hooks the UI layer plugs in. All optional.
pub trait SessionObserver {
    fn on_stimulus(&mut self, _trial: &Trial) {}
    /// Feedback after a trial; `None` in zen mode.
    fn on_feedback(&mut self, _text: Option<&'static str>) {}
    fn on_complete(&mut self, _summary: &SessionSummary) {}
    fn on_stopped(&mut self) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl SessionObserver for NullObserver {}

/// Per-trial feedback wording. The `answered` check comes first, so a
/// successful inhibition reads as an omission, matching the on-screen
/// behavior children and therapists already know.
pub fn feedback_line(mode: Mode, ev: &Evaluation) -> &'static str {
    match mode {
        Mode::Child => {
            if !ev.answered {
                "Take your time 😊"
            } else if ev.correct {
                "Great job! 🎉"
            } else {
                "Let's try again 🙂"
            }
        }
        Mode::Therapist => {
            if !ev.answered {
                "⏳ Omission"
            } else if ev.correct {
                "✅ Correct"
            } else {
                "❌ Incorrect"
            }
        }
    }
}

fn mean(values: &[u32]) -> Option<u32> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    Some((sum as f64 / values.len() as f64).round() as u32)
}

/// Runs sessions trial by trial: generate, race, evaluate, accumulate.
///
/// States: Idle → Running → Completed | Stopped, always restartable.
/// Cancellation is cooperative via the generation token; a stale guard
/// makes the loop exit without writing a record.
pub struct SessionRunner<R: Rng, C: Clock> {
    state: SessionState,
    token: CancelToken,
    rng: R,
    clock: C,
}

impl<R: Rng, C: Clock> SessionRunner<R, C> {
    pub fn new(rng: R, clock: C) -> Self {
        Self {
            state: SessionState::Idle,
            token: CancelToken::new(),
            rng,
            clock,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Clone of the cancellation token, for a stop button on another
    /// thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Invalidates any in-flight race or sleep. Takes effect at the
    /// loop's next generation check; no history record is written.
    pub fn stop(&mut self) {
        self.token.cancel();
        self.state = SessionState::Stopped;
    }

    /// Executes one full session. Returns `None` when stopped early.
    pub fn run<S: Storage>(
        &mut self,
        plan: &SessionPlan,
        input: &mut dyn InputSource,
        store: &mut ArcadeStore<S>,
        observer: &mut dyn SessionObserver,
    ) -> Option<SessionSummary> {
        let guard = self.token.begin();
        self.state = SessionState::Running;
        info!(
            game = plan.game.as_str(),
            level = plan.level.as_str(),
            zen = plan.zen,
            trials = plan.config.trials,
            "session started"
        );

        let mut answered = 0u32;
        let mut correct = 0u32;
        let mut streak = 0u32;
        let mut streak_max = 0u32;
        let mut correct_rts: Vec<u32> = Vec::new();

        for i in 0..plan.config.trials {
            if !guard.is_current() {
                return self.stopped(observer);
            }

            let trial = generate(plan.game, &plan.config, &mut self.rng);
            observer.on_stimulus(&trial);

            let response = await_response(&trial, plan.config.stim_ms, input, &self.clock, &guard);
            if !guard.is_current() {
                return self.stopped(observer);
            }

            let ev = evaluate(&trial, response.as_ref());
            if ev.answered {
                answered += 1;
            }
            if ev.correct {
                correct += 1;
                streak += 1;
                streak_max = streak_max.max(streak);
                if let Some(rt) = ev.reaction_ms {
                    correct_rts.push(rt);
                }
            } else {
                streak = 0;
            }
            debug!(
                trial = i,
                answered = ev.answered,
                correct = ev.correct,
                rt = ?ev.reaction_ms,
                streak,
                "trial evaluated"
            );

            let feedback = (!plan.zen).then(|| feedback_line(plan.mode, &ev));
            observer.on_feedback(feedback);

            self.pause(plan.config.iti_ms, &guard);
        }

        if !guard.is_current() {
            return self.stopped(observer);
        }

        let acc01 = correct as f64 / answered.max(1) as f64;
        let mean_rt = mean(&correct_rts);
        let score = compute_score(acc01, mean_rt, streak_max);
        let record = SessionRecord {
            t: self.clock.epoch_ms(),
            game: plan.game,
            level: plan.level,
            zen: plan.zen,
            score,
            acc: (acc01 * 100.0).round() as u32,
            rt: mean_rt,
            streak_best: streak_max,
        };

        store.push_history(record.clone());
        let best = store.record_best(plan.game, plan.level, plan.zen, score);
        self.state = SessionState::Completed;
        info!(score, acc = record.acc, rt = ?record.rt, streak = streak_max, best, "session complete");

        let summary = SessionSummary { record, best };
        observer.on_complete(&summary);
        Some(summary)
    }

    fn stopped(&mut self, observer: &mut dyn SessionObserver) -> Option<SessionSummary> {
        self.state = SessionState::Stopped;
        info!("session stopped, no record written");
        observer.on_stopped();
        None
    }

    /// Inter-trial pause, abandoned early once the guard goes stale.
    fn pause(&self, ms: u64, guard: &RunGuard) {
        let mut remaining = ms;
        while remaining > 0 && guard.is_current() {
            let step = remaining.min(SLEEP_SLICE_MS);
            self.clock.sleep(Duration::from_millis(step));
            remaining -= step;
        }
    }
}
