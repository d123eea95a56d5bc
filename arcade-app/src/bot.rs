//! Scripted player used by the headless simulator.
//!
//! The bot watches stimuli through the observer hook and answers
//! through the input source, the same seams a real UI would use. The
//! two halves share state over an `Rc` since sessions run on one
//! thread.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use arcade_core::{InputEvent, Key, Trial};
use arcade_session::{InputSource, SessionObserver};
use arcade_timing::VirtualClock;

struct BotState {
    rng: StdRng,
    accuracy: f64,
    /// (delay ms, event) queued for the current trial, if the bot
    /// decided to press anything at all.
    pending: Option<(u64, InputEvent)>,
}

impl BotState {
    fn plan_response(&mut self, trial: &Trial) {
        let act_correctly = self.rng.random_bool(self.accuracy);
        let delay = self.rng.random_range(280..=650);

        self.pending = match trial {
            Trial::Flanker { correct, .. } => {
                let dir = if act_correctly {
                    *correct
                } else {
                    correct.opposite()
                };
                Some((delay, InputEvent::Key(dir.key())))
            }
            t if t.is_inhibition() => {
                // A lapse here is a false alarm.
                (!act_correctly).then_some((delay, InputEvent::Key(Key::Space)))
            }
            _ => act_correctly.then_some((delay, InputEvent::Key(Key::Space))),
        };
    }
}

pub struct BotEyes(Rc<RefCell<BotState>>);

impl SessionObserver for BotEyes {
    fn on_stimulus(&mut self, trial: &Trial) {
        self.0.borrow_mut().plan_response(trial);
    }
}

pub struct BotHands {
    state: Rc<RefCell<BotState>>,
    clock: VirtualClock,
}

impl InputSource for BotHands {
    fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        let timeout_ms = timeout.as_millis() as u64;
        let mut state = self.state.borrow_mut();
        match state.pending.take() {
            Some((delay, event)) if delay <= timeout_ms => {
                self.clock.advance(delay);
                Some(event)
            }
            Some((delay, event)) => {
                state.pending = Some((delay - timeout_ms, event));
                self.clock.advance(timeout_ms);
                None
            }
            None => {
                self.clock.advance(timeout_ms);
                None
            }
        }
    }
}

/// Builds the observer/input pair for one simulated session.
pub fn bot(seed: u64, accuracy: f64, clock: VirtualClock) -> (BotEyes, BotHands) {
    let state = Rc::new(RefCell::new(BotState {
        rng: StdRng::seed_from_u64(seed),
        accuracy,
        pending: None,
    }));
    (
        BotEyes(state.clone()),
        BotHands { state, clock },
    )
}
