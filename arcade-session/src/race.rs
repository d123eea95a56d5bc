use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use arcade_core::{InputEvent, Key, ResponseEvent, ResponseKind, Trial};
use arcade_timing::{Clock, VirtualClock};

/// Session-level cancellation: a shared generation counter.
///
/// `begin` captures the current generation; bumping the counter (from
/// `stop`, another clone, or a Stop input) makes every outstanding
/// guard stale. Stale races and sleeps still unwind normally, their
/// results are simply discarded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    generation: Arc<AtomicU64>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run, invalidating all previous guards.
    pub fn begin(&self) -> RunGuard {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RunGuard {
            generation: self.generation.clone(),
            id,
        }
    }

    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Handle for one run of the session loop.
#[derive(Debug)]
pub struct RunGuard {
    generation: Arc<AtomicU64>,
    id: u64,
}

impl RunGuard {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.id
    }

    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Source of raw player input, injected into the response race.
pub trait InputSource {
    /// Blocks up to `timeout` for the next event; `None` on timeout.
    fn poll(&mut self, timeout: Duration) -> Option<InputEvent>;
}

/// Input fed from another thread (the UI event loop) over a channel.
pub struct ChannelInput {
    rx: Receiver<InputEvent>,
}

impl ChannelInput {
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // Sender gone: behave like silence for the full window.
                std::thread::sleep(timeout);
                None
            }
        }
    }
}

/// Pre-scripted input driving a [`VirtualClock`], for tests and
/// headless simulation. Each entry is (delay since the previous poll
/// returned, event); polling advances the shared virtual time.
pub struct ScriptedInput {
    events: VecDeque<(u64, InputEvent)>,
    clock: VirtualClock,
}

impl ScriptedInput {
    pub fn new(clock: VirtualClock, events: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        Self {
            events: events.into_iter().collect(),
            clock,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, timeout: Duration) -> Option<InputEvent> {
        let timeout_ms = timeout.as_millis() as u64;
        match self.events.front_mut() {
            Some((delay, _)) if *delay <= timeout_ms => {
                self.clock.advance(*delay);
                self.events.pop_front().map(|(_, event)| event)
            }
            Some((delay, _)) => {
                *delay -= timeout_ms;
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

/// Which inputs count as a response for this trial.
fn qualifies(trial: &Trial, event: InputEvent) -> Option<ResponseKind> {
    match (trial, event) {
        (Trial::Flanker { .. }, InputEvent::Key(k @ (Key::ArrowLeft | Key::ArrowRight))) => {
            Some(ResponseKind::Key(k))
        }
        (Trial::Gonogo { .. }, InputEvent::Key(Key::Space)) => Some(ResponseKind::Key(Key::Space)),
        (Trial::Oddball { .. }, InputEvent::Key(Key::Space)) => Some(ResponseKind::Key(Key::Space)),
        // Click-friendly input for the youngest players.
        (Trial::Oddball { .. }, InputEvent::Click) => Some(ResponseKind::Click),
        _ => None,
    }
}

/// Waits for the first qualifying response or the end of the window.
///
/// Non-qualifying events are ignored and the wait continues with
/// whatever window remains. A Stop event cancels the whole run via the
/// guard. Resolves exactly once; the caller discards the result when
/// the guard went stale mid-race.
pub fn await_response<C: Clock>(
    trial: &Trial,
    timeout_ms: u64,
    input: &mut dyn InputSource,
    clock: &C,
    guard: &RunGuard,
) -> Option<ResponseEvent> {
    let started = clock.now_ms();
    loop {
        if !guard.is_current() {
            return None;
        }
        let remaining = timeout_ms.saturating_sub(clock.elapsed_ms(started));
        if remaining == 0 {
            return None;
        }
        match input.poll(Duration::from_millis(remaining)) {
            None => continue, // window drains, loop exits via remaining == 0
            Some(InputEvent::Stop) => {
                guard.cancel();
                return None;
            }
            Some(event) => {
                if !guard.is_current() {
                    return None;
                }
                if let Some(kind) = qualifies(trial, event) {
                    let reaction_ms = clock.elapsed_ms(started) as u32;
                    trace!(?kind, reaction_ms, "response accepted");
                    return Some(ResponseEvent { kind, reaction_ms });
                }
                trace!(?event, "ignoring non-qualifying input");
            }
        }
    }
}
