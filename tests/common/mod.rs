#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use glowvisor::{
    BackendError, Bus, Color, Config, EffectRegistry, EntityId, Presenter, Timer, TimerHandle,
};

/// One call made to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub observer: String,
    pub subject: String,
    pub enabled: bool,
    pub color: Option<Color>,
}

/// Presenter that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingPresenter {
    calls: Mutex<Vec<Call>>,
    visible: Mutex<HashMap<(String, String), Option<Color>>>,
    failing: AtomicBool,
}

impl RecordingPresenter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("calls lock").clear();
    }

    pub fn disables(&self, observer: &str, subject: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| !c.enabled && c.observer == observer && c.subject == subject)
            .count()
    }

    /// What the observer currently sees on `subject`: `Some(color)` while glowing.
    pub fn visible(&self, observer: &str, subject: &str) -> Option<Option<Color>> {
        self.visible
            .lock()
            .expect("visible lock")
            .get(&(observer.to_string(), subject.to_string()))
            .copied()
    }
}

impl Presenter for RecordingPresenter {
    fn set_highlight(
        &self,
        observer: &EntityId,
        subject: &EntityId,
        enabled: bool,
        color: Option<Color>,
    ) -> Result<(), BackendError> {
        self.calls.lock().expect("calls lock").push(Call {
            observer: observer.to_string(),
            subject: subject.to_string(),
            enabled,
            color,
        });
        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::new("observer unreachable"));
        }
        let key = (observer.to_string(), subject.to_string());
        let mut visible = self.visible.lock().expect("visible lock");
        if enabled {
            visible.insert(key, color);
        } else {
            visible.remove(&key);
        }
        Ok(())
    }
}

struct Scheduled {
    due: Duration,
    token: CancellationToken,
    callback: BoxFuture<'static, ()>,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    queue: Vec<Scheduled>,
}

/// Manually driven timer facility: nothing fires until the test advances the clock.
#[derive(Default)]
pub struct ManualTimer {
    state: Mutex<ClockState>,
}

impl ManualTimer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Callbacks that were scheduled, have not fired and were not cancelled.
    pub fn pending(&self) -> usize {
        self.state
            .lock()
            .expect("clock lock")
            .queue
            .iter()
            .filter(|s| !s.token.is_cancelled())
            .count()
    }

    /// Moves the clock forward, firing every uncancelled callback that comes due,
    /// in deadline order.
    pub async fn advance(&self, by: Duration) {
        let target = self.state.lock().expect("clock lock").now + by;
        while let Some(cb) = self.pop_due(target, false) {
            cb.await;
        }
        self.state.lock().expect("clock lock").now = target;
    }

    /// Like [`advance`](Self::advance), but also runs callbacks whose handle was
    /// cancelled: models a cancel that lost the race against an in-flight callback.
    pub async fn advance_ignoring_cancel(&self, by: Duration) {
        let target = self.state.lock().expect("clock lock").now + by;
        while let Some(cb) = self.pop_due(target, true) {
            cb.await;
        }
        self.state.lock().expect("clock lock").now = target;
    }

    fn pop_due(&self, target: Duration, include_cancelled: bool) -> Option<BoxFuture<'static, ()>> {
        let mut state = self.state.lock().expect("clock lock");
        if !include_cancelled {
            state.queue.retain(|s| !s.token.is_cancelled());
        }
        let idx = state
            .queue
            .iter()
            .enumerate()
            .filter(|(_, s)| s.due <= target)
            .min_by_key(|(_, s)| s.due)
            .map(|(i, _)| i)?;
        let next = state.queue.remove(idx);
        state.now = next.due;
        Some(next.callback)
    }
}

impl Timer for ManualTimer {
    fn schedule_once(&self, delay: Duration, callback: BoxFuture<'static, ()>) -> TimerHandle {
        let token = CancellationToken::new();
        let mut state = self.state.lock().expect("clock lock");
        let due = state.now + delay;
        state.queue.push(Scheduled {
            due,
            token: token.clone(),
            callback,
        });
        TimerHandle::new(token)
    }
}

/// Registry wired to a recording presenter and a manual clock.
pub struct Harness {
    pub registry: Arc<EffectRegistry>,
    pub presenter: Arc<RecordingPresenter>,
    pub timer: Arc<ManualTimer>,
    pub bus: Bus,
}

impl Harness {
    pub fn new() -> Self {
        let presenter = RecordingPresenter::new();
        let timer = ManualTimer::new();
        let bus = Bus::new(256);
        let registry = EffectRegistry::new(
            &Config::default(),
            presenter.clone(),
            timer.clone(),
            bus.clone(),
        );
        Self {
            registry,
            presenter,
            timer,
            bus,
        }
    }
}

pub fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

pub fn units(n: u64) -> Duration {
    Duration::from_secs(n)
}
