use std::sync::Arc;

use crate::{
    core::{Config, EffectRegistry, Glowvisor},
    events::Bus,
    presenter::PresenterRef,
    subscribers::{Subscribe, SubscriberSet},
    timer::{TimerRef, TokioTimer},
};

/// Builder for constructing a [`Glowvisor`] with optional collaborators.
pub struct GlowvisorBuilder {
    cfg: Config,
    presenter: PresenterRef,
    timer: Option<TimerRef>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl GlowvisorBuilder {
    /// Creates a new builder with the given configuration and presenter.
    pub fn new(cfg: Config, presenter: PresenterRef) -> Self {
        Self {
            cfg,
            presenter,
            timer: None,
            subscribers: Vec::new(),
        }
    }

    /// Replaces the default [`TokioTimer`] (e.g. with a host scheduler).
    pub fn with_timer(mut self, timer: TimerRef) -> Self {
        self.timer = Some(timer);
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive registry events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the runtime. Must be called inside a tokio runtime (spawns workers).
    pub fn build(self) -> Arc<Glowvisor> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers, bus.clone());
        let timer = self
            .timer
            .unwrap_or_else(|| Arc::new(TokioTimer::new()) as TimerRef);

        let registry = EffectRegistry::new(&self.cfg, self.presenter, timer, bus.clone());
        Arc::new(Glowvisor::new_internal(self.cfg, bus, registry, subs))
    }
}
