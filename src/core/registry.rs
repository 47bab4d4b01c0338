//! # Effect registry - at most one timed highlight per (observer, subject).
//!
//! The registry owns every live [`Entry`] and the expiry timer attached to it. All
//! mutation goes through four operations:
//!
//! ```text
//! grant(o, s, color, dur)  ─┐
//! revoke(o, s)             ─┼─► stripe(o, s).lock() ─► entries.write() ─► presenter
//! expire_if_current(..)    ─┘
//! revoke_all(o, roster)    ──► revoke(o, s) for s in roster
//! drain()                  ──► closing.cancel() ─► entries.write() ─► take all, cancel timers
//! ```
//!
//! ## Rules
//! - Per-pair exclusion: every operation on a pair runs under that pair's stripe
//!   lock, so cancel + unlink + install are atomic for that pair.
//! - A timer is cancelled **before** its entry is unlinked.
//! - An expiry callback only acts if the entry still carries its token; otherwise it
//!   is a no-op (published as `ExpirySuperseded`).
//! - Outer (observer) buckets are pruned as soon as they become empty.
//! - The presenter is called while the stripe is held and the map lock is released.
//! - Lock order is always stripe → entries; drain takes entries only.

use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::core::entry::{EffectInfo, Entry, EntryToken};
use crate::core::key::{EntityId, PairKey};
use crate::error::EffectError;
use crate::events::{Bus, Event, EventKind};
use crate::presenter::{Color, PresenterRef};
use crate::timer::{TimerHandle, TimerRef};

/// observer → (subject → entry)
type Buckets = HashMap<EntityId, HashMap<EntityId, Entry>>;

/// Concurrent registry of active highlights.
pub struct EffectRegistry {
    entries: RwLock<Buckets>,
    stripes: Box<[Mutex<()>]>,
    hasher: RandomState,
    next_token: AtomicU64,
    presenter: PresenterRef,
    timer: TimerRef,
    bus: Bus,
    closing: CancellationToken,
    me: Weak<EffectRegistry>,
}

impl EffectRegistry {
    /// Creates a new registry.
    pub fn new(cfg: &Config, presenter: PresenterRef, timer: TimerRef, bus: Bus) -> Arc<Self> {
        let stripes = (0..cfg.lock_stripes_clamped())
            .map(|_| Mutex::new(()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Arc::new_cyclic(|me| Self {
            entries: RwLock::new(HashMap::new()),
            stripes,
            hasher: RandomState::new(),
            next_token: AtomicU64::new(1),
            presenter,
            timer,
            bus,
            closing: CancellationToken::new(),
            me: me.clone(),
        })
    }

    /// Enables the highlight of `subject` for `observer` and records it.
    ///
    /// Any existing entry for the pair is cancelled and removed first. With a
    /// positive `duration` an expiry is scheduled; `None` or zero means the
    /// highlight stays until revoked.
    ///
    /// ### Errors
    /// - [`EffectError::InvalidArgument`] for blank identifiers (no side effects)
    /// - [`EffectError::ShuttingDown`] once [`drain`](Self::drain) has begun
    /// - [`EffectError::Backend`] if the presenter fails; the pair is left without an entry
    pub async fn grant(
        &self,
        observer: &EntityId,
        subject: &EntityId,
        color: Option<Color>,
        duration: Option<Duration>,
    ) -> Result<(), EffectError> {
        let key = match pair_key(observer, subject) {
            Ok(k) => k,
            Err(e) => {
                self.publish_rejected(observer, subject, &e);
                return Err(e);
            }
        };
        let duration = duration.filter(|d| !d.is_zero());

        let _guard = self.stripe(&key).lock().await;
        if self.closing.is_cancelled() {
            let e = EffectError::ShuttingDown;
            self.publish_rejected(observer, subject, &e);
            return Err(e);
        }

        let replaced = self.unlink(&key).await.is_some();

        if let Err(e) = self.presenter.set_highlight(observer, subject, true, color) {
            tracing::debug!(presenter = self.presenter.name(), pair = %key, reason = %e.reason, "enable failed");
            self.bus.publish(
                Event::new(EventKind::BackendFailed)
                    .with_pair(&key)
                    .with_color(color)
                    .with_reason(e.reason.as_str()),
            );
            return Err(e.into());
        }

        let token = EntryToken(self.next_token.fetch_add(1, Ordering::Relaxed));
        let entry = Entry {
            token,
            color,
            duration,
            timer: duration.map(|d| self.schedule_expiry(&key, token, d)),
        };

        {
            let mut buckets = self.entries.write().await;
            if self.closing.is_cancelled() {
                entry.cancel_timer();
                drop(buckets);
                let e = EffectError::ShuttingDown;
                self.publish_rejected(observer, subject, &e);
                return Err(e);
            }
            buckets
                .entry(key.observer.clone())
                .or_default()
                .insert(key.subject.clone(), entry);
        }

        let mut ev = Event::new(EventKind::EffectGranted)
            .with_pair(&key)
            .with_color(color);
        if let Some(d) = duration {
            ev = ev.with_duration(d);
        }
        if replaced {
            ev = ev.with_reason("replaced");
        }
        self.bus.publish(ev);
        Ok(())
    }

    /// Cancels and removes the pair's entry, then disables the highlight.
    ///
    /// Revoking a pair without an entry succeeds without calling the presenter.
    /// If the presenter fails the entry is still gone and the error is returned.
    pub async fn revoke(&self, observer: &EntityId, subject: &EntityId) -> Result<(), EffectError> {
        let key = pair_key(observer, subject)?;

        let _guard = self.stripe(&key).lock().await;
        if self.unlink(&key).await.is_none() {
            return Ok(());
        }

        let result = self.presenter.set_highlight(observer, subject, false, None);
        let mut ev = Event::new(EventKind::EffectRevoked).with_pair(&key);
        if let Err(e) = &result {
            ev = ev.with_reason(e.reason.as_str());
        }
        self.bus.publish(ev);
        result.map_err(EffectError::from)
    }

    /// Revokes `observer`'s highlight on every subject in `roster`.
    ///
    /// Fire-and-forget: individual failures are skipped.
    pub async fn revoke_all(&self, observer: &EntityId, roster: &[EntityId]) {
        for subject in roster {
            if let Err(e) = self.revoke(observer, subject).await {
                tracing::debug!(observer = %observer, subject = %subject, err = e.as_label(), "revoke_all: skipping failed revoke");
            }
        }
    }

    /// Revokes every highlight the registry currently tracks for `observer`.
    ///
    /// Unlike [`revoke_all`](Self::revoke_all) the roster comes from the registry's
    /// own keys, so entries for subjects that left the host roster are cleaned up too.
    pub async fn revoke_tracked(&self, observer: &EntityId) {
        let roster = self.subjects_of(observer).await;
        self.revoke_all(observer, &roster).await;
    }

    /// Removes the entry and disables the highlight, but only if the entry is still
    /// the one `token` was issued for.
    pub(crate) async fn expire_if_current(&self, key: &PairKey, token: EntryToken) {
        let _guard = self.stripe(key).lock().await;

        let expired = {
            let mut buckets = self.entries.write().await;
            take_entry(&mut buckets, key, |e| e.token == token)
        };

        if expired.is_none() {
            self.bus
                .publish(Event::new(EventKind::ExpirySuperseded).with_pair(key));
            return;
        }

        if let Err(e) = self
            .presenter
            .set_highlight(&key.observer, &key.subject, false, None)
        {
            tracing::debug!(presenter = self.presenter.name(), pair = %key, reason = %e.reason, "expiry revert failed");
        }
        self.bus
            .publish(Event::new(EventKind::EffectExpired).with_pair(key));
    }

    /// Takes ownership of every entry, cancels every timer and discards the entries.
    ///
    /// The presenter is **not** called. After this returns, and for any grant that
    /// raced it, no timer scheduled by this registry remains pending. Further grants
    /// fail with [`EffectError::ShuttingDown`].
    ///
    /// Returns the number of entries discarded.
    pub async fn drain(&self) -> usize {
        self.closing.cancel();

        let drained = std::mem::take(&mut *self.entries.write().await);
        let mut count = 0;
        for entry in drained.into_values().flat_map(HashMap::into_values) {
            entry.cancel_timer();
            count += 1;
        }

        self.bus
            .publish(Event::new(EventKind::RegistryDrained).with_count(count));
        count
    }

    /// True once [`drain`](Self::drain) has begun.
    pub fn is_draining(&self) -> bool {
        self.closing.is_cancelled()
    }

    /// Returns a view of the pair's entry, if any.
    pub async fn get(&self, observer: &EntityId, subject: &EntityId) -> Option<EffectInfo> {
        let buckets = self.entries.read().await;
        buckets.get(observer)?.get(subject).map(Entry::info)
    }

    /// True if the pair has an entry.
    pub async fn contains(&self, observer: &EntityId, subject: &EntityId) -> bool {
        self.get(observer, subject).await.is_some()
    }

    /// Number of live entries across all observers.
    pub async fn len(&self) -> usize {
        self.entries.read().await.values().map(HashMap::len).sum()
    }

    /// True if no entries are live.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Number of observers with at least one entry.
    pub async fn observer_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns the sorted subjects `observer` currently has entries for.
    pub async fn subjects_of(&self, observer: &EntityId) -> Vec<EntityId> {
        let buckets = self.entries.read().await;
        let mut subjects: Vec<EntityId> = buckets
            .get(observer)
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default();
        subjects.sort_unstable();
        subjects
    }

    /// Number of entries with an uncancelled expiry timer.
    pub async fn pending_timers(&self) -> usize {
        let buckets = self.entries.read().await;
        buckets
            .values()
            .flat_map(HashMap::values)
            .filter(|e| e.timer.as_ref().is_some_and(|t| !t.is_cancelled()))
            .count()
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    fn stripe(&self, key: &PairKey) -> &Mutex<()> {
        let idx = (self.hasher.hash_one(key) % self.stripes.len() as u64) as usize;
        &self.stripes[idx]
    }

    /// Cancels the pair's timer, then removes its entry. Caller holds the stripe.
    async fn unlink(&self, key: &PairKey) -> Option<Entry> {
        let mut buckets = self.entries.write().await;
        take_entry(&mut buckets, key, |e| {
            e.cancel_timer();
            true
        })
    }

    fn schedule_expiry(&self, key: &PairKey, token: EntryToken, delay: Duration) -> TimerHandle {
        let me = self.me.clone();
        let key = key.clone();
        self.timer.schedule_once(
            delay,
            async move {
                if let Some(registry) = me.upgrade() {
                    registry.expire_if_current(&key, token).await;
                }
            }
            .boxed(),
        )
    }

    fn publish_rejected(&self, observer: &EntityId, subject: &EntityId, e: &EffectError) {
        let mut ev = Event::new(EventKind::GrantRejected).with_reason(e.as_label());
        ev.observer = Some(observer.clone());
        ev.subject = Some(subject.clone());
        self.bus.publish(ev);
    }
}

fn pair_key(observer: &EntityId, subject: &EntityId) -> Result<PairKey, EffectError> {
    if observer.is_empty() {
        return Err(EffectError::InvalidArgument { what: "observer" });
    }
    if subject.is_empty() {
        return Err(EffectError::InvalidArgument { what: "subject" });
    }
    Ok(PairKey {
        observer: observer.clone(),
        subject: subject.clone(),
    })
}

/// Removes the pair's entry if `keep_going` accepts it, pruning an emptied bucket.
fn take_entry(
    buckets: &mut Buckets,
    key: &PairKey,
    keep_going: impl FnOnce(&Entry) -> bool,
) -> Option<Entry> {
    let inner = buckets.get_mut(&key.observer)?;
    if !inner.get(&key.subject).is_some_and(keep_going) {
        return None;
    }
    let entry = inner.remove(&key.subject);
    if inner.is_empty() {
        buckets.remove(&key.observer);
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::presenter::PresenterFn;
    use crate::timer::TokioTimer;
    use std::sync::Mutex as StdMutex;

    type Calls = Arc<StdMutex<Vec<(String, bool, Option<Color>)>>>;

    fn recording(calls: &Calls) -> PresenterRef {
        let calls = Arc::clone(calls);
        PresenterFn::arc(
            "recording",
            move |_o: &EntityId, s: &EntityId, on: bool, c: Option<Color>| {
                calls
                    .lock()
                    .expect("calls lock")
                    .push((s.to_string(), on, c));
                Ok::<_, BackendError>(())
            },
        )
    }

    fn registry(calls: &Calls) -> Arc<EffectRegistry> {
        EffectRegistry::new(
            &Config::default(),
            recording(calls),
            Arc::new(TokioTimer::new()),
            Bus::new(64),
        )
    }

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_token_expiry_is_noop() {
        let calls = Calls::default();
        let reg = registry(&calls);
        reg.grant(&id("o"), &id("s"), Some(Color::Red), None)
            .await
            .expect("grant");
        let current = reg.get(&id("o"), &id("s")).await.expect("entry").token;

        let key = PairKey::new("o", "s");
        reg.expire_if_current(&key, EntryToken(current.get() + 100))
            .await;

        assert!(reg.contains(&id("o"), &id("s")).await);
        assert_eq!(calls.lock().expect("calls").len(), 1);

        reg.expire_if_current(&key, current).await;
        assert!(!reg.contains(&id("o"), &id("s")).await);
        assert_eq!(
            calls.lock().expect("calls").last().cloned(),
            Some(("s".to_string(), false, None))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_on_missing_pair_is_noop() {
        let calls = Calls::default();
        let reg = registry(&calls);
        reg.expire_if_current(&PairKey::new("o", "s"), EntryToken(7))
            .await;
        assert!(calls.lock().expect("calls").is_empty());
        assert!(reg.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_regrant_issues_new_token() {
        let calls = Calls::default();
        let reg = registry(&calls);
        let (o, s) = (id("o"), id("s"));

        reg.grant(&o, &s, Some(Color::Red), Some(Duration::from_secs(1)))
            .await
            .expect("first");
        let first = reg.get(&o, &s).await.expect("entry");
        reg.grant(&o, &s, Some(Color::Blue), Some(Duration::from_secs(2)))
            .await
            .expect("second");
        let second = reg.get(&o, &s).await.expect("entry");

        assert_ne!(first.token, second.token);
        assert_eq!(second.color, Some(Color::Blue));
        assert_eq!(reg.pending_timers().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_buckets_are_pruned() {
        let calls = Calls::default();
        let reg = registry(&calls);
        reg.grant(&id("o"), &id("a"), None, None).await.expect("a");
        reg.grant(&id("o"), &id("b"), None, None).await.expect("b");
        assert_eq!(reg.observer_count().await, 1);

        reg.revoke(&id("o"), &id("a")).await.expect("revoke a");
        assert_eq!(reg.observer_count().await, 1);
        reg.revoke(&id("o"), &id("b")).await.expect("revoke b");
        assert_eq!(reg.observer_count().await, 0);
        assert!(reg.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_ids_are_rejected_without_side_effects() {
        let calls = Calls::default();
        let reg = registry(&calls);

        let err = reg
            .grant(&id(""), &id("s"), Some(Color::Red), None)
            .await
            .expect_err("blank observer");
        assert_eq!(err, EffectError::InvalidArgument { what: "observer" });

        let err = reg.revoke(&id("o"), &id(" ")).await.expect_err("blank subject");
        assert_eq!(err, EffectError::InvalidArgument { what: "subject" });

        assert!(calls.lock().expect("calls").is_empty());
        assert!(reg.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revoke_tracked_uses_registry_keys() {
        let calls = Calls::default();
        let reg = registry(&calls);
        reg.grant(&id("o"), &id("gone"), None, None).await.expect("grant");
        reg.grant(&id("x"), &id("gone"), None, None).await.expect("grant");

        reg.revoke_tracked(&id("o")).await;

        assert!(!reg.contains(&id("o"), &id("gone")).await);
        assert!(reg.contains(&id("x"), &id("gone")).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_is_permanent() {
        let calls = Calls::default();
        let reg = registry(&calls);
        reg.grant(&id("o"), &id("s"), Some(Color::Gold), Some(Duration::ZERO))
            .await
            .expect("grant");

        let info = reg.get(&id("o"), &id("s")).await.expect("entry");
        assert!(info.is_permanent());
        assert!(!info.timer_pending);
    }
}
