mod common;

use std::time::Duration;

use common::{Harness, id, units};
use glowvisor::{Color, EffectError, EventKind};

#[tokio::test]
async fn test_only_last_grant_timer_stays_pending() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));

    for (n, color) in [Color::Red, Color::Blue, Color::Green, Color::Gold]
        .into_iter()
        .enumerate()
    {
        h.registry
            .grant(&o, &s, Some(color), Some(units(10 + n as u64)))
            .await
            .expect("grant");
        assert_eq!(h.timer.pending(), 1, "after grant #{n}");
    }

    let info = h.registry.get(&o, &s).await.expect("entry");
    assert_eq!(info.color, Some(Color::Gold));
    assert_eq!(info.duration, Some(units(13)));
    assert_eq!(h.registry.pending_timers().await, 1);
}

#[tokio::test]
async fn test_superseded_timer_does_not_revert_newer_grant() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));

    h.registry
        .grant(&o, &s, Some(Color::Red), Some(units(10)))
        .await
        .expect("red");
    h.registry
        .grant(&o, &s, Some(Color::Blue), Some(units(20)))
        .await
        .expect("blue");

    h.timer.advance(units(10)).await;
    assert_eq!(h.presenter.visible("o", "s"), Some(Some(Color::Blue)));
    assert_eq!(h.presenter.disables("o", "s"), 0);

    h.timer.advance(units(10)).await;
    assert_eq!(h.presenter.visible("o", "s"), None);
    assert_eq!(h.presenter.disables("o", "s"), 1);
    assert!(!h.registry.contains(&o, &s).await);
}

#[tokio::test]
async fn test_stale_callback_that_beat_cancellation_is_noop() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));
    let mut rx = h.bus.subscribe();

    h.registry
        .grant(&o, &s, Some(Color::Red), Some(units(10)))
        .await
        .expect("red");
    h.registry
        .grant(&o, &s, Some(Color::Blue), Some(units(20)))
        .await
        .expect("blue");

    // The cancelled red timer still runs, as if it was already in flight.
    h.timer.advance_ignoring_cancel(units(10)).await;

    assert_eq!(h.presenter.visible("o", "s"), Some(Some(Color::Blue)));
    assert_eq!(
        h.registry.get(&o, &s).await.map(|i| i.color),
        Some(Some(Color::Blue))
    );

    let mut kinds = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        kinds.push(ev.kind);
    }
    assert_eq!(
        kinds,
        vec![
            EventKind::EffectGranted,
            EventKind::EffectGranted,
            EventKind::ExpirySuperseded
        ]
    );
}

#[tokio::test]
async fn test_expiry_reverts_and_removes_entry() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));

    h.registry
        .grant(&o, &s, Some(Color::Red), Some(units(5)))
        .await
        .expect("grant");

    h.timer.advance(Duration::from_millis(4_999)).await;
    assert_eq!(h.presenter.disables("o", "s"), 0);
    assert!(h.registry.contains(&o, &s).await);

    h.timer.advance(Duration::from_millis(1)).await;
    assert_eq!(h.presenter.disables("o", "s"), 1);
    assert!(!h.registry.contains(&o, &s).await);
    assert_eq!(h.registry.observer_count().await, 0);
    assert_eq!(h.timer.pending(), 0);
}

#[tokio::test]
async fn test_revoke_without_entry_skips_presenter() {
    let h = Harness::new();
    h.registry
        .revoke(&id("o"), &id("s"))
        .await
        .expect("nothing to revoke is fine");
    assert!(h.presenter.calls().is_empty());
}

#[tokio::test]
async fn test_revoke_cancels_timer_and_disables_once() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));

    h.registry
        .grant(&o, &s, Some(Color::Aqua), Some(units(30)))
        .await
        .expect("grant");
    assert_eq!(h.timer.pending(), 1);

    h.registry.revoke(&o, &s).await.expect("revoke");
    assert_eq!(h.timer.pending(), 0);
    assert_eq!(h.presenter.disables("o", "s"), 1);

    // Second revoke and the old deadline are both silent.
    h.registry.revoke(&o, &s).await.expect("again");
    h.timer.advance(units(60)).await;
    assert_eq!(h.presenter.disables("o", "s"), 1);
}

#[tokio::test]
async fn test_revoke_all_sweeps_roster() {
    let h = Harness::new();
    let o = id("o");
    let roster = [id("s1"), id("s2"), id("s3")];

    h.registry
        .grant(&o, &roster[0], Some(Color::Red), Some(units(10)))
        .await
        .expect("s1");
    h.registry
        .grant(&o, &roster[2], Some(Color::Red), None)
        .await
        .expect("s3");
    h.presenter.clear();

    h.registry.revoke_all(&o, &roster).await;

    assert_eq!(h.presenter.disables("o", "s1"), 1);
    assert_eq!(h.presenter.disables("o", "s2"), 0);
    assert_eq!(h.presenter.disables("o", "s3"), 1);
    assert_eq!(h.presenter.calls().len(), 2);
    assert!(h.registry.subjects_of(&o).await.is_empty());
    assert_eq!(h.timer.pending(), 0);
}

#[tokio::test]
async fn test_revoke_all_continues_past_failures() {
    let h = Harness::new();
    let o = id("o");
    let roster = [id("s1"), id("s2")];
    for s in &roster {
        h.registry.grant(&o, s, None, None).await.expect("grant");
    }

    h.presenter.set_failing(true);
    h.registry.revoke_all(&o, &roster).await;

    assert_eq!(h.presenter.disables("o", "s1"), 1);
    assert_eq!(h.presenter.disables("o", "s2"), 1);
    assert!(h.registry.is_empty().await);
}

#[tokio::test]
async fn test_drain_cancels_timers_without_presenter_calls() {
    let h = Harness::new();
    h.registry
        .grant(&id("o1"), &id("s1"), Some(Color::Red), Some(units(10)))
        .await
        .expect("o1");
    h.registry
        .grant(&id("o2"), &id("s2"), Some(Color::Blue), Some(units(20)))
        .await
        .expect("o2");
    h.presenter.clear();

    let drained = h.registry.drain().await;

    assert_eq!(drained, 2);
    assert_eq!(h.timer.pending(), 0);
    assert!(h.presenter.calls().is_empty());
    assert!(h.registry.is_empty().await);

    h.timer.advance(units(60)).await;
    assert!(h.presenter.calls().is_empty());
}

#[tokio::test]
async fn test_grant_after_drain_is_rejected() {
    let h = Harness::new();
    h.registry.drain().await;
    assert!(h.registry.is_draining());

    let err = h
        .registry
        .grant(&id("o"), &id("s"), Some(Color::Red), Some(units(1)))
        .await
        .expect_err("draining");
    assert_eq!(err, EffectError::ShuttingDown);
    assert!(h.presenter.calls().is_empty());
    assert_eq!(h.timer.pending(), 0);
}

#[tokio::test]
async fn test_permanent_grant_waits_for_revoke() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));

    h.registry
        .grant(&o, &s, Some(Color::Red), None)
        .await
        .expect("grant");
    assert_eq!(h.timer.pending(), 0);

    h.timer.advance(units(3_600)).await;
    let info = h.registry.get(&o, &s).await.expect("still there");
    assert!(info.is_permanent());
    assert!(!info.timer_pending);

    h.registry.revoke(&o, &s).await.expect("revoke");
    assert!(!h.registry.contains(&o, &s).await);
    assert_eq!(h.presenter.disables("o", "s"), 1);
}

#[tokio::test]
async fn test_failed_grant_leaves_nothing_behind() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));

    h.registry
        .grant(&o, &s, Some(Color::Red), Some(units(10)))
        .await
        .expect("first");

    h.presenter.set_failing(true);
    let err = h
        .registry
        .grant(&o, &s, Some(Color::Blue), Some(units(20)))
        .await
        .expect_err("presenter down");

    assert!(matches!(err, EffectError::Backend(_)));
    assert!(!h.registry.contains(&o, &s).await);
    assert_eq!(h.timer.pending(), 0);
    assert_eq!(h.registry.observer_count().await, 0);
}

#[tokio::test]
async fn test_failed_revoke_still_removes_entry() {
    let h = Harness::new();
    let (o, s) = (id("o"), id("s"));
    h.registry
        .grant(&o, &s, Some(Color::Red), Some(units(10)))
        .await
        .expect("grant");

    h.presenter.set_failing(true);
    let err = h.registry.revoke(&o, &s).await.expect_err("presenter down");

    assert_eq!(err.as_label(), "effect_backend_failed");
    assert!(!h.registry.contains(&o, &s).await);
    assert_eq!(h.timer.pending(), 0);
}

#[tokio::test]
async fn test_pairs_are_independent() {
    let h = Harness::new();
    h.registry
        .grant(&id("a"), &id("b"), Some(Color::Red), Some(units(5)))
        .await
        .expect("a->b");
    h.registry
        .grant(&id("b"), &id("a"), Some(Color::Blue), Some(units(50)))
        .await
        .expect("b->a");

    h.timer.advance(units(5)).await;

    assert!(!h.registry.contains(&id("a"), &id("b")).await);
    assert!(h.registry.contains(&id("b"), &id("a")).await);
    assert_eq!(h.presenter.visible("b", "a"), Some(Some(Color::Blue)));
}
