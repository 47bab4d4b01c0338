mod common;

use std::sync::Arc;

use common::{Harness, id, units};
use glowvisor::{Color, EffectError};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_grants_leave_one_consistent_entry() {
    let h = Arc::new(Harness::new());

    let tasks: Vec<_> = Color::ALL
        .iter()
        .copied()
        .enumerate()
        .map(|(n, color)| {
            let h = Arc::clone(&h);
            tokio::spawn(async move {
                h.registry
                    .grant(&id("o"), &id("s"), Some(color), Some(units(10 + n as u64)))
                    .await
            })
        })
        .collect();
    for t in tasks {
        t.await.expect("join").expect("grant");
    }

    let info = h.registry.get(&id("o"), &id("s")).await.expect("entry");
    assert_eq!(h.registry.len().await, 1);
    assert_eq!(h.timer.pending(), 1);
    // The winning grant was also the last one to reach the presenter.
    assert_eq!(h.presenter.visible("o", "s"), Some(info.color));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_grants_racing_drain_leak_no_timers() {
    let h = Arc::new(Harness::new());

    let grants: Vec<_> = (0..64)
        .map(|n| {
            let h = Arc::clone(&h);
            tokio::spawn(async move {
                let observer = id(&format!("o{}", n % 8));
                let subject = id(&format!("s{n}"));
                h.registry
                    .grant(&observer, &subject, Some(Color::Green), Some(units(30)))
                    .await
            })
        })
        .collect();

    let drainer = {
        let h = Arc::clone(&h);
        tokio::spawn(async move { h.registry.drain().await })
    };

    let mut accepted = 0;
    for g in grants {
        match g.await.expect("join") {
            Ok(()) => accepted += 1,
            Err(e) => assert_eq!(e, EffectError::ShuttingDown),
        }
    }
    let drained = drainer.await.expect("join");

    assert!(drained <= accepted);
    assert!(h.registry.is_empty().await);
    assert_eq!(h.timer.pending(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_revoke_and_grant_interleave_per_pair() {
    let h = Arc::new(Harness::new());

    let tasks: Vec<_> = (0..100)
        .map(|n| {
            let h = Arc::clone(&h);
            tokio::spawn(async move {
                if n % 2 == 0 {
                    h.registry
                        .grant(&id("o"), &id("s"), Some(Color::Red), Some(units(5)))
                        .await
                } else {
                    h.registry.revoke(&id("o"), &id("s")).await
                }
            })
        })
        .collect();
    for t in tasks {
        t.await.expect("join").expect("operation");
    }

    let live = h.registry.contains(&id("o"), &id("s")).await;
    assert_eq!(h.timer.pending(), usize::from(live));
    assert_eq!(h.presenter.visible("o", "s").is_some(), live);
}
