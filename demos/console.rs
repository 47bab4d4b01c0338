//! # Example: console
//!
//! Drives the operator command surface with a scripted session and prints the
//! outcome of every line, plus the events it caused.
//!
//! ## Run
//! ```bash
//! cargo run --example console
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use glowvisor::{
    BackendError, Color, Config, EntityId, Event, EventKind, Glowvisor, MemoryDirectory,
    PresenterFn, Sender, Subscribe,
};

struct Tally {
    granted: AtomicU64,
    revoked: AtomicU64,
    expired: AtomicU64,
}

impl Tally {
    fn new() -> Self {
        Self {
            granted: AtomicU64::new(0),
            revoked: AtomicU64::new(0),
            expired: AtomicU64::new(0),
        }
    }

    fn print(&self) {
        println!();
        println!("Events:");
        println!(" ├─► Granted: {}", self.granted.load(Ordering::Relaxed));
        println!(" ├─► Revoked: {}", self.revoked.load(Ordering::Relaxed));
        println!(" └─► Expired: {}", self.expired.load(Ordering::Relaxed));
    }
}

#[async_trait::async_trait]
impl Subscribe for Tally {
    async fn on_event(&self, ev: &Event) {
        let counter = match ev.kind {
            EventKind::EffectGranted => &self.granted,
            EventKind::EffectRevoked => &self.revoked,
            EventKind::EffectExpired => &self.expired,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn name(&self) -> &'static str {
        "tally"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let presenter = PresenterFn::arc(
        "stdout",
        |o: &EntityId, s: &EntityId, on: bool, c: Option<Color>| {
            println!("    presenter: {o} -> {s} glowing={on} color={c:?}");
            Ok::<_, BackendError>(())
        },
    );

    let tally = Arc::new(Tally::new());
    let gv = Glowvisor::builder(Config::default(), presenter)
        .with_subscribers(vec![tally.clone() as Arc<dyn Subscribe>])
        .build();

    let directory = MemoryDirectory::new([("Alex", "alex"), ("Steve", "steve"), ("Sam", "sam")]);
    let cmds = gv.commands(Arc::new(directory));

    let op = Sender::player("alex", true);
    let guest = Sender::player("sam", false);

    let script: [(&Sender, &str); 8] = [
        (&op, "effect alex steve gold 20"),
        (&op, "effect alex sam light_purple"),
        (&op, "effect alex steve aqua 10"),
        (&op, "effect alex herobrine red"),
        (&op, "effect alex steve teal"),
        (&guest, "cancel alex steve"),
        (&op, "cancel alex sam"),
        (&op, "cancelall"),
    ];

    for (sender, line) in script {
        println!("> {line}");
        match cmds.dispatch(sender, line).await {
            Ok(()) => println!("    ok"),
            Err(e) => println!("    {} ({})", e.as_message(), e.as_label()),
        }
    }

    cmds.dispatch(&op, "effect steve alex red 10").await?;
    tokio::time::sleep(Duration::from_millis(700)).await;

    gv.shutdown();
    gv.run().await?;
    tally.print();
    Ok(())
}
