//! # Example: glow
//!
//! Grants a few highlights, lets one expire, supersedes another and drains the rest,
//! with the built-in [`LogWriter`] printing every event through `tracing`.
//!
//! ## Flow
//! ```text
//! grant(alex → steve, gold, 1s)   ──► EffectGranted
//! grant(alex → sam, red, 5s)      ──► EffectGranted
//! grant(alex → sam, blue, 2s)     ──► EffectGranted(replaced)   (red timer cancelled)
//! sleep 1.5s                      ──► EffectExpired(alex → steve)
//! shutdown()                      ──► ShutdownRequested ─► RegistryDrained(count=1)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example glow --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use glowvisor::{
    BackendError, Color, Config, EntityId, Glowvisor, LogWriter, PresenterFn, PresenterRef,
    Subscribe,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. A presenter that just prints what each observer would see
    let presenter: PresenterRef = PresenterFn::arc(
        "stdout",
        |o: &EntityId, s: &EntityId, on: bool, c: Option<Color>| {
            match (on, c) {
                (true, Some(c)) => println!("[{o}] {s} glows {c}"),
                (true, None) => println!("[{o}] {s} glows"),
                (false, _) => println!("[{o}] {s} stops glowing"),
            }
            Ok::<_, BackendError>(())
        },
    );

    // 2. Runtime with the logging subscriber attached
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let gv = Glowvisor::builder(Config::default(), presenter)
        .with_subscribers(subs)
        .build();

    let (alex, steve, sam) = (
        EntityId::from("alex"),
        EntityId::from("steve"),
        EntityId::from("sam"),
    );
    let reg = gv.registry();

    // 3. One short highlight, one that gets replaced before it fires
    reg.grant(&alex, &steve, Some(Color::Gold), Some(Duration::from_secs(1)))
        .await?;
    reg.grant(&alex, &sam, Some(Color::Red), Some(Duration::from_secs(5)))
        .await?;
    reg.grant(&alex, &sam, Some(Color::Blue), Some(Duration::from_secs(2)))
        .await?;

    // 4. Let the first one expire
    tokio::time::sleep(Duration::from_millis(1_500)).await;
    println!("alex still sees: {:?}", reg.subjects_of(&alex).await);

    // 5. Drain whatever is left
    gv.shutdown();
    let cause = gv.run().await?;
    println!("stopped: {cause}");
    Ok(())
}
