use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gui_sidecar::{Dispatcher, NativeDesktop, SafetyConfig};

fn main() -> anyhow::Result<()> {
    // Logging goes to stderr; stdout is the protocol channel.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let safety = SafetyConfig::from_env();
    tracing::info!(
        pause = ?safety.pause,
        fail_safe = safety.fail_safe,
        "GUI sidecar starting"
    );

    let desktop = NativeDesktop::new(safety.clone())?;
    let mut dispatcher = Dispatcher::new(desktop, safety);

    let stdin = io::stdin();
    let stdout = io::stdout();
    gui_sidecar::server::run(stdin.lock(), &mut stdout.lock(), &mut dispatcher)?;

    // Input stream closed: the controller is done with us.
    tracing::info!("input closed, shutting down");
    Ok(())
}
