use tracing_subscriber::EnvFilter;
use vigil::commands::Cli;
use vigil::libs::messages::macros::is_debug_mode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The message macros route through tracing when debug mode is active,
    // so a subscriber is only installed in that case.
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .init();
    }

    Cli::menu().await
}
