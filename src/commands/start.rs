use crate::libs::daemon;
use anyhow::Result;
use clap::Args;

// Arguments for the start command.
#[derive(Debug, Args)]
pub struct StartArgs {
    #[arg(long, help = "Run the daemon in the current process instead of detaching")]
    foreground: bool,
}

// Starts the daemon, detached by default. A second invocation while an
// instance is alive fails with a non-zero exit.
pub async fn cmd(args: StartArgs) -> Result<()> {
    if args.foreground {
        daemon::run().await
    } else {
        daemon::spawn()
    }
}
