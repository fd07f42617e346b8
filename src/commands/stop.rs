use crate::libs::daemon;
use anyhow::Result;

// Stops the running daemon; succeeds quietly when none is running.
pub fn cmd() -> Result<()> {
    daemon::stop()
}
