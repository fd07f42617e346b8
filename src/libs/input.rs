//! Input-device activity sources.
//!
//! The monitor only depends on the [`InputActivitySource`] capability:
//! "how many seconds ago was the last keyboard or mouse input." The
//! production implementation listens for global input events via rdev on a
//! dedicated thread; platforms where the hook cannot be installed degrade to
//! reporting permanent activity instead of taking the daemon down.

use crate::libs::messages::Message;
use crate::msg_warning;
use anyhow::Result;
use parking_lot::Mutex;
use rdev::{listen, Event, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Capability interface over "seconds since last user input."
///
/// Implementations must be non-blocking: `seconds_since_last_input` returns
/// the last-known value rather than waiting for events.
pub trait InputActivitySource: Send {
    /// Installs platform hooks. Idempotent.
    fn start(&mut self) -> Result<()>;

    /// Seconds elapsed since the last observed keyboard/mouse event.
    fn seconds_since_last_input(&self) -> u64;
}

/// Global keyboard/mouse listener backed by rdev.
///
/// A dedicated thread runs the blocking rdev event loop and stamps a shared
/// instant on every key press, button press, and wheel event. If the hook
/// fails to install, a shared flag flips and the source reports zero idle
/// time from then on, which classifies the user as always active.
pub struct DeviceInput {
    last_input: Arc<Mutex<Instant>>,
    hook_failed: Arc<AtomicBool>,
    started: bool,
}

impl DeviceInput {
    pub fn new() -> Self {
        DeviceInput {
            last_input: Arc::new(Mutex::new(Instant::now())),
            hook_failed: Arc::new(AtomicBool::new(false)),
            started: false,
        }
    }
}

impl Default for DeviceInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputActivitySource for DeviceInput {
    fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;

        let last_input = self.last_input.clone();
        let hook_failed = self.hook_failed.clone();
        std::thread::spawn(move || {
            if let Err(e) = listen(move |event: Event| match event.event_type {
                EventType::KeyPress(_) | EventType::ButtonPress(_) | EventType::Wheel { .. } => {
                    *last_input.lock() = Instant::now();
                }
                _ => {}
            }) {
                // Logged once; from here on the source reports permanent activity
                if !hook_failed.swap(true, Ordering::SeqCst) {
                    msg_warning!(Message::InputHookDegraded(format!("{:?}", e)));
                }
            }
        });

        Ok(())
    }

    fn seconds_since_last_input(&self) -> u64 {
        if self.hook_failed.load(Ordering::SeqCst) {
            return 0;
        }
        self.last_input.lock().elapsed().as_secs()
    }
}
