//! Activity monitoring: idle/active classification and work sessions.
//!
//! Each sampling tick reads "seconds since last input" from the configured
//! [`InputActivitySource`], classifies the user, persists an activity
//! sample, and maintains the single open work session across idle/active
//! transitions. All session boundaries are wall-clock timestamps derived
//! from the last-seen input time, so a detection delay of up to one
//! sampling interval never inflates a session.

use crate::db::activities::{Activities, ActivitySample};
use crate::db::sessions::Sessions;
use crate::libs::config::MonitorConfig;
use crate::libs::input::{DeviceInput, InputActivitySource};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_info, msg_warning};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use serde_json::json;

/// Classification recorded with every activity sample.
pub const ACTIVITY_ACTIVE: &str = "active";
pub const ACTIVITY_IDLE: &str = "idle";

// Represents the activity monitor.
pub struct Monitor {
    pub config: MonitorConfig,
    input: Box<dyn InputActivitySource>,
    activities: Activities,
    sessions: Sessions,
    is_active: bool,
    open_session: Option<i64>,
    started: bool,
}

impl Monitor {
    /// Creates a monitor backed by the global input-device listener.
    pub fn new(config: MonitorConfig) -> Result<Self> {
        Self::with_source(config, Box::new(DeviceInput::new()))
    }

    /// Creates a monitor with a caller-supplied input source.
    pub fn with_source(config: MonitorConfig, input: Box<dyn InputActivitySource>) -> Result<Self> {
        Ok(Monitor {
            config,
            input,
            activities: Activities::new()?,
            sessions: Sessions::new()?,
            is_active: false,
            open_session: None,
            started: false,
        })
    }

    /// Starts input monitoring. Calling it twice while running is a no-op.
    ///
    /// A session left open by a previous run is closed here, at the newest
    /// persisted sample timestamp, so a crash loses at most the unflushed
    /// tail of that session.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }

        self.input.start()?;

        if let Some(stale) = self.sessions.fetch_open()? {
            let end = self
                .activities
                .last_timestamp()?
                .filter(|t| *t >= stale.start)
                .unwrap_or(stale.start);
            self.sessions.close(stale.id, end)?;
            msg_info!(Message::StaleSessionClosed);
        }

        self.started = true;
        msg_debug!(format!(
            "monitor started: sample_interval={}s idle_threshold={}s",
            self.config.sample_interval, self.config.idle_threshold
        ));
        Ok(())
    }

    /// Performs one sampling tick.
    ///
    /// Classifies the user, writes an activity sample (one retry, then
    /// dropped with a warning), and opens or closes the work session on
    /// idle/active transitions. An active→idle transition closes the
    /// session at the last-seen input time, not at the detection time.
    pub fn sample_tick(&mut self) -> Result<()> {
        let idle_seconds = self.input.seconds_since_last_input();
        let now = local_now();
        let active = idle_seconds < self.config.idle_threshold;

        let sample = ActivitySample {
            id: None,
            timestamp: now,
            activity_type: if active { ACTIVITY_ACTIVE } else { ACTIVITY_IDLE }.to_string(),
            details: json!({ "idle_seconds": idle_seconds }),
        };
        // Sampling must never block on a stuck store: one retry, then drop
        if self.activities.insert(&sample).is_err() {
            if let Err(e) = self.activities.insert(&sample) {
                msg_warning!(Message::SampleWriteFailed(e.to_string()));
            }
        }

        let last_input = now - Duration::seconds(idle_seconds as i64);
        if active && !self.is_active {
            if self.open_session.is_none() {
                let id = self.sessions.open(last_input)?;
                self.open_session = Some(id);
            }
        } else if !active && self.is_active {
            if let Some(id) = self.open_session {
                self.sessions.close(id, last_input)?;
                self.open_session = None;
            }
        }
        self.is_active = active;

        Ok(())
    }

    /// Seconds since the last detected input, for display only.
    pub fn current_idle_time(&self) -> Duration {
        Duration::seconds(self.input.seconds_since_last_input() as i64)
    }

    /// Current idle/active classification, as of the last tick.
    pub fn is_user_active(&self) -> bool {
        self.is_active
    }

    /// Flushes the open session and stops polling.
    ///
    /// Safe to call without a prior `start()`; a second call performs no
    /// further work.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(id) = self.open_session {
            let last_input = local_now() - Duration::seconds(self.input.seconds_since_last_input() as i64);
            self.sessions.close(id, last_input)?;
            self.open_session = None;
            self.is_active = false;
        }
        self.started = false;
        Ok(())
    }
}

// Second-precision local time; sub-second noise only adds jitter to stored
// session bounds.
fn local_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
