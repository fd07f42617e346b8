//! Health reminder scheduling.
//!
//! One counter per reminder kind. Break, posture, and eye-care counters
//! accumulate *active* seconds only, so an idle user is implicitly resting
//! and the countdown pauses. Hydration is not tied to screen exposure and
//! advances on wall-clock time regardless of activity. A reminder fires only
//! on an active tick; firing notifies the sink, appends a health event, and
//! resets the counter, which rate-limits every kind to one firing per
//! threshold window.

use crate::db::health_events::{HealthEvent, HealthEvents, EVENT_BREAK_LOGGED};
use crate::libs::config::HealthConfig;
use crate::libs::messages::Message;
use crate::libs::notifier::{ConsoleNotifier, NotificationSink, ReminderKind};
use crate::msg_warning;
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use serde_json::json;

/// Per-kind reminder state.
///
/// `last_fired_at` drives the wall-clock countdown (hydration); the
/// `active_seconds` accumulator drives the screen-time countdowns.
#[derive(Debug, Clone)]
pub struct ReminderCounter {
    pub kind: ReminderKind,
    pub last_fired_at: NaiveDateTime,
    pub active_seconds: u64,
    pub threshold_seconds: u64,
}

impl ReminderCounter {
    fn reset(&mut self, now: NaiveDateTime) {
        self.last_fired_at = now;
        self.active_seconds = 0;
    }
}

/// Aggregated counts of today's health events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthSummary {
    pub breaks_taken: usize,
    pub break_reminders: usize,
    pub posture_checks: usize,
    pub eye_care_reminders: usize,
    pub hydration_reminders: usize,
    pub total_reminders: usize,
}

/// Decides once per tick whether any reminder kind has crossed its
/// threshold, and fires each due kind exactly once.
pub struct HealthScheduler {
    pub counters: Vec<ReminderCounter>,
    events: HealthEvents,
    notifier: Box<dyn NotificationSink>,
    started: bool,
    /// Newest `break_logged` timestamp already accounted for; breaks logged
    /// from another process land in the event log and are picked up here.
    last_seen_break: Option<NaiveDateTime>,
}

impl HealthScheduler {
    /// Creates a scheduler delivering reminders to the console.
    pub fn new(config: &HealthConfig) -> Result<Self> {
        Self::with_sink(config, Box::new(ConsoleNotifier))
    }

    /// Creates a scheduler with a caller-supplied notification sink.
    pub fn with_sink(config: &HealthConfig, notifier: Box<dyn NotificationSink>) -> Result<Self> {
        let now = local_now();
        let counters = ReminderKind::all()
            .iter()
            .map(|&kind| {
                let threshold_minutes = match kind {
                    ReminderKind::Break => config.break_threshold,
                    ReminderKind::Posture => config.posture_threshold,
                    ReminderKind::EyeCare => config.eye_care_threshold,
                    ReminderKind::Hydration => config.hydration_threshold,
                };
                ReminderCounter {
                    kind,
                    last_fired_at: now,
                    active_seconds: 0,
                    threshold_seconds: threshold_minutes * 60,
                }
            })
            .collect();

        Ok(HealthScheduler {
            counters,
            events: HealthEvents::new()?,
            notifier,
            started: false,
            last_seen_break: None,
        })
    }

    /// Resets all counters to "now" and begins scheduling. Idempotent.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        let now = local_now();
        for counter in self.counters.iter_mut() {
            counter.reset(now);
        }
        // Breaks logged before this point belong to an earlier run
        self.last_seen_break = self.events.last_break_time()?.or(Some(now));
        self.started = true;
        Ok(())
    }

    /// Stops scheduling. Counters keep their state for a later restart.
    pub fn stop(&mut self) {
        self.started = false;
    }

    /// Evaluates every reminder kind for one tick.
    ///
    /// `elapsed_seconds` is the sampling interval that passed since the
    /// previous tick; it feeds the active-seconds accumulators when the user
    /// is active. Multiple kinds may fire on the same tick.
    pub fn tick(&mut self, user_active: bool, elapsed_seconds: u64) -> Result<()> {
        let now = local_now();
        self.absorb_external_breaks(now);

        let mut fired: Vec<(ReminderKind, u64)> = Vec::new();
        for counter in self.counters.iter_mut() {
            let due = match counter.kind {
                // Wall-clock countdown, unaffected by idle periods
                ReminderKind::Hydration => (now - counter.last_fired_at).num_seconds() >= counter.threshold_seconds as i64,
                // Screen-time countdowns freeze while the user is idle.
                // Strictly greater: exactly threshold-many active seconds is
                // the boundary, the next active tick fires
                _ => {
                    if user_active {
                        counter.active_seconds += elapsed_seconds;
                    }
                    counter.active_seconds > counter.threshold_seconds
                }
            };
            // Reminding an idle user is pointless; emission waits for an
            // active tick
            if due && user_active {
                fired.push((counter.kind, counter.active_seconds / 60));
            }
        }

        for (kind, active_minutes) in fired {
            self.fire(kind, active_minutes, now);
        }

        Ok(())
    }

    /// Records a manually taken break.
    ///
    /// A real break also satisfies the posture and eye-care needs, so those
    /// counters reset along with the break counter. Hydration is unaffected.
    pub fn log_break_taken(&mut self, minutes: u64) -> Result<()> {
        let now = local_now();
        self.events.insert(&HealthEvent {
            id: None,
            timestamp: now,
            event_type: EVENT_BREAK_LOGGED.to_string(),
            metadata: json!({ "duration_minutes": minutes }),
        })?;

        self.last_seen_break = Some(now);
        reset_break_counters(&mut self.counters, now);
        Ok(())
    }

    /// Applies break resets originating from another process.
    ///
    /// The `break` CLI command only appends to the event log; a running
    /// daemon notices the new entry here on its next tick.
    fn absorb_external_breaks(&mut self, now: NaiveDateTime) {
        if let Ok(Some(logged)) = self.events.last_break_time() {
            match self.last_seen_break {
                Some(prev) if logged > prev => {
                    self.last_seen_break = Some(logged);
                    reset_break_counters(&mut self.counters, now);
                }
                None => self.last_seen_break = Some(logged),
                _ => {}
            }
        }
    }

    /// Aggregates today's health events into per-kind counts. Pure read.
    pub fn today_summary(&self) -> Result<HealthSummary> {
        let events = self.events.fetch_day(Local::now().date_naive())?;

        let mut summary = HealthSummary::default();
        for event in &events {
            match event.event_type.as_str() {
                EVENT_BREAK_LOGGED => summary.breaks_taken += 1,
                "break_reminder" => summary.break_reminders += 1,
                "posture_reminder" => summary.posture_checks += 1,
                "eye_care_reminder" => summary.eye_care_reminders += 1,
                "hydration_reminder" => summary.hydration_reminders += 1,
                _ => {}
            }
        }
        summary.total_reminders =
            summary.break_reminders + summary.posture_checks + summary.eye_care_reminders + summary.hydration_reminders;
        Ok(summary)
    }

    fn fire(&mut self, kind: ReminderKind, active_minutes: u64, now: NaiveDateTime) {
        let message = match kind {
            ReminderKind::Break => Message::ReminderBreak(active_minutes),
            ReminderKind::Posture => Message::ReminderPosture,
            ReminderKind::EyeCare => Message::ReminderEyeCare,
            ReminderKind::Hydration => Message::ReminderHydration,
        };

        // Delivery failures must not block counter reset or event recording,
        // otherwise a broken notification backend turns into a reminder storm
        if let Err(e) = self.notifier.notify(kind, &message.to_string()) {
            msg_warning!(Message::NotificationFailed(e.to_string()));
        }

        let event = HealthEvent {
            id: None,
            timestamp: now,
            event_type: kind.event_type().to_string(),
            metadata: json!({ "active_minutes": active_minutes }),
        };
        if self.events.insert(&event).is_err() {
            if let Err(e) = self.events.insert(&event) {
                msg_warning!(Message::HealthEventWriteFailed(e.to_string()));
            }
        }

        if let Some(counter) = self.counters.iter_mut().find(|c| c.kind == kind) {
            counter.reset(now);
        }
    }
}

// A real break satisfies the posture and eye-care needs too; hydration is
// deliberately untouched.
fn reset_break_counters(counters: &mut [ReminderCounter], now: NaiveDateTime) {
    for counter in counters.iter_mut() {
        match counter.kind {
            ReminderKind::Break | ReminderKind::Posture | ReminderKind::EyeCare => counter.reset(now),
            ReminderKind::Hydration => {}
        }
    }
}

// Full-precision timestamps: external break detection compares instants
// strictly, so sub-second resolution matters here.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
