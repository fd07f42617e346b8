//! Reminder kinds and the notification delivery seam.
//!
//! Delivery is a replaceable collaborator: the scheduler only needs
//! something that accepts "show reminder of kind K." The default sink prints
//! to the console through the message macros; a desktop-notification backend
//! can be slotted in without touching scheduler logic.

use anyhow::Result;
use std::fmt;

/// The four reminder kinds driven by the health scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Break,
    Posture,
    EyeCare,
    Hydration,
}

impl ReminderKind {
    pub fn all() -> [ReminderKind; 4] {
        [ReminderKind::Break, ReminderKind::Posture, ReminderKind::EyeCare, ReminderKind::Hydration]
    }

    /// Event type string recorded in the health event log when this kind fires.
    pub fn event_type(&self) -> &'static str {
        match self {
            ReminderKind::Break => "break_reminder",
            ReminderKind::Posture => "posture_reminder",
            ReminderKind::EyeCare => "eye_care_reminder",
            ReminderKind::Hydration => "hydration_reminder",
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReminderKind::Break => "Break",
            ReminderKind::Posture => "Posture",
            ReminderKind::EyeCare => "Eye care",
            ReminderKind::Hydration => "Hydration",
        };
        write!(f, "{}", label)
    }
}

/// Fire-and-forget reminder delivery.
///
/// A failed delivery is reported to the caller but must never be treated as
/// fatal; the scheduler records the attempt regardless so persistent
/// delivery failures cannot cause reminder storms.
pub trait NotificationSink: Send {
    fn notify(&self, kind: ReminderKind, message: &str) -> Result<()>;
}

/// Default sink printing reminders to the console.
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, kind: ReminderKind, message: &str) -> Result<()> {
        crate::msg_print!(format!("🔔 [{}] {}", kind, message));
        Ok(())
    }
}
