#[cfg(test)]
mod tests {
    use chrono::{Duration, Local};
    use std::sync::{Arc, Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vigil::libs::config::HealthConfig;
    use vigil::libs::health::HealthScheduler;
    use vigil::libs::notifier::{NotificationSink, ReminderKind};

    // Tests share process environment variables; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct HealthTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for HealthTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            HealthTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    /// Sink that records every delivered reminder.
    struct RecordingSink {
        fired: Arc<Mutex<Vec<ReminderKind>>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, kind: ReminderKind, _message: &str) -> anyhow::Result<()> {
            self.fired.lock().unwrap().push(kind);
            Ok(())
        }
    }

    /// Sink whose delivery always fails.
    struct FailingSink;

    impl NotificationSink for FailingSink {
        fn notify(&self, _kind: ReminderKind, _message: &str) -> anyhow::Result<()> {
            anyhow::bail!("notification backend unavailable")
        }
    }

    fn recording_scheduler(config: &HealthConfig) -> (HealthScheduler, Arc<Mutex<Vec<ReminderKind>>>) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = HealthScheduler::with_sink(config, Box::new(RecordingSink { fired: fired.clone() })).unwrap();
        scheduler.start().unwrap();
        (scheduler, fired)
    }

    fn counter_index(scheduler: &HealthScheduler, kind: ReminderKind) -> usize {
        scheduler.counters.iter().position(|c| c.kind == kind).unwrap()
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_nothing_fires_before_thresholds(_ctx: &mut HealthTestContext) {
        let (mut scheduler, fired) = recording_scheduler(&HealthConfig::default());

        // 10 minutes of active work: far below every threshold
        for _ in 0..60 {
            scheduler.tick(true, 10).unwrap();
        }
        assert!(fired.lock().unwrap().is_empty());
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_break_fires_once_after_continuous_active_work(_ctx: &mut HealthTestContext) {
        let config = HealthConfig {
            break_threshold: 2,
            ..Default::default()
        };
        let (mut scheduler, fired) = recording_scheduler(&config);

        scheduler.tick(true, 60).unwrap();
        scheduler.tick(true, 60).unwrap();
        assert!(fired.lock().unwrap().is_empty(), "exactly the threshold must not fire yet");

        scheduler.tick(true, 60).unwrap();
        assert_eq!(*fired.lock().unwrap(), vec![ReminderKind::Break]);

        // Firing reset the counter: the immediately following tick is quiet
        scheduler.tick(true, 60).unwrap();
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_idle_pauses_screen_counters_but_not_hydration(_ctx: &mut HealthTestContext) {
        let (mut scheduler, fired) = recording_scheduler(&HealthConfig::default());

        // 40 minutes active + 20 minutes idle + 10 minutes active:
        // only 50 active minutes, so the 50-minute break must not fire
        scheduler.tick(true, 40 * 60).unwrap();
        scheduler.tick(false, 20 * 60).unwrap();
        scheduler.tick(true, 10 * 60).unwrap();
        assert!(
            !fired.lock().unwrap().contains(&ReminderKind::Break),
            "idle time must not count toward the break threshold"
        );

        // Hydration runs on wall-clock time: push its anchor 61 minutes back
        // (the idle gap above cost no progress)
        let hydration = counter_index(&scheduler, ReminderKind::Hydration);
        scheduler.counters[hydration].last_fired_at = Local::now().naive_local() - Duration::minutes(61);
        scheduler.tick(true, 10).unwrap();
        assert!(fired.lock().unwrap().contains(&ReminderKind::Hydration));
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_no_reminder_is_delivered_to_an_idle_user(_ctx: &mut HealthTestContext) {
        let (mut scheduler, fired) = recording_scheduler(&HealthConfig::default());

        let hydration = counter_index(&scheduler, ReminderKind::Hydration);
        scheduler.counters[hydration].last_fired_at = Local::now().naive_local() - Duration::minutes(61);

        // Due, but the user is idle: hold the reminder
        scheduler.tick(false, 10).unwrap();
        assert!(fired.lock().unwrap().is_empty());

        // First active tick delivers it
        scheduler.tick(true, 10).unwrap();
        assert_eq!(*fired.lock().unwrap(), vec![ReminderKind::Hydration]);

        // And the reset prevents an immediate re-fire
        scheduler.tick(true, 10).unwrap();
        assert_eq!(fired.lock().unwrap().len(), 1);
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_logged_break_resets_screen_counters_but_not_hydration(_ctx: &mut HealthTestContext) {
        let (mut scheduler, fired) = recording_scheduler(&HealthConfig::default());

        // Posture counter at 25 of 30 minutes
        let posture = counter_index(&scheduler, ReminderKind::Posture);
        scheduler.counters[posture].active_seconds = 25 * 60;
        let hydration = counter_index(&scheduler, ReminderKind::Hydration);
        scheduler.counters[hydration].last_fired_at = Local::now().naive_local() - Duration::minutes(59);

        scheduler.log_break_taken(5).unwrap();
        assert_eq!(scheduler.counters[posture].active_seconds, 0);

        // 25 more active minutes: still below the refreshed posture threshold
        scheduler.tick(true, 25 * 60).unwrap();
        assert!(!fired.lock().unwrap().contains(&ReminderKind::Posture));

        // Hydration was not reset by the break: 2 more minutes push it over
        scheduler.counters[hydration].last_fired_at = Local::now().naive_local() - Duration::minutes(61);
        scheduler.tick(true, 60).unwrap();
        assert!(fired.lock().unwrap().contains(&ReminderKind::Hydration));

        // Posture needs the full 30 minutes after the break
        scheduler.tick(true, 5 * 60).unwrap();
        scheduler.tick(true, 60).unwrap();
        assert!(fired.lock().unwrap().contains(&ReminderKind::Posture));
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_notification_failure_still_records_and_resets(_ctx: &mut HealthTestContext) {
        let config = HealthConfig {
            break_threshold: 1,
            ..Default::default()
        };
        let mut scheduler = HealthScheduler::with_sink(&config, Box::new(FailingSink)).unwrap();
        scheduler.start().unwrap();

        scheduler.tick(true, 120).unwrap();

        // The attempt counts as having happened even though delivery failed
        let summary = scheduler.today_summary().unwrap();
        assert_eq!(summary.break_reminders, 1);
        let break_idx = counter_index(&scheduler, ReminderKind::Break);
        assert_eq!(scheduler.counters[break_idx].active_seconds, 0);

        // No reminder storm on persistent delivery failure
        scheduler.tick(true, 10).unwrap();
        assert_eq!(scheduler.today_summary().unwrap().break_reminders, 1);
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_multiple_kinds_fire_on_the_same_tick(_ctx: &mut HealthTestContext) {
        let config = HealthConfig {
            break_threshold: 1,
            posture_threshold: 1,
            eye_care_threshold: 1,
            hydration_threshold: 60,
        };
        let (mut scheduler, fired) = recording_scheduler(&config);

        scheduler.tick(true, 120).unwrap();

        let fired = fired.lock().unwrap();
        assert!(fired.contains(&ReminderKind::Break));
        assert!(fired.contains(&ReminderKind::Posture));
        assert!(fired.contains(&ReminderKind::EyeCare));
        assert!(!fired.contains(&ReminderKind::Hydration));
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_today_summary_counts_by_kind(_ctx: &mut HealthTestContext) {
        let config = HealthConfig {
            eye_care_threshold: 1,
            ..Default::default()
        };
        let (mut scheduler, _fired) = recording_scheduler(&config);

        scheduler.log_break_taken(5).unwrap();
        scheduler.log_break_taken(10).unwrap();
        scheduler.tick(true, 120).unwrap();

        let summary = scheduler.today_summary().unwrap();
        assert_eq!(summary.breaks_taken, 2);
        assert_eq!(summary.eye_care_reminders, 1);
        assert_eq!(summary.posture_checks, 0);
        assert_eq!(summary.total_reminders, 1);
    }

    #[test_context(HealthTestContext)]
    #[test]
    fn test_break_logged_in_another_process_resets_counters(_ctx: &mut HealthTestContext) {
        let (mut daemon_side, fired) = recording_scheduler(&HealthConfig::default());
        let posture = counter_index(&daemon_side, ReminderKind::Posture);
        daemon_side.counters[posture].active_seconds = 29 * 60;

        // The CLI process writes a break into the shared event log
        let mut cli_side = HealthScheduler::new(&HealthConfig::default()).unwrap();
        cli_side.log_break_taken(5).unwrap();

        // The daemon's next tick picks the break up and resets its counters
        daemon_side.tick(true, 60).unwrap();
        assert_eq!(daemon_side.counters[posture].active_seconds, 60);
        assert!(fired.lock().unwrap().is_empty());
    }
}
