#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vigil::db::sessions::Sessions;
    use vigil::libs::config::MonitorConfig;
    use vigil::libs::input::InputActivitySource;
    use vigil::libs::monitor::Monitor;

    // Tests share process environment variables; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Test context for monitor tests. Creates a temporary directory for the
    /// database and points the data storage there.
    struct MonitorTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for MonitorTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            MonitorTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    /// Scriptable input source: the test dials in "seconds since last input".
    struct FakeInput {
        idle: Arc<AtomicU64>,
    }

    impl InputActivitySource for FakeInput {
        fn start(&mut self) -> anyhow::Result<()> {
            Ok(())
        }

        fn seconds_since_last_input(&self) -> u64 {
            self.idle.load(Ordering::SeqCst)
        }
    }

    fn monitor_with_idle(config: MonitorConfig) -> (Monitor, Arc<AtomicU64>) {
        let idle = Arc::new(AtomicU64::new(0));
        let monitor = Monitor::with_source(config, Box::new(FakeInput { idle: idle.clone() })).unwrap();
        (monitor, idle)
    }

    #[test_context(MonitorTestContext)]
    #[test]
    fn test_session_opens_on_activity_and_closes_at_last_input_time(_ctx: &mut MonitorTestContext) {
        let (mut monitor, idle) = monitor_with_idle(MonitorConfig::default());
        let sessions = Sessions::new().unwrap();

        // Idle from the start: no session
        idle.store(400, Ordering::SeqCst);
        monitor.sample_tick().unwrap();
        assert!(!monitor.is_user_active());
        assert!(sessions.fetch_open().unwrap().is_none());

        // Input seen: a session opens
        idle.store(5, Ordering::SeqCst);
        monitor.sample_tick().unwrap();
        assert!(monitor.is_user_active());
        assert!(sessions.fetch_open().unwrap().is_some());

        // Continued activity keeps the same single session open
        monitor.sample_tick().unwrap();
        monitor.sample_tick().unwrap();
        assert_eq!(sessions.fetch_all().unwrap().len(), 1);

        // 301 seconds of silence: idle, and the open session closes
        idle.store(301, Ordering::SeqCst);
        monitor.sample_tick().unwrap();
        assert!(!monitor.is_user_active());
        assert!(sessions.fetch_open().unwrap().is_none());

        let all = sessions.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        let closed = &all[0];
        let end = closed.end.expect("session must be closed");
        assert!(end >= closed.start);
        assert_eq!(closed.active_seconds, (end - closed.start).num_seconds());
    }

    #[test_context(MonitorTestContext)]
    #[test]
    fn test_at_most_one_open_session(_ctx: &mut MonitorTestContext) {
        let (mut monitor, idle) = monitor_with_idle(MonitorConfig::default());
        let sessions = Sessions::new().unwrap();

        for cycle in 0..3 {
            idle.store(0, Ordering::SeqCst);
            for _ in 0..5 {
                monitor.sample_tick().unwrap();
                let open: Vec<_> = sessions.fetch_all().unwrap().into_iter().filter(|s| s.end.is_none()).collect();
                assert!(open.len() <= 1, "more than one open session in cycle {}", cycle);
            }
            idle.store(400, Ordering::SeqCst);
            monitor.sample_tick().unwrap();
            assert!(sessions.fetch_open().unwrap().is_none());
        }

        // Three idle→active→idle cycles produce exactly three closed sessions
        let all = sessions.fetch_all().unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|s| s.end.is_some()));
    }

    #[test_context(MonitorTestContext)]
    #[test]
    fn test_stop_flushes_open_session_and_is_idempotent(_ctx: &mut MonitorTestContext) {
        let (mut monitor, idle) = monitor_with_idle(MonitorConfig::default());
        let sessions = Sessions::new().unwrap();

        idle.store(0, Ordering::SeqCst);
        monitor.sample_tick().unwrap();
        assert!(sessions.fetch_open().unwrap().is_some());

        monitor.stop().unwrap();
        assert!(sessions.fetch_open().unwrap().is_none());
        assert!(!monitor.is_user_active());

        // Second stop performs no further teardown and must not fail
        monitor.stop().unwrap();
        assert_eq!(sessions.fetch_all().unwrap().len(), 1);
    }

    #[test_context(MonitorTestContext)]
    #[test]
    fn test_stop_without_start_is_safe(_ctx: &mut MonitorTestContext) {
        let (mut monitor, _idle) = monitor_with_idle(MonitorConfig::default());
        monitor.stop().unwrap();
    }

    #[test_context(MonitorTestContext)]
    #[test]
    fn test_start_is_idempotent_and_recovers_stale_session(_ctx: &mut MonitorTestContext) {
        let sessions = Sessions::new().unwrap();
        // A session left open by a crashed run
        sessions.open(chrono::Local::now().naive_local() - chrono::Duration::minutes(10)).unwrap();

        let (mut monitor, _idle) = monitor_with_idle(MonitorConfig::default());
        monitor.start().unwrap();
        monitor.start().unwrap();

        assert!(sessions.fetch_open().unwrap().is_none());
        let all = sessions.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].end.is_some());
    }

    #[test_context(MonitorTestContext)]
    #[test]
    fn test_session_closes_at_last_input_time_not_detection_time(_ctx: &mut MonitorTestContext) {
        let config = MonitorConfig {
            sample_interval: 1,
            idle_threshold: 2,
        };
        let (mut monitor, idle) = monitor_with_idle(config);
        let sessions = Sessions::new().unwrap();

        idle.store(0, Ordering::SeqCst);
        monitor.sample_tick().unwrap();
        std::thread::sleep(std::time::Duration::from_secs(3));

        // Idleness detected 3s after the last input: the session end must be
        // backdated to the input time, not stamped at detection
        idle.store(3, Ordering::SeqCst);
        monitor.sample_tick().unwrap();

        let all = sessions.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        let end = all[0].end.expect("session must be closed");
        let seconds_since_end = (chrono::Local::now().naive_local() - end).num_seconds();
        assert!(
            (2..=5).contains(&seconds_since_end),
            "end should sit ~3s in the past, was {}s",
            seconds_since_end
        );
        // One active tick at 1s sampling: duration within one idle-threshold
        assert!(all[0].active_seconds <= 3, "duration was {}s", all[0].active_seconds);
    }
}
