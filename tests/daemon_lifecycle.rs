#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vigil::libs::daemon;
    use vigil::libs::data_storage::DataStorage;

    // Tests share process environment variables; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct DaemonTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
        pid_file: String,
    }

    impl TestContext for DaemonTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());

            DaemonTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
                pid_file: "vigil.pid".to_string(),
            }
        }
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_pid_file_path_resolution(ctx: &mut DaemonTestContext) {
        let data_storage = DataStorage::new();
        let pid_path = data_storage.get_path(&ctx.pid_file);

        assert!(pid_path.is_ok());
        let path = pid_path.unwrap();
        assert!(path.to_string_lossy().contains(&ctx.pid_file));
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_stop_when_no_daemon_running(ctx: &mut DaemonTestContext) {
        let pid_path = DataStorage::new().get_path(&ctx.pid_file).unwrap();
        let _ = fs::remove_file(&pid_path);

        // Stop succeeds even when no daemon is running
        assert!(daemon::stop().is_ok());
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_stop_with_invalid_pid_file(ctx: &mut DaemonTestContext) {
        let pid_path = DataStorage::new().get_path(&ctx.pid_file).unwrap();
        fs::write(&pid_path, "not_a_number").unwrap();

        // Garbage in the PID file is a reported error, not a panic
        assert!(daemon::stop().is_err());
        let _ = fs::remove_file(&pid_path);
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_stop_with_dead_process_cleans_up_pid_file(ctx: &mut DaemonTestContext) {
        let pid_path = DataStorage::new().get_path(&ctx.pid_file).unwrap();
        // PID far above any live process on the test machine
        fs::write(&pid_path, "999999").unwrap();

        assert!(daemon::stop().is_ok());
        assert!(!pid_path.exists());
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_process_liveness_detection(_ctx: &mut DaemonTestContext) {
        assert!(daemon::is_process_alive(std::process::id()));
        assert!(!daemon::is_process_alive(999999));
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_running_pid_ignores_stale_file(ctx: &mut DaemonTestContext) {
        let pid_path = DataStorage::new().get_path(&ctx.pid_file).unwrap();

        assert_eq!(daemon::running_pid(), None);

        fs::write(&pid_path, "999999").unwrap();
        assert_eq!(daemon::running_pid(), None);

        fs::write(&pid_path, std::process::id().to_string()).unwrap();
        assert_eq!(daemon::running_pid(), Some(std::process::id()));
        let _ = fs::remove_file(&pid_path);
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_second_instance_fails_fast_and_leaves_pid_file(ctx: &mut DaemonTestContext) {
        let pid_path = DataStorage::new().get_path(&ctx.pid_file).unwrap();

        // A live process owns the PID file (this test process stands in for
        // the first daemon instance)
        let first_pid = std::process::id().to_string();
        fs::write(&pid_path, &first_pid).unwrap();

        let result = daemon::spawn();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already running"));

        // The first instance's PID file is untouched
        assert_eq!(fs::read_to_string(&pid_path).unwrap(), first_pid);
        let _ = fs::remove_file(&pid_path);
    }

    #[test_context(DaemonTestContext)]
    #[test]
    fn test_current_executable_detection(_ctx: &mut DaemonTestContext) {
        let current_exe = std::env::current_exe();
        assert!(current_exe.is_ok());

        let exe_path = current_exe.unwrap();
        assert!(exe_path.exists());
        assert!(exe_path.is_file());
    }
}
