#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vigil::api::ollama::OllamaConfig;
    use vigil::libs::config::{Config, HealthConfig, MonitorConfig};

    // Tests share process environment variables; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    #[test]
    fn test_monitor_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.sample_interval, 10);
        assert_eq!(config.idle_threshold, 300);
    }

    #[test]
    fn test_health_defaults() {
        let config = HealthConfig::default();
        assert_eq!(config.break_threshold, 50);
        assert_eq!(config.posture_threshold, 30);
        assert_eq!(config.eye_care_threshold, 20);
        assert_eq!(config.hydration_threshold, 60);
    }

    #[test]
    fn test_ollama_defaults() {
        let config = OllamaConfig::default();
        assert_eq!(config.api_url, "http://localhost:11434");
        assert_eq!(config.model, "llama3.2");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_without_file_returns_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.monitor.is_none());
        assert!(config.health.is_none());
        assert!(config.ollama.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_roundtrip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            monitor: Some(MonitorConfig {
                sample_interval: 5,
                idle_threshold: 120,
            }),
            health: Some(HealthConfig {
                break_threshold: 45,
                posture_threshold: 25,
                eye_care_threshold: 15,
                hydration_threshold: 90,
            }),
            ollama: None,
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.monitor, config.monitor);
        assert_eq!(loaded.health, config.health);
        assert!(loaded.ollama.is_none());
    }
}
