#[cfg(test)]
mod tests {
    use crate::{apply_env_overrides_from_marker, load_config_from, AppConfig, SECRET_FROM_ENV};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "advisor-config-{}-{}-{}",
            tag,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_defaults_without_any_source() {
        let dir = scratch_dir("empty");
        let config = load_config_from(&dir, "debug", "ADVISOR_TEST_EMPTY").unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.cookie_name, "advisor_browser");
        assert_eq!(config.display.time_zone, "UTC");
        assert_eq!(config.api.browser_url(), "http://localhost:8080");
    }

    #[test]
    fn test_run_env_file_overrides_default_file() {
        let dir = scratch_dir("layers");
        fs::write(
            dir.join("default.toml"),
            "[server]\nport = 4000\n[api]\nbase_url = \"http://backend:8080\"\n",
        )
        .unwrap();
        fs::write(dir.join("staging.toml"), "[server]\nport = 4100\n").unwrap();

        let config = load_config_from(&dir, "staging", "ADVISOR_TEST_LAYERS").unwrap();

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.api.base_url, "http://backend:8080");
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = scratch_dir("env");
        fs::write(dir.join("default.toml"), "[api]\ntimeout_secs = 10\n").unwrap();
        std::env::set_var("ADVISOR_TEST_ENV_API__TIMEOUT_SECS", "45");

        let config = load_config_from(&dir, "debug", "ADVISOR_TEST_ENV").unwrap();

        assert_eq!(config.api.timeout_secs, 45);
    }

    #[test]
    fn test_secret_marker_is_replaced_from_environment() {
        let mut config = AppConfig::default();
        config.session.cookie_secret = Some(SECRET_FROM_ENV.to_string());
        std::env::set_var("SESSION_COOKIE_SECRET", "s".repeat(64));

        let config = apply_env_overrides_from_marker(config).unwrap();

        assert_eq!(config.session.cookie_secret, Some("s".repeat(64)));
    }

    #[test]
    fn test_public_origin_falls_back_to_server_address() {
        let mut config = AppConfig::default();
        assert_eq!(config.public_origin(), "http://127.0.0.1:3000");

        config.public_url = Some("https://book.example.com/".to_string());
        assert_eq!(config.public_origin(), "https://book.example.com");
    }
}
