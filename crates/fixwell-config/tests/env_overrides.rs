use figment::Jail;
use fixwell_config::FixwellConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("FIXWELL_DATABASE__URL", "libsql://fixwell-test.turso.io");
        jail.set_env("FIXWELL_DATABASE__AUTH_TOKEN", "tok_from_env");

        let config: FixwellConfig = FixwellConfig::figment().extract()?;
        assert_eq!(config.database.url, "libsql://fixwell-test.turso.io");
        assert_eq!(config.database.auth_token, "tok_from_env");
        assert!(config.database.is_remote());
        Ok(())
    });
}

#[test]
fn env_overrides_retry_knobs() {
    Jail::expect_with(|jail| {
        jail.set_env("FIXWELL_DATABASE__MAX_ATTEMPTS", "5");
        jail.set_env("FIXWELL_DATABASE__RECONNECT_PAUSE_MS", "250");

        let config: FixwellConfig = FixwellConfig::figment().extract()?;
        assert_eq!(config.database.max_attempts, 5);
        assert_eq!(config.database.reconnect_pause_ms, 250);
        // Untouched knob keeps its default
        assert_eq!(config.database.backoff_base_ms, 500);
        Ok(())
    });
}
