//! Environment-driven configuration
//!
//! Each dependency resolves independently: a broken PostgreSQL configuration
//! still lets the Redis check run, and vice versa.

use dependency_health::{
    HealthCheckError, PostgresSettings, RedisSettings, DEFAULT_POSTGRES_HOST,
    DEFAULT_POSTGRES_PORT, DEFAULT_CHECK_TIMEOUT, DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT,
};
use std::time::Duration;
use tracing::warn;

pub const POSTGRES_HOST: &str = "POSTGRES_HOST";
pub const POSTGRES_PORT: &str = "POSTGRES_PORT";
pub const POSTGRES_USER: &str = "POSTGRES_USER";
pub const POSTGRES_PASSWORD: &str = "POSTGRES_PASSWORD";
pub const POSTGRES_DB: &str = "POSTGRES_DB";
pub const REDIS_HOST: &str = "REDIS_HOST";
pub const REDIS_PORT: &str = "REDIS_PORT";
pub const REDIS_PASSWORD: &str = "REDIS_PASSWORD";
pub const TIMEOUT_SECS: &str = "CONNECTION_CHECK_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct Config {
    pub postgres: Result<PostgresSettings, HealthCheckError>,
    pub redis: Result<RedisSettings, HealthCheckError>,
    /// Bound for each network step of every check
    pub timeout: Duration,
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`, which returns the raw value
    /// of a variable or `None` when unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        Self {
            postgres: postgres_settings(&env),
            redis: redis_settings(&env),
            timeout: check_timeout(&env),
        }
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Value of `key`, treating an empty string as unset
    fn non_empty(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    fn or_default(&self, key: &str, default: &str) -> String {
        self.non_empty(key).unwrap_or_else(|| default.to_string())
    }

    fn port(&self, key: &str, default: u16) -> Result<u16, HealthCheckError> {
        match self.non_empty(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| HealthCheckError::invalid_variable(key, raw)),
            None => Ok(default),
        }
    }
}

fn postgres_settings<F>(env: &Lookup<F>) -> Result<PostgresSettings, HealthCheckError>
where
    F: Fn(&str) -> Option<String>,
{
    let user = env.non_empty(POSTGRES_USER);
    let password = env.non_empty(POSTGRES_PASSWORD);
    let database = env.non_empty(POSTGRES_DB);

    let missing: Vec<&str> = [
        (POSTGRES_USER, user.is_none()),
        (POSTGRES_PASSWORD, password.is_none()),
        (POSTGRES_DB, database.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect();

    let (Some(user), Some(password), Some(database)) = (user, password, database) else {
        return Err(HealthCheckError::missing_variables(missing));
    };

    Ok(PostgresSettings {
        host: env.or_default(POSTGRES_HOST, DEFAULT_POSTGRES_HOST),
        port: env.port(POSTGRES_PORT, DEFAULT_POSTGRES_PORT)?,
        user,
        password,
        database,
    })
}

fn redis_settings<F>(env: &Lookup<F>) -> Result<RedisSettings, HealthCheckError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(RedisSettings {
        host: env.or_default(REDIS_HOST, DEFAULT_REDIS_HOST),
        port: env.port(REDIS_PORT, DEFAULT_REDIS_PORT)?,
        password: env.non_empty(REDIS_PASSWORD),
    })
}

fn check_timeout<F>(env: &Lookup<F>) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = env.non_empty(TIMEOUT_SECS) else {
        return DEFAULT_CHECK_TIMEOUT;
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            warn!(
                value = %raw,
                default = ?DEFAULT_CHECK_TIMEOUT,
                "invalid {}, using default",
                TIMEOUT_SECS
            );
            DEFAULT_CHECK_TIMEOUT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[
            (POSTGRES_USER, "app"),
            (POSTGRES_PASSWORD, "secret"),
            (POSTGRES_DB, "orders"),
        ]);

        let postgres = config.postgres.unwrap();
        assert_eq!(postgres.host, "localhost");
        assert_eq!(postgres.port, 5432);
        assert_eq!(postgres.user, "app");
        assert_eq!(postgres.database, "orders");

        assert_eq!(config.redis.unwrap(), RedisSettings::default());
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_every_missing_combination_is_listed_exactly() {
        let required = [POSTGRES_USER, POSTGRES_PASSWORD, POSTGRES_DB];

        for mask in 0u8..8 {
            let present: Vec<(&str, &str)> = required
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, name)| (*name, "value"))
                .collect();
            let expected_missing: Vec<String> = required
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) == 0)
                .map(|(_, name)| name.to_string())
                .collect();

            let config = config_from(&present);

            if expected_missing.is_empty() {
                assert!(config.postgres.is_ok(), "mask {mask:03b}");
            } else {
                assert_eq!(
                    config.postgres.unwrap_err(),
                    HealthCheckError::MissingVariables(expected_missing),
                    "mask {mask:03b}"
                );
            }
        }
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let config = config_from(&[
            (POSTGRES_USER, ""),
            (POSTGRES_PASSWORD, "secret"),
            (POSTGRES_DB, "orders"),
            (POSTGRES_HOST, ""),
            (REDIS_PASSWORD, ""),
        ]);

        assert_eq!(
            config.postgres.unwrap_err().to_string(),
            "Faltan variables: POSTGRES_USER"
        );
        assert_eq!(config.redis.unwrap().password, None);
    }

    #[test]
    fn test_overrides_applied() {
        let config = config_from(&[
            (POSTGRES_HOST, "postgres"),
            (POSTGRES_PORT, "6543"),
            (POSTGRES_USER, "app"),
            (POSTGRES_PASSWORD, "secret"),
            (POSTGRES_DB, "orders"),
            (REDIS_HOST, "redis"),
            (REDIS_PORT, "6380"),
            (REDIS_PASSWORD, "hunter2"),
            (TIMEOUT_SECS, "2"),
        ]);

        let postgres = config.postgres.unwrap();
        assert_eq!(postgres.host, "postgres");
        assert_eq!(postgres.port, 6543);

        let redis = config.redis.unwrap();
        assert_eq!(redis.host, "redis");
        assert_eq!(redis.port, 6380);
        assert_eq!(redis.password.as_deref(), Some("hunter2"));

        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_port_rejects_only_that_dependency() {
        let config = config_from(&[
            (POSTGRES_USER, "app"),
            (POSTGRES_PASSWORD, "secret"),
            (POSTGRES_DB, "orders"),
            (REDIS_PORT, "not-a-port"),
        ]);

        assert!(config.postgres.is_ok());
        assert_eq!(
            config.redis.unwrap_err(),
            HealthCheckError::invalid_variable(REDIS_PORT, "not-a-port")
        );
    }

    #[test]
    fn test_missing_variables_take_precedence_over_invalid_port() {
        let config = config_from(&[(POSTGRES_PORT, "99999"), (POSTGRES_DB, "orders")]);

        assert_eq!(
            config.postgres.unwrap_err(),
            HealthCheckError::missing_variables([POSTGRES_USER, POSTGRES_PASSWORD])
        );
    }

    #[test]
    fn test_invalid_timeout_falls_back_to_default() {
        for raw in ["0", "-3", "soon"] {
            let config = config_from(&[(TIMEOUT_SECS, raw)]);
            assert_eq!(config.timeout, DEFAULT_CHECK_TIMEOUT, "value {raw}");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var(POSTGRES_USER, "env-user");
        std::env::set_var(POSTGRES_PASSWORD, "env-secret");
        std::env::set_var(POSTGRES_DB, "env-db");
        std::env::set_var(REDIS_PORT, "7000");
        // Pin the optional PostgreSQL variables so ambient values cannot leak in
        std::env::set_var(POSTGRES_HOST, "env-host");
        std::env::set_var(POSTGRES_PORT, "5433");

        let config = Config::from_env();

        std::env::remove_var(POSTGRES_USER);
        std::env::remove_var(POSTGRES_PASSWORD);
        std::env::remove_var(POSTGRES_DB);
        std::env::remove_var(REDIS_PORT);
        std::env::remove_var(POSTGRES_HOST);
        std::env::remove_var(POSTGRES_PORT);

        let postgres = config.postgres.unwrap();
        assert_eq!(postgres.user, "env-user");
        assert_eq!(postgres.host, "env-host");
        assert_eq!(postgres.port, 5433);
        assert_eq!(config.redis.unwrap().port, 7000);
    }
}
