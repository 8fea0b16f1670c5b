//! Check implementations for PostgreSQL and Redis

use crate::error::{HealthCheckError, Result};
use crate::health::Dependency;
use crate::settings::{PostgresSettings, RedisSettings};
use crate::timeout::{with_timeout, with_timeout_result, DEFAULT_CHECK_TIMEOUT};
use async_trait::async_trait;
use sqlx::{Connection, PgConnection};
use std::time::Duration;
use tracing::{debug, warn};

/// Trait for dependency checks
///
/// Implement this trait to plug a check into [`crate::HealthManager`].
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Dependency this check targets
    fn dependency(&self) -> Dependency;

    /// Perform the check
    ///
    /// Returns a human-readable success detail, or an error describing the problem.
    async fn check(&self) -> Result<String>;
}

/// PostgreSQL check
///
/// Opens one connection, runs `SELECT 1`, and closes the connection again.
pub struct PostgresHealthCheck {
    settings: PostgresSettings,
    timeout: Duration,
}

impl PostgresHealthCheck {
    /// Create a new PostgreSQL health check with the default timeout
    pub fn new(settings: PostgresSettings) -> Self {
        Self {
            settings,
            timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    /// Bound each network step (connect, query, close) by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HealthCheck for PostgresHealthCheck {
    fn dependency(&self) -> Dependency {
        Dependency::Postgres
    }

    async fn check(&self) -> Result<String> {
        let PostgresSettings {
            host,
            port,
            database,
            ..
        } = &self.settings;

        debug!(host = %host, port, database = %database, "connecting to PostgreSQL");
        let mut conn = with_timeout_result(
            self.timeout,
            PgConnection::connect_with(&self.settings.connect_options()),
        )
        .await
        .map_err(HealthCheckError::database)?;

        let round_trip = with_timeout_result(
            self.timeout,
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&mut conn),
        )
        .await;

        // Released on every path once opened
        match with_timeout(self.timeout, conn.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "failed to close PostgreSQL connection cleanly"),
            Err(e) => warn!(error = %e, "closing PostgreSQL connection timed out"),
        }

        let value = round_trip.map_err(HealthCheckError::database)?;
        debug!(value, "PostgreSQL round-trip statement returned");

        Ok(format!("Conexión OK a {}:{} base '{}'", host, port, database))
    }
}

/// Redis check
///
/// Opens one multiplexed connection and sends `PING`.
pub struct RedisHealthCheck {
    settings: RedisSettings,
    timeout: Duration,
}

impl RedisHealthCheck {
    /// Create a new Redis health check with the default timeout
    pub fn new(settings: RedisSettings) -> Self {
        Self {
            settings,
            timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    /// Bound the connect and `PING` steps by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl HealthCheck for RedisHealthCheck {
    fn dependency(&self) -> Dependency {
        Dependency::Redis
    }

    async fn check(&self) -> Result<String> {
        let RedisSettings { host, port, .. } = &self.settings;

        let client = redis::Client::open(self.settings.url()).map_err(HealthCheckError::cache)?;

        debug!(host = %host, port, "connecting to Redis");
        let mut conn = with_timeout_result(self.timeout, client.get_multiplexed_async_connection())
            .await
            .map_err(HealthCheckError::cache)?;

        let pong = with_timeout_result(
            self.timeout,
            redis::cmd("PING").query_async::<_, String>(&mut conn),
        )
        .await
        .map_err(HealthCheckError::cache)?;

        Ok(format!("Conexión OK a {}:{} (PING={})", host, port, pong))
    }
}
