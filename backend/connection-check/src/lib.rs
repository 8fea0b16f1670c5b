//! Reachability check for the PostgreSQL and Redis instances a service needs.
//!
//! Used during local development and container startup: both dependencies are
//! checked once, in order, and the outcome is printed for the operator.

pub mod config;
pub mod report;

use config::Config;
use dependency_health::{
    Dependency, HealthCheck, HealthManager, HealthStatus, PostgresHealthCheck, PostgresSettings,
    RedisHealthCheck, RedisSettings,
};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, warn};

/// Builds the checks for resolved settings
///
/// Only called for dependencies whose configuration resolved, so a factory
/// that is never called means no network activity for that dependency.
pub trait CheckFactory {
    fn postgres(&self, settings: PostgresSettings, timeout: Duration) -> Box<dyn HealthCheck>;
    fn redis(&self, settings: RedisSettings, timeout: Duration) -> Box<dyn HealthCheck>;
}

/// Checks backed by real sqlx and redis connections
pub struct LiveChecks;

impl CheckFactory for LiveChecks {
    fn postgres(&self, settings: PostgresSettings, timeout: Duration) -> Box<dyn HealthCheck> {
        Box::new(PostgresHealthCheck::new(settings).with_timeout(timeout))
    }

    fn redis(&self, settings: RedisSettings, timeout: Duration) -> Box<dyn HealthCheck> {
        Box::new(RedisHealthCheck::new(settings).with_timeout(timeout))
    }
}

/// Register the PostgreSQL check, then the Redis check
pub fn build_manager(config: Config, factory: &dyn CheckFactory) -> HealthManager {
    let mut manager = HealthManager::new();

    match config.postgres {
        Ok(settings) => manager.register_check(factory.postgres(settings, config.timeout)),
        Err(e) => manager.register_misconfigured(Dependency::Postgres, e),
    }

    match config.redis {
        Ok(settings) => manager.register_check(factory.redis(settings, config.timeout)),
        Err(e) => manager.register_misconfigured(Dependency::Redis, e),
    }

    manager
}

/// Run both checks and print the outcome to `out`
///
/// Every check runs regardless of the others. The remediation block is
/// printed only when at least one dependency failed. A failed write to `out`
/// is returned as an error once all checks have finished.
pub async fn run<W: Write>(
    config: Config,
    factory: &dyn CheckFactory,
    mut out: W,
) -> io::Result<HealthStatus> {
    debug!(?config, "resolved configuration");
    let manager = build_manager(config, factory);

    report::write_banner(&mut out)?;

    // Checks keep running after a failed write; the first error is returned afterwards
    let mut write_error: Option<io::Error> = None;
    let reports = manager
        .execute_checks_with(|report| {
            if write_error.is_some() {
                return;
            }
            if let Err(e) = report::write_report(&mut out, report) {
                warn!(error = %e, "failed to write check result");
                write_error = Some(e);
            }
        })
        .await;

    if let Some(e) = write_error {
        return Err(e);
    }

    let status = HealthStatus::from_reports(&reports);
    if status == HealthStatus::NotServing {
        report::write_suggestions(&mut out)?;
    }
    out.flush()?;

    Ok(status)
}
