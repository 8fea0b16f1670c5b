//! Sequential check runner

use crate::checks::HealthCheck;
use crate::error::HealthCheckError;
use crate::health::{CheckReport, Dependency, HealthStatus};
use tracing::{debug, warn};

enum Entry {
    Ready(Box<dyn HealthCheck>),
    /// Configuration was rejected before a check could be built
    Misconfigured {
        dependency: Dependency,
        error: HealthCheckError,
    },
}

/// Health check manager
///
/// Runs every registered check one after another, in registration order.
/// A failing check never stops the ones registered after it.
#[derive(Default)]
pub struct HealthManager {
    entries: Vec<Entry>,
}

impl HealthManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a check ready to run
    pub fn register_check(&mut self, check: Box<dyn HealthCheck>) {
        self.entries.push(Entry::Ready(check));
    }

    /// Register a dependency whose configuration failed
    ///
    /// It is reported as failed without any network activity.
    pub fn register_misconfigured(&mut self, dependency: Dependency, error: HealthCheckError) {
        self.entries.push(Entry::Misconfigured { dependency, error });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Execute all registered checks and collect their reports
    pub async fn execute_checks(&self) -> Vec<CheckReport> {
        self.execute_checks_with(|_| {}).await
    }

    /// Execute all registered checks, handing each report to `on_report`
    /// as soon as its check finishes
    pub async fn execute_checks_with<F>(&self, mut on_report: F) -> Vec<CheckReport>
    where
        F: FnMut(&CheckReport),
    {
        let mut reports = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let report = match entry {
                Entry::Ready(check) => {
                    let dependency = check.dependency();
                    debug!(%dependency, "running check");
                    CheckReport::new(dependency, check.check().await)
                }
                Entry::Misconfigured { dependency, error } => {
                    CheckReport::new(*dependency, Err(error.clone()))
                }
            };

            match &report.outcome {
                Ok(_) => debug!(
                    dependency = %report.dependency,
                    status = ?report.status(),
                    "check passed"
                ),
                Err(e) => warn!(
                    dependency = %report.dependency,
                    status = ?report.status(),
                    configuration = e.is_configuration(),
                    error = %e,
                    "check failed"
                ),
            }

            on_report(&report);
            reports.push(report);
        }

        let status = HealthStatus::from_reports(&reports);
        debug!(?status, checks = reports.len(), "all checks finished");
        reports
    }
}
