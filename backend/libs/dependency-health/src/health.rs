//! Health status and per-check reports

use crate::error::HealthCheckError;
use std::fmt;

/// Dependency a check targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    Postgres,
    Redis,
}

impl Dependency {
    /// Label printed in front of every diagnostic line
    pub fn label(self) -> &'static str {
        match self {
            Dependency::Postgres => "POSTGRES",
            Dependency::Redis => "REDIS",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregated health of the checked dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Every dependency answered
    Serving,
    /// At least one dependency failed
    NotServing,
}

impl HealthStatus {
    /// Logical AND over all reports
    pub fn from_reports(reports: &[CheckReport]) -> Self {
        if reports.iter().all(CheckReport::is_healthy) {
            HealthStatus::Serving
        } else {
            HealthStatus::NotServing
        }
    }
}

/// Outcome of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub dependency: Dependency,
    /// Success detail, or the reason the check failed
    pub outcome: Result<String, HealthCheckError>,
}

impl CheckReport {
    pub fn new(dependency: Dependency, outcome: Result<String, HealthCheckError>) -> Self {
        Self {
            dependency,
            outcome,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn status(&self) -> HealthStatus {
        if self.is_healthy() {
            HealthStatus::Serving
        } else {
            HealthStatus::NotServing
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(detail) => write!(f, "[{}] {}", self.dependency, detail),
            Err(e) => write!(f, "[{}] {}", self.dependency, e),
        }
    }
}
