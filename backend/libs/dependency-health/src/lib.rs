//! # Dependency Health Library
//!
//! One-shot reachability checks for the PostgreSQL and Redis instances a
//! service depends on. Each check opens a single connection, performs a
//! trivial round trip, and reports a human-readable outcome.
//!
//! ## Features
//!
//! - PostgreSQL check (`SELECT 1` over one unpooled connection)
//! - Redis check (`PING` with bounded connect and response time)
//! - Sequential runner that never short-circuits on failure
//!
//! ## Example
//!
//! ```rust,no_run
//! use dependency_health::{HealthManager, HealthStatus, RedisHealthCheck, RedisSettings};
//!
//! # async fn example() {
//! let mut manager = HealthManager::new();
//! manager.register_check(Box::new(RedisHealthCheck::new(RedisSettings::default())));
//!
//! let reports = manager.execute_checks().await;
//! for report in &reports {
//!     println!("{}", report);
//! }
//! assert_eq!(HealthStatus::from_reports(&reports), HealthStatus::Serving);
//! # }
//! ```

mod checks;
mod error;
mod health;
mod manager;
mod settings;
mod timeout;

pub use checks::{HealthCheck, PostgresHealthCheck, RedisHealthCheck};
pub use error::{HealthCheckError, Result};
pub use health::{CheckReport, Dependency, HealthStatus};
pub use manager::HealthManager;
pub use settings::{
    PostgresSettings, RedisSettings, DEFAULT_POSTGRES_HOST, DEFAULT_POSTGRES_PORT,
    DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT,
};
pub use timeout::{with_timeout, with_timeout_result, TimeoutError, DEFAULT_CHECK_TIMEOUT};
