//! Startup readiness gate: block until the database answers a ping.

use backon::{ConstantBuilder, Retryable};
use sqlx::{AnyConnection, AnyPool, Connection};
use std::io;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::pool::ACQUIRE_TIMEOUT;

/// Default pause between liveness attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub delay: Duration,
    /// `None` retries forever.
    pub max_attempts: Option<usize>,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RETRY_DELAY,
            max_attempts: None,
        }
    }
}

impl ReadinessPolicy {
    fn backoff(&self) -> ConstantBuilder {
        let builder = ConstantBuilder::default().with_delay(self.delay);
        match self.max_attempts {
            // backon counts retries, not attempts
            Some(n) => builder.with_max_times(n.saturating_sub(1)),
            None => builder.without_max_times(),
        }
    }
}

/// Open one connection with the pool's options, ping it and close it.
/// A refused connection fails on the first try with the driver error.
pub async fn check_liveness(pool: &AnyPool) -> Result<(), sqlx::Error> {
    let options = pool.connect_options();
    let attempt = async {
        let mut conn = AnyConnection::connect_with(&options).await?;
        conn.ping().await?;
        conn.close().await
    };
    tokio::time::timeout(ACQUIRE_TIMEOUT, attempt)
        .await
        .unwrap_or_else(|_| {
            Err(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::TimedOut,
                "database did not answer within the connect timeout",
            )))
        })
}

/// Wait for the database, logging each failed attempt with the
/// configured connection parameters.
pub async fn wait_for_database(
    pool: &AnyPool,
    cfg: &Config,
    policy: ReadinessPolicy,
) -> Result<(), sqlx::Error> {
    info!("waiting for the database to become ready");
    let redacted = cfg.redacted_url();
    wait_for_database_with(pool, policy, |err, delay| {
        warn!(
            error = %err,
            retry_in = ?delay,
            host = %cfg.db_host,
            port = cfg.db_port,
            user = %cfg.db_user,
            database = %cfg.db_name,
            url = %redacted,
            "database not ready"
        );
    })
    .await?;
    info!("database is ready");
    Ok(())
}

/// Poll [`check_liveness`] under `policy`. `notify` runs before every retry.
///
/// Returns the last error only when a bounded policy runs out of attempts.
pub async fn wait_for_database_with<F>(
    pool: &AnyPool,
    policy: ReadinessPolicy,
    notify: F,
) -> Result<(), sqlx::Error>
where
    F: FnMut(&sqlx::Error, Duration),
{
    (|| check_liveness(pool))
        .retry(policy.backoff())
        .sleep(tokio::time::sleep)
        .notify(notify)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_retries_forever_every_two_seconds() {
        let policy = ReadinessPolicy::default();
        assert_eq!(policy.delay, Duration::from_secs(2));
        assert_eq!(policy.max_attempts, None);
    }
}
