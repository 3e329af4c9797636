//! Readiness polling
//!
//! A freshly started node accepts TCP connections well before its
//! collections answer. These helpers poll on a fixed budget instead of
//! sleeping for an arbitrary amount of time.

use shared::{Stage, stage_debug, stage_info, stage_warn};
use tokio::time::sleep;

use crate::config::{ReadinessConfig, ReadinessPolicy};
use crate::error::{TesterError, TesterResult};
use crate::traits::SolrAdmin;

/// How a readiness poll ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessOutcome {
    /// The check succeeded on this attempt (1-based)
    Ready { attempts: u32 },
    /// Budget used up without success; only returned under the lenient policy
    Exhausted { attempts: u32 },
}

impl ReadinessOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReadinessOutcome::Ready { .. })
    }
}

/// Ping `placeholder` until it reports status 0 or the budget runs out.
///
/// Transport and protocol failures are logged and retried, never returned.
pub async fn wait_for_ready(
    admin: &dyn SolrAdmin,
    placeholder: &str,
    config: &ReadinessConfig,
) -> TesterResult<ReadinessOutcome> {
    poll_ping(admin, placeholder, config, 1).await
}

/// Make sure the placeholder collection exists, creating it from `config_set` if needed.
///
/// Each attempt lists collections and creates the placeholder when it is
/// missing. A failed list or create counts as a failed attempt, since the
/// collections API answers before the overseer accepts work. On success the
/// outcome reports how many attempts were used.
pub async fn ensure_placeholder(
    admin: &dyn SolrAdmin,
    placeholder: &str,
    config_set: &str,
    config: &ReadinessConfig,
) -> TesterResult<ReadinessOutcome> {
    let url = admin.endpoint().base_url();

    for attempt in 1..=config.attempts {
        match bootstrap_attempt(admin, placeholder, config_set).await {
            Ok(()) => return Ok(ReadinessOutcome::Ready { attempts: attempt }),
            Err(e) => {
                stage_warn!(Stage::Readiness, "⚠️ Placeholder '{}' not available yet: {}", placeholder, e);
            }
        }

        if attempt < config.attempts {
            sleep(config.interval).await;
        }
    }

    exhausted(url, config)
}

/// Bootstrap the placeholder (when `bootstrap_from` names a config set) and
/// then ping it, both drawing on one attempt budget.
pub async fn await_ready(
    admin: &dyn SolrAdmin,
    placeholder: &str,
    bootstrap_from: Option<&str>,
    config: &ReadinessConfig,
) -> TesterResult<ReadinessOutcome> {
    let mut first_ping = 1;

    if let Some(config_set) = bootstrap_from {
        match ensure_placeholder(admin, placeholder, config_set, config).await? {
            ReadinessOutcome::Ready { attempts } => first_ping = attempts + 1,
            exhausted @ ReadinessOutcome::Exhausted { .. } => return Ok(exhausted),
        }
    }

    poll_ping(admin, placeholder, config, first_ping).await
}

async fn bootstrap_attempt(admin: &dyn SolrAdmin, placeholder: &str, config_set: &str) -> TesterResult<()> {
    let collections = admin.list_collections().await?;
    if collections.iter().any(|c| c == placeholder) {
        stage_debug!(Stage::Readiness, "Placeholder '{}' already exists", placeholder);
        return Ok(());
    }
    admin.create_collection(config_set, placeholder, 1).await
}

// Attempts are numbered across the whole budget; `first` > `attempts` means none are left.
async fn poll_ping(
    admin: &dyn SolrAdmin,
    placeholder: &str,
    config: &ReadinessConfig,
    first: u32,
) -> TesterResult<ReadinessOutcome> {
    let url = admin.endpoint().base_url();
    stage_info!(Stage::Readiness, "⏳ Waiting for {} (max {} attempts)", url, config.attempts);

    for attempt in first..=config.attempts {
        match admin.ping(placeholder).await {
            Ok(result) if result.is_healthy() => {
                stage_info!(Stage::Readiness, "✅ {} is available", url);
                return Ok(ReadinessOutcome::Ready { attempts: attempt });
            }
            Ok(result) => {
                stage_debug!(Stage::Readiness, "Ping on '{}' returned status {}", placeholder, result.status);
            }
            Err(e) => {
                stage_warn!(Stage::Readiness, "⚠️ {}", e);
            }
        }

        if attempt < config.attempts {
            stage_info!(Stage::Readiness, "Waiting for {}", url);
            sleep(config.interval).await;
        }
    }

    exhausted(url, config)
}

fn exhausted(url: String, config: &ReadinessConfig) -> TesterResult<ReadinessOutcome> {
    match config.policy {
        ReadinessPolicy::Strict => Err(TesterError::NotReady {
            url,
            attempts: config.attempts,
        }),
        ReadinessPolicy::Lenient => {
            stage_warn!(
                Stage::Readiness,
                "⏰ {} not ready after {} attempts, continuing anyway",
                url,
                config.attempts
            );
            Ok(ReadinessOutcome::Exhausted {
                attempts: config.attempts,
            })
        }
    }
}
