use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lambda_runtime::LambdaEvent;
use serde_json::Value;

use crate::{error::DdnsError, firewall::SecurityGroupApi, net::DnsResolver, updater::Updater};

/// Budget used when the runtime did not report an invocation deadline
pub const DEFAULT_INVOCATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Serverless handler owning the updater built at cold start
pub struct InvocationHandler<R: DnsResolver, A: SecurityGroupApi> {
    updater: Updater<R, A>,
}

impl<R: DnsResolver, A: SecurityGroupApi> InvocationHandler<R, A> {
    pub fn new(updater: Updater<R, A>) -> Self {
        Self { updater }
    }

    /// Entry point passed to the Lambda runtime; the event payload is ignored
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<(), lambda_runtime::Error> {
        let budget = remaining_time(event.context.deadline, SystemTime::now())
            .unwrap_or(DEFAULT_INVOCATION_TIMEOUT);
        log::debug!(
            "Invocation {} has {}ms left",
            event.context.request_id,
            budget.as_millis()
        );

        self.invoke(budget).await?;
        Ok(())
    }

    /// Run one update bounded by `budget`
    pub async fn invoke(&self, budget: Duration) -> Result<usize, DdnsError> {
        let updated = self.updater.update_within(budget).await?;
        log::info!(
            "Updated {} rules across {} security groups",
            updated,
            self.updater.config().security_group_ids().len()
        );
        Ok(updated)
    }
}

/// Time left until `deadline_ms` (milliseconds since the Unix epoch)
///
/// Returns `None` when no deadline was reported.
pub fn remaining_time(deadline_ms: u64, now: SystemTime) -> Option<Duration> {
    if deadline_ms == 0 {
        return None;
    }
    let deadline = UNIX_EPOCH + Duration::from_millis(deadline_ms);
    Some(deadline.duration_since(now).unwrap_or(Duration::ZERO))
}
